//! Backend registry and capability probing.
//!
//! Adapters register one factory per API generation they were built with.
//! [`BackendRegistry::select`] then walks the generations in preference
//! order and returns the first backend that constructs successfully.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::capability::ApiGeneration;
use crate::error::{HalError, HalResult};

/// Factory function type for registered backends.
type Factory = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

struct Entry {
    generation: ApiGeneration,
    factory: Factory,
}

/// Which API generation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Newest available generation.
    #[default]
    Auto,
    /// Only the sampling generation.
    Sampling,
    /// Only the legacy execute generation.
    Legacy,
}

impl BackendPreference {
    /// Generations to probe, in order.
    pub fn generations(self) -> &'static [ApiGeneration] {
        match self {
            BackendPreference::Auto => &ApiGeneration::PREFERENCE_ORDER,
            BackendPreference::Sampling => &[ApiGeneration::Sampling],
            BackendPreference::Legacy => &[ApiGeneration::LegacyExecute],
        }
    }
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendPreference::Auto => "auto",
            BackendPreference::Sampling => "sampling",
            BackendPreference::Legacy => "legacy",
        })
    }
}

impl FromStr for BackendPreference {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BackendPreference::Auto),
            "sampling" | "sampler" => Ok(BackendPreference::Sampling),
            "legacy" | "execute" => Ok(BackendPreference::Legacy),
            other => Err(HalError::Configuration(format!(
                "unknown backend preference '{other}' (expected auto, sampling or legacy)"
            ))),
        }
    }
}

/// Central registry of simulation backends.
pub struct BackendRegistry {
    entries: FxHashMap<String, Entry>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register a backend type under `name`.
    pub fn register<B>(&mut self, name: impl Into<String>, generation: ApiGeneration)
    where
        B: BackendFactory + 'static,
    {
        self.register_factory(name, generation, |config| {
            let backend = B::from_config(config)?;
            Ok(Box::new(backend))
        });
    }

    /// Register a backend factory with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        generation: ApiGeneration,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(backend = %name, %generation, "registering backend");
        self.entries.insert(
            name,
            Entry {
                generation,
                factory: Box::new(factory),
            },
        );
    }

    /// Create a backend by name.
    pub fn create(&self, name: &str, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        match self.entries.get(name) {
            Some(entry) => (entry.factory)(config),
            None => Err(HalError::BackendUnavailable(format!(
                "No backend registered with name '{name}'"
            ))),
        }
    }

    /// Probe for a backend according to `preference`.
    ///
    /// Generations are tried in preference order; within a generation,
    /// backends are tried by name. A factory that fails is skipped.
    pub fn select(
        &self,
        preference: BackendPreference,
        config: &BackendConfig,
    ) -> HalResult<Box<dyn Backend>> {
        for &generation in preference.generations() {
            for name in self.names_for(generation) {
                match self.create(name, config.clone()) {
                    Ok(backend) => {
                        info!(backend = %name, %generation, "selected simulation backend");
                        return Ok(backend);
                    }
                    Err(e) => debug!(backend = %name, %generation, error = %e, "backend probe failed"),
                }
            }
        }

        Err(HalError::BackendUnavailable(format!(
            "no simulation capability available for preference '{preference}'"
        )))
    }

    /// Registered names of one generation, sorted.
    fn names_for(&self, generation: ApiGeneration) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.generation == generation)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// All registered backends with their generation, sorted by name.
    pub fn available_backends(&self) -> Vec<(String, ApiGeneration)> {
        let mut backends: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.generation))
            .collect();
        backends.sort_by(|a, b| a.0.cmp(&b.0));
        backends
    }

    /// Check if any backend of a generation is registered.
    pub fn has_generation(&self, generation: ApiGeneration) -> bool {
        self.entries.values().any(|e| e.generation == generation)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capabilities;
    use crate::result::Counts;
    use async_trait::async_trait;
    use qplay_ir::Circuit;

    struct Named {
        caps: Capabilities,
    }

    #[async_trait]
    impl Backend for Named {
        fn name(&self) -> &str {
            &self.caps.name
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn run(&self, _circuit: &Circuit, _shots: u32) -> HalResult<Counts> {
            Ok(Counts::new())
        }
    }

    fn ok_factory(
        name: &'static str,
        generation: ApiGeneration,
    ) -> impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static {
        move |_| {
            Ok(Box::new(Named {
                caps: Capabilities::simulator(name, generation, 4),
            }) as Box<dyn Backend>)
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = BackendRegistry::new();
        assert!(registry.available_backends().is_empty());
        assert!(!registry.has_generation(ApiGeneration::Sampling));
        assert!(matches!(
            registry.select(BackendPreference::Auto, &BackendConfig::new("x")),
            Err(HalError::BackendUnavailable(_))
        ));
    }

    #[test]
    fn test_create_unknown_backend() {
        let registry = BackendRegistry::new();
        let result = registry.create("nonexistent", BackendConfig::new("nonexistent"));
        assert!(result.is_err());
    }

    #[test]
    fn test_auto_prefers_sampling() {
        let mut registry = BackendRegistry::new();
        registry.register_factory(
            "legacy",
            ApiGeneration::LegacyExecute,
            ok_factory("legacy", ApiGeneration::LegacyExecute),
        );
        registry.register_factory(
            "sampler",
            ApiGeneration::Sampling,
            ok_factory("sampler", ApiGeneration::Sampling),
        );

        let backend = registry
            .select(BackendPreference::Auto, &BackendConfig::new("x"))
            .unwrap();
        assert_eq!(backend.name(), "sampler");

        let backend = registry
            .select(BackendPreference::Legacy, &BackendConfig::new("x"))
            .unwrap();
        assert_eq!(backend.name(), "legacy");
    }

    #[test]
    fn test_failed_probe_falls_back() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("sampler", ApiGeneration::Sampling, |_| {
            Err(HalError::BackendUnavailable("not installed".into()))
        });
        registry.register_factory(
            "legacy",
            ApiGeneration::LegacyExecute,
            ok_factory("legacy", ApiGeneration::LegacyExecute),
        );

        let backend = registry
            .select(BackendPreference::Auto, &BackendConfig::new("x"))
            .unwrap();
        assert_eq!(backend.capabilities().generation, ApiGeneration::LegacyExecute);

        assert!(
            registry
                .select(BackendPreference::Sampling, &BackendConfig::new("x"))
                .is_err()
        );
    }

    #[test]
    fn test_available_backends_sorted() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("zebra", ApiGeneration::Sampling, |_| {
            Err(HalError::BackendUnavailable("test".into()))
        });
        registry.register_factory("alpha", ApiGeneration::LegacyExecute, |_| {
            Err(HalError::BackendUnavailable("test".into()))
        });

        let names: Vec<String> = registry
            .available_backends()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["alpha", "zebra"]);
        assert!(registry.has_generation(ApiGeneration::Sampling));
    }

    #[test]
    fn test_preference_from_str() {
        assert_eq!("AUTO".parse::<BackendPreference>().unwrap(), BackendPreference::Auto);
        assert_eq!(
            "legacy".parse::<BackendPreference>().unwrap(),
            BackendPreference::Legacy
        );
        assert!("quantum".parse::<BackendPreference>().is_err());
    }
}
