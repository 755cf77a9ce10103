//! Backend capability introspection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which simulator API shape a backend wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiGeneration {
    /// Sampling primitive returning a quasi-probability distribution.
    Sampling,
    /// Synchronous execute call returning per-shot counts.
    LegacyExecute,
}

impl ApiGeneration {
    /// Probe order when no generation is requested: newest first.
    pub const PREFERENCE_ORDER: [ApiGeneration; 2] =
        [ApiGeneration::Sampling, ApiGeneration::LegacyExecute];

    /// Short name used in logs and listings.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiGeneration::Sampling => "sampling",
            ApiGeneration::LegacyExecute => "legacy-execute",
        }
    }
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a backend is and what it can run.
///
/// Backends build this once at construction; [`Backend::capabilities`]
/// returns a reference to the cached value.
///
/// [`Backend::capabilities`]: crate::Backend::capabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// API generation the backend wraps.
    pub generation: ApiGeneration,
    /// Largest circuit, in qubits, the backend accepts.
    pub max_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether exact amplitudes can be extracted.
    pub statevector: bool,
    /// Free-form feature flags, e.g. `"seeded"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator.
    pub fn simulator(name: impl Into<String>, generation: ApiGeneration, max_qubits: u32) -> Self {
        Self {
            name: name.into(),
            generation,
            max_qubits,
            max_shots: 1_000_000,
            statevector: true,
            features: vec![],
        }
    }

    /// Set the shot limit.
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Add a feature flag.
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Whether a feature flag is set.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator("sim", ApiGeneration::Sampling, 20)
            .with_max_shots(10_000)
            .with_feature("seeded");

        assert_eq!(caps.max_qubits, 20);
        assert_eq!(caps.max_shots, 10_000);
        assert!(caps.statevector);
        assert!(caps.has_feature("seeded"));
        assert!(!caps.has_feature("noise"));
    }

    #[test]
    fn test_generation_serde() {
        let json = serde_json::to_string(&ApiGeneration::LegacyExecute).unwrap();
        assert_eq!(json, "\"legacy_execute\"");
        assert_eq!(ApiGeneration::Sampling.to_string(), "sampling");
    }
}
