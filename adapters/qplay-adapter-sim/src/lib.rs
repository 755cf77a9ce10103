//! qplay Local Statevector Simulator
//!
//! This crate provides the simulation capability behind the qplay engine. The
//! same statevector core is exposed through two API generations, each
//! compiled in by its own cargo feature:
//!
//! | Feature | Primitive | Backend | Result shape |
//! |---------|-----------|---------|--------------|
//! | `sampler` | [`Sampler`] | [`SamplingBackend`] | quasi-probability distribution |
//! | `legacy-execute` | [`LegacyExecutor`] | [`LegacyExecuteBackend`] | per-shot counts |
//!
//! [`registry()`] registers whichever generations were compiled in, so the
//! engine can probe for the newest one at startup.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//!
//! # Example
//!
//! ```ignore
//! use qplay_hal::{BackendConfig, BackendPreference};
//!
//! let registry = qplay_adapter_sim::registry();
//! let backend = registry.select(BackendPreference::Auto, &BackendConfig::new("sim"))?;
//! let counts = backend.run(&circuit, 1000).await?;
//! println!("{:?}", counts.sorted_by_count());
//! ```

mod common;
#[cfg(feature = "legacy-execute")]
mod legacy;
#[cfg(feature = "sampler")]
mod sampler;
mod statevector;

#[cfg(feature = "legacy-execute")]
pub use legacy::{LegacyExecuteBackend, LegacyExecutor};
#[cfg(feature = "sampler")]
pub use sampler::{QuasiDistribution, Sampler, SamplingBackend};
pub use statevector::{Statevector, outcome_to_bitstring};

use qplay_hal::BackendRegistry;

/// Qubit limit when the configuration sets none.
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// Hard qubit limit of the statevector core.
pub const MAX_SUPPORTED_QUBITS: u32 = 28;

/// Registry with every API generation compiled into this build.
pub fn registry() -> BackendRegistry {
    #[allow(unused_mut)]
    let mut registry = BackendRegistry::new();
    #[cfg(feature = "sampler")]
    registry.register::<SamplingBackend>(
        SamplingBackend::NAME,
        qplay_hal::ApiGeneration::Sampling,
    );
    #[cfg(feature = "legacy-execute")]
    registry.register::<LegacyExecuteBackend>(
        LegacyExecuteBackend::NAME,
        qplay_hal::ApiGeneration::LegacyExecute,
    );
    registry
}
