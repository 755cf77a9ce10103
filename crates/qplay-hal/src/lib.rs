//! qplay Simulation Backend Abstraction
//!
//! This crate defines the seam between the engine and whatever simulation
//! capability is installed. Simulators come in more than one API generation;
//! each generation is wrapped as a [`Backend`] and advertises itself through
//! [`Capabilities`], so the engine can pick one once, up front, and never
//! branch on generations again.
//!
//! # Core Components
//!
//! - [`Backend`]: async trait every simulator adapter implements
//! - [`Capabilities`] / [`ApiGeneration`]: what a backend is and what it can run
//! - [`BackendRegistry`]: factories keyed by name, with preference-ordered probing
//! - [`Counts`] / [`Amplitude`]: result types shared by all backends
//!
//! # Example: Selecting a backend
//!
//! ```rust,ignore
//! use qplay_hal::{BackendConfig, BackendPreference};
//!
//! let registry = qplay_adapter_sim::registry();
//! let backend = registry.select(BackendPreference::Auto, &BackendConfig::new("sim"))?;
//! let counts = backend.run(&circuit, 1024).await?;
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod registry;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory};
pub use capability::{ApiGeneration, Capabilities};
pub use error::{HalError, HalResult};
pub use registry::{BackendPreference, BackendRegistry};
pub use result::{Amplitude, Counts};
