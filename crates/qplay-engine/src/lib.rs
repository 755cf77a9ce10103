//! qplay Engine
//!
//! Ties the circuit IR, the assembly formats and the simulation backends
//! together behind one request/response surface:
//!
//! - **simulate**: build, run under a deadline, return counts and (for small
//!   circuits) the statevector
//! - **validate**: build only, report shape
//! - **export_qasm** / **export_code**: OpenQASM 2.0 text or Python source
//! - **import_qasm**: assembly text back to a circuit description
//!
//! The backend is chosen once, when the [`Engine`] is constructed, by probing
//! the simulator API generations compiled into this build. Every simulate
//! call is bounded by its own timer, so a slow or stuck backend never holds
//! the caller past the configured timeout.
//!
//! # Example
//!
//! ```ignore
//! use qplay_engine::{Engine, EngineConfig, SimulateRequest};
//! use qplay_ir::{CircuitData, GateData};
//!
//! let engine = Engine::new(EngineConfig::load(None)?);
//! let data = CircuitData {
//!     qubits: 2,
//!     gates: vec![GateData::new("H", [0]), GateData::new("CNOT", [0, 1])],
//! };
//! let response = engine.simulate(&SimulateRequest::new(data)).await;
//! assert!(response.success);
//! ```

pub mod config;
pub mod dto;
pub mod engine;
pub mod error;
pub mod executor;
pub mod telemetry;

pub use config::{BackendSection, ConfigError, EngineConfig, ExecutionConfig, LoggingConfig};
pub use dto::{
    ExportCodeResponse, ExportQasmResponse, ImportQasmRequest, ImportQasmResponse,
    SimulateRequest, SimulateResponse, ValidateResponse,
};
pub use engine::{BackendInfo, Engine};
pub use error::{EngineError, EngineResult};
pub use executor::{ExecutionState, Executor, SimulationOptions, SimulationResult};
pub use telemetry::{LogFormat, init_tracing};
