//! Bounded execution of one circuit against the selected backend.
//!
//! ```text
//!   Idle ──→ Building ──→ Running ──┬──→ Completed
//!               │                   ├──→ TimedOut
//!               └───────────────────┴──→ Failed
//! ```
//!
//! The deadline is a timer future raced against the backend future, so it
//! is scoped to a single call and dropped on every exit path. Backend work
//! already handed to the blocking pool is not cancelled when the deadline
//! fires; its result is simply never read.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use qplay_hal::{Amplitude, Backend, Counts};
use qplay_ir::{Circuit, CircuitData};

use crate::error::{EngineError, EngineResult};

/// Lifecycle of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Building,
    Running,
    Completed,
    TimedOut,
    Failed,
}

impl ExecutionState {
    /// Whether no further transition can happen.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionState::Completed | ExecutionState::TimedOut | ExecutionState::Failed
        )
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExecutionState::Idle => "idle",
            ExecutionState::Building => "building",
            ExecutionState::Running => "running",
            ExecutionState::Completed => "completed",
            ExecutionState::TimedOut => "timed_out",
            ExecutionState::Failed => "failed",
        })
    }
}

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub shots: u32,
    pub timeout: Duration,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            shots: 1024,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SimulationOptions {
    fn check(&self) -> EngineResult<()> {
        if self.shots == 0 {
            return Err(EngineError::InvalidRequest(
                "shots must be positive".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(EngineError::InvalidRequest(
                "timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything a successful run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub counts: Counts,
    /// Present only for small circuits, and only if extraction worked.
    pub statevector: Option<Vec<Amplitude>>,
    pub num_qubits: u32,
    pub depth: usize,
    pub gate_count: usize,
}

/// Tracks the state of one run and logs every transition.
struct Run {
    state: ExecutionState,
}

impl Run {
    fn new() -> Self {
        Self {
            state: ExecutionState::Idle,
        }
    }

    fn transition(&mut self, next: ExecutionState) {
        debug_assert!(!self.state.is_terminal(), "transition out of {}", self.state);
        info!(from = %self.state, to = %next, "execution state changed");
        self.state = next;
    }
}

/// Runs circuits on one backend under a deadline.
#[derive(Clone)]
pub struct Executor {
    backend: Arc<dyn Backend>,
    statevector_max_qubits: u32,
}

impl Executor {
    /// Create an executor extracting statevectors up to `statevector_max_qubits`.
    pub fn new(backend: Arc<dyn Backend>, statevector_max_qubits: u32) -> Self {
        Self {
            backend,
            statevector_max_qubits,
        }
    }

    /// The backend every run goes to.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Build `data` into a circuit and run it.
    pub async fn execute(
        &self,
        data: &CircuitData,
        options: SimulationOptions,
    ) -> EngineResult<SimulationResult> {
        let run_id = Uuid::new_v4();
        let span = info_span!("execute", %run_id, backend = self.backend.name());
        self.execute_inner(data, options).instrument(span).await
    }

    async fn execute_inner(
        &self,
        data: &CircuitData,
        options: SimulationOptions,
    ) -> EngineResult<SimulationResult> {
        let mut run = Run::new();
        options.check()?;

        run.transition(ExecutionState::Building);
        let circuit = match Circuit::from_data(data) {
            Ok(circuit) => circuit,
            Err(e) => {
                run.transition(ExecutionState::Failed);
                return Err(e.into());
            }
        };

        run.transition(ExecutionState::Running);
        match tokio::time::timeout(options.timeout, self.run_backend(&circuit, options.shots)).await
        {
            Ok(Ok((counts, statevector))) => {
                run.transition(ExecutionState::Completed);
                Ok(SimulationResult {
                    counts,
                    statevector,
                    num_qubits: circuit.num_qubits(),
                    depth: circuit.depth(),
                    gate_count: circuit.gate_count(),
                })
            }
            Ok(Err(e)) => {
                run.transition(ExecutionState::Failed);
                Err(e)
            }
            Err(_) => {
                run.transition(ExecutionState::TimedOut);
                warn!(timeout = ?options.timeout, "simulation deadline exceeded");
                Err(EngineError::TimedOut {
                    after: options.timeout,
                })
            }
        }
    }

    /// Counts, then the statevector for small circuits.
    async fn run_backend(
        &self,
        circuit: &Circuit,
        shots: u32,
    ) -> EngineResult<(Counts, Option<Vec<Amplitude>>)> {
        self.backend.validate(circuit, shots).await?;
        let counts = self.backend.run(circuit, shots).await?;
        debug!(outcomes = counts.len(), total = counts.total_shots(), "sampling finished");

        let statevector = if circuit.num_qubits() <= self.statevector_max_qubits {
            match self.backend.statevector(circuit).await {
                Ok(amplitudes) => Some(amplitudes),
                Err(e) => {
                    warn!(error = %e, "statevector extraction failed");
                    None
                }
            }
        } else {
            None
        };

        Ok((counts, statevector))
    }
}
