//! Sampling API generation.
//!
//! The [`Sampler`] primitive returns a quasi-probability distribution over
//! outcome indices. [`SamplingBackend`] turns that into counts by taking
//! `floor(p * shots)` per outcome, so the counts can sum to less than the
//! requested shots. They are not renormalized.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use qplay_hal::{
    Amplitude, ApiGeneration, Backend, BackendConfig, BackendFactory, Capabilities, Counts,
    HalResult,
};
use qplay_ir::Circuit;

use crate::statevector::{Statevector, outcome_to_bitstring};

/// Quasi-probabilities keyed by outcome index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuasiDistribution(FxHashMap<usize, f64>);

impl QuasiDistribution {
    /// Probability of an outcome, zero if absent.
    pub fn get(&self, outcome: usize) -> f64 {
        self.0.get(&outcome).copied().unwrap_or(0.0)
    }

    /// Number of outcomes with nonzero weight.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the distribution is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Outcomes and their weights, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// The sampling primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    seed: Option<u64>,
}

impl Sampler {
    /// Create a sampler, optionally seeded.
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Run the circuit with every qubit measured.
    ///
    /// The distribution is the observed frequency of each outcome over
    /// `shots` samples.
    pub fn run(&self, circuit: &Circuit, shots: u32) -> QuasiDistribution {
        let sv = Statevector::from_circuit(circuit);
        let mut rng = crate::common::rng(self.seed);
        let mut tally: FxHashMap<usize, u32> = FxHashMap::default();
        for outcome in sv.sample(shots, &mut rng) {
            *tally.entry(outcome).or_insert(0) += 1;
        }

        let shots = f64::from(shots);
        QuasiDistribution(
            tally
                .into_iter()
                .map(|(outcome, n)| (outcome, f64::from(n) / shots))
                .collect(),
        )
    }
}

/// Backend over the sampling primitive.
pub struct SamplingBackend {
    capabilities: Capabilities,
    sampler: Sampler,
}

impl SamplingBackend {
    /// Registry name.
    pub const NAME: &'static str = "sampler";

    /// Create a backend with default limits.
    pub fn new() -> Self {
        Self::with_max_qubits(crate::DEFAULT_MAX_QUBITS)
    }

    /// Create a backend accepting at most `max_qubits`.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(Self::NAME, ApiGeneration::Sampling, max_qubits),
            sampler: Sampler::default(),
        }
    }

    /// Seed the sampler for reproducible counts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sampler = Sampler::new(Some(seed));
        self.capabilities = self.capabilities.with_feature("seeded");
        self
    }
}

impl Default for SamplingBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Quantize a quasi-distribution into counts.
pub(crate) fn quantize(dist: &QuasiDistribution, shots: u32, num_qubits: usize) -> Counts {
    let shots = f64::from(shots);
    let mut counts = Counts::new();
    for (outcome, p) in dist.iter() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (p * shots).floor() as u64;
        if n > 0 {
            counts.add(outcome_to_bitstring(outcome, num_qubits), n);
        }
    }
    counts
}

#[async_trait]
impl Backend for SamplingBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits()))]
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<Counts> {
        self.validate(circuit, shots).await?;

        let sampler = self.sampler;
        let owned = circuit.clone();
        let dist = crate::common::run_blocking(move || sampler.run(&owned, shots)).await?;
        debug!(outcomes = dist.len(), "sampler returned quasi-distribution");

        Ok(quantize(&dist, shots, circuit.num_qubits() as usize))
    }

    async fn statevector(&self, circuit: &Circuit) -> HalResult<Vec<Amplitude>> {
        self.validate(circuit, 1).await?;
        crate::common::statevector_of(circuit).await
    }
}

impl BackendFactory for SamplingBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let backend = Self::with_max_qubits(crate::common::max_qubits(&config)?);
        Ok(match config.seed {
            Some(seed) => backend.with_seed(seed),
            None => backend,
        })
    }
}
