//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use qplay_hal::Amplitude;
use qplay_ir::{Circuit, GateKind, GateOp};

/// A statevector over `n` qubits.
///
/// Amplitude index `i` has qubit `k` in bit `k` of `i`.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Evolve |0...0⟩ through every gate op of `circuit`.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut sv = Self::new(circuit.num_qubits() as usize);
        for op in circuit.ops() {
            sv.apply(op);
        }
        sv
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitudes in the wire shape.
    pub fn to_amplitudes(&self) -> Vec<Amplitude> {
        self.amplitudes
            .iter()
            .map(|a| Amplitude {
                real: a.re,
                imag: a.im,
            })
            .collect()
    }

    /// Apply a gate op.
    pub fn apply(&mut self, op: &GateOp) {
        let q = |i: usize| op.qubits[i].index();
        match op.kind {
            GateKind::H => self.apply_h(q(0)),
            GateKind::X => self.apply_x(q(0)),
            GateKind::Y => self.apply_y(q(0)),
            GateKind::Z => self.apply_z(q(0)),
            GateKind::S => self.apply_phase(q(0), PI / 2.0),
            GateKind::T => self.apply_phase(q(0), PI / 4.0),
            GateKind::CNOT => self.apply_cx(q(0), q(1)),
        }
    }

    // =========================================================================
    // Gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let c_mask = 1 << control;
        let t_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & c_mask != 0 && i & t_mask == 0 {
                self.amplitudes.swap(i, i | t_mask);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Outcome probabilities, indexed like the amplitudes.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Sample `shots` full-register measurements.
    ///
    /// Returns the outcome index of every shot.
    pub fn sample<R: Rng>(&self, shots: u32, rng: &mut R) -> Vec<usize> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut total = 0.0;
        for p in self.probabilities() {
            total += p;
            cumulative.push(total);
        }

        (0..shots)
            .map(|_| {
                let r: f64 = rng.r#gen::<f64>() * total;
                cumulative
                    .partition_point(|&c| c <= r)
                    .min(cumulative.len() - 1)
            })
            .collect()
    }
}

/// Bitstring for an outcome index over `num_qubits`, qubit 0 right-most.
pub fn outcome_to_bitstring(outcome: usize, num_qubits: usize) -> String {
    format!("{outcome:0num_qubits$b}")
}
