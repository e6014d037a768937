//! Statevector simulator for QLCT
//!
//! Gantree: L2_Simulation → StatevectorSimulator
//!
//! Exact, noiseless simulation of the H / X / MCX gate set starting from
//! |0...0⟩. Memory and each gate application are O(2^n); the qubit ceiling
//! is checked before anything is allocated.

use crate::sampling::{sample_distribution, SampleResult};
use crate::statevector::Statevector;
use num_complex::Complex64;
use qlct_core::{limits, Circuit, Operation, QlctError, QlctResult, QubitId};
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;
use std::time::Instant;

/// Exact statevector simulator
/// Gantree: StatevectorSimulator // 시뮬레이터 구현
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatevectorSimulator {
    /// Largest register this simulator will allocate
    max_qubits: usize,
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatevectorSimulator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Simulator with the default ceiling
    pub fn new() -> Self {
        Self {
            max_qubits: limits::DEFAULT_MAX_QUBITS,
        }
    }

    /// Set the qubit ceiling (capped at `limits::ABSOLUTE_MAX_QUBITS`)
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        if max_qubits > limits::ABSOLUTE_MAX_QUBITS {
            log::warn!(
                "qubit ceiling {} capped at {}",
                max_qubits,
                limits::ABSOLUTE_MAX_QUBITS
            );
        }
        self.max_qubits = max_qubits.min(limits::ABSOLUTE_MAX_QUBITS);
        self
    }

    /// Current qubit ceiling
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Reject widths below 1 or above the ceiling
    /// Gantree: check_width(&self, n) -> Result // 한도 검사
    pub fn check_width(&self, num_qubits: usize) -> QlctResult<()> {
        if num_qubits < limits::MIN_QUBITS {
            return Err(QlctError::InvalidQubitCount {
                n_qubits: num_qubits,
            });
        }
        if num_qubits > self.max_qubits {
            return Err(QlctError::QubitLimitExceeded {
                requested: num_qubits,
                max: self.max_qubits,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Apply `circuit` to |0...0⟩
    /// Gantree: run(&self, &Circuit) -> Result<Statevector> // 시뮬레이션
    pub fn run(&self, circuit: &Circuit) -> QlctResult<Statevector> {
        self.check_width(circuit.num_qubits())?;
        circuit.validate()?;

        let start = Instant::now();
        let mut state = Statevector::zero(circuit.num_qubits())?;
        for op in circuit.operations() {
            apply_operation(state.amplitudes_mut(), op);
        }

        log::debug!(
            "simulated {} ops on {} qubits in {:?}",
            circuit.op_count(),
            circuit.num_qubits(),
            start.elapsed()
        );
        Ok(state)
    }

    /// Probability distribution of the final state
    /// Gantree: probabilities(&self, &Circuit) -> Result<Vec<f64>> // 확률 분포
    pub fn probabilities(&self, circuit: &Circuit) -> QlctResult<Vec<f64>> {
        Ok(self.run(circuit)?.probabilities())
    }

    /// Simulate once, then draw `shots` measurement outcomes
    /// Gantree: sample(&self, &Circuit, shots, rng) -> Result<SampleResult> // 측정 샘플링
    pub fn sample<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        shots: u64,
        rng: &mut R,
    ) -> QlctResult<SampleResult> {
        if shots == 0 {
            return Err(QlctError::InvalidShots(shots));
        }
        let probs = self.probabilities(circuit)?;
        sample_distribution(&probs, circuit.num_qubits(), shots, rng)
    }
}

// ============================================================================
// Gate Kernels
// ============================================================================

fn apply_operation(state: &mut [Complex64], op: &Operation) {
    match op {
        Operation::H(q) => apply_h(state, *q),
        Operation::X(q) => apply_mcx(state, &[], *q),
        Operation::Mcx { controls, target } => apply_mcx(state, controls, *target),
    }
}

/// 2×2 update over every (i, i | 1<<q) pair
fn apply_h(state: &mut [Complex64], q: QubitId) {
    let mask = 1usize << q;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (a, b) = (state[i], state[j]);
            state[i] = (a + b) * FRAC_1_SQRT_2;
            state[j] = (a - b) * FRAC_1_SQRT_2;
        }
    }
}

/// Swap target-bit pairs where every control bit is 1; no controls = X
fn apply_mcx(state: &mut [Complex64], controls: &[QubitId], target: QubitId) {
    let control_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));
    let target_mask = 1usize << target;

    for i in 0..state.len() {
        if i & control_mask == control_mask && i & target_mask == 0 {
            state.swap(i, i | target_mask);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qlct_core::CircuitBuilder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_hadamard_superposition() {
        let circuit = CircuitBuilder::new(1).h(0).build().unwrap();
        let sv = StatevectorSimulator::new().run(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probability(0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sv.probability(1), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_x_little_endian() {
        // X on qubit 0 sets the least-significant bit
        let circuit = CircuitBuilder::new(3).x(0).build().unwrap();
        let sv = StatevectorSimulator::new().run(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probability(0b001), 1.0);

        let circuit = CircuitBuilder::new(3).x(2).build().unwrap();
        let sv = StatevectorSimulator::new().run(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probability(0b100), 1.0);
    }

    #[test]
    fn test_toffoli_truth_table() {
        let sim = StatevectorSimulator::new();

        let both = CircuitBuilder::new(3).x(0).x(1).ccx(0, 1, 2).build().unwrap();
        assert_abs_diff_eq!(sim.run(&both).unwrap().probability(0b111), 1.0);

        let one = CircuitBuilder::new(3).x(0).ccx(0, 1, 2).build().unwrap();
        assert_abs_diff_eq!(sim.run(&one).unwrap().probability(0b001), 1.0);
    }

    #[test]
    fn test_empty_controls_acts_as_x() {
        let circuit = CircuitBuilder::new(2).mcx(vec![], 1).build().unwrap();
        let sv = StatevectorSimulator::new().run(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probability(0b10), 1.0);
    }

    #[test]
    fn test_hzh_phase_flip() {
        // H·X·H = Z: flips the sign of |1⟩ only
        let circuit = CircuitBuilder::new(1).x(0).phase_flip_ones().build().unwrap();
        let sv = StatevectorSimulator::new().run(&circuit).unwrap();
        let a = sv.amplitude(1).unwrap();
        assert_abs_diff_eq!(a.re, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_preserved() {
        let circuit = CircuitBuilder::new(5)
            .h_layer()
            .ccx(0, 1, 4)
            .x_zero_bits(0b10110)
            .phase_flip_ones()
            .h(3)
            .mcx(vec![0, 1, 2, 3], 4)
            .h_layer()
            .build()
            .unwrap();
        let sv = StatevectorSimulator::new().run(&circuit).unwrap();
        assert_abs_diff_eq!(sv.norm_sqr(), 1.0, epsilon = 1e-9);
        assert!(sv.is_normalized());
    }

    #[test]
    fn test_ceiling_checked_before_allocation() {
        let sim = StatevectorSimulator::new().with_max_qubits(4);
        let circuit = CircuitBuilder::new(40).build().unwrap();
        let err = sim.run(&circuit).unwrap_err();
        assert_eq!(
            err,
            QlctError::QubitLimitExceeded {
                requested: 40,
                max: 4
            }
        );
    }

    #[test]
    fn test_ceiling_capped_at_absolute_limit() {
        let sim = StatevectorSimulator::new().with_max_qubits(64);
        assert_eq!(sim.max_qubits(), limits::ABSOLUTE_MAX_QUBITS);

        let circuit = CircuitBuilder::new(64).h(63).build().unwrap();
        let err = sim.run(&circuit).unwrap_err();
        assert_eq!(
            err,
            QlctError::QubitLimitExceeded {
                requested: 64,
                max: limits::ABSOLUTE_MAX_QUBITS
            }
        );
    }

    #[test]
    fn test_zero_width_rejected() {
        let sim = StatevectorSimulator::new();
        assert!(matches!(
            sim.check_width(0),
            Err(QlctError::InvalidQubitCount { n_qubits: 0 })
        ));
    }

    #[test]
    fn test_run_is_deterministic() {
        let circuit = CircuitBuilder::new(3).h_layer().ccx(0, 1, 2).build().unwrap();
        let sim = StatevectorSimulator::new();
        assert_eq!(sim.run(&circuit).unwrap(), sim.run(&circuit).unwrap());
    }

    #[test]
    fn test_sample_bell_like() {
        let circuit = CircuitBuilder::new(2).h(0).cx(0, 1).build().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let result = StatevectorSimulator::new()
            .sample(&circuit, 1000, &mut rng)
            .unwrap();

        assert_eq!(result.total_counts(), 1000);
        assert_eq!(result.count(0b01) + result.count(0b10), 0);
        let f00 = result.frequency(0b00);
        assert!(f00 > 0.4 && f00 < 0.6, "f00 = {}", f00);
    }

    #[test]
    fn test_sample_zero_shots() {
        let circuit = CircuitBuilder::new(1).h(0).build().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(
            StatevectorSimulator::new().sample(&circuit, 0, &mut rng),
            Err(QlctError::InvalidShots(0))
        );
    }
}
