//! Circuit builder for QLCT
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder over [`Circuit`]. The first rejected operation is kept and
//! returned from [`CircuitBuilder::build`]; later calls become no-ops, so a
//! chain never panics and never silently drops an invalid gate.

use crate::circuit::Circuit;
use crate::error::QlctResult;
use crate::gate::Operation;
use crate::types::{qubit_value, BasisIndex, QubitId};

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    /// Internal circuit being built
    /// Gantree: circuit: Result<Circuit> // 내부 회로 또는 첫 오류
    circuit: QlctResult<Circuit>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
        }
    }

    fn push(mut self, op: Operation) -> Self {
        if let Ok(circuit) = self.circuit.as_mut() {
            if let Err(e) = circuit.append(op) {
                self.circuit = Err(e);
            }
        }
        self
    }

    fn width(&self) -> usize {
        self.circuit.as_ref().map(Circuit::num_qubits).unwrap_or(0)
    }

    // ========================================================================
    // Gates
    // ========================================================================

    /// Add Hadamard gate
    /// Gantree: h(self, q) -> Self // H 추가
    pub fn h(self, qubit: QubitId) -> Self {
        self.push(Operation::H(qubit))
    }

    /// Add Pauli-X gate
    /// Gantree: x(self, q) -> Self // X 추가
    pub fn x(self, qubit: QubitId) -> Self {
        self.push(Operation::X(qubit))
    }

    /// Add multi-controlled X gate
    /// Gantree: mcx(self, cs, t) -> Self // MCX 추가
    pub fn mcx(self, controls: Vec<QubitId>, target: QubitId) -> Self {
        self.push(Operation::Mcx { controls, target })
    }

    /// Add CNOT (single-control MCX)
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.mcx(vec![control], target)
    }

    /// Add Toffoli (two-control MCX)
    pub fn ccx(self, c1: QubitId, c2: QubitId, target: QubitId) -> Self {
        self.mcx(vec![c1, c2], target)
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Add H on all qubits
    /// Gantree: h_layer(self) -> Self // H 레이어
    pub fn h_layer(self) -> Self {
        let n = self.width();
        (0..n).fold(self, |b, q| b.h(q))
    }

    /// Add X on all qubits
    /// Gantree: x_layer(self) -> Self // X 레이어
    pub fn x_layer(self) -> Self {
        let n = self.width();
        (0..n).fold(self, |b, q| b.x(q))
    }

    /// Add X on every qubit whose bit in `pattern` is 0
    ///
    /// Maps basis state `pattern` onto the all-ones state (and back, since
    /// the layer is self-inverse).
    /// Gantree: x_zero_bits(self, pattern) -> Self // 0 비트 반전
    pub fn x_zero_bits(self, pattern: BasisIndex) -> Self {
        let n = self.width();
        (0..n)
            .filter(|&q| !qubit_value(pattern, q))
            .fold(self, |b, q| b.x(q))
    }

    /// Phase-flip the all-ones state: H(last), MCX(rest → last), H(last)
    ///
    /// With one qubit the control set is empty and the sandwich is H·X·H = Z.
    /// Gantree: phase_flip_ones(self) -> Self // |1..1⟩ 위상 반전
    pub fn phase_flip_ones(self) -> Self {
        let n = self.width();
        if n == 0 {
            return self;
        }
        let last = n - 1;
        self.h(last).mcx((0..last).collect(), last).h(last)
    }

    /// Append every operation of another circuit
    pub fn append_circuit(mut self, other: &Circuit) -> Self {
        if let Ok(circuit) = self.circuit.as_mut() {
            if let Err(e) = circuit.compose(other) {
                self.circuit = Err(e);
            }
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit, or return the first rejected operation
    /// Gantree: build(self) -> Result<Circuit> // 회로 생성
    pub fn build(self) -> QlctResult<Circuit> {
        self.circuit
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QlctError;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(3).h(0).cx(0, 1).ccx(0, 1, 2).build().unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.op_count(), 3);
        assert_eq!(circuit.count_controlled(), 2);
    }

    #[test]
    fn test_builder_layers() {
        let circuit = CircuitBuilder::new(4).h_layer().x_layer().build().unwrap();
        assert_eq!(circuit.count_named("h"), 4);
        assert_eq!(circuit.count_named("x"), 4);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_x_zero_bits() {
        // 0b101 on 3 qubits: only qubit 1 is zero
        let circuit = CircuitBuilder::new(3).x_zero_bits(0b101).build().unwrap();
        assert_eq!(circuit.operations(), &[Operation::X(1)]);

        let all_ones = CircuitBuilder::new(3).x_zero_bits(0b111).build().unwrap();
        assert!(all_ones.is_empty());
    }

    #[test]
    fn test_phase_flip_ones() {
        let circuit = CircuitBuilder::new(3).phase_flip_ones().build().unwrap();
        assert_eq!(
            circuit.operations(),
            &[
                Operation::H(2),
                Operation::Mcx {
                    controls: vec![0, 1],
                    target: 2
                },
                Operation::H(2),
            ]
        );
    }

    #[test]
    fn test_phase_flip_single_qubit_degenerates() {
        let circuit = CircuitBuilder::new(1).phase_flip_ones().build().unwrap();
        assert_eq!(circuit.op_count(), 3);
        assert_eq!(circuit.operations()[1].num_controls(), 0);
        assert_eq!(circuit.operations()[1].name(), "x");
    }

    #[test]
    fn test_first_error_is_kept() {
        let result = CircuitBuilder::new(2).h(0).x(9).mcx(vec![1], 1).build();
        assert_eq!(
            result,
            Err(QlctError::GateQubitMismatch {
                qubit: 9,
                num_qubits: 2
            })
        );
    }

    #[test]
    fn test_zero_width_builder() {
        let result = CircuitBuilder::new(0).h_layer().phase_flip_ones().build();
        assert_eq!(result, Err(QlctError::InvalidQubitCount { n_qubits: 0 }));
    }

    #[test]
    fn test_append_circuit() {
        let inner = CircuitBuilder::new(2).x(0).build().unwrap();
        let outer = CircuitBuilder::with_name(2, "outer")
            .h_layer()
            .append_circuit(&inner)
            .build()
            .unwrap();
        assert_eq!(outer.op_count(), 3);
        assert_eq!(outer.name(), Some("outer"));
    }
}
