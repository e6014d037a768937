//! Quantum circuit structure for QLCT
//!
//! Gantree: L1_Circuit → Circuit
//!
//! An ordered, append-only list of operations over a fixed qubit count.
//! Every appended operation is checked against the register width and the
//! multi-controlled-X control invariants, so a `Circuit` value is always
//! simulable.

use crate::error::{QlctError, QlctResult};
use crate::gate::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    /// Gantree: num_qubits: usize // 큐비트 수
    num_qubits: usize,

    /// Operation sequence
    /// Gantree: ops: Vec<Operation> // 연산 목록
    ops: Vec<Operation>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    /// Gantree: new(n) -> Result<Self> // 생성자
    pub fn new(num_qubits: usize) -> QlctResult<Self> {
        if num_qubits == 0 {
            return Err(QlctError::InvalidQubitCount { n_qubits: 0 });
        }
        Ok(Self {
            num_qubits,
            ops: Vec::new(),
            name: None,
        })
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> QlctResult<Self> {
        let mut circuit = Self::new(num_qubits)?;
        circuit.name = Some(name.into());
        Ok(circuit)
    }

    /// Create from a vector of operations
    pub fn from_operations(num_qubits: usize, ops: Vec<Operation>) -> QlctResult<Self> {
        let mut circuit = Self::new(num_qubits)?;
        circuit.append_all(ops)?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Append an operation
    /// Gantree: append(&mut, Operation) -> Result // 연산 추가
    pub fn append(&mut self, op: Operation) -> QlctResult<()> {
        self.check_operation(&op)?;
        self.ops.push(op);
        Ok(())
    }

    /// Append multiple operations
    pub fn append_all(&mut self, ops: impl IntoIterator<Item = Operation>) -> QlctResult<()> {
        for op in ops {
            self.append(op)?;
        }
        Ok(())
    }

    /// Append every operation of another circuit of the same width
    /// Gantree: compose(&mut, &Circuit) -> Result // 회로 합성
    pub fn compose(&mut self, other: &Circuit) -> QlctResult<()> {
        if other.num_qubits != self.num_qubits {
            return Err(QlctError::InvalidConfig(format!(
                "cannot compose {}-qubit circuit onto {}-qubit circuit",
                other.num_qubits, self.num_qubits
            )));
        }
        self.ops.extend(other.ops.iter().cloned());
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get operations
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path)
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];

        for op in &self.ops {
            let qubits = op.qubits();
            let layer = qubits
                .iter()
                .filter_map(|&q| qubit_depths.get(q))
                .max()
                .copied()
                .unwrap_or(0)
                + 1;
            for q in qubits {
                if let Some(d) = qubit_depths.get_mut(q) {
                    *d = layer;
                }
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total operation count
    /// Gantree: op_count(&self) -> usize // 연산 수
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Count single-qubit operations (including empty-control MCX)
    pub fn count_1q(&self) -> usize {
        self.ops.iter().filter(|op| op.is_single_qubit()).count()
    }

    /// Count controlled operations
    pub fn count_controlled(&self) -> usize {
        self.ops.iter().filter(|op| op.is_multi_qubit()).count()
    }

    /// Count operations of a given gate name
    pub fn count_named(&self, name: &str) -> usize {
        self.ops.iter().filter(|op| op.name() == name).count()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_operation(&self, op: &Operation) -> QlctResult<()> {
        for qubit in op.qubits() {
            if qubit >= self.num_qubits {
                return Err(QlctError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        op.validate_controls()
    }

    /// Re-check every operation (useful after deserialization)
    /// Gantree: validate(&self) -> Result // 회로 검증
    pub fn validate(&self) -> QlctResult<()> {
        if self.num_qubits == 0 {
            return Err(QlctError::InvalidQubitCount { n_qubits: 0 });
        }
        self.ops.iter().try_for_each(|op| self.check_operation(op))
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String // QASM2 출력
    pub fn to_qasm(&self) -> String {
        let mut lines = vec![
            "OPENQASM 2.0;".to_string(),
            "include \"qelib1.inc\";".to_string(),
            String::new(),
            format!("qreg q[{}];", self.num_qubits),
            format!("creg c[{}];", self.num_qubits),
            String::new(),
        ];
        lines.extend(self.ops.iter().map(|op| op.to_qasm()));
        lines.join("\n")
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} ops{})",
            self.num_qubits,
            self.ops.len(),
            self.name
                .as_deref()
                .map(|n| format!(", '{}'", n))
                .unwrap_or_default()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q ops: {}", self.count_1q())?;
        writeln!(f, "  Controlled ops: {}", self.count_controlled())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_new() {
        let circuit = Circuit::new(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_zero_qubits_rejected() {
        assert_eq!(
            Circuit::new(0),
            Err(QlctError::InvalidQubitCount { n_qubits: 0 })
        );
    }

    #[test]
    fn test_append() {
        let mut circuit = Circuit::new(3).unwrap();
        assert!(circuit.append(Operation::H(0)).is_ok());
        assert!(circuit.append(Operation::mcx(vec![0, 1], 2).unwrap()).is_ok());
        assert_eq!(circuit.op_count(), 2);
    }

    #[test]
    fn test_append_out_of_range() {
        let mut circuit = Circuit::new(3).unwrap();
        assert_eq!(
            circuit.append(Operation::H(5)),
            Err(QlctError::GateQubitMismatch {
                qubit: 5,
                num_qubits: 3
            })
        );
        // control out of range is caught too
        let op = Operation::Mcx {
            controls: vec![7],
            target: 0,
        };
        assert!(circuit.append(op).is_err());
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_unchecked_mcx_rejected_on_append() {
        let mut circuit = Circuit::new(3).unwrap();
        let op = Operation::Mcx {
            controls: vec![0, 2],
            target: 2,
        };
        assert_eq!(
            circuit.append(op),
            Err(QlctError::ControlIsTarget { qubit: 2 })
        );
    }

    #[test]
    fn test_circuit_depth() {
        let circuit = Circuit::from_operations(
            3,
            vec![
                Operation::H(0),
                Operation::H(1),
                Operation::mcx(vec![0, 1], 2).unwrap(),
                Operation::H(2),
            ],
        )
        .unwrap();

        // H(0), H(1) parallel -> 1, MCX -> 2, H(2) -> 3
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_counts() {
        let circuit = Circuit::from_operations(
            3,
            vec![
                Operation::H(0),
                Operation::X(1),
                Operation::mcx(vec![0, 1], 2).unwrap(),
                Operation::H(2),
            ],
        )
        .unwrap();

        assert_eq!(circuit.count_1q(), 3);
        assert_eq!(circuit.count_controlled(), 1);
        assert_eq!(circuit.count_named("h"), 2);
    }

    #[test]
    fn test_compose() {
        let mut a = Circuit::from_operations(2, vec![Operation::H(0)]).unwrap();
        let b = Circuit::from_operations(2, vec![Operation::X(1)]).unwrap();
        a.compose(&b).unwrap();
        assert_eq!(a.operations(), &[Operation::H(0), Operation::X(1)]);

        let wide = Circuit::new(3).unwrap();
        assert!(a.compose(&wide).is_err());
    }

    #[test]
    fn test_to_qasm() {
        let circuit = Circuit::from_operations(
            3,
            vec![Operation::H(0), Operation::mcx(vec![0, 1], 2).unwrap()],
        )
        .unwrap();

        let qasm = circuit.to_qasm();
        assert!(qasm.contains("OPENQASM 2.0"));
        assert!(qasm.contains("qreg q[3]"));
        assert!(qasm.contains("h q[0]"));
        assert!(qasm.contains("ccx q[0],q[1],q[2]"));
    }

    #[test]
    fn test_serde_roundtrip_revalidates() {
        let circuit = Circuit::from_operations(2, vec![Operation::H(0)]).unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let parsed: Circuit = serde_json::from_str(&json).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed, circuit);
    }
}
