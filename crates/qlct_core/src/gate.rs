//! Operation definitions for QLCT
//!
//! Gantree: L1_Circuit → Operation
//!
//! The fixed gate set used by the search circuits: Hadamard, Pauli-X, and
//! multi-controlled X. All three are unitary, so any circuit built from them
//! preserves the statevector norm.

use crate::error::{QlctError, QlctResult};
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Circuit operation
/// Gantree: Operation // 연산 enum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Hadamard gate
    /// Gantree: H(QubitId) // 하다마드
    H(QubitId),

    /// Pauli-X gate (NOT)
    /// Gantree: X(QubitId) // 파울리 X
    X(QubitId),

    /// Multi-controlled X; flips `target` when every control is |1⟩.
    /// An empty control set is a plain X.
    /// Gantree: Mcx{{controls,target}} // 다중 제어 X
    Mcx {
        /// Control qubits
        controls: Vec<QubitId>,
        /// Target qubit
        target: QubitId,
    },
}

impl Operation {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Multi-controlled X with validated controls
    pub fn mcx(controls: Vec<QubitId>, target: QubitId) -> QlctResult<Self> {
        let op = Operation::Mcx { controls, target };
        op.validate_controls()?;
        Ok(op)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Get qubits involved in this operation (controls first, then target)
    /// Gantree: qubits(&self) -> Vec<QubitId> // 관련 큐비트
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::H(q) | Operation::X(q) => vec![*q],
            Operation::Mcx { controls, target } => {
                let mut qs = controls.clone();
                qs.push(*target);
                qs
            }
        }
    }

    /// Qubit the operation acts on
    pub fn target(&self) -> QubitId {
        match self {
            Operation::H(q) | Operation::X(q) => *q,
            Operation::Mcx { target, .. } => *target,
        }
    }

    /// Number of control qubits
    pub fn num_controls(&self) -> usize {
        match self {
            Operation::Mcx { controls, .. } => controls.len(),
            _ => 0,
        }
    }

    /// Check if operation touches exactly one qubit
    pub fn is_single_qubit(&self) -> bool {
        self.qubits().len() == 1
    }

    /// Check if operation is a controlled gate with at least one control
    pub fn is_multi_qubit(&self) -> bool {
        self.num_controls() > 0
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::H(_) => "h",
            Operation::X(_) => "x",
            Operation::Mcx { controls, .. } => match controls.len() {
                0 => "x",
                1 => "cx",
                2 => "ccx",
                _ => "mcx",
            },
        }
    }

    /// Check control-set invariants: no duplicates, target not among controls
    pub fn validate_controls(&self) -> QlctResult<()> {
        if let Operation::Mcx { controls, target } = self {
            let mut seen = HashSet::with_capacity(controls.len());
            for &c in controls {
                if c == *target {
                    return Err(QlctError::ControlIsTarget { qubit: c });
                }
                if !seen.insert(c) {
                    return Err(QlctError::DuplicateControl { qubit: c });
                }
            }
        }
        Ok(())
    }

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String // QASM 변환
    pub fn to_qasm(&self) -> String {
        match self {
            Operation::H(q) => format!("h q[{}];", q),
            Operation::X(q) => format!("x q[{}];", q),
            Operation::Mcx { .. } => {
                let args: Vec<String> = self.qubits().iter().map(|q| format!("q[{}]", q)).collect();
                format!("{} {};", self.name(), args.join(","))
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_qubits() {
        assert_eq!(Operation::H(0).qubits(), vec![0]);
        assert_eq!(Operation::mcx(vec![0, 1], 2).unwrap().qubits(), vec![0, 1, 2]);
        assert_eq!(Operation::mcx(vec![], 0).unwrap().qubits(), vec![0]);
    }

    #[test]
    fn test_operation_classification() {
        assert!(Operation::X(1).is_single_qubit());
        assert!(!Operation::X(1).is_multi_qubit());

        let toffoli = Operation::mcx(vec![0, 1], 2).unwrap();
        assert!(toffoli.is_multi_qubit());
        assert_eq!(toffoli.num_controls(), 2);
        assert_eq!(toffoli.target(), 2);

        // empty controls degenerate to X
        let bare = Operation::mcx(Vec::new(), 0).unwrap();
        assert!(bare.is_single_qubit());
        assert_eq!(bare.name(), "x");
    }

    #[test]
    fn test_control_is_target_rejected() {
        assert_eq!(
            Operation::mcx(vec![0, 2], 2),
            Err(QlctError::ControlIsTarget { qubit: 2 })
        );
    }

    #[test]
    fn test_duplicate_control_rejected() {
        assert_eq!(
            Operation::mcx(vec![1, 1], 2),
            Err(QlctError::DuplicateControl { qubit: 1 })
        );
    }

    #[test]
    fn test_operation_to_qasm() {
        assert_eq!(Operation::H(0).to_qasm(), "h q[0];");
        assert_eq!(Operation::mcx(vec![0], 1).unwrap().to_qasm(), "cx q[0],q[1];");
        assert_eq!(
            Operation::mcx(vec![0, 1, 2], 3).unwrap().to_qasm(),
            "mcx q[0],q[1],q[2],q[3];"
        );
    }
}
