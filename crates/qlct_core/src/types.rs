//! Core types for QLCT
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and validated search parameters shared by the circuit, simulation,
//! and search layers.
//!
//! Bit ordering is little-endian throughout: bit `q` of a basis-state index
//! is the value of qubit `q`, so qubit 0 is the least-significant bit.

use crate::error::{QlctError, QlctResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed, bit position in a basis index)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Basis-state integer in [0, 2^n)
/// Gantree: BasisIndex // pub type BasisIndex = usize
pub type BasisIndex = usize;

/// Complex amplitude
/// Gantree: Amplitude // pub type Amplitude = Complex64
pub type Amplitude = Complex64;

// ============================================================================
// SearchConfig
// ============================================================================

/// Parameters of one search invocation
/// Gantree: SearchConfig // 검색 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchConfig {
    n_qubits: usize,
    target: BasisIndex,
}

impl SearchConfig {
    /// Create a validated search configuration
    /// Gantree: new(n,t) -> Result<Self> // 생성+검증
    ///
    /// Rejects `n_qubits == 0` and any `target >= 2^n_qubits`; the target is
    /// never masked into range.
    pub fn new(n_qubits: usize, target: BasisIndex) -> QlctResult<Self> {
        if n_qubits == 0 {
            return Err(QlctError::InvalidQubitCount { n_qubits });
        }
        if !target_fits(n_qubits, target) {
            return Err(QlctError::TargetOutOfRange { target, n_qubits });
        }
        Ok(Self { n_qubits, target })
    }

    /// Number of qubits (search space = 2^n)
    #[inline]
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Marked basis state
    #[inline]
    pub fn target(&self) -> BasisIndex {
        self.target
    }

    /// Target written as a bit label, most-significant qubit first
    pub fn target_label(&self) -> String {
        basis_label(self.target, self.n_qubits)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            n_qubits: crate::constants::grover::DEFAULT_QUBITS,
            target: crate::constants::grover::DEFAULT_TARGET,
        }
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchConfig({}Q, target=|{}⟩)",
            self.n_qubits,
            self.target_label()
        )
    }
}

fn target_fits(n_qubits: usize, target: BasisIndex) -> bool {
    match crate::constants::limits::dimension(n_qubits) {
        Some(dim) => target < dim,
        None => true,
    }
}

// ============================================================================
// Bit Helpers
// ============================================================================

/// Value of qubit `q` in basis state `index`
#[inline]
pub fn qubit_value(index: BasisIndex, qubit: QubitId) -> bool {
    (index >> qubit) & 1 == 1
}

/// Render a basis index as a ket label (qubit n-1 leftmost, qubit 0 rightmost)
pub fn basis_label(index: BasisIndex, num_qubits: usize) -> String {
    (0..num_qubits)
        .rev()
        .map(|q| if qubit_value(index, q) { '1' } else { '0' })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
