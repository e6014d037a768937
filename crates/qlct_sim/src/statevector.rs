//! Dense statevector
//!
//! Gantree: L2_Simulation → Statevector
//!
//! A flat owned buffer of 2^n complex amplitudes indexed by basis-state
//! integer (qubit `q` is bit `q` of the index).

use num_complex::Complex64;
use qlct_core::{basis_label, limits, Amplitude, BasisIndex, QlctError, QlctResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final amplitudes of a simulated circuit
/// Gantree: Statevector // 상태 벡터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatevectorData")]
pub struct Statevector {
    num_qubits: usize,
    amplitudes: Vec<Amplitude>,
}

/// Unchecked wire form; amplitude count is verified on conversion
#[derive(Deserialize)]
struct StatevectorData {
    num_qubits: usize,
    amplitudes: Vec<Amplitude>,
}

impl TryFrom<StatevectorData> for Statevector {
    type Error = QlctError;

    fn try_from(data: StatevectorData) -> Result<Self, Self::Error> {
        if data.num_qubits < limits::MIN_QUBITS {
            return Err(QlctError::InvalidQubitCount {
                n_qubits: data.num_qubits,
            });
        }
        if limits::dimension(data.num_qubits) != Some(data.amplitudes.len()) {
            return Err(QlctError::InvalidConfig(format!(
                "{} amplitudes do not form a {}-qubit statevector",
                data.amplitudes.len(),
                data.num_qubits
            )));
        }
        Ok(Self {
            num_qubits: data.num_qubits,
            amplitudes: data.amplitudes,
        })
    }
}

impl Statevector {
    /// |0...0⟩ on `num_qubits` qubits
    ///
    /// Allocates 2^n amplitudes; callers check their own ceiling first.
    /// Widths whose dimension overflows `usize` are rejected.
    pub(crate) fn zero(num_qubits: usize) -> QlctResult<Self> {
        let dim = limits::dimension(num_qubits).ok_or(QlctError::QubitLimitExceeded {
            requested: num_qubits,
            max: limits::ABSOLUTE_MAX_QUBITS,
        })?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n)
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// All amplitudes in basis-index order
    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Amplitude] {
        &mut self.amplitudes
    }

    /// Amplitude of one basis state
    pub fn amplitude(&self, index: BasisIndex) -> Option<Amplitude> {
        self.amplitudes.get(index).copied()
    }

    /// Squared magnitude of every amplitude
    /// Gantree: probabilities(&self) -> Vec<f64> // 확률 분포
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Probability of one basis state (0 when out of range)
    /// Gantree: probability(&self, i) -> f64 // 단일 확률
    pub fn probability(&self, index: BasisIndex) -> f64 {
        self.amplitudes.get(index).map(|a| a.norm_sqr()).unwrap_or(0.0)
    }

    /// Sum of squared magnitudes
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Check that the norm is 1 within `limits::NORM_TOLERANCE`
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() <= limits::NORM_TOLERANCE
    }

    /// Most probable basis state (lowest index on ties)
    pub fn most_likely(&self) -> (BasisIndex, f64) {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| (i, a.norm_sqr()))
            .fold((0, f64::NEG_INFINITY), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            })
    }

    /// Ket label for a basis index of this register
    pub fn label(&self, index: BasisIndex) -> String {
        basis_label(index, self.num_qubits)
    }
}

impl fmt::Display for Statevector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statevector({} qubits)", self.num_qubits)?;
        for (i, a) in self.amplitudes.iter().enumerate() {
            if a.norm_sqr() > limits::NORM_TOLERANCE {
                writeln!(
                    f,
                    "  |{}⟩: {:+.6}{:+.6}i  (p={:.6})",
                    self.label(i),
                    a.re,
                    a.im,
                    a.norm_sqr()
                )?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
