//! Measurement sampling
//!
//! Gantree: L2_Simulation → Sampling
//!
//! Categorical sampling with replacement from an exact probability
//! distribution. The random source is always supplied by the caller.

use qlct_core::{basis_label, stats, BasisIndex, QlctError, QlctResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-basis-state counts from a sampling run
/// Gantree: SampleResult // 측정 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Observed counts keyed by basis index (absent = 0)
    pub counts: BTreeMap<BasisIndex, u64>,

    /// Number of shots drawn
    pub shots: u64,

    /// Register width, used for labels
    pub num_qubits: usize,
}

impl SampleResult {
    /// Count for one basis state
    pub fn count(&self, index: BasisIndex) -> u64 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Observed frequency of one basis state
    /// Gantree: frequency(&self, i) -> f64 // 관측 빈도
    pub fn frequency(&self, index: BasisIndex) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(index) as f64 / self.shots as f64
    }

    /// Total count (equals shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Most frequent basis state
    pub fn most_frequent(&self) -> Option<(BasisIndex, u64)> {
        self.counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&idx, &count)| (idx, count))
    }

    /// Counts keyed by ket label
    pub fn labeled_counts(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|(&idx, &c)| (basis_label(idx, self.num_qubits), c))
            .collect()
    }
}

impl fmt::Display for SampleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SampleResult({} shots)", self.shots)?;
        for (label, count) in self.labeled_counts() {
            writeln!(f, "  |{}⟩: {}", label, count)?;
        }
        Ok(())
    }
}

/// Draw `shots` categorical samples from `probabilities`
/// Gantree: sample_distribution(p, shots, rng) -> Result<SampleResult> // 샘플링
pub fn sample_distribution<R: Rng + ?Sized>(
    probabilities: &[f64],
    num_qubits: usize,
    shots: u64,
    rng: &mut R,
) -> QlctResult<SampleResult> {
    if shots < stats::MIN_SHOTS {
        return Err(QlctError::InvalidShots(shots));
    }
    let dist = WeightedIndex::new(probabilities)
        .map_err(|e| QlctError::InternalError(format!("invalid distribution: {}", e)))?;

    let mut counts = BTreeMap::new();
    for _ in 0..shots {
        *counts.entry(dist.sample(rng)).or_insert(0u64) += 1;
    }

    Ok(SampleResult {
        counts,
        shots,
        num_qubits,
    })
}

// ============================================================================
// Tests
// ============================================================================
