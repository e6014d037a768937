//! Sampling-based amplitude estimation
//!
//! Gantree: L3_Algorithms → AmplitudeEstimator
//!
//! Monte Carlo estimate of the search success probability: draw `shots`
//! categorical samples from the exact distribution and count target hits.
//! Standard error is sqrt(p(1-p)/shots).

use crate::engine::GroverEngine;
use qlct_core::{stats, QlctError, QlctResult, SearchConfig};
use qlct_sim::sample_distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Empirical estimate with its exact reference
/// Gantree: Estimate // 추정 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Draws equal to the target
    pub hits: u64,

    /// Total draws
    pub shots: u64,

    /// hits / shots
    /// Gantree: estimate: f64 // 경험적 확률
    pub estimate: f64,

    /// Exact probability from the statevector
    /// Gantree: exact: f64 // 정확한 확률
    pub exact: f64,

    /// Binomial standard error at the exact probability
    pub std_error: f64,
}

impl Estimate {
    /// Signed deviation in standard errors
    pub fn z_score(&self) -> f64 {
        let diff = self.estimate - self.exact;
        if self.std_error > 0.0 {
            diff / self.std_error
        } else if diff.abs() < f64::EPSILON {
            0.0
        } else {
            diff.signum() * f64::INFINITY
        }
    }

    /// Check |estimate - exact| <= k standard errors
    /// Gantree: within(&self, k) -> bool // 허용 오차 검사
    pub fn within(&self, k: f64) -> bool {
        self.z_score().abs() <= k
    }

    /// Check consistency at `stats::CONSISTENCY_SIGMAS`
    pub fn is_consistent(&self) -> bool {
        self.within(stats::CONSISTENCY_SIGMAS)
    }

    /// Normal-approximation confidence interval at critical value `z`
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let se = stats::standard_error(self.estimate, self.shots);
        ((self.estimate - z * se).max(0.0), (self.estimate + z * se).min(1.0))
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Estimate({}/{} = {:.4}, exact {:.4}, z={:+.2})",
            self.hits,
            self.shots,
            self.estimate,
            self.exact,
            self.z_score()
        )
    }
}

/// Sampling estimator on top of [`GroverEngine`]
/// Gantree: AmplitudeEstimator // 진폭 추정기
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmplitudeEstimator {
    engine: GroverEngine,
}

impl AmplitudeEstimator {
    /// Estimator over the default engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator over a configured engine
    pub fn with_engine(engine: GroverEngine) -> Self {
        Self { engine }
    }

    /// Engine used for the exact distribution
    pub fn engine(&self) -> &GroverEngine {
        &self.engine
    }

    /// Fraction of `shots` draws equal to the target
    /// Gantree: estimate(&self, cfg, shots, rng) -> Result<f64> // 추정
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        cfg: &SearchConfig,
        shots: u64,
        rng: &mut R,
    ) -> QlctResult<f64> {
        Ok(self.estimate_detailed(cfg, shots, rng)?.estimate)
    }

    /// Estimate with hit count, exact probability, and standard error
    /// Gantree: estimate_detailed(&self, cfg, shots, rng) -> Result<Estimate> // 상세 추정
    pub fn estimate_detailed<R: Rng + ?Sized>(
        &self,
        cfg: &SearchConfig,
        shots: u64,
        rng: &mut R,
    ) -> QlctResult<Estimate> {
        if shots < stats::MIN_SHOTS {
            return Err(QlctError::InvalidShots(shots));
        }

        let search = self.engine.run(cfg)?;
        let samples = sample_distribution(&search.distribution, cfg.n_qubits(), shots, rng)?;
        let hits = samples.count(cfg.target());

        let estimate = Estimate {
            hits,
            shots,
            estimate: hits as f64 / shots as f64,
            exact: search.probability,
            std_error: stats::standard_error(search.probability, shots),
        };
        log::debug!("{} for {}", estimate, cfg);
        Ok(estimate)
    }
}

// ============================================================================
// Tests
// ============================================================================
