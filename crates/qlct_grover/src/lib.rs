//! # QLCT Grover
//!
//! Oracle and diffusion construction, exact search probability, and
//! sampling-based amplitude estimation.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qlct_grover // L3: Algorithms (완료)
//!     L3_Algorithms // 그로버 알고리즘 (완료)
//!         GroverCircuits // 오라클/확산/검색 회로 (완료)
//!         GroverEngine // 정확한 성공 확률 (완료)
//!         AmplitudeEstimator // 샘플링 추정 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlct_grover::prelude::*;
//! use rand::SeedableRng;
//!
//! let cfg = SearchConfig::new(3, 0b101).unwrap();
//!
//! // Exact: one iteration over 8 states gives 25/32
//! let p = GroverEngine::new().search_probability(&cfg).unwrap();
//! assert!((p - 0.78125).abs() < 1e-9);
//!
//! // Sampled
//! let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(42);
//! let est = AmplitudeEstimator::new().estimate(&cfg, 2000, &mut rng).unwrap();
//! assert!((est - p).abs() < 0.05);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Circuit construction (Gantree: L3_Algorithms → GroverCircuits)
pub mod circuits;

/// Search engine (Gantree: L3_Algorithms → GroverEngine)
pub mod engine;

/// Amplitude estimation (Gantree: L3_Algorithms → AmplitudeEstimator)
pub mod estimator;

// ============================================================================
// Re-exports
// ============================================================================

pub use circuits::{
    build_diffusion, build_oracle, build_search_circuit, build_search_circuit_with_iterations,
    hadamard_layer,
};
pub use engine::{GroverEngine, SearchResult};
pub use estimator::{AmplitudeEstimator, Estimate};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::circuits::{
        build_diffusion, build_oracle, build_search_circuit, build_search_circuit_with_iterations,
        hadamard_layer,
    };
    pub use crate::engine::{GroverEngine, SearchResult};
    pub use crate::estimator::{AmplitudeEstimator, Estimate};
    pub use qlct_core::{grover, SearchConfig};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use qlct_core::{Circuit, ErrorKind};
    use qlct_sim::StatevectorSimulator;

    fn uniform(n: usize) -> Circuit {
        let mut c = Circuit::new(n).unwrap();
        hadamard_layer(&mut c, n).unwrap();
        c
    }

    #[test]
    fn test_oracle_phase_only_at_target() {
        let sim = StatevectorSimulator::new();
        for n in 1..=5 {
            let dim = 1usize << n;
            for target in [0, dim / 2, dim - 1] {
                let mut circuit = uniform(n);
                circuit.compose(&build_oracle(n, target).unwrap()).unwrap();
                let sv = sim.run(&circuit).unwrap();

                let amp = 1.0 / (dim as f64).sqrt();
                for (i, a) in sv.amplitudes().iter().enumerate() {
                    let expected = if i == target { -amp } else { amp };
                    assert_abs_diff_eq!(a.re, expected, epsilon = 1e-12);
                    assert_abs_diff_eq!(a.norm(), amp, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_diffusion_inverts_about_mean() {
        // Mark target 2 on 2 qubits, then diffuse: all mass moves to |10⟩
        let mut circuit = uniform(2);
        circuit.compose(&build_oracle(2, 2).unwrap()).unwrap();
        circuit.compose(&build_diffusion(2).unwrap()).unwrap();
        let sv = StatevectorSimulator::new().run(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probability(2), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_search_circuit_norm() {
        let sim = StatevectorSimulator::new();
        for n in 1..=8 {
            let cfg = SearchConfig::new(n, (1 << n) - 1).unwrap();
            let circuit = build_search_circuit(&cfg).unwrap();
            let sv = sim.run(&circuit).unwrap();
            assert_abs_diff_eq!(sv.norm_sqr(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(
            SearchConfig::new(0, 0).unwrap_err().kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            SearchConfig::new(3, 8).unwrap_err().kind(),
            ErrorKind::InvalidConfiguration
        );
    }

    #[test]
    fn test_engine_and_estimator_agree() {
        use rand::SeedableRng;
        let cfg = SearchConfig::new(4, 11).unwrap();
        let engine = GroverEngine::new().with_iterations(grover::optimal_iterations(4));
        let exact = engine.search_probability(&cfg).unwrap();

        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(11);
        let e = AmplitudeEstimator::with_engine(engine)
            .estimate_detailed(&cfg, 5000, &mut rng)
            .unwrap();
        assert_abs_diff_eq!(e.exact, exact);
        assert!(e.within(5.0), "{}", e);
    }
}
