//! # QLCT Engine
//!
//! Configured entry point for Grover search, amplitude estimation, and
//! KEM-derived payload protection.
//!
//! ## Gantree Architecture
//!
//! ```text
//! QLCT // Quantum Logic Core Toolkit (완료)
//!     L0_Foundation // 기반 타입 (완료)
//!     L1_Circuit // 회로 구성 (완료)
//!     L2_Simulation // 상태벡터 시뮬레이션 (완료)
//!     L3_Algorithms // 그로버 탐색/진폭 추정 (완료)
//!     L4_Protection // KEM 기반 페이로드 보호 (완료)
//!     L5_Integration // 설정 + 서비스 파사드 (완료)
//!         QlctConfig // 통합 설정 (완료)
//!         QlctService // 서비스 파사드 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlct_engine::prelude::*;
//! use serde_json::json;
//!
//! // Exact success probability after one Grover iteration
//! let p = search_probability(3, 0b101).unwrap();
//! assert!((p - 0.78125).abs() < 1e-9);
//!
//! // Sampled estimate
//! let est = estimate_amplitude(3, 0b101, 2000).unwrap();
//! assert!((0.0..=1.0).contains(&est));
//!
//! // Payload protection
//! let protected = protect_payload(&json!({"sensor": "qchip", "data": [1, 0, 1]})).unwrap();
//! let restored = restore_payload(&protected.ciphertext_hex, Some(&protected.key_hex)).unwrap();
//! assert_eq!(restored["sensor"], "qchip");
//! ```
//!
//! ## Configured Use
//!
//! ```rust
//! use qlct_engine::prelude::*;
//!
//! let service = QlctService::new(QlctConfig::reproducible(7).with_max_qubits(12)).unwrap();
//! let a = service.estimate_amplitude(3, 5, 500).unwrap();
//! let b = service.estimate_amplitude(3, 5, 500).unwrap();
//! assert_eq!(a, b);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L5_Integration → QlctConfig)
pub mod config;

/// Service facade (Gantree: L5_Integration → QlctService)
pub mod service;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{KemMode, QlctConfig};
pub use service::QlctService;

pub use qlct_core::{ErrorKind, QlctError, QlctResult};
pub use qlct_crypto::{Encapsulation, KeyPair, ProtectedPayload};
pub use qlct_grover::{Estimate, SearchResult};

// ============================================================================
// External Operations
// ============================================================================

/// Exact probability of measuring `target` after one Grover iteration
///
/// Fails with `InvalidConfiguration` for `n_qubits < 1` or a target outside
/// `[0, 2^n_qubits)`, and with `ResourceLimitExceeded` above the default
/// ceiling.
/// Gantree: search_probability(n, target) -> Result<f64> // 탐색 확률
pub fn search_probability(n_qubits: usize, target: usize) -> QlctResult<f64> {
    QlctService::default().search_probability(n_qubits, target)
}

/// Fraction of `shots` samples equal to `target`, using OS entropy
/// Gantree: estimate_amplitude(n, target, shots) -> Result<f64> // 진폭 추정
pub fn estimate_amplitude(n_qubits: usize, target: usize, shots: u64) -> QlctResult<f64> {
    QlctService::default().estimate_amplitude(n_qubits, target, shots)
}

/// Protect a JSON-serializable payload with a fresh KEM-derived key
/// Gantree: protect_payload(&T) -> Result<ProtectedPayload> // 페이로드 보호
pub fn protect_payload<T: serde::Serialize + ?Sized>(payload: &T) -> QlctResult<ProtectedPayload> {
    QlctService::default().protect_payload(payload)
}

/// Inverse of [`protect_payload`]; `None` uses the legacy stub key
pub fn restore_payload(ciphertext_hex: &str, key_hex: Option<&str>) -> QlctResult<serde_json::Value> {
    QlctService::default().restore_payload(ciphertext_hex, key_hex)
}

/// Fresh KEM keypair from the preferred backend
pub fn kem_keypair() -> QlctResult<KeyPair> {
    QlctService::default().kem_keypair()
}

/// Encapsulate against `public_key` with the preferred backend
pub fn kem_encapsulate(public_key: &[u8]) -> QlctResult<Encapsulation> {
    QlctService::default().kem_encapsulate(public_key)
}

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::config::{KemMode, QlctConfig};
    pub use crate::service::QlctService;
    pub use crate::{
        estimate_amplitude, kem_encapsulate, kem_keypair, protect_payload, restore_payload,
        search_probability,
    };
    pub use qlct_core::{ErrorKind, QlctError, QlctResult, SearchConfig};
    pub use qlct_crypto::{Encapsulation, KeyPair, ProtectedPayload};
    pub use qlct_grover::{Estimate, SearchResult};
    pub use qlct_sim::{Statevector, StatevectorSimulator};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "QLCT";

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use qlct_core::crypto as consts;
    use qlct_crypto::canonical_json;
    use qlct_grover::build_oracle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use serde_json::json;

    #[test]
    fn test_statevector_normalized() {
        let sim = StatevectorSimulator::default();
        for (n, t) in [(1, 0), (2, 3), (3, 5), (5, 17)] {
            let cfg = SearchConfig::new(n, t).unwrap();
            let circuit = qlct_grover::build_search_circuit(&cfg).unwrap();
            let state = sim.run(&circuit).unwrap();
            assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_oracle_flips_only_target() {
        let n = 3;
        let target = 5;
        let mut circuit = qlct_core::Circuit::new(n).unwrap();
        qlct_grover::hadamard_layer(&mut circuit, n).unwrap();
        circuit.compose(&build_oracle(n, target).unwrap()).unwrap();

        let state = StatevectorSimulator::default().run(&circuit).unwrap();
        let amp = 1.0 / (8f64).sqrt();
        for (i, a) in state.amplitudes().iter().enumerate() {
            let expected = if i == target { -amp } else { amp };
            assert_abs_diff_eq!(a.re, expected, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_known_search_probability() {
        assert_abs_diff_eq!(search_probability(3, 0b101).unwrap(), 0.78, epsilon = 0.01);
        assert_abs_diff_eq!(search_probability(2, 2).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_estimates_converge() {
        let exact = search_probability(3, 5).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let estimator = qlct_grover::AmplitudeEstimator::new();
        let cfg = SearchConfig::new(3, 5).unwrap();

        let mut errors = Vec::new();
        for shots in [100u64, 2000, 50000] {
            let est = estimator.estimate_detailed(&cfg, shots, &mut rng).unwrap();
            assert!(est.within(4.0), "{}", est);
            errors.push((est.estimate - exact).abs());
        }
        assert!(errors[2] < 0.01);

        // Mean of 100 trials at 2000 shots: within 3 single-trial SEs and
        // within 4 SEs of the mean (se/√100)
        let se = qlct_core::stats::standard_error(exact, 2000);
        let mean: f64 = (0..100)
            .map(|_| estimator.estimate(&cfg, 2000, &mut rng).unwrap())
            .sum::<f64>()
            / 100.0;
        assert!((mean - exact).abs() < 3.0 * se);
        assert!((mean - exact).abs() < 4.0 * se / 10.0, "mean {} vs {}", mean, exact);
    }

    #[test]
    fn test_protect_length_and_round_trip() {
        let payload = json!({"sensor": "qchip", "data": [1, 0, 1]});
        let canonical = canonical_json(&payload).unwrap();

        let protected = protect_payload(&payload).unwrap();
        assert_eq!(protected.ciphertext_hex.len() / 2, canonical.len());
        assert_eq!(protected.key_length, consts::SYMMETRIC_KEY_LEN);

        // Re-XOR with the derived key reproduces the serialization
        let key = hex::decode(&protected.key_hex).unwrap();
        let ct = hex::decode(&protected.ciphertext_hex).unwrap();
        let pt: Vec<u8> = ct
            .iter()
            .zip(key.iter().cycle())
            .map(|(c, k)| c ^ k)
            .collect();
        assert_eq!(pt, canonical);

        let restored = restore_payload(&protected.ciphertext_hex, Some(&protected.key_hex)).unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn test_keypair_freshness() {
        let a = kem_keypair().unwrap();
        let b = kem_keypair().unwrap();
        if a.is_stub() {
            assert_eq!(a.public_key(), consts::STUB_PUBLIC_KEY);
            assert_eq!(a.public_key(), b.public_key());
        } else {
            assert_eq!(a.public_key().len(), consts::MLKEM768_PUBLIC_KEY_SIZE);
            assert_ne!(a.public_key(), b.public_key());
        }

        let enc = kem_encapsulate(a.public_key()).unwrap();
        assert_eq!(enc.is_stub(), a.is_stub());
    }

    #[test]
    fn test_boundaries() {
        let err = search_probability(0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let err = estimate_amplitude(3, 5, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let err = search_probability(3, 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let err = estimate_amplitude(2, 4, 100).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let err = search_probability(31, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLimitExceeded);

        let err = search_probability(64, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLimitExceeded);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let err = kem_encapsulate(b"not a key").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "QLCT");
    }
}
