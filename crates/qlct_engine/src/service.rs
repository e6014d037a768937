//! Configured service facade
//!
//! Gantree: L5_Integration → QlctService
//!
//! Wires a [`QlctConfig`] into the search engine, the amplitude estimator
//! and the payload protector. Holds no mutable state; every call allocates
//! its own statevector, RNG and key material.

use crate::config::QlctConfig;
use qlct_core::{QlctResult, SearchConfig};
use qlct_crypto::{Encapsulation, KeyPair, PayloadProtector, ProtectedPayload};
use qlct_grover::{AmplitudeEstimator, Estimate, GroverEngine, SearchResult};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use zeroize::Zeroizing;

/// Service facade over search, estimation and protection
/// Gantree: QlctService // 서비스 파사드
#[derive(Debug, Clone)]
pub struct QlctService {
    config: QlctConfig,
    estimator: AmplitudeEstimator,
    protector: PayloadProtector,
}

impl Default for QlctService {
    fn default() -> Self {
        let config = QlctConfig::default();
        Self {
            estimator: AmplitudeEstimator::with_engine(config.to_engine()),
            protector: PayloadProtector::default().with_key_len(config.symmetric_key_len),
            config,
        }
    }
}

impl QlctService {
    /// Build from a validated configuration
    /// Gantree: new(config) -> Result<Self> // 생성
    pub fn new(config: QlctConfig) -> QlctResult<Self> {
        config.validate()?;
        let kem = config.kem_mode.to_adapter()?;
        log::info!("QLCT service: {} (kem backend: {})", config, kem.backend());

        Ok(Self {
            estimator: AmplitudeEstimator::with_engine(config.to_engine()),
            protector: PayloadProtector::new(kem).with_key_len(config.symmetric_key_len),
            config,
        })
    }

    /// Build from [`QlctConfig::load`]
    pub fn from_env() -> QlctResult<Self> {
        Self::new(QlctConfig::load()?)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Active configuration
    pub fn config(&self) -> &QlctConfig {
        &self.config
    }

    /// Search engine
    pub fn engine(&self) -> &GroverEngine {
        self.estimator.engine()
    }

    /// Payload protector
    pub fn protector(&self) -> &PayloadProtector {
        &self.protector
    }

    /// True when the KEM runs in stub mode
    pub fn is_degraded(&self) -> bool {
        self.protector.kem().is_stub()
    }

    /// Fresh sampling RNG: seeded from the config, else from OS entropy
    pub fn rng(&self) -> ChaCha20Rng {
        match self.config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Exact probability of measuring `target` after the search circuit
    /// Gantree: search_probability(n, target) -> Result<f64> // 탐색 확률
    pub fn search_probability(&self, n_qubits: usize, target: usize) -> QlctResult<f64> {
        let cfg = SearchConfig::new(n_qubits, target)?;
        self.engine().search_probability(&cfg)
    }

    /// Full search result with distribution
    pub fn search(&self, n_qubits: usize, target: usize) -> QlctResult<SearchResult> {
        let cfg = SearchConfig::new(n_qubits, target)?;
        self.engine().run(&cfg)
    }

    // ========================================================================
    // Estimation
    // ========================================================================

    /// Sampled estimate of the target probability
    /// Gantree: estimate_amplitude(n, target, shots) -> Result<f64> // 진폭 추정
    pub fn estimate_amplitude(&self, n_qubits: usize, target: usize, shots: u64) -> QlctResult<f64> {
        Ok(self.estimate_detailed(n_qubits, target, shots)?.estimate)
    }

    /// Estimate using the configured default shot count
    pub fn estimate_default(&self, n_qubits: usize, target: usize) -> QlctResult<f64> {
        self.estimate_amplitude(n_qubits, target, self.config.default_shots)
    }

    /// Estimate with hit count, exact value and standard error
    pub fn estimate_detailed(
        &self,
        n_qubits: usize,
        target: usize,
        shots: u64,
    ) -> QlctResult<Estimate> {
        let cfg = SearchConfig::new(n_qubits, target)?;
        let mut rng = self.rng();
        self.estimator.estimate_detailed(&cfg, shots, &mut rng)
    }

    // ========================================================================
    // Protection
    // ========================================================================

    /// Protect a serializable payload
    /// Gantree: protect_payload(&T) -> Result<ProtectedPayload> // 페이로드 보호
    pub fn protect_payload<T: Serialize + ?Sized>(&self, payload: &T) -> QlctResult<ProtectedPayload> {
        self.protector.protect(payload)
    }

    /// Inverse of [`protect_payload`](Self::protect_payload)
    pub fn restore_payload(
        &self,
        ciphertext_hex: &str,
        key_hex: Option<&str>,
    ) -> QlctResult<serde_json::Value> {
        self.protector.restore_value(ciphertext_hex, key_hex)
    }

    // ========================================================================
    // KEM primitives
    // ========================================================================

    /// Fresh KEM keypair
    pub fn kem_keypair(&self) -> QlctResult<KeyPair> {
        self.protector.kem().generate_keypair()
    }

    /// Encapsulate against `public_key`
    pub fn kem_encapsulate(&self, public_key: &[u8]) -> QlctResult<Encapsulation> {
        self.protector.kem().encapsulate(public_key)
    }

    /// Recover the shared secret
    pub fn kem_decapsulate(
        &self,
        private_key: &[u8],
        ciphertext: &[u8],
    ) -> QlctResult<Zeroizing<Vec<u8>>> {
        self.protector.kem().decapsulate(private_key, ciphertext)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KemMode;
    use approx::assert_abs_diff_eq;
    use qlct_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = QlctService::new(QlctConfig::default().with_shots(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_degraded_mode() {
        let service = QlctService::new(QlctConfig::degraded()).unwrap();
        assert!(service.is_degraded());
        let kp = service.kem_keypair().unwrap();
        assert!(kp.is_stub());
    }

    #[cfg(not(feature = "ml-kem"))]
    #[test]
    fn test_explicit_mlkem_unavailable() {
        let err = QlctService::new(QlctConfig::default().with_kem_mode(KemMode::MlKem768))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CryptoBackend);
    }

    #[cfg(feature = "ml-kem")]
    #[test]
    fn test_explicit_mlkem() {
        let service =
            QlctService::new(QlctConfig::default().with_kem_mode(KemMode::MlKem768)).unwrap();
        assert!(!service.is_degraded());
    }

    #[test]
    fn test_search_probability() {
        let service = QlctService::default();
        assert_abs_diff_eq!(service.search_probability(3, 5).unwrap(), 0.78125, epsilon = 1e-9);

        let result = service.search(3, 5).unwrap();
        assert_eq!(result.most_likely, 5);
        assert_eq!(result.most_likely_label, "101");
    }

    #[test]
    fn test_iterations_from_config() {
        let service = QlctService::new(QlctConfig::default().with_iterations(2)).unwrap();
        // N=8, k=2: sin^2(5θ) with sin θ = 1/√8
        assert_abs_diff_eq!(service.search_probability(3, 5).unwrap(), 0.9453125, epsilon = 1e-9);
    }

    #[test]
    fn test_ceiling_from_config() {
        let service = QlctService::new(QlctConfig::default().with_max_qubits(4)).unwrap();
        let err = service.search_probability(5, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLimitExceeded);
    }

    #[test]
    fn test_seeded_estimates_repeat() {
        let service = QlctService::new(QlctConfig::reproducible(42)).unwrap();
        let a = service.estimate_amplitude(3, 5, 500).unwrap();
        let b = service.estimate_amplitude(3, 5, 500).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_estimate_default_shots() {
        let service = QlctService::new(QlctConfig::reproducible(1).with_shots(300)).unwrap();
        let detailed = service.estimate_detailed(3, 5, 300).unwrap();
        assert_eq!(detailed.shots, 300);
        assert_eq!(service.estimate_default(3, 5).unwrap(), detailed.estimate);
    }

    #[test]
    fn test_protect_restore() {
        let service = QlctService::new(QlctConfig::default().with_key_len(8)).unwrap();
        let payload = json!({"sensor": "qchip", "data": [1, 0, 1]});
        let protected = service.protect_payload(&payload).unwrap();
        assert_eq!(protected.key_length, 8);
        assert_eq!(protected.stub_mode, service.is_degraded());

        let restored = service
            .restore_payload(&protected.ciphertext_hex, Some(&protected.key_hex))
            .unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn test_kem_roundtrip() {
        let service = QlctService::default();
        let kp = service.kem_keypair().unwrap();
        let enc = service.kem_encapsulate(kp.public_key()).unwrap();
        let ss = service
            .kem_decapsulate(kp.private_key(), enc.ciphertext())
            .unwrap();
        assert_eq!(ss.as_slice(), enc.shared_secret());
    }
}
