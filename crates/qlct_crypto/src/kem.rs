//! Key encapsulation adapter
//!
//! Gantree: L4_Protection → KemAdapter
//!
//! Wraps ML-KEM-768 behind keypair / encapsulate / decapsulate. The backend
//! is an explicit two-variant choice made at construction:
//!
//! - [`KemBackend::MlKem768`]: `pqcrypto-mlkem`, compiled in with the
//!   `ml-kem` feature. Fresh OS randomness on every call.
//! - [`KemBackend::Stub`]: fixed placeholder bytes. Keeps the pipeline
//!   runnable without the primitive and provides NO security. Every value it
//!   produces is flagged via `is_stub()`.

use qlct_core::crypto as consts;
use qlct_core::{QlctError, QlctResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Backend Selection
// ============================================================================

/// KEM implementation
/// Gantree: KemBackend // 백엔드 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KemBackend {
    /// Real ML-KEM-768
    MlKem768,
    /// Placeholder material, degraded mode
    Stub,
}

impl KemBackend {
    /// Whether the real primitive is compiled into this build
    pub fn mlkem_available() -> bool {
        cfg!(feature = "ml-kem")
    }

    /// Real backend when available, otherwise stub
    pub fn preferred() -> Self {
        if Self::mlkem_available() {
            KemBackend::MlKem768
        } else {
            KemBackend::Stub
        }
    }

    /// Algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            KemBackend::MlKem768 => consts::KEM_ALGORITHM,
            KemBackend::Stub => "stub",
        }
    }

    /// Check for degraded mode
    pub fn is_stub(&self) -> bool {
        matches!(self, KemBackend::Stub)
    }
}

impl fmt::Display for KemBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Key Material
// ============================================================================

/// Public/private key pair; the private key is wiped on drop
/// Gantree: KeyPair // 키 쌍
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    #[zeroize(skip)]
    public_key: Vec<u8>,
    private_key: Vec<u8>,
    #[zeroize(skip)]
    stub: bool,
}

impl KeyPair {
    /// Public key bytes
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Private key bytes
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// True when produced by the stub backend
    pub fn is_stub(&self) -> bool {
        self.stub
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key_len", &self.public_key.len())
            .field("private_key", &"<redacted>")
            .field("stub", &self.stub)
            .finish()
    }
}

/// KEM ciphertext plus shared secret; the secret is wiped on drop
/// Gantree: Encapsulation // 캡슐화 결과
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Encapsulation {
    #[zeroize(skip)]
    ciphertext: Vec<u8>,
    shared_secret: Vec<u8>,
    #[zeroize(skip)]
    stub: bool,
}

impl Encapsulation {
    /// KEM ciphertext
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Shared secret (consume immediately, never log)
    pub fn shared_secret(&self) -> &[u8] {
        &self.shared_secret
    }

    /// True when produced by the stub backend
    pub fn is_stub(&self) -> bool {
        self.stub
    }
}

impl fmt::Debug for Encapsulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encapsulation")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("shared_secret", &"<redacted>")
            .field("stub", &self.stub)
            .finish()
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// KEM adapter over a fixed backend
/// Gantree: KemAdapter // KEM 어댑터
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemAdapter {
    backend: KemBackend,
}

impl Default for KemAdapter {
    fn default() -> Self {
        Self::auto()
    }
}

impl KemAdapter {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Adapter for an explicit backend
    ///
    /// Fails with `BackendNotAvailable` when ML-KEM is requested but not
    /// compiled in.
    pub fn new(backend: KemBackend) -> QlctResult<Self> {
        if backend == KemBackend::MlKem768 && !KemBackend::mlkem_available() {
            return Err(QlctError::BackendNotAvailable(backend.name().to_string()));
        }
        if backend.is_stub() {
            log::warn!("KEM running in stub mode: key material is a fixed placeholder");
        }
        Ok(Self { backend })
    }

    /// Real backend when available, else stub
    /// Gantree: auto() -> Self // 자동 선택
    pub fn auto() -> Self {
        let backend = KemBackend::preferred();
        if backend.is_stub() {
            log::warn!("ML-KEM-768 not compiled in; falling back to stub KEM");
        }
        Self { backend }
    }

    /// Stub backend
    pub fn stub() -> Self {
        Self {
            backend: KemBackend::Stub,
        }
    }

    /// Selected backend
    pub fn backend(&self) -> KemBackend {
        self.backend
    }

    /// Check for degraded mode
    pub fn is_stub(&self) -> bool {
        self.backend.is_stub()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Fresh key pair
    /// Gantree: generate_keypair(&self) -> Result<KeyPair> // 키 생성
    pub fn generate_keypair(&self) -> QlctResult<KeyPair> {
        match self.backend {
            KemBackend::MlKem768 => mlkem::keypair(),
            KemBackend::Stub => Ok(KeyPair {
                public_key: consts::STUB_PUBLIC_KEY.to_vec(),
                private_key: consts::STUB_SECRET_KEY.to_vec(),
                stub: true,
            }),
        }
    }

    /// Encapsulate against `public_key`
    /// Gantree: encapsulate(&self, pk) -> Result<Encapsulation> // 캡슐화
    pub fn encapsulate(&self, public_key: &[u8]) -> QlctResult<Encapsulation> {
        match self.backend {
            KemBackend::MlKem768 => mlkem::encapsulate(public_key),
            KemBackend::Stub => {
                if public_key != consts::STUB_PUBLIC_KEY {
                    return Err(QlctError::InvalidKey(format!(
                        "stub KEM expects the stub public key, got {} bytes",
                        public_key.len()
                    )));
                }
                Ok(Encapsulation {
                    ciphertext: consts::STUB_CIPHERTEXT.to_vec(),
                    shared_secret: consts::STUB_SHARED_SECRET.to_vec(),
                    stub: true,
                })
            }
        }
    }

    /// Recover the shared secret from `ciphertext` with `private_key`
    /// Gantree: decapsulate(&self, sk, ct) -> Result<secret> // 역캡슐화
    pub fn decapsulate(
        &self,
        private_key: &[u8],
        ciphertext: &[u8],
    ) -> QlctResult<Zeroizing<Vec<u8>>> {
        match self.backend {
            KemBackend::MlKem768 => mlkem::decapsulate(private_key, ciphertext),
            KemBackend::Stub => {
                if private_key != consts::STUB_SECRET_KEY {
                    return Err(QlctError::InvalidKey("stub KEM expects the stub private key".into()));
                }
                if ciphertext != consts::STUB_CIPHERTEXT {
                    return Err(QlctError::InvalidKey("stub KEM expects the stub ciphertext".into()));
                }
                Ok(Zeroizing::new(consts::STUB_SHARED_SECRET.to_vec()))
            }
        }
    }
}

#[cfg_attr(not(feature = "ml-kem"), allow(dead_code))]
fn check_len(what: &str, got: usize, expected: usize) -> QlctResult<()> {
    if got != expected {
        return Err(QlctError::InvalidKey(format!(
            "{} must be {} bytes, got {}",
            what, expected, got
        )));
    }
    Ok(())
}

// ============================================================================
// ML-KEM-768 (pqcrypto)
// ============================================================================

#[cfg(feature = "ml-kem")]
mod mlkem {
    use super::{check_len, consts, Encapsulation, KeyPair};
    use pqcrypto_mlkem::mlkem768;
    use pqcrypto_traits::kem::{Ciphertext, PublicKey, SecretKey, SharedSecret};
    use qlct_core::{QlctError, QlctResult};
    use zeroize::Zeroizing;

    pub(super) fn keypair() -> QlctResult<KeyPair> {
        let (pk, sk) = mlkem768::keypair();
        let keypair = KeyPair {
            public_key: pk.as_bytes().to_vec(),
            private_key: sk.as_bytes().to_vec(),
            stub: false,
        };
        if keypair.public_key.len() != consts::MLKEM768_PUBLIC_KEY_SIZE
            || keypair.private_key.len() != consts::MLKEM768_SECRET_KEY_SIZE
        {
            return Err(QlctError::CryptoBackend(format!(
                "unexpected key sizes pk={} sk={}",
                keypair.public_key.len(),
                keypair.private_key.len()
            )));
        }
        Ok(keypair)
    }

    pub(super) fn encapsulate(public_key: &[u8]) -> QlctResult<Encapsulation> {
        check_len("public key", public_key.len(), consts::MLKEM768_PUBLIC_KEY_SIZE)?;
        let pk = mlkem768::PublicKey::from_bytes(public_key)
            .map_err(|e| QlctError::InvalidKey(format!("{:?}", e)))?;

        let (ss, ct) = mlkem768::encapsulate(&pk);
        let encapsulation = Encapsulation {
            ciphertext: ct.as_bytes().to_vec(),
            shared_secret: ss.as_bytes().to_vec(),
            stub: false,
        };
        if encapsulation.ciphertext.len() != consts::MLKEM768_CIPHERTEXT_SIZE
            || encapsulation.shared_secret.len() != consts::MLKEM768_SHARED_SECRET_SIZE
        {
            return Err(QlctError::CryptoBackend(format!(
                "unexpected encapsulation sizes ct={} ss={}",
                encapsulation.ciphertext.len(),
                encapsulation.shared_secret.len()
            )));
        }
        Ok(encapsulation)
    }

    pub(super) fn decapsulate(
        private_key: &[u8],
        ciphertext: &[u8],
    ) -> QlctResult<Zeroizing<Vec<u8>>> {
        check_len("private key", private_key.len(), consts::MLKEM768_SECRET_KEY_SIZE)?;
        check_len("ciphertext", ciphertext.len(), consts::MLKEM768_CIPHERTEXT_SIZE)?;

        let sk = mlkem768::SecretKey::from_bytes(private_key)
            .map_err(|e| QlctError::InvalidKey(format!("{:?}", e)))?;
        let ct = mlkem768::Ciphertext::from_bytes(ciphertext)
            .map_err(|e| QlctError::InvalidKey(format!("{:?}", e)))?;

        let ss = mlkem768::decapsulate(&ct, &sk);
        Ok(Zeroizing::new(ss.as_bytes().to_vec()))
    }
}

#[cfg(not(feature = "ml-kem"))]
mod mlkem {
    use super::{Encapsulation, KeyPair};
    use qlct_core::{QlctError, QlctResult};
    use zeroize::Zeroizing;

    fn unavailable() -> QlctError {
        QlctError::BackendNotAvailable(qlct_core::crypto::KEM_ALGORITHM.to_string())
    }

    pub(super) fn keypair() -> QlctResult<KeyPair> {
        Err(unavailable())
    }

    pub(super) fn encapsulate(_public_key: &[u8]) -> QlctResult<Encapsulation> {
        Err(unavailable())
    }

    pub(super) fn decapsulate(
        _private_key: &[u8],
        _ciphertext: &[u8],
    ) -> QlctResult<Zeroizing<Vec<u8>>> {
        Err(unavailable())
    }
}

// ============================================================================
// Tests
// ============================================================================
