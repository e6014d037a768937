//! Symmetric stage
//!
//! Gantree: L4_Protection → SymmetricCipher
//!
//! The protector only talks to [`SymmetricCipher`], so the stage can be
//! replaced by an authenticated cipher without touching KEM or
//! serialization code.
//!
//! [`XorCipher`] is a repeating-key XOR: `c[i] = p[i] ^ key[i % key.len()]`.
//! It preserves length, is its own inverse, and is NOT confidentiality-grade.

use qlct_core::{QlctError, QlctResult};

/// Keyed byte transform used after key derivation
/// Gantree: SymmetricCipher // 대칭 암호 인터페이스
pub trait SymmetricCipher {
    /// Cipher name
    fn name(&self) -> &'static str;

    /// Encrypt `plaintext` under `key`
    fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> QlctResult<Vec<u8>>;

    /// Decrypt `ciphertext` under `key`
    fn decrypt(&self, key: &[u8], ciphertext: &[u8]) -> QlctResult<Vec<u8>>;
}

/// Repeating-key XOR stream
/// Gantree: XorCipher // XOR 스트림
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XorCipher;

impl XorCipher {
    fn apply(key: &[u8], data: &[u8]) -> QlctResult<Vec<u8>> {
        if key.is_empty() {
            return Err(QlctError::InvalidKey("symmetric key is empty".into()));
        }
        Ok(data
            .iter()
            .zip(key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect())
    }
}

impl SymmetricCipher for XorCipher {
    fn name(&self) -> &'static str {
        "xor-repeating-key"
    }

    fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> QlctResult<Vec<u8>> {
        Self::apply(key, plaintext)
    }

    fn decrypt(&self, key: &[u8], ciphertext: &[u8]) -> QlctResult<Vec<u8>> {
        Self::apply(key, ciphertext)
    }
}

// ============================================================================
// Tests
// ============================================================================
