//! Payload protection pipeline
//!
//! Gantree: L4_Protection → PayloadProtector
//!
//! `protect`: fresh keypair → self-encapsulation → key = shared-secret
//! prefix → canonical JSON → symmetric stage → hex.
//!
//! Self-encapsulation means the same party generates and consumes the key.
//! This derives a key from KEM randomness; it is not a two-party channel.
//! The derived key is returned in [`ProtectedPayload::key_hex`], so the
//! output offers no confidentiality against whoever receives it.

use crate::cipher::{SymmetricCipher, XorCipher};
use crate::kem::KemAdapter;
use qlct_core::crypto as consts;
use qlct_core::{QlctError, QlctResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

// ============================================================================
// Result Type
// ============================================================================

/// Output of [`PayloadProtector::protect`]
/// Gantree: ProtectedPayload // 보호 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedPayload {
    /// Hex-encoded symmetric ciphertext
    pub ciphertext_hex: String,

    /// Length of the KEM ciphertext in bytes
    pub kem_ciphertext_length: usize,

    /// Length of the derived symmetric key in bytes
    pub key_length: usize,

    /// Derived key, hex-encoded (disclosed for restore; insecure)
    pub key_hex: String,

    /// True when the stub KEM produced the key
    pub stub_mode: bool,
}

impl ProtectedPayload {
    /// Ciphertext length in bytes
    pub fn ciphertext_len(&self) -> usize {
        self.ciphertext_hex.len() / 2
    }
}

impl fmt::Display for ProtectedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProtectedPayload({} bytes, kem_ct={}, key={}{})",
            self.ciphertext_len(),
            self.kem_ciphertext_length,
            self.key_length,
            if self.stub_mode { ", STUB" } else { "" }
        )
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Compact JSON with object keys in lexicographic order
/// Gantree: canonical_json(&T) -> Result<Vec<u8>> // 정규 직렬화
pub fn canonical_json<T: Serialize + ?Sized>(payload: &T) -> QlctResult<Vec<u8>> {
    // Value's map is a BTreeMap, so converting first sorts every object
    let value = serde_json::to_value(payload)?;
    Ok(serde_json::to_vec(&value)?)
}

/// First `len` bytes of the shared secret, or the fallback key if it is empty
/// Gantree: derive_symmetric_key(ss, len) -> key // 키 유도
pub fn derive_symmetric_key(shared_secret: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    if shared_secret.is_empty() {
        log::warn!("empty shared secret; using fixed fallback key");
        return Zeroizing::new(consts::FALLBACK_KEY.to_vec());
    }
    let n = len.min(shared_secret.len());
    Zeroizing::new(shared_secret[..n].to_vec())
}

// ============================================================================
// Protector
// ============================================================================

/// KEM-keyed payload protector
/// Gantree: PayloadProtector // 보호 파이프라인
#[derive(Debug, Clone)]
pub struct PayloadProtector<C: SymmetricCipher = XorCipher> {
    kem: KemAdapter,
    cipher: C,
    key_len: usize,
}

impl Default for PayloadProtector<XorCipher> {
    fn default() -> Self {
        Self::new(KemAdapter::auto())
    }
}

impl PayloadProtector<XorCipher> {
    /// Protector with the XOR stage and a 16-byte key
    pub fn new(kem: KemAdapter) -> Self {
        Self {
            kem,
            cipher: XorCipher,
            key_len: consts::SYMMETRIC_KEY_LEN,
        }
    }
}

impl<C: SymmetricCipher> PayloadProtector<C> {
    /// Swap the symmetric stage
    pub fn with_cipher<D: SymmetricCipher>(self, cipher: D) -> PayloadProtector<D> {
        PayloadProtector {
            kem: self.kem,
            cipher,
            key_len: self.key_len,
        }
    }

    /// Set the key prefix length
    pub fn with_key_len(mut self, key_len: usize) -> Self {
        self.key_len = key_len;
        self
    }

    /// KEM adapter in use
    pub fn kem(&self) -> &KemAdapter {
        &self.kem
    }

    /// Symmetric stage in use
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Protect a serializable payload
    /// Gantree: protect(&self, &T) -> Result<ProtectedPayload> // 보호
    pub fn protect<T: Serialize + ?Sized>(&self, payload: &T) -> QlctResult<ProtectedPayload> {
        if self.key_len == 0 {
            return Err(QlctError::InvalidConfig("symmetric key length must be >= 1".into()));
        }

        let keypair = self.kem.generate_keypair()?;
        let encapsulation = self.kem.encapsulate(keypair.public_key())?;
        let key = derive_symmetric_key(encapsulation.shared_secret(), self.key_len);

        let plaintext = Zeroizing::new(canonical_json(payload)?);
        let ciphertext = self.cipher.encrypt(&key, &plaintext)?;

        log::debug!(
            "protected {} bytes with {} (kem={}, kem_ct={} bytes)",
            plaintext.len(),
            self.cipher.name(),
            self.kem.backend(),
            encapsulation.ciphertext().len()
        );

        Ok(ProtectedPayload {
            ciphertext_hex: hex::encode(&ciphertext),
            kem_ciphertext_length: encapsulation.ciphertext().len(),
            key_length: key.len(),
            key_hex: hex::encode(key.as_slice()),
            stub_mode: encapsulation.is_stub(),
        })
    }

    /// Recover the serialized bytes from a hex ciphertext
    ///
    /// With no key, the legacy stub key `0123456789abcdef` is assumed.
    /// Gantree: restore(&self, ct_hex, key_hex?) -> Result<Vec<u8>> // 복원
    pub fn restore(&self, ciphertext_hex: &str, key_hex: Option<&str>) -> QlctResult<Vec<u8>> {
        let key = match key_hex {
            Some(k) => Zeroizing::new(hex::decode(k).map_err(|e| QlctError::HexError(e.to_string()))?),
            None => {
                log::warn!("no key supplied; restoring with the legacy stub key");
                Zeroizing::new(consts::LEGACY_RESTORE_KEY.to_vec())
            }
        };
        let ciphertext =
            hex::decode(ciphertext_hex).map_err(|e| QlctError::HexError(e.to_string()))?;
        self.cipher.decrypt(&key, &ciphertext)
    }

    /// Restore and parse as JSON
    pub fn restore_value(
        &self,
        ciphertext_hex: &str,
        key_hex: Option<&str>,
    ) -> QlctResult<serde_json::Value> {
        let bytes = self.restore(ciphertext_hex, key_hex)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qlct_core::ErrorKind;
    use serde_json::json;

    fn sensor_payload() -> serde_json::Value {
        json!({"sensor": "qchip", "data": [1, 0, 1]})
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let bytes = canonical_json(&sensor_payload()).unwrap();
        assert_eq!(bytes, br#"{"data":[1,0,1],"sensor":"qchip"}"#.to_vec());
    }

    #[test]
    fn test_canonical_json_struct() {
        #[derive(Serialize)]
        struct Reading {
            zeta: u8,
            alpha: &'static str,
        }
        let bytes = canonical_json(&Reading { zeta: 1, alpha: "a" }).unwrap();
        assert_eq!(bytes, br#"{"alpha":"a","zeta":1}"#.to_vec());
    }

    #[test]
    fn test_derive_key_prefix() {
        let key = derive_symmetric_key(consts::STUB_SHARED_SECRET, 16);
        assert_eq!(key.as_slice(), b"0123456789abcdef");

        let short = derive_symmetric_key(b"abc", 16);
        assert_eq!(short.as_slice(), b"abc");
    }

    #[test]
    fn test_derive_key_fallback() {
        let key = derive_symmetric_key(&[], 16);
        assert_eq!(key.as_slice(), consts::FALLBACK_KEY);
    }

    #[test]
    fn test_stub_protect_is_deterministic() {
        let protector = PayloadProtector::new(KemAdapter::stub());
        let a = protector.protect(&sensor_payload()).unwrap();
        let b = protector.protect(&sensor_payload()).unwrap();
        assert_eq!(a, b);
        assert!(a.stub_mode);
        assert_eq!(a.kem_ciphertext_length, consts::STUB_CIPHERTEXT.len());
        assert_eq!(a.key_length, 16);
        assert_eq!(a.key_hex, hex::encode(b"0123456789abcdef"));
    }

    #[test]
    fn test_length_preserved_and_round_trip() {
        let protector = PayloadProtector::new(KemAdapter::auto());
        let payload = sensor_payload();
        let canonical = canonical_json(&payload).unwrap();

        let protected = protector.protect(&payload).unwrap();
        assert_eq!(protected.ciphertext_hex.len(), canonical.len() * 2);
        assert_eq!(protected.ciphertext_len(), canonical.len());

        let restored = protector
            .restore(&protected.ciphertext_hex, Some(&protected.key_hex))
            .unwrap();
        assert_eq!(restored, canonical);
        assert_eq!(
            protector
                .restore_value(&protected.ciphertext_hex, Some(&protected.key_hex))
                .unwrap(),
            payload
        );
    }

    #[test]
    fn test_restore_default_key_matches_stub() {
        let protector = PayloadProtector::new(KemAdapter::stub());
        let protected = protector.protect(&sensor_payload()).unwrap();
        let restored = protector.restore_value(&protected.ciphertext_hex, None).unwrap();
        assert_eq!(restored, sensor_payload());
    }

    #[test]
    fn test_restore_bad_hex() {
        let protector = PayloadProtector::new(KemAdapter::stub());
        let err = protector.restore("zz", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);

        let err = protector.restore("00", Some("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[test]
    fn test_zero_key_len_rejected() {
        let protector = PayloadProtector::new(KemAdapter::stub()).with_key_len(0);
        let err = protector.protect(&sensor_payload()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_custom_cipher() {
        struct Identity;
        impl SymmetricCipher for Identity {
            fn name(&self) -> &'static str {
                "identity"
            }
            fn encrypt(&self, _key: &[u8], p: &[u8]) -> QlctResult<Vec<u8>> {
                Ok(p.to_vec())
            }
            fn decrypt(&self, _key: &[u8], c: &[u8]) -> QlctResult<Vec<u8>> {
                Ok(c.to_vec())
            }
        }

        let protector = PayloadProtector::new(KemAdapter::stub()).with_cipher(Identity);
        let protected = protector.protect(&sensor_payload()).unwrap();
        assert_eq!(
            hex::decode(&protected.ciphertext_hex).unwrap(),
            canonical_json(&sensor_payload()).unwrap()
        );
    }
}
