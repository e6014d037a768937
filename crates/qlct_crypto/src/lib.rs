//! # QLCT Crypto
//!
//! KEM-derived payload protection.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qlct_crypto // L4: Protection (완료)
//!     L4_Protection // 페이로드 보호 (완료)
//!         KemAdapter // ML-KEM-768 / stub (완료)
//!         SymmetricCipher // XOR 스트림 인터페이스 (완료)
//!         PayloadProtector // KEM → 키 → 암호화 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlct_crypto::prelude::*;
//! use serde_json::json;
//!
//! let protector = PayloadProtector::new(KemAdapter::auto());
//! let payload = json!({"sensor": "qchip", "data": [1, 0, 1]});
//!
//! let protected = protector.protect(&payload).unwrap();
//! let restored = protector
//!     .restore_value(&protected.ciphertext_hex, Some(&protected.key_hex))
//!     .unwrap();
//! assert_eq!(restored, payload);
//! ```
//!
//! ## Security
//!
//! The symmetric stage is a repeating-key XOR and the derived key is
//! returned alongside the ciphertext. Treat the output as obfuscation.

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// KEM adapter (Gantree: L4_Protection → KemAdapter)
pub mod kem;

/// Symmetric stage (Gantree: L4_Protection → SymmetricCipher)
pub mod cipher;

/// Protection pipeline (Gantree: L4_Protection → PayloadProtector)
pub mod protector;

// ============================================================================
// Re-exports
// ============================================================================

pub use cipher::{SymmetricCipher, XorCipher};
pub use kem::{Encapsulation, KemAdapter, KemBackend, KeyPair};
pub use protector::{canonical_json, derive_symmetric_key, PayloadProtector, ProtectedPayload};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::cipher::{SymmetricCipher, XorCipher};
    pub use crate::kem::{Encapsulation, KemAdapter, KemBackend, KeyPair};
    pub use crate::protector::{
        canonical_json, derive_symmetric_key, PayloadProtector, ProtectedPayload,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================
