//! Error types for QLCT
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum shared by every layer. Each variant maps onto a coarse
//! [`ErrorKind`] tag so callers at the service boundary can branch on the
//! failure class without matching individual variants.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse failure class reported to callers
/// Gantree: ErrorKind // 에러 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Bad qubit count, out-of-range target, non-positive shots, malformed circuit
    InvalidConfiguration,
    /// Malformed key bytes handed to the KEM or cipher
    InvalidKey,
    /// KEM primitive present but failing, or requested but not compiled in
    CryptoBackend,
    /// Requested qubit count exceeds the configured memory ceiling
    ResourceLimitExceeded,
    /// JSON or hex encoding failure
    Serialization,
    /// Configuration file access failure
    Io,
    /// Broken internal invariant
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ErrorKind::InvalidConfiguration => "InvalidConfiguration",
            ErrorKind::InvalidKey => "InvalidKey",
            ErrorKind::CryptoBackend => "CryptoBackendError",
            ErrorKind::ResourceLimitExceeded => "ResourceLimitExceeded",
            ErrorKind::Serialization => "Serialization",
            ErrorKind::Io => "Io",
            ErrorKind::Internal => "Internal",
        };
        write!(f, "{}", tag)
    }
}

/// Main error type for QLCT
/// Gantree: QlctError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QlctError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Qubit count below 1
    /// Gantree: InvalidQubitCount{{n}} // 큐비트 수
    #[error("Invalid qubit count {n_qubits}: must be >= 1")]
    InvalidQubitCount { n_qubits: usize },

    /// Search target outside [0, 2^n)
    /// Gantree: TargetOutOfRange{{t,n}} // 타겟 범위
    #[error("Target {target} out of range for {n_qubits} qubits: must be < 2^{n_qubits}")]
    TargetOutOfRange { target: usize, n_qubits: usize },

    /// Shots must be positive
    #[error("Invalid shots {0}: must be >= 1")]
    InvalidShots(u64),

    /// Generic configuration rejection
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Operation on non-existent qubit
    /// Gantree: GateQubitMismatch{{q,n}} // 큐비트 불일치
    #[error("Operation references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Multi-controlled X lists its own target among the controls
    #[error("Control set contains target qubit {qubit}")]
    ControlIsTarget { qubit: usize },

    /// Multi-controlled X lists a control twice
    #[error("Control qubit {qubit} listed more than once")]
    DuplicateControl { qubit: usize },

    // ========================================================================
    // Resource Errors
    // ========================================================================
    /// Qubit count above the allocation ceiling
    /// Gantree: QubitLimitExceeded{{req,max}} // 메모리 한도
    #[error("Requested {requested} qubits exceeds ceiling of {max} (2^{requested} amplitudes)")]
    QubitLimitExceeded { requested: usize, max: usize },

    // ========================================================================
    // Crypto Errors
    // ========================================================================
    /// Malformed or wrong-length key
    /// Gantree: InvalidKey(String) // 키 오류
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// KEM primitive failure
    /// Gantree: CryptoBackend(String) // 백엔드 오류
    #[error("Crypto backend error: {0}")]
    CryptoBackend(String),

    /// KEM backend requested but not available in this build
    #[error("KEM backend '{0}' not available")]
    BackendNotAvailable(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Hex decoding error
    #[error("Hex error: {0}")]
    HexError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for QLCT operations
/// Gantree: QlctResult<T> // type alias
pub type QlctResult<T> = Result<T, QlctError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QlctError {
    fn from(err: serde_json::Error) -> Self {
        QlctError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QlctError {
    fn from(err: std::io::Error) -> Self {
        QlctError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QlctError {
    /// Failure class for the caller
    pub fn kind(&self) -> ErrorKind {
        match self {
            QlctError::InvalidQubitCount { .. }
            | QlctError::TargetOutOfRange { .. }
            | QlctError::InvalidShots(_)
            | QlctError::InvalidConfig(_)
            | QlctError::GateQubitMismatch { .. }
            | QlctError::ControlIsTarget { .. }
            | QlctError::DuplicateControl { .. } => ErrorKind::InvalidConfiguration,
            QlctError::QubitLimitExceeded { .. } => ErrorKind::ResourceLimitExceeded,
            QlctError::InvalidKey(_) => ErrorKind::InvalidKey,
            QlctError::CryptoBackend(_) | QlctError::BackendNotAvailable(_) => {
                ErrorKind::CryptoBackend
            }
            QlctError::JsonError(_) | QlctError::HexError(_) => ErrorKind::Serialization,
            QlctError::FileError(_) => ErrorKind::Io,
            QlctError::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Check if error was raised by input validation (never retried)
    pub fn is_validation_error(&self) -> bool {
        self.kind() == ErrorKind::InvalidConfiguration
    }

    /// Check if error comes from the key/KEM path
    pub fn is_crypto_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidKey | ErrorKind::CryptoBackend)
    }
}

// ============================================================================
// Tests
// ============================================================================
