//! # QLCT Core
//!
//! Foundation types, operations, circuits, and builder for the quantum
//! logic and crypto toolkit.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qlct_core // L0+L1: Foundation + Circuit (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 큐비트/기저/SearchConfig (완료)
//!         Constants // 한도/그로버/통계/암호 상수 (완료)
//!         Errors // 에러 타입 + ErrorKind (완료)
//!     L1_Circuit // 회로 구조 (완료)
//!         Operation // H, X, MCX (완료)
//!         Circuit // 회로 구조체 (완료)
//!         CircuitBuilder // 빌더 패턴 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlct_core::prelude::*;
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h_layer()
//!     .x_zero_bits(0b101)
//!     .phase_flip_ones()
//!     .x_zero_bits(0b101)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use qlct_core::prelude::*;
//!
//! // target one past the range is rejected, never masked
//! let err = SearchConfig::new(3, 8).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Circuit operations (Gantree: L1_Circuit → Operation)
pub mod gate;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Circuit → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use constants::{crypto, grover, limits, stats};
pub use error::{ErrorKind, QlctError, QlctResult};
pub use gate::Operation;
pub use types::{basis_label, qubit_value, Amplitude, BasisIndex, QubitId, SearchConfig};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qlct_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::constants::{crypto, grover, limits, stats};
    pub use crate::error::{ErrorKind, QlctError, QlctResult};
    pub use crate::gate::Operation;
    pub use crate::types::{
        basis_label, qubit_value, Amplitude, BasisIndex, QubitId, SearchConfig,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_oracle_shape_for_target_101() {
        let circuit = CircuitBuilder::new(3)
            .x_zero_bits(0b101)
            .phase_flip_ones()
            .x_zero_bits(0b101)
            .build()
            .unwrap();

        // X(1), H(2), MCX, H(2), X(1)
        assert_eq!(circuit.op_count(), 5);
        assert_eq!(circuit.count_controlled(), 1);
        assert_eq!(circuit.operations()[0], Operation::X(1));
        assert_eq!(circuit.operations()[4], Operation::X(1));
    }

    #[test]
    fn test_diffusion_shape() {
        let circuit = CircuitBuilder::new(4)
            .h_layer()
            .x_layer()
            .phase_flip_ones()
            .x_layer()
            .h_layer()
            .build()
            .unwrap();

        // 4 H + 4 X + (H, MCX, H) + 4 X + 4 H
        assert_eq!(circuit.op_count(), 19);
        assert_eq!(circuit.count_named("mcx"), 1);
    }

    #[test]
    fn test_qasm_contains_mcx() {
        let circuit = CircuitBuilder::new(4).phase_flip_ones().build().unwrap();
        let qasm = circuit.to_qasm();
        assert!(qasm.contains("mcx q[0],q[1],q[2],q[3];"));
    }

    #[test]
    fn test_config_errors_share_kind() {
        let errors = [
            SearchConfig::new(0, 0).unwrap_err(),
            SearchConfig::new(2, 4).unwrap_err(),
            CircuitBuilder::new(2).x(2).build().unwrap_err(),
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        }
    }

    #[test]
    fn test_grover_constants() {
        assert_eq!(grover::DEFAULT_ITERATIONS, 1);
        assert_eq!(stats::DEFAULT_SHOTS, 2000);
        assert_eq!(limits::DEFAULT_MAX_QUBITS, 24);
        assert_eq!(crypto::SYMMETRIC_KEY_LEN, 16);
    }
}
