//! # QLCT Sim
//!
//! Exact statevector simulation and measurement sampling.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qlct_sim // L2: Simulation (완료)
//!     L2_Simulation // 상태 벡터 시뮬레이션 (완료)
//!         Statevector // 2^n 진폭 버퍼 (완료)
//!         StatevectorSimulator // H/X/MCX 커널 + 한도 검사 (완료)
//!         Sampling // 가중 범주 샘플링 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlct_sim::prelude::*;
//! use qlct_core::CircuitBuilder;
//! use rand::SeedableRng;
//!
//! let circuit = CircuitBuilder::new(2).h(0).cx(0, 1).build().unwrap();
//! let sim = StatevectorSimulator::new();
//!
//! let sv = sim.run(&circuit).unwrap();
//! assert!(sv.is_normalized());
//!
//! let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(42);
//! let counts = sim.sample(&circuit, 100, &mut rng).unwrap();
//! assert_eq!(counts.total_counts(), 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Statevector buffer (Gantree: L2_Simulation → Statevector)
pub mod statevector;

/// Simulator (Gantree: L2_Simulation → StatevectorSimulator)
pub mod simulator;

/// Measurement sampling (Gantree: L2_Simulation → Sampling)
pub mod sampling;

// ============================================================================
// Re-exports
// ============================================================================

pub use sampling::{sample_distribution, SampleResult};
pub use simulator::StatevectorSimulator;
pub use statevector::Statevector;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::sampling::{sample_distribution, SampleResult};
    pub use crate::simulator::StatevectorSimulator;
    pub use crate::statevector::Statevector;
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================
