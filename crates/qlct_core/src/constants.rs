//! Constants for QLCT
//!
//! Gantree: L0_Foundation → Constants
//!
//! Simulation limits, sampling statistics, and key-material constants.

// ============================================================================
// Simulation Limits
// Gantree: limits // 시뮬레이션 한도
// ============================================================================

pub mod limits {
    //! Statevector sizing limits
    //!
    //! A statevector holds 2^n complex amplitudes (16 bytes each), so every
    //! gate application and the buffer itself are O(2^n).

    /// Default qubit ceiling (2^24 amplitudes, 256 MiB)
    /// Gantree: DEFAULT_MAX_QUBITS: usize = 24
    pub const DEFAULT_MAX_QUBITS: usize = 24;

    /// Absolute qubit ceiling accepted by any configuration
    /// Gantree: ABSOLUTE_MAX_QUBITS: usize = 30
    pub const ABSOLUTE_MAX_QUBITS: usize = 30;

    /// Minimum qubit count
    pub const MIN_QUBITS: usize = 1;

    /// Tolerance for the squared-magnitude sum of a statevector
    /// Gantree: NORM_TOLERANCE: f64 = 1e-9
    pub const NORM_TOLERANCE: f64 = 1e-9;

    /// Number of basis states for `n` qubits; `None` when 2^n overflows `usize`
    #[inline]
    pub const fn dimension(num_qubits: usize) -> Option<usize> {
        if num_qubits >= usize::BITS as usize {
            return None;
        }
        Some(1 << num_qubits)
    }
}

// ============================================================================
// Grover Constants
// Gantree: grover // 그로버 상수
// ============================================================================

pub mod grover {
    //! Grover search parameters

    /// Iterations per search circuit (documented baseline)
    /// Gantree: DEFAULT_ITERATIONS: usize = 1
    pub const DEFAULT_ITERATIONS: usize = 1;

    /// Default search width
    pub const DEFAULT_QUBITS: usize = 3;

    /// Default search target (0b101)
    pub const DEFAULT_TARGET: usize = 0b101;

    /// Iteration count maximising success probability: floor(π/4 · √(2^n)), at least 1
    pub fn optimal_iterations(num_qubits: usize) -> usize {
        let n_states = (num_qubits as f64).exp2();
        let k = (std::f64::consts::FRAC_PI_4 * n_states.sqrt()).floor() as usize;
        k.max(1)
    }

    /// Analytic success probability after `k` iterations over `2^n` states
    /// with one marked item: sin²((2k+1)·θ), sin θ = 1/√N
    pub fn analytic_success(num_qubits: usize, iterations: usize) -> f64 {
        let n_states = (num_qubits as f64).exp2();
        let theta = (1.0 / n_states.sqrt()).asin();
        ((2 * iterations + 1) as f64 * theta).sin().powi(2)
    }
}

// ============================================================================
// Statistics Constants
// Gantree: stats // 통계 상수
// ============================================================================

pub mod stats {
    //! Sampling statistics for amplitude estimation

    /// Default number of shots per estimate
    /// Gantree: DEFAULT_SHOTS: u64 = 2000
    pub const DEFAULT_SHOTS: u64 = 2000;

    /// Minimum shots
    pub const MIN_SHOTS: u64 = 1;

    /// Standard errors accepted as "consistent with exact"
    /// Gantree: CONSISTENCY_SIGMAS: f64 = 3.0
    pub const CONSISTENCY_SIGMAS: f64 = 3.0;

    /// Z critical value for 95% confidence
    pub const Z_CRIT_95: f64 = 1.960;

    /// Binomial standard error sqrt(p(1-p)/shots), with `p` clamped to [0, 1]
    #[inline]
    pub fn standard_error(p: f64, shots: u64) -> f64 {
        if shots == 0 {
            return f64::INFINITY;
        }
        let p = p.clamp(0.0, 1.0);
        (p * (1.0 - p) / shots as f64).sqrt()
    }
}

// ============================================================================
// Crypto Constants
// Gantree: crypto // 암호 상수
// ============================================================================

pub mod crypto {
    //! Key-material sizes and degraded-mode placeholders

    /// KEM algorithm name
    pub const KEM_ALGORITHM: &str = "ML-KEM-768";

    /// ML-KEM-768 public key size in bytes
    pub const MLKEM768_PUBLIC_KEY_SIZE: usize = 1184;

    /// ML-KEM-768 secret key size in bytes
    pub const MLKEM768_SECRET_KEY_SIZE: usize = 2400;

    /// ML-KEM-768 ciphertext size in bytes
    pub const MLKEM768_CIPHERTEXT_SIZE: usize = 1088;

    /// ML-KEM-768 shared secret size in bytes
    pub const MLKEM768_SHARED_SECRET_SIZE: usize = 32;

    /// Symmetric key length taken from the shared secret prefix
    /// Gantree: SYMMETRIC_KEY_LEN: usize = 16
    pub const SYMMETRIC_KEY_LEN: usize = 16;

    /// Key used when the shared secret is empty
    pub const FALLBACK_KEY: &[u8] = b"quantumlogic-key";

    /// Stub public key (degraded mode)
    pub const STUB_PUBLIC_KEY: &[u8] = b"stub-public-key";

    /// Stub private key (degraded mode)
    pub const STUB_SECRET_KEY: &[u8] = b"stub-secret-key";

    /// Stub KEM ciphertext (degraded mode)
    pub const STUB_CIPHERTEXT: &[u8] = b"stub-ciphertext";

    /// Stub shared secret (degraded mode)
    pub const STUB_SHARED_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    /// Key assumed by restore when the caller supplies none
    pub const LEGACY_RESTORE_KEY: &[u8] = b"0123456789abcdef";
}

// ============================================================================
// Tests
// ============================================================================
