//! Integrated configuration for QLCT
//!
//! Gantree: L5_Integration → QlctConfig
//!
//! One configuration covering the simulator ceiling, sampling defaults,
//! KEM backend selection, and key derivation. Loadable from JSON, a file,
//! or `QLCT_*` environment variables.

use qlct_core::{crypto, grover, limits, stats, QlctError, QlctResult};
use qlct_crypto::{KemAdapter, KemBackend};
use qlct_grover::GroverEngine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Environment variable naming a JSON config file
pub const ENV_CONFIG_FILE: &str = "QLCT_CONFIG";
/// Environment override for `max_qubits`
pub const ENV_MAX_QUBITS: &str = "QLCT_MAX_QUBITS";
/// Environment override for `default_shots`
pub const ENV_DEFAULT_SHOTS: &str = "QLCT_DEFAULT_SHOTS";
/// Environment override for `kem_mode`
pub const ENV_KEM_MODE: &str = "QLCT_KEM_MODE";
/// Environment override for `seed`
pub const ENV_SEED: &str = "QLCT_SEED";
/// Environment override for `grover_iterations`
pub const ENV_GROVER_ITERATIONS: &str = "QLCT_GROVER_ITERATIONS";

/// KEM backend request
/// Gantree: KemMode // KEM 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KemMode {
    /// ML-KEM-768 when compiled in, otherwise stub
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// ML-KEM-768 or fail
    #[serde(rename = "ml-kem-768")]
    MlKem768,
    /// Placeholder key material
    #[serde(rename = "stub")]
    Stub,
}

impl KemMode {
    /// Build the adapter for this mode
    pub fn to_adapter(self) -> QlctResult<KemAdapter> {
        match self {
            KemMode::Auto => Ok(KemAdapter::auto()),
            KemMode::MlKem768 => KemAdapter::new(KemBackend::MlKem768),
            KemMode::Stub => KemAdapter::new(KemBackend::Stub),
        }
    }
}

impl FromStr for KemMode {
    type Err = QlctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(KemMode::Auto),
            "ml-kem-768" | "mlkem768" | "kyber768" => Ok(KemMode::MlKem768),
            "stub" => Ok(KemMode::Stub),
            other => Err(QlctError::InvalidConfig(format!("unknown KEM mode '{}'", other))),
        }
    }
}

impl fmt::Display for KemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KemMode::Auto => "auto",
            KemMode::MlKem768 => "ml-kem-768",
            KemMode::Stub => "stub",
        };
        write!(f, "{}", s)
    }
}

/// Unified QLCT configuration
/// Gantree: QlctConfig // 통합 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QlctConfig {
    // ========================================================================
    // Simulation
    // ========================================================================
    /// Largest register simulated (checked before allocation)
    pub max_qubits: usize,

    /// Oracle + diffusion rounds per search
    pub grover_iterations: usize,

    // ========================================================================
    // Sampling
    // ========================================================================
    /// Shots when the caller gives none
    pub default_shots: u64,

    /// Seed for sampling; each call gets a fresh RNG seeded from it
    pub seed: Option<u64>,

    // ========================================================================
    // Protection
    // ========================================================================
    /// KEM backend request
    pub kem_mode: KemMode,

    /// Shared-secret prefix used as the symmetric key
    pub symmetric_key_len: usize,
}

impl Default for QlctConfig {
    fn default() -> Self {
        Self {
            max_qubits: limits::DEFAULT_MAX_QUBITS,
            grover_iterations: grover::DEFAULT_ITERATIONS,
            default_shots: stats::DEFAULT_SHOTS,
            seed: None,
            kem_mode: KemMode::Auto,
            symmetric_key_len: crypto::SYMMETRIC_KEY_LEN,
        }
    }
}

impl QlctConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Seeded sampling, otherwise defaults
    pub fn reproducible(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Stub KEM, otherwise defaults
    pub fn degraded() -> Self {
        Self {
            kem_mode: KemMode::Stub,
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set qubit ceiling
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set default shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.default_shots = shots;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set KEM mode
    pub fn with_kem_mode(mut self, mode: KemMode) -> Self {
        self.kem_mode = mode;
        self
    }

    /// Set symmetric key length
    pub fn with_key_len(mut self, len: usize) -> Self {
        self.symmetric_key_len = len;
        self
    }

    /// Set Grover iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.grover_iterations = iterations;
        self
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Parse from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> QlctResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> QlctResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| QlctError::FileError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded QLCT configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults overlaid with `QLCT_*` environment variables
    pub fn from_env() -> QlctResult<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (an environment-like source)
    pub fn overlay<F>(mut self, lookup: F) -> QlctResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_MAX_QUBITS) {
            self.max_qubits = parse_var(ENV_MAX_QUBITS, &v)?;
        }
        if let Some(v) = lookup(ENV_DEFAULT_SHOTS) {
            self.default_shots = parse_var(ENV_DEFAULT_SHOTS, &v)?;
        }
        if let Some(v) = lookup(ENV_KEM_MODE) {
            self.kem_mode = v.parse()?;
        }
        if let Some(v) = lookup(ENV_SEED) {
            self.seed = Some(parse_var(ENV_SEED, &v)?);
        }
        if let Some(v) = lookup(ENV_GROVER_ITERATIONS) {
            self.grover_iterations = parse_var(ENV_GROVER_ITERATIONS, &v)?;
        }
        Ok(self)
    }

    /// File named by `QLCT_CONFIG` (or defaults), then env overrides, validated
    /// Gantree: load() -> Result<Self> // 설정 로드
    pub fn load() -> QlctResult<Self> {
        let base = match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        let config = base.overlay(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Search engine with this ceiling and iteration count
    pub fn to_engine(&self) -> GroverEngine {
        GroverEngine::new()
            .with_max_qubits(self.max_qubits)
            .with_iterations(self.grover_iterations)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 설정 검증
    pub fn validate(&self) -> QlctResult<()> {
        if !(limits::MIN_QUBITS..=limits::ABSOLUTE_MAX_QUBITS).contains(&self.max_qubits) {
            return Err(QlctError::InvalidConfig(format!(
                "max_qubits must be in [{}, {}], got {}",
                limits::MIN_QUBITS,
                limits::ABSOLUTE_MAX_QUBITS,
                self.max_qubits
            )));
        }
        if self.default_shots == 0 {
            return Err(QlctError::InvalidConfig("default_shots must be > 0".into()));
        }
        if self.symmetric_key_len == 0 {
            return Err(QlctError::InvalidConfig("symmetric_key_len must be > 0".into()));
        }
        if self.grover_iterations == 0 {
            return Err(QlctError::InvalidConfig("grover_iterations must be > 0".into()));
        }
        Ok(())
    }
}

impl fmt::Display for QlctConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QlctConfig(max_qubits={}, iterations={}, shots={}, seed={:?}, kem={})",
            self.max_qubits, self.grover_iterations, self.default_shots, self.seed, self.kem_mode
        )
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> QlctResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| QlctError::InvalidConfig(format!("{}: cannot parse '{}'", name, value)))
}

// ============================================================================
// Tests
// ============================================================================
