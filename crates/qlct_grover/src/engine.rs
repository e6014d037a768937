//! Grover search engine
//!
//! Gantree: L3_Algorithms → GroverEngine
//!
//! Builds the search circuit for a [`SearchConfig`], simulates it exactly,
//! and reports the probability mass at the target. Deterministic for a
//! fixed configuration.

use crate::circuits::build_search_circuit_with_iterations;
use qlct_core::{basis_label, grover, BasisIndex, QlctResult, SearchConfig};
use qlct_sim::StatevectorSimulator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one exact search run
/// Gantree: SearchResult // 검색 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Search parameters
    pub config: SearchConfig,

    /// Oracle + diffusion rounds applied
    pub iterations: usize,

    /// Probability mass at the target
    /// Gantree: probability: f64 // 타겟 확률
    pub probability: f64,

    /// Full distribution, indexed by basis state
    pub distribution: Vec<f64>,

    /// Most probable basis state
    pub most_likely: BasisIndex,

    /// Ket label of `most_likely`
    pub most_likely_label: String,
}

impl SearchResult {
    /// Check whether the target is the most probable outcome
    pub fn found_target(&self) -> bool {
        self.most_likely == self.config.target()
    }

    /// Closed-form success probability for the same parameters
    pub fn analytic_probability(&self) -> f64 {
        grover::analytic_success(self.config.n_qubits(), self.iterations)
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SearchResult")?;
        writeln!(f, "  Config: {}", self.config)?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  P(target): {:.6}", self.probability)?;
        writeln!(f, "  Most likely: |{}⟩", self.most_likely_label)?;
        Ok(())
    }
}

/// Exact Grover search engine
/// Gantree: GroverEngine // 검색 엔진
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroverEngine {
    simulator: StatevectorSimulator,
    iterations: usize,
}

impl Default for GroverEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GroverEngine {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Engine with one iteration and the default qubit ceiling
    pub fn new() -> Self {
        Self {
            simulator: StatevectorSimulator::new(),
            iterations: grover::DEFAULT_ITERATIONS,
        }
    }

    /// Use a specific simulator
    pub fn with_simulator(mut self, simulator: StatevectorSimulator) -> Self {
        self.simulator = simulator;
        self
    }

    /// Set the qubit ceiling (capped like [`StatevectorSimulator::with_max_qubits`])
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.simulator = self.simulator.with_max_qubits(max_qubits);
        self
    }

    /// Set oracle + diffusion rounds per search
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Underlying simulator
    pub fn simulator(&self) -> &StatevectorSimulator {
        &self.simulator
    }

    /// Rounds per search
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Exact target probability after the configured iterations
    /// Gantree: search_probability(&self, cfg) -> Result<f64> // 성공 확률
    pub fn search_probability(&self, cfg: &SearchConfig) -> QlctResult<f64> {
        Ok(self.run(cfg)?.probability)
    }

    /// Full search run
    /// Gantree: run(&self, cfg) -> Result<SearchResult> // 검색 실행
    pub fn run(&self, cfg: &SearchConfig) -> QlctResult<SearchResult> {
        self.simulator.check_width(cfg.n_qubits())?;

        let circuit = build_search_circuit_with_iterations(cfg, self.iterations)?;
        log::debug!(
            "search circuit {}: {} ops, depth {}",
            cfg,
            circuit.op_count(),
            circuit.depth()
        );

        let state = self.simulator.run(&circuit)?;
        let (most_likely, _) = state.most_likely();

        Ok(SearchResult {
            config: *cfg,
            iterations: self.iterations,
            probability: state.probability(cfg.target()),
            distribution: state.probabilities(),
            most_likely,
            most_likely_label: basis_label(most_likely, cfg.n_qubits()),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
