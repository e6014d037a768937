//! Grover circuit construction
//!
//! Gantree: L3_Algorithms → GroverCircuits
//!
//! Oracle, diffusion, and full search circuits over the H / X / MCX gate
//! set. Every builder validates `(n, target)` through [`SearchConfig`]
//! first, so an out-of-range target is rejected rather than masked.

use qlct_core::{grover, Circuit, CircuitBuilder, Operation, QlctError, QlctResult, SearchConfig};

/// Append a Hadamard on every qubit `0..n`
/// Gantree: hadamard_layer(&mut Circuit, n) -> Result // 균일 중첩
pub fn hadamard_layer(circuit: &mut Circuit, n: usize) -> QlctResult<()> {
    if n > circuit.num_qubits() {
        return Err(QlctError::GateQubitMismatch {
            qubit: n - 1,
            num_qubits: circuit.num_qubits(),
        });
    }
    circuit.append_all((0..n).map(Operation::H))
}

/// Phase oracle marking `target`
///
/// X on each zero bit of `target`, then H(last)·MCX(rest → last)·H(last),
/// then the X layer again. Flips the sign of `|target⟩` only.
/// Gantree: build_oracle(n, t) -> Result<Circuit> // 오라클
pub fn build_oracle(n_qubits: usize, target: usize) -> QlctResult<Circuit> {
    let cfg = SearchConfig::new(n_qubits, target)?;
    CircuitBuilder::with_name(cfg.n_qubits(), format!("oracle_{}", cfg.target_label()))
        .x_zero_bits(cfg.target())
        .phase_flip_ones()
        .x_zero_bits(cfg.target())
        .build()
}

/// Inversion about the mean
///
/// H and X on every qubit, the same phase-flip sandwich (now marking
/// |0...0⟩), then X and H again.
/// Gantree: build_diffusion(n) -> Result<Circuit> // 확산 연산자
pub fn build_diffusion(n_qubits: usize) -> QlctResult<Circuit> {
    CircuitBuilder::with_name(n_qubits, "diffusion")
        .h_layer()
        .x_layer()
        .phase_flip_ones()
        .x_layer()
        .h_layer()
        .build()
}

/// Uniform superposition followed by one oracle + diffusion round
/// Gantree: build_search_circuit(cfg) -> Result<Circuit> // 검색 회로
pub fn build_search_circuit(cfg: &SearchConfig) -> QlctResult<Circuit> {
    build_search_circuit_with_iterations(cfg, grover::DEFAULT_ITERATIONS)
}

/// Search circuit with `iterations` oracle + diffusion rounds
///
/// Zero iterations leaves the uniform superposition.
pub fn build_search_circuit_with_iterations(
    cfg: &SearchConfig,
    iterations: usize,
) -> QlctResult<Circuit> {
    let n = cfg.n_qubits();
    let oracle = build_oracle(n, cfg.target())?;
    let diffusion = build_diffusion(n)?;

    let mut circuit = Circuit::with_name(n, format!("grover_{}x{}", cfg.target_label(), iterations))?;
    hadamard_layer(&mut circuit, n)?;
    for _ in 0..iterations {
        circuit.compose(&oracle)?;
        circuit.compose(&diffusion)?;
    }
    Ok(circuit)
}

// ============================================================================
// Tests
// ============================================================================
