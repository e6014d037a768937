//! QLCT end-to-end demo
//!
//! Grover search, sampled amplitude estimation, and KEM-derived payload
//! protection through the configured service.
//!
//! Run with `RUST_LOG=debug cargo run --example quantum_demo` to see
//! simulation timings.

use qlct_core::{basis_label, grover, stats};
use qlct_engine::prelude::*;
use qlct_grover::build_search_circuit;
use serde_json::json;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║                        QLCT Quantum Demo                             ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let config = QlctConfig::load()?;
    let service = QlctService::new(config)?;
    println!("Configuration: {}", service.config());
    println!(
        "KEM backend:   {}{}\n",
        service.protector().kem().backend(),
        if service.is_degraded() { " (degraded)" } else { "" }
    );

    // =========================================================================
    // Part 1: Search circuit
    // =========================================================================
    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  PART 1: Search circuit (n=3, target=101)");
    println!("═══════════════════════════════════════════════════════════════════════\n");

    let cfg = SearchConfig::new(3, 0b101)?;
    let circuit = build_search_circuit(&cfg)?;
    println!("{}", circuit);
    println!("{}", circuit.to_qasm());

    let result = service.search(3, 0b101)?;
    println!("{}", result);
    println!(
        "Target found: {} (analytic {:.6})",
        result.found_target(),
        result.analytic_probability()
    );

    let mut rng = service.rng();
    let counts = service.engine().simulator().sample(&circuit, 1000, &mut rng)?;
    if let Some((idx, n)) = counts.most_frequent() {
        println!(
            "Most frequent of 1000 shots: |{}⟩ x{}\n",
            basis_label(idx, cfg.n_qubits()),
            n
        );
    }

    // =========================================================================
    // Part 2: Success probability vs. iterations
    // =========================================================================
    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  PART 2: Success probability vs. iterations");
    println!("═══════════════════════════════════════════════════════════════════════\n");

    println!("┌──────────┬──────────┬──────────┬──────────┐");
    println!("│ Qubits   │ k=1      │ k=opt    │ opt      │");
    println!("├──────────┼──────────┼──────────┼──────────┤");
    for n in 2..=8 {
        let target = (1usize << n) - 1;
        let baseline = service.search_probability(n, target)?;
        let k = grover::optimal_iterations(n);
        let tuned = QlctService::new(service.config().clone().with_iterations(k))?
            .search_probability(n, target)?;
        println!("│ {:8} │ {:8.4} │ {:8.4} │ {:8} │", n, baseline, tuned, k);
    }
    println!("└──────────┴──────────┴──────────┴──────────┘\n");

    // =========================================================================
    // Part 3: Amplitude estimation
    // =========================================================================
    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  PART 3: Amplitude estimation (n=3, target=101)");
    println!("═══════════════════════════════════════════════════════════════════════\n");

    println!("┌──────────┬──────────┬──────────┬──────────┬───────────────────┬──────┬──────────┐");
    println!("│ Shots    │ Estimate │ Exact    │ StdErr   │ 95% CI            │ ±3σ  │ Time(ms) │");
    println!("├──────────┼──────────┼──────────┼──────────┼───────────────────┼──────┼──────────┤");
    for shots in [100u64, 2000, 50000] {
        let start = Instant::now();
        let est = service.estimate_detailed(3, 0b101, shots)?;
        let (lo, hi) = est.confidence_interval(stats::Z_CRIT_95);
        println!(
            "│ {:8} │ {:8.4} │ {:8.4} │ {:8.4} │ [{:.4}, {:.4}]  │ {:4} │ {:8.1} │",
            shots,
            est.estimate,
            est.exact,
            est.std_error,
            lo,
            hi,
            if est.is_consistent() { "ok" } else { "off" },
            start.elapsed().as_secs_f64() * 1000.0
        );
    }
    println!("└──────────┴──────────┴──────────┴──────────┴───────────────────┴──────┴──────────┘\n");

    // =========================================================================
    // Part 4: Payload protection
    // =========================================================================
    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  PART 4: Payload protection");
    println!("═══════════════════════════════════════════════════════════════════════\n");

    let payload = json!({"sensor": "qchip", "data": [1, 0, 1]});
    let protected = service.protect_payload(&payload)?;
    println!("Payload:    {}", payload);
    println!("Protected:  {}", protected);
    println!("Ciphertext: {}", protected.ciphertext_hex);

    let restored = service.restore_payload(&protected.ciphertext_hex, Some(&protected.key_hex))?;
    println!("Restored:   {}", restored);
    anyhow::ensure!(restored == payload, "round trip mismatch");

    // Two-party exchange next to the self-encapsulation flow
    let receiver = service.kem_keypair()?;
    let sent = service.kem_encapsulate(receiver.public_key())?;
    let recovered = service.kem_decapsulate(receiver.private_key(), sent.ciphertext())?;
    println!(
        "\nTwo-party exchange: pk={} bytes, ct={} bytes, secrets match: {}",
        receiver.public_key().len(),
        sent.ciphertext().len(),
        recovered.as_slice() == sent.shared_secret()
    );

    println!("\nNOTE: the symmetric stage is repeating-key XOR and the derived key");
    println!("      is returned with the ciphertext. Treat the output as obfuscation.");

    Ok(())
}
