//! Runs the default ECDSA and EdDSA conformance cases and prints a report.
//!
//! Usage: `cargo run --example conformance_suite [suite.json]`
//!
//! Without an argument the ECDSA suite uses `circuits/ecdsa_64_4.json`.

use std::path::PathBuf;
use std::time::Instant;

use circuit::{default_ecdsa_cases, default_eddsa_cases, HarnessError, Suite, SuiteConfig};

fn main() -> Result<(), HarnessError> {
    tracing_subscriber::fmt::init();

    let circuits = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("circuits");
    let ecdsa_config = match std::env::args().nth(1) {
        Some(path) => SuiteConfig::from_file(path)?,
        None => SuiteConfig {
            circuit: circuits.join("ecdsa_64_4.json"),
            ..SuiteConfig::default()
        },
    };
    let eddsa_config = SuiteConfig {
        circuit: circuits.join("eddsa_poseidon.json"),
        ..ecdsa_config.clone()
    };

    let start = Instant::now();
    let ecdsa = Suite::from_config(ecdsa_config)?;
    let ecdsa_report = ecdsa.run(default_ecdsa_cases(ecdsa.config().limbs)?);

    let eddsa = Suite::from_config(eddsa_config)?;
    let eddsa_report = eddsa.run(default_eddsa_cases()?);

    for report in [&ecdsa_report, &eddsa_report] {
        println!("{} ({} cases)", report.circuit, report.cases.len());
        for case in &report.cases {
            let verdict = if case.passed() { "ok" } else { "FAILED" };
            println!("  {:<24} {:<10} {}", case.label, case.state.to_string(), verdict);
        }
    }
    println!("Total time: {:?}", start.elapsed());

    ecdsa_report.ensure_passed()?;
    eddsa_report.ensure_passed()
}
