//! Shared plumbing for the Grani demo binaries.
//!
//! Each demo compiles an algorithm against the 5-qubit reference device
//! and prints the result. When `QEX_TOKEN` is set the compiled program is
//! also submitted to the Quantum Experience service.

use std::collections::BTreeSet;

use grani_adapter_qex::QexBackend;
use grani_compile::{CompiledProgram, CouplingMap};
use grani_hal::{BackendClass, BackendConfig, TOKEN_ENV_VAR};
use tracing::info;

/// Directed coupling map of the 5-qubit reference device.
///
/// Qubit 3 reaches every other qubit through directed edges and is
/// therefore picked as the routing root.
pub fn pegasus5_map() -> CouplingMap {
    let mut map = CouplingMap::new();
    map.insert(0, BTreeSet::new());
    map.insert(1, BTreeSet::from([0]));
    map.insert(2, BTreeSet::from([0, 1, 4]));
    map.insert(3, BTreeSet::from([2, 4]));
    map.insert(4, BTreeSet::new());
    map
}

/// Install the fmt subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Print a compiled program the way every demo does.
pub fn print_program(program: &CompiledProgram) {
    println!("algorithm: {}", program.algorithm);
    println!("oracle:    {}", program.oracle);
    println!("connected: {:?}", program.connected);
    println!();
    println!("{}", program.qasm);
}

/// Run the program on the service when a token is available.
///
/// Without `QEX_TOKEN` the demo stays a dry run and only prints the
/// compiled circuit.
pub async fn maybe_run(program: &CompiledProgram, shots: u32) -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var(TOKEN_ENV_VAR).is_err() {
        info!("{TOKEN_ENV_VAR} unset, skipping submission");
        return Ok(());
    }

    let config = BackendConfig::new("qex");
    let backend = QexBackend::new(&config, BackendClass::Pegasus5, "pegasus5-a", 5)?;
    let record = backend.run_program(program, shots).await?;

    println!("counts ({} shots):", record.shots);
    for (bitstring, count) in &record.counts {
        println!("  {bitstring}: {count}");
    }
    Ok(())
}
