//! Compile a GHZ state for the 5-qubit reference device and, with a
//! token configured, run it on the service.

use grani_compile::{Algorithm, Compiler};
use grani_demos::{init_tracing, maybe_run, pegasus5_map, print_program};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let n_qubits: usize = std::env::args()
        .nth(1)
        .map(|a| a.parse())
        .transpose()?
        .unwrap_or(4);

    let compiler = Compiler::new(pegasus5_map())?;
    let program = compiler.compile(n_qubits, 5, Algorithm::Ghz, "11", false)?;

    print_program(&program);
    maybe_run(&program, 1024).await
}
