//! Compile a parity-oracle circuit for the 5-qubit reference device.
//!
//! Takes the oracle as the first argument: one of the aliases `11`,
//! `10`, `00`, or with a second argument `custom`, an explicit 0/1
//! string.

use grani_compile::{Algorithm, Compiler};
use grani_demos::{init_tracing, maybe_run, pegasus5_map, print_program};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let oracle = args.next().unwrap_or_else(|| "11".to_string());
    let custom_mode = args.next().as_deref() == Some("custom");

    let compiler = Compiler::new(pegasus5_map())?;
    let program = compiler.compile(3, 5, Algorithm::Parity, &oracle, custom_mode)?;

    print_program(&program);
    maybe_run(&program, 1024).await
}
