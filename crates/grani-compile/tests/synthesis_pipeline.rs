//! End-to-end tests for the synthesis pipeline: device analysis,
//! routing, layered synthesis, cancellation, and OpenQASM emission.

use std::collections::BTreeMap;

use grani_compile::{Algorithm, CompileError, Compiler, CouplingMap};

fn map(edges: &[(u32, &[u32])]) -> CouplingMap {
    edges
        .iter()
        .map(|(q, ts)| (*q, ts.iter().copied().collect()))
        .collect()
}

/// Directed chain 0 -> 1 -> ... -> n-1.
fn chain(n: u32) -> CouplingMap {
    (0..n)
        .map(|q| {
            let targets = if q + 1 < n {
                [q + 1].into_iter().collect()
            } else {
                Default::default()
            };
            (q, targets)
        })
        .collect()
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_star_graph_connection_order() {
    let compiler = Compiler::new(map(&[(0, &[1, 2, 3]), (1, &[]), (2, &[]), (3, &[])])).unwrap();
    assert_eq!(compiler.graph().root(), 0);
    assert_eq!(compiler.graph().rank(0), 3);

    // Parity reports connection order; the root comes first, leaves
    // follow in attachment order.
    let program = compiler
        .compile(3, 4, Algorithm::Parity, "11", false)
        .unwrap();
    assert_eq!(program.connected, vec![0, 1, 2, 3]);
}

#[test]
fn test_reversed_edge_emits_native_orientation() {
    // Only 1 -> 0 exists in hardware; the synthesized entangler must
    // come out in that orientation.
    let compiler = Compiler::new(map(&[(0, &[]), (1, &[0])])).unwrap();
    let program = compiler.compile(2, 2, Algorithm::Ghz, "11", false).unwrap();

    assert!(program.qasm.contains("cx q[1], q[0];"));
    assert!(!program.qasm.contains("cx q[0], q[1];"));
}

#[test]
fn test_disconnected_device_rejected_at_construction() {
    let result = Compiler::new(map(&[(0, &[1]), (1, &[]), (2, &[3]), (3, &[])]));
    assert!(matches!(
        result,
        Err(CompileError::RoutingIncomplete { placed: 2, total: 4 })
    ));
}

#[test]
fn test_cancellation_reflected_in_qasm() {
    // On a directed chain every tree edge is reversed relative to the
    // walk, so the sandwich basis changes meet the preparation and
    // closing layers and cancel pairwise. One u2 survives, on the root
    // wire.
    let compiler = Compiler::new(chain(3)).unwrap();
    let program = compiler.compile(3, 3, Algorithm::Ghz, "11", false).unwrap();

    assert_eq!(count_occurrences(&program.qasm, "\nu2("), 1);
    assert_eq!(count_occurrences(&program.qasm, "\ncx "), 2);
    assert_eq!(count_occurrences(&program.qasm, "\nu3("), 1);
}

#[test]
fn test_oracle_metadata_matches_reference_expansion() {
    let compiler = Compiler::new(chain(6)).unwrap();

    let full = compiler
        .compile(3, 6, Algorithm::Parity, "11", false)
        .unwrap();
    assert_eq!(full.oracle, "111");

    let alternating = compiler
        .compile(4, 6, Algorithm::Parity, "10", false)
        .unwrap();
    assert_eq!(alternating.oracle, "1010");
}

#[test]
fn test_measurements_target_matching_slots() {
    let compiler = Compiler::new(chain(4)).unwrap();
    let program = compiler.compile(4, 4, Algorithm::Ghz, "11", false).unwrap();

    for q in 0..4 {
        assert!(program.qasm.contains(&format!("measure q[{q}] -> c[{q}];")));
    }
    assert_eq!(count_occurrences(&program.qasm, "measure "), 4);
}

#[test]
fn test_qasm_header_and_registers() {
    let compiler = Compiler::new(chain(5)).unwrap();
    let program = compiler.compile(3, 5, Algorithm::Ghz, "11", false).unwrap();

    assert!(program.qasm.starts_with("OPENQASM 2.0;"));
    assert!(program.qasm.contains("include \"qelib1.inc\";"));
    assert!(program.qasm.contains("qreg q[5];"));
    assert!(program.qasm.contains("creg c[5];"));
}

#[test]
fn test_repeated_compiles_are_byte_identical() {
    let compiler = Compiler::new(map(&[
        (0, &[1, 4]),
        (1, &[2]),
        (2, &[3]),
        (3, &[]),
        (4, &[2]),
    ]))
    .unwrap();

    let mut results: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for _ in 0..3 {
        for (tag, algorithm, n) in [
            ("ghz", Algorithm::Ghz, 4),
            ("envariance", Algorithm::Envariance, 4),
            ("parity", Algorithm::Parity, 3),
        ] {
            let program = compiler.compile(n, 5, algorithm, "11", false).unwrap();
            results.entry(tag).or_default().push(program.qasm);
        }
    }
    for runs in results.values() {
        assert!(runs.windows(2).all(|w| w[0] == w[1]));
    }
}

#[test]
fn test_payload_carries_emitted_circuit() {
    let compiler = Compiler::new(chain(3)).unwrap();
    let program = compiler.compile(3, 3, Algorithm::Ghz, "11", false).unwrap();

    assert_eq!(program.payload.qasm, program.qasm);
    assert_eq!(program.payload.name, "ghz");
    assert_eq!(program.payload.n_qubits, 3);
}
