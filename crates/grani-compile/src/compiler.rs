//! Compiler facade: device analysis at construction, synthesis per call.

use std::fmt;
use std::str::FromStr;

use grani_ir::Circuit;
use grani_qasm::emit_qasm2;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::coupling::{CouplingGraph, CouplingMap};
use crate::error::{CompileError, CompileResult};
use crate::optimize::CancelBasisChange;
use crate::pass::Pass;
use crate::routing::{RoutingPath, RoutingPlanner};
use crate::synth::CircuitSynthesizer;

/// The supported algorithm families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// GHZ-state preparation.
    Ghz,
    /// Envariance demonstration with a mixing layer.
    Envariance,
    /// Parity-oracle evaluation.
    Parity,
}

impl Algorithm {
    /// The canonical lowercase tag.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Ghz => "ghz",
            Algorithm::Envariance => "envariance",
            Algorithm::Parity => "parity",
        }
    }

    /// Physical qubits a request for `n_qubits` consumes. The parity
    /// walk goes one tree qubit deeper than requested.
    pub fn required_qubits(self, n_qubits: usize) -> usize {
        match self {
            Algorithm::Parity => n_qubits + 1,
            Algorithm::Ghz | Algorithm::Envariance => n_qubits,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ghz" => Ok(Algorithm::Ghz),
            "envariance" => Ok(Algorithm::Envariance),
            "parity" => Ok(Algorithm::Parity),
            other => Err(CompileError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// The lowered, serializable body a compiled program submits for
/// execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramPayload {
    /// Program name, the algorithm tag.
    pub name: String,
    /// The circuit in OpenQASM 2 text form.
    pub qasm: String,
    /// Requested logical qubit count.
    pub n_qubits: usize,
}

/// Immutable result of one compilation.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    /// The optimized circuit.
    pub circuit: Circuit,
    /// The circuit in OpenQASM 2 text form.
    pub qasm: String,
    /// Requested logical qubit count.
    pub n_qubits: usize,
    /// Physical qubits used, in canonical order for the algorithm:
    /// tree-connection order for parity, ascending id otherwise.
    pub connected: Vec<u32>,
    /// The explicit oracle bitstring.
    pub oracle: String,
    /// The algorithm that was synthesized.
    pub algorithm: Algorithm,
    /// Lowered form ready for submission.
    pub payload: ProgramPayload,
}

/// Hardware-aware compiler for one device.
///
/// Analyzes the coupling graph and builds the routing tree once at
/// construction; each [`Compiler::compile`] call then works on locally
/// owned state, so a single instance may serve concurrent requests.
pub struct Compiler {
    graph: CouplingGraph,
    path: RoutingPath,
}

impl Compiler {
    /// Build a compiler for the device described by `coupling_map`.
    pub fn new(coupling_map: CouplingMap) -> CompileResult<Self> {
        let graph = CouplingGraph::new(coupling_map)?;
        let path = RoutingPlanner::build(&graph)?;
        debug!(
            qubits = graph.num_qubits(),
            root = graph.root(),
            "routing tree built"
        );
        Ok(Self { graph, path })
    }

    /// The analyzed device graph.
    pub fn graph(&self) -> &CouplingGraph {
        &self.graph
    }

    /// The spanning routing tree.
    pub fn path(&self) -> &RoutingPath {
        &self.path
    }

    /// Compile one program.
    ///
    /// `capacity` is the target backend's qubit ceiling; requests whose
    /// physical footprint exceeds it fail before synthesis. `oracle` is
    /// a two-character alias, or an explicit bitstring when
    /// `custom_mode` is set; both are parity-only and ignored by the
    /// other algorithms.
    #[instrument(skip(self), fields(algorithm = %algorithm))]
    pub fn compile(
        &self,
        n_qubits: usize,
        capacity: usize,
        algorithm: Algorithm,
        oracle: &str,
        custom_mode: bool,
    ) -> CompileResult<CompiledProgram> {
        let required = algorithm.required_qubits(n_qubits);
        if required > capacity {
            return Err(CompileError::CapacityExceeded {
                requested: required,
                capacity,
            });
        }

        let synthesizer = CircuitSynthesizer::new(&self.graph, &self.path);
        let draft = synthesizer.synthesize(n_qubits, algorithm, oracle, custom_mode)?;
        let crate::synth::SynthesizedDraft {
            mut circuit,
            connected,
            oracle,
        } = draft;

        let ops_before = circuit.dag().num_ops();
        CancelBasisChange::new().run(circuit.dag_mut())?;
        debug!(
            ops_before,
            ops_after = circuit.dag().num_ops(),
            "basis-change cancellation done"
        );

        let qasm = emit_qasm2(&circuit)?;

        let connected: Vec<u32> = match algorithm {
            Algorithm::Parity => connected.iter().map(|&(q, _)| q).collect(),
            Algorithm::Ghz | Algorithm::Envariance => {
                let mut qubits: Vec<u32> = connected.iter().map(|&(q, _)| q).collect();
                qubits.sort_unstable();
                qubits
            }
        };

        let payload = ProgramPayload {
            name: algorithm.name().to_string(),
            qasm: qasm.clone(),
            n_qubits,
        };

        Ok(CompiledProgram {
            circuit,
            qasm,
            n_qubits,
            connected,
            oracle,
            algorithm,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn chain(n: u32) -> CouplingMap {
        let mut map = BTreeMap::new();
        for q in 0..n {
            let targets = if q + 1 < n {
                [q + 1].into_iter().collect()
            } else {
                Default::default()
            };
            map.insert(q, targets);
        }
        map
    }

    #[test]
    fn test_algorithm_round_trip() {
        for tag in ["ghz", "envariance", "parity"] {
            let algorithm: Algorithm = tag.parse().unwrap();
            assert_eq!(algorithm.to_string(), tag);
        }
        assert!(matches!(
            "grover".parse::<Algorithm>(),
            Err(CompileError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_capacity_checked_before_synthesis() {
        let compiler = Compiler::new(chain(3)).unwrap();
        let result = compiler.compile(3, 2, Algorithm::Ghz, "11", false);
        assert!(matches!(
            result,
            Err(CompileError::CapacityExceeded {
                requested: 3,
                capacity: 2
            })
        ));

        // Parity's extra tree qubit counts against capacity.
        let result = compiler.compile(2, 2, Algorithm::Parity, "11", false);
        assert!(matches!(
            result,
            Err(CompileError::CapacityExceeded {
                requested: 3,
                capacity: 2
            })
        ));
    }

    #[test]
    fn test_ghz_chain_optimized_counts() {
        let compiler = Compiler::new(chain(3)).unwrap();
        let program = compiler.compile(3, 3, Algorithm::Ghz, "11", false).unwrap();

        // Both tree edges run against the hardware direction. Every
        // sandwich basis change cancels against a neighboring layer,
        // leaving a single u2 on the root wire.
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, inst) in program.circuit.dag().topological_ops() {
            *counts.entry(inst.name()).or_default() += 1;
        }
        assert_eq!(counts.get("u3"), Some(&1));
        assert_eq!(counts.get("u2"), Some(&1));
        assert_eq!(counts.get("cx"), Some(&2));
        assert_eq!(counts.get("measure"), Some(&3));
    }

    #[test]
    fn test_connected_order_per_algorithm() {
        // Star rooted at 2 by rank.
        let mut map: CouplingMap = BTreeMap::new();
        map.insert(0, Default::default());
        map.insert(1, Default::default());
        map.insert(2, [0, 1].into_iter().collect());
        let compiler = Compiler::new(map).unwrap();

        let ghz = compiler.compile(3, 3, Algorithm::Ghz, "11", false).unwrap();
        assert_eq!(ghz.connected, vec![0, 1, 2]);

        let parity = compiler
            .compile(2, 3, Algorithm::Parity, "11", false)
            .unwrap();
        assert_eq!(parity.connected, vec![2, 0, 1]);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let compiler = Compiler::new(chain(5)).unwrap();
        let a = compiler
            .compile(4, 5, Algorithm::Envariance, "11", false)
            .unwrap();
        let b = compiler
            .compile(4, 5, Algorithm::Envariance, "11", false)
            .unwrap();
        assert_eq!(a.qasm, b.qasm);
        assert_eq!(a.connected, b.connected);
        assert_eq!(a.oracle, b.oracle);
    }

    #[test]
    fn test_program_clones_for_resubmission() {
        let compiler = Compiler::new(chain(3)).unwrap();
        let program = compiler.compile(3, 3, Algorithm::Ghz, "11", false).unwrap();

        let copy = program.clone();
        assert_eq!(copy.qasm, program.qasm);
        assert_eq!(copy.connected, program.connected);
        assert_eq!(copy.payload, program.payload);
        assert_eq!(
            copy.circuit.dag().num_ops(),
            program.circuit.dag().num_ops()
        );

        let debug = format!("{program:?}");
        assert!(debug.contains("CompiledProgram"));
    }

    #[test]
    fn test_payload_serializes() {
        let compiler = Compiler::new(chain(3)).unwrap();
        let program = compiler.compile(3, 3, Algorithm::Ghz, "11", false).unwrap();
        let json = serde_json::to_string(&program.payload).unwrap();
        let back: ProgramPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program.payload);
        assert_eq!(back.name, "ghz");
    }
}
