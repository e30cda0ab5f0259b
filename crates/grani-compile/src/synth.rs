//! Gate-sequence synthesis over the routing tree.

use grani_ir::{Circuit, ClbitId, QubitId};

use crate::compiler::Algorithm;
use crate::coupling::CouplingGraph;
use crate::error::{CompileError, CompileResult};
use crate::oracle;
use crate::routing::RoutingPath;

/// Remaining allowance of entangling gates for one synthesis request.
#[derive(Debug, Clone, Copy)]
enum Budget {
    /// Every tree edge receives an entangling gate.
    Unlimited,
    /// At most this many edges receive one, in tree order.
    Limited(usize),
}

impl Budget {
    fn take(&mut self) -> bool {
        match self {
            Budget::Unlimited => true,
            Budget::Limited(0) => false,
            Budget::Limited(n) => {
                *n -= 1;
                true
            }
        }
    }
}

/// Pre-optimization synthesis output.
pub struct SynthesizedDraft {
    /// The drafted circuit.
    pub circuit: Circuit,
    /// Routed qubits with their tree predecessors, in tree order.
    pub connected: Vec<(u32, Option<u32>)>,
    /// The explicit oracle bitstring recorded for the request.
    pub oracle: String,
}

/// Emits the gate layers for one compilation request.
///
/// Holds shared references only; every call produces a fresh draft, so a
/// single synthesizer may serve any number of requests.
pub struct CircuitSynthesizer<'a> {
    graph: &'a CouplingGraph,
    path: &'a RoutingPath,
}

impl<'a> CircuitSynthesizer<'a> {
    pub fn new(graph: &'a CouplingGraph, path: &'a RoutingPath) -> Self {
        Self { graph, path }
    }

    /// Synthesize the layered circuit for `n_qubits` and the chosen
    /// algorithm.
    ///
    /// The parity walk goes one qubit deeper than requested, so it needs
    /// one spare qubit in the routing tree. Layer order: state
    /// preparation, entangling, closing basis change, mixing (envariance
    /// only), measurement.
    pub fn synthesize(
        &self,
        n_qubits: usize,
        algorithm: Algorithm,
        oracle_spec: &str,
        custom_mode: bool,
    ) -> CompileResult<SynthesizedDraft> {
        let effective = algorithm.required_qubits(n_qubits);
        if effective > self.path.len() {
            return Err(CompileError::RoutingIncomplete {
                placed: self.path.len(),
                total: effective,
            });
        }

        let (oracle_string, budget) = self.resolve_oracle(effective, algorithm, oracle_spec, custom_mode)?;

        let connected: Vec<(u32, Option<u32>)> =
            self.path.entries()[..effective].to_vec();

        let device_size = self.graph.num_qubits() as u32;
        let mut circuit = Circuit::new(algorithm.name());
        circuit.add_qreg("q", device_size);
        circuit.add_creg("c", device_size);

        self.place_preparation(&mut circuit, &connected, algorithm)?;
        self.place_entangling(&mut circuit, &connected, budget)?;
        self.place_closing(&mut circuit, &connected)?;
        if algorithm == Algorithm::Envariance {
            self.place_mixing(&mut circuit, &connected, effective)?;
        }
        self.place_measurement(&mut circuit, &connected)?;

        Ok(SynthesizedDraft {
            circuit,
            connected,
            oracle: oracle_string,
        })
    }

    /// Resolve the oracle specification into an explicit bitstring and an
    /// entangling budget.
    ///
    /// GHZ and envariance always entangle every tree edge and record the
    /// fully-expanded default oracle. Parity spends half the qubit count
    /// for an alias (`"00"` spends nothing) or the count of set bits for
    /// a custom string.
    fn resolve_oracle(
        &self,
        effective: usize,
        algorithm: Algorithm,
        oracle_spec: &str,
        custom_mode: bool,
    ) -> CompileResult<(String, Budget)> {
        match algorithm {
            Algorithm::Ghz | Algorithm::Envariance => {
                Ok((oracle::expand_alias("11", effective)?, Budget::Unlimited))
            }
            Algorithm::Parity if custom_mode => {
                let ones = oracle::validate_custom(oracle_spec)?;
                Ok((oracle_spec.to_string(), Budget::Limited(ones)))
            }
            Algorithm::Parity => {
                let expanded = oracle::expand_alias(oracle_spec, effective)?;
                let budget = if oracle_spec == "00" { 0 } else { effective / 2 };
                Ok((expanded, Budget::Limited(budget)))
            }
        }
    }

    /// State-preparation layer: basis change on every non-root qubit, and
    /// a state flip (GHZ, envariance) or basis change (parity) on the
    /// root.
    fn place_preparation(
        &self,
        circuit: &mut Circuit,
        connected: &[(u32, Option<u32>)],
        algorithm: Algorithm,
    ) -> CompileResult<()> {
        for &(qubit, pred) in connected {
            let q = QubitId(qubit);
            match (pred, algorithm) {
                (None, Algorithm::Parity) | (Some(_), _) => circuit.basis_change(q)?,
                (None, _) => circuit.state_flip(q)?,
            };
        }
        Ok(())
    }

    /// Entangling layer: one controlled gate per tree edge, child as
    /// control and predecessor as target, in tree order, while budget
    /// remains.
    fn place_entangling(
        &self,
        circuit: &mut Circuit,
        connected: &[(u32, Option<u32>)],
        mut budget: Budget,
    ) -> CompileResult<()> {
        for &(qubit, pred) in connected {
            let Some(pred) = pred else { continue };
            if !budget.take() {
                break;
            }
            self.place_cx(circuit, qubit, pred)?;
        }
        Ok(())
    }

    /// Place a controlled gate between `control` and `target`, honoring
    /// the hardware edge direction.
    ///
    /// A native `control -> target` edge emits the gate directly. With
    /// only the reverse edge available, the gate is emitted in the
    /// `target, control` orientation sandwiched by basis changes on both
    /// qubits, which realizes the requested orientation on the native
    /// primitive. No edge in either direction is unroutable.
    fn place_cx(&self, circuit: &mut Circuit, control: u32, target: u32) -> CompileResult<()> {
        let (c, t) = (QubitId(control), QubitId(target));
        if self.graph.has_edge(control, target) {
            circuit.cx(c, t)?;
        } else if self.graph.has_edge(target, control) {
            circuit
                .basis_change(c)?
                .basis_change(t)?
                .cx(t, c)?
                .basis_change(c)?
                .basis_change(t)?;
        } else {
            return Err(CompileError::NoCouplingPath { control, target });
        }
        Ok(())
    }

    /// Closing layer: basis change on every connected qubit, root
    /// included.
    fn place_closing(
        &self,
        circuit: &mut Circuit,
        connected: &[(u32, Option<u32>)],
    ) -> CompileResult<()> {
        for &(qubit, _) in connected {
            circuit.basis_change(QubitId(qubit))?;
        }
        Ok(())
    }

    /// Envariance mixing: over the id-sorted connected set, flip the
    /// first half and idle the second, then swap roles in a second pass.
    /// Every qubit receives exactly one flip and one idle.
    fn place_mixing(
        &self,
        circuit: &mut Circuit,
        connected: &[(u32, Option<u32>)],
        effective: usize,
    ) -> CompileResult<()> {
        let mut sorted: Vec<u32> = connected.iter().map(|&(q, _)| q).collect();
        sorted.sort_unstable();
        let half = effective / 2;

        for (i, &qubit) in sorted.iter().enumerate() {
            let q = QubitId(qubit);
            if i < half {
                circuit.state_flip(q)?;
            } else {
                circuit.id(q)?;
            }
        }
        for (i, &qubit) in sorted.iter().enumerate() {
            let q = QubitId(qubit);
            if i < half {
                circuit.id(q)?;
            } else {
                circuit.state_flip(q)?;
            }
        }
        Ok(())
    }

    /// Measure every connected qubit into the matching classical slot.
    fn place_measurement(
        &self,
        circuit: &mut Circuit,
        connected: &[(u32, Option<u32>)],
    ) -> CompileResult<()> {
        for &(qubit, _) in connected {
            circuit.measure(QubitId(qubit), ClbitId(qubit))?;
        }
        Ok(())
    }
}
