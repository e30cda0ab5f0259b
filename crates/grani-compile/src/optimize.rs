//! Cancellation of adjacent self-inverse basis-change gates.

use grani_ir::dag::{NodeIndex, WireId};
use grani_ir::{CircuitDag, InstructionKind};
use rustc_hash::FxHashSet;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};

/// Basis-change cancellation pass.
///
/// Two canonical u2(0, π) gates on the same wire compose to identity.
/// For every such gate the pass inspects only the immediate predecessor
/// on that wire; if it is also a canonical basis-change gate, the pair
/// is removed. Runs of three or more therefore cancel only in adjacent
/// pairs, leaving an odd remainder in place.
pub struct CancelBasisChange;

impl CancelBasisChange {
    /// Create a new basis-change cancellation pass.
    pub fn new() -> Self {
        Self
    }

    /// Find disjoint (predecessor, node) pairs that cancel.
    #[allow(clippy::unused_self)]
    fn find_cancellable_pairs(&self, dag: &CircuitDag) -> Vec<(NodeIndex, NodeIndex)> {
        let mut pairs = Vec::new();
        let mut processed: FxHashSet<NodeIndex> = FxHashSet::default();

        for (node_idx, inst) in dag.topological_ops() {
            if processed.contains(&node_idx) {
                continue;
            }

            let InstructionKind::Gate(gate) = &inst.kind else {
                continue;
            };
            if !gate.is_basis_change() {
                continue;
            }

            let wire = WireId::Qubit(inst.qubits[0]);
            let Some(pred_idx) = dag.predecessor_on_wire(node_idx, wire) else {
                continue;
            };
            if processed.contains(&pred_idx) {
                continue;
            }

            let cancels = dag
                .get_instruction(pred_idx)
                .and_then(|pred| pred.as_gate())
                .is_some_and(grani_ir::StandardGate::is_basis_change);

            if cancels {
                pairs.push((pred_idx, node_idx));
                processed.insert(pred_idx);
                processed.insert(node_idx);
            }
        }

        pairs
    }
}

impl Default for CancelBasisChange {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for CancelBasisChange {
    fn name(&self) -> &'static str {
        "CancelBasisChange"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag) -> CompileResult<()> {
        // Keep cancelling until no more pairs found.
        // Bound iterations to avoid pathological cases.
        const MAX_ITERATIONS: usize = 100;
        for _ in 0..MAX_ITERATIONS {
            let pairs = self.find_cancellable_pairs(dag);
            if pairs.is_empty() {
                break;
            }

            // Remove in descending index order: petgraph's swap-remove
            // relocates only the last node, which is never still pending.
            let mut to_remove: Vec<NodeIndex> =
                pairs.into_iter().flat_map(|(a, b)| [a, b]).collect();
            to_remove.sort_unstable_by(|a, b| b.cmp(a));
            for node in to_remove {
                dag.remove_op(node)?;
            }
        }

        Ok(())
    }
}
