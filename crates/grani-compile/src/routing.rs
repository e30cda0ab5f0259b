//! Spanning routing tree construction over the coupling graph.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::coupling::CouplingGraph;
use crate::error::{CompileError, CompileResult};

/// Spanning routing tree in insertion order.
///
/// Entry order is the tree-construction order and determines the
/// connection order of every later synthesis request. The root carries
/// no predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPath {
    entries: Vec<(u32, Option<u32>)>,
    preds: FxHashMap<u32, Option<u32>>,
}

impl RoutingPath {
    fn new(entries: Vec<(u32, Option<u32>)>) -> Self {
        let preds = entries.iter().copied().collect();
        Self { entries, preds }
    }

    /// Number of qubits placed in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The tree root.
    pub fn root(&self) -> u32 {
        self.entries[0].0
    }

    /// Entries in tree-construction order.
    pub fn entries(&self) -> &[(u32, Option<u32>)] {
        &self.entries
    }

    /// Predecessor of a placed qubit (`None` for the root).
    pub fn pred(&self, qubit: u32) -> Option<Option<u32>> {
        self.preds.get(&qubit).copied()
    }

    /// Check whether a qubit is placed.
    pub fn contains(&self, qubit: u32) -> bool {
        self.preds.contains_key(&qubit)
    }

    /// Number of hops from a qubit to the root.
    ///
    /// Returns `None` for unplaced qubits or if the chain is broken.
    pub fn chain_length(&self, qubit: u32) -> Option<usize> {
        let mut current = qubit;
        let mut hops = 0;
        // A well-formed tree reaches the root within len() steps.
        for _ in 0..=self.entries.len() {
            match self.preds.get(&current)? {
                None => return Some(hops),
                Some(pred) => {
                    current = *pred;
                    hops += 1;
                }
            }
        }
        None
    }
}

/// Builds the routing tree once per compiler instance.
///
/// Expansion walks the frontier in insertion order and attaches, for each
/// frontier member, every unplaced qubit that can directly target it. When
/// a full pass over the frontier makes no progress, a repair pass scans
/// unplaced qubits in descending-rank order (ascending id on ties) and
/// attaches the first one with an already-placed direct source; expansion
/// then resumes. If repair cannot attach anything while qubits remain
/// unplaced, the device graph is not connected from the chosen root and
/// [`CompileError::RoutingIncomplete`] is returned.
pub struct RoutingPlanner;

impl RoutingPlanner {
    /// Build the spanning routing tree rooted at the graph's root qubit.
    pub fn build(graph: &CouplingGraph) -> CompileResult<RoutingPath> {
        let total = graph.num_qubits();
        let root = graph.root();

        let mut entries: Vec<(u32, Option<u32>)> = vec![(root, None)];
        let mut placed: FxHashSet<u32> = FxHashSet::default();
        placed.insert(root);

        let mut remaining: Vec<u32> = graph
            .by_rank_descending()
            .into_iter()
            .filter(|&q| q != root)
            .collect();

        let mut visiting = 0usize;
        let mut count = total - 1;
        let mut updated = true;

        while count > 0 {
            if !updated {
                // Repair: attach the highest-ranked unplaced qubit whose
                // direct source set intersects the tree.
                let mut attached = None;
                'repair: for (pos, &q) in remaining.iter().enumerate() {
                    for src in graph.sources(q) {
                        if placed.contains(&src) {
                            attached = Some((pos, q, src));
                            break 'repair;
                        }
                    }
                }

                let Some((pos, q, src)) = attached else {
                    return Err(CompileError::RoutingIncomplete {
                        placed: entries.len(),
                        total,
                    });
                };
                remaining.remove(pos);
                entries.push((q, Some(src)));
                placed.insert(q);
                count -= 1;
                updated = true;
            }

            if count > 0 {
                let frontier_member = entries[visiting].0;
                for src in graph.sources(frontier_member) {
                    if placed.insert(src) {
                        entries.push((src, Some(frontier_member)));
                        remaining.retain(|&q| q != src);
                        count -= 1;
                        if count == 0 {
                            break;
                        }
                    }
                }
                visiting += 1;
                if visiting == entries.len() {
                    updated = false;
                }
            }
        }

        Ok(RoutingPath::new(entries))
    }
}
