//! Directed coupling graph analysis and qubit ranking.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;

use crate::error::{CompileError, CompileResult};

/// Directed adjacency map: qubit id to the set of ids it may target.
///
/// Ordered containers keep every traversal deterministic.
pub type CouplingMap = BTreeMap<u32, BTreeSet<u32>>;

/// The device's directed two-qubit interaction graph.
///
/// Built once from the input adjacency map; immutable afterwards. Holds
/// the inverse graph (target to sources) and a per-qubit connectivity
/// rank: how many distinct qubits a source can reach by following directed
/// coupling edges. The highest-ranked qubit becomes the routing root,
/// ties broken by lowest id.
#[derive(Debug, Clone)]
pub struct CouplingGraph {
    forward: CouplingMap,
    inverse: CouplingMap,
    ranks: Vec<u32>,
    root: u32,
}

impl CouplingGraph {
    /// Build the graph from a directed adjacency map.
    ///
    /// Fails with [`CompileError::EmptyCouplingMap`] on an empty map and
    /// [`CompileError::NonContiguousQubits`] when ids are not dense from 0.
    pub fn new(coupling_map: CouplingMap) -> CompileResult<Self> {
        if coupling_map.is_empty() {
            return Err(CompileError::EmptyCouplingMap);
        }

        let n = coupling_map.len() as u32;
        for id in 0..n {
            if !coupling_map.contains_key(&id) {
                return Err(CompileError::NonContiguousQubits { missing: id });
            }
        }
        for targets in coupling_map.values() {
            for &t in targets {
                if t >= n {
                    return Err(CompileError::NonContiguousQubits { missing: n });
                }
            }
        }

        let inverse = Self::invert(&coupling_map);
        let ranks = Self::compute_ranks(&coupling_map);

        // Root: maximum rank, ties broken by lowest id.
        let root = ranks
            .iter()
            .enumerate()
            .max_by(|(ia, ra), (ib, rb)| ra.cmp(rb).then(ib.cmp(ia)))
            .map(|(i, _)| i as u32)
            .unwrap_or(0);

        Ok(Self {
            forward: coupling_map,
            inverse,
            ranks,
            root,
        })
    }

    /// Reverse every edge of the graph. Every qubit stays present,
    /// possibly with an empty source set.
    fn invert(graph: &CouplingMap) -> CouplingMap {
        let mut inverse: CouplingMap = graph.keys().map(|&q| (q, BTreeSet::new())).collect();
        for (&end, starts) in graph {
            for &start in starts {
                inverse.entry(start).or_default().insert(end);
            }
        }
        inverse
    }

    /// Rank every qubit by how many distinct qubits it can reach.
    ///
    /// One depth-first traversal per source over outgoing edges with a
    /// per-source visited set; the source's rank grows by one for every
    /// qubit newly reached from it. Iterative with an explicit stack, so
    /// traversal depth is bounded by the qubit count. A source sitting on
    /// a cycle counts itself once, matching the per-source visited-set
    /// semantics.
    fn compute_ranks(graph: &CouplingMap) -> Vec<u32> {
        let mut ranks = vec![0u32; graph.len()];
        let mut stack: Vec<u32> = Vec::with_capacity(graph.len());

        for &source in graph.keys() {
            let mut visited: FxHashSet<u32> = FxHashSet::default();
            stack.clear();
            stack.push(source);
            while let Some(visiting) = stack.pop() {
                for &next in &graph[&visiting] {
                    if visited.insert(next) {
                        ranks[source as usize] += 1;
                        stack.push(next);
                    }
                }
            }
        }

        ranks
    }

    /// Number of qubits in the device graph.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.forward.len()
    }

    /// Check whether the directed edge `control -> target` exists.
    #[inline]
    pub fn has_edge(&self, control: u32, target: u32) -> bool {
        self.forward
            .get(&control)
            .is_some_and(|t| t.contains(&target))
    }

    /// Sources that can directly target `qubit`, in ascending id order.
    pub fn sources(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.inverse.get(&qubit).into_iter().flatten().copied()
    }

    /// Connectivity rank of a qubit.
    #[inline]
    pub fn rank(&self, qubit: u32) -> u32 {
        self.ranks[qubit as usize]
    }

    /// The routing root: highest rank, lowest id on ties.
    #[inline]
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Qubits sorted by descending rank, then ascending id.
    pub fn by_rank_descending(&self) -> Vec<u32> {
        let mut qubits: Vec<u32> = self.forward.keys().copied().collect();
        qubits.sort_by(|&a, &b| {
            self.ranks[b as usize]
                .cmp(&self.ranks[a as usize])
                .then(a.cmp(&b))
        });
        qubits
    }
}
