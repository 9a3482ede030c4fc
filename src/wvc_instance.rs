use bit_set::BitSet;
use crate::graph::{Cover, WeightedGraph};

/// The working state of the exact solver: a graph that shrinks as vertices get decided, the
/// partial solution and the set of decided vertices.
///
/// Decided vertices are disconnected from the graph. Every search branch owns its own clone of
/// the instance.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct WVCInstance {
    pub graph: WeightedGraph,
    pub solution: Cover,
    pub solution_weight: u64,
    removed: BitSet,
}

impl WVCInstance {

    pub fn new(graph: WeightedGraph) -> Self {
        let n = graph.num_vertices();
        WVCInstance {
            graph,
            solution: BitSet::with_capacity(n),
            solution_weight: 0,
            removed: BitSet::with_capacity(n),
        }
    }

    /// Creates an instance on the subgraph of `graph` induced by `live`. All other vertices count
    /// as removed.
    pub fn induced(graph: &WeightedGraph, live: &BitSet) -> Self {
        let mut instance = WVCInstance::new(graph.copy());
        for node in graph.nodes().filter(|node| !live.contains(*node)) {
            instance.delete_node(node);
        }
        instance
    }

    /// Returns an `Iterator` over all nodes that have not yet been decided.
    pub fn nodes(&self) -> impl Iterator<Item=usize> + '_ {
        self.graph.nodes().filter(|node| !self.removed.contains(*node))
    }

    /// Returns the undecided nodes as a set.
    pub fn live(&self) -> BitSet {
        let mut live = BitSet::with_capacity(self.graph.num_vertices());
        for node in self.nodes() {
            live.insert(node);
        }
        live
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_vertices() - self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes() == 0
    }

    pub fn is_removed(&self, node: usize) -> bool {
        self.removed.contains(node)
    }

    /// Adds `node` to `self.solution` and removes it from `self.graph`.
    /// Returns `false` if `node` was already decided.
    pub fn add_to_solution(&mut self, node: usize) -> bool {
        if !self.removed.insert(node) {
            return false
        }
        self.graph.remove_vertex(node);
        self.solution.insert(node);
        self.solution_weight += self.graph.weight(node);
        true
    }

    /// Adds all undecided nodes of `nodes` to `self.solution`.
    pub fn add_all_to_solution<I: IntoIterator<Item=usize>>(&mut self, nodes: I) {
        for node in nodes {
            self.add_to_solution(node);
        }
    }

    /// Removes `node` from `self.graph` without adding it to the solution.
    /// Returns `false` if `node` was already decided.
    pub fn delete_node(&mut self, node: usize) -> bool {
        if !self.removed.insert(node) {
            return false
        }
        self.graph.remove_vertex(node);
        true
    }

    /// Merges the solution of an independent part of the graph into `self.solution`.
    pub fn extend_solution(&mut self, other: &Cover) {
        for node in other.iter() {
            self.add_to_solution(node);
        }
    }
}
