//! Implementation of a simple, undirected, vertex weighted graph data structure with basic static
//! and dynamic functions.

use bit_set::BitSet;
use fxhash::FxHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::cust_error::GraphError;

/// A set of vertices given as a bit-vector over `0..num_vertices`.
pub type Cover = BitSet;

/// A weighted undirected graph datastructure that supports vertex removal.
///
/// The adjacency is symmetric and free of loops at all times, `num_edges` is half the sum of the
/// degrees.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct WeightedGraph {
    adj_list: Vec<FxHashSet<usize>>,
    weights: Vec<u64>,
    num_edges: usize,
}

// Construction
impl WeightedGraph {

    /// Creates a graph without edges on `weights.len()` vertices.
    /// Fails if any weight is 0.
    pub fn new(weights: Vec<u64>) -> Result<Self, GraphError> {
        if let Some(v) = weights.iter().position(|w| *w == 0) {
            return Err(GraphError::ZeroWeight(v))
        }
        Ok(WeightedGraph {
            adj_list: vec![FxHashSet::default(); weights.len()],
            weights,
            num_edges: 0,
        })
    }

    /// Creates a graph without edges on `n` vertices of weight 1.
    pub fn with_unit_weights(n: usize) -> Self {
        WeightedGraph {
            adj_list: vec![FxHashSet::default(); n],
            weights: vec![1; n],
            num_edges: 0,
        }
    }

    /// Creates a graph from a weight list and an edge list.
    pub fn from_edges(weights: Vec<u64>, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut graph = Self::new(weights)?;
        for (src, trg) in edges {
            graph.add_edge(*src, *trg)?;
        }
        Ok(graph)
    }

    /// Generates a random graph in which every edge exists independently with probability `p`
    /// and every vertex gets a random weight in `1..=200`. Equal seeds give equal graphs.
    pub fn generate(n: usize, p: f64, seed: u64) -> Self {
        let mut graph = Self::with_unit_weights(n);
        graph.set_default_random_weights(seed);
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(n as u64));
        for i in 0..n {
            for j in (i+1)..n {
                if rng.gen::<f64>() < p {
                    graph.adj_list[i].insert(j);
                    graph.adj_list[j].insert(i);
                    graph.num_edges += 1;
                }
            }
        }
        graph
    }

    /// Inserts the edge `{src, trg}`.
    /// Returns `Ok(true)` if the edge is new, `Ok(false)` if it already existed.
    pub fn add_edge(&mut self, src: usize, trg: usize) -> Result<bool, GraphError> {
        self.check_vertex(src)?;
        self.check_vertex(trg)?;
        if src == trg {
            return Err(GraphError::SelfLoop(src))
        }
        if self.adj_list[src].insert(trg) {
            self.adj_list[trg].insert(src);
            self.num_edges += 1;
            return Ok(true)
        }
        Ok(false)
    }

    /// Sets the weight of `node`.
    pub fn set_weight(&mut self, node: usize, weight: u64) -> Result<(), GraphError> {
        self.check_vertex(node)?;
        if weight == 0 {
            return Err(GraphError::ZeroWeight(node))
        }
        self.weights[node] = weight;
        Ok(())
    }

    /// Replaces all weights.
    pub fn set_weights(&mut self, weights: Vec<u64>) -> Result<(), GraphError> {
        if weights.len() != self.num_vertices() {
            return Err(GraphError::WeightCountMismatch { expected: self.num_vertices(), found: weights.len() })
        }
        if let Some(v) = weights.iter().position(|w| *w == 0) {
            return Err(GraphError::ZeroWeight(v))
        }
        self.weights = weights;
        Ok(())
    }

    /// Sets every weight to a random value in `min_weight..=max_weight`.
    pub fn set_random_weights(&mut self, seed: u64, min_weight: u64, max_weight: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (lo, hi) = (min_weight.max(1), max_weight.max(min_weight.max(1)));
        for weight in self.weights.iter_mut() {
            *weight = rng.gen_range(lo..=hi);
        }
    }

    /// Sets every weight to a random value in `1..=200`.
    pub fn set_default_random_weights(&mut self, seed: u64) {
        self.set_random_weights(seed, 1, 200);
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex >= self.num_vertices() {
            return Err(GraphError::VertexOutOfRange { vertex, num_vertices: self.num_vertices() })
        }
        Ok(())
    }
}

// Static functions
impl WeightedGraph {

    pub fn num_vertices(&self) -> usize {
        self.adj_list.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns an `Iterator` over all vertex indices.
    pub fn nodes(&self) -> impl Iterator<Item=usize> {
        0..self.adj_list.len()
    }

    /// Returns an iterator over all edges `(i, j)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .flat_map(|(i, adj)| {
                adj.iter()
                    .filter(move |j| i < **j)
                    .map(move |j| (i, *j))
            })
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adj_list[node].len()
    }

    pub fn weight(&self, node: usize) -> u64 {
        self.weights[node]
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    /// Checks if the edge `{src, trg}` exists.
    pub fn has_edge(&self, src: usize, trg: usize) -> bool {
        self.adj_list[src].contains(&trg)
    }

    /// Same as `has_edge`.
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.has_edge(i, j)
    }

    /// Returns the neighborhood of `node`.
    pub fn neighbors(&self, node: usize) -> &FxHashSet<usize> {
        &self.adj_list[node]
    }

    /// Returns the neighborhood of `node` as a bit-vector.
    pub fn adjacency_of(&self, node: usize) -> BitSet {
        let mut adjacency = BitSet::with_capacity(self.num_vertices());
        for neigh in &self.adj_list[node] {
            adjacency.insert(*neigh);
        }
        adjacency
    }

    /// Returns the summed weight of all vertices in `set`.
    pub fn weight_of(&self, set: &BitSet) -> u64 {
        set.iter().map(|v| self.weights[v]).sum()
    }

    /// Returns the summed weight of the neighborhood of `node`.
    pub fn neighborhood_weight(&self, node: usize) -> u64 {
        self.adj_list[node].iter().map(|v| self.weights[*v]).sum()
    }

    /// Returns the number of neighbors of `node` in `set`.
    pub fn relative_degree(&self, node: usize, set: &BitSet) -> usize {
        self.adj_list[node].iter().filter(|neigh| set.contains(**neigh)).count()
    }

    /// Checks if `set` is a vertex cover: every vertex outside of `set` has all of its
    /// neighbors inside of `set`.
    pub fn is_vertex_cover(&self, set: &BitSet) -> bool {
        self.nodes()
            .filter(|node| !set.contains(*node))
            .all(|node| self.adj_list[node].iter().all(|neigh| set.contains(*neigh)))
    }

    /// Builds a `Cover` sized for `self` from a list of vertices.
    pub fn cover_from<I: IntoIterator<Item=usize>>(&self, vertices: I) -> Cover {
        let mut cover = BitSet::with_capacity(self.num_vertices());
        for v in vertices {
            cover.insert(v);
        }
        cover
    }

    /// Returns all vertices, largest degree first. Ties are broken by index.
    pub fn order_by_degree(&self) -> Vec<usize> {
        let mut vertices: Vec<usize> = self.nodes().collect();
        vertices.sort_by_key(|v| std::cmp::Reverse(self.degree(*v)));
        vertices
    }

    /// Returns all vertices, smallest degree first. Ties are broken by index.
    pub fn order_by_upwards_degree(&self) -> Vec<usize> {
        let mut vertices: Vec<usize> = self.nodes().collect();
        vertices.sort_by_key(|v| self.degree(*v));
        vertices
    }

    /// Returns the vertices of `set` ordered by their degree inside of `set`, smallest first.
    pub fn order_by_relative_degree(&self, set: &BitSet) -> Vec<usize> {
        let mut vertices: Vec<usize> = set.iter().filter(|v| *v < self.num_vertices()).collect();
        vertices.sort_by_key(|v| self.relative_degree(*v, set));
        vertices
    }

    /// Returns the node with the highest degree among those with at least one neighbor.
    /// Ties are broken by the smallest index.
    pub fn max_degree_node(&self) -> Option<usize> {
        self.nodes()
            .filter(|node| self.degree(*node) > 0)
            .max_by_key(|node| (self.degree(*node), std::cmp::Reverse(*node)))
    }

    /// Returns a set of all nodes reachable by `node`, including `node`.
    pub fn reachable(&self, node: usize) -> BitSet {
        let mut reached = BitSet::with_capacity(self.num_vertices());
        let mut queue = vec![node];
        while let Some(next) = queue.pop() {
            if !reached.insert(next) {
                continue
            }
            queue.extend(self.adj_list[next].iter().filter(|n| !reached.contains(**n)));
        }
        reached
    }

    /// Splits the vertices in `live` into the vertex sets of their connected components.
    pub fn connected_components(&self, live: &BitSet) -> Vec<BitSet> {
        let mut components = Vec::new();
        let mut marked = BitSet::with_capacity(self.num_vertices());
        for node in live.iter() {
            if marked.contains(node) {
                continue
            }
            let component = self.reachable(node);
            marked.union_with(&component);
            components.push(component);
        }
        components
    }

    /// Greedily looks for a maximal clique among the vertices with at least one neighbor:
    /// Starting with the node with the highest degree and then adding the neighbor with the
    /// biggest neighborhood intersection.
    pub fn greedy_max_clique(&self) -> BitSet {
        let mut clique = BitSet::with_capacity(self.num_vertices());
        if let Some(node) = self.max_degree_node() {
            clique.insert(node);
            let mut candidates = self.adj_list[node].clone();
            while !candidates.is_empty() {
                let mut best: Option<(usize, FxHashSet<usize>)> = None;
                let mut sorted: Vec<usize> = candidates.iter().copied().collect();
                sorted.sort_unstable();
                for cand in sorted {
                    let shared: FxHashSet<usize> = candidates
                        .intersection(&self.adj_list[cand])
                        .copied()
                        .collect();
                    if best.as_ref().map_or(true, |(_, b)| shared.len() > b.len()) {
                        best = Some((cand, shared));
                    }
                }
                match best {
                    Some((cand, shared)) => {
                        clique.insert(cand);
                        candidates = shared;
                    },
                    None => break,
                }
            }
        }
        clique
    }

    /// Checks if `set` is a clique in `self`.
    pub fn is_clique(&self, set: &BitSet) -> bool {
        let members: Vec<usize> = set.iter().collect();
        members.iter().enumerate().all(|(i, u)| {
            members[(i+1)..].iter().all(|v| self.has_edge(*u, *v))
        })
    }
}

// Dynamic functions
impl WeightedGraph {

    /// Disconnects `node` from all of its neighbors. Afterwards `node` is isolated and no other
    /// vertex has it as neighbor.
    /// Returns the old neighborhood of `node`.
    pub fn remove_vertex(&mut self, node: usize) -> FxHashSet<usize> {
        let neighborhood = std::mem::take(&mut self.adj_list[node]);
        for neighbor in neighborhood.iter() {
            self.adj_list[*neighbor].remove(&node);
        }
        self.num_edges -= neighborhood.len();
        neighborhood
    }

    /// Removes all nodes in `set` from the graph.
    pub fn remove_vertices(&mut self, set: &BitSet) {
        for node in set.iter() {
            self.remove_vertex(node);
        }
    }

    /// Returns an independent deep copy of `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> WeightedGraph {
        WeightedGraph::from_edges(vec![1, 2, 3, 4], &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    #[test]
    fn construction_test() {
        let graph = square();
        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 4);
        assert_eq!(graph.edges().count(), 4);
        assert!(graph.has_edge(0, 3));
        assert!(graph.is_adjacent(3, 0));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.neighborhood_weight(0), 6);
        let mut graph = graph;
        assert_eq!(graph.add_edge(1, 0), Ok(false));
        assert_eq!(graph.num_edges(), 4);
        assert_eq!(graph.add_edge(2, 2), Err(GraphError::SelfLoop(2)));
        assert_eq!(graph.add_edge(0, 4), Err(GraphError::VertexOutOfRange { vertex: 4, num_vertices: 4 }));
        assert_eq!(WeightedGraph::new(vec![1, 0]), Err(GraphError::ZeroWeight(1)));
    }

    #[test]
    fn vertex_cover_test() {
        let graph = square();
        assert!(graph.is_vertex_cover(&graph.cover_from(vec![0, 2])));
        assert!(graph.is_vertex_cover(&graph.cover_from(vec![1, 3])));
        assert!(!graph.is_vertex_cover(&graph.cover_from(vec![0, 1])));
        assert!(!graph.is_vertex_cover(&graph.cover_from(vec![])));
        assert_eq!(graph.weight_of(&graph.cover_from(vec![1, 3])), 6);
        let empty = WeightedGraph::with_unit_weights(1);
        assert!(empty.is_vertex_cover(&empty.cover_from(vec![])));
    }

    #[test]
    fn remove_vertex_test() {
        let mut graph = square();
        let old = graph.remove_vertex(0);
        assert_eq!(old.len(), 2);
        assert_eq!(graph.num_edges(), 2);
        for other in 1..4 {
            assert!(!graph.has_edge(other, 0));
            assert!(!graph.has_edge(0, other));
        }
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(3), 1);
    }

    #[test]
    fn copy_is_independent_test() {
        let graph = square();
        let mut copy = graph.copy();
        copy.remove_vertex(1);
        copy.set_weight(2, 10).unwrap();
        assert_eq!(graph.num_edges(), 4);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(2, 1));
        assert_eq!(graph.weight(2), 3);
        assert_ne!(graph, copy);
    }

    #[test]
    fn ordering_test() {
        let graph = WeightedGraph::from_edges(vec![1; 5], &[(0, 1), (1, 2), (1, 3), (3, 2)]).unwrap();
        assert_eq!(graph.order_by_degree(), vec![1, 2, 3, 0, 4]);
        assert_eq!(graph.order_by_upwards_degree(), vec![4, 0, 2, 3, 1]);
        let subset = graph.cover_from(vec![0, 1, 2]);
        assert_eq!(graph.relative_degree(1, &subset), 2);
        assert_eq!(graph.relative_degree(3, &subset), 2);
        assert_eq!(graph.order_by_relative_degree(&subset), vec![0, 2, 1]);
    }

    #[test]
    fn components_test() {
        let graph = WeightedGraph::from_edges(vec![1; 7], &[(0, 1), (1, 2), (3, 4), (4, 5), (5, 3)]).unwrap();
        let live = graph.cover_from(graph.nodes());
        let components = graph.connected_components(&live);
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].len(), 3);
        assert_eq!(components[1].len(), 3);
        assert_eq!(components[2].len(), 1);
        assert!(graph.is_clique(&components[1]));
        assert!(!graph.is_clique(&components[0]));
    }

    #[test]
    fn greedy_max_clique_test() {
        let graph = WeightedGraph::from_edges(vec![1; 7], &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5),
            (3, 6), (4, 5), (4, 6), (5, 6)]).unwrap();
        let clique = graph.greedy_max_clique();
        assert_eq!(clique.len(), 4);
        assert!(graph.is_clique(&clique));
    }

    #[test]
    fn generate_test() {
        let g1 = WeightedGraph::generate(30, 0.2, 7);
        let g2 = WeightedGraph::generate(30, 0.2, 7);
        assert_eq!(g1, g2);
        assert!(g1.weights().iter().all(|w| (1..=200).contains(w)));
        assert_eq!(g1.edges().count(), g1.num_edges());
        for (i, j) in g1.edges() {
            assert!(g1.has_edge(j, i));
        }
    }
}
