//! A configuration checking local search with edge weighting (DLSWCC) for the weighted vertex
//! cover problem.
//!
//! The search keeps a working set that oscillates around feasibility. While the set is a cover,
//! it is recorded and shrunk. Then one more vertex is dropped and the set is repaired with
//! vertices whose neighborhood changed since they last moved (configuration checking), as long as
//! the set stays lighter than the best cover. Edges that stay uncovered gain weight, which makes
//! their endpoints more attractive.

use bit_set::BitSet;
use fxhash::FxHashMap;
use log::{debug, info, trace};
use crate::config::LocalSearchConfig;
use crate::cust_error::ProcessingError;
use crate::graph::{Cover, WeightedGraph};
use crate::solver::WeightedVertexCoverSolver;

#[derive(Debug, Clone, Default)]
pub struct Dlswcc {
    config: LocalSearchConfig,
}

impl Dlswcc {
    pub fn with_config(config: LocalSearchConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        Ok(Dlswcc { config })
    }

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Dlswcc { config: LocalSearchConfig::with_max_iterations(max_iterations) }
    }
}

/// The working state of one run.
struct SearchState<'a> {
    graph: &'a WeightedGraph,
    /// Learned weight of every edge `(i, j)` with `i < j`.
    edge_weights: FxHashMap<(usize, usize), u64>,
    /// Gain per weight unit of moving a vertex in or out of `current`.
    scores: Vec<f64>,
    /// Iteration in which a vertex last moved.
    ages: Vec<usize>,
    /// Vertices whose neighborhood changed since they last moved.
    w_config: BitSet,
    tabu: BitSet,
    current: BitSet,
    current_weight: u64,
    /// Number of edges without an endpoint in `current`.
    uncovered: usize,
    iteration: usize,
}

impl<'a> SearchState<'a> {

    fn new(graph: &'a WeightedGraph) -> Self {
        let n = graph.num_vertices();
        let mut w_config = BitSet::with_capacity(n);
        for node in graph.nodes() {
            w_config.insert(node);
        }
        let mut state = SearchState {
            graph,
            edge_weights: graph.edges().map(|edge| (edge, 1)).collect(),
            scores: vec![0.0; n],
            ages: vec![0; n],
            w_config,
            tabu: BitSet::with_capacity(n),
            current: BitSet::with_capacity(n),
            current_weight: 0,
            uncovered: graph.num_edges(),
            iteration: 0,
        };
        state.initial_cover();
        state
    }

    /// Adds vertices by descending degree until the set is a cover, then computes all scores.
    fn initial_cover(&mut self) {
        for node in self.graph.order_by_degree() {
            if self.uncovered == 0 {
                break
            }
            self.uncovered -= self.uncovered_neighbors(node);
            self.current.insert(node);
            self.current_weight += self.graph.weight(node);
        }
        for node in self.graph.nodes() {
            let gain: f64 = self.graph.neighbors(node)
                .iter()
                .filter(|neigh| !self.current.contains(**neigh))
                .map(|neigh| self.edge_weight(node, *neigh) as f64)
                .sum::<f64>() / self.graph.weight(node) as f64;
            self.scores[node] = if self.current.contains(node) { -gain } else { gain };
        }
    }

    fn edge_weight(&self, i: usize, j: usize) -> u64 {
        self.edge_weights.get(&(i.min(j), i.max(j))).copied().unwrap_or(0)
    }

    fn uncovered_neighbors(&self, node: usize) -> usize {
        self.graph.neighbors(node).iter().filter(|neigh| !self.current.contains(**neigh)).count()
    }

    /// Returns the candidate with the highest score. Ties go to the vertex that moved first.
    fn next_vertex<I: Iterator<Item=usize>>(&self, candidates: I) -> Option<usize> {
        let mut best: Option<usize> = None;
        for node in candidates {
            best = match best {
                Some(id) if self.scores[node] > self.scores[id]
                    || (self.scores[node] == self.scores[id] && self.ages[node] < self.ages[id]) => Some(node),
                Some(id) => Some(id),
                None => Some(node),
            };
        }
        best
    }

    fn remove_from_cover(&mut self, id: usize) {
        self.current.remove(id);
        self.current_weight -= self.graph.weight(id);
        self.uncovered += self.uncovered_neighbors(id);
        self.update_scores(id);
        self.w_config.remove(id);
        self.update_w_config(id);
    }

    fn add_to_cover(&mut self, id: usize) {
        self.uncovered -= self.uncovered_neighbors(id);
        self.current.insert(id);
        self.current_weight += self.graph.weight(id);
        self.update_scores(id);
        self.update_w_config(id);
    }

    /// Called after `id` moved.
    fn update_scores(&mut self, id: usize) {
        self.scores[id] = -self.scores[id];
        let id_in = self.current.contains(id);
        for neigh in self.graph.neighbors(id) {
            let mut add = self.edge_weight(*neigh, id) as f64 / self.graph.weight(*neigh) as f64;
            if self.current.contains(*neigh) ^ id_in {
                add = -add;
            }
            self.scores[*neigh] += add;
        }
        self.ages[id] = self.iteration;
    }

    fn update_w_config(&mut self, id: usize) {
        for neigh in self.graph.neighbors(id) {
            self.w_config.insert(*neigh);
        }
        self.ages[id] = self.iteration;
    }

    /// Increases the weight of every uncovered edge.
    fn update_edge_weights(&mut self) {
        let outside: Vec<usize> = self.graph.nodes().filter(|node| !self.current.contains(*node)).collect();
        for i in outside {
            for j in self.graph.neighbors(i) {
                if i < *j && !self.current.contains(*j) {
                    *self.edge_weights.entry((i, *j)).or_insert(0) += 1;
                    self.w_config.insert(i);
                    self.w_config.insert(*j);
                    self.scores[i] += 1.0 / self.graph.weight(i) as f64;
                    self.scores[*j] += 1.0 / self.graph.weight(*j) as f64;
                }
            }
        }
    }
}

impl WeightedVertexCoverSolver for Dlswcc {

    fn name(&self) -> &'static str {
        "DLSWCC"
    }

    fn solve(&mut self, graph: &WeightedGraph, on_improved: &mut dyn FnMut(&Cover)) -> Cover {
        info!("DLSWCC: solving graph with n={}, m={}", graph.num_vertices(), graph.num_edges());
        let stagnation_limit = self.config.stagnation_limit();
        let mut state = SearchState::new(graph);
        let mut best = state.current.clone();
        let mut best_weight = state.current_weight;
        let mut last_improvement = 0;
        on_improved(&best);
        'search: while state.iteration < self.config.max_iterations {
            while state.uncovered == 0 {
                if state.current_weight < best_weight {
                    debug_assert!(graph.is_vertex_cover(&state.current));
                    best = state.current.clone();
                    best_weight = state.current_weight;
                    last_improvement = state.iteration;
                    debug!("DLSWCC: iteration {}, new best weight {}", state.iteration, best_weight);
                    on_improved(&best);
                }
                match state.next_vertex(state.current.iter()) {
                    Some(id) => state.remove_from_cover(id),
                    // The empty set covers the graph.
                    None => break 'search,
                }
            }
            let allowed: Vec<usize> = state.current.iter().filter(|node| !state.tabu.contains(*node)).collect();
            if let Some(id) = state.next_vertex(allowed.into_iter()) {
                state.remove_from_cover(id);
            }
            state.tabu.clear();
            while state.uncovered > 0 {
                let candidates: Vec<usize> = state.w_config.iter().filter(|node| !state.current.contains(*node)).collect();
                let id = match state.next_vertex(candidates.into_iter()) {
                    Some(id) => id,
                    None => break,
                };
                if state.current_weight + graph.weight(id) >= best_weight {
                    break
                }
                state.add_to_cover(id);
                state.update_edge_weights();
                state.tabu.insert(id);
            }
            trace!("DLSWCC: iteration {}, working weight {}, uncovered {}",
                state.iteration, state.current_weight, state.uncovered);
            state.iteration += 1;
            if state.iteration - last_improvement >= stagnation_limit {
                debug!("DLSWCC: no improvement for {} iterations", stagnation_limit);
                break
            }
        }
        info!("DLSWCC: best weight {} after {} iterations", best_weight, state.iteration);
        best
    }
}
