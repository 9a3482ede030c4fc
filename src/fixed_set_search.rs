//! A GRASP with fixed set search for the weighted vertex cover problem.
//!
//! Solutions are built by a randomized greedy construction and improved by a local search with
//! single and pair swaps. After an initial population, new solutions start from a fixed set: the
//! vertices of a base solution that occur most often in a sample of the best solutions.

use bit_set::BitSet;
use fxhash::FxHashSet;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::config::GraspConfig;
use crate::cust_error::ProcessingError;
use crate::graph::{Cover, WeightedGraph};
use crate::solver::WeightedVertexCoverSolver;

#[derive(Debug, Clone, Default)]
pub struct FixedSetSearch {
    config: GraspConfig,
}

impl FixedSetSearch {
    pub fn with_config(config: GraspConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        Ok(FixedSetSearch { config })
    }
}

/// Distinct locally optimal solutions, lightest first.
#[derive(Debug, Default)]
struct Population {
    solutions: Vec<(u64, Cover)>,
    seen: FxHashSet<Cover>,
}

impl Population {

    /// Returns `false` if `solution` is already part of the population.
    fn insert(&mut self, weight: u64, solution: Cover) -> bool {
        if !self.seen.insert(solution.clone()) {
            return false
        }
        let pos = self.solutions.partition_point(|(w, _)| *w <= weight);
        self.solutions.insert(pos, (weight, solution));
        true
    }

    fn len(&self) -> usize {
        self.solutions.len()
    }

    /// The `k` lightest solutions.
    fn best(&self, k: usize) -> Vec<&Cover> {
        self.solutions.iter().take(k).map(|(_, s)| s).collect()
    }
}

/// The graph together with its adjacency as bit-vectors.
struct SearchSpace<'a> {
    graph: &'a WeightedGraph,
    adjacency: Vec<BitSet>,
    candidate_list_size: usize,
}

impl<'a> SearchSpace<'a> {

    fn new(graph: &'a WeightedGraph, candidate_list_size: usize) -> Self {
        SearchSpace {
            graph,
            adjacency: graph.nodes().map(|node| graph.adjacency_of(node)).collect(),
            candidate_list_size,
        }
    }

    /// Neighbors of `node` outside of `solution`.
    fn unique_neighbors(&self, node: usize, solution: &Cover) -> BitSet {
        let mut unique = self.adjacency[node].clone();
        unique.difference_with(solution);
        unique
    }

    /// Returns the `candidate_list_size` vertices outside of `solution` that cover the most
    /// uncovered edges per weight unit. Vertices that cover nothing are never candidates.
    fn restricted_candidate_list(&self, solution: &Cover) -> Vec<usize> {
        let mut candidates: Vec<(usize, u64)> = self.graph.nodes()
            .filter(|node| !solution.contains(*node))
            .map(|node| (node, self.unique_neighbors(node, solution).len() as u64))
            .filter(|(_, uncovered)| *uncovered > 0)
            .collect();
        // uncovered(a) / w(a) > uncovered(b) / w(b), compared without division
        candidates.sort_by(|(a, ua), (b, ub)| {
            let lhs = *ua as u128 * self.graph.weight(*b) as u128;
            let rhs = *ub as u128 * self.graph.weight(*a) as u128;
            rhs.cmp(&lhs).then(a.cmp(b))
        });
        candidates.truncate(self.candidate_list_size);
        candidates.into_iter().map(|(node, _)| node).collect()
    }

    /// Completes `fixed` to a vertex cover, adding a random vertex of the restricted candidate
    /// list at a time.
    fn construct(&self, fixed: &Cover, rng: &mut StdRng) -> Cover {
        let mut solution = fixed.clone();
        while let Some(node) = self.restricted_candidate_list(&solution).choose(rng) {
            solution.insert(*node);
        }
        solution
    }

    /// Vertices of `solution` that are heavier than their neighbors outside of `solution`.
    fn improving_element_swaps(&self, solution: &Cover) -> Vec<usize> {
        solution.iter()
            .filter(|node| self.graph.weight(*node) > self.graph.weight_of(&self.unique_neighbors(*node, solution)))
            .collect()
    }

    /// Pairs of non-adjacent vertices of `solution` that together are heavier than their
    /// neighbors outside of `solution`.
    fn improving_pair_swaps(&self, solution: &Cover) -> Vec<(usize, usize)> {
        let members: Vec<usize> = solution.iter().collect();
        let mut swaps = Vec::new();
        for (i, v1) in members.iter().enumerate() {
            for v2 in &members[i+1..] {
                if self.adjacency[*v1].contains(*v2) {
                    continue
                }
                let mut unique = self.unique_neighbors(*v1, solution);
                unique.union_with(&self.unique_neighbors(*v2, solution));
                if self.graph.weight(*v1) + self.graph.weight(*v2) > self.graph.weight_of(&unique) {
                    swaps.push((*v1, *v2));
                }
            }
        }
        swaps
    }

    /// Replaces `node` by its neighbors outside of `solution`.
    fn swap_out(&self, node: usize, solution: &mut Cover) {
        let unique = self.unique_neighbors(node, solution);
        solution.union_with(&unique);
        solution.remove(node);
    }

    /// Applies random improving swaps until `solution` is locally optimal. Element swaps are
    /// preferred over pair swaps.
    fn local_search(&self, mut solution: Cover, rng: &mut StdRng) -> Cover {
        loop {
            if let Some(node) = self.improving_element_swaps(&solution).choose(rng) {
                self.swap_out(*node, &mut solution);
                continue
            }
            match self.improving_pair_swaps(&solution).choose(rng) {
                Some((v1, v2)) => {
                    self.swap_out(*v1, &mut solution);
                    self.swap_out(*v2, &mut solution);
                },
                None => return solution,
            }
        }
    }
}

/// Returns the `size` vertices of `base` that occur in the most solutions of `sample`. Ties are
/// broken by index.
fn fixed_set(base: &Cover, sample: &[&Cover], size: usize) -> Cover {
    let mut counted: Vec<(usize, usize)> = base.iter()
        .map(|node| (sample.iter().filter(|s| s.contains(node)).count(), node))
        .collect();
    counted.sort_by(|(ca, a), (cb, b)| cb.cmp(ca).then(a.cmp(b)));
    counted.into_iter().take(size).map(|(_, node)| node).collect()
}

/// Share of the base solution that is fixed at `size_index`: `1 - 1/2^size_index`.
fn size_factor(size_index: u32) -> f64 {
    1.0 - 1.0 / 2f64.powi(size_index as i32)
}

impl WeightedVertexCoverSolver for FixedSetSearch {

    fn name(&self) -> &'static str {
        "FixedSetSearch"
    }

    fn solve(&mut self, graph: &WeightedGraph, on_improved: &mut dyn FnMut(&Cover)) -> Cover {
        info!("FixedSetSearch: solving graph with n={}, m={}", graph.num_vertices(), graph.num_edges());
        let config = &self.config;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let space = SearchSpace::new(graph, config.candidate_list_size);
        let empty = BitSet::with_capacity(graph.num_vertices());

        let mut population = Population::default();
        for _ in 0..config.initial_population_size {
            let solution = space.local_search(space.construct(&empty, &mut rng), &mut rng);
            population.insert(graph.weight_of(&solution), solution);
        }
        let (mut best_weight, mut best) = match population.solutions.first() {
            Some((weight, solution)) => (*weight, solution.clone()),
            None => (0, empty.clone()),
        };
        debug!("FixedSetSearch: {} distinct initial solutions, best weight {}", population.len(), best_weight);
        on_improved(&best);

        let mut size_index = 1;
        let mut stagnation = 0;
        let mut iterations = 0;
        while best_weight > 0 && population.len() < config.max_solutions && iterations < config.max_iterations {
            iterations += 1;
            let sample = population.best(config.initial_population_size);
            let base = match sample.choose(&mut rng) {
                Some(base) => *base,
                None => break,
            };
            let size = (base.len() as f64 * size_factor(size_index)) as usize;
            let fixed = fixed_set(base, &sample, size);
            let solution = space.local_search(space.construct(&fixed, &mut rng), &mut rng);
            let weight = graph.weight_of(&solution);
            trace!("FixedSetSearch: generation {}, fixed {} of {}, weight {}", iterations, size, base.len(), weight);
            if weight < best_weight {
                debug_assert!(graph.is_vertex_cover(&solution));
                best_weight = weight;
                best = solution.clone();
                stagnation = 0;
                debug!("FixedSetSearch: generation {}, new best weight {}", iterations, best_weight);
                on_improved(&best);
            } else {
                stagnation += 1;
                if stagnation >= config.stagnation_limit {
                    size_index += 1;
                    // Nothing would be left to construct, start over without a fixed set.
                    if 2f64.powi(size_index as i32) > graph.num_vertices() as f64 {
                        size_index = 0;
                    }
                    stagnation = 0;
                }
            }
            population.insert(weight, solution);
        }
        info!("FixedSetSearch: best weight {} after {} generations, population {}",
            best_weight, iterations, population.len());
        best
    }
}
