//! Implementation of an exact branch and reduce algorithm for the weighted vertex cover problem.

use log::{debug, info};
use crate::config::BranchAndBoundConfig;
use crate::graph::{Cover, WeightedGraph};
use crate::pricing::PricingMethod;
use crate::solver::WeightedVertexCoverSolver;
use crate::wvc_instance::WVCInstance;

/// The lightest complete cover found so far.
#[derive(Debug, Clone)]
struct Incumbent {
    cover: Cover,
    weight: u64,
}

impl Incumbent {
    /// Replaces the incumbent if `instance` holds a strictly lighter solution.
    fn improve(&mut self, instance: &WVCInstance) -> bool {
        if instance.solution_weight < self.weight {
            self.cover = instance.solution.clone();
            self.weight = instance.solution_weight;
            return true
        }
        false
    }
}

impl WVCInstance {

    /// A recursive branch and reduce algorithm to find the optimal weighted vertex cover.
    /// To prepare, the algorithm computes an initial solution as the lighter one of a greedy
    /// solution and the pricing 2-approximation.
    /// In every branching step, the algorithm does the following:
    /// 1. Reduces the instance as far as possible by exhaustively applying the configured
    ///    reduction rules.
    /// 2. Abandons the branch if the partial solution (plus the clique packing lower bound) is
    ///    not lighter than the current best.
    /// 3. If no edge remains, the partial solution becomes the current best.
    /// 4. If the remaining graph is disconnected, starts `branch_and_reduce()` on each component
    ///    and joins the solutions.
    /// 5. Branches on the node `v` with the highest degree: either `v` is in the solution, or
    ///    all neighbors of `v` are.
    /// Each branch works on its own clone of the instance.
    ///
    /// `on_improved` is called with every new best solution.
    pub fn branch_and_reduce(&self, config: &BranchAndBoundConfig, on_improved: &mut dyn FnMut(&Cover)) -> Cover {
        let mut best = self.initial_solution(config);
        debug!("initial upper bound {}", best.weight);
        on_improved(&best.cover);
        self.clone().branch_and_reduce_inner(config, &mut best, on_improved);
        best.cover
    }

    fn initial_solution(&self, config: &BranchAndBoundConfig) -> Incumbent {
        let greedy = self.greedy_heuristic(&config.rules);
        let mut priced = PricingMethod::default().solve(&self.graph, &mut |_: &Cover| {});
        priced.union_with(&self.solution);
        let (greedy_weight, priced_weight) = (self.graph.weight_of(&greedy), self.graph.weight_of(&priced));
        if priced_weight < greedy_weight {
            Incumbent { cover: priced, weight: priced_weight }
        } else {
            Incumbent { cover: greedy, weight: greedy_weight }
        }
    }

    fn branch_and_reduce_inner(mut self, config: &BranchAndBoundConfig, best: &mut Incumbent, on_improved: &mut dyn FnMut(&Cover)) {
        // Reduce instance
        self.exhaustive_rules(&config.rules);
        if self.solution_weight >= best.weight {
            return
        }
        if self.graph.num_edges() == 0 {
            if best.improve(&self) {
                debug!("new best solution of weight {}", best.weight);
                on_improved(&best.cover);
            }
            return
        }
        // Compute current lower and compare with current best.
        if config.use_lower_bound && self.lower_bound_heuristic() >= best.weight {
            return
        }
        // Computes CCs independently.
        let mut with_edges = self.live();
        for node in self.nodes().filter(|node| self.graph.degree(*node) == 0) {
            with_edges.remove(node);
        }
        let components = self.graph.connected_components(&with_edges);
        if components.len() > 1 {
            for component in components {
                let sub = WVCInstance::induced(&self.graph, &component);
                let sub_solution = sub.branch_and_reduce(config, &mut |_: &Cover| {});
                self.extend_solution(&sub_solution);
                if self.solution_weight >= best.weight {
                    return
                }
            }
            if best.improve(&self) {
                debug!("new best solution of weight {} after splitting", best.weight);
                on_improved(&best.cover);
            }
            return
        }
        // Branch on the node with the highest degree.
        let node = self.graph.max_degree_node().expect("`self.graph` has an edge");
        let neighbors: Vec<usize> = self.graph.neighbors(node).iter().copied().collect();
        let mut with_node = self.clone();
        with_node.add_to_solution(node);
        with_node.branch_and_reduce_inner(config, best, on_improved);
        self.add_all_to_solution(neighbors);
        self.delete_node(node);
        self.branch_and_reduce_inner(config, best, on_improved);
    }
}

/// Exact solver: reduction rules, decomposition into connected components and branch and bound.
#[derive(Debug, Clone, Default)]
pub struct BranchAndReduce {
    config: BranchAndBoundConfig,
}

impl BranchAndReduce {
    pub fn with_config(config: BranchAndBoundConfig) -> Self {
        BranchAndReduce { config }
    }
}

impl WeightedVertexCoverSolver for BranchAndReduce {

    fn name(&self) -> &'static str {
        "BMWVC"
    }

    fn solve(&mut self, graph: &WeightedGraph, on_improved: &mut dyn FnMut(&Cover)) -> Cover {
        info!("BMWVC: solving graph with n={}, m={}", graph.num_vertices(), graph.num_edges());
        let instance = WVCInstance::new(graph.copy());
        let cover = instance.branch_and_reduce(&self.config, on_improved);
        info!("BMWVC: optimal weight {}", graph.weight_of(&cover));
        cover
    }
}
