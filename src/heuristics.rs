//! Bounds for the weighted vertex cover problem used to prune the exact search.

use std::cmp::Ordering;
use crate::graph::Cover;
use crate::reduction::Rule;
use crate::wvc_instance::WVCInstance;

impl WVCInstance {

    /// Computes a lower bound for the remaining graph by repeatedly removing a greedy maximal
    /// clique with at least 2 nodes. Any cover holds all but at most one node of each clique, so
    /// the cliques contribute their weight minus their heaviest node.
    ///
    /// Returns the bound plus the weight of the partial solution.
    pub fn lower_bound_heuristic(&self) -> u64 {
        let mut graph = self.graph.copy();
        let mut lower_bound = 0;
        loop {
            let clique = graph.greedy_max_clique();
            if clique.len() < 2 {
                break
            }
            let heaviest = clique.iter().map(|node| graph.weight(node)).max().unwrap_or(0);
            lower_bound += graph.weight_of(&clique) - heaviest;
            graph.remove_vertices(&clique);
        }
        lower_bound + self.solution_weight
    }

    /// Computes an upper bound by repeatedly reducing the graph and adding the node with the
    /// highest degree per weight to the solution, until no edge remains.
    pub fn greedy_heuristic(&self, priority_rules: &[Rule]) -> Cover {
        let mut clone = self.clone();
        loop {
            clone.exhaustive_rules(priority_rules);
            let best = clone.nodes()
                .filter(|node| clone.graph.degree(*node) > 0)
                .max_by(|a, b| clone.degree_per_weight_cmp(*a, *b).then(b.cmp(a)));
            match best {
                Some(node) => { clone.add_to_solution(node); },
                None => break,
            }
        }
        clone.solution
    }

    /// Compares `deg(a)/w(a)` with `deg(b)/w(b)` without rounding.
    fn degree_per_weight_cmp(&self, a: usize, b: usize) -> Ordering {
        let lhs = self.graph.degree(a) as u128 * self.graph.weight(b) as u128;
        let rhs = self.graph.degree(b) as u128 * self.graph.weight(a) as u128;
        lhs.cmp(&rhs)
    }
}
