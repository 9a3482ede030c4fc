//! This module includes the reduction rules for the weighted vertex cover problem.
//! Every rule decides some vertices without losing optimality:
//! * `Isolated`-rule removes vertices without neighbors.
//! * `Dominance`-rule adds the neighborhood of `v` to the solution if `v` weighs at least as much
//! as its whole neighborhood.
//! * `DegreeOneDominance`-rule adds `v` to the solution if it weighs at most as much as its
//! neighbors of degree 1, which are then removed.
//! * `PendantPair`-rule adds a pair `a`, `b` to the solution if it weighs at most as much as the
//! vertices whose only neighbors are `a` and `b`.

use fxhash::FxHashMap;
use log::debug;
use crate::wvc_instance::WVCInstance;

pub const ALL_RULES: &[Rule] = &[Rule::Isolated, Rule::Dominance, Rule::DegreeOneDominance, Rule::PendantPair];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Rule {
    Isolated,
    Dominance,
    DegreeOneDominance,
    PendantPair,
}

impl WVCInstance {

    /// Removes all nodes of degree 0.
    /// Returns true if at least one node was removed.
    pub fn isolated_rule(&mut self) -> bool {
        let isolated: Vec<usize> = self.nodes()
            .filter(|node| self.graph.degree(*node) == 0)
            .collect();
        for node in &isolated {
            self.delete_node(*node);
        }
        !isolated.is_empty()
    }

    /// For every node `v` with `w(v) >= w(N(v))`, adds `N(v)` to the solution and removes `v`.
    /// Returns true if at least one reduction has been applied.
    pub fn dominance_rule(&mut self) -> bool {
        let mut changed = false;
        let nodes: Vec<usize> = self.nodes().collect();
        for node in nodes {
            // `node` could have been removed by now.
            if self.is_removed(node) || self.graph.degree(node) == 0 {
                continue
            }
            if self.graph.weight(node) >= self.graph.neighborhood_weight(node) {
                let neighbors: Vec<usize> = self.graph.neighbors(node).iter().copied().collect();
                self.add_all_to_solution(neighbors);
                self.delete_node(node);
                changed = true;
            }
        }
        changed
    }

    /// For every node `v` that weighs at most as much as its neighbors of degree 1, adds `v` to
    /// the solution and removes these neighbors.
    /// Returns true if at least one reduction has been applied.
    pub fn degree_one_dominance_rule(&mut self) -> bool {
        let mut changed = false;
        let nodes: Vec<usize> = self.nodes().collect();
        for node in nodes {
            if self.is_removed(node) {
                continue
            }
            let leaves: Vec<usize> = self.graph.neighbors(node)
                .iter()
                .filter(|neigh| self.graph.degree(**neigh) == 1)
                .copied()
                .collect();
            if leaves.is_empty() {
                continue
            }
            let leaf_weight: u64 = leaves.iter().map(|leaf| self.graph.weight(*leaf)).sum();
            if self.graph.weight(node) <= leaf_weight {
                self.add_to_solution(node);
                for leaf in leaves {
                    self.delete_node(leaf);
                }
                changed = true;
            }
        }
        changed
    }

    /// Groups all nodes of degree 2 by their pair of neighbors `(a, b)`. If `w(a) + w(b)` is at
    /// most the weight of such a group, adds `a` and `b` to the solution and removes the group.
    /// Returns true if at least one reduction has been applied.
    pub fn pendant_pair_rule(&mut self) -> bool {
        let mut groups: FxHashMap<(usize, usize), Vec<usize>> = FxHashMap::default();
        for node in self.nodes() {
            if self.graph.degree(node) == 2 {
                let mut neighs = self.graph.neighbors(node).iter().copied();
                let (n1, n2) = match (neighs.next(), neighs.next()) {
                    (Some(n1), Some(n2)) => (n1.min(n2), n1.max(n2)),
                    _ => continue,
                };
                groups.entry((n1, n2)).or_default().push(node);
            }
        }
        let mut pairs: Vec<((usize, usize), Vec<usize>)> = groups.into_iter().collect();
        pairs.sort_unstable();
        let mut changed = false;
        for ((a, b), members) in pairs {
            if self.is_removed(a) || self.is_removed(b) {
                continue
            }
            // Earlier reductions may have touched some of the members.
            let members: Vec<usize> = members.into_iter()
                .filter(|m| !self.is_removed(*m)
                    && self.graph.degree(*m) == 2
                    && self.graph.has_edge(*m, a)
                    && self.graph.has_edge(*m, b))
                .collect();
            let member_weight: u64 = members.iter().map(|m| self.graph.weight(*m)).sum();
            if !members.is_empty() && self.graph.weight(a) + self.graph.weight(b) <= member_weight {
                self.add_to_solution(a);
                self.add_to_solution(b);
                for member in members {
                    self.delete_node(member);
                }
                changed = true;
            }
        }
        changed
    }

    /// Applies the rules in `priority_list` once each, in the given order, and repeats these
    /// passes until a pass no longer shrinks the instance.
    pub fn exhaustive_rules(&mut self, priority_list: &[Rule]) {
        let mut passes = 0;
        loop {
            let before = self.num_nodes();
            for rule in priority_list {
                match rule {
                    Rule::Isolated => { self.isolated_rule(); },
                    Rule::Dominance => { self.dominance_rule(); },
                    Rule::DegreeOneDominance => { self.degree_one_dominance_rule(); },
                    Rule::PendantPair => { self.pendant_pair_rule(); },
                }
            }
            passes += 1;
            if self.num_nodes() == before {
                break
            }
        }
        if passes > 1 {
            debug!("reduced to {} nodes in {} passes, partial solution weighs {}",
                self.num_nodes(), passes, self.solution_weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;

    #[test]
    fn isolated_rule_test() {
        let graph = WeightedGraph::from_edges(vec![1; 5], &[(0, 1)]).unwrap();
        let mut ins = WVCInstance::new(graph);
        assert!(ins.isolated_rule());
        assert_eq!(ins.num_nodes(), 2);
        assert!(!ins.isolated_rule());
        assert!(ins.solution.is_empty());
    }

    #[test]
    fn dominance_rule_test() {
        // heavy center of a star
        let graph = WeightedGraph::from_edges(vec![10, 1, 1, 1], &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let mut ins = WVCInstance::new(graph);
        assert!(ins.dominance_rule());
        assert_eq!(ins.solution, ins.graph.cover_from(vec![1, 2, 3]));
        assert_eq!(ins.solution_weight, 3);
        assert!(ins.is_empty());
    }

    #[test]
    fn degree_one_dominance_rule_test() {
        let graph = WeightedGraph::from_edges(vec![2, 1, 1, 1, 1], &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
        let mut ins = WVCInstance::new(graph);
        assert!(!ins.dominance_rule());
        assert!(ins.degree_one_dominance_rule());
        assert!(ins.solution.contains(0));
        assert_eq!(ins.solution_weight, 2);
        assert!(ins.is_empty());
    }

    #[test]
    fn pendant_pair_rule_test() {
        let graph = WeightedGraph::from_edges(vec![2, 2, 2, 2, 1, 10, 10],
            &[(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (0, 5), (1, 6), (5, 6)]).unwrap();
        let mut ins = WVCInstance::new(graph);
        assert!(ins.pendant_pair_rule());
        assert_eq!(ins.solution, ins.graph.cover_from(vec![0, 1]));
        assert_eq!(ins.nodes().collect::<Vec<_>>(), vec![5, 6]);
        assert!(ins.graph.has_edge(5, 6));
        assert!(!ins.pendant_pair_rule());
    }

    #[test]
    fn pendant_pair_too_heavy_test() {
        let graph = WeightedGraph::from_edges(vec![3, 3, 2, 2, 1],
            &[(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4)]).unwrap();
        let mut ins = WVCInstance::new(graph);
        assert!(!ins.pendant_pair_rule());
        assert_eq!(ins.num_nodes(), 5);
    }

    #[test]
    fn exhaustive_rules_test() {
        // a path 0-1-2-3-4 with unit weights and an isolated vertex 5
        let graph = WeightedGraph::from_edges(vec![1; 6], &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let mut ins = WVCInstance::new(graph.copy());
        ins.exhaustive_rules(ALL_RULES);
        assert!(ins.is_empty());
        assert_eq!(ins.solution_weight, 2);
        assert!(graph.is_vertex_cover(&ins.solution));
    }
}
