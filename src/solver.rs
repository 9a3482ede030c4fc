//! The contract shared by all solving strategies and a small harness around it.

use std::fmt;
use std::str::FromStr;
use log::info;
use crate::bounded_search::BranchAndReduce;
use crate::cust_error::ProcessingError;
use crate::fixed_set_search::FixedSetSearch;
use crate::graph::{Cover, WeightedGraph};
use crate::local_search::Dlswcc;
use crate::pricing::PricingMethod;
use crate::reporter::SolutionReporter;

/// A strategy that computes a (minimum) weight vertex cover.
pub trait WeightedVertexCoverSolver {

    /// The name the strategy is known by.
    fn name(&self) -> &'static str;

    /// Computes a vertex cover of `graph`. `on_improved` may be called with intermediate
    /// solutions; these do not have to be covers. `graph` is left untouched.
    fn solve(&mut self, graph: &WeightedGraph, on_improved: &mut dyn FnMut(&Cover)) -> Cover;
}

/// The available strategies.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Strategy {
    BranchAndReduce,
    LocalSearch,
    Pricing,
    FixedSetSearch,
}

pub const ALL_STRATEGIES: &[Strategy] = &[Strategy::BranchAndReduce, Strategy::LocalSearch, Strategy::Pricing, Strategy::FixedSetSearch];

impl Strategy {

    pub fn name(&self) -> &'static str {
        match self {
            Self::BranchAndReduce => "BMWVC",
            Self::LocalSearch => "DLSWCC",
            Self::Pricing => "PricingMethod",
            Self::FixedSetSearch => "FixedSetSearch",
        }
    }

    /// Builds the solver of this strategy with its default parameters.
    pub fn solver(&self) -> Box<dyn WeightedVertexCoverSolver + Send> {
        match self {
            Self::BranchAndReduce => Box::new(BranchAndReduce::default()),
            Self::LocalSearch => Box::new(Dlswcc::default()),
            Self::Pricing => Box::new(PricingMethod::default()),
            Self::FixedSetSearch => Box::new(FixedSetSearch::default()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Strategy {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STRATEGIES
            .iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ProcessingError::UnknownStrategy(s.to_owned()))
    }
}

/// Runs `solver` on a private copy of `graph`, forwards intermediate solutions to `reporter`
/// under `run_id` and records the returned cover as final.
///
/// Returns an error if the returned cover is not a vertex cover of `graph`. The reporter entry
/// is left non-final in that case.
pub fn run(
    solver: &mut dyn WeightedVertexCoverSolver,
    graph: &WeightedGraph,
    reporter: &SolutionReporter<Cover>,
    run_id: &str,
) -> Result<Cover, ProcessingError> {
    let graph = graph.copy();
    let mut callback = reporter.callback(run_id);
    let cover = solver.solve(&graph, &mut callback);
    if !graph.is_vertex_cover(&cover) {
        return Err(ProcessingError::InvalidSolution(
            format!("{} returned a set that leaves edges uncovered", solver.name())))
    }
    info!("{}: run {} finished with weight {}", solver.name(), run_id, graph.weight_of(&cover));
    reporter.report_solution(run_id, cover.clone(), true);
    Ok(cover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use crate::test_support::brute_force_optimum;

    fn triangle() -> WeightedGraph {
        WeightedGraph::from_edges(vec![1, 1, 1], &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    #[test]
    fn strategy_names_test() {
        for strategy in ALL_STRATEGIES {
            let parsed: Strategy = strategy.to_string().parse().unwrap();
            assert_eq!(&parsed, strategy);
            assert_eq!(strategy.solver().name(), strategy.name());
        }
        assert_eq!("dlswcc".parse::<Strategy>(), Ok(Strategy::LocalSearch));
        assert_eq!("tabu".parse::<Strategy>(), Err(ProcessingError::UnknownStrategy("tabu".to_owned())));
    }

    #[test]
    fn triangle_every_strategy_test() {
        let graph = triangle();
        for strategy in ALL_STRATEGIES {
            let cover = strategy.solver().solve(&graph, &mut |_: &Cover| {});
            assert!(graph.is_vertex_cover(&cover), "{}", strategy);
            assert_eq!(graph.weight_of(&cover), 2, "{}", strategy);
            assert_eq!(cover.len(), 2, "{}", strategy);
        }
    }

    #[test]
    fn isolated_vertex_every_strategy_test() {
        let graph = WeightedGraph::with_unit_weights(1);
        for strategy in ALL_STRATEGIES {
            let cover = strategy.solver().solve(&graph, &mut |_: &Cover| {});
            assert!(cover.is_empty(), "{}", strategy);
        }
    }

    #[test]
    fn empty_graph_every_strategy_test() {
        let graph = WeightedGraph::with_unit_weights(0);
        for strategy in ALL_STRATEGIES {
            let cover = strategy.solver().solve(&graph, &mut |_: &Cover| {});
            assert!(cover.is_empty(), "{}", strategy);
        }
    }

    #[test]
    fn random_graphs_every_strategy_test() {
        for seed in 0..4 {
            let graph = WeightedGraph::generate(12, 0.3, seed);
            let optimum = brute_force_optimum(&graph);
            for strategy in ALL_STRATEGIES {
                let cover = strategy.solver().solve(&graph, &mut |_: &Cover| {});
                assert!(graph.is_vertex_cover(&cover), "{} seed {}", strategy, seed);
                let weight = graph.weight_of(&cover);
                assert!(weight >= optimum, "{} seed {}", strategy, seed);
                match strategy {
                    Strategy::BranchAndReduce => assert_eq!(weight, optimum, "seed {}", seed),
                    Strategy::Pricing => assert!(weight <= 2 * optimum, "seed {}", seed),
                    _ => {},
                }
            }
        }
    }

    #[test]
    fn solving_leaves_graph_untouched_test() {
        let graph = WeightedGraph::generate(15, 0.3, 3);
        let before = graph.copy();
        for strategy in ALL_STRATEGIES {
            strategy.solver().solve(&graph, &mut |_: &Cover| {});
            assert_eq!(graph, before, "{}", strategy);
        }
    }

    #[test]
    fn run_reports_final_test() {
        let graph = WeightedGraph::generate(14, 0.25, 11);
        let reporter = SolutionReporter::new();
        let mut solver = Strategy::BranchAndReduce.solver();
        let cover = run(solver.as_mut(), &graph, &reporter, "bmwvc-0").unwrap();
        let entry = reporter.get_solution("bmwvc-0").unwrap();
        assert!(entry.is_final);
        assert_eq!(entry.value, cover);
        assert!(reporter.get_solution("bmwvc-1").is_none());
    }

    #[test]
    fn parallel_runs_test() {
        let graph = WeightedGraph::generate(20, 0.2, 5);
        let reporter = SolutionReporter::new();
        thread::scope(|scope| {
            for strategy in ALL_STRATEGIES {
                let reporter = &reporter;
                let graph = &graph;
                scope.spawn(move || {
                    let mut solver = strategy.solver();
                    run(solver.as_mut(), graph, reporter, strategy.name()).unwrap();
                });
            }
        });
        for strategy in ALL_STRATEGIES {
            let entry = reporter.get_solution(strategy.name()).unwrap();
            assert!(entry.is_final);
            assert!(graph.is_vertex_cover(&entry.value));
        }
    }
}
