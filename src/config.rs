//! Parameters of the solving strategies.

use crate::cust_error::ProcessingError;
use crate::reduction::{Rule, ALL_RULES};

#[derive(Debug, Clone, PartialEq)]
pub struct BranchAndBoundConfig {
    /// Prune with the clique packing lower bound in addition to the weight of the partial
    /// solution.
    pub use_lower_bound: bool,
    /// Reduction rules applied in every search node, in priority order.
    pub rules: Vec<Rule>,
}

impl Default for BranchAndBoundConfig {
    fn default() -> Self {
        BranchAndBoundConfig {
            use_lower_bound: true,
            rules: ALL_RULES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchConfig {
    pub max_iterations: usize,
    /// The search stops after `stagnation_fraction * max_iterations` iterations without a lighter
    /// cover. `1.0` never stops early.
    pub stagnation_fraction: f64,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        LocalSearchConfig {
            max_iterations: 1_000_000,
            stagnation_fraction: 0.1,
        }
    }
}

impl LocalSearchConfig {
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        LocalSearchConfig { max_iterations, ..Self::default() }
    }

    pub fn stagnation_limit(&self) -> usize {
        (self.max_iterations as f64 * self.stagnation_fraction).ceil() as usize
    }

    pub fn validate(&self) -> Result<(), ProcessingError> {
        if !(self.stagnation_fraction > 0.0 && self.stagnation_fraction <= 1.0) {
            return Err(ProcessingError::InvalidParameter(
                format!("stagnation_fraction has to be in (0, 1], got {}", self.stagnation_fraction)))
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraspConfig {
    /// Number of best candidates the randomized greedy construction picks from.
    pub candidate_list_size: usize,
    /// Size of the initial population, also the sample size for the fixed set.
    pub initial_population_size: usize,
    /// Target size of the population.
    pub max_solutions: usize,
    /// Generations without improvement before the fixed set size changes.
    pub stagnation_limit: usize,
    /// Hard cap on generations, duplicates do not grow the population.
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for GraspConfig {
    fn default() -> Self {
        GraspConfig {
            candidate_list_size: 5,
            initial_population_size: 100,
            max_solutions: 5000,
            stagnation_limit: 100,
            max_iterations: 2_000,
            seed: 42,
        }
    }
}

impl GraspConfig {
    pub fn validate(&self) -> Result<(), ProcessingError> {
        if self.candidate_list_size == 0 {
            return Err(ProcessingError::InvalidParameter("candidate_list_size has to be positive".to_owned()))
        }
        if self.initial_population_size == 0 {
            return Err(ProcessingError::InvalidParameter("initial_population_size has to be positive".to_owned()))
        }
        if self.max_solutions < self.initial_population_size {
            return Err(ProcessingError::InvalidParameter(
                "max_solutions has to be at least initial_population_size".to_owned()))
        }
        Ok(())
    }
}
