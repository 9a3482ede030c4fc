pub mod cust_error;
pub mod graph;
pub mod reporter;
pub mod config;
pub mod solver;
pub mod wvc_instance;
pub mod reduction;
pub mod heuristics;
pub mod bounded_search;
pub mod local_search;
pub mod pricing;
pub mod fixed_set_search;

#[cfg(test)]
mod test_support;
