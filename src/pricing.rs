//! The pricing method: a primal-dual 2-approximation for the weighted vertex cover problem.
//!
//! Every edge gets a price, the price of a vertex is the sum of the prices of its edges. A vertex
//! is tight once its price equals its weight. Prices are raised on edges without a tight endpoint
//! until every edge has one; the tight vertices form the cover. As the edge prices never exceed
//! the weight of an optimal cover, and every tight vertex is paid for by its edges, the cover
//! weighs at most twice the optimum.

use bit_set::BitSet;
use fxhash::FxHashMap;
use log::info;
use crate::graph::{Cover, WeightedGraph};
use crate::solver::WeightedVertexCoverSolver;

#[derive(Debug, Clone, Copy, Default)]
pub struct PricingMethod;

impl PricingMethod {

    /// Runs the pricing method on `graph`.
    /// Returns the cover and the final price of every edge that was raised.
    pub fn price_edges(graph: &WeightedGraph, on_improved: &mut dyn FnMut(&Cover)) -> (Cover, FxHashMap<(usize, usize), u64>) {
        let n = graph.num_vertices();
        let mut vertex_prices = vec![0u64; n];
        let mut edge_prices = FxHashMap::default();
        let mut tight = BitSet::with_capacity(n);
        let mut cover = BitSet::with_capacity(n);
        let mut edges: Vec<(usize, usize)> = graph.edges().collect();
        edges.sort_unstable();
        // Tightness only grows, so one pass finds every edge that ever lacks a tight endpoint.
        for (u, v) in edges {
            if tight.contains(u) || tight.contains(v) {
                continue
            }
            let price = (graph.weight(u) - vertex_prices[u]).min(graph.weight(v) - vertex_prices[v]);
            vertex_prices[u] += price;
            vertex_prices[v] += price;
            edge_prices.insert((u, v), price);
            for node in [u, v] {
                if vertex_prices[node] == graph.weight(node) {
                    tight.insert(node);
                    cover.insert(node);
                }
            }
            on_improved(&cover);
        }
        (cover, edge_prices)
    }
}

impl WeightedVertexCoverSolver for PricingMethod {

    fn name(&self) -> &'static str {
        "PricingMethod"
    }

    fn solve(&mut self, graph: &WeightedGraph, on_improved: &mut dyn FnMut(&Cover)) -> Cover {
        let (cover, edge_prices) = Self::price_edges(graph, on_improved);
        info!("PricingMethod: cover of weight {}, total edge price {}",
            graph.weight_of(&cover), edge_prices.values().sum::<u64>());
        cover
    }
}
