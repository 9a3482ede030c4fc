use crate::graph::WeightedGraph;

/// Returns the weight of a minimum weight vertex cover by trying every subset.
pub(crate) fn brute_force_optimum(graph: &WeightedGraph) -> u64 {
    let n = graph.num_vertices();
    assert!(n <= 20, "brute force is meant for tiny graphs");
    let edges: Vec<(usize, usize)> = graph.edges().collect();
    (0u32..(1u32 << n))
        .filter(|mask| edges.iter().all(|(u, v)| mask & (1u32 << *u) != 0 || mask & (1u32 << *v) != 0))
        .map(|mask| (0..n).filter(|v| mask & (1u32 << *v) != 0).map(|v| graph.weight(v)).sum::<u64>())
        .min()
        .unwrap_or(0)
}
