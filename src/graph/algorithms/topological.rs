//! Topological sorting with deterministic tie-breaking.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::graph::{NodeId, Predecessors, Successors};

/// Computes a topological ordering of the graph, if one exists.
///
/// Kahn's algorithm, with the ready queue kept as a min-heap so that nodes
/// whose predecessors are all emitted are released in **ascending
/// identifier order**. The result is therefore a single canonical ordering
/// rather than one of many valid ones.
///
/// # Returns
///
/// `Some(order)` if the graph is acyclic, `None` if it contains a cycle.
///
/// # Complexity
///
/// O(V + E + V log V); the logarithmic factor pays for the tie-break.
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::graph::{Dgraph, algorithms::topological_sort};
///
/// let mut graph: Dgraph<&str> = Dgraph::new();
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// graph.add_edge(a, b);
/// assert_eq!(topological_sort(&graph), Some(vec![a, b]));
///
/// graph.add_edge(b, a);
/// assert_eq!(topological_sort(&graph), None);
/// ```
pub fn topological_sort<G>(graph: &G) -> Option<Vec<NodeId>>
where
    G: Successors + Predecessors,
{
    let mut in_degree: FxHashMap<NodeId, usize> = graph
        .node_ids()
        .map(|node| (node, graph.predecessors(node).count()))
        .collect();

    let mut ready: BinaryHeap<Reverse<NodeId>> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&node, _)| Reverse(node))
        .collect();

    let mut order = Vec::with_capacity(in_degree.len());
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for successor in graph.successors(node) {
            if let Some(degree) = in_degree.get_mut(&successor) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(successor));
                }
            }
        }
    }

    if order.len() == in_degree.len() {
        Some(order)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dgraph;

    #[test]
    fn test_empty_graph() {
        let graph: Dgraph<()> = Dgraph::new();
        assert_eq!(topological_sort(&graph), Some(Vec::new()));
    }

    #[test]
    fn test_linear_chain() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b);
        graph.add_edge(b, c);

        assert_eq!(topological_sort(&graph), Some(vec![a, b, c]));
    }

    #[test]
    fn test_tie_break_by_identifier() {
        // c and a are both ready from the start; a must be emitted first.
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(c, b);
        graph.add_edge(a, b);

        assert_eq!(topological_sort(&graph), Some(vec![a, c, b]));
    }

    #[test]
    fn test_cycle_detected() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b);
        graph.add_edge(b, a);

        assert_eq!(topological_sort(&graph), None);
    }

    #[test]
    fn test_self_loop_detected() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        graph.add_edge(a, a);

        assert_eq!(topological_sort(&graph), None);
    }

    #[test]
    fn test_diamond_constraints() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let d = graph.add_node(());
        graph.add_edge(a, b);
        graph.add_edge(a, c);
        graph.add_edge(b, d);
        graph.add_edge(c, d);

        assert_eq!(topological_sort(&graph), Some(vec![a, b, c, d]));
    }

    #[test]
    fn test_after_node_removal() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let gone = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, gone);
        graph.add_edge(gone, b);
        graph.remove_node(gone);

        // a and b are disconnected now; ascending identifiers.
        assert_eq!(topological_sort(&graph), Some(vec![a, b]));
    }
}
