//! Strongly connected components via Tarjan's algorithm.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{NodeId, Successors};

/// Computes the strongly connected components of a directed graph.
///
/// A strongly connected component is a maximal set of nodes in which every
/// node reaches every other. Single nodes without a self-cycle form
/// trivial components of size one.
///
/// The implementation is Tarjan's single-pass algorithm, run iteratively
/// with an explicit frame stack. Node identifiers may be sparse after
/// removals, so the per-node bookkeeping lives in hash maps rather than
/// dense vectors.
///
/// # Returns
///
/// The components as vectors of node identifiers, in **reverse
/// topological order** of the condensation: if any edge leads from
/// component A to component B, then B appears before A.
///
/// # Complexity
///
/// O(V + E) time, O(V) space.
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::graph::{Dgraph, algorithms::strongly_connected_components};
///
/// let mut graph: Dgraph<char> = Dgraph::new();
/// let a = graph.add_node('a');
/// let b = graph.add_node('b');
/// let c = graph.add_node('c');
/// graph.add_edge(a, b);
/// graph.add_edge(b, c);
/// graph.add_edge(c, a);
///
/// let sccs = strongly_connected_components(&graph);
/// assert_eq!(sccs.len(), 1);
/// assert_eq!(sccs[0].len(), 3);
/// ```
pub fn strongly_connected_components<G>(graph: &G) -> Vec<Vec<NodeId>>
where
    G: Successors,
{
    let mut state = TarjanState::default();
    for node in graph.node_ids() {
        if !state.index.contains_key(&node) {
            state.visit(graph, node);
        }
    }
    state.sccs
}

/// One entry of the explicit DFS stack.
struct Frame {
    node: NodeId,
    succs: Vec<NodeId>,
    next: usize,
}

/// Bookkeeping for Tarjan's algorithm.
#[derive(Default)]
struct TarjanState {
    /// Discovery index per visited node.
    index: FxHashMap<NodeId, usize>,
    /// Smallest discovery index reachable through the DFS subtree plus one
    /// back edge.
    lowlink: FxHashMap<NodeId, usize>,
    /// Nodes currently on the component stack.
    on_stack: FxHashSet<NodeId>,
    /// The component stack.
    stack: Vec<NodeId>,
    /// Next discovery index.
    counter: usize,
    /// Collected components, reverse topological order.
    sccs: Vec<Vec<NodeId>>,
}

impl TarjanState {
    fn open<G: Successors>(&mut self, graph: &G, node: NodeId) -> Frame {
        self.index.insert(node, self.counter);
        self.lowlink.insert(node, self.counter);
        self.counter += 1;
        self.stack.push(node);
        self.on_stack.insert(node);
        Frame {
            node,
            succs: graph.successors(node).collect(),
            next: 0,
        }
    }

    fn visit<G: Successors>(&mut self, graph: &G, root: NodeId) {
        let first = self.open(graph, root);
        let mut frames = vec![first];

        while let Some(top) = frames.last_mut() {
            let node = top.node;
            let pending = if top.next < top.succs.len() {
                let succ = top.succs[top.next];
                top.next += 1;
                Some(succ)
            } else {
                None
            };

            match pending {
                Some(succ) => {
                    if !self.index.contains_key(&succ) {
                        let frame = self.open(graph, succ);
                        frames.push(frame);
                    } else if self.on_stack.contains(&succ) {
                        let reached = self.index[&succ];
                        if let Some(low) = self.lowlink.get_mut(&node) {
                            if reached < *low {
                                *low = reached;
                            }
                        }
                    }
                }
                None => {
                    frames.pop();
                    if self.lowlink[&node] == self.index[&node] {
                        let mut component = Vec::new();
                        while let Some(member) = self.stack.pop() {
                            self.on_stack.remove(&member);
                            component.push(member);
                            if member == node {
                                break;
                            }
                        }
                        self.sccs.push(component);
                    }
                    if let Some(parent) = frames.last() {
                        let parent_node = parent.node;
                        let child_low = self.lowlink[&node];
                        if let Some(low) = self.lowlink.get_mut(&parent_node) {
                            if child_low < *low {
                                *low = child_low;
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dgraph;
    use std::collections::HashSet;

    #[test]
    fn test_scc_empty_graph() {
        let graph: Dgraph<()> = Dgraph::new();
        assert!(strongly_connected_components(&graph).is_empty());
    }

    #[test]
    fn test_scc_single_node() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs, vec![vec![a]]);
    }

    #[test]
    fn test_scc_self_loop_is_singleton() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        graph.add_edge(a, a);
        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs, vec![vec![a]]);
    }

    #[test]
    fn test_scc_chain_reverse_topological() {
        let mut graph: Dgraph<char> = Dgraph::new();
        let a = graph.add_node('a');
        let b = graph.add_node('b');
        let c = graph.add_node('c');
        graph.add_edge(a, b);
        graph.add_edge(b, c);

        let sccs = strongly_connected_components(&graph);
        let heads: Vec<NodeId> = sccs.iter().map(|scc| scc[0]).collect();
        assert_eq!(heads, vec![c, b, a]);
    }

    #[test]
    fn test_scc_cycle() {
        let mut graph: Dgraph<char> = Dgraph::new();
        let a = graph.add_node('a');
        let b = graph.add_node('b');
        let c = graph.add_node('c');
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        graph.add_edge(c, a);

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 1);
        let members: HashSet<NodeId> = sccs[0].iter().copied().collect();
        assert_eq!(members, HashSet::from([a, b, c]));
    }

    #[test]
    fn test_scc_two_cycles_connected() {
        // a <-> b -> c <-> d
        let mut graph: Dgraph<char> = Dgraph::new();
        let a = graph.add_node('a');
        let b = graph.add_node('b');
        let c = graph.add_node('c');
        let d = graph.add_node('d');
        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.add_edge(b, c);
        graph.add_edge(c, d);
        graph.add_edge(d, c);

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 2);
        // {c, d} drains first (reverse topological order).
        let first: HashSet<NodeId> = sccs[0].iter().copied().collect();
        assert_eq!(first, HashSet::from([c, d]));
    }

    #[test]
    fn test_scc_survives_node_removal() {
        // Sparse identifiers: remove a node, then analyze.
        let mut graph: Dgraph<char> = Dgraph::new();
        let a = graph.add_node('a');
        let b = graph.add_node('b');
        let gone = graph.add_node('x');
        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.remove_node(gone);

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 2);
    }

    #[test]
    fn test_scc_large_cycle() {
        let mut graph: Dgraph<usize> = Dgraph::new();
        let nodes: Vec<NodeId> = (0..100).map(|i| graph.add_node(i)).collect();
        for i in 0..100 {
            graph.add_edge(nodes[i], nodes[(i + 1) % 100]);
        }

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 100);
    }
}
