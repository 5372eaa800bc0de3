//! Acyclicity-checked graph wrapper.

use std::collections::BTreeSet;

use crate::graph::{algorithms, Dgraph, GraphBase, NodeId, Predecessors, Successors};
use crate::{Error, Result};

/// A directed graph guaranteed to be acyclic.
///
/// The constructor verifies acyclicity once; the DAG-only operations
/// (topological sorting, transitive reduction, the order filters) then
/// cannot fail. Requesting them for a cyclic graph is
/// a programmer error surfaced as [`Error::Graph`] at construction.
///
/// `Dag` deliberately exposes no edge insertion of its own: build a
/// [`Dgraph`], then promote it. The [`graph`](Self::graph) accessor gives
/// read access to the underlying structure.
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::graph::{Dag, Dgraph};
///
/// let mut graph: Dgraph<&str> = Dgraph::new();
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// graph.add_edge(a, b);
///
/// let dag = Dag::new(graph)?;
/// assert_eq!(dag.topological_sort(), vec![a, b]);
/// # Ok::<(), lattix::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dag<N, L = ()> {
    graph: Dgraph<N, L>,
}

impl<N, L> Dag<N, L> {
    /// Promotes a directed graph to a DAG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Graph`] if the graph contains a cycle.
    pub fn new(graph: Dgraph<N, L>) -> Result<Self> {
        if algorithms::topological_sort(&graph).is_none() {
            return Err(Error::Graph(
                "graph contains a cycle; expected a DAG".to_string(),
            ));
        }
        Ok(Dag { graph })
    }

    /// Wraps a graph that is acyclic by construction.
    pub(crate) fn new_unchecked(graph: Dgraph<N, L>) -> Self {
        Dag { graph }
    }

    /// Returns the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Dgraph<N, L> {
        &self.graph
    }

    /// Consumes the wrapper and returns the underlying graph.
    #[must_use]
    pub fn into_inner(self) -> Dgraph<N, L> {
        self.graph
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns a reference to the content of `node`, if it exists.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&N> {
        self.graph.node(node)
    }

    /// Returns a total order of the nodes consistent with the edges.
    ///
    /// Nodes that become available simultaneously are emitted in ascending
    /// identifier order, so the result is fully deterministic.
    #[must_use]
    pub fn topological_sort(&self) -> Vec<NodeId> {
        algorithms::topological_sort(&self.graph)
            .expect("acyclicity is established at construction")
    }

    /// Removes every edge `u → v` for which an alternative path from `u`
    /// to `v` exists, and returns the number of edges removed.
    ///
    /// The result is the Hasse diagram of the reachability order: the
    /// unique minimal graph with the same reachability relation.
    pub fn transitive_reduction(&mut self) -> usize {
        let edges: Vec<(NodeId, NodeId)> = self.graph.edges().map(|(u, v, _)| (u, v)).collect();
        let mut removed = 0;
        for (u, v) in edges {
            // In a DAG no path from an intermediate successor back through
            // the direct edge can exist, so checking the remaining
            // successors is enough. Removals preserve reachability, which
            // keeps the incremental check sound.
            let intermediates: Vec<NodeId> = self.graph.successors(u).filter(|&w| w != v).collect();
            let redundant = intermediates
                .iter()
                .any(|&w| self.graph.descendants(w).contains(&v));
            if redundant {
                self.graph.remove_edge(u, v);
                removed += 1;
            }
        }
        removed
    }

    /// Returns the sub-DAG induced by `node` and its descendants.
    ///
    /// Unknown nodes yield an empty DAG.
    #[must_use]
    pub fn filter(&self, node: NodeId) -> Self
    where
        N: Clone,
        L: Clone,
    {
        let mut keep: BTreeSet<NodeId> = self.graph.descendants(node);
        keep.insert(node);
        Dag::new_unchecked(self.graph.subgraph(&keep))
    }

    /// Returns the sub-DAG induced by `node` and its ancestors.
    ///
    /// Unknown nodes yield an empty DAG.
    #[must_use]
    pub fn ideal(&self, node: NodeId) -> Self
    where
        N: Clone,
        L: Clone,
    {
        let mut keep: BTreeSet<NodeId> = self.graph.ancestors(node);
        keep.insert(node);
        Dag::new_unchecked(self.graph.subgraph(&keep))
    }
}

impl<N, L> GraphBase for Dag<N, L> {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.graph.node_ids()
    }
}

impl<N, L> Successors for Dag<N, L> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.graph.successors(node)
    }
}

impl<N, L> Predecessors for Dag<N, L> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.graph.predecessors(node)
    }
}
