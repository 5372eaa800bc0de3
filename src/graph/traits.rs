//! Minimal traits the graph algorithms are written against.
//!
//! Algorithms only need to enumerate nodes and walk adjacency, so they are
//! generic over these three traits rather than tied to [`Dgraph`]. Both
//! [`Dgraph`] and [`Dag`] implement all of them.
//!
//! [`Dgraph`]: crate::graph::Dgraph
//! [`Dag`]: crate::graph::Dag

use crate::graph::NodeId;

/// Node enumeration.
pub trait GraphBase {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns an iterator over all node identifiers, ascending.
    fn node_ids(&self) -> impl Iterator<Item = NodeId>;
}

/// Forward adjacency.
pub trait Successors: GraphBase {
    /// Returns an iterator over the successors of `node`, ascending.
    ///
    /// Unknown nodes yield an empty iterator.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

/// Backward adjacency.
pub trait Predecessors: GraphBase {
    /// Returns an iterator over the predecessors of `node`, ascending.
    ///
    /// Unknown nodes yield an empty iterator.
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}
