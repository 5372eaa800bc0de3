//! Directed-graph substrate.
//!
//! This module provides the mutable directed graph that the
//! precedence-graph reducer, the lattice builders, and the DOT
//! serializers all consume, together with its algorithms.
//!
//! # Structure
//!
//! - [`NodeId`] - strongly-typed node identifier, stable for the graph's
//!   lifetime (identifiers are never reused, even after removals)
//! - [`Dgraph`] - directed graph with node payloads and optional edge
//!   labels; adjacency maintained in both directions; at most one edge per
//!   ordered node pair
//! - [`Dag`] - an acyclicity-checked wrapper exposing the operations that
//!   are only defined on DAGs: topological sorting, transitive reduction,
//!   and the order filters
//! - [`algorithms`] - free-standing algorithms (Tarjan SCC, Kahn
//!   topological sort) parameterized over the small traits below, so they
//!   run on anything that can enumerate nodes and adjacency
//!
//! # Examples
//!
//! ```rust,ignore
//! use lattix::graph::Dgraph;
//!
//! let mut graph: Dgraph<&str> = Dgraph::new();
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! assert!(graph.add_edge(a, b));
//! assert!(!graph.add_edge(a, b)); // parallel identical edges are refused
//! ```

pub mod algorithms;
mod dag;
mod directed;
mod node;
mod traits;

pub use dag::Dag;
pub use directed::Dgraph;
pub use node::NodeId;
pub use traits::{GraphBase, Predecessors, Successors};
