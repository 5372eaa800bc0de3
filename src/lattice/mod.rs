//! Concepts and concept lattices.
//!
//! A *concept* of a context is a maximal pair `(A, B)` with
//! `B = extent(A)` and `A = intent(B)`. During enumeration only one side
//! is known, so [`Concept`] is a tagged variant over the three population
//! states; identity always derives from the side that is present.
//!
//! A [`ConceptLattice`] is a directed graph whose nodes are concepts and
//! whose edges encode the order on intents. The direction is fixed
//! throughout the crate: **edges point from the concept with the smaller
//! intent to the concept with the larger intent**, so the closure of the
//! empty set is the unique source and the full closure the unique sink.
//! Depending on the builder used, the edge set is either the covering
//! (Hasse) relation or the full transitively closed order; see
//! [`builders`].

pub mod builders;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::graph::{algorithms, Dgraph, NodeId};
use crate::set::{Element, ElementSet};

/// A concept: a pair of element sets of which one or both sides are
/// populated.
///
/// Identity (equality, hashing, and the lectic ordering) derives from
/// the attribute side when it is present, and from the observation side
/// otherwise. A [`Full`](Concept::Full) concept compares by its intent.
#[derive(Debug, Clone)]
pub enum Concept<E: Element> {
    /// Only the attribute side is populated.
    Intent(ElementSet<E>),
    /// Only the observation side is populated.
    Extent(ElementSet<E>),
    /// Both sides are populated; for a concept of a context,
    /// `extent = extent(intent)` and `intent = intent(extent)`.
    Full {
        /// The attribute side.
        intent: ElementSet<E>,
        /// The observation side.
        extent: ElementSet<E>,
    },
}

impl<E: Element> Concept<E> {
    /// Returns the attribute side, if populated.
    #[must_use]
    pub fn intent(&self) -> Option<&ElementSet<E>> {
        match self {
            Concept::Intent(intent) | Concept::Full { intent, .. } => Some(intent),
            Concept::Extent(_) => None,
        }
    }

    /// Returns the observation side, if populated.
    #[must_use]
    pub fn extent(&self) -> Option<&ElementSet<E>> {
        match self {
            Concept::Extent(extent) | Concept::Full { extent, .. } => Some(extent),
            Concept::Intent(_) => None,
        }
    }

    /// Returns `true` if both sides are populated.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Concept::Full { .. })
    }

    /// Returns the set that identity derives from: the intent when
    /// present, the extent otherwise.
    #[must_use]
    pub fn identity(&self) -> &ElementSet<E> {
        match self {
            Concept::Intent(intent) | Concept::Full { intent, .. } => intent,
            Concept::Extent(extent) => extent,
        }
    }
}

impl<E: Element> PartialEq for Concept<E> {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl<E: Element> Eq for Concept<E> {}

impl<E: Element> Hash for Concept<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl<E: Element> PartialOrd for Concept<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Element> Ord for Concept<E> {
    /// Lectic order on the identity sets.
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(other.identity())
    }
}

impl<E: Element> fmt::Display for Concept<E> {
    /// Formats half concepts as their set, full concepts as
    /// `({intent}, {extent})`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concept::Intent(set) | Concept::Extent(set) => write!(f, "{set}"),
            Concept::Full { intent, extent } => write!(f, "({intent}, {extent})"),
        }
    }
}

/// A lattice of concepts, materialized as a directed graph.
///
/// Produced by the builders in [`builders`]; edges always point from
/// smaller to larger intent. The wrapper adds the order-theoretic
/// accessors that plain graphs lack: the bottom and top concepts, the
/// height, and lookup by closed set.
pub struct ConceptLattice<E: Element> {
    graph: Dgraph<Concept<E>>,
}

impl<E: Element> ConceptLattice<E> {
    /// Wraps a graph produced by one of the builders.
    pub(crate) fn from_graph(graph: Dgraph<Concept<E>>) -> Self {
        ConceptLattice { graph }
    }

    /// Returns the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Dgraph<Concept<E>> {
        &self.graph
    }

    /// Returns the number of concepts.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of order edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all concepts with their node identifiers.
    pub fn concepts(&self) -> impl Iterator<Item = (NodeId, &Concept<E>)> + '_ {
        self.graph.nodes()
    }

    /// Returns the node whose concept identity equals `set`, if any.
    #[must_use]
    pub fn find(&self, set: &ElementSet<E>) -> Option<NodeId> {
        self.graph
            .nodes()
            .find(|(_, concept)| concept.identity() == set)
            .map(|(id, _)| id)
    }

    /// Returns the bottom concept: the unique node without predecessors.
    #[must_use]
    pub fn bottom(&self) -> Option<NodeId> {
        self.graph.sources().next()
    }

    /// Returns the top concept: the unique node without successors.
    #[must_use]
    pub fn top(&self) -> Option<NodeId> {
        self.graph.sinks().next()
    }

    /// Returns the number of concepts on a longest chain from bottom to
    /// top, counting both ends. The empty lattice has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        let Some(order) = algorithms::topological_sort(&self.graph) else {
            return 0;
        };
        let mut depth: FxHashMap<NodeId, usize> = FxHashMap::default();
        let mut best = 0;
        for node in order {
            let longest_predecessor = self
                .graph
                .predecessors(node)
                .filter_map(|p| depth.get(&p).copied())
                .max()
                .unwrap_or(0);
            let here = longest_predecessor + 1;
            depth.insert(node, here);
            best = best.max(here);
        }
        best
    }

    /// Completes every intent-only node to a full concept using the given
    /// extent function.
    ///
    /// Used by [`Context::concept_lattice`](crate::Context::concept_lattice)
    /// with `extent_of`; nodes that already carry both sides are left
    /// untouched.
    pub fn complete_with<F>(&mut self, extent_of: F)
    where
        F: Fn(&ElementSet<E>) -> ElementSet<E>,
    {
        let ids: Vec<NodeId> = self.graph.node_ids().collect();
        for id in ids {
            let replacement = match self.graph.node(id) {
                Some(Concept::Intent(intent)) => {
                    let extent = extent_of(intent);
                    Some(Concept::Full {
                        intent: intent.clone(),
                        extent,
                    })
                }
                _ => None,
            };
            if let (Some(full), Some(slot)) = (replacement, self.graph.node_mut(id)) {
                *slot = full;
            }
        }
    }
}

impl<E: Element> fmt::Debug for ConceptLattice<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConceptLattice")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .finish()
    }
}
