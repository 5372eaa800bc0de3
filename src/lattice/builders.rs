//! Lattice construction from a closure system.
//!
//! Two builders with the same node set and the same order, differing in
//! which edges they materialize:
//!
//! - [`complete_lattice`] enumerates all closed sets with Next-Closure and
//!   adds an edge for *every* strict inclusion between intents. The result
//!   is transitively closed.
//! - [`diagram_lattice`] is an adaptation of Bordat's algorithm: it
//!   discovers each concept's covers directly, producing the Hasse diagram
//!   without an O(c²) transitive-reduction pass.
//!
//! Both direct their edges from the concept with the smaller intent to the
//! concept with the larger intent, making `cl(∅)` the unique source.
//! Reducing the complete lattice yields exactly the diagram, which the
//! integration tests assert.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::closure::{all_closures, ClosureSystem};
use crate::graph::{Dgraph, NodeId};
use crate::lattice::{Concept, ConceptLattice};
use crate::set::ElementSet;

/// Builds the transitively closed lattice of all closed sets.
///
/// Concepts carry intents only; complete them through
/// [`ConceptLattice::complete_with`] when extents are wanted. An edge
/// `c → d` exists for every pair with `intent(c) ⊊ intent(d)`.
///
/// # Complexity
///
/// O(c · |E| · T_cl) for the enumeration plus O(c²) subset tests for the
/// edges, where c is the number of concepts.
#[must_use]
pub fn complete_lattice<C: ClosureSystem>(system: &C) -> ConceptLattice<C::Elem> {
    let closures = all_closures(system);
    let mut graph: Dgraph<Concept<C::Elem>> = Dgraph::new();
    let ids: Vec<NodeId> = closures
        .iter()
        .map(|closed| graph.add_node(Concept::Intent(closed.clone())))
        .collect();

    for (i, smaller) in closures.iter().enumerate() {
        for (j, larger) in closures.iter().enumerate() {
            // Distinct closed sets, so subset means strict subset.
            if i != j && smaller.is_subset(larger) {
                graph.add_edge(ids[i], ids[j]);
            }
        }
    }

    ConceptLattice::from_graph(graph)
}

/// Builds the Hasse diagram of the closed-set lattice.
///
/// Bordat-style construction: a worklist starts at the bottom concept
/// `cl(∅)`. For each concept `X` popped, the candidate successors are the
/// distinct closures `cl(X ∪ {e})` over the elements outside `X`; the
/// inclusion-minimal candidates are exactly the covers of `X`. Each cover
/// receives one edge; unseen covers join the worklist, deduplicated
/// through a map keyed by the closed set.
///
/// The result contains every concept exactly once and no transitive
/// shortcut edges.
///
/// # Complexity
///
/// O(c · |E| · T_cl) where c is the number of concepts.
#[must_use]
pub fn diagram_lattice<C: ClosureSystem>(system: &C) -> ConceptLattice<C::Elem> {
    let mut graph: Dgraph<Concept<C::Elem>> = Dgraph::new();
    let mut node_of: FxHashMap<ElementSet<C::Elem>, NodeId> = FxHashMap::default();
    let mut worklist: VecDeque<NodeId> = VecDeque::new();

    let bottom = system.closure(&ElementSet::new());
    let bottom_id = graph.add_node(Concept::Intent(bottom.clone()));
    node_of.insert(bottom, bottom_id);
    worklist.push_back(bottom_id);

    while let Some(current_id) = worklist.pop_front() {
        let current = match graph.node(current_id) {
            Some(concept) => concept.identity().clone(),
            None => continue,
        };

        // Partition the outside elements by the closure they generate.
        let mut candidates: Vec<ElementSet<C::Elem>> = Vec::new();
        for element in system.elements() {
            if current.contains(element) {
                continue;
            }
            let mut augmented = current.clone();
            augmented.insert(element.clone());
            let closed = system.closure(&augmented);
            if !candidates.contains(&closed) {
                candidates.push(closed);
            }
        }

        // The covers of X are the inclusion-minimal candidate closures:
        // any non-minimal candidate strictly contains the closure of X
        // extended by one of its own elements, which is itself a
        // candidate.
        for cover in candidates
            .iter()
            .filter(|c| !candidates.iter().any(|o| o != *c && o.is_subset(c)))
        {
            let cover_id = match node_of.get(cover) {
                Some(&id) => id,
                None => {
                    let id = graph.add_node(Concept::Intent(cover.clone()));
                    node_of.insert(cover.clone(), id);
                    worklist.push_back(id);
                    id
                }
            };
            graph.add_edge(current_id, cover_id);
        }
    }

    ConceptLattice::from_graph(graph)
}
