//! Closure systems and the algorithms common to all of them.
//!
//! A closure system is a ground set of elements together with an operator
//! `cl` that is *extensive* (`S ⊆ cl(S)`), *monotone*
//! (`S ⊆ T ⇒ cl(S) ⊆ cl(T)`), and *idempotent* (`cl(cl(S)) = cl(S)`).
//! The [`ClosureSystem`] trait captures exactly two primitives,
//! enumerating the elements and closing a set; everything else is
//! provided by free-standing generic algorithms:
//!
//! - [`next_closure`] / [`all_closures`] - the Ganter/Wille *Next-Closure*
//!   enumeration of all closed sets in lectic order
//! - [`precedence_graph`] - the directed graph with an edge `a → b`
//!   whenever `a ∈ cl({b})`
//! - [`reducible_elements`] - detection of elements whose removal leaves
//!   the closed-set lattice unchanged up to isomorphism
//!
//! Two concrete systems are provided: [`Context`] (a binary relation
//! between observations and attributes, closed under `intent ∘ extent`)
//! and [`ImplicationalSystem`] (production rules, closed under saturation).

mod context;
mod implications;

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use crate::graph::{algorithms, Dgraph, NodeId};
use crate::set::{Element, ElementSet};

pub use context::Context;
pub use implications::{Implication, ImplicationalSystem};

/// A set of elements with a closure operator.
///
/// Implementations supply only the two primitives; the enumeration and
/// reduction algorithms of this module are derived from them. The operator
/// must be extensive, monotone, and idempotent, and must only return
/// subsets of [`elements`](Self::elements).
pub trait ClosureSystem {
    /// The element type of the ground set.
    type Elem: Element;

    /// Returns the ground set of the system.
    fn elements(&self) -> &ElementSet<Self::Elem>;

    /// Returns the closure of `set`.
    fn closure(&self, set: &ElementSet<Self::Elem>) -> ElementSet<Self::Elem>;
}

/// Returns the lectically next closed set after `current`, or `None` if
/// `current` is the lectically last one.
///
/// This is the Next-Closure step of Ganter and Wille: elements are tried
/// in descending order; removing trailing members and closing over the
/// next untried element yields a candidate, which is accepted exactly when
/// the closure introduced no element smaller than the one tried.
///
/// Starting from `cl(∅)` and iterating until `None` visits every closed
/// set exactly once, in strictly increasing lectic order. The `None`
/// signal at the top set is the termination condition; no revisit can
/// occur.
///
/// # Complexity
///
/// O(|E| · T_cl) per step, where T_cl is the cost of one closure.
pub fn next_closure<C: ClosureSystem>(
    system: &C,
    current: &ElementSet<C::Elem>,
) -> Option<ElementSet<C::Elem>> {
    let mut working = current.clone();
    for element in system.elements().iter().rev() {
        if working.contains(element) {
            working.remove(element);
            continue;
        }
        let mut candidate = working.clone();
        candidate.insert(element.clone());
        let closed = system.closure(&candidate);
        // Accept unless the closure introduced an element smaller than the
        // one just tried.
        let admissible = closed
            .iter()
            .all(|member| member >= element || working.contains(member));
        if admissible {
            return Some(closed);
        }
    }
    None
}

/// Returns every closed set of the system, in lectic order.
///
/// The first entry is `cl(∅)`; the last is the closure of the full ground
/// set. The sequence is strictly increasing under the lectic order of
/// [`ElementSet`].
pub fn all_closures<C: ClosureSystem>(system: &C) -> Vec<ElementSet<C::Elem>> {
    let mut current = system.closure(&ElementSet::new());
    let mut closures = vec![current.clone()];
    while let Some(next) = next_closure(system, &current) {
        closures.push(next.clone());
        current = next;
    }
    closures
}

/// Builds the precedence graph of the system.
///
/// Nodes are the elements; an edge `a → b` exists whenever `a` belongs to
/// `cl({b})` and `a ≠ b`. An acyclic precedence graph means the system is
/// already reduced: no element is closure-equivalent to another.
pub fn precedence_graph<C: ClosureSystem>(system: &C) -> Dgraph<C::Elem> {
    let mut graph: Dgraph<C::Elem> = Dgraph::new();
    let mut node_of: FxHashMap<C::Elem, NodeId> = FxHashMap::default();
    for element in system.elements() {
        node_of.insert(element.clone(), graph.add_node(element.clone()));
    }
    for target in system.elements() {
        let closed = system.closure(&ElementSet::singleton(target.clone()));
        for source in &closed {
            if source == target {
                continue;
            }
            if let (Some(&from), Some(&to)) = (node_of.get(source), node_of.get(target)) {
                graph.add_edge(from, to);
            }
        }
    }
    graph
}

/// Computes the reducible elements of the system, mapped to the sets they
/// are equivalent to.
///
/// A reducible element is closure-equivalent to other elements (or to the
/// empty set) and can be removed without changing the closed-set lattice
/// up to isomorphism. Detection runs on the [`precedence_graph`]:
///
/// 1. Every strongly connected component of size > 1 is a class of
///    pairwise equivalent elements; its minimum is kept as representative
///    and the others map to `{representative}`.
/// 2. If, discounting the casualties of step 1, exactly one node without
///    predecessors remains and its singleton closure equals `cl(∅)`, its
///    element is equivalent to the empty set and maps to `∅`. When several
///    such nodes remain nothing is done: none of them can be singled out.
/// 3. Each surviving element with at least two surviving predecessors `P`
///    whose singleton closure equals `cl(P)` maps to `P`.
pub fn reducible_elements<C: ClosureSystem>(
    system: &C,
) -> BTreeMap<C::Elem, ElementSet<C::Elem>> {
    let graph = precedence_graph(system);
    let mut rubbish: BTreeSet<NodeId> = BTreeSet::new();
    let mut reduced: BTreeMap<C::Elem, ElementSet<C::Elem>> = BTreeMap::new();

    // Equivalence classes: strongly connected components of size > 1.
    for component in algorithms::strongly_connected_components(&graph) {
        if component.len() <= 1 {
            continue;
        }
        let mut members: Vec<(C::Elem, NodeId)> = component
            .iter()
            .filter_map(|&id| graph.node(id).map(|e| (e.clone(), id)))
            .collect();
        members.sort();
        if let Some((representative, _)) = members.first().cloned() {
            for (element, id) in members.into_iter().skip(1) {
                rubbish.insert(id);
                reduced.insert(element, ElementSet::singleton(representative.clone()));
            }
        }
    }

    // An element equivalent to the empty set: the unique surviving node
    // without predecessors, if there is exactly one and its closure really
    // is the closure of the empty set.
    let candidates: Vec<NodeId> = graph
        .sources()
        .filter(|id| !rubbish.contains(id))
        .collect();
    if candidates.len() == 1 {
        if let Some(element) = graph.node(candidates[0]) {
            let singleton_closure = system.closure(&ElementSet::singleton(element.clone()));
            if singleton_closure == system.closure(&ElementSet::new()) {
                reduced.insert(element.clone(), ElementSet::new());
                rubbish.insert(candidates[0]);
            }
        }
    }

    // An element equivalent to its surviving predecessors.
    for id in graph.node_ids() {
        if rubbish.contains(&id) {
            continue;
        }
        let surviving: Vec<NodeId> = graph
            .predecessors(id)
            .filter(|p| !rubbish.contains(p))
            .collect();
        if surviving.len() < 2 {
            continue;
        }
        let Some(element) = graph.node(id) else {
            continue;
        };
        let predecessors: ElementSet<C::Elem> = surviving
            .iter()
            .filter_map(|&p| graph.node(p).cloned())
            .collect();
        let singleton_closure = system.closure(&ElementSet::singleton(element.clone()));
        if singleton_closure == system.closure(&predecessors) {
            reduced.insert(element.clone(), predecessors);
        }
    }

    reduced
}
