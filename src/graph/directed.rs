//! Core directed graph implementation.
//!
//! [`Dgraph`] is the primary graph structure of the crate. It differs from
//! a dense adjacency-list design in that nodes can be removed (the
//! precedence-graph reduction and induced subgraphs depend on it), so node
//! identifiers come from a never-reused counter and all storage is keyed by
//! [`NodeId`] in ordered maps. Every query iterates in ascending identifier
//! order, which keeps the algorithms downstream deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::{algorithms, Dag, GraphBase, NodeId, Predecessors, Successors};

/// A mutable directed graph with node payloads and optional edge labels.
///
/// # Type Parameters
///
/// * `N` - Content stored on each node
/// * `L` - Content optionally stored on edges (defaults to `()`)
///
/// # Invariants
///
/// - At most one edge exists per ordered pair of nodes; inserting a
///   parallel edge is refused with a `false` result.
/// - Successor and predecessor adjacency are always mutually consistent,
///   and consistent with the edge set, after every mutation.
/// - Node identifiers are stable for the lifetime of the graph.
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::graph::Dgraph;
///
/// let mut graph: Dgraph<&str> = Dgraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// graph.add_edge(a, b);
///
/// assert_eq!(graph.successors(a).collect::<Vec<_>>(), vec![b]);
/// assert_eq!(graph.predecessors(b).collect::<Vec<_>>(), vec![a]);
/// ```
#[derive(Debug, Clone)]
pub struct Dgraph<N, L = ()> {
    /// Node payloads, keyed by identifier.
    nodes: BTreeMap<NodeId, N>,
    /// Forward adjacency.
    succ: BTreeMap<NodeId, BTreeSet<NodeId>>,
    /// Backward adjacency.
    pred: BTreeMap<NodeId, BTreeSet<NodeId>>,
    /// Edge labels; a key being present means the edge exists.
    labels: BTreeMap<(NodeId, NodeId), Option<L>>,
    /// Next identifier to hand out. Never decremented.
    next_id: usize,
}

impl<N, L> Default for Dgraph<N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, L> Dgraph<N, L> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Dgraph {
            nodes: BTreeMap::new(),
            succ: BTreeMap::new(),
            pred: BTreeMap::new(),
            labels: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Adds a node with the given content and returns its identifier.
    pub fn add_node(&mut self, content: N) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, content);
        self.succ.insert(id, BTreeSet::new());
        self.pred.insert(id, BTreeSet::new());
        id
    }

    /// Returns a reference to the content of `node`, if it exists.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&N> {
        self.nodes.get(&node)
    }

    /// Returns a mutable reference to the content of `node`, if it exists.
    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(&node)
    }

    /// Returns `true` if `node` belongs to the graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all node identifiers, ascending.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Iterates over all nodes with their contents, ascending by identifier.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes.iter().map(|(&id, content)| (id, content))
    }

    /// Removes a node and every edge incident to it.
    ///
    /// Returns `true` if the node was present.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        if self.nodes.remove(&node).is_none() {
            return false;
        }
        for successor in self.succ.remove(&node).unwrap_or_default() {
            if let Some(back) = self.pred.get_mut(&successor) {
                back.remove(&node);
            }
            self.labels.remove(&(node, successor));
        }
        for predecessor in self.pred.remove(&node).unwrap_or_default() {
            if let Some(forward) = self.succ.get_mut(&predecessor) {
                forward.remove(&node);
            }
            self.labels.remove(&(predecessor, node));
        }
        true
    }

    /// Adds an unlabeled edge from `source` to `target`.
    ///
    /// Returns `true` if the edge was added; `false` if either endpoint is
    /// unknown or an edge between the two nodes already exists.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> bool {
        self.insert_edge(source, target, None)
    }

    /// Adds an edge carrying a label from `source` to `target`.
    ///
    /// Returns `true` if the edge was added; `false` if either endpoint is
    /// unknown or an edge between the two nodes already exists (the
    /// existing label is left untouched).
    pub fn add_labeled_edge(&mut self, source: NodeId, target: NodeId, label: L) -> bool {
        self.insert_edge(source, target, Some(label))
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, label: Option<L>) -> bool {
        if !self.contains_node(source)
            || !self.contains_node(target)
            || self.labels.contains_key(&(source, target))
        {
            return false;
        }
        self.labels.insert((source, target), label);
        if let Some(forward) = self.succ.get_mut(&source) {
            forward.insert(target);
        }
        if let Some(back) = self.pred.get_mut(&target) {
            back.insert(source);
        }
        true
    }

    /// Removes the edge from `source` to `target`.
    ///
    /// Returns `true` if the edge was present.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> bool {
        if self.labels.remove(&(source, target)).is_none() {
            return false;
        }
        if let Some(forward) = self.succ.get_mut(&source) {
            forward.remove(&target);
        }
        if let Some(back) = self.pred.get_mut(&target) {
            back.remove(&source);
        }
        true
    }

    /// Returns `true` if an edge from `source` to `target` exists.
    #[must_use]
    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.labels.contains_key(&(source, target))
    }

    /// Returns the label of the edge from `source` to `target`, if the edge
    /// exists and carries one.
    #[must_use]
    pub fn edge_label(&self, source: NodeId, target: NodeId) -> Option<&L> {
        self.labels.get(&(source, target)).and_then(Option::as_ref)
    }

    /// Iterates over all edges as `(source, target, label)`, ascending by
    /// source then target.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Option<&L>)> + '_ {
        self.labels
            .iter()
            .map(|(&(source, target), label)| (source, target, label.as_ref()))
    }

    /// Iterates over the successors of `node`, ascending.
    ///
    /// Unknown nodes yield an empty iterator.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.succ.get(&node).into_iter().flatten().copied()
    }

    /// Iterates over the predecessors of `node`, ascending.
    ///
    /// Unknown nodes yield an empty iterator.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.pred.get(&node).into_iter().flatten().copied()
    }

    /// Returns the number of outgoing edges of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.succ.get(&node).map_or(0, BTreeSet::len)
    }

    /// Returns the number of incoming edges of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.pred.get(&node).map_or(0, BTreeSet::len)
    }

    /// Iterates over the nodes with no predecessors, ascending.
    pub fn sources(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&n| self.in_degree(n) == 0)
    }

    /// Iterates over the nodes with no successors, ascending.
    pub fn sinks(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&n| self.out_degree(n) == 0)
    }

    /// Returns every node reachable from `node` through at least one edge.
    ///
    /// `node` itself is included only when it lies on a cycle.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> BTreeSet<NodeId> {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<NodeId> = self.successors(node).collect();
        while let Some(current) = stack.pop() {
            if visited.insert(current) {
                stack.extend(self.successors(current));
            }
        }
        visited
    }

    /// Returns every node that reaches `node` through at least one edge.
    ///
    /// `node` itself is included only when it lies on a cycle.
    #[must_use]
    pub fn ancestors(&self, node: NodeId) -> BTreeSet<NodeId> {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<NodeId> = self.predecessors(node).collect();
        while let Some(current) = stack.pop() {
            if visited.insert(current) {
                stack.extend(self.predecessors(current));
            }
        }
        visited
    }

    /// Adds an edge `u → v` for every ordered pair connected by a non-empty
    /// path, and returns the number of edges added.
    ///
    /// After this call, `contains_edge(u, v)` holds exactly when a
    /// non-empty path from `u` to `v` existed beforehand; in particular a
    /// node on a cycle gains a self-edge.
    pub fn transitive_closure(&mut self) -> usize {
        let ids: Vec<NodeId> = self.node_ids().collect();
        let mut added = 0;
        for &u in &ids {
            // Shortcut edges never create new reachability, so computing
            // descendants against the partially closed graph is sound.
            for v in self.descendants(u) {
                if self.insert_edge(u, v, None) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Returns the subgraph induced by `keep`: the nodes of `keep` that
    /// exist in this graph, with their contents, and every edge whose both
    /// endpoints are kept. Node identifiers are preserved.
    #[must_use]
    pub fn subgraph(&self, keep: &BTreeSet<NodeId>) -> Self
    where
        N: Clone,
        L: Clone,
    {
        let mut result = Dgraph {
            nodes: BTreeMap::new(),
            succ: BTreeMap::new(),
            pred: BTreeMap::new(),
            labels: BTreeMap::new(),
            next_id: self.next_id,
        };
        for &id in keep {
            if let Some(content) = self.nodes.get(&id) {
                result.nodes.insert(id, content.clone());
                result.succ.insert(id, BTreeSet::new());
                result.pred.insert(id, BTreeSet::new());
            }
        }
        for (&(source, target), label) in &self.labels {
            if result.nodes.contains_key(&source) && result.nodes.contains_key(&target) {
                result.labels.insert((source, target), label.clone());
                if let Some(forward) = result.succ.get_mut(&source) {
                    forward.insert(target);
                }
                if let Some(back) = result.pred.get_mut(&target) {
                    back.insert(source);
                }
            }
        }
        result
    }

    /// Collapses every strongly connected component into a single node and
    /// returns the resulting condensation.
    ///
    /// Each condensation node carries the ascending list of the original
    /// node identifiers in its component. The condensation of any directed
    /// graph is acyclic, so the result is returned as a [`Dag`].
    #[must_use]
    pub fn condensation(&self) -> Dag<Vec<NodeId>> {
        let sccs = algorithms::strongly_connected_components(self);

        let mut component_of: BTreeMap<NodeId, usize> = BTreeMap::new();
        for (index, component) in sccs.iter().enumerate() {
            for &member in component {
                component_of.insert(member, index);
            }
        }

        let mut result: Dgraph<Vec<NodeId>> = Dgraph::new();
        let component_nodes: Vec<NodeId> = sccs
            .iter()
            .map(|component| {
                let mut members = component.clone();
                members.sort();
                result.add_node(members)
            })
            .collect();

        for u in self.node_ids() {
            for v in self.successors(u) {
                let (cu, cv) = (component_of[&u], component_of[&v]);
                if cu != cv {
                    // add_edge refuses duplicates, deduplicating for free.
                    result.add_edge(component_nodes[cu], component_nodes[cv]);
                }
            }
        }

        Dag::new_unchecked(result)
    }
}

impl<N, L> GraphBase for Dgraph<N, L> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.nodes.keys().copied()
    }
}

impl<N, L> Successors for Dgraph<N, L> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.succ.get(&node).into_iter().flatten().copied()
    }
}

impl<N, L> Predecessors for Dgraph<N, L> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.pred.get(&node).into_iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A -> B, A -> C, B -> D, C -> D
    fn diamond() -> (Dgraph<&'static str>, [NodeId; 4]) {
        let mut graph = Dgraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        let d = graph.add_node("D");
        graph.add_edge(a, b);
        graph.add_edge(a, c);
        graph.add_edge(b, d);
        graph.add_edge(c, d);
        (graph, [a, b, c, d])
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph: Dgraph<()> = Dgraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_node_assigns_sequential_ids() {
        let mut graph: Dgraph<&str> = Dgraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        assert_eq!(a, NodeId::new(0));
        assert_eq!(b, NodeId::new(1));
        assert_eq!(graph.node(a), Some(&"A"));
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut graph: Dgraph<&str> = Dgraph::new();
        let a = graph.add_node("A");
        assert!(graph.remove_node(a));
        let b = graph.add_node("B");
        assert_ne!(a, b);
        assert!(!graph.contains_node(a));
    }

    #[test]
    fn test_duplicate_edge_refused() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        assert!(graph.add_edge(a, b));
        assert!(!graph.add_edge(a, b));
        assert!(!graph.add_labeled_edge(a, b, ()));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edge_to_unknown_node_refused() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        assert!(!graph.add_edge(a, NodeId::new(99)));
        assert!(!graph.add_edge(NodeId::new(99), a));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edge_label() {
        let mut graph: Dgraph<(), &str> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_labeled_edge(a, b, "covers");
        graph.add_edge(b, c);

        assert_eq!(graph.edge_label(a, b), Some(&"covers"));
        assert_eq!(graph.edge_label(b, c), None);
        assert_eq!(graph.edge_label(a, c), None);
    }

    #[test]
    fn test_remove_edge() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b);

        assert!(graph.remove_edge(a, b));
        assert!(!graph.remove_edge(a, b));
        assert!(!graph.contains_edge(a, b));
        assert_eq!(graph.successors(a).count(), 0);
        assert_eq!(graph.predecessors(b).count(), 0);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let (mut graph, [a, b, _c, d]) = diamond();
        assert!(graph.remove_node(b));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2); // a->c and c->d survive
        assert!(!graph.contains_edge(a, b));
        assert!(!graph.contains_edge(b, d));
        assert_eq!(graph.successors(a).count(), 1);
        assert_eq!(graph.predecessors(d).count(), 1);
    }

    #[test]
    fn test_adjacency_both_directions() {
        let (graph, [a, b, c, d]) = diamond();
        assert_eq!(graph.successors(a).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(graph.predecessors(d).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(graph.out_degree(a), 2);
        assert_eq!(graph.in_degree(d), 2);
    }

    #[test]
    fn test_sources_and_sinks() {
        let (graph, [a, _b, _c, d]) = diamond();
        assert_eq!(graph.sources().collect::<Vec<_>>(), vec![a]);
        assert_eq!(graph.sinks().collect::<Vec<_>>(), vec![d]);
    }

    #[test]
    fn test_descendants_and_ancestors() {
        let (graph, [a, b, c, d]) = diamond();
        assert_eq!(
            graph.descendants(a),
            BTreeSet::from([b, c, d]),
        );
        assert_eq!(graph.ancestors(d), BTreeSet::from([a, b, c]));
        assert!(graph.descendants(d).is_empty());
    }

    #[test]
    fn test_descendants_on_cycle_include_start() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b);
        graph.add_edge(b, a);
        assert!(graph.descendants(a).contains(&a));
    }

    #[test]
    fn test_transitive_closure_chain() {
        let mut graph: Dgraph<i32> = Dgraph::new();
        let a = graph.add_node(1);
        let b = graph.add_node(2);
        let c = graph.add_node(3);
        graph.add_edge(a, b);
        graph.add_edge(b, c);

        let added = graph.transitive_closure();
        assert_eq!(added, 1);
        assert!(graph.contains_edge(a, c));
    }

    #[test]
    fn test_transitive_closure_cycle_adds_self_edges() {
        let mut graph: Dgraph<()> = Dgraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b);
        graph.add_edge(b, a);

        graph.transitive_closure();
        assert!(graph.contains_edge(a, a));
        assert!(graph.contains_edge(b, b));
    }

    #[test]
    fn test_subgraph_induced() {
        let (graph, [a, b, _c, d]) = diamond();
        let keep = BTreeSet::from([a, b, d]);
        let sub = graph.subgraph(&keep);

        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 2); // a->b, b->d
        assert!(sub.contains_edge(a, b));
        assert!(sub.contains_edge(b, d));
        assert!(!sub.contains_edge(a, d));
        assert_eq!(sub.node(a), Some(&"A"));
    }

    #[test]
    fn test_condensation_of_cycle() {
        let mut graph: Dgraph<&str> = Dgraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        graph.add_edge(c, a);

        let condensation = graph.condensation();
        assert_eq!(condensation.node_count(), 1);
        let members = condensation
            .graph()
            .nodes()
            .next()
            .map(|(_, m)| m.clone())
            .unwrap_or_default();
        assert_eq!(members, vec![a, b, c]);
    }

    #[test]
    fn test_condensation_mixed() {
        // a <-> b -> c
        let mut graph: Dgraph<&str> = Dgraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.add_edge(b, c);

        let condensation = graph.condensation();
        assert_eq!(condensation.node_count(), 2);
        assert_eq!(condensation.graph().edge_count(), 1);
    }
}
