//! Formal contexts: binary relations between observations and attributes.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::closure::{self, ClosureSystem};
use crate::lattice::{builders, ConceptLattice};
use crate::set::{Element, ElementSet};
use crate::utils::BitSet;

/// A formal context: observations in rows, attributes in columns, and a
/// binary incidence relation between them.
///
/// The context maintains four mirrored views of the relation:
///
/// - `intents` - per observation, the set of its attributes
/// - `extents` - per attribute, the set of its observations
/// - positional arrays mapping observations and attributes to row numbers
/// - per-row [`BitSet`]s of both orientations
///
/// The bitset mirror makes the closure operator
/// `cl(S) = intent(extent(S))` a sequence of word-wise intersections.
/// Every mutation rebuilds the mirror before returning, so all four views
/// agree at every observable point.
///
/// As a [`ClosureSystem`] the context closes sets of **attributes**; the
/// observation side is reached through [`reverse`](Self::reverse) or
/// [`observation_closure`](Self::observation_closure).
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::Context;
///
/// let mut context: Context<&str> = Context::new();
/// context.add_observation("1");
/// context.add_attribute("a");
/// context.add_relation(&"1", &"a");
///
/// let lattice = context.concept_lattice(true);
/// assert_eq!(lattice.node_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Context<E: Element> {
    /// The observation set.
    observations: ElementSet<E>,
    /// The attribute set.
    attributes: ElementSet<E>,
    /// Attributes of each observation.
    intents: FxHashMap<E, ElementSet<E>>,
    /// Observations of each attribute.
    extents: FxHashMap<E, ElementSet<E>>,
    /// Observations in ascending order; row numbering of the mirror.
    obs_index: Vec<E>,
    /// Attributes in ascending order; column numbering of the mirror.
    attr_index: Vec<E>,
    /// Observation to row number.
    obs_pos: FxHashMap<E, usize>,
    /// Attribute to column number.
    attr_pos: FxHashMap<E, usize>,
    /// Per observation, the bitset of its attribute columns.
    intent_bits: Vec<BitSet>,
    /// Per attribute, the bitset of its observation rows.
    extent_bits: Vec<BitSet>,
}

impl<E: Element> Default for Context<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> Context<E> {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Context {
            observations: ElementSet::new(),
            attributes: ElementSet::new(),
            intents: FxHashMap::default(),
            extents: FxHashMap::default(),
            obs_index: Vec::new(),
            attr_index: Vec::new(),
            obs_pos: FxHashMap::default(),
            attr_pos: FxHashMap::default(),
            intent_bits: Vec::new(),
            extent_bits: Vec::new(),
        }
    }

    /// Returns the observation set.
    #[must_use]
    pub fn observations(&self) -> &ElementSet<E> {
        &self.observations
    }

    /// Returns the attribute set.
    #[must_use]
    pub fn attributes(&self) -> &ElementSet<E> {
        &self.attributes
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if `observation` belongs to the context.
    #[must_use]
    pub fn contains_observation(&self, observation: &E) -> bool {
        self.observations.contains(observation)
    }

    /// Returns `true` if `attribute` belongs to the context.
    #[must_use]
    pub fn contains_attribute(&self, attribute: &E) -> bool {
        self.attributes.contains(attribute)
    }

    /// Adds an observation with an empty intent.
    ///
    /// Returns `true` if it was not already present.
    pub fn add_observation(&mut self, observation: E) -> bool {
        if self.observations.contains(&observation) {
            return false;
        }
        self.intents.insert(observation.clone(), ElementSet::new());
        self.observations.insert(observation);
        self.rebuild_mirror();
        true
    }

    /// Adds an attribute with an empty extent.
    ///
    /// Returns `true` if it was not already present.
    pub fn add_attribute(&mut self, attribute: E) -> bool {
        if self.attributes.contains(&attribute) {
            return false;
        }
        self.extents.insert(attribute.clone(), ElementSet::new());
        self.attributes.insert(attribute);
        self.rebuild_mirror();
        true
    }

    /// Removes an observation, purging it from every extent.
    ///
    /// Returns `true` if it was present.
    pub fn remove_observation(&mut self, observation: &E) -> bool {
        if !self.observations.contains(observation) {
            return false;
        }
        self.intents.remove(observation);
        for extent in self.extents.values_mut() {
            extent.remove(observation);
        }
        self.observations.remove(observation);
        self.rebuild_mirror();
        true
    }

    /// Removes an attribute, purging it from every intent.
    ///
    /// Returns `true` if it was present.
    pub fn remove_attribute(&mut self, attribute: &E) -> bool {
        if !self.attributes.contains(attribute) {
            return false;
        }
        self.extents.remove(attribute);
        for intent in self.intents.values_mut() {
            intent.remove(attribute);
        }
        self.attributes.remove(attribute);
        self.rebuild_mirror();
        true
    }

    /// Relates an observation to an attribute.
    ///
    /// Both must already belong to the context. Returns `true` if the pair
    /// was not related before.
    pub fn add_relation(&mut self, observation: &E, attribute: &E) -> bool {
        if !self.observations.contains(observation) || !self.attributes.contains(attribute) {
            return false;
        }
        if self.has_relation(observation, attribute) {
            return false;
        }
        if let Some(intent) = self.intents.get_mut(observation) {
            intent.insert(attribute.clone());
        }
        if let Some(extent) = self.extents.get_mut(attribute) {
            extent.insert(observation.clone());
        }
        self.rebuild_mirror();
        true
    }

    /// Unrelates an observation from an attribute.
    ///
    /// Returns `true` if the pair was related.
    pub fn remove_relation(&mut self, observation: &E, attribute: &E) -> bool {
        if !self.has_relation(observation, attribute) {
            return false;
        }
        if let Some(intent) = self.intents.get_mut(observation) {
            intent.remove(attribute);
        }
        if let Some(extent) = self.extents.get_mut(attribute) {
            extent.remove(observation);
        }
        self.rebuild_mirror();
        true
    }

    /// Returns `true` if `observation` carries `attribute`.
    #[must_use]
    pub fn has_relation(&self, observation: &E, attribute: &E) -> bool {
        self.intents
            .get(observation)
            .is_some_and(|intent| intent.contains(attribute))
    }

    /// Returns the attributes of `observation`.
    ///
    /// Unknown observations yield the empty set.
    #[must_use]
    pub fn intent(&self, observation: &E) -> ElementSet<E> {
        self.intents.get(observation).cloned().unwrap_or_default()
    }

    /// Returns the observations of `attribute`.
    ///
    /// Unknown attributes yield the empty set.
    #[must_use]
    pub fn extent(&self, attribute: &E) -> ElementSet<E> {
        self.extents.get(attribute).cloned().unwrap_or_default()
    }

    /// Returns the attributes common to every observation of the set.
    ///
    /// The intent of the empty set is the full attribute set; a set
    /// containing an unknown observation yields the empty set.
    #[must_use]
    pub fn intent_of(&self, observations: &ElementSet<E>) -> ElementSet<E> {
        let mut bits = BitSet::full(self.attr_index.len());
        for observation in observations {
            match self.obs_pos.get(observation) {
                Some(&row) => bits.intersect_with(&self.intent_bits[row]),
                None => return ElementSet::new(),
            }
        }
        self.materialize_attributes(&bits)
    }

    /// Returns the observations carrying every attribute of the set.
    ///
    /// The extent of the empty set is the full observation set; a set
    /// containing an unknown attribute yields the empty set.
    #[must_use]
    pub fn extent_of(&self, attributes: &ElementSet<E>) -> ElementSet<E> {
        let mut bits = BitSet::full(self.obs_index.len());
        for attribute in attributes {
            match self.attr_pos.get(attribute) {
                Some(&row) => bits.intersect_with(&self.extent_bits[row]),
                None => return ElementSet::new(),
            }
        }
        self.materialize_observations(&bits)
    }

    /// Returns `|intent_of(observations)|` without materializing the set.
    ///
    /// A pure AND-and-popcount over the bitset mirror; sets containing an
    /// unknown observation count zero.
    #[must_use]
    pub fn intent_count(&self, observations: &ElementSet<E>) -> usize {
        let mut bits = BitSet::full(self.attr_index.len());
        for observation in observations {
            match self.obs_pos.get(observation) {
                Some(&row) => bits.intersect_with(&self.intent_bits[row]),
                None => return 0,
            }
        }
        bits.count()
    }

    /// Returns `|extent_of(attributes)|` without materializing the set.
    ///
    /// A pure AND-and-popcount over the bitset mirror; sets containing an
    /// unknown attribute count zero.
    #[must_use]
    pub fn extent_count(&self, attributes: &ElementSet<E>) -> usize {
        let mut bits = BitSet::full(self.obs_index.len());
        for attribute in attributes {
            match self.attr_pos.get(attribute) {
                Some(&row) => bits.intersect_with(&self.extent_bits[row]),
                None => return 0,
            }
        }
        bits.count()
    }

    /// Returns the closure of a set of observations: the largest set of
    /// observations sharing the same common attributes.
    #[must_use]
    pub fn observation_closure(&self, observations: &ElementSet<E>) -> ElementSet<E> {
        self.extent_of(&self.intent_of(observations))
    }

    /// Swaps observations with attributes and intents with extents, in
    /// place. Involutive: applying it twice restores the context.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.observations, &mut self.attributes);
        std::mem::swap(&mut self.intents, &mut self.extents);
        std::mem::swap(&mut self.obs_index, &mut self.attr_index);
        std::mem::swap(&mut self.obs_pos, &mut self.attr_pos);
        std::mem::swap(&mut self.intent_bits, &mut self.extent_bits);
    }

    /// Returns an independent reversed copy of this context.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut copy = self.clone();
        copy.reverse();
        copy
    }

    /// Removes every reducible attribute and returns the removed
    /// attributes mapped to their equivalence sets.
    pub fn reduce_attributes(&mut self) -> BTreeMap<E, ElementSet<E>> {
        let reducible = closure::reducible_elements(self);
        for attribute in reducible.keys() {
            self.remove_attribute(attribute);
        }
        reducible
    }

    /// Removes every reducible observation and returns the removed
    /// observations mapped to their equivalence sets.
    ///
    /// Computed as attribute reduction on the reversed context.
    pub fn reduce_observations(&mut self) -> BTreeMap<E, ElementSet<E>> {
        self.reverse();
        let reducible = closure::reducible_elements(self);
        self.reverse();
        for observation in reducible.keys() {
            self.remove_observation(observation);
        }
        reducible
    }

    /// Removes every reducible attribute and observation.
    pub fn reduce(&mut self) -> BTreeMap<E, ElementSet<E>> {
        let mut removed = self.reduce_attributes();
        removed.extend(self.reduce_observations());
        removed
    }

    /// Builds the closed-set lattice on attributes.
    ///
    /// With `diagram` set, the result is the Hasse diagram produced by
    /// [`builders::diagram_lattice`]; otherwise the transitively closed
    /// lattice of [`builders::complete_lattice`]. Nodes carry intents
    /// only.
    #[must_use]
    pub fn closed_set_lattice(&self, diagram: bool) -> ConceptLattice<E> {
        if diagram {
            builders::diagram_lattice(self)
        } else {
            builders::complete_lattice(self)
        }
    }

    /// Builds the concept lattice: the closed-set lattice with every node
    /// completed to a full concept by computing its extent.
    #[must_use]
    pub fn concept_lattice(&self, diagram: bool) -> ConceptLattice<E> {
        let mut lattice = self.closed_set_lattice(diagram);
        lattice.complete_with(|intent| self.extent_of(intent));
        lattice
    }

    /// Rebuilds positional arrays and bitsets from the intent/extent maps.
    ///
    /// Must run after every mutation; all queries assume the mirror is
    /// current.
    fn rebuild_mirror(&mut self) {
        self.obs_index = self.observations.iter().cloned().collect();
        self.attr_index = self.attributes.iter().cloned().collect();
        self.obs_pos = self
            .obs_index
            .iter()
            .enumerate()
            .map(|(row, e)| (e.clone(), row))
            .collect();
        self.attr_pos = self
            .attr_index
            .iter()
            .enumerate()
            .map(|(row, e)| (e.clone(), row))
            .collect();

        self.intent_bits = self
            .obs_index
            .iter()
            .map(|observation| {
                let mut row = BitSet::new(self.attr_index.len());
                if let Some(intent) = self.intents.get(observation) {
                    for attribute in intent {
                        if let Some(&col) = self.attr_pos.get(attribute) {
                            row.insert(col);
                        }
                    }
                }
                row
            })
            .collect();
        self.extent_bits = self
            .attr_index
            .iter()
            .map(|attribute| {
                let mut row = BitSet::new(self.obs_index.len());
                if let Some(extent) = self.extents.get(attribute) {
                    for observation in extent {
                        if let Some(&col) = self.obs_pos.get(observation) {
                            row.insert(col);
                        }
                    }
                }
                row
            })
            .collect();
    }

    fn materialize_attributes(&self, bits: &BitSet) -> ElementSet<E> {
        bits.iter().map(|col| self.attr_index[col].clone()).collect()
    }

    fn materialize_observations(&self, bits: &BitSet) -> ElementSet<E> {
        bits.iter().map(|row| self.obs_index[row].clone()).collect()
    }
}

impl<E: Element> PartialEq for Context<E> {
    /// Two contexts are equal when they relate the same observations to
    /// the same attributes. The mirror structures are functions of these
    /// and do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.observations == other.observations
            && self.attributes == other.attributes
            && self.intents == other.intents
    }
}

impl<E: Element> Eq for Context<E> {}

impl<E: Element> ClosureSystem for Context<E> {
    type Elem = E;

    fn elements(&self) -> &ElementSet<E> {
        &self.attributes
    }

    /// `cl(S) = intent(extent(S))`, computed on the bitset mirror: one
    /// intersection per attribute of `S`, then one per surviving
    /// observation row.
    fn closure(&self, set: &ElementSet<E>) -> ElementSet<E> {
        let mut extent = BitSet::full(self.obs_index.len());
        for attribute in set {
            match self.attr_pos.get(attribute) {
                Some(&row) => extent.intersect_with(&self.extent_bits[row]),
                None => {
                    extent = BitSet::new(self.obs_index.len());
                    break;
                }
            }
        }
        let mut intent = BitSet::full(self.attr_index.len());
        for row in extent.iter() {
            intent.intersect_with(&self.intent_bits[row]);
        }
        self.materialize_attributes(&intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::{all_closures, reducible_elements};

    /// O = {1, 2, 3, 4}, A = {a..e},
    /// I = {(1,a),(1,c),(2,a),(2,b),(3,b),(3,d),(3,e),(4,c),(4,e)}.
    fn sample() -> Context<&'static str> {
        let mut context = Context::new();
        for o in ["1", "2", "3", "4"] {
            context.add_observation(o);
        }
        for a in ["a", "b", "c", "d", "e"] {
            context.add_attribute(a);
        }
        for (o, a) in [
            ("1", "a"),
            ("1", "c"),
            ("2", "a"),
            ("2", "b"),
            ("3", "b"),
            ("3", "d"),
            ("3", "e"),
            ("4", "c"),
            ("4", "e"),
        ] {
            context.add_relation(&o, &a);
        }
        context
    }

    #[test]
    fn test_intent_and_extent() {
        let context = sample();
        assert_eq!(context.intent(&"1"), ["a", "c"].into());
        assert_eq!(context.extent(&"b"), ["2", "3"].into());
        assert_eq!(context.intent(&"unknown"), ElementSet::new());
        assert_eq!(context.extent(&"unknown"), ElementSet::new());
    }

    #[test]
    fn test_set_queries() {
        let context = sample();
        assert_eq!(context.intent_of(&["1", "2"].into()), ["a"].into());
        assert_eq!(context.extent_of(&["a", "b"].into()), ["2"].into());
        // Empty sets intersect nothing: full results.
        assert_eq!(
            context.intent_of(&ElementSet::new()),
            ["a", "b", "c", "d", "e"].into()
        );
        assert_eq!(
            context.extent_of(&ElementSet::new()),
            ["1", "2", "3", "4"].into()
        );
        // Unknown members empty the result.
        assert_eq!(context.intent_of(&["1", "z"].into()), ElementSet::new());
    }

    #[test]
    fn test_cardinality_queries_match_materialized() {
        let context = sample();
        let sets: [ElementSet<&str>; 3] = [["1", "2"].into(), ["3"].into(), ["1", "4"].into()];
        for observations in &sets {
            assert_eq!(
                context.intent_count(observations),
                context.intent_of(observations).len()
            );
        }
        assert_eq!(context.extent_count(&["a", "b"].into()), 1);
        assert_eq!(context.intent_count(&["z"].into()), 0);
    }

    #[test]
    fn test_closure_is_intent_of_extent() {
        let context = sample();
        let set: ElementSet<&str> = ["a"].into();
        assert_eq!(
            context.closure(&set),
            context.intent_of(&context.extent_of(&set))
        );
        // {e} has extent {3, 4} whose common attributes are {e}.
        assert_eq!(context.closure(&["e"].into()), ["e"].into());
        // {d} has extent {3} whose intent is {b, d, e}.
        assert_eq!(context.closure(&["d"].into()), ["b", "d", "e"].into());
    }

    #[test]
    fn test_all_closures_on_sample() {
        let context = sample();
        let expected: Vec<ElementSet<&str>> = vec![
            ElementSet::new(),
            ["e"].into(),
            ["c"].into(),
            ["c", "e"].into(),
            ["b"].into(),
            ["b", "d", "e"].into(),
            ["a"].into(),
            ["a", "c"].into(),
            ["a", "b"].into(),
            ["a", "b", "c", "d", "e"].into(),
        ];
        assert_eq!(all_closures(&context), expected);
    }

    #[test]
    fn test_mutations_keep_mirror_consistent() {
        let mut context = sample();
        assert!(context.remove_relation(&"3", &"e"));
        assert_eq!(context.extent(&"e"), ["4"].into());
        assert_eq!(context.closure(&["e"].into()), ["c", "e"].into());

        assert!(context.remove_attribute(&"a"));
        assert_eq!(context.intent(&"1"), ["c"].into());
        assert_eq!(context.attribute_count(), 4);

        assert!(context.remove_observation(&"4"));
        assert_eq!(context.extent(&"c"), ["1"].into());

        // Rejected mutations leave everything untouched.
        assert!(!context.remove_attribute(&"a"));
        assert!(!context.add_relation(&"9", &"c"));
        assert!(!context.add_relation(&"1", &"c"));
    }

    #[test]
    fn test_reverse_is_involutive() {
        let original = sample();
        let mut context = sample();
        context.reverse();
        assert_eq!(context.observations(), original.attributes());
        assert_eq!(context.intent(&"a"), original.extent(&"a"));
        assert_eq!(context.closure(&["1"].into()), ["1"].into());
        context.reverse();
        assert_eq!(context, original);
    }

    #[test]
    fn test_reversed_copy_is_independent() {
        let context = sample();
        let mut reversed = context.reversed();
        reversed.remove_observation(&"a");
        assert!(context.contains_attribute(&"a"));
    }

    #[test]
    fn test_duplicate_attribute_is_reducible() {
        // a1 and a2 share the extent {1, 2}.
        let mut context: Context<&str> = Context::new();
        for o in ["1", "2", "3"] {
            context.add_observation(o);
        }
        for a in ["a1", "a2", "b"] {
            context.add_attribute(a);
        }
        for (o, a) in [("1", "a1"), ("1", "a2"), ("2", "a1"), ("2", "a2"), ("3", "b")] {
            context.add_relation(&o, &a);
        }

        let reducible = reducible_elements(&context);
        assert_eq!(reducible.get(&"a2"), Some(&["a1"].into()));
        assert!(!reducible.contains_key(&"a1"));

        let before = context.concept_lattice(true).node_count();
        let removed = context.reduce_attributes();
        assert!(removed.contains_key(&"a2"));
        assert!(!context.contains_attribute(&"a2"));
        assert_eq!(context.concept_lattice(true).node_count(), before);
    }

    #[test]
    fn test_full_extent_attribute_equivalent_to_empty_set() {
        // u is carried by every observation: cl({u}) = cl(∅).
        let mut context: Context<&str> = Context::new();
        for o in ["1", "2"] {
            context.add_observation(o);
        }
        for a in ["u", "x"] {
            context.add_attribute(a);
        }
        for (o, a) in [("1", "u"), ("2", "u"), ("1", "x")] {
            context.add_relation(&o, &a);
        }

        let reducible = reducible_elements(&context);
        assert_eq!(reducible.get(&"u"), Some(&ElementSet::new()));
    }

    #[test]
    fn test_empty_context_closures() {
        let context: Context<&str> = Context::new();
        assert_eq!(all_closures(&context), vec![ElementSet::new()]);
        assert_eq!(context.concept_lattice(true).node_count(), 1);
    }

    #[test]
    fn test_observation_closure() {
        let context = sample();
        // intent({1, 2}) = {a}; extent({a}) = {1, 2}.
        assert_eq!(
            context.observation_closure(&["1", "2"].into()),
            ["1", "2"].into()
        );
        assert_eq!(context.observation_closure(&["3"].into()), ["3"].into());
    }
}
