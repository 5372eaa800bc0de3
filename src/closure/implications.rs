//! Implicational systems: closure by rule saturation.

use std::fmt;

use crate::closure::{self, ClosureSystem};
use crate::lattice::{builders, ConceptLattice};
use crate::set::{Element, ElementSet};

/// A production rule `premise → conclusion` over a set of elements.
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::{ElementSet, Implication};
///
/// let rule = Implication::new(["a"].into(), ["b", "c"].into());
/// assert_eq!(rule.to_string(), "a -> b c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Implication<E: Element> {
    premise: ElementSet<E>,
    conclusion: ElementSet<E>,
}

impl<E: Element> Implication<E> {
    /// Creates a rule from its premise and conclusion.
    #[must_use]
    pub fn new(premise: ElementSet<E>, conclusion: ElementSet<E>) -> Self {
        Implication {
            premise,
            conclusion,
        }
    }

    /// Returns the premise.
    #[must_use]
    pub fn premise(&self) -> &ElementSet<E> {
        &self.premise
    }

    /// Returns the conclusion.
    #[must_use]
    pub fn conclusion(&self) -> &ElementSet<E> {
        &self.conclusion
    }
}

impl<E: Element> fmt::Display for Implication<E> {
    /// Formats the rule as `p1 p2 -> c1 c2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for premise in &self.premise {
            write!(f, "{premise} ")?;
        }
        write!(f, "->")?;
        for conclusion in &self.conclusion {
            write!(f, " {conclusion}")?;
        }
        Ok(())
    }
}

/// A closure system defined by a set of implications.
///
/// The closure of `S` is the least fixpoint of rule application: while
/// some rule's premise is contained in the current set, its conclusion is
/// added. Rules are kept deduplicated; beyond that no normal form is
/// enforced, and the `is_*` predicates recognize the usual ones.
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::{ElementSet, Implication, ImplicationalSystem};
/// use lattix::closure::ClosureSystem;
///
/// let mut system: ImplicationalSystem<&str> = ImplicationalSystem::new();
/// for e in ["a", "b", "c"] {
///     system.add_element(e);
/// }
/// system.add_implication(Implication::new(["a"].into(), ["b"].into()));
/// system.add_implication(Implication::new(["b"].into(), ["c"].into()));
///
/// assert_eq!(system.closure(&["a"].into()), ["a", "b", "c"].into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplicationalSystem<E: Element> {
    /// The ground set.
    elements: ElementSet<E>,
    /// Deduplicated rules, in insertion order.
    implications: Vec<Implication<E>>,
}

impl<E: Element> Default for ImplicationalSystem<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> ImplicationalSystem<E> {
    /// Creates an empty system.
    #[must_use]
    pub fn new() -> Self {
        ImplicationalSystem {
            elements: ElementSet::new(),
            implications: Vec::new(),
        }
    }

    /// Returns the rules of the system, in insertion order.
    #[must_use]
    pub fn implications(&self) -> &[Implication<E>] {
        &self.implications
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn implication_count(&self) -> usize {
        self.implications.len()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Adds an element to the ground set.
    ///
    /// Returns `true` if it was not already present.
    pub fn add_element(&mut self, element: E) -> bool {
        self.elements.insert(element)
    }

    /// Adds a rule.
    ///
    /// Returns `true` if the rule was added; `false` if an identical rule
    /// already exists or the rule mentions elements outside the ground
    /// set.
    pub fn add_implication(&mut self, implication: Implication<E>) -> bool {
        if !implication.premise.is_subset(&self.elements)
            || !implication.conclusion.is_subset(&self.elements)
            || self.implications.contains(&implication)
        {
            return false;
        }
        self.implications.push(implication);
        true
    }

    /// Removes a rule.
    ///
    /// Returns `true` if an identical rule was present.
    pub fn remove_implication(&mut self, implication: &Implication<E>) -> bool {
        match self.implications.iter().position(|r| r == implication) {
            Some(index) => {
                self.implications.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if every conclusion is a singleton.
    #[must_use]
    pub fn is_unary(&self) -> bool {
        self.implications.iter().all(|r| r.conclusion.len() == 1)
    }

    /// Returns `true` if every premise and every conclusion has at most
    /// one element.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.implications
            .iter()
            .all(|r| r.premise.len() <= 1 && r.conclusion.len() <= 1)
    }

    /// Returns `true` if no rule is redundant: removing any single rule
    /// changes the closure of its own premise.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        (0..self.implications.len()).all(|skip| {
            let closed = self.saturate(&self.implications[skip].premise, Some(skip));
            !self.implications[skip].conclusion.is_subset(&closed)
        })
    }

    /// Returns `true` if no element is closure-equivalent to another
    /// element or set of elements.
    #[must_use]
    pub fn is_reduced(&self) -> bool {
        closure::reducible_elements(self).is_empty()
    }

    /// Returns `true` if a single pass of rule application always reaches
    /// the closure: firing any rule never enables a rule that was not
    /// already enabled.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        for enabling in &self.implications {
            let mut reach = enabling.premise.clone();
            reach.union_with(&enabling.conclusion);
            for follower in &self.implications {
                if follower.premise.is_subset(&reach) && !follower.conclusion.is_subset(&reach) {
                    return false;
                }
            }
        }
        true
    }

    /// Returns an equivalent system in which every conclusion is a
    /// singleton, splitting rules as needed.
    #[must_use]
    pub fn to_unary(&self) -> Self {
        let mut unary = ImplicationalSystem {
            elements: self.elements.clone(),
            implications: Vec::new(),
        };
        for rule in &self.implications {
            for conclusion in &rule.conclusion {
                unary.add_implication(Implication::new(
                    rule.premise.clone(),
                    ElementSet::singleton(conclusion.clone()),
                ));
            }
        }
        unary
    }

    /// Builds the closed-set lattice of the system.
    ///
    /// With `diagram` set, the result is the Hasse diagram; otherwise the
    /// transitively closed lattice.
    #[must_use]
    pub fn closed_set_lattice(&self, diagram: bool) -> ConceptLattice<E> {
        if diagram {
            builders::diagram_lattice(self)
        } else {
            builders::complete_lattice(self)
        }
    }

    /// Saturates `set` under rule application, optionally ignoring the
    /// rule at `skip`.
    fn saturate(&self, set: &ElementSet<E>, skip: Option<usize>) -> ElementSet<E> {
        let mut result = set.clone();
        let mut changed = true;
        while changed {
            changed = false;
            for (index, rule) in self.implications.iter().enumerate() {
                if Some(index) == skip {
                    continue;
                }
                if rule.premise.is_subset(&result) && !rule.conclusion.is_subset(&result) {
                    result.union_with(&rule.conclusion);
                    changed = true;
                }
            }
        }
        result
    }
}

impl<E: Element> ClosureSystem for ImplicationalSystem<E> {
    type Elem = E;

    fn elements(&self) -> &ElementSet<E> {
        &self.elements
    }

    fn closure(&self, set: &ElementSet<E>) -> ElementSet<E> {
        self.saturate(set, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::all_closures;

    /// E = {a, b, c, d}, R = {a → b, b → c, c → d}.
    fn chain() -> ImplicationalSystem<&'static str> {
        let mut system = ImplicationalSystem::new();
        for e in ["a", "b", "c", "d"] {
            system.add_element(e);
        }
        system.add_implication(Implication::new(["a"].into(), ["b"].into()));
        system.add_implication(Implication::new(["b"].into(), ["c"].into()));
        system.add_implication(Implication::new(["c"].into(), ["d"].into()));
        system
    }

    #[test]
    fn test_closure_saturates() {
        let system = chain();
        assert_eq!(system.closure(&["a"].into()), ["a", "b", "c", "d"].into());
        assert_eq!(system.closure(&["b"].into()), ["b", "c", "d"].into());
        assert_eq!(system.closure(&["d"].into()), ["d"].into());
        assert_eq!(system.closure(&ElementSet::new()), ElementSet::new());
    }

    #[test]
    fn test_all_closures_chain() {
        let system = chain();
        let expected: Vec<ElementSet<&str>> = vec![
            ElementSet::new(),
            ["d"].into(),
            ["c", "d"].into(),
            ["b", "c", "d"].into(),
            ["a", "b", "c", "d"].into(),
        ];
        assert_eq!(all_closures(&system), expected);
    }

    #[test]
    fn test_duplicate_rule_refused() {
        let mut system = chain();
        assert!(!system.add_implication(Implication::new(["a"].into(), ["b"].into())));
        assert_eq!(system.implication_count(), 3);
    }

    #[test]
    fn test_rule_with_unknown_element_refused() {
        let mut system = chain();
        assert!(!system.add_implication(Implication::new(["z"].into(), ["a"].into())));
        assert!(!system.add_implication(Implication::new(["a"].into(), ["z"].into())));
    }

    #[test]
    fn test_remove_implication() {
        let mut system = chain();
        let rule = Implication::new(["b"].into(), ["c"].into());
        assert!(system.remove_implication(&rule));
        assert!(!system.remove_implication(&rule));
        assert_eq!(system.closure(&["a"].into()), ["a", "b"].into());
    }

    #[test]
    fn test_unary_and_binary() {
        let system = chain();
        assert!(system.is_unary());
        assert!(system.is_binary());

        let mut wide = ImplicationalSystem::new();
        for e in ["a", "b", "c"] {
            wide.add_element(e);
        }
        wide.add_implication(Implication::new(["a"].into(), ["b", "c"].into()));
        assert!(!wide.is_unary());
        assert!(!wide.is_binary());
    }

    #[test]
    fn test_proper() {
        let mut system = chain();
        assert!(system.is_proper());
        // a → c follows from a → b and b → c.
        system.add_implication(Implication::new(["a"].into(), ["c"].into()));
        assert!(!system.is_proper());
    }

    #[test]
    fn test_direct() {
        // a → b enables b → c, so the chain is not direct.
        assert!(!chain().is_direct());

        let mut direct = ImplicationalSystem::new();
        for e in ["a", "b", "c"] {
            direct.add_element(e);
        }
        direct.add_implication(Implication::new(["a"].into(), ["b", "c"].into()));
        direct.add_implication(Implication::new(["b"].into(), ["c"].into()));
        assert!(direct.is_direct());
    }

    #[test]
    fn test_reduced() {
        assert!(chain().is_reduced());

        // a and b imply each other: equivalent by closure.
        let mut twin = ImplicationalSystem::new();
        for e in ["a", "b"] {
            twin.add_element(e);
        }
        twin.add_implication(Implication::new(["a"].into(), ["b"].into()));
        twin.add_implication(Implication::new(["b"].into(), ["a"].into()));
        assert!(!twin.is_reduced());
    }

    #[test]
    fn test_to_unary_preserves_closure() {
        let mut system = ImplicationalSystem::new();
        for e in ["a", "b", "c", "d"] {
            system.add_element(e);
        }
        system.add_implication(Implication::new(["a"].into(), ["b", "c"].into()));
        system.add_implication(Implication::new(["b", "c"].into(), ["d"].into()));

        let unary = system.to_unary();
        assert!(unary.is_unary());
        assert_eq!(unary.implication_count(), 3);
        assert_eq!(
            unary.closure(&["a"].into()),
            system.closure(&["a"].into())
        );
    }

    #[test]
    fn test_implication_display() {
        let rule: Implication<&str> = Implication::new(["a", "b"].into(), ["c"].into());
        assert_eq!(rule.to_string(), "a b -> c");
    }
}
