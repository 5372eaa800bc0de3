//! Ordered element sets with lectic comparison.
//!
//! Every algorithm in this crate manipulates sets of elements drawn from a
//! totally-ordered domain. [`ElementSet`] is the canonical representation:
//! a sorted, deduplicated vector, giving O(log n) membership by binary
//! search and O(1) access to the first and last element.
//!
//! Sets themselves are totally ordered by the *lectic* order used by the
//! Next-Closure enumeration: `S < T` exactly when the smallest element on
//! which the two sets differ belongs to `T`. Sorting a collection of closed
//! sets therefore yields the enumeration order of [`crate::closure::all_closures`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// Marker trait for the element domain.
///
/// Any totally-ordered, hashable, cloneable, printable type qualifies; the
/// blanket implementation below means callers never implement this by hand.
/// Equality and ordering are assumed stable for an element's lifetime.
pub trait Element: Ord + Eq + Clone + Hash + fmt::Debug + fmt::Display {}

impl<T: Ord + Eq + Clone + Hash + fmt::Debug + fmt::Display> Element for T {}

/// A sorted, deduplicated set of elements.
///
/// Membership is O(log n), first/last access is O(1), and iteration yields
/// elements in ascending order. Equality and hashing are elementwise; the
/// [`Ord`] implementation is the lectic order (see the module docs).
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::ElementSet;
///
/// let mut set: ElementSet<&str> = ElementSet::new();
/// set.insert("b");
/// set.insert("a");
/// assert_eq!(set.first(), Some(&"a"));
/// assert!(set.contains(&"b"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ElementSet<E: Element> {
    /// Sorted, deduplicated storage.
    items: Vec<E>,
}

impl<E: Element> Default for ElementSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> ElementSet<E> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        ElementSet { items: Vec::new() }
    }

    /// Creates a set containing a single element.
    #[must_use]
    pub fn singleton(element: E) -> Self {
        ElementSet {
            items: vec![element],
        }
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the element belongs to the set.
    ///
    /// Binary search; O(log n).
    #[must_use]
    pub fn contains(&self, element: &E) -> bool {
        self.items.binary_search(element).is_ok()
    }

    /// Returns the smallest element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.items.first()
    }

    /// Returns the largest element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&E> {
        self.items.last()
    }

    /// Inserts an element, keeping the storage sorted.
    ///
    /// Returns `true` if the element was not already present.
    pub fn insert(&mut self, element: E) -> bool {
        match self.items.binary_search(&element) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, element);
                true
            }
        }
    }

    /// Removes an element.
    ///
    /// Returns `true` if the element was present.
    pub fn remove(&mut self, element: &E) -> bool {
        match self.items.binary_search(element) {
            Ok(pos) => {
                self.items.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if every element of `self` belongs to `other`.
    ///
    /// Walks both sorted vectors once; O(|self| + |other|).
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        let mut theirs = other.items.iter();
        'outer: for mine in &self.items {
            for candidate in theirs.by_ref() {
                match candidate.cmp(mine) {
                    Ordering::Less => {}
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// Adds every element of `other` to `self`.
    ///
    /// Returns `true` if `self` changed.
    pub fn union_with(&mut self, other: &Self) -> bool {
        let mut changed = false;
        for element in &other.items {
            changed |= self.insert(element.clone());
        }
        changed
    }

    /// Returns the elements common to `self` and `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        ElementSet {
            items: self
                .items
                .iter()
                .filter(|e| other.contains(e))
                .cloned()
                .collect(),
        }
    }

    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        ElementSet {
            items: self
                .items
                .iter()
                .filter(|e| !other.contains(e))
                .cloned()
                .collect(),
        }
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }
}

impl<E: Element> FromIterator<E> for ElementSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut items: Vec<E> = iter.into_iter().collect();
        items.sort();
        items.dedup();
        ElementSet { items }
    }
}

impl<'a, E: Element> IntoIterator for &'a ElementSet<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<E: Element> IntoIterator for ElementSet<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<E: Element, const N: usize> From<[E; N]> for ElementSet<E> {
    fn from(items: [E; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<E: Element> PartialOrd for ElementSet<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Element> Ord for ElementSet<E> {
    /// Lectic comparison.
    ///
    /// Walks both sorted vectors until they disagree; the set owning the
    /// smaller element at the point of disagreement is the *larger* set in
    /// lectic order, because the smallest element of the symmetric
    /// difference belongs to it.
    fn cmp(&self, other: &Self) -> Ordering {
        let mut mine = self.items.iter();
        let mut theirs = other.items.iter();
        loop {
            match (mine.next(), theirs.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(a), Some(b)) => match a.cmp(b) {
                    Ordering::Equal => {}
                    // The smaller of the two heads is the minimum of the
                    // symmetric difference and decides the comparison.
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                },
            }
        }
    }
}

impl<E: Element> fmt::Debug for ElementSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.items).finish()
    }
}

impl<E: Element> fmt::Display for ElementSet<E> {
    /// Formats the set as `{a, b, c}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "}}")
    }
}
