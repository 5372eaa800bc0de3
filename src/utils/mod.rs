//! Small self-contained utilities.
//!
//! Currently the word-packed [`BitSet`] that backs the accelerated
//! intent/extent computations of [`crate::closure::Context`].

mod bitset;

pub use bitset::{BitSet, BitSetIter};
