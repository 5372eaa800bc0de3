//! Convenient re-exports of the commonly used types.
//!
//! ```rust,ignore
//! use lattix::prelude::*;
//! ```

pub use crate::closure::{
    all_closures, next_closure, precedence_graph, reducible_elements, ClosureSystem, Context,
    Implication, ImplicationalSystem,
};
pub use crate::error::{Error, Result};
pub use crate::graph::{Dag, Dgraph, NodeId};
pub use crate::io::FormatRegistry;
pub use crate::lattice::builders::{complete_lattice, diagram_lattice};
pub use crate::lattice::{Concept, ConceptLattice};
pub use crate::set::{Element, ElementSet};
