// Copyright 2025-2026 The lattix contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]

//! # lattix
//!
//! A library for formal concept analysis: closure systems, concept
//! lattices, and the directed-graph algorithms behind them.
//!
//! Given a set of *attributes* and a *closure operator*, lattix
//! enumerates every closed set (concept), determines the order between
//! them, and materializes the resulting lattice, either fully transitive
//! or as a Hasse diagram.
//!
//! # Architecture
//!
//! The crate is organized as a handful of layers, leaves first:
//!
//! - **Sets** ([`set`]): totally-ordered elements and [`ElementSet`], the
//!   canonical sorted set with the lectic order that drives enumeration.
//! - **Graphs** ([`graph`]): a mutable directed graph with stable node
//!   identifiers, the acyclicity-checked [`graph::Dag`] wrapper, and the
//!   algorithms consumed downstream (Tarjan SCC, topological sort,
//!   transitive closure and reduction).
//! - **Closure systems** ([`closure`]): the two-primitive
//!   [`ClosureSystem`] trait with free-standing Next-Closure enumeration,
//!   precedence graphs, and reducible-element detection; realized by
//!   [`Context`] (binary relation, bitset-accelerated) and
//!   [`ImplicationalSystem`] (rule saturation).
//! - **Lattices** ([`lattice`]): [`Concept`] and the two builders:
//!   `complete_lattice` (Next-Closure, transitively closed) and
//!   `diagram_lattice` (Bordat adaptation, Hasse diagram directly).
//! - **I/O** ([`io`]): text formats for contexts and implicational
//!   systems, DOT output, and caller-owned extension registries.
//!
//! # Usage Examples
//!
//! ```rust
//! use lattix::prelude::*;
//!
//! // O = {1, 2, 3, 4}, A = {a..e}, and a binary relation between them.
//! let mut context: Context<&str> = Context::new();
//! for o in ["1", "2", "3", "4"] {
//!     context.add_observation(o);
//! }
//! for a in ["a", "b", "c", "d", "e"] {
//!     context.add_attribute(a);
//! }
//! for (o, a) in [
//!     ("1", "a"), ("1", "c"), ("2", "a"), ("2", "b"), ("3", "b"),
//!     ("3", "d"), ("3", "e"), ("4", "c"), ("4", "e"),
//! ] {
//!     context.add_relation(&o, &a);
//! }
//!
//! // The Hasse diagram of the concept lattice, every node a full
//! // (extent, intent) pair.
//! let lattice = context.concept_lattice(true);
//! assert_eq!(lattice.node_count(), 10);
//! assert!(lattice.concepts().all(|(_, c)| c.is_full()));
//! ```
//!
//! Closure systems defined by rules work the same way:
//!
//! ```rust
//! use lattix::prelude::*;
//!
//! let mut system: ImplicationalSystem<&str> = ImplicationalSystem::new();
//! for e in ["a", "b", "c", "d"] {
//!     system.add_element(e);
//! }
//! system.add_implication(Implication::new(["a"].into(), ["b"].into()));
//! system.add_implication(Implication::new(["b"].into(), ["c"].into()));
//! system.add_implication(Implication::new(["c"].into(), ["d"].into()));
//!
//! assert_eq!(system.closure(&["a"].into()), ["a", "b", "c", "d"].into());
//! assert_eq!(system.closed_set_lattice(true).height(), 5);
//! ```

pub mod closure;
pub mod graph;
pub mod io;
pub mod lattice;
pub mod prelude;
pub mod set;
pub mod utils;

mod error;

pub use closure::{ClosureSystem, Context, Implication, ImplicationalSystem};
pub use error::{Error, Result};
pub use lattice::{Concept, ConceptLattice};
pub use set::{Element, ElementSet};
