//! DOT (Graphviz) output for graphs and lattices.
//!
//! The emitted shape is the same for both writers:
//!
//! ```text
//! digraph G {
//! Graph [rankdir=BT]
//! 0 [label="{}"]
//! 1 [label="{a}"]
//! 0->1
//! }
//! ```
//!
//! Node identifiers are the raw indices; labels come from the node
//! content's `Display` implementation with quotes and backslashes
//! escaped. Edges carrying a label render it the same way. `rankdir=BT`
//! puts the bottom concept at the bottom of the picture, matching the
//! edge direction of the lattice builders.

use std::fmt::Display;
use std::io::Write;

use crate::graph::Dgraph;
use crate::io::FormatRegistry;
use crate::lattice::ConceptLattice;
use crate::set::Element;
use crate::Result;

/// Escapes a string for use inside a DOT double-quoted label.
#[must_use]
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "")
        .replace('\n', "\\n")
}

/// Writes a graph in DOT format.
///
/// # Errors
///
/// [`crate::Error::Io`] if the stream fails.
pub fn write_dgraph<N, L>(graph: &Dgraph<N, L>, out: &mut dyn Write) -> Result<()>
where
    N: Display,
    L: Display,
{
    writeln!(out, "digraph G {{")?;
    writeln!(out, "Graph [rankdir=BT]")?;
    for (id, content) in graph.nodes() {
        writeln!(out, "{} [label=\"{}\"]", id.index(), escape(&content.to_string()))?;
    }
    for (source, target, label) in graph.edges() {
        match label {
            Some(label) => writeln!(
                out,
                "{}->{} [label=\"{}\"]",
                source.index(),
                target.index(),
                escape(&label.to_string())
            )?,
            None => writeln!(out, "{}->{}", source.index(), target.index())?,
        }
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Writes a concept lattice in DOT format, labeling each node with its
/// concept.
///
/// # Errors
///
/// [`crate::Error::Io`] if the stream fails.
pub fn write_lattice<E: Element>(lattice: &ConceptLattice<E>, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "digraph G {{")?;
    writeln!(out, "Graph [rankdir=BT]")?;
    for (id, concept) in lattice.concepts() {
        writeln!(out, "{} [label=\"{}\"]", id.index(), escape(&concept.to_string()))?;
    }
    for (source, target, _) in lattice.graph().edges() {
        writeln!(out, "{}->{}", source.index(), target.index())?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Returns a registry that writes concept lattices under the `dot`
/// extension. DOT is write-only; no reader is registered.
#[must_use]
pub fn lattice_registry() -> FormatRegistry<ConceptLattice<String>> {
    let mut registry = FormatRegistry::new();
    registry.register_writer("dot", write_lattice::<String>);
    registry
}
