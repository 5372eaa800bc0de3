//! The context text format.
//!
//! ```text
//! Observations: 1 2 3 4
//! Attributes: a b c d e
//! 1 : a c
//! 2 : a b
//! 3 : b d e
//! 4 : c e
//! ```
//!
//! The first line declares the observations, the second the attributes;
//! every following non-empty line relates a declared observation to its
//! intent. Tokens that were not declared up front (whole relation lines
//! for unknown observations, individual unknown attributes) are
//! **silently skipped**, not errors. Structural problems (a missing
//! header, a relation line without its `:`) surface as
//! [`Error::Malformed`] and discard the partial context.

use std::io::{Read, Write};

use crate::closure::Context;
use crate::io::FormatRegistry;
use crate::{Error, Result};

/// Returns a registry with the text format registered under `txt`.
#[must_use]
pub fn registry() -> FormatRegistry<Context<String>> {
    let mut registry = FormatRegistry::new();
    registry.register_reader("txt", read_context);
    registry.register_writer("txt", write_context);
    registry
}

/// Parses a context from the text format.
///
/// # Errors
///
/// [`Error::Io`] if the stream fails, [`Error::Malformed`] if a header is
/// missing or a relation line lacks its `:` separator.
pub fn read_context(input: &mut dyn Read) -> Result<Context<String>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let mut context = Context::new();
    let mut lines = text.lines().enumerate();

    let observations = header_tokens(lines.next(), "Observations:", 1)?;
    for observation in observations {
        context.add_observation(observation);
    }
    let attributes = header_tokens(lines.next(), "Attributes:", 2)?;
    for attribute in attributes {
        context.add_attribute(attribute);
    }

    for (index, line) in lines {
        let mut tokens = line.split_whitespace();
        let Some(observation) = tokens.next() else {
            continue; // blank line
        };
        let observation = observation.to_string();
        if !context.contains_observation(&observation) {
            continue; // undeclared observation: skip the whole line
        }
        if tokens.next() != Some(":") {
            return Err(Error::Malformed {
                message: format!("expected ':' after observation '{observation}'"),
                line: index + 1,
            });
        }
        for attribute in tokens {
            let attribute = attribute.to_string();
            if context.contains_attribute(&attribute) {
                context.add_relation(&observation, &attribute);
            }
            // undeclared attributes are skipped
        }
    }

    Ok(context)
}

/// Renders a context in the text format.
///
/// Observations, attributes, and intents are emitted in ascending order,
/// so the output is canonical: parsing it back yields an equal context.
///
/// # Errors
///
/// [`Error::Io`] if the stream fails.
pub fn write_context(context: &Context<String>, out: &mut dyn Write) -> Result<()> {
    write!(out, "Observations:")?;
    for observation in context.observations() {
        write!(out, " {observation}")?;
    }
    writeln!(out)?;

    write!(out, "Attributes:")?;
    for attribute in context.attributes() {
        write!(out, " {attribute}")?;
    }
    writeln!(out)?;

    for observation in context.observations() {
        write!(out, "{observation} :")?;
        for attribute in &context.intent(observation) {
            write!(out, " {attribute}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Extracts the identifier tokens of a header line, checking its keyword.
fn header_tokens(
    line: Option<(usize, &str)>,
    keyword: &str,
    line_number: usize,
) -> Result<Vec<String>> {
    let Some((_, content)) = line else {
        return Err(Error::Malformed {
            message: format!("missing '{keyword}' line"),
            line: line_number,
        });
    };
    let mut tokens = content.split_whitespace();
    if tokens.next() != Some(keyword) {
        return Err(Error::Malformed {
            message: format!("expected line to start with '{keyword}'"),
            line: line_number,
        });
    }
    Ok(tokens.map(str::to_string).collect())
}
