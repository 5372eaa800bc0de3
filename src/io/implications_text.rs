//! The implicational system text format.
//!
//! ```text
//! a -> b
//! b c -> d
//! ```
//!
//! One rule per non-empty line, premise and conclusion separated by `->`,
//! elements separated by whitespace. The element vocabulary of the parsed
//! system is the union of every token that appears; there is no separate
//! declaration line.

use std::io::{Read, Write};

use crate::closure::{Implication, ImplicationalSystem};
use crate::io::FormatRegistry;
use crate::set::ElementSet;
use crate::{Error, Result};

/// Returns a registry with the text format registered under `txt`.
#[must_use]
pub fn registry() -> FormatRegistry<ImplicationalSystem<String>> {
    let mut registry = FormatRegistry::new();
    registry.register_reader("txt", read_system);
    registry.register_writer("txt", write_system);
    registry
}

/// Parses an implicational system from the text format.
///
/// Duplicate rules collapse silently; the rule set of the result is
/// deduplicated by construction.
///
/// # Errors
///
/// [`Error::Io`] if the stream fails, [`Error::Malformed`] if a non-empty
/// line does not contain exactly one `->` separator.
pub fn read_system(input: &mut dyn Read) -> Result<ImplicationalSystem<String>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let mut rules: Vec<(ElementSet<String>, ElementSet<String>)> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((premise, conclusion)) = line.split_once("->") else {
            return Err(Error::Malformed {
                message: "expected 'premise -> conclusion'".to_string(),
                line: index + 1,
            });
        };
        if conclusion.contains("->") {
            return Err(Error::Malformed {
                message: "more than one '->' on the line".to_string(),
                line: index + 1,
            });
        }
        rules.push((
            premise.split_whitespace().map(str::to_string).collect(),
            conclusion.split_whitespace().map(str::to_string).collect(),
        ));
    }

    let mut system = ImplicationalSystem::new();
    for (premise, conclusion) in &rules {
        for element in premise.iter().chain(conclusion.iter()) {
            system.add_element(element.clone());
        }
    }
    for (premise, conclusion) in rules {
        system.add_implication(Implication::new(premise, conclusion));
    }
    Ok(system)
}

/// Renders an implicational system in the text format, one rule per line
/// in insertion order.
///
/// # Errors
///
/// [`Error::Io`] if the stream fails.
pub fn write_system(system: &ImplicationalSystem<String>, out: &mut dyn Write) -> Result<()> {
    for rule in system.implications() {
        writeln!(out, "{rule}")?;
    }
    Ok(())
}
