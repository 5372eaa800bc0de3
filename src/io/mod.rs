//! Serialization: format registries, text formats, and DOT output.
//!
//! Readers and writers are stateless functions; a [`FormatRegistry`] maps
//! lowercase file extensions to them and dispatches [`load`] and [`save`]
//! calls on the path's extension. Registries are plain values the caller
//! constructs and threads through; there is no process-wide table.
//! Pre-populated registries for the built-in formats come from
//! [`context_text::registry`], [`implications_text::registry`], and
//! [`dot::lattice_registry`].
//!
//! [`load`]: FormatRegistry::load
//! [`save`]: FormatRegistry::save

pub mod context_text;
pub mod dot;
pub mod implications_text;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::{Error, Result};

/// A stateless reader: parses a value from a character stream.
pub type ReadFn<T> = fn(&mut dyn Read) -> Result<T>;

/// A stateless writer: renders a value onto a character stream.
pub type WriteFn<T> = fn(&T, &mut dyn Write) -> Result<()>;

/// A mapping from file extensions to readers and writers for one payload
/// type.
///
/// Extensions are matched case-insensitively. Registering over an
/// existing entry displaces it; the displaced function is handed back, as
/// with [`unregister_reader`](Self::unregister_reader).
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::io::context_text;
///
/// let registry = context_text::registry();
/// let context = registry.load("animals.txt")?;
/// registry.save(&context, "animals-copy.txt")?;
/// # Ok::<(), lattix::Error>(())
/// ```
pub struct FormatRegistry<T> {
    readers: FxHashMap<String, ReadFn<T>>,
    writers: FxHashMap<String, WriteFn<T>>,
}

impl<T> Default for FormatRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FormatRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        FormatRegistry {
            readers: FxHashMap::default(),
            writers: FxHashMap::default(),
        }
    }

    /// Registers a reader for an extension, returning the displaced one.
    pub fn register_reader(&mut self, extension: &str, reader: ReadFn<T>) -> Option<ReadFn<T>> {
        self.readers.insert(extension.to_lowercase(), reader)
    }

    /// Registers a writer for an extension, returning the displaced one.
    pub fn register_writer(&mut self, extension: &str, writer: WriteFn<T>) -> Option<WriteFn<T>> {
        self.writers.insert(extension.to_lowercase(), writer)
    }

    /// Removes the reader for an extension, returning it.
    pub fn unregister_reader(&mut self, extension: &str) -> Option<ReadFn<T>> {
        self.readers.remove(&extension.to_lowercase())
    }

    /// Removes the writer for an extension, returning it.
    pub fn unregister_writer(&mut self, extension: &str) -> Option<WriteFn<T>> {
        self.writers.remove(&extension.to_lowercase())
    }

    /// Returns the reader registered for an extension.
    #[must_use]
    pub fn reader(&self, extension: &str) -> Option<ReadFn<T>> {
        self.readers.get(&extension.to_lowercase()).copied()
    }

    /// Returns the writer registered for an extension.
    #[must_use]
    pub fn writer(&self, extension: &str) -> Option<WriteFn<T>> {
        self.writers.get(&extension.to_lowercase()).copied()
    }

    /// Reads a value from a file, dispatching on the path's extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownFormat`] if no reader is registered for the
    /// extension, [`Error::Io`] on filesystem failure, or whatever the
    /// reader itself surfaces. The file handle is released on every exit
    /// path.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<T> {
        let path = path.as_ref();
        let reader = self
            .reader(&extension_of(path))
            .ok_or_else(|| Error::UnknownFormat(extension_of(path)))?;
        let file = File::open(path)?;
        let mut buffered = BufReader::new(file);
        reader(&mut buffered)
    }

    /// Writes a value to a file, dispatching on the path's extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownFormat`] if no writer is registered for the
    /// extension, [`Error::Io`] on filesystem failure. The file handle is
    /// flushed and released on every exit path.
    pub fn save<P: AsRef<Path>>(&self, value: &T, path: P) -> Result<()> {
        let path = path.as_ref();
        let writer = self
            .writer(&extension_of(path))
            .ok_or_else(|| Error::UnknownFormat(extension_of(path)))?;
        let file = File::create(path)?;
        let mut buffered = BufWriter::new(file);
        writer(value, &mut buffered)?;
        buffered.flush()?;
        Ok(())
    }
}

/// Returns the lowercase extension of a path, or the empty string.
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;

    fn sample() -> Context<String> {
        let mut context = Context::new();
        for o in ["1", "2"] {
            context.add_observation(o.to_string());
        }
        for a in ["a", "b"] {
            context.add_attribute(a.to_string());
        }
        context.add_relation(&"1".to_string(), &"a".to_string());
        context.add_relation(&"2".to_string(), &"b".to_string());
        context
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = context_text::registry();
        assert!(registry.reader("txt").is_some());
        assert!(registry.reader("TXT").is_some());
        assert!(registry.reader("ctx").is_none());

        let displaced = registry.unregister_reader("txt");
        assert!(displaced.is_some());
        assert!(registry.reader("txt").is_none());

        // A displaced reader can be re-registered under another extension.
        if let Some(reader) = displaced {
            assert!(registry.register_reader("ctx", reader).is_none());
        }
        assert!(registry.reader("ctx").is_some());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let registry = context_text::registry();
        let context = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");

        registry.save(&context, &path).unwrap();
        let loaded = registry.load(&path).unwrap();
        assert_eq!(loaded, context);
    }

    #[test]
    fn test_unknown_extension() {
        let registry = context_text::registry();
        let context = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.unknown");

        assert!(matches!(
            registry.save(&context, &path),
            Err(Error::UnknownFormat(ext)) if ext == "unknown"
        ));
        assert!(matches!(
            registry.load(dir.path().join("noext")),
            Err(Error::UnknownFormat(ext)) if ext.is_empty()
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let registry = context_text::registry();
        assert!(matches!(
            registry.load("definitely/not/here.txt"),
            Err(Error::Io(_))
        ));
    }
}
