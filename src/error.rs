use thiserror::Error;

/// The generic error type covering every failure this library can surface.
///
/// Ordinary, expected conditions (inserting a duplicate element, removing
/// something that is absent, querying an unknown observation) are *not*
/// errors: they are reported through `bool` results or empty sets.
/// Only input that cannot be parsed, failing I/O, and contract violations
/// (such as running a DAG-only algorithm on a cyclic graph) reach this enum.
///
/// # Examples
///
/// ```rust,ignore
/// use lattix::Error;
/// use lattix::io::context_text;
///
/// match context_text::registry().load(path) {
///     Ok(context) => println!("{} observations", context.observation_count()),
///     Err(Error::Malformed { message, line }) => {
///         eprintln!("bad input on line {line}: {message}");
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input text could not be parsed.
    ///
    /// Carries a description of what was malformed and the 1-based line of
    /// the input where it was detected. Any partially built value is
    /// discarded by the reader before this is returned.
    #[error("malformed input - line {line}: {message}")]
    Malformed {
        /// Description of the malformation.
        message: String,
        /// 1-based input line on which the malformation was detected.
        line: usize,
    },

    /// An underlying read or write failed.
    ///
    /// Wraps standard I/O errors from the filesystem or stream the caller
    /// handed to a reader or writer.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A graph contract was violated.
    ///
    /// Raised when an operation defined only on acyclic graphs (topological
    /// sort, transitive reduction, order filters) is requested for a graph
    /// that contains a cycle. This is a programmer error, not a data error.
    #[error("{0}")]
    Graph(String),

    /// No reader or writer is registered for the requested file extension.
    #[error("no serializer registered for extension '{0}'")]
    UnknownFormat(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
