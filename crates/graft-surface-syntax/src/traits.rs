//! Traits for source readers and dialect writers.

use crate::ir::{Language, Node};

/// Error that can occur when reading source code into the IR.
///
/// There is exactly one kind: the front-end rejected the input. Unsupported
/// constructs inside parseable input never error; they become
/// [`Node::Unknown`] and render in-band.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("incomplete code block: {0}")]
    Incomplete(String),
}

/// A reader parses source code into the IR.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "csharp").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["cs"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source code into the IR.
    fn read(&self, source: &str) -> Result<Node, ReadError>;
}

/// A writer emits the IR as source code in one output dialect.
pub trait Writer: Send + Sync {
    /// The language tag the writer identifies as.
    fn language(&self) -> Language;

    /// File extension for output (e.g., "ps1").
    fn extension(&self) -> &'static str;

    /// Emit the IR as source code.
    fn write(&self, root: &Node) -> String;
}
