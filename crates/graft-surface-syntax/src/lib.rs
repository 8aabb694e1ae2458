//! Surface-level translation from C# to PowerShell.
//!
//! `graft-surface-syntax` parses C#-family source with tree-sitter, lowers
//! it into a reduced language-neutral IR, and emits PowerShell in one of two
//! dialects. Translation is syntactic: it maps structure, not semantics, and
//! the output is a best-effort rendering meant to shortcut manual porting.
//!
//! # Architecture
//!
//! ```text
//! Source              IR                 Dialects
//! ─────────────    ─────────────    ─────────────────────
//! C# ──────────┬──> Node ─────────┬──> PowerShell (functions)
//!   tree-sitter│      (ir.rs)     └──> PowerShell 5 (classes)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use graft_surface_syntax::{translate, Dialect};
//!
//! let ps = translate("if (a == b) { c = 1; }", Dialect::Function)?;
//! // => "if ($this.a -eq $this.b) ..."
//! ```
//!
//! # Note on fidelity
//!
//! Syntax outside the translated subset surfaces in the output as the
//! original text prefixed with its node kind (an `Unknown` node), so the
//! reader of the translated script can find and port it by hand. The output
//! is not guaranteed to parse.

pub mod ir;
pub mod registry;
pub mod traits;

pub mod input;
pub mod output;

// Re-exports: IR types
pub use ir::{BinaryOp, Language, Method, Node, TypeDeclaration};

// Re-exports: Traits
pub use traits::{ReadError, Reader, Writer};

// Re-exports: Registry
pub use registry::{
    reader_for_extension, reader_for_language, readers, register_reader, register_writer,
    writer_for_language, writers,
};

// Re-exports: Built-in readers
#[cfg(feature = "read-csharp")]
pub use input::csharp::CSharpReader;
#[cfg(feature = "read-csharp")]
pub use input::read_csharp;

// Re-exports: Built-in writers
#[cfg(feature = "write-powershell")]
pub use output::PowerShellWriter;
#[cfg(feature = "write-powershell5")]
pub use output::PowerShell5Writer;

/// Output dialect selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Standalone script functions with C-style control flow.
    #[default]
    Function,
    /// PowerShell 5.0+ class declarations.
    Type,
}

impl Dialect {
    /// The language tag of the writer backing this dialect.
    pub fn language(self) -> Language {
        match self {
            Dialect::Function => Language::PowerShell,
            Dialect::Type => Language::PowerShell5,
        }
    }
}

/// Error from the translation entry points.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Translate C# source text into PowerShell.
#[cfg(all(
    feature = "read-csharp",
    feature = "write-powershell",
    feature = "write-powershell5"
))]
pub fn translate(source: &str, dialect: Dialect) -> Result<String, TranslateError> {
    let ir = input::csharp::read_csharp(source)?;
    let out = match dialect {
        Dialect::Function => output::PowerShellWriter::emit(&ir),
        Dialect::Type => output::PowerShell5Writer::emit(&ir),
    };
    Ok(out)
}

/// Translate a C# source file. With an output path the translation is
/// written there (overwriting, UTF-8) and `None` is returned; otherwise the
/// translated text is returned. Nothing is written when translation fails.
#[cfg(all(
    feature = "read-csharp",
    feature = "write-powershell",
    feature = "write-powershell5"
))]
pub fn translate_file(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    dialect: Dialect,
) -> Result<Option<String>, TranslateError> {
    let source = std::fs::read_to_string(input)?;
    let translated = translate(&source, dialect)?;
    match output {
        Some(path) => {
            std::fs::write(path, translated)?;
            Ok(None)
        }
        None => Ok(Some(translated)),
    }
}
