//! Source language readers.
//!
//! Each reader parses one source language into the shared IR.

#[cfg(feature = "read-csharp")]
pub mod csharp;

#[cfg(feature = "read-csharp")]
pub use csharp::{CSharpReader, read_csharp};
