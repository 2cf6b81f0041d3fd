//! Foundation types for the data model toolchain.
//!
//! This module provides fundamental types used throughout the compiler:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`GrammarSource`] - Grammar text plus its (opaque) origin path
//! - [`SourceId`] - Identity of a source, carried by every token
//!
//! This module has NO dependencies on other modules of this crate.

mod source;
mod span;

pub use source::{GrammarSource, SourceId};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
