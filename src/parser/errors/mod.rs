//! Failure reporting for the grammar toolchain
//!
//! Every lexical, syntactic and semantic problem surfaces as a single
//! structured [`ParseFailure`]:
//! - Categorized error codes for filtering and documentation
//! - A parameterized [`FailureKind`] carrying the offending names/tokens
//! - Source location (1-based line, 0-based column) and the origin path

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{FailureKind, ParseFailure, Result};
