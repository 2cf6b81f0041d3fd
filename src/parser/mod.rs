//! Tokenizer and recursive-descent parser for annotated grammar notation
//!
//! The notation is ANTLR-like `.g4` text whose names may carry
//! `@name{value}` annotations:
//!
//! ```text
//! grammar Sarif @namespace{Microsoft.CodeAnalysis.Sarif} @generateLocations;
//!
//! result @summary{A single finding}: ruleId message? location*;
//! locations: location (',' location)*;
//! level: 'error' | 'warning' | 'note';
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind (trivia discarded)
//!     ↓
//! TokenCursor → primary tokens, annotations buffered aside
//!     ↓
//! Parser → GrammarSymbol tree (immutable, strictly owned)
//!     ↓
//! Model builder → DataModel
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod cursor;
pub mod errors;
mod lexer;
mod syntax_kind;

pub use ast::{Annotation, Grammar, GrammarSymbol, find_annotation, is_fragment};
pub use cursor::TokenCursor;
pub use errors::{ErrorCode, FailureKind, ParseFailure, Result};
pub use lexer::{Lexer, Token, tokenize, unquote};
pub use parser::{parse, parse_grammar};
pub use syntax_kind::{SymbolKind, TokenKind, kind_to_name};

/// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
