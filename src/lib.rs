//! # datamodel-base
//!
//! Core library for compiling annotated grammar notation into a typed data
//! model that code generators consume.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hoist     → Single-member wrapper elimination
//!   ↓
//! model     → Production classification, linking, frozen DataModel
//!   ↓
//! parser    → Logos lexer, token cursor, recursive-descent parser, syntax tree
//!   ↓
//! base      → Primitives (GrammarSource, LineIndex, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use datamodel::{CompileOptions, compile_grammar};
//!
//! let model = compile_grammar(
//!     "grammar Log; log: version entry (',' entry)*; version: VERSION; entry: 'a' | 'b';",
//!     &CompileOptions::default(),
//! )
//! .unwrap();
//! let log = model.get("log").unwrap();
//! // `version` wraps a single member and is hoisted away
//! assert_eq!(log.members[0].declared_name, "VERSION");
//! assert_eq!(log.members[1].rank, 1);
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → model → hoist)
// ============================================================================

/// Foundation types: GrammarSource, LineIndex, TextRange
pub mod base;

/// Parser: Logos lexer, token cursor, recursive-descent parser
pub mod parser;

/// Data model: types, builder, linking
pub mod model;

/// Type hoisting
pub mod hoist;

use tracing::debug;

// Re-export foundation types
pub use base::{GrammarSource, LineCol, LineIndex, SourceId, TextRange, TextSize};

// Re-export parser entry points
pub use parser::{
    Annotation, ErrorCode, FailureKind, Grammar, GrammarSymbol, ParseFailure, Result, SymbolKind,
    TokenKind, parse, parse_grammar, tokenize,
};

// Re-export the model
pub use model::{
    CompileOptions, DataModel, DataModelBuilder, DataModelMember, DataModelMetadata,
    DataModelType, DataModelTypeKind, EnumValue, ToStringEntry, build_data_model,
};

pub use hoist::{HoistAction, hoist};

/// Tokenize, parse, compile and link `source`, then hoist wrapper types
/// unless `options.hoist` is off.
pub fn compile_grammar(
    source: impl Into<GrammarSource>,
    options: &CompileOptions,
) -> Result<DataModel> {
    let grammar = parse_grammar(source.into())?;
    let model = build_data_model(&grammar, options)?;
    if !options.hoist {
        return Ok(model);
    }
    let hoisted = hoist(&model);
    debug!(
        grammar = %grammar.name(),
        before = model.len(),
        after = hoisted.len(),
        "compiled grammar"
    );
    Ok(hoisted)
}

/// Compile `text` and always hoist, returning both the linked and the hoisted
/// model.
pub fn compile_and_hoist(text: &str, path: Option<&str>) -> Result<(DataModel, DataModel)> {
    let grammar = parse(text, path)?;
    let options = CompileOptions::default();
    let model = build_data_model(&grammar, &options)?;
    let hoisted = hoist(&model);
    Ok((model, hoisted))
}
