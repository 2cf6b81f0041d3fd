//! The single failure type raised by tokenizing, parsing, compiling and linking

use std::sync::Arc;

use thiserror::Error;

use super::codes::ErrorCode;
use crate::base::{GrammarSource, TextRange};

/// Result type for every fallible operation in the core
pub type Result<T> = std::result::Result<T, ParseFailure>;

/// What went wrong, with the names and tokens involved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("unrecognized token `{0}`")]
    UnrecognizedToken(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("unterminated annotation value")]
    UnterminatedAnnotationValue,

    #[error("annotation value must directly follow an annotation name")]
    OrphanAnnotationValue,

    #[error("source text exceeds 4 GiB")]
    SourceTooLarge,

    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },

    #[error("group must contain at least one element")]
    EmptyGroup,

    #[error("character range endpoint {0} must be exactly one character")]
    InvalidRangeEndpoint(String),

    #[error("character range {first}..{last} is out of order")]
    RangeOutOfOrder { first: String, last: String },

    #[error("production '{0}' does not describe a recognized data model")]
    UnrecognizedDataModel(String),

    #[error("type '{derived}' listed by base type '{base}' is not a leaf or base type")]
    UnresolvedDerivedType { base: String, derived: String },

    #[error("type '{derived}' is claimed as derived by both '{first}' and '{second}'")]
    ConflictingBaseType {
        derived: String,
        first: String,
        second: String,
    },

    #[error("type '{type_name}' has more than one member with generated name '{name}'")]
    DuplicateGeneratedName { type_name: String, name: String },

    #[error("type '{type_name}' has more than one member with serialized name '{name}'")]
    DuplicateSerializedName { type_name: String, name: String },

    #[error("type '{type_name}' has more than one member with argument name '{name}'")]
    DuplicateArgumentName { type_name: String, name: String },

    #[error("production '{0}' is declared more than once")]
    DuplicateTypeName(String),

    #[error("member '{member}' of type '{type_name}' references unknown type '{target}'")]
    UnresolvedMemberType {
        type_name: String,
        member: String,
        target: String,
    },

    #[error("annotation @{name} has invalid value '{value}', expected {expected}")]
    InvalidAnnotationValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("@serializedValues lists {found} values but '{type_name}' declares {expected}")]
    SerializedValuesMismatch {
        type_name: String,
        expected: usize,
        found: usize,
    },
}

impl FailureKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnrecognizedToken(_) => ErrorCode::E0101,
            Self::UnterminatedString => ErrorCode::E0102,
            Self::UnterminatedComment => ErrorCode::E0103,
            Self::UnterminatedAnnotationValue => ErrorCode::E0104,
            Self::OrphanAnnotationValue => ErrorCode::E0105,
            Self::SourceTooLarge => ErrorCode::E0106,
            Self::UnexpectedToken { .. } => ErrorCode::E0201,
            Self::UnexpectedEndOfInput { .. } => ErrorCode::E0202,
            Self::EmptyGroup => ErrorCode::E0203,
            Self::InvalidRangeEndpoint(_) => ErrorCode::E0204,
            Self::RangeOutOfOrder { .. } => ErrorCode::E0205,
            Self::UnrecognizedDataModel(_) => ErrorCode::E0301,
            Self::UnresolvedDerivedType { .. } => ErrorCode::E0302,
            Self::ConflictingBaseType { .. } => ErrorCode::E0303,
            Self::DuplicateGeneratedName { .. } => ErrorCode::E0304,
            Self::DuplicateSerializedName { .. } => ErrorCode::E0305,
            Self::DuplicateArgumentName { .. } => ErrorCode::E0306,
            Self::DuplicateTypeName(_) => ErrorCode::E0307,
            Self::UnresolvedMemberType { .. } => ErrorCode::E0308,
            Self::InvalidAnnotationValue { .. } => ErrorCode::E0401,
            Self::SerializedValuesMismatch { .. } => ErrorCode::E0402,
        }
    }
}

/// A located failure.
///
/// Displays as `line:column: message` with a 1-based line and a 0-based column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {kind}")]
pub struct ParseFailure {
    pub kind: FailureKind,
    /// Offending source range (byte offsets)
    pub range: TextRange,
    /// 1-based line
    pub line: u32,
    /// 0-based column
    pub column: u32,
    /// Origin path of the grammar, if known
    pub path: Option<Arc<str>>,
}

impl ParseFailure {
    /// Locate `kind` at `range` within `source`.
    pub fn new(kind: FailureKind, range: TextRange, source: &GrammarSource) -> Self {
        let position = source.line_col(range.start());
        Self {
            kind,
            range,
            line: position.line + 1,
            column: position.col,
            path: source.path().cloned(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Format with the origin path prefix: `path(line:column): code: message`.
    pub fn render(&self) -> String {
        match &self.path {
            Some(path) => format!(
                "{}({}:{}): {}: {}",
                path,
                self.line,
                self.column,
                self.code(),
                self.kind
            ),
            None => format!("{}:{}: {}: {}", self.line, self.column, self.code(), self.kind),
        }
    }
}
