//! Error code definitions for diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Syntactic errors (unexpected tokens, malformed constructs)
//! - E03xx: Data model errors (production shapes, linking, member names)
//! - E04xx: Annotation value errors

use std::fmt;

/// Error codes for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Unterminated annotation value
    E0104,
    /// Annotation value without a preceding annotation name
    E0105,
    /// Source text too large to address with 32-bit offsets
    E0106,

    // =========================================================================
    // E02xx: Syntactic errors
    // =========================================================================
    /// Unexpected token
    E0201,
    /// Unexpected end of input
    E0202,
    /// Empty group
    E0203,
    /// Character range endpoint is not a single character
    E0204,
    /// Character range endpoints out of order
    E0205,

    // =========================================================================
    // E03xx: Data model errors
    // =========================================================================
    /// Production does not describe a recognized data model shape
    E0301,
    /// Derived type reference cannot be resolved
    E0302,
    /// Type is derived from two different bases
    E0303,
    /// Duplicate generated member name
    E0304,
    /// Duplicate serialized member name
    E0305,
    /// Duplicate argument name
    E0306,
    /// Production declared more than once
    E0307,
    /// Member references an unknown type
    E0308,

    // =========================================================================
    // E04xx: Annotation value errors
    // =========================================================================
    /// Annotation value cannot be interpreted
    E0401,
    /// `@serializedValues` count does not match the declared values
    E0402,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E0101")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0106 => "E0106",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            Self::E0307 => "E0307",
            Self::E0308 => "E0308",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
        }
    }

    /// Get the category name for this error code
    pub fn category(&self) -> &'static str {
        match self {
            Self::E0101
            | Self::E0102
            | Self::E0103
            | Self::E0104
            | Self::E0105
            | Self::E0106 => "lexical",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 => "syntax",
            Self::E0301
            | Self::E0302
            | Self::E0303
            | Self::E0304
            | Self::E0305
            | Self::E0306
            | Self::E0307
            | Self::E0308 => "data model",
            Self::E0401 | Self::E0402 => "annotation",
        }
    }

    /// Whether the code belongs to tokenizing or parsing (as opposed to compiling)
    pub fn is_syntactic(&self) -> bool {
        matches!(self.category(), "lexical" | "syntax")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
