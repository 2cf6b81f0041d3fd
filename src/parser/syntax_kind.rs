//! Token and syntax node kinds for the grammar notation
//!
//! `TokenKind` covers everything the lexer can produce (including trivia,
//! which the tokenizer drops). `SymbolKind` is the closed set of syntax tree
//! node kinds the parser builds.

/// All token kinds in grammar text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (recognized and discarded by the tokenizer)
    // =========================================================================
    Whitespace,
    LineComment,
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    Identifier, // rule, fragment, grammar
    String,     // 'text'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    Pipe,      // |
    Semicolon, // ;
    Colon,     // :
    Star,      // *
    Plus,      // +
    Question,  // ?
    LParen,    // (
    RParen,    // )
    Dots,      // ..

    // =========================================================================
    // ANNOTATIONS
    // =========================================================================
    Annotation,      // @name
    AnnotationValue, // {value}

    // =========================================================================
    // SPECIAL
    // =========================================================================
    Error,
    Eof,
}

impl TokenKind {
    /// Whitespace and comments
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment | Self::BlockComment)
    }

    /// `@name` markers and their `{value}` payloads
    pub fn is_annotation(self) -> bool {
        matches!(self, Self::Annotation | Self::AnnotationValue)
    }

    /// Tokens that can begin a nonterminal inside a group
    pub fn starts_nonterminal(self) -> bool {
        matches!(self, Self::Identifier | Self::String | Self::LParen)
    }
}

/// Human-readable name of a token kind, used in diagnostics.
pub fn kind_to_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Whitespace => "whitespace",
        TokenKind::LineComment | TokenKind::BlockComment => "comment",
        TokenKind::Identifier => "identifier",
        TokenKind::String => "string",
        TokenKind::Pipe => "'|'",
        TokenKind::Semicolon => "';'",
        TokenKind::Colon => "':'",
        TokenKind::Star => "'*'",
        TokenKind::Plus => "'+'",
        TokenKind::Question => "'?'",
        TokenKind::LParen => "'('",
        TokenKind::RParen => "')'",
        TokenKind::Dots => "'..'",
        TokenKind::Annotation => "annotation",
        TokenKind::AnnotationValue => "annotation value",
        TokenKind::Error => "error",
        TokenKind::Eof => "end of input",
    }
}

/// Syntax tree node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    /// Whole grammar: declaration followed by productions
    Grammar,
    /// `grammar Name;`
    GrammarDecl,
    /// `name: body;`
    Production,
    /// The declared name of a production
    ProductionDecl,
    /// `a | b | c`
    Alternation,
    /// `a b c`
    Group,
    /// `x*`
    ZeroOrMoreQuantifier,
    /// `x+`
    OneOrMoreQuantifier,
    /// `x?`
    ZeroOrOneQuantifier,
    /// `'text'`
    String,
    /// A reference to another production
    Identifier,
    /// `'a'..'z'`
    CharacterRange,
    /// Sentinel standing in for an absent node
    Empty,
}

impl SymbolKind {
    pub fn is_quantifier(self) -> bool {
        matches!(
            self,
            Self::ZeroOrMoreQuantifier | Self::OneOrMoreQuantifier | Self::ZeroOrOneQuantifier
        )
    }

    /// Suffix written after a quantified nonterminal
    pub fn quantifier_suffix(self) -> Option<&'static str> {
        match self {
            Self::ZeroOrMoreQuantifier => Some("*"),
            Self::OneOrMoreQuantifier => Some("+"),
            Self::ZeroOrOneQuantifier => Some("?"),
            _ => None,
        }
    }
}
