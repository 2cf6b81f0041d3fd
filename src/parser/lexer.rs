//! Logos-based lexer for grammar notation
//!
//! Fast tokenization using the logos crate. The raw [`Lexer`] yields every
//! token including trivia; [`tokenize`] drops trivia, enforces the
//! annotation-value rule and fails on the first unclassifiable token.

use logos::Logos;
use tracing::debug;

use super::errors::{FailureKind, ParseFailure, Result};
use super::syntax_kind::TokenKind;
use crate::base::{GrammarSource, SourceId, TextRange, TextSize};

/// A token: a kind, the byte range it covers and the source it came from.
///
/// Tokens never store text; slice the owning [`GrammarSource`] instead.
/// Two tokens are equal only if they come from the same source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub source: SourceId,
}

impl Token {
    /// A token not tied to any source.
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            source: SourceId::DETACHED,
        }
    }

    /// Zero-width end-of-input token at `offset`
    pub fn eof(offset: TextSize) -> Self {
        Self::new(TokenKind::Eof, TextRange::empty(offset))
    }

    /// This token, attributed to `source`.
    pub fn in_source(self, source: SourceId) -> Self {
        Self { source, ..self }
    }

    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Slice this token's text out of `source`.
    pub fn text<'s>(&self, source: &'s GrammarSource) -> &'s str {
        source.slice(self.range)
    }
}

/// Lexer wrapping the logos-generated tokenizer
///
/// Lexing stops at the first token whose offsets do not fit in a [`TextSize`].
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    source: SourceId,
}

impl<'a> Lexer<'a> {
    /// Lex bare text; the tokens are detached from any source.
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            source: SourceId::DETACHED,
        }
    }

    /// Lex the text of `source`, tagging every token with its identity.
    pub fn for_source(source: &'a GrammarSource) -> Self {
        Self {
            inner: LogosToken::lexer(source.text()),
            source: source.id(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::try_from(span.start).ok()?,
            TextSize::try_from(span.end).ok()?,
        );

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token::new(kind, range).in_source(self.source))
    }
}

/// Tokenize grammar text into its significant tokens.
///
/// Whitespace and comments are discarded. An annotation value (`{...}`) is
/// only accepted directly after an annotation name (`@name`).
pub fn tokenize(source: &GrammarSource) -> Result<Vec<Token>> {
    if u32::try_from(source.text().len()).is_err() {
        return Err(ParseFailure::new(
            FailureKind::SourceTooLarge,
            TextRange::empty(TextSize::new(0)),
            source,
        ));
    }

    let mut tokens: Vec<Token> = Vec::new();
    for token in Lexer::for_source(source) {
        match token.kind {
            kind if kind.is_trivia() => continue,
            TokenKind::Error => return Err(classify_error(source, token.range)),
            TokenKind::AnnotationValue => {
                let follows_annotation = tokens
                    .last()
                    .is_some_and(|previous| previous.kind == TokenKind::Annotation);
                if !follows_annotation {
                    return Err(ParseFailure::new(
                        FailureKind::OrphanAnnotationValue,
                        token.range,
                        source,
                    ));
                }
                tokens.push(token);
            }
            _ => tokens.push(token),
        }
    }

    debug!(tokens = tokens.len(), "tokenized grammar");
    Ok(tokens)
}

/// Turn a logos error span into the most specific failure we can name.
fn classify_error(source: &GrammarSource, range: TextRange) -> ParseFailure {
    let rest = &source.text()[usize::from(range.start())..];
    let kind = if rest.starts_with('\'') {
        FailureKind::UnterminatedString
    } else if rest.starts_with("/*") {
        FailureKind::UnterminatedComment
    } else if rest.starts_with('{') {
        FailureKind::UnterminatedAnnotationValue
    } else {
        FailureKind::UnrecognizedToken(source.slice(range).to_string())
    };
    ParseFailure::new(kind, range, source)
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("..")]
    Dots,
    #[token("|")]
    Pipe,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // =========================================================================
    // ANNOTATIONS
    // =========================================================================
    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_]*")]
    Annotation,

    #[regex(r"\{[^}]*\}")]
    AnnotationValue,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => TokenKind::Whitespace,
            LogosToken::LineComment => TokenKind::LineComment,
            LogosToken::BlockComment => TokenKind::BlockComment,
            LogosToken::Identifier => TokenKind::Identifier,
            LogosToken::String => TokenKind::String,
            LogosToken::Dots => TokenKind::Dots,
            LogosToken::Pipe => TokenKind::Pipe,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Plus => TokenKind::Plus,
            LogosToken::Question => TokenKind::Question,
            LogosToken::LParen => TokenKind::LParen,
            LogosToken::RParen => TokenKind::RParen,
            LogosToken::Annotation => TokenKind::Annotation,
            LogosToken::AnnotationValue => TokenKind::AnnotationValue,
        }
    }
}

/// Unquote and unescape the text of a string token (`'a\'b'` → `a'b`).
pub fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some(other) => value.push(other),
            None => value.push('\\'),
        }
    }
    value
}
