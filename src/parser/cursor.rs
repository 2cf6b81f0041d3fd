//! Token cursor with one token of lookahead and annotation buffering
//!
//! Annotation tokens never reach the parser. When the cursor is built, every
//! run of `@name` / `@name{value}` tokens is detached from the primary token
//! stream and remembered as the annotations preceding the next primary token.
//! Moving onto a token moves its preceding annotations into the pending
//! buffer, which the parser drains with [`TokenCursor::consume_annotations`]
//! to attach them to the node it is building.

use std::mem;

use super::ast::Annotation;
use super::errors::{FailureKind, ParseFailure, Result};
use super::lexer::Token;
use super::syntax_kind::{TokenKind, kind_to_name};
use crate::base::GrammarSource;

pub struct TokenCursor<'a> {
    source: &'a GrammarSource,
    /// Primary (non-annotation) tokens
    tokens: Vec<Token>,
    /// `preceding[i]` holds the annotations written before `tokens[i]`;
    /// the extra last slot holds annotations trailing the final token
    preceding: Vec<Vec<Annotation>>,
    pos: usize,
    pending: Vec<Annotation>,
    eof: Token,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a GrammarSource, tokens: &[Token]) -> Self {
        let mut primary = Vec::with_capacity(tokens.len());
        let mut preceding = Vec::with_capacity(tokens.len() + 1);
        let mut run: Vec<Annotation> = Vec::new();

        for token in tokens {
            match token.kind {
                TokenKind::Annotation => {
                    let name = &token.text(source)[1..];
                    run.push(Annotation::flag(name));
                }
                TokenKind::AnnotationValue => {
                    let text = token.text(source);
                    let value = text[1..text.len() - 1].trim();
                    if let Some(last) = run.last_mut() {
                        last.value = value.to_string();
                    }
                }
                _ => {
                    primary.push(*token);
                    preceding.push(mem::take(&mut run));
                }
            }
        }
        preceding.push(run);

        let pending = mem::take(&mut preceding[0]);
        Self {
            source,
            tokens: primary,
            preceding,
            pos: 0,
            pending,
            eof: Token::eof(source.len()).in_source(source.id()),
        }
    }

    pub fn source(&self) -> &'a GrammarSource {
        self.source
    }

    /// The token under the cursor, or an `Eof` token past the end.
    pub fn current(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(self.eof)
    }

    /// The token after the current one.
    pub fn look_ahead(&self) -> Token {
        self.tokens.get(self.pos + 1).copied().unwrap_or(self.eof)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Text of the current token (empty at end of input).
    pub fn current_text(&self) -> &'a str {
        self.current().text(self.source)
    }

    /// Move to the next token, collecting the annotations crossed on the way.
    pub fn bump(&mut self) {
        if self.at_end() {
            return;
        }
        self.pos += 1;
        let crossed = mem::take(&mut self.preceding[self.pos]);
        self.pending.extend(crossed);
    }

    /// Return the current token and move past it.
    pub fn consume(&mut self) -> Token {
        let token = self.current();
        self.bump();
        token
    }

    /// Drain the pending annotation buffer.
    pub fn consume_annotations(&mut self) -> Vec<Annotation> {
        mem::take(&mut self.pending)
    }

    /// Clear the pending annotation buffer.
    pub fn discard_annotations(&mut self) {
        self.pending.clear();
    }

    /// Consume a token of `kind`, or fail with an unexpected-token diagnostic.
    pub fn require(&mut self, kind: TokenKind) -> Result<Token> {
        if self.at(kind) {
            Ok(self.consume())
        } else {
            Err(self.unexpected(kind_to_name(kind)))
        }
    }

    /// Consume an identifier whose text is exactly `keyword`.
    pub fn require_keyword(&mut self, keyword: &str) -> Result<Token> {
        if self.at(TokenKind::Identifier) && self.current_text() == keyword {
            Ok(self.consume())
        } else {
            Err(self.unexpected(&format!("'{keyword}'")))
        }
    }

    /// Failure describing the current token as unexpected.
    pub fn unexpected(&self, expected: &str) -> ParseFailure {
        let current = self.current();
        let kind = match current.kind {
            TokenKind::Eof => FailureKind::UnexpectedEndOfInput {
                expected: expected.to_string(),
            },
            found => FailureKind::UnexpectedToken {
                found: describe(found, current.text(self.source)),
                expected: expected.to_string(),
            },
        };
        ParseFailure::new(kind, current.range, self.source)
    }

    /// Failure of `kind` located at `token`.
    pub fn failure_at(&self, kind: FailureKind, token: Token) -> ParseFailure {
        ParseFailure::new(kind, token.range, self.source)
    }
}

fn describe(kind: TokenKind, text: &str) -> String {
    match kind {
        TokenKind::Identifier => format!("identifier '{text}'"),
        TokenKind::String => format!("string {text}"),
        other => kind_to_name(other).to_string(),
    }
}
