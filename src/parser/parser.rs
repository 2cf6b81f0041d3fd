//! Recursive descent parser for grammar notation
//!
//! One rule per grammar construct; each returns a [`GrammarSymbol`] spanning
//! exactly the tokens it consumed. There is no error recovery: the first
//! failure aborts parsing.

use tracing::debug;

use super::ast::{Annotation, Grammar, GrammarSymbol};
use super::cursor::TokenCursor;
use super::errors::{FailureKind, Result};
use super::lexer::{Token, tokenize};
use super::syntax_kind::{SymbolKind, TokenKind};
use crate::base::GrammarSource;

/// Tokenize and parse a complete grammar.
pub fn parse_grammar(source: GrammarSource) -> Result<Grammar> {
    let tokens = tokenize(&source)?;
    let root = {
        let mut parser = Parser::new(TokenCursor::new(&source, &tokens));
        parser.parse_grammar()?
    };
    debug!(
        grammar = %root.child(0).child(0).text(&source),
        productions = root.children().len().saturating_sub(1),
        "parsed grammar"
    );
    Ok(Grammar::new(source, root))
}

/// Parse grammar text with an optional origin path.
pub fn parse(text: &str, path: Option<&str>) -> Result<Grammar> {
    let source = match path {
        Some(path) => GrammarSource::new(text).with_path(path),
        None => GrammarSource::new(text),
    };
    parse_grammar(source)
}

/// A parsed node with the outermost tokens it consumed.
///
/// These differ from the node's own span only for a parenthesized leaf,
/// where `first`/`last` are the parentheses.
struct Spanned {
    node: GrammarSymbol,
    first: Token,
    last: Token,
}

impl Spanned {
    fn of(node: GrammarSymbol) -> Self {
        Self {
            first: node.first_token(),
            last: node.last_token(),
            node,
        }
    }

    /// A node of `kind` over two or more `parts`, spanning all their tokens.
    fn wrap(kind: SymbolKind, parts: Vec<Spanned>) -> Self {
        let first = parts[0].first;
        let last = parts[parts.len() - 1].last;
        let children = parts.into_iter().map(|p| p.node).collect();
        Self::of(GrammarSymbol::new(kind, first, last, Vec::new(), children))
    }
}

/// The parser state
struct Parser<'a> {
    cursor: TokenCursor<'a>,
}

impl<'a> Parser<'a> {
    fn new(cursor: TokenCursor<'a>) -> Self {
        Self { cursor }
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Grammar = GrammarDecl Production*
    fn parse_grammar(&mut self) -> Result<GrammarSymbol> {
        let declaration = self.parse_grammar_declaration()?;
        let first = declaration.first_token();
        let mut last = declaration.last_token();
        let mut children = vec![declaration];

        while !self.cursor.at_end() {
            let production = self.parse_production()?;
            last = production.last_token();
            children.push(production);
        }
        self.cursor.discard_annotations();

        Ok(GrammarSymbol::new(
            SymbolKind::Grammar,
            first,
            last,
            Vec::new(),
            children,
        ))
    }

    /// GrammarDecl = 'grammar' Identifier ';'
    fn parse_grammar_declaration(&mut self) -> Result<GrammarSymbol> {
        let leading = self.cursor.consume_annotations();
        let first = self.cursor.require_keyword("grammar")?;
        let name = self.parse_declared_name(SymbolKind::Identifier, leading)?;
        let last = self.cursor.require(TokenKind::Semicolon)?;

        Ok(GrammarSymbol::new(
            SymbolKind::GrammarDecl,
            first,
            last,
            Vec::new(),
            vec![name],
        ))
    }

    /// Production = 'fragment'? ProductionDecl ':' Alternation ';'
    fn parse_production(&mut self) -> Result<GrammarSymbol> {
        let leading = self.cursor.consume_annotations();
        let first = self.cursor.current();

        let is_fragment = self.cursor.at(TokenKind::Identifier)
            && self.cursor.current_text() == "fragment"
            && self.cursor.look_ahead().kind == TokenKind::Identifier;
        if is_fragment {
            self.cursor.bump();
        }

        let declaration = self.parse_declared_name(SymbolKind::ProductionDecl, leading)?;
        self.cursor.require(TokenKind::Colon)?;
        let body = self.parse_alternation()?.node;
        let last = self.cursor.require(TokenKind::Semicolon)?;

        Ok(GrammarSymbol::new(
            SymbolKind::Production,
            first,
            last,
            Vec::new(),
            vec![declaration, body],
        ))
    }

    /// Alternation = Group ('|' Group)*
    ///
    /// A single group is returned unwrapped.
    fn parse_alternation(&mut self) -> Result<Spanned> {
        let mut groups = vec![self.parse_group()?];
        while self.cursor.at(TokenKind::Pipe) {
            self.cursor.bump();
            groups.push(self.parse_group()?);
        }

        if groups.len() == 1 {
            return Ok(groups.remove(0));
        }
        Ok(Spanned::wrap(SymbolKind::Alternation, groups))
    }

    /// Group = Quantifier+
    ///
    /// A single element is returned unwrapped.
    fn parse_group(&mut self) -> Result<Spanned> {
        let mut elements = Vec::new();
        while self.cursor.current().kind.starts_nonterminal() {
            elements.push(self.parse_quantifier()?);
        }

        match elements.len() {
            0 => Err(self
                .cursor
                .failure_at(FailureKind::EmptyGroup, self.cursor.current())),
            1 => Ok(elements.remove(0)),
            _ => Ok(Spanned::wrap(SymbolKind::Group, elements)),
        }
    }

    /// Quantifier = NonTerminal ('*' | '+' | '?')?
    fn parse_quantifier(&mut self) -> Result<Spanned> {
        let base = self.parse_nonterminal()?;
        let kind = match self.cursor.current().kind {
            TokenKind::Star => SymbolKind::ZeroOrMoreQuantifier,
            TokenKind::Plus => SymbolKind::OneOrMoreQuantifier,
            TokenKind::Question => SymbolKind::ZeroOrOneQuantifier,
            _ => return Ok(base),
        };
        let suffix = self.cursor.consume();
        let annotations = self.cursor.consume_annotations();

        Ok(Spanned::of(GrammarSymbol::new(
            kind,
            base.first,
            suffix,
            annotations,
            vec![base.node],
        )))
    }

    /// NonTerminal = Identifier | '(' Alternation ')' | String ('..' String)?
    fn parse_nonterminal(&mut self) -> Result<Spanned> {
        let node = match self.cursor.current().kind {
            TokenKind::Identifier => self.parse_declared_name(SymbolKind::Identifier, Vec::new())?,
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::String => self.parse_string_or_range()?,
            _ => return Err(self.cursor.unexpected("identifier, string or '('")),
        };
        Ok(Spanned::of(node))
    }

    fn parse_parenthesized(&mut self) -> Result<Spanned> {
        let open = self.cursor.require(TokenKind::LParen)?;
        let inner = self.parse_alternation()?.node;
        let close = self.cursor.require(TokenKind::RParen)?;
        let trailing = self.cursor.consume_annotations();

        // Single-token leaves keep their own token so their text is the bare
        // name; the parentheses are still covered by the enclosing node.
        let node = match inner.kind() {
            SymbolKind::Identifier | SymbolKind::String => inner,
            _ => inner.with_span(open, close),
        };
        Ok(Spanned {
            node: node.with_annotations(trailing),
            first: open,
            last: close,
        })
    }

    fn parse_string_or_range(&mut self) -> Result<GrammarSymbol> {
        let first = self.parse_declared_name(SymbolKind::String, Vec::new())?;
        if !self.cursor.at(TokenKind::Dots) {
            return Ok(first);
        }
        self.cursor.bump();
        let last = self.parse_declared_name(SymbolKind::String, Vec::new())?;

        let source = self.cursor.source();
        for endpoint in [&first, &last] {
            let text = endpoint.text(source);
            if text.chars().count() != 3 {
                return Err(self.cursor.failure_at(
                    FailureKind::InvalidRangeEndpoint(text.to_string()),
                    endpoint.first_token(),
                ));
            }
        }
        let (first_text, last_text) = (first.text(source), last.text(source));
        if first_text > last_text {
            return Err(self.cursor.failure_at(
                FailureKind::RangeOutOfOrder {
                    first: first_text.to_string(),
                    last: last_text.to_string(),
                },
                first.first_token(),
            ));
        }

        Ok(GrammarSymbol::new(
            SymbolKind::CharacterRange,
            first.first_token(),
            last.last_token(),
            Vec::new(),
            vec![first, last],
        ))
    }

    /// A single-token node that takes the annotations written around it:
    /// `leading` (already drained by the caller), anything pending before
    /// the token, and anything crossed while moving past it.
    fn parse_declared_name(
        &mut self,
        kind: SymbolKind,
        leading: Vec<Annotation>,
    ) -> Result<GrammarSymbol> {
        let token_kind = match kind {
            SymbolKind::String => TokenKind::String,
            _ => TokenKind::Identifier,
        };
        let mut annotations = leading;
        annotations.extend(self.cursor.consume_annotations());
        let token = self.cursor.require(token_kind)?;
        annotations.extend(self.cursor.consume_annotations());
        Ok(GrammarSymbol::leaf(kind, token, annotations))
    }
}
