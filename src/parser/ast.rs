//! Annotated syntax tree for grammar notation
//!
//! Every node is a [`GrammarSymbol`]: a [`SymbolKind`] tag, the first and last
//! token it spans, the annotations attached to it and its children. Nodes are
//! built bottom-up by the parser and never mutated afterwards; each node owns
//! its children exclusively, so traversal is strictly top-down.
//!
//! ```text
//! Grammar
//! ├── GrammarDecl
//! │   └── Identifier (name, carries grammar-level annotations)
//! └── Production*
//!     ├── ProductionDecl (carries production annotations)
//!     └── body: Alternation | Group | quantifier | String | Identifier | CharacterRange
//! ```

use std::sync::LazyLock;

use smol_str::SmolStr;

use super::lexer::{Token, unquote};
use super::syntax_kind::SymbolKind;
use crate::base::{GrammarSource, TextRange, TextSize};

static EMPTY: LazyLock<GrammarSymbol> = LazyLock::new(GrammarSymbol::empty);

/// `@name` or `@name{value}` metadata attached to a syntax node.
///
/// The value is the trimmed text between the braces, or empty when no value
/// was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub name: SmolStr,
    pub value: String,
}

impl Annotation {
    pub fn new(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// An annotation written without a `{value}`
    pub fn flag(name: impl Into<SmolStr>) -> Self {
        Self::new(name, String::new())
    }
}

/// First annotation named `name`, if any.
pub fn find_annotation<'a>(annotations: &'a [Annotation], name: &str) -> Option<&'a Annotation> {
    annotations.iter().find(|a| a.name == name)
}

/// One node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSymbol {
    kind: SymbolKind,
    first_token: Token,
    last_token: Token,
    annotations: Vec<Annotation>,
    children: Vec<GrammarSymbol>,
}

impl GrammarSymbol {
    pub fn new(
        kind: SymbolKind,
        first_token: Token,
        last_token: Token,
        annotations: Vec<Annotation>,
        children: Vec<GrammarSymbol>,
    ) -> Self {
        Self {
            kind,
            first_token,
            last_token,
            annotations,
            children,
        }
    }

    /// A node spanning exactly one token, with no children.
    pub fn leaf(kind: SymbolKind, token: Token, annotations: Vec<Annotation>) -> Self {
        Self::new(kind, token, token, annotations, Vec::new())
    }

    fn empty() -> Self {
        let token = Token::eof(TextSize::new(0));
        Self::new(SymbolKind::Empty, token, token, Vec::new(), Vec::new())
    }

    /// The shared `Empty` sentinel.
    pub fn empty_ref() -> &'static GrammarSymbol {
        &EMPTY
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind == SymbolKind::Empty
    }

    pub fn first_token(&self) -> Token {
        self.first_token
    }

    pub fn last_token(&self) -> Token {
        self.last_token
    }

    /// Source range from the start of the first token to the end of the last.
    pub fn range(&self) -> TextRange {
        self.first_token.range.cover(self.last_token.range)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, name)
    }

    pub fn children(&self) -> &[GrammarSymbol] {
        &self.children
    }

    /// Child at `index`, or the `Empty` sentinel when absent.
    pub fn child(&self, index: usize) -> &GrammarSymbol {
        self.children.get(index).unwrap_or(&EMPTY)
    }

    /// The source text this node spans.
    pub fn text<'s>(&self, source: &'s GrammarSource) -> &'s str {
        if self.is_empty() {
            return "";
        }
        source.slice(self.range())
    }

    /// The unquoted value of a `String` node; empty for any other kind.
    pub fn string_value(&self, source: &GrammarSource) -> String {
        match self.kind {
            SymbolKind::String => unquote(self.first_token.text(source)),
            _ => String::new(),
        }
    }

    /// Copy of this node widened to span `first..=last`.
    pub(crate) fn with_span(mut self, first: Token, last: Token) -> Self {
        self.first_token = first;
        self.last_token = last;
        self
    }

    /// Copy of this node with `extra` appended to its annotations.
    pub(crate) fn with_annotations(mut self, extra: Vec<Annotation>) -> Self {
        self.annotations.extend(extra);
        self
    }

    /// Print this node back into canonical grammar text.
    ///
    /// Re-parsing the printed text yields a tree of identical shape.
    pub fn print(&self, source: &GrammarSource) -> String {
        let mut out = String::new();
        self.print_into(source, false, &mut out);
        out
    }

    fn print_into(&self, source: &GrammarSource, nested: bool, out: &mut String) {
        match self.kind {
            SymbolKind::Grammar => {
                for (index, child) in self.children.iter().enumerate() {
                    if index > 0 {
                        out.push('\n');
                    }
                    child.print_into(source, false, out);
                }
            }
            SymbolKind::GrammarDecl => {
                out.push_str("grammar ");
                self.child(0).print_into(source, false, out);
                out.push(';');
            }
            SymbolKind::Production => {
                let decl = self.child(0);
                if self.first_token != decl.first_token {
                    out.push_str("fragment ");
                }
                decl.print_into(source, false, out);
                out.push_str(": ");
                self.child(1).print_into(source, false, out);
                out.push(';');
            }
            SymbolKind::ProductionDecl | SymbolKind::Identifier | SymbolKind::String => {
                out.push_str(self.text(source));
                self.print_annotations(out);
            }
            SymbolKind::CharacterRange => {
                self.child(0).print_into(source, false, out);
                out.push_str("..");
                self.child(1).print_into(source, false, out);
                self.print_annotations(out);
            }
            SymbolKind::Alternation | SymbolKind::Group => {
                let parenthesize = nested || !self.annotations.is_empty();
                if parenthesize {
                    out.push('(');
                }
                let separator = if self.kind == SymbolKind::Group { " " } else { " | " };
                for (index, child) in self.children.iter().enumerate() {
                    if index > 0 {
                        out.push_str(separator);
                    }
                    let nest =
                        self.kind == SymbolKind::Group || child.kind == SymbolKind::Alternation;
                    child.print_into(source, nest, out);
                }
                if parenthesize {
                    out.push(')');
                }
                self.print_annotations(out);
            }
            SymbolKind::ZeroOrMoreQuantifier
            | SymbolKind::OneOrMoreQuantifier
            | SymbolKind::ZeroOrOneQuantifier => {
                let inner = self.child(0);
                if inner.kind.is_quantifier() {
                    out.push('(');
                    inner.print_into(source, false, out);
                    out.push(')');
                } else {
                    inner.print_into(source, true, out);
                }
                out.push_str(self.kind.quantifier_suffix().unwrap_or_default());
                self.print_annotations(out);
            }
            SymbolKind::Empty => {}
        }
    }

    fn print_annotations(&self, out: &mut String) {
        for annotation in &self.annotations {
            out.push_str(" @");
            out.push_str(&annotation.name);
            if !annotation.value.is_empty() {
                out.push('{');
                out.push_str(&annotation.value);
                out.push('}');
            }
        }
    }
}

/// A parsed grammar: the source it came from and the root `Grammar` node.
#[derive(Debug, Clone)]
pub struct Grammar {
    source: GrammarSource,
    root: GrammarSymbol,
}

impl Grammar {
    pub(crate) fn new(source: GrammarSource, root: GrammarSymbol) -> Self {
        Self { source, root }
    }

    pub fn source(&self) -> &GrammarSource {
        &self.source
    }

    pub fn root(&self) -> &GrammarSymbol {
        &self.root
    }

    /// The `GrammarDecl` node
    pub fn declaration(&self) -> &GrammarSymbol {
        self.root.child(0)
    }

    /// The declared grammar name node (carries grammar-level annotations)
    pub fn name_symbol(&self) -> &GrammarSymbol {
        self.declaration().child(0)
    }

    pub fn name(&self) -> &str {
        self.name_symbol().text(&self.source)
    }

    /// All `Production` nodes in source order
    pub fn productions(&self) -> impl Iterator<Item = &GrammarSymbol> {
        self.root.children().iter().skip(1)
    }

    /// Text of `symbol` in this grammar's source
    pub fn text_of<'g>(&'g self, symbol: &GrammarSymbol) -> &'g str {
        symbol.text(&self.source)
    }

    /// Print the whole grammar back into canonical text.
    pub fn print(&self) -> String {
        self.root.print(&self.source)
    }
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.source.text() == other.source.text() && self.root == other.root
    }
}

impl Eq for Grammar {}

/// Whether `production` was declared with a leading `fragment` keyword.
pub fn is_fragment(production: &GrammarSymbol) -> bool {
    production.kind() == SymbolKind::Production
        && production.first_token() != production.child(0).first_token()
}
