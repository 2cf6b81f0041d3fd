//! Grammar source text wrapper.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::span::{LineCol, LineIndex, TextRange, TextSize};

static NEXT_SOURCE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one [`GrammarSource`]; clones of a source share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(u32);

impl SourceId {
    /// Identity of positions that belong to no source
    pub const DETACHED: SourceId = SourceId(0);

    fn fresh() -> Self {
        SourceId(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The complete text of one grammar, with its origin path and line index.
///
/// The path is opaque metadata carried for diagnostics only; nothing in the
/// core reads from the filesystem. Cloning is cheap (reference counted).
#[derive(Debug, Clone)]
pub struct GrammarSource {
    id: SourceId,
    path: Option<Arc<str>>,
    text: Arc<str>,
    lines: Arc<LineIndex>,
}

impl GrammarSource {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let lines = Arc::new(LineIndex::new(&text));
        Self {
            id: SourceId::fresh(),
            path: None,
            text,
            lines,
        }
    }

    /// Attach the path the text was read from.
    pub fn with_path(mut self, path: impl Into<Arc<str>>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Arc<str>> {
        self.path.as_ref()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    pub fn len(&self) -> TextSize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Slice the text covered by `range`.
    pub fn slice(&self, range: TextRange) -> &str {
        &self.text[range]
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.lines.line_col(offset)
    }

    /// Whether two handles refer to the same source (one is a clone of the other).
    pub fn same_source(&self, other: &GrammarSource) -> bool {
        self.id == other.id
    }
}

impl From<&str> for GrammarSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for GrammarSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
