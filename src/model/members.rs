//! Leaf type member extraction
//!
//! Walks the elements of a leaf production left to right:
//!
//! | element            | result                                   |
//! |--------------------|------------------------------------------|
//! | `'text'` run       | literal text in the rendering plan       |
//! | `x`                | rank 0, required                         |
//! | `x?`               | rank 0, optional                         |
//! | `x*`               | rank 1, optional                         |
//! | `x+`               | rank 1, required                         |
//! | `x ('d' x)*`       | rank 1, required, joined with `d`        |
//! | `x? ('d' x)*`      | rank 1, optional, joined with `d`        |
//!
//! Quantifiers nest (`(x*)+` is rank 2); the outermost one decides whether
//! the member is required.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::annotations::{self, AnnotationSet};
use super::naming::{to_camel_case, to_pascal_case};
use super::types::{DataModelMember, ToStringEntry};
use crate::base::{GrammarSource, TextRange};
use crate::parser::{Annotation, FailureKind, GrammarSymbol, ParseFailure, Result, SymbolKind};

/// Members and rendering plan of one leaf type.
#[derive(Debug, Default)]
pub(crate) struct LeafMembers {
    pub members: Vec<DataModelMember>,
    pub to_string_entries: Vec<ToStringEntry>,
    /// Source range of the element each member was extracted from
    pub ranges: Vec<TextRange>,
}

/// Extract the members of the leaf type `type_name` from its production body.
pub(crate) fn extract_members(
    type_name: &str,
    body: &GrammarSymbol,
    source: &GrammarSource,
) -> Result<LeafMembers> {
    let elements = match body.kind() {
        SymbolKind::Group => body.children(),
        _ => std::slice::from_ref(body),
    };
    let mut extractor = MemberExtractor::new(type_name, source);

    let mut index = 0;
    while index < elements.len() {
        let element = &elements[index];
        if element.kind() == SymbolKind::String {
            extractor.text.push_str(&element.string_value(source));
            index += 1;
            continue;
        }
        extractor.flush_text();

        if let Some(delimiter) = delimiter_of(element, elements.get(index + 1), source) {
            let required = element.kind() == SymbolKind::Identifier;
            let (identifier, collected) = unwrap_quantifiers(element);
            let member = extractor.member(identifier, &collected, 1, required)?;
            extractor.push(member, Some(delimiter), element)?;
            index += 2;
            continue;
        }

        let member = extractor.scalar_or_collection(element)?;
        extractor.push(member, None, element)?;
        index += 1;
    }
    extractor.flush_text();

    Ok(LeafMembers {
        members: extractor.members,
        to_string_entries: extractor.entries,
        ranges: extractor.ranges,
    })
}

/// Delimiter of the `x ('d' x)*` idiom starting at `element`, if it matches.
fn delimiter_of(
    element: &GrammarSymbol,
    next: Option<&GrammarSymbol>,
    source: &GrammarSource,
) -> Option<String> {
    let leading = match element.kind() {
        SymbolKind::Identifier => element,
        SymbolKind::ZeroOrOneQuantifier if element.child(0).kind() == SymbolKind::Identifier => {
            element.child(0)
        }
        _ => return None,
    };

    let next = next?;
    if next.kind() != SymbolKind::ZeroOrMoreQuantifier {
        return None;
    }
    let group = next.child(0);
    if group.kind() != SymbolKind::Group || group.children().len() != 2 {
        return None;
    }
    let (delimiter, repeated) = (group.child(0), group.child(1));
    if delimiter.kind() != SymbolKind::String
        || repeated.kind() != SymbolKind::Identifier
        || repeated.text(source) != leading.text(source)
    {
        return None;
    }
    Some(delimiter.string_value(source))
}

/// Strip quantifier wrappers, returning the innermost node and every
/// annotation met on the way (outermost first).
fn unwrap_quantifiers(element: &GrammarSymbol) -> (&GrammarSymbol, Vec<Annotation>) {
    let mut collected = Vec::new();
    let mut current = element;
    loop {
        collected.extend(current.annotations().iter().cloned());
        if !current.kind().is_quantifier() {
            return (current, collected);
        }
        current = current.child(0);
    }
}

struct MemberExtractor<'a> {
    type_name: &'a str,
    source: &'a GrammarSource,
    members: Vec<DataModelMember>,
    entries: Vec<ToStringEntry>,
    ranges: Vec<TextRange>,
    text: String,
    generated: FxHashSet<SmolStr>,
    serialized: FxHashSet<SmolStr>,
    arguments: FxHashSet<SmolStr>,
}

impl<'a> MemberExtractor<'a> {
    fn new(type_name: &'a str, source: &'a GrammarSource) -> Self {
        Self {
            type_name,
            source,
            members: Vec::new(),
            entries: Vec::new(),
            ranges: Vec::new(),
            text: String::new(),
            generated: FxHashSet::default(),
            serialized: FxHashSet::default(),
            arguments: FxHashSet::default(),
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.entries
                .push(ToStringEntry::Text(std::mem::take(&mut self.text)));
        }
    }

    fn fail(&self, kind: FailureKind, at: &GrammarSymbol) -> ParseFailure {
        ParseFailure::new(kind, at.range(), self.source)
    }

    /// `x`, `x?`, `x*`, `x+` and nestings of them.
    fn scalar_or_collection(&self, element: &GrammarSymbol) -> Result<DataModelMember> {
        let required = matches!(
            element.kind(),
            SymbolKind::Identifier | SymbolKind::OneOrMoreQuantifier
        );
        let rank = quantifier_rank(element);
        let (identifier, collected) = unwrap_quantifiers(element);
        self.member(identifier, &collected, rank, required)
    }

    fn member(
        &self,
        identifier: &GrammarSymbol,
        collected: &[Annotation],
        rank: u32,
        required: bool,
    ) -> Result<DataModelMember> {
        if identifier.kind() != SymbolKind::Identifier {
            return Err(self.fail(
                FailureKind::UnrecognizedDataModel(self.type_name.to_string()),
                identifier,
            ));
        }

        let grammar_name = identifier.text(self.source);
        let set = AnnotationSet::new(collected);
        let located = |kind| self.fail(kind, identifier);

        let declared = set.text(annotations::TYPE).unwrap_or(grammar_name);
        let generated = set
            .text(annotations::NAME)
            .map(SmolStr::new)
            .unwrap_or_else(|| to_pascal_case(grammar_name));
        let serialized = set
            .text(annotations::SERIALIZED_NAME)
            .map(SmolStr::new)
            .unwrap_or_else(|| to_camel_case(&generated));
        let argument = set
            .text(annotations::ARGUMENT_NAME)
            .map(SmolStr::new)
            .unwrap_or_else(|| to_camel_case(&generated));
        let mut member =
            DataModelMember::new(declared, generated, serialized, argument, rank, required);
        member.summary = set.text(annotations::SUMMARY).map(str::to_string);
        member.pattern = set.text(annotations::PATTERN).map(str::to_string);
        member.default = set.text(annotations::DEFAULT).map(str::to_string);
        member.minimum = set
            .number(annotations::MINIMUM, "an integer")
            .map_err(located)?;
        member.min_items = set
            .number(annotations::MIN_ITEMS, "a non-negative integer")
            .map_err(located)?;
        member.unique_items = set.boolean(annotations::UNIQUE_ITEMS).map_err(located)?;
        Ok(member)
    }

    fn push(
        &mut self,
        member: DataModelMember,
        delimiter: Option<String>,
        at: &GrammarSymbol,
    ) -> Result<()> {
        let type_name = self.type_name.to_string();
        if !self.generated.insert(member.generated_name.clone()) {
            return Err(self.fail(
                FailureKind::DuplicateGeneratedName {
                    type_name,
                    name: member.generated_name.to_string(),
                },
                at,
            ));
        }
        if !self.serialized.insert(member.serialized_name.clone()) {
            return Err(self.fail(
                FailureKind::DuplicateSerializedName {
                    type_name,
                    name: member.serialized_name.to_string(),
                },
                at,
            ));
        }
        if !self.arguments.insert(member.argument_name.clone()) {
            return Err(self.fail(
                FailureKind::DuplicateArgumentName {
                    type_name,
                    name: member.argument_name.to_string(),
                },
                at,
            ));
        }

        self.entries.push(ToStringEntry::Member {
            member: self.members.len(),
            delimiter,
        });
        self.members.push(member);
        self.ranges.push(at.range());
        Ok(())
    }
}

/// Number of `*`/`+` wrappers around the innermost node.
fn quantifier_rank(element: &GrammarSymbol) -> u32 {
    let mut rank = 0;
    let mut current = element;
    while current.kind().is_quantifier() {
        if current.kind() != SymbolKind::ZeroOrOneQuantifier {
            rank += 1;
        }
        current = current.child(0);
    }
    rank
}
