//! Compiles grammar productions into data model types
//!
//! Each production is classified by the shape of its body:
//!
//! | body                          | type                         |
//! |-------------------------------|------------------------------|
//! | `'a'`                         | enum with one value          |
//! | `'a' 'b'`                     | enum with one value `ab`     |
//! | `'a' \| 'b'`                  | enum with values `a`, `b`    |
//! | `A \| B`                      | base type deriving `A`, `B`  |
//! | `x`, `x*`, `a b? c+`, ...     | leaf type (see `members`)    |
//!
//! Types accumulate in a [`DataModelBuilder`] and are only frozen into
//! [`DataModelType`] values by [`DataModelBuilder::link`].

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::annotations::{self, AnnotationSet};
use super::data_model::DataModel;
use super::members::{LeafMembers, extract_members};
use super::metadata::{CompileOptions, DataModelMetadata};
use super::naming::{enum_value_name, to_pascal_case};
use super::types::{DataModelMember, DataModelType, EnumValue, built_in_kind};
use crate::base::{GrammarSource, TextRange};
use crate::parser::{
    FailureKind, Grammar, GrammarSymbol, ParseFailure, Result, SymbolKind, is_fragment,
};

/// Members added to every leaf type by `@generateLocations`.
const LOCATION_MEMBERS: [(&str, &str); 2] = [("Length", "length"), ("Offset", "offset")];
const LOCATION_TYPE: &str = "NUMBER";

/// A type that has been classified but not yet linked.
#[derive(Debug)]
struct TypeBuilder {
    declared_name: SmolStr,
    generated_name: SmolStr,
    summary: Option<String>,
    remarks: Option<String>,
    is_root: bool,
    base: Option<SmolStr>,
    shape: Shape,
    /// Range of the production's declared name
    range: TextRange,
}

#[derive(Debug)]
enum Shape {
    Enum(Vec<EnumValue>),
    Leaf(LeafMembers),
    Base(Vec<SmolStr>),
}

impl TypeBuilder {
    fn kind_name(&self) -> &'static str {
        match self.shape {
            Shape::Enum(_) => "enum",
            Shape::Leaf(_) => "leaf",
            Shape::Base(_) => "base",
        }
    }

    fn freeze(self) -> DataModelType {
        let mut data_type = match self.shape {
            Shape::Enum(values) => {
                DataModelType::new_enum(self.declared_name, self.generated_name, values)
            }
            Shape::Leaf(leaf) => DataModelType::new_leaf(
                self.declared_name,
                self.generated_name,
                leaf.members,
                leaf.to_string_entries,
            ),
            Shape::Base(derived) => {
                DataModelType::new_base(self.declared_name, self.generated_name, derived)
            }
        };
        data_type.summary = self.summary;
        data_type.remarks = self.remarks;
        data_type.is_root = self.is_root;
        data_type.base = self.base;
        data_type
    }
}

/// Accumulates compiled productions of one grammar until [`link`](Self::link).
pub struct DataModelBuilder<'g> {
    grammar: &'g Grammar,
    metadata: DataModelMetadata,
    types: IndexMap<SmolStr, TypeBuilder>,
}

impl<'g> DataModelBuilder<'g> {
    pub fn new(grammar: &'g Grammar, metadata: DataModelMetadata) -> Self {
        Self {
            grammar,
            metadata,
            types: IndexMap::new(),
        }
    }

    /// Builder with metadata read from the grammar and adjusted by `options`.
    pub fn with_options(grammar: &'g Grammar, options: &CompileOptions) -> Self {
        Self::new(grammar, options.apply(DataModelMetadata::from_grammar(grammar)))
    }

    pub fn metadata(&self) -> &DataModelMetadata {
        &self.metadata
    }

    fn source(&self) -> &'g GrammarSource {
        self.grammar.source()
    }

    fn fail(&self, kind: FailureKind, range: TextRange) -> ParseFailure {
        ParseFailure::new(kind, range, self.source())
    }

    /// Compile every production of the grammar.
    pub fn compile_all(&mut self) -> Result<()> {
        let grammar = self.grammar;
        for production in grammar.productions() {
            self.compile_production(production)?;
        }
        Ok(())
    }

    /// Classify one production and record the resulting type.
    ///
    /// Fragments and productions named after a built-in type are skipped.
    pub fn compile_production(&mut self, production: &GrammarSymbol) -> Result<()> {
        let source = self.source();
        let declaration = production.child(0);
        let name = declaration.text(source);

        if is_fragment(production) {
            trace!("[COMPILE] skipping fragment '{}'", name);
            return Ok(());
        }
        if built_in_kind(name).is_some() {
            trace!("[COMPILE] skipping built-in '{}'", name);
            return Ok(());
        }
        if self.types.contains_key(name) {
            return Err(self.fail(
                FailureKind::DuplicateTypeName(name.to_string()),
                declaration.range(),
            ));
        }

        let body = production.child(1);
        let set = AnnotationSet::new(declaration.annotations());
        let shape = self.classify(name, body, &set)?;

        let generated_name = set
            .text(annotations::CLASS_NAME)
            .or_else(|| set.text(annotations::NAME))
            .map(SmolStr::new)
            .unwrap_or_else(|| to_pascal_case(name));
        let builder = TypeBuilder {
            declared_name: SmolStr::new(name),
            generated_name,
            summary: set.text(annotations::SUMMARY).map(str::to_string),
            remarks: set.text(annotations::REMARKS).map(str::to_string),
            is_root: set.has(annotations::ROOT_OBJECT),
            base: None,
            shape,
            range: declaration.range(),
        };
        debug!(name, kind = builder.kind_name(), "compiled production");
        self.types.insert(builder.declared_name.clone(), builder);
        Ok(())
    }

    fn classify(&self, name: &str, body: &GrammarSymbol, set: &AnnotationSet<'_>) -> Result<Shape> {
        let source = self.source();
        let all = |kind: SymbolKind| body.children().iter().all(|c| c.kind() == kind);

        match body.kind() {
            SymbolKind::String => self.enum_shape(name, std::slice::from_ref(body), set),
            SymbolKind::Group if all(SymbolKind::String) => {
                let value: String = body.children().iter().map(|c| c.string_value(source)).collect();
                let values = vec![(value, body)];
                self.enum_values(name, values, set).map(Shape::Enum)
            }
            SymbolKind::Alternation if all(SymbolKind::String) => {
                self.enum_shape(name, body.children(), set)
            }
            SymbolKind::Alternation if all(SymbolKind::Identifier) => Ok(Shape::Base(
                body.children()
                    .iter()
                    .map(|c| SmolStr::new(c.text(source)))
                    .collect(),
            )),
            SymbolKind::Identifier | SymbolKind::Group => {
                extract_members(name, body, source).map(Shape::Leaf)
            }
            kind if kind.is_quantifier() => extract_members(name, body, source).map(Shape::Leaf),
            _ => Err(self.fail(
                FailureKind::UnrecognizedDataModel(name.to_string()),
                body.range(),
            )),
        }
    }

    fn enum_shape(
        &self,
        name: &str,
        strings: &[GrammarSymbol],
        set: &AnnotationSet<'_>,
    ) -> Result<Shape> {
        let source = self.source();
        let values = strings.iter().map(|s| (s.string_value(source), s)).collect();
        self.enum_values(name, values, set).map(Shape::Enum)
    }

    /// Build enum constants from `(value, node)` pairs. `@name` on a value
    /// node names the constant; `@serializedValues` on the production renames
    /// every serialized value.
    fn enum_values(
        &self,
        name: &str,
        values: Vec<(String, &GrammarSymbol)>,
        set: &AnnotationSet<'_>,
    ) -> Result<Vec<EnumValue>> {
        let serialized = set.list(annotations::SERIALIZED_VALUES);
        let mismatch = serialized
            .as_ref()
            .map(Vec::len)
            .filter(|&found| found != values.len());
        if let Some(found) = mismatch {
            let at = values.first().map(|(_, node)| node.range()).unwrap_or_default();
            return Err(self.fail(
                FailureKind::SerializedValuesMismatch {
                    type_name: name.to_string(),
                    expected: values.len(),
                    found,
                },
                at,
            ));
        }

        Ok(values
            .into_iter()
            .enumerate()
            .map(|(index, (value, node))| {
                let value_set = AnnotationSet::new(node.annotations());
                let generated_name = value_set
                    .text(annotations::NAME)
                    .map(SmolStr::new)
                    .unwrap_or_else(|| enum_value_name(&value, index));
                let serialized_name = serialized
                    .as_ref()
                    .map(|names| names[index].to_string())
                    .unwrap_or_else(|| value.clone());
                EnumValue {
                    value,
                    generated_name,
                    serialized_name,
                }
            })
            .collect())
    }

    /// Resolve cross-type references and freeze the model.
    ///
    /// 1. Every base type's derived names must name leaf or base types; each
    ///    of those gets its base set. A type claimed by two bases fails.
    /// 2. With `generateLocations`, leaf types gain `Length`/`Offset` members.
    /// 3. Every member must refer to a type of the model.
    pub fn link(mut self) -> Result<DataModel> {
        self.annotate_derived_types()?;
        if self.metadata.generate_locations {
            self.add_location_members()?;
        }
        self.check_member_types()?;

        let built_ins = DataModelType::built_ins();
        let user_types = self.types.len();
        let types = self
            .types
            .into_values()
            .map(TypeBuilder::freeze)
            .chain(built_ins)
            .map(Arc::new);
        let model = DataModel::new(self.metadata, types);

        debug!(user_types, total = model.len(), "linked data model");
        Ok(model)
    }

    fn annotate_derived_types(&mut self) -> Result<()> {
        let claims: Vec<(SmolStr, SmolStr, TextRange)> = self
            .types
            .values()
            .filter_map(|t| match &t.shape {
                Shape::Base(derived) => Some((t, derived)),
                _ => None,
            })
            .flat_map(|(base, derived)| {
                derived
                    .iter()
                    .map(move |d| (base.declared_name.clone(), d.clone(), base.range))
            })
            .collect();

        for (base, derived, range) in claims {
            let resolved = self
                .types
                .get(&derived)
                .is_some_and(|t| matches!(t.shape, Shape::Leaf(_) | Shape::Base(_)));
            if !resolved {
                return Err(self.fail(
                    FailureKind::UnresolvedDerivedType {
                        base: base.to_string(),
                        derived: derived.to_string(),
                    },
                    range,
                ));
            }

            let previous = self
                .types
                .get(&derived)
                .and_then(|t| t.base.clone());
            match previous {
                Some(first) if first != base => {
                    return Err(self.fail(
                        FailureKind::ConflictingBaseType {
                            derived: derived.to_string(),
                            first: first.to_string(),
                            second: base.to_string(),
                        },
                        range,
                    ));
                }
                Some(_) => {}
                None => {
                    trace!("[LINK] '{}' derives from '{}'", derived, base);
                    if let Some(target) = self.types.get_mut(&derived) {
                        target.base = Some(base);
                    }
                }
            }
        }
        Ok(())
    }

    fn add_location_members(&mut self) -> Result<()> {
        let grammar = self.grammar;
        for builder in self.types.values_mut() {
            let Shape::Leaf(leaf) = &mut builder.shape else {
                continue;
            };
            for (generated, serialized) in LOCATION_MEMBERS {
                if leaf.members.iter().any(|m| m.generated_name == generated) {
                    continue;
                }
                let type_name = builder.declared_name.to_string();
                let clash = if leaf.members.iter().any(|m| m.serialized_name == serialized) {
                    Some(FailureKind::DuplicateSerializedName {
                        type_name,
                        name: serialized.to_string(),
                    })
                } else if leaf.members.iter().any(|m| m.argument_name == serialized) {
                    Some(FailureKind::DuplicateArgumentName {
                        type_name,
                        name: serialized.to_string(),
                    })
                } else {
                    None
                };
                if let Some(kind) = clash {
                    return Err(ParseFailure::new(kind, builder.range, grammar.source()));
                }
                leaf.members.push(DataModelMember::new(
                    LOCATION_TYPE,
                    generated,
                    serialized,
                    serialized,
                    0,
                    true,
                ));
                leaf.ranges.push(builder.range);
            }
        }
        Ok(())
    }

    fn check_member_types(&self) -> Result<()> {
        for builder in self.types.values() {
            let Shape::Leaf(leaf) = &builder.shape else {
                continue;
            };
            for (member, range) in leaf.members.iter().zip(&leaf.ranges) {
                let target = &member.declared_name;
                if self.types.contains_key(target) || built_in_kind(target).is_some() {
                    continue;
                }
                return Err(self.fail(
                    FailureKind::UnresolvedMemberType {
                        type_name: builder.declared_name.to_string(),
                        member: member.generated_name.to_string(),
                        target: target.to_string(),
                    },
                    *range,
                ));
            }
        }
        Ok(())
    }
}

/// Compile and link every production of `grammar`.
pub fn build_data_model(grammar: &Grammar, options: &CompileOptions) -> Result<DataModel> {
    let mut builder = DataModelBuilder::with_options(grammar, options);
    builder.compile_all()?;
    builder.link()
}
