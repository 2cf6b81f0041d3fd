//! Grammar-level metadata and caller-side compile options

use smol_str::SmolStr;

use super::annotations::{self, AnnotationSet};
use crate::parser::Grammar;

/// Settings read from the annotations on the grammar declaration.
///
/// ```text
/// grammar Sarif @namespace{Microsoft.CodeAnalysis.Sarif} @generateLocations;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataModelMetadata {
    /// Declared grammar name
    pub name: SmolStr,
    /// Default namespace for generated code
    pub namespace: Option<String>,
    /// Leaf types gain `Length` and `Offset` members
    pub generate_locations: bool,
    /// Generators should emit equality methods; cleared by `@noGenerateEquals`
    pub generate_equals: bool,
}

impl DataModelMetadata {
    pub fn from_grammar(grammar: &Grammar) -> Self {
        let set = AnnotationSet::new(grammar.name_symbol().annotations());
        Self {
            name: SmolStr::new(grammar.name()),
            namespace: set.text(annotations::NAMESPACE).map(str::to_string),
            generate_locations: set.has(annotations::GENERATE_LOCATIONS),
            generate_equals: !set.has(annotations::NO_GENERATE_EQUALS),
        }
    }
}

/// Options for compiling a grammar into a data model.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Run the type hoister after linking
    pub hoist: bool,
    /// Override the grammar's `@generateLocations` flag
    pub generate_locations: Option<bool>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            hoist: true,
            generate_locations: None,
        }
    }
}

impl CompileOptions {
    /// Apply these options to metadata read from the grammar.
    pub fn apply(&self, mut metadata: DataModelMetadata) -> DataModelMetadata {
        if let Some(generate_locations) = self.generate_locations {
            metadata.generate_locations = generate_locations;
        }
        metadata
    }
}
