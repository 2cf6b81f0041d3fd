//! # Data Model
//!
//! Compiles a parsed [`Grammar`](crate::parser::Grammar) into a typed
//! [`DataModel`]: enums, leaf (record) types, base (union) types and the
//! fixed built-in types.
//!
//! ## Pipeline
//!
//! ```text
//! Grammar ──compile_production──▶ DataModelBuilder ──link──▶ DataModel
//! ```
//!
//! - [`DataModelBuilder::compile_production`] classifies one production
//! - [`DataModelBuilder::link`] resolves base types, adds location members,
//!   checks that every member refers to a known type and freezes the result
//!
//! Grammar-level settings live in [`DataModelMetadata`]; caller overrides in
//! [`CompileOptions`].

mod annotations;
mod builder;
mod data_model;
mod members;
mod metadata;
mod naming;
mod types;

pub use annotations::AnnotationSet;
pub use builder::{DataModelBuilder, build_data_model};
pub use data_model::DataModel;
pub use metadata::{CompileOptions, DataModelMetadata};
pub use naming::{enum_value_name, to_camel_case, to_pascal_case};
pub use types::{
    BUILT_IN_TYPES, DataModelMember, DataModelType, DataModelTypeKind, EnumValue, ToStringEntry,
    built_in_kind,
};

/// Annotation names recognized by the builder
pub mod annotation_names {
    pub use super::annotations::{
        ARGUMENT_NAME, CLASS_NAME, DEFAULT, GENERATE_LOCATIONS, MIN_ITEMS, MINIMUM, NAME,
        NAMESPACE, NO_GENERATE_EQUALS, PATTERN, REMARKS, ROOT_OBJECT, SERIALIZED_NAME,
        SERIALIZED_VALUES, SUMMARY, TYPE, UNIQUE_ITEMS,
    };
}
