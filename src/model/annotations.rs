//! Annotation names recognized by the model builder and their typed readers

use std::str::FromStr;

use crate::parser::{Annotation, FailureKind, find_annotation};

// Grammar declaration
pub const NAMESPACE: &str = "namespace";
pub const GENERATE_LOCATIONS: &str = "generateLocations";
pub const NO_GENERATE_EQUALS: &str = "noGenerateEquals";

// Productions and members
pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const CLASS_NAME: &str = "className";
pub const SUMMARY: &str = "summary";
pub const REMARKS: &str = "remarks";
pub const PATTERN: &str = "pattern";
pub const MINIMUM: &str = "minimum";
pub const MIN_ITEMS: &str = "minItems";
pub const UNIQUE_ITEMS: &str = "uniqueItems";
pub const DEFAULT: &str = "default";
pub const SERIALIZED_NAME: &str = "serializedName";
pub const ARGUMENT_NAME: &str = "argumentName";
pub const ROOT_OBJECT: &str = "rootObject";
pub const SERIALIZED_VALUES: &str = "serializedValues";

/// Read-only view over the annotations collected for one node.
///
/// Lookups are first-match by name. Unrecognized annotations are carried
/// along and ignored.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationSet<'a> {
    items: &'a [Annotation],
}

impl<'a> AnnotationSet<'a> {
    pub fn new(items: &'a [Annotation]) -> Self {
        Self { items }
    }

    /// Value of `name`, if present (possibly empty).
    pub fn value(&self, name: &str) -> Option<&'a str> {
        find_annotation(self.items, name).map(|a| a.value.as_str())
    }

    /// Value of `name` when present and non-empty.
    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.value(name).filter(|v| !v.is_empty())
    }

    pub fn has(&self, name: &str) -> bool {
        find_annotation(self.items, name).is_some()
    }

    /// Parse the value of `name` as a number.
    pub fn number<T: FromStr>(
        &self,
        name: &str,
        expected: &'static str,
    ) -> Result<Option<T>, FailureKind> {
        let Some(value) = self.value(name) else {
            return Ok(None);
        };
        value
            .parse()
            .map(Some)
            .map_err(|_| invalid(name, value, expected))
    }

    /// Parse the value of `name` as a boolean; a bare flag means `true`.
    pub fn boolean(&self, name: &str) -> Result<Option<bool>, FailureKind> {
        match self.value(name) {
            None => Ok(None),
            Some("") | Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(invalid(name, other, "true or false")),
        }
    }

    /// Comma separated, trimmed values of `name`.
    pub fn list(&self, name: &str) -> Option<Vec<&'a str>> {
        self.value(name)
            .map(|value| value.split(',').map(str::trim).collect())
    }
}

fn invalid(name: &str, value: &str, expected: &'static str) -> FailureKind {
    FailureKind::InvalidAnnotationValue {
        name: name.to_string(),
        value: value.to_string(),
        expected,
    }
}
