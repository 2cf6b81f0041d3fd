//! Data model value types: types, members, enum values and rendering plans.
//!
//! These are the frozen values handed to external generators. They are only
//! constructed by the builder (at link time), by the fixed built-in set and by
//! the hoister.

use smol_str::SmolStr;

// ============================================================================
// TYPE KINDS
// ============================================================================

/// What a [`DataModelType`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataModelTypeKind {
    BuiltInString,
    BuiltInNumber,
    BuiltInBoolean,
    BuiltInDictionary,
    BuiltInUri,
    BuiltInDateTime,
    BuiltInVersion,
    /// Closed set of string constants
    Enum,
    /// Record with members
    Leaf,
    /// Closed union of other leaf/base types
    Base,
}

impl DataModelTypeKind {
    pub fn is_built_in(self) -> bool {
        !matches!(self, Self::Enum | Self::Leaf | Self::Base)
    }
}

/// The fixed built-in types: (declared grammar name, generated name, kind).
pub const BUILT_IN_TYPES: [(&str, &str, DataModelTypeKind); 7] = [
    ("STRING", "String", DataModelTypeKind::BuiltInString),
    ("NUMBER", "Number", DataModelTypeKind::BuiltInNumber),
    ("BOOLEAN", "Boolean", DataModelTypeKind::BuiltInBoolean),
    ("DICTIONARY", "Dictionary", DataModelTypeKind::BuiltInDictionary),
    ("URI", "Uri", DataModelTypeKind::BuiltInUri),
    ("DATETIME", "DateTime", DataModelTypeKind::BuiltInDateTime),
    ("VERSION", "Version", DataModelTypeKind::BuiltInVersion),
];

/// Built-in kind for a declared grammar name, if it names one.
pub fn built_in_kind(declared_name: &str) -> Option<DataModelTypeKind> {
    BUILT_IN_TYPES
        .iter()
        .find(|(declared, _, _)| *declared == declared_name)
        .map(|(_, _, kind)| *kind)
}

// ============================================================================
// MEMBERS
// ============================================================================

/// One member (field) of a leaf type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataModelMember {
    /// Declared grammar name of the member's type
    pub declared_name: SmolStr,
    pub generated_name: SmolStr,
    pub serialized_name: SmolStr,
    pub argument_name: SmolStr,
    pub summary: Option<String>,
    /// Collection nesting depth: 0 = scalar, 1 = list, 2 = list of lists
    pub rank: u32,
    pub required: bool,
    pub pattern: Option<String>,
    pub minimum: Option<i64>,
    pub min_items: Option<u32>,
    pub unique_items: Option<bool>,
    pub default: Option<String>,
}

impl DataModelMember {
    /// A member with names derived by the caller and no validation constraints.
    pub fn new(
        declared_name: impl Into<SmolStr>,
        generated_name: impl Into<SmolStr>,
        serialized_name: impl Into<SmolStr>,
        argument_name: impl Into<SmolStr>,
        rank: u32,
        required: bool,
    ) -> Self {
        Self {
            declared_name: declared_name.into(),
            generated_name: generated_name.into(),
            serialized_name: serialized_name.into(),
            argument_name: argument_name.into(),
            summary: None,
            rank,
            required,
            pattern: None,
            minimum: None,
            min_items: None,
            unique_items: None,
            default: None,
        }
    }

    /// Copy of this member pointing at `declared_name` with `added_rank` more
    /// levels of collection nesting. Every other attribute is preserved.
    pub fn retargeted(&self, declared_name: &SmolStr, added_rank: u32) -> Self {
        Self {
            declared_name: declared_name.clone(),
            rank: self.rank + added_rank,
            ..self.clone()
        }
    }

    pub fn is_collection(&self) -> bool {
        self.rank > 0
    }
}

// ============================================================================
// ENUM VALUES AND RENDERING
// ============================================================================

/// One constant of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    /// The literal text as written in the grammar (unquoted)
    pub value: String,
    pub generated_name: SmolStr,
    pub serialized_name: String,
}

/// One step of a leaf type's string rendering plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToStringEntry {
    /// Literal text from a run of grammar strings
    Text(String),
    /// The member at `member` (index into the type's members); collection
    /// members produced from a delimited list are joined with `delimiter`
    Member {
        member: usize,
        delimiter: Option<String>,
    },
}

// ============================================================================
// TYPES
// ============================================================================

/// One generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataModelType {
    /// Production name in the grammar; unique within a model
    pub declared_name: SmolStr,
    pub generated_name: SmolStr,
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub kind: DataModelTypeKind,
    pub members: Vec<DataModelMember>,
    pub to_string_entries: Vec<ToStringEntry>,
    /// Enum constants (enum types only)
    pub values: Vec<EnumValue>,
    /// Declared names of the alternatives (base types only), as written
    pub derived: Vec<SmolStr>,
    /// Declared name of the base type this type derives from
    pub base: Option<SmolStr>,
    /// Marked with `@rootObject`
    pub is_root: bool,
}

impl DataModelType {
    fn bare(
        declared_name: impl Into<SmolStr>,
        generated_name: impl Into<SmolStr>,
        kind: DataModelTypeKind,
    ) -> Self {
        Self {
            declared_name: declared_name.into(),
            generated_name: generated_name.into(),
            summary: None,
            remarks: None,
            kind,
            members: Vec::new(),
            to_string_entries: Vec::new(),
            values: Vec::new(),
            derived: Vec::new(),
            base: None,
            is_root: false,
        }
    }

    /// The fixed set of built-in types.
    pub fn built_ins() -> Vec<DataModelType> {
        BUILT_IN_TYPES
            .iter()
            .map(|(declared, generated, kind)| Self::bare(*declared, *generated, *kind))
            .collect()
    }

    pub(crate) fn new_enum(
        declared_name: impl Into<SmolStr>,
        generated_name: impl Into<SmolStr>,
        values: Vec<EnumValue>,
    ) -> Self {
        Self {
            values,
            ..Self::bare(declared_name, generated_name, DataModelTypeKind::Enum)
        }
    }

    pub(crate) fn new_leaf(
        declared_name: impl Into<SmolStr>,
        generated_name: impl Into<SmolStr>,
        members: Vec<DataModelMember>,
        to_string_entries: Vec<ToStringEntry>,
    ) -> Self {
        Self {
            members,
            to_string_entries,
            ..Self::bare(declared_name, generated_name, DataModelTypeKind::Leaf)
        }
    }

    pub(crate) fn new_base(
        declared_name: impl Into<SmolStr>,
        generated_name: impl Into<SmolStr>,
        derived: Vec<SmolStr>,
    ) -> Self {
        Self {
            derived,
            ..Self::bare(declared_name, generated_name, DataModelTypeKind::Base)
        }
    }

    pub fn is_built_in(&self) -> bool {
        self.kind.is_built_in()
    }

    /// Member whose generated name is `name`
    pub fn member(&self, generated_name: &str) -> Option<&DataModelMember> {
        self.members.iter().find(|m| m.generated_name == generated_name)
    }

    /// Baseless single-member types are pass-through wrappers
    pub fn is_single_member_wrapper(&self) -> bool {
        self.base.is_none() && self.members.len() == 1
    }
}
