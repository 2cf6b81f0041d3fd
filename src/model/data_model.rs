//! The frozen data model
//!
//! ```text
//! DataModel
//! ├── metadata: DataModelMetadata
//! ├── types: IndexMap<declared name, Arc<DataModelType>>  (sorted by name)
//! └── derived: base name → sorted derived names
//! ```
//!
//! Types are shared behind `Arc` so a transformed model (see
//! [`crate::hoist`]) can reuse every type it leaves untouched.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::metadata::DataModelMetadata;
use super::types::{DataModelMember, DataModelType};

/// An immutable, linked data model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataModel {
    metadata: DataModelMetadata,
    types: IndexMap<SmolStr, Arc<DataModelType>>,
    derived: FxHashMap<SmolStr, Vec<SmolStr>>,
}

impl DataModel {
    /// Freeze `types` into a model ordered by declared name.
    pub fn new(
        metadata: DataModelMetadata,
        types: impl IntoIterator<Item = Arc<DataModelType>>,
    ) -> Self {
        let mut types: IndexMap<SmolStr, Arc<DataModelType>> = types
            .into_iter()
            .map(|t| (t.declared_name.clone(), t))
            .collect();
        types.sort_keys();

        let mut derived: FxHashMap<SmolStr, Vec<SmolStr>> = FxHashMap::default();
        for data_type in types.values() {
            if let Some(base) = &data_type.base {
                derived
                    .entry(base.clone())
                    .or_default()
                    .push(data_type.declared_name.clone());
            }
        }
        // Keys are visited in sorted order, so each list is already sorted.

        Self {
            metadata,
            types,
            derived,
        }
    }

    pub fn metadata(&self) -> &DataModelMetadata {
        &self.metadata
    }

    /// Type with the given declared grammar name.
    pub fn get(&self, declared_name: &str) -> Option<&DataModelType> {
        self.types.get(declared_name).map(Arc::as_ref)
    }

    pub fn contains(&self, declared_name: &str) -> bool {
        self.types.contains_key(declared_name)
    }

    /// All types, ordered by declared name.
    pub fn types(&self) -> impl Iterator<Item = &DataModelType> {
        self.types.values().map(Arc::as_ref)
    }

    pub(crate) fn shared_types(&self) -> impl Iterator<Item = &Arc<DataModelType>> {
        self.types.values()
    }

    /// Declared names of all types, ordered.
    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.types.keys()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Declared names of the types whose base is `base`, sorted ordinally.
    pub fn known_types_for(&self, base: &str) -> &[SmolStr] {
        self.derived.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The type a member refers to.
    pub fn type_for_member(&self, member: &DataModelMember) -> Option<&DataModelType> {
        self.get(&member.declared_name)
    }

    /// Types marked with `@rootObject`, ordered by declared name.
    pub fn root_types(&self) -> impl Iterator<Item = &DataModelType> {
        self.types().filter(|t| t.is_root)
    }
}
