//! Field declarations and the data a resolution strategy is built from

use crate::core::error::ConfigError;
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Key used for bracket-style lookup on mapping-like sources
///
/// String and integer keys are distinct: looking up `Integer(1)` on a map
/// keyed by `"1"` is a miss, not a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingKey {
    Integer(i64),
    String(String),
}

impl MappingKey {
    /// Get the key as a string if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MappingKey::String(s) => Some(s),
            MappingKey::Integer(_) => None,
        }
    }

    /// Get the key as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MappingKey::Integer(i) => Some(*i),
            MappingKey::String(_) => None,
        }
    }
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKey::String(s) => write!(f, "{:?}", s),
            MappingKey::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for MappingKey {
    fn from(value: &str) -> Self {
        MappingKey::String(value.to_string())
    }
}

impl From<String> for MappingKey {
    fn from(value: String) -> Self {
        MappingKey::String(value)
    }
}

impl From<i64> for MappingKey {
    fn from(value: i64) -> Self {
        MappingKey::Integer(value)
    }
}

/// Shared, renamable name of a declared field
///
/// Clones point at the same cell. A rename is published atomically, so a
/// concurrent reader sees either the old name or the new one.
///
/// Outside the crate the cell is read-only. Renames go through
/// [`FieldConfig::rename`] or
/// [`ObjectDefinition::rename_field`](crate::schema::ObjectDefinition::rename_field).
#[derive(Clone)]
pub struct FieldName(Arc<ArcSwap<String>>);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(name.into())))
    }

    /// Owned snapshot of the current name
    pub fn current(&self) -> Arc<String> {
        self.0.load_full()
    }

    /// Run `f` against the current name without taking a reference count
    ///
    /// The name stays pinned for the duration of `f`, so keep `f` short.
    pub fn with_current<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let guard = self.0.load();
        f(guard.as_str())
    }

    /// Publish a new name to every holder of this cell
    ///
    /// Callers validate the name.
    pub(crate) fn rename(&self, name: impl Into<String>) {
        self.0.store(Arc::new(name.into()));
    }

    /// A new cell holding the current name
    pub(crate) fn detach(&self) -> FieldName {
        self.with_current(|name| FieldName::new(name))
    }

    /// Whether two handles share the same cell
    pub fn same_cell(&self, other: &FieldName) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldName").field(&*self.0.load()).finish()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.load())
    }
}

/// Static description of one declared field
///
/// Everything except the declared name is fixed once the config is built.
/// Clones share the declared-name cell with the original.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    explicit_accessor: Option<String>,
    mapping_key: Option<MappingKey>,
    declared_name: FieldName,
    argument_count: usize,
}

impl FieldConfig {
    /// Create a config that falls back to the field's own name
    pub fn new(declared_name: impl Into<String>) -> Self {
        Self {
            explicit_accessor: None,
            mapping_key: None,
            declared_name: FieldName::new(declared_name),
            argument_count: 0,
        }
    }

    /// Resolve through an explicitly named accessor
    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.explicit_accessor = Some(accessor.into());
        self
    }

    /// Resolve through a bracket-style lookup
    pub fn with_mapping_key(mut self, key: impl Into<MappingKey>) -> Self {
        self.mapping_key = Some(key.into());
        self
    }

    /// Number of arguments the field declares
    pub fn with_argument_count(mut self, count: usize) -> Self {
        self.argument_count = count;
        self
    }

    pub fn explicit_accessor(&self) -> Option<&str> {
        self.explicit_accessor.as_deref()
    }

    pub fn mapping_key(&self) -> Option<&MappingKey> {
        self.mapping_key.as_ref()
    }

    /// Handle to the shared declared-name cell
    pub fn declared_name(&self) -> &FieldName {
        &self.declared_name
    }

    pub fn argument_count(&self) -> usize {
        self.argument_count
    }

    /// Whether the field accepts arguments
    pub fn takes_arguments(&self) -> bool {
        self.argument_count > 0
    }

    /// Rename the field
    ///
    /// Strategies already built from this config observe the new name on
    /// their next resolution. Blank names are rejected and leave the
    /// current name in place.
    pub fn rename(&self, name: impl Into<String>) -> Result<(), ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::BlankRename {
                field: self.declared_name.to_string(),
            });
        }
        self.declared_name.rename(name);
        Ok(())
    }

    /// Copy of this config with its own declared-name cell
    pub(crate) fn detached(&self) -> FieldConfig {
        FieldConfig {
            explicit_accessor: self.explicit_accessor.clone(),
            mapping_key: self.mapping_key.clone(),
            declared_name: self.declared_name.detach(),
            argument_count: self.argument_count,
        }
    }
}
