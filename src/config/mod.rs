//! Schema declaration loading
//!
//! Field declarations are plain data, usually loaded from YAML:
//!
//! ```yaml
//! types:
//!   - name: Post
//!     fields:
//!       - name: title
//!       - name: author
//!         method: author_name
//!       - name: slug
//!         hash_key: slug
//!       - name: excerpt
//!         arguments: [length]
//! ```

use crate::core::error::ConfigError;
use crate::core::field::{FieldConfig, MappingKey};
use crate::schema::Schema;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declaration of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Declared field name, also the fallback accessor name
    pub name: String,

    /// Explicit accessor to call instead of the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Key for bracket-style lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_key: Option<MappingKey>,

    /// Names of the arguments the field accepts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: None,
            hash_key: None,
            arguments: Vec::new(),
        }
    }

    /// Turn the declaration into a [`FieldConfig`]
    pub fn to_field_config(&self) -> FieldConfig {
        let mut config =
            FieldConfig::new(self.name.clone()).with_argument_count(self.arguments.len());
        if let Some(method) = &self.method {
            config = config.with_accessor(method.clone());
        }
        if let Some(key) = &self.hash_key {
            config = config.with_mapping_key(key.clone());
        }
        config
    }
}

/// Declaration of one object type and its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConfig {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

/// Complete set of type declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

impl SchemaConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::ParseError {
                file: None,
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Merge several configurations
    ///
    /// Types with the same name are combined. When both declare the same
    /// field, the later declaration replaces the earlier one in place.
    pub fn merge(configs: Vec<SchemaConfig>) -> Self {
        let mut merged = SchemaConfig::default();

        for config in configs {
            for type_config in config.types {
                match merged.types.iter_mut().find(|t| t.name == type_config.name) {
                    Some(existing) => {
                        for field in type_config.fields {
                            match existing.fields.iter_mut().find(|f| f.name == field.name) {
                                Some(slot) => *slot = field,
                                None => existing.fields.push(field),
                            }
                        }
                    }
                    None => merged.types.push(type_config),
                }
            }
        }

        merged
    }

    /// Find a type declaration by name
    pub fn find_type(&self, name: &str) -> Option<&TypeConfig> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Select a strategy for every declared field
    pub fn build(&self) -> Result<Schema> {
        Schema::build(self)
    }
}
