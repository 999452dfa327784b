//! Schema assembly
//!
//! Turns declarations into object definitions whose fields each carry a
//! frozen [`ResolutionStrategy`]. Assembly runs once, single-threaded; the
//! resulting [`Schema`] is then shared read-only by every request.

use crate::config::{SchemaConfig, TypeConfig};
use crate::core::context::{Arguments, Context};
use crate::core::error::{ConfigError, ResolveError};
use crate::core::field::{FieldConfig, MappingKey};
use crate::resolve::{ResolutionStrategy, StrategySelector};
use crate::source::Source;
use anyhow::Result;
use indexmap::IndexMap;
use serde_json::Value;

/// A declared field together with its selected strategy
///
/// The definition owns its declared-name cell. Neither the config it was
/// built from nor a clone of the definition can rename it, so the name and
/// the key it is stored under in an [`ObjectDefinition`] stay in step.
#[derive(Debug)]
pub struct FieldDefinition {
    config: FieldConfig,
    strategy: ResolutionStrategy,
}

impl FieldDefinition {
    /// Select the strategy for `config`
    pub fn new(config: FieldConfig) -> Self {
        let config = config.detached();
        let strategy = StrategySelector::select(&config);
        Self { config, strategy }
    }

    pub fn strategy(&self) -> &ResolutionStrategy {
        &self.strategy
    }

    pub fn explicit_accessor(&self) -> Option<&str> {
        self.config.explicit_accessor()
    }

    pub fn mapping_key(&self) -> Option<&MappingKey> {
        self.config.mapping_key()
    }

    pub fn argument_count(&self) -> usize {
        self.config.argument_count()
    }

    /// Current field name
    pub fn name(&self) -> String {
        self.config.declared_name().to_string()
    }

    pub fn resolve(
        &self,
        source: &dyn Source,
        arguments: &Arguments,
        context: &Context,
    ) -> Result<Value, ResolveError> {
        self.strategy.resolve(source, arguments, context)
    }
}

impl Clone for FieldDefinition {
    /// The clone gets its own name cell and strategy
    fn clone(&self) -> Self {
        FieldDefinition::new(self.config.clone())
    }
}

/// An object type and its fields, in declaration order
#[derive(Debug, Clone)]
pub struct ObjectDefinition {
    name: String,
    fields: IndexMap<String, FieldDefinition>,
}

impl ObjectDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field, selecting its strategy
    pub fn add_field(&mut self, config: FieldConfig) -> Result<&FieldDefinition, ConfigError> {
        let field_name = config.declared_name().to_string();
        if field_name.trim().is_empty() {
            return Err(ConfigError::BlankFieldName {
                type_name: self.name.clone(),
            });
        }
        if self.fields.contains_key(&field_name) {
            return Err(ConfigError::DuplicateField {
                type_name: self.name.clone(),
                field: field_name,
            });
        }

        let entry = self
            .fields
            .entry(field_name)
            .or_insert(FieldDefinition::new(config));
        Ok(entry)
    }

    fn from_config(type_config: &TypeConfig) -> Result<Self, ConfigError> {
        if type_config.name.trim().is_empty() {
            return Err(ConfigError::BlankTypeName);
        }

        let mut object = ObjectDefinition::new(type_config.name.clone());
        for declaration in &type_config.fields {
            object.add_field(declaration.to_field_config())?;
        }
        Ok(object)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Rename a field after its strategy was built
    ///
    /// Name-invoke strategies of the field call the new name from now on.
    /// The field keeps its position.
    pub fn rename_field(&mut self, from: &str, to: &str) -> Result<(), ConfigError> {
        if to.trim().is_empty() {
            return Err(ConfigError::BlankFieldName {
                type_name: self.name.clone(),
            });
        }
        let Some(index) = self.fields.get_index_of(from) else {
            return Err(ConfigError::UnknownField {
                type_name: self.name.clone(),
                field: from.to_string(),
            });
        };
        if from != to && self.fields.contains_key(to) {
            return Err(ConfigError::DuplicateField {
                type_name: self.name.clone(),
                field: to.to_string(),
            });
        }

        let Some((_, definition)) = self.fields.shift_remove_index(index) else {
            return Ok(());
        };
        definition.config.declared_name().rename(to);
        let (last, _) = self.fields.insert_full(to.to_string(), definition);
        self.fields.move_index(last, index);

        tracing::debug!(
            object = %self.name,
            from,
            to,
            "renamed field"
        );
        Ok(())
    }
}

/// All object definitions of a schema
#[derive(Debug, Clone, Default)]
pub struct Schema {
    objects: IndexMap<String, ObjectDefinition>,
}

impl Schema {
    /// Build a schema from declarations
    ///
    /// Duplicate type names are rejected; merge configurations with
    /// [`SchemaConfig::merge`] first.
    pub fn build(config: &SchemaConfig) -> Result<Self> {
        let mut schema = Schema::default();

        for type_config in &config.types {
            let object = ObjectDefinition::from_config(type_config)?;
            schema.insert(object)?;
        }

        tracing::debug!(
            objects = schema.objects.len(),
            fields = schema.objects.values().map(|o| o.fields.len()).sum::<usize>(),
            "built schema"
        );
        Ok(schema)
    }

    /// Add an object definition built by hand
    pub fn insert(&mut self, object: ObjectDefinition) -> Result<(), ConfigError> {
        if self.objects.contains_key(object.name()) {
            return Err(ConfigError::DuplicateType {
                type_name: object.name.clone(),
            });
        }
        self.objects.insert(object.name.clone(), object);
        Ok(())
    }

    pub fn object(&self, name: &str) -> Option<&ObjectDefinition> {
        self.objects.get(name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut ObjectDefinition> {
        self.objects.get_mut(name)
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectDefinition> {
        self.objects.values()
    }
}
