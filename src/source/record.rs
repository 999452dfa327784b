//! Record-like sources: fixed-shape containers of named attributes

use super::{Call, Shape, Source};
use crate::core::error::ResolveError;
use crate::core::field::MappingKey;
use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A fixed set of named attributes
///
/// Every attribute reads like a zero-argument accessor, but none of them can
/// be called with arguments. The shape is fixed at construction.
///
/// Records also answer bracket lookups: a string key names an attribute and
/// an integer key is a position in declaration order, negative counting from
/// the end. Unknown attributes and out-of-range positions are misses.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSource {
    type_name: String,
    attributes: IndexMap<String, Value>,
}

impl RecordSource {
    pub fn new<I, K>(type_name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            attributes: attributes
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Build a record from any struct that serializes to a JSON object
    pub fn from_serialize<T: Serialize>(type_name: impl Into<String>, value: &T) -> Result<Self> {
        let type_name = type_name.into();
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self::new(type_name, map)),
            other => anyhow::bail!(
                "{} serialized to a non-object value ({}), cannot build a record",
                type_name,
                json_kind(&other)
            ),
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Attribute names in declaration order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

impl Source for RecordSource {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn shape(&self) -> Shape {
        Shape::Record
    }

    fn invoke(&self, accessor: &str, call: Call<'_>) -> Result<Value, ResolveError> {
        let value = self
            .attributes
            .get(accessor)
            .ok_or_else(|| ResolveError::no_such_accessor(&self.type_name, accessor))?;

        match call {
            Call::Bare => Ok(value.clone()),
            Call::WithArguments { .. } => Err(ResolveError::ArityMismatch {
                type_name: self.type_name.clone(),
                accessor: accessor.to_string(),
                expected: 0,
                given: call.arity(),
            }),
        }
    }

    fn lookup(&self, key: &MappingKey) -> Result<Option<Value>, ResolveError> {
        let value = match key {
            MappingKey::String(name) => self.attributes.get(name),
            MappingKey::Integer(index) => {
                let len = self.attributes.len() as i64;
                let index = if *index < 0 { len + index } else { *index };
                usize::try_from(index)
                    .ok()
                    .and_then(|i| self.attributes.get_index(i))
                    .map(|(_, value)| value)
            }
        };
        Ok(value.cloned())
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
