//! Mapping-like sources backed by `serde_json`
//!
//! JSON containers support bracket lookup but expose no accessors. Objects
//! are keyed by string, arrays by integer index (negative indexes count from
//! the end). A key of the wrong kind is a miss, not a failure.

use super::record::json_kind;
use super::{Call, Source};
use crate::core::error::ResolveError;
use crate::core::field::MappingKey;
use serde_json::{Map, Value};

impl Source for Value {
    fn type_name(&self) -> &str {
        json_kind(self)
    }

    fn invoke(&self, accessor: &str, _call: Call<'_>) -> Result<Value, ResolveError> {
        Err(ResolveError::no_such_accessor(self.type_name(), accessor))
    }

    fn lookup(&self, key: &MappingKey) -> Result<Option<Value>, ResolveError> {
        match self {
            Value::Object(map) => map.lookup(key),
            Value::Array(items) => Ok(key.as_integer().and_then(|index| {
                let len = items.len() as i64;
                let index = if index < 0 { len + index } else { index };
                usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .cloned()
            })),
            _ => Err(ResolveError::unsupported_lookup(self.type_name(), key)),
        }
    }
}

impl Source for Map<String, Value> {
    fn type_name(&self) -> &str {
        "object"
    }

    fn invoke(&self, accessor: &str, _call: Call<'_>) -> Result<Value, ResolveError> {
        Err(ResolveError::no_such_accessor(self.type_name(), accessor))
    }

    fn lookup(&self, key: &MappingKey) -> Result<Option<Value>, ResolveError> {
        Ok(key.as_str().and_then(|k| self.get(k)).cloned())
    }
}
