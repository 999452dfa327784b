//! Request-scoped data handed to argument-accepting accessors

use serde_json::{Map, Value};
use uuid::Uuid;

/// Already-coerced field arguments, keyed by argument name
pub type Arguments = Map<String, Value>;

/// Ambient data for one request
///
/// Strategies only ever borrow the context; it is never mutated during
/// resolution.
#[derive(Debug, Clone)]
pub struct Context {
    request_id: Uuid,
    data: Map<String, Value>,
}

impl Context {
    /// Create an empty context with a fresh request id
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            data: Map::new(),
        }
    }

    /// Attach a value under `key`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
