//! Source adapters
//!
//! A [`Source`] is what a resolution strategy sees of a raw data object. Raw
//! values are wrapped at the boundary where they enter the engine, and the
//! wrapper declares up front which accessors exist, whether bracket lookup is
//! supported, and what [`Shape`] the value has. Strategies never inspect the
//! underlying type.
//!
//! Adapters provided here:
//! - [`ObjectSource`]: a Rust value plus an [`AccessorTable`] allow-list
//! - [`RecordSource`]: a fixed-shape container of named attributes
//! - `serde_json::Value` and `serde_json::Map`: mapping-like containers

pub mod json;
pub mod record;
pub mod table;

pub use record::RecordSource;
pub use table::{AccessorTable, ObjectSource};

use crate::core::context::{Arguments, Context};
use crate::core::error::ResolveError;
use crate::core::field::MappingKey;
use serde_json::Value;

/// Capability tag describing how a source reacts to argument-carrying calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// General object: accessors may accept `(arguments, context)`
    Object,
    /// Record-like structure: attributes only, never callable with arguments
    Record,
}

/// How an accessor is being called
#[derive(Debug, Clone, Copy)]
pub enum Call<'a> {
    /// Zero-argument form
    Bare,
    /// Two-argument form
    WithArguments {
        arguments: &'a Arguments,
        context: &'a Context,
    },
}

impl Call<'_> {
    /// Number of call arguments this form passes
    pub fn arity(&self) -> usize {
        match self {
            Call::Bare => 0,
            Call::WithArguments { .. } => 2,
        }
    }
}

/// A data object as seen by the resolution strategies
pub trait Source: Send + Sync {
    /// Name used in error messages
    fn type_name(&self) -> &str;

    /// Shape tag consulted by the name-invoke strategy
    fn shape(&self) -> Shape {
        Shape::Object
    }

    /// Invoke the accessor named `accessor`
    ///
    /// Fails with [`ResolveError::NoSuchAccessor`] when the source exposes no
    /// such accessor.
    fn invoke(&self, accessor: &str, call: Call<'_>) -> Result<Value, ResolveError>;

    /// Bracket-style lookup
    ///
    /// `Ok(None)` means the key is absent. Sources without a lookup capability
    /// keep the default, which fails with [`ResolveError::UnsupportedLookup`].
    fn lookup(&self, key: &MappingKey) -> Result<Option<Value>, ResolveError> {
        Err(ResolveError::unsupported_lookup(self.type_name(), key))
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn invoke(&self, accessor: &str, call: Call<'_>) -> Result<Value, ResolveError> {
        (**self).invoke(accessor, call)
    }

    fn lookup(&self, key: &MappingKey) -> Result<Option<Value>, ResolveError> {
        (**self).lookup(key)
    }
}

impl<S: Source + ?Sized> Source for std::sync::Arc<S> {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn invoke(&self, accessor: &str, call: Call<'_>) -> Result<Value, ResolveError> {
        (**self).invoke(accessor, call)
    }

    fn lookup(&self, key: &MappingKey) -> Result<Option<Value>, ResolveError> {
        (**self).lookup(key)
    }
}
