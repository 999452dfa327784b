//! Declared accessor tables for Rust values
//!
//! Rust has no member lookup by name, so objects that take part in name-based
//! resolution publish an explicit allow-list: each entry maps an accessor
//! name to a closure. Anything not in the table does not exist as far as the
//! strategies are concerned.

use super::{Call, Shape, Source};
use crate::core::context::{Arguments, Context};
use crate::core::error::ResolveError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type AttributeFn<T> = Arc<dyn Fn(&T) -> anyhow::Result<Value> + Send + Sync>;
type MethodFn<T> = Arc<dyn Fn(&T, &Arguments, &Context) -> anyhow::Result<Value> + Send + Sync>;

/// One entry of an [`AccessorTable`]
pub enum Accessor<T> {
    /// Zero-argument accessor
    Attribute(AttributeFn<T>),
    /// Accessor taking `(arguments, context)`
    Method(MethodFn<T>),
}

impl<T> Accessor<T> {
    /// Number of call arguments the accessor accepts
    pub fn arity(&self) -> usize {
        match self {
            Accessor::Attribute(_) => 0,
            Accessor::Method(_) => 2,
        }
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Attribute(f) => Accessor::Attribute(f.clone()),
            Accessor::Method(f) => Accessor::Method(f.clone()),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Attribute(_) => f.write_str("Attribute"),
            Accessor::Method(_) => f.write_str("Method"),
        }
    }
}

/// Allow-list of accessors callable by name on values of type `T`
///
/// # Example
///
/// ```
/// use fieldwise::source::AccessorTable;
/// use serde_json::json;
///
/// struct Post {
///     title: String,
/// }
///
/// let table = AccessorTable::<Post>::new("Post")
///     .attribute("title", |post| Ok(json!(post.title)))
///     .method("excerpt", |post, args, _ctx| {
///         let len = args.get("length").and_then(|v| v.as_u64()).unwrap_or(10) as usize;
///         Ok(json!(post.title.chars().take(len).collect::<String>()))
///     });
///
/// assert!(table.contains("title"));
/// assert!(!table.contains("body"));
/// ```
pub struct AccessorTable<T> {
    type_name: String,
    accessors: IndexMap<String, Accessor<T>>,
}

impl<T> AccessorTable<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            accessors: IndexMap::new(),
        }
    }

    /// Register a zero-argument accessor
    pub fn attribute<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.accessors
            .insert(name.into(), Accessor::Attribute(Arc::new(f)));
        self
    }

    /// Register an accessor taking `(arguments, context)`
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T, &Arguments, &Context) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.accessors.insert(name.into(), Accessor::Method(Arc::new(f)));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&Accessor<T>> {
        self.accessors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    /// Accessor names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Call the accessor named `name` on `target`
    pub fn invoke(&self, target: &T, name: &str, call: Call<'_>) -> Result<Value, ResolveError> {
        let accessor = self
            .get(name)
            .ok_or_else(|| ResolveError::no_such_accessor(&self.type_name, name))?;

        let result = match (accessor, call) {
            (Accessor::Attribute(f), Call::Bare) => f(target),
            (
                Accessor::Method(f),
                Call::WithArguments {
                    arguments,
                    context,
                },
            ) => f(target, arguments, context),
            (accessor, call) => {
                return Err(ResolveError::ArityMismatch {
                    type_name: self.type_name.clone(),
                    accessor: name.to_string(),
                    expected: accessor.arity(),
                    given: call.arity(),
                });
            }
        };

        result.map_err(|source| ResolveError::Accessor {
            type_name: self.type_name.clone(),
            accessor: name.to_string(),
            source,
        })
    }
}

impl<T> fmt::Debug for AccessorTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorTable")
            .field("type_name", &self.type_name)
            .field("accessors", &self.accessors)
            .finish()
    }
}

/// A Rust value exposed through a shared [`AccessorTable`]
///
/// The table is usually built once per type and shared by every instance.
pub struct ObjectSource<T> {
    value: T,
    table: Arc<AccessorTable<T>>,
}

impl<T> ObjectSource<T> {
    pub fn new(value: T, table: Arc<AccessorTable<T>>) -> Self {
        Self { value, table }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Send + Sync> Source for ObjectSource<T> {
    fn type_name(&self) -> &str {
        self.table.type_name()
    }

    fn shape(&self) -> Shape {
        Shape::Object
    }

    fn invoke(&self, accessor: &str, call: Call<'_>) -> Result<Value, ResolveError> {
        self.table.invoke(&self.value, accessor, call)
    }
}
