//! # fieldwise
//!
//! Field resolution strategies for a query-execution engine.
//!
//! Every declared field carries static configuration: an explicit accessor
//! name, a mapping key, or nothing (fall back to the field's own name), plus
//! the number of arguments it accepts. At schema build time that
//! configuration is inspected once and frozen into a [`ResolutionStrategy`].
//! Per request, the executor only calls [`ResolutionStrategy::resolve`].
//!
//! ## Features
//!
//! - **Fixed precedence**: explicit accessor, then mapping key, then declared name
//! - **Arity-aware**: arguments are only forwarded to accessors that take them
//! - **Record-aware**: record-like sources never receive arguments
//! - **Late renames**: name-based strategies read the field name at call time
//! - **Thread-safe**: strategies are immutable and `Send + Sync`
//! - **Configuration-Based**: declare fields in YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldwise::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Post {
//!     title: String,
//! }
//!
//! let table = Arc::new(
//!     AccessorTable::<Post>::new("Post")
//!         .attribute("title", |post| Ok(json!(post.title))),
//! );
//! let post = ObjectSource::new(Post { title: "Hello".to_string() }, table);
//!
//! let strategy = StrategySelector::select(&FieldConfig::new("title"));
//! let value = strategy
//!     .resolve(&post, &Arguments::new(), &Context::new())
//!     .unwrap();
//!
//! assert_eq!(value, json!("Hello"));
//! ```
//!
//! [`ResolutionStrategy`]: crate::resolve::ResolutionStrategy
//! [`ResolutionStrategy::resolve`]: crate::resolve::ResolutionStrategy::resolve

pub mod config;
pub mod core;
pub mod resolve;
pub mod schema;
pub mod source;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        context::{Arguments, Context},
        error::{ConfigError, ResolveError},
        field::{FieldConfig, FieldName, MappingKey},
    };

    // === Resolution ===
    pub use crate::resolve::{ResolutionStrategy, StrategyKind, StrategySelector};

    // === Sources ===
    pub use crate::source::{AccessorTable, Call, ObjectSource, RecordSource, Shape, Source};

    // === Config & Schema ===
    pub use crate::config::{FieldDeclaration, SchemaConfig, TypeConfig};
    pub use crate::schema::{FieldDefinition, ObjectDefinition, Schema};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde_json::Value;
}
