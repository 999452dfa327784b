//! Core module containing the field model, request context and error types

pub mod context;
pub mod error;
pub mod field;

pub use context::{Arguments, Context};
pub use error::{ConfigError, ResolveError};
pub use field::{FieldConfig, FieldName, MappingKey};
