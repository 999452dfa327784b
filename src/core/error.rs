//! Typed errors for field resolution and schema assembly
//!
//! Resolution failures are never recovered locally. They are handed back
//! unchanged so the executor can turn them into field-level query errors
//! without aborting sibling fields.
//!
//! # Error Categories
//!
//! - [`ResolveError`]: a strategy could not fetch a value from a source
//! - [`ConfigError`]: a schema declaration could not be turned into strategies
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldwise::prelude::*;
//!
//! match strategy.resolve(&source, &arguments, &context) {
//!     Ok(value) => println!("resolved: {}", value),
//!     Err(ResolveError::NoSuchAccessor { accessor, .. }) => {
//!         println!("source has no accessor named {}", accessor);
//!     }
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use crate::core::field::MappingKey;
use thiserror::Error;

/// Errors raised while resolving a field against a source
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The source exposes no accessor with this name
    #[error("{type_name} has no accessor named '{accessor}'")]
    NoSuchAccessor { type_name: String, accessor: String },

    /// The source does not support bracket-style lookup
    #[error("{type_name} does not support lookup (key {key})")]
    UnsupportedLookup { type_name: String, key: MappingKey },

    /// The accessor exists but cannot be called with this many arguments
    #[error("{type_name}.{accessor} takes {expected} argument(s), called with {given}")]
    ArityMismatch {
        type_name: String,
        accessor: String,
        expected: usize,
        given: usize,
    },

    /// The lookup itself failed, as opposed to missing the key
    #[error("lookup of {key} on {type_name} failed: {source}")]
    Lookup {
        type_name: String,
        key: MappingKey,
        #[source]
        source: anyhow::Error,
    },

    /// The accessor ran and returned an error
    #[error("{type_name}.{accessor} failed: {source}")]
    Accessor {
        type_name: String,
        accessor: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ResolveError {
    pub fn no_such_accessor(type_name: impl Into<String>, accessor: impl Into<String>) -> Self {
        ResolveError::NoSuchAccessor {
            type_name: type_name.into(),
            accessor: accessor.into(),
        }
    }

    pub fn unsupported_lookup(type_name: impl Into<String>, key: &MappingKey) -> Self {
        ResolveError::UnsupportedLookup {
            type_name: type_name.into(),
            key: key.clone(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolveError::NoSuchAccessor { .. } => "NO_SUCH_ACCESSOR",
            ResolveError::UnsupportedLookup { .. } => "UNSUPPORTED_LOOKUP",
            ResolveError::ArityMismatch { .. } => "ARITY_MISMATCH",
            ResolveError::Lookup { .. } => "LOOKUP_FAILED",
            ResolveError::Accessor { .. } => "ACCESSOR_FAILED",
        }
    }

    /// Name of the source type the failure was raised against
    pub fn type_name(&self) -> &str {
        match self {
            ResolveError::NoSuchAccessor { type_name, .. }
            | ResolveError::UnsupportedLookup { type_name, .. }
            | ResolveError::ArityMismatch { type_name, .. }
            | ResolveError::Lookup { type_name, .. }
            | ResolveError::Accessor { type_name, .. } => type_name,
        }
    }
}

/// Errors raised while turning declarations into a schema
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a declaration file
    #[error("Failed to parse schema config{}: {message}", .file.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A field was declared without a name
    #[error("Type '{type_name}' declares a field with an empty name")]
    BlankFieldName { type_name: String },

    /// A type was declared without a name
    #[error("A type is declared with an empty name")]
    BlankTypeName,

    /// The same field name appears twice within one type
    #[error("Type '{type_name}' declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },

    /// A field was renamed to an empty name
    #[error("Field '{field}' cannot be renamed to an empty name")]
    BlankRename { field: String },

    /// The same type name appears twice within one schema
    #[error("Type '{type_name}' is declared more than once")]
    DuplicateType { type_name: String },

    /// A rename targeted a field that is not declared
    #[error("Type '{type_name}' has no field '{field}'")]
    UnknownField { type_name: String, field: String },
}

impl ConfigError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::BlankFieldName { .. } => "BLANK_FIELD_NAME",
            ConfigError::BlankTypeName => "BLANK_TYPE_NAME",
            ConfigError::DuplicateField { .. } => "DUPLICATE_FIELD",
            ConfigError::BlankRename { .. } => "BLANK_RENAME",
            ConfigError::DuplicateType { .. } => "DUPLICATE_TYPE",
            ConfigError::UnknownField { .. } => "UNKNOWN_FIELD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_such_accessor_display() {
        let err = ResolveError::no_such_accessor("Post", "title");
        assert_eq!(err.to_string(), "Post has no accessor named 'title'");
        assert_eq!(err.error_code(), "NO_SUCH_ACCESSOR");
        assert_eq!(err.type_name(), "Post");
    }

    #[test]
    fn test_unsupported_lookup_display() {
        let err = ResolveError::unsupported_lookup("Post", &MappingKey::from("title"));
        assert_eq!(err.to_string(), "Post does not support lookup (key \"title\")");
        assert_eq!(err.error_code(), "UNSUPPORTED_LOOKUP");
    }

    #[test]
    fn test_arity_mismatch_display() {
        let err = ResolveError::ArityMismatch {
            type_name: "Post".to_string(),
            accessor: "title".to_string(),
            expected: 0,
            given: 2,
        };
        assert_eq!(
            err.to_string(),
            "Post.title takes 0 argument(s), called with 2"
        );
    }

    #[test]
    fn test_accessor_error_keeps_source() {
        let err = ResolveError::Accessor {
            type_name: "Post".to_string(),
            accessor: "body".to_string(),
            source: anyhow::anyhow!("body not loaded"),
        };

        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "body not loaded");
        assert_eq!(err.error_code(), "ACCESSOR_FAILED");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            file: Some("schema.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse schema config 'schema.yaml': bad indent"
        );

        let err = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse schema config: bad indent");
        assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
    }

    #[test]
    fn test_duplicate_type_display() {
        let err = ConfigError::DuplicateType {
            type_name: "Post".to_string(),
        };
        assert_eq!(err.to_string(), "Type 'Post' is declared more than once");
        assert_eq!(err.error_code(), "DUPLICATE_TYPE");
    }
}
