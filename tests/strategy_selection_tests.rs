//! Integration tests for strategy selection and resolution
//!
//! These tests verify that:
//! - Each configuration selects the expected strategy kind
//! - Arguments are forwarded only where the strategy calls for them
//! - Record-like sources never receive arguments
//! - Renames are observed by already-built strategies
//! - Failures surface with the right error kind

use fieldwise::prelude::*;
use serde_json::json;
use std::sync::Arc;

// =============================================================================
// Fixtures
// =============================================================================

struct Article {
    title: String,
    tags: Vec<String>,
}

fn article_table() -> Arc<AccessorTable<Article>> {
    Arc::new(
        AccessorTable::new("Article")
            .attribute("foo", |a: &Article| Ok(json!(format!("foo:{}", a.title))))
            .attribute("baz", |a: &Article| Ok(json!(a.title.to_uppercase())))
            .method(
                "tagged",
                |a: &Article, args: &Arguments, ctx: &Context| {
                    let prefix = args.get("prefix").and_then(Value::as_str).unwrap_or("");
                    let tags: Vec<String> = a
                        .tags
                        .iter()
                        .filter(|t| t.starts_with(prefix))
                        .cloned()
                        .collect();
                    Ok(json!({ "tags": tags, "viewer": ctx.get("viewer") }))
                },
            )
            .method(
                "baz_with",
                |a: &Article, args: &Arguments, _ctx: &Context| {
                    Ok(json!(format!("{}:{}", a.title, args.len())))
                },
            ),
    )
}

fn article() -> ObjectSource<Article> {
    ObjectSource::new(
        Article {
            title: "rust".to_string(),
            tags: vec!["lang".to_string(), "library".to_string(), "cli".to_string()],
        },
        article_table(),
    )
}

fn arguments(pairs: &[(&str, Value)]) -> Arguments {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// =============================================================================
// Accessor-invoke
// =============================================================================

mod accessor_invoke_tests {
    use super::*;

    #[test]
    fn test_without_arguments_calls_accessor_bare() {
        let config = FieldConfig::new("title").with_accessor("foo");
        let strategy = StrategySelector::select(&config);

        let value = strategy
            .resolve(&article(), &arguments(&[("ignored", json!(1))]), &Context::new())
            .unwrap();
        assert_eq!(value, json!("foo:rust"));
    }

    #[test]
    fn test_with_arguments_forwards_arguments_and_context() {
        let config = FieldConfig::new("tags")
            .with_accessor("tagged")
            .with_argument_count(2);
        let strategy = StrategySelector::select(&config);
        let ctx = Context::new().with("viewer", "ada");

        let value = strategy
            .resolve(&article(), &arguments(&[("prefix", json!("l"))]), &ctx)
            .unwrap();
        assert_eq!(value, json!({ "tags": ["lang", "library"], "viewer": "ada" }));
    }

    #[test]
    fn test_missing_accessor() {
        let config = FieldConfig::new("title").with_accessor("nope");
        let err = StrategySelector::select(&config)
            .resolve(&article(), &Arguments::new(), &Context::new())
            .unwrap_err();

        assert!(matches!(err, ResolveError::NoSuchAccessor { .. }));
        assert_eq!(err.type_name(), "Article");
    }

    #[test]
    fn test_accessor_wins_over_mapping_key() {
        let config = FieldConfig::new("title")
            .with_mapping_key("title")
            .with_accessor("foo");
        let strategy = StrategySelector::select(&config);

        assert_eq!(strategy.kind(), StrategyKind::AccessorInvoke);
        assert_eq!(
            strategy
                .resolve(&article(), &Arguments::new(), &Context::new())
                .unwrap(),
            json!("foo:rust")
        );
    }

    #[test]
    fn test_accessor_with_arguments_on_json_source_is_missing() {
        let config = FieldConfig::new("title")
            .with_accessor("title")
            .with_argument_count(1);
        let err = StrategySelector::select(&config)
            .resolve(&json!({"title": "x"}), &Arguments::new(), &Context::new())
            .unwrap_err();

        assert_eq!(err.error_code(), "NO_SUCH_ACCESSOR");
    }
}

// =============================================================================
// Key-lookup
// =============================================================================

mod key_lookup_tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_argument_count() {
        let source = json!({ "bar": [1, 2, 3] });

        for count in [0, 2] {
            let config = FieldConfig::new("bar")
                .with_mapping_key("bar")
                .with_argument_count(count);
            let value = StrategySelector::select(&config)
                .resolve(&source, &arguments(&[("x", json!(true))]), &Context::new())
                .unwrap();
            assert_eq!(value, json!([1, 2, 3]));
        }
    }

    #[test]
    fn test_absent_key_is_null_not_error() {
        let config = FieldConfig::new("bar").with_mapping_key("bar");
        let value = StrategySelector::select(&config)
            .resolve(&json!({}), &Arguments::new(), &Context::new())
            .unwrap();

        assert!(value.is_null());
    }

    #[test]
    fn test_integer_key_on_array() {
        let config = FieldConfig::new("second").with_mapping_key(1_i64);
        let value = StrategySelector::select(&config)
            .resolve(&json!(["a", "b"]), &Arguments::new(), &Context::new())
            .unwrap();

        assert_eq!(value, json!("b"));
    }

    #[test]
    fn test_lookup_on_object_source_is_unsupported() {
        let config = FieldConfig::new("title").with_mapping_key("title");
        let err = StrategySelector::select(&config)
            .resolve(&article(), &Arguments::new(), &Context::new())
            .unwrap_err();

        assert!(matches!(err, ResolveError::UnsupportedLookup { .. }));
    }

    #[test]
    fn test_lookup_on_record_reads_attributes() {
        let record = RecordSource::new("Row", [("title", json!("x")), ("body", json!("y"))]);
        let resolve = |key: MappingKey| {
            StrategySelector::select(&FieldConfig::new("title").with_mapping_key(key))
                .resolve(&record, &Arguments::new(), &Context::new())
                .unwrap()
        };

        assert_eq!(resolve(MappingKey::from("title")), json!("x"));
        assert_eq!(resolve(MappingKey::from(1_i64)), json!("y"));
        assert_eq!(resolve(MappingKey::from("missing")), Value::Null);
    }
}

// =============================================================================
// Name-invoke
// =============================================================================

mod name_invoke_tests {
    use super::*;

    #[test]
    fn test_bare_name_invoke() {
        let config = FieldConfig::new("baz");
        let value = StrategySelector::select(&config)
            .resolve(&article(), &Arguments::new(), &Context::new())
            .unwrap();

        assert_eq!(value, json!("RUST"));
    }

    #[test]
    fn test_with_arguments_on_record_drops_arguments() {
        let record = RecordSource::new("Row", [("baz", json!("from-record"))]);
        let config = FieldConfig::new("baz").with_argument_count(2);
        let strategy = StrategySelector::select(&config);

        assert_eq!(strategy.kind(), StrategyKind::NameInvokeWithArguments);
        let value = strategy
            .resolve(&record, &arguments(&[("a", json!(1))]), &Context::new())
            .unwrap();
        assert_eq!(value, json!("from-record"));
    }

    #[test]
    fn test_with_arguments_on_object_forwards_arguments() {
        let config = FieldConfig::new("baz_with").with_argument_count(2);
        let value = StrategySelector::select(&config)
            .resolve(
                &article(),
                &arguments(&[("a", json!(1)), ("b", json!(2))]),
                &Context::new(),
            )
            .unwrap();

        assert_eq!(value, json!("rust:2"));
    }

    #[test]
    fn test_with_arguments_on_object_attribute_is_arity_mismatch() {
        let config = FieldConfig::new("baz").with_argument_count(1);
        let err = StrategySelector::select(&config)
            .resolve(&article(), &Arguments::new(), &Context::new())
            .unwrap_err();

        match err {
            ResolveError::ArityMismatch {
                accessor,
                expected,
                given,
                ..
            } => {
                assert_eq!(accessor, "baz");
                assert_eq!(expected, 0);
                assert_eq!(given, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rename_after_selection_uses_new_name() {
        let config = FieldConfig::new("foo");
        let strategy = StrategySelector::select(&config);
        let source = article();

        assert_eq!(
            strategy
                .resolve(&source, &Arguments::new(), &Context::new())
                .unwrap(),
            json!("foo:rust")
        );

        config.rename("baz").unwrap();

        assert_eq!(
            strategy
                .resolve(&source, &Arguments::new(), &Context::new())
                .unwrap(),
            json!("RUST")
        );
    }

    #[test]
    fn test_rename_does_not_affect_explicit_accessor() {
        let config = FieldConfig::new("title").with_accessor("foo");
        let strategy = StrategySelector::select(&config);

        config.rename("baz").unwrap();

        assert_eq!(
            strategy
                .resolve(&article(), &Arguments::new(), &Context::new())
                .unwrap(),
            json!("foo:rust")
        );
    }

    #[test]
    fn test_blank_rename_keeps_resolving_the_old_name() {
        let config = FieldConfig::new("foo");
        let strategy = StrategySelector::select(&config);

        for blank in ["", "   "] {
            let err = config.rename(blank).unwrap_err();
            assert_eq!(err.error_code(), "BLANK_RENAME");
        }

        assert_eq!(
            strategy
                .resolve(&article(), &Arguments::new(), &Context::new())
                .unwrap(),
            json!("foo:rust")
        );
    }

    #[test]
    fn test_missing_declared_name() {
        let config = FieldConfig::new("qux");
        let err = StrategySelector::select(&config)
            .resolve(&article(), &Arguments::new(), &Context::new())
            .unwrap_err();

        assert!(matches!(err, ResolveError::NoSuchAccessor { ref accessor, .. } if accessor == "qux"));
    }
}

// =============================================================================
// Inputs are left untouched
// =============================================================================

#[test]
fn test_resolution_does_not_mutate_inputs() {
    let source = json!({ "bar": { "nested": true } });
    let args = arguments(&[("limit", json!(10))]);
    let ctx = Context::new().with("viewer", "ada");
    let request_id = ctx.request_id();

    let config = FieldConfig::new("bar")
        .with_mapping_key("bar")
        .with_argument_count(1);
    StrategySelector::select(&config)
        .resolve(&source, &args, &ctx)
        .unwrap();

    assert_eq!(source, json!({ "bar": { "nested": true } }));
    assert_eq!(args, arguments(&[("limit", json!(10))]));
    assert_eq!(ctx.request_id(), request_id);
    assert_eq!(ctx.get("viewer"), Some(&json!("ada")));
}
