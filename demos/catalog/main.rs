//! Catalog example: one schema resolved against three kinds of source
//!
//! Run with `RUST_LOG=fieldwise=debug` to see strategy selection.

use fieldwise::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const SCHEMA: &str = r#"
types:
  - name: Product
    fields:
      - name: name
      - name: price
        method: price_in_cents
      - name: sku
        hash_key: sku
      - name: discounted
        arguments: [percent]
"#;

struct Product {
    name: String,
    cents: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("fieldwise catalog example\n");

    let mut schema = SchemaConfig::from_yaml_str(SCHEMA)?.build()?;

    let table = Arc::new(
        AccessorTable::<Product>::new("Product")
            .attribute("name", |p| Ok(json!(p.name)))
            .attribute("price_in_cents", |p| Ok(json!(p.cents)))
            .attribute("title", |p| Ok(json!(p.name.to_uppercase())))
            .method("discounted", |p, args, _ctx| {
                let percent = args.get("percent").and_then(Value::as_u64).unwrap_or(0);
                Ok(json!(p.cents * (100 - percent.min(100)) / 100))
            }),
    );
    let lamp = ObjectSource::new(
        Product {
            name: "Lamp".to_string(),
            cents: 2_000,
        },
        table,
    );
    let row = RecordSource::new(
        "ProductRow",
        [
            ("name", json!("Desk")),
            ("discounted", json!(9_000)),
        ],
    );
    let document = json!({ "sku": "L-42" });

    let mut args = Arguments::new();
    args.insert("percent".to_string(), json!(20));
    let ctx = Context::new();

    let sources: [(&str, &dyn Source); 3] =
        [("object", &lamp), ("record", &row), ("document", &document)];

    let product = schema
        .object("Product")
        .ok_or_else(|| anyhow::anyhow!("Product is not declared"))?;
    for field in product.fields() {
        println!("{} ({})", field.name(), field.strategy().kind());
        for (label, source) in sources {
            match field.resolve(source, &args, &ctx) {
                Ok(value) => println!("  {:<9} {}", label, value),
                Err(e) => println!("  {:<9} error {}: {}", label, e.error_code(), e),
            }
        }
    }

    // Renaming after assembly: the name-based strategy follows the new name.
    schema
        .object_mut("Product")
        .ok_or_else(|| anyhow::anyhow!("Product is not declared"))?
        .rename_field("name", "title")?;

    if let Some(title) = schema.object("Product").and_then(|p| p.field("title")) {
        println!("\nafter rename: title = {}", title.resolve(&lamp, &args, &ctx)?);
    }

    Ok(())
}
