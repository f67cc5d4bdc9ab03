//! # Admin Listing Example
//!
//! This example compiles the query behind a typical admin list view:
//! - A declarative JSON filter coming from a request
//! - Multilingual title columns through a `PropertyMap`
//! - Pinned rows first, then newest first
//! - Inline and parameterized output side by side

use anyhow::Context;
use clausekit::prelude::*;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    println!("🚀 ClauseKit Admin Listing Example");
    println!("==================================");

    // 1. Configuration
    println!("\n⚙️  Step 1: Configuration");
    println!("--------------------------");

    let config = AppConfig {
        compiler: CompilerConfig::new("mysql".to_string(), "p".to_string(), BindMode::Inline, 16),
        pagination: PaginationConfig::new(25, 100),
    };
    println!("dialect: {}", config.compiler.dialect);
    println!("default alias: {}", config.compiler.default_table_alias);

    let titles = PropertyMap::new(TableAliasResolver::new("p")?)
        .map("title", &["p.title_en", "p.title_de"])?;

    // 2. Request payload
    println!("\n📨 Step 2: Request Payload");
    println!("---------------------------");

    let request = json!({
        "filter": {
            "filters": [
                {"property": "title", "operator": "LIKE", "value": "%release%"},
                {"property": "status", "operator": "IN", "value": ["published", "scheduled"]},
                {"property": "created_at", "operator": ">=", "value": 2023, "func": "YEAR"},
                "p.deleted = 0"
            ]
        },
        "order": [
            {"mode": "values", "property": "uid", "values": [42, 7]},
            {"property": "created_at", "direction": "DESC"}
        ],
        "pagination": {"page": 3}
    });
    println!("{}", serde_json::to_string_pretty(&request)?);

    // 3. Inline SQL
    println!("\n📝 Step 3: Inline SQL");
    println!("----------------------");

    let compiler = Compiler::new(config.clone())?.with_resolver(titles.clone());
    let compiled = compiler
        .compile_json(&request)
        .context("compiling inline query")?;
    println!("SELECT p.* FROM posts p {}", compiled.sql_suffix());

    // 4. Parameterized SQL
    println!("\n🔒 Step 4: Parameterized SQL");
    println!("-----------------------------");

    let mut parameterized = config;
    parameterized.compiler.bind_mode = BindMode::Parameterized;
    let compiler = Compiler::new(parameterized)?.with_resolver(titles);
    let compiled = compiler
        .compile_json(&request)
        .context("compiling parameterized query")?;
    println!("SELECT p.* FROM posts p {}", compiled.sql_suffix());
    println!("params: {}", serde_json::to_string(&compiled.params)?);

    // 5. Rejected input
    println!("\n🛡️  Step 5: Rejected Input");
    println!("--------------------------");

    let hostile = json!({"filter": {"property": "title) OR (1=1", "operator": "=", "value": 1}});
    match compiler.compile_json(&hostile) {
        Ok(compiled) => println!("unexpectedly compiled: {}", compiled.where_clause),
        Err(err) => println!("rejected: {}", err),
    }

    println!("\n✅ Done");
    Ok(())
}
