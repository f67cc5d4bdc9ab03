//! Integration tests for the declarative query compiler
//!
//! Feeds JSON query documents through `Compiler` and checks the WHERE,
//! ORDER BY and LIMIT fragments byte for byte.

use clausekit::prelude::*;
use serde_json::{json, Value};

fn compiler_with(alias: &str, bind_mode: BindMode) -> Compiler {
    let config = AppConfig {
        compiler: CompilerConfig::new("mysql".to_string(), alias.to_string(), bind_mode, 64),
        pagination: PaginationConfig::new(20, 200),
    };
    Compiler::new(config).expect("valid compiler config")
}

fn compile(alias: &str, query: Value) -> CompiledQuery {
    compiler_with(alias, BindMode::Inline)
        .compile_json(&query)
        .expect("query should compile")
}

fn expression_error(result: Result<CompiledQuery, ClauseKitError>) -> ExpressionError {
    match result {
        Err(ClauseKitError::Expression(err)) => err,
        other => panic!("expected expression error, got {:?}", other),
    }
}

// ========================================
// Full listings
// ========================================

#[test]
fn test_blog_listing_query() {
    let compiled = compile(
        "p",
        json!({
            "filter": {
                "operand": "OR",
                "filters": [
                    {"property": "status", "operator": "=", "value": "published"},
                    {"property": "author_id", "operator": "IN", "value": [3, 7]}
                ]
            },
            "order": {"property": "created_at", "direction": "DESC"},
            "pagination": {"page": 2, "num_per_page": 25}
        }),
    );

    assert_eq!(
        compiled.where_clause,
        "(p.status = 'published' OR p.author_id IN ('3','7'))"
    );
    assert_eq!(compiled.order_clause, "p.created_at DESC");
    assert_eq!(compiled.limit_clause, "LIMIT 25, 25");
    assert!(compiled.params.is_empty());
    assert_eq!(
        compiled.sql_suffix(),
        "WHERE (p.status = 'published' OR p.author_id IN ('3','7')) ORDER BY p.created_at DESC LIMIT 25, 25"
    );
}

#[test]
fn test_empty_query() {
    let compiled = compile("", json!({}));
    assert!(compiled.is_empty());
    assert!(compiled.params.is_empty());
}

#[test]
fn test_plural_aliases() {
    let compiled = compile(
        "",
        json!({
            "filters": {"fields": ["a", "b"], "operator": "=", "value": "x"},
            "orders": [{"mode": "random"}]
        }),
    );
    assert_eq!(compiled.where_clause, "(a = 'x' OR b = 'x')");
    assert_eq!(compiled.order_clause, "RAND()");
}

#[test]
fn test_filter_list_at_top_level() {
    let compiled = compile(
        "",
        json!({"filters": [
            {"property": "a", "value": 1},
            {"property": "b", "value": 2}
        ]}),
    );
    assert_eq!(compiled.where_clause, "(a = '1' AND b = '2')");

    let result = compiler_with("", BindMode::Inline)
        .compile_json(&json!({"filters": [false, "x = 1"]}));
    assert!(matches!(result, Err(ClauseKitError::Serialization(_))));
}

#[test]
fn test_large_unsigned_ids_keep_their_digits() {
    let compiled = compile(
        "",
        json!({"filter": {"property": "id", "value": 18446744073709551615u64}}),
    );
    assert_eq!(compiled.where_clause, "id = '18446744073709551615'");

    let compiled = compiler_with("", BindMode::Parameterized)
        .compile_json(&json!({"filter": {"property": "id", "operator": "IN", "value": [1, 18446744073709551615u64]}}))
        .unwrap();
    assert_eq!(compiled.where_clause, "id IN (?,?)");
    assert_eq!(
        compiled.params,
        vec![ScalarValue::Integer(1), ScalarValue::Unsigned(u64::MAX)]
    );
}

// ========================================
// Filters
// ========================================

#[test]
fn test_negated_group_with_raw_fragments() {
    let compiled = compile(
        "p",
        json!({
            "filter": {
                "operator": "NOT",
                "filters": [
                    "p.hidden = 1",
                    {"property": "title", "operator": "LIKE", "value": "%draft%"}
                ]
            }
        }),
    );
    assert_eq!(
        compiled.where_clause,
        "NOT (p.hidden = 1 AND p.title LIKE '%draft%')"
    );
}

#[test]
fn test_empty_fragments_are_skipped() {
    let compiled = compile("", json!({"filter": {"filters": ["", "a = 1", {}]}}));
    assert_eq!(compiled.where_clause, "a = 1");
}

#[test]
fn test_inactive_sections_compile_to_nothing() {
    let compiled = compile(
        "",
        json!({
            "filter": {"active": false, "property": "a", "operator": "=", "value": 1},
            "order": {"active": false, "mode": "random"},
            "pagination": {"active": false, "page": 3, "num_per_page": 10}
        }),
    );
    assert!(compiled.is_empty());
}

#[test]
fn test_function_and_set_membership() {
    let compiled = compile(
        "",
        json!({
            "filter": {"filters": [
                {"property": "created_at", "operator": "=", "value": 2024, "func": "year"},
                {"property": "tags", "operator": "FIND_IN_SET", "value": ["a", "b"]},
                {"property": "deleted_at", "operator": "is null"},
                {"property": "visible", "operator": "=", "value": true}
            ]}
        }),
    );
    assert_eq!(
        compiled.where_clause,
        "(YEAR(created_at) = '2024' AND FIND_IN_SET('a,b', tags) AND deleted_at IS NULL AND visible = '1')"
    );
}

#[test]
fn test_empty_in_list() {
    let compiled = compile(
        "",
        json!({"filter": {"filters": [
            {"property": "a", "operator": "IN", "value": []},
            {"property": "b", "operator": "NOT IN", "value": []}
        ]}}),
    );
    assert_eq!(compiled.where_clause, "(1=0 AND 1=1)");
}

#[test]
fn test_multilingual_property_map() {
    let resolver = PropertyMap::new(TableAliasResolver::new("p").unwrap())
        .map("title", &["p.title_en", "p.title_de"])
        .unwrap();
    let compiled = compiler_with("", BindMode::Inline)
        .with_resolver(resolver)
        .compile_json(&json!({
            "filter": {"property": "title", "operator": "LIKE", "value": "%rust%"},
            "order": {"property": "title", "direction": "ASC"}
        }))
        .unwrap();

    assert_eq!(
        compiled.where_clause,
        "(p.title_en LIKE '%rust%' OR p.title_de LIKE '%rust%')"
    );
    assert_eq!(compiled.order_clause, "p.title_en ASC, p.title_de ASC");
}

// ========================================
// Orders
// ========================================

#[test]
fn test_multiple_orders_are_joined() {
    let compiled = compile(
        "p",
        json!({"order": [
            {"mode": "custom", "condition": "p.sticky DESC"},
            {"active": false, "property": "ignored"},
            {"property": "title"}
        ]}),
    );
    assert_eq!(compiled.order_clause, "p.sticky DESC, p.title");
}

#[test]
fn test_order_by_values() {
    let compiled = compile(
        "",
        json!({"order": {"property": "uid", "values": [3, 1, 2], "direction": "desc"}}),
    );
    assert_eq!(compiled.order_clause, "FIELD(uid, '3','1','2') DESC");
}

#[test]
fn test_non_scalar_order_values_are_dropped() {
    let compiled = compile(
        "",
        json!({"order": {"property": "uid", "values": [{"nested": 1}, 5, [1, 2]]}}),
    );
    assert_eq!(compiled.order_clause, "FIELD(uid, '5')");
}

#[test]
fn test_order_errors() {
    let compiler = compiler_with("", BindMode::Inline);

    let err = expression_error(compiler.compile_json(&json!({"order": {"mode": "custom"}})));
    assert_eq!(err, ExpressionError::EmptyCondition);

    let err = expression_error(
        compiler.compile_json(&json!({"order": {"mode": "values", "values": [1]}})),
    );
    assert_eq!(err, ExpressionError::EmptyProperty);

    let err = expression_error(
        compiler.compile_json(&json!({"order": {"mode": "values", "property": "a"}})),
    );
    assert_eq!(err, ExpressionError::EmptyValues);

    let err = expression_error(compiler.compile_json(&json!({"order": {"mode": "shuffle"}})));
    assert_eq!(err, ExpressionError::InvalidOrderMode("shuffle".to_string()));
}

// ========================================
// Pagination
// ========================================

#[test]
fn test_pagination_uses_configured_default_and_cap() {
    let compiled = compile("", json!({"pagination": {"page": 3}}));
    assert_eq!(compiled.limit_clause, "LIMIT 40, 20");

    let compiled = compile("", json!({"pagination": {"page": 2, "num_per_page": 1000}}));
    assert_eq!(compiled.limit_clause, "LIMIT 200, 200");
}

#[test]
fn test_pagination_unbounded_page_size() {
    let config = AppConfig {
        compiler: CompilerConfig::default(),
        pagination: PaginationConfig::new(0, 0),
    };
    let compiled = Compiler::new(config)
        .unwrap()
        .compile_json(&json!({"pagination": {"page": 4}}))
        .unwrap();
    assert_eq!(compiled.limit_clause, "");
}

// ========================================
// Parameterized output
// ========================================

#[test]
fn test_parameterized_query() {
    let compiled = compiler_with("p", BindMode::Parameterized)
        .compile_json(&json!({
            "filter": {"filters": [
                {"property": "title", "operator": "LIKE", "value": "%o'neil%"},
                {"condition": "p.deleted = 0"},
                {"property": "category", "operator": "IN", "value": ["news", "sport"]}
            ]},
            "order": {"mode": "values", "property": "uid", "values": [9, 4]},
            "pagination": {"page": 1, "num_per_page": 10}
        }))
        .unwrap();

    assert_eq!(
        compiled.where_clause,
        "(p.title LIKE ? AND p.deleted = 0 AND p.category IN (?,?))"
    );
    assert_eq!(compiled.order_clause, "FIELD(p.uid, ?,?)");
    assert_eq!(compiled.limit_clause, "LIMIT 0, 10");
    assert_eq!(
        compiled.params,
        vec![
            ScalarValue::from("%o'neil%"),
            ScalarValue::from("news"),
            ScalarValue::from("sport"),
            ScalarValue::from(9),
            ScalarValue::from(4),
        ]
    );
}

// ========================================
// Rejected input
// ========================================

#[test]
fn test_injection_attempts_are_rejected() {
    let compiler = compiler_with("", BindMode::Inline);

    let err = expression_error(compiler.compile_json(&json!({
        "filter": {"property": "title; DROP TABLE users", "operator": "=", "value": 1}
    })));
    assert!(matches!(err, ExpressionError::InvalidField(_)));

    let err = expression_error(compiler.compile_json(&json!({
        "filter": {"property": "a", "operator": "= 1 OR 1=1 --", "value": 1}
    })));
    assert!(matches!(err, ExpressionError::InvalidOperator(_)));

    let err = expression_error(compiler.compile_json(&json!({
        "filter": {"property": "a", "operator": "=", "value": 1, "func": "SLEEP"}
    })));
    assert!(matches!(err, ExpressionError::InvalidFunction(_)));

    let err = expression_error(compiler.compile_json(&json!({
        "order": {"property": "a", "direction": "DESC; DROP TABLE users"}
    })));
    assert!(matches!(err, ExpressionError::InvalidDirection(_)));

    let compiled = compiler
        .compile_json(&json!({"filter": {"property": "name", "operator": "=", "value": "x' OR '1'='1"}}))
        .unwrap();
    assert_eq!(compiled.where_clause, "name = 'x'' OR ''1''=''1'");
}

#[test]
fn test_ambiguous_negation() {
    let compiler = compiler_with("", BindMode::Inline);
    let err = expression_error(compiler.compile_json(&json!({
        "filter": {"property": "a", "operator": "NOT", "value": 1}
    })));
    assert_eq!(err, ExpressionError::AmbiguousNegation);
}

#[test]
fn test_non_scalar_filter_value() {
    let compiler = compiler_with("", BindMode::Inline);
    let err = expression_error(compiler.compile_json(&json!({
        "filter": {"property": "a", "operator": "=", "value": {"x": 1}}
    })));
    assert!(matches!(err, ExpressionError::NonScalarValue(_)));
}

#[test]
fn test_nesting_depth_limit() {
    let config = AppConfig {
        compiler: CompilerConfig::new("mysql".to_string(), String::new(), BindMode::Inline, 3),
        pagination: PaginationConfig::default(),
    };
    let compiler = Compiler::new(config).unwrap();

    let leaf = json!({"property": "a", "operator": "=", "value": 1});
    let depth_three = json!({"filters": [{"filters": [leaf.clone()]}]});
    let compiled = compiler.compile_json(&json!({"filter": depth_three})).unwrap();
    assert_eq!(compiled.where_clause, "a = '1'");

    let depth_four = json!({"filters": [{"filters": [{"filters": [leaf]}]}]});
    let err = expression_error(compiler.compile_json(&json!({"filter": depth_four})));
    assert_eq!(err, ExpressionError::NestingTooDeep { max_depth: 3 });
}

// ========================================
// Configuration
// ========================================

#[test]
fn test_compiler_from_toml() {
    let config = AppConfig::from_toml_str(
        r#"
        [compiler]
        dialect = "mysql"
        default_table_alias = "c"
        bind_mode = "parameterized"

        [pagination]
        default_num_per_page = 5
        "#,
    )
    .unwrap();
    let compiler = Compiler::new(config).unwrap();

    let compiled = compiler
        .compile_json(&json!({
            "filter": {"property": "id", "operator": ">", "value": 10},
            "pagination": {"page": 3}
        }))
        .unwrap();
    assert_eq!(compiled.where_clause, "c.id > ?");
    assert_eq!(compiled.limit_clause, "LIMIT 10, 5");
    assert_eq!(compiled.params, vec![ScalarValue::from(10)]);
}

#[test]
fn test_unsupported_dialect_from_toml() {
    let config = AppConfig::from_toml_str("[compiler]\ndialect = \"postgres\"\n").unwrap();
    assert!(matches!(
        Compiler::new(config),
        Err(ClauseKitError::UnsupportedDialect(name)) if name == "postgres"
    ));
}
