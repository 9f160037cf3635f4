//! Tests for the directive registry: registration uniqueness and
//! resolution against a request context.

use bindery::directive::DirectiveRegistry;
use bindery::error::ConfigError;
use bindery::ids::RequestId;
use bindery::server::RequestContext;
use http::Method;
use serde_json::json;
use std::collections::HashMap;

fn empty_ctx() -> RequestContext {
    RequestContext {
        request_id: RequestId::new(),
        method: Method::GET,
        path: "/".to_string(),
        path_params: HashMap::new(),
        query_params: HashMap::new(),
        body: Vec::new(),
    }
}

#[test]
fn test_register_and_resolve() {
    let mut registry = DirectiveRegistry::new();
    registry
        .register("redis", |_ctx| Ok(json!("stub-connection")))
        .unwrap();
    assert!(registry.contains("redis"));
    assert_eq!(registry.len(), 1);

    let value = registry.resolve("redis", &empty_ctx()).unwrap();
    assert_eq!(value, json!("stub-connection"));
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = DirectiveRegistry::new();
    registry.register("redis", |_ctx| Ok(json!(1))).unwrap();
    let err = registry.register("redis", |_ctx| Ok(json!(2))).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateDirective("redis".to_string()));
    // the original resolver is untouched
    assert_eq!(registry.resolve("redis", &empty_ctx()).unwrap(), json!(1));
}

#[test]
fn test_resolver_sees_request_context() {
    let mut registry = DirectiveRegistry::new();
    registry
        .register("request_path", |ctx| Ok(json!(ctx.path)))
        .unwrap();
    let mut ctx = empty_ctx();
    ctx.path = "/pets/42".to_string();
    assert_eq!(
        registry.resolve("request_path", &ctx).unwrap(),
        json!("/pets/42")
    );
}

#[test]
fn test_unknown_directive_is_error() {
    let registry = DirectiveRegistry::new();
    assert!(registry.resolve("missing", &empty_ctx()).is_err());
}

#[test]
fn test_resolver_error_propagates() {
    let mut registry = DirectiveRegistry::new();
    registry
        .register("db", |_ctx| Err(anyhow::anyhow!("boom")))
        .unwrap();
    let err = registry.resolve("db", &empty_ctx()).unwrap_err();
    assert!(err.to_string().contains("boom"));
}
