//! Tests for path pattern compilation and route table matching.

use bindery::binder::{HandlerSignature, Param};
use bindery::coerce::PrimitiveType;
use bindery::directive::DirectiveRegistry;
use bindery::error::ConfigError;
use bindery::router::{path_to_regex, Route, Router};
use http::Method;
use std::sync::Arc;

fn capture_value<'a>(m: &'a bindery::router::RouteMatch, name: &str) -> Option<&'a str> {
    m.path_params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn signature(handler_name: &str, captures: &[&str]) -> Arc<HandlerSignature> {
    let registry = DirectiveRegistry::new();
    let params: Vec<Param> = captures
        .iter()
        .map(|name| Param::new(*name, PrimitiveType::String))
        .collect();
    let captures: Vec<String> = captures.iter().map(|c| c.to_string()).collect();
    Arc::new(HandlerSignature::bind(handler_name, params, &captures, &registry).unwrap())
}

fn route(method: Method, pattern: &str, handler_name: &str, captures: &[&str]) -> Arc<Route> {
    Arc::new(Route::new(method, pattern, handler_name, signature(handler_name, captures)).unwrap())
}

// --- pattern compilation ----------------------------------------------------

#[test]
fn test_compile_static_pattern() {
    let (regex, captures) = path_to_regex("/pets").unwrap();
    assert!(captures.is_empty());
    assert!(regex.is_match("/pets"));
    assert!(regex.is_match("/pets/"));
    assert!(!regex.is_match("/pets/1"));
}

#[test]
fn test_compile_captures_in_order() {
    let (regex, captures) = path_to_regex("/users/{user_id}/posts/{post_id}").unwrap();
    assert_eq!(captures, vec!["user_id", "post_id"]);
    let caps = regex.captures("/users/7/posts/42").unwrap();
    assert_eq!(&caps[1], "7");
    assert_eq!(&caps[2], "42");
}

#[test]
fn test_trailing_slash_tolerated() {
    let (regex, _) = path_to_regex("/users/{id}").unwrap();
    assert!(regex.is_match("/users/7"));
    assert!(regex.is_match("/users/7/"));
    assert!(!regex.is_match("/users/7/extra"));
}

#[test]
fn test_literal_segments_escaped() {
    let (regex, _) = path_to_regex("/v1.0/items").unwrap();
    assert!(regex.is_match("/v1.0/items"));
    // the dot must not act as a wildcard
    assert!(!regex.is_match("/v1x0/items"));
}

#[test]
fn test_root_pattern() {
    let (regex, captures) = path_to_regex("/").unwrap();
    assert!(captures.is_empty());
    assert!(regex.is_match("/"));
    assert!(!regex.is_match("/x"));
}

#[test]
fn test_missing_leading_slash_rejected() {
    assert!(matches!(
        path_to_regex("pets"),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn test_empty_capture_name_rejected() {
    assert!(matches!(
        path_to_regex("/pets/{}"),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn test_partial_segment_capture_rejected() {
    assert!(matches!(
        path_to_regex("/pets/v{id}"),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

// --- route table matching ---------------------------------------------------

#[test]
fn test_match_extracts_path_params() {
    let router = Router::new(vec![route(Method::GET, "/pets/{id}", "get_pet", &["id"])]);
    let m = router.route(&Method::GET, "/pets/42").unwrap();
    assert_eq!(m.route.handler_name, "get_pet");
    assert_eq!(capture_value(&m, "id"), Some("42"));
}

#[test]
fn test_method_mismatch_is_no_match() {
    let router = Router::new(vec![route(Method::GET, "/pets/{id}", "get_pet", &["id"])]);
    assert!(router.route(&Method::POST, "/pets/42").is_none());
}

#[test]
fn test_unknown_path_is_no_match() {
    let router = Router::new(vec![route(Method::GET, "/pets/{id}", "get_pet", &["id"])]);
    assert!(router.route(&Method::GET, "/owners/42").is_none());
}

#[test]
fn test_first_matching_route_wins() {
    let router = Router::new(vec![
        route(Method::GET, "/pets/mine", "my_pets", &[]),
        route(Method::GET, "/pets/{id}", "get_pet", &["id"]),
    ]);
    let m = router.route(&Method::GET, "/pets/mine").unwrap();
    assert_eq!(m.route.handler_name, "my_pets");
    let m = router.route(&Method::GET, "/pets/9").unwrap();
    assert_eq!(m.route.handler_name, "get_pet");
}

#[test]
fn test_capture_value_is_raw_text() {
    // Coercion happens later in the binder; the router hands back the raw
    // capture even when the handler expects an integer.
    let router = Router::new(vec![route(Method::GET, "/n/{number}", "n", &["number"])]);
    let m = router.route(&Method::GET, "/n/not-a-valid-integer").unwrap();
    assert_eq!(capture_value(&m, "number"), Some("not-a-valid-integer"));
}
