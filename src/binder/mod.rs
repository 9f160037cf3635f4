//! # Binder Module
//!
//! The binder is the heart of bindery: it turns a handler's declared
//! parameter list plus an incoming request into a fully-typed argument map,
//! or a complete report of everything wrong with the request.
//!
//! ## Source inference
//!
//! Each parameter's source is decided **once**, when the route is
//! registered, and cached on the [`ParamSpec`], never re-derived per
//! request:
//!
//! 1. name matches a `{capture}` in the route pattern → **path**
//! 2. declared as a schema reference → **body** (validated wholesale)
//! 3. declared with a directive marker → **directive registry**
//! 4. otherwise → **query string** (default applied when the key is absent)
//!
//! An explicit primitive annotation forces scalar coercion: a primitive
//! parameter never binds to a directive even when the names collide.
//! Undecidable bindings (a path capture declared as a schema, a directive
//! marker with no matching registration, a capture no parameter binds to)
//! are [`crate::error::ConfigError`]s that refuse startup.
//!
//! ## Resolution
//!
//! Parameters are independent; every one is resolved and **all** failures
//! across all parameters are collected before returning, so a client can
//! fix every invalid field from a single 409 response. Directive resolver
//! failures are server faults and travel separately from validation errors.

mod core;

pub use core::{
    resolve, HandlerSignature, Param, ParamKind, ParamSource, ParamSpec, ResolveError,
};
