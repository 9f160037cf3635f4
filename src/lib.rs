//! # bindery
//!
//! **bindery** is a typed request-binding layer for HTTP services built on the
//! `may` coroutine runtime. It maps an incoming request (path captures, query
//! parameters, JSON body) onto a handler's declared parameter signature,
//! coercing and validating every value, and injects cross-cutting values
//! ("directives") resolved from server context by parameter name.
//!
//! ## Architecture
//!
//! The library is organized into a small set of modules:
//!
//! - **[`coerce`]** - raw string → primitive type conversion with structured errors
//! - **[`schema`]** - declared-field validation of JSON payloads with nested error paths
//! - **[`directive`]** - process-wide registry of named context resolvers
//! - **[`binder`]** - per-handler parameter signatures, source inference, and
//!   per-request resolution with full error aggregation
//! - **[`router`]** - path-template matching with named captures
//! - **[`dispatcher`]** - coroutine-based handler dispatch with panic recovery
//! - **[`server`]** - HTTP glue built on `may_minihttp`: request parsing,
//!   response normalization, and the [`server::App`] registration builder
//! - **[`logging`]** - `tracing-subscriber` setup (`RUST_LOG`,
//!   `BINDERY_LOG_FORMAT`)
//!
//! ## Request flow
//!
//! 1. The server parses the raw request into a [`server::RequestContext`].
//! 2. The router matches method + path and yields the handler's signature.
//! 3. The binder resolves every declared parameter from its inferred source
//!    (path, query, body schema, or directive). All client-input failures
//!    across all parameters are aggregated into a single 409 report.
//! 4. On success the handler coroutine is invoked with the resolved argument
//!    map; its return value is normalized (`{..}` → 200, `[status, {..}]` →
//!    that status) and written out.
//!
//! Parameter sources are decided once, at route registration. Ambiguous or
//! unsatisfiable bindings are [`error::ConfigError`]s that refuse startup
//! rather than failing per request.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bindery::binder::Param;
//! use bindery::coerce::PrimitiveType;
//! use bindery::server::{App, HttpServer};
//! use http::Method;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), bindery::error::ConfigError> {
//! let mut app = App::new();
//! unsafe {
//!     app.route(
//!         Method::GET,
//!         "/hello/{name}",
//!         "hello",
//!         vec![
//!             Param::new("name", PrimitiveType::String),
//!             Param::with_default("greeting", PrimitiveType::String, json!("Hello")),
//!         ],
//!         |args| {
//!             json!({
//!                 "msg": format!(
//!                     "{}, {}!",
//!                     args.get_str("greeting").unwrap_or_default(),
//!                     args.get_str("name").unwrap_or_default()
//!                 )
//!             })
//!         },
//!     )?;
//! }
//! let service = app.into_service();
//! let _server = HttpServer(service);
//! // _server.start("0.0.0.0:8080");
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime considerations
//!
//! bindery uses the `may` coroutine runtime, not tokio. Handler coroutine
//! stack size is configurable via the `BINDERY_STACK_SIZE` environment
//! variable (see [`runtime_config`]). All registration happens before the
//! server starts; the route table and directive registry are shared
//! read-only behind `Arc` during serving, so no locking is needed on the
//! request path.

pub mod binder;
pub mod coerce;
pub mod directive;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod schema;
pub mod server;

pub use binder::{HandlerSignature, Param, ParamKind, ParamSource, ParamSpec, ResolveError};
pub use coerce::{coerce, coerce_value, CoercionError, PrimitiveType};
pub use directive::DirectiveRegistry;
pub use error::ConfigError;
pub use schema::{FieldKind, FieldSpec, Schema, ValidationError};
