//! # Server Module
//!
//! HTTP glue built on `may_minihttp`: raw request parsing into a
//! [`RequestContext`], the [`App`] registration builder, the
//! [`AppService`] request pipeline (route → resolve → dispatch →
//! normalize), and the [`HttpServer`] start/stop wrapper.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest, RequestContext};
pub use response::{normalize, validation_report, NormalizeError};
pub use service::{App, AppService};
