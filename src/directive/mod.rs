//! # Directive Module
//!
//! A directive is a named, server-registered resolver that supplies a
//! handler parameter's value from process or request context rather than
//! from request input, such as a database handle or the current
//! principal. Handlers ask for one by declaring a parameter with a matching
//! name; no explicit request plumbing is needed.
//!
//! The registry is append-only before serving starts and read-only during
//! serving. Registration after the server has started is a programming
//! error, not a supported runtime operation; the [`crate::server::App`]
//! builder enforces this structurally by freezing the registry behind `Arc`
//! when the service is built.
//!
//! Resolvers capture whatever server-wide state they need at registration
//! time. They may read shared state but must not mutate anything observable
//! by other in-flight requests; this is a documented convention, not a
//! type-system guarantee, since resolvers are user-supplied. A resolver
//! that returns an error is a server-side fault (500), never a validation
//! error.

mod core;

pub use core::{DirectiveFn, DirectiveRegistry};
