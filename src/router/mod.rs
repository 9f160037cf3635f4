//! # Router Module
//!
//! Path matching and route resolution. Route patterns use `{name}` captures
//! (e.g. `/users/{id}/posts/{post_id}`); at registration each pattern is
//! compiled once into a regex plus an ordered capture-name list, and
//! matching an incoming request extracts the raw capture values as strings.
//!
//! The route table is built before the server starts and never mutated
//! afterwards; matching is a linear scan over compiled regexes, which is
//! plenty for the route counts this crate targets.

mod core;

pub use core::{path_to_regex, CaptureVec, Route, RouteMatch, Router, MAX_INLINE_CAPTURES};
