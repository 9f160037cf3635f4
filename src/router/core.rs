use crate::binder::HandlerSignature;
use crate::error::ConfigError;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Inline capacity for matched path captures. Patterns rarely have more
/// than a few captures, so matching normally does not touch the heap.
pub const MAX_INLINE_CAPTURES: usize = 4;

/// Matched capture values in pattern order, as `(name, raw_value)` pairs.
pub type CaptureVec = SmallVec<[(String, String); MAX_INLINE_CAPTURES]>;

/// One registered route: method, compiled pattern, and the handler's bound
/// parameter signature.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: String,
    pub handler_name: String,
    pub signature: Arc<HandlerSignature>,
    pub capture_names: Vec<String>,
    regex: Regex,
}

impl Route {
    pub fn new(
        method: Method,
        pattern: &str,
        handler_name: &str,
        signature: Arc<HandlerSignature>,
    ) -> Result<Self, ConfigError> {
        let (regex, capture_names) = path_to_regex(pattern)?;
        Ok(Route {
            method,
            pattern: pattern.to_string(),
            handler_name: handler_name.to_string(),
            signature,
            capture_names,
            regex,
        })
    }
}

/// Result of matching a request path against the route table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<Route>,
    /// Raw capture values in pattern order. When a pattern repeats a
    /// capture name at different depths, the later occurrence wins once
    /// the pairs are collected into a map.
    pub path_params: CaptureVec,
}

/// Immutable route table; built once at startup, shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Arc<Route>>,
}

impl Router {
    #[must_use]
    pub fn new(routes: Vec<Arc<Route>>) -> Self {
        let summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| format!("{} {} -> {}", r.method, r.pattern, r.handler_name))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?summary,
            "Routing table loaded"
        );
        Router { routes }
    }

    /// Match an HTTP request to a route, extracting raw path captures.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        for route in &self.routes {
            if &route.method != method {
                continue;
            }
            if let Some(caps) = route.regex.captures(path) {
                let mut path_params = CaptureVec::new();
                for (i, name) in route.capture_names.iter().enumerate() {
                    if let Some(m) = caps.get(i + 1) {
                        path_params.push((name.clone(), m.as_str().to_string()));
                    }
                }
                debug!(
                    method = %method,
                    path = %path,
                    handler_name = %route.handler_name,
                    route_pattern = %route.pattern,
                    path_params = ?path_params,
                    "Route matched"
                );
                return Some(RouteMatch {
                    route: Arc::clone(route),
                    path_params,
                });
            }
        }
        warn!(method = %method, path = %path, "No route matched");
        None
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Convert a `{name}`-style path pattern to a regex plus the ordered list
/// of capture names.
///
/// `/users/{id}` compiles to `^/users/([^/]+)/?$` with captures `["id"]`.
/// A trailing slash on the request path is tolerated. Literal segments are
/// regex-escaped.
pub fn path_to_regex(pattern: &str) -> Result<(Regex, Vec<String>), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    if !pattern.starts_with('/') {
        return Err(invalid("pattern must start with '/'"));
    }
    if pattern == "/" {
        let regex = Regex::new(r"^/$").map_err(|e| invalid(&e.to_string()))?;
        return Ok((regex, Vec::new()));
    }

    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    let mut capture_names = Vec::with_capacity(pattern.matches('{').count());

    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        if segment.starts_with('{') && segment.ends_with('}') {
            let name = &segment[1..segment.len() - 1];
            if name.is_empty() {
                return Err(invalid("empty capture name"));
            }
            capture_names.push(name.to_string());
            out.push_str("/([^/]+)");
        } else if segment.contains('{') || segment.contains('}') {
            return Err(invalid("captures must span a whole path segment"));
        } else {
            out.push('/');
            out.push_str(&regex::escape(segment));
        }
    }

    out.push_str("/?$");
    let regex = Regex::new(&out).map_err(|e| invalid(&e.to_string()))?;
    Ok((regex, capture_names))
}
