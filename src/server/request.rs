use crate::ids::RequestId;
use http::Method;
use may_minihttp::Request;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Per-request transient context: everything the binder needs to resolve a
/// handler's parameters.
///
/// Created at request entry, owned exclusively by the task handling the
/// request, and discarded at response completion; never shared across
/// requests. The body is kept as raw bytes so malformed JSON surfaces as a
/// field-scoped validation error during resolution rather than a transport
/// error.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub method: Method,
    pub path: String,
    /// Raw path captures extracted by the router.
    pub path_params: HashMap<String, String>,
    /// Query parameters; a key may repeat, so values are kept in arrival
    /// order.
    pub query_params: HashMap<String, Vec<String>>,
    /// Raw body bytes; empty means no body was sent.
    pub body: Vec<u8>,
}

impl RequestContext {
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// Get a query parameter by name. Last occurrence wins when a key
    /// repeats (e.g. `?limit=10&limit=20` yields `20`).
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|vs| vs.last())
            .map(String::as_str)
    }

    /// Parse the body as JSON. `None` when no body was sent; `Some(Err(_))`
    /// when bytes are present but are not valid JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<Result<Value, serde_json::Error>> {
        if self.body.is_empty() {
            return None;
        }
        Some(serde_json::from_slice(&self.body))
    }
}

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed query string parameters; repeated keys keep every value
    pub query_params: HashMap<String, Vec<String>>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

/// Parse query string parameters from a URL path.
///
/// Extracts everything after the `?` and URL-decodes names and values.
/// Repeated keys accumulate in arrival order.
#[must_use]
pub fn parse_query_params(path: &str) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            params.entry(k.to_string()).or_default().push(v.to_string());
        }
    }
    params
}

/// Extract method, path, headers, query parameters, and body bytes from a
/// raw `may_minihttp::Request`.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);
    debug!(
        param_count = query_params.len(),
        query_params = ?query_params,
        "Query params parsed"
    );

    let mut body = Vec::new();
    let _ = req.body().read_to_end(&mut body);
    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        body_size_bytes = body.len(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        query_params,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/p?x=1&y=2");
        assert_eq!(q.get("x"), Some(&vec!["1".to_string()]));
        assert_eq!(q.get("y"), Some(&vec!["2".to_string()]));
    }

    #[test]
    fn test_parse_query_params_repeated_key() {
        let q = parse_query_params("/p?limit=10&limit=20");
        assert_eq!(
            q.get("limit"),
            Some(&vec!["10".to_string(), "20".to_string()])
        );
    }

    #[test]
    fn test_query_param_last_wins() {
        let ctx = RequestContext {
            request_id: crate::ids::RequestId::new(),
            method: http::Method::GET,
            path: "/p".to_string(),
            path_params: HashMap::new(),
            query_params: parse_query_params("/p?limit=10&limit=20"),
            body: Vec::new(),
        };
        assert_eq!(ctx.query_param("limit"), Some("20"));
        assert_eq!(ctx.query_param("missing"), None);
    }

    #[test]
    fn test_json_body() {
        let mut ctx = RequestContext {
            request_id: crate::ids::RequestId::new(),
            method: http::Method::POST,
            path: "/p".to_string(),
            path_params: HashMap::new(),
            query_params: HashMap::new(),
            body: br#"{"a":1}"#.to_vec(),
        };
        assert!(matches!(ctx.json_body(), Some(Ok(_))));
        ctx.body = b"not json".to_vec();
        assert!(matches!(ctx.json_body(), Some(Err(_))));
        ctx.body = Vec::new();
        assert!(ctx.json_body().is_none());
    }
}
