use super::request::{parse_request, ParsedRequest, RequestContext};
use super::response::{normalize, validation_report, write_json, write_json_error};
use crate::binder::{self, HandlerSignature, Param, ResolveError};
use crate::directive::DirectiveRegistry;
use crate::dispatcher::{Dispatcher, HandlerArgs, HandlerReply};
use crate::error::ConfigError;
use crate::ids::RequestId;
use crate::router::{Route, Router};
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::{json, Value};
use std::io;
use std::sync::Arc;
use tracing::{error, info};

/// Registration-time application builder.
///
/// Directives must be registered before the routes that reference them;
/// route registration binds each handler's signature (source inference,
/// configuration checks) immediately, so any [`ConfigError`] surfaces
/// before the server ever starts. [`App::into_service`] freezes everything
/// behind `Arc`; after that point the route table, signatures, and
/// directive registry are read-only shared state.
#[derive(Default)]
pub struct App {
    directives: DirectiveRegistry,
    routes: Vec<Arc<Route>>,
    dispatcher: Dispatcher,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directive resolver under a process-unique name.
    pub fn directive<F>(&mut self, name: &str, resolver: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(&RequestContext) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.directives.register(name, resolver)?;
        Ok(self)
    }

    /// Register a route: pattern, handler name, declared parameters, and
    /// the handler function.
    ///
    /// The parameter list is bound against the pattern's captures and the
    /// directive registry here, once; the resulting signature is immutable.
    ///
    /// # Safety
    ///
    /// Spawns the handler coroutine via the `may` runtime (see
    /// [`Dispatcher::register_handler`]). Must be called before the server
    /// starts serving.
    pub unsafe fn route<F>(
        &mut self,
        method: Method,
        pattern: &str,
        handler_name: &str,
        params: Vec<Param>,
        handler_fn: F,
    ) -> Result<&mut Self, ConfigError>
    where
        F: Fn(&HandlerArgs) -> Value + Send + 'static,
    {
        if self.dispatcher.has_handler(handler_name) {
            return Err(ConfigError::DuplicateHandler(handler_name.to_string()));
        }
        // Compile the pattern first so capture names are available to bind.
        let (_, captures) = crate::router::path_to_regex(pattern)?;
        let signature =
            HandlerSignature::bind(handler_name, params, &captures, &self.directives)?;
        let route = Route::new(method, pattern, handler_name, Arc::new(signature))?;
        self.dispatcher.register_handler(handler_name, handler_fn);
        self.routes.push(Arc::new(route));
        info!(
            handler_name = %handler_name,
            pattern = %pattern,
            total_routes = self.routes.len(),
            "Route registered"
        );
        Ok(self)
    }

    /// Freeze registration and produce the serving-time service.
    #[must_use]
    pub fn into_service(self) -> AppService {
        AppService {
            router: Arc::new(Router::new(self.routes)),
            dispatcher: Arc::new(self.dispatcher),
            directives: Arc::new(self.directives),
        }
    }
}

/// The serving-time request pipeline: route → resolve → dispatch →
/// normalize. All shared state is immutable behind `Arc`; no locking on
/// the request path.
#[derive(Clone)]
pub struct AppService {
    router: Arc<Router>,
    dispatcher: Arc<Dispatcher>,
    directives: Arc<DirectiveRegistry>,
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_json(res, 200, &json!({ "status": "ok" }));
    Ok(())
}

fn internal_error(res: &mut Response) {
    write_json_error(res, 500, json!({ "error": "Internal Server Error" }));
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let ParsedRequest {
            method,
            path,
            headers,
            query_params,
            body,
        } = parse_request(req);

        if method == "GET" && path == "/health" {
            return health_endpoint(res);
        }

        let method: Method = match method.parse() {
            Ok(m) => m,
            Err(_) => {
                write_json_error(res, 400, json!({ "error": "Unsupported method" }));
                return Ok(());
            }
        };

        let route_match = match self.router.route(&method, &path) {
            Some(m) => m,
            None => {
                write_json_error(
                    res,
                    404,
                    json!({ "error": "Not Found", "method": method.as_str(), "path": path }),
                );
                return Ok(());
            }
        };

        let request_id = RequestId::from_header_or_new(
            headers.get("x-request-id").map(String::as_str),
        );
        let ctx = RequestContext {
            request_id,
            method,
            path,
            path_params: route_match.path_params.into_iter().collect(),
            query_params,
            body,
        };

        let args = match binder::resolve(&route_match.route.signature, &ctx, &self.directives) {
            Ok(args) => args,
            Err(ResolveError::Invalid(errors)) => {
                info!(
                    request_id = %request_id,
                    handler = %route_match.route.handler_name,
                    error_count = errors.len(),
                    "Request rejected with validation report"
                );
                write_json_error(res, 409, validation_report(&errors));
                return Ok(());
            }
            Err(ResolveError::Fault(err)) => {
                error!(
                    request_id = %request_id,
                    handler = %route_match.route.handler_name,
                    error = %format!("{err:#}"),
                    "Resolver fault"
                );
                internal_error(res);
                return Ok(());
            }
        };

        let reply = self.dispatcher.dispatch(HandlerArgs {
            request_id,
            handler_name: route_match.route.handler_name.clone(),
            args,
        });

        match reply {
            Some(HandlerReply::Return(value)) => match normalize(value) {
                Ok((status, body)) => write_json(res, status, &body),
                Err(err) => {
                    error!(
                        request_id = %request_id,
                        handler = %route_match.route.handler_name,
                        error = %err,
                        "Handler returned an unsupported shape"
                    );
                    internal_error(res);
                }
            },
            Some(HandlerReply::Panicked(_)) | None => {
                // Panic detail is already logged by the dispatcher; the
                // client only ever sees the generic body.
                internal_error(res);
            }
        }
        Ok(())
    }
}
