use crate::coerce::{coerce, PrimitiveType};
use crate::directive::DirectiveRegistry;
use crate::error::ConfigError;
use crate::schema::{Schema, ValidationError, INVALID_INPUT_MSG, MISSING_FIELD_MSG};
use crate::server::RequestContext;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// The declared type of one handler parameter, as supplied at registration.
#[derive(Debug, Clone)]
pub enum ParamKind {
    /// A scalar coerced from its textual source.
    Primitive(PrimitiveType),
    /// The request body, parsed and validated wholesale against a schema.
    Schema(Arc<Schema>),
    /// A marker: the value comes from the directive registry by name.
    Directive,
}

/// The source a parameter is bound from, inferred once at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Path,
    Query,
    Body,
    Directive,
}

/// Registration-time declaration of one handler parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Value>,
}

impl Param {
    /// A required scalar parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Param {
            name: name.into(),
            kind: ParamKind::Primitive(ty),
            default: None,
        }
    }

    /// A scalar parameter with a default used when its source is absent.
    #[must_use]
    pub fn with_default(name: impl Into<String>, ty: PrimitiveType, default: Value) -> Self {
        Param {
            name: name.into(),
            kind: ParamKind::Primitive(ty),
            default: Some(default),
        }
    }

    /// A body parameter validated against a schema.
    #[must_use]
    pub fn body(name: impl Into<String>, schema: Arc<Schema>) -> Self {
        Param {
            name: name.into(),
            kind: ParamKind::Schema(schema),
            default: None,
        }
    }

    /// A directive parameter, resolved from the registry by name.
    #[must_use]
    pub fn directive(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            kind: ParamKind::Directive,
            default: None,
        }
    }
}

/// One parameter of a bound handler signature, with its inferred source.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Value>,
    pub source: ParamSource,
}

/// The ordered, immutable parameter list of one registered handler.
///
/// Built once per handler at route-registration time by
/// [`HandlerSignature::bind`]; referenced read-only on every request.
#[derive(Debug, Clone)]
pub struct HandlerSignature {
    handler_name: String,
    params: Vec<ParamSpec>,
}

impl HandlerSignature {
    /// Bind a declared parameter list against a route's capture set and the
    /// directive registry, inferring each parameter's source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the binding is undecidable: duplicate
    /// parameter names, a path capture declared as a schema or directive, a
    /// directive marker with no registration, or a pattern capture no
    /// parameter binds to. These refuse startup; they are never per-request
    /// conditions.
    pub fn bind(
        handler_name: &str,
        params: Vec<Param>,
        captures: &[String],
        directives: &DirectiveRegistry,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut specs = Vec::with_capacity(params.len());

        for param in params {
            if !seen.insert(param.name.clone()) {
                return Err(ConfigError::DuplicateParam {
                    handler: handler_name.to_string(),
                    param: param.name,
                });
            }

            let source = if captures.iter().any(|c| c == &param.name) {
                match param.kind {
                    ParamKind::Primitive(_) => ParamSource::Path,
                    ParamKind::Schema(_) | ParamKind::Directive => {
                        return Err(ConfigError::AmbiguousSource {
                            handler: handler_name.to_string(),
                            param: param.name,
                        });
                    }
                }
            } else {
                match param.kind {
                    ParamKind::Schema(_) => ParamSource::Body,
                    ParamKind::Directive => {
                        if !directives.contains(&param.name) {
                            return Err(ConfigError::UnknownDirective {
                                handler: handler_name.to_string(),
                                param: param.name,
                            });
                        }
                        ParamSource::Directive
                    }
                    ParamKind::Primitive(_) => ParamSource::Query,
                }
            };

            specs.push(ParamSpec {
                name: param.name,
                kind: param.kind,
                default: param.default,
                source,
            });
        }

        // Every pattern capture must be consumed by a path parameter;
        // an orphan capture is a route-configuration bug.
        for capture in captures {
            let bound = specs
                .iter()
                .any(|s| s.source == ParamSource::Path && &s.name == capture);
            if !bound {
                return Err(ConfigError::UnboundCapture {
                    handler: handler_name.to_string(),
                    capture: capture.clone(),
                });
            }
        }

        Ok(HandlerSignature {
            handler_name: handler_name.to_string(),
            params: specs,
        })
    }

    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}

/// Why a request could not be resolved into handler arguments.
#[derive(Debug)]
pub enum ResolveError {
    /// Client-input failures: the aggregated 409 validation report.
    Invalid(Vec<ValidationError>),
    /// A server-side fault (directive resolver failure, missing capture).
    /// Surfaces as a 500, never as validation data.
    Fault(anyhow::Error),
}

/// Resolve every parameter of a signature from the request.
///
/// Parameters are independent; all of them are resolved and every
/// client-input failure is collected into one report. A successful
/// resolution returns a name → value map ready for direct handler
/// invocation.
pub fn resolve(
    signature: &HandlerSignature,
    ctx: &RequestContext,
    directives: &DirectiveRegistry,
) -> Result<HashMap<String, Value>, ResolveError> {
    let mut args = HashMap::with_capacity(signature.params.len());
    let mut errors: Vec<ValidationError> = Vec::new();

    for spec in &signature.params {
        match spec.source {
            ParamSource::Path => {
                // Capture presence is guaranteed by HandlerSignature::bind;
                // absence here means the route table is corrupt.
                let raw = match ctx.path_param(&spec.name) {
                    Some(raw) => raw,
                    None => {
                        return Err(ResolveError::Fault(anyhow::anyhow!(
                            "path capture '{}' missing for handler '{}'",
                            spec.name,
                            signature.handler_name
                        )));
                    }
                };
                if let ParamKind::Primitive(ty) = &spec.kind {
                    match coerce(raw, *ty) {
                        Ok(value) => {
                            args.insert(spec.name.clone(), value);
                        }
                        Err(err) => {
                            errors.push(ValidationError::new(vec![spec.name.clone()], err.message));
                        }
                    }
                }
            }
            ParamSource::Query => {
                if let ParamKind::Primitive(ty) = &spec.kind {
                    match ctx.query_param(&spec.name) {
                        Some(raw) => match coerce(raw, *ty) {
                            Ok(value) => {
                                args.insert(spec.name.clone(), value);
                            }
                            Err(err) => {
                                errors.push(ValidationError::new(
                                    vec![spec.name.clone()],
                                    err.message,
                                ));
                            }
                        },
                        None => match &spec.default {
                            Some(default) => {
                                args.insert(spec.name.clone(), default.clone());
                            }
                            None => {
                                errors.push(ValidationError::new(
                                    vec![spec.name.clone()],
                                    MISSING_FIELD_MSG,
                                ));
                            }
                        },
                    }
                }
            }
            ParamSource::Body => {
                if let ParamKind::Schema(schema) = &spec.kind {
                    match ctx.json_body() {
                        None => match &spec.default {
                            Some(default) => {
                                args.insert(spec.name.clone(), default.clone());
                            }
                            None => {
                                errors.push(ValidationError::new(
                                    vec![spec.name.clone()],
                                    MISSING_FIELD_MSG,
                                ));
                            }
                        },
                        Some(Err(_)) => {
                            errors.push(ValidationError::new(
                                vec![spec.name.clone()],
                                INVALID_INPUT_MSG,
                            ));
                        }
                        Some(Ok(payload)) => match schema.validate(&payload) {
                            Ok(validated) => {
                                args.insert(spec.name.clone(), validated);
                            }
                            Err(field_errors) => {
                                // A root-level error ("Invalid input type.")
                                // has no field path; report it under the
                                // parameter name.
                                errors.extend(field_errors.into_iter().map(|mut e| {
                                    if e.field_path.is_empty() {
                                        e.field_path = vec![spec.name.clone()];
                                    }
                                    e
                                }));
                            }
                        },
                    }
                }
            }
            ParamSource::Directive => match directives.resolve(&spec.name, ctx) {
                Ok(value) => {
                    args.insert(spec.name.clone(), value);
                }
                Err(err) => {
                    return Err(ResolveError::Fault(err.context(format!(
                        "directive '{}' failed for handler '{}'",
                        spec.name, signature.handler_name
                    ))));
                }
            },
        }
    }

    if errors.is_empty() {
        debug!(
            request_id = %ctx.request_id,
            handler = %signature.handler_name,
            arg_count = args.len(),
            "Parameters resolved"
        );
        Ok(args)
    } else {
        debug!(
            request_id = %ctx.request_id,
            handler = %signature.handler_name,
            error_count = errors.len(),
            "Parameter resolution failed"
        );
        Err(ResolveError::Invalid(errors))
    }
}
