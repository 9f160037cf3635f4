//! Startup-time configuration errors.
//!
//! Everything in this module is fatal at registration: a route whose binding
//! cannot be decided unambiguously, or a registry collision, must refuse to
//! start serving rather than fail per request.

use std::fmt;

/// A registration-time error. The process must not start serving the
/// offending route (or directive) when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A directive with this name is already registered.
    DuplicateDirective(String),
    /// Two parameters in one handler signature share a name.
    DuplicateParam { handler: String, param: String },
    /// A handler with this name is already registered.
    DuplicateHandler(String),
    /// A path-capture parameter was declared as a schema or directive, so
    /// its source cannot be decided.
    AmbiguousSource { handler: String, param: String },
    /// A parameter carries a directive marker but no directive with that
    /// name is registered.
    UnknownDirective { handler: String, param: String },
    /// The route pattern declares a capture no parameter binds to.
    UnboundCapture { handler: String, capture: String },
    /// The route pattern could not be compiled.
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateDirective(name) => {
                write!(f, "directive '{name}' is already registered")
            }
            ConfigError::DuplicateParam { handler, param } => {
                write!(f, "handler '{handler}' declares parameter '{param}' more than once")
            }
            ConfigError::DuplicateHandler(name) => {
                write!(f, "handler '{name}' is already registered")
            }
            ConfigError::AmbiguousSource { handler, param } => {
                write!(
                    f,
                    "handler '{handler}' parameter '{param}' is a path capture but is declared \
                     as a schema or directive"
                )
            }
            ConfigError::UnknownDirective { handler, param } => {
                write!(
                    f,
                    "handler '{handler}' parameter '{param}' is marked as a directive but no \
                     directive with that name is registered"
                )
            }
            ConfigError::UnboundCapture { handler, capture } => {
                write!(
                    f,
                    "route for handler '{handler}' captures '{{{capture}}}' but no parameter \
                     binds to it"
                )
            }
            ConfigError::InvalidPattern { pattern, reason } => {
                write!(f, "route pattern '{pattern}' is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
