//! Structured logging setup built on `tracing-subscriber`.
//!
//! Output format and verbosity come from the environment:
//!
//! - `RUST_LOG` - standard `EnvFilter` directives (default `info`)
//! - `BINDERY_LOG_FORMAT` - `json` (default) or `pretty`

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable multi-line output, for local development.
    Pretty,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("BINDERY_LOG_FORMAT").as_deref() {
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once at process startup, before registering routes. The
/// may_minihttp server is capped at `warn` so client disconnects do not
/// flood the log.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<()> {
    init_with_format(LogFormat::from_env())
}

/// Install the global tracing subscriber with an explicit format.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_with_format(format: LogFormat) -> Result<()> {
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    env_filter = env_filter.add_directive(
        "may_minihttp::http_server=warn"
            .parse()
            .expect("valid directive"),
    );

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
