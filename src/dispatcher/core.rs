use crate::ids::RequestId;
use crate::runtime_config::RuntimeConfig;
use may::coroutine;
use may::sync::mpsc;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, error, info};

/// Resolved, typed arguments for one handler invocation.
///
/// Every name in `args` corresponds to a parameter of the handler's bound
/// signature; values have already been coerced and validated.
#[derive(Debug, Clone)]
pub struct HandlerArgs {
    pub request_id: RequestId,
    pub handler_name: String,
    pub args: HashMap<String, Value>,
}

impl HandlerArgs {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.args.get(name).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.args.get(name).and_then(Value::as_i64)
    }

    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.args.get(name).and_then(Value::as_f64)
    }

    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.args.get(name).and_then(Value::as_bool)
    }
}

/// Reply envelope sent back from a handler coroutine.
#[derive(Debug, Clone)]
pub enum HandlerReply {
    /// The handler's raw return value, not yet normalized.
    Return(Value),
    /// The handler panicked; the payload is the panic message, for the log
    /// only; it is never sent to the client.
    Panicked(String),
}

/// One unit of work sent to a handler coroutine.
#[derive(Debug)]
pub struct DispatchJob {
    pub args: HandlerArgs,
    pub reply_tx: mpsc::Sender<HandlerReply>,
}

/// Channel sender feeding a handler coroutine.
pub type HandlerSender = mpsc::Sender<DispatchJob>;

/// Routes resolved requests to registered handler coroutines.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<String, HandlerSender>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Register a handler function under a name, spawning its coroutine.
    ///
    /// The handler receives resolved arguments and returns the raw reply
    /// shape consumed by the response normalizer. Panics are caught and
    /// reported as [`HandlerReply::Panicked`].
    ///
    /// # Safety
    ///
    /// `may::coroutine::Builder::spawn` is unsafe in the `may` runtime. The
    /// caller must ensure the may runtime is initialized and that
    /// registration happens before the server starts accepting requests.
    pub unsafe fn register_handler<F>(&mut self, name: &str, handler_fn: F)
    where
        F: Fn(&HandlerArgs) -> Value + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<DispatchJob>();
        let name = name.to_string();
        let coroutine_name = name.clone();
        let stack_size = RuntimeConfig::from_env().stack_size;

        let spawn_result = coroutine::Builder::new()
            .stack_size(stack_size)
            .spawn(move || {
                debug!(
                    handler_name = %coroutine_name,
                    stack_size = stack_size,
                    "Handler coroutine start"
                );
                for job in rx.iter() {
                    let request_id = job.args.request_id;
                    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        handler_fn(&job.args)
                    }));
                    let reply = match result {
                        Ok(value) => HandlerReply::Return(value),
                        Err(panic) => {
                            let panic_message = format!("{panic:?}");
                            error!(
                                request_id = %request_id,
                                handler_name = %coroutine_name,
                                panic_message = %panic_message,
                                "Handler panicked"
                            );
                            HandlerReply::Panicked(panic_message)
                        }
                    };
                    let _ = job.reply_tx.send(reply);
                }
            });

        if let Err(e) = spawn_result {
            error!(
                handler_name = %name,
                error = %e,
                stack_size = stack_size,
                "Failed to spawn handler coroutine"
            );
            return;
        }

        self.handlers.insert(name, tx);
    }

    /// Dispatch resolved arguments to the named handler and wait for its
    /// reply.
    ///
    /// Returns `None` when no handler is registered under the name or its
    /// channel has closed (a crashed coroutine); the service layer maps
    /// both to a 500.
    #[must_use]
    pub fn dispatch(&self, args: HandlerArgs) -> Option<HandlerReply> {
        let tx = match self.handlers.get(&args.handler_name) {
            Some(tx) => tx,
            None => {
                error!(
                    handler_name = %args.handler_name,
                    available_handlers = self.handlers.len(),
                    "Handler not found"
                );
                return None;
            }
        };

        let request_id = args.request_id;
        let handler_name = args.handler_name.clone();
        let (reply_tx, reply_rx) = mpsc::channel();
        let start = Instant::now();

        if let Err(e) = tx.send(DispatchJob { args, reply_tx }) {
            error!(
                request_id = %request_id,
                handler_name = %handler_name,
                error = %e,
                "Failed to send request to handler"
            );
            return None;
        }

        match reply_rx.recv() {
            Ok(reply) => {
                info!(
                    request_id = %request_id,
                    handler_name = %handler_name,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Handler reply received"
                );
                Some(reply)
            }
            Err(e) => {
                error!(
                    request_id = %request_id,
                    handler_name = %handler_name,
                    error = %e,
                    "Handler channel closed - handler may have crashed"
                );
                None
            }
        }
    }
}
