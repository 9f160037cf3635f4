//! # Dispatcher Module
//!
//! Coroutine-based handler dispatch. Each registered handler runs in its
//! own `may` coroutine, fed resolved argument sets over an MPSC channel;
//! replies travel back over a per-request channel.
//!
//! The dispatcher receives arguments that have already passed the binder,
//! so handlers never see raw request data. A handler returns the raw reply
//! shape (`{..}` or `[status, {..}]`) that the response normalizer reduces
//! to a status and body.
//!
//! Handler panics are caught with `catch_unwind` and converted into a fault
//! envelope so one failing handler cannot take down the server; the service
//! layer turns the envelope into a generic 500.
//!
//! Coroutine stack size is configurable via `BINDERY_STACK_SIZE` (see
//! [`crate::runtime_config`]).

mod core;

pub use core::{Dispatcher, DispatchJob, HandlerArgs, HandlerReply, HandlerSender};
