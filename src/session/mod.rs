//! Session configuration and the fluent session handle.
//!
//! This module turns options into a validated [`SessionConfig`], and provides
//! the [`Session`] handle that queues statements and executes them.

mod config;
mod handle;
mod options;
mod queue;

pub use config::{
    SessionConfig, SessionConfigBuilder, AUTO_CONFIRM_PROTOCOLS, DEFAULT_PROGRAM,
    DEFAULT_RETRIES, DEFAULT_RETRY_INTERVAL_MULTIPLIER, DEFAULT_RETRY_INTERVAL_SECS,
    DEFAULT_TIMEOUT_SECS,
};
pub use handle::Session;
pub use options::{PortOption, SessionOptions};
pub use queue::CommandQueue;
