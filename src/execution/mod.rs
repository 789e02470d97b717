//! Execution engine.
//!
//! This module turns a drained statement queue into one engine process:
//! - Script assembly (preamble + statements)
//! - Process spawning with piped output streams
//! - Streaming or collected output
//!
//! # Example
//!
//! ```no_run
//! use lftp_client::execution::{Script, ScriptExecutor};
//!
//! # async fn run() -> lftp_client::Result<()> {
//! let script = Script::new("open -u \"u\",\"p\" \"example.com\";", vec!["ls".into()]);
//! let result = ScriptExecutor::new("lftp").run(&script).await?;
//! println!("Output: {}", result.output);
//! # Ok(())
//! # }
//! ```

mod command;
mod executor;
mod result;

pub use command::{ExtraStatements, Script, SCRIPT_FLAG};
pub use executor::ScriptExecutor;
pub use result::{ExecutionResult, OutputChunk, OutputSource};
