//! # lftp-client
//!
//! Fluent client that drives the `lftp` file-transfer engine.
//!
//! A [`Session`] holds one validated connection configuration and a queue of
//! pending statements. Executing the session joins the connection preamble
//! and the queued statements into a single `;`-separated script and runs it
//! as one `lftp -c <script>` process.
//!
//! ## Features
//!
//! - **Validated configuration**: typed builder or a JSON option bag
//! - **Fluent queueing**: `cd`, `ls`, `put`, `get`, `mv`, `rm`, raw statements
//! - **Safe interpolation**: paths and credentials are shell-escaped
//! - **Async execution**: non-blocking process I/O using tokio
//!
//! ## Quick Start
//!
//! ```no_run
//! use lftp_client::{Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> lftp_client::Result<()> {
//!     // Initialize logging
//!     lftp_client::logging::try_init().ok();
//!
//!     let config = SessionConfig::builder()
//!         .host("example.com")
//!         .username("deploy")
//!         .password("secret")
//!         .protocol("sftp")
//!         .port(22)
//!         .build()?;
//!
//!     let mut session = Session::new(config);
//!     let result = session
//!         .change_directory("incoming")
//!         .download("report.csv", "/tmp/report.csv")
//!         .exec()
//!         .await?;
//!
//!     println!("{}", result.output);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod script;
pub mod session;

// Re-export commonly used types
pub use error::{ConfigError, LftpError, Result};
pub use execution::{ExecutionResult, ExtraStatements, OutputChunk, OutputSource, ScriptExecutor};
pub use script::{escape_shell, ShellEscaper};
pub use session::{CommandQueue, Session, SessionConfig, SessionConfigBuilder, SessionOptions};
