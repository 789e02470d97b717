//! Script text generation for the transfer engine.
//!
//! The engine reads one argument holding `;`-separated statements:
//!
//! ```text
//! set net:max-retries 1;...;open -u "user","pass" "sftp://host:22";cd uploads;put report.csv
//! ```
//!
//! # Example
//!
//! ```
//! use lftp_client::script::{escape_shell, render_preamble};
//! use lftp_client::SessionConfig;
//!
//! assert_eq!(escape_shell("my file.txt"), "my\\ file.txt");
//!
//! let config = SessionConfig::builder()
//!     .host("example.com")
//!     .username("u")
//!     .password("p")
//!     .build()
//!     .unwrap();
//! assert!(render_preamble(&config).ends_with("open -u \"u\",\"p\" \"example.com\";"));
//! ```

mod escape;
mod preamble;

pub use escape::{escape_shell, ShellEscaper};
pub use preamble::{preamble_statements, render_preamble};

/// Separator between script statements.
pub const STATEMENT_SEPARATOR: &str = ";";
