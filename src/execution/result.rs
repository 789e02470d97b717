//! Execution result types.

use std::time::Duration;

/// Outcome of one engine run.
///
/// A run that produced error text or exited non-zero still yields an
/// `ExecutionResult`; inspect [`error`](Self::error) to detect engine-side
/// failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    /// Standard output chunks in arrival order.
    pub stdout: Vec<Vec<u8>>,
    /// Standard error chunks in arrival order.
    pub stderr: Vec<Vec<u8>>,
    /// All standard output, decoded as UTF-8 (lossy).
    pub output: String,
    /// All standard error, decoded as UTF-8 (lossy).
    pub error: String,
    /// Exit code, if the process exited normally. Informational only.
    pub exit_code: Option<i32>,
    /// Wall time from spawn to exit.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Build a result from the collected stream chunks.
    pub fn new(stdout: Vec<Vec<u8>>, stderr: Vec<Vec<u8>>, duration: Duration) -> Self {
        let output = concat_lossy(&stdout);
        let error = concat_lossy(&stderr);
        Self {
            stdout,
            stderr,
            output,
            error,
            exit_code: None,
            duration,
        }
    }

    /// Set the exit code.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Check if the engine wrote anything to standard error.
    pub fn has_error_output(&self) -> bool {
        !self.error.trim().is_empty()
    }

    /// Check if the engine exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Get output as string, trimmed.
    pub fn output_trimmed(&self) -> &str {
        self.output.trim()
    }

    /// Get output lines.
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines()
    }
}

/// Join chunks before decoding so split multi-byte characters survive.
fn concat_lossy(chunks: &[Vec<u8>]) -> String {
    String::from_utf8_lossy(&chunks.concat()).into_owned()
}

/// Streaming output chunk from execution.
#[derive(Debug, Clone)]
pub struct OutputChunk {
    /// Raw bytes.
    pub raw: Vec<u8>,
    /// Decoded text (best effort).
    pub text: String,
    /// Stream source.
    pub source: OutputSource,
}

/// Source of output data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl OutputChunk {
    /// Create a new output chunk.
    pub fn new(raw: Vec<u8>, source: OutputSource) -> Self {
        let text = String::from_utf8_lossy(&raw).into_owned();
        Self { raw, text, source }
    }

    /// Create a stdout chunk.
    pub fn stdout(raw: Vec<u8>) -> Self {
        Self::new(raw, OutputSource::Stdout)
    }

    /// Create a stderr chunk.
    pub fn stderr(raw: Vec<u8>) -> Self {
        Self::new(raw, OutputSource::Stderr)
    }
}
