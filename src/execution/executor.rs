//! Transfer engine process runner.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::command::Script;
use super::result::{ExecutionResult, OutputChunk, OutputSource};
use crate::error::LftpError;
use crate::session::SessionConfig;
use crate::Result;

/// Default buffer size for reading engine output.
const READ_BUFFER_SIZE: usize = 4096;

/// Spawns the transfer engine for assembled scripts.
///
/// Each run is an independent process; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    program: String,
    working_dir: Option<PathBuf>,
}

impl ScriptExecutor {
    /// Create an executor for the given engine binary.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
        }
    }

    /// Create an executor using a session's program and working directory.
    pub fn from_config(config: &SessionConfig) -> Self {
        let executor = Self::new(config.program());
        match config.working_directory() {
            Some(dir) => executor.working_dir(dir),
            None => executor,
        }
    }

    /// Set the working directory of spawned processes.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run a script and collect both output streams.
    ///
    /// Only a failure to launch the process is an error. Whatever the engine
    /// reports, including a non-zero exit, comes back inside the result.
    pub async fn run(&self, script: &Script) -> Result<ExecutionResult> {
        self.run_inner(script, None).await
    }

    /// Run a script, forwarding every output chunk as it arrives.
    ///
    /// Returns a receiver for streaming chunks and a handle resolving to the
    /// full result. The channel is unbounded, so the run settles even when the
    /// receiver is never drained. Must be called within a tokio runtime.
    pub fn run_streaming(
        &self,
        script: Script,
    ) -> (
        mpsc::UnboundedReceiver<OutputChunk>,
        JoinHandle<Result<ExecutionResult>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel::<OutputChunk>();
        let executor = self.clone();
        let handle = tokio::spawn(async move { executor.run_inner(&script, Some(tx)).await });
        (rx, handle)
    }

    async fn run_inner(
        &self,
        script: &Script,
        tx: Option<mpsc::UnboundedSender<OutputChunk>>,
    ) -> Result<ExecutionResult> {
        let start = Instant::now();

        let mut command = Command::new(&self.program);
        command
            .args(script.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| LftpError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        debug!(
            program = %self.program,
            statements = script.len(),
            pid = ?child.id(),
            working_dir = ?self.working_dir,
            "spawned transfer engine"
        );

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("engine stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("engine stderr was not captured"))?;

        let stdout_task = tokio::spawn(collect_stream(stdout, OutputSource::Stdout, tx.clone()));
        let stderr_task = tokio::spawn(collect_stream(stderr, OutputSource::Stderr, tx));

        let status = child.wait().await?;
        let stdout_chunks = join_reader(stdout_task).await?;
        let stderr_chunks = join_reader(stderr_task).await?;

        let duration = start.elapsed();
        debug!(
            exit_code = ?status.code(),
            stdout_chunks = stdout_chunks.len(),
            stderr_chunks = stderr_chunks.len(),
            ?duration,
            "transfer engine exited"
        );

        let mut result = ExecutionResult::new(stdout_chunks, stderr_chunks, duration);
        if let Some(code) = status.code() {
            result = result.with_exit_code(code);
        }
        Ok(result)
    }
}

async fn join_reader(task: JoinHandle<std::io::Result<Vec<Vec<u8>>>>) -> Result<Vec<Vec<u8>>> {
    let chunks = task
        .await
        .map_err(|e| LftpError::TaskJoin(e.to_string()))??;
    Ok(chunks)
}

/// Read a stream to its end, keeping chunk boundaries.
async fn collect_stream<R>(
    mut reader: R,
    source: OutputSource,
    tx: Option<mpsc::UnboundedSender<OutputChunk>>,
) -> std::io::Result<Vec<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut chunks = Vec::new();
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        let chunk = buf[..n].to_vec();
        if let Some(tx) = &tx {
            let forwarded = match source {
                OutputSource::Stdout => OutputChunk::stdout(chunk.clone()),
                OutputSource::Stderr => OutputChunk::stderr(chunk.clone()),
            };
            // Receiver may have been dropped; collection continues regardless.
            let _ = tx.send(forwarded);
        }
        chunks.push(chunk);
    }

    Ok(chunks)
}
