//! Fluent session handle.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{CommandQueue, SessionConfig, SessionOptions};
use crate::error::{ConfigError, LftpError};
use crate::execution::{ExecutionResult, ExtraStatements, OutputChunk, Script, ScriptExecutor};
use crate::script::{render_preamble, ShellEscaper};
use crate::Result;

/// A configured transfer session.
///
/// Queueing methods take `&mut self` and return `&mut Self`, so calls chain:
///
/// ```no_run
/// use lftp_client::{Session, SessionConfig};
///
/// # async fn run() -> lftp_client::Result<()> {
/// let config = SessionConfig::builder()
///     .host("example.com")
///     .username("deploy")
///     .password("secret")
///     .protocol("sftp")
///     .build()?;
///
/// let mut session = Session::new(config);
/// let result = session
///     .change_directory("releases")
///     .upload("build/app.tar.gz", None)
///     .list()
///     .exec()
///     .await?;
///
/// if result.has_error_output() {
///     eprintln!("{}", result.error);
/// }
/// # Ok(())
/// # }
/// ```
///
/// Queueing never fails: calls with missing arguments are skipped and leave
/// the chain intact. Every `exec*` call drains the queue and spawns a fresh
/// engine process that opens its own connection.
pub struct Session {
    config: Arc<SessionConfig>,
    preamble: Arc<str>,
    escaper: ShellEscaper,
    queue: CommandQueue,
    executor: ScriptExecutor,
}

impl Session {
    /// Create a session from a validated configuration.
    pub fn new(config: SessionConfig) -> Self {
        let preamble: Arc<str> = render_preamble(&config).into();
        let escaper = config.escaper();
        let executor = ScriptExecutor::from_config(&config);
        Self {
            config: Arc::new(config),
            preamble,
            escaper,
            queue: CommandQueue::new(),
            executor,
        }
    }

    /// Validate an option bag and create a session from it.
    pub fn from_options(options: SessionOptions) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(options.into_config()?))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Rendered connection preamble, ending with `;`.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Statements queued since the last execution.
    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    /// Script the next execution would run, without draining the queue.
    pub fn preview(&self) -> Script {
        Script::new(Arc::clone(&self.preamble), self.queue.statements().to_vec())
    }

    /// Like [`preview`](Self::preview) but with the password masked.
    pub fn redacted_preview(&self) -> Script {
        Script::new(
            render_preamble(&self.config.redacted()),
            self.queue.statements().to_vec(),
        )
    }

    /// Queue `ls`.
    pub fn list(&mut self) -> &mut Self {
        self.raw("ls")
    }

    /// Queue `pwd`.
    pub fn print_working_directory(&mut self) -> &mut Self {
        self.raw("pwd")
    }

    /// Queue `cd <path>`.
    pub fn change_directory(&mut self, path: &str) -> &mut Self {
        let statement = format!("cd {}", self.escaper.escape(path));
        self.raw(statement)
    }

    /// Queue `cat <path>`.
    pub fn read_file(&mut self, path: &str) -> &mut Self {
        let statement = format!("cat {}", self.escaper.escape(path));
        self.raw(statement)
    }

    /// Queue `put <local> [-o <remote>]`. Skipped when `local` is empty.
    pub fn upload<'a>(&mut self, local: &str, remote: impl Into<Option<&'a str>>) -> &mut Self {
        let statement = self.transfer("put", local, remote.into());
        self.raw(statement)
    }

    /// Queue `get <remote> [-o <local>]`. Skipped when `remote` is empty.
    pub fn download<'a>(&mut self, remote: &str, local: impl Into<Option<&'a str>>) -> &mut Self {
        let statement = self.transfer("get", remote, local.into());
        self.raw(statement)
    }

    /// Queue `mv <from> <to>`. Skipped when either path is empty.
    pub fn move_path(&mut self, from: &str, to: &str) -> &mut Self {
        if from.is_empty() || to.is_empty() {
            return self;
        }
        let statement = format!(
            "mv {} {}",
            self.escaper.escape(from),
            self.escaper.escape(to)
        );
        self.raw(statement)
    }

    /// Queue `rm <paths...>`.
    ///
    /// An empty iterator still queues a bare `rm`; the engine reports it.
    pub fn remove<I, S>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let statement = self.with_paths("rm", paths);
        self.raw(statement)
    }

    /// Queue `rmdir <paths...>`.
    pub fn remove_directory<I, S>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let statement = self.with_paths("rmdir", paths);
        self.raw(statement)
    }

    /// Queue a statement verbatim, without escaping. Empty input is skipped.
    pub fn raw(&mut self, statement: impl Into<String>) -> &mut Self {
        self.queue.push(statement);
        self
    }

    /// Alias of [`list`](Self::list).
    pub fn ls(&mut self) -> &mut Self {
        self.list()
    }

    /// Alias of [`print_working_directory`](Self::print_working_directory).
    pub fn pwd(&mut self) -> &mut Self {
        self.print_working_directory()
    }

    /// Alias of [`change_directory`](Self::change_directory).
    pub fn cd(&mut self, path: &str) -> &mut Self {
        self.change_directory(path)
    }

    /// Alias of [`read_file`](Self::read_file).
    pub fn cat(&mut self, path: &str) -> &mut Self {
        self.read_file(path)
    }

    /// Alias of [`upload`](Self::upload).
    pub fn put<'a>(&mut self, local: &str, remote: impl Into<Option<&'a str>>) -> &mut Self {
        self.upload(local, remote)
    }

    /// Alias of [`upload`](Self::upload).
    pub fn add_file<'a>(&mut self, local: &str, remote: impl Into<Option<&'a str>>) -> &mut Self {
        self.upload(local, remote)
    }

    /// Alias of [`download`](Self::download).
    pub fn get<'a>(&mut self, remote: &str, local: impl Into<Option<&'a str>>) -> &mut Self {
        self.download(remote, local)
    }

    /// Alias of [`download`](Self::download).
    pub fn get_file<'a>(&mut self, remote: &str, local: impl Into<Option<&'a str>>) -> &mut Self {
        self.download(remote, local)
    }

    /// Alias of [`move_path`](Self::move_path).
    pub fn mv(&mut self, from: &str, to: &str) -> &mut Self {
        self.move_path(from, to)
    }

    /// Alias of [`remove`](Self::remove).
    pub fn rm<I, S>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove(paths)
    }

    /// Alias of [`remove_directory`](Self::remove_directory).
    pub fn rmdir<I, S>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove_directory(paths)
    }

    /// Drain the queue and run it in a fresh engine process.
    ///
    /// The queue is emptied before this returns, so the returned future does
    /// not borrow the session. Only a spawn failure resolves to `Err`.
    pub fn exec(&mut self) -> impl Future<Output = Result<ExecutionResult>> + Send + 'static {
        self.exec_inner(None)
    }

    /// Like [`exec`](Self::exec) with extra statements.
    ///
    /// A single raw statement runs right after the preamble; a list of
    /// statements is appended to the queue before it is drained.
    pub fn exec_with(
        &mut self,
        extra: ExtraStatements,
    ) -> impl Future<Output = Result<ExecutionResult>> + Send + 'static {
        self.exec_inner(Some(extra))
    }

    /// Drain the queue and run it, streaming output chunks as they arrive.
    ///
    /// Must be called within a tokio runtime.
    pub fn exec_streaming(
        &mut self,
    ) -> (
        mpsc::UnboundedReceiver<OutputChunk>,
        JoinHandle<Result<ExecutionResult>>,
    ) {
        let script = self.drain(None);
        self.executor.run_streaming(script)
    }

    /// Execute and route the outcome to one of two callbacks.
    pub fn then<T, S, F>(
        &mut self,
        on_success: S,
        on_failure: F,
    ) -> impl Future<Output = T> + Send + 'static
    where
        T: 'static,
        S: FnOnce(ExecutionResult) -> T + Send + 'static,
        F: FnOnce(LftpError) -> T + Send + 'static,
    {
        let execution = self.exec();
        async move {
            match execution.await {
                Ok(result) => on_success(result),
                Err(err) => on_failure(err),
            }
        }
    }

    /// Execute and recover from a spawn failure with `on_failure`.
    pub fn catch<F>(
        &mut self,
        on_failure: F,
    ) -> impl Future<Output = ExecutionResult> + Send + 'static
    where
        F: FnOnce(LftpError) -> ExecutionResult + Send + 'static,
    {
        let execution = self.exec();
        async move { execution.await.unwrap_or_else(on_failure) }
    }

    fn exec_inner(
        &mut self,
        extra: Option<ExtraStatements>,
    ) -> impl Future<Output = Result<ExecutionResult>> + Send + 'static {
        let script = self.drain(extra);
        let executor = self.executor.clone();
        async move { executor.run(&script).await }
    }

    fn drain(&mut self, extra: Option<ExtraStatements>) -> Script {
        let mut statements = Vec::new();
        match extra {
            Some(ExtraStatements::Raw(statement)) if !statement.is_empty() => {
                statements.push(statement);
            }
            Some(ExtraStatements::Queue(queued)) => self.queue.extend(queued),
            _ => {}
        }
        statements.extend(self.queue.drain());

        debug!(
            statements = statements.len(),
            host = %self.config.target(),
            "drained command queue"
        );
        Script::new(Arc::clone(&self.preamble), statements)
    }

    fn with_paths<I, S>(&self, verb: &str, paths: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = self.escaper.escape_all(paths);
        if paths.is_empty() {
            verb.to_string()
        } else {
            format!("{} {}", verb, paths)
        }
    }

    fn transfer(&self, verb: &str, source: &str, destination: Option<&str>) -> String {
        if source.is_empty() {
            return String::new();
        }
        match destination.filter(|d| !d.is_empty()) {
            Some(destination) => format!(
                "{} {} -o {}",
                verb,
                self.escaper.escape(source),
                self.escaper.escape(destination)
            ),
            None => format!("{} {}", verb, self.escaper.escape(source)),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            SessionConfig::builder()
                .host("example.com")
                .username("u")
                .password("p")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_chain_escapes_paths() {
        let mut session = session();
        session.change_directory("a b").remove(["x.txt"]);
        assert_eq!(session.queue().statements(), ["cd a\\ b", "rm x.txt"]);
    }

    #[test]
    fn test_simple_statements() {
        let mut session = session();
        session.list().print_working_directory().read_file("notes 1.txt");
        assert_eq!(session.queue().statements(), ["ls", "pwd", "cat notes\\ 1.txt"]);
    }

    #[test]
    fn test_upload() {
        let mut session = session();
        session
            .upload("local.txt", None)
            .upload("my file.txt", "/remote/dir/file.txt");
        assert_eq!(
            session.queue().statements(),
            ["put local.txt", "put my\\ file.txt -o /remote/dir/file.txt"]
        );
    }

    #[test]
    fn test_upload_empty_local_is_noop() {
        let mut session = session();
        session.upload("", "/remote");
        assert!(session.queue().is_empty());
    }

    #[test]
    fn test_upload_empty_remote_treated_as_absent() {
        let mut session = session();
        session.upload("a.txt", "");
        assert_eq!(session.queue().statements(), ["put a.txt"]);
    }

    #[test]
    fn test_download() {
        let mut session = session();
        session
            .download("remote.txt", None)
            .download("", "local.txt")
            .download("/srv/$data", "out dir/data");
        assert_eq!(
            session.queue().statements(),
            ["get remote.txt", "get /srv/\\$data -o out\\ dir/data"]
        );
    }

    #[test]
    fn test_move_requires_both_paths() {
        let mut session = session();
        session.move_path("", "").move_path("a", "").move_path("", "b");
        assert!(session.queue().is_empty());

        session.move_path("old name", "new");
        assert_eq!(session.queue().statements(), ["mv old\\ name new"]);
    }

    #[test]
    fn test_remove_variadic() {
        let mut session = session();
        session
            .remove(["a.txt", "b c.txt"])
            .remove(Vec::<&str>::new())
            .remove_directory(["old", "tmp dir"]);
        assert_eq!(
            session.queue().statements(),
            ["rm a.txt b\\ c.txt", "rm", "rmdir old tmp\\ dir"]
        );
    }

    #[test]
    fn test_raw_is_verbatim() {
        let mut session = session();
        session.raw("mirror -R \"local dir\" remote").raw("");
        assert_eq!(
            session.queue().statements(),
            ["mirror -R \"local dir\" remote"]
        );
    }

    #[test]
    fn test_aliases() {
        let mut session = session();
        session
            .ls()
            .pwd()
            .cd("x")
            .cat("y")
            .put("a", None)
            .add_file("b", None)
            .get("c", None)
            .get_file("d", None)
            .mv("e", "f")
            .rm(["g"])
            .rmdir(["h"]);
        assert_eq!(
            session.queue().statements(),
            [
                "ls", "pwd", "cd x", "cat y", "put a", "put b", "get c", "get d", "mv e f",
                "rm g", "rmdir h"
            ]
        );
    }

    #[test]
    fn test_escape_disabled() {
        let mut session = Session::new(
            SessionConfig::builder()
                .host("h")
                .username("u")
                .password("p")
                .escape(false)
                .build()
                .unwrap(),
        );
        session.change_directory("a b");
        assert_eq!(session.queue().statements(), ["cd a b"]);
    }

    #[test]
    fn test_preview_does_not_drain() {
        let mut session = session();
        session.list();
        let script = session.preview();
        assert_eq!(script.statements(), ["ls"]);
        assert!(script.render().ends_with("\"example.com\";ls"));
        assert_eq!(session.queue().len(), 1);
    }

    #[test]
    fn test_redacted_preview_masks_password() {
        let mut session = Session::new(
            SessionConfig::builder()
                .host("h")
                .username("u")
                .password("s3cret")
                .build()
                .unwrap(),
        );
        session.list();
        let text = session.redacted_preview().render();
        assert!(!text.contains("s3cret"));
        assert!(text.contains("open -u \"u\",\"****\" \"h\""));
    }

    #[test]
    fn test_drain_with_raw_extra() {
        let mut session = session();
        session.list();
        let script = session.drain(Some(ExtraStatements::from("pwd")));
        assert_eq!(script.statements(), ["pwd", "ls"]);
        assert!(session.queue().is_empty());
    }

    #[test]
    fn test_drain_with_queued_extras() {
        let mut session = session();
        session.list();
        let script = session.drain(Some(ExtraStatements::from(["pwd", "cd x"])));
        assert_eq!(script.statements(), ["ls", "pwd", "cd x"]);
    }

    #[test]
    fn test_from_options() {
        let options = SessionOptions {
            host: Some("example.com".into()),
            username: Some("u".into()),
            password: Some("p".into()),
            ..Default::default()
        };
        let session = Session::from_options(options).unwrap();
        assert!(session.preamble().ends_with("open -u \"u\",\"p\" \"example.com\";"));

        let err = Session::from_options(SessionOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHost));
    }

    #[test]
    fn test_exec_drains_queue_synchronously() {
        let mut session = Session::new(
            SessionConfig::builder()
                .host("h")
                .username("u")
                .password("p")
                .program("/nonexistent/lftp")
                .build()
                .unwrap(),
        );
        session.list();
        let execution = session.exec();
        assert!(session.queue().is_empty());

        let err = tokio_test::block_on(execution).unwrap_err();
        assert!(matches!(err, LftpError::Spawn { .. }));
    }
}
