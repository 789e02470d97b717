//! Validated connection settings for a session.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::script::ShellEscaper;

/// Default transfer engine binary.
pub const DEFAULT_PROGRAM: &str = "lftp";

/// Default `net:max-retries` (1 = a single attempt, 0 = unlimited).
pub const DEFAULT_RETRIES: u32 = 1;

/// Default `net:timeout` in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default `net:reconnect-interval-base` in seconds.
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 5;

/// Default `net:reconnect-interval-multiplier`.
pub const DEFAULT_RETRY_INTERVAL_MULTIPLIER: f64 = 1.0;

/// Placeholder shown instead of the password.
const REDACTED: &str = "****";

/// Protocols with interactive certificate/host-key confirmation.
pub const AUTO_CONFIRM_PROTOCOLS: [&str; 2] = ["sftp", "fish"];

/// Immutable, validated configuration of one session.
///
/// Construct through [`SessionConfig::builder`] or
/// [`SessionOptions::into_config`](super::SessionOptions::into_config).
#[derive(Clone, PartialEq)]
pub struct SessionConfig {
    host: String,
    username: String,
    password: String,
    protocol: Option<String>,
    port: Option<u16>,
    retries: u32,
    timeout_secs: u64,
    retry_interval_secs: u64,
    retry_interval_multiplier: f64,
    auto_confirm: bool,
    escape: bool,
    working_directory: Option<PathBuf>,
    program: String,
}

impl SessionConfig {
    /// Start building a configuration.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }

    /// Host as given, without protocol or port.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn retry_interval_secs(&self) -> u64 {
        self.retry_interval_secs
    }

    pub fn retry_interval_multiplier(&self) -> f64 {
        self.retry_interval_multiplier
    }

    /// Whether auto-confirm was requested (see [`Self::auto_confirm_protocol`]).
    pub fn auto_confirm(&self) -> bool {
        self.auto_confirm
    }

    pub fn escape(&self) -> bool {
        self.escape
    }

    /// Working directory of the spawned engine process.
    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    /// Engine binary to spawn.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Escaper matching the `escape` setting.
    pub fn escaper(&self) -> ShellEscaper {
        ShellEscaper::for_setting(self.escape)
    }

    /// Lower-cased protocol whose auto-confirm flag should be set, if any.
    ///
    /// Only returned when auto-confirm is on and the protocol is one of
    /// [`AUTO_CONFIRM_PROTOCOLS`].
    pub fn auto_confirm_protocol(&self) -> Option<String> {
        if !self.auto_confirm {
            return None;
        }
        let protocol = self.protocol.as_deref()?.to_ascii_lowercase();
        AUTO_CONFIRM_PROTOCOLS
            .contains(&protocol.as_str())
            .then_some(protocol)
    }

    /// Copy of this config with the password replaced by a placeholder.
    ///
    /// Used to print scripts without leaking credentials.
    pub fn redacted(&self) -> SessionConfig {
        let mut config = self.clone();
        if !config.password.is_empty() {
            config.password = REDACTED.to_string();
        }
        config
    }

    /// Host composed as `[protocol://]host[:port]`.
    ///
    /// The protocol prefix is skipped when the host already carries it.
    pub fn target(&self) -> String {
        let mut target = match self.protocol.as_deref() {
            Some(protocol) if !self.host.starts_with(&format!("{}://", protocol)) => {
                format!("{}://{}", protocol, self.host)
            }
            _ => self.host.clone(),
        };
        if let Some(port) = self.port {
            target.push(':');
            target.push_str(&port.to_string());
        }
        target
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("protocol", &self.protocol)
            .field("port", &self.port)
            .field("retries", &self.retries)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry_interval_secs", &self.retry_interval_secs)
            .field("retry_interval_multiplier", &self.retry_interval_multiplier)
            .field("auto_confirm", &self.auto_confirm)
            .field("escape", &self.escape)
            .field("working_directory", &self.working_directory)
            .field("program", &self.program)
            .finish()
    }
}

/// Builder for [`SessionConfig`] with validation on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SessionConfigBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    protocol: Option<String>,
    port: Option<u16>,
    retries: u32,
    timeout_secs: u64,
    retry_interval_secs: u64,
    retry_interval_multiplier: f64,
    requires_password: bool,
    auto_confirm: bool,
    escape: bool,
    working_directory: Option<PathBuf>,
    program: String,
}

impl Default for SessionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfigBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            host: None,
            username: None,
            password: None,
            protocol: None,
            port: None,
            retries: DEFAULT_RETRIES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_interval_secs: DEFAULT_RETRY_INTERVAL_SECS,
            retry_interval_multiplier: DEFAULT_RETRY_INTERVAL_MULTIPLIER,
            requires_password: true,
            auto_confirm: false,
            escape: true,
            working_directory: None,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the protocol prefixed onto the host (`sftp`, `ftps`, ...).
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Set the port appended to the host. Port 0 means unset.
    pub fn port(mut self, port: u16) -> Self {
        self.port = (port != 0).then_some(port);
        self
    }

    /// Set `net:max-retries`. 0 lets the engine retry forever.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn retry_interval_secs(mut self, secs: u64) -> Self {
        self.retry_interval_secs = secs;
        self
    }

    pub fn retry_interval_multiplier(mut self, multiplier: f64) -> Self {
        self.retry_interval_multiplier = multiplier;
        self
    }

    /// Allow an empty password (anonymous FTP).
    pub fn requires_password(mut self, required: bool) -> Self {
        self.requires_password = required;
        self
    }

    pub fn auto_confirm(mut self, enabled: bool) -> Self {
        self.auto_confirm = enabled;
        self
    }

    /// Toggle escaping of user-supplied values.
    pub fn escape(mut self, enabled: bool) -> Self {
        self.escape = enabled;
        self
    }

    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Override the engine binary (defaults to `lftp`).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Validate and build the configuration.
    ///
    /// Checks host, then username, then password.
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        let host = non_empty(self.host).ok_or(ConfigError::MissingHost)?;
        let username = non_empty(self.username).ok_or(ConfigError::MissingUsername)?;
        let password = match non_empty(self.password) {
            Some(password) => password,
            None if self.requires_password => return Err(ConfigError::MissingPassword),
            None => String::new(),
        };

        Ok(SessionConfig {
            host,
            username,
            password,
            protocol: non_empty(self.protocol),
            port: self.port,
            retries: self.retries,
            timeout_secs: self.timeout_secs,
            retry_interval_secs: self.retry_interval_secs,
            retry_interval_multiplier: self.retry_interval_multiplier,
            auto_confirm: self.auto_confirm,
            escape: self.escape,
            working_directory: self
                .working_directory
                .filter(|dir| !dir.as_os_str().is_empty()),
            program: self.program,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
