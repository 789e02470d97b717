//! Configuration management for the lftp-client binary.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::ConfigError;
use crate::session::{PortOption, SessionConfig, SessionOptions};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session options, in the same shape the library accepts.
    pub session: SessionOptions,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directive (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an environment lookup function.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let session = &mut self.session;

        if let Some(host) = lookup("LFTP_CLIENT_HOST") {
            session.host = Some(host);
        }
        if let Some(user) = lookup("LFTP_CLIENT_USER") {
            session.username = Some(user);
        }
        if let Some(password) = lookup("LFTP_CLIENT_PASSWORD") {
            session.password = Some(password);
        }
        if let Some(protocol) = lookup("LFTP_CLIENT_PROTOCOL") {
            session.protocol = Some(protocol.into());
        }
        if let Some(port) = lookup("LFTP_CLIENT_PORT") {
            session.port = Some(PortOption::Text(port));
        }
        if let Some(program) = lookup("LFTP_CLIENT_BIN") {
            session.program = Some(program);
        }

        if let Some(level) = lookup("LFTP_CLIENT_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        let cli = SessionOptions {
            host: args.host.clone(),
            username: args.user.clone(),
            password: args.password.clone(),
            protocol: args.protocol.clone().map(Into::into),
            port: args.port.map(PortOption::from),
            retries: args.retries,
            timeout: args.timeout,
            retry_interval: args.retry_interval,
            retry_interval_multiplier: args.retry_multiplier,
            requires_password: args.no_password.then_some(false),
            auto_confirm: args.auto_confirm.then_some(true),
            escape: args.no_escape.then_some(false),
            cwd: args.cwd.clone(),
            program: args.program.clone(),
        };
        self.session = cli.or(std::mem::take(&mut self.session));

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Validate the session section.
    pub fn to_session_config(&self) -> Result<SessionConfig, ConfigError> {
        self.session.clone().into_config()
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.session.host.is_none());
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "session": {
                "host": "files.example.com",
                "username": "deploy",
                "password": "secret",
                "protocol": "sftp",
                "port": 2222,
                "autoConfirm": true
            },
            "logging": { "level": "debug" }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.log_filter(), "debug");

        let session = config.to_session_config().unwrap();
        assert_eq!(session.target(), "sftp://files.example.com:2222");
        assert_eq!(session.auto_confirm_protocol().as_deref(), Some("sftp"));
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{ "session": { "host": "h" } }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.session.host.as_deref(), Some("h"));
        assert_eq!(config.log_filter(), "info");
        assert!(matches!(
            config.to_session_config(),
            Err(ConfigError::MissingUsername)
        ));
    }

    #[test]
    fn test_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/lftp-client.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_apply_env_from() {
        let env: HashMap<&str, &str> = [
            ("LFTP_CLIENT_HOST", "env.example.com"),
            ("LFTP_CLIENT_USER", "envuser"),
            ("LFTP_CLIENT_PASSWORD", "envpass"),
            ("LFTP_CLIENT_PORT", "21"),
            ("RUST_LOG", "trace"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.log_filter(), "trace");
        let session = config.to_session_config().unwrap();
        assert_eq!(session.target(), "env.example.com:21");
        assert_eq!(session.username(), "envuser");
    }

    #[test]
    fn test_env_log_level_beats_rust_log() {
        let mut config = Config::default();
        config.apply_env_from(|key| match key {
            "LFTP_CLIENT_LOG_LEVEL" => Some("warn".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        });
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.session.host = Some("file.example.com".into());
        config.session.username = Some("fileuser".into());
        config.session.retries = Some(4);

        let args = Args {
            host: Some("cli.example.com".into()),
            password: Some("clipass".into()),
            port: Some(990),
            protocol: Some("ftps".into()),
            auto_confirm: true,
            no_escape: true,
            log_level: Some("debug".into()),
            ..Args::default()
        };
        config.apply_args(&args);

        assert_eq!(config.log_filter(), "debug");
        let session = config.to_session_config().unwrap();
        assert_eq!(session.target(), "ftps://cli.example.com:990");
        assert_eq!(session.username(), "fileuser");
        assert_eq!(session.retries(), 4);
        assert!(session.auto_confirm());
        assert!(!session.escape());
    }

    #[test]
    fn test_apply_no_password() {
        let mut config = Config::default();
        let args = Args {
            host: Some("h".into()),
            user: Some("anonymous".into()),
            no_password: true,
            ..Args::default()
        };
        config.apply_args(&args);

        let session = config.to_session_config().unwrap();
        assert_eq!(session.password(), "");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"session\""));
        assert!(json.contains("\"level\""));
    }
}
