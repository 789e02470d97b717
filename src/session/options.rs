//! Loosely-typed session option bag.
//!
//! This is the shape accepted from JSON config files and the environment.
//! Every field is optional; [`SessionOptions::into_config`] applies defaults
//! and validation and yields a [`SessionConfig`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::{SessionConfig, SessionConfigBuilder};
use crate::error::ConfigError;

/// Session options as they appear in a JSON document.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOptions {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Kept as raw JSON so a non-string value is reported at validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<PortOption>,
    pub retries: Option<u32>,
    /// Connection timeout in seconds.
    pub timeout: Option<u64>,
    /// Seconds between reconnect attempts.
    pub retry_interval: Option<u64>,
    #[serde(alias = "retryMultiplier")]
    pub retry_interval_multiplier: Option<f64>,
    pub requires_password: Option<bool>,
    pub auto_confirm: Option<bool>,
    pub escape: Option<bool>,
    pub cwd: Option<PathBuf>,
    /// Engine binary, `lftp` when unset.
    pub program: Option<String>,
}

/// A port given either as a number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortOption {
    Number(u64),
    Text(String),
}

impl PortOption {
    /// Resolve to a port number. An empty string counts as unset (0).
    pub fn to_port(&self) -> Result<u16, ConfigError> {
        match self {
            Self::Number(n) => {
                u16::try_from(*n).map_err(|_| ConfigError::InvalidPort(n.to_string()))
            }
            Self::Text(s) if s.trim().is_empty() => Ok(0),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(s.clone())),
        }
    }
}

impl From<u16> for PortOption {
    fn from(port: u16) -> Self {
        Self::Number(port.into())
    }
}

impl SessionOptions {
    /// Read options out of an arbitrary JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill unset fields from `other`.
    pub fn or(self, other: SessionOptions) -> Self {
        Self {
            host: self.host.or(other.host),
            username: self.username.or(other.username),
            password: self.password.or(other.password),
            protocol: self.protocol.or(other.protocol),
            port: self.port.or(other.port),
            retries: self.retries.or(other.retries),
            timeout: self.timeout.or(other.timeout),
            retry_interval: self.retry_interval.or(other.retry_interval),
            retry_interval_multiplier: self
                .retry_interval_multiplier
                .or(other.retry_interval_multiplier),
            requires_password: self.requires_password.or(other.requires_password),
            auto_confirm: self.auto_confirm.or(other.auto_confirm),
            escape: self.escape.or(other.escape),
            cwd: self.cwd.or(other.cwd),
            program: self.program.or(other.program),
        }
    }

    /// Validate the options and build a [`SessionConfig`].
    ///
    /// Errors are reported in this order: host, username, password,
    /// protocol type, port.
    pub fn into_config(self) -> Result<SessionConfig, ConfigError> {
        let protocol = protocol_string(self.protocol.as_ref());
        let port = self.port.as_ref().map(PortOption::to_port).transpose();

        let mut builder = SessionConfigBuilder::new();
        if let Some(host) = self.host {
            builder = builder.host(host);
        }
        if let Some(username) = self.username {
            builder = builder.username(username);
        }
        if let Some(password) = self.password {
            builder = builder.password(password);
        }
        if let Ok(Some(protocol)) = &protocol {
            builder = builder.protocol(protocol.clone());
        }
        if let Ok(Some(port)) = &port {
            builder = builder.port(*port);
        }
        if let Some(retries) = self.retries {
            builder = builder.retries(retries);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout_secs(timeout);
        }
        if let Some(interval) = self.retry_interval {
            builder = builder.retry_interval_secs(interval);
        }
        if let Some(multiplier) = self.retry_interval_multiplier {
            builder = builder.retry_interval_multiplier(multiplier);
        }
        if let Some(required) = self.requires_password {
            builder = builder.requires_password(required);
        }
        if let Some(auto_confirm) = self.auto_confirm {
            builder = builder.auto_confirm(auto_confirm);
        }
        if let Some(escape) = self.escape {
            builder = builder.escape(escape);
        }
        if let Some(cwd) = self.cwd {
            builder = builder.working_directory(cwd);
        }
        if let Some(program) = self.program.filter(|p| !p.is_empty()) {
            builder = builder.program(program);
        }

        let config = builder.build()?;
        protocol?;
        port?;
        Ok(config)
    }
}

fn protocol_string(value: Option<&Value>) -> Result<Option<String>, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConfigError::InvalidProtocol(json_type_name(other).to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
