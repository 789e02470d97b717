//! Command-line interface for lftp-client.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Remote host.
    pub host: Option<String>,
    /// Login name.
    pub user: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Protocol prefixed onto the host.
    pub protocol: Option<String>,
    /// Port appended to the host.
    pub port: Option<u16>,
    /// `net:max-retries` (0 = unlimited).
    pub retries: Option<u32>,
    /// Connection timeout in seconds.
    pub timeout: Option<u64>,
    /// Seconds between reconnect attempts.
    pub retry_interval: Option<u64>,
    /// Reconnect interval multiplier.
    pub retry_multiplier: Option<f64>,
    /// Allow connecting without a password.
    pub no_password: bool,
    /// Auto-confirm host keys (sftp and fish only).
    pub auto_confirm: bool,
    /// Pass paths and credentials through unescaped.
    pub no_escape: bool,
    /// Working directory for the engine process.
    pub cwd: Option<PathBuf>,
    /// Engine binary.
    pub program: Option<String>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Print the script instead of running it.
    pub dry_run: bool,
    /// Raw statements to run after connecting.
    pub statements: Vec<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                result.host = Some(parser.value()?.parse()?);
            }
            Short('u') | Long("user") => {
                result.user = Some(parser.value()?.parse()?);
            }
            Short('P') | Long("password") => {
                result.password = Some(parser.value()?.parse()?);
            }
            Long("protocol") => {
                result.protocol = Some(parser.value()?.parse()?);
            }
            Short('p') | Long("port") => {
                result.port = Some(parse_number(&mut parser, "port")?);
            }
            Long("retries") => {
                result.retries = Some(parse_number(&mut parser, "retries")?);
            }
            Long("timeout") => {
                result.timeout = Some(parse_number(&mut parser, "timeout")?);
            }
            Long("retry-interval") => {
                result.retry_interval = Some(parse_number(&mut parser, "retry-interval")?);
            }
            Long("retry-multiplier") => {
                result.retry_multiplier = Some(parse_number(&mut parser, "retry-multiplier")?);
            }
            Long("no-password") => {
                result.no_password = true;
            }
            Long("auto-confirm") => {
                result.auto_confirm = true;
            }
            Long("no-escape") => {
                result.no_escape = true;
            }
            Long("cwd") => {
                result.cwd = Some(parser.value()?.parse()?);
            }
            Long("program") => {
                result.program = Some(parser.value()?.parse()?);
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Long("dry-run") => {
                result.dry_run = true;
            }
            Value(val) => {
                let statement = val
                    .into_string()
                    .map_err(|v| ArgsError::UnexpectedArgument(v.to_string_lossy().into()))?;
                result.statements.push(statement);
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

fn parse_number<T: std::str::FromStr>(
    parser: &mut lexopt::Parser,
    name: &'static str,
) -> Result<T, ArgsError> {
    use lexopt::ValueExt;

    let value: String = parser.value()?.parse()?;
    value
        .parse()
        .map_err(|_| ArgsError::InvalidValue(name, value))
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"lftp-client {version}
Run file-transfer statements through lftp in a single invocation

USAGE:
    lftp-client [OPTIONS] [STATEMENT]...

OPTIONS:
    -H, --host <HOST>             Remote host
    -u, --user <NAME>             Login name
    -P, --password <PASS>         Login password
        --protocol <PROTO>        Protocol prefix (ftp, sftp, ftps, fish, ...)
    -p, --port <PORT>             Port appended to the host
        --retries <N>             net:max-retries, 0 = unlimited [default: 1]
        --timeout <SECS>          net:timeout [default: 10]
        --retry-interval <SECS>   net:reconnect-interval-base [default: 5]
        --retry-multiplier <X>    net:reconnect-interval-multiplier [default: 1]
        --no-password             Allow an empty password (anonymous FTP)
        --auto-confirm            Auto-confirm host keys (sftp, fish)
        --no-escape               Do not escape paths and credentials
        --cwd <DIR>               Working directory for lftp
        --program <PATH>          Engine binary [default: lftp]
    -c, --config <FILE>           Path to configuration file (JSON)
    -l, --log-level <LVL>         Log level (error, warn, info, debug, trace)
        --dry-run                 Print the script (password masked) and exit
    -h, --help                    Print help
    -V, --version                 Print version

ENVIRONMENT VARIABLES:
    LFTP_CLIENT_HOST        Host (overrides config)
    LFTP_CLIENT_USER        Login name (overrides config)
    LFTP_CLIENT_PASSWORD    Password (overrides config)
    LFTP_CLIENT_PROTOCOL    Protocol (overrides config)
    LFTP_CLIENT_PORT        Port (overrides config)
    LFTP_CLIENT_BIN         Engine binary (overrides config)
    LFTP_CLIENT_LOG_LEVEL   Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    # List a remote directory over SFTP
    lftp-client -H example.com -u deploy -P secret --protocol sftp "cd releases" ls

    # Upload with settings from a config file
    lftp-client -c /etc/lftp-client.json "put build/app.tar.gz -o app.tar.gz"

    # Show the generated script without running it
    lftp-client -H example.com -u anonymous --no-password --dry-run ls
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("lftp-client {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Positional argument that is not valid UTF-8.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<OsString> {
        std::iter::once("lftp-client")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_default_args() {
        let result = parse_args_from(args(&[])).unwrap();
        assert!(result.host.is_none());
        assert!(result.port.is_none());
        assert!(result.statements.is_empty());
        assert!(!result.dry_run);
    }

    #[test]
    fn test_connection_options() {
        let result = parse_args_from(args(&[
            "-H", "example.com", "-u", "deploy", "-P", "secret", "-p", "22",
        ]))
        .unwrap();
        assert_eq!(result.host.as_deref(), Some("example.com"));
        assert_eq!(result.user.as_deref(), Some("deploy"));
        assert_eq!(result.password.as_deref(), Some("secret"));
        assert_eq!(result.port, Some(22));
    }

    #[test]
    fn test_long_options() {
        let result = parse_args_from(args(&[
            "--host",
            "example.com",
            "--protocol",
            "sftp",
            "--retries",
            "0",
            "--timeout",
            "30",
            "--retry-interval",
            "2",
            "--retry-multiplier",
            "1.5",
        ]))
        .unwrap();
        assert_eq!(result.protocol.as_deref(), Some("sftp"));
        assert_eq!(result.retries, Some(0));
        assert_eq!(result.timeout, Some(30));
        assert_eq!(result.retry_interval, Some(2));
        assert_eq!(result.retry_multiplier, Some(1.5));
    }

    #[test]
    fn test_flags() {
        let result = parse_args_from(args(&[
            "--no-password",
            "--auto-confirm",
            "--no-escape",
            "--dry-run",
        ]))
        .unwrap();
        assert!(result.no_password);
        assert!(result.auto_confirm);
        assert!(result.no_escape);
        assert!(result.dry_run);
    }

    #[test]
    fn test_statements_collected_in_order() {
        let result = parse_args_from(args(&["-H", "h", "cd uploads", "ls", "put a.txt"])).unwrap();
        assert_eq!(result.statements, vec!["cd uploads", "ls", "put a.txt"]);
    }

    #[test]
    fn test_statements_after_double_dash() {
        let result = parse_args_from(args(&["--", "-not-an-option"])).unwrap();
        assert_eq!(result.statements, vec!["-not-an-option"]);
    }

    #[test]
    fn test_paths() {
        let result = parse_args_from(args(&[
            "-c",
            "/etc/lftp-client.json",
            "--cwd",
            "/srv/outgoing",
            "--program",
            "/usr/local/bin/lftp",
        ]))
        .unwrap();
        assert_eq!(result.config, Some(PathBuf::from("/etc/lftp-client.json")));
        assert_eq!(result.cwd, Some(PathBuf::from("/srv/outgoing")));
        assert_eq!(result.program.as_deref(), Some("/usr/local/bin/lftp"));
    }

    #[test]
    fn test_help_flag() {
        let result = parse_args_from(args(&["-h"])).unwrap();
        assert!(result.help);

        let result = parse_args_from(args(&["--help"])).unwrap();
        assert!(result.help);
    }

    #[test]
    fn test_version_flag() {
        let result = parse_args_from(args(&["-V"])).unwrap();
        assert!(result.version);

        let result = parse_args_from(args(&["--version"])).unwrap();
        assert!(result.version);
    }

    #[test]
    fn test_log_level() {
        let result = parse_args_from(args(&["-l", "debug"])).unwrap();
        assert_eq!(result.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_invalid_port() {
        let err = parse_args_from(args(&["-p", "ssh"])).unwrap_err();
        assert!(err.to_string().contains("--port"));

        assert!(parse_args_from(args(&["-p", "70000"])).is_err());
    }

    #[test]
    fn test_numeric_options_parse() {
        let result = parse_args_from(args(&["--timeout", "45", "--retry-multiplier", "2"])).unwrap();
        assert_eq!(result.timeout, Some(45));
        assert_eq!(result.retry_multiplier, Some(2.0));

        let err = parse_args_from(args(&["--retries", "many"])).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidValue("retries", ref v) if v == "many"));
    }

    #[test]
    fn test_unknown_option() {
        assert!(parse_args_from(args(&["--bogus"])).is_err());
    }
}
