//! Connection preamble rendering.

use crate::session::SessionConfig;

use super::STATEMENT_SEPARATOR;

/// Render the connection setup statements for a session, in order.
///
/// Auto-confirm (when applicable), `net:max-retries`, `net:timeout`,
/// `net:reconnect-interval-base`, `net:reconnect-interval-multiplier`
/// and finally the authenticated `open`.
pub fn preamble_statements(config: &SessionConfig) -> Vec<String> {
    let escaper = config.escaper();
    let mut statements = Vec::with_capacity(6);

    if let Some(protocol) = config.auto_confirm_protocol() {
        statements.push(format!("set {}:auto-confirm yes", protocol));
    }

    statements.push(format!("set net:max-retries {}", config.retries()));
    statements.push(format!("set net:timeout {}", config.timeout_secs()));
    statements.push(format!(
        "set net:reconnect-interval-base {}",
        config.retry_interval_secs()
    ));
    statements.push(format!(
        "set net:reconnect-interval-multiplier {}",
        config.retry_interval_multiplier()
    ));
    statements.push(format!(
        "open -u \"{}\",\"{}\" \"{}\"",
        escaper.escape(config.username()),
        escaper.escape(config.password()),
        config.target()
    ));

    statements
}

/// Render the preamble as one string ending in a statement separator.
pub fn render_preamble(config: &SessionConfig) -> String {
    let mut preamble = preamble_statements(config).join(STATEMENT_SEPARATOR);
    preamble.push_str(STATEMENT_SEPARATOR);
    preamble
}
