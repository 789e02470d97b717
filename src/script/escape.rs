//! Escaping of literal values interpolated into the engine script.

/// Characters that get a backslash prefix, in addition to whitespace.
const SPECIAL_CHARS: [char; 5] = ['"', '\'', '$', '`', '\\'];

/// Escapes user-supplied values before they are spliced into a script.
///
/// Paths, file names, the username and the password all pass through the
/// session's escaper. Host, protocol and port are structural and never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellEscaper {
    /// Backslash-escape quotes, whitespace, `$`, backtick and backslash.
    #[default]
    Shell,
    /// Pass values through untouched.
    Verbatim,
}

impl ShellEscaper {
    /// Pick the escaper for an `escape` setting.
    pub fn for_setting(enabled: bool) -> Self {
        if enabled {
            Self::Shell
        } else {
            Self::Verbatim
        }
    }

    /// Escape a single value.
    pub fn escape(self, value: &str) -> String {
        match self {
            Self::Shell => escape_shell(value),
            Self::Verbatim => value.to_string(),
        }
    }

    /// Escape each value and join them with single spaces.
    pub fn escape_all<I, S>(self, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|v| self.escape(v.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Backslash-escape every quote, whitespace and shell metacharacter.
///
/// The result reads back as one token under shell word splitting.
pub fn escape_shell(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if c.is_whitespace() || SPECIAL_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
