//! Final script assembly.

use std::sync::Arc;

use crate::script::STATEMENT_SEPARATOR;

/// Flag that tells the engine to run the next argument as a script.
pub const SCRIPT_FLAG: &str = "-c";

/// A fully assembled engine script: connection preamble plus statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    preamble: Arc<str>,
    statements: Vec<String>,
}

impl Script {
    /// Create a script from a rendered preamble and drained statements.
    ///
    /// The preamble is expected to end with a statement separator.
    pub fn new(preamble: impl Into<Arc<str>>, statements: Vec<String>) -> Self {
        Self {
            preamble: preamble.into(),
            statements,
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Statements following the preamble.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Number of statements following the preamble.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Render the script text passed to the engine.
    pub fn render(&self) -> String {
        let mut text = String::from(&*self.preamble);
        text.push_str(&self.statements.join(STATEMENT_SEPARATOR));
        text
    }

    /// Engine arguments: the script flag followed by the script text.
    pub fn args(&self) -> [String; 2] {
        [SCRIPT_FLAG.to_string(), self.render()]
    }
}

/// Extra statements supplied at execution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraStatements {
    /// One raw statement, run right after the preamble.
    Raw(String),
    /// Statements appended to the queue before it is drained.
    Queue(Vec<String>),
}

impl From<&str> for ExtraStatements {
    fn from(statement: &str) -> Self {
        Self::Raw(statement.to_string())
    }
}

impl From<String> for ExtraStatements {
    fn from(statement: String) -> Self {
        Self::Raw(statement)
    }
}

impl From<Vec<String>> for ExtraStatements {
    fn from(statements: Vec<String>) -> Self {
        Self::Queue(statements)
    }
}

impl From<&[&str]> for ExtraStatements {
    fn from(statements: &[&str]) -> Self {
        Self::Queue(statements.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ExtraStatements {
    fn from(statements: [&str; N]) -> Self {
        Self::Queue(statements.iter().map(|s| s.to_string()).collect())
    }
}
