//! Pending statement queue of a session.

/// Ordered statements waiting for the next execution.
///
/// Owned by exactly one [`Session`](super::Session) and emptied on every
/// drain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQueue {
    statements: Vec<String>,
}

impl CommandQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement. Empty statements are skipped.
    ///
    /// Returns whether the statement was queued.
    pub fn push(&mut self, statement: impl Into<String>) -> bool {
        let statement = statement.into();
        if statement.is_empty() {
            return false;
        }
        self.statements.push(statement);
        true
    }

    /// Append several statements, skipping empty ones.
    pub fn extend<I, S>(&mut self, statements: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for statement in statements {
            self.push(statement);
        }
    }

    /// Queued statements in order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Take every queued statement, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut queue = CommandQueue::new();
        assert!(queue.push("cd uploads"));
        assert!(queue.push("ls"));
        assert_eq!(queue.statements(), ["cd uploads", "ls"]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_push_skips_empty() {
        let mut queue = CommandQueue::new();
        assert!(!queue.push(""));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_extend() {
        let mut queue = CommandQueue::new();
        queue.extend(["pwd", "", "ls"]);
        assert_eq!(queue.statements(), ["pwd", "ls"]);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = CommandQueue::new();
        queue.push("ls");
        let drained = queue.drain();
        assert_eq!(drained, vec!["ls".to_string()]);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
