//! Bounded conversation history
//!
//! The REPL keeps a short rolling window of past turns so follow-up questions
//! have context. The window is a FIFO queue capped at [`ConversationHistory::MAX_TURNS`]
//! entries; nothing is persisted across sessions.

use crate::llm::messages::{LlmMessage, MessageRole};
use std::collections::VecDeque;

/// A single conversation turn
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: MessageRole,
    pub text: String,
}

/// Rolling window over the most recent conversation turns
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl ConversationHistory {
    /// Default maximum number of retained turns
    pub const MAX_TURNS: usize = 10;

    /// Create a history with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(Self::MAX_TURNS)
    }

    /// Create a history with a custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a user turn
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(MessageRole::User, text.into());
    }

    /// Record an assistant turn
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.push(MessageRole::Assistant, text.into());
    }

    fn push(&mut self, role: MessageRole, text: String) {
        self.turns.push_back(Turn { role, text });
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// Convert the retained turns into LLM messages, oldest first
    pub fn to_messages(&self) -> Vec<LlmMessage> {
        self.turns
            .iter()
            .map(|turn| match turn.role {
                MessageRole::Assistant => LlmMessage::assistant(&turn.text),
                _ => LlmMessage::user(&turn.text),
            })
            .collect()
    }

    /// Iterate over the retained turns, oldest first
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of retained turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether any turns are retained
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retains_at_most_capacity_turns() {
        let mut history = ConversationHistory::with_capacity(4);
        for i in 0..6 {
            history.push_user(format!("question {i}"));
            history.push_assistant(format!("answer {i}"));
        }

        assert_eq!(history.len(), 4);
        // Oldest turns were evicted first.
        let texts: Vec<_> = history.turns().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["question 4", "answer 4", "question 5", "answer 5"]);
    }

    #[test]
    fn default_capacity_is_ten() {
        let mut history = ConversationHistory::new();
        for i in 0..25 {
            history.push_user(format!("q{i}"));
        }
        assert_eq!(history.len(), ConversationHistory::MAX_TURNS);
    }

    #[test]
    fn messages_preserve_roles_and_order() {
        let mut history = ConversationHistory::new();
        history.push_user("how many orders?");
        history.push_assistant("There are 42 orders.");

        let messages = history.to_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "There are 42 orders.");
    }
}
