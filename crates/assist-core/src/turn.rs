//! Conversation turns.

use crate::role::Role;

/// A single message in a conversation.
///
/// Turns are immutable once created; a conversation grows only by
/// appending new turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
}

/// Ordered, chronological history of turns. Owned by the calling surface.
pub type Conversation = Vec<Turn>;

impl Turn {
    /// Create a turn with an explicit role.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Create a turn written by the author.
    pub fn author(text: impl Into<String>) -> Self {
        Self::new(Role::Author, text)
    }

    /// Create a turn written by the assistant.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
