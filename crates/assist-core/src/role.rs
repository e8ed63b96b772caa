//! Mapping between the internal turn roles and the service's role vocabulary.

use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The human writing the document.
    Author,
    /// The generative assistant.
    Assistant,
}

/// Role token understood by the generative service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalRole {
    User,
    Model,
}

impl ExternalRole {
    /// The token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalRole::User => "user",
            ExternalRole::Model => "model",
        }
    }
}

impl std::fmt::Display for ExternalRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate an internal role into the service's vocabulary.
pub fn to_external_role(role: Role) -> ExternalRole {
    match role {
        Role::Author => ExternalRole::User,
        Role::Assistant => ExternalRole::Model,
    }
}
