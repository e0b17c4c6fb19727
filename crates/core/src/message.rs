//! Message domain types.
//!
//! These are the core value objects that flow through assembly:
//! history comes in as messages, the assembled prompt goes out as an
//! ordered sequence of role-tagged messages.

use serde::{Deserialize, Serialize};

/// The role tag on a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructional preamble (persona, rules, goals, memory)
    System,
    /// The end user
    Human,
    /// A prior model reply carried in history
    Assistant,
}

impl Role {
    /// Lowercase wire name, matching the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::Human => "human",
            Role::Assistant => "assistant",
        }
    }
}

/// A single role-tagged message.
///
/// Produced, never mutated after creation. The assembler emits only
/// system and human messages itself; assistant messages pass through
/// from caller-supplied history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who this content speaks as
    pub role: Role,

    /// The text content
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_human_message() {
        let msg = Message::human("Hello, agent!");
        assert_eq!(msg.role, Role::Human);
        assert_eq!(msg.content, "Hello, agent!");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::system("rules")).unwrap();
        assert!(json.contains("\"system\""));

        let json = serde_json::to_string(&Message::human("hi")).unwrap();
        assert!(json.contains("\"human\""));
    }

    #[test]
    fn role_names_match_serde_encoding() {
        for role in [Role::System, Role::Human, Role::Assistant] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::assistant("Test reply");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, msg);
    }
}
