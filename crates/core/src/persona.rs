//! Agent persona configuration.

use serde::{Deserialize, Serialize};

/// Who the agent is for the duration of a session.
///
/// Rendered into the opening line of the system preamble as
/// `You are {name}, {role}`. Immutable once the session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Display name, e.g. "Research-GPT"
    pub name: String,

    /// One-line description of what the agent does
    pub role: String,
}

impl PersonaConfig {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_roundtrip() {
        let persona = PersonaConfig::new("Research-GPT", "an AI that digs through papers");
        let json = serde_json::to_string(&persona).unwrap();
        let back: PersonaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, persona);
    }
}
