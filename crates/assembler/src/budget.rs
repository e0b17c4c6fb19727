//! Token budget configuration.

use serde::{Deserialize, Serialize};

/// Token ceilings for one assembly call.
///
/// Memory and history are trimmed against two independent thresholds:
/// memory snippets against the absolute `memory_ceiling`, history
/// against `send_token_limit - reserved_for_input`. The two are separate
/// knobs on purpose and must not be unified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBudget {
    /// Upper bound on tokens in the outgoing prompt
    #[serde(default = "default_send_token_limit")]
    pub send_token_limit: usize,

    /// Tokens held back for the user's new input and the reply
    #[serde(default = "default_reserved_for_input")]
    pub reserved_for_input: usize,

    /// Absolute ceiling on system content plus memory snippets
    #[serde(default = "default_memory_ceiling")]
    pub memory_ceiling: usize,

    /// How many of the most recent history messages are eligible
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,
}

fn default_send_token_limit() -> usize {
    4196
}

fn default_reserved_for_input() -> usize {
    1000
}

fn default_memory_ceiling() -> usize {
    2500
}

fn default_recent_window() -> usize {
    10
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            send_token_limit: default_send_token_limit(),
            reserved_for_input: default_reserved_for_input(),
            memory_ceiling: default_memory_ceiling(),
            recent_window: default_recent_window(),
        }
    }
}

impl TokenBudget {
    /// The token count history may grow the prompt to.
    pub fn history_limit(&self) -> usize {
        self.send_token_limit.saturating_sub(self.reserved_for_input)
    }
}
