//! System preamble rendering.
//!
//! The preamble is the fixed instructional opening of every assembled
//! prompt: persona line, ground rules, numbered goals, tool catalog.
//! The dynamic pieces (timestamp, memory block, retrieval query) render
//! here too so the assembler stays pure budget arithmetic.

use promptloom_core::memory::MemorySnippet;
use promptloom_core::message::Message;
use promptloom_core::persona::PersonaConfig;
use promptloom_core::tool::{ToolSpec, catalog_text};

/// Standing behavioral rules, rendered right under the persona line.
const GROUND_RULES: &str = "\
Make every decision independently, without asking the user for help.\n\
Play to your strengths as a large language model and favor simple \
strategies with no legal complications.\n\
When every task is complete, use the \"finish\" command.";

/// Render the instructional preamble: persona, ground rules, numbered
/// goals, tool catalog.
pub fn build_preamble(persona: &PersonaConfig, goals: &[String], tools: &[ToolSpec]) -> String {
    let mut preamble = format!(
        "You are {}, {}\n{}\n\nGOALS:\n\n",
        persona.name, persona.role, GROUND_RULES
    );
    for (i, goal) in goals.iter().enumerate() {
        preamble.push_str(&format!("{}. {}\n", i + 1, goal));
    }
    let catalog = catalog_text(tools);
    if !catalog.is_empty() {
        preamble.push_str("\n\n");
        preamble.push_str(&catalog);
    }
    preamble
}

/// The current-time line appended to the preamble.
pub fn timestamp_line() -> String {
    format!(
        "The current time and date is {}",
        chrono::Local::now().format("%c")
    )
}

/// Render retrieved snippets as the reminder-of-past-events block.
pub fn memory_block(snippets: &[MemorySnippet]) -> String {
    let joined = snippets
        .iter()
        .map(|snippet| snippet.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!("This reminds you of these events from your past:\n{joined}")
}

/// Render recent history as the memory retrieval query, one
/// `role: content` line per message.
pub fn history_query(recent: &[Message]) -> String {
    recent
        .iter()
        .map(|message| format!("{}: {}", message.role.as_str(), message.content))
        .collect::<Vec<_>>()
        .join("\n")
}
