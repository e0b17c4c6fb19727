//! The prompt assembler.
//!
//! Output shape: one system message (preamble + timestamp + optional
//! memory block), then the most recent history that fits the budget in
//! chronological order, then exactly one human message carrying the new
//! user input.

use std::collections::VecDeque;

use promptloom_core::memory::{MemoryRetriever, MemorySnippet};
use promptloom_core::message::Message;
use promptloom_core::persona::PersonaConfig;
use promptloom_core::token::TokenCounter;
use promptloom_core::tool::ToolSpec;
use tracing::debug;

use crate::budget::TokenBudget;
use crate::preamble::{build_preamble, history_query, memory_block, timestamp_line};

/// Everything one assembly call reads.
///
/// Borrowed: the assembler owns nothing but its budget, and nothing here
/// outlives the call.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    pub persona: &'a PersonaConfig,
    pub goals: &'a [String],
    pub tools: &'a [ToolSpec],
    pub history: &'a [Message],
    pub user_input: &'a str,
}

/// Assembles prompts under a token budget.
#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    budget: TokenBudget,
}

impl PromptAssembler {
    pub fn new(budget: TokenBudget) -> Self {
        Self { budget }
    }

    pub fn with_default_budget() -> Self {
        Self::new(TokenBudget::default())
    }

    pub fn budget(&self) -> &TokenBudget {
        &self.budget
    }

    /// Assemble the outgoing message sequence.
    ///
    /// Never fails: when the system content alone is already over
    /// budget, the prompt goes out oversized rather than erroring, with
    /// history contributing nothing. The user input's own cost is never
    /// counted; the `reserved_for_input` headroom covers it.
    pub fn assemble<C, R>(&self, input: &AssemblyInput<'_>, counter: &C, memory: &R) -> Vec<Message>
    where
        C: TokenCounter,
        R: MemoryRetriever,
    {
        let mut system_content = build_preamble(input.persona, input.goals, input.tools);
        system_content.push('\n');
        system_content.push_str(&timestamp_line());
        let mut used_tokens = counter.count(&system_content);

        let recent = recent_window(input.history, self.budget.recent_window);

        let mut snippets = memory.retrieve(&history_query(recent));
        let dropped = trim_snippets(
            &mut snippets,
            used_tokens,
            self.budget.memory_ceiling,
            counter,
        );
        if dropped > 0 {
            debug!(
                dropped,
                kept = snippets.len(),
                "memory snippets over ceiling, dropped least relevant"
            );
        }
        if !snippets.is_empty() {
            let block = format!("\n\n{}", memory_block(&snippets));
            used_tokens += counter.count(&block);
            system_content.push_str(&block);
        }

        let history_limit = self.budget.history_limit();
        let mut historical: VecDeque<Message> = VecDeque::with_capacity(recent.len());
        for message in recent.iter().rev() {
            let message_tokens = counter.count(&message.content);
            if used_tokens + message_tokens > history_limit {
                break;
            }
            historical.push_front(message.clone());
            used_tokens += message_tokens;
        }
        if historical.len() < recent.len() {
            debug!(
                omitted = recent.len() - historical.len(),
                "history over budget, omitted oldest messages"
            );
        }

        let mut messages = Vec::with_capacity(historical.len() + 2);
        messages.push(Message::system(system_content));
        messages.extend(historical);
        messages.push(Message::human(input.user_input));
        messages
    }
}

/// The last `window` messages of `history`.
fn recent_window(history: &[Message], window: usize) -> &[Message] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

/// Drop least-relevant (last) snippets while `used_tokens` plus the
/// snippet total exceeds `ceiling`, until the remainder fits or the list
/// is empty. An already-fitting list is left untouched. Returns how many
/// were dropped.
fn trim_snippets<C: TokenCounter>(
    snippets: &mut Vec<MemorySnippet>,
    used_tokens: usize,
    ceiling: usize,
    counter: &C,
) -> usize {
    let mut snippet_tokens: usize = snippets
        .iter()
        .map(|snippet| counter.count(&snippet.content))
        .sum();
    let mut dropped = 0;
    while used_tokens + snippet_tokens > ceiling {
        let Some(snippet) = snippets.pop() else {
            break;
        };
        snippet_tokens -= counter.count(&snippet.content);
        dropped += 1;
    }
    dropped
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use promptloom_core::memory::NoMemory;
    use promptloom_core::message::Role;

    use super::*;

    fn test_persona() -> PersonaConfig {
        PersonaConfig::new("Testa", "a test agent")
    }

    fn test_input<'a>(
        persona: &'a PersonaConfig,
        history: &'a [Message],
        user_input: &'a str,
    ) -> AssemblyInput<'a> {
        AssemblyInput {
            persona,
            goals: &[],
            tools: &[],
            history,
            user_input,
        }
    }

    fn char_counter(text: &str) -> usize {
        text.len()
    }

    #[test]
    fn ends_with_exactly_one_human_message() {
        let persona = test_persona();
        let history: Vec<Message> = Vec::new();
        let assembler = PromptAssembler::with_default_budget();
        let messages = assembler.assemble(
            &test_input(&persona, &history, "do the thing"),
            &char_counter,
            &NoMemory,
        );
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::Human);
        assert_eq!(last.content, "do the thing");
        let humans = messages.iter().filter(|m| m.role == Role::Human).count();
        assert_eq!(humans, 1);
    }

    #[test]
    fn only_the_last_ten_history_messages_are_eligible() {
        let persona = test_persona();
        let history: Vec<Message> = (0..15)
            .map(|i| Message::human(format!("message {i}")))
            .collect();
        let budget = TokenBudget {
            send_token_limit: 100_000,
            ..TokenBudget::default()
        };
        let assembler = PromptAssembler::new(budget);
        let messages = assembler.assemble(
            &test_input(&persona, &history, "next"),
            &char_counter,
            &NoMemory,
        );
        // system + 10 historical + human
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[1].content, "message 5");
        assert_eq!(messages[10].content, "message 14");
    }

    #[test]
    fn snippet_trimming_is_idempotent_when_fitting() {
        let mut snippets = vec![MemorySnippet::new("aaaa"), MemorySnippet::new("bbbb")];
        let original = snippets.clone();
        assert_eq!(trim_snippets(&mut snippets, 100, 2500, &char_counter), 0);
        assert_eq!(snippets, original);
        assert_eq!(trim_snippets(&mut snippets, 100, 2500, &char_counter), 0);
        assert_eq!(snippets, original);
    }

    #[test]
    fn snippet_trimming_drops_least_relevant_first() {
        let mut snippets = vec![
            MemorySnippet::new("most relevant"),
            MemorySnippet::new("middling"),
            MemorySnippet::new("least relevant"),
        ];
        // 13 + 8 + 14 = 35 chars against a ceiling of 25
        let dropped = trim_snippets(&mut snippets, 0, 25, &char_counter);
        assert_eq!(dropped, 1);
        assert_eq!(snippets[0].content, "most relevant");
        assert_eq!(snippets[1].content, "middling");
    }

    #[test]
    fn all_snippets_dropped_when_already_over_ceiling() {
        let mut snippets = vec![MemorySnippet::new("one"), MemorySnippet::new("two")];
        let dropped = trim_snippets(&mut snippets, 3000, 2500, &char_counter);
        assert_eq!(dropped, 2);
        assert!(snippets.is_empty());
    }

    #[test]
    fn memory_block_lands_in_system_content() {
        let persona = test_persona();
        let history = vec![Message::human("we shipped v2 yesterday")];
        let snippets = vec![MemorySnippet::new("v1 shipped last month")];
        let retriever = move |_query: &str| snippets.clone();
        let assembler = PromptAssembler::with_default_budget();
        let messages = assembler.assemble(
            &test_input(&persona, &history, "status?"),
            &char_counter,
            &retriever,
        );
        assert!(messages[0].content.contains(
            "This reminds you of these events from your past:\nv1 shipped last month"
        ));
    }

    #[test]
    fn dropped_memory_leaves_no_reminder_block() {
        let persona = test_persona();
        let history = vec![Message::human("anything")];
        let snippets = vec![MemorySnippet::new("old news"), MemorySnippet::new("older")];
        let retriever = move |_query: &str| snippets.clone();
        let budget = TokenBudget {
            memory_ceiling: 0,
            ..TokenBudget::default()
        };
        let assembler = PromptAssembler::new(budget);
        let messages = assembler.assemble(
            &test_input(&persona, &history, "status?"),
            &char_counter,
            &retriever,
        );
        assert!(!messages[0].content.contains("This reminds you"));
    }

    #[test]
    fn over_budget_history_keeps_most_recent_suffix() {
        let persona = test_persona();
        let history: Vec<Message> = (0..5).map(|i| Message::human(format!("turn-{i}"))).collect();
        // History messages cost 10 each, everything else is free; the
        // history allowance is 25, so exactly two turns fit.
        let counter = |text: &str| if text.starts_with("turn-") { 10 } else { 0 };
        let budget = TokenBudget {
            send_token_limit: 1025,
            reserved_for_input: 1000,
            ..TokenBudget::default()
        };
        let assembler = PromptAssembler::new(budget);
        let messages = assembler.assemble(
            &test_input(&persona, &history, "next"),
            &counter,
            &NoMemory,
        );
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "turn-3");
        assert_eq!(messages[2].content, "turn-4");
    }

    #[test]
    fn oversized_system_content_still_sends() {
        let persona = test_persona();
        let history: Vec<Message> = (0..3).map(|i| Message::human(format!("h{i}"))).collect();
        let budget = TokenBudget {
            send_token_limit: 10,
            reserved_for_input: 1000,
            memory_ceiling: 0,
            recent_window: 10,
        };
        let assembler = PromptAssembler::new(budget);
        let messages = assembler.assemble(
            &test_input(&persona, &history, "still here"),
            &char_counter,
            &NoMemory,
        );
        // No history fits, but the prompt still goes out with the
        // literal user input last.
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::Human);
        assert_eq!(messages[1].content, "still here");
    }

    #[test]
    fn retrieval_query_reflects_recent_history() {
        let persona = test_persona();
        let history = vec![Message::human("deploy went out"), Message::assistant("noted")];
        let queries = RefCell::new(Vec::new());
        let retriever = |query: &str| {
            queries.borrow_mut().push(query.to_string());
            Vec::<MemorySnippet>::new()
        };
        let assembler = PromptAssembler::with_default_budget();
        assembler.assemble(
            &test_input(&persona, &history, "and?"),
            &char_counter,
            &retriever,
        );
        let queries = queries.into_inner();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0], "human: deploy went out\nassistant: noted");
    }

    #[test]
    fn history_roles_pass_through() {
        let persona = test_persona();
        let history = vec![Message::human("question"), Message::assistant("answer")];
        let assembler = PromptAssembler::with_default_budget();
        let messages = assembler.assemble(
            &test_input(&persona, &history, "follow-up"),
            &char_counter,
            &NoMemory,
        );
        assert_eq!(messages[1].role, Role::Human);
        assert_eq!(messages[2].role, Role::Assistant);
    }

    #[test]
    fn system_content_carries_timestamp_line() {
        let persona = test_persona();
        let history: Vec<Message> = Vec::new();
        let assembler = PromptAssembler::with_default_budget();
        let messages = assembler.assemble(
            &test_input(&persona, &history, "hi"),
            &char_counter,
            &NoMemory,
        );
        assert!(messages[0].content.contains("The current time and date is "));
    }
}
