//! Stock prompts built from the library's own template types.

use std::collections::HashMap;

use promptloom_core::ToolSpec;
use promptloom_core::error::TemplateError;

use crate::few_shot::{Example, FewShotPromptTemplate};
use crate::template::{PromptTemplate, render};

/// Opening section of the conversational agent prompt. The tool list is
/// appended right after it.
pub const CONVERSATIONAL_PREFIX: &str = "\
Assistant is a large language model trained to help with a wide range of \
tasks, from answering simple questions to working through multi-step \
problems. Assistant reasons about which of its tools can help with the \
current request and uses them whenever they are useful.

TOOLS:
------

Assistant has access to the following tools:";

/// Tool-use protocol. `{tool_names}` and `{ai_prefix}` are filled in when
/// the prompt is built, not at format time.
pub const CONVERSATIONAL_FORMAT_INSTRUCTIONS: &str = "\
To use a tool, please use the following format:

```
Thought: Do I need to use a tool? Yes
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
```

When you have a response to say to the Human, or if you do not need to use \
a tool, you MUST use the format:

```
Thought: Do I need to use a tool? No
{ai_prefix}: [your response here]
```";

/// Closing section carrying the format-time variables.
pub const CONVERSATIONAL_SUFFIX: &str = "\
Begin!

Previous conversation history:
{chat_history}

New input: {input}
{agent_scratchpad}";

/// Build the conversational agent prompt for a tool set.
///
/// `ai_prefix` is the name the model answers under, usually "AI". The
/// returned template expects `chat_history`, `input`, and
/// `agent_scratchpad` at format time.
pub fn conversational_prompt(
    tools: &[ToolSpec],
    ai_prefix: &str,
) -> Result<PromptTemplate, TemplateError> {
    let tool_lines = tools
        .iter()
        .map(|tool| format!("> {}: {}", tool.name, tool.description))
        .collect::<Vec<_>>()
        .join("\n");
    let tool_names = tools
        .iter()
        .map(|tool| tool.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut values = HashMap::new();
    values.insert("tool_names".to_string(), tool_names);
    values.insert("ai_prefix".to_string(), ai_prefix.to_string());
    let instructions = render(CONVERSATIONAL_FORMAT_INSTRUCTIONS, &values)?;

    let template = [
        CONVERSATIONAL_PREFIX,
        tool_lines.as_str(),
        instructions.as_str(),
        CONVERSATIONAL_SUFFIX,
    ]
    .join("\n\n");
    Ok(PromptTemplate::new(
        template,
        vec![
            "input".to_string(),
            "chat_history".to_string(),
            "agent_scratchpad".to_string(),
        ],
    ))
}

/// Build the self-ask prompt: worked follow-up-question examples, then
/// the new question.
///
/// The returned template expects `input` and `agent_scratchpad` at
/// format time.
pub fn self_ask_prompt() -> FewShotPromptTemplate {
    let example_prompt = PromptTemplate::from_template("Question: {question}\n{answer}");
    let examples = vec![
        self_ask_example(
            "Who lived longer, Muhammad Ali or Alan Turing?",
            "Are follow up questions needed here: Yes.\n\
             Follow up: How old was Muhammad Ali when he died?\n\
             Intermediate answer: Muhammad Ali was 74 years old when he died.\n\
             Follow up: How old was Alan Turing when he died?\n\
             Intermediate answer: Alan Turing was 41 years old when he died.\n\
             So the final answer is: Muhammad Ali",
        ),
        self_ask_example(
            "When was the founder of craigslist born?",
            "Are follow up questions needed here: Yes.\n\
             Follow up: Who was the founder of craigslist?\n\
             Intermediate answer: Craigslist was founded by Craig Newmark.\n\
             Follow up: When was Craig Newmark born?\n\
             Intermediate answer: Craig Newmark was born on December 6, 1952.\n\
             So the final answer is: December 6, 1952",
        ),
    ];
    FewShotPromptTemplate::new(
        examples,
        example_prompt,
        "Question: {input}\nAre follow up questions needed here:{agent_scratchpad}",
        vec!["input".to_string(), "agent_scratchpad".to_string()],
    )
}

fn self_ask_example(question: &str, answer: &str) -> Example {
    let mut example = Example::new();
    example.insert("question".to_string(), question.to_string());
    example.insert("answer".to_string(), answer.to_string());
    example
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn conversational_prompt_lists_tools() {
        let tools = vec![
            ToolSpec::new("search", "Search the web", "search <query>"),
            ToolSpec::new("calculator", "Do arithmetic", "calculator <expr>"),
        ];
        let prompt = conversational_prompt(&tools, "AI").unwrap();
        assert!(prompt.template.contains("> search: Search the web"));
        assert!(prompt.template.contains("[search, calculator]"));
        assert!(prompt.template.contains("AI: [your response here]"));
    }

    #[test]
    fn conversational_prompt_formats_fully() {
        let tools = vec![ToolSpec::new("search", "Search the web", "search <query>")];
        let prompt = conversational_prompt(&tools, "AI").unwrap();
        let text = prompt
            .format(&values(&[
                ("chat_history", "Human: hi\nAI: hello"),
                ("input", "what now?"),
                ("agent_scratchpad", ""),
            ]))
            .unwrap();
        assert!(text.contains("Previous conversation history:\nHuman: hi\nAI: hello"));
        assert!(text.contains("New input: what now?"));
    }

    #[test]
    fn self_ask_prompt_embeds_examples() {
        let prompt = self_ask_prompt();
        let text = prompt
            .format(&values(&[
                ("input", "Who won the 1965 Nobel Prize in Physics?"),
                ("agent_scratchpad", ""),
            ]))
            .unwrap();
        assert!(text.starts_with("Question: Who lived longer"));
        assert!(text.contains("So the final answer is: December 6, 1952"));
        assert!(text.ends_with(
            "Question: Who won the 1965 Nobel Prize in Physics?\n\
             Are follow up questions needed here:"
        ));
    }
}
