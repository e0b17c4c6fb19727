//! Few-shot prompt template: worked examples around a task instruction.

use std::collections::HashMap;

use promptloom_core::error::TemplateError;
use promptloom_parsers::OutputParserSpec;
use serde::{Deserialize, Serialize};

use crate::template::{PromptTemplate, render};

/// One worked example, variable name → value.
pub type Example = HashMap<String, String>;

/// A template that embeds worked examples alongside the task instruction.
///
/// Formatting renders every example through `example_prompt`, joins
/// `prefix`, the rendered examples, and `suffix` with
/// `example_separator` (empty pieces are skipped), then substitutes the
/// caller's variables into the joined text. Variables therefore live in
/// the prefix and suffix, not in the already-rendered examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FewShotPromptTemplate {
    /// The worked examples
    pub examples: Vec<Example>,

    /// Template each example is rendered through
    pub example_prompt: PromptTemplate,

    /// Text before the examples
    #[serde(default)]
    pub prefix: String,

    /// Text after the examples, usually carrying the task variables
    pub suffix: String,

    /// Separator between the joined pieces
    #[serde(default = "default_example_separator")]
    pub example_separator: String,

    /// Variables the template expects at format time
    #[serde(default)]
    pub input_variables: Vec<String>,

    /// Parser applied to the model's reply, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_parser: Option<OutputParserSpec>,
}

fn default_example_separator() -> String {
    "\n\n".to_string()
}

impl FewShotPromptTemplate {
    /// Create a few-shot template with no prefix and the default
    /// separator.
    pub fn new(
        examples: Vec<Example>,
        example_prompt: PromptTemplate,
        suffix: impl Into<String>,
        input_variables: Vec<String>,
    ) -> Self {
        Self {
            examples,
            example_prompt,
            prefix: String::new(),
            suffix: suffix.into(),
            example_separator: default_example_separator(),
            input_variables,
            output_parser: None,
        }
    }

    /// Set the text rendered before the examples.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the separator joining prefix, examples, and suffix.
    pub fn with_example_separator(mut self, separator: impl Into<String>) -> Self {
        self.example_separator = separator.into();
        self
    }

    /// Attach an output parser.
    pub fn with_output_parser(mut self, parser: OutputParserSpec) -> Self {
        self.output_parser = Some(parser);
        self
    }

    /// Render the examples and substitute `values`.
    pub fn format(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut pieces: Vec<String> = Vec::with_capacity(self.examples.len() + 2);
        pieces.push(self.prefix.clone());
        for example in &self.examples {
            pieces.push(self.example_prompt.format(example)?);
        }
        pieces.push(self.suffix.clone());

        let joined = pieces
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(&self.example_separator);
        render(&joined, values)
    }
}
