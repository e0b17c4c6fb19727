//! Single prompt template with `{variable}` substitution.

use std::collections::HashMap;

use promptloom_core::error::TemplateError;
use promptloom_parsers::OutputParserSpec;
use serde::{Deserialize, Serialize};

/// A prompt template: literal text with `{variable}` placeholders.
///
/// `{{` and `}}` escape to literal braces. `input_variables` declares
/// which placeholders callers are expected to supply; it is filled in
/// automatically by [`PromptTemplate::from_template`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// The template text
    pub template: String,

    /// Variables the template expects at format time
    #[serde(default)]
    pub input_variables: Vec<String>,

    /// Parser applied to the model's reply, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_parser: Option<OutputParserSpec>,
}

impl PromptTemplate {
    /// Create a template with an explicit variable list.
    pub fn new(template: impl Into<String>, input_variables: Vec<String>) -> Self {
        Self {
            template: template.into(),
            input_variables,
            output_parser: None,
        }
    }

    /// Create a template, inferring `input_variables` from the
    /// placeholders in order of first appearance.
    pub fn from_template(template: impl Into<String>) -> Self {
        let template = template.into();
        let input_variables = infer_variables(&template);
        Self {
            template,
            input_variables,
            output_parser: None,
        }
    }

    /// Attach an output parser.
    pub fn with_output_parser(mut self, parser: OutputParserSpec) -> Self {
        self.output_parser = Some(parser);
        self
    }

    /// Substitute `values` into the template.
    ///
    /// Every placeholder in the template must have a value; extra values
    /// are ignored.
    pub fn format(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        render(&self.template, values)
    }
}

/// Substitute `values` into `template`.
///
/// A `}` outside a placeholder is literal. A `{` with no closing `}` is
/// an error.
pub(crate) fn render(
    template: &str,
    values: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == '}' {
                        closed = true;
                        break;
                    }
                    name.push(ch);
                }
                if !closed {
                    return Err(TemplateError::UnclosedPlaceholder);
                }
                match values.get(&name) {
                    Some(value) => out.push_str(value),
                    None => return Err(TemplateError::MissingVariable { name }),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }
    Ok(out)
}

/// Collect placeholder names in order of first appearance, skipping
/// escaped braces and duplicates.
pub(crate) fn infer_variables(template: &str) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == '}' {
                        closed = true;
                        break;
                    }
                    name.push(ch);
                }
                if closed && !name.is_empty() && !variables.contains(&name) {
                    variables.push(name);
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
            }
            _ => {}
        }
    }
    variables
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
    fn substitutes_variables() {
        let template = PromptTemplate::from_template("Tell me a {adjective} joke about {topic}.");
        let result = template
            .format(&values(&[("adjective", "bad"), ("topic", "compilers")]))
            .unwrap();
        assert_eq!(result, "Tell me a bad joke about compilers.");
    }

    #[test]
    fn missing_variable_is_an_error() {
        let template = PromptTemplate::from_template("Hello {name}");
        let err = template.format(&HashMap::new()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable { name } if name == "name"));
    }

    #[test]
    fn extra_values_are_ignored() {
        let template = PromptTemplate::from_template("Hello {name}");
        let result = template
            .format(&values(&[("name", "world"), ("unused", "x")]))
            .unwrap();
        assert_eq!(result, "Hello world");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let template = PromptTemplate::from_template("{{\"key\": \"{value}\"}}");
        let result = template.format(&values(&[("value", "42")])).unwrap();
        assert_eq!(result, "{\"key\": \"42\"}");
    }

    #[test]
    fn unclosed_placeholder_is_an_error() {
        let template = PromptTemplate::new("broken {oops", vec!["oops".into()]);
        let err = template.format(&values(&[("oops", "x")])).unwrap_err();
        assert!(matches!(err, TemplateError::UnclosedPlaceholder));
    }

    #[test]
    fn infers_variables_in_order() {
        let template = PromptTemplate::from_template("{b} and {a} and {b} again");
        assert_eq!(template.input_variables, vec!["b", "a"]);
    }

    #[test]
    fn inference_skips_escapes() {
        let template = PromptTemplate::from_template("{{literal}} but {real}");
        assert_eq!(template.input_variables, vec!["real"]);
    }

    #[test]
    fn lone_closing_brace_is_literal() {
        let template = PromptTemplate::from_template("a } b");
        assert_eq!(template.format(&HashMap::new()).unwrap(), "a } b");
    }
}
