//! Tool catalog types.
//!
//! Tools are described here, not executed: the catalog is rendered into
//! the system preamble so the model knows which commands it may emit.

use serde::{Deserialize, Serialize};

/// A single capability advertised to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Command name the model should emit
    pub name: String,

    /// What the tool does
    pub description: String,

    /// Invocation format hint, e.g. `search <query>`
    pub usage: String,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        usage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage: usage.into(),
        }
    }
}

/// Render the tool catalog as a numbered command list.
///
/// One line per tool: `{i}. {name}: {description}, usage: {usage}`,
/// numbered from 1. An empty catalog renders as an empty string so the
/// preamble can skip the section entirely.
pub fn catalog_text(tools: &[ToolSpec]) -> String {
    if tools.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = tools
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            format!(
                "{}. {}: {}, usage: {}",
                i + 1,
                tool.name,
                tool.description,
                tool.usage
            )
        })
        .collect();
    format!("Commands:\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_numbers_from_one() {
        let tools = vec![
            ToolSpec::new("search", "Search the web", "search <query>"),
            ToolSpec::new("write_file", "Write text to a file", "write_file <path> <text>"),
        ];
        let text = catalog_text(&tools);
        assert!(text.starts_with("Commands:\n"));
        assert!(text.contains("1. search: Search the web, usage: search <query>"));
        assert!(text.contains("2. write_file:"));
    }

    #[test]
    fn empty_catalog_is_empty_string() {
        assert_eq!(catalog_text(&[]), "");
    }
}
