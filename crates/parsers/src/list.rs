//! List output parsers.
//!
//! Models are asked (via format instructions) to reply in a simple list
//! shape; these parsers recover the items from whatever actually came
//! back. They are deliberately forgiving: anything that does not match
//! the expected shape degrades to a one- or zero-element result.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches one numbered item: an integer, a dot, whitespace, then text
/// up to the end of the line.
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s([^\n]+)").unwrap());

/// Parses free-form model output into an ordered list of strings.
///
/// Implementations are pure functions over the text. They never error.
pub trait OutputParser {
    /// Extract the list items from `text`.
    fn parse(&self, text: &str) -> Vec<String>;

    /// The instruction block appended to prompts so the model answers in
    /// the shape this parser expects.
    fn format_instructions(&self) -> &'static str;
}

/// Parses `foo, bar, baz` style replies.
///
/// When the model answered one-item-per-line instead, newlines are folded
/// into comma separators first. Text with no separators at all comes back
/// as a single-element list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaSeparatedListParser;

impl OutputParser for CommaSeparatedListParser {
    fn parse(&self, text: &str) -> Vec<String> {
        let text = if !text.contains(", ") && text.contains('\n') {
            text.replace('\n', ", ")
        } else {
            text.to_string()
        };
        text.trim()
            .split(", ")
            .map(|part| part.trim().to_string())
            .collect()
    }

    fn format_instructions(&self) -> &'static str {
        "Your response should be a list of comma separated values, eg: `foo, bar, baz`"
    }
}

/// Parses `1. foo` / `2. bar` style replies.
///
/// Every `<integer>. <text>` occurrence is extracted; anything outside
/// that shape, leading commentary included, is silently dropped. No
/// numbered items yields an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedListParser;

impl OutputParser for NumberedListParser {
    fn parse(&self, text: &str) -> Vec<String> {
        NUMBERED_ITEM
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    fn format_instructions(&self) -> &'static str {
        "Your response should be a numbered list with each item on a new line. \
         For example: \n\n1. foo\n\n2. bar\n\n3. baz"
    }
}

/// Passes model text through untouched as a single element.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughParser;

impl OutputParser for PassthroughParser {
    fn parse(&self, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    fn format_instructions(&self) -> &'static str {
        ""
    }
}

/// The closed set of output parsers a prompt config may name.
///
/// Config files select a parser by tag; unknown tags are rejected at the
/// loading boundary, so a constructed value always denotes a real parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputParserSpec {
    /// No transformation, the raw text as a single element
    Default,
    /// `foo, bar, baz`
    CommaSeparatedList,
    /// `1. foo` per line
    NumberedList,
}

impl OutputParserSpec {
    /// Look up a parser by its config tag. `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "default" => Some(Self::Default),
            "comma_separated_list" => Some(Self::CommaSeparatedList),
            "numbered_list" => Some(Self::NumberedList),
            _ => None,
        }
    }

    /// The config tag this variant is selected by.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CommaSeparatedList => "comma_separated_list",
            Self::NumberedList => "numbered_list",
        }
    }

    /// Parse text with the selected parser.
    pub fn parse(&self, text: &str) -> Vec<String> {
        match self {
            Self::Default => PassthroughParser.parse(text),
            Self::CommaSeparatedList => CommaSeparatedListParser.parse(text),
            Self::NumberedList => NumberedListParser.parse(text),
        }
    }

    /// Format instructions for the selected parser.
    pub fn format_instructions(&self) -> &'static str {
        match self {
            Self::Default => PassthroughParser.format_instructions(),
            Self::CommaSeparatedList => CommaSeparatedListParser.format_instructions(),
            Self::NumberedList => NumberedListParser.format_instructions(),
        }
    }
}
