//! # promptloom Templates
//!
//! Declarative prompt definitions: single templates with `{variable}`
//! substitution, few-shot example sets, and a loader that builds either
//! kind from JSON/YAML config files, local or fetched from the prompt
//! hub.
//!
//! The config surface is a mapping with a `_type` discriminator
//! (`prompt` | `few_shot`), optional `*_path` fields resolving to `.txt`
//! files, and nested sub-configs for the example prompt and the output
//! parser.

pub mod few_shot;
mod hub;
pub mod loading;
pub mod presets;
pub mod template;

pub use few_shot::{Example, FewShotPromptTemplate};
pub use loading::{Template, load_template, load_template_from_config};
pub use template::PromptTemplate;
