//! Prompt config loading.
//!
//! A config is a JSON or YAML mapping with a `_type` discriminator
//! selecting one of a closed set of template constructors. `*_path`
//! fields indirect through `.txt` files; the example prompt and the
//! output parser are nested sub-configs resolved recursively. Mutually
//! exclusive fields are rejected before any file I/O happens.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use promptloom_core::error::{LoadError, TemplateError};
use promptloom_parsers::OutputParserSpec;
use serde_json::{Map, Value};
use tracing::warn;

use crate::few_shot::{Example, FewShotPromptTemplate};
use crate::hub;
use crate::template::PromptTemplate;

/// A loaded prompt definition.
///
/// The closed set of template kinds a config may name: unknown `_type`
/// tags are rejected at this boundary, never carried further.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// `_type: prompt`
    Prompt(PromptTemplate),
    /// `_type: few_shot`
    FewShot(FewShotPromptTemplate),
}

impl Template {
    /// Substitute `values` into the underlying template.
    pub fn format(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        match self {
            Template::Prompt(prompt) => prompt.format(values),
            Template::FewShot(few_shot) => few_shot.format(values),
        }
    }

    /// Variables the template expects at format time.
    pub fn input_variables(&self) -> &[String] {
        match self {
            Template::Prompt(prompt) => &prompt.input_variables,
            Template::FewShot(few_shot) => &few_shot.input_variables,
        }
    }

    /// Parser applied to the model's reply, if any.
    pub fn output_parser(&self) -> Option<OutputParserSpec> {
        match self {
            Template::Prompt(prompt) => prompt.output_parser,
            Template::FewShot(few_shot) => few_shot.output_parser,
        }
    }
}

/// Load a prompt definition from a local file or a hub ref.
///
/// Hub refs (`hub://prompts/...`) are fetched from the prompt catalog;
/// anything else is treated as a filesystem path. Local prompt files
/// must end in `.json` or `.yaml`.
pub fn load_template(path: &str) -> Result<Template, LoadError> {
    if let Some(template) = hub::try_load_from_hub(path)? {
        return Ok(template);
    }
    load_template_from_file(Path::new(path))
}

/// Build a prompt definition from an already-parsed config value.
///
/// A missing `_type` defaults to `prompt`; an unknown one is an error.
pub fn load_template_from_config(config: Value) -> Result<Template, LoadError> {
    let Value::Object(mut map) = config else {
        return Err(LoadError::NotAnObject);
    };
    let kind = match map.remove("_type") {
        Some(Value::String(kind)) => kind,
        Some(_) => {
            return Err(LoadError::InvalidField {
                field: "_type".into(),
                reason: "expected a string tag".into(),
            });
        }
        None => {
            warn!("no `_type` key found, defaulting to `prompt`");
            "prompt".to_string()
        }
    };
    match kind.as_str() {
        "prompt" => Ok(Template::Prompt(load_prompt_config(map)?)),
        "few_shot" => Ok(Template::FewShot(load_few_shot_config(map)?)),
        _ => Err(LoadError::UnsupportedType { kind }),
    }
}

fn load_template_from_file(path: &Path) -> Result<Template, LoadError> {
    let config = read_config_file(path, &["json", "yaml"])?;
    load_template_from_config(config)
}

fn load_prompt_config(mut map: Map<String, Value>) -> Result<PromptTemplate, LoadError> {
    let template = resolve_text_field(&mut map, "template")?
        .ok_or_else(|| LoadError::MissingField {
            field: "template".into(),
        })?;
    let input_variables = take_string_list(&mut map, "input_variables")?;
    let output_parser = take_output_parser(&mut map)?;

    let mut prompt = PromptTemplate::new(template, input_variables);
    prompt.output_parser = output_parser;
    Ok(prompt)
}

fn load_few_shot_config(mut map: Map<String, Value>) -> Result<FewShotPromptTemplate, LoadError> {
    let suffix = resolve_text_field(&mut map, "suffix")?
        .ok_or_else(|| LoadError::MissingField {
            field: "suffix".into(),
        })?;
    let prefix = resolve_text_field(&mut map, "prefix")?.unwrap_or_default();
    let example_prompt = take_example_prompt(&mut map)?;
    let examples = take_examples(&mut map)?;
    let input_variables = take_string_list(&mut map, "input_variables")?;
    let example_separator = take_optional_string(&mut map, "example_separator")?;
    let output_parser = take_output_parser(&mut map)?;

    let mut few_shot =
        FewShotPromptTemplate::new(examples, example_prompt, suffix, input_variables);
    few_shot.prefix = prefix;
    if let Some(separator) = example_separator {
        few_shot.example_separator = separator;
    }
    few_shot.output_parser = output_parser;
    Ok(few_shot)
}

/// Resolve `field` to inline text, following a `{field}_path` indirection
/// through a `.txt` file if present.
///
/// Both the field and its `_path` variant being present is rejected
/// before the path is touched.
fn resolve_text_field(
    map: &mut Map<String, Value>,
    field: &str,
) -> Result<Option<String>, LoadError> {
    let path_key = format!("{field}_path");
    if let Some(path_value) = map.remove(&path_key) {
        if map.contains_key(field) {
            return Err(LoadError::MutuallyExclusive {
                field: field.to_string(),
            });
        }
        let Value::String(path) = path_value else {
            return Err(LoadError::InvalidField {
                field: path_key,
                reason: "expected a path string".into(),
            });
        };
        return read_text_file(Path::new(&path)).map(Some);
    }
    match map.remove(field) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(LoadError::InvalidField {
            field: field.to_string(),
            reason: "expected a string".into(),
        }),
    }
}

fn read_text_file(path: &Path) -> Result<String, LoadError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
        return Err(LoadError::UnsupportedSuffix {
            path: path.display().to_string(),
        });
    }
    fs::read_to_string(path).map_err(|err| LoadError::Read {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

fn take_string_list(map: &mut Map<String, Value>, field: &str) -> Result<Vec<String>, LoadError> {
    let Some(value) = map.remove(field) else {
        return Err(LoadError::MissingField {
            field: field.to_string(),
        });
    };
    serde_json::from_value(value).map_err(|err| LoadError::InvalidField {
        field: field.to_string(),
        reason: err.to_string(),
    })
}

fn take_optional_string(
    map: &mut Map<String, Value>,
    field: &str,
) -> Result<Option<String>, LoadError> {
    match map.remove(field) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(LoadError::InvalidField {
            field: field.to_string(),
            reason: "expected a string".into(),
        }),
    }
}

/// Resolve the nested example prompt: an inline sub-config or a
/// `example_prompt_path` pointing at a prompt file. Either way it must
/// come out a plain prompt, not another few-shot.
fn take_example_prompt(map: &mut Map<String, Value>) -> Result<PromptTemplate, LoadError> {
    if let Some(path_value) = map.remove("example_prompt_path") {
        if map.contains_key("example_prompt") {
            return Err(LoadError::MutuallyExclusive {
                field: "example_prompt".into(),
            });
        }
        let Value::String(path) = path_value else {
            return Err(LoadError::InvalidField {
                field: "example_prompt_path".into(),
                reason: "expected a path string".into(),
            });
        };
        return expect_plain_prompt(load_template(&path)?, "example_prompt_path");
    }
    let value = map
        .remove("example_prompt")
        .ok_or_else(|| LoadError::MissingField {
            field: "example_prompt".into(),
        })?;
    expect_plain_prompt(load_template_from_config(value)?, "example_prompt")
}

fn expect_plain_prompt(template: Template, field: &str) -> Result<PromptTemplate, LoadError> {
    match template {
        Template::Prompt(prompt) => Ok(prompt),
        Template::FewShot(_) => Err(LoadError::InvalidField {
            field: field.to_string(),
            reason: "expected a plain prompt config".into(),
        }),
    }
}

/// Resolve `examples`: an inline list of string maps, or a path string
/// ending in `.json`, `.yaml`, or `.yml`.
fn take_examples(map: &mut Map<String, Value>) -> Result<Vec<Example>, LoadError> {
    let Some(value) = map.remove("examples") else {
        return Err(LoadError::MissingField {
            field: "examples".into(),
        });
    };
    let list = match value {
        Value::Array(_) => value,
        Value::String(path) => read_config_file(Path::new(&path), &["json", "yaml", "yml"])?,
        _ => {
            return Err(LoadError::InvalidExamples(
                "only an inline list or a file path is supported".into(),
            ));
        }
    };
    serde_json::from_value(list).map_err(|err| LoadError::InvalidExamples(err.to_string()))
}

fn take_output_parser(map: &mut Map<String, Value>) -> Result<Option<OutputParserSpec>, LoadError> {
    let Some(value) = map.remove("output_parser") else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    let Value::Object(parser_map) = value else {
        return Err(LoadError::InvalidField {
            field: "output_parser".into(),
            reason: "expected a mapping with a `_type` tag".into(),
        });
    };
    let Some(Value::String(kind)) = parser_map.get("_type") else {
        return Err(LoadError::MissingField {
            field: "output_parser._type".into(),
        });
    };
    OutputParserSpec::from_tag(kind)
        .map(Some)
        .ok_or_else(|| LoadError::UnsupportedOutputParser { kind: kind.clone() })
}

fn read_config_file(path: &Path, allowed: &[&str]) -> Result<Value, LoadError> {
    let suffix = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    if !allowed.contains(&suffix) {
        return Err(LoadError::UnsupportedSuffix {
            path: path.display().to_string(),
        });
    }
    let raw = fs::read_to_string(path).map_err(|err| LoadError::Read {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    parse_config_str(&raw, suffix, &path.display().to_string())
}

/// Parse a config document by suffix. `origin` only feeds error messages.
pub(crate) fn parse_config_str(raw: &str, suffix: &str, origin: &str) -> Result<Value, LoadError> {
    let parsed: Result<Value, String> = match suffix {
        "json" => serde_json::from_str(raw).map_err(|err| err.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|err| err.to_string()),
        _ => {
            return Err(LoadError::UnsupportedSuffix {
                path: origin.to_string(),
            });
        }
    };
    parsed.map_err(|reason| LoadError::Parse {
        path: origin.to_string(),
        reason,
    })
}
