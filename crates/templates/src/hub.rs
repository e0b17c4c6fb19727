//! Prompt hub fetching.
//!
//! Refs of the form `hub://prompts/<path>.{json|yaml}` resolve against a
//! fixed raw-file catalog instead of the local filesystem. Anything not
//! starting with `hub://` is not a hub ref and falls through to local
//! loading.

use std::path::Path;
use std::sync::LazyLock;

use promptloom_core::error::LoadError;
use regex::Regex;
use tracing::debug;

use crate::loading::{Template, load_template_from_config, parse_config_str};

/// Base URL of the raw-file prompt catalog.
const URL_BASE: &str = "https://raw.githubusercontent.com/promptloom/hub/master/";

/// Top-level catalog directory prompt refs must live under.
const VALID_PREFIX: &str = "prompts";

/// Suffixes the catalog serves.
const VALID_SUFFIXES: [&str; 2] = ["json", "yaml"];

static HUB_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^hub://(?P<path>.+)$").unwrap());

/// A validated hub ref, resolved to its fetch URL.
#[derive(Debug, PartialEq, Eq)]
struct HubRef {
    url: String,
    suffix: String,
}

/// Load a template from the hub if `path` is a hub ref.
///
/// Returns `Ok(None)` when `path` is not a hub ref at all, so the caller
/// falls back to the local filesystem. A malformed hub ref is an error,
/// not a fallback.
pub(crate) fn try_load_from_hub(path: &str) -> Result<Option<Template>, LoadError> {
    let Some(hub_ref) = parse_hub_ref(path)? else {
        return Ok(None);
    };
    debug!(url = %hub_ref.url, "fetching prompt from hub");
    let body = fetch(&hub_ref.url)?;
    let config = parse_config_str(&body, &hub_ref.suffix, &hub_ref.url)?;
    load_template_from_config(config).map(Some)
}

fn parse_hub_ref(path: &str) -> Result<Option<HubRef>, LoadError> {
    let Some(caps) = HUB_REF.captures(path) else {
        return Ok(None);
    };
    let remote_path = &caps["path"];
    let valid_prefix = remote_path
        .split_once('/')
        .is_some_and(|(prefix, rest)| prefix == VALID_PREFIX && !rest.is_empty());
    if !valid_prefix {
        return Err(LoadError::InvalidHubRef(format!(
            "hub refs must start with `hub://{VALID_PREFIX}/`, got `{path}`"
        )));
    }
    let suffix = Path::new(remote_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if !VALID_SUFFIXES.contains(&suffix) {
        return Err(LoadError::UnsupportedSuffix {
            path: path.to_string(),
        });
    }
    Ok(Some(HubRef {
        url: format!("{URL_BASE}{remote_path}"),
        suffix: suffix.to_string(),
    }))
}

fn fetch(url: &str) -> Result<String, LoadError> {
    let mut response = ureq::get(url).call().map_err(|err| LoadError::HubFetch {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|err| LoadError::HubFetch {
            url: url.to_string(),
            reason: err.to_string(),
        })
}
