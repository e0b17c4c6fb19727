//! Error types for the promptloom domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all promptloom operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Template errors ---
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    // --- Prompt loading errors ---
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised while formatting a template with caller-supplied values.
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("Missing value for template variable: {name}")]
    MissingVariable { name: String },

    #[error("Unclosed '{{' placeholder in template")]
    UnclosedPlaceholder,
}

/// Errors raised while loading a declarative prompt config.
///
/// All variants are user-input validation failures surfaced directly to
/// the caller; none are retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unsupported prompt type: {kind}")]
    UnsupportedType { kind: String },

    #[error("Unsupported output parser type: {kind}")]
    UnsupportedOutputParser { kind: String },

    #[error("Unsupported file suffix: {path}")]
    UnsupportedSuffix { path: String },

    #[error("Both `{field}` and `{field}_path` are provided, expected exactly one")]
    MutuallyExclusive { field: String },

    #[error("Invalid examples: {0}")]
    InvalidExamples(String),

    #[error("Prompt config must be a JSON/YAML mapping")]
    NotAnObject,

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid hub reference: {0}")]
    InvalidHubRef(String),

    #[error("Hub fetch failed for {url}: {reason}")]
    HubFetch { url: String, reason: String },
}
