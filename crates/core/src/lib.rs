//! # promptloom Core
//!
//! Domain types, traits, and error definitions for the promptloom prompt
//! composition library. This crate carries no framework dependencies: it
//! defines the domain model the rest of the workspace builds on.
//!
//! ## Design Philosophy
//!
//! The two external collaborators (token counting and memory retrieval)
//! are defined as traits here. Implementations live with callers. This
//! enables:
//! - Swapping token counters per model family
//! - Easy testing with closure-backed stubs
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod memory;
pub mod message;
pub mod persona;
pub mod token;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, LoadError, Result, TemplateError};
pub use memory::{MemoryRetriever, MemorySnippet, NoMemory};
pub use message::{Message, Role};
pub use persona::PersonaConfig;
pub use token::{HeuristicCounter, TokenCounter};
pub use tool::{ToolSpec, catalog_text};
