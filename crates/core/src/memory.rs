//! Memory retrieval seam.
//!
//! Retrieval is externally supplied (vector store, keyword index, a flat
//! file); assembly only needs an ordered list of snippets back. The
//! retriever is called fresh on every assembly with a query built from
//! recent conversation.

use serde::{Deserialize, Serialize};

/// A previously stored text fragment retrieved by relevance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnippet {
    /// The remembered text
    pub content: String,
}

impl MemorySnippet {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Retrieves memory snippets relevant to a query, most relevant first.
///
/// Blocking by contract: callers invoke it inline during assembly. How the
/// query text maps onto an index is the implementation's business.
pub trait MemoryRetriever {
    fn retrieve(&self, query: &str) -> Vec<MemorySnippet>;
}

impl<F> MemoryRetriever for F
where
    F: Fn(&str) -> Vec<MemorySnippet>,
{
    fn retrieve(&self, query: &str) -> Vec<MemorySnippet> {
        self(query)
    }
}

/// Retriever that remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemory;

impl MemoryRetriever for NoMemory {
    fn retrieve(&self, _query: &str) -> Vec<MemorySnippet> {
        Vec::new()
    }
}
