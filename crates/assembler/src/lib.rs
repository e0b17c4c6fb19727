//! # promptloom Assembler
//!
//! Token-budgeted prompt assembly. Given a persona, goals, a tool
//! catalog, conversation history, and the user's new input, produce an
//! ordered sequence of role-tagged messages whose estimated token cost
//! stays under the configured budget.
//!
//! Two independent trims keep the prompt inside the budget: retrieved
//! memory snippets are dropped least-relevant-first against an absolute
//! ceiling, and history is cut to the most recent contiguous run that
//! still fits under the send limit minus the input reservation. Both
//! trims are best-effort: an oversized system preamble is sent as-is
//! rather than rejected.

pub mod assembler;
pub mod budget;
pub mod preamble;

pub use assembler::{AssemblyInput, PromptAssembler};
pub use budget::TokenBudget;
