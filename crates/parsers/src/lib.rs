//! # promptloom Parsers
//!
//! Output parsers that turn free-form model text into a list of strings.
//! All parsers are pure and total: text in, ordered list out, no failure
//! mode. Malformed input degrades to a minimal or empty result, never an
//! error.

pub mod list;

pub use list::{
    CommaSeparatedListParser, NumberedListParser, OutputParser, OutputParserSpec,
    PassthroughParser,
};
