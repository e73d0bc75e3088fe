//! Placeholder token parser.
//!
//! Authored switch content and page templates embed placeholders delimited by
//! `#`, e.g. `#CompSwitch_3_2066#` or `#MinPrice#`. This module turns a raw
//! template into a lazy stream of [`Token`]s. Anything that is not a known
//! placeholder, including malformed `#...#` spans, is a [`Token::Literal`]
//! and passes through verbatim.

mod grammar;
mod stream;
mod suggest;
mod token;

pub use grammar::parse_placeholder;
pub use stream::{TokenStream, tokenize};
pub use suggest::{KNOWN_NAMES, compute_suggestions};
pub use token::{Placeholder, Token};

/// Placeholder delimiter.
pub const DELIMITER: char = '#';

/// Returns true if `text` contains at least one recognized placeholder.
pub fn contains_placeholder(text: &str) -> bool {
    text.contains(DELIMITER) && tokenize(text).any(|token| token.is_placeholder())
}
