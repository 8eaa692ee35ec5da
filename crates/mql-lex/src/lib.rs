//! mql-lex - the MQL lexer.
//!
//! Scans MQL source text into a stream of [`Token`]s terminated by `Eof`.
//! See spec §4.1 for the grammar of lexemes this crate recognizes.

mod cursor;
#[cfg(test)]
mod edge_cases;
mod lexer;
mod token;

pub use lexer::{lex_all, Lexer};
pub use token::{Token, TokenKind};
