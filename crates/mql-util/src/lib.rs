//! mql-util - shared foundation types for the MQL pipeline.
//!
//! Every later stage (lexer, parser, compiler) depends on this crate for
//! two things: source position tracking ([`Span`]) and the single error
//! enum ([`MqlError`]) that every public entry point returns.

mod error;
#[cfg(test)]
mod qc;
mod span;

pub use error::{MqlError, MqlResult};
pub use span::Span;
