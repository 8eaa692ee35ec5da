use thiserror::Error;

/// The one error type every MQL entry point returns.
///
/// Variants correspond 1:1 to the error kinds named in the design: a
/// malformed token, an unexpected token, a feature the compiled path can't
/// express, an unresolved query root or member, a bad invocation, or a
/// parameter-kind mismatch at registration time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MqlError {
    /// A malformed token: a lone `!` not followed by `=`, or an unknown
    /// character.
    #[error("lex error at offset {offset}: {message}")]
    LexError { offset: usize, message: String },

    /// An unexpected or missing token while parsing.
    #[error("parse error at offset {offset}: expected {expected}, found {found}")]
    ParseError { offset: usize, expected: String, found: String },

    /// A construct the compiled (non-interpreted) path cannot lower, e.g.
    /// `??` or a nested query `a.b.c()`.
    #[error("unsupported in compiled scripts: {reason}")]
    UnsupportedFeature { reason: String },

    /// An identifier that names no query root in the active signature.
    #[error("unknown query root `{ident}`")]
    NameError { ident: String },

    /// No method on `root` named `member` accepts `arity` arguments.
    #[error("no method `{member}` on `{root}` with {arity} argument(s)")]
    MethodError { root: String, member: String, arity: usize },

    /// A non-callable value was invoked, or a registered method/script
    /// return kind is not numeric/boolean.
    #[error("type error: {message}")]
    TypeError { message: String },

    /// A runtime arity mismatch in the interpreter path.
    #[error("arity mismatch: expected {expected} argument(s), got {got}")]
    ArityError { expected: usize, got: usize },
}

pub type MqlResult<T> = std::result::Result<T, MqlError>;
