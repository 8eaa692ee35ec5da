//! mql — a small embeddable expression language for scripted numeric
//! queries (a subset of the MoLang dialect used in Minecraft content).
//!
//! This crate is a thin facade over the pipeline crates: [`mql_lex`] scans
//! source text into tokens, [`mql_parse`] turns tokens into an [`Expr`]
//! tree, and [`mql_compile`] either walks that tree directly
//! ([`evaluate`]) or lowers it ahead of time into a [`SpecializedCallable`]
//! bound to a host-declared [`Signature`].
//!
//! ```
//! use mql::{parse, evaluate, Env};
//!
//! let ast = parse("math.sqrt(16)").unwrap();
//! let env = Env::default();
//! assert_eq!(evaluate(&ast, &env).unwrap().to_number().unwrap(), 4.0);
//! ```

pub use mql_compile::{
    evaluate, CallableValue, ClassInfo, ClassInfoBuilder, Compiler, Env, MathConfig,
    MethodDescriptor, ParamInfo, ParamKind, Signature, SpecializedCallable, Value,
};
pub use mql_lex::{lex_all, Lexer, Token, TokenKind};
pub use mql_parse::{parse, Access, BinaryOp, Expr, Parser, UnaryOp};
pub use mql_util::{MqlError, MqlResult, Span};
