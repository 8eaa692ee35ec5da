//! mql-compile — the interpreter, the ahead-of-call compiler, and the
//! built-in `math` library.
//!
//! See design §4.4 for interpreter semantics, §4.5 for the compile
//! algorithm, and §4.6 for the math function list.

mod class_info;
mod compiler;
mod env;
mod interpreter;
mod math;
mod ops;
#[cfg(test)]
mod qc;
mod signature;
mod value;

pub use class_info::{ClassInfo, ClassInfoBuilder, MethodDescriptor, ParamKind};
pub use compiler::{Compiler, SpecializedCallable};
pub use env::Env;
pub use interpreter::evaluate;
pub use math::MathConfig;
pub use signature::{ParamInfo, Signature};
pub use value::{CallableValue, Value};
