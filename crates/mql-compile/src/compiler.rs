//! The ahead-of-call compiler: resolves every identifier and method call in
//! a script once, against a declared [`Signature`], and produces a
//! [`SpecializedCallable`] that can be invoked repeatedly without doing that
//! resolution work again.
//!
//! The backend is a tree of closures (§9's "AST-interpreter backend plus a
//! specialized closure that captures resolved invokers" option): compiling
//! an `Expr` returns a boxed `Fn(&[&dyn Any]) -> MqlResult<f64>` that already
//! knows which `MethodDescriptor` each call site dispatches to. There's no
//! separate bytecode or JIT step, which keeps the backend portable to every
//! target the rest of the workspace supports.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mql_parse::{Access, BinaryOp, Expr, UnaryOp};
use mql_util::{MqlError, MqlResult};

use crate::class_info::ClassInfo;
use crate::math::{self, MathConfig, MathRoot};
use crate::ops::{apply_binary, coerce_args};
use crate::signature::{ParamInfo, Signature};

type BoxedEval = Box<dyn Fn(&[&dyn Any]) -> MqlResult<f64> + Send + Sync>;

struct ResolvedParam {
    names: Vec<String>,
    class_info: Arc<ClassInfo>,
}

/// Where a resolved identifier's method table lives: the built-in `math`
/// root (looked up through the compiler itself, not the positional `roots`
/// a [`SpecializedCallable`] is invoked with) or one of the declared
/// signature parameters, by position.
#[derive(Clone, Copy)]
enum RootRef {
    Math,
    Param(usize),
}

/// Resolves scripts against one fixed [`Signature`]. Build once per host
/// type combination and reuse it to compile every script that shares that
/// signature.
pub struct Compiler {
    params: Vec<ResolvedParam>,
    math_root: Arc<MathRoot>,
    math_class_info: Arc<ClassInfo>,
    next_id: AtomicU64,
}

impl Compiler {
    /// A compiler for a signature with no generic parameters, using a
    /// freshly-entropy-seeded `math` root.
    pub fn new(signature: Signature) -> MqlResult<Self> {
        Self::with_generics(signature, Vec::new(), MathConfig::default())
    }

    /// A compiler for a signature that may contain generic parameters,
    /// bound here (in declaration order) to concrete [`ClassInfo`]s, and an
    /// explicit `math` configuration (e.g. a fixed RNG seed for tests).
    pub fn with_generics(signature: Signature, generic_bindings: Vec<Arc<ClassInfo>>, math_config: MathConfig) -> MqlResult<Self> {
        validate_signature(&signature)?;

        let generic_count = signature.params.iter().filter(|p| p.generic).count();
        if generic_count != generic_bindings.len() {
            return Err(MqlError::TypeError {
                message: format!(
                    "signature declares {generic_count} generic parameter(s) but {} concrete type(s) were provided",
                    generic_bindings.len()
                ),
            });
        }

        let mut bindings = generic_bindings.into_iter();
        let mut params = Vec::with_capacity(signature.params.len());
        for p in signature.params {
            let class_info = if p.generic {
                bindings.next().expect("generic binding count already checked above")
            } else {
                p.class_info.clone().expect("non-generic ParamInfo must carry a ClassInfo")
            };
            params.push(ResolvedParam { names: p.names, class_info });
        }

        let (math_root, math_class_info) = math::build(&math_config);
        Ok(Self { params, math_root, math_class_info, next_id: AtomicU64::new(0) })
    }

    /// Parses `source` and lowers it to a [`SpecializedCallable`], rejecting
    /// anything the compiled backend cannot express (§4.5): `??`, nested
    /// queries, unresolved roots/members, and arity mismatches discoverable
    /// statically.
    pub fn compile(&self, source: &str) -> MqlResult<SpecializedCallable> {
        let ast = mql_parse::parse(source)?;
        let body = self.compile_expr(&ast)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(callable_id = id, roots = self.params.len(), "compiled script");
        Ok(SpecializedCallable { id, arity: self.params.len(), body })
    }

    fn resolve_root(&self, name: &str) -> Option<(RootRef, Arc<ClassInfo>)> {
        if name == "math" || name == "m" {
            return Some((RootRef::Math, self.math_class_info.clone()));
        }
        self.params
            .iter()
            .enumerate()
            .find(|(_, p)| p.names.iter().any(|n| n == name))
            .map(|(i, p)| (RootRef::Param(i), p.class_info.clone()))
    }

    fn compile_expr(&self, expr: &Expr) -> MqlResult<BoxedEval> {
        match expr {
            Expr::Number(n) => {
                let n = *n;
                Ok(Box::new(move |_roots| Ok(n)))
            }
            Expr::Ident(name) => {
                if self.resolve_root(name).is_some() {
                    Err(MqlError::UnsupportedFeature {
                        reason: format!("query root `{name}` used as a bare value; expected a member access or call"),
                    })
                } else {
                    Err(MqlError::NameError { ident: name.clone() })
                }
            }
            Expr::Access(access) => self.compile_call(access, &[]),
            Expr::Call { access, args } => self.compile_call(access, args),
            Expr::Unary { op: UnaryOp::Negate, rhs } => {
                let rhs = self.compile_expr(rhs)?;
                Ok(Box::new(move |roots| Ok(-(rhs(roots)?))))
            }
            Expr::Binary { op: BinaryOp::NullCoalesce, .. } => Err(MqlError::UnsupportedFeature {
                reason: "`??` cannot be compiled; evaluate with the interpreter instead".to_string(),
            }),
            Expr::Binary { op, lhs, rhs } => {
                let op = *op;
                let lhs = self.compile_expr(lhs)?;
                let rhs = self.compile_expr(rhs)?;
                Ok(Box::new(move |roots| Ok(apply_binary(op, lhs(roots)?, rhs(roots)?))))
            }
            Expr::Ternary { cond, then, els } => {
                let cond = self.compile_expr(cond)?;
                let then = self.compile_expr(then)?;
                let els = self.compile_expr(els)?;
                Ok(Box::new(move |roots| {
                    // Evaluation order is cond, then, else, unconditionally —
                    // matches the interpreter's non-short-circuit ternary.
                    let cond = cond(roots)?;
                    let then_value = then(roots)?;
                    let else_value = els(roots)?;
                    Ok(if cond == 0.0 { else_value } else { then_value })
                }))
            }
        }
    }

    /// Compiles an access/call site. `args` is empty for a bare `q.method`
    /// access, which (per the auto-invoke rule) compiles identically to
    /// `q.method()`.
    fn compile_call(&self, access: &Access, args: &[Expr]) -> MqlResult<BoxedEval> {
        let root_name = match &*access.lhs {
            Expr::Ident(name) => name.clone(),
            _ => return Err(MqlError::UnsupportedFeature { reason: "nested queries not supported".to_string() }),
        };

        let (root_ref, class_info) = self.resolve_root(&root_name).ok_or_else(|| MqlError::NameError { ident: root_name.clone() })?;

        let method = class_info
            .lookup(&access.member, args.len())
            .ok_or_else(|| MqlError::MethodError { root: root_name.clone(), member: access.member.clone(), arity: args.len() })?
            .clone();

        let compiled_args: Vec<BoxedEval> = args.iter().map(|a| self.compile_expr(a)).collect::<MqlResult<_>>()?;

        match root_ref {
            RootRef::Math => {
                let math_root = self.math_root.clone();
                Ok(Box::new(move |roots| {
                    let mut values = Vec::with_capacity(compiled_args.len());
                    for arg in &compiled_args {
                        values.push(arg(roots)?);
                    }
                    coerce_args(&method.param_kinds, &mut values);
                    (method.invoke)(&*math_root as &dyn Any, &values)
                }))
            }
            RootRef::Param(index) => Ok(Box::new(move |roots: &[&dyn Any]| {
                let mut values = Vec::with_capacity(compiled_args.len());
                for arg in &compiled_args {
                    values.push(arg(roots)?);
                }
                coerce_args(&method.param_kinds, &mut values);
                (method.invoke)(roots[index], &values)
            })),
        }
    }
}

fn validate_signature(signature: &Signature) -> MqlResult<()> {
    let mut seen = std::collections::HashSet::new();
    for param in &signature.params {
        if param.names.is_empty() {
            return Err(MqlError::TypeError { message: "a signature parameter must bind at least one name".to_string() });
        }
        for name in &param.names {
            if name == "math" || name == "m" {
                return Err(MqlError::TypeError { message: format!("parameter name `{name}` shadows the built-in math root") });
            }
            if !seen.insert(name.clone()) {
                return Err(MqlError::TypeError { message: format!("duplicate signature parameter name `{name}`") });
            }
        }
    }
    Ok(())
}

/// A script compiled against one fixed [`Signature`]. Immutable and
/// `Send + Sync`, so one instance may be invoked concurrently from multiple
/// threads without any external synchronization.
pub struct SpecializedCallable {
    id: u64,
    arity: usize,
    body: BoxedEval,
}

impl SpecializedCallable {
    /// A monotonically increasing id, unique within the [`Compiler`] that
    /// produced this callable. Useful for correlating a callable with the
    /// `compiled script` trace event that was logged when it was built.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Invokes the compiled script with one positional host object per
    /// declared signature parameter, in declaration order.
    pub fn invoke(&self, roots: &[&dyn Any]) -> MqlResult<f64> {
        if roots.len() != self.arity {
            return Err(MqlError::ArityError { expected: self.arity, got: roots.len() });
        }
        (self.body)(roots)
    }
}
