//! The tree-walking interpreter. Accepts every construct the parser can
//! produce, including `??` and nested access chains the compiler rejects —
//! this is the permissive reference path, not the fast one.

use mql_parse::{Access, BinaryOp, Expr, UnaryOp};
use mql_util::{MqlError, MqlResult};

use crate::env::Env;
use crate::ops::{apply_binary, coerce_args};
use crate::value::{CallableValue, Value};

/// Evaluates `expr` against `env`, left to right, non-short-circuiting
/// except for `??` (§4.4 of the design).
pub fn evaluate<'a>(expr: &Expr, env: &Env<'a>) -> MqlResult<Value<'a>> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Ident(name) => {
            if env.resolve(name).is_some() {
                // A bare root with no member access carries no number of its
                // own; `Null` lets it still participate in arithmetic as 0.
                Ok(Value::Null)
            } else {
                Err(MqlError::NameError { ident: name.clone() })
            }
        }
        Expr::Access(access) => eval_access(access, env, None),
        Expr::Call { access, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(evaluate(arg, env)?);
            }
            eval_access(access, env, Some(&values))
        }
        Expr::Unary { op: UnaryOp::Negate, rhs } => Ok(Value::Number(-evaluate(rhs, env)?.to_number()?)),
        Expr::Binary { op: BinaryOp::NullCoalesce, lhs, rhs } => {
            let left = evaluate(lhs, env)?;
            if left.is_null() {
                evaluate(rhs, env)
            } else {
                Ok(left)
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = evaluate(lhs, env)?.to_number()?;
            let b = evaluate(rhs, env)?.to_number()?;
            Ok(Value::Number(apply_binary(*op, a, b)))
        }
        Expr::Ternary { cond, then, els } => {
            // All three operands are evaluated, in this order, regardless of
            // which branch the condition ultimately selects.
            let cond = evaluate(cond, env)?.to_number()?;
            let then_value = evaluate(then, env)?;
            let else_value = evaluate(els, env)?;
            Ok(if cond == 0.0 { else_value } else { then_value })
        }
    }
}

/// Resolves `access` against `env`. `call_args` is `Some` for an explicit
/// `Call` (even `q.method()` with zero args) and `None` for a bare access.
fn eval_access<'a>(access: &Access, env: &Env<'a>, call_args: Option<&[Value<'a>]>) -> MqlResult<Value<'a>> {
    let root_name = match &*access.lhs {
        Expr::Ident(name) => name,
        other => {
            // Nested access, e.g. `a.b.c`: the interpreter doesn't reject
            // this outright (only the compiler does), but `Value` has no
            // member-access operation of its own, so it fails here unless
            // evaluating `other` itself already fails first.
            evaluate(other, env)?;
            return Err(MqlError::TypeError {
                message: format!("cannot access member `{}` on a non-root value", access.member),
            });
        }
    };

    let (class_info, receiver) = env.resolve(root_name).ok_or_else(|| MqlError::NameError { ident: root_name.clone() })?;

    match call_args {
        Some(args) => {
            let method = class_info
                .lookup(&access.member, args.len())
                .ok_or_else(|| MqlError::MethodError { root: root_name.clone(), member: access.member.clone(), arity: args.len() })?;
            let mut nums: Vec<f64> = args.iter().map(Value::to_number).collect::<MqlResult<_>>()?;
            coerce_args(&method.param_kinds, &mut nums);
            Ok(Value::Number((method.invoke)(receiver, &nums)?))
        }
        None => {
            if let Some(method) = class_info.lookup(&access.member, 0) {
                Ok(Value::Number((method.invoke)(receiver, &[])?))
            } else if let Some(method) = class_info.unique_overload(&access.member) {
                let invoke = method.invoke.clone();
                let arity = method.arity();
                Ok(Value::Callable(CallableValue { arity, invoke: std::sync::Arc::new(move |args: &[f64]| invoke(receiver, args)) }))
            } else {
                Err(MqlError::MethodError { root: root_name.clone(), member: access.member.clone(), arity: 0 })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mql_parse::parse;

    use super::*;
    use crate::class_info::{ClassInfoBuilder, ParamKind};
    use crate::math::MathConfig;

    struct Entity {
        health: f64,
        max_health: f64,
    }

    fn entity_env(entity: &Entity) -> Env<'_> {
        let class_info = Arc::new(
            ClassInfoBuilder::new()
                .method("health", vec![], |e: &Entity, _| Ok(e.health))
                .unwrap()
                .method("max_health", vec![], |e: &Entity, _| Ok(e.max_health))
                .unwrap()
                .method("heal", vec![ParamKind::Number], |e: &Entity, args| Ok((e.health + args[0]).min(e.max_health)))
                .unwrap()
                .method("is_alive_if", vec![ParamKind::Boolean], |_: &Entity, args| Ok(args[0]))
                .unwrap()
                .build(),
        );
        Env::new(MathConfig::default()).with_root(["q", "query"], class_info, entity)
    }

    fn run(source: &str, env: &Env) -> f64 {
        let ast = parse(source).unwrap_or_else(|e| panic!("parse `{source}`: {e}"));
        evaluate(&ast, env).unwrap_or_else(|e| panic!("evaluate `{source}`: {e}")).to_number().unwrap()
    }

    #[test]
    fn bare_access_auto_invokes_zero_arity_method() {
        let entity = Entity { health: 10.0, max_health: 20.0 };
        let env = entity_env(&entity);
        assert_eq!(run("q.health", &env), 10.0);
        assert_eq!(run("q.health()", &env), 10.0);
    }

    #[test]
    fn boolean_parameter_normalizes_any_nonzero_argument() {
        let entity = Entity { health: 10.0, max_health: 20.0 };
        let env = entity_env(&entity);
        assert_eq!(run("q.is_alive_if(5)", &env), 1.0);
        assert_eq!(run("q.is_alive_if(-3)", &env), 1.0);
        assert_eq!(run("q.is_alive_if(0)", &env), 0.0);
    }

    #[test]
    fn call_with_args_picks_the_matching_overload() {
        let entity = Entity { health: 10.0, max_health: 20.0 };
        let env = entity_env(&entity);
        assert_eq!(run("q.heal(5)", &env), 15.0);
    }

    #[test]
    fn both_query_and_q_bind_the_same_root() {
        let entity = Entity { health: 3.0, max_health: 10.0 };
        let env = entity_env(&entity);
        assert_eq!(run("query.health", &env), run("q.health", &env));
    }

    #[test]
    fn null_coalesce_short_circuits_on_non_null_left() {
        let entity = Entity { health: 3.0, max_health: 10.0 };
        let env = entity_env(&entity);
        assert_eq!(run("q.health ?? 99", &env), 3.0);
    }

    #[test]
    fn null_coalesce_falls_through_on_null_left() {
        let entity = Entity { health: 3.0, max_health: 10.0 };
        let env = entity_env(&entity);
        // A bare root reference evaluates to Null, which `??` falls through on.
        assert_eq!(run("q ?? 7", &env), 7.0);
    }

    #[test]
    fn ternary_always_evaluates_both_branches() {
        let entity = Entity { health: 3.0, max_health: 10.0 };
        let env = entity_env(&entity);
        assert_eq!(run("1 ? q.heal(5) : q.heal(1000)", &env), 8.0);
    }

    #[test]
    fn unknown_root_is_a_name_error() {
        let entity = Entity { health: 1.0, max_health: 2.0 };
        let env = entity_env(&entity);
        let ast = parse("nope.health").unwrap();
        let err = evaluate(&ast, &env).unwrap_err();
        assert!(matches!(err, MqlError::NameError { ident } if ident == "nope"));
    }

    #[test]
    fn unknown_member_is_a_method_error() {
        let entity = Entity { health: 1.0, max_health: 2.0 };
        let env = entity_env(&entity);
        let ast = parse("q.mana").unwrap();
        let err = evaluate(&ast, &env).unwrap_err();
        assert!(matches!(err, MqlError::MethodError { .. }));
    }

    #[test]
    fn math_root_is_always_available() {
        let entity = Entity { health: 1.0, max_health: 2.0 };
        let env = entity_env(&entity);
        assert_eq!(run("math.min(3, 5)", &env), 3.0);
        assert_eq!(run("m.max(3, 5)", &env), 5.0);
    }
}
