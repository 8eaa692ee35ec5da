//! Host-supplied method tables.
//!
//! `ClassInfo` is the reflection replacement described in the design: a
//! host doesn't hand us a `TypeId` and let us reflect over its methods, it
//! builds a `ClassInfo` up front by registering one closure per method. Every
//! closure accepts a type-erased receiver (`&dyn Any`) and a flat `&[f64]`
//! argument list and downcasts the receiver itself, so both the interpreter
//! and the compiled backend can drive the exact same dispatch table.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use mql_util::{MqlError, MqlResult};

/// The declared kind of a host method parameter. Both kinds travel as `f64`
/// on the wire — `Boolean` just documents that the host invoker treats
/// nonzero as true and zero as false at the point it actually needs a bool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Number,
    Boolean,
}

/// One overload of one method: its parameter kinds (arity is `param_kinds.len()`)
/// and the closure that invokes it against a type-erased receiver.
#[derive(Clone)]
pub struct MethodDescriptor {
    pub param_kinds: Vec<ParamKind>,
    pub(crate) invoke: Arc<dyn Fn(&dyn Any, &[f64]) -> MqlResult<f64> + Send + Sync>,
}

impl MethodDescriptor {
    pub fn arity(&self) -> usize {
        self.param_kinds.len()
    }
}

impl std::fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDescriptor").field("param_kinds", &self.param_kinds).finish_non_exhaustive()
    }
}

/// A host type's method table: every overload of every method it exposes to
/// scripts, keyed by name. Built once per host type (or once, for the
/// built-in `math` root) and shared behind an `Arc` across every compiled
/// callable and interpreter call that references it.
#[derive(Clone, Debug, Default)]
pub struct ClassInfo {
    methods: HashMap<String, Vec<MethodDescriptor>>,
}

impl ClassInfo {
    /// Finds the overload of `name` with exactly `arity` parameters.
    /// Overloads are resolved by arity only, never by parameter kind.
    pub fn lookup(&self, name: &str, arity: usize) -> Option<&MethodDescriptor> {
        self.methods.get(name)?.iter().find(|d| d.arity() == arity)
    }

    /// The sole overload of `name`, if there is exactly one. Used to resolve
    /// a bare `q.method` access (no call parens) when `method` has no
    /// zero-arity overload to auto-invoke: the access yields that overload as
    /// a callable value instead of a number.
    pub fn unique_overload(&self, name: &str) -> Option<&MethodDescriptor> {
        match self.methods.get(name) {
            Some(overloads) if overloads.len() == 1 => overloads.first(),
            _ => None,
        }
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

/// Builds a [`ClassInfo`] one method at a time.
#[derive(Default)]
pub struct ClassInfoBuilder {
    methods: HashMap<String, Vec<MethodDescriptor>>,
}

impl ClassInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a method generic over the concrete receiver type `T`. `f`
    /// is handed the already-downcast receiver, never the type-erased one —
    /// the downcast (and its failure mode) lives entirely in the wrapper
    /// this method builds.
    pub fn method<T: 'static>(
        mut self,
        name: impl Into<String>,
        param_kinds: Vec<ParamKind>,
        f: impl Fn(&T, &[f64]) -> MqlResult<f64> + Send + Sync + 'static,
    ) -> MqlResult<Self> {
        let name = name.into();
        let arity = param_kinds.len();
        let overloads = self.methods.entry(name.clone()).or_default();
        if overloads.iter().any(|d| d.arity() == arity) {
            return Err(MqlError::TypeError {
                message: format!("method `{name}` already has an overload with arity {arity}"),
            });
        }

        let err_name = name.clone();
        let invoke: Arc<dyn Fn(&dyn Any, &[f64]) -> MqlResult<f64> + Send + Sync> = Arc::new(move |receiver, args| {
            let receiver = receiver.downcast_ref::<T>().ok_or_else(|| MqlError::TypeError {
                message: format!("method `{err_name}` invoked against a receiver of the wrong host type"),
            })?;
            f(receiver, args)
        });

        overloads.push(MethodDescriptor { param_kinds, invoke });
        Ok(self)
    }

    pub fn build(self) -> ClassInfo {
        ClassInfo { methods: self.methods }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entity {
        health: f64,
    }

    #[test]
    fn resolves_overload_by_arity() {
        let class_info = ClassInfoBuilder::new()
            .method("health", vec![], |e: &Entity, _| Ok(e.health))
            .unwrap()
            .method("health", vec![ParamKind::Number], |e: &Entity, args| Ok(e.health + args[0]))
            .unwrap()
            .build();

        let entity = Entity { health: 10.0 };
        let zero_arg = class_info.lookup("health", 0).unwrap();
        assert_eq!((zero_arg.invoke)(&entity, &[]).unwrap(), 10.0);

        let one_arg = class_info.lookup("health", 1).unwrap();
        assert_eq!((one_arg.invoke)(&entity, &[5.0]).unwrap(), 15.0);

        assert!(class_info.lookup("health", 2).is_none());
    }

    #[test]
    fn rejects_duplicate_overload_arity() {
        let err = ClassInfoBuilder::new()
            .method("health", vec![], |e: &Entity, _| Ok(e.health))
            .unwrap()
            .method("health", vec![], |e: &Entity, _| Ok(e.health))
            .unwrap_err();
        assert!(matches!(err, MqlError::TypeError { .. }));
    }

    #[test]
    fn wrong_receiver_type_is_a_type_error() {
        struct Other;
        let class_info = ClassInfoBuilder::new().method("health", vec![], |e: &Entity, _| Ok(e.health)).unwrap().build();
        let method = class_info.lookup("health", 0).unwrap();
        let err = (method.invoke)(&Other, &[]).unwrap_err();
        assert!(matches!(err, MqlError::TypeError { .. }));
    }
}
