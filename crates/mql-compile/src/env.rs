//! The interpreter's environment: the live, per-evaluation binding of query
//! root names to host objects.

use std::any::Any;
use std::sync::Arc;

use crate::class_info::ClassInfo;
use crate::math::{self, MathConfig, MathRoot};

/// Binds query-root names to host objects for one [`crate::Interpreter::evaluate`]
/// call. `math`/`m` are bound automatically; every other root is added with
/// [`Env::with_root`].
pub struct Env<'a> {
    roots: Vec<(Vec<String>, Arc<ClassInfo>, &'a dyn Any)>,
    math_root: Arc<MathRoot>,
    math_class_info: Arc<ClassInfo>,
}

impl<'a> Env<'a> {
    pub fn new(math_config: MathConfig) -> Self {
        let (math_root, math_class_info) = math::build(&math_config);
        Self { roots: Vec::new(), math_root, math_class_info }
    }

    /// Binds a query root under one or more names to a live host object.
    pub fn with_root(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
        class_info: Arc<ClassInfo>,
        receiver: &'a dyn Any,
    ) -> Self {
        self.roots.push((names.into_iter().map(Into::into).collect(), class_info, receiver));
        self
    }

    pub(crate) fn resolve<'s>(&'s self, name: &str) -> Option<(Arc<ClassInfo>, &'s dyn Any)> {
        if name == "math" || name == "m" {
            return Some((self.math_class_info.clone(), self.math_root.as_ref() as &dyn Any));
        }
        for (names, class_info, receiver) in &self.roots {
            if names.iter().any(|n| n == name) {
                return Some((class_info.clone(), *receiver));
            }
        }
        None
    }
}

impl Default for Env<'_> {
    fn default() -> Self {
        Self::new(MathConfig::default())
    }
}
