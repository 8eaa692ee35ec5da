//! Signature descriptors: the declared shape of the query roots a script
//! will be compiled against.

use std::sync::Arc;

use crate::class_info::ClassInfo;

/// One declared query-root parameter: the name(s) a script may bind it
/// under (MoLang scripts commonly accept both `q` and `query`, say), its
/// method table, and whether that method table is filled in later.
///
/// A generic parameter's `class_info` is `None` until [`crate::Compiler`] is
/// given a concrete binding for it — see [`crate::Compiler::with_generics`].
#[derive(Clone)]
pub struct ParamInfo {
    pub names: Vec<String>,
    pub class_info: Option<Arc<ClassInfo>>,
    pub generic: bool,
}

impl ParamInfo {
    /// A parameter whose host type is already known.
    pub fn concrete(names: impl IntoIterator<Item = impl Into<String>>, class_info: Arc<ClassInfo>) -> Self {
        Self { names: names.into_iter().map(Into::into).collect(), class_info: Some(class_info), generic: false }
    }

    /// A parameter whose host type is supplied later, positionally, via
    /// [`crate::Compiler::with_generics`].
    pub fn generic(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { names: names.into_iter().map(Into::into).collect(), class_info: None, generic: true }
    }
}

/// The ordered list of query roots a [`crate::Compiler`] resolves
/// identifiers against. `math`/`m` are always available and are never part
/// of this list.
#[derive(Clone, Default)]
pub struct Signature {
    pub params: Vec<ParamInfo>,
}

impl Signature {
    pub fn new(params: Vec<ParamInfo>) -> Self {
        Self { params }
    }
}
