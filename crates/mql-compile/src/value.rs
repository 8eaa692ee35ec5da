//! Runtime values the tree-walking interpreter produces. The compiled
//! backend never sees this type: it works in plain `f64` end to end.

use std::sync::Arc;

use mql_util::{MqlError, MqlResult};

/// A bound, not-yet-invoked method, as returned by a bare `q.method` access
/// when `method` has no zero-arity overload to auto-invoke. `'a` ties the
/// closure's lifetime to the [`crate::Env`] the receiver was borrowed from.
#[derive(Clone)]
pub struct CallableValue<'a> {
    pub arity: usize,
    pub invoke: Arc<dyn Fn(&[f64]) -> MqlResult<f64> + 'a>,
}

impl std::fmt::Debug for CallableValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallableValue").field("arity", &self.arity).finish_non_exhaustive()
    }
}

/// The interpreter's value type: a number, the absence of one, or a bound
/// method waiting to be called.
#[derive(Clone, Debug)]
pub enum Value<'a> {
    Number(f64),
    Null,
    Callable(CallableValue<'a>),
}

impl<'a> Value<'a> {
    /// The numeric projection used by arithmetic, comparisons, and the
    /// ternary condition. `Null` coerces to `0.0`; a callable has no
    /// numeric reading and is a type error.
    pub fn to_number(&self) -> MqlResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Null => Ok(0.0),
            Value::Callable(_) => {
                Err(MqlError::TypeError { message: "cannot use a callable value as a number; call it first".to_string() })
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
