//! The built-in `math` (alias `m`) query root.
//!
//! Every function here is grounded in MoLang's standard math library (§4.6
//! of the design). Angle-accepting functions take degrees; angle-producing
//! functions return degrees, matching the convention the rest of the
//! family follows for `sin`/`cos`/`tan`.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mql_util::MqlResult;

use crate::class_info::{ClassInfo, ClassInfoBuilder, ParamKind::Number};

/// Host-configurable behavior for the `math` root. The only knob today is
/// the RNG seed `math.random`/`math.random_int` draw from.
#[derive(Clone, Debug, Default)]
pub struct MathConfig {
    /// A fixed seed for reproducible `math.random`/`math.random_int` output,
    /// e.g. in tests or replay-driven tooling. `None` seeds from system
    /// entropy, which is what a live compiler instance should use.
    pub seed: Option<u64>,
}

/// The live state behind `math`: currently just the RNG. A `ClassInfo` is
/// an immutable method table shared across many compiled scripts, so the
/// mutable per-instance state it dispatches against lives here instead, one
/// `MathRoot` per [`crate::Compiler`]/interpreter `Env`.
pub struct MathRoot {
    rng: Mutex<StdRng>,
}

impl MathRoot {
    pub fn new(config: &MathConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng: Mutex::new(rng) }
    }
}

/// Builds the `math` root's `MathRoot` state and method table together.
pub fn build(config: &MathConfig) -> (Arc<MathRoot>, Arc<ClassInfo>) {
    (Arc::new(MathRoot::new(config)), Arc::new(class_info()))
}

fn nums(n: usize) -> Vec<crate::class_info::ParamKind> {
    vec![Number; n]
}

fn shortest_angle_diff(from: f64, to: f64) -> f64 {
    let mut diff = (to - from) % 360.0;
    if diff < -180.0 {
        diff += 360.0;
    } else if diff > 180.0 {
        diff -= 360.0;
    }
    diff
}

fn class_info() -> ClassInfo {
    ClassInfoBuilder::new()
        .method("abs", nums(1), |_: &MathRoot, a| Ok(a[0].abs()))
        .unwrap()
        .method("sign", nums(1), |_: &MathRoot, a| {
            Ok(if a[0] > 0.0 { 1.0 } else if a[0] < 0.0 { -1.0 } else { 0.0 })
        })
        .unwrap()
        .method("floor", nums(1), |_: &MathRoot, a| Ok(a[0].floor()))
        .unwrap()
        .method("ceil", nums(1), |_: &MathRoot, a| Ok(a[0].ceil()))
        .unwrap()
        .method("round", nums(1), |_: &MathRoot, a| Ok(a[0].round()))
        .unwrap()
        .method("trunc", nums(1), |_: &MathRoot, a| Ok(a[0].trunc()))
        .unwrap()
        .method("sqrt", nums(1), |_: &MathRoot, a| Ok(a[0].sqrt()))
        .unwrap()
        .method("exp", nums(1), |_: &MathRoot, a| Ok(a[0].exp()))
        .unwrap()
        .method("ln", nums(1), |_: &MathRoot, a| Ok(a[0].ln()))
        .unwrap()
        .method("pow", nums(2), |_: &MathRoot, a| Ok(a[0].powf(a[1])))
        .unwrap()
        .method("sin", nums(1), |_: &MathRoot, a| Ok(a[0].to_radians().sin()))
        .unwrap()
        .method("cos", nums(1), |_: &MathRoot, a| Ok(a[0].to_radians().cos()))
        .unwrap()
        .method("tan", nums(1), |_: &MathRoot, a| Ok(a[0].to_radians().tan()))
        .unwrap()
        .method("asin", nums(1), |_: &MathRoot, a| Ok(a[0].asin().to_degrees()))
        .unwrap()
        .method("acos", nums(1), |_: &MathRoot, a| Ok(a[0].acos().to_degrees()))
        .unwrap()
        .method("atan", nums(1), |_: &MathRoot, a| Ok(a[0].atan().to_degrees()))
        .unwrap()
        .method("atan2", nums(2), |_: &MathRoot, a| Ok(a[0].atan2(a[1]).to_degrees()))
        .unwrap()
        .method("min", nums(2), |_: &MathRoot, a| Ok(a[0].min(a[1])))
        .unwrap()
        .method("max", nums(2), |_: &MathRoot, a| Ok(a[0].max(a[1])))
        .unwrap()
        .method("mod", nums(2), |_: &MathRoot, a| Ok(a[0] % a[1]))
        .unwrap()
        .method("clamp", nums(3), |_: &MathRoot, a| {
            let (x, lo, hi) = (a[0], a[1], a[2]);
            Ok(if x < lo { lo } else if x > hi { hi } else { x })
        })
        .unwrap()
        .method("lerp", nums(3), |_: &MathRoot, a| Ok(a[0] + (a[1] - a[0]) * a[2]))
        .unwrap()
        .method("lerp_rotate", nums(3), |_: &MathRoot, a| Ok(a[0] + shortest_angle_diff(a[0], a[1]) * a[2]))
        .unwrap()
        .method("hermite_blend", nums(1), |_: &MathRoot, a| {
            let t = a[0];
            Ok(3.0 * t * t - 2.0 * t * t * t)
        })
        .unwrap()
        .method("pi", nums(0), |_: &MathRoot, _| Ok(std::f64::consts::PI))
        .unwrap()
        .method("random", nums(0), |root: &MathRoot, _| -> MqlResult<f64> {
            Ok(root.rng.lock().expect("math rng poisoned").gen_range(0.0..1.0))
        })
        .unwrap()
        .method("random_int", nums(2), |root: &MathRoot, a| -> MqlResult<f64> {
            let (lo, hi) = (a[0].round() as i64, a[1].round() as i64);
            let value = if lo >= hi { lo } else { root.rng.lock().expect("math rng poisoned").gen_range(lo..=hi) };
            Ok(value as f64)
        })
        .unwrap()
        .build()
}
