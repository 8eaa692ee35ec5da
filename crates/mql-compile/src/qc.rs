//! Algebraic properties of the value coercion rules and the math library,
//! checked with quickcheck.

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use crate::math::{self, MathConfig};
    use crate::value::Value;

    fn finite(n: f64) -> bool {
        n.is_finite()
    }

    #[quickcheck]
    fn numeric_coercion_is_idempotent(n: f64) -> bool {
        if !finite(n) {
            return true;
        }
        let once = Value::Number(n).to_number().unwrap();
        let twice = Value::Number(once).to_number().unwrap();
        once == twice
    }

    #[quickcheck]
    fn null_always_coerces_to_zero() -> bool {
        Value::Null.to_number().unwrap() == 0.0
    }

    #[quickcheck]
    fn hermite_blend_matches_closed_form(raw: u16) -> bool {
        // Scale an arbitrary u16 into [0, 1] so quickcheck still varies the
        // input without generating non-finite or wildly out-of-range floats.
        let t = raw as f64 / u16::MAX as f64;
        let (root, class_info) = math::build(&MathConfig::default());
        let method = class_info.lookup("hermite_blend", 1).unwrap();
        let actual = (method.invoke)(root.as_ref(), &[t]).unwrap();
        let expected = 3.0 * t * t - 2.0 * t * t * t;
        (actual - expected).abs() < 1e-9
    }

    #[quickcheck]
    fn clamp_result_always_within_bounds(x: f64, lo: f64, hi: f64) -> bool {
        if ![x, lo, hi].iter().all(|v| finite(*v)) || lo > hi {
            return true;
        }
        let (root, class_info) = math::build(&MathConfig::default());
        let method = class_info.lookup("clamp", 3).unwrap();
        let result = (method.invoke)(root.as_ref(), &[x, lo, hi]).unwrap();
        result >= lo && result <= hi
    }
}
