//! Algebraic properties of [`crate::Span`] checked with quickcheck.

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use crate::Span;

    fn span(a: usize, b: usize) -> Span {
        Span::new(a.min(b), a.max(b))
    }

    #[quickcheck]
    fn to_is_commutative(a0: usize, a1: usize, b0: usize, b1: usize) -> bool {
        let a = span(a0, a1);
        let b = span(b0, b1);
        a.to(b) == b.to(a)
    }

    #[quickcheck]
    fn to_always_covers_both_inputs(a0: usize, a1: usize, b0: usize, b1: usize) -> bool {
        let a = span(a0, a1);
        let b = span(b0, b1);
        let combined = a.to(b);
        combined.start <= a.start && combined.start <= b.start && combined.end >= a.end && combined.end >= b.end
    }

    #[quickcheck]
    fn to_is_idempotent(a0: usize, a1: usize) -> bool {
        let a = span(a0, a1);
        a.to(a) == a
    }
}
