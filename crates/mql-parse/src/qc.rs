//! Algebraic properties of the parser checked with quickcheck.
