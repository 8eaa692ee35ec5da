//! Edge case tests for the lexer, plus a proptest no-panic fuzz check.

#[cfg(test)]
mod tests {
    use crate::{lex_all, TokenKind};

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(lex_all("").unwrap(), vec![crate::Token::new(TokenKind::Eof, mql_util::Span::point(0))]);
    }

    #[test]
    fn whitespace_only_source() {
        let toks = lex_all("   \t\n  ").unwrap();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
    }

    #[test]
    fn single_char_identifier() {
        let toks = lex_all("x").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Ident("x".into()));
    }

    #[test]
    fn long_identifier() {
        let name = "a".repeat(5000);
        let toks = lex_all(&name).unwrap();
        assert_eq!(toks[0].kind, TokenKind::Ident(name));
    }

    #[test]
    fn integer_without_fraction() {
        let toks = lex_all("42").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Number(42.0));
    }

    #[test]
    fn trailing_dot_is_its_own_token() {
        // "1." with nothing after is a number then a dot, not a malformed number.
        let toks = lex_all("1.").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Number(1.0));
        assert_eq!(toks[1].kind, TokenKind::Dot);
    }

    #[test]
    fn question_mark_alone_is_ternary_question() {
        let toks = lex_all("?").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Question);
    }
}

#[cfg(test)]
mod proptests {
    use crate::lex_all;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_ascii(s in "\\PC*") {
            let _ = lex_all(&s);
        }

        #[test]
        fn identifiers_round_trip(name in "[A-Za-z_][A-Za-z_0-9]{0,16}") {
            let toks = lex_all(&name).unwrap();
            prop_assert_eq!(toks.len(), 2); // ident + eof
        }
    }
}
