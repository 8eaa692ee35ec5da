use mql_util::{MqlError, MqlResult, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Turns MQL source text into a token stream.
///
/// Consumers drive the lexer with [`Lexer::next`] and [`Lexer::peek`]; per
/// the peek/advance contract, `peek` never advances the underlying cursor
/// — it buffers one token so repeated calls are idempotent.
pub struct Lexer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    peeked: Option<MqlResult<Token>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, cursor: Cursor::new(source), peeked: None }
    }

    /// Returns the next token without consuming it. Calling `peek`
    /// repeatedly returns the same result until `next` is called.
    pub fn peek(&mut self) -> MqlResult<Token> {
        if self.peeked.is_none() {
            self.peeked = Some(self.scan_token());
        }
        self.peeked.clone().expect("just populated")
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> MqlResult<Token> {
        if let Some(tok) = self.peeked.take() {
            return tok;
        }
        self.scan_token()
    }

    fn scan_token(&mut self) -> MqlResult<Token> {
        self.skip_whitespace();

        let start = self.cursor.position();
        if self.cursor.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        }

        let c = self.cursor.current();
        let kind = match c {
            b'(' => {
                self.cursor.advance();
                TokenKind::LParen
            }
            b')' => {
                self.cursor.advance();
                TokenKind::RParen
            }
            b'.' => {
                self.cursor.advance();
                TokenKind::Dot
            }
            b',' => {
                self.cursor.advance();
                TokenKind::Comma
            }
            b'+' => {
                self.cursor.advance();
                TokenKind::Plus
            }
            b'-' => {
                self.cursor.advance();
                TokenKind::Minus
            }
            b'*' => {
                self.cursor.advance();
                TokenKind::Star
            }
            b'/' => {
                self.cursor.advance();
                TokenKind::Slash
            }
            b'?' => {
                self.cursor.advance();
                if self.cursor.current() == b'?' {
                    self.cursor.advance();
                    TokenKind::QColon
                } else {
                    TokenKind::Question
                }
            }
            b':' => {
                self.cursor.advance();
                TokenKind::Colon
            }
            b'=' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.cursor.advance();
                    TokenKind::Eq
                } else {
                    return Err(MqlError::LexError {
                        offset: start,
                        message: "expected `==`, found lone `=`".to_string(),
                    });
                }
            }
            b'!' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.cursor.advance();
                    TokenKind::Neq
                } else {
                    return Err(MqlError::LexError {
                        offset: start,
                        message: "expected `!=`, found lone `!`".to_string(),
                    });
                }
            }
            b'<' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.cursor.advance();
                    TokenKind::Lte
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.cursor.advance();
                    TokenKind::Gte
                } else {
                    TokenKind::Gt
                }
            }
            b'0'..=b'9' => return self.scan_number(start),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => return self.scan_ident(start),
            other => {
                return Err(MqlError::LexError {
                    offset: start,
                    message: format!("unexpected character `{}`", other as char),
                })
            }
        };

        let span = Span::new(start, self.cursor.position());
        self.trace(&kind, span);
        Ok(Token::new(kind, span))
    }

    fn scan_number(&mut self, start: usize) -> MqlResult<Token> {
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }
        if self.cursor.current() == b'.' && self.cursor.peek_at(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        let end = self.cursor.position();
        let text = &self.source[start..end];
        let value: f64 = text.parse().map_err(|_| MqlError::LexError {
            offset: start,
            message: format!("invalid numeric literal `{text}`"),
        })?;
        let span = Span::new(start, end);
        let kind = TokenKind::Number(value);
        self.trace(&kind, span);
        Ok(Token::new(kind, span))
    }

    fn scan_ident(&mut self, start: usize) -> MqlResult<Token> {
        while matches!(self.cursor.current(), b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_') {
            self.cursor.advance();
        }
        let end = self.cursor.position();
        let span = Span::new(start, end);
        let kind = TokenKind::Ident(self.source[start..end].to_string());
        self.trace(&kind, span);
        Ok(Token::new(kind, span))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current(), b' ' | b'\t' | b'\r' | b'\n') {
            self.cursor.advance();
        }
    }

    #[cfg(feature = "trace-tokens")]
    fn trace(&self, kind: &TokenKind, span: Span) {
        tracing::trace!(?kind, start = span.start, end = span.end, "token");
    }

    #[cfg(not(feature = "trace-tokens"))]
    fn trace(&self, _kind: &TokenKind, _span: Span) {}
}

/// Tokenizes an entire source string, stopping after (and including) `Eof`.
pub fn lex_all(source: &str) -> MqlResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next()?;
        let is_eof = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if is_eof {
            break;
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex_all(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_punctuation_maximal_munch() {
        assert_eq!(
            kinds("== != <= >= ??"),
            vec![
                TokenKind::Eq,
                TokenKind::Neq,
                TokenKind::Lte,
                TokenKind::Gte,
                TokenKind::QColon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lexes_number_and_ident() {
        assert_eq!(
            kinds("q.health 3.5"),
            vec![
                TokenKind::Ident("q".into()),
                TokenKind::Dot,
                TokenKind::Ident("health".into()),
                TokenKind::Number(3.5),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lone_bang_is_lex_error() {
        let err = lex_all("!x").unwrap_err();
        assert!(matches!(err, MqlError::LexError { offset: 0, .. }));
    }

    #[test]
    fn unknown_char_is_lex_error() {
        let err = lex_all("$").unwrap_err();
        assert!(matches!(err, MqlError::LexError { offset: 0, .. }));
    }

    #[test]
    fn peek_does_not_advance() {
        let mut lexer = Lexer::new("1 + 2");
        let first = lexer.peek().unwrap();
        let first_again = lexer.peek().unwrap();
        assert_eq!(first, first_again);
        let consumed = lexer.next().unwrap();
        assert_eq!(consumed, first);
    }

    #[test]
    fn integer_with_no_fraction_after_dot_splits() {
        // "1." followed by a non-digit: the '.' does not belong to the number.
        assert_eq!(
            kinds("1.foo"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Dot,
                TokenKind::Ident("foo".into()),
                TokenKind::Eof
            ]
        );
    }
}
