use mql_lex::{Lexer, Token, TokenKind};
use mql_util::{MqlError, MqlResult};

use crate::ast::{BinaryOp, Expr, UnaryOp};

/// Recursive-descent parser, one function per precedence level, matching
/// the grammar in the design 1:1 (lowest precedence first):
///
/// ```text
/// expr        := ternary
/// ternary     := nullcoal ( '?' ternary ':' ternary )?
/// nullcoal    := equality ( '??' equality )*
/// equality    := comparison ( ('=='|'!=') comparison )*
/// comparison  := additive ( ('<'|'<='|'>'|'>=') additive )*
/// additive    := multiplicative ( ('+'|'-') multiplicative )*
/// multiplicative := unary ( ('*'|'/') unary )*
/// unary       := '-' unary | postfix
/// postfix     := primary ( '.' IDENT ( '(' args ')' )? )*
/// primary     := NUMBER | IDENT | '(' expr ')'
/// ```
///
/// `ternary`'s recursive calls on both branches (rather than looping) is
/// what makes it right-associative while every binary level above loops
/// (left-associative).
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

/// Parses a complete MQL expression, rejecting EOF before a complete
/// expression and any trailing token after one.
pub fn parse(source: &str) -> MqlResult<Expr> {
    Parser::new(source).parse_expr()
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { lexer: Lexer::new(source) }
    }

    pub fn parse_expr(&mut self) -> MqlResult<Expr> {
        let expr = self.ternary()?;
        let tok = self.lexer.peek()?;
        if tok.kind != TokenKind::Eof {
            return Err(MqlError::ParseError {
                offset: tok.span.start,
                expected: "end of input".to_string(),
                found: tok.kind.to_string(),
            });
        }
        Ok(expr)
    }

    fn ternary(&mut self) -> MqlResult<Expr> {
        let cond = self.nullcoal()?;
        if self.eat(&TokenKind::Question)? {
            let then = self.ternary()?;
            self.expect(TokenKind::Colon)?;
            let els = self.ternary()?;
            Ok(Expr::Ternary { cond: Box::new(cond), then: Box::new(then), els: Box::new(els) })
        } else {
            Ok(cond)
        }
    }

    fn nullcoal(&mut self) -> MqlResult<Expr> {
        let mut lhs = self.equality()?;
        while self.eat(&TokenKind::QColon)? {
            let rhs = self.equality()?;
            lhs = binary(BinaryOp::NullCoalesce, lhs, rhs);
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> MqlResult<Expr> {
        let mut lhs = self.comparison()?;
        loop {
            let op = if self.eat(&TokenKind::Eq)? {
                BinaryOp::Eq
            } else if self.eat(&TokenKind::Neq)? {
                BinaryOp::Neq
            } else {
                break;
            };
            let rhs = self.comparison()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> MqlResult<Expr> {
        let mut lhs = self.additive()?;
        loop {
            let op = if self.eat(&TokenKind::Lt)? {
                BinaryOp::Lt
            } else if self.eat(&TokenKind::Lte)? {
                BinaryOp::Lte
            } else if self.eat(&TokenKind::Gt)? {
                BinaryOp::Gt
            } else if self.eat(&TokenKind::Gte)? {
                BinaryOp::Gte
            } else {
                break;
            };
            let rhs = self.additive()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn additive(&mut self) -> MqlResult<Expr> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = if self.eat(&TokenKind::Plus)? {
                BinaryOp::Add
            } else if self.eat(&TokenKind::Minus)? {
                BinaryOp::Sub
            } else {
                break;
            };
            let rhs = self.multiplicative()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> MqlResult<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = if self.eat(&TokenKind::Star)? {
                BinaryOp::Mul
            } else if self.eat(&TokenKind::Slash)? {
                BinaryOp::Div
            } else {
                break;
            };
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> MqlResult<Expr> {
        if self.eat(&TokenKind::Minus)? {
            let rhs = self.unary()?;
            Ok(Expr::Unary { op: UnaryOp::Negate, rhs: Box::new(rhs) })
        } else {
            self.postfix()
        }
    }

    fn postfix(&mut self) -> MqlResult<Expr> {
        let mut expr = self.primary()?;
        while self.eat(&TokenKind::Dot)? {
            let member = self.expect_ident()?;
            if self.eat(&TokenKind::LParen)? {
                let args = self.parse_args()?;
                self.expect(TokenKind::RParen)?;
                expr = Expr::Call { access: Expr::access(expr, member), args };
            } else {
                expr = Expr::Access(Expr::access(expr, member));
            }
        }
        Ok(expr)
    }

    fn parse_args(&mut self) -> MqlResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.peek_is(&TokenKind::RParen)? {
            return Ok(args);
        }
        args.push(self.ternary()?);
        while self.eat(&TokenKind::Comma)? {
            args.push(self.ternary()?);
        }
        Ok(args)
    }

    fn primary(&mut self) -> MqlResult<Expr> {
        let tok = self.lexer.next()?;
        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::Ident(name) => Ok(Expr::Ident(name)),
            TokenKind::LParen => {
                let inner = self.ternary()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(MqlError::ParseError {
                offset: tok.span.start,
                expected: "number, identifier, or `(`".to_string(),
                found: other.to_string(),
            }),
        }
    }

    fn peek_is(&mut self, kind: &TokenKind) -> MqlResult<bool> {
        Ok(&self.lexer.peek()?.kind == kind)
    }

    /// Consumes the next token if it matches `kind`, returning whether it did.
    fn eat(&mut self, kind: &TokenKind) -> MqlResult<bool> {
        if self.peek_is(kind)? {
            self.lexer.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> MqlResult<Token> {
        let tok = self.lexer.next()?;
        if tok.kind == kind {
            Ok(tok)
        } else {
            Err(MqlError::ParseError {
                offset: tok.span.start,
                expected: kind.to_string(),
                found: tok.kind.to_string(),
            })
        }
    }

    fn expect_ident(&mut self) -> MqlResult<String> {
        let tok = self.lexer.next()?;
        match tok.kind {
            TokenKind::Ident(name) => Ok(name),
            other => Err(MqlError::ParseError {
                offset: tok.span.start,
                expected: "identifier".to_string(),
                found: other.to_string(),
            }),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
}
