//! The MQL expression tree.
//!
//! Every variant here is immutable once built: the parser only ever
//! constructs a node, it never mutates one in place.

/// `lhs.member` — a member reference. Shared by the bare `Access` variant
/// and by `Call`, whose invocation target must always be one of these (the
/// parser guarantees `lhs` is never itself an `Access`/`Call` chain deeper
/// than what `postfix` naturally produces — see `Parser::parse_postfix`).
#[derive(Clone, Debug, PartialEq)]
pub struct Access {
    pub lhs: Box<Expr>,
    pub member: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    NullCoalesce,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::NullCoalesce => "??",
        }
    }
}

/// An MQL expression node.
///
/// `ArgList` from the design is not a separate type here: a `Call`'s
/// arguments are just an ordered `Vec<Expr>`, which is what `ArgList`
/// describes ("ordered sequence of Expr") without adding a wrapper type
/// that carries no extra behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Ident(String),
    Access(Access),
    Call { access: Access, args: Vec<Expr> },
    Unary { op: UnaryOp, rhs: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Ternary { cond: Box<Expr>, then: Box<Expr>, els: Box<Expr> },
}

impl Expr {
    pub fn access(lhs: Expr, member: impl Into<String>) -> Access {
        Access { lhs: Box::new(lhs), member: member.into() }
    }
}

impl std::fmt::Display for Expr {
    /// Canonical pretty-printer: fully parenthesized, single-space
    /// separated. Used by the parse/print round-trip property test — the
    /// point is that parsing this output always reproduces the same tree,
    /// not that it matches the original source layout.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Ident(name) => write!(f, "{name}"),
            Expr::Access(access) => write!(f, "{}.{}", access.lhs, access.member),
            Expr::Call { access, args } => {
                write!(f, "{}.{}(", access.lhs, access.member)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Unary { op: UnaryOp::Negate, rhs } => write!(f, "(-{rhs})"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Ternary { cond, then, els } => write!(f, "({cond} ? {then} : {els})"),
        }
    }
}
