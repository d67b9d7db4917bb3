use core::fmt::{self, Display};
use logos::Logos;

/// Tokens of preprocessed input.
#[derive(Logos, Clone, Debug, PartialEq, Eq)]
pub enum Token<'s> {
    #[token("let")]
    Let,

    #[token("in")]
    In,

    #[token("if")]
    If,

    #[token("then")]
    Then,

    #[token("else")]
    Else,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("Bool")]
    Bool,

    #[token("λ")]
    Lambda,

    #[token("Λ")]
    BigLambda,

    #[token("∀")]
    Forall,

    #[token("→")]
    Arrow,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("=")]
    Eq,

    #[token("(")]
    LPar,

    #[token(")")]
    RPar,

    #[token("[")]
    LBrk,

    #[token("]")]
    RBrk,

    /// Term-level identifier
    #[regex("[a-z][a-zA-Z0-9_]*")]
    Var(&'s str),

    /// Type-level identifier
    #[regex("[A-Z][a-zA-Z0-9_]*")]
    TyVar(&'s str),

    #[error]
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Error,
}

impl<'s> Display for Token<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            Self::Let => "let",
            Self::In => "in",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::True => "true",
            Self::False => "false",
            Self::Bool => "Bool",
            Self::Lambda => "λ",
            Self::BigLambda => "Λ",
            Self::Forall => "∀",
            Self::Arrow => "→",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Eq => "=",
            Self::LPar => "(",
            Self::RPar => ")",
            Self::LBrk => "[",
            Self::RBrk => "]",
            Self::Var(s) | Self::TyVar(s) => s,
            Self::Error => return Err(Default::default()),
        };
        s.fmt(f)
    }
}

#[cfg(test)]
fn tokens(s: &str) -> alloc::vec::Vec<Token> {
    Token::lexer(s).collect()
}

#[test]
fn keywords() {
    use Token::*;
    assert_eq!(tokens("let x = y in x"), [Let, Var("x"), Eq, Var("y"), In, Var("x")]);
    assert_eq!(tokens("letx inx"), [Var("letx"), Var("inx")]);
    assert_eq!(tokens("Bool Boolean"), [Bool, TyVar("Boolean")]);
}

#[test]
fn operators() {
    use Token::*;
    let expected = [Forall, TyVar("X"), Dot, TyVar("X"), Arrow, TyVar("X")];
    assert_eq!(tokens("∀X. X → X"), expected);
    let expected = [Lambda, Var("x"), Colon, Bool, Dot, Var("x"), LBrk, Bool, RBrk];
    assert_eq!(tokens("λx:Bool.x [Bool]"), expected);
}

#[test]
fn errors() {
    assert_eq!(tokens("x ; y"), [Token::Var("x"), Token::Error, Token::Var("y")]);
}
