use crate::term::{Binding, Context, Pos, Term, Type};
use crate::Token;
use alloc::{boxed::Box, vec::Vec};
use core::fmt::{self, Display};
use core::iter::Peekable;
use logos::{Logos, SpannedIter};

/// What the parser expected when it failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Expected {
    Term,
    Type,
    Ident,
    TyIdent,
    Binding,
    Dot,
    Eq,
    In,
    Then,
    Else,
    RPar,
    RBrk,
    End,
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Term => "term",
            Self::Type => "type",
            Self::Ident => "term identifier",
            Self::TyIdent => "type identifier",
            Self::Binding => "binding",
            Self::Dot => "\".\"",
            Self::Eq => "\"=\"",
            Self::In => "\"in\"",
            Self::Then => "\"then\"",
            Self::Else => "\"else\"",
            Self::RPar => "\")\"",
            Self::RBrk => "\"]\"",
            Self::End => "end of input",
        };
        write!(f, "expected {}", s)
    }
}

/// Syntax error at the first position where parsing failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub expected: Expected,
    pub pos: Pos,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}", self.expected, self.pos)
    }
}

type Result<T> = core::result::Result<T, Error>;

/// Token stream of a source text, with one token lookahead.
pub struct Parser<'s> {
    src: &'s str,
    tokens: Peekable<SpannedIter<'s, Token<'s>>>,
}

impl<'s> Parser<'s> {
    pub fn new(src: &'s str) -> Self {
        let tokens = Token::lexer(src).spanned().peekable();
        Self { src, tokens }
    }

    /// Return the row and column of the given byte offset.
    fn pos_at(&self, offset: usize) -> Pos {
        let before = &self.src[..offset];
        let row = before.matches('\n').count() + 1;
        let line = before.rfind('\n').map_or(before, |i| &before[i + 1..]);
        let col = line.chars().count() + 1;
        Pos { row, col }
    }

    /// Position of the next token, or of the end of input.
    pub fn here(&mut self) -> Pos {
        let offset = match self.tokens.peek() {
            Some((_, span)) => span.start,
            None => self.src.len(),
        };
        self.pos_at(offset)
    }

    pub fn peek(&mut self) -> Option<&Token<'s>> {
        self.tokens.peek().map(|(tok, _)| tok)
    }

    fn bump(&mut self) {
        self.tokens.next();
    }

    fn eat(&mut self, tok: &Token<'s>) -> bool {
        let eaten = self.peek() == Some(tok);
        if eaten {
            self.bump()
        }
        eaten
    }

    fn err(&mut self, expected: Expected) -> Error {
        let pos = self.here();
        Error { expected, pos }
    }

    fn expect(&mut self, tok: Token<'s>, expected: Expected) -> Result<()> {
        if self.eat(&tok) {
            Ok(())
        } else {
            Err(self.err(expected))
        }
    }

    fn var(&mut self) -> Result<&'s str> {
        match self.peek().cloned() {
            Some(Token::Var(x)) => {
                self.bump();
                Ok(x)
            }
            _ => Err(self.err(Expected::Ident)),
        }
    }

    fn tyvar(&mut self) -> Result<&'s str> {
        match self.peek().cloned() {
            Some(Token::TyVar(x)) => {
                self.bump();
                Ok(x)
            }
            _ => Err(self.err(Expected::TyIdent)),
        }
    }

    /// Succeed if the whole input has been consumed.
    pub fn end(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.err(Expected::End)),
        }
    }
}

pub trait Parse<'s>: Sized {
    fn parse(p: &mut Parser<'s>) -> Result<Self>;

    /// Parse the whole string, failing on trailing input.
    fn parse_str(s: &'s str) -> Result<Self> {
        let mut p = Parser::new(s);
        let y = Self::parse(&mut p)?;
        p.end()?;
        Ok(y)
    }
}

fn starts_term(tok: &Token) -> bool {
    use Token::*;
    matches!(
        tok,
        Var(_) | True | False | LPar | Let | If | Lambda | BigLambda
    )
}

impl<'s> Parse<'s> for Term<&'s str> {
    fn parse(p: &mut Parser<'s>) -> Result<Self> {
        let pos = p.here();
        match p.peek().cloned() {
            Some(Token::Let) => {
                p.bump();
                let x = p.var()?;
                p.expect(Token::Eq, Expected::Eq)?;
                let e = Self::parse(p)?;
                p.expect(Token::In, Expected::In)?;
                let t = Self::parse(p)?;
                Ok(Self::Let(pos, x, Box::new(e), Box::new(t)))
            }
            Some(Token::If) => {
                p.bump();
                let c = Self::parse(p)?;
                p.expect(Token::Then, Expected::Then)?;
                let t = Self::parse(p)?;
                p.expect(Token::Else, Expected::Else)?;
                let e = Self::parse(p)?;
                Ok(Self::If(pos, Box::new(c), Box::new(t), Box::new(e)))
            }
            Some(Token::Lambda) => {
                p.bump();
                let x = p.var()?;
                let ty = if p.eat(&Token::Colon) {
                    Some(Type::parse(p)?)
                } else {
                    None
                };
                p.expect(Token::Dot, Expected::Dot)?;
                Ok(Self::Abs(pos, x, ty, Box::new(Self::parse(p)?)))
            }
            Some(Token::BigLambda) => {
                p.bump();
                let x = p.tyvar()?;
                p.expect(Token::Dot, Expected::Dot)?;
                Ok(Self::TyAbs(pos, x, Box::new(Self::parse(p)?)))
            }
            _ => Self::parse_app(p),
        }
    }
}

impl<'s> Term<&'s str> {
    /// Parse a left-associative sequence of arguments and type arguments.
    fn parse_app(p: &mut Parser<'s>) -> Result<Self> {
        let pos = p.here();
        let mut tm = Self::parse_atom(p)?;
        loop {
            if p.eat(&Token::LBrk) {
                let ty = Type::parse(p)?;
                p.expect(Token::RBrk, Expected::RBrk)?;
                tm = Self::TyApp(pos, Box::new(tm), ty)
            } else if p.peek().map_or(false, starts_term) {
                let arg = Self::parse_atom(p)?;
                tm = Self::App(pos, Box::new(tm), Box::new(arg))
            } else {
                return Ok(tm);
            }
        }
    }

    fn parse_atom(p: &mut Parser<'s>) -> Result<Self> {
        let pos = p.here();
        match p.peek().cloned() {
            Some(Token::Var(x)) => {
                p.bump();
                Ok(Self::Var(pos, x))
            }
            Some(Token::True) => {
                p.bump();
                Ok(Self::Const(pos, true))
            }
            Some(Token::False) => {
                p.bump();
                Ok(Self::Const(pos, false))
            }
            Some(Token::LPar) => {
                p.bump();
                let tm = Self::parse(p)?;
                p.expect(Token::RPar, Expected::RPar)?;
                Ok(tm)
            }
            Some(tok) if starts_term(&tok) => Self::parse(p),
            _ => Err(p.err(Expected::Term)),
        }
    }
}

impl<'s> Parse<'s> for Type<&'s str> {
    /// Parse a right-associative chain of arrows.
    fn parse(p: &mut Parser<'s>) -> Result<Self> {
        let a = Self::parse_arg(p)?;
        if p.eat(&Token::Arrow) {
            Ok(Self::Arr(Box::new(a), Box::new(Self::parse(p)?)))
        } else {
            Ok(a)
        }
    }
}

impl<'s> Type<&'s str> {
    fn parse_arg(p: &mut Parser<'s>) -> Result<Self> {
        match p.peek().cloned() {
            Some(Token::Bool) => {
                p.bump();
                Ok(Self::Bool)
            }
            Some(Token::TyVar(x)) => {
                p.bump();
                Ok(Self::Var(x))
            }
            Some(Token::LPar) => {
                p.bump();
                let ty = Self::parse(p)?;
                p.expect(Token::RPar, Expected::RPar)?;
                Ok(ty)
            }
            Some(Token::Forall) => {
                p.bump();
                let mut xs = Vec::from([p.tyvar()?]);
                while p.eat(&Token::Comma) {
                    xs.push(p.tyvar()?)
                }
                p.expect(Token::Dot, Expected::Dot)?;
                let body = Self::parse(p)?;
                // the first variable becomes the outermost quantifier
                let all = |acc, x| Self::All(x, Box::new(acc));
                Ok(xs.into_iter().rev().fold(body, all))
            }
            _ => Err(p.err(Expected::Type)),
        }
    }
}

impl<'s> Parse<'s> for Context<&'s str> {
    fn parse(p: &mut Parser<'s>) -> Result<Self> {
        let mut ctx = Vec::new();
        while let Some(tok) = p.peek().cloned() {
            match tok {
                Token::Var(x) => {
                    p.bump();
                    let ty = if p.eat(&Token::Colon) {
                        Some(Type::parse(p)?)
                    } else {
                        None
                    };
                    ctx.push((x, Binding::Var(ty)))
                }
                Token::TyVar(x) => {
                    p.bump();
                    ctx.push((x, Binding::TyVar))
                }
                _ => return Err(p.err(Expected::Binding)),
            }
            if !p.eat(&Token::Comma) {
                break;
            }
        }
        Ok(ctx)
    }
}

#[cfg(test)]
fn pos(row: usize, col: usize) -> Pos {
    Pos { row, col }
}

#[cfg(test)]
fn error(expected: Expected, row: usize, col: usize) -> Error {
    let pos = pos(row, col);
    Error { expected, pos }
}

#[test]
fn positive() -> Result<()> {
    use alloc::string::ToString;
    let parse = |s| Term::parse_str(s).map(|tm| tm.to_string());
    assert_eq!(parse("λx: Bool. x")?, "(λx: Bool. x)");
    assert_eq!(parse("f x y")?, "((f x) y)");
    assert_eq!(parse("f (x y)")?, "(f (x y))");
    assert_eq!(parse("f [Bool] x")?, "((f [Bool]) x)");
    assert_eq!(parse("f λx. x")?, "(f (λx. x))");
    assert_eq!(parse("ΛX. λx: X. x")?, "(ΛX. (λx: X. x))");
    assert_eq!(parse("let id = λx. x in id true")?, "(let id = (λx. x) in (id true))");
    assert_eq!(parse("if b then x else y z")?, "(if b then x else (y z))");
    assert_eq!(parse("((x))")?, "x");
    Ok(())
}

#[test]
fn types() -> Result<()> {
    use alloc::string::ToString;
    let parse = |s| Type::parse_str(s).map(|ty| ty.to_string());
    assert_eq!(parse("A → B → C")?, "A → B → C");
    assert_eq!(parse("(A → B) → C")?, "(A → B) → C");
    assert_eq!(parse("∀X, Y. X → Y")?, "∀X. ∀Y. X → Y");
    assert_eq!(parse("(∀X. X) → Bool")?, "(∀X. X) → Bool");
    assert_eq!(parse("A → ∀X. X")?, "A → ∀X. X");
    Ok(())
}

#[test]
fn contexts() -> Result<()> {
    assert_eq!(Context::parse_str("")?, Vec::new());
    assert_eq!(Context::parse_str("  ")?, Vec::new());
    let ctx = Context::parse_str("X, x: X, y,")?;
    let expected = [
        ("X", Binding::TyVar),
        ("x", Binding::Var(Some(Type::Var("X")))),
        ("y", Binding::Var(None)),
    ];
    assert_eq!(ctx, expected);
    Ok(())
}

#[test]
fn positions() -> Result<()> {
    let tm = Term::parse_str("f\n  (λx. x)")?;
    let Term::App(p, _, arg) = tm else { panic!("expected application") };
    assert_eq!(p, pos(1, 1));
    assert_eq!(arg.pos(), pos(2, 4));
    Ok(())
}

#[test]
fn negative() {
    use Expected::*;
    assert_eq!(crate::term::Term::parse_str("").unwrap_err(), error(Term, 1, 1));
    assert_eq!(crate::term::Term::parse_str("x )").unwrap_err(), error(End, 1, 3));
    assert_eq!(crate::term::Term::parse_str("(x").unwrap_err(), error(RPar, 1, 3));
    assert_eq!(crate::term::Term::parse_str("λ. x").unwrap_err(), error(Ident, 1, 2));
    assert_eq!(crate::term::Term::parse_str("λx x").unwrap_err(), error(Dot, 1, 4));
    assert_eq!(crate::term::Term::parse_str("let x = y x").unwrap_err(), error(In, 1, 12));
    assert_eq!(crate::term::Term::parse_str("x\n[Bool").unwrap_err(), error(RBrk, 2, 6));
    assert_eq!(crate::term::Type::parse_str("A →").unwrap_err(), error(Type, 1, 4));
    assert_eq!(crate::term::Type::parse_str("∀x. x").unwrap_err(), error(TyIdent, 1, 2));
    assert_eq!(crate::term::Type::parse_str("A B").unwrap_err(), error(End, 1, 3));
    assert_eq!(Context::parse_str(", x").unwrap_err(), error(Binding, 1, 1));
    assert_eq!(Context::parse_str("x y").unwrap_err(), error(End, 1, 3));
}
