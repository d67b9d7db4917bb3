//! Scoping of parse structures to terms and types with de Bruijn indices.

use crate::{Binding, Context, Stack, Term, Type};
use core::fmt::{self, Display};
use lambda_parse::{self as parse, preprocess, Parse, Pos};

/// Scoping error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// term variable that is bound neither in the term nor in the context
    Unbound(String, Pos),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unbound(x, pos) => write!(f, "unbound variable {} at {}", x, pos),
        }
    }
}

/// Kind of a bound name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Term,
    Type,
}

type Bound<'s> = Stack<(&'s str, Kind)>;

impl From<&Binding> for Kind {
    fn from(b: &Binding) -> Self {
        match b {
            Binding::Name | Binding::Var(_) => Self::Term,
            Binding::TyVar => Self::Type,
        }
    }
}

fn bound_of(ctx: &Context) -> Bound {
    ctx.iter().rev().map(|(x, b)| (x.as_str(), Kind::from(b))).collect()
}

fn position(bnd: &Bound, x: &str, kind: Kind) -> Option<usize> {
    bnd.iter().position(|(y, k)| *y == x && *k == kind)
}

fn scope_type<'s>(ty: parse::Type<&'s str>, bnd: &mut Bound<'s>) -> Type {
    use parse::Type::*;
    match ty {
        Var(x) => match position(bnd, x, Kind::Type) {
            Some(i) => Type::Var(i, bnd.len()),
            None => Type::name(x),
        },
        Bool => Type::Bool,
        Arr(a, b) => Type::arr(scope_type(*a, bnd), scope_type(*b, bnd)),
        All(x, a) => {
            let a = bnd.with_pushed((x, Kind::Type), |bnd| scope_type(*a, bnd));
            Type::All(x.to_string(), Box::new(a))
        }
    }
}

/// Scope an open term using supplied bound variables.
fn scope_term<'s>(tm: parse::Term<&'s str>, bnd: &mut Bound<'s>) -> Result<Term, Error> {
    use parse::Term::*;
    let scoper = |tm: Box<parse::Term<&'s str>>, bnd: &mut Bound<'s>| {
        scope_term(*tm, bnd).map(Box::new)
    };
    match tm {
        Var(p, x) => match position(bnd, x, Kind::Term) {
            Some(i) => Ok(Term::Var(p, i, bnd.len())),
            None => Err(Error::Unbound(x.to_string(), p)),
        },
        Const(p, b) => Ok(Term::Const(p, b)),
        Abs(p, x, ty, t) => {
            let ty = ty.map(|ty| scope_type(ty, bnd));
            let t = bnd.with_pushed((x, Kind::Term), |bnd| scoper(t, bnd))?;
            Ok(Term::Abs(p, x.to_string(), ty, t))
        }
        App(p, t, u) => Ok(Term::App(p, scoper(t, bnd)?, scoper(u, bnd)?)),
        If(p, c, t, e) => {
            let (c, t, e) = (scoper(c, bnd)?, scoper(t, bnd)?, scoper(e, bnd)?);
            Ok(Term::If(p, c, t, e))
        }
        TyAbs(p, x, t) => {
            let t = bnd.with_pushed((x, Kind::Type), |bnd| scoper(t, bnd))?;
            Ok(Term::TyAbs(p, x.to_string(), t))
        }
        TyApp(p, t, ty) => Ok(Term::TyApp(p, scoper(t, bnd)?, scope_type(ty, bnd))),
        Let(p, x, e, t) => {
            let e = scoper(e, bnd)?;
            let t = bnd.with_pushed((x, Kind::Term), |bnd| scoper(t, bnd))?;
            Ok(Term::Let(p, x.to_string(), e, t))
        }
    }
}

/// Scope a parsed context, where every type is scoped in the bindings before it.
fn scope_context(ctx: parse::Context<&str>) -> Context {
    let mut bnd = Stack::new();
    let mut bindings = Vec::with_capacity(ctx.len());
    for (x, b) in ctx {
        let b = match b {
            parse::Binding::Var(Some(ty)) => Binding::Var(scope_type(ty, &mut bnd)),
            parse::Binding::Var(None) => Binding::Name,
            parse::Binding::TyVar => Binding::TyVar,
        };
        bnd.push((x, Kind::from(&b)));
        bindings.push((x.to_string(), b));
    }
    bindings.into_iter().collect()
}

impl Context {
    /// Parse a context such as `x: Bool, X, f: X -> X, y`.
    ///
    /// ~~~
    /// # use derivo::{Binding, Context, Error, Type};
    /// let ctx = Context::parse("X, x: X")?;
    /// assert_eq!(ctx.get(0), Some(&("x".to_string(), Binding::Var(Type::Var(0, 1)))));
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let s = preprocess(s);
        Ok(scope_context(parse::Context::parse_str(&s)?))
    }
}

impl Term {
    /// Parse a term in a context.
    pub fn parse(s: &str, ctx: &Context) -> Result<Self, crate::Error> {
        let s = preprocess(s);
        let tm = parse::Term::parse_str(&s)?;
        let tm = scope_term(tm, &mut bound_of(ctx))?;
        Ok(tm)
    }
}

impl Type {
    /// Parse a type in a context.
    ///
    /// Type identifiers that are not bound become free names.
    pub fn parse(s: &str, ctx: &Context) -> Result<Self, crate::Error> {
        let s = preprocess(s);
        let ty = parse::Type::parse_str(&s)?;
        let ty = scope_type(ty, &mut bound_of(ctx));
        Ok(ty)
    }
}
