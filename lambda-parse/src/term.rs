//! Surface syntax with named variables.

use alloc::{boxed::Box, vec::Vec};
use core::fmt::{self, Display};

/// Position of a token in the (preprocessed) input, starting from 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type<S> {
    /// Type identifier, either bound by a quantifier/context or free
    Var(S),
    Bool,
    /// Arrow (`A → B`)
    Arr(Box<Self>, Box<Self>),
    /// Universal quantification (`∀X. A`)
    All(S, Box<Self>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term<S> {
    Var(Pos, S),
    /// Abstraction (`λx: A. t`), possibly without type annotation
    Abs(Pos, S, Option<Type<S>>, Box<Self>),
    App(Pos, Box<Self>, Box<Self>),
    If(Pos, Box<Self>, Box<Self>, Box<Self>),
    /// Type abstraction (`ΛX. t`)
    TyAbs(Pos, S, Box<Self>),
    /// Type application (`t [A]`)
    TyApp(Pos, Box<Self>, Type<S>),
    Let(Pos, S, Box<Self>, Box<Self>),
    Const(Pos, bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding<S> {
    /// Term variable, possibly with a type
    Var(Option<Type<S>>),
    /// Type variable
    TyVar,
}

/// Sequence of bindings, where the last element is the most recently bound one.
pub type Context<S> = Vec<(S, Binding<S>)>;

impl<S> Term<S> {
    pub fn pos(&self) -> Pos {
        match self {
            Self::Var(p, ..)
            | Self::Abs(p, ..)
            | Self::App(p, ..)
            | Self::If(p, ..)
            | Self::TyAbs(p, ..)
            | Self::TyApp(p, ..)
            | Self::Let(p, ..)
            | Self::Const(p, ..) => *p,
        }
    }
}

impl<S: Display> Display for Type<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(x) => x.fmt(f),
            Self::Bool => "Bool".fmt(f),
            Self::Arr(a, b) if matches!(**a, Self::Arr(..) | Self::All(..)) => {
                write!(f, "({}) → {}", a, b)
            }
            Self::Arr(a, b) => write!(f, "{} → {}", a, b),
            Self::All(x, a) => write!(f, "∀{}. {}", x, a),
        }
    }
}

impl<S: Display> Display for Term<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(_, x) => x.fmt(f),
            Self::Const(_, b) => b.fmt(f),
            Self::Abs(_, x, Some(ty), t) => write!(f, "(λ{}: {}. {})", x, ty, t),
            Self::Abs(_, x, None, t) => write!(f, "(λ{}. {})", x, t),
            Self::App(_, t, u) => write!(f, "({} {})", t, u),
            Self::If(_, c, t, e) => write!(f, "(if {} then {} else {})", c, t, e),
            Self::TyAbs(_, x, t) => write!(f, "(Λ{}. {})", x, t),
            Self::TyApp(_, t, ty) => write!(f, "({} [{}])", t, ty),
            Self::Let(_, x, e, t) => write!(f, "(let {} = {} in {})", x, e, t),
        }
    }
}

impl<S: Display> Display for Binding<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(Some(ty)) => write!(f, ": {}", ty),
            Self::Var(None) | Self::TyVar => Ok(()),
        }
    }
}
