//! Terms with de Bruijn indices.

use crate::ty::{level, offset};
use crate::Type;
use std::collections::BTreeSet;

pub use lambda_parse::Pos;

/// A term.
///
/// Term and type variables share one index space:
/// the index of a variable counts all binders between it and its binder,
/// be they term or type binders.
/// Every term carries the position where it starts in the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// Variable, with index and length of its enclosing context
    Var(Pos, usize, usize),
    /// Abstraction (`λx: A. t`), possibly without type annotation
    Abs(Pos, String, Option<Type>, Box<Self>),
    App(Pos, Box<Self>, Box<Self>),
    If(Pos, Box<Self>, Box<Self>, Box<Self>),
    /// Type abstraction (`ΛX. t`)
    TyAbs(Pos, String, Box<Self>),
    /// Type application (`t [A]`)
    TyApp(Pos, Box<Self>, Type),
    Let(Pos, String, Box<Self>, Box<Self>),
    Const(Pos, bool),
}

impl Term {
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

    /// Rebuild the term, replacing variables with `on_var` and types with `on_type`.
    ///
    /// Both functions receive the number of binders passed so far, starting from `c`.
    pub fn map<V, T>(&self, c: usize, on_var: V, on_type: T) -> Self
    where
        V: Copy + Fn(usize, Pos, usize, usize) -> Self,
        T: Copy + Fn(usize, &Type) -> Type,
    {
        let map = |tm: &Self, c| Box::new(tm.map(c, on_var, on_type));
        match self {
            Self::Var(p, x, n) => on_var(c, *p, *x, *n),
            Self::Abs(p, x, ty, t) => {
                let ty = ty.as_ref().map(|ty| on_type(c, ty));
                Self::Abs(*p, x.clone(), ty, map(t, c + 1))
            }
            Self::App(p, t, u) => Self::App(*p, map(t, c), map(u, c)),
            Self::If(p, i, t, e) => Self::If(*p, map(i, c), map(t, c), map(e, c)),
            Self::TyAbs(p, x, t) => Self::TyAbs(*p, x.clone(), map(t, c + 1)),
            Self::TyApp(p, t, ty) => Self::TyApp(*p, map(t, c), on_type(c, ty)),
            Self::Let(p, x, e, t) => Self::Let(*p, x.clone(), map(e, c), map(t, c + 1)),
            Self::Const(..) => self.clone(),
        }
    }

    /// Add `d` to all term and type variables with index at least `c`.
    pub fn shift_above(&self, d: isize, c: usize) -> Self {
        self.map(
            c,
            |c, p, x, n| {
                let x = if x >= c { offset(x, d) } else { x };
                Self::Var(p, x, offset(n, d))
            },
            |c, ty| ty.shift_above(d, c),
        )
    }

    pub fn shift(&self, d: isize) -> Self {
        self.shift_above(d, 0)
    }

    /// Replace the term variable with index `j` by `s`.
    pub fn subst(&self, j: usize, s: &Self) -> Self {
        self.map(
            j,
            |j, p, x, n| {
                if x == j {
                    s.shift(j as isize)
                } else {
                    Self::Var(p, x, n)
                }
            },
            |_, ty| ty.clone(),
        )
    }

    /// Replace the term variable with index 0 by `s` and remove its binder.
    pub fn subst_top(&self, s: &Self) -> Self {
        self.subst(0, &s.shift(1)).shift(-1)
    }

    /// Replace the type variable with index `j` by `s` in all types of the term.
    pub fn subst_ty(&self, j: usize, s: &Type) -> Self {
        self.map(j, |_, p, x, n| Self::Var(p, x, n), |j, ty| ty.subst(j, s))
    }

    /// Replace the type variable with index 0 by `s` and remove its binder.
    pub fn subst_ty_top(&self, s: &Type) -> Self {
        self.subst_ty(0, &s.shift(1)).shift(-1)
    }

    /// Return the free type names occurring in annotations and type arguments.
    pub fn type_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.type_names_into(&mut names);
        names
    }

    fn type_names_into(&self, names: &mut BTreeSet<String>) {
        match self {
            Self::Var(..) | Self::Const(..) => (),
            Self::Abs(_, _, ty, t) => {
                ty.iter().for_each(|ty| ty.ftv_into(names));
                t.type_names_into(names)
            }
            Self::App(_, t, u) => {
                t.type_names_into(names);
                u.type_names_into(names)
            }
            Self::If(_, i, t, e) => [i, t, e].iter().for_each(|t| t.type_names_into(names)),
            Self::TyAbs(_, _, t) => t.type_names_into(names),
            Self::TyApp(_, t, ty) => {
                t.type_names_into(names);
                ty.ftv_into(names)
            }
            Self::Let(_, _, e, t) => {
                e.type_names_into(names);
                t.type_names_into(names)
            }
        }
    }

    /// Equality up to positions and names of bound variables.
    pub fn alpha_eq(&self, other: &Self) -> bool {
        self.alpha_eq_at(other, 0)
    }

    fn alpha_eq_at(&self, other: &Self, depth: usize) -> bool {
        let ty_eq = |a: &Type, b: &Type| a.alpha_eq_at(b, depth);
        match (self, other) {
            (Self::Var(_, x, n), Self::Var(_, y, m)) => {
                if *x < depth || *y < depth {
                    x == y
                } else {
                    level(*x, *n) == level(*y, *m)
                }
            }
            (Self::Abs(_, _, ty1, t1), Self::Abs(_, _, ty2, t2)) => {
                let ty_eq = match (ty1, ty2) {
                    (Some(ty1), Some(ty2)) => ty_eq(ty1, ty2),
                    (None, None) => true,
                    _ => false,
                };
                ty_eq && t1.alpha_eq_at(t2, depth + 1)
            }
            (Self::App(_, t1, u1), Self::App(_, t2, u2)) => {
                t1.alpha_eq_at(t2, depth) && u1.alpha_eq_at(u2, depth)
            }
            (Self::If(_, i1, t1, e1), Self::If(_, i2, t2, e2)) => {
                i1.alpha_eq_at(i2, depth) && t1.alpha_eq_at(t2, depth) && e1.alpha_eq_at(e2, depth)
            }
            (Self::TyAbs(_, _, t1), Self::TyAbs(_, _, t2)) => t1.alpha_eq_at(t2, depth + 1),
            (Self::TyApp(_, t1, ty1), Self::TyApp(_, t2, ty2)) => {
                t1.alpha_eq_at(t2, depth) && ty_eq(ty1, ty2)
            }
            (Self::Let(_, _, e1, t1), Self::Let(_, _, e2, t2)) => {
                e1.alpha_eq_at(e2, depth) && t1.alpha_eq_at(t2, depth + 1)
            }
            (Self::Const(_, b1), Self::Const(_, b2)) => b1 == b2,
            _ => false,
        }
    }
}
