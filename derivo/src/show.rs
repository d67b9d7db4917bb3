//! Printing of terms and types relative to a context.
//!
//! Variables are printed with the names of their binders.
//! Binders whose names would capture other names are renamed
//! by appending a number.
//! Variables that point outside their context are printed as `β{i}`.

use crate::kernel::Subst;
use crate::{Binding, Context, Term, Type};
use core::fmt::{self, Display};
use std::collections::BTreeSet;

/// Names of bound variables and free names that binders must avoid.
pub struct Names {
    /// bound names, the most recent one last
    bound: Vec<String>,
    taken: BTreeSet<String>,
}

impl Names {
    fn new(ctx: &Context, taken: BTreeSet<String>) -> Self {
        let bound = ctx.iter().rev().map(|(x, _)| x.clone()).collect();
        Self { bound, taken }
    }

    fn var(&self, f: &mut fmt::Formatter, x: usize) -> fmt::Result {
        match self.bound.len().checked_sub(x + 1) {
            Some(i) => self.bound[i].fmt(f),
            None => write!(f, "β{{{}}}", x),
        }
    }

    /// Return a variant of `x` that neither is bound nor taken.
    fn fresh(&self, x: &str) -> String {
        let clash = |y: &String| self.bound.contains(y) || self.taken.contains(y);
        let mut y = x.to_string();
        let mut i = 0;
        while clash(&y) {
            i += 1;
            y = format!("{}{}", x, i);
        }
        y
    }

    /// Print `x` as binder, run `g` under the binder, then remove the binder.
    fn bind<G>(&mut self, f: &mut fmt::Formatter, x: &str, g: G) -> fmt::Result
    where
        G: FnOnce(&mut Self, &mut fmt::Formatter) -> fmt::Result,
    {
        let x = self.fresh(x);
        x.fmt(f)?;
        self.bound.push(x);
        let y = g(self, f);
        self.bound.pop();
        y
    }
}

/// Things that are printed relative to a context.
pub trait Show {
    fn fmt_names(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result;

    /// Free names that binders must not capture.
    fn free_names(&self) -> BTreeSet<String>;

    /// Display in the given context.
    fn show<'a>(&'a self, ctx: &'a Context) -> Shown<'a, Self> {
        Shown(self, ctx)
    }
}

/// Something paired with the context it is displayed in.
pub struct Shown<'a, T: ?Sized>(&'a T, &'a Context);

impl<'a, T: Show + ?Sized> Display for Shown<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut taken = self.0.free_names();
        taken.extend(self.1.ftv());
        self.0.fmt_names(&mut Names::new(self.1, taken), f)
    }
}

impl Type {
    fn fmt_arg(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Arr(..) | Self::All(..) => {
                write!(f, "(")?;
                self.fmt_names(names, f)?;
                write!(f, ")")
            }
            _ => self.fmt_names(names, f),
        }
    }
}

impl Show for Type {
    fn fmt_names(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Name(x) => x.fmt(f),
            Self::Var(x, _) => names.var(f, *x),
            Self::Bool => "Bool".fmt(f),
            Self::Arr(a, b) => {
                a.fmt_arg(names, f)?;
                write!(f, " → ")?;
                b.fmt_names(names, f)
            }
            Self::All(x, a) => {
                write!(f, "∀")?;
                names.bind(f, x, |names, f| {
                    write!(f, ". ")?;
                    a.fmt_names(names, f)
                })
            }
        }
    }

    fn free_names(&self) -> BTreeSet<String> {
        self.ftv()
    }
}

impl Term {
    /// Print the term as head of an application.
    fn fmt_head(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(..) | Self::Const(..) | Self::App(..) | Self::TyApp(..) => {
                self.fmt_names(names, f)
            }
            _ => self.fmt_parens(names, f),
        }
    }

    /// Print the term as argument of an application.
    fn fmt_arg(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(..) | Self::Const(..) => self.fmt_names(names, f),
            _ => self.fmt_parens(names, f),
        }
    }

    fn fmt_parens(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.fmt_names(names, f)?;
        write!(f, ")")
    }
}

impl Show for Term {
    fn fmt_names(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(_, x, _) => names.var(f, *x),
            Self::Const(_, b) => b.fmt(f),
            Self::Abs(_, x, ty, t) => {
                write!(f, "λ")?;
                if let Some(ty) = ty {
                    // the binder is not yet visible in its type
                    let x = names.fresh(x);
                    write!(f, "{}: ", x)?;
                    ty.fmt_names(names, f)?;
                    names.bound.push(x);
                    write!(f, ". ")?;
                    let y = t.fmt_names(names, f);
                    names.bound.pop();
                    y
                } else {
                    names.bind(f, x, |names, f| {
                        write!(f, ". ")?;
                        t.fmt_names(names, f)
                    })
                }
            }
            Self::App(_, t, u) => {
                t.fmt_head(names, f)?;
                write!(f, " ")?;
                u.fmt_arg(names, f)
            }
            Self::If(_, c, t, e) => {
                write!(f, "if ")?;
                c.fmt_names(names, f)?;
                write!(f, " then ")?;
                t.fmt_names(names, f)?;
                write!(f, " else ")?;
                e.fmt_names(names, f)
            }
            Self::TyAbs(_, x, t) => {
                write!(f, "Λ")?;
                names.bind(f, x, |names, f| {
                    write!(f, ". ")?;
                    t.fmt_names(names, f)
                })
            }
            Self::TyApp(_, t, ty) => {
                t.fmt_head(names, f)?;
                write!(f, " [")?;
                ty.fmt_names(names, f)?;
                write!(f, "]")
            }
            Self::Let(_, x, e, t) => {
                write!(f, "let ")?;
                let x = names.fresh(x);
                write!(f, "{} = ", x)?;
                e.fmt_names(names, f)?;
                write!(f, " in ")?;
                names.bound.push(x);
                let y = t.fmt_names(names, f);
                names.bound.pop();
                y
            }
        }
    }

    fn free_names(&self) -> BTreeSet<String> {
        self.type_names()
    }
}

impl Show for Subst {
    fn fmt_names(&self, names: &mut Names, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (ty, x)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ↦ ", x)?;
            ty.fmt_names(names, f)?;
        }
        write!(f, "}}")
    }

    fn free_names(&self) -> BTreeSet<String> {
        self.iter().flat_map(|(ty, x)| ty.ftv().into_iter().chain([x.clone()])).collect()
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.show(&Context::new()).fmt(f)
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.show(&Context::new()).fmt(f)
    }
}

impl Display for Subst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.show(&Context::new()).fmt(f)
    }
}

impl Display for Context {
    /// Print the bindings starting from the root, such as `x: Bool, X, y`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names = Names::new(&Context::new(), self.ftv());
        for (i, (x, b)) in self.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            x.fmt(f)?;
            if let Binding::Var(ty) = b {
                write!(f, ": ")?;
                ty.fmt_names(&mut names, f)?;
            }
            names.bound.push(x.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(ctx: &Context, tm: &str) -> String {
        let tm = Term::parse(tm, ctx).unwrap();
        let shown = tm.show(ctx).to_string();
        assert!(Term::parse(&shown, ctx).unwrap().alpha_eq(&tm), "{}", shown);
        shown
    }

    #[test]
    fn types() {
        let ctx = Context::new();
        let show = |s| Type::parse(s, &ctx).unwrap().to_string();
        assert_eq!(show("A -> B -> C"), "A → B → C");
        assert_eq!(show("(A -> B) -> C"), "(A → B) → C");
        assert_eq!(show("forall X, Y. X -> Y"), "∀X. ∀Y. X → Y");
        assert_eq!(show("(forall X. X) -> Bool"), "(∀X. X) → Bool");
        // the binder would capture the free name
        assert_eq!(show("forall X. X -> X1 -> X2"), "∀X. X → X1 → X2");
        assert_eq!(show("forall X1. X1 -> X"), "∀X1. X1 → X");
    }

    #[test]
    fn capture() {
        let ty = Type::All("A".into(), Box::new(Type::arr(Type::Var(0, 1), Type::name("A"))));
        assert_eq!(ty.to_string(), "∀A1. A1 → A");
        assert_eq!(Type::Var(0, 1).to_string(), "β{0}");
    }

    #[test]
    fn terms() {
        let ctx = Context::parse("f: Bool -> Bool, X").unwrap();
        assert_eq!(roundtrip(&ctx, r"\x: Bool. f x"), "λx: Bool. f x");
        assert_eq!(roundtrip(&ctx, r"(\x. x) (f true)"), "(λx. x) (f true)");
        assert_eq!(roundtrip(&ctx, r"\f. f"), "λf1. f1");
        assert_eq!(roundtrip(&ctx, r"Lambda Y. \y: Y. y"), "ΛY. λy: Y. y");
        assert_eq!(roundtrip(&ctx, r"Lambda X. \x: X. x"), "ΛX1. λx: X1. x");
        assert_eq!(roundtrip(&ctx, r"(Lambda Y. \y: Y. y) [X -> Bool] f"), "(ΛY. λy: Y. y) [X → Bool] f");
        assert_eq!(roundtrip(&ctx, "let g = f in if g true then f else g"), "let g = f in if g true then f else g");
        assert_eq!(roundtrip(&ctx, r"\x: Bool. \x: Bool. x"), "λx: Bool. λx1: Bool. x1");
    }

    #[test]
    fn contexts() {
        let ctx = Context::parse("x: Bool, X, f: X -> A, y").unwrap();
        assert_eq!(ctx.to_string(), "x: Bool, X, f: X → A, y");
        assert_eq!(Context::new().to_string(), "");
    }

    #[test]
    fn substs() {
        let s = Subst::single("A", Type::Bool).compose(Subst::single("B", Type::name("A")));
        assert_eq!(s.to_string(), "{A ↦ Bool, B ↦ A}");
    }
}
