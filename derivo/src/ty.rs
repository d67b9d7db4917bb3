//! Types with de Bruijn indices.

use std::collections::BTreeSet;

/// A type.
///
/// Bound type variables are represented by a de Bruijn index together with
/// the length of the context they live in.
/// The difference of the two numbers identifies the binder of the variable
/// relative to the root of its context, see [`level`].
/// This allows comparing variables of types that live in different contexts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// Free type name, serving as unification variable
    Name(String),
    /// Bound type variable, with index and length of its enclosing context
    Var(usize, usize),
    /// Arrow (`A → B`)
    Arr(Box<Self>, Box<Self>),
    /// Universal quantification (`∀X. A`), carrying the name of `X` for printing
    All(String, Box<Self>),
    Bool,
}

/// Position of the binder of the variable `(x, n)`, counted from the context root.
pub fn level(x: usize, n: usize) -> isize {
    n as isize - x as isize - 1
}

/// Add a signed offset to an index or a context length.
///
/// The result must not be negative.
/// Types that may refer to removed binders are shifted down with [`Type::unshift`].
pub(crate) fn offset(x: usize, d: isize) -> usize {
    let y = x.checked_add_signed(d);
    debug_assert!(y.is_some(), "shifting {} by {} leaves the context", x, d);
    y.unwrap_or_default()
}

impl Type {
    pub fn name(x: impl Into<String>) -> Self {
        Self::Name(x.into())
    }

    pub fn arr(a: Self, b: Self) -> Self {
        Self::Arr(Box::new(a), Box::new(b))
    }

    /// Rebuild the type, replacing variables with `on_var` and names with `on_name`.
    ///
    /// Both functions receive the number of quantifiers passed so far, starting from `c`.
    pub fn map<V, N>(&self, c: usize, on_var: V, on_name: N) -> Self
    where
        V: Copy + Fn(usize, usize, usize) -> Self,
        N: Copy + Fn(usize, &str) -> Self,
    {
        match self {
            Self::Var(x, n) => on_var(c, *x, *n),
            Self::Name(x) => on_name(c, x),
            Self::Bool => Self::Bool,
            Self::Arr(a, b) => Self::arr(a.map(c, on_var, on_name), b.map(c, on_var, on_name)),
            Self::All(x, a) => Self::All(x.clone(), Box::new(a.map(c + 1, on_var, on_name))),
        }
    }

    /// Add `d` to all variables with index at least `c`.
    ///
    /// The context length of every variable changes by `d`.
    pub fn shift_above(&self, d: isize, c: usize) -> Self {
        self.map(
            c,
            |c, x, n| {
                let x = if x >= c { offset(x, d) } else { x };
                Self::Var(x, offset(n, d))
            },
            |_, y| Self::name(y),
        )
    }

    pub fn shift(&self, d: isize) -> Self {
        self.shift_above(d, 0)
    }

    /// Remove the `d` most recent binders from the context of the type.
    ///
    /// Return `None` if the type refers to one of the removed binders.
    pub fn unshift(&self, d: usize) -> Option<Self> {
        match self.min_free_var() {
            Some(x) if x < d => None,
            _ => Some(self.shift(-(d as isize))),
        }
    }

    /// Replace the variable with index `j` by `s`.
    pub fn subst(&self, j: usize, s: &Self) -> Self {
        self.map(
            j,
            |j, x, n| {
                if x == j {
                    s.shift(j as isize)
                } else {
                    Self::Var(x, n)
                }
            },
            |_, y| Self::name(y),
        )
    }

    /// Replace the variable with index 0 by `s` and remove its binder.
    pub fn subst_top(&self, s: &Self) -> Self {
        self.subst(0, &s.shift(1)).shift(-1)
    }

    /// Replace the free name `x` by `s`.
    pub fn subst_name(&self, x: &str, s: &Self) -> Self {
        self.map(
            0,
            |_, y, n| Self::Var(y, n),
            |c, y| {
                if y == x {
                    s.shift(c as isize)
                } else {
                    Self::name(y)
                }
            },
        )
    }

    /// Replace the free name `x` by the variable bound just outside the type.
    ///
    /// `len` is the length of the context of that binder.
    pub(crate) fn bind_name(&self, x: &str, len: usize) -> Self {
        self.map(
            0,
            |_, y, n| Self::Var(y, n),
            |c, y| {
                if y == x {
                    Self::Var(c, len + 1 + c)
                } else {
                    Self::name(y)
                }
            },
        )
    }

    /// Return the free type names.
    pub fn ftv(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.ftv_into(&mut names);
        names
    }

    pub(crate) fn ftv_into(&self, names: &mut BTreeSet<String>) {
        match self {
            Self::Name(x) => {
                names.insert(x.clone());
            }
            Self::Var(..) | Self::Bool => (),
            Self::Arr(a, b) => {
                a.ftv_into(names);
                b.ftv_into(names)
            }
            Self::All(_, a) => a.ftv_into(names),
        }
    }

    /// Replace the outermost quantifier `∀X. A` by `A` with the free name `x` for `X`.
    ///
    /// Return `None` if the type is not quantified.
    pub fn degeneralize_top(&self, x: &str) -> Option<Self> {
        match self {
            Self::All(_, a) => Some(a.subst_top(&Self::name(x))),
            _ => None,
        }
    }

    /// Quantify over the free name `x`, yielding `∀x. A`.
    ///
    /// `len` is the length of the context of the type.
    /// This is the inverse of [`Self::degeneralize_top`].
    pub fn generalize_top(&self, len: usize, x: &str) -> Self {
        Self::All(x.into(), Box::new(self.shift(1).bind_name(x, len)))
    }

    /// Return true if the type contains no quantifier.
    pub fn is_mono(&self) -> bool {
        match self {
            Self::Name(_) | Self::Var(..) | Self::Bool => true,
            Self::Arr(a, b) => a.is_mono() && b.is_mono(),
            Self::All(..) => false,
        }
    }

    /// Return true if all quantifiers of the type are outermost.
    pub fn is_prenex(&self) -> bool {
        match self {
            Self::All(_, a) => a.is_prenex(),
            ty => ty.is_mono(),
        }
    }

    /// Return true if the type contains the variable that has index `i` outside the type.
    pub fn has_var(&self, i: usize) -> bool {
        match self {
            Self::Var(x, _) => *x == i,
            Self::Name(_) | Self::Bool => false,
            Self::Arr(a, b) => a.has_var(i) || b.has_var(i),
            Self::All(_, a) => a.has_var(i + 1),
        }
    }

    /// Return the smallest index of a variable bound outside the type.
    pub fn min_free_var(&self) -> Option<usize> {
        self.min_free_var_at(0)
    }

    fn min_free_var_at(&self, depth: usize) -> Option<usize> {
        match self {
            Self::Var(x, _) => x.checked_sub(depth),
            Self::Name(_) | Self::Bool => None,
            Self::Arr(a, b) => {
                let (a, b) = (a.min_free_var_at(depth), b.min_free_var_at(depth));
                a.into_iter().chain(b).min()
            }
            Self::All(_, a) => a.min_free_var_at(depth + 1),
        }
    }

    /// Equality up to names of quantified variables.
    pub fn alpha_eq(&self, other: &Self) -> bool {
        self.alpha_eq_at(other, 0)
    }

    /// Equality up to names of quantified variables, under `depth` binders.
    ///
    /// Variables bound below `depth` are compared by index,
    /// the others by the level of their binder.
    pub(crate) fn alpha_eq_at(&self, other: &Self, depth: usize) -> bool {
        match (self, other) {
            (Self::Name(x), Self::Name(y)) => x == y,
            (Self::Var(x, n), Self::Var(y, m)) => {
                if *x < depth || *y < depth {
                    x == y
                } else {
                    level(*x, *n) == level(*y, *m)
                }
            }
            (Self::Bool, Self::Bool) => true,
            (Self::Arr(a1, b1), Self::Arr(a2, b2)) => {
                a1.alpha_eq_at(a2, depth) && b1.alpha_eq_at(b2, depth)
            }
            (Self::All(_, a1), Self::All(_, a2)) => a1.alpha_eq_at(a2, depth + 1),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(x: &str) -> Type {
        Type::name(x)
    }

    fn arr(a: Type, b: Type) -> Type {
        Type::arr(a, b)
    }

    fn all(x: &str, a: Type) -> Type {
        Type::All(x.into(), Box::new(a))
    }

    #[test]
    fn shift() {
        // in context [X, Y]: ∀Z. Z → X
        let ty = all("Z", arr(Type::Var(0, 3), Type::Var(2, 3)));
        let shifted = all("Z", arr(Type::Var(0, 4), Type::Var(3, 4)));
        assert_eq!(ty.shift(1), shifted);
        assert_eq!(ty.shift(1).shift(-1), ty);
        assert_eq!(ty.shift(0), ty);
    }

    #[test]
    fn unshift() {
        // in context [X, Y]: ∀Z. Z → X
        let ty = all("Z", arr(Type::Var(0, 3), Type::Var(2, 3)));
        assert_eq!(ty.min_free_var(), Some(1));
        assert_eq!(ty.unshift(1), Some(all("Z", arr(Type::Var(0, 2), Type::Var(1, 2)))));
        // X is bound by the second binder to remove
        assert_eq!(ty.unshift(2), None);
        assert_eq!(Type::Bool.unshift(5), Some(Type::Bool));
    }

    #[test]
    fn subst_top() {
        // in context [X, Y]: Y → X, replace Y by X → Bool
        let ty = arr(Type::Var(0, 2), Type::Var(1, 2));
        let s = arr(Type::Var(0, 1), Type::Bool);
        let expected = arr(arr(Type::Var(0, 1), Type::Bool), Type::Var(0, 1));
        assert_eq!(ty.subst_top(&s), expected);
    }

    #[test]
    fn subst_under_binder() {
        // in context [X]: ∀Y. X → Y, replace X by A
        let ty = all("Y", arr(Type::Var(1, 2), Type::Var(0, 2)));
        let expected = all("Y", arr(name("A"), Type::Var(0, 1)));
        assert_eq!(ty.subst_top(&name("A")), expected);
    }

    #[test]
    fn subst_name() {
        // in context [X]: ∀Y. A → Y, replace A by X
        let ty = all("Y", arr(name("A"), Type::Var(0, 2)));
        let expected = all("Y", arr(Type::Var(1, 2), Type::Var(0, 2)));
        assert_eq!(ty.subst_name("A", &Type::Var(0, 1)), expected);
    }

    #[test]
    fn generalize() {
        let ty = arr(name("A"), arr(name("B"), name("A")));
        let gen = ty.generalize_top(0, "A");
        let expected = all("A", arr(Type::Var(0, 1), arr(name("B"), Type::Var(0, 1))));
        assert_eq!(gen, expected);
        assert_eq!(gen.degeneralize_top("A"), Some(ty));
        assert_eq!(name("A").degeneralize_top("A"), None);
    }

    #[test]
    fn ftv() {
        let ty = all("X", arr(name("A"), arr(Type::Var(0, 1), name("B"))));
        assert_eq!(ty.ftv().into_iter().collect::<Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn prenex() {
        let id = all("X", arr(Type::Var(0, 1), Type::Var(0, 1)));
        assert!(id.is_prenex());
        assert!(!id.is_mono());
        assert!(!arr(Type::Bool, id).is_prenex());
    }

    #[test]
    fn alpha_eq() {
        let x = all("X", Type::Var(0, 1));
        let y = all("Y", Type::Var(0, 2));
        assert!(x.alpha_eq(&y));
        // the same context variable, seen from contexts of different lengths
        assert!(Type::Var(0, 1).alpha_eq(&Type::Var(1, 2)));
        assert!(!Type::Var(0, 2).alpha_eq(&Type::Var(1, 2)));
        assert!(!name("A").alpha_eq(&name("B")));
    }
}
