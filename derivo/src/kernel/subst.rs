//! Substitutions of free type names.

use crate::Type;

/// Substitution of free type names by types, most recent binding first.
///
/// Applying a substitution applies its bindings from the last to the first,
/// so that bindings added later take effect after earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subst(Vec<(Type, String)>);

impl Subst {
    pub fn new() -> Self {
        Default::default()
    }

    /// Substitution replacing only `x` by `ty`.
    pub fn single(x: impl Into<String>, ty: Type) -> Self {
        Self(Vec::from([(ty, x.into())]))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &(Type, String)> {
        self.0.iter()
    }

    /// Names replaced by the substitution.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, x)| x.as_str())
    }

    pub fn apply(&self, ty: &Type) -> Type {
        let apply = |ty: Type, (s, x): &(Type, String)| ty.subst_name(x, s);
        self.0.iter().rev().fold(ty.clone(), apply)
    }

    /// Return the substitution that applies `earlier`, then `self`.
    pub fn compose(self, earlier: Self) -> Self {
        let mut bindings = self.0;
        bindings.extend(earlier.0);
        Self(bindings)
    }

    /// Shift all types of the substitution by `d`.
    pub fn shift(&self, d: isize) -> Self {
        self.0.iter().map(|(ty, x)| (ty.shift(d), x.clone())).collect()
    }

    /// Return the substitution without the bindings of the given names.
    ///
    /// The bindings of the result no longer depend on each other,
    /// so names bound by the remaining bindings keep their images.
    pub fn without(&self, names: &[String]) -> Self {
        let domain = self.domain().filter(|x| !names.iter().any(|n| n == *x));
        domain.map(|x| (self.apply(&Type::name(x)), x.to_string())).collect()
    }

    /// Return true if some type of the substitution refers to the variable with index `i`.
    pub fn has_var(&self, i: usize) -> bool {
        self.0.iter().any(|(ty, _)| ty.has_var(i))
    }
}

impl FromIterator<(Type, String)> for Subst {
    fn from_iter<I: IntoIterator<Item = (Type, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose() {
        let ab = Subst::single("A", Type::name("B"));
        let b_bool = Subst::single("B", Type::Bool);
        let ty = Type::arr(Type::name("A"), Type::name("B"));

        // replace A by B, then B by Bool
        let s = b_bool.clone().compose(ab.clone());
        assert_eq!(s.apply(&ty), Type::arr(Type::Bool, Type::Bool));
        assert_eq!(s.domain().collect::<Vec<_>>(), ["B", "A"]);

        // replace B by Bool, then A by B
        let s = ab.compose(b_bool);
        assert_eq!(s.apply(&ty), Type::arr(Type::name("B"), Type::Bool));
    }

    #[test]
    fn without() {
        // replace X by Bool, then A by X
        let s = Subst::single("A", Type::name("X")).compose(Subst::single("X", Type::Bool));
        let s = Subst::single("B", Type::name("X")).compose(s);
        let expected: Subst = [(Type::name("X"), "B".into()), (Type::name("X"), "A".into())]
            .into_iter()
            .collect();
        assert_eq!(s.without(&["X".into()]), expected);

        let s = Subst::single("X", Type::Bool).compose(Subst::single("A", Type::name("X")));
        assert_eq!(s.without(&["X".into()]), Subst::single("A", Type::Bool));
    }

    #[test]
    fn under_binder() {
        // in context [X]: replace A by X in ∀Y. A → Y
        let ty = Type::All("Y".into(), Box::new(Type::arr(Type::name("A"), Type::Var(0, 2))));
        let s = Subst::single("A", Type::Var(0, 1));
        let expected = Type::arr(Type::Var(1, 2), Type::Var(0, 2));
        assert_eq!(s.apply(&ty), Type::All("Y".into(), Box::new(expected)));
        assert!(s.has_var(0));
        assert!(!s.shift(1).has_var(0));
    }
}
