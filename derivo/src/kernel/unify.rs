//! Unification of types.

use super::{Error, Fresh, Subst};
use crate::ty::level;
use crate::Type;

type Result<T> = core::result::Result<T, Error>;

/// Find a most general substitution making two types equal.
///
/// Free type names act as unification variables.
/// Quantified types are degeneralized, i.e. their quantified variables
/// are replaced by new free names before unification.
pub fn unify(a: &Type, b: &Type) -> Result<Subst> {
    let mut fresh = Fresh::new(a.ftv().into_iter().chain(b.ftv()));
    unify_with(a, b, &mut fresh)
}

/// Unify two types, taking new names from `fresh`.
pub fn unify_with(a: &Type, b: &Type, fresh: &mut Fresh) -> Result<Subst> {
    trace!("unify {} with {}", a, b);
    match (a, b) {
        (Type::Name(x), Type::Name(y)) if x == y => Ok(Subst::new()),
        (Type::Name(x), ty) | (ty, Type::Name(x)) => bind(x, ty),
        (Type::Bool, Type::Bool) => Ok(Subst::new()),
        (Type::Arr(a1, b1), Type::Arr(a2, b2)) => {
            let s1 = unify_with(a1, a2, fresh)?;
            let s2 = unify_with(&s1.apply(b1), &s1.apply(b2), fresh)?;
            Ok(s2.compose(s1))
        }
        (Type::All(x, a1), _) => unify_with(&a1.subst_top(&Type::name(fresh.like(x))), b, fresh),
        (_, Type::All(y, b1)) => unify_with(a, &b1.subst_top(&Type::name(fresh.like(y))), fresh),
        (Type::Var(x, n), Type::Var(y, m)) if level(*x, *n) == level(*y, *m) => Ok(Subst::new()),
        _ => Err(Error::Incompatible(a.clone(), b.clone())),
    }
}

/// Unify two types without instantiating quantifiers.
///
/// A quantified type only unifies with a quantified type,
/// and the substitution unifying their bodies must not refer to the quantified variable.
pub fn unify_rigid(a: &Type, b: &Type) -> Result<Subst> {
    trace!("unify {} rigidly with {}", a, b);
    match (a, b) {
        (Type::Name(x), Type::Name(y)) if x == y => Ok(Subst::new()),
        (Type::Name(x), ty) | (ty, Type::Name(x)) => bind(x, ty),
        (Type::Bool, Type::Bool) => Ok(Subst::new()),
        (Type::Arr(a1, b1), Type::Arr(a2, b2)) => {
            let s1 = unify_rigid(a1, a2)?;
            let s2 = unify_rigid(&s1.apply(b1), &s1.apply(b2))?;
            Ok(s2.compose(s1))
        }
        (Type::All(x, a1), Type::All(_, b1)) => {
            // the substitution lives in the context extended by the quantifier
            let s = unify_rigid(a1, b1)?;
            if s.has_var(0) {
                Err(Error::Escape(x.clone()))
            } else {
                Ok(s.shift(-1))
            }
        }
        (Type::Var(x, n), Type::Var(y, m)) if level(*x, *n) == level(*y, *m) => Ok(Subst::new()),
        _ => Err(Error::Incompatible(a.clone(), b.clone())),
    }
}

/// Replace the name `x` by `ty`, unless `x` occurs in `ty`.
fn bind(x: &str, ty: &Type) -> Result<Subst> {
    if ty.ftv().contains(x) {
        Err(Error::Occurs(x.to_string(), ty.clone()))
    } else {
        Ok(Subst::single(x, ty.clone()))
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

    fn unifies(a: &Type, b: &Type) -> Subst {
        let s = unify(a, b).unwrap();
        assert_eq!(s.apply(a), s.apply(b));
        s
    }

    #[test]
    fn names() {
        assert_eq!(unify(&name("A"), &name("A")), Ok(Subst::new()));
        let s = unifies(&name("A"), &name("B"));
        assert_eq!(s, Subst::single("A", name("B")));
        let s = unifies(&arr(Type::Bool, Type::Bool), &name("B"));
        assert_eq!(s, Subst::single("B", arr(Type::Bool, Type::Bool)));
    }

    #[test]
    fn arrows() {
        let a = arr(name("A"), name("B"));
        let b = arr(Type::Bool, Type::Bool);
        let s = unifies(&a, &b);
        let mut domain: Vec<_> = s.domain().collect();
        domain.sort();
        assert_eq!(domain, ["A", "B"]);

        // the substitution of the domains is applied to the codomains
        let a = arr(name("A"), name("A"));
        let b = arr(Type::Bool, name("B"));
        let s = unifies(&a, &b);
        assert_eq!(s.apply(&name("B")), Type::Bool);
    }

    #[test]
    fn occurs() {
        let a = name("X");
        let b = arr(name("X"), name("Y"));
        assert_eq!(unify(&a, &b), Err(Error::Occurs("X".into(), b.clone())));
        assert_eq!(unify(&b, &a), Err(Error::Occurs("X".into(), b)));
    }

    #[test]
    fn incompatible() {
        let a = arr(Type::Bool, Type::Bool);
        assert!(matches!(unify(&a, &Type::Bool), Err(Error::Incompatible(..))));
        let a = arr(name("A"), Type::Bool);
        let b = arr(Type::Bool, arr(name("A"), name("A")));
        assert!(matches!(unify(&a, &b), Err(Error::Incompatible(..))));
    }

    #[test]
    fn vars() {
        // the same context variable, seen from contexts of different lengths
        assert_eq!(unify(&Type::Var(0, 1), &Type::Var(1, 2)), Ok(Subst::new()));
        let err = unify(&Type::Var(0, 2), &Type::Var(1, 2));
        assert!(matches!(err, Err(Error::Incompatible(..))));
    }

    #[test]
    fn quantifiers() {
        // ∀X. X → X ~ Bool → B
        let id = all("X", arr(Type::Var(0, 1), Type::Var(0, 1)));
        let s = unify(&id, &arr(Type::Bool, name("B"))).unwrap();
        assert_eq!(s.apply(&name("B")), Type::Bool);

        // ∀X. X → X ~ ∀Y. Y → Y
        let s = unify(&id, &all("Y", arr(Type::Var(0, 1), Type::Var(0, 1))));
        assert!(s.is_ok());

        // new names avoid names that are already used
        let s = unify(&id, &arr(name("X"), Type::Bool)).unwrap();
        assert_eq!(s.apply(&name("X")), Type::Bool);
    }

    #[test]
    fn rigid() {
        let id = all("X", arr(Type::Var(0, 1), Type::Var(0, 1)));
        let err = unify_rigid(&id, &arr(Type::Bool, Type::Bool));
        assert!(matches!(err, Err(Error::Incompatible(..))));
        let s = unify_rigid(&id, &all("Y", arr(Type::Var(0, 1), Type::Var(0, 1))));
        assert_eq!(s, Ok(Subst::new()));

        // ∀X. A → X ~ ∀Y. Bool → Y
        let a = all("X", arr(name("A"), Type::Var(0, 1)));
        let b = all("Y", arr(Type::Bool, Type::Var(0, 1)));
        assert_eq!(unify_rigid(&a, &b), Ok(Subst::single("A", Type::Bool)));

        // ∀X. A → X ~ ∀Y. Y → Y would bind A to the quantified variable
        let err = unify_rigid(&a, &all("Y", arr(Type::Var(0, 1), Type::Var(0, 1))));
        assert_eq!(err, Err(Error::Escape("X".into())));
    }
}
