//! Type systems and the terms, types and contexts they admit.

use crate::{Binding, Context, Term, Type};
use core::fmt::{self, Display};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Type system that judgments are checked in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeSystem {
    /// simply typed lambda calculus
    SimplyTyped,
    #[default]
    HindleyMilner,
    SystemF,
}

impl FromStr for TypeSystem {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stlc" | "simply-typed" => Ok(Self::SimplyTyped),
            "hm" | "hindley-milner" => Ok(Self::HindleyMilner),
            "systemf" | "system-f" => Ok(Self::SystemF),
            _ => Err(format!("unknown type system: {}", s)),
        }
    }
}

impl Display for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::SimplyTyped => "simply typed lambda calculus",
            Self::HindleyMilner => "Hindley-Milner",
            Self::SystemF => "System F",
        };
        s.fmt(f)
    }
}

/// Reason why a term, type or context is not admitted by a type system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// abstraction without type annotation
    Unannotated,
    TypeAbstraction,
    TypeApplication,
    /// universal quantification
    Quantifier,
    /// universal quantification that is not outermost
    NestedQuantifier,
    /// type variable in a context
    TypeVariableBinding,
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Unannotated => "abstraction without type annotation",
            Self::TypeAbstraction => "type abstraction",
            Self::TypeApplication => "type application",
            Self::Quantifier => "universal quantification",
            Self::NestedQuantifier => "nested universal quantification",
            Self::TypeVariableBinding => "type variable in context",
        };
        s.fmt(f)
    }
}

/// A construction that is not in the selected type system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub system: TypeSystem,
    pub violation: Violation,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "not in selected type system ({}): {}", self.system, self.violation)
    }
}

type Result<T> = core::result::Result<T, Error>;

impl TypeSystem {
    fn err(self, violation: Violation) -> Error {
        Error { system: self, violation }
    }

    /// Succeed if the type system admits the type.
    ///
    /// In Hindley-Milner, declared types may be type schemes,
    /// i.e. quantifiers may only occur outermost.
    pub fn admits_type(self, ty: &Type) -> Result<()> {
        match self {
            Self::SimplyTyped if !ty.is_mono() => Err(self.err(Violation::Quantifier)),
            Self::HindleyMilner if !ty.is_prenex() => Err(self.err(Violation::NestedQuantifier)),
            _ => Ok(()),
        }
    }

    /// Succeed if the type system admits the type annotations of a term.
    fn admits_annotation(self, ty: &Type) -> Result<()> {
        match self {
            Self::HindleyMilner if !ty.is_mono() => Err(self.err(Violation::Quantifier)),
            _ => self.admits_type(ty),
        }
    }

    /// Succeed if the type system admits the term.
    pub fn admits_term(self, tm: &Term) -> Result<()> {
        match tm {
            Term::Var(..) | Term::Const(..) => Ok(()),
            Term::Abs(_, _, None, _) if self != Self::HindleyMilner => {
                Err(self.err(Violation::Unannotated))
            }
            Term::Abs(_, _, ty, t) => {
                ty.iter().try_for_each(|ty| self.admits_annotation(ty))?;
                self.admits_term(t)
            }
            Term::App(_, t, u) => {
                self.admits_term(t)?;
                self.admits_term(u)
            }
            Term::If(_, c, t, e) => [c, t, e].iter().try_for_each(|t| self.admits_term(t)),
            Term::Let(_, _, e, t) => {
                self.admits_term(e)?;
                self.admits_term(t)
            }
            Term::TyAbs(_, _, t) => match self {
                Self::SystemF => self.admits_term(t),
                _ => Err(self.err(Violation::TypeAbstraction)),
            },
            Term::TyApp(_, t, ty) => match self {
                Self::SystemF => {
                    self.admits_type(ty)?;
                    self.admits_term(t)
                }
                _ => Err(self.err(Violation::TypeApplication)),
            },
        }
    }

    /// Succeed if the type system admits all bindings of the context.
    pub fn admits_context(self, ctx: &Context) -> Result<()> {
        ctx.iter().try_for_each(|(_, b)| match b {
            Binding::Name => Ok(()),
            Binding::Var(ty) => self.admits_type(ty),
            Binding::TyVar if self == Self::SystemF => Ok(()),
            Binding::TyVar => Err(self.err(Violation::TypeVariableBinding)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TypeSystem::*;

    fn term(s: &str) -> Term {
        Term::parse(s, &Context::new()).unwrap()
    }

    fn ty(s: &str) -> Type {
        Type::parse(s, &Context::new()).unwrap()
    }

    fn violation<T>(r: Result<T>) -> Option<Violation> {
        r.err().map(|e| e.violation)
    }

    #[test]
    fn from_str() {
        assert_eq!("STLC".parse::<TypeSystem>(), Ok(SimplyTyped));
        assert_eq!("hindley-milner".parse::<TypeSystem>(), Ok(HindleyMilner));
        assert_eq!("System-F".parse::<TypeSystem>(), Ok(SystemF));
        assert!("coc".parse::<TypeSystem>().is_err());
    }

    #[test]
    fn terms() {
        let unannotated = term(r"\x. x");
        assert_eq!(violation(SimplyTyped.admits_term(&unannotated)), Some(Violation::Unannotated));
        assert_eq!(violation(HindleyMilner.admits_term(&unannotated)), None);
        assert_eq!(violation(SystemF.admits_term(&unannotated)), Some(Violation::Unannotated));

        let tyabs = term(r"Lambda X. \x: X. x");
        assert_eq!(violation(HindleyMilner.admits_term(&tyabs)), Some(Violation::TypeAbstraction));
        assert_eq!(violation(SystemF.admits_term(&tyabs)), None);

        let poly = term(r"\f: forall X. X -> X. f");
        assert_eq!(violation(HindleyMilner.admits_term(&poly)), Some(Violation::Quantifier));
        assert_eq!(violation(SystemF.admits_term(&poly)), None);
    }

    #[test]
    fn types() {
        let scheme = ty("forall X, Y. X -> Y");
        let rank2 = ty("(forall X. X -> X) -> Bool");
        assert_eq!(violation(SimplyTyped.admits_type(&scheme)), Some(Violation::Quantifier));
        assert_eq!(violation(HindleyMilner.admits_type(&scheme)), None);
        assert_eq!(violation(HindleyMilner.admits_type(&rank2)), Some(Violation::NestedQuantifier));
        assert_eq!(violation(SystemF.admits_type(&rank2)), None);
    }

    #[test]
    fn contexts() {
        let ctx = Context::parse("X, x: X").unwrap();
        let err = HindleyMilner.admits_context(&ctx).unwrap_err();
        assert_eq!(err.violation, Violation::TypeVariableBinding);
        assert!(err.to_string().starts_with("not in selected type system"));
        assert!(SystemF.admits_context(&ctx).is_ok());
    }
}
