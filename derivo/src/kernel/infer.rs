//! Type inference with algorithm W.

use super::{gen, unify_with, Error, Fresh, Subst};
use crate::show::Show;
use crate::{Binding, Context, Term, Type};
use std::collections::BTreeSet;

type Result<T> = core::result::Result<T, Error>;

/// State of type inference, namely the names used so far.
pub struct Infer {
    fresh: Fresh,
}

impl Infer {
    /// Prepare inference for a term in a context.
    ///
    /// New names avoid all free names of the context and the term.
    pub fn new(ctx: &Context, tm: &Term) -> Self {
        let mut fresh = Fresh::new(ctx.ftv());
        fresh.avoid(tm.type_names());
        Self { fresh }
    }

    /// Infer a substitution and a type for a term.
    ///
    /// The substitution is already applied to the returned type.
    pub fn w(&mut self, ctx: &Context, tm: &Term) -> Result<(Subst, Type)> {
        debug!("infer type of {}", tm.show(ctx));
        match tm {
            Term::Var(_, x, _) => {
                let ty = ctx.get_type(*x).ok_or(Error::Unbound(*x))?;
                Ok((Subst::new(), self.fresh.inst(&ty)))
            }
            Term::Const(..) => Ok((Subst::new(), Type::Bool)),
            Term::Abs(_, x, ty, t) => {
                let a = match ty {
                    Some(ty) => ty.clone(),
                    None => Type::Name(self.fresh.name()),
                };
                let (s, b) = self.w(&ctx.with(x.clone(), Binding::Var(a.clone())), t)?;
                // types can only refer to type variables, so they never refer to `x`
                let s = s.shift(-1);
                let a = s.apply(&a);
                Ok((s, Type::arr(a, b.shift(-1))))
            }
            Term::App(_, t, u) => {
                let (s1, a) = self.w(ctx, t)?;
                let (s2, b) = self.w(&ctx.apply(&s1)?, u)?;
                let r = Type::Name(self.fresh.name());
                let s3 = unify_with(&s2.apply(&a), &Type::arr(b, r.clone()), &mut self.fresh)?;
                let r = s3.apply(&r);
                Ok((s3.compose(s2).compose(s1), r))
            }
            Term::If(_, c, t, e) => {
                let (s1, a) = self.w(ctx, c)?;
                let s1 = unify_with(&a, &Type::Bool, &mut self.fresh)?.compose(s1);
                let (s2, b) = self.w(&ctx.apply(&s1)?, t)?;
                let s2 = s2.compose(s1);
                let (s3, c) = self.w(&ctx.apply(&s2)?, e)?;
                let s4 = unify_with(&s3.apply(&b), &c, &mut self.fresh)?;
                let c = s4.apply(&c);
                Ok((s4.compose(s3).compose(s2), c))
            }
            Term::Let(_, x, e, t) => {
                let (s1, a) = self.w(ctx, e)?;
                let ctx = ctx.apply(&s1)?;
                let sigma = gen(&ctx, &a, &BTreeSet::new());
                let (s2, b) = self.w(&ctx.with(x.clone(), Binding::Var(sigma)), t)?;
                Ok((s2.shift(-1).compose(s1), b.shift(-1)))
            }
            Term::TyAbs(_, x, t) => {
                // the type variable becomes a name that must not be instantiated
                let n = self.fresh.like(x);
                let (s, b) = self.w(ctx, &t.subst_ty_top(&Type::name(&n)))?;
                let s = keep_rigid(ctx, s, &n, x)?;
                let b = s.apply(&b).shift(1).bind_name(&n, ctx.len());
                Ok((s, Type::All(x.clone(), Box::new(b))))
            }
            Term::TyApp(_, t, arg) => {
                let (s, a) = self.w_head(ctx, t)?;
                match a {
                    Type::All(_, b) => {
                        let b = b.subst_top(&s.apply(arg));
                        Ok((s, b))
                    }
                    a => Err(Error::ForallExpected(a)),
                }
            }
        }
    }

    /// Infer the type of a type application head, without instantiating variables.
    fn w_head(&mut self, ctx: &Context, tm: &Term) -> Result<(Subst, Type)> {
        match tm {
            Term::Var(_, x, _) => {
                let ty = ctx.get_type(*x).ok_or(Error::Unbound(*x))?;
                Ok((Subst::new(), ty))
            }
            tm => self.w(ctx, tm),
        }
    }
}

/// Ensure that a substitution does not instantiate the name `n`,
/// which stands for the type variable `x` of a type abstraction.
///
/// If the substitution renames `n`, the renaming is reverted.
/// The name must also not occur in the context after substitution.
pub fn keep_rigid(ctx: &Context, s: Subst, n: &str, x: &str) -> Result<Subst> {
    let s = match s.apply(&Type::name(n)) {
        Type::Name(m) if m == n => s,
        Type::Name(m) => Subst::single(m, Type::name(n)).compose(s),
        _ => return Err(Error::Escape(x.to_string())),
    };
    if ctx.apply(&s)?.ftv().contains(n) {
        Err(Error::Escape(x.to_string()))
    } else {
        Ok(s)
    }
}

/// Infer the principal type of a term, generalized in the context.
///
/// ~~~
/// # use derivo::{kernel::type_of, Context, Error, Term, Type};
/// let ctx = Context::new();
/// let id = Term::parse(r"\x. x", &ctx)?;
/// let ty = type_of(&ctx, &id)?;
/// assert!(ty.alpha_eq(&Type::parse("forall X. X -> X", &ctx)?));
/// # Ok::<_, Error>(())
/// ~~~
pub fn type_of(ctx: &Context, tm: &Term) -> Result<Type> {
    let (s, ty) = Infer::new(ctx, tm).w(ctx, tm)?;
    Ok(gen(&ctx.apply(&s)?, &ty, &BTreeSet::new()))
}
