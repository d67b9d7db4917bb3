//! Instantiation and generalization of polymorphic types.

use super::{unify_with, Fresh};
use crate::{Context, Type};
use std::collections::BTreeSet;

fn fresh_for<'a>(ctx: &Context, tys: impl IntoIterator<Item = &'a Type>) -> Fresh {
    let mut fresh = Fresh::new(ctx.ftv());
    tys.into_iter().for_each(|ty| fresh.avoid(ty.ftv()));
    fresh
}

/// Replace the outermost quantified variables of a type by new names.
///
/// The new names occur neither in `avoid`, nor in the context, nor in the type.
pub fn inst(ctx: &Context, ty: &Type, avoid: &BTreeSet<String>) -> Type {
    let mut fresh = fresh_for(ctx, [ty]);
    fresh.avoid(avoid.iter().cloned());
    fresh.inst(ty)
}

/// Quantify over all free names of a type that are neither in the context nor in `avoid`.
///
/// The names are quantified in sorted order, the smallest name being outermost.
pub fn gen(ctx: &Context, ty: &Type, avoid: &BTreeSet<String>) -> Type {
    let bound = ctx.ftv();
    let names = ty.ftv().into_iter();
    let names: Vec<_> = names.filter(|x| !bound.contains(x) && !avoid.contains(x)).collect();
    let all = |ty: Type, x: &String| ty.generalize_top(ctx.len(), x);
    names.iter().rev().fold(ty.clone(), all)
}

/// Decide whether `spec` is an instance of the polymorphic type `gen`.
///
/// This holds if unifying the degeneralized types only instantiates
/// the quantified variables of `gen`.
pub fn is_specialized_type(ctx: &Context, gen: &Type, spec: &Type) -> bool {
    let mut fresh = fresh_for(ctx, [gen, spec]);
    let (vars, g) = fresh.degeneralize_all(gen);
    let (_, s) = fresh.degeneralize_all(spec);
    let free = g.ftv();
    match unify_with(&g, &s, &mut fresh) {
        Ok(subst) => subst
            .domain()
            .all(|x| free.contains(x) && vars.iter().any(|v| v == x)),
        Err(_) => false,
    }
}

/// Decide whether two polymorphic types are equal up to renaming and reordering of
/// their outermost quantified variables.
pub fn are_hm_types_equivalent(ctx: &Context, a: &Type, b: &Type) -> bool {
    if !is_specialized_type(ctx, a, b) || !is_specialized_type(ctx, b, a) {
        return false;
    }
    let mut fresh = fresh_for(ctx, [a, b]);
    let (va, ga) = fresh.degeneralize_all(a);
    let (vb, gb) = fresh.degeneralize_all(b);
    let subst = match unify_with(&ga, &gb, &mut fresh) {
        Ok(subst) => subst,
        Err(_) => return false,
    };
    let quantified: BTreeSet<&String> = va.iter().chain(&vb).collect();
    // the quantified variables of `a` and `b` must be mapped to
    // the same number of distinct quantified variables
    let image = |vars: &[String]| -> Option<BTreeSet<String>> {
        let image = vars.iter().map(|v| match subst.apply(&Type::name(v)) {
            Type::Name(y) if quantified.contains(&y) => Some(y),
            _ => None,
        });
        image.collect::<Option<BTreeSet<_>>>()
            .filter(|image| image.len() == vars.len())
    };
    match (image(&va[..]), image(&vb[..])) {
        (Some(ia), Some(ib)) => ia == ib,
        _ => false,
    }
}
