use super::{Config, Parsed, Rule, RuleTree};
use crate::kernel::{self, are_hm_types_equivalent, gen, keep_rigid};
use crate::kernel::{unify_rigid, unify_with, Fresh, Subst};
use crate::show::Show;
use crate::{Binding, Context, Term, Type, TypeSystem};
use core::fmt::{self, Display};
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

/// Reason why the premises of a rule do not hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    NoRule,
    /// the rule does not derive types for terms of this shape
    Shape(Rule),
    Arity {
        expected: usize,
        found: usize,
    },
    /// fields of the premise with the given index failed to parse
    Premise(usize),
    Context(usize),
    Term(usize),
    /// unification failure, printed in the context of the conclusion
    Unify(String),
    /// substitution of the premise with the given index contradicts the others
    Conflict(usize, String),
    NotGeneral,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Self::NoRule = self {
            return "no rule selected".fmt(f);
        }
        write!(f, "rule premises not satisfied: ")?;
        match self {
            Self::NoRule => Ok(()),
            Self::Shape(rule) => write!(f, "rule {} does not apply to this term", rule),
            Self::Arity { expected, found } => {
                write!(f, "expected {} premises, found {}", expected, found)
            }
            Self::Premise(i) => write!(f, "premise {} is not available", i + 1),
            Self::Context(i) => write!(f, "context of premise {} does not match", i + 1),
            Self::Term(i) => write!(f, "term of premise {} does not match", i + 1),
            Self::Unify(e) => e.fmt(f),
            Self::Conflict(i, e) => {
                write!(f, "premise {} requires a conflicting substitution: {}", i + 1, e)
            }
            Self::NotGeneral => "type of let-bound variable is not the generalized type".fmt(f),
        }
    }
}

type Result<T> = core::result::Result<T, Error>;

/// Outcome of parsing a field of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Parsed(String),
    Syntax {
        row: usize,
        col: usize,
        message: String,
    },
    Error(String),
}

impl Field {
    fn new<T>(r: &core::result::Result<T, crate::Error>, show: impl FnOnce(&T) -> String) -> Self {
        match r {
            Ok(x) => Self::Parsed(show(x)),
            Err(crate::Error::Syntax(e)) => Self::Syntax {
                row: e.pos.row,
                col: e.pos.col,
                message: e.expected.to_string(),
            },
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parsed(s) => s.fmt(f),
            Self::Syntax { row, col, .. } => write!(f, "<syntax error at {}:{}>", row, col),
            Self::Error(_) => "<error>".fmt(f),
        }
    }
}

/// Rule tree with parse results and a verdict for every node.
#[derive(Clone, Debug, Serialize)]
pub struct Checked {
    pub context: Field,
    pub term: Field,
    #[serde(rename = "type")]
    pub ty: Field,
    pub rule: Rule,
    #[serde(skip)]
    pub outcome: core::result::Result<Subst, crate::Error>,
    pub verdict: String,
    /// substitution under which the rules of the node and all its premises hold
    pub subst: Option<String>,
    pub children: Vec<Checked>,
}

impl Checked {
    /// Check the premises first, then the node under their substitutions.
    pub fn new(tree: &RuleTree, parsed: &Parsed, config: &Config) -> Self {
        let children: Vec<_> = if config.parallel {
            let children = tree.children.par_iter().zip(&parsed.children);
            children.map(|(t, p)| Self::new(t, p, config)).collect()
        } else {
            let children = tree.children.iter().zip(&parsed.children);
            children.map(|(t, p)| Self::new(t, p, config)).collect()
        };

        // a failed premise constrains nothing
        let substs = children.iter().map(|c| c.outcome.clone().unwrap_or_default());
        let outcome = check_node(tree.rule, parsed, config.system, &substs.collect::<Vec<_>>());
        let empty = Context::new();
        let ctx = parsed.context.as_ref().unwrap_or(&empty);
        let subst = match &outcome {
            Ok(s) if !s.is_empty() => Some(s.show(ctx).to_string()),
            _ => None,
        };
        let verdict = match (&outcome, &subst) {
            (Ok(_), Some(s)) => format!("valid with {}", s),
            (Ok(_), None) => "valid".to_string(),
            (Err(e), _) => e.to_string(),
        };

        Self {
            context: Field::new(&parsed.context, |ctx| ctx.to_string()),
            term: Field::new(&parsed.term, |tm| tm.show(ctx).to_string()),
            ty: Field::new(&parsed.ty, |ty| ty.show(ctx).to_string()),
            rule: tree.rule,
            outcome,
            verdict,
            subst,
            children,
        }
    }

    /// Return true if the rules of all nodes hold.
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok() && self.children.iter().all(|c| c.is_valid())
    }

    /// Return the number of nodes whose rules do not hold.
    pub fn failures(&self) -> usize {
        let own = usize::from(self.outcome.is_err());
        own + self.children.iter().map(|c| c.failures()).sum::<usize>()
    }

    fn fmt_indent(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        writeln!(
            f,
            "{}{} ⊢ {} : {} [{}] {}",
            indent, self.context, self.term, self.ty, self.rule, self.verdict
        )?;
        self.children.iter().try_for_each(|c| c.fmt_indent(f, depth + 1))
    }
}

impl Display for Checked {
    /// Print one node per line, indenting premises below their conclusion.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_indent(f, 0)
    }
}

/// Check the rule of a single node, returning the substitution under which it holds.
///
/// The substitutions of the premises are adopted before the rule is checked.
fn check_node(
    rule: Rule,
    parsed: &Parsed,
    system: TypeSystem,
    substs: &[Subst],
) -> core::result::Result<Subst, crate::Error> {
    let ctx = parsed.context.as_ref().map_err(Clone::clone)?;
    let tm = parsed.term.as_ref().map_err(Clone::clone)?;
    let ty = parsed.ty.as_ref().map_err(Clone::clone)?;
    debug!("check rule {} for {} : {}", rule, tm.show(ctx), ty.show(ctx));

    system.admits_context(ctx)?;
    system.admits_term(tm)?;
    system.admits_type(ty)?;

    if rule == Rule::None {
        return Err(Error::NoRule.into());
    } else if !rule.fits(tm) {
        return Err(Error::Shape(rule).into());
    }
    let (expected, found) = (rule.arity(), parsed.children.len());
    if expected != found {
        return Err(Error::Arity { expected, found }.into());
    }
    let premises = parsed.children.iter().enumerate();
    let premises = premises.map(|(i, p)| p.judgment().ok_or(Error::Premise(i)));
    let premises = premises.collect::<Result<Vec<_>>>()?;

    let judgments = premises.iter().copied().chain([(ctx, tm, ty)]);
    let mut checker = Checker::new(ctx, system, judgments, substs);
    checker.rule(rule, tm, ty, &premises, substs)?;
    Ok(checker.subst)
}

/// Judgment of a premise.
type Premise<'a> = (&'a Context, &'a Term, &'a Type);

/// State of checking a single rule.
struct Checker<'a> {
    /// context of the conclusion
    ctx: &'a Context,
    system: TypeSystem,
    fresh: Fresh,
    subst: Subst,
}

impl<'a> Checker<'a> {
    /// Prepare checking, avoiding the names of all given judgments and substitutions.
    fn new<'p, J>(ctx: &'a Context, system: TypeSystem, js: J, substs: &[Subst]) -> Self
    where
        J: Iterator<Item = Premise<'p>>,
    {
        let mut fresh = Fresh::default();
        for (ctx, tm, ty) in js {
            fresh.avoid(ctx.ftv());
            fresh.avoid(tm.type_names());
            fresh.avoid(ty.ftv());
        }
        for (ty, x) in substs.iter().flat_map(|s| s.iter()) {
            fresh.avoid(ty.ftv());
            fresh.avoid([x.clone()]);
        }
        let subst = Subst::new();
        Self {
            ctx,
            system,
            fresh,
            subst,
        }
    }

    fn type_error(&self, e: kernel::Error) -> Error {
        Error::Unify(e.show(self.ctx).to_string())
    }

    /// Unify two types of the context of the conclusion.
    ///
    /// System F never instantiates quantifiers implicitly.
    /// The types of the context must remain in the scope of their bindings.
    fn unify(&mut self, a: &Type, b: &Type) -> Result<()> {
        let (a, b) = (self.subst.apply(a), self.subst.apply(b));
        if a.alpha_eq(&b) {
            return Ok(());
        }
        let s = match self.system {
            TypeSystem::SystemF => unify_rigid(&a, &b),
            _ => unify_with(&a, &b, &mut self.fresh),
        };
        let s = s.map_err(|e| self.type_error(e))?;
        self.subst = s.compose(core::mem::take(&mut self.subst));
        self.ctx.apply(&self.subst).map_err(|e| self.type_error(e))?;
        Ok(())
    }

    /// Extend the substitution such that the one of premise `i` also holds.
    ///
    /// The types of `s` must live in the context of the conclusion.
    fn adopt(&mut self, i: usize, s: &Subst) -> Result<()> {
        // bindings take effect from the last to the first
        for (ty, x) in s.iter().rev() {
            self.unify(&Type::name(x), ty).map_err(|e| match e {
                Error::Unify(e) => Error::Conflict(i, e),
                e => e,
            })?
        }
        Ok(())
    }

    /// Move a substitution of premise `i` out of the term variable its context adds.
    fn unbind(i: usize, s: &Subst) -> Result<Subst> {
        let unshift = |(ty, x): &(Type, String)| Some((ty.unshift(1)?, x.clone()));
        s.iter().map(unshift).collect::<Option<_>>().ok_or(Error::Context(i))
    }

    /// Succeed if the contexts are equal up to unification.
    fn unify_contexts(&mut self, i: usize, a: &Context, b: &Context) -> Result<()> {
        if a.len() != b.len() {
            return Err(Error::Context(i));
        }
        for (k, ((_, ba), (_, bb))) in a.iter().zip_eq(b.iter()).enumerate() {
            let same = match (ba, bb) {
                (Binding::Var(_), Binding::Var(_)) => match (a.get_type(k), b.get_type(k)) {
                    (Some(ta), Some(tb)) => self.unify(&ta, &tb).is_ok(),
                    _ => false,
                },
                (Binding::Name, Binding::Name) | (Binding::TyVar, Binding::TyVar) => true,
                _ => false,
            };
            if !same {
                return Err(Error::Context(i));
            }
        }
        Ok(())
    }

    /// Succeed if the premise has the same context as the conclusion.
    fn same_context(&mut self, i: usize, ctx: &Context) -> Result<()> {
        self.unify_contexts(i, ctx, self.ctx)
    }

    /// Return the most recent binding of a premise context
    /// whose remaining bindings are those of the conclusion.
    fn extended(&mut self, i: usize, ctx: &Context) -> Result<Binding> {
        let (rest, (_, b)) = ctx.split_top().ok_or(Error::Context(i))?;
        self.unify_contexts(i, &rest, self.ctx)?;
        Ok(b)
    }

    fn same_term(i: usize, a: &Term, b: &Term) -> Result<()> {
        if a.alpha_eq(b) {
            Ok(())
        } else {
            Err(Error::Term(i))
        }
    }

    /// Check the premises of the rule for the conclusion `tm : ty`.
    ///
    /// The number of premises and their substitutions must be the arity of the rule.
    /// Free names of all judgments are unification variables,
    /// including those of a variable's type in Hindley-Milner,
    /// whose quantified variables are instantiated with names local to the node.
    fn rule(
        &mut self,
        rule: Rule,
        tm: &Term,
        ty: &Type,
        ps: &[Premise],
        substs: &[Subst],
    ) -> Result<()> {
        match (rule, tm) {
            (Rule::Var, Term::Var(_, x, _)) => {
                let sigma = self.ctx.get_type(*x);
                let sigma = sigma.ok_or_else(|| self.type_error(kernel::Error::Unbound(*x)))?;
                if self.system == TypeSystem::HindleyMilner {
                    let (names, rho) = self.fresh.degeneralize_all(&sigma);
                    self.unify(&rho, ty)?;
                    self.subst = self.subst.without(&names);
                    Ok(())
                } else {
                    self.unify(&sigma, ty)
                }
            }
            (Rule::Abs, Term::Abs(_, _, annot, body)) => {
                let (ctx1, tm1, ty1) = ps[0];
                let a = match self.extended(0, ctx1)? {
                    Binding::Var(a) => a,
                    _ => return Err(Error::Context(0)),
                };
                Self::same_term(0, tm1, body)?;
                self.adopt(0, &Self::unbind(0, &substs[0])?)?;
                if let Some(annot) = annot {
                    self.unify(annot, &a)?
                }
                // the type of the premise cannot refer to the term variable
                self.unify(ty, &Type::arr(a, ty1.shift(-1)))
            }
            (Rule::App, Term::App(_, t, u)) => {
                for (i, (p, sub)) in ps.iter().zip([t, u]).enumerate() {
                    self.same_context(i, p.0)?;
                    Self::same_term(i, p.1, sub)?;
                }
                substs.iter().enumerate().try_for_each(|(i, s)| self.adopt(i, s))?;
                self.unify(ps[0].2, &Type::arr(ps[1].2.clone(), ty.clone()))
            }
            (Rule::If, Term::If(_, c, t, e)) => {
                for (i, (p, sub)) in ps.iter().zip([c, t, e]).enumerate() {
                    self.same_context(i, p.0)?;
                    Self::same_term(i, p.1, sub)?;
                }
                substs.iter().enumerate().try_for_each(|(i, s)| self.adopt(i, s))?;
                self.unify(ps[0].2, &Type::Bool)?;
                self.unify(ps[1].2, ty)?;
                self.unify(ps[2].2, ty)
            }
            (Rule::TyAbs, Term::TyAbs(_, x, body)) => {
                let (ctx1, tm1, ty1) = ps[0];
                match self.extended(0, ctx1)? {
                    Binding::TyVar => (),
                    _ => return Err(Error::Context(0)),
                }
                Self::same_term(0, tm1, body)?;
                // compare the bodies with a name standing for the type variable
                let n = self.fresh.like(x);
                let name = Type::name(&n);
                let lift = |(ty, y): &(Type, String)| (ty.subst_top(&name), y.clone());
                self.adopt(0, &substs[0].iter().map(lift).collect::<Subst>())?;
                let b = match self.subst.apply(ty) {
                    Type::All(_, b) => b,
                    ty => return Err(self.type_error(kernel::Error::ForallExpected(ty))),
                };
                self.unify(&b.subst_top(&name), &ty1.subst_top(&name))?;
                let subst = core::mem::take(&mut self.subst);
                self.subst = keep_rigid(self.ctx, subst, &n, x).map_err(|e| self.type_error(e))?;
                Ok(())
            }
            (Rule::TyApp, Term::TyApp(_, t, arg)) => {
                let (ctx1, tm1, ty1) = ps[0];
                self.same_context(0, ctx1)?;
                Self::same_term(0, tm1, t)?;
                self.adopt(0, &substs[0])?;
                match self.subst.apply(ty1) {
                    Type::All(_, b) => self.unify(&b.subst_top(arg), ty),
                    ty1 => Err(self.type_error(kernel::Error::ForallExpected(ty1))),
                }
            }
            (Rule::Let, Term::Let(_, _, e, body)) => {
                let ((ctx1, tm1, ty1), (ctx2, tm2, ty2)) = (ps[0], ps[1]);
                self.same_context(0, ctx1)?;
                Self::same_term(0, tm1, e)?;
                let sigma = match self.extended(1, ctx2)? {
                    Binding::Var(sigma) => sigma,
                    _ => return Err(Error::Context(1)),
                };
                Self::same_term(1, tm2, body)?;
                self.adopt(0, &substs[0])?;
                self.adopt(1, &Self::unbind(1, &substs[1])?)?;
                if self.system == TypeSystem::HindleyMilner {
                    let ctx = self.ctx.apply(&self.subst).map_err(|e| self.type_error(e))?;
                    let gen = gen(&ctx, &self.subst.apply(ty1), &BTreeSet::new());
                    if !are_hm_types_equivalent(&ctx, &gen, &self.subst.apply(&sigma)) {
                        return Err(Error::NotGeneral);
                    }
                } else {
                    self.unify(&sigma, ty1)?
                }
                self.unify(ty, &ty2.shift(-1))
            }
            (Rule::True | Rule::False, Term::Const(..)) => self.unify(ty, &Type::Bool),
            (rule, _) => Err(Error::Shape(rule)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::check;

    fn node(context: &str, term: &str, ty: &str, rule: Rule, children: Vec<RuleTree>) -> RuleTree {
        RuleTree {
            context: context.into(),
            term: term.into(),
            ty: ty.into(),
            rule,
            children,
        }
    }

    fn leaf(context: &str, term: &str, ty: &str, rule: Rule) -> RuleTree {
        node(context, term, ty, rule, Vec::new())
    }

    fn config(system: TypeSystem) -> Config {
        Config {
            system,
            parallel: false,
        }
    }

    fn verdict(tree: &RuleTree, system: TypeSystem) -> String {
        check(tree, &config(system)).verdict
    }

    #[test]
    fn var() {
        let stlc = config(TypeSystem::SimplyTyped);
        let tree = leaf("x: Bool", "x", "Bool", Rule::Var);
        assert!(check(&tree, &stlc).is_valid());
        let tree = leaf("x: Bool", "x", "Bool -> Bool", Rule::Var);
        assert!(!check(&tree, &stlc).is_valid());
        let tree = leaf("x: Bool", "x", "A", Rule::Var);
        assert_eq!(verdict(&tree, TypeSystem::SimplyTyped), "valid with {A ↦ Bool}");

        let tree = leaf("id: forall X. X -> X", "id", "Bool -> Bool", Rule::Var);
        assert_eq!(verdict(&tree, TypeSystem::HindleyMilner), "valid");
        let tree = leaf("id: forall X. X -> X", "id", "Bool -> A", Rule::Var);
        assert_eq!(verdict(&tree, TypeSystem::HindleyMilner), "valid with {A ↦ Bool}");
        let tree = leaf("id: forall X. X -> X", "id", "Bool -> Bool -> Bool", Rule::Var);
        assert_eq!(
            verdict(&tree, TypeSystem::HindleyMilner),
            "rule premises not satisfied: cannot unify Bool with Bool → Bool"
        );
    }

    #[test]
    fn var_names() {
        // names of the context are unification variables in every system
        let tree = leaf("x: B", "x", "A", Rule::Var);
        assert_eq!(verdict(&tree, TypeSystem::SimplyTyped), "valid with {B ↦ A}");
        assert_eq!(verdict(&tree, TypeSystem::HindleyMilner), "valid with {B ↦ A}");
    }

    #[test]
    fn var_scope() {
        // the type of y cannot refer to X, which is bound after y
        let tree = leaf("y: A, X", "y", "X", Rule::Var);
        assert_eq!(
            verdict(&tree, TypeSystem::SystemF),
            "rule premises not satisfied: type variable X is not in scope of y"
        );
        let tree = leaf("X, y: A", "y", "X", Rule::Var);
        assert_eq!(verdict(&tree, TypeSystem::SystemF), "valid with {A ↦ X}");
    }

    #[test]
    fn abs() {
        let premise = leaf("x: Bool", "x", "Bool", Rule::Var);
        let tree = node("", r"\x: Bool. x", "Bool -> Bool", Rule::Abs, vec![premise]);
        let checked = check(&tree, &config(TypeSystem::SimplyTyped));
        assert!(checked.is_valid(), "{}", checked);
        assert_eq!(checked.term, Field::Parsed("λx: Bool. x".into()));

        // the premise binds the variable with a different type
        let premise = leaf("x: Bool -> Bool", "x", "Bool -> Bool", Rule::Var);
        let tree = node("", r"\x: Bool. x", "Bool -> Bool", Rule::Abs, vec![premise]);
        assert_eq!(
            verdict(&tree, TypeSystem::SimplyTyped),
            "rule premises not satisfied: cannot unify Bool with Bool → Bool"
        );

        // the premise concerns another term
        let premise = leaf("x: Bool", "true", "Bool", Rule::True);
        let tree = node("", r"\x: Bool. x", "Bool -> Bool", Rule::Abs, vec![premise]);
        assert_eq!(
            verdict(&tree, TypeSystem::SimplyTyped),
            "rule premises not satisfied: term of premise 1 does not match"
        );
    }

    #[test]
    fn unannotated() {
        let premise = leaf("x: A", "x", "A", Rule::Var);
        let tree = node("", r"\x. x", "A -> A", Rule::Abs, vec![premise]);
        let verdict = verdict(&tree, TypeSystem::SimplyTyped);
        assert!(verdict.starts_with("not in selected type system"), "{}", verdict);
        assert!(check(&tree, &config(TypeSystem::HindleyMilner)).is_valid());
    }

    #[test]
    fn app() {
        let ctx = "f: Bool -> Bool";
        let f = leaf(ctx, "f", "Bool -> Bool", Rule::Var);
        let t = leaf(ctx, "true", "Bool", Rule::True);
        let tree = node(ctx, "f true", "Bool", Rule::App, vec![f.clone(), t.clone()]);
        assert!(check(&tree, &config(TypeSystem::SimplyTyped)).is_valid());

        // premises in the wrong order
        let tree = node(ctx, "f true", "Bool", Rule::App, vec![t, f]);
        assert_eq!(
            verdict(&tree, TypeSystem::SimplyTyped),
            "rule premises not satisfied: term of premise 1 does not match"
        );
    }

    #[test]
    fn conflicting_premises() {
        // no type for x can be both Bool → Bool and Bool
        let ctx = "x: A";
        let children = vec![
            leaf(ctx, "x", "Bool -> Bool", Rule::Var),
            leaf(ctx, "x", "Bool", Rule::Var),
        ];
        let tree = node(ctx, "x x", "Bool", Rule::App, children);
        let checked = check(&tree, &config(TypeSystem::SimplyTyped));
        assert!(!checked.is_valid());
        assert!(checked.children.iter().all(|c| c.outcome.is_ok()));
        assert_eq!(
            checked.verdict,
            "rule premises not satisfied: \
             premise 2 requires a conflicting substitution: cannot unify Bool → Bool with Bool"
        );
    }

    #[test]
    fn propagation() {
        // the substitution of the premise reaches the conclusion across the binder
        let premise = leaf("x: Bool", "x", "A", Rule::Var);
        let tree = node("", r"\x: Bool. x", "Bool -> A", Rule::Abs, vec![premise]);
        let checked = check(&tree, &config(TypeSystem::SimplyTyped));
        assert_eq!(checked.children[0].verdict, "valid with {A ↦ Bool}");
        assert_eq!(checked.verdict, "valid with {A ↦ Bool}");

        let premise = leaf("x: Bool", "x", "A", Rule::Var);
        let tree = node("", r"\x: Bool. x", "Bool -> Bool -> Bool", Rule::Abs, vec![premise]);
        assert_eq!(
            verdict(&tree, TypeSystem::SimplyTyped),
            "rule premises not satisfied: cannot unify Bool → Bool with Bool"
        );
    }

    #[test]
    fn conditional() {
        let ctx = "b: Bool, x: A";
        let children = vec![
            leaf(ctx, "b", "Bool", Rule::Var),
            leaf(ctx, "x", "A", Rule::Var),
            leaf(ctx, "false", "Bool", Rule::False),
        ];
        let tree = node(ctx, "if b then x else false", "A", Rule::If, children);
        assert_eq!(verdict(&tree, TypeSystem::SimplyTyped), "valid with {A ↦ Bool}");
    }

    #[test]
    fn let_hm() {
        let id = r"\x. x";
        let def = node("", id, "B -> B", Rule::Abs, vec![leaf("x: B", "x", "B", Rule::Var)]);
        let ctx = "id: forall X. X -> X";
        let app = node(ctx, "id true", "Bool", Rule::App, vec![
            leaf(ctx, "id", "Bool -> Bool", Rule::Var),
            leaf(ctx, "true", "Bool", Rule::True),
        ]);
        let tm = format!("let id = {} in id true", id);
        let tree = node("", &tm, "Bool", Rule::Let, vec![def.clone(), app.clone()]);
        let checked = check(&tree, &config(TypeSystem::HindleyMilner));
        assert!(checked.is_valid(), "{}", checked);

        // the bound type is less general than the definition
        let ctx = "id: Bool -> Bool";
        let app = node(ctx, "id true", "Bool", Rule::App, vec![
            leaf(ctx, "id", "Bool -> Bool", Rule::Var),
            leaf(ctx, "true", "Bool", Rule::True),
        ]);
        let tree = node("", &tm, "Bool", Rule::Let, vec![def, app]);
        let checked = check(&tree, &config(TypeSystem::HindleyMilner));
        assert_eq!(checked.failures(), 1);
        assert_eq!(checked.verdict, Error::NotGeneral.to_string());
    }

    #[test]
    fn system_f() {
        let f = TypeSystem::SystemF;
        let body = leaf("X, x: X", "x", "X", Rule::Var);
        let abs = node("X", r"\x: X. x", "X -> X", Rule::Abs, vec![body]);
        let tyabs = node("", r"Lambda X. \x: X. x", "forall Y. Y -> Y", Rule::TyAbs, vec![abs]);
        assert!(check(&tyabs, &config(f)).is_valid());

        let tm = r"(Lambda X. \x: X. x) [Bool]";
        let tyapp = node("", tm, "Bool -> Bool", Rule::TyApp, vec![tyabs.clone()]);
        assert!(check(&tyapp, &config(f)).is_valid());
        let tyapp = node("", tm, "Bool", Rule::TyApp, vec![tyabs]);
        assert!(!check(&tyapp, &config(f)).is_valid());

        // the type variable must not be instantiated
        let body = leaf("X", "true", "Bool", Rule::True);
        let tyabs = node("", "Lambda X. true", "forall X. X", Rule::TyAbs, vec![body]);
        assert_eq!(
            verdict(&tyabs, f),
            "rule premises not satisfied: type variable X escapes its scope"
        );
    }

    #[test]
    fn system_f_quantifiers() {
        let f = TypeSystem::SystemF;
        let ctx = "id: forall X. X -> X";
        // instantiation needs an explicit type application
        let tree = leaf(ctx, "id", "Bool -> Bool", Rule::Var);
        assert_eq!(
            verdict(&tree, f),
            "rule premises not satisfied: cannot unify ∀X. X → X with Bool → Bool"
        );
        assert_eq!(verdict(&tree, TypeSystem::HindleyMilner), "valid");

        let head = leaf(ctx, "id", "forall Y. Y -> Y", Rule::Var);
        let tree = node(ctx, "id [Bool]", "Bool -> Bool", Rule::TyApp, vec![head]);
        let checked = check(&tree, &config(f));
        assert!(checked.is_valid(), "{}", checked);
    }

    #[test]
    fn structure() {
        let tree = leaf("", "true", "Bool", Rule::None);
        assert_eq!(verdict(&tree, TypeSystem::SimplyTyped), "no rule selected");
        let tree = leaf("", "true", "Bool", Rule::False);
        let expected = "rule premises not satisfied: rule false does not apply to this term";
        assert_eq!(verdict(&tree, TypeSystem::SimplyTyped), expected);
        let tree = node("", "true", "Bool", Rule::True, vec![leaf("", "true", "Bool", Rule::True)]);
        let expected = "rule premises not satisfied: expected 0 premises, found 1";
        assert_eq!(verdict(&tree, TypeSystem::SimplyTyped), expected);
    }

    #[test]
    fn containment() {
        // a failing node does not prevent checking its premises
        let premise = leaf("x: Bool", "x", "Bool", Rule::Var);
        let tree = node("", r"\x: Bool. x", "Bool", Rule::Abs, vec![premise]);
        let checked = check(&tree, &config(TypeSystem::SimplyTyped));
        assert!(checked.outcome.is_err());
        assert!(checked.children[0].outcome.is_ok());
        assert_eq!(checked.failures(), 1);

        // a syntax error blocks the descendants
        let premise = leaf("x: Bool", "x", "Bool", Rule::Var);
        let tree = node("", r"\x: Bool. x", "Bool ->", Rule::Abs, vec![premise]);
        let checked = check(&tree, &config(TypeSystem::SimplyTyped));
        assert!(matches!(checked.ty, Field::Syntax { row: 1, col: 7, .. }));
        assert_eq!(checked.children[0].verdict, "prerequisite failed");
        assert_eq!(checked.failures(), 2);
    }

    #[test]
    fn parallel() {
        let ctx = "f: Bool -> Bool";
        let f = leaf(ctx, "f", "Bool -> Bool", Rule::Var);
        let t = leaf(ctx, "true", "Bool", Rule::True);
        let tree = node(ctx, "f true", "Bool", Rule::App, vec![f, t]);
        let config = Config {
            system: TypeSystem::SimplyTyped,
            parallel: true,
        };
        assert!(check(&tree, &config).is_valid());
    }
}
