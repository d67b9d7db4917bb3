use super::RuleTree;
use crate::{Context, Error, Term, Type};

/// Rule tree whose text fields have been parsed.
///
/// If a field of a node fails to parse,
/// all fields of its descendants fail with [`Error::Prerequisite`].
#[derive(Clone, Debug)]
pub struct Parsed {
    pub context: Result<Context, Error>,
    pub term: Result<Term, Error>,
    pub ty: Result<Type, Error>,
    pub children: Vec<Parsed>,
}

impl Parsed {
    pub fn new(tree: &RuleTree) -> Self {
        Self::parse(tree, false)
    }

    fn parse(tree: &RuleTree, blocked: bool) -> Self {
        if blocked {
            return Self::blocked(tree);
        }
        let context = Context::parse(&tree.context);
        let (term, ty) = match &context {
            Ok(ctx) => (Term::parse(&tree.term, ctx), Type::parse(&tree.ty, ctx)),
            Err(_) => (Err(Error::Prerequisite), Err(Error::Prerequisite)),
        };
        let blocked = context.is_err() || term.is_err() || ty.is_err();
        let children = tree.children.iter().map(|c| Self::parse(c, blocked)).collect();
        Self {
            context,
            term,
            ty,
            children,
        }
    }

    fn blocked(tree: &RuleTree) -> Self {
        Self {
            context: Err(Error::Prerequisite),
            term: Err(Error::Prerequisite),
            ty: Err(Error::Prerequisite),
            children: tree.children.iter().map(Self::blocked).collect(),
        }
    }

    /// Return the parsed context, term and type if all of them were parsed.
    pub fn judgment(&self) -> Option<(&Context, &Term, &Type)> {
        match (&self.context, &self.term, &self.ty) {
            (Ok(ctx), Ok(tm), Ok(ty)) => Some((ctx, tm, ty)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(context: &str, term: &str, ty: &str, children: Vec<RuleTree>) -> RuleTree {
        let (context, term, ty) = (context.into(), term.into(), ty.into());
        let rule = Default::default();
        RuleTree {
            context,
            term,
            ty,
            rule,
            children,
        }
    }

    #[test]
    fn prerequisites() {
        let leaf = node("x: Bool", "x", "Bool", Vec::new());
        let bad = node("x: Bool", "x )", "Bool", vec![leaf.clone()]);
        let tree = node("", "true", "Bool", vec![bad, leaf]);
        let parsed = Parsed::new(&tree);
        assert!(parsed.judgment().is_some());

        let bad = &parsed.children[0];
        assert!(bad.context.is_ok());
        assert!(matches!(bad.term, Err(Error::Syntax(_))));
        assert_eq!(bad.children[0].context.as_ref().err(), Some(&Error::Prerequisite));

        // siblings are parsed independently
        assert!(parsed.children[1].judgment().is_some());
    }

    #[test]
    fn context_failure() {
        let parsed = Parsed::new(&node("x: ", "x", "Bool", Vec::new()));
        assert!(matches!(parsed.context, Err(Error::Syntax(_))));
        assert_eq!(parsed.term.as_ref().err(), Some(&Error::Prerequisite));
        assert_eq!(parsed.ty.as_ref().err(), Some(&Error::Prerequisite));
    }
}
