//! Rule trees, i.e. derivation trees of typing judgments given as text.
//!
//! Checking a rule tree happens in two passes:
//! the first pass parses the text fields of all nodes, yielding a [`Parsed`] tree,
//! and the second pass checks the rule of every node, yielding a [`Checked`] tree.
//! The second pass proceeds from the leaves to the root,
//! so that every node holds under the substitutions of its premises.

mod check;
mod parse;

pub use check::{Checked, Error, Field};
pub use parse::Parsed;

use crate::{Term, TypeSystem};
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/// Node of a rule tree, whose children are the premises of the node.
///
/// ~~~
/// # use derivo::tree::{Rule, RuleTree};
/// let tree: RuleTree = serde_json::from_str(r#"{
///     "term": "true",
///     "type": "Bool",
///     "rule": "true"
/// }"#).unwrap();
/// assert_eq!(tree.rule, Rule::True);
/// assert!(tree.context.is_empty() && tree.children.is_empty());
/// ~~~
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTree {
    pub context: String,
    pub term: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub rule: Rule,
    pub children: Vec<RuleTree>,
}

/// Typing rule selected for a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    #[default]
    None,
    Var,
    Abs,
    App,
    If,
    TyAbs,
    TyApp,
    Let,
    True,
    False,
}

impl Rule {
    /// Number of premises of the rule.
    pub fn arity(self) -> usize {
        match self {
            Self::None | Self::Var | Self::True | Self::False => 0,
            Self::Abs | Self::TyAbs | Self::TyApp => 1,
            Self::App | Self::Let => 2,
            Self::If => 3,
        }
    }

    /// Return true if the rule can derive a type for the term.
    pub fn fits(self, tm: &Term) -> bool {
        matches!(
            (self, tm),
            (Self::Var, Term::Var(..))
                | (Self::Abs, Term::Abs(..))
                | (Self::App, Term::App(..))
                | (Self::If, Term::If(..))
                | (Self::TyAbs, Term::TyAbs(..))
                | (Self::TyApp, Term::TyApp(..))
                | (Self::Let, Term::Let(..))
                | (Self::True, Term::Const(_, true))
                | (Self::False, Term::Const(_, false))
        )
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Var => "var",
            Self::Abs => "abs",
            Self::App => "app",
            Self::If => "if",
            Self::TyAbs => "tyabs",
            Self::TyApp => "tyapp",
            Self::Let => "let",
            Self::True => "true",
            Self::False => "false",
        };
        s.fmt(f)
    }
}

/// Configuration of rule tree checking.
#[derive(Copy, Clone, Debug, Default)]
pub struct Config {
    pub system: TypeSystem,
    /// check children of a node in parallel
    pub parallel: bool,
}

/// Parse and check a rule tree.
pub fn check(tree: &RuleTree, config: &Config) -> Checked {
    Checked::new(tree, &Parsed::new(tree), config)
}
