#![forbid(unsafe_code)]

//! Type inference and derivation checking for typed lambda calculi.
//!
//! This library supports three type systems, namely
//! the simply typed lambda calculus,
//! Hindley-Milner (with let-polymorphism), and
//! System F (with explicit type abstraction and application).
//!
//! # Usage
//!
//! Contexts, terms and types are given as text.
//! The text is parsed by the [`lambda_parse`] crate and then scoped,
//! replacing names by de Bruijn indices with respect to a [`Context`].
//! ASCII notation such as `\x. x` or `A -> B` is accepted as well
//! and translated to its Unicode counterpart (`λx. x`, `A → B`).
//!
//! Once we have a term, we can infer its principal type with [`kernel::type_of`]:
//!
//! ~~~
//! # use derivo::{kernel, Context, Term, Type};
//! let ctx = Context::parse("not: Bool -> Bool")?;
//! let tm = Term::parse(r"let twice = \f. \x. f (f x) in twice not", &ctx)?;
//! let ty = kernel::type_of(&ctx, &tm)?;
//! assert!(ty.alpha_eq(&Type::parse("Bool -> Bool", &ctx)?));
//! assert_eq!(ty.to_string(), "Bool → Bool");
//! # Ok::<_, derivo::Error>(())
//! ~~~
//!
//! Derivations are given as [rule trees](tree::RuleTree),
//! where every node carries a typing judgment and the rule that derives it
//! from the judgments of its children.
//! Checking a rule tree yields a [verdict](tree::Checked) for every node:
//!
//! ~~~
//! # use derivo::tree::{self, Config, Rule, RuleTree};
//! let premise = RuleTree {
//!     context: "x: Bool".into(),
//!     term: "x".into(),
//!     ty: "Bool".into(),
//!     rule: Rule::Var,
//!     children: Vec::new(),
//! };
//! let tree = RuleTree {
//!     term: r"\x: Bool. x".into(),
//!     ty: "Bool -> Bool".into(),
//!     rule: Rule::Abs,
//!     children: vec![premise],
//!     ..Default::default()
//! };
//! let checked = tree::check(&tree, &Config::default());
//! assert!(checked.is_valid());
//! assert_eq!(checked.verdict, "valid");
//! ~~~
//!
//! # Organisation
//!
//! * The [`kernel`] module contains unification, generalization and type inference,
//! * the [`scope`] module turns parsed structures into de Bruijn structures,
//! * the [`show`] module prints de Bruijn structures with names, and
//! * the [`tree`] module checks rule trees.

#[macro_use]
extern crate log;

mod context;
pub mod error;
pub mod kernel;
pub mod scope;
pub mod show;
mod stack;
pub mod system;
mod term;
pub mod tree;
mod ty;

pub use context::{Binding, Context};
pub use error::Error;
pub use kernel::Subst;
pub use show::Show;
pub use stack::Stack;
pub use system::TypeSystem;
pub use term::{Pos, Term};
pub use ty::Type;
