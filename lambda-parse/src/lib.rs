//! Parser for terms, types and contexts of typed lambda calculi.
//!
//! The accepted syntax covers the simply typed lambda calculus,
//! Hindley-Milner and System F.
//! Users may type operators either in ASCII or in Unicode;
//! [`preprocess`] rewrites the ASCII forms before parsing.
//!
//! Example usage:
//!
//! ~~~
//! use lambda_parse::{preprocess, Error, Parse, Term, Type};
//!
//! let tm = preprocess(r"Lambda X. \x: X. x");
//! let tm = Term::parse_str(&tm)?;
//! assert_eq!(tm.to_string(), "(ΛX. (λx: X. x))");
//!
//! let ty = preprocess("forall X. X -> X");
//! let ty = Type::parse_str(&ty)?;
//! assert_eq!(ty.to_string(), "∀X. X → X");
//! # Ok::<_, Error>(())
//! ~~~
#![no_std]

extern crate alloc;

pub mod lex;
mod parse;
mod preprocess;
pub mod term;

pub use lex::Token;
pub use parse::{Error, Expected, Parse, Parser};
pub use preprocess::preprocess;
pub use term::{Binding, Context, Pos, Term, Type};
