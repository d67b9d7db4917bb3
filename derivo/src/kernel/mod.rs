//! Unification, generalization and type inference.

mod fresh;
mod generalize;
mod infer;
pub mod subst;
mod unify;

pub use fresh::Fresh;
pub use generalize::{are_hm_types_equivalent, gen, inst, is_specialized_type};
pub use infer::{keep_rigid, type_of, Infer};
pub use subst::Subst;
pub use unify::{unify, unify_rigid, unify_with};

use crate::show::Show;
use crate::{Context, Type};
use core::fmt::{self, Display};

/// Type error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// a name would have to be replaced by a type containing it
    Occurs(String, Type),
    Incompatible(Type, Type),
    /// variable with the given index has no type in the context
    Unbound(usize),
    /// type application to a term whose type is not universal
    ForallExpected(Type),
    /// type variable of a type abstraction was instantiated or leaked into the context
    Escape(String),
    /// type variable that would occur in the type of a term variable bound before it
    Scope(String, String),
}

impl Error {
    /// Display the error, printing its types in the given context.
    pub fn show<'a>(&'a self, ctx: &'a Context) -> impl Display + 'a {
        ShowError(self, ctx)
    }
}

struct ShowError<'a>(&'a Error, &'a Context);

impl Display for ShowError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ctx = self.1;
        match self.0 {
            Error::Occurs(x, ty) => {
                write!(f, "occurs check failed: {} occurs in {}", x, ty.show(ctx))
            }
            Error::Incompatible(a, b) => {
                write!(f, "cannot unify {} with {}", a.show(ctx), b.show(ctx))
            }
            Error::Unbound(i) => match ctx.get(*i) {
                Some((x, _)) => write!(f, "variable {} has no type", x),
                None => write!(f, "unbound variable with index {}", i),
            },
            Error::ForallExpected(ty) => {
                write!(f, "expected universal type, found {}", ty.show(ctx))
            }
            Error::Escape(x) => write!(f, "type variable {} escapes its scope", x),
            Error::Scope(x, y) => write!(f, "type variable {} is not in scope of {}", x, y),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.show(&Context::new()).fmt(f)
    }
}
