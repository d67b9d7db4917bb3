//! Typing contexts.

use crate::kernel::{Error, Subst};
use crate::{Stack, Type};
use std::collections::BTreeSet;

/// What a name in a context stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Term variable without type
    Name,
    /// Term variable with type
    Var(Type),
    /// Type variable
    TyVar,
}

/// Sequence of named bindings, where index 0 refers to the most recent binding.
///
/// The type of a binding lives in the context *below* the binding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context(Stack<(String, Binding)>);

impl Context {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the context extended with a new binding.
    pub fn with(&self, x: impl Into<String>, b: Binding) -> Self {
        Self(self.0.with((x.into(), b)))
    }

    /// Return the binding with the given index.
    pub fn get(&self, i: usize) -> Option<&(String, Binding)> {
        self.0.get(i)
    }

    /// Return the type of the term variable with the given index.
    ///
    /// The type is shifted to live in the whole context.
    pub fn get_type(&self, i: usize) -> Option<Type> {
        match self.get(i)? {
            (_, Binding::Var(ty)) => Some(ty.shift(i as isize + 1)),
            (_, Binding::Name | Binding::TyVar) => None,
        }
    }

    /// Split the context into its most recent binding and the rest.
    pub fn split_top(&self) -> Option<(Self, (String, Binding))> {
        let mut rest = self.0.clone();
        let top = rest.pop()?;
        Some((Self(rest), top))
    }

    /// Iterate through the bindings, starting from the most recent one.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &(String, Binding)> + ExactSizeIterator {
        self.0.iter()
    }

    /// Return the free type names of all types in the context.
    pub fn ftv(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for (_, b) in self.iter() {
            if let Binding::Var(ty) = b {
                ty.ftv_into(&mut names)
            }
        }
        names
    }

    /// Apply a substitution to all types in the context.
    ///
    /// The types of the substitution live in the whole context.
    /// Fail if the type of a binding would refer to a type variable bound after it.
    pub fn apply(&self, subst: &Subst) -> Result<Self, Error> {
        let len = self.len();
        let bindings = self.iter().rev().enumerate().map(|(k, (x, b))| {
            let b = match b {
                Binding::Var(ty) => {
                    // number of bindings above and including this one
                    let d = len - k;
                    let ty = subst.apply(&ty.shift(d as isize));
                    let out_of_scope = |i| {
                        let y = self.get(i).map(|(y, _)| y.clone()).unwrap_or_default();
                        Error::Scope(y, x.clone())
                    };
                    match ty.unshift(d) {
                        Some(ty) => Binding::Var(ty),
                        None => return Err(out_of_scope(ty.min_free_var().unwrap_or_default())),
                    }
                }
                b => b.clone(),
            };
            Ok((x.clone(), b))
        });
        bindings.collect()
    }
}

impl FromIterator<(String, Binding)> for Context {
    /// Build a context whose last binding is the most recent one.
    fn from_iter<I: IntoIterator<Item = (String, Binding)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
