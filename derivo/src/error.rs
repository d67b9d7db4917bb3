//! Common error type.

use crate::kernel::Error as TypeError;
use crate::scope::Error as ScopeError;
use crate::system::Error as SystemError;
use crate::tree::Error as RuleError;
use core::fmt::{self, Display};
use lambda_parse::Error as SyntaxError;

/// Common error type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Syntax(SyntaxError),
    Scope(ScopeError),
    Type(TypeError),
    System(SystemError),
    Rule(RuleError),
    /// something that this depends on failed before
    Prerequisite,
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

impl From<ScopeError> for Error {
    fn from(err: ScopeError) -> Self {
        Self::Scope(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Self::Type(err)
    }
}

impl From<SystemError> for Error {
    fn from(err: SystemError) -> Self {
        Self::System(err)
    }
}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        Self::Rule(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "syntax error: {}", e),
            Self::Scope(e) => e.fmt(f),
            Self::Type(e) => e.fmt(f),
            Self::System(e) => e.fmt(f),
            Self::Rule(e) => e.fmt(f),
            Self::Prerequisite => "prerequisite failed".fmt(f),
        }
    }
}

impl std::error::Error for Error {}
