use core::fmt::{self, Display};
use std::io;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Derivo(derivo::Error),
    /// number of rule trees containing nodes whose rules do not hold
    Unverified(usize),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<derivo::Error> for Error {
    fn from(err: derivo::Error) -> Self {
        Self::Derivo(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Json(e) => write!(f, "invalid rule tree: {}", e),
            Self::Derivo(e) => e.fmt(f),
            Self::Unverified(n) => write!(f, "{} rule tree(s) could not be verified", n),
        }
    }
}

impl std::error::Error for Error {}
