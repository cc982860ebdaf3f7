//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = TaggerError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum TaggerError {
    InvalidArgument(InvalidArgumentError),
    InvalidContext(InvalidContextError),
    Corpus(CorpusError),
    NoPath(NoPathError),
    IOError(std::io::Error),
}

impl TaggerError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_context<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidContext(InvalidContextError { msg: msg.into() })
    }

    pub(crate) fn corpus<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Corpus(CorpusError { msg: msg.into() })
    }

    pub(crate) fn no_path<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::NoPath(NoPathError { msg: msg.into() })
    }
}

impl fmt::Display for TaggerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => e.fmt(f),
            Self::InvalidContext(e) => e.fmt(f),
            Self::Corpus(e) => e.fmt(f),
            Self::NoPath(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for TaggerError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when a trigram context is malformed.
#[derive(Debug)]
pub struct InvalidContextError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidContextError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidContextError: {}", self.msg)
    }
}

impl Error for InvalidContextError {}

/// Error used when treebank input cannot be parsed.
#[derive(Debug)]
pub struct CorpusError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CorpusError: {}", self.msg)
    }
}

impl Error for CorpusError {}

/// Error used when no tag path connects the trellis start and end states.
#[derive(Debug)]
pub struct NoPathError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for NoPathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NoPathError: {}", self.msg)
    }
}

impl Error for NoPathError {}

impl From<std::io::Error> for TaggerError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
