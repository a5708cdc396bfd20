use thiserror::Error;

/// Canonical result for every lazyseq crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument value was rejected at the call that received it, before
    /// any lazy work was scheduled.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("sequence contains no elements")]
    EmptySequence,

    #[error("sequence contains no matching element")]
    NoMatch,

    #[error("sequence contains more than one matching element")]
    MoreThanOne,

    #[error("index {index} is out of range")]
    OutOfRange { index: isize },

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// `index` is the position in the source of the element whose key collided.
    #[error("an element with the same key has already been added (source index {index})")]
    DuplicateKey { index: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
