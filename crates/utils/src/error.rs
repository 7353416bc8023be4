//! Result and Error types for the utils module

/// Type alias for `Result<T, utils::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, Clone)]
/// The error type for `decaychain_utils`
pub enum Error {
    /// Field was left empty where a value is required
    MissingInput,

    /// Text could not be converted to the requested type
    InvalidInput { text: String },
}

// error boilerplate
impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Error::MissingInput => write!(fmt, "missing input"),
            Error::InvalidInput { text } => write!(fmt, "invalid input \"{text}\""),
        }
    }
}

// implement standard error trait to use with ? operator
impl std::error::Error for Error {}
