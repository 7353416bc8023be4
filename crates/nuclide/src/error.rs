//! Result and Error types for the nuclide module

/// Type alias for `Result<T, nuclide::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `decaychain-nuclide`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// A referenced short id has no matching registry entry
    #[error("unknown isotope \"{id}\"")]
    UnknownIsotope { id: String },

    /// A record shape was rejected while building the registry
    #[error("malformed record \"{id}\": {reason}")]
    MalformedRecord { id: String, reason: Malformed },

    /// Generic error type for short id parser results
    #[error("parser failed: {0}")]
    ParseError(String),
}

/// Reasons an isotope record is rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Malformed {
    /// Required field is absent or null
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    /// Field could not be decoded into the expected shape
    #[error("could not decode record ({0})")]
    Shape(String),

    /// Half-life given without any decay branches
    #[error("unstable isotope has no decays defined")]
    MissingDecays,

    /// Decay mapping present but empty
    #[error("unstable isotope has an empty decay mapping")]
    EmptyDecays,

    /// Half-life is zero, negative, or not a number
    #[error("half-life must be positive, found {0}")]
    NonPositiveHalfLife(f64),

    /// Branching ratio not in (0, 1]
    #[error("probability for \"{label}\" must be in (0, 1], found {value}")]
    ProbabilityOutOfRange { label: String, value: f64 },

    /// Symbol or product is not a valid `Symbol-MassNumber` id
    #[error("invalid short id \"{0}\"")]
    InvalidShortId(String),

    /// Stored short id disagrees with the symbol and mass number
    #[error("short id \"{found}\" does not match symbol and mass number")]
    ShortIdMismatch { found: String },

    /// Registry key disagrees with the record's own short id
    #[error("stored under key \"{key}\"")]
    KeyMismatch { key: String },

    /// Same short id defined more than once
    #[error("duplicate short id")]
    Duplicate,

    /// Two decay labels normalise to the same key
    #[error("decay label \"{0}\" duplicates an earlier label")]
    DuplicateLabel(String),
}
