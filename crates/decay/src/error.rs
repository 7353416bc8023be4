//! Result and Error types for the decay module

/// Type alias for `Result<T, decay::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `decaychain-decay`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A seed or decay product has no registry entry
    #[error("unknown isotope \"{id}\"")]
    UnknownIsotope { id: String },

    /// Time step is zero, negative, or not finite
    #[error("time step must be a positive number of seconds, found {0}")]
    InvalidTimeStep(f64),

    /// Initial mass is negative or not finite
    #[error("initial mass for \"{id}\" must be a non-negative number, found {mass}")]
    InvalidMass { id: String, mass: f64 },

    /// The run was stopped by its monitor
    #[error("simulation cancelled after step {step}")]
    Cancelled { step: usize },

    /// Time unit symbol not recognised
    #[error("unknown time unit \"{0}\", expected one of s, min, h, d, a")]
    UnknownTimeUnit(String),

    /// Failure in the reference data
    #[error(transparent)]
    Nuclide(#[from] decaychain_nuclide::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),
}
