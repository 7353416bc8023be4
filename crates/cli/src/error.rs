//! Result and Error types for the command line

/// Type alias for `Result<T, cli::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `decaychain` binary
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Simulation failed or was given bad parameters
    #[error(transparent)]
    Decay(#[from] decaychain_decay::Error),

    /// Isotope store could not be read
    #[error(transparent)]
    Nuclide(#[from] decaychain_nuclide::Error),

    /// A required run parameter was given nowhere
    #[error("no {0} given, set it on the command line or in a parameter file")]
    MissingParameter(&'static str),

    /// Progress bar could not be built
    #[error("failed to initialise progress bar: {0}")]
    Progress(String),

    /// Logger was already installed
    #[error("failed to initialise logger")]
    Logger(#[from] log::SetLoggerError),

    /// Failure writing CSV output
    #[error("failed to write CSV")]
    Csv(#[from] csv::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),
}
