//! `decaychain` is a semi-modular toolkit for modelling radioactive decay
//! chains
//!
//! The toolkit is split into member crates that are re-exported here behind
//! features:
//!
//! - `nuclide` - isotope records, the validated registry, and the JSON store
//! - `decay` - the decay stepping engine, time units, and plot data
//!
//! The small formatting and input helpers in [utils] are always available.
//!
//! ```rust, ignore
//! use decaychain::decay::{run, MassDistribution};
//! use decaychain::nuclide::read_registry;
//!
//! let registry = read_registry("isotope_database.json")?;
//! let initial = MassDistribution::from([("Ra-225".to_string(), 10.0)]);
//! let series = run(&initial, 86_400.0, 30, &registry)?;
//! ```
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use decaychain_utils as utils;

#[cfg(feature = "nuclide")]
#[cfg_attr(docsrs, doc(cfg(feature = "nuclide")))]
#[doc(inline)]
pub use decaychain_nuclide as nuclide;

#[cfg(feature = "decay")]
#[cfg_attr(docsrs, doc(cfg(feature = "decay")))]
#[doc(inline)]
pub use decaychain_decay as decay;
