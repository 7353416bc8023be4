//! Isotope records and reference data for decay chain modelling
//!
//! This crate holds the read-only reference data that every simulation runs
//! against, and the persisted JSON store those data come from.
//!
//! ## Core concepts
//!
//! An [IsotopeRecord] describes a single nuclide. It is either stable, or
//! unstable with a half-life and one or more [DecayBranch]es, each pointing at
//! a product isotope by its [ShortId] (`Symbol-MassNumber`, e.g. `U-238`).
//!
//! A [Registry] is an immutable table of records keyed by short id. An
//! [IsotopeStore] is the editable, file-backed counterpart used to create and
//! modify records, from which registry snapshots are taken.
//!
//! ## Quickstart example
//!
//! ```rust, no_run
//! # use decaychain_nuclide::read_registry;
//! // Read and validate every record in the store
//! let registry = read_registry("database/isotope_database.json").unwrap();
//!
//! // Inspect a record
//! println!("{}", registry.get("Ra-225").unwrap());
//! ```
//!
//! ## Persisted shape
//!
//! The store is a JSON object keyed by short id:
//!
//! ```json
//! {
//!     "Ra-225": {
//!         "name": "Radium",
//!         "symbol": "Ra",
//!         "mass_number": 225,
//!         "proton_number": 88,
//!         "neutron_number": 137,
//!         "short_id": "Ra-225",
//!         "reference": null,
//!         "half_life": 1287360.0,
//!         "decays": {
//!             "beta_minus": {
//!                 "product": "Ac-225",
//!                 "probability": 1.0,
//!                 "released_energy": 0.36
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! A `null` half-life means the isotope is stable. An unstable isotope without
//! decays, a missing product or probability, a non-positive half-life, or a
//! probability outside of (0, 1] are all rejected as a
//! [MalformedRecord](Error::MalformedRecord) and fail the whole load.

// Split into subfiles for development, but anything important is re-exported
mod error;
mod raw;
mod record;
mod registry;
mod short_id;
mod store;

// Inline anything important for a nice public API
#[doc(inline)]
pub use error::{Error, Malformed, Result};

#[doc(inline)]
pub use record::{Decay, DecayBranch, IsotopeRecord};

#[doc(inline)]
pub use raw::{RawBranch, RawIsotope};

#[doc(inline)]
pub use registry::{read_registry, write_registry, Registry};

#[doc(inline)]
pub use short_id::ShortId;

#[doc(inline)]
pub use store::IsotopeStore;
