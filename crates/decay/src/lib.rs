//! Discrete-step simulation of radioactive decay chains
//!
//! Given the initial mass of one or more isotopes, a time step, and a number
//! of steps, the simulator produces the mass of every isotope in the chain
//! after each step. Reference data come from a
//! [Registry](decaychain_nuclide::Registry).
//!
//! ## Quickstart example
//!
//! ```rust, no_run
//! # use decaychain_nuclide::read_registry;
//! # use decaychain_decay::{run, MassDistribution, TimeUnit};
//! let registry = read_registry("database/isotope_database.json").unwrap();
//!
//! // 10 kg of Ra-225, one day at a time for 60 days
//! let initial = MassDistribution::from([("Ra-225".into(), 10.0)]);
//! let series = run(&initial, 86_400.0, 60, &registry).unwrap();
//!
//! // Plot data with the time axis in days
//! for (id, curve) in series.curves(TimeUnit::Day) {
//!     println!("{id}: {:?}", curve.mass);
//! }
//! ```
//!
//! ## Decay law
//!
//! Every step, an isotope with mass `m` and half-life `t½` keeps
//!
//! ```text
//! remaining = m * 2^(-dt / t½)
//! ```
//!
//! and each decay branch passes `(m - remaining) * probability` to its product.
//! Stable isotopes keep their mass. Contributions to the same isotope are
//! summed, and isotopes with zero mass are dropped from the next step.
//!
//! Branching ratios that do not sum to one are not corrected, so mass is only
//! conserved when the reference data are consistent.
//!
//! ## Progress and cancellation
//!
//! A [Monitor] passed to a [Simulator] is told about every completed step and
//! may cancel the run, in which case [Error::Cancelled] is returned and no
//! partial series is kept.

// Split into subfiles for development, but anything important is re-exported
mod distribution;
mod error;
mod params;
mod series;
mod simulator;
mod units;

// Inline anything important for a nice public API
#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use distribution::{total_mass, MassDistribution};

#[doc(inline)]
pub use params::{read_params, write_params, SimulationParams};

#[doc(inline)]
pub use series::{Curve, TimeSeries};

#[doc(inline)]
pub use simulator::{run, Control, Monitor, NoMonitor, Simulator};

#[doc(inline)]
pub use units::TimeUnit;
