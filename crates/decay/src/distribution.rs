//! Mass distributions and small helpers over them

// standard library
use std::collections::BTreeMap;

/// Isotope short id to mass (kg)
///
/// Ordered by short id so that output and iteration are deterministic.
pub type MassDistribution = BTreeMap<String, f64>;

/// Sum of every mass in a distribution
///
/// ```rust
/// # use decaychain_decay::{total_mass, MassDistribution};
/// let masses = MassDistribution::from([("Ra-225".into(), 7.5), ("Ac-225".into(), 2.5)]);
/// assert_eq!(total_mass(&masses), 10.0);
/// ```
pub fn total_mass(distribution: &MassDistribution) -> f64 {
    distribution.values().sum()
}
