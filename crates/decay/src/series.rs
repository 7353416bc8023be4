// standard library
use std::collections::{BTreeMap, BTreeSet};

// internal modules
use crate::distribution::{total_mass, MassDistribution};
use crate::units::TimeUnit;

// external crates
use serde::Serialize;

/// Mass of every isotope after each step of a run
///
/// Entry `0` is the initial distribution and entry `k` is the state after `k`
/// steps, i.e. at `k * time_step` seconds. A series always has at least one
/// entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Step length (s)
    time_step: f64,
    /// One distribution per step, starting with the initial state
    distributions: Vec<MassDistribution>,
}

/// Plot data for a single isotope
///
/// `time` and `mass` are the same length, with one point for every step at
/// which the isotope was present.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Curve {
    /// Time of each point in the requested unit
    pub time: Vec<f64>,
    /// Mass (kg) at each point
    pub mass: Vec<f64>,
}

impl TimeSeries {
    pub(crate) fn new(time_step: f64, distributions: Vec<MassDistribution>) -> Self {
        Self {
            time_step,
            distributions,
        }
    }

    /// Step length (s)
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Every distribution, initial state first
    pub fn distributions(&self) -> &[MassDistribution] {
        &self.distributions
    }

    /// Distribution after `step` steps, if the run went that far
    pub fn get(&self, step: usize) -> Option<&MassDistribution> {
        self.distributions.get(step)
    }

    /// Distribution after the final step
    pub fn last(&self) -> &MassDistribution {
        &self.distributions[self.distributions.len() - 1]
    }

    /// Number of distributions, one more than the number of steps
    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    /// Always false, the initial distribution is always present
    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }

    /// Iterate over distributions in step order
    pub fn iter(&self) -> std::slice::Iter<'_, MassDistribution> {
        self.distributions.iter()
    }

    /// Time of every step in the requested unit
    pub fn times(&self, unit: TimeUnit) -> Vec<f64> {
        (0..self.len())
            .map(|step| unit.from_seconds(step as f64 * self.time_step))
            .collect()
    }

    /// Total mass (kg) at every step
    pub fn total_mass(&self) -> Vec<f64> {
        self.distributions.iter().map(total_mass).collect()
    }

    /// Every isotope that appears at any step
    pub fn isotopes(&self) -> BTreeSet<&str> {
        self.distributions
            .iter()
            .flat_map(|d| d.keys().map(String::as_str))
            .collect()
    }

    /// Per-isotope plot data with time in the requested unit
    ///
    /// Each curve has a point for every step the isotope is present,
    /// including the initial distribution.
    ///
    /// ```rust
    /// # use decaychain_nuclide::{DecayBranch, IsotopeRecord, Registry};
    /// # use decaychain_decay::{run, MassDistribution, TimeUnit};
    /// # let registry = Registry::from_records([
    /// #     IsotopeRecord::unstable(
    /// #         "Radium", "Ra", 225, 1_287_360.0,
    /// #         [("beta_minus", DecayBranch::new("Ac-225", 1.0, None).unwrap())],
    /// #     ).unwrap(),
    /// #     IsotopeRecord::stable("Actinium", "Ac", 225).unwrap(),
    /// # ]).unwrap();
    /// let initial = MassDistribution::from([("Ra-225".into(), 10.0)]);
    /// let series = run(&initial, 1_287_360.0, 2, &registry).unwrap();
    ///
    /// let curves = series.curves(TimeUnit::Day);
    /// assert_eq!(curves["Ra-225"].mass, vec![10.0, 5.0, 2.5]);
    /// assert_eq!(curves["Ac-225"].time, vec![14.9, 29.8]);
    /// ```
    pub fn curves(&self, unit: TimeUnit) -> BTreeMap<String, Curve> {
        let mut curves: BTreeMap<String, Curve> = BTreeMap::new();

        for (time, distribution) in self.times(unit).into_iter().zip(&self.distributions) {
            for (id, &mass) in distribution {
                let curve = curves.entry(id.clone()).or_default();
                curve.time.push(time);
                curve.mass.push(mass);
            }
        }

        curves
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a MassDistribution;
    type IntoIter = std::slice::Iter<'a, MassDistribution>;

    fn into_iter(self) -> Self::IntoIter {
        self.distributions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TimeSeries {
        TimeSeries::new(
            3_600.0,
            vec![
                MassDistribution::from([("Pb-209".into(), 2.0)]),
                MassDistribution::from([("Pb-209".into(), 1.0), ("Bi-209".into(), 1.0)]),
                MassDistribution::from([("Bi-209".into(), 2.0)]),
            ],
        )
    }

    #[test]
    fn times_in_unit() {
        assert_eq!(series().times(TimeUnit::Hour), vec![0.0, 1.0, 2.0]);
        assert_eq!(series().times(TimeUnit::Minute), vec![0.0, 60.0, 120.0]);
    }

    #[test]
    fn curves_keep_first_sample() {
        let curves = series().curves(TimeUnit::Hour);

        assert_eq!(curves["Pb-209"].time, vec![0.0, 1.0]);
        assert_eq!(curves["Pb-209"].mass, vec![2.0, 1.0]);
        assert_eq!(curves["Bi-209"].time, vec![1.0, 2.0]);
        assert_eq!(curves["Bi-209"].mass, vec![1.0, 2.0]);
    }

    #[test]
    fn summaries() {
        let series = series();
        assert_eq!(series.len(), 3);
        assert_eq!(series.total_mass(), vec![2.0, 2.0, 2.0]);
        assert_eq!(
            series.isotopes().into_iter().collect::<Vec<_>>(),
            vec!["Bi-209", "Pb-209"]
        );
        assert_eq!(series.last()["Bi-209"], 2.0);
        assert!(series.get(3).is_none());
    }
}
