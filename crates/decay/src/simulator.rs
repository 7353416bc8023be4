// standard library
use std::collections::HashMap;
use std::fmt;

// internal modules
use crate::distribution::MassDistribution;
use crate::error::{Error, Result};
use crate::series::TimeSeries;

// decaychain modules
use decaychain_nuclide::{Decay, IsotopeRecord, Registry};

// external crates
use log::{debug, info, trace};

/// Upper bound on the distributions reserved before a run starts
const MAX_RESERVED_STEPS: usize = 1 << 16;

/// Decision returned by a [Monitor] after every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Carry on with the next step
    Continue,
    /// Abort the run, discarding everything computed so far
    Cancel,
}

/// Observer for the progress of a run
///
/// A monitor is handed to a [Simulator] by the caller and is the only way a
/// run reports progress or can be stopped early. Step boundaries are the only
/// cancellation points.
///
/// Closures of the form `FnMut(usize, &MassDistribution) -> Control` are
/// monitors too.
///
/// ```rust
/// # use decaychain_decay::{Control, MassDistribution, Monitor};
/// struct StopAfter(usize);
///
/// impl Monitor for StopAfter {
///     fn step(&mut self, step: usize, _: &MassDistribution) -> Control {
///         match step < self.0 {
///             true => Control::Continue,
///             false => Control::Cancel,
///         }
///     }
/// }
/// ```
pub trait Monitor {
    /// Called once before the first step with the number of steps to run
    fn start(&mut self, _step_count: usize) {}

    /// Called after every completed step with the distribution it produced
    fn step(&mut self, step: usize, distribution: &MassDistribution) -> Control;

    /// Called once after the final step of a run that was not cancelled
    fn finish(&mut self) {}
}

/// Monitor that never reports and never cancels
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMonitor;

impl Monitor for NoMonitor {
    fn step(&mut self, _: usize, _: &MassDistribution) -> Control {
        Control::Continue
    }
}

impl<F> Monitor for F
where
    F: FnMut(usize, &MassDistribution) -> Control,
{
    fn step(&mut self, step: usize, distribution: &MassDistribution) -> Control {
        self(step, distribution)
    }
}

/// Discrete-step decay chain simulator
///
/// The simulator borrows a [Registry] for the whole run, so the reference data
/// cannot change underneath it. Each step applies the exponential decay law to
/// every isotope with a positive mass and moves the decayed mass onto the
/// products in proportion to the branching ratios.
///
/// ```rust
/// # use decaychain_nuclide::{DecayBranch, IsotopeRecord, Registry};
/// # use decaychain_decay::{Control, MassDistribution, Simulator};
/// let registry = Registry::from_records([
///     IsotopeRecord::unstable(
///         "Radium", "Ra", 225, 1_287_360.0,
///         [("beta_minus", DecayBranch::new("Ac-225", 1.0, None).unwrap())],
///     ).unwrap(),
///     IsotopeRecord::stable("Actinium", "Ac", 225).unwrap(),
/// ]).unwrap();
///
/// let initial = MassDistribution::from([("Ra-225".into(), 10.0)]);
///
/// // print every step as it completes
/// let mut monitor = |step: usize, masses: &MassDistribution| {
///     println!("step {step}: {masses:?}");
///     Control::Continue
/// };
///
/// let series = Simulator::new(&registry)
///     .with_monitor(&mut monitor)
///     .run(&initial, 1_287_360.0, 1)
///     .unwrap();
///
/// assert_eq!(series.last()["Ra-225"], 5.0);
/// assert_eq!(series.last()["Ac-225"], 5.0);
/// ```
pub struct Simulator<'a> {
    registry: &'a Registry,
    monitor: Option<&'a mut dyn Monitor>,
}

impl<'a> Simulator<'a> {
    /// Simulator over `registry` with no monitor attached
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            monitor: None,
        }
    }

    /// Attach a monitor to observe and optionally cancel runs
    pub fn with_monitor(mut self, monitor: &'a mut dyn Monitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Run `step_count` steps of `time_step` seconds from `initial`
    ///
    /// Returns `step_count + 1` distributions, the first being `initial`
    /// unchanged. Every input is checked and every isotope reachable from the
    /// seeds is resolved before the first step, so a failed run never leaves
    /// a partial series behind.
    pub fn run(
        &mut self,
        initial: &MassDistribution,
        time_step: f64,
        step_count: usize,
    ) -> Result<TimeSeries> {
        check_inputs(self.registry, initial, time_step)?;
        info!(
            "Running {step_count} steps of {time_step} s from {} isotope(s)",
            initial.len()
        );

        let mut distributions =
            Vec::with_capacity(step_count.saturating_add(1).min(MAX_RESERVED_STEPS));
        distributions.push(initial.clone());

        if step_count == 0 {
            return Ok(TimeSeries::new(time_step, distributions));
        }

        let plan = Plan::compile(self.registry, initial, time_step)?;

        let mut fallback = NoMonitor;
        let monitor: &mut (dyn Monitor + 'a) = match self.monitor.as_deref_mut() {
            Some(m) => m,
            None => &mut fallback,
        };

        monitor.start(step_count);
        let mut state = plan.seed(initial);

        for step in 1..=step_count {
            state = plan.advance(&state);
            let distribution = plan.distribution(&state);
            trace!("Step {step}: {distribution:?}");

            if monitor.step(step, &distribution) == Control::Cancel {
                info!("Run cancelled after step {step}");
                return Err(Error::Cancelled { step });
            }
            distributions.push(distribution);
        }

        monitor.finish();
        info!("Run complete");
        Ok(TimeSeries::new(time_step, distributions))
    }
}

impl fmt::Debug for Simulator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("registry", &self.registry.len())
            .field("monitor", &self.monitor.is_some())
            .finish()
    }
}

/// Run a simulation without a monitor
///
/// Shorthand for `Simulator::new(registry).run(initial, time_step, step_count)`.
///
/// ```rust
/// # use decaychain_nuclide::{IsotopeRecord, Registry};
/// # use decaychain_decay::{run, MassDistribution};
/// let registry = Registry::from_records([IsotopeRecord::stable("Lead", "Pb", 208).unwrap()]).unwrap();
/// let initial = MassDistribution::from([("Pb-208".into(), 1.0)]);
///
/// let series = run(&initial, 60.0, 3, &registry).unwrap();
/// assert_eq!(series.len(), 4);
/// ```
pub fn run(
    initial: &MassDistribution,
    time_step: f64,
    step_count: usize,
    registry: &Registry,
) -> Result<TimeSeries> {
    Simulator::new(registry).run(initial, time_step, step_count)
}

/// Reject bad inputs before anything is computed
fn check_inputs(registry: &Registry, initial: &MassDistribution, time_step: f64) -> Result<()> {
    if !(time_step.is_finite() && time_step > 0.0) {
        return Err(Error::InvalidTimeStep(time_step));
    }

    for (id, &mass) in initial {
        if !(mass.is_finite() && mass >= 0.0) {
            return Err(Error::InvalidMass {
                id: id.clone(),
                mass,
            });
        }
        resolve(registry, id)?;
    }

    Ok(())
}

/// Registry lookup reported against this crate's error
fn resolve<'r>(registry: &'r Registry, id: &str) -> Result<&'r IsotopeRecord> {
    registry
        .get(id)
        .map_err(|_| Error::UnknownIsotope { id: id.to_string() })
}

/// How one isotope moves mass during a step
#[derive(Debug, PartialEq)]
enum Node {
    Stable,
    Unstable {
        /// Fraction remaining after one step, `2^(-dt/t½)`
        survival: f64,
        /// Product index and branching ratio
        branches: Vec<(usize, f64)>,
    },
}

/// Dense form of the chain reachable from the seeds
///
/// Isotopes are numbered in discovery order, so a step is a single pass over
/// a vector with no registry lookups or string hashing.
#[derive(Debug)]
struct Plan {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    nodes: Vec<Node>,
}

impl Plan {
    /// Resolve every isotope reachable from the seeds
    fn compile(registry: &Registry, seeds: &MassDistribution, time_step: f64) -> Result<Self> {
        let mut plan = Self {
            ids: Vec::new(),
            index: HashMap::new(),
            nodes: Vec::new(),
        };

        for id in seeds.keys() {
            plan.intern(id);
        }

        // ids grows while walking, so this visits every product exactly once
        let mut i = 0;
        while i < plan.ids.len() {
            let record = resolve(registry, &plan.ids[i])?;

            let node = match record.decay() {
                Decay::Stable => Node::Stable,
                Decay::Unstable {
                    half_life,
                    branches,
                } => Node::Unstable {
                    survival: (-(time_step / *half_life)).exp2(),
                    branches: branches
                        .values()
                        .map(|b| (plan.intern(b.product()), b.probability()))
                        .collect(),
                },
            };

            plan.nodes.push(node);
            i += 1;
        }

        debug!("Compiled decay plan over {} isotope(s)", plan.ids.len());
        Ok(plan)
    }

    /// Index of an isotope, adding it if not yet seen
    fn intern(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), i);
        i
    }

    /// Dense state of the initial distribution
    fn seed(&self, initial: &MassDistribution) -> Vec<Option<f64>> {
        let mut state = vec![None; self.ids.len()];
        for (id, &mass) in initial {
            if let Some(&i) = self.index.get(id) {
                state[i] = Some(mass);
            }
        }
        state
    }

    /// Apply one step of the decay law
    ///
    /// Only isotopes holding a positive mass contribute, and an isotope that
    /// receives no contribution is absent from the result.
    fn advance(&self, current: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut next = vec![None; self.ids.len()];

        for (i, mass) in current.iter().enumerate() {
            let Some(mass) = mass.filter(|m| *m > 0.0) else {
                continue;
            };

            match &self.nodes[i] {
                Node::Stable => accumulate(&mut next, i, mass),
                Node::Unstable { survival, branches } => {
                    let remaining = mass * survival;
                    accumulate(&mut next, i, remaining);
                    for &(product, probability) in branches {
                        accumulate(&mut next, product, (mass - remaining) * probability);
                    }
                }
            }
        }

        next
    }

    /// Sparse distribution of a dense state
    fn distribution(&self, state: &[Option<f64>]) -> MassDistribution {
        self.ids
            .iter()
            .zip(state)
            .filter_map(|(id, mass)| mass.map(|m| (id.clone(), m)))
            .collect()
    }
}

fn accumulate(state: &mut [Option<f64>], i: usize, mass: f64) {
    *state[i].get_or_insert(0.0) += mass;
}

#[cfg(test)]
mod tests {
    use super::*;
    use decaychain_nuclide::DecayBranch;

    fn branch(product: &str, probability: f64) -> DecayBranch {
        DecayBranch::new(product, probability, None).unwrap()
    }

    /// A -> B, A -> C, B -> D, C -> D
    fn diamond() -> Registry {
        Registry::from_records([
            IsotopeRecord::unstable(
                "Alpha",
                "Aa",
                10,
                100.0,
                [("one", branch("Bb-9", 0.5)), ("two", branch("Cc-9", 0.5))],
            )
            .unwrap(),
            IsotopeRecord::unstable("Beta", "Bb", 9, 50.0, [("one", branch("Dd-8", 1.0))])
                .unwrap(),
            IsotopeRecord::unstable("Gamma", "Cc", 9, 25.0, [("one", branch("Dd-8", 1.0))])
                .unwrap(),
            IsotopeRecord::stable("Delta", "Dd", 8).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn plan_visits_shared_products_once() {
        let seeds = MassDistribution::from([("Aa-10".into(), 1.0)]);
        let plan = Plan::compile(&diamond(), &seeds, 100.0).unwrap();

        assert_eq!(plan.ids, vec!["Aa-10", "Bb-9", "Cc-9", "Dd-8"]);
        assert_eq!(
            plan.nodes[0],
            Node::Unstable {
                survival: 0.5,
                branches: vec![(1, 0.5), (2, 0.5)]
            }
        );
        assert_eq!(plan.nodes[3], Node::Stable);
    }

    #[test]
    fn plan_only_covers_reachable_chain() {
        let seeds = MassDistribution::from([("Cc-9".into(), 1.0)]);
        let plan = Plan::compile(&diamond(), &seeds, 1.0).unwrap();
        assert_eq!(plan.ids, vec!["Cc-9", "Dd-8"]);
    }

    #[test]
    fn zero_mass_entries_drop_out() {
        let registry = diamond();
        let initial = MassDistribution::from([("Aa-10".into(), 0.0), ("Dd-8".into(), 1.0)]);
        let series = run(&initial, 1.0, 1, &registry).unwrap();

        assert_eq!(series.distributions()[0], initial);
        assert_eq!(series.last(), &MassDistribution::from([("Dd-8".into(), 1.0)]));
    }

    #[test]
    fn huge_step_count_only_costs_time() {
        let registry = diamond();
        let initial = MassDistribution::from([("Dd-8".into(), 1.0)]);

        let mut stop_early = |step: usize, _: &MassDistribution| match step {
            3 => Control::Cancel,
            _ => Control::Continue,
        };

        let result = Simulator::new(&registry)
            .with_monitor(&mut stop_early)
            .run(&initial, 1.0, usize::MAX);
        assert!(matches!(result, Err(Error::Cancelled { step: 3 })));
    }

    #[test]
    fn closure_monitor_sees_every_step() {
        let registry = diamond();
        let initial = MassDistribution::from([("Aa-10".into(), 4.0)]);

        let mut seen = Vec::new();
        let mut monitor = |step: usize, masses: &MassDistribution| {
            seen.push((step, masses.len()));
            Control::Continue
        };

        Simulator::new(&registry)
            .with_monitor(&mut monitor)
            .run(&initial, 100.0, 3)
            .unwrap();

        assert_eq!(seen, vec![(1, 3), (2, 4), (3, 4)]);
    }
}
