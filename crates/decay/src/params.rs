//! Serialisable simulation inputs

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// internal modules
use crate::distribution::MassDistribution;
use crate::error::Result;
use crate::series::TimeSeries;
use crate::simulator::Simulator;
use crate::units::TimeUnit;

// decaychain modules
use decaychain_nuclide::Registry;

// external crates
use serde::{Deserialize, Serialize};

/// Everything needed to set up a run, bar the reference data
///
/// This is the JSON form of a parameter file:
///
/// ```json
/// {
///     "masses": {"Ra-225": 10.0},
///     "time_step": 86400.0,
///     "steps": 60,
///     "unit": "d"
/// }
/// ```
///
/// The `time_step` is always in seconds. The `unit` only controls how the time
/// axis of the results is presented and defaults to seconds if omitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Initial mass (kg) of each seed isotope
    pub masses: MassDistribution,
    /// Step length (s)
    pub time_step: f64,
    /// Number of steps to run
    pub steps: usize,
    /// Display unit for the time axis
    #[serde(default)]
    pub unit: TimeUnit,
}

impl SimulationParams {
    /// Run these parameters through an existing simulator
    pub fn run_with(&self, simulator: &mut Simulator) -> Result<TimeSeries> {
        simulator.run(&self.masses, self.time_step, self.steps)
    }

    /// Run these parameters against a registry with no monitor
    pub fn run(&self, registry: &Registry) -> Result<TimeSeries> {
        self.run_with(&mut Simulator::new(registry))
    }

    /// Total duration of the run (s)
    pub fn duration(&self) -> f64 {
        self.time_step * self.steps as f64
    }
}

/// Read simulation parameters from a JSON file
///
/// The `path` takes anything that can be turned into a `Path` reference, such
/// as a [&str], [String], [Path], etc...
///
/// ```rust, no_run
/// # use decaychain_decay::read_params;
/// let params = read_params("path/to/params.json").unwrap();
/// println!("{} steps of {} s", params.steps, params.time_step);
/// ```
pub fn read_params<P: AsRef<Path>>(path: P) -> Result<SimulationParams> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write simulation parameters to a pretty JSON file
pub fn write_params<P: AsRef<Path>>(params: &SimulationParams, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, params)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_defaults_to_seconds() {
        let params: SimulationParams =
            serde_json::from_str(r#"{"masses": {"Ra-225": 10.0}, "time_step": 60, "steps": 5}"#)
                .unwrap();

        assert_eq!(params.unit, TimeUnit::Second);
        assert_eq!(params.masses["Ra-225"], 10.0);
        assert_eq!(params.duration(), 300.0);
    }

    #[test]
    fn missing_steps_rejected() {
        let result: serde_json::Result<SimulationParams> =
            serde_json::from_str(r#"{"masses": {}, "time_step": 60}"#);
        assert!(result.is_err());
    }
}
