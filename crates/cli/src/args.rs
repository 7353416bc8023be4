// standard library
use std::path::PathBuf;

// internal modules
use crate::error::{Error, Result};

// decaychain modules
use decaychain_decay::{read_params, MassDistribution, SimulationParams, TimeUnit};
use decaychain_nuclide::ShortId;
use decaychain_utils::{f, Input};

// external crates
use clap::{ArgAction, Parser, ValueEnum};

/// Model radioactive decay chains from an isotope store
///
/// Reads the isotope store, runs a discrete-step simulation from the given
/// initial masses, and writes the mass of every isotope in the chain at each
/// step as plot data.
///
/// Parameters may come from a JSON file with --params, from the command line,
/// or both, with command line values taking priority.
#[derive(Parser, Debug)]
#[command(name = "decaychain", version, about, long_about)]
#[command(after_help = "Examples:
  decaychain -s isotopes.json -m Ra-225=10 --step 86400 -n 60 -u d -o ra225.csv
  decaychain -s isotopes.json -p params.json -f json
  decaychain -s isotopes.json --list")]
pub struct Cli {
    /// Path to the isotope store (JSON)
    #[arg(short, long, value_name = "PATH")]
    pub store: PathBuf,

    /// Initial mass of an isotope in kg, e.g. Ra-225=10 (repeatable)
    #[arg(short, long = "mass", value_name = "ID=KG", value_parser = parse_mass)]
    pub masses: Vec<(String, f64)>,

    /// Length of each step in seconds
    #[arg(long, value_name = "SECONDS")]
    pub step: Option<f64>,

    /// Number of steps to run
    #[arg(short = 'n', long, value_name = "N")]
    pub steps: Option<usize>,

    /// Time unit for the output [s, min, h, d, a]
    #[arg(short, long, value_name = "UNIT")]
    pub unit: Option<TimeUnit>,

    /// Parameter file (JSON) with masses, time_step, steps, and unit
    #[arg(short, long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    /// Write results to a file rather than stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format for the results
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// List every isotope in the store and exit
    #[arg(long)]
    pub list: bool,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence all logging and the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Supported output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One row per step, one column per isotope
    Csv,
    /// Per-isotope curves
    Json,
}

impl Cli {
    /// Combine the parameter file, if any, with command line values
    pub fn params(&self) -> Result<SimulationParams> {
        let file = match &self.params {
            Some(path) => Some(read_params(path)?),
            None => None,
        };
        self.merge(file)
    }

    fn merge(&self, file: Option<SimulationParams>) -> Result<SimulationParams> {
        let (mut masses, time_step, steps, unit) = match file {
            Some(p) => (p.masses, Some(p.time_step), Some(p.steps), Some(p.unit)),
            None => (MassDistribution::new(), None, None, None),
        };

        masses.extend(self.masses.iter().cloned());
        if masses.is_empty() {
            return Err(Error::MissingParameter("initial mass"));
        }

        Ok(SimulationParams {
            masses,
            time_step: self
                .step
                .or(time_step)
                .ok_or(Error::MissingParameter("time step"))?,
            steps: self
                .steps
                .or(steps)
                .ok_or(Error::MissingParameter("step count"))?,
            unit: self.unit.or(unit).unwrap_or_default(),
        })
    }
}

/// Parse `ID=KG` pairs, canonicalising the isotope id
fn parse_mass(text: &str) -> core::result::Result<(String, f64), String> {
    let (id, mass) = text
        .split_once('=')
        .ok_or_else(|| f!("expected ID=KG, found \"{text}\""))?;

    let id = id.parse::<ShortId>().map_err(|e| e.to_string())?;
    let mass = mass
        .coerce::<f64>()
        .into_result()
        .map_err(|e| f!("bad mass for {id}: {e}"))?;

    Ok((id.to_string(), mass))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(["decaychain", "--store", "isotopes.json"].iter().chain(args))
            .unwrap()
    }

    #[rstest]
    #[case("Ra-225=10", "Ra-225", 10.0)]
    #[case("ra225=1e-3", "Ra-225", 1.0e-3)]
    #[case("U_238= 2 000", "U-238", 2000.0)]
    fn mass_pairs(#[case] text: &str, #[case] id: &str, #[case] mass: f64) {
        assert_eq!(parse_mass(text), Ok((id.to_string(), mass)));
    }

    #[rstest]
    #[case("Ra-225")]
    #[case("Ra-225=")]
    #[case("Ra-225=lots")]
    #[case("Radium=10")]
    fn bad_mass_pairs(#[case] text: &str) {
        assert!(parse_mass(text).is_err());
    }

    #[test]
    fn command_line_only() {
        let params = cli(&["-m", "Ra-225=10", "-m", "Ac-225=1", "--step", "60", "-n", "5"])
            .params()
            .unwrap();

        assert_eq!(params.masses.len(), 2);
        assert_eq!(params.time_step, 60.0);
        assert_eq!(params.steps, 5);
        assert_eq!(params.unit, TimeUnit::Second);
    }

    #[test]
    fn command_line_overrides_file() {
        let file = SimulationParams {
            masses: MassDistribution::from([("Ra-225".into(), 10.0)]),
            time_step: 86_400.0,
            steps: 60,
            unit: TimeUnit::Day,
        };

        let params = cli(&["-m", "Ra-225=2", "-n", "10", "-u", "h"])
            .merge(Some(file))
            .unwrap();

        assert_eq!(params.masses["Ra-225"], 2.0);
        assert_eq!(params.time_step, 86_400.0);
        assert_eq!(params.steps, 10);
        assert_eq!(params.unit, TimeUnit::Hour);
    }

    #[rstest]
    #[case(&["--step", "60", "-n", "5"], "initial mass")]
    #[case(&["-m", "Ra-225=1", "-n", "5"], "time step")]
    #[case(&["-m", "Ra-225=1", "--step", "60"], "step count")]
    fn missing_parameters(#[case] args: &[&str], #[case] name: &str) {
        assert!(matches!(
            cli(args).params(),
            Err(Error::MissingParameter(missing)) if missing == name
        ));
    }

    #[test]
    fn bad_unit_rejected() {
        let result = Cli::try_parse_from(["decaychain", "-s", "x.json", "-u", "weeks"]);
        assert!(result.is_err());
    }
}
