//! Plot data writers

// standard library
use std::collections::BTreeMap;
use std::io::Write;

// internal modules
use crate::error::Result;

// decaychain modules
use decaychain_decay::{Curve, TimeSeries, TimeUnit};
use decaychain_utils::ValueExt;

// external crates
use serde::Serialize;

/// JSON form of the per-isotope curves
#[derive(Serialize, Debug)]
struct PlotData {
    unit: TimeUnit,
    axis_label: String,
    curves: BTreeMap<String, Curve>,
}

/// Write one row per step with a column for every isotope in the run
///
/// The first column is the time in `unit`. Cells are left empty at steps where
/// an isotope is absent, which is not the same as a zero mass.
pub fn write_csv<W: Write>(series: &TimeSeries, unit: TimeUnit, writer: W) -> Result<()> {
    let isotopes = series.isotopes();
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(std::iter::once("time").chain(isotopes.iter().copied()))?;

    for (time, distribution) in series.times(unit).into_iter().zip(series) {
        let row = std::iter::once(time.sci(6, 2)).chain(isotopes.iter().map(|id| {
            distribution
                .get(*id)
                .map(|mass| mass.sci(6, 2))
                .unwrap_or_default()
        }));
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write every curve as pretty JSON, keyed by isotope
pub fn write_json<W: Write>(series: &TimeSeries, unit: TimeUnit, mut writer: W) -> Result<()> {
    let data = PlotData {
        unit,
        axis_label: unit.axis_label(),
        curves: series.curves(unit),
    };

    serde_json::to_writer_pretty(&mut writer, &data)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use decaychain_decay::{run, MassDistribution};
    use decaychain_nuclide::{DecayBranch, IsotopeRecord, Registry};
    use rstest::{fixture, rstest};

    #[fixture]
    fn series() -> TimeSeries {
        let registry = Registry::from_records([
            IsotopeRecord::unstable(
                "Radium",
                "Ra",
                225,
                1_287_360.0,
                [("beta_minus", DecayBranch::new("Ac-225", 1.0, None).unwrap())],
            )
            .unwrap(),
            IsotopeRecord::stable("Actinium", "Ac", 225).unwrap(),
        ])
        .unwrap();

        let initial = MassDistribution::from([("Ra-225".into(), 10.0)]);
        run(&initial, 1_287_360.0, 2, &registry).unwrap()
    }

    #[rstest]
    fn csv_rows(series: TimeSeries) {
        let mut buffer = Vec::new();
        write_csv(&series, TimeUnit::Day, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "time,Ac-225,Ra-225",
                "0.000000e+00,,1.000000e+01",
                "1.490000e+01,5.000000e+00,5.000000e+00",
                "2.980000e+01,7.500000e+00,2.500000e+00",
            ]
        );
    }

    #[rstest]
    fn json_curves(series: TimeSeries) {
        let mut buffer = Vec::new();
        write_json(&series, TimeUnit::Day, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["unit"], "d");
        assert_eq!(value["axis_label"], "Time [d]");
        assert_eq!(value["curves"]["Ra-225"]["mass"][2], 2.5);
        assert_eq!(value["curves"]["Ac-225"]["time"].as_array().unwrap().len(), 2);
    }
}
