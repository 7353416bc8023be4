//! Command line front end for decaychain
//!
//! Loads an isotope store, runs a decay chain simulation, and writes the mass
//! of every isotope at each step as CSV or JSON plot data. See `--help`.

mod args;
mod error;
mod export;
mod progress;

// standard library
use std::fs::File;
use std::io::{self, BufWriter, Write};

// internal modules
use crate::args::{Cli, Format};
use crate::error::Result;
use crate::export::{write_csv, write_json};
use crate::progress::ProgressMonitor;

// decaychain modules
use decaychain_decay::{Simulator, TimeSeries, TimeUnit};
use decaychain_nuclide::{IsotopeStore, Registry};
use decaychain_utils::{f, OptionExt, ValueExt};

// external crates
use clap::Parser;
use log::{error, info, warn};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = execute(&cli) {
        error!("{e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

/// Install the only logger, driven by -v and -q
fn init_logging(cli: &Cli) -> Result<()> {
    stderrlog::new()
        .modules([module_path!(), "decaychain_decay", "decaychain_nuclide"])
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 2)
        .show_level(false)
        .init()?;
    Ok(())
}

fn execute(cli: &Cli) -> Result<()> {
    let store = IsotopeStore::open(&cli.store)?;
    info!(
        "Loaded {} isotope(s) from {}",
        store.len(),
        store.path().display()
    );

    // runs only ever see this copy of the store
    let registry = store.snapshot();

    if cli.list {
        return list_isotopes(&registry, io::stdout().lock());
    }

    if registry.is_empty() {
        warn!("The isotope store is empty, every isotope will be unknown");
    }

    let params = cli.params()?;
    let mut progress = ProgressMonitor::new(cli.quiet)?;
    let series = params.run_with(&mut Simulator::new(&registry).with_monitor(&mut progress))?;

    match &cli.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            export(cli.format, &series, params.unit, writer)?;
            info!("Results written to {}", path.display());
        }
        None => export(cli.format, &series, params.unit, io::stdout().lock())?,
    }

    Ok(())
}

fn export<W: Write>(format: Format, series: &TimeSeries, unit: TimeUnit, writer: W) -> Result<()> {
    match format {
        Format::Csv => write_csv(series, unit, writer),
        Format::Json => write_json(series, unit, writer),
    }
}

/// One line per isotope with its half-life and decay products
fn list_isotopes<W: Write>(registry: &Registry, mut writer: W) -> Result<()> {
    for record in registry {
        let half_life = match record.half_life() {
            Some(h) => f!("{} s", h.sci(4, 2)),
            None => "stable".to_string(),
        };

        let products = record
            .decays()
            .into_iter()
            .flatten()
            .map(|(label, b)| f!("{} ({label}, {:.4})", b.product(), b.probability()))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            writer,
            "{:<8} {:<14} Z={:<4} {:<14} {}",
            record.short_id(),
            record.name(),
            record.proton_number().display(),
            half_life,
            products
        )?;
    }

    writer.flush()?;
    Ok(())
}
