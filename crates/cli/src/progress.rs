// internal modules
use crate::error::{Error, Result};

// decaychain modules
use decaychain_decay::{Control, MassDistribution, Monitor};

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::debug;

/// Terminal progress bar over the steps of a run
pub struct ProgressMonitor {
    bar: Bar,
    disabled: bool,
}

impl ProgressMonitor {
    /// Initialise the progress bar, hidden entirely if `disable` is set
    pub fn new(disable: bool) -> Result<Self> {
        let bar = BarBuilder::default()
            .desc("Decaying")
            .unit(" steps")
            .disable(disable)
            .build()
            .map_err(|e| Error::Progress(e.to_string()))?;

        Ok(Self {
            bar,
            disabled: disable,
        })
    }
}

impl Monitor for ProgressMonitor {
    fn start(&mut self, step_count: usize) {
        self.bar.total = step_count;
        if !self.disabled {
            if let Err(e) = self.bar.refresh() {
                debug!("Progress bar refresh failed: {e}");
            }
        }
    }

    fn step(&mut self, _: usize, _: &MassDistribution) -> Control {
        if let Err(e) = self.bar.update(1) {
            debug!("Progress bar update failed: {e}");
        }
        Control::Continue
    }

    fn finish(&mut self) {
        if !self.disabled {
            eprintln!();
        }
    }
}
