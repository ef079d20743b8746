use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::common::error::XsResult;

/// Outcome of one benchmark run
///
/// # Attributes
/// * `lookups` number of lookups performed
/// * `threads` number of threads that performed them
/// * `runtime` wall clock time of the parallel region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationResult {
    pub lookups: usize,
    pub threads: usize,
    pub runtime: Duration,
}

impl SimulationResult {
    /// Throughput of the run, 0 for a run that did nothing
    pub fn lookups_per_second(&self) -> f64 {
        let seconds = self.runtime.as_secs_f64();
        if self.lookups == 0 || seconds <= 0. {
            return 0.;
        }
        self.lookups as f64 / seconds
    }

    /// Line of the results log: group label, threads and lookups per second
    pub fn results_line(&self, group_label: u32) -> String {
        format!("c{}\t{}\t{:.0}", group_label, self.threads, self.lookups_per_second())
    }

    /// Appends the throughput of the run to the results log
    ///
    /// # Arguments
    /// * `path` path of the log, created if missing
    /// * `group_label` label identifying the run configuration
    pub fn append_to_results_log(&self, path: &Path, group_label: u32) -> XsResult<()> {
        let mut output_file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(output_file, "{}", self.results_line(group_label))?;
        Ok(())
    }
}

/// Reduction of the throughput of independent benchmark groups
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSummary {
    pub num_groups: usize,
    pub total_lookups_per_second: f64,
}

impl GroupSummary {
    pub fn from_rates(rates: &[f64]) -> Self {
        GroupSummary {
            num_groups: rates.len(),
            total_lookups_per_second: rates.iter().sum(),
        }
    }

    pub fn average_lookups_per_second(&self) -> f64 {
        if self.num_groups == 0 {
            return 0.;
        }
        self.total_lookups_per_second / self.num_groups as f64
    }
}
