//! Console output of the benchmark: banner, input summary and results

use crate::common::cross_section::NUM_INTERACTIONS;
use crate::common::material::NUM_MATERIALS;
use crate::common::nuclide_grid::NuclideGridPoint;
use crate::common::utils::format_thousands;
use crate::input::config::BenchmarkConfig;
use crate::monte_carlo::results::{GroupSummary, SimulationResult};

use colored::*;
use console::style;

const LINE_WIDTH: usize = 79;
const BYTES_PER_MB: usize = 1_048_576;

/// Prints one step of the run
pub fn step(icon: &str, message: &str) {
    println!("{} {} {}", style("->").bold().dim(), icon, message.bold().blue());
}

pub fn border_print() {
    println!("{}", "=".repeat(LINE_WIDTH));
}

pub fn center_print(title: &str) {
    println!("{:^width$}", title, width = LINE_WIDTH);
}

fn section(title: &str) {
    border_print();
    center_print(title);
    border_print();
}

pub fn print_logo() {
    border_print();
    center_print("XSBench");
    center_print("Macroscopic cross section lookup benchmark");
    println!(
        "{:^width$}",
        format!("version {}", env!("CARGO_PKG_VERSION")).dimmed(),
        width = LINE_WIDTH
    );
}

/// Estimated memory footprint of the data set
///
/// # Attributes
/// * `nuclide_grids` bytes of the nuclide energy grids
/// * `unionized_grid` bytes of the unionized energy grid and its dual index table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryEstimate {
    pub nuclide_grids: usize,
    pub unionized_grid: usize,
}

impl MemoryEstimate {
    pub fn new(n_isotopes: usize, n_gridpoints: usize) -> Self {
        let n_points = n_isotopes.saturating_mul(n_gridpoints);
        let unionized_entry =
            std::mem::size_of::<f64>() + n_isotopes.saturating_mul(std::mem::size_of::<u32>());
        MemoryEstimate {
            nuclide_grids: n_points.saturating_mul(std::mem::size_of::<NuclideGridPoint>()),
            unionized_grid: n_points.saturating_mul(unionized_entry),
        }
    }

    pub fn total(&self) -> usize {
        self.nuclide_grids.saturating_add(self.unionized_grid)
    }

    pub fn total_mb(&self) -> usize {
        self.total() / BYTES_PER_MB
    }

    pub fn nuclide_grids_mb(&self) -> usize {
        self.nuclide_grids / BYTES_PER_MB
    }

    pub fn unionized_grid_mb(&self) -> usize {
        self.unionized_grid / BYTES_PER_MB
    }
}

pub fn print_input_summary(config: &BenchmarkConfig) {
    let memory = MemoryEstimate::new(config.n_isotopes(), config.n_gridpoints);

    section("INPUT SUMMARY");
    println!("Materials:                    {}", NUM_MATERIALS);
    println!("Cross sections per lookup:    {}", NUM_INTERACTIONS);
    println!("H-M Benchmark Size:           {}", config.problem_size.name());
    println!("Total Isotopes:               {}", config.n_isotopes());
    println!("Gridpoints (per Nuclide):     {}", format_thousands(config.n_gridpoints as u64));
    println!(
        "Unionized Energy Gridpoints:  {}",
        format_thousands(config.unionized_gridpoints() as u64)
    );
    println!("XS Lookups:                   {}", format_thousands(config.lookups as u64));
    if config.num_groups > 1 {
        println!("Benchmark Groups:             {}", config.num_groups);
        println!("Threads per Group:            {}", config.num_threads);
        println!("Mem Usage per Group (MB):     {}", format_thousands(memory.total_mb() as u64));
    } else {
        println!("Threads:                      {}", config.num_threads);
        println!("Est. Memory Usage (MB):       {}", format_thousands(memory.total_mb() as u64));
    }
    if config.extra_flops > 0 {
        println!("Extra Flops:                  {}", config.extra_flops);
    }
    if config.extra_loads > 0 {
        println!("Extra Loads:                  {}", config.extra_loads);
    }
    section("INITIALIZATION");
}

pub fn print_simulation_header() {
    section("SIMULATION");
}

/// Prints the throughput of a single benchmark run, or of all groups
pub fn print_results(config: &BenchmarkConfig, results: &[SimulationResult]) {
    section("RESULTS");
    println!("Threads:     {}", config.num_threads);
    if config.extra_flops > 0 {
        println!("Extra Flops: {}", config.extra_flops);
    }
    if config.extra_loads > 0 {
        println!("Extra Loads: {}", config.extra_loads);
    }

    match results {
        [result] => {
            println!("Runtime:     {:.3} seconds", result.runtime.as_secs_f64());
            println!("Lookups:     {}", format_thousands(result.lookups as u64));
            println!(
                "Lookups/s:   {}",
                format_thousands(result.lookups_per_second() as u64).bold().green()
            );
        }
        _ => {
            let rates: Vec<f64> = results.iter().map(SimulationResult::lookups_per_second).collect();
            let summary = GroupSummary::from_rates(&rates);
            println!("Groups:      {}", summary.num_groups);
            println!(
                "Sum of sequential group Lookups/s:  {}",
                format_thousands(summary.total_lookups_per_second as u64).bold().green()
            );
            println!(
                "Avg Lookups/s per group:            {}",
                format_thousands(summary.average_lookups_per_second() as u64)
            );
        }
    }
    border_print();
}
