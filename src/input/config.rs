use std::path::PathBuf;

/// Default number of energy points of every nuclide
pub const DEFAULT_GRIDPOINTS: usize = 11303;
/// Default number of cross section lookups
pub const DEFAULT_LOOKUPS: usize = 15_000_000;
/// Default seed of the data set generation
pub const DEFAULT_SEED: u64 = 42;
/// Default path of the throughput log
pub const DEFAULT_RESULTS_FILE: &str = "results.txt";

/// Size of the Hoogenboom-Martin reactor problem
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ProblemSize {
    Small,
    Large,
}

impl ProblemSize {
    /// Number of nuclides of the problem
    pub fn n_isotopes(self) -> usize {
        match self {
            ProblemSize::Small => 68,
            ProblemSize::Large => 355,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProblemSize::Small => "Small",
            ProblemSize::Large => "Large",
        }
    }

    /// "small" or "Small" select the small problem, anything else the large one
    pub fn from_name(name: &str) -> Self {
        match name {
            "small" | "Small" => ProblemSize::Small,
            _ => ProblemSize::Large,
        }
    }
}

/// Parameters of a benchmark run
///
/// # Attributes
/// * `num_threads` number of lookup threads
/// * `problem_size` small (68 nuclides) or large (355 nuclides) problem
/// * `n_gridpoints` number of energy points of every nuclide
/// * `lookups` total number of lookups, shared between threads
/// * `seed` seed of the data set generation
/// * `group_label` label of the run in the results log
/// * `num_groups` number of independent copies of the benchmark
/// * `extra_flops` additional floating point operations per lookup
/// * `extra_loads` additional random grid reads per lookup
/// * `show_progress` if true, the first thread reports its progress
/// * `save_results` if true, throughput is appended to `results_file`
/// * `results_file` path of the throughput log
/// * `quiet` if true, nothing is printed by the library
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkConfig {
    pub num_threads: usize,
    pub problem_size: ProblemSize,
    pub n_gridpoints: usize,
    pub lookups: usize,
    pub seed: u64,
    pub group_label: u32,
    pub num_groups: usize,
    pub extra_flops: usize,
    pub extra_loads: usize,
    pub show_progress: bool,
    pub save_results: bool,
    pub results_file: PathBuf,
    pub quiet: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_threads: available_threads(),
            problem_size: ProblemSize::Large,
            n_gridpoints: DEFAULT_GRIDPOINTS,
            lookups: DEFAULT_LOOKUPS,
            seed: DEFAULT_SEED,
            group_label: 0,
            num_groups: 1,
            extra_flops: 0,
            extra_loads: 0,
            show_progress: true,
            save_results: false,
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
            quiet: false,
        }
    }
}

impl BenchmarkConfig {
    pub fn n_isotopes(&self) -> usize {
        self.problem_size.n_isotopes()
    }

    /// Number of entries of the unionized energy grid
    pub fn unionized_gridpoints(&self) -> usize {
        self.n_isotopes() * self.n_gridpoints
    }
}

/// Number of processors available to the process
pub fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
