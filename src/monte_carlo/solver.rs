use crate::common::cross_section::{XsVector, NUM_INTERACTIONS};
use crate::common::cross_section_library::CrossSectionLibrary;
use crate::common::error::XsResult;
use crate::common::profiler::{LookupProgressBar, Profiler};
use crate::common::report;
use crate::common::rng::{MaterialSampler, RandomStream};
use crate::input::config::BenchmarkConfig;
use crate::monte_carlo::results::SimulationResult;

use std::hint::black_box;
use std::ops::Range;
use std::time::Duration;

// lookups between two updates of the progress bar
const PROGRESS_INTERVAL: usize = 1000;

/// LookupSolver
///
/// Runs the cross section lookups on a fixed pool of threads. Every thread
/// owns its random stream and processes a contiguous slice of the lookups,
/// the cross section library is shared read-only.
///
/// # Attributes
/// * `num_threads` number of threads of the pool
/// * `lookups` total number of lookups
/// * `extra_flops` additional floating point operations per lookup
/// * `extra_loads` additional random grid reads per lookup
/// * `show_progress` if true, the first thread drives a progress bar
/// * `quiet` if true, nothing is printed
#[derive(Clone, Debug, PartialEq)]
pub struct LookupSolver {
    pub num_threads: usize,
    pub lookups: usize,
    pub extra_flops: usize,
    pub extra_loads: usize,
    pub show_progress: bool,
    pub quiet: bool,
}

impl LookupSolver {
    pub fn new(config: &BenchmarkConfig) -> Self {
        LookupSolver {
            num_threads: config.num_threads,
            lookups: config.lookups,
            extra_flops: config.extra_flops,
            extra_loads: config.extra_loads,
            show_progress: config.show_progress,
            quiet: config.quiet,
        }
    }

    /// Runs all the lookups and measures the throughput
    ///
    /// Only the parallel region is timed. A solver without threads or
    /// lookups returns an empty result right away.
    ///
    /// # Arguments
    /// * `cross_section_library` data set shared by all threads
    ///
    /// # Returns
    /// * `result` number of lookups performed and wall clock time
    pub fn solve(&self, cross_section_library: &CrossSectionLibrary) -> XsResult<SimulationResult> {
        if self.num_threads == 0 || self.lookups == 0 {
            return Ok(SimulationResult {
                lookups: 0,
                threads: self.num_threads,
                runtime: Duration::ZERO,
            });
        }

        let sampler = MaterialSampler::new(&cross_section_library.materials)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()?;

        if !self.quiet {
            report::step(
                "\u{269B}",
                &format!("Running lookups on {} threads...", self.num_threads),
            );
        }
        let progress_bar = if self.show_progress && !self.quiet {
            LookupProgressBar::new(partition(self.lookups, self.num_threads, 0).len())
        } else {
            LookupProgressBar::hidden()
        };

        let profiler = Profiler::new();
        let lookups: usize = pool
            .broadcast(|context| {
                let thread = context.index();
                let progress = if thread == 0 { Some(&progress_bar) } else { None };
                self.run_thread(cross_section_library, &sampler, thread, progress)
            })
            .into_iter()
            .sum();
        let runtime = profiler.elapsed();

        progress_bar.finish();

        Ok(SimulationResult {
            lookups,
            threads: self.num_threads,
            runtime,
        })
    }

    /// Lookups of one thread
    ///
    /// The sampler is built from the library's own table, so every sampled
    /// material exists.
    ///
    /// # Returns
    /// * `lookups` number of lookups performed
    fn run_thread(
        &self,
        cross_section_library: &CrossSectionLibrary,
        sampler: &MaterialSampler,
        thread: usize,
        progress: Option<&LookupProgressBar>,
    ) -> usize {
        let mut rng = RandomStream::for_thread(thread);
        let lookups = partition(self.lookups, self.num_threads, thread);

        for count in 1..=lookups.len() {
            // sample particle energy and material
            let energy = rng.draw();
            let material = &cross_section_library.materials[sampler.sample(&mut rng)];

            let mut macro_xs = cross_section_library.calculate_macro_xs(energy, material);

            if self.extra_flops > 0 {
                apply_extra_flops(&mut macro_xs, self.extra_flops);
            }
            if self.extra_loads > 0 {
                apply_extra_loads(cross_section_library, &mut rng, self.extra_loads);
            }
            black_box(macro_xs);

            if let Some(progress) = progress {
                if count % PROGRESS_INTERVAL == 0 {
                    progress.update(PROGRESS_INTERVAL as u64);
                } else if count == lookups.len() {
                    progress.update((count % PROGRESS_INTERVAL) as u64);
                }
            }
        }
        lookups.len()
    }
}

/// Contiguous slice of the lookups processed by `thread`
///
/// The first `lookups % num_threads` threads get one more lookup than the others.
pub fn partition(lookups: usize, num_threads: usize, thread: usize) -> Range<usize> {
    if num_threads == 0 || thread >= num_threads {
        return 0..0;
    }
    let chunk = lookups / num_threads;
    let remainder = lookups % num_threads;
    let start = thread * chunk + thread.min(remainder);
    let len = chunk + usize::from(thread < remainder);
    start..start + len
}

fn apply_extra_flops(macro_xs: &mut XsVector, extra_flops: usize) {
    for i in 0..extra_flops {
        let xs = &mut macro_xs[i % NUM_INTERACTIONS];
        *xs = *xs * 1.000_000_1 + 1e-12;
    }
}

fn apply_extra_loads(
    cross_section_library: &CrossSectionLibrary,
    rng: &mut RandomStream,
    extra_loads: usize,
) {
    let grids = &cross_section_library.nuclide_grids;
    for _ in 0..extra_loads {
        let nuclide = random_index(rng, grids.n_isotopes());
        let point = random_index(rng, grids.n_gridpoints());
        black_box(grids.grid(nuclide)[point].total_xs);
    }
}

#[inline]
fn random_index(rng: &mut RandomStream, len: usize) -> usize {
    ((rng.draw() * len as f64) as usize).min(len.saturating_sub(1))
}

/// Runs the complete benchmark, once per group
///
/// Every group generates its own data set, seeded with the configuration
/// seed offset by the group index, and runs its own lookups. Groups share
/// nothing and run one after the other, each on the whole thread pool, so
/// the sum of their rates is not the throughput of a concurrent run.
///
/// # Returns
/// * `results` one result per group
pub fn run_benchmark(config: &BenchmarkConfig) -> XsResult<Vec<SimulationResult>> {
    let solver = LookupSolver::new(config);
    let mut results = Vec::with_capacity(config.num_groups);

    for group in 0..config.num_groups {
        let group_config = BenchmarkConfig {
            seed: config.seed.wrapping_add(group as u64),
            ..config.clone()
        };
        let cross_section_library = CrossSectionLibrary::generate(&group_config)?;

        if !config.quiet {
            report::print_simulation_header();
        }
        results.push(solver.solve(&cross_section_library)?);
    }
    Ok(results)
}
