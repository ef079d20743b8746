//! XSBench is a proxy benchmark for the macroscopic cross section lookup of
//! Monte Carlo neutron transport codes.

/// Input module:
/// benchmark configuration, from the command line or a JSON file
pub mod input;

/// Common module:
/// nuclide grids, unionized energy grid, materials and the lookup kernel
pub mod common;

/// Monte Carlo module:
/// parallel lookup driver and throughput results
pub mod monte_carlo;

pub use common::cross_section::{Interaction, XsVector};
pub use common::cross_section_library::CrossSectionLibrary;
pub use common::error::{XsBenchError, XsResult};
pub use input::config::{BenchmarkConfig, ProblemSize};
pub use monte_carlo::results::{GroupSummary, SimulationResult};
pub use monte_carlo::solver::{run_benchmark, LookupSolver};
