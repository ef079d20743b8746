pub mod cross_section;
pub mod cross_section_library;
pub mod energy_grid;
pub mod error;
pub mod material;
pub mod nuclide_grid;
pub mod profiler;
pub mod report;
pub mod rng;
pub mod utils;
