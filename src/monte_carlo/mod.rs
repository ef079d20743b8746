pub mod results;
pub mod solver;
