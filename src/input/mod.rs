pub mod arguments;
pub mod config;
pub mod json_input;
