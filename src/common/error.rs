//! Error types for the benchmark

use thiserror::Error;

/// Result type for benchmark operations
pub type XsResult<T> = Result<T, XsBenchError>;

/// Errors that can occur while building the data set or running the lookups
#[derive(Error, Debug)]
pub enum XsBenchError {
    #[error("could not allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown material: {0}")]
    UnknownMaterial(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
