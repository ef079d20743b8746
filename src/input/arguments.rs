use crate::common::error::{XsBenchError, XsResult};
use crate::input::config::{BenchmarkConfig, ProblemSize};
use crate::input::json_input::JSONInput;

pub const USAGE: &str = "usage: xsbench [<threads> [<small|large> [<group label>]]] | xsbench <input.json>";

/// Reads the benchmark parameters from the command line arguments
///
/// Either a JSON input file, or up to three positional arguments: number of
/// threads, problem size and group label. Missing arguments take their
/// default value, and so does the problem size when only the number of
/// threads is given.
///
/// # Arguments
/// * `args` command line arguments, without the program name
pub fn parse_arguments(args: &[String]) -> XsResult<BenchmarkConfig> {
    if let [path] = args {
        if path.ends_with(".json") {
            return JSONInput::new(path)?.get_config();
        }
    }
    if args.len() > 3 {
        return Err(XsBenchError::InvalidInput(USAGE.to_string()));
    }

    let mut config = BenchmarkConfig::default();
    if let Some(threads) = args.first() {
        config.num_threads = parse_number(threads, "number of threads")?;
    }
    if let Some(size) = args.get(1) {
        config.problem_size = ProblemSize::from_name(size);
    }
    if let Some(label) = args.get(2) {
        config.group_label = parse_number(label, "group label")?;
    }
    Ok(config)
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> XsResult<T> {
    value.trim().parse().map_err(|_| {
        XsBenchError::InvalidInput(format!("{} should be a non-negative integer, got '{}'", what, value))
    })
}
