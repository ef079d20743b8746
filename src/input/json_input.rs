use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::common::error::{XsBenchError, XsResult};
use crate::input::config::{BenchmarkConfig, ProblemSize};

/// JSON input file
///
/// Every field is optional, missing ones keep their default value:
/// ```json
/// {
///     "threads": 8,
///     "problem_size": "small",
///     "lookups": 1000000,
///     "gridpoints": 11303,
///     "seed": 42,
///     "group_label": 0,
///     "groups": 1,
///     "extra_flops": 0,
///     "extra_loads": 0,
///     "progress": true,
///     "save_results": true,
///     "results_file": "results.txt"
/// }
/// ```
pub struct JSONInput {
    pub dict: serde_json::Value,
}

impl JSONInput {
    pub fn new(file_path: impl AsRef<Path>) -> XsResult<JSONInput> {
        let file = File::open(file_path)?;
        Ok(JSONInput {
            dict: serde_json::from_reader(BufReader::new(file))?,
        })
    }

    pub fn from_str(input: &str) -> XsResult<JSONInput> {
        Ok(JSONInput {
            dict: serde_json::from_str(input)?,
        })
    }

    pub fn get_num_threads(&self) -> XsResult<Option<usize>> {
        self.get_usize("threads")
    }

    pub fn get_problem_size(&self) -> XsResult<Option<ProblemSize>> {
        Ok(self.get_str("problem_size")?.map(ProblemSize::from_name))
    }

    pub fn get_lookups(&self) -> XsResult<Option<usize>> {
        self.get_usize("lookups")
    }

    pub fn get_gridpoints(&self) -> XsResult<Option<usize>> {
        self.get_usize("gridpoints")
    }

    pub fn get_seed(&self) -> XsResult<Option<u64>> {
        self.get_u64("seed")
    }

    pub fn get_results_file(&self) -> XsResult<Option<PathBuf>> {
        Ok(self.get_str("results_file")?.map(PathBuf::from))
    }

    /// Builds the benchmark configuration, defaults filling the missing fields
    pub fn get_config(&self) -> XsResult<BenchmarkConfig> {
        if !self.dict.is_object() {
            return Err(XsBenchError::InvalidInput(
                "input file should contain a JSON object".to_string(),
            ));
        }
        let mut config = BenchmarkConfig::default();

        if let Some(num_threads) = self.get_num_threads()? {
            config.num_threads = num_threads;
        }
        if let Some(problem_size) = self.get_problem_size()? {
            config.problem_size = problem_size;
        }
        if let Some(lookups) = self.get_lookups()? {
            config.lookups = lookups;
        }
        if let Some(n_gridpoints) = self.get_gridpoints()? {
            config.n_gridpoints = n_gridpoints;
        }
        if let Some(seed) = self.get_seed()? {
            config.seed = seed;
        }
        if let Some(group_label) = self.get_u64("group_label")? {
            config.group_label = u32::try_from(group_label).map_err(|_| {
                XsBenchError::InvalidInput(format!("group_label {} is too large", group_label))
            })?;
        }
        if let Some(num_groups) = self.get_usize("groups")? {
            config.num_groups = num_groups;
        }
        if let Some(extra_flops) = self.get_usize("extra_flops")? {
            config.extra_flops = extra_flops;
        }
        if let Some(extra_loads) = self.get_usize("extra_loads")? {
            config.extra_loads = extra_loads;
        }
        if let Some(show_progress) = self.get_bool("progress")? {
            config.show_progress = show_progress;
        }
        if let Some(save_results) = self.get_bool("save_results")? {
            config.save_results = save_results;
        }
        if let Some(results_file) = self.get_results_file()? {
            config.results_file = results_file;
        }
        Ok(config)
    }

    fn get_u64(&self, key: &str) -> XsResult<Option<u64>> {
        match &self.dict[key] {
            serde_json::Value::Null => Ok(None),
            value => value.as_u64().map(Some).ok_or_else(|| invalid_field(key, value)),
        }
    }

    fn get_usize(&self, key: &str) -> XsResult<Option<usize>> {
        match self.get_u64(key)? {
            Some(value) => usize::try_from(value)
                .map(Some)
                .map_err(|_| XsBenchError::InvalidInput(format!("{} {} is too large", key, value))),
            None => Ok(None),
        }
    }

    fn get_bool(&self, key: &str) -> XsResult<Option<bool>> {
        match &self.dict[key] {
            serde_json::Value::Null => Ok(None),
            value => value.as_bool().map(Some).ok_or_else(|| invalid_field(key, value)),
        }
    }

    fn get_str(&self, key: &str) -> XsResult<Option<&str>> {
        match &self.dict[key] {
            serde_json::Value::Null => Ok(None),
            value => value.as_str().map(Some).ok_or_else(|| invalid_field(key, value)),
        }
    }
}

fn invalid_field(key: &str, value: &serde_json::Value) -> XsBenchError {
    XsBenchError::InvalidInput(format!("unexpected value for '{}': {}", key, value))
}
