//! Job definitions. Defaults mirror the click-aggregation setup these
//! pipelines were first written for.

use crate::{
    error::ConfigError,
    settings::{DEFAULT_WORKERS, WorkerCounts, require_column},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_value_column() -> String {
    "count".to_string()
}

fn default_id_column() -> String {
    "id".to_string()
}

fn default_attribute_columns() -> Vec<String> {
    vec!["date".to_string(), "click_target".to_string()]
}

/// Counts rows per distinct value of `key_column` across every file of
/// `input_dir`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountJob {
    pub input_dir: PathBuf,
    pub key_column: String,
    /// Header of the count column in the written result.
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default = "default_workers")]
    pub mapper_count: usize,
    #[serde(default = "default_workers")]
    pub reducer_count: usize,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl CountJob {
    pub fn new(input_dir: impl Into<PathBuf>, key_column: impl Into<String>) -> Self {
        CountJob {
            input_dir: input_dir.into(),
            key_column: key_column.into(),
            value_column: default_value_column(),
            mapper_count: DEFAULT_WORKERS,
            reducer_count: DEFAULT_WORKERS,
            output: None,
        }
    }

    pub fn with_workers(mut self, mapper_count: usize, reducer_count: usize) -> Self {
        self.mapper_count = mapper_count;
        self.reducer_count = reducer_count;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn validate(&self) -> Result<WorkerCounts, ConfigError> {
        require_column("key_column", &self.key_column)?;
        require_column("value_column", &self.value_column)?;
        WorkerCounts::new(self.mapper_count, self.reducer_count)
    }
}

/// Keeps rows of `join_input_dir` whose `join_key_column` matches the key of
/// some row of `filter_input_dir` with `filter_column == filter_value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterJoinJob {
    pub filter_input_dir: PathBuf,
    /// Key column on the filter side.
    #[serde(default = "default_id_column")]
    pub filter_key_column: String,
    pub filter_column: String,
    pub filter_value: String,
    pub join_input_dir: PathBuf,
    pub join_key_column: String,
    #[serde(default = "default_attribute_columns")]
    pub attribute_columns: Vec<String>,
    /// Header of the key column in the written result.
    #[serde(default = "default_id_column")]
    pub output_key_column: String,
    #[serde(default = "default_workers")]
    pub mapper_count: usize,
    #[serde(default = "default_workers")]
    pub reducer_count: usize,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl FilterJoinJob {
    pub fn new(
        filter_input_dir: impl Into<PathBuf>,
        filter_column: impl Into<String>,
        filter_value: impl Into<String>,
        join_input_dir: impl Into<PathBuf>,
        join_key_column: impl Into<String>,
    ) -> Self {
        FilterJoinJob {
            filter_input_dir: filter_input_dir.into(),
            filter_key_column: default_id_column(),
            filter_column: filter_column.into(),
            filter_value: filter_value.into(),
            join_input_dir: join_input_dir.into(),
            join_key_column: join_key_column.into(),
            attribute_columns: default_attribute_columns(),
            output_key_column: default_id_column(),
            mapper_count: DEFAULT_WORKERS,
            reducer_count: DEFAULT_WORKERS,
            output: None,
        }
    }

    pub fn with_workers(mut self, mapper_count: usize, reducer_count: usize) -> Self {
        self.mapper_count = mapper_count;
        self.reducer_count = reducer_count;
        self
    }

    pub fn with_filter_key_column(mut self, column: impl Into<String>) -> Self {
        self.filter_key_column = column.into();
        self
    }

    pub fn with_attribute_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Header of the written result: the key, then the attributes.
    pub fn output_columns(&self) -> Vec<String> {
        std::iter::once(self.output_key_column.clone())
            .chain(self.attribute_columns.iter().cloned())
            .collect()
    }

    pub fn validate(&self) -> Result<WorkerCounts, ConfigError> {
        require_column("filter_key_column", &self.filter_key_column)?;
        require_column("filter_column", &self.filter_column)?;
        require_column("join_key_column", &self.join_key_column)?;
        require_column("output_key_column", &self.output_key_column)?;
        for column in &self.attribute_columns {
            require_column("attribute_columns", column)?;
        }
        WorkerCounts::new(self.mapper_count, self.reducer_count)
    }
}

/// A job file: one pipeline, selected by its `mode` tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum JobConfig {
    Count(CountJob),
    FilterJoin(FilterJoinJob),
}

impl JobConfig {
    pub fn output(&self) -> Option<&Path> {
        match self {
            JobConfig::Count(job) => job.output.as_deref(),
            JobConfig::FilterJoin(job) => job.output.as_deref(),
        }
    }

    pub fn validate(&self) -> Result<WorkerCounts, ConfigError> {
        match self {
            JobConfig::Count(job) => job.validate(),
            JobConfig::FilterJoin(job) => job.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_job_defaults() {
        let job: JobConfig = serde_json::from_str(
            r#"{ "mode": "count", "input_dir": "./data/clicks", "key_column": "date" }"#,
        )
        .unwrap();

        let JobConfig::Count(job) = job else {
            panic!("expected a count job");
        };
        assert_eq!(job, CountJob::new("./data/clicks", "date"));
        assert_eq!(job.value_column, "count");
        assert_eq!((job.mapper_count, job.reducer_count), (2, 2));
    }

    #[test]
    fn test_filter_join_job() {
        let job: JobConfig = serde_json::from_str(
            r#"{
                "mode": "filter_join",
                "filter_input_dir": "./data/users",
                "filter_column": "country",
                "filter_value": "LT",
                "join_input_dir": "./data/clicks",
                "join_key_column": "user_id",
                "mapper_count": 4,
                "output": "./data/filtered_clicks.csv"
            }"#,
        )
        .unwrap();

        assert_eq!(job.output(), Some(Path::new("./data/filtered_clicks.csv")));
        let JobConfig::FilterJoin(job) = job else {
            panic!("expected a filter_join job");
        };
        assert_eq!(job.filter_key_column, "id");
        assert_eq!(job.mapper_count, 4);
        assert_eq!(job.reducer_count, 2);
        assert_eq!(job.output_columns(), vec!["id", "date", "click_target"]);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let res: Result<JobConfig, _> =
            serde_json::from_str(r#"{ "mode": "sum", "input_dir": "x", "key_column": "k" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_negative_worker_count_rejected_at_parse() {
        let res: Result<JobConfig, _> = serde_json::from_str(
            r#"{ "mode": "count", "input_dir": "x", "key_column": "k", "mapper_count": -1 }"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_validation() {
        let job = CountJob::new("in", "date").with_workers(0, 1);
        assert!(matches!(
            job.validate(),
            Err(ConfigError::InvalidWorkerCount {
                name: "mapper_count",
                ..
            })
        ));

        let job = CountJob::new("in", "");
        assert!(matches!(
            job.validate(),
            Err(ConfigError::MissingColumn("key_column"))
        ));

        let job = FilterJoinJob::new("users", "country", "LT", "clicks", "user_id")
            .with_attribute_columns(["date", ""]);
        assert!(matches!(
            job.validate(),
            Err(ConfigError::MissingColumn("attribute_columns"))
        ));

        let counts = FilterJoinJob::new("users", "country", "LT", "clicks", "user_id")
            .with_workers(3, 2)
            .validate()
            .unwrap();
        assert_eq!(counts, WorkerCounts::new(3, 2).unwrap());
    }
}
