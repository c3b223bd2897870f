#![allow(dead_code)]

use connectors::file::csv::sink::CsvSink;
use engine_config::loader;
use engine_runtime::{
    error::PipelineError,
    execution::{context::PipelineContext, executor, report::RunSummary},
};
use std::{
    collections::{BTreeMap, HashSet},
    fs::{self, File},
    io::{BufRead, BufReader, Write},
    path::Path,
    sync::Arc,
};
use tempfile::TempDir;

pub const CLICKS_HEADER: &str = "user_id,date,click_target";
pub const USERS_HEADER: &str = "id,country";

#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub user_id: String,
    pub date: String,
    pub click_target: String,
}

impl Click {
    pub fn row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.date.clone(),
            self.click_target.clone(),
        ]
    }
}

/// Click shards written to a temporary directory, plus every click in
/// discovery order.
pub struct ClickShards {
    pub dir: TempDir,
    pub clicks: Vec<Click>,
}

/// Writes `files` click shards of `rows_per_file` rows each. Contents are a
/// deterministic spread over 13 users, 5 dates and 3 targets.
pub fn click_shards(files: usize, rows_per_file: usize) -> ClickShards {
    let dir = tempfile::tempdir().unwrap();
    let mut clicks = Vec::new();

    for file in 0..files {
        let mut out = File::create(dir.path().join(format!("clicks_{file:02}.csv"))).unwrap();
        writeln!(out, "{CLICKS_HEADER}").unwrap();
        for i in 0..rows_per_file {
            let click = Click {
                user_id: format!("u{}", (i * 7 + file * 3) % 13),
                date: format!("2021-01-{:02}", (i + file) % 5 + 1),
                click_target: format!("ad{}", (i * file) % 3),
            };
            writeln!(out, "{},{},{}", click.user_id, click.date, click.click_target).unwrap();
            clicks.push(click);
        }
    }

    ClickShards { dir, clicks }
}

/// Writes `(id, country)` users round-robin over `files` shards.
pub fn user_shards(users: &[(&str, &str)], files: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut shards: Vec<String> = (0..files).map(|_| format!("{USERS_HEADER}\n")).collect();
    for (i, (id, country)) in users.iter().enumerate() {
        shards[i % files].push_str(&format!("{id},{country}\n"));
    }
    for (i, contents) in shards.iter().enumerate() {
        fs::write(dir.path().join(format!("users_{i:02}.csv")), contents).unwrap();
    }
    dir
}

/// Thirteen users, five of them in LT.
pub fn sample_users() -> Vec<(&'static str, &'static str)> {
    vec![
        ("u0", "LT"),
        ("u1", "US"),
        ("u2", "LT"),
        ("u3", "LV"),
        ("u4", "EE"),
        ("u5", "LT"),
        ("u6", "US"),
        ("u7", "DE"),
        ("u8", "LT"),
        ("u9", "PL"),
        ("u10", "US"),
        ("u11", "LT"),
        ("u12", "FI"),
    ]
}

/// Clicks per date, computed directly from the generated rows.
pub fn expected_date_counts(clicks: &[Click]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for click in clicks {
        *counts.entry(click.date.clone()).or_insert(0) += 1;
    }
    counts
}

/// Clicks of users in `country`, in input order.
pub fn expected_join(
    users: &[(&str, &str)],
    country: &str,
    clicks: &[Click],
) -> Vec<Vec<String>> {
    let keep: HashSet<&str> = users
        .iter()
        .filter(|(_, c)| *c == country)
        .map(|(id, _)| *id)
        .collect();
    clicks
        .iter()
        .filter(|click| keep.contains(click.user_id.as_str()))
        .map(Click::row)
        .collect()
}

/// Loads `job` through a job file, the way `mrx run` does, and executes it
/// with the CSV sink.
pub async fn run_job(job: serde_json::Value) -> Result<RunSummary, PipelineError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.json");
    fs::write(&path, serde_json::to_string_pretty(&job).unwrap()).unwrap();

    let job = loader::load(&path).await?;
    executor::run(&PipelineContext::default(), Arc::new(CsvSink::default()), &job).await
}

/// Header and data rows of a result file.
pub fn read_result(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let reader = BufReader::new(File::open(path).unwrap());
    let mut lines = reader.lines().map(|line| {
        line.unwrap()
            .split(',')
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    let header = lines.next().unwrap_or_default();
    (header, lines.collect())
}

/// Count rows of a result file keyed by their first cell. Fails if a key
/// appears on more than one row.
pub fn count_rows(path: &Path) -> BTreeMap<String, u64> {
    let (_, rows) = read_result(path);
    let mut counts = BTreeMap::new();
    for row in rows {
        let previous = counts.insert(row[0].clone(), row[1].parse().unwrap());
        assert!(previous.is_none(), "key {:?} written on more than one row", row[0]);
    }
    counts
}
