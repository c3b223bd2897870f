use serde::Serialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// One input shard. Created by input discovery and handed to exactly one map
/// worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WorkItem {
    pub name: String,
    pub path: PathBuf,
}

impl WorkItem {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        WorkItem {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
