use crate::file::error::FileError;
use model::records::work_item::WorkItem;
use std::{fs, path::Path};
use tracing::{debug, warn};

/// Lists the work items of an input location.
pub trait InputDiscovery: Send + Sync {
    fn list(&self, dir: &Path) -> Result<Vec<WorkItem>, FileError>;
}

/// Treats every regular, non-hidden file of a directory as one work item,
/// ordered by file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryListing;

impl InputDiscovery for DirectoryListing {
    fn list(&self, dir: &Path) -> Result<Vec<WorkItem>, FileError> {
        if !dir.is_dir() {
            return Err(FileError::NotFound(dir.display().to_string()));
        }

        let mut items = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| FileError::from_io(dir, e))? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                warn!("Skipping hidden file {}", path.display());
                continue;
            }
            items.push(WorkItem::new(name, path));
        }

        items.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Discovered {} input files in {}", items.len(), dir.display());
        Ok(items)
    }
}
