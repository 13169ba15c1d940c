use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What happened to the files handed to [`remove_paths`].
#[derive(Debug, Default, Serialize)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<FailedRemoval>,
}

#[derive(Debug, Serialize)]
pub struct FailedRemoval {
    pub path: PathBuf,
    pub error: String,
}

impl CleanupReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove every given file.
///
/// A file that cannot be removed is logged and recorded in the report; the remaining
/// files are still attempted.
pub fn remove_paths<'a, I>(paths: I) -> CleanupReport
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut report = CleanupReport::default();
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {
                tracing::info!("Removed obsolete package file: {}", path.display());
                report.removed.push(path.to_path_buf());
            }
            Err(e) => {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
                report.failed.push(FailedRemoval {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                });
            }
        }
    }
    report
}
