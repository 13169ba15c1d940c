use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::index::PackageIndex;
use crate::parsing::decompose;

/// Recursively collect the regular files below each root.
///
/// Symlinks are not followed. Errors are logged and skipped, so an unreadable
/// directory or a missing root does not stop the rest of the walk.
pub fn regular_files<P: AsRef<Path>>(roots: &[P]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        let root = root.as_ref();
        tracing::debug!("Scanning {}", root.display());
        for entry in WalkDir::new(root) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => tracing::error!("{}", e),
            }
        }
    }
    files
}

/// Parse every path and group the results by package name.
///
/// Parsing runs in parallel; the index itself is filled afterwards on the calling thread
/// in input order, so the first of two identical paths wins.
pub fn build_index(files: &[PathBuf]) -> PackageIndex {
    let entries: Vec<_> = files
        .par_iter()
        .filter_map(|path| {
            let parts = decompose(path).into_parts();
            if parts.is_none() {
                tracing::info!("Skipping {}: not a versioned package file", path.display());
            }
            parts
        })
        .collect();

    tracing::debug!("Parsed {} of {} files", entries.len(), files.len());
    entries.into_iter().collect()
}
