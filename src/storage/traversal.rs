//! Recursive directory walks
//!
//! Search and recursive removal both walk a tree with `walkdir`; listing stays
//! on a single level with `fs::read_dir`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::StorageError;

fn walk_error(root: &Path, error: walkdir::Error) -> StorageError {
    let path = error.path().unwrap_or(root).to_path_buf();
    StorageError::from_io(&path, io::Error::from(error))
}

/// Every entry under `root` (root included) ordered so that each entry comes
/// before its parent directory.
pub fn deletion_order(root: &Path) -> Result<Vec<DirEntry>, StorageError> {
    WalkDir::new(root)
        .follow_root_links(false)
        .contents_first(true)
        .into_iter()
        .map(|entry| entry.map_err(|e| walk_error(root, e)))
        .collect()
}

/// Regular files under `root` whose stringified path contains `term`
pub fn search_files(root: &Path, term: &str) -> Result<Vec<PathBuf>, StorageError> {
    let mut matches = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if entry.file_type().is_file() && entry.path().to_string_lossy().contains(term) {
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

/// Regular files directly inside `dir`
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let entries = fs::read_dir(dir).map_err(|e| StorageError::from_io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::from_io(dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| StorageError::from_io(&entry.path(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }

    Ok(files)
}
