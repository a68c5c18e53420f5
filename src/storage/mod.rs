//! File system storage backend
//!
//! A path-agnostic capability set over a filesystem. Every method takes paths
//! that have already been resolved by the caller and performs a single
//! filesystem action; nothing here knows about tenants or layouts.

pub mod filesystem;
pub mod traversal;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;

pub use filesystem::LocalStorage;

/// Primitive operations the tenant service delegates to.
///
/// Implementations surface every failure to the caller and never retry.
pub trait StorageBackend {
    /// Scoped read cursor returned by [`StorageBackend::new_input_stream`]
    type Reader: Read;
    /// Scoped write cursor returned by [`StorageBackend::new_output_stream`]
    type Writer: Write;

    /// Create an empty file. Fails if `path` is occupied or its parent is missing.
    fn create_file(&self, path: &Path) -> Result<PathBuf, StorageError>;

    /// Create a directory and any missing ancestors. Succeeds if it already exists.
    fn create_directory(&self, path: &Path) -> Result<PathBuf, StorageError>;

    /// Recursively delete `path`, children before parents.
    ///
    /// Returns `false` without error when `path` does not exist.
    fn remove_directory(&self, path: &Path) -> Result<bool, StorageError>;

    fn read_string(&self, path: &Path) -> Result<String, StorageError>;

    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>, StorageError>;

    /// Create or truncate `path` and write `contents`. Not atomic.
    fn write_file(&self, path: &Path, contents: &str) -> Result<PathBuf, StorageError>;

    /// Byte-for-byte copy. Never overwrites an existing `target`.
    fn copy_file(&self, source: &Path, target: &Path) -> Result<PathBuf, StorageError>;

    /// Remove a single file, returning whether it existed.
    fn delete_file(&self, path: &Path) -> Result<bool, StorageError>;

    /// Regular files under `path` (recursively) whose full path contains `term`.
    fn search_file(&self, path: &Path, term: &str) -> Result<Vec<PathBuf>, StorageError>;

    fn exists(&self, path: &Path) -> bool;

    fn not_exists(&self, path: &Path) -> bool {
        !self.exists(path)
    }

    /// Regular files directly inside `path`; subdirectories are skipped.
    fn list(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError>;

    fn new_input_stream(&self, path: &Path) -> Result<Self::Reader, StorageError>;

    /// Open `path` for writing, creating or truncating it.
    fn new_output_stream(&self, path: &Path) -> Result<Self::Writer, StorageError>;
}
