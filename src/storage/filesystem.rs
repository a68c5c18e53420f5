//! File system operations
//!
//! Local-disk implementation of [`StorageBackend`].

use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_STREAM_BUFFER_SIZE;
use crate::error::StorageError;
use crate::storage::StorageBackend;
use crate::storage::traversal::{deletion_order, list_files, search_files};

/// Storage backend over the local filesystem
#[derive(Debug, Clone)]
pub struct LocalStorage {
    buffer_size: usize,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::with_buffer_size(DEFAULT_STREAM_BUFFER_SIZE)
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose stream handles buffer `buffer_size` bytes
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

/// Fail with NotFound unless `path` is a regular file
fn require_file(path: &Path) -> Result<(), StorageError> {
    let metadata = fs::metadata(path).map_err(|e| StorageError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

impl StorageBackend for LocalStorage {
    type Reader = BufReader<File>;
    type Writer = BufWriter<File>;

    fn create_file(&self, path: &Path) -> Result<PathBuf, StorageError> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| StorageError::from_io(path, e))?;

        debug!("Created file {}", path.display());
        Ok(path.to_path_buf())
    }

    fn create_directory(&self, path: &Path) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(path).map_err(|e| StorageError::from_io(path, e))?;

        debug!("Ensured directory {}", path.display());
        Ok(path.to_path_buf())
    }

    fn remove_directory(&self, path: &Path) -> Result<bool, StorageError> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(StorageError::from_io(path, e)),
        };

        // A link or plain file is a single leaf; never descend into a link target
        if !metadata.is_dir() {
            fs::remove_file(path).map_err(|e| StorageError::from_io(path, e))?;
            info!("Removed {} (1 entry)", path.display());
            return Ok(true);
        }

        let entries = deletion_order(path)?;
        let removed = entries.len();

        for entry in entries {
            let target = entry.path();
            let result = if entry.file_type().is_dir() {
                fs::remove_dir(target)
            } else {
                fs::remove_file(target)
            };
            result.map_err(|e| StorageError::from_io(target, e))?;
        }

        info!("Removed {} ({} entries)", path.display(), removed);
        Ok(true)
    }

    fn read_string(&self, path: &Path) -> Result<String, StorageError> {
        require_file(path)?;
        fs::read_to_string(path).map_err(|e| StorageError::from_io(path, e))
    }

    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        require_file(path)?;
        fs::read(path).map_err(|e| StorageError::from_io(path, e))
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<PathBuf, StorageError> {
        fs::write(path, contents).map_err(|e| StorageError::from_io(path, e))?;

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(path.to_path_buf())
    }

    fn copy_file(&self, source: &Path, target: &Path) -> Result<PathBuf, StorageError> {
        require_file(source)?;
        let mut reader = File::open(source).map_err(|e| StorageError::from_io(source, e))?;

        // create_new refuses an occupied target without a separate existence check
        let mut writer = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)
            .map_err(|e| StorageError::from_io(target, e))?;

        let copied =
            io::copy(&mut reader, &mut writer).map_err(|e| StorageError::from_io(target, e))?;

        debug!(
            "Copied {} -> {} ({} bytes)",
            source.display(),
            target.display(),
            copied
        );
        Ok(target.to_path_buf())
    }

    fn delete_file(&self, path: &Path) -> Result<bool, StorageError> {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Deleted file {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from_io(path, e)),
        }
    }

    fn search_file(&self, path: &Path, term: &str) -> Result<Vec<PathBuf>, StorageError> {
        let matches = search_files(path, term)?;

        debug!(
            "Search for '{}' under {} matched {} files",
            term,
            path.display(),
            matches.len()
        );
        Ok(matches)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError> {
        list_files(path)
    }

    fn new_input_stream(&self, path: &Path) -> Result<Self::Reader, StorageError> {
        let file = File::open(path).map_err(|e| StorageError::from_io(path, e))?;
        Ok(BufReader::with_capacity(self.buffer_size, file))
    }

    fn new_output_stream(&self, path: &Path) -> Result<Self::Writer, StorageError> {
        let file = File::create(path).map_err(|e| StorageError::from_io(path, e))?;
        Ok(BufWriter::with_capacity(self.buffer_size, file))
    }
}
