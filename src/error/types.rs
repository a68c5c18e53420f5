//! Error types
//!
//! Storage failures keep the offending path and, for I/O failures, the
//! original `io::Error` so callers can tell a missing resource from a broken
//! filesystem without inspecting messages.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Coarse classification of a storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    IoFailure,
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    NotFound(PathBuf),
    AlreadyExists(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl StorageError {
    /// Attach `path` to an `io::Error`, keeping not-found and already-exists distinguishable
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_path_buf()),
            _ => StorageError::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::NotFound(_) => ErrorKind::NotFound,
            StorageError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            StorageError::Io { .. } => ErrorKind::IoFailure,
        }
    }

    /// Path the failed operation was targeting
    pub fn path(&self) -> &Path {
        match self {
            StorageError::NotFound(p) | StorageError::AlreadyExists(p) => p,
            StorageError::Io { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            StorageError::AlreadyExists(p) => write!(f, "Already exists: {}", p.display()),
            StorageError::Io { path, source } => {
                write!(f, "IO error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors surfaced by the proxy binary at startup
#[derive(Debug)]
pub enum NasError {
    Config(config::ConfigError),
    Storage(StorageError),
}

impl fmt::Display for NasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NasError::Config(e) => write!(f, "Configuration error: {}", e),
            NasError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for NasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NasError::Config(e) => Some(e),
            NasError::Storage(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for NasError {
    fn from(error: config::ConfigError) -> Self {
        NasError::Config(error)
    }
}

impl From<StorageError> for NasError {
    fn from(error: StorageError) -> Self {
        NasError::Storage(error)
    }
}
