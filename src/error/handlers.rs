//! Error handlers
//!
//! Helpers for the hosting layer that turns storage failures into responses.

use crate::error::types::{ErrorKind, StorageError};
use log::error;

/// Log a storage error
pub fn handle_error(err: &StorageError) {
    error!("NAS storage error: {}", err);
}

/// Convert error to an HTTP-style status code
pub fn error_to_status_code(err: &StorageError) -> u16 {
    match err.kind() {
        ErrorKind::NotFound => 404,
        ErrorKind::AlreadyExists => 409,
        ErrorKind::IoFailure => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_status_codes() {
        let path = PathBuf::from("x");
        assert_eq!(error_to_status_code(&StorageError::NotFound(path.clone())), 404);
        assert_eq!(
            error_to_status_code(&StorageError::AlreadyExists(path.clone())),
            409
        );
        let io_err = StorageError::Io {
            path,
            source: io::Error::other("disk full"),
        };
        assert_eq!(error_to_status_code(&io_err), 500);
    }
}
