//! Tenant storage service
//!
//! Owns the [`RootLayout`] and turns `(service_code, user_email)` identities
//! into paths for the storage backend. Construction bootstraps the layout, so
//! a value of this type always stands for a fully prepared root.
//!
//! Calls are not isolated from each other: two callers writing the same
//! tenant resource race at filesystem granularity, and the text returned by
//! [`TenantStorageService::write_and_read_back`] may be another caller's write.

use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::NasConfig;
use crate::error::StorageError;
use crate::storage::{LocalStorage, StorageBackend};
use crate::tenant::layout::{ResourceHandle, RootLayout, TenantKey};
use crate::tenant::resource::ByteResource;

pub struct TenantStorageService<B = LocalStorage> {
    backend: B,
    layout: RootLayout,
}

impl TenantStorageService<LocalStorage> {
    /// Bootstrap a local-disk service from configuration
    pub fn from_config(config: &NasConfig) -> Result<Self, StorageError> {
        Self::new(
            config.root_path_buf(),
            LocalStorage::with_buffer_size(config.stream_buffer_size),
        )
    }
}

impl<B: StorageBackend> TenantStorageService<B> {
    /// Create every missing layout directory, then hand out the service.
    ///
    /// The first failure aborts construction.
    pub fn new(root: impl Into<PathBuf>, backend: B) -> Result<Self, StorageError> {
        let layout = RootLayout::new(root);

        for dir in layout.directories() {
            if backend.not_exists(dir) {
                backend.create_directory(dir)?;
                info!("Created layout directory {}", dir.display());
            }
        }

        info!("NAS root ready at {}", layout.root().display());

        Ok(Self { backend, layout })
    }

    pub fn layout(&self) -> &RootLayout {
        &self.layout
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Tenant directory for the pair, whether or not it exists yet
    pub fn tenant_dir(&self, service_code: &str, user_email: &str) -> PathBuf {
        self.layout.tenant_dir(&TenantKey::new(service_code, user_email))
    }

    /// Resolve the tenant directory, failing with NotFound if it was never written
    fn existing_tenant_dir(
        &self,
        service_code: &str,
        user_email: &str,
    ) -> Result<PathBuf, StorageError> {
        let dir = self.tenant_dir(service_code, user_email);
        if self.backend.not_exists(&dir) {
            return Err(StorageError::NotFound(dir));
        }
        Ok(dir)
    }

    pub fn tenant_exists(&self, service_code: &str, user_email: &str) -> bool {
        self.backend.exists(&self.tenant_dir(service_code, user_email))
    }

    /// Write `contents` to the tenant's text resource and return what is read back.
    ///
    /// The tenant directory is created on first use.
    pub fn write_and_read_back(
        &self,
        service_code: &str,
        user_email: &str,
        contents: &str,
    ) -> Result<String, StorageError> {
        let dir = self.tenant_dir(service_code, user_email);

        if self.backend.not_exists(&dir) {
            self.backend.create_directory(&dir)?;
            info!("Materialized tenant directory {}", dir.display());
        }

        let resource = ResourceHandle::Text.resolve(&dir);
        self.backend.write_file(&resource, contents)?;

        self.backend.read_string(&resource)
    }

    /// Read the tenant's text resource into memory.
    ///
    /// Never creates the tenant directory.
    pub fn fetch_resource(
        &self,
        service_code: &str,
        user_email: &str,
    ) -> Result<ByteResource, StorageError> {
        let dir = self.existing_tenant_dir(service_code, user_email)?;
        let resource = ResourceHandle::Text.resolve(&dir);

        let bytes = self.backend.read_all_bytes(&resource)?;
        debug!("Fetched {} ({} bytes)", resource.display(), bytes.len());

        Ok(ByteResource::new(bytes))
    }

    /// Copy the tenant's audio content file into `sink`, returning the bytes copied
    pub fn stream_audio_content<W>(
        &self,
        service_code: &str,
        user_email: &str,
        sink: &mut W,
    ) -> Result<u64, StorageError>
    where
        W: Write + ?Sized,
    {
        let dir = self.tenant_dir(service_code, user_email);
        let resource = ResourceHandle::AudioContent.resolve(&dir);

        let mut reader = self.backend.new_input_stream(&resource)?;
        let copied = io::copy(&mut reader, &mut *sink)
            .and_then(|copied| sink.flush().map(|()| copied))
            .map_err(|e| StorageError::from_io(&resource, e))?;

        debug!("Streamed {} ({} bytes)", resource.display(), copied);
        Ok(copied)
    }

    /// Regular files directly inside the tenant directory
    pub fn list_resources(
        &self,
        service_code: &str,
        user_email: &str,
    ) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.existing_tenant_dir(service_code, user_email)?;
        self.backend.list(&dir)
    }

    /// Files anywhere under the tenant directory whose path contains `term`
    pub fn search_resources(
        &self,
        service_code: &str,
        user_email: &str,
        term: &str,
    ) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.existing_tenant_dir(service_code, user_email)?;
        self.backend.search_file(&dir, term)
    }

    /// Delete the tenant directory and everything in it
    pub fn remove_tenant(
        &self,
        service_code: &str,
        user_email: &str,
    ) -> Result<bool, StorageError> {
        let dir = self.tenant_dir(service_code, user_email);
        let removed = self.backend.remove_directory(&dir)?;
        if removed {
            info!("Removed tenant directory {}", dir.display());
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    const SERVICE_CODE: &str = "001WEB001";
    const USER_EMAIL: &str = "test@test.com";

    fn service() -> (TempDir, TenantStorageService) {
        let dir = TempDir::new().unwrap();
        let service =
            TenantStorageService::new(dir.path().join("nas"), LocalStorage::new()).unwrap();
        (dir, service)
    }

    #[test]
    fn test_bootstrap_creates_layout() {
        let (_dir, service) = service();
        for path in service.layout().directories() {
            assert!(path.is_dir(), "{} missing", path.display());
        }
    }

    #[test]
    fn test_bootstrap_over_existing_layout() {
        let (dir, service) = service();
        fs::write(service.layout().api().join("keep.txt"), "x").unwrap();

        let again = TenantStorageService::new(dir.path().join("nas"), LocalStorage::new()).unwrap();
        assert!(again.layout().api().join("keep.txt").is_file());
    }

    #[test]
    fn test_bootstrap_fails_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nas");
        fs::write(&root, "not a directory").unwrap();

        let result = TenantStorageService::new(&root, LocalStorage::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_and_read_back_round_trip() {
        let (_dir, service) = service();
        let result = service
            .write_and_read_back(SERVICE_CODE, USER_EMAIL, "sample text")
            .unwrap();
        assert_eq!(result, "sample text");
        assert!(service.tenant_exists(SERVICE_CODE, USER_EMAIL));
    }

    #[test]
    fn test_fetch_resource_after_write() {
        let (_dir, service) = service();
        service
            .write_and_read_back(SERVICE_CODE, USER_EMAIL, "hello world")
            .unwrap();

        let resource = service.fetch_resource(SERVICE_CODE, USER_EMAIL).unwrap();
        assert_eq!(resource.as_bytes(), b"hello world");
        assert_eq!(resource.content_length(), 11);
    }

    #[test]
    fn test_fetch_unknown_tenant_is_not_found() {
        let (_dir, service) = service();
        let err = service.fetch_resource(SERVICE_CODE, USER_EMAIL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!service.tenant_exists(SERVICE_CODE, USER_EMAIL));
    }

    #[test]
    fn test_stream_audio_content() {
        let (_dir, service) = service();
        let tenant_dir = service.tenant_dir(SERVICE_CODE, USER_EMAIL);
        let audio = ResourceHandle::AudioContent.resolve(&tenant_dir);
        fs::create_dir_all(audio.parent().unwrap()).unwrap();
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&audio, &payload).unwrap();

        let mut sink = Vec::new();
        let copied = service
            .stream_audio_content(SERVICE_CODE, USER_EMAIL, &mut sink)
            .unwrap();
        assert_eq!(copied, payload.len() as u64);
        assert_eq!(sink, payload);
    }

    #[test]
    fn test_stream_missing_audio_is_not_found() {
        let (_dir, service) = service();
        let mut sink = Vec::new();
        let err = service
            .stream_audio_content(SERVICE_CODE, USER_EMAIL, &mut sink)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_remove_tenant() {
        let (_dir, service) = service();
        service
            .write_and_read_back(SERVICE_CODE, USER_EMAIL, "bye")
            .unwrap();

        assert!(service.remove_tenant(SERVICE_CODE, USER_EMAIL).unwrap());
        assert!(!service.tenant_exists(SERVICE_CODE, USER_EMAIL));
        assert!(!service.remove_tenant(SERVICE_CODE, USER_EMAIL).unwrap());
        assert!(service.layout().api().join(SERVICE_CODE).is_dir());
    }
}
