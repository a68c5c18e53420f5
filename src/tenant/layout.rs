//! Directory layout and tenant path resolution
//!
//! All paths are derived once from the configured root. Tenant identities are
//! joined into paths verbatim; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

/// Fixed text resource written and read back inside a tenant directory
pub const TEXT_RESOURCE_NAME: &str = "test.txt";

/// Segments of the audio content file below a tenant directory
pub const AUDIO_CONTENT_SEGMENTS: [&str; 3] =
    ["audioContents", "audioContents-uid", "audioContentsHistoryUid"];

/// The five directories the service owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLayout {
    root: PathBuf,
    voice_static: PathBuf,
    mail_template: PathBuf,
    reservation_mail: PathBuf,
    api: PathBuf,
}

impl RootLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            voice_static: root.join("static"),
            mail_template: root.join("static").join("templates"),
            reservation_mail: root.join("mail").join("reservation"),
            api: root.join("api"),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn voice_static(&self) -> &Path {
        &self.voice_static
    }

    pub fn mail_template(&self) -> &Path {
        &self.mail_template
    }

    pub fn reservation_mail(&self) -> &Path {
        &self.reservation_mail
    }

    pub fn api(&self) -> &Path {
        &self.api
    }

    /// Layout directories in bootstrap order, parents first
    pub fn directories(&self) -> [&Path; 5] {
        [
            &self.root,
            &self.voice_static,
            &self.mail_template,
            &self.reservation_mail,
            &self.api,
        ]
    }

    /// `root/api/<service_code>/<user_email>`
    pub fn tenant_dir(&self, tenant: &TenantKey<'_>) -> PathBuf {
        self.api.join(tenant.service_code).join(tenant.user_email)
    }
}

/// Logical owner of a tenant directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantKey<'a> {
    pub service_code: &'a str,
    pub user_email: &'a str,
}

impl<'a> TenantKey<'a> {
    pub fn new(service_code: &'a str, user_email: &'a str) -> Self {
        Self {
            service_code,
            user_email,
        }
    }
}

/// Relative suffix naming one file under a tenant directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceHandle {
    Text,
    AudioContent,
}

impl ResourceHandle {
    pub fn resolve(self, tenant_dir: &Path) -> PathBuf {
        match self {
            ResourceHandle::Text => tenant_dir.join(TEXT_RESOURCE_NAME),
            ResourceHandle::AudioContent => AUDIO_CONTENT_SEGMENTS
                .iter()
                .fold(tenant_dir.to_path_buf(), |path, segment| path.join(segment)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = RootLayout::new("/nas");
        assert_eq!(
            layout.directories(),
            [
                Path::new("/nas"),
                Path::new("/nas/static"),
                Path::new("/nas/static/templates"),
                Path::new("/nas/mail/reservation"),
                Path::new("/nas/api"),
            ]
        );
    }

    #[test]
    fn test_tenant_resolution() {
        let layout = RootLayout::new("/nas");
        let tenant = TenantKey::new("001WEB001", "test@test.com");
        let dir = layout.tenant_dir(&tenant);
        assert_eq!(dir, Path::new("/nas/api/001WEB001/test@test.com"));
        assert_eq!(
            ResourceHandle::Text.resolve(&dir),
            Path::new("/nas/api/001WEB001/test@test.com/test.txt")
        );
        assert_eq!(
            ResourceHandle::AudioContent.resolve(&dir),
            Path::new(
                "/nas/api/001WEB001/test@test.com/audioContents/audioContents-uid/audioContentsHistoryUid"
            )
        );
    }
}
