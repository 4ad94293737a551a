//! Filesystem photo storage
//!
//! Stores uploaded report photos as flat files in a configured directory,
//! served back through the static upload mount. Names are generated
//! server-side; the client filename only contributes its extension.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::UploadConfig;
use crate::core::error::AppError;
use crate::shared::constants::{DEFAULT_PHOTO_EXTENSION, UPLOADS_ROUTE};

/// Filesystem-backed store for uploaded photos
pub struct PhotoStore {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl PhotoStore {
    /// Create a photo store rooted at the configured upload directory
    ///
    /// Creates the directory (and parents) if it does not exist yet.
    pub fn new(config: &UploadConfig) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.dir).map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory '{}': {}",
                config.dir.display(),
                e
            ))
        })?;

        info!("Photo store initialized at {}", config.dir.display());

        Ok(Self {
            dir: config.dir.clone(),
            allowed_extensions: config.allowed_extensions.clone(),
        })
    }

    /// Whether a multipart part's MIME type counts as an image
    pub fn is_image(content_type: &str) -> bool {
        content_type.starts_with("image/")
    }

    /// Store photo bytes under a fresh server-generated name
    ///
    /// # Arguments
    /// * `data` - The photo content as bytes
    /// * `original_filename` - The client filename, used only for its extension
    ///
    /// # Returns
    /// The public URL path of the stored photo
    pub async fn store(&self, data: &[u8], original_filename: &str) -> Result<String, AppError> {
        let name = format!(
            "{}.{}",
            Uuid::new_v4(),
            self.pick_extension(original_filename)
        );
        let path = self.dir.join(&name);

        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!("Failed to write photo '{}': {}", path.display(), e))
        })?;

        debug!("Stored photo '{}' ({} bytes)", name, data.len());
        Ok(format!("{}/{}", UPLOADS_ROUTE, name))
    }

    /// Delete the file behind a stored photo URL
    ///
    /// Best effort: a missing file or filesystem error is logged and reported
    /// as `false`, never surfaced as an error. Record deletion must not stall
    /// on a blob that is already gone.
    ///
    /// # Returns
    /// `true` if a file was actually removed
    pub async fn delete(&self, url: &str) -> bool {
        let Some(path) = self.resolve(url) else {
            warn!("Refusing to delete photo with foreign url '{}'", url);
            return false;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted photo '{}'", path.display());
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Photo already gone: '{}'", path.display());
                false
            }
            Err(e) => {
                warn!("Failed to delete photo '{}': {}", path.display(), e);
                false
            }
        }
    }

    /// Map a stored photo URL back to a path inside the upload directory
    ///
    /// Only the final path component is kept, so a crafted URL cannot point
    /// outside the upload directory.
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let rest = url.strip_prefix(UPLOADS_ROUTE)?.strip_prefix('/')?;
        let name = Path::new(rest).file_name()?;
        Some(self.dir.join(name))
    }

    /// Extension for a stored photo: the client's own when allowlisted,
    /// the default otherwise
    fn pick_extension(&self, original_filename: &str) -> String {
        original_filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| self.allowed_extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or_else(|| DEFAULT_PHOTO_EXTENSION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::create_test_photo_store;

    #[test]
    fn image_content_types_are_recognized() {
        assert!(PhotoStore::is_image("image/png"));
        assert!(PhotoStore::is_image("image/jpeg"));
        assert!(!PhotoStore::is_image("text/plain"));
        assert!(!PhotoStore::is_image("application/pdf"));
        assert!(!PhotoStore::is_image(""));
    }

    #[tokio::test]
    async fn store_keeps_allowed_extension_and_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_photo_store(dir.path());

        let url = store.store(b"fake png bytes", "Pump House.PNG").await.unwrap();
        assert!(url.starts_with("/static/uploads/"));
        assert!(url.ends_with(".png"));

        let stored: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(stored.len(), 1);

        assert!(store.delete(&url).await);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        // Second delete finds nothing and says so without failing
        assert!(!store.delete(&url).await);
    }

    #[tokio::test]
    async fn store_falls_back_to_default_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_photo_store(dir.path());

        let url = store.store(b"data", "malware.exe").await.unwrap();
        assert!(url.ends_with(".jpg"));

        let url = store.store(b"data", "no_extension").await.unwrap();
        assert!(url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn delete_rejects_urls_outside_the_upload_mount() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_photo_store(dir.path());

        assert!(!store.delete("/etc/passwd").await);
        assert!(!store.delete("uploads/loose.jpg").await);
        assert!(!store.delete("/static/uploadsextra/x.jpg").await);
    }

    #[tokio::test]
    async fn delete_never_escapes_the_upload_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_photo_store(dir.path());

        let outside = dir.path().join("../escape-target");
        std::fs::write(&outside, b"keep me").unwrap();

        assert!(!store.delete("/static/uploads/../escape-target").await);
        assert!(outside.exists());

        std::fs::remove_file(&outside).unwrap();
    }
}
