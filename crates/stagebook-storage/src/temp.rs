use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Handle to one staged upload on disk.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
    pub original_filename: String,
}

/// Local filesystem store for staged uploads.
///
/// Names are `<millis>_<sanitized-original-filename>`, which keeps them
/// unique by construction within the store directory.
#[derive(Clone)]
pub struct TempStore {
    base_path: PathBuf,
}

impl TempStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(TempStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write one upload to disk and return its handle.
    pub async fn store(&self, original_filename: &str, data: &[u8]) -> StorageResult<StagedFile> {
        let name = format!(
            "{}_{}",
            chrono::Utc::now().timestamp_millis(),
            sanitize_filename(original_filename)
        );
        let path = self.base_path.join(&name);
        let size = data.len();

        let start = std::time::Instant::now();

        fs::write(&path, data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            original_filename = %original_filename,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Staged upload written"
        );

        Ok(StagedFile {
            path,
            original_filename: original_filename.to_string(),
        })
    }

    /// Read a staged file back, e.g. to attach it to an email.
    pub async fn read(&self, staged: &StagedFile) -> StorageResult<Vec<u8>> {
        if !fs::try_exists(&staged.path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(staged.path.display().to_string()));
        }

        fs::read(&staged.path).await.map_err(|e| {
            StorageError::ReadFailed(format!(
                "Failed to read file {}: {}",
                staged.path.display(),
                e
            ))
        })
    }

    /// Delete a staged file. Deleting a file that is already gone is not an
    /// error.
    pub async fn delete(&self, staged: &StagedFile) -> StorageResult<()> {
        if !fs::try_exists(&staged.path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&staged.path).await.map_err(|e| {
            StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                staged.path.display(),
                e
            ))
        })?;

        tracing::info!(path = %staged.path.display(), "Staged upload deleted");

        Ok(())
    }
}

/// Normalize an upload's filename: strip any directory components and replace
/// characters outside [A-Za-z0-9.-_]. Nothing is rejected; hostile names are
/// reduced to a safe one.
fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let name_only = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment");

    let sanitized: String = name_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized.len() < 3 {
        return "file".to_string();
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn store_read_delete_round_trip() {
        let dir = tempdir().unwrap();
        let store = TempStore::new(dir.path()).await.unwrap();

        let staged = store.store("gst.pdf", b"certificate bytes").await.unwrap();
        assert_eq!(staged.original_filename, "gst.pdf");

        let data = store.read(&staged).await.unwrap();
        assert_eq!(data, b"certificate bytes");

        store.delete(&staged).await.unwrap();
        assert!(matches!(
            store.read(&staged).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn stored_name_is_millis_prefixed() {
        let dir = tempdir().unwrap();
        let store = TempStore::new(dir.path()).await.unwrap();

        let staged = store.store("id-card.png", b"img").await.unwrap();
        let name = staged.path.file_name().unwrap().to_str().unwrap();

        let (prefix, rest) = name.split_once('_').expect("millis prefix");
        assert!(prefix.parse::<i64>().is_ok());
        assert_eq!(rest, "id-card.png");
    }

    #[tokio::test]
    async fn delete_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let store = TempStore::new(dir.path()).await.unwrap();

        let staged = StagedFile {
            path: dir.path().join("nonexistent"),
            original_filename: "nonexistent".to_string(),
        };
        assert!(store.delete(&staged).await.is_ok());
    }

    #[tokio::test]
    async fn traversal_names_stay_inside_the_store() {
        let dir = tempdir().unwrap();
        let store = TempStore::new(dir.path()).await.unwrap();

        let staged = store
            .store("../../etc/passwd", b"not a password file")
            .await
            .unwrap();
        assert_eq!(staged.path.parent().unwrap(), dir.path());
        let name = staged.path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_passwd"));
    }

    #[test]
    fn sanitize_replaces_unfriendly_characters() {
        assert_eq!(sanitize_filename("my invoice (1).pdf"), "my_invoice__1_.pdf");
        assert_eq!(sanitize_filename("x"), "file");
        assert_eq!(sanitize_filename(""), "attachment");
    }
}
