//! Upload staging and file context for file-consuming operations.
//!
//! Every request stages its upload under a fresh uuid directory, so two
//! concurrent uploads of identically named files never share a path.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Extensions the pipeline accepts as uploads. Anything else is rejected as
/// a client-input error before extraction runs.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "csv", "json", "txt", "md",
];

/// Where an uploaded file (and any files derived from it) were materialized.
/// Read-only to the pipeline; lives for one request.
#[derive(Debug, Clone)]
pub struct FileContext {
    pub directory: PathBuf,
    pub names: Vec<String>,
}

impl FileContext {
    /// Full path of the primary uploaded file.
    pub fn primary_path(&self) -> Option<PathBuf> {
        self.names.first().map(|name| self.directory.join(name))
    }
}

/// Errors raised while staging an upload.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("invalid file name: {0}")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stages uploads into per-request unique directories under one root.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write an upload to a fresh request-scoped directory.
    pub fn stage(&self, original_name: &str, bytes: &[u8]) -> Result<FileContext, FileError> {
        let name = sanitize_name(original_name)?;
        check_supported(&name)?;

        let directory = self.root.join(Uuid::new_v4().to_string());
        std::fs::create_dir_all(&directory)?;
        std::fs::write(directory.join(&name), bytes)?;

        tracing::debug!("staged upload '{}' in {}", name, directory.display());
        Ok(FileContext {
            directory,
            names: vec![name],
        })
    }
}

/// Strip any path components a client smuggled into the file name.
fn sanitize_name(original: &str) -> Result<String, FileError> {
    Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .map(str::to_string)
        .ok_or_else(|| FileError::InvalidName(original.to_string()))
}

fn check_supported(name: &str) -> Result<(), FileError> {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(FileError::Unsupported(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_stage_writes_file_under_unique_directory() {
        let (_guard, store) = store();
        let context = store.stage("photo.png", b"bytes").unwrap();
        let path = context.primary_path().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
        assert_eq!(context.names, vec!["photo.png".to_string()]);
    }

    #[test]
    fn test_same_name_twice_never_collides() {
        let (_guard, store) = store();
        let first = store.stage("photo.png", b"one").unwrap();
        let second = store.stage("photo.png", b"two").unwrap();
        assert_ne!(first.directory, second.directory);
        assert_eq!(std::fs::read(first.primary_path().unwrap()).unwrap(), b"one");
        assert_eq!(std::fs::read(second.primary_path().unwrap()).unwrap(), b"two");
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let (_guard, store) = store();
        let err = store.stage("malware.exe", b"x").unwrap_err();
        assert!(matches!(err, FileError::Unsupported(_)));
    }

    #[test]
    fn test_path_components_stripped() {
        let (_guard, store) = store();
        let context = store.stage("../../etc/passwd.txt", b"x").unwrap();
        assert_eq!(context.names, vec!["passwd.txt".to_string()]);
        assert!(context.primary_path().unwrap().starts_with(&context.directory));
    }
}
