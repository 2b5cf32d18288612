//! Inline image ingestion
//!
//! Resource-write handlers accept an image field that is either an
//! already-stored reference (`/static/uploads/...`) or an inline data URI
//! (`data:<mimetype>;base64,<payload>`). This module decodes the latter and
//! persists it as a uniquely named file, returning the relative reference
//! that resource records store verbatim.
//!
//! One new file per successful call, never overwritten. Superseded images
//! are not cleaned up; orphaned assets accumulate.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Public URL prefix under which stored uploads are served
const UPLOADS_PUBLIC_PREFIX: &str = "/static/uploads";

/// Data-URI marker every inline payload must start with
const DATA_URI_MARKER: &str = "data:";

/// Ingestion failure
#[derive(Error, Debug)]
pub enum IngestError {
    /// Payload is not a data URI or lacks the header/content separator
    #[error("invalid image payload format")]
    InvalidFormat,
    /// Base64 content did not decode
    #[error("base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),
    /// Filesystem write failed
    #[error("image write failed: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::Storage(io) => {
                // Raw filesystem detail stays in the log, not the response
                tracing::error!(error = %io, "image storage failed");
                AppError::new(ErrorCode::FileStorageFailed)
            }
            IngestError::InvalidFormat | IngestError::Decode(_) => {
                tracing::debug!(error = %e, "rejected image payload");
                AppError::new(ErrorCode::InvalidImage)
            }
        }
    }
}

/// Filesystem-backed store for uploaded images
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the uploads directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Whether a value is an inline data URI rather than a stored reference
    pub fn is_data_uri(value: &str) -> bool {
        value.starts_with(DATA_URI_MARKER)
    }

    /// Create the uploads directory if it does not exist
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Decode a data-URI payload and persist it as a new file.
    ///
    /// Returns the relative reference path (`/static/uploads/<filename>`).
    /// The mimetype parse is deliberately lenient: a malformed mimetype
    /// section falls back to JPEG instead of blocking an otherwise-valid
    /// upload, and unrecognized image types map to a `.jpg` extension
    /// rather than being rejected.
    pub async fn ingest(&self, payload: &str) -> Result<String, IngestError> {
        if !payload.starts_with(DATA_URI_MARKER) {
            return Err(IngestError::InvalidFormat);
        }

        let mimetype = match payload.split_once(';') {
            Some((header, _)) => header
                .split_once(':')
                .map(|(_, m)| m)
                .unwrap_or("image/jpeg"),
            None => "image/jpeg",
        };

        let (_, content) = payload.split_once(',').ok_or(IngestError::InvalidFormat)?;

        let extension = match mimetype {
            m if m.contains("image/png") => "png",
            m if m.contains("image/jpeg") || m.contains("image/jpg") => "jpg",
            m if m.contains("image/webp") => "webp",
            _ => "jpg",
        };

        let bytes = STANDARD.decode(content)?;

        // Timestamp for ordering, random suffix so concurrent same-second
        // ingests cannot collide
        let filename = format!(
            "{}_{:08x}.{}",
            Utc::now().format("%Y%m%d%H%M%S"),
            rand::random::<u32>(),
            extension
        );

        tokio::fs::create_dir_all(&self.root).await?;
        let file_path = self.root.join(&filename);
        tokio::fs::write(&file_path, &bytes).await?;

        tracing::info!(
            file = %filename,
            size = bytes.len(),
            mimetype = %mimetype,
            "image stored"
        );

        Ok(format!("{UPLOADS_PUBLIC_PREFIX}/{filename}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_ingest_png() {
        let (_dir, store) = store();
        let path = store
            .ingest(&format!("data:image/png;base64,{PNG_B64}"))
            .await
            .unwrap();
        assert!(path.starts_with("/static/uploads/"));
        assert!(path.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_ingest_webp_extension() {
        let (_dir, store) = store();
        let path = store
            .ingest("data:image/webp;base64,aGVsbG8=")
            .await
            .unwrap();
        assert!(path.ends_with(".webp"));
    }

    #[tokio::test]
    async fn test_unknown_mimetype_defaults_to_jpg() {
        let (_dir, store) = store();
        let path = store
            .ingest("data:application/octet-stream;base64,aGVsbG8=")
            .await
            .unwrap();
        assert!(path.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_missing_semicolon_defaults_to_jpeg_mimetype() {
        let (_dir, store) = store();
        // No ';' section at all — lenient parse falls back to JPEG
        let path = store.ingest("data:aGVsbG8=,aGVsbG8=").await.unwrap();
        assert!(path.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_not_a_data_uri() {
        let (_dir, store) = store();
        let err = store.ingest("not-a-data-uri").await.unwrap_err();
        assert!(matches!(err, IngestError::InvalidFormat));
    }

    #[tokio::test]
    async fn test_missing_comma_separator() {
        let (_dir, store) = store();
        let err = store.ingest("data:image/png;base64").await.unwrap_err();
        assert!(matches!(err, IngestError::InvalidFormat));
    }

    #[tokio::test]
    async fn test_invalid_base64() {
        let (_dir, store) = store();
        let err = store
            .ingest("data:image/png;base64,%%%invalid%%%")
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[tokio::test]
    async fn test_distinct_files_roundtrip_exactly() {
        let (dir, store) = store();

        let first = b"first payload bytes";
        let second = b"second payload, different bytes";

        let path_a = store
            .ingest(&format!("data:image/png;base64,{}", STANDARD.encode(first)))
            .await
            .unwrap();
        let path_b = store
            .ingest(&format!(
                "data:image/png;base64,{}",
                STANDARD.encode(second)
            ))
            .await
            .unwrap();

        assert_ne!(path_a, path_b);

        let name_a = path_a.rsplit('/').next().unwrap();
        let name_b = path_b.rsplit('/').next().unwrap();

        let on_disk_a = std::fs::read(dir.path().join(name_a)).unwrap();
        let on_disk_b = std::fs::read(dir.path().join(name_b)).unwrap();

        assert_eq!(on_disk_a, first);
        assert_eq!(on_disk_b, second);
    }

    #[test]
    fn test_is_data_uri() {
        assert!(ImageStore::is_data_uri("data:image/png;base64,xxx"));
        assert!(!ImageStore::is_data_uri("/static/uploads/123.png"));
        assert!(!ImageStore::is_data_uri("https://example.com/a.png"));
    }
}
