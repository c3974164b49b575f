/**
 * Material Storage
 *
 * Writes uploaded material files under the media root and derives the
 * public URL they are served from. This is the whole storage pipeline:
 * no compression, no external object store.
 */

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::ApiError;
use crate::model::Material;

/// Local-disk storage for uploaded session materials
///
/// Files land under `<root>/live-sessions/<session_id>/` with a
/// millisecond-timestamp prefix so repeated uploads of the same file
/// name do not overwrite each other. The returned `Material` keeps the
/// client's original file name for display.
#[derive(Clone)]
pub struct MaterialStorage {
    root: PathBuf,
}

impl MaterialStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory served under `/media`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one uploaded file and return its material descriptor
    pub async fn save(
        &self,
        session_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Material, ApiError> {
        let display_name = sanitize_file_name(file_name);
        let upload_time = Utc::now();
        let stored_name = format!("{}-{}", upload_time.timestamp_millis(), display_name);

        let dir = self.root.join("live-sessions").join(session_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to create media directory: {e}")))?;

        let path = dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to write material file: {e}")))?;

        Ok(Material {
            file_name: display_name,
            url: format!("/media/live-sessions/{session_id}/{stored_name}"),
            upload_time,
            size: bytes.len() as i64,
        })
    }
}

/// Reduce an uploaded file name to its final path component
///
/// Anything that could escape the session directory (separators, dot
/// components, empty names) collapses to a safe fallback.
fn sanitize_file_name(file_name: &str) -> String {
    let candidate = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    match candidate {
        "" | "." | ".." => "file".to_string(),
        name => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(sanitize_file_name("notes.pdf"), "notes.pdf");
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\slides\\deck.pptx"), "deck.pptx");
    }

    #[test]
    fn test_sanitize_rejects_traversal_names() {
        assert_eq!(sanitize_file_name(".."), "file");
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("  "), "file");
    }

    #[tokio::test]
    async fn test_save_writes_file_and_builds_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MaterialStorage::new(dir.path());

        let material = storage
            .save("session-1", "deck.pdf", b"pdf-bytes")
            .await
            .unwrap();

        assert_eq!(material.file_name, "deck.pdf");
        assert_eq!(material.size, 9);
        assert!(material.url.starts_with("/media/live-sessions/session-1/"));
        assert!(material.url.ends_with("-deck.pdf"));

        let stored = material.url.strip_prefix("/media/").unwrap();
        let on_disk = dir.path().join(stored);
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"pdf-bytes");
    }
}
