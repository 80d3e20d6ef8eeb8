//! Print snapshots: denormalized JSON copies of what was printed.
//!
//! Snapshots are a side artifact for the people operating the service. They are
//! never read back, and failing to write one never fails a request.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot path '{0}' must be relative and stay inside the snapshot directory")]
    InvalidPath(String),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    root: PathBuf,
}

impl SnapshotWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `value` as pretty JSON to `relative` under the root, creating
    /// parent directories as needed.
    pub async fn write_json<T: Serialize>(
        &self,
        relative: &str,
        value: &T,
    ) -> Result<PathBuf, SnapshotError> {
        let rel = Path::new(relative);
        if rel.as_os_str().is_empty()
            || !rel.components().all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(SnapshotError::InvalidPath(relative.to_string()));
        }

        let path = self.root.join(rel);
        let bytes = serde_json::to_vec_pretty(value)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SnapshotError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// [`Self::write_json`], logging instead of returning failures.
    pub async fn write_logged<T: Serialize>(&self, relative: &str, value: &T) -> Option<PathBuf> {
        match self.write_json(relative, value).await {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "snapshot written");
                Some(path)
            }
            Err(err) => {
                tracing::warn!(snapshot = relative, error = %err, "failed to write snapshot");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn writes_pretty_json_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path());

        let path = writer
            .write_json("packaging_list/data.json", &json!({"total_boxes": 3}))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("packaging_list").join("data.json"));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["total_boxes"], 3);
    }

    #[tokio::test]
    async fn rejects_paths_leaving_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path());

        for bad in ["../escape.json", "/etc/passwd", "", "a/../../b.json"] {
            let err = writer.write_json(bad, &json!({})).await.unwrap_err();
            assert!(matches!(err, SnapshotError::InvalidPath(_)), "{bad}");
        }
    }

    #[tokio::test]
    async fn logged_write_swallows_failures() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is needed.
        std::fs::write(dir.path().join("ZC"), b"").unwrap();
        let writer = SnapshotWriter::new(dir.path());

        assert!(writer.write_logged("ZC/data.json", &json!({})).await.is_none());
    }
}
