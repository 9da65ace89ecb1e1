use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};

/// A JSON document on disk holding a full copy of some state.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never observe a half-written snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the snapshot, returning `None` when the file does not exist yet.
    pub async fn load<T: DeserializeOwned>(&self) -> anyhow::Result<Option<T>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    target: "libris-db",
                    path = %self.path.display(),
                    "no snapshot found, starting empty"
                );
                return Ok(None);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read snapshot {}", self.path.display()))
            }
        };

        let state = serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse snapshot {}", self.path.display()))?;

        tracing::info!(
            target: "libris-db",
            path = %self.path.display(),
            bytes = bytes.len(),
            "snapshot loaded"
        );
        Ok(Some(state))
    }

    /// Persist `state`, replacing any previous snapshot atomically.
    pub async fn save<T: Serialize>(&self, state: &T) -> anyhow::Result<()> {
        let bytes = serde_json::to_vec_pretty(state).context("failed to serialize snapshot")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let staging = self.staging_path();
        tokio::fs::write(&staging, &bytes)
            .await
            .with_context(|| format!("failed to write {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("failed to replace snapshot {}", self.path.display()))?;

        tracing::debug!(
            target: "libris-db",
            path = %self.path.display(),
            bytes = bytes.len(),
            "snapshot saved"
        );
        Ok(())
    }
}
