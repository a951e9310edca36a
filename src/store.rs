//! Output Store
//!
//! Persists converted code into a single output directory. Filenames are
//! plain names only; anything that would resolve outside the directory is
//! refused.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing code or filename")]
    MissingField,

    #[error("Invalid filename '{0}': must be a plain file name inside the output directory")]
    InvalidFilename(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct OutputStore {
    base_dir: PathBuf,
}

impl OutputStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve_path(&self, filename: &str) -> Result<PathBuf, StoreError> {
        let candidate = Path::new(filename);
        let mut components = candidate.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_dir.join(candidate)),
            _ => Err(StoreError::InvalidFilename(filename.to_string())),
        }
    }

    /// Write `code` to `filename`, creating the output directory if needed.
    /// Returns the path written.
    pub async fn save(&self, filename: &str, code: &str) -> Result<PathBuf, StoreError> {
        if filename.trim().is_empty() || code.is_empty() {
            return Err(StoreError::MissingField);
        }
        let path = self.resolve_path(filename.trim())?;

        fs::create_dir_all(&self.base_dir).await.map_err(|source| StoreError::Io {
            path: self.base_dir.clone(),
            source,
        })?;
        fs::write(&path, code).await.map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Saved converted output: {} ({} bytes)", path.display(), code.len());
        Ok(path)
    }
}
