//! Directory-backed object store
//!
//! Writes each object as a file under a local directory. Used for running
//! the service outside Google Cloud.

use crate::error::{AppError, Result};
use crate::storage::ObjectStore;
use async_trait::async_trait;
use std::path::PathBuf;

/// Local directory store
pub struct LocalStore {
    dir: PathBuf,
    label: String,
}

impl LocalStore {
    pub fn new(dir: PathBuf) -> Self {
        let label = dir.display().to_string();
        Self { dir, label }
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn id(&self) -> &'static str {
        "local"
    }

    fn container(&self) -> &str {
        &self.label
    }

    async fn create_object(&self, name: &str, body: Vec<u8>, _content_type: &str) -> Result<()> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(AppError::Storage(format!("Invalid object name: {:?}", name)));
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", self.label, e))
        })?;

        let path = self.dir.join(name);
        tokio::fs::write(&path, body).await?;

        tracing::info!("Wrote {}", path.display());
        Ok(())
    }
}
