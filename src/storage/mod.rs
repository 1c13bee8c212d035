//! Object storage module
//!
//! Briefs are written exactly once under a generated name. Stores only need
//! a single "create" operation; there is no read, update or overwrite check.

pub mod gcs;
pub mod local;

use crate::error::Result;
use async_trait::async_trait;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Blob store trait
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store ID (e.g., "gcs", "local")
    fn id(&self) -> &'static str;

    /// Bucket or directory the objects land in
    fn container(&self) -> &str;

    /// Create one object named `name`
    async fn create_object(&self, name: &str, body: Vec<u8>, content_type: &str) -> Result<()>;
}
