//! Publish Service
//!
//! Persists successful briefs to the configured object store. Storage
//! problems are reported in the outcome, never raised to the caller.

use crate::error::{AppError, Result};
use crate::services::brief_service::{BriefResult, BriefStatus};
use crate::services::sources::SourceEntry;
use crate::storage::{ObjectStore, JSON_CONTENT_TYPE};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Object name layout, from the publish-time clock
pub const OBJECT_NAME_FORMAT: &str = "market_brief_%Y-%m-%d_%H-%M-%S.json";

/// Result of one publish attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StorageOutcome {
    pub fn stored(bucket: &str, filename: String) -> Self {
        Self {
            success: true,
            bucket: Some(bucket.to_string()),
            filename: Some(filename),
            error: None,
        }
    }

    pub fn failed(err: &AppError) -> Self {
        Self {
            success: false,
            bucket: None,
            filename: None,
            error: Some(err.to_string()),
        }
    }
}

/// Stored document shape
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredBrief<'a> {
    display_date: &'a str,
    target_date: &'a str,
    generated_at: &'a str,
    content: &'a str,
    sources: &'a [SourceEntry],
    status: BriefStatus,
}

/// Writes briefs to an [`ObjectStore`]
pub struct PublishService {
    store: Arc<dyn ObjectStore>,
    timezone: Tz,
}

impl PublishService {
    pub fn new(store: Arc<dyn ObjectStore>, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    pub fn object_name(now: DateTime<Tz>) -> String {
        now.format(OBJECT_NAME_FORMAT).to_string()
    }

    /// Publish `brief` under a name taken from the current time
    pub async fn publish(&self, brief: &BriefResult) -> StorageOutcome {
        let now = Utc::now().with_timezone(&self.timezone);
        self.publish_at(brief, now).await
    }

    pub async fn publish_at(&self, brief: &BriefResult, now: DateTime<Tz>) -> StorageOutcome {
        let filename = Self::object_name(now);

        match self.try_publish(brief, &filename).await {
            Ok(()) => {
                info!(
                    "Brief saved to {} store: {}/{}",
                    self.store.id(),
                    self.store.container(),
                    filename
                );
                StorageOutcome::stored(self.store.container(), filename)
            }
            Err(e) => {
                warn!("Error saving brief to {} store: {}", self.store.id(), e);
                StorageOutcome::failed(&e)
            }
        }
    }

    async fn try_publish(&self, brief: &BriefResult, filename: &str) -> Result<()> {
        let content = match (&brief.status, &brief.content) {
            (BriefStatus::Success, Some(content)) => content,
            _ => {
                return Err(AppError::Internal(
                    "Only successful briefs can be published".to_string(),
                ))
            }
        };

        let document = StoredBrief {
            display_date: &brief.display_date,
            target_date: &brief.target_date,
            generated_at: &brief.timestamp,
            content,
            sources: &brief.sources,
            status: brief.status,
        };
        let body = serde_json::to_vec_pretty(&document)?;

        self.store
            .create_object(filename, body, JSON_CONTENT_TYPE)
            .await
    }
}
