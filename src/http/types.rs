//! HTTP trigger response types

use crate::services::{BriefResult, BriefStatus, SourceEntry, StorageOutcome};
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Market brief generated successfully";

// ============================================================================
// Common Types
// ============================================================================

/// Standard status/message response
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn success_with_message(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.to_string()),
        }
    }
}

/// Serializes as `{}`
#[derive(Debug, Clone, Serialize)]
pub struct Empty {}

// ============================================================================
// Brief Trigger
// ============================================================================

/// Publish outcome, or `{}` when the brief failed and nothing was stored
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StorageReport {
    Published(StorageOutcome),
    NotAttempted(Empty),
}

impl From<Option<StorageOutcome>> for StorageReport {
    fn from(outcome: Option<StorageOutcome>) -> Self {
        match outcome {
            Some(outcome) => StorageReport::Published(outcome),
            None => StorageReport::NotAttempted(Empty {}),
        }
    }
}

/// Brief trigger response - `/` and `/brief`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefResponse {
    pub status: BriefStatus,
    pub message: String,
    pub timestamp: String,
    pub display_date: String,
    pub target_date: String,
    pub sources: Vec<SourceEntry>,
    pub storage: StorageReport,
}

impl BriefResponse {
    pub fn new(brief: BriefResult, storage: Option<StorageOutcome>) -> Self {
        Self {
            status: brief.status,
            message: brief.error.unwrap_or_else(|| SUCCESS_MESSAGE.to_string()),
            timestamp: brief.timestamp,
            display_date: brief.display_date,
            target_date: brief.target_date,
            sources: brief.sources,
            storage: storage.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == BriefStatus::Success
    }
}
