//! HTTP trigger endpoint handlers

use crate::http::types::*;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint - GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success_with_message("Market brief service is running"))
}

// ============================================================================
// Brief Trigger
// ============================================================================

/// Run one brief cycle: generate, publish on success, build the response.
///
/// 200 when the brief was generated, whatever happened in storage; 500 when
/// generation failed, in which case nothing is published.
pub async fn run_trigger(state: &AppState) -> (StatusCode, BriefResponse) {
    let run_id = Uuid::new_v4();

    async move {
        info!("Brief run started");

        let brief = state.briefs.generate().await;
        if !brief.is_success() {
            return (StatusCode::INTERNAL_SERVER_ERROR, BriefResponse::new(brief, None));
        }

        let outcome = state.publisher.publish(&brief).await;
        info!("Brief run finished (stored: {})", outcome.success);

        (StatusCode::OK, BriefResponse::new(brief, Some(outcome)))
    }
    .instrument(info_span!("brief", run_id = %run_id))
    .await
}

/// Brief trigger endpoint - any method on / or /brief
pub async fn trigger_brief(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, body) = run_trigger(&state).await;
    (status, Json(body))
}
