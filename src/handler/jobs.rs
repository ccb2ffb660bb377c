use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::app::state::AppState;
use crate::domain::{JobPosting, ListParams, ListQuery, StatsSnapshot, pipeline};

/// Envelope of `GET /jobs`. Error responses reuse the same shape with
/// an empty page and no stats, so clients keep a single parsing path.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    #[serde(rename = "resultCode")]
    pub result_code: u16,
    #[serde(rename = "resultMsg")]
    pub result_msg: String,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    pub result: Vec<JobPosting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsSnapshot>,
}

impl ListResponse {
    fn failure(msg: impl Into<String>) -> Self {
        Self {
            result_code: 500,
            result_msg: msg.into(),
            total_count: 0,
            result: Vec::new(),
            stats: None,
        }
    }
}

/// Handler for GET /jobs: refresh the cache if stale, then run the
/// filter/sort/stats pipeline against the current snapshot.
pub async fn list_jobs_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> (StatusCode, Json<ListResponse>) {
    if !state.has_credential {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ListResponse::failure("API key not configured")),
        );
    }

    if let Err(e) = state
        .cache
        .refresh_if_stale(state.source.as_ref(), state.clock.as_ref())
        .await
    {
        error!(error = %e, "Posting cache refresh failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ListResponse::failure(e.to_string())),
        );
    }

    let jobs = state.cache.snapshot().await;
    let query = ListQuery::from_params(params);
    let outcome = pipeline::run(&jobs, &query, state.clock.now());

    (
        StatusCode::OK,
        Json(ListResponse {
            result_code: 200,
            result_msg: "Success".to_string(),
            total_count: outcome.total_count,
            result: outcome.page,
            stats: Some(outcome.stats),
        }),
    )
}
