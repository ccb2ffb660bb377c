use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::state::AppState;
use crate::domain::suggest::{self, Suggestion};

#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    #[serde(rename = "resultCode")]
    pub result_code: u16,
    #[serde(rename = "resultMsg")]
    pub result_msg: String,
    pub suggestions: Vec<Suggestion>,
}

impl SuggestResponse {
    fn failure(msg: impl Into<String>) -> Self {
        Self {
            result_code: 500,
            result_msg: msg.into(),
            suggestions: Vec::new(),
        }
    }

    fn success(suggestions: Vec<Suggestion>) -> Self {
        Self {
            result_code: 200,
            result_msg: "Success".to_string(),
            suggestions,
        }
    }
}

/// Handler for GET /jobs/suggestions: ranked search-box candidates from
/// the cached batch. An empty query short-circuits without touching
/// the cache.
pub async fn suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> (StatusCode, Json<SuggestResponse>) {
    if !state.has_credential {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SuggestResponse::failure("API key not configured")),
        );
    }

    let q = params.q.as_deref().unwrap_or_default().trim().to_string();
    if q.is_empty() {
        return (StatusCode::OK, Json(SuggestResponse::success(Vec::new())));
    }

    if let Err(e) = state
        .cache
        .refresh_if_stale(state.source.as_ref(), state.clock.as_ref())
        .await
    {
        error!(error = %e, "Posting cache refresh failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SuggestResponse::failure(e.to_string())),
        );
    }

    let limit = suggest::clamp_limit(params.limit.and_then(|l| l.trim().parse().ok()));
    let jobs = state.cache.snapshot().await;
    let suggestions = suggest::suggest(&jobs, &q, limit);

    (StatusCode::OK, Json(SuggestResponse::success(suggestions)))
}
