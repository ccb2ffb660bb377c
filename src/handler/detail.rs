use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::app::state::AppState;
use crate::domain::JobDetail;

/// Envelope of `GET /jobs/{sn}`. `result` is `null` when the upstream
/// has no usable record for the serial number.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    #[serde(rename = "resultCode")]
    pub result_code: u16,
    #[serde(rename = "resultMsg")]
    pub result_msg: String,
    pub result: Option<JobDetail>,
}

/// Handler for GET /jobs/{sn}: thin proxy to the upstream detail
/// resource. The serial number is passed through unvalidated, as the
/// upstream treats it as an opaque key.
pub async fn job_detail_handler(
    State(state): State<AppState>,
    Path(sn): Path<String>,
) -> (StatusCode, Json<DetailResponse>) {
    if !state.has_credential {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DetailResponse {
                result_code: 500,
                result_msg: "API key not configured".to_string(),
                result: None,
            }),
        );
    }

    match state.source.fetch_detail(sn).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(DetailResponse {
                result_code: 200,
                result_msg: "Success".to_string(),
                result: detail,
            }),
        ),
        Err(e) => {
            error!(error = %e, "Job detail fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailResponse {
                    result_code: 500,
                    result_msg: e.to_string(),
                    result: None,
                }),
            )
        }
    }
}
