use axum::Router;
use axum::routing::get;

use crate::app::state::AppState;
use crate::handler::detail::job_detail_handler;
use crate::handler::health::health_handler;
use crate::handler::jobs::list_jobs_handler;
use crate::handler::suggest::suggestions_handler;

/// Build the HTTP router (health + jobs endpoints).
pub fn api_router(state: AppState) -> Router {
    let health_router = Router::new().route("/v1/health", get(health_handler));

    let jobs_router = Router::new()
        .route("/jobs", get(list_jobs_handler))
        .route("/jobs/suggestions", get(suggestions_handler))
        .route("/jobs/{sn}", get(job_detail_handler))
        .with_state(state);

    Router::new().merge(health_router).merge(jobs_router)
}
