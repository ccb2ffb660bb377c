use tracing::debug;

/// Handler for GET /v1/health. Liveness only; upstream reachability is
/// intentionally not probed here.
pub async fn health_handler() -> &'static str {
    debug!("Health check requested");
    "Healthy"
}
