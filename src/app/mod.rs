pub mod router;
pub mod server;
pub mod state;
pub mod tracing;

use crate::config;
use crate::error::GatewayError;

/// Application entry point. Initializes tracing, configuration, and
/// starts the server.
pub async fn run() -> Result<(), GatewayError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings =
        config::get_configuration().map_err(|e| GatewayError::Config(e.to_string()))?;
    ::tracing::info!("Loaded settings");
    if settings.service_key.trim().is_empty() {
        ::tracing::warn!("Service key not configured; job endpoints will report errors");
    }

    let app_state = state::AppState::from_settings(&settings)?;
    let app = router::api_router(app_state);

    server::serve(app, settings.http_port).await
}
