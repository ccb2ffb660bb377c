use std::sync::Arc;
use std::time::Duration;

use crate::adapter::recruit::{RecruitApiClient, RecruitApiConfig};
use crate::cache::JobCache;
use crate::config::Settings;
use crate::domain::{Clock, SystemClock};
use crate::error::GatewayError;
use crate::port::JobSource;

const UPSTREAM_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Shared application state: the upstream source, the posting cache,
/// and the clock they are measured against.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn JobSource>,
    pub cache: Arc<JobCache>,
    pub clock: Arc<dyn Clock>,
    /// False when no service key is configured; job endpoints then fail
    /// fast with a configuration error instead of calling the upstream.
    pub has_credential: bool,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, GatewayError> {
        let client = RecruitApiClient::new(RecruitApiConfig {
            base_url: settings.api_base_url.clone(),
            service_key: settings.service_key.clone(),
            connect_timeout: UPSTREAM_CONNECT_TIMEOUT,
            total_timeout: Duration::from_secs(settings.upstream_timeout_secs),
        })?;

        Ok(Self {
            source: Arc::new(client),
            cache: Arc::new(JobCache::new(settings.cache_ttl_secs, settings.fetch_rows)),
            clock: Arc::new(SystemClock),
            has_credential: !settings.service_key.trim().is_empty(),
        })
    }

    /// Assemble state from explicit parts; used by tests to inject a
    /// mock source and a pinned clock.
    pub fn with_parts(
        source: Arc<dyn JobSource>,
        cache: Arc<JobCache>,
        clock: Arc<dyn Clock>,
        has_credential: bool,
    ) -> Self {
        Self {
            source,
            cache,
            clock,
            has_credential,
        }
    }
}
