//! Time-boxed in-memory cache of the upstream posting batch.
//!
//! The whole batch is replaced atomically on refresh; individual
//! postings are never mutated. A failed refresh leaves the previous
//! batch (last known good) in place and surfaces the error to the
//! caller. Concurrent stale readers share one in-flight upstream fetch
//! instead of each issuing their own.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::domain::{Clock, JobPosting};
use crate::error::GatewayError;
use crate::port::JobSource;

/// Maximum staleness before a refresh is forced (spec TTL: 5 minutes).
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Rows requested from the upstream per refresh.
pub const DEFAULT_FETCH_ROWS: u32 = 1000;

struct CacheState {
    jobs: Arc<Vec<JobPosting>>,
    fetched_at: Option<NaiveDateTime>,
}

pub struct JobCache {
    ttl: Duration,
    rows: u32,
    state: RwLock<CacheState>,
    /// Single-flight gate: at most one refresh talks to the upstream at
    /// a time; late arrivals re-check freshness after the holder is done.
    refresh_gate: Mutex<()>,
}

impl JobCache {
    pub fn new(ttl_secs: u64, rows: u32) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            rows,
            state: RwLock::new(CacheState {
                jobs: Arc::new(Vec::new()),
                fetched_at: None,
            }),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Current batch. Cheap to call; the `Arc` keeps the snapshot alive
    /// even if a refresh replaces the batch mid-request.
    pub async fn snapshot(&self) -> Arc<Vec<JobPosting>> {
        self.state.read().await.jobs.clone()
    }

    /// True when the batch is empty or older than the TTL.
    pub async fn needs_refresh(&self, now: NaiveDateTime) -> bool {
        let state = self.state.read().await;
        match state.fetched_at {
            Some(fetched_at) => state.jobs.is_empty() || now - fetched_at > self.ttl,
            None => true,
        }
    }

    /// Refresh from the upstream if the batch is stale, deriving the
    /// time-relative fields against the refresh date. On failure the
    /// cached batch and its timestamp are left untouched.
    pub async fn refresh_if_stale(
        &self,
        source: &dyn JobSource,
        clock: &dyn Clock,
    ) -> Result<(), GatewayError> {
        if !self.needs_refresh(clock.now()).await {
            return Ok(());
        }

        let _gate = self.refresh_gate.lock().await;
        // Another caller may have refreshed while we waited for the gate.
        if !self.needs_refresh(clock.now()).await {
            return Ok(());
        }

        let raw = source.fetch_postings(self.rows).await?;
        let now = clock.now();
        let today = now.date();
        let jobs: Vec<JobPosting> = raw
            .into_iter()
            .map(|record| JobPosting::from_raw(record, today))
            .collect();

        let distinct: HashSet<i64> = jobs.iter().map(|job| job.sn).collect();
        if distinct.len() != jobs.len() {
            // Upstream identifiers are assumed unique but not verified;
            // make violations visible instead of silently miscounting.
            warn!(
                total = jobs.len(),
                distinct = distinct.len(),
                "Duplicate posting identifiers in upstream batch"
            );
        }
        info!(count = jobs.len(), "Refreshed posting cache");

        let mut state = self.state.write().await;
        state.jobs = Arc::new(jobs);
        state.fetched_at = Some(now);
        Ok(())
    }
}
