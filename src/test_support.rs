//! Shared test support utilities
//!
//! Provides a `MockJobSource` implementing `JobSource` plus an
//! adjustable clock, for use in unit and integration tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDateTime};

use crate::domain::{Clock, JobDetail, RawPosting};
use crate::error::GatewayError;
use crate::port::JobSource;

/// Mock upstream source with a preset batch, an optional detail record,
/// a failure switch, and a fetch counter.
pub struct MockJobSource {
    postings: Mutex<Vec<RawPosting>>,
    detail: Mutex<Option<JobDetail>>,
    should_fail: AtomicBool,
    fetch_calls: AtomicUsize,
    fetch_delay: Option<StdDuration>,
}

impl MockJobSource {
    pub fn with_postings(postings: Vec<RawPosting>) -> Self {
        Self {
            postings: Mutex::new(postings),
            detail: Mutex::new(None),
            should_fail: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            fetch_delay: None,
        }
    }

    /// Delay each fetch, to widen race windows in concurrency tests.
    pub fn with_fetch_delay(mut self, delay: StdDuration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_detail(&self, detail: Option<JobDetail>) {
        *self.detail.lock().unwrap() = detail;
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn mock_failure() -> GatewayError {
        GatewayError::UpstreamStatus {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "mock upstream failure".to_string(),
        }
    }
}

impl JobSource for MockJobSource {
    fn fetch_postings(
        &self,
        _rows: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPosting>, GatewayError>> + Send + '_>> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.fetch_delay {
                tokio::time::sleep(delay).await;
            }
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(Self::mock_failure());
            }
            Ok(self.postings.lock().unwrap().clone())
        })
    }

    fn fetch_detail(
        &self,
        _sn: String,
    ) -> Pin<Box<dyn Future<Output = Result<Option<JobDetail>, GatewayError>> + Send + '_>> {
        Box::pin(async move {
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(Self::mock_failure());
            }
            Ok(self.detail.lock().unwrap().clone())
        })
    }
}

/// Clock whose "now" can be moved forward by tests.
pub struct AdjustableClock {
    now: Mutex<NaiveDateTime>,
}

impl AdjustableClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for AdjustableClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

/// A plausible raw posting with the given serial number and dates.
pub fn raw_posting(sn: i64, start_ymd: &str, end_ymd: &str) -> RawPosting {
    RawPosting {
        sn,
        inst_nm: format!("기관{sn}"),
        title: format!("공고{sn}"),
        ncs_lst: "사무행정".to_string(),
        hire_type_lst: "정규직".to_string(),
        work_rgn_lst: "서울".to_string(),
        recrut_se: "신입".to_string(),
        recrut_nope: Some(1),
        pbanc_bgng_ymd: start_ymd.to_string(),
        pbanc_end_ymd: end_ymd.to_string(),
        acbg_cond_lst: "학력무관".to_string(),
        aply_qlfc_cn: None,
        disqlfc_rsn: None,
    }
}
