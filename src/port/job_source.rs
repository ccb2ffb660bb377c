use std::future::Future;
use std::pin::Pin;

use crate::domain::{JobDetail, RawPosting};
use crate::error::GatewayError;

/// Upstream provider of posting data (the recruitment API, or a mock).
///
/// This trait is dyn-compatible by using boxed futures instead of
/// `impl Future`.
pub trait JobSource: Send + Sync {
    /// Fetch one large page of postings (`pageNo=1`, up to `rows` rows).
    fn fetch_postings(
        &self,
        rows: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPosting>, GatewayError>> + Send + '_>>;

    /// Fetch a single detail record by its serial number. `None` when
    /// the upstream has no (usable) record for `sn`.
    fn fetch_detail(
        &self,
        sn: String,
    ) -> Pin<Box<dyn Future<Output = Result<Option<JobDetail>, GatewayError>> + Send + '_>>;
}
