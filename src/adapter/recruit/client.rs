//! HTTP client for the public recruitment data API.
//!
//! The pipeline always asks for one large page (`pageNo=1`); pagination
//! and filtering happen locally over the cached batch. Transport
//! failures and non-2xx statuses are hard errors; a well-formed payload
//! whose `result` is missing or not the expected shape degrades to "no
//! data" instead.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::warn;

use crate::domain::{JobDetail, RawPosting};
use crate::error::GatewayError;
use crate::port::JobSource;

/// Connection settings for the recruitment API.
#[derive(Debug, Clone)]
pub struct RecruitApiConfig {
    pub base_url: String,
    pub service_key: String,
    pub connect_timeout: Duration,
    pub total_timeout: Duration,
}

/// Client for the recruitment API `list` and `detail` resources.
#[derive(Debug, Clone)]
pub struct RecruitApiClient {
    client: Client,
    base_url: Url,
    service_key: String,
}

impl RecruitApiClient {
    pub fn new(config: RecruitApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.total_timeout)
            .build()?;

        // A trailing slash keeps Url::join from replacing the last path
        // segment of the base.
        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| GatewayError::Config(format!("Invalid recruit API base URL: {e}")))?;

        Ok(Self {
            client,
            base_url,
            service_key: config.service_key,
        })
    }

    async fn fetch_list(&self, rows: u32) -> Result<Vec<RawPosting>, GatewayError> {
        let mut url = self
            .base_url
            .join("list")
            .map_err(|e| GatewayError::Config(format!("Failed to build list URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("serviceKey", &self.service_key)
            .append_pair("resultType", "json")
            .append_pair("numOfRows", &rows.to_string())
            .append_pair("pageNo", "1");

        let payload = self.get_json(url).await?;

        let Some(records) = payload.get("result").and_then(Value::as_array) else {
            warn!("Upstream list payload has no result array, treating as empty");
            return Ok(Vec::new());
        };

        let postings: Vec<RawPosting> = records
            .iter()
            .filter_map(|record| match serde_json::from_value(record.clone()) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed posting record");
                    None
                }
            })
            .collect();

        Ok(postings)
    }

    async fn fetch_detail_by_sn(&self, sn: &str) -> Result<Option<JobDetail>, GatewayError> {
        let mut url = self
            .base_url
            .join("detail")
            .map_err(|e| GatewayError::Config(format!("Failed to build detail URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("serviceKey", &self.service_key)
            .append_pair("resultType", "json")
            .append_pair("sn", sn);

        let payload = self.get_json(url).await?;

        match payload.get("result") {
            Some(record) if record.is_object() => match serde_json::from_value(record.clone()) {
                Ok(detail) => Ok(Some(detail)),
                Err(e) => {
                    warn!(sn, error = %e, "Malformed detail record, treating as absent");
                    Ok(None)
                }
            },
            _ => Ok(None),
        }
    }

    async fn get_json(&self, url: Url) -> Result<Value, GatewayError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus { status, body });
        }

        Ok(response.json::<Value>().await?)
    }
}

impl JobSource for RecruitApiClient {
    fn fetch_postings(
        &self,
        rows: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPosting>, GatewayError>> + Send + '_>> {
        Box::pin(async move { self.fetch_list(rows).await })
    }

    fn fetch_detail(
        &self,
        sn: String,
    ) -> Pin<Box<dyn Future<Output = Result<Option<JobDetail>, GatewayError>> + Send + '_>> {
        Box::pin(async move { self.fetch_detail_by_sn(&sn).await })
    }
}
