//! Inbound list-query parameters and their normalized form.
//!
//! Raw parameters arrive as optional strings; normalization never
//! rejects a request. Non-numeric or non-positive `page`/`limit` fall
//! back to their defaults, unknown sort modes fall back to `latest`,
//! and unknown stat filters are ignored.

use serde::Deserialize;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// Query string of `GET /jobs`, exactly as received.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub keyword: Option<String>,
    pub regions: Option<String>,
    #[serde(rename = "hireTypes")]
    pub hire_types: Option<String>,
    #[serde(rename = "recruitTypes")]
    pub recruit_types: Option<String>,
    #[serde(rename = "ncsTypes")]
    pub ncs_types: Option<String>,
    #[serde(rename = "educationTypes")]
    pub education_types: Option<String>,
    #[serde(rename = "onlyOngoing")]
    pub only_ongoing: Option<String>,
    pub sort: Option<String>,
    #[serde(rename = "statFilter")]
    pub stat_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Latest,
    Deadline,
    Personnel,
}

/// Derived subset selectable on top of the category filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFilter {
    EndingSoon,
    NewJobs,
}

/// Normalized filter/sort/pagination request. Built fresh per request,
/// never persisted.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub regions: Vec<String>,
    pub hire_types: Vec<String>,
    pub recruit_types: Vec<String>,
    pub ncs_types: Vec<String>,
    pub education_types: Vec<String>,
    pub only_ongoing: bool,
    pub sort: SortMode,
    pub stat_filter: Option<StatFilter>,
    pub page: usize,
    pub limit: usize,
}

impl ListQuery {
    pub fn from_params(params: ListParams) -> Self {
        Self {
            keyword: params
                .keyword
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            regions: split_csv(params.regions.as_deref()),
            hire_types: split_csv(params.hire_types.as_deref()),
            recruit_types: split_csv(params.recruit_types.as_deref()),
            ncs_types: split_csv(params.ncs_types.as_deref()),
            education_types: split_csv(params.education_types.as_deref()),
            only_ongoing: params
                .only_ongoing
                .is_none_or(|v| !v.eq_ignore_ascii_case("false")),
            sort: parse_sort(params.sort.as_deref()),
            stat_filter: parse_stat_filter(params.stat_filter.as_deref()),
            page: parse_positive(params.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(params.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_params(ListParams::default())
    }
}

fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_sort(value: Option<&str>) -> SortMode {
    match value {
        Some("deadline") => SortMode::Deadline,
        Some("personnel") => SortMode::Personnel,
        _ => SortMode::Latest,
    }
}

fn parse_stat_filter(value: Option<&str>) -> Option<StatFilter> {
    match value {
        Some("endingSoon") => Some(StatFilter::EndingSoon),
        Some("newJobs") => Some(StatFilter::NewJobs),
        _ => None,
    }
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}
