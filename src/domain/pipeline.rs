//! Filter/sort/statistics pipeline over the cached posting batch.
//!
//! The step order is load-bearing: the stats snapshot is taken after
//! the category filters and sort but before the optional stat-bucket
//! narrowing, so the stats panel stays stable while the list drills
//! into one bucket.

use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::domain::dday::{self, ENDING_SOON_DAYS};
use crate::domain::job::{JobPosting, OngoingYn, StatsSnapshot};
use crate::domain::query::{ListQuery, SortMode, StatFilter};

/// Deadline sort sentinel: postings without a parseable end date sort
/// after every dated posting.
const MISSING_DEADLINE_RANK: i64 = 9999;

/// Result of one pipeline run.
///
/// `total_count` is the post-bucket, pre-pagination count (what the
/// pager sees); `stats.total_count` is the pre-bucket count (what the
/// stats panel sees). The two differ only when a stat bucket is active.
#[derive(Debug)]
pub struct ListOutcome {
    pub total_count: usize,
    pub page: Vec<JobPosting>,
    pub stats: StatsSnapshot,
}

/// Run the full pipeline for one request against one cache snapshot.
pub fn run(jobs: &[JobPosting], query: &ListQuery, now: NaiveDateTime) -> ListOutcome {
    // Steps 1-3: ongoing switch, keyword, then AND across categories.
    let keyword = query.keyword.as_deref().map(str::to_lowercase);
    let mut filtered: Vec<&JobPosting> = jobs
        .iter()
        .filter(|job| !query.only_ongoing || job.ongoing_yn == OngoingYn::Y)
        .filter(|job| match &keyword {
            Some(kw) => {
                job.title.to_lowercase().contains(kw) || job.inst_nm.to_lowercase().contains(kw)
            }
            None => true,
        })
        .filter(|job| {
            category_matches(&job.work_rgn_lst, &query.regions)
                && category_matches(&job.hire_type_lst, &query.hire_types)
                && category_matches(&job.recrut_se, &query.recruit_types)
                && category_matches(&job.ncs_lst, &query.ncs_types)
                && category_matches(&job.acbg_cond_lst, &query.education_types)
        })
        .collect();

    // Step 4: stable sort per mode.
    match query.sort {
        SortMode::Deadline => {
            filtered.sort_by_key(|job| job.decimal_day.unwrap_or(MISSING_DEADLINE_RANK));
        }
        SortMode::Personnel => {
            filtered.sort_by_key(|job| Reverse(job.recrut_nope.unwrap_or(0)));
        }
        SortMode::Latest => {
            // Fixed-width YYYYMMDD strings compare correctly as text.
            filtered.sort_by(|a, b| b.pbanc_bgng_ymd.cmp(&a.pbanc_bgng_ymd));
        }
    }

    // Step 5: snapshot before any stat bucket narrows the list.
    let stats = snapshot(&filtered, now);

    // Step 6: optional stat-bucket narrowing.
    if let Some(bucket) = query.stat_filter {
        filtered.retain(|job| match bucket {
            StatFilter::EndingSoon => ending_soon(job),
            StatFilter::NewJobs => dday::is_new_posting(&job.pbanc_bgng_ymd, now),
        });
    }

    // Step 7: 1-indexed pagination; out-of-range pages yield an empty slice.
    let total_count = filtered.len();
    let start = (query.page - 1).saturating_mul(query.limit);
    let page: Vec<JobPosting> = filtered
        .iter()
        .skip(start)
        .take(query.limit)
        .map(|job| (*job).clone())
        .collect();

    ListOutcome {
        total_count,
        page,
        stats,
    }
}

/// OR-within-category substring match against a comma-delimited label
/// field. An empty selection imposes no constraint.
///
/// Substring (rather than token) semantics are inherited from the
/// upstream API's free-text label lists; keep the imprecision confined
/// to this function.
fn category_matches(field: &str, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|value| field.contains(value.as_str()))
}

fn ending_soon(job: &JobPosting) -> bool {
    matches!(job.decimal_day, Some(d) if (0..=ENDING_SOON_DAYS).contains(&d))
}

fn snapshot(filtered: &[&JobPosting], now: NaiveDateTime) -> StatsSnapshot {
    let institutions: HashSet<&str> = filtered.iter().map(|job| job.inst_nm.as_str()).collect();
    StatsSnapshot {
        total_count: filtered.len(),
        ending_soon: filtered.iter().filter(|job| ending_soon(job)).count(),
        new_jobs: filtered
            .iter()
            .filter(|job| dday::is_new_posting(&job.pbanc_bgng_ymd, now))
            .count(),
        institutions: institutions.len(),
    }
}
