use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveDateTime};
use pubjobs::app::router::api_router;
use pubjobs::app::state::AppState;
use pubjobs::cache::JobCache;
use pubjobs::domain::clock::FixedClock;
use pubjobs::domain::{JobDetail, RawPosting};
use pubjobs::test_support::{MockJobSource, raw_posting};
use serde_json::Value;

fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 6)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Three ongoing postings (one ending soon, one new) and one closed.
fn sample_batch() -> Vec<RawPosting> {
    let mut ending_soon = raw_posting(1, "20250805", "20250808");
    ending_soon.inst_nm = "서울연구원".into();
    ending_soon.title = "데이터 분석가 채용".into();
    ending_soon.ncs_lst = "정보통신,데이터".into();

    let mut long_running = raw_posting(2, "20250601", "20250830");
    long_running.inst_nm = "부산도시공사".into();
    long_running.title = "토목직 채용".into();
    long_running.hire_type_lst = "계약직".into();
    long_running.work_rgn_lst = "부산".into();

    let mut undated = raw_posting(3, "20250720", "");
    undated.inst_nm = "한국철도공사".into();
    undated.title = "상시 채용".into();

    let mut closed = raw_posting(4, "20250601", "20250701");
    closed.inst_nm = "서울교통공사".into();
    closed.title = "지난 공고".into();

    vec![ending_soon, long_running, undated, closed]
}

fn server_with(source: Arc<MockJobSource>, has_credential: bool) -> TestServer {
    let state = AppState::with_parts(
        source,
        Arc::new(JobCache::new(300, 1000)),
        Arc::new(FixedClock(test_now())),
        has_credential,
    );
    TestServer::new(api_router(state)).unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_healthy() {
    let server = server_with(Arc::new(MockJobSource::with_postings(Vec::new())), true);

    let response = server.get("/v1/health").await;

    response.assert_status_ok();
    response.assert_text("Healthy");
}

#[tokio::test]
async fn list_returns_success_envelope_with_stats() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source, true);

    let response = server.get("/jobs").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["resultCode"], 200);
    assert_eq!(body["resultMsg"], "Success");
    // onlyOngoing defaults to true, dropping the closed posting.
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["result"].as_array().unwrap().len(), 3);
    assert_eq!(body["stats"]["totalCount"], 3);
    assert_eq!(body["stats"]["endingSoon"], 1);
    assert_eq!(body["stats"]["newJobs"], 1);
    assert_eq!(body["stats"]["institutions"], 3);
}

#[tokio::test]
async fn list_serializes_derived_fields_with_upstream_names() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source, true);

    let body: Value = server
        .get("/jobs")
        .add_query_param("sort", "deadline")
        .await
        .json();

    let first = &body["result"][0];
    assert_eq!(first["recrutPblntSn"], 1);
    assert_eq!(first["decimalDay"], 2);
    assert_eq!(first["ongoingYn"], "Y");
    // Undated posting sorts last and omits decimalDay entirely.
    let last = &body["result"][2];
    assert_eq!(last["recrutPblntSn"], 3);
    assert!(last.get("decimalDay").is_none());
}

#[tokio::test]
async fn list_applies_keyword_and_pagination() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source, true);

    let body: Value = server
        .get("/jobs")
        .add_query_param("keyword", "채용")
        .add_query_param("limit", "2")
        .add_query_param("page", "2")
        .await
        .json();

    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["result"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_combines_category_filters_with_and() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source, true);

    let body: Value = server
        .get("/jobs")
        .add_query_param("regions", "부산")
        .add_query_param("hireTypes", "계약직")
        .await
        .json();
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["result"][0]["recrutPblntSn"], 2);

    let none: Value = server
        .get("/jobs")
        .add_query_param("regions", "부산")
        .add_query_param("hireTypes", "정규직")
        .await
        .json();
    assert_eq!(none["totalCount"], 0);
}

#[tokio::test]
async fn stat_filter_narrows_list_but_not_stats() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source, true);

    let plain: Value = server.get("/jobs").await.json();
    let bucketed: Value = server
        .get("/jobs")
        .add_query_param("statFilter", "endingSoon")
        .await
        .json();

    assert_eq!(bucketed["stats"], plain["stats"]);
    assert_eq!(bucketed["totalCount"], 1);
    assert_eq!(bucketed["result"][0]["recrutPblntSn"], 1);
}

#[tokio::test]
async fn list_without_credential_fails_fast() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source.clone(), false);

    let response = server.get("/jobs").await;
    response.assert_status_internal_server_error();

    let body: Value = response.json();
    assert_eq!(body["resultCode"], 500);
    assert_eq!(body["resultMsg"], "API key not configured");
    assert_eq!(body["totalCount"], 0);
    assert_eq!(body["result"].as_array().unwrap().len(), 0);
    assert!(body.get("stats").is_none());
    // Fail fast: the upstream was never called.
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn list_surfaces_upstream_failure_then_recovers() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    source.set_should_fail(true);
    let server = server_with(source.clone(), true);

    let response = server.get("/jobs").await;
    response.assert_status_internal_server_error();
    let body: Value = response.json();
    assert_eq!(body["resultCode"], 500);
    assert!(body.get("stats").is_none());

    source.set_should_fail(false);
    let response = server.get("/jobs").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["totalCount"], 3);
}

#[tokio::test]
async fn consecutive_requests_reuse_the_cached_batch() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source.clone(), true);

    server.get("/jobs").await.assert_status_ok();
    server.get("/jobs").await.assert_status_ok();

    assert_eq!(source.fetch_calls(), 1);
}

#[tokio::test]
async fn detail_passes_through_upstream_record() {
    let source = Arc::new(MockJobSource::with_postings(Vec::new()));
    let detail: JobDetail = serde_json::from_value(serde_json::json!({
        "recrutPblntSn": 7,
        "instNm": "한국철도공사",
        "recrutPbancTtl": "차량직 채용",
        "scrnprcdrMthdExpln": "서류-필기-면접",
        "prefCn": "관련 자격증 소지자",
        "files": [{ "atchFileNm": "공고문.pdf", "url": "https://example.com/f.pdf" }]
    }))
    .unwrap();
    source.set_detail(Some(detail));
    let server = server_with(source, true);

    let response = server.get("/jobs/7").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["resultCode"], 200);
    assert_eq!(body["result"]["recrutPblntSn"], 7);
    assert_eq!(body["result"]["scrnprcdrMthdExpln"], "서류-필기-면접");
    assert_eq!(body["result"]["files"][0]["atchFileNm"], "공고문.pdf");
}

#[tokio::test]
async fn detail_absent_record_yields_null_result() {
    let source = Arc::new(MockJobSource::with_postings(Vec::new()));
    let server = server_with(source, true);

    let response = server.get("/jobs/9999").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["resultCode"], 200);
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn detail_without_credential_fails_fast() {
    let source = Arc::new(MockJobSource::with_postings(Vec::new()));
    let server = server_with(source, false);

    let response = server.get("/jobs/7").await;
    response.assert_status_internal_server_error();

    let body: Value = response.json();
    assert_eq!(body["resultMsg"], "API key not configured");
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn suggestions_empty_query_short_circuits() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source.clone(), true);

    let response = server.get("/jobs/suggestions").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["resultCode"], 200);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);
    // No query, no cache refresh.
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn suggestions_rank_institutions_before_keywords() {
    let source = Arc::new(MockJobSource::with_postings(sample_batch()));
    let server = server_with(source, true);

    let body: Value = server
        .get("/jobs/suggestions")
        .add_query_param("q", "데이터")
        .await
        .json();

    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["text"], "데이터");
    assert_eq!(suggestions[0]["type"], "keyword");
}

#[tokio::test]
async fn suggestions_respect_the_limit() {
    let batch: Vec<RawPosting> = (0..10)
        .map(|i| {
            let mut p = raw_posting(i, "20250801", "20250820");
            p.inst_nm = format!("기관{i}");
            p
        })
        .collect();
    let source = Arc::new(MockJobSource::with_postings(batch));
    let server = server_with(source, true);

    let body: Value = server
        .get("/jobs/suggestions")
        .add_query_param("q", "기관")
        .add_query_param("limit", "3")
        .await
        .json();

    assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn suggestions_without_credential_fail_fast() {
    let source = Arc::new(MockJobSource::with_postings(Vec::new()));
    let server = server_with(source, false);

    let response = server.get("/jobs/suggestions").await;
    response.assert_status_internal_server_error();

    let body: Value = response.json();
    assert_eq!(body["resultMsg"], "API key not configured");
}
