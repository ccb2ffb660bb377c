//! Posting records as exchanged with the upstream recruitment API.
//!
//! Wire names are the upstream's own (`recrutPblntSn`, `instNm`, ...);
//! the category fields (`ncsCdNmLst`, `hireTypeNmLst`, `workRgnNmLst`,
//! `acbgCondNmLst`) are comma-delimited label strings as delivered, not
//! normalized arrays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dday;

/// One posting as it arrives from the upstream `list` resource, before
/// any derived fields are attached.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPosting {
    #[serde(rename = "recrutPblntSn")]
    pub sn: i64,
    #[serde(rename = "instNm", default)]
    pub inst_nm: String,
    #[serde(rename = "recrutPbancTtl", default)]
    pub title: String,
    #[serde(rename = "ncsCdNmLst", default)]
    pub ncs_lst: String,
    #[serde(rename = "hireTypeNmLst", default)]
    pub hire_type_lst: String,
    #[serde(rename = "workRgnNmLst", default)]
    pub work_rgn_lst: String,
    #[serde(rename = "recrutSeNm", default)]
    pub recrut_se: String,
    #[serde(rename = "recrutNope", default)]
    pub recrut_nope: Option<i64>,
    #[serde(rename = "pbancBgngYmd", default)]
    pub pbanc_bgng_ymd: String,
    #[serde(rename = "pbancEndYmd", default)]
    pub pbanc_end_ymd: String,
    #[serde(rename = "acbgCondNmLst", default)]
    pub acbg_cond_lst: String,
    #[serde(rename = "aplyQlfcCn", default)]
    pub aply_qlfc_cn: Option<String>,
    #[serde(rename = "disqlfcRsn", default)]
    pub disqlfc_rsn: Option<String>,
}

/// A cached posting with the time-relative derived fields attached.
///
/// `decimal_day` and `ongoing_yn` are recomputed on every cache refresh
/// against that refresh's date; they are never persisted past the TTL.
#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    #[serde(rename = "recrutPblntSn")]
    pub sn: i64,
    #[serde(rename = "instNm")]
    pub inst_nm: String,
    #[serde(rename = "recrutPbancTtl")]
    pub title: String,
    #[serde(rename = "ncsCdNmLst")]
    pub ncs_lst: String,
    #[serde(rename = "hireTypeNmLst")]
    pub hire_type_lst: String,
    #[serde(rename = "workRgnNmLst")]
    pub work_rgn_lst: String,
    #[serde(rename = "recrutSeNm")]
    pub recrut_se: String,
    #[serde(rename = "recrutNope")]
    pub recrut_nope: Option<i64>,
    #[serde(rename = "pbancBgngYmd")]
    pub pbanc_bgng_ymd: String,
    #[serde(rename = "pbancEndYmd")]
    pub pbanc_end_ymd: String,
    #[serde(rename = "acbgCondNmLst")]
    pub acbg_cond_lst: String,
    #[serde(rename = "aplyQlfcCn", skip_serializing_if = "Option::is_none")]
    pub aply_qlfc_cn: Option<String>,
    #[serde(rename = "disqlfcRsn", skip_serializing_if = "Option::is_none")]
    pub disqlfc_rsn: Option<String>,
    /// Signed day count to the deadline; absent when the end date is
    /// missing or unparseable.
    #[serde(rename = "decimalDay", skip_serializing_if = "Option::is_none")]
    pub decimal_day: Option<i64>,
    #[serde(rename = "ongoingYn")]
    pub ongoing_yn: OngoingYn,
}

/// `'Y'`/`'N'` flag, serialized as the upstream's single-letter strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OngoingYn {
    Y,
    N,
}

impl JobPosting {
    /// Attach the derived fields for a refresh performed on `today`.
    pub fn from_raw(raw: RawPosting, today: NaiveDate) -> Self {
        let decimal_day = dday::day_count(&raw.pbanc_end_ymd, today);
        let ongoing_yn = if dday::is_ongoing(&raw.pbanc_end_ymd, today) {
            OngoingYn::Y
        } else {
            OngoingYn::N
        };
        Self {
            sn: raw.sn,
            inst_nm: raw.inst_nm,
            title: raw.title,
            ncs_lst: raw.ncs_lst,
            hire_type_lst: raw.hire_type_lst,
            work_rgn_lst: raw.work_rgn_lst,
            recrut_se: raw.recrut_se,
            recrut_nope: raw.recrut_nope,
            pbanc_bgng_ymd: raw.pbanc_bgng_ymd,
            pbanc_end_ymd: raw.pbanc_end_ymd,
            acbg_cond_lst: raw.acbg_cond_lst,
            aply_qlfc_cn: raw.aply_qlfc_cn,
            disqlfc_rsn: raw.disqlfc_rsn,
            decimal_day,
            ongoing_yn,
        }
    }
}

/// Attachment on a detail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(rename = "atchFileNm", default)]
    pub atch_file_nm: String,
    #[serde(default)]
    pub url: String,
}

/// One screening step on a detail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStep {
    #[serde(rename = "stepNm", default)]
    pub step_nm: String,
    #[serde(rename = "stepExpln", default)]
    pub step_expln: String,
}

/// Full detail record from the upstream `detail` resource, passed
/// through to clients as-is (no derived fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(rename = "recrutPblntSn")]
    pub sn: i64,
    #[serde(rename = "instNm", default)]
    pub inst_nm: String,
    #[serde(rename = "recrutPbancTtl", default)]
    pub title: String,
    #[serde(rename = "ncsCdNmLst", default)]
    pub ncs_lst: String,
    #[serde(rename = "hireTypeNmLst", default)]
    pub hire_type_lst: String,
    #[serde(rename = "workRgnNmLst", default)]
    pub work_rgn_lst: String,
    #[serde(rename = "recrutSeNm", default)]
    pub recrut_se: String,
    #[serde(rename = "recrutNope", default)]
    pub recrut_nope: Option<i64>,
    #[serde(rename = "pbancBgngYmd", default)]
    pub pbanc_bgng_ymd: String,
    #[serde(rename = "pbancEndYmd", default)]
    pub pbanc_end_ymd: String,
    #[serde(rename = "ongoingYn", default)]
    pub ongoing_yn: String,
    #[serde(rename = "acbgCondNmLst", default)]
    pub acbg_cond_lst: String,
    #[serde(rename = "aplyQlfcCn", default)]
    pub aply_qlfc_cn: Option<String>,
    #[serde(rename = "disqlfcRsn", default)]
    pub disqlfc_rsn: Option<String>,
    #[serde(rename = "scrnprcdrMthdExpln", default)]
    pub scrnprcdr_mthd_expln: String,
    #[serde(rename = "prefCn", default)]
    pub pref_cn: String,
    #[serde(default)]
    pub files: Vec<JobFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<JobStep>>,
}

/// Aggregate counts over the filtered collection, computed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    #[serde(rename = "endingSoon")]
    pub ending_soon: usize,
    #[serde(rename = "newJobs")]
    pub new_jobs: usize,
    pub institutions: usize,
}
