//! Search-box suggestion candidates drawn from the cached batch.
//!
//! Candidates are institution names and job-classification tokens that
//! contain the query (case-insensitive substring), deduplicated per
//! (type, text). Ranking: exact-prefix matches first, institutions
//! before keywords within a tier, lexicographic text order as the
//! final tie-break.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::job::JobPosting;

pub const DEFAULT_LIMIT: usize = 8;
pub const MAX_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Institution,
    Keyword,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
}

/// Clamp a caller-supplied limit into `1..=MAX_LIMIT`, defaulting when
/// absent or unparseable.
pub fn clamp_limit(value: Option<usize>) -> usize {
    value.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Build the ranked suggestion list for `query` over the cached batch.
pub fn suggest(jobs: &[JobPosting], query: &str, limit: usize) -> Vec<Suggestion> {
    let q = normalize(query);
    if q.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<(SuggestionType, String)> = HashSet::new();
    let mut candidates: Vec<Suggestion> = Vec::new();

    for job in jobs {
        let inst = job.inst_nm.trim();
        if !inst.is_empty()
            && normalize(inst).contains(&q)
            && seen.insert((SuggestionType::Institution, inst.to_string()))
        {
            candidates.push(Suggestion {
                text: inst.to_string(),
                kind: SuggestionType::Institution,
            });
        }

        for token in job.ncs_lst.split(',') {
            let token = token.trim();
            if !token.is_empty()
                && normalize(token).contains(&q)
                && seen.insert((SuggestionType::Keyword, token.to_string()))
            {
                candidates.push(Suggestion {
                    text: token.to_string(),
                    kind: SuggestionType::Keyword,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        let a_prefix = normalize(&a.text).starts_with(&q);
        let b_prefix = normalize(&b.text).starts_with(&q);
        b_prefix
            .cmp(&a_prefix)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.text.cmp(&b.text))
    });
    candidates.truncate(limit);
    candidates
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
