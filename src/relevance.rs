use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::config::FilterConfig;
use crate::recency;
use crate::records::CandidateRecord;

/// Relevance gate for one candidate record.
///
/// The regex rules in [`should_include`] are the mandatory implementation;
/// an external classifier (e.g. a generative model for low-structure posts)
/// can be plugged in as an alternate gate, with the regex rules taking over
/// whenever it is absent or fails.
pub trait RelevanceGate: Send + Sync {
    fn should_include(&self, record: &CandidateRecord) -> Result<bool>;
}

/// Ordered reject rules; the first failing rule decides.
///
/// 1. the keyword pattern must match title+description,
/// 2. the exclusion pattern (seniority / 2+ years) must not match,
/// 3. the stricter 3+-years experience pattern must not match,
/// 4. the posting date must be recent.
pub fn should_include(record: &CandidateRecord, cfg: &FilterConfig, now: DateTime<Utc>) -> bool {
    let text = format!("{} {}", record.title, record.description).to_lowercase();

    if !cfg.keyword.is_match(&text) {
        return false;
    }
    if cfg.exclude.is_match(&text) {
        return false;
    }
    if cfg.experience.is_match(&text) {
        return false;
    }
    if !recency::is_recent(&record.posted_date, cfg, now) {
        return false;
    }
    true
}

/// The regex rules packaged as a [`RelevanceGate`], for call sites that take
/// the gate as a strategy.
pub struct RegexGate {
    cfg: FilterConfig,
    now: DateTime<Utc>,
}

impl RegexGate {
    pub fn new(cfg: FilterConfig, now: DateTime<Utc>) -> Self {
        Self { cfg, now }
    }
}

impl RelevanceGate for RegexGate {
    fn should_include(&self, record: &CandidateRecord) -> Result<bool> {
        Ok(should_include(record, &self.cfg, self.now))
    }
}

/// Applies `primary` when configured, falling back to the regex rules when
/// it is absent or errors out. The fallback is what keeps an unreachable
/// classifier service from stalling a run.
pub fn gate_with_fallback(
    record: &CandidateRecord,
    primary: Option<&dyn RelevanceGate>,
    cfg: &FilterConfig,
    now: DateTime<Utc>,
) -> bool {
    if let Some(gate) = primary {
        match gate.should_include(record) {
            Ok(verdict) => return verdict,
            Err(e) => {
                warn!("⚠️ Relevance gate failed for {}: {e}. Falling back to regex rules.", record.url);
            }
        }
    }
    should_include(record, cfg, now)
}
