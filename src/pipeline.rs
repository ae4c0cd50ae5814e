use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::FilterConfig;
use crate::records::{CandidateRecord, ScoredRecord};
use crate::relevance::{self, RelevanceGate};
use crate::score;

/// Composes filter, scorer and dedup for one merged batch of raw records.
///
/// An optional [`RelevanceGate`] replaces the regex relevance rules for
/// low-structure sources; the regex rules remain the fallback whenever it
/// errors (and the only gate when none is configured).
pub struct Pipeline<'a> {
    cfg: &'a FilterConfig,
    gate: Option<&'a dyn RelevanceGate>,
}

impl<'a> Pipeline<'a> {
    pub fn new(cfg: &'a FilterConfig) -> Self {
        Self { cfg, gate: None }
    }

    pub fn with_gate(mut self, gate: &'a dyn RelevanceGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Filter, score, dedup within the batch, drop previously seen URLs and
    /// sort by score descending. Pure with respect to its inputs: the seen
    /// set is not mutated here — the caller persists it only after the
    /// result list was actually delivered.
    pub fn process(
        &self,
        raw: &[CandidateRecord],
        previously_seen: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Vec<ScoredRecord> {
        let mut scored: Vec<ScoredRecord> = Vec::new();
        // URL -> position in `scored`; a repeated URL replaces the earlier
        // occurrence in place, so output order stays deterministic while the
        // last record in the batch wins.
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in raw {
            if record.url.is_empty() {
                continue;
            }
            if !relevance::gate_with_fallback(record, self.gate, self.cfg, now) {
                continue;
            }
            let entry = ScoredRecord {
                record: record.clone(),
                match_score: score::match_score(record, self.cfg),
            };
            match index.get(&record.url) {
                Some(&pos) => scored[pos] = entry,
                None => {
                    index.insert(record.url.clone(), scored.len());
                    scored.push(entry);
                }
            }
        }

        let surviving = scored.len();
        scored.retain(|s| !previously_seen.contains(s.url()));
        info!(
            "🔍 Deduplication: {} raw -> {} relevant -> {} unseen jobs",
            raw.len(),
            surviving,
            scored.len()
        );

        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored
    }
}
