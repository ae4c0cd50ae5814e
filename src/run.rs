use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::ingest;
use crate::pipeline::Pipeline;
use crate::report::Reporter;
use crate::seen::SeenCache;

/// One full pass: ingest spool batches, run the pipeline against the seen
/// set, deliver the result, and only then mark the delivered URLs as seen.
/// Returns the number of jobs delivered.
pub fn run_pass(config: &Config, reporter: &dyn Reporter, now: DateTime<Utc>) -> Result<usize> {
    let run_id = Uuid::new_v4();
    info!("🚀 [{run_id}] Starting job-search pass");

    let raw = ingest::read_spool(&config.spool_dir)?;
    if raw.is_empty() {
        info!("ℹ️ [{run_id}] No candidate records in spool, nothing to do");
        return Ok(0);
    }

    let mut seen = SeenCache::load(&config.seen_jobs_path(), now);
    let fresh = Pipeline::new(&config.filter).process(&raw, &seen.urls(), now);

    if fresh.is_empty() {
        info!("ℹ️ [{run_id}] No new relevant jobs this pass");
        return Ok(0);
    }

    match reporter.deliver(&fresh, now) {
        Ok(()) => {
            let urls: Vec<String> = fresh.iter().map(|j| j.url().to_string()).collect();
            seen.save(&urls, now);
            info!("✅ [{run_id}] Delivered {} jobs and marked them seen", fresh.len());
            Ok(fresh.len())
        }
        Err(e) => {
            // Leave the URLs unseen so they are retried next pass.
            warn!("❌ [{run_id}] Delivery failed, jobs stay eligible for the next run: {e}");
            Err(e)
        }
    }
}
