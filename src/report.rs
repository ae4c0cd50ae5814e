use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::records::ScoredRecord;

/// Delivery seam for the reporting collaborator. The caller persists seen
/// state only after `deliver` returns `Ok`, so a failed delivery leaves the
/// jobs eligible for the next run.
pub trait Reporter: Send + Sync {
    fn deliver(&self, jobs: &[ScoredRecord], now: DateTime<Utc>) -> Result<()>;
}

/// Writes the run's results to `job-search-YYYY-MM-DD.json` in the results
/// directory, one file per day.
pub struct JsonFileReporter {
    results_dir: PathBuf,
}

impl JsonFileReporter {
    pub fn new(results_dir: &Path) -> Self {
        Self {
            results_dir: results_dir.to_path_buf(),
        }
    }

    fn path_for(&self, now: DateTime<Utc>) -> PathBuf {
        self.results_dir
            .join(format!("job-search-{}.json", now.format("%Y-%m-%d")))
    }
}

impl Reporter for JsonFileReporter {
    fn deliver(&self, jobs: &[ScoredRecord], now: DateTime<Utc>) -> Result<()> {
        fs::create_dir_all(&self.results_dir)
            .with_context(|| format!("creating {}", self.results_dir.display()))?;
        let path = self.path_for(now);
        let data = serde_json::to_string_pretty(jobs)?;
        fs::write(&path, data).with_context(|| format!("writing {}", path.display()))?;
        info!("📁 Results saved to {}", path.display());
        Ok(())
    }
}

/// Logs each job; useful as a dry-run sink.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn deliver(&self, jobs: &[ScoredRecord], _now: DateTime<Utc>) -> Result<()> {
        for job in jobs {
            info!(
                "📣 [{}] score {:>2}: {} — {} ({})",
                job.record.source, job.match_score, job.record.title, job.record.company, job.url()
            );
        }
        Ok(())
    }
}
