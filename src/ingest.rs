use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::records::CandidateRecord;

/// Reads every `*.json` batch file a scraper collaborator dropped into the
/// spool directory and merges them into one list, so the pipeline always
/// runs over a single pre-merged batch.
///
/// A batch file is a JSON array of candidate records. Files that fail to
/// read or parse are logged and skipped; a missing spool directory is an
/// empty batch, not an error.
pub fn read_spool(dir: &Path) -> Result<Vec<CandidateRecord>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("ℹ️ Spool directory {} does not exist, nothing to ingest", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "json"))
        .collect();
    // Deterministic merge order across runs.
    paths.sort();

    let mut batch = Vec::new();
    for path in paths {
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!("⚠️ Failed to read batch {}: {e}", path.display());
                continue;
            }
        };
        match serde_json::from_str::<Vec<CandidateRecord>>(&data) {
            Ok(mut records) => {
                info!("📦 Ingested {} records from {}", records.len(), path.display());
                batch.append(&mut records);
            }
            Err(e) => warn!("⚠️ Skipping malformed batch {}: {e}", path.display()),
        }
    }

    Ok(batch)
}
