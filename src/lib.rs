//! Job-posting relevance filter, match scorer and cross-run deduplication
//! pipeline. Scraper collaborators drop candidate batches into a spool
//! directory; one pass filters, scores, dedups against the seen-jobs cache
//! and hands the fresh results to a reporter.

pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod recency;
pub mod records;
pub mod relevance;
pub mod report;
pub mod run;
pub mod scheduler;
pub mod score;
pub mod seen;
