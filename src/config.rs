use std::env;
use std::path::PathBuf;

use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

// Default pattern set. Compiled once; `FilterConfig` clones from these so a
// config stays a plain owned value that can be passed by reference anywhere.
static KEYWORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(golang|go\s+developer|go\s+backend|go\s+engineer)\b").unwrap()
});

static EXCLUDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(senior|lead|manager|principal|staff|architect|(\d{2,}|[3-9])\s*(\+|plus)?\s*(năm|nam|years?|yoe|yrs?)|2\s*(\+|plus)\s*(năm|nam|years?|yoe|yrs?))\b").unwrap()
});

static INCLUDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(fresher|intern|junior|entry[\s-]?level|graduate|trainee)\b").unwrap()
});

static TECH_STACK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(docker|kubernetes|aws|gcp|microservices|rest\s*api|grpc|backend|back-end)\b")
        .unwrap()
});

// Stricter safety net over EXCLUDE_REGEX: catches "3 years" / "3+ years" /
// "10 yrs" phrasing in English or Vietnamese regardless of the surrounding
// seniority wording. One unified pattern used by filter and scorer both.
static EXPERIENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([3-9]|\d{2,})\s*(\+|plus)?\s*(năm|nam|years?|yoe|yrs?)\b").unwrap()
});

/// Whether a "remote" location counts as primary, secondary, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemotePolicy {
    #[default]
    Primary,
    Secondary,
    Unknown,
}

impl RemotePolicy {
    fn from_env() -> Self {
        match env::var("REMOTE_POLICY").unwrap_or_default().to_lowercase().as_str() {
            "secondary" => RemotePolicy::Secondary,
            "unknown" => RemotePolicy::Unknown,
            _ => RemotePolicy::Primary,
        }
    }
}

/// Filter patterns and location/year tables. Built once at startup,
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub keyword: Regex,
    pub exclude: Regex,
    pub include: Regex,
    pub tech_stack: Regex,
    pub experience: Regex,
    /// Lower-cased substrings; accented and unaccented variants both listed
    /// so matching stays a plain `contains` on case-folded text.
    pub primary_locations: Vec<String>,
    pub secondary_locations: Vec<String>,
    /// Accepted bare-year fallbacks: current and previous year.
    pub valid_years: Vec<i32>,
    pub remote_policy: RemotePolicy,
}

const REMOTE_TOKENS: &[&str] = &["remote", "từ xa", "tu xa"];

impl FilterConfig {
    /// Config anchored at `now`; `valid_years` is derived from it so tests
    /// can pin the clock.
    pub fn for_now(now: DateTime<Utc>, remote_policy: RemotePolicy) -> Self {
        let mut primary: Vec<String> = ["cần thơ", "can tho", "hồ chí minh", "ho chi minh", "hcm", "tphcm", "saigon"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut secondary: Vec<String> = ["hanoi", "hà nội", "ha noi", "worldwide", "global"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        match remote_policy {
            RemotePolicy::Primary => primary.extend(REMOTE_TOKENS.iter().map(|s| s.to_string())),
            RemotePolicy::Secondary => secondary.extend(REMOTE_TOKENS.iter().map(|s| s.to_string())),
            RemotePolicy::Unknown => {}
        }

        Self {
            keyword: KEYWORD_REGEX.clone(),
            exclude: EXCLUDE_REGEX.clone(),
            include: INCLUDE_REGEX.clone(),
            tech_stack: TECH_STACK_REGEX.clone(),
            experience: EXPERIENCE_REGEX.clone(),
            primary_locations: primary,
            secondary_locations: secondary,
            valid_years: vec![now.year(), now.year() - 1],
            remote_policy,
        }
    }
}

/// Process-wide configuration: filter tables plus paths and schedule.
#[derive(Debug, Clone)]
pub struct Config {
    pub filter: FilterConfig,
    /// Directory scraper collaborators drop candidate batches into.
    pub spool_dir: PathBuf,
    /// Directory the per-run results file is written to.
    pub results_dir: PathBuf,
    /// Directory holding the seen-jobs cache.
    pub cache_dir: PathBuf,
    /// Cron expression; `None` means run one pass and exit.
    pub cron_schedule: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let spool_dir = env::var("SPOOL_DIR").unwrap_or_else(|_| "spool".to_string());
        let results_dir = env::var("RESULTS_DIR").unwrap_or_else(|_| "logs".to_string());
        let cache_dir = env::var("CACHE_DIR").unwrap_or_else(|_| ".cache".to_string());
        let cron_schedule = env::var("CRON_SCHEDULE").ok().filter(|s| !s.is_empty());

        Self {
            filter: FilterConfig::for_now(Utc::now(), RemotePolicy::from_env()),
            spool_dir: PathBuf::from(spool_dir),
            results_dir: PathBuf::from(results_dir),
            cache_dir: PathBuf::from(cache_dir),
            cron_schedule,
        }
    }

    pub fn seen_jobs_path(&self) -> PathBuf {
        self.cache_dir.join("seen-jobs.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn valid_years_follow_the_clock() {
        let cfg = FilterConfig::for_now(at_2025(), RemotePolicy::Primary);
        assert_eq!(cfg.valid_years, vec![2025, 2024]);
    }

    #[test]
    fn remote_policy_places_remote_tokens() {
        let primary = FilterConfig::for_now(at_2025(), RemotePolicy::Primary);
        assert!(primary.primary_locations.iter().any(|l| l == "remote"));

        let secondary = FilterConfig::for_now(at_2025(), RemotePolicy::Secondary);
        assert!(!secondary.primary_locations.iter().any(|l| l == "remote"));
        assert!(secondary.secondary_locations.iter().any(|l| l == "remote"));

        let unknown = FilterConfig::for_now(at_2025(), RemotePolicy::Unknown);
        assert!(!unknown.primary_locations.iter().any(|l| l == "remote"));
        assert!(!unknown.secondary_locations.iter().any(|l| l == "remote"));
    }

    #[test]
    fn exclude_pattern_covers_seniority_and_two_plus_years() {
        let cfg = FilterConfig::for_now(at_2025(), RemotePolicy::Primary);
        for text in ["senior engineer", "tech lead", "2+ years", "5 years", "12 years", "3 năm"] {
            assert!(cfg.exclude.is_match(text), "should exclude: {text}");
        }
        assert!(!cfg.exclude.is_match("1 year of study"));
        // Plain "2 years" is not excluded; only the explicit "2+" form is.
        assert!(!cfg.exclude.is_match("2 years"));
        assert!(!cfg.exclude.is_match("fresher welcome"));
    }

    #[test]
    fn experience_pattern_starts_at_three_years() {
        let cfg = FilterConfig::for_now(at_2025(), RemotePolicy::Primary);
        assert!(cfg.experience.is_match("3 years"));
        assert!(cfg.experience.is_match("3+ years"));
        assert!(cfg.experience.is_match("5 plus yrs"));
        assert!(cfg.experience.is_match("10 yoe"));
        assert!(cfg.experience.is_match("4 năm"));
        assert!(!cfg.experience.is_match("2 years"));
        assert!(!cfg.experience.is_match("no experience needed"));
    }
}
