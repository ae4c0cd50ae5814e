use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FilterConfig;

static ISO_DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());
static YEAR_ONLY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(20\d{2})\b").unwrap());

const MAX_AGE_DAYS: i64 = 60;
// Future dates up to 2 days ahead are tolerated (timezone noise).
const MAX_SKEW_DAYS: i64 = 2;

/// Decides whether a free-form posting date falls inside the recency window.
///
/// Rejects only on positive evidence of staleness; every ambiguous or
/// unparseable input is accepted so a posting is never silently dropped over
/// formatting.
pub fn is_recent(date_expr: &str, cfg: &FilterConfig, now: DateTime<Utc>) -> bool {
    let date_expr = date_expr.trim();
    if date_expr.is_empty() || date_expr == "N/A" || date_expr == "Recent" {
        return true;
    }

    // ISO-like: "2026-01-27" or "2026-01-27T..."
    if ISO_DATE_REGEX.is_match(date_expr) {
        if let Ok(date) = NaiveDate::parse_from_str(&date_expr[..10], "%Y-%m-%d") {
            return within_window(now, date);
        }
    }

    // Slash-delimited, day-first assumed: "31/01/2026"
    if date_expr.contains('/') {
        let parts: Vec<&str> = date_expr.split('/').collect();
        if parts.len() >= 3 {
            if let Some(date) = slash_date(&parts) {
                return within_window(now, date);
            }
        }
    }

    // Bare-year fallback: a 4-digit 20xx year must be in the valid set.
    if let Some(caps) = YEAR_ONLY_REGEX.captures(date_expr) {
        if let Ok(year) = caps[1].parse::<i32>() {
            return cfg.valid_years.contains(&year);
        }
    }

    true
}

fn slash_date(parts: &[&str]) -> Option<NaiveDate> {
    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn within_window(now: DateTime<Utc>, date: NaiveDate) -> bool {
    let age = now.date_naive().signed_duration_since(date);
    age <= Duration::days(MAX_AGE_DAYS) && age >= -Duration::days(MAX_SKEW_DAYS)
}
