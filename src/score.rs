use crate::config::FilterConfig;
use crate::records::CandidateRecord;

const MAX_SCORE: i32 = 10;
const EXPERIENCE_PENALTY: i32 = 5;

/// Additive 0–10 match score over lower-cased title + description + company.
///
/// +3 keyword, +3 junior-level signal, +2/+1 primary/secondary location,
/// +1 tech-stack bonus, −5 when a 3+-years experience expression shows up.
/// Clamped at 10 with no floor: a negative score marks a record the filter
/// should already have dropped.
pub fn match_score(record: &CandidateRecord, cfg: &FilterConfig) -> i32 {
    let text = format!("{} {} {}", record.title, record.description, record.company).to_lowercase();
    let mut score = 0;

    if cfg.keyword.is_match(&text) {
        score += 3;
    }
    if cfg.include.is_match(&text) {
        score += 3;
    }

    let location = record.location.to_lowercase();
    if cfg.primary_locations.iter().any(|l| location.contains(l.as_str())) {
        score += 2;
    } else if cfg.secondary_locations.iter().any(|l| location.contains(l.as_str())) {
        score += 1;
    }

    if cfg.tech_stack.is_match(&text) {
        score += 1;
    }

    if cfg.experience.is_match(&text) {
        score -= EXPERIENCE_PENALTY;
    }

    score.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemotePolicy;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    fn cfg() -> FilterConfig {
        FilterConfig::for_now(now(), RemotePolicy::Primary)
    }

    fn job(title: &str, description: &str, location: &str) -> CandidateRecord {
        CandidateRecord {
            url: "https://example.com/job".into(),
            title: title.into(),
            description: description.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    #[test]
    fn full_house_clamps_at_ten() {
        // 3 keyword + 3 junior + 2 primary location + 1 tech = 9, under cap.
        let rec = job("Junior Golang Developer", "docker, kubernetes", "Can Tho");
        assert_eq!(match_score(&rec, &cfg()), 9);
    }

    #[test]
    fn each_bonus_is_monotonic() {
        let base = job("Golang Developer", "", "");
        let base_score = match_score(&base, &cfg());

        let with_junior = job("Junior Golang Developer", "", "");
        assert!(match_score(&with_junior, &cfg()) > base_score);

        let with_location = job("Golang Developer", "", "remote");
        assert!(match_score(&with_location, &cfg()) > base_score);

        let with_tech = job("Golang Developer", "grpc microservices", "");
        assert!(match_score(&with_tech, &cfg()) > base_score);
    }

    #[test]
    fn secondary_location_scores_one() {
        let primary = job("Golang Developer", "", "Ho Chi Minh");
        let secondary = job("Golang Developer", "", "Hanoi");
        let none = job("Golang Developer", "", "Da Nang");
        assert_eq!(match_score(&primary, &cfg()) - match_score(&none, &cfg()), 2);
        assert_eq!(match_score(&secondary, &cfg()) - match_score(&none, &cfg()), 1);
    }

    #[test]
    fn experience_penalty_subtracts_exactly_five() {
        let clean = job("Golang Developer", "backend role", "");
        let penalized = job("Golang Developer", "backend role, 5 years required", "");
        assert_eq!(match_score(&clean, &cfg()) - match_score(&penalized, &cfg()), 5);
    }

    #[test]
    fn penalty_can_drive_score_negative() {
        let rec = job("Mechanical lead", "10 years of welding", "");
        assert_eq!(match_score(&rec, &cfg()), -5);
    }

    #[test]
    fn scoring_never_errors_on_empty_record() {
        assert_eq!(match_score(&CandidateRecord::default(), &cfg()), 0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let rec = job("Golang Fresher", "docker", "remote");
        let c = cfg();
        assert_eq!(match_score(&rec, &c), match_score(&rec, &c));
    }
}
