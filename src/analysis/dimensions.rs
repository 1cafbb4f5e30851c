//! Dimension scorers. Each function maps one repository, or the profile
//! as a whole, to a 0..=100 score along a single axis.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::analysis::weights::ScoringConfig;
use crate::models::{is_present, Event, GitHubUser, Repository};

const MAX_SCORE: u64 = 100;

fn clamp(raw: u64) -> u8 {
    raw.min(MAX_SCORE) as u8
}

/// Description, homepage and wiki presence.
pub fn documentation_score(repo: &Repository, config: &ScoringConfig) -> u8 {
    let points = &config.documentation;
    let mut score = 0u64;
    if is_present(&repo.description) {
        score += points.description as u64;
    }
    if is_present(&repo.homepage) {
        score += points.homepage as u64;
    }
    if repo.has_wiki {
        score += points.wiki as u64;
    }
    clamp(score)
}

/// Weighted stars, forks and watchers. Saturates fast on purpose.
pub fn impact_score(repo: &Repository, config: &ScoringConfig) -> u8 {
    let m = &config.impact;
    let raw = (repo.stargazers_count as u64)
        .saturating_mul(m.star)
        .saturating_add((repo.forks_count as u64).saturating_mul(m.fork))
        .saturating_add((repo.watchers_count as u64).saturating_mul(m.watcher));
    clamp(raw)
}

/// Number of distinct UTC calendar days with at least one event.
pub fn distinct_active_days(events: &[Event]) -> usize {
    events
        .iter()
        .map(|e| e.created_at.date_naive())
        .collect::<HashSet<NaiveDate>>()
        .len()
}

/// Spread of activity: the day target saturates the score no matter how
/// many events fall on each day.
pub fn activity_score(events: &[Event], config: &ScoringConfig) -> u8 {
    if events.is_empty() {
        return 0;
    }
    let days = distinct_active_days(events) as f64;
    let target = config.activity_day_target.max(1) as f64;
    ((days / target) * 100.0).min(100.0).round() as u8
}

/// Heuristic over all non-fork repositories: language spread, one large
/// project, a published site, topic tagging.
pub fn structure_score(repos: &[&Repository], distinct_languages: usize, config: &ScoringConfig) -> u8 {
    let points = &config.structure;
    let mut score = points.base as u64;
    score = score.saturating_add((distinct_languages as u64).saturating_mul(points.per_language as u64));

    if repos.iter().any(|r| r.size > points.serious_project_size_kb) {
        score += points.serious_project as u64;
    }
    if repos.iter().any(|r| r.has_pages) {
        score += points.pages as u64;
    }
    if repos.iter().any(|r| !r.topics.is_empty()) {
        score += points.topics as u64;
    }
    clamp(score)
}

/// Profile completeness.
pub fn organization_score(user: &GitHubUser, config: &ScoringConfig) -> u8 {
    let points = &config.organization;
    let checks = [
        (&user.bio, points.bio),
        (&user.location, points.location),
        (&user.blog, points.blog),
        (&user.email, points.email),
        (&user.company, points.company),
        (&user.twitter_username, points.twitter),
    ];

    let score: u64 = checks
        .iter()
        .filter(|(field, _)| is_present(field))
        .map(|(_, weight)| *weight as u64)
        .sum();
    clamp(score)
}

pub fn technical_score(distinct_languages: usize, config: &ScoringConfig) -> u8 {
    clamp((distinct_languages as u64).saturating_mul(config.points_per_language as u64))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::{Event, EventPayload, GitHubUser, Repository};

    pub fn repo(name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            watchers_count: 0,
            size: 0,
            has_wiki: false,
            has_pages: false,
            homepage: None,
            topics: Vec::new(),
            fork: false,
            updated_at: Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn user(login: &str) -> GitHubUser {
        GitHubUser {
            login: login.to_string(),
            id: 1,
            name: Some("Octo Cat".to_string()),
            email: None,
            avatar_url: format!("https://avatars.example.com/{}", login),
            bio: None,
            company: None,
            location: None,
            blog: None,
            twitter_username: None,
            public_repos: 0,
            followers: 0,
            following: 0,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn event(kind: &str, at: DateTime<Utc>) -> Event {
        Event {
            event_type: kind.to_string(),
            created_at: at,
            repo: None,
            payload: EventPayload::default(),
        }
    }

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_documentation_score_combinations() {
        let config = ScoringConfig::default();
        let allowed = [0, 5, 10, 15, 20, 25, 30, 35];
        for mask in 0..8u8 {
            let mut r = repo("docs");
            if mask & 1 != 0 {
                r.description = Some("A tool".into());
            }
            if mask & 2 != 0 {
                r.homepage = Some("https://example.com".into());
            }
            r.has_wiki = mask & 4 != 0;
            let score = documentation_score(&r, &config);
            assert!(allowed.contains(&score), "unexpected doc score {}", score);
        }

        let mut full = repo("full");
        full.description = Some("A tool".into());
        full.homepage = Some("https://example.com".into());
        full.has_wiki = true;
        assert_eq!(documentation_score(&full, &config), 35);
    }

    #[test]
    fn test_blank_description_does_not_count() {
        let config = ScoringConfig::default();
        let mut r = repo("blank");
        r.description = Some("   ".into());
        assert_eq!(documentation_score(&r, &config), 0);
    }

    #[test]
    fn test_impact_score_formula_and_saturation() {
        let config = ScoringConfig::default();
        let mut r = repo("impact");
        r.stargazers_count = 3;
        r.forks_count = 2;
        r.watchers_count = 4;
        assert_eq!(impact_score(&r, &config), 15 + 20 + 8);

        r.stargazers_count = 20;
        r.forks_count = 0;
        r.watchers_count = 0;
        assert_eq!(impact_score(&r, &config), 100);

        r.stargazers_count = u32::MAX;
        r.forks_count = u32::MAX;
        r.watchers_count = u32::MAX;
        assert_eq!(impact_score(&r, &config), 100);
    }

    #[test]
    fn test_impact_score_is_monotonic() {
        let config = ScoringConfig::default();
        let mut previous = 0;
        for stars in 0..30 {
            let mut r = repo("m");
            r.stargazers_count = stars;
            r.watchers_count = 1;
            let score = impact_score(&r, &config);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_activity_score_empty_is_zero() {
        assert_eq!(activity_score(&[], &ScoringConfig::default()), 0);
    }

    #[test]
    fn test_activity_score_rewards_spread() {
        let config = ScoringConfig::default();
        let start = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();

        let spread: Vec<_> = (0..10)
            .map(|d| event("PushEvent", start + Duration::days(d)))
            .collect();
        assert_eq!(activity_score(&spread, &config), 100);

        let burst: Vec<_> = (0..1000)
            .map(|i| event("PushEvent", start + Duration::seconds(i)))
            .collect();
        assert_eq!(activity_score(&burst, &config), 10);
    }

    #[test]
    fn test_activity_days_use_utc_date() {
        let late = Utc.with_ymd_and_hms(2026, 10, 1, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 10, 2, 0, 0, 1).unwrap();
        let events = vec![event("PushEvent", late), event("PushEvent", early)];
        assert_eq!(distinct_active_days(&events), 2);
    }

    #[test]
    fn test_structure_score_bonuses() {
        let config = ScoringConfig::default();
        assert_eq!(structure_score(&[], 0, &config), 20);

        let mut big = repo("big");
        big.size = 1001;
        let mut site = repo("site");
        site.has_pages = true;
        let mut tagged = repo("tagged");
        tagged.topics = vec!["cli".into()];
        let repos = vec![&big, &site, &tagged];
        assert_eq!(structure_score(&repos, 2, &config), 20 + 20 + 20 + 10 + 20);
        assert_eq!(structure_score(&repos, 9, &config), 100);
    }

    #[test]
    fn test_structure_size_threshold_is_exclusive() {
        let config = ScoringConfig::default();
        let mut edge = repo("edge");
        edge.size = 1000;
        assert_eq!(structure_score(&[&edge], 0, &config), 20);
    }

    #[test]
    fn test_organization_score() {
        let config = ScoringConfig::default();
        let mut u = user("octo");
        assert_eq!(organization_score(&u, &config), 0);

        u.bio = Some("Systems programmer".into());
        u.location = Some("Berlin".into());
        u.blog = Some("https://octo.dev".into());
        u.email = Some("octo@example.com".into());
        u.company = Some("Acme".into());
        u.twitter_username = Some("octo".into());
        assert_eq!(organization_score(&u, &config), 90);

        u.blog = Some(String::new());
        assert_eq!(organization_score(&u, &config), 70);
    }

    #[test]
    fn test_technical_score() {
        let config = ScoringConfig::default();
        assert_eq!(technical_score(0, &config), 0);
        assert_eq!(technical_score(3, &config), 45);
        assert_eq!(technical_score(7, &config), 100);
    }
}
