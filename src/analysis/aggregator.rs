use std::collections::BTreeMap;

use crate::analysis::dimensions::{
    activity_score, documentation_score, impact_score, organization_score, structure_score,
    technical_score,
};
use crate::analysis::weights::ScoringConfig;
use crate::models::{Event, GitHubUser, RepoDimensions, RepoScore, Repository, ScoreBreakdown};

/// Profile-level totals accumulated over non-fork repositories.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Ranked by `overall`, descending. Ties keep fetch order.
    pub repos: Vec<RepoScore>,
    pub languages: BTreeMap<String, u32>,
    pub total_stars: u64,
    pub total_forks: u64,
    pub breakdown: ScoreBreakdown,
}

impl Aggregate {
    pub fn distinct_languages(&self) -> usize {
        self.languages.len()
    }

    pub fn max_repo_stars(&self) -> u32 {
        self.repos.iter().map(|r| r.stars).max().unwrap_or(0)
    }
}

pub fn score_repository(repo: &Repository, config: &ScoringConfig) -> RepoScore {
    let doc = documentation_score(repo, config);
    let impact = impact_score(repo, config);
    let w = &config.repo;
    let overall = (doc as f64 * w.doc + impact as f64 * w.impact + w.structure_placeholder * w.structure)
        .round()
        .clamp(0.0, 100.0) as u8;

    RepoScore {
        name: repo.name.clone(),
        description: repo.description.clone(),
        language: repo.language.clone(),
        stars: repo.stargazers_count,
        updated_at: repo.updated_at,
        scores: RepoDimensions { doc, impact },
        overall,
    }
}

fn mean(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

pub fn aggregate(
    user: &GitHubUser,
    repos: &[Repository],
    events: &[Event],
    config: &ScoringConfig,
) -> Aggregate {
    let owned: Vec<&Repository> = repos.iter().filter(|r| !r.fork).collect();

    let mut languages: BTreeMap<String, u32> = BTreeMap::new();
    let mut total_stars = 0u64;
    let mut total_forks = 0u64;
    let mut doc_scores = Vec::with_capacity(owned.len());
    let mut impact_scores = Vec::with_capacity(owned.len());
    let mut ranked = Vec::with_capacity(owned.len());

    for repo in &owned {
        total_stars += repo.stargazers_count as u64;
        total_forks += repo.forks_count as u64;

        if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
            *languages.entry(language.to_string()).or_insert(0) += 1;
        }

        let score = score_repository(repo, config);
        doc_scores.push(score.scores.doc);
        impact_scores.push(score.scores.impact);
        ranked.push(score);
    }

    // Vec::sort_by is stable, so equal scores keep fetch order.
    ranked.sort_by(|a, b| b.overall.cmp(&a.overall));

    let follower_bonus = (user.followers as u64).saturating_mul(config.impact.follower) as f64;
    let distinct_languages = languages.len();

    let breakdown = ScoreBreakdown {
        documentation: mean(&doc_scores).round().min(100.0) as u8,
        code_structure: structure_score(&owned, distinct_languages, config),
        activity: activity_score(events, config),
        organization: organization_score(user, config),
        impact: (mean(&impact_scores) + follower_bonus).round().min(100.0) as u8,
        technical: technical_score(distinct_languages, config),
    };

    tracing::debug!(
        repos = ranked.len(),
        languages = distinct_languages,
        total_stars,
        "aggregated repositories"
    );

    Aggregate {
        repos: ranked,
        languages,
        total_stars,
        total_forks,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dimensions::fixtures::{repo, user};

    #[test]
    fn test_flagship_repo_scores() {
        let config = ScoringConfig::default();
        let mut r = repo("flagship");
        r.stargazers_count = 100;
        r.forks_count = 50;
        r.description = Some("Fast thing".into());
        r.homepage = Some("https://flagship.dev".into());
        r.has_wiki = true;

        let score = score_repository(&r, &config);
        assert_eq!(score.scores.doc, 35);
        assert_eq!(score.scores.impact, 100);
        assert_eq!(score.overall, 64);
    }

    #[test]
    fn test_forks_are_excluded() {
        let config = ScoringConfig::default();
        let mut own = repo("own");
        own.language = Some("Rust".into());
        own.stargazers_count = 2;
        own.forks_count = 1;

        let mut forked = repo("forked");
        forked.fork = true;
        forked.language = Some("Go".into());
        forked.stargazers_count = 500;
        forked.forks_count = 90;
        forked.description = Some("upstream".into());

        let agg = aggregate(&user("octo"), &[own, forked], &[], &config);
        assert_eq!(agg.repos.len(), 1);
        assert_eq!(agg.repos[0].name, "own");
        assert_eq!(agg.total_stars, 2);
        assert_eq!(agg.total_forks, 1);
        assert_eq!(agg.languages.len(), 1);
        assert_eq!(agg.languages.get("Rust"), Some(&1));
        assert_eq!(agg.breakdown.documentation, 0);
        // 2 stars * 5 + 1 fork * 10; the fork's saturated 100 stays out of the mean.
        assert_eq!(agg.breakdown.impact, 20);
        assert_eq!(agg.max_repo_stars(), 2);
    }

    #[test]
    fn test_ranking_is_stable_for_ties() {
        let config = ScoringConfig::default();
        let mut strong = repo("strong");
        strong.stargazers_count = 40;

        let first = repo("first-twin");
        let second = repo("second-twin");

        let agg = aggregate(
            &user("octo"),
            &[first, strong, second],
            &[],
            &config,
        );
        let names: Vec<_> = agg.repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["strong", "first-twin", "second-twin"]);
        assert!(agg.repos.windows(2).all(|w| w[0].overall >= w[1].overall));
    }

    #[test]
    fn test_languages_skip_missing() {
        let config = ScoringConfig::default();
        let mut a = repo("a");
        a.language = Some("Rust".into());
        let mut b = repo("b");
        b.language = Some("Rust".into());
        let c = repo("c");
        let mut d = repo("d");
        d.language = Some("Python".into());

        let agg = aggregate(&user("octo"), &[a, b, c, d], &[], &config);
        assert_eq!(agg.languages.get("Rust"), Some(&2));
        assert_eq!(agg.languages.get("Python"), Some(&1));
        assert_eq!(agg.distinct_languages(), 2);
        assert_eq!(agg.breakdown.technical, 30);
    }

    #[test]
    fn test_follower_bonus_saturates_impact() {
        let config = ScoringConfig::default();
        let mut u = user("famous");
        u.followers = 60;
        let agg = aggregate(&u, &[repo("quiet")], &[], &config);
        assert_eq!(agg.breakdown.impact, 100);

        u.followers = 10;
        let agg = aggregate(&u, &[repo("quiet")], &[], &config);
        assert_eq!(agg.breakdown.impact, 20);
    }

    #[test]
    fn test_empty_inputs() {
        let config = ScoringConfig::default();
        let agg = aggregate(&user("nobody"), &[], &[], &config);
        assert!(agg.repos.is_empty());
        assert_eq!(agg.breakdown.documentation, 0);
        assert_eq!(agg.breakdown.activity, 0);
        assert_eq!(agg.breakdown.impact, 0);
        assert_eq!(agg.breakdown.code_structure, 20);
        assert_eq!(agg.max_repo_stars(), 0);
    }
}
