//! Qualitative read-out derived from computed scores and raw profile facts.

use chrono::{DateTime, Months, Utc};

use crate::analysis::aggregator::Aggregate;
use crate::analysis::weights::InsightThresholds;
use crate::models::{
    is_present, Event, GitHubUser, RedFlag, RedFlagKind, Recommendation, RecommendationKind,
    Strength, StrengthKind,
};

pub struct InsightContext<'a> {
    pub user: &'a GitHubUser,
    pub events: &'a [Event],
    pub aggregate: &'a Aggregate,
    pub now: DateTime<Utc>,
}

impl InsightContext<'_> {
    /// Strictly more than `years` calendar years since the account was
    /// created.
    fn account_older_than(&self, years: u32) -> bool {
        self.user
            .created_at
            .checked_add_months(Months::new(years.saturating_mul(12)))
            .map(|anniversary| self.now > anniversary)
            .unwrap_or(false)
    }

    fn account_age_years(&self) -> u32 {
        self.now.years_since(self.user.created_at).unwrap_or(0)
    }

    /// Mean days since last update over ranked repositories.
    fn mean_staleness_days(&self) -> Option<f64> {
        let repos = &self.aggregate.repos;
        if repos.is_empty() {
            return None;
        }
        let total: f64 = repos
            .iter()
            .map(|r| (self.now - r.updated_at).num_seconds() as f64 / 86_400.0)
            .sum();
        Some(total / repos.len() as f64)
    }
}

pub fn detect_strengths(ctx: &InsightContext<'_>, t: &InsightThresholds) -> Vec<Strength> {
    let mut strengths = Vec::new();
    let scores = &ctx.aggregate.breakdown;

    if scores.documentation > t.strong_documentation {
        strengths.push(Strength::new(
            StrengthKind::Documentation,
            "Projects are well documented with descriptions, homepages and wikis",
        ));
    }

    if scores.impact > t.strong_impact || ctx.aggregate.total_stars > t.strong_total_stars {
        strengths.push(Strength::new(
            StrengthKind::Impact,
            format!(
                "Work resonates with the community ({} total stars)",
                ctx.aggregate.total_stars
            ),
        ));
    }

    if scores.activity > t.strong_activity {
        strengths.push(Strength::new(
            StrengthKind::Consistency,
            "Consistent contributor, active across many distinct days",
        ));
    }

    let languages = ctx.aggregate.distinct_languages();
    if languages >= t.polyglot_languages {
        strengths.push(Strength::new(
            StrengthKind::Polyglot,
            format!("Polyglot engineer working across {} languages", languages),
        ));
    }

    if ctx.user.followers > t.community_followers {
        strengths.push(Strength::new(
            StrengthKind::Community,
            format!("Established audience of {} followers", ctx.user.followers),
        ));
    }

    if ctx.account_older_than(t.veteran_years) {
        strengths.push(Strength::new(
            StrengthKind::Veteran,
            format!("Seasoned GitHub member for {} years", ctx.account_age_years()),
        ));
    }

    if ctx.events.iter().any(Event::is_pull_request) {
        strengths.push(Strength::new(
            StrengthKind::Collaborator,
            "Collaborates through pull requests",
        ));
    }

    let best_stars = ctx.aggregate.max_repo_stars();
    if best_stars > t.flagship_stars {
        strengths.push(Strength::new(
            StrengthKind::Flagship,
            format!("Has a standout project with {} stars", best_stars),
        ));
    }

    if strengths.is_empty() {
        strengths.push(Strength::new(
            StrengthKind::Emerging,
            "Emerging developer building a foundation",
        ));
    }

    strengths
}

pub fn detect_red_flags(ctx: &InsightContext<'_>, t: &InsightThresholds) -> Vec<RedFlag> {
    let mut flags = Vec::new();
    let scores = &ctx.aggregate.breakdown;

    if scores.documentation < t.weak_documentation {
        flags.push(RedFlag::new(
            RedFlagKind::PoorDocumentation,
            "Most repositories lack descriptions or documentation",
        ));
    }

    if ctx.events.is_empty() || scores.activity < t.weak_activity {
        flags.push(RedFlag::new(
            RedFlagKind::Inactive,
            "Little or no recent public activity",
        ));
    }

    if ctx.aggregate.total_stars < t.no_traction_stars
        && ctx.account_older_than(t.no_traction_min_age_years)
    {
        flags.push(RedFlag::new(
            RedFlagKind::NoTraction,
            "Projects have gained almost no community traction",
        ));
    }

    if ctx.aggregate.distinct_languages() == 1
        && ctx.aggregate.repos.len() > t.single_language_min_repos
    {
        flags.push(RedFlag::new(
            RedFlagKind::SingleLanguage,
            "All projects are written in a single language",
        ));
    }

    if ctx.user.following == 0 && ctx.user.followers < t.isolated_followers {
        flags.push(RedFlag::new(
            RedFlagKind::Isolated,
            "Limited network: not following anyone and few followers",
        ));
    }

    if let Some(days) = ctx.mean_staleness_days() {
        if days > t.stale_days {
            flags.push(RedFlag::new(
                RedFlagKind::StaleRepositories,
                format!("Repositories are stale (average {:.0} days since last update)", days),
            ));
        }
    }

    let user = ctx.user;
    if !is_present(&user.bio) && !is_present(&user.location) && !is_present(&user.company) {
        flags.push(RedFlag::new(
            RedFlagKind::IncompleteProfile,
            "Profile is missing a bio, location and company",
        ));
    }

    flags
}

/// Fixed recommendations, independent of any narrative enrichment.
pub fn recommend(ctx: &InsightContext<'_>, t: &InsightThresholds) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let scores = &ctx.aggregate.breakdown;

    // Nothing to document without at least one owned repository.
    if !ctx.aggregate.repos.is_empty() && scores.documentation < t.recommend_documentation {
        recommendations.push(Recommendation::new(
            RecommendationKind::Critical,
            "Improve Documentation",
            "Many repositories lack descriptions or READMEs. Add a detailed README.md to your pinned projects to explain what they do.",
        ));
    }

    if scores.activity < t.recommend_activity {
        recommendations.push(Recommendation::new(
            RecommendationKind::Warning,
            "Inconsistent Activity",
            "Recruiters look for consistency. Try to commit code at least a few times a week rather than in bursts.",
        ));
    }

    if ctx.aggregate.distinct_languages() < t.recommend_min_languages {
        recommendations.push(Recommendation::new(
            RecommendationKind::Info,
            "Expand Tech Stack",
            "You seem to stick to one language. Try building a small project in a different language to show versatility.",
        ));
    }

    if !is_present(&ctx.user.bio) {
        recommendations.push(Recommendation::new(
            RecommendationKind::EasyWin,
            "Add a Bio",
            "Your profile lacks a bio. Write a short professional summary of who you are and what you do.",
        ));
    }

    recommendations
}

/// Enrichment advice goes first, then the fixed list, then the cap.
pub fn merge_recommendations(
    enriched: &[Recommendation],
    deterministic: &[Recommendation],
    cap: usize,
) -> Vec<Recommendation> {
    enriched
        .iter()
        .chain(deterministic.iter())
        .take(cap)
        .cloned()
        .collect()
}
