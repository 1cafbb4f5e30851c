use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::analysis::insights::merge_recommendations;
use crate::analysis::rating_engine::RatingEngine;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::github::ProfileSource;
use crate::llm::{NarrativeProvider, NarrativeRequest};
use crate::models::{AnalysisResult, ProfileSummary, Recommendation, Scores};

/// GitHub logins are at most 39 characters of ASCII alphanumerics and
/// single inner hyphens.
const MAX_LOGIN_LEN: usize = 39;

pub struct AnalysisPipeline {
    source: Arc<dyn ProfileSource>,
    narrator: Option<Arc<dyn NarrativeProvider>>,
    engine: RatingEngine,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        source: impl ProfileSource + 'static,
        engine: RatingEngine,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            narrator: None,
            engine,
            config,
        }
    }

    pub fn with_narrator(mut self, narrator: impl NarrativeProvider + 'static) -> Self {
        self.narrator = Some(Arc::new(narrator));
        self
    }

    pub async fn analyze_user(&self, username: &str) -> Result<AnalysisResult> {
        self.analyze_user_at(username, Utc::now()).await
    }

    pub async fn analyze_user_at(&self, username: &str, now: DateTime<Utc>) -> Result<AnalysisResult> {
        if !is_valid_login(username) {
            return Err(Error::UserNotFound(username.to_string()));
        }

        // Step 1: Fetch profile, repositories and events concurrently
        tracing::info!("Analyzing GitHub profile: {}", username);
        let (profile, repos, events) = tokio::join!(
            self.source.fetch_profile(username),
            self.source.fetch_repositories(username),
            self.source.fetch_events(username, self.config.event_pages, self.config.events_per_page),
        );

        // Step 2: The profile is mandatory, the rest may degrade
        let user = profile?;
        let repos = degrade_to_empty(repos, "repositories", username)?;
        let events = degrade_to_empty(events, "events", username)?;
        tracing::info!(
            "Fetched {} repositories and {} events for {}",
            repos.len(),
            events.len(),
            username
        );

        // Step 3: Deterministic scoring
        let evaluation = self.engine.evaluate(&user, &repos, &events, now);

        // Step 4: Optional narrative, awaited after scoring
        let ai_insight = match (&self.narrator, self.config.enrichment_enabled) {
            (Some(narrator), true) => {
                let request = NarrativeRequest::from_evaluation(&user, &evaluation);
                match narrator.summarize(&request).await {
                    Ok(insight) => Some(insight),
                    Err(e) => {
                        tracing::warn!("{} enrichment failed for {}: {}", narrator.name(), username, e);
                        None
                    }
                }
            }
            _ => None,
        };

        // Step 5: Assemble
        let mut profile = ProfileSummary::from(&user);
        let enriched: &[Recommendation] = match &ai_insight {
            Some(insight) => {
                profile.bio = Some(insight.professional_summary.clone());
                insight.recommendations.as_slice()
            }
            None => &[],
        };
        let recommendations = merge_recommendations(
            enriched,
            &evaluation.recommendations,
            self.engine.config().thresholds.recommendation_cap,
        );

        Ok(AnalysisResult {
            username: user.login.clone(),
            profile,
            scores: Scores {
                overall: evaluation.overall,
                breakdown: evaluation.aggregate.breakdown,
            },
            repos: evaluation.aggregate.repos,
            languages: evaluation.aggregate.languages,
            strengths: evaluation.strengths,
            red_flags: evaluation.red_flags,
            recommendations,
            events,
            ai_insight,
            analysis_date: now,
        })
    }
}

/// Replace a failed optional fetch with an empty list. Throttling still
/// aborts the request.
fn degrade_to_empty<T>(outcome: Result<Vec<T>>, what: &str, username: &str) -> Result<Vec<T>> {
    match outcome {
        Ok(items) => Ok(items),
        Err(e) if e.is_partial_source_failure() => {
            tracing::warn!("Failed to fetch {} for {}, continuing without: {}", what, username, e);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

fn is_valid_login(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_LOGIN_LEN
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
