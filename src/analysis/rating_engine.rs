use chrono::{DateTime, Utc};

use crate::analysis::aggregator::{aggregate, Aggregate};
use crate::analysis::insights::{detect_red_flags, detect_strengths, recommend, InsightContext};
use crate::analysis::weights::ScoringConfig;
use crate::error::Result;
use crate::models::{Event, GitHubUser, RedFlag, Recommendation, Repository, ScoreBreakdown, Strength};

/// Deterministic scoring output for one profile, before enrichment.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub aggregate: Aggregate,
    pub overall: u8,
    pub strengths: Vec<Strength>,
    pub red_flags: Vec<RedFlag>,
    pub recommendations: Vec<Recommendation>,
}

pub struct RatingEngine {
    config: ScoringConfig,
}

impl RatingEngine {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weighted composite of the six dimensions, rounded into 0..=100.
    pub fn overall_score(&self, breakdown: &ScoreBreakdown) -> u8 {
        self.config
            .weights
            .weighted(breakdown)
            .round()
            .clamp(0.0, 100.0) as u8
    }

    pub fn evaluate(
        &self,
        user: &GitHubUser,
        repos: &[Repository],
        events: &[Event],
        now: DateTime<Utc>,
    ) -> Evaluation {
        let aggregate = aggregate(user, repos, events, &self.config);
        let overall = self.overall_score(&aggregate.breakdown);

        let ctx = InsightContext {
            user,
            events,
            aggregate: &aggregate,
            now,
        };
        let thresholds = &self.config.thresholds;
        let strengths = detect_strengths(&ctx, thresholds);
        let red_flags = detect_red_flags(&ctx, thresholds);
        let recommendations = recommend(&ctx, thresholds);

        tracing::info!(
            login = %user.login,
            overall,
            strengths = strengths.len(),
            red_flags = red_flags.len(),
            "profile scored"
        );

        Evaluation {
            aggregate,
            overall,
            strengths,
            red_flags,
            recommendations,
        }
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dimensions::fixtures::{now, repo, user};
    use crate::analysis::weights::{DimensionWeights, WeightPreset};

    fn breakdown(values: [u8; 6]) -> ScoreBreakdown {
        ScoreBreakdown {
            documentation: values[0],
            code_structure: values[1],
            activity: values[2],
            organization: values[3],
            impact: values[4],
            technical: values[5],
        }
    }

    #[test]
    fn test_overall_stays_in_range_for_all_presets() {
        let steps = [0u8, 20, 40, 60, 80, 100];
        for preset in [WeightPreset::Balanced, WeightPreset::ActivityFocused] {
            let engine = RatingEngine::new(ScoringConfig::new(preset)).unwrap();
            for a in steps {
                for b in steps {
                    for c in steps {
                        for d in steps {
                            for e in steps {
                                for f in steps {
                                    let score = engine.overall_score(&breakdown([a, b, c, d, e, f]));
                                    assert!(score <= 100);
                                }
                            }
                        }
                    }
                }
            }
            assert_eq!(engine.overall_score(&breakdown([100; 6])), 100);
            assert_eq!(engine.overall_score(&breakdown([0; 6])), 0);
        }
    }

    #[test]
    fn test_balanced_weights() {
        let engine = RatingEngine::default();
        // 80*.2 + 60*.15 + 50*.2 + 40*.15 + 100*.15 + 20*.15 = 59
        assert_eq!(engine.overall_score(&breakdown([80, 60, 50, 40, 100, 20])), 59);
    }

    #[test]
    fn test_presets_are_swappable() {
        let scores = breakdown([100, 0, 100, 0, 0, 0]);
        let balanced = RatingEngine::new(ScoringConfig::new(WeightPreset::Balanced)).unwrap();
        let focused = RatingEngine::new(ScoringConfig::new(WeightPreset::ActivityFocused)).unwrap();
        assert_eq!(balanced.overall_score(&scores), 40);
        assert_eq!(focused.overall_score(&scores), 50);
    }

    #[test]
    fn test_custom_weights_are_honoured() {
        let weights = DimensionWeights {
            documentation: 0.0,
            code_structure: 0.0,
            activity: 0.0,
            organization: 0.0,
            impact: 1.0,
            technical: 0.0,
        };
        let engine = RatingEngine::new(ScoringConfig::default().with_weights(weights)).unwrap();
        assert_eq!(engine.overall_score(&breakdown([0, 0, 0, 0, 73, 0])), 73);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ScoringConfig::default();
        config.weights.technical = 0.9;
        assert!(RatingEngine::new(config).is_err());
    }

    #[test]
    fn test_evaluate_empty_profile() {
        let engine = RatingEngine::default();
        let evaluation = engine.evaluate(&user("blank"), &[], &[], now());

        assert_eq!(evaluation.aggregate.breakdown.documentation, 0);
        assert_eq!(evaluation.aggregate.breakdown.activity, 0);
        assert!(!evaluation.strengths.is_empty());
        assert!(evaluation.recommendations.iter().any(|r| r.title == "Add a Bio"));
        assert!(evaluation
            .recommendations
            .iter()
            .all(|r| r.title != "Improve Documentation"));
        assert!(evaluation.overall < 20);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let engine = RatingEngine::default();
        let repos = vec![repo("one"), repo("two"), repo("three")];
        let first = engine.evaluate(&user("same"), &repos, &[], now());
        let second = engine.evaluate(&user("same"), &repos, &[], now());
        assert_eq!(first.aggregate.repos, second.aggregate.repos);
        assert_eq!(first.overall, second.overall);
    }
}
