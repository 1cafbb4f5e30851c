use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::ScoreBreakdown;

/// Weights applied to the six profile dimensions. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeights {
    pub documentation: f64,
    pub code_structure: f64,
    pub activity: f64,
    pub organization: f64,
    pub impact: f64,
    pub technical: f64,
}

impl DimensionWeights {
    /// Canonical default.
    pub const BALANCED: Self = Self {
        documentation: 0.20,
        code_structure: 0.15,
        activity: 0.20,
        organization: 0.15,
        impact: 0.15,
        technical: 0.15,
    };

    /// Smoother variant that leans on documentation and activity.
    pub const ACTIVITY_FOCUSED: Self = Self {
        documentation: 0.25,
        code_structure: 0.15,
        activity: 0.25,
        organization: 0.10,
        impact: 0.15,
        technical: 0.10,
    };

    pub fn sum(&self) -> f64 {
        self.documentation
            + self.code_structure
            + self.activity
            + self.organization
            + self.impact
            + self.technical
    }

    pub fn weighted(&self, breakdown: &ScoreBreakdown) -> f64 {
        breakdown.documentation as f64 * self.documentation
            + breakdown.code_structure as f64 * self.code_structure
            + breakdown.activity as f64 * self.activity
            + breakdown.organization as f64 * self.organization
            + breakdown.impact as f64 * self.impact
            + breakdown.technical as f64 * self.technical
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.documentation,
            self.code_structure,
            self.activity,
            self.organization,
            self.impact,
            self.technical,
        ]
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self::BALANCED
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeightPreset {
    #[default]
    Balanced,
    ActivityFocused,
}

impl WeightPreset {
    pub fn weights(&self) -> DimensionWeights {
        match self {
            WeightPreset::Balanced => DimensionWeights::BALANCED,
            WeightPreset::ActivityFocused => DimensionWeights::ACTIVITY_FOCUSED,
        }
    }
}

impl FromStr for WeightPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "balanced" | "default" => Ok(WeightPreset::Balanced),
            "activity" | "activity-focused" | "smooth" => Ok(WeightPreset::ActivityFocused),
            other => Err(Error::Config(format!(
                "unknown scoring preset '{}' (expected 'balanced' or 'activity')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightPreset::Balanced => write!(f, "balanced"),
            WeightPreset::ActivityFocused => write!(f, "activity"),
        }
    }
}

/// Blend used for the per-repository `overall` ranking value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepoWeights {
    pub doc: f64,
    pub impact: f64,
    pub structure: f64,
    /// Fixed structural proxy used for every repository.
    pub structure_placeholder: f64,
}

impl Default for RepoWeights {
    fn default() -> Self {
        Self {
            doc: 0.4,
            impact: 0.4,
            structure: 0.2,
            structure_placeholder: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentationPoints {
    pub description: u32,
    pub homepage: u32,
    pub wiki: u32,
}

impl Default for DocumentationPoints {
    fn default() -> Self {
        Self {
            description: 20,
            homepage: 10,
            wiki: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactMultipliers {
    pub star: u64,
    pub fork: u64,
    pub watcher: u64,
    /// Flat bonus per follower added to the profile-level impact mean.
    pub follower: u64,
}

impl Default for ImpactMultipliers {
    fn default() -> Self {
        Self {
            star: 5,
            fork: 10,
            watcher: 2,
            follower: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructurePoints {
    pub base: u32,
    pub per_language: u32,
    pub serious_project: u32,
    /// Size (KB) a repository must exceed to count as a serious project.
    pub serious_project_size_kb: u64,
    pub pages: u32,
    pub topics: u32,
}

impl Default for StructurePoints {
    fn default() -> Self {
        Self {
            base: 20,
            per_language: 10,
            serious_project: 20,
            serious_project_size_kb: 1000,
            pages: 10,
            topics: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizationPoints {
    pub bio: u32,
    pub location: u32,
    pub blog: u32,
    pub email: u32,
    pub company: u32,
    pub twitter: u32,
}

impl Default for OrganizationPoints {
    fn default() -> Self {
        Self {
            bio: 20,
            location: 10,
            blog: 20,
            email: 10,
            company: 20,
            twitter: 10,
        }
    }
}

/// Cut-offs for strengths, risk flags and recommendations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    pub strong_documentation: u8,
    pub strong_impact: u8,
    pub strong_total_stars: u64,
    pub strong_activity: u8,
    pub polyglot_languages: usize,
    pub community_followers: u32,
    /// Calendar years, compared against the account creation date.
    pub veteran_years: u32,
    pub flagship_stars: u32,

    pub weak_documentation: u8,
    pub weak_activity: u8,
    pub no_traction_stars: u64,
    pub no_traction_min_age_years: u32,
    pub single_language_min_repos: usize,
    pub isolated_followers: u32,
    pub stale_days: f64,

    pub recommend_documentation: u8,
    pub recommend_activity: u8,
    pub recommend_min_languages: usize,
    pub recommendation_cap: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            strong_documentation: 80,
            strong_impact: 70,
            strong_total_stars: 50,
            strong_activity: 80,
            polyglot_languages: 4,
            community_followers: 50,
            veteran_years: 3,
            flagship_stars: 20,

            weak_documentation: 30,
            weak_activity: 20,
            no_traction_stars: 2,
            no_traction_min_age_years: 1,
            single_language_min_repos: 2,
            isolated_followers: 5,
            stale_days: 365.0,

            recommend_documentation: 50,
            recommend_activity: 40,
            recommend_min_languages: 2,
            recommendation_cap: 4,
        }
    }
}

/// Every tunable number the scoring engine uses.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub weights: DimensionWeights,
    pub repo: RepoWeights,
    pub documentation: DocumentationPoints,
    pub impact: ImpactMultipliers,
    pub structure: StructurePoints,
    pub organization: OrganizationPoints,
    /// Distinct active days that saturate the activity dimension.
    pub activity_day_target: u32,
    pub points_per_language: u32,
    pub thresholds: InsightThresholds,
}

impl ScoringConfig {
    pub fn new(preset: WeightPreset) -> Self {
        Self {
            weights: preset.weights(),
            repo: RepoWeights::default(),
            documentation: DocumentationPoints::default(),
            impact: ImpactMultipliers::default(),
            structure: StructurePoints::default(),
            organization: OrganizationPoints::default(),
            activity_day_target: 10,
            points_per_language: 15,
            thresholds: InsightThresholds::default(),
        }
    }

    pub fn with_weights(mut self, weights: DimensionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let weights = self.weights.as_array();
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(Error::Config(
                "dimension weights must be finite and non-negative".to_string(),
            ));
        }
        if (self.weights.sum() - 1.0).abs() > 1e-6 {
            return Err(Error::Config(format!(
                "dimension weights must sum to 1.0, got {:.4}",
                self.weights.sum()
            )));
        }
        let repo_weights = [self.repo.doc, self.repo.impact, self.repo.structure];
        if repo_weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(Error::Config(
                "repository weights must be finite and non-negative".to_string(),
            ));
        }
        let repo_sum: f64 = repo_weights.iter().sum();
        if (repo_sum - 1.0).abs() > 1e-6 {
            return Err(Error::Config(format!(
                "repository weights must sum to 1.0, got {:.4}",
                repo_sum
            )));
        }
        if self.activity_day_target == 0 {
            return Err(Error::Config(
                "activity day target must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new(WeightPreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_sum_to_one() {
        assert!((DimensionWeights::BALANCED.sum() - 1.0).abs() < 1e-9);
        assert!((DimensionWeights::ACTIVITY_FOCUSED.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::new(WeightPreset::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.weights, DimensionWeights::BALANCED);
        assert_eq!(config.activity_day_target, 10);
        assert_eq!(config.thresholds.recommendation_cap, 4);
    }

    #[test]
    fn test_rejects_unbalanced_weights() {
        let mut weights = DimensionWeights::BALANCED;
        weights.activity = 0.5;
        let config = ScoringConfig::new(WeightPreset::Balanced).with_weights(weights);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_non_finite_repo_weights() {
        let mut config = ScoringConfig::default();
        config.repo.doc = f64::NAN;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_negative_repo_weights() {
        let mut config = ScoringConfig::default();
        config.repo.doc = -0.2;
        config.repo.impact = 1.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("activity".parse::<WeightPreset>().unwrap(), WeightPreset::ActivityFocused);
        assert_eq!("Balanced".parse::<WeightPreset>().unwrap(), WeightPreset::Balanced);
        assert!("heavy".parse::<WeightPreset>().is_err());
    }
}
