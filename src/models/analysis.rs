use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Event, GitHubUser};

/// Per-repository ranking record. Only non-fork repositories get one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoScore {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub updated_at: DateTime<Utc>,
    pub scores: RepoDimensions,
    pub overall: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoDimensions {
    pub doc: u8,
    pub impact: u8,
}

/// The six profile-level dimensions, each clamped to 0..=100.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub documentation: u8,
    pub code_structure: u8,
    pub activity: u8,
    pub organization: u8,
    pub impact: u8,
    pub technical: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scores {
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrengthKind {
    Documentation,
    Impact,
    Consistency,
    Polyglot,
    Community,
    Veteran,
    Collaborator,
    Flagship,
    Emerging,
}

impl StrengthKind {
    pub fn icon(&self) -> &'static str {
        match self {
            StrengthKind::Documentation => "FaBook",
            StrengthKind::Impact | StrengthKind::Flagship => "FaStar",
            StrengthKind::Consistency => "FaFire",
            StrengthKind::Polyglot => "FaCode",
            StrengthKind::Community | StrengthKind::Collaborator => "FaUsers",
            StrengthKind::Veteran => "FaLaptop",
            StrengthKind::Emerging => "FaBolt",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagKind {
    PoorDocumentation,
    Inactive,
    NoTraction,
    SingleLanguage,
    Isolated,
    StaleRepositories,
    IncompleteProfile,
}

impl RedFlagKind {
    pub fn icon(&self) -> &'static str {
        match self {
            RedFlagKind::PoorDocumentation | RedFlagKind::IncompleteProfile => {
                "FaExclamationTriangle"
            }
            RedFlagKind::Inactive | RedFlagKind::StaleRepositories => "FaRegCalendarTimes",
            RedFlagKind::NoTraction | RedFlagKind::Isolated => "FaRegSadTear",
            RedFlagKind::SingleLanguage => "FaLayerGroup",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Strength {
    pub kind: StrengthKind,
    pub icon: String,
    pub text: String,
}

impl Strength {
    pub fn new(kind: StrengthKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            icon: kind.icon().to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedFlag {
    pub kind: RedFlagKind,
    pub icon: String,
    pub text: String,
}

impl RedFlag {
    pub fn new(kind: RedFlagKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            icon: kind.icon().to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationKind {
    Critical,
    Warning,
    EasyWin,
    /// Also absorbs any type tag not listed above.
    #[default]
    #[serde(other)]
    Info,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationKind::Critical => write!(f, "critical"),
            RecommendationKind::Warning => write!(f, "warning"),
            RecommendationKind::Info => write!(f, "info"),
            RecommendationKind::EasyWin => write!(f, "easy-win"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type", default)]
    pub kind: RecommendationKind,
    pub title: String,
    pub text: String,
}

impl Recommendation {
    pub fn new(kind: RecommendationKind, title: &str, text: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            text: text.to_string(),
        }
    }
}

/// Narrative produced by the optional text-generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiInsight {
    pub professional_summary: String,
    #[serde(default)]
    pub recruiter_tip: String,
    #[serde(default)]
    pub key_strength: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub login: String,
    pub avatar: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&GitHubUser> for ProfileSummary {
    fn from(user: &GitHubUser) -> Self {
        Self {
            login: user.login.clone(),
            avatar: user.avatar_url.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            company: user.company.clone(),
            blog: user.blog.clone(),
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            created_at: user.created_at,
        }
    }
}

/// Push counters over the fetched event window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityStats {
    pub push_events: usize,
    pub commits: u64,
    pub last_active: Option<DateTime<Utc>>,
}

impl ActivityStats {
    pub fn from_events(events: &[Event]) -> Self {
        Self {
            push_events: events.iter().filter(|e| e.is_push()).count(),
            commits: events.iter().map(|e| e.commit_count() as u64).sum(),
            last_active: events.iter().map(|e| e.created_at).max(),
        }
    }
}

/// Everything the dashboard consumes for one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub username: String,
    pub profile: ProfileSummary,
    pub scores: Scores,
    pub repos: Vec<RepoScore>,
    pub languages: BTreeMap<String, u32>,
    pub strengths: Vec<Strength>,
    #[serde(rename = "redFlags")]
    pub red_flags: Vec<RedFlag>,
    pub recommendations: Vec<Recommendation>,
    pub events: Vec<Event>,
    pub ai_insight: Option<AiInsight>,
    pub analysis_date: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn activity_stats(&self) -> ActivityStats {
        ActivityStats::from_events(&self.events)
    }
}
