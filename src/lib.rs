pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod llm;
pub mod analysis;
pub mod server;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubClient, ProfileSource};
pub use llm::{ClaudeProvider, NarrativeProvider};
pub use analysis::{AnalysisPipeline, RatingEngine, ScoringConfig, WeightPreset};
