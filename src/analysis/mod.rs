pub mod weights;
pub mod dimensions;
pub mod aggregator;
pub mod insights;
pub mod rating_engine;
pub mod pipeline;

pub use pipeline::AnalysisPipeline;
pub use rating_engine::{Evaluation, RatingEngine};
pub use weights::{DimensionWeights, ScoringConfig, WeightPreset};
