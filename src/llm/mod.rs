pub mod provider;
pub mod claude;
pub mod prompts;
pub mod parser;

pub use provider::NarrativeProvider;
pub use claude::ClaudeProvider;
pub use prompts::{NarrativeRequest, RepoHighlight};
