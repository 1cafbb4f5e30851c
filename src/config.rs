use crate::analysis::weights::WeightPreset;
use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub event_pages: u32,
    pub events_per_page: u32,
    pub preset: WeightPreset,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = non_empty_var("GITHUB_TOKEN");
        let anthropic_api_key = non_empty_var("ANTHROPIC_API_KEY");

        let github_api_url = non_empty_var("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let anthropic_model = non_empty_var("ANTHROPIC_MODEL")
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string());

        let event_pages = parse_var("EVENT_PAGES")?.unwrap_or(1);
        if !(1..=3).contains(&event_pages) {
            return Err(Error::Config(format!(
                "EVENT_PAGES must be between 1 and 3, got {}",
                event_pages
            )));
        }

        let events_per_page = parse_var("EVENTS_PER_PAGE")?.unwrap_or(30);
        if !(1..=100).contains(&events_per_page) {
            return Err(Error::Config(format!(
                "EVENTS_PER_PAGE must be between 1 and 100, got {}",
                events_per_page
            )));
        }

        let preset = match non_empty_var("SCORING_PRESET") {
            Some(name) => name.parse()?,
            None => WeightPreset::default(),
        };

        let host = non_empty_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var("PORT")?.unwrap_or(3001);

        Ok(Self {
            github_token,
            github_api_url,
            anthropic_api_key,
            anthropic_model,
            event_pages,
            events_per_page,
            preset,
            host,
            port,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match non_empty_var(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub event_pages: u32,
    pub events_per_page: u32,
    pub enrichment_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            event_pages: 1,
            events_per_page: 30,
            enrichment_enabled: true,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            event_pages: config.event_pages,
            events_per_page: config.events_per_page,
            enrichment_enabled: config.anthropic_api_key.is_some(),
        }
    }
}
