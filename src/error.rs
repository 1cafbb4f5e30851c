use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether a failed repository or event fetch may be replaced by an
    /// empty list instead of aborting the analysis.
    pub fn is_partial_source_failure(&self) -> bool {
        !matches!(self, Error::RateLimited(_) | Error::UserNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_not_degradable() {
        assert!(!Error::RateLimited(30).is_partial_source_failure());
        assert!(!Error::UserNotFound("ghost".into()).is_partial_source_failure());
    }

    #[test]
    fn test_other_failures_degrade() {
        assert!(Error::GitHubApi("502 Bad Gateway".into()).is_partial_source_failure());
        assert!(Error::NotFound("repositories".into()).is_partial_source_failure());
        assert!(Error::ParseError("eof".into()).is_partial_source_failure());
    }
}
