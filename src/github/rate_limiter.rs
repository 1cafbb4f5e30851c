use chrono::Utc;
use reqwest::Response;
use tokio::sync::Mutex;

use crate::error::{Error, Result};

/// Tracks the GitHub rate-limit budget reported in response headers.
///
/// Requests are rejected up front once the budget is known to be spent,
/// instead of sleeping until the window resets.
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

struct RateLimitState {
    remaining: Option<u32>,
    /// Unix timestamp (seconds) at which the budget resets.
    reset_at: Option<i64>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
            }),
        }
    }

    pub async fn check(&self) -> Result<()> {
        let state = self.state.lock().await;
        if state.remaining != Some(0) {
            return Ok(());
        }

        let now = Utc::now().timestamp();
        match state.reset_at {
            Some(reset_at) if reset_at > now => {
                let wait = (reset_at - now) as u64;
                tracing::warn!("GitHub rate limit exhausted, resets in {}s", wait);
                Err(Error::RateLimited(wait))
            }
            _ => Ok(()),
        }
    }

    pub async fn update_from_response(&self, response: &Response) {
        let headers = response.headers();
        let remaining = header_value::<u32>(headers, "x-ratelimit-remaining");
        let reset = header_value::<i64>(headers, "x-ratelimit-reset");

        if remaining.is_none() && reset.is_none() {
            return;
        }

        let mut state = self.state.lock().await;
        if remaining.is_some() {
            state.remaining = remaining;
        }
        if reset.is_some() {
            state.reset_at = reset;
        }
        tracing::debug!(
            remaining = ?state.remaining,
            reset_at = ?state.reset_at,
            "rate limit budget updated"
        );
    }

    /// Seconds until the budget resets, as last reported.
    pub async fn seconds_until_reset(&self) -> u64 {
        let state = self.state.lock().await;
        state
            .reset_at
            .map(|reset_at| (reset_at - Utc::now().timestamp()).max(0) as u64)
            .unwrap_or(0)
    }
}

fn header_value<T: std::str::FromStr>(headers: &reqwest::header::HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl RateLimiter {
    pub(crate) async fn set_budget(&self, remaining: u32, reset_at: i64) {
        let mut state = self.state.lock().await;
        state.remaining = Some(remaining);
        state.reset_at = Some(reset_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_limiter_allows_requests() {
        let limiter = RateLimiter::new();
        assert!(limiter.check().await.is_ok());
    }

    #[tokio::test]
    async fn test_exhausted_budget_fails_fast() {
        let limiter = RateLimiter::new();
        limiter.set_budget(0, Utc::now().timestamp() + 120).await;
        match limiter.check().await {
            Err(Error::RateLimited(secs)) => assert!(secs > 0 && secs <= 120),
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_budget_recovers_after_reset() {
        let limiter = RateLimiter::new();
        limiter.set_budget(0, Utc::now().timestamp() - 5).await;
        assert!(limiter.check().await.is_ok());
        assert_eq!(limiter.seconds_until_reset().await, 0);
    }
}
