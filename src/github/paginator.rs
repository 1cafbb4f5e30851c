use futures::future::try_join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::send_checked;
use crate::github::rate_limiter::RateLimiter;

pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    /// Fetch pages `1..=pages` concurrently and concatenate them in page
    /// order. Items are not de-duplicated across pages.
    pub async fn fetch_pages<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        pages: u32,
        resource: &str,
    ) -> Result<Vec<T>> {
        let separator = if base_url.contains('?') { "&" } else { "?" };

        let requests = (1..=pages.max(1)).map(|page| {
            let url = format!("{}{}per_page={}&page={}", base_url, separator, per_page, page);
            async move {
                tracing::debug!("Fetching: {}", url);
                let response = send_checked(self.client, self.rate_limiter, &url, resource).await?;
                let items: Vec<T> = response.json().await?;
                Ok::<_, crate::error::Error>(items)
            }
        });

        let results = try_join_all(requests).await?;
        Ok(results.into_iter().flatten().collect())
    }
}
