use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};

use crate::config::DEFAULT_GITHUB_API_URL;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::github::source::ProfileSource;
use crate::models::{Event, GitHubUser, Repository};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitscore/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: DEFAULT_GITHUB_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = send_checked(&self.client, &self.rate_limiter, &url, "user")
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::UserNotFound(username.to_string()),
                other => other,
            })?;

        Ok(response.json().await?)
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?sort=updated", self.base_url, username);
        tracing::info!("Fetching repositories for: {}", username);
        Paginator::new(&self.client, &self.rate_limiter)
            .fetch_pages(&url, 100, 1, "repositories")
            .await
    }

    pub async fn get_public_events(
        &self,
        username: &str,
        pages: u32,
        per_page: u32,
    ) -> Result<Vec<Event>> {
        let url = format!("{}/users/{}/events/public", self.base_url, username);
        tracing::info!("Fetching {} event page(s) for: {}", pages, username);
        Paginator::new(&self.client, &self.rate_limiter)
            .fetch_pages(&url, per_page, pages, "events")
            .await
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<GitHubUser> {
        self.get_user(username).await
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(username).await
    }

    async fn fetch_events(&self, username: &str, pages: u32, per_page: u32) -> Result<Vec<Event>> {
        self.get_public_events(username, pages, per_page).await
    }
}

/// Issue a GET and normalise the status: 404 becomes `NotFound`, 403 and
/// 429 become `RateLimited`, anything else unsuccessful is `GitHubApi`.
pub(crate) async fn send_checked(
    client: &Client,
    rate_limiter: &RateLimiter,
    url: &str,
    resource: &str,
) -> Result<Response> {
    rate_limiter.check().await?;

    let response = client.get(url).send().await?;
    rate_limiter.update_from_response(&response).await;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(Error::NotFound(resource.to_string())),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let wait = match retry_after {
                Some(secs) => secs,
                None => rate_limiter.seconds_until_reset().await,
            };
            tracing::warn!("GitHub throttled {} request ({})", resource, status);
            Err(Error::RateLimited(wait))
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(Error::GitHubApi(format!(
                "Failed to fetch {}: {} - {}",
                resource, status, body
            )))
        }
    }
}
