use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Event, GitHubUser, Repository};

/// Where profile, repository and event data come from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fails with `Error::UserNotFound` when the login does not exist.
    async fn fetch_profile(&self, username: &str) -> Result<GitHubUser>;
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>>;
    /// Newest first. Pages are concatenated in order.
    async fn fetch_events(&self, username: &str, pages: u32, per_page: u32) -> Result<Vec<Event>>;
}
