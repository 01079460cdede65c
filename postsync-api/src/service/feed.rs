use postsync_common::model::post::NewPost;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Fetching external posts failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the third-party API that posts are synced from.
#[derive(Clone, Debug)]
pub struct ExternalFeed {
    client: reqwest::Client,
    posts_url: String,
}

impl ExternalFeed {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let posts_url = format!("{}/posts", base_url.trim_end_matches('/'));
        Self { client, posts_url }
    }

    #[must_use]
    pub fn posts_url(&self) -> &str {
        &self.posts_url
    }

    pub async fn fetch_posts(&self) -> Result<Vec<NewPost>, FeedError> {
        debug!(url = %self.posts_url, "Fetching external posts");

        let posts = self
            .client
            .get(&self.posts_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(posts)
    }
}
