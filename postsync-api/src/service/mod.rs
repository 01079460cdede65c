use axum::http::StatusCode;
use feed::{ExternalFeed, FeedError};
use postsync_common::model::{
    Id,
    post::{InvalidPostError, NewPost, Post, PostDraft},
    report::WriteReport,
    user::UserMarker,
};
use postsync_db::client::{DbError, PostRepository};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

pub mod feed;

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidPost(#[from] InvalidPostError),
    /// Anything the database reports while creating a post is surfaced as a
    /// client error, matching what callers of the create endpoint expect.
    #[error("{0}")]
    CreateFailed(DbError),
    #[error(transparent)]
    Persistence(#[from] DbError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("Storing synced post {index} was rejected: {message}")]
    SyncInsertRejected { index: usize, message: String },
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidPost(_) | ServiceError::CreateFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Persistence(_)
            | ServiceError::Feed(_)
            | ServiceError::SyncInsertRejected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct PostService {
    repository: Arc<dyn PostRepository>,
    feed: ExternalFeed,
}

impl PostService {
    #[must_use]
    pub fn new(repository: Arc<dyn PostRepository>, feed: ExternalFeed) -> Self {
        Self { repository, feed }
    }

    #[instrument(skip_all)]
    pub async fn create_post(&self, draft: PostDraft) -> Result<WriteReport> {
        let post = NewPost::try_from(draft)?;

        self.repository
            .insert_post(&post)
            .await
            .map_err(ServiceError::CreateFailed)
    }

    /// Looks the id up as an owner id and returns that owner's first post.
    ///
    /// This is not a primary key lookup: `/posts/1` answers with the first
    /// post of user 1, whatever its own id is.
    #[instrument(skip(self))]
    pub async fn get_post_by_id(&self, id: Id<UserMarker>) -> Result<Option<Post>> {
        let posts = self.repository.fetch_user_posts(id).await?;

        Ok(posts.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn get_user_posts(&self, user_id: Id<UserMarker>) -> Result<Vec<Post>> {
        Ok(self.repository.fetch_user_posts(user_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_all_posts(&self) -> Result<Vec<Post>> {
        Ok(self.repository.fetch_posts().await?)
    }

    /// Pulls the external feed and stores its records one at a time, in feed
    /// order. The first failed insert stops the sync; posts stored before it
    /// stay in place.
    #[instrument(skip(self))]
    pub async fn fetch_and_store_posts(&self) -> Result<WriteReport> {
        let posts = self.feed.fetch_posts().await?;
        info!(count = posts.len(), "Fetched external posts");

        for (index, post) in posts.iter().enumerate() {
            let report = self.repository.insert_post(post).await?;
            if !report.is_success() {
                return Err(ServiceError::SyncInsertRejected {
                    index,
                    message: report.message,
                });
            }
        }

        info!(count = posts.len(), "Stored external posts");
        Ok(WriteReport::success("Posts fetched and stored successfully."))
    }
}
