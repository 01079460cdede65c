use crate::{connection::ConnectionProvider, record::PostRecord};
use async_trait::async_trait;
use postsync_common::model::{
    Id, ModelValidationError,
    post::{NewPost, Post},
    report::WriteReport,
    user::UserMarker,
};
use sqlx::{migrate::MigrateError, query, query_as};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] MigrateError),
}

/// Data access for the `posts` table. No validation happens here.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Stores a single post. A statement that runs but touches no rows is
    /// reported through the returned [`WriteReport`], not as an error.
    async fn insert_post(&self, post: &NewPost) -> Result<WriteReport>;

    async fn fetch_user_posts(&self, user_id: Id<UserMarker>) -> Result<Vec<Post>>;

    /// Every stored post, in whatever order the database returns them.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
}

#[derive(Debug)]
pub struct DbClient {
    connections: Arc<ConnectionProvider>,
}

impl DbClient {
    #[must_use]
    pub fn new(connections: Arc<ConnectionProvider>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl PostRepository for DbClient {
    async fn insert_post(&self, post: &NewPost) -> Result<WriteReport> {
        let pool = self.connections.get_connection().await?;

        let result = query(
            "
            INSERT INTO posts (userId, title, body)
            VALUES (?, ?, ?)
            ",
        )
        .bind(post.user_id.get())
        .bind(&post.title)
        .bind(&post.body)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            debug!(id = result.last_insert_id(), "Inserted post");
            Ok(WriteReport::success("Post created successfully."))
        } else {
            warn!(user_id = %post.user_id, "Insert affected no rows");
            Ok(WriteReport::error("Failed to create post."))
        }
    }

    async fn fetch_user_posts(&self, user_id: Id<UserMarker>) -> Result<Vec<Post>> {
        let pool = self.connections.get_connection().await?;

        let records = query_as::<_, PostRecord>(
            "
            SELECT
                posts.id,
                posts.userId,
                posts.title,
                posts.body
            FROM
                posts
            WHERE
                posts.userId = ?
            ",
        )
        .bind(user_id.get())
        .fetch_all(pool)
        .await?;

        let posts = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        Ok(posts)
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let pool = self.connections.get_connection().await?;

        let records = query_as::<_, PostRecord>(
            "
            SELECT
                posts.id,
                posts.userId,
                posts.title,
                posts.body
            FROM
                posts
            ",
        )
        .fetch_all(pool)
        .await?;

        let posts = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        Ok(posts)
    }
}
