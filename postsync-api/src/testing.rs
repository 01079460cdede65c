use crate::service::feed::ExternalFeed;
use async_trait::async_trait;
use axum::Router;
use postsync_common::model::{
    Id,
    post::{NewPost, Post},
    report::WriteReport,
    user::UserMarker,
};
use postsync_db::client::{DbError, PostRepository, Result};
use std::sync::Mutex;

/// In-memory stand-in for the posts table.
///
/// `fail_after` makes every insert past that many stored rows (and every
/// read) error out, `reject_after` turns inserts past that many rows into
/// soft failures.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    rows: Mutex<Vec<Post>>,
    fail_after: Option<usize>,
    reject_after: Option<usize>,
}

impl MemoryPostRepository {
    pub fn failing() -> Self {
        Self::failing_after(0)
    }

    pub fn failing_after(rows: usize) -> Self {
        Self {
            fail_after: Some(rows),
            ..Self::default()
        }
    }

    pub fn rejecting_after(rows: usize) -> Self {
        Self {
            reject_after: Some(rows),
            ..Self::default()
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.rows.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<()> {
        match self.fail_after {
            Some(0) => Err(DbError::Sqlx(sqlx::Error::PoolTimedOut)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert_post(&self, post: &NewPost) -> Result<WriteReport> {
        let mut rows = self.rows.lock().unwrap();

        if self.fail_after.is_some_and(|limit| rows.len() >= limit) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        if self.reject_after.is_some_and(|limit| rows.len() >= limit) {
            return Ok(WriteReport::error("Failed to create post."));
        }

        let id = i64::try_from(rows.len()).unwrap() + 1;
        rows.push(Post {
            id: Id::new(id),
            user_id: post.user_id,
            title: post.title.clone(),
            body: post.body.clone(),
        });

        Ok(WriteReport::success("Post created successfully."))
    }

    async fn fetch_user_posts(&self, user_id: Id<UserMarker>) -> Result<Vec<Post>> {
        self.check_reads()?;

        Ok(self
            .posts()
            .into_iter()
            .filter(|post| post.user_id == user_id)
            .collect())
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.check_reads()?;

        Ok(self.posts())
    }
}

fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Serves `router` on an ephemeral local port and returns a feed pointed at it.
pub async fn serve_feed(router: Router) -> ExternalFeed {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    ExternalFeed::with_client(local_client(), &format!("http://{address}"))
}

/// A feed nothing listens on.
pub fn unreachable_feed() -> ExternalFeed {
    ExternalFeed::with_client(local_client(), "http://127.0.0.1:1")
}
