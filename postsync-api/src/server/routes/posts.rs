use crate::{
    server::{
        Result, ServerError, ServerRouter,
        json::{Created, Json},
    },
    service::PostService,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use postsync_common::model::{
    Id,
    post::{Post, PostDraft},
    report::WriteReport,
    user::UserMarker,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(sync_external_posts)
        .typed_get(get_posts)
        .typed_post(create_post)
        .typed_get(get_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/sync/external", rejection(ServerError))]
struct SyncExternalPath();

async fn sync_external_posts(
    SyncExternalPath(): SyncExternalPath,
    State(posts): State<Arc<PostService>>,
) -> Result<Json<WriteReport>> {
    let report = posts.fetch_and_store_posts().await?;

    Ok(Json(report))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct PostsPath();

async fn get_posts(
    PostsPath(): PostsPath,
    State(posts): State<Arc<PostService>>,
) -> Result<Json<Vec<Post>>> {
    let all_posts = posts.get_all_posts().await?;

    Ok(Json(all_posts))
}

async fn create_post(
    PostsPath(): PostsPath,
    State(posts): State<Arc<PostService>>,
    Json(draft): Json<PostDraft>,
) -> Result<Created<WriteReport>> {
    let report = posts.create_post(draft).await?;

    Ok(Created(report))
}

/// The id segment is matched against post owners, see
/// [`PostService::get_post_by_id`].
#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct GetPostPath {
    id: Id<UserMarker>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(posts): State<Arc<PostService>>,
) -> Result<Json<Post>> {
    let post = posts
        .get_post_by_id(id)
        .await?
        .ok_or(ServerError::PostNotFound)?;

    Ok(Json(post))
}
