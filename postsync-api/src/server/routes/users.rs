use crate::{
    server::{Result, ServerError, ServerRouter, json::Json},
    service::PostService,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use postsync_common::model::{Id, post::Post, user::UserMarker};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(get_user_posts)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}/posts", rejection(ServerError))]
struct GetUserPostsPath {
    id: Id<UserMarker>,
}

async fn get_user_posts(
    GetUserPostsPath { id }: GetUserPostsPath,
    State(posts): State<Arc<PostService>>,
) -> Result<Json<Vec<Post>>> {
    let user_posts = posts.get_user_posts(id).await?;

    Ok(Json(user_posts))
}
