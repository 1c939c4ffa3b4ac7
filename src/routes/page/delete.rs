use super::update::authored_post;
use crate::blog::PostID;
use crate::error::Result;
use crate::routes::identity::Authenticated;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};

pub(super) async fn get(
    State(state): SharedState,
    auth: Option<Authenticated>,
    Path(post_id): Path<PostID>,
) -> Result<Html<String>> {
    let (post, _) = authored_post(&state, auth, post_id).await?;
    crate::render::delete_confirm(&post)
}

pub(super) async fn post(
    State(state): SharedState,
    auth: Option<Authenticated>,
    Path(post_id): Path<PostID>,
) -> Result<Redirect> {
    let (_, username) = authored_post(&state, auth, post_id).await?;
    let (post, images) = state.store.delete_post(post_id).await?;

    let media_root = &state.config.media_root;
    for stored in post.image.iter().chain(images.iter().map(|image| &image.image)) {
        crate::media::remove(media_root, stored).await;
    }

    tracing::info!(post_id, author = %username, "deleted post");

    Ok(Redirect::to("/"))
}
