use crate::blog::PostID;
use crate::error::Result;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Path(post_id): Path<PostID>,
) -> Result<Html<String>> {
    let post = state.store.find_post(post_id).await?;

    let category = match post.category {
        Some(category_id) => state.store.find_category(category_id).await,
        None => None,
    };
    let images = state.store.images_for_post(post_id).await;
    let comments = state.store.comments_for_post(post_id).await;

    crate::render::post_detail(&post, category.as_ref(), &images, &comments)
}
