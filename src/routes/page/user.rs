use crate::error::Result;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Path(username): Path<String>,
) -> Result<Html<String>> {
    let profile_user = state.store.find_user(&username).await?;
    let posts = state.store.posts_by_author(&username).await;

    crate::render::profile(&profile_user, &state.store.summarize(&posts).await)
}
