use crate::blog::PostID;
use crate::error::{Error, Result};
use crate::routes::identity::Authenticated;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct CommentForm {
    #[serde(default)]
    text: String,
}

pub(super) async fn get(
    State(state): SharedState,
    _auth: Authenticated,
    Path(post_id): Path<PostID>,
) -> Result<Html<String>> {
    let post = state.store.find_post(post_id).await?;
    crate::render::comment_form(&post)
}

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(session): Authenticated,
    Path(post_id): Path<PostID>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect> {
    let text = form.text.trim();
    if text.is_empty() {
        // still 404 for a missing post, before complaining about the text
        state.store.find_post(post_id).await?;
        return Err(Error::Validation("comment must not be blank".into()));
    }

    let comment = state
        .store
        .add_comment(post_id, &session.username, text)
        .await?;
    tracing::info!(post_id, comment_id = comment.id, author = %comment.author, "added comment");

    Ok(Redirect::to("/"))
}
