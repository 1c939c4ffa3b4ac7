use crate::blog::PostID;
use crate::error::Result;
use crate::routes::identity::Authenticated;
use crate::state::SharedState;
use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(super) struct ReactionForm {
    post_id: PostID,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LikeState {
    is_liked: bool,
    total_likes: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DislikeState {
    is_disliked: bool,
    total_dislikes: usize,
}

pub(super) async fn like(
    State(state): SharedState,
    Authenticated(session): Authenticated,
    Form(form): Form<ReactionForm>,
) -> Result<Json<LikeState>> {
    let toggle = state
        .store
        .toggle_like(form.post_id, &session.username)
        .await?;

    Ok(Json(LikeState {
        is_liked: toggle.active,
        total_likes: toggle.total,
    }))
}

pub(super) async fn dislike(
    State(state): SharedState,
    Authenticated(session): Authenticated,
    Form(form): Form<ReactionForm>,
) -> Result<Json<DislikeState>> {
    let toggle = state
        .store
        .toggle_dislike(form.post_id, &session.username)
        .await?;

    Ok(Json(DislikeState {
        is_disliked: toggle.active,
        total_dislikes: toggle.total,
    }))
}
