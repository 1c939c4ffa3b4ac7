use super::form::PostSubmission;
use crate::blog::{Post, PostID};
use crate::error::{Error, Result};
use crate::media::COVER_IMAGE_DIR;
use crate::routes::identity::Authenticated;
use crate::state::{SharedState, State as AppState};
use crate::store::post::PostChanges;
use axum::extract::{Multipart, Path, State};
use axum::response::{Html, Redirect};

/// Only the author may edit or delete a post; everyone else gets
/// [`Error::Forbidden`], including anonymous requests.
pub(super) async fn authored_post(
    state: &AppState,
    auth: Option<Authenticated>,
    post_id: PostID,
) -> Result<(Post, String)> {
    let Some(Authenticated(session)) = auth else {
        return Err(Error::Forbidden);
    };

    let post = state.store.find_post(post_id).await?;
    if !post.is_authored_by(&session.username) {
        return Err(Error::Forbidden);
    }

    Ok((post, session.username))
}

pub(super) async fn get(
    State(state): SharedState,
    auth: Option<Authenticated>,
    Path(post_id): Path<PostID>,
) -> Result<Html<String>> {
    let (post, _) = authored_post(&state, auth, post_id).await?;

    let categories = state.store.categories().await;
    crate::render::post_form(
        &format!("/post/{post_id}/update"),
        Some(&post),
        &categories,
    )
}

pub(super) async fn post(
    State(state): SharedState,
    auth: Option<Authenticated>,
    Path(post_id): Path<PostID>,
    multipart: Multipart,
) -> Result<Redirect> {
    let (_, username) = authored_post(&state, auth, post_id).await?;
    let submission = PostSubmission::read(multipart).await?;

    let category = match submission.new_category.or(submission.category) {
        Some(name) => Some(state.store.get_or_create_category(&name).await?.id),
        None => None,
    };

    let media_root = &state.config.media_root;
    let cover = match submission.image {
        Some(upload) => crate::media::store_thumbnails(media_root, COVER_IMAGE_DIR, vec![upload])
            .await?
            .pop(),
        None => None,
    };

    let updated = state
        .store
        .update_post(
            post_id,
            PostChanges {
                title: submission.title,
                content: submission.content,
                category,
                image: cover.clone(),
            },
        )
        .await;

    let (post, replaced_cover) = match updated {
        Ok(it) => it,
        Err(err) => {
            if let Some(cover) = &cover {
                crate::media::remove(media_root, cover).await;
            }
            return Err(err);
        }
    };

    if let Some(replaced_cover) = replaced_cover {
        crate::media::remove(media_root, &replaced_cover).await;
    }

    tracing::info!(post_id = post.id, author = %username, "updated post");

    Ok(Redirect::to(&format!("/post/{post_id}")))
}
