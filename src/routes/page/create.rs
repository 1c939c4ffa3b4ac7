use super::form::PostSubmission;
use crate::error::{Error, Result};
use crate::media::{BLOG_IMAGE_DIR, COVER_IMAGE_DIR};
use crate::routes::identity::Authenticated;
use crate::state::SharedState;
use crate::store::post::NewPost;
use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};

pub(super) async fn get(
    State(state): SharedState,
    auth: Option<Authenticated>,
) -> Result<Html<String>> {
    if auth.is_none() {
        return Err(Error::Forbidden);
    }

    let categories = state.store.categories().await;
    crate::render::post_form("/post/new", None, &categories)
}

/// Images that fail to thumbnail are dropped; the post is created regardless.
pub(super) async fn post(
    State(state): SharedState,
    auth: Option<Authenticated>,
    multipart: Multipart,
) -> Result<Redirect> {
    let Some(Authenticated(session)) = auth else {
        return Err(Error::Forbidden);
    };
    let submission = PostSubmission::read(multipart).await?;

    let category = match (&submission.new_category, &submission.category) {
        (Some(new_category), _) => Some(state.store.get_or_create_category(new_category).await?),
        (None, Some(existing)) => Some(
            state
                .store
                .find_category_by_name(existing)
                .await
                .ok_or_else(|| Error::Validation(format!("unknown category {existing:?}")))?,
        ),
        (None, None) => None,
    };

    let media_root = &state.config.media_root;
    let cover = match submission.image {
        Some(upload) => crate::media::store_thumbnails(media_root, COVER_IMAGE_DIR, vec![upload])
            .await?
            .pop(),
        None => None,
    };
    let image_paths =
        crate::media::store_thumbnails(media_root, BLOG_IMAGE_DIR, submission.images).await?;

    let created = state
        .store
        .create_post(
            NewPost {
                title: submission.title,
                content: submission.content,
                author: Some(session.username.clone()),
                category: category.map(|category| category.id),
                image: cover.clone(),
            },
            image_paths.clone(),
        )
        .await;

    let (post, images) = match created {
        Ok(it) => it,
        Err(err) => {
            for stored in cover.iter().chain(&image_paths) {
                crate::media::remove(media_root, stored).await;
            }
            return Err(err);
        }
    };

    tracing::info!(
        post_id = post.id,
        author = %session.username,
        images = images.len(),
        "created post"
    );

    Ok(Redirect::to("/"))
}
