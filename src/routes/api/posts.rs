use crate::blog::{PostSummary, POSTS_PER_PAGE};
use crate::routes::PageQuery;
use crate::search::{page_number, Paginator};
use crate::state::SharedState;
use axum::extract::{Query, State};
use axum::Json;

/// Newest first, six to a page; past the last page the array is empty.
pub(super) async fn get(
    State(state): SharedState,
    Query(query): Query<PageQuery>,
) -> Json<Vec<PostSummary>> {
    let posts = state.store.posts_latest_first().await;
    let page = Paginator::new(POSTS_PER_PAGE).page(&posts, page_number(query.page.as_deref()));

    Json(state.store.summarize(page.items).await)
}
