use crate::blog::POSTS_PER_PAGE;
use crate::error::Result;
use crate::routes::PageQuery;
use crate::search::{page_number, Paginator};
use crate::state::SharedState;
use axum::extract::{Query, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let posts = state.store.posts_latest_first().await;
    let paginator = Paginator::new(POSTS_PER_PAGE);
    let page = paginator.page(&posts, page_number(query.page.as_deref()));

    let summaries = state.store.summarize(page.items).await;
    let summary_page = crate::search::Page {
        items: &summaries,
        number: page.number,
        num_pages: page.num_pages,
    };

    crate::render::home(&summary_page)
}
