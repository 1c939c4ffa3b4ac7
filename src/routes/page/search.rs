use crate::error::Result;
use crate::state::SharedState;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    query: String,
}

/// Unpaginated; see [`crate::search::search`] for how the query is matched.
pub(super) async fn get(
    State(state): SharedState,
    Query(SearchQuery { query }): Query<SearchQuery>,
) -> Result<Html<String>> {
    let results = crate::search::search(&state.store, &query).await;
    tracing::debug!(%query, results = results.len(), "search");

    crate::render::search_results(&query, &state.store.summarize(&results).await)
}
