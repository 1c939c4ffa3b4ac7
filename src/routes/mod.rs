use crate::state::{NestedRouter, State};
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod identity;
mod media;
pub mod page;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

pub fn route() -> NestedRouter {
    let image_compression_layer = tower_http::compression::CompressionLayer::new()
        .br(true)
        .quality(tower_http::CompressionLevel::Best);

    axum::Router::new()
        .merge(page::route())
        .nest("/api", api::route())
        .route(
            "/media/*path",
            get(media::get).layer(image_compression_layer),
        )
}

pub fn app(state: Arc<State>) -> NormalizePath<axum::Router> {
    let cors = cors_layer(state.config.cors_origin.as_deref());
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    NormalizePathLayer::trim_trailing_slash().layer(
        route()
            .with_state(state)
            .layer(body_limit)
            .layer(cors)
            .layer(TraceLayer::new_for_http()),
    )
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::new();
    };

    match axum::http::HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::exact(origin))
            .allow_headers(tower_http::cors::Any),
        Err(err) => {
            tracing::warn!(%origin, error = %err, "ignoring invalid CORS origin");
            CorsLayer::new()
        }
    }
}
