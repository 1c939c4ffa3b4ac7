use axum::ServiceExt;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod auth;
mod blog;
mod config;
mod error;
mod media;
mod render;
mod routes;
mod search;
mod state;
mod store;
mod thumbnail;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing(config::json_logs_from_env());
    let config = config::Config::from_env();

    let store = match config.store_path.as_deref() {
        Some(store_path) => store::Store::open(store_path)
            .await
            .expect("store should load"),
        None => {
            tracing::warn!("BLOG_STORE_PATH is unset, nothing will be saved to disk");
            store::Store::in_memory()
        }
    };
    tokio::fs::create_dir_all(&config.media_root)
        .await
        .expect("media root should be creatable");

    let bind_addr = config.bind_addr;
    let state = Arc::new(state::State::new(store, config));
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("bind address should be available");
    tracing::info!(%bind_addr, "listening");

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await
    .expect("Error serving app")
}

fn init_tracing(json_logs: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,blog_board=debug"));

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
