use crate::state::NestedRouter;
use axum::routing::{get, post};

mod posts;
mod reaction;
mod session;
mod signup;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/posts", get(posts::get))
        .route("/like", post(reaction::like))
        .route("/dislike", post(reaction::dislike))
        .route("/session", post(session::post))
        .route("/signup", post(signup::post))
}
