use crate::state::NestedRouter;
use axum::routing::get;

mod comment;
mod create;
mod delete;
mod form;
mod home;
mod info;
mod post;
mod search;
mod update;
mod user;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/", get(home::get))
        .route("/intro", get(info::intro))
        .route("/about", get(info::about))
        .route("/search", get(search::get))
        .route("/user/:username", get(user::get))
        .route("/post/new", get(create::get).post(create::post))
        .route("/post/:id", get(post::get))
        .route("/post/:id/update", get(update::get).post(update::post))
        .route("/post/:id/delete", get(delete::get).post(delete::post))
        .route("/post/:id/comment", get(comment::get).post(comment::post))
}
