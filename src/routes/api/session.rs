use crate::auth::Auth;
use crate::error::{Error, Result};
use crate::routes::identity::with_session_cookie;
use crate::state::SharedState;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

pub(super) async fn post(
    State(state): SharedState,
    Json(login_credentials): Json<LoginCredentials>,
) -> Result<Response> {
    let Some(auth) = Auth::validate(
        &state.store,
        &login_credentials.username,
        login_credentials.password,
    )
    .await?
    else {
        tracing::info!(username = %login_credentials.username, "rejected login");
        return Err(Error::Unauthorized);
    };

    let session_id = state
        .start_session(login_credentials.username, auth)
        .await;

    Ok(with_session_cookie(session_id))
}
