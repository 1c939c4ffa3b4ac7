use crate::auth::Auth;
use crate::error::{Error, Result};
use crate::routes::identity::with_session_cookie;
use crate::state::SharedState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct SignupOptions {
    username: String,
    password: String,
}

pub(super) async fn post(
    State(state): SharedState,
    Json(request): Json<SignupOptions>,
) -> Result<Response> {
    request.validate()?;

    let auth = Auth::register(&state.store, &request.username, request.password).await?;
    let session_id = state.start_session(request.username, auth).await;

    Ok((
        StatusCode::CREATED,
        with_session_cookie(session_id),
    )
        .into_response())
}

impl SignupOptions {
    fn validate(&self) -> Result<()> {
        static USERNAME_PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

        let username_pattern = USERNAME_PATTERN.get_or_init(|| {
            regex::Regex::new(r"^[a-zA-Z0-9-_]+$").expect("constant pattern should parse")
        });

        if !username_pattern.is_match(&self.username) {
            return Err(Error::Validation(
                "usernames may only contain letters, digits, '-' and '_'".into(),
            ));
        }
        if self.password.is_empty() {
            return Err(Error::Validation("password must not be empty".into()));
        }

        Ok(())
    }
}
