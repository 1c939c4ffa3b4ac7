use crate::blog::SessionID;
use crate::error::Error;
use crate::state::session::Session;
use crate::state::State;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "session";

/// The live session of the user making the request, taken from an
/// `Authorization: Bearer` header or else the `session` cookie. Missing,
/// unknown and expired sessions reject with [`Error::Unauthorized`].
#[derive(Debug, Clone)]
pub struct Authenticated(pub Session);

#[axum::async_trait]
impl FromRequestParts<Arc<State>> for Authenticated {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<State>) -> Result<Self, Error> {
        let session_id =
            match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
                Ok(TypedHeader(Authorization(bearer))) => bearer.token().to_owned(),
                Err(_) => CookieJar::from_headers(&parts.headers)
                    .get(SESSION_COOKIE)
                    .map(|cookie| cookie.value().to_owned())
                    .ok_or(Error::Unauthorized)?,
            };

        let session = state
            .resolve_session(&session_id)
            .await
            .ok_or(Error::Unauthorized)?;

        Ok(Authenticated(session))
    }
}

/// Responds with the session ID as the body and also sets it as a cookie.
pub fn with_session_cookie(session_id: SessionID) -> Response {
    let cookie = Cookie::build((SESSION_COOKIE, session_id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (CookieJar::new().add(cookie), session_id).into_response()
}
