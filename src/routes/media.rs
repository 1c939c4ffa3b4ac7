use crate::error::{Error, Result};
use crate::state::SharedState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

pub(super) async fn get(
    State(state): SharedState,
    Path(requested): Path<String>,
) -> Result<Response> {
    let file_path =
        crate::media::resolve(&state.config.media_root, &requested).ok_or(Error::NotFound)?;

    let file = match tokio::fs::File::open(&file_path).await {
        Ok(it) => it,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(Error::NotFound),
        Err(err) => return Err(err.into()),
    };
    if !file.metadata().await?.is_file() {
        return Err(Error::NotFound);
    }
    let body = Body::from_stream(ReaderStream::new(file));

    if let Some(mime_guess) = new_mime_guess::from_path(&file_path).first() {
        Ok(([(CONTENT_TYPE, mime_guess.to_string())], body).into_response())
    } else {
        Ok(body.into_response())
    }
}
