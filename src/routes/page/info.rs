use crate::error::Result;
use axum::response::Html;

pub(super) async fn intro() -> Result<Html<String>> {
    crate::render::intro()
}

pub(super) async fn about() -> Result<Html<String>> {
    crate::render::about()
}
