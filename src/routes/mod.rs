mod compare;
mod files;
mod heatmap;
mod photos;
mod public;
mod share;

use axum::body::Bytes;
use axum::Router;
use serde::de::DeserializeOwned;

use crate::auth::AppState;
use crate::error::{AppError, AppResult};

/// JSON body whose fields are all optional: an empty body means defaults,
/// anything else must parse.
pub(crate) fn optional_json_body<T>(body: &Bytes) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(photos::router())
        .merge(heatmap::router())
        .merge(compare::router())
        .merge(share::router())
        .merge(public::router())
        .merge(files::router())
}
