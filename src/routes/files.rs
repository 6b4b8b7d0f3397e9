use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use crate::auth::AppState;
use crate::error::{AppError, AppResult};
use crate::storage::catalog::find_object;

pub fn router() -> Router<AppState> {
    Router::new().route("/files/*key", get(download_file))
}

#[derive(Deserialize)]
struct DownloadQuery {
    token: Option<String>,
}

/// Streams a catalogued object. Unknown keys and wrong tokens look the same.
async fn download_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Response> {
    let not_found = || AppError::NotFound("File not found".to_string());

    let object = {
        let conn = state.pool.get().map_err(AppError::Pool)?;
        find_object(&conn, &key)?.ok_or_else(not_found)?
    };

    if query.token.as_deref() != Some(object.download_token.as_str()) {
        return Err(not_found());
    }

    let reader = state.store.open(&object.key).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, object.content_type)
        .header(header::CONTENT_LENGTH, object.size_bytes)
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::storage::catalog::record_object;
    use crate::storage::ObjectStore;
    use crate::test_utils::{create_test_app, TestApp};
    use axum::http::StatusCode;

    const KEY: &str = "photos/user-1/2024-01-01/front.jpg";

    async fn stored_token(app: &TestApp) -> String {
        app.store().put(KEY, b"jpeg bytes").await.unwrap();
        let conn = app.pool.get().unwrap();
        record_object(&conn, KEY, "image/jpeg", b"jpeg bytes")
            .unwrap()
            .download_token
    }

    #[tokio::test]
    async fn test_download_with_valid_token() {
        let app = create_test_app();
        let token = stored_token(&app).await;

        let response = app
            .server
            .get(&format!("/api/v1/files/{}", KEY))
            .add_query_param("token", &token)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.header("content-type"), "image/jpeg");
        assert_eq!(&response.as_bytes()[..], b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_wrong_or_missing_token_is_not_found() {
        let app = create_test_app();
        stored_token(&app).await;

        let wrong = app
            .server
            .get(&format!("/api/v1/files/{}", KEY))
            .add_query_param("token", "guess")
            .await;
        assert_eq!(wrong.status_code(), StatusCode::NOT_FOUND);

        let missing = app.server.get(&format!("/api/v1/files/{}", KEY)).await;
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_found() {
        let app = create_test_app();

        let response = app
            .server
            .get("/api/v1/files/photos/nobody/2024-01-01/back.jpg")
            .add_query_param("token", "anything")
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
