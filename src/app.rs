use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::AppState;
use crate::config::Config;
use crate::constants::API_PREFIX;
use crate::database::DbPool;
use crate::logging::request_logger;
use crate::routes::api_router;
use crate::storage::ObjectStore;
use crate::VERSION;

#[derive(Serialize)]
struct HealthcheckResponse {
    status: String,
    version: String,
}

async fn healthcheck() -> Json<HealthcheckResponse> {
    Json(HealthcheckResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

pub fn create_app(config: Arc<Config>, pool: DbPool, store: Arc<dyn ObjectStore>) -> Router {
    let body_limit = config.storage.max_upload_bytes;
    let state = AppState {
        config,
        pool,
        store,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/healthcheck", get(healthcheck))
        .merge(api_router());

    let mut app = Router::new()
        .nest(API_PREFIX, api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state);

    // Serve the web frontend when it is bundled next to the API
    let static_dir = std::env::var("PROGRESS_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("../web/dist"));

    if static_dir.exists() {
        app = app.fallback(move |req: Request<Body>| {
            let static_dir = static_dir.clone();
            async move {
                let path = req.uri().path().trim_start_matches('/');

                if path.starts_with("api/") {
                    return (StatusCode::NOT_FOUND, "Not Found").into_response();
                }

                let file_path = static_dir.join(path);
                if !path.contains("..") && file_path.is_file() {
                    return serve_static_file(file_path).await;
                }

                // SPA routes resolve to index.html
                let index_path = static_dir.join("index.html");
                if index_path.is_file() {
                    return serve_static_file(index_path).await;
                }

                (StatusCode::NOT_FOUND, "Not Found").into_response()
            }
        });
    }

    app
}

async fn serve_static_file(path: PathBuf) -> Response {
    match tokio::fs::read(&path).await {
        Ok(contents) => {
            let mime_type = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();

            ([(header::CONTENT_TYPE, mime_type)], contents).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_healthcheck() {
        let app = create_test_app();

        let response = app.server.get("/api/v1/healthcheck").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], crate::VERSION);
    }

    #[tokio::test]
    async fn test_errors_render_as_json() {
        let app = create_test_app();

        let response = app.server.post("/api/v1/share/get").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Not authenticated");
    }
}
