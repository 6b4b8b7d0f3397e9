use crate::auth::jwt::decode_access_token;
use crate::config::Config;
use crate::database::DbPool;
use crate::error::AppError;
use crate::storage::ObjectStore;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: DbPool,
    pub store: Arc<dyn ObjectStore>,
}

/// The caller, as asserted by a verified identity-provider token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

fn query_token(parts: &Parts) -> Option<String> {
    parts
        .uri
        .query()
        .and_then(|query| serde_urlencoded::from_str::<TokenQuery>(query).ok())
        .and_then(|params| params.access_token)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts)
            .or_else(|| query_token(parts))
            .ok_or_else(|| AppError::Authentication("Not authenticated".to_string()))?;

        let claims = decode_access_token(&token, &app_state.config).map_err(|e| match e {
            AppError::Internal(msg) => AppError::Internal(msg),
            _ => AppError::Authentication("Invalid or expired token".to_string()),
        })?;

        Ok(CurrentUser { id: claims.sub })
    }
}
