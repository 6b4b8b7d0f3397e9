use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use crate::auth::{AppState, CurrentUser};
use crate::error::{AppError, AppResult};
use crate::models::{CompareRequest, CompareResponse, PhotoEntry, PhotoKind};
use crate::routes::optional_json_body;
use crate::routes::photos::{load_entries, require_date};
use crate::utils::compare::build_comparison;
use crate::utils::datetime::format_date;

pub fn router() -> Router<AppState> {
    Router::new().route("/compare", post(compare_photos))
}

fn normalize_date(value: Option<&str>) -> AppResult<Option<String>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Ok(Some(format_date(require_date(value)?))),
        None => Ok(None),
    }
}

pub(crate) fn comparison_for(
    entries: &[PhotoEntry],
    view: Option<PhotoKind>,
    before: Option<&str>,
    after: Option<&str>,
) -> AppResult<CompareResponse> {
    let before = normalize_date(before)?;
    let after = normalize_date(after)?;

    Ok(build_comparison(
        entries,
        view.unwrap_or(PhotoKind::Front),
        before.as_deref(),
        after.as_deref(),
    ))
}

async fn compare_photos(
    State(state): State<AppState>,
    current_user: CurrentUser,
    body: Bytes,
) -> AppResult<Json<CompareResponse>> {
    let request: CompareRequest = optional_json_body(&body)?;

    let conn = state.pool.get().map_err(AppError::Pool)?;
    let entries = load_entries(&conn, &current_user.id, &state.config.server.public_url)?;

    Ok(Json(comparison_for(
        &entries,
        request.view,
        request.before.as_deref(),
        request.after.as_deref(),
    )?))
}
