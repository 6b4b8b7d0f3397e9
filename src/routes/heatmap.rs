use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use crate::auth::{AppState, CurrentUser};
use crate::error::{AppError, AppResult};
use crate::models::{HeatmapRequest, HeatmapResponse, PhotoEntry};
use crate::routes::optional_json_body;
use crate::routes::photos::load_entries;
use crate::utils::calendar::{build_heatmap, is_supported_year, DaySummary, MAX_YEAR, MIN_YEAR};
use crate::utils::datetime::today;

pub fn router() -> Router<AppState> {
    Router::new().route("/heatmap/year", post(year_heatmap))
}

pub(crate) fn heatmap_for(
    entries: &[PhotoEntry],
    year: Option<i32>,
    include_previous_year: bool,
) -> AppResult<HeatmapResponse> {
    if let Some(year) = year.filter(|y| !is_supported_year(*y)) {
        return Err(AppError::Validation(format!(
            "Year {} is outside {}..={}",
            year, MIN_YEAR, MAX_YEAR
        )));
    }

    let days: Vec<DaySummary> = entries.iter().filter_map(DaySummary::from_entry).collect();
    Ok(build_heatmap(year, &days, today(), include_previous_year))
}

async fn year_heatmap(
    State(state): State<AppState>,
    current_user: CurrentUser,
    body: Bytes,
) -> AppResult<Json<HeatmapResponse>> {
    let request: HeatmapRequest = optional_json_body(&body)?;

    let conn = state.pool.get().map_err(AppError::Pool)?;
    let entries = load_entries(&conn, &current_user.id, &state.config.server.public_url)?;

    Ok(Json(heatmap_for(&entries, request.year, true)?))
}
