use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRequest {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthLabel {
    pub month: String,
    pub week_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub date: String,
    pub photo_count: u8,
    pub is_future: bool,
    pub is_today: bool,
    pub label: String,
}

/// `rows[weekday][week]`, Sunday first. `None` pads cells outside the year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapResponse {
    pub year: i32,
    pub years: Vec<i32>,
    pub total_days: usize,
    pub weeks: usize,
    pub months: Vec<MonthLabel>,
    pub rows: Vec<Vec<Option<HeatmapCell>>>,
}
