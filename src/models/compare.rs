use serde::{Deserialize, Serialize};

use super::PhotoKind;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub view: Option<PhotoKind>,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSide {
    pub date: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub view: PhotoKind,
    /// Dates with a photo for `view`, newest first.
    pub dates: Vec<String>,
    pub before: Option<CompareSide>,
    pub after: Option<CompareSide>,
    pub can_compare: bool,
}
