use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePermissions {
    pub show_graph: bool,
    pub show_photos: bool,
    pub show_compare: bool,
}

impl Default for SharePermissions {
    fn default() -> Self {
        Self {
            show_graph: true,
            show_photos: true,
            show_compare: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkResponse {
    pub token: String,
    pub created_at: String,
    pub permissions: SharePermissions,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareUpdateRequest {
    pub permissions: Option<SharePermissions>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicShareEntry {
    pub date: String,
    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicShareResponse {
    pub permissions: SharePermissions,
    pub entries: Vec<PublicShareEntry>,
}
