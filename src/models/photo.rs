use serde::{Deserialize, Serialize};

use crate::utils::hash::sha256_hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoKind {
    Front,
    Back,
}

impl PhotoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoKind::Front => "front",
            PhotoKind::Back => "back",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhotoKind::Front => "Front",
            PhotoKind::Back => "Back",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "front" => Some(PhotoKind::Front),
            "back" => Some(PhotoKind::Back),
            _ => None,
        }
    }

    /// `photos/{user}/{date}/{kind}.jpg`
    pub fn object_key(&self, user_id: &str, date: &str) -> String {
        format!(
            "photos/{}/{}/{}.jpg",
            user_key_segment(user_id),
            date,
            self.as_str()
        )
    }
}

/// User ids from the identity provider are used verbatim when path-safe,
/// otherwise replaced by a stable digest.
fn user_key_segment(user_id: &str) -> String {
    let path_safe = !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if path_safe {
        user_id.to_string()
    } else {
        format!("u-{}", &sha256_hex(user_id.as_bytes())[..32])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoEntry {
    pub date: String,
    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
    pub uploaded_at: String,
}

impl PhotoEntry {
    pub fn photo_url(&self, kind: PhotoKind) -> Option<&str> {
        match kind {
            PhotoKind::Front => self.front_photo_url.as_deref(),
            PhotoKind::Back => self.back_photo_url.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoGetRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDeleteRequest {
    pub date: String,
    pub kind: Option<PhotoKind>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoListResponse {
    pub entries: Vec<PhotoEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePhotoResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_uses_plain_user_ids() {
        assert_eq!(
            PhotoKind::Front.object_key("abcXYZ_09-", "2024-03-01"),
            "photos/abcXYZ_09-/2024-03-01/front.jpg"
        );
    }

    #[test]
    fn test_object_key_digests_unsafe_user_ids() {
        let key = PhotoKind::Back.object_key("auth0|1234", "2024-03-01");
        assert!(key.starts_with("photos/u-"));
        assert!(key.ends_with("/2024-03-01/back.jpg"));
        assert!(!key.contains('|'));
        assert_eq!(key, PhotoKind::Back.object_key("auth0|1234", "2024-03-01"));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PhotoKind::Back).unwrap(), "\"back\"");
        assert_eq!(PhotoKind::parse("front"), Some(PhotoKind::Front));
        assert_eq!(PhotoKind::parse("side"), None);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = PhotoEntry {
            date: "2024-03-01".to_string(),
            front_photo_url: Some("/f".to_string()),
            back_photo_url: None,
            uploaded_at: "2024-03-01T08:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["frontPhotoUrl"], "/f");
        assert!(value["backPhotoUrl"].is_null());
        assert_eq!(value["uploadedAt"], "2024-03-01T08:00:00Z");
    }
}
