use once_cell::sync::Lazy;
use std::path::PathBuf;

pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("PROGRESS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/data"))
});

pub static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| DATA_DIR.join("config.yaml"));
pub static DATABASE_PATH: Lazy<PathBuf> = Lazy::new(|| DATA_DIR.join("database.sqlite"));
pub static OBJECTS_DIR: Lazy<PathBuf> = Lazy::new(|| DATA_DIR.join("objects"));

pub const API_PREFIX: &str = "/api/v1";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
pub const DEFAULT_MAX_DIMENSION: u32 = 2048;
pub const DEFAULT_JPEG_QUALITY: u8 = 85;
pub const DEFAULT_SHARE_TOKEN_LENGTH: usize = 24;
pub const DOWNLOAD_TOKEN_LENGTH: usize = 32;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
