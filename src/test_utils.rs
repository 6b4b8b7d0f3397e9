#![cfg(test)]

use crate::app::create_app;
use crate::auth::create_access_token;
use crate::config::Config;
use crate::database::{create_pool, execute_query, init_database, queries, DbPool};
use crate::models::PhotoKind;
use crate::storage::catalog::record_object;
use crate::storage::LocalObjectStore;
use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
use axum_test::TestServer;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a file-backed SQLite pool with the full schema applied. Every pooled
/// connection sees the same database, which an in-memory database would not give.
pub fn create_test_db() -> (DbPool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = create_pool(&dir.path().join("test.sqlite")).expect("Failed to create test pool");

    let conn = pool.get().expect("Failed to get connection from pool");
    init_database(&conn).expect("Failed to initialize test database schema");

    (pool, dir)
}

pub struct TestApp {
    pub server: TestServer,
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub objects_dir: PathBuf,
    _db_dir: TempDir,
    _objects: TempDir,
}

impl TestApp {
    pub fn store(&self) -> LocalObjectStore {
        LocalObjectStore::new(&self.objects_dir)
    }

    pub fn auth(&self, user_id: &str) -> (HeaderName, HeaderValue) {
        auth_header(&token_for(&self.config, user_id))
    }
}

/// Create a test app with a temporary database and object store
pub fn create_test_app() -> TestApp {
    let (pool, db_dir) = create_test_db();
    let objects = tempfile::tempdir().expect("Failed to create objects dir");
    let objects_dir = objects.path().to_path_buf();
    let config = Arc::new(Config::default());

    let app = create_app(
        Arc::clone(&config),
        pool.clone(),
        Arc::new(LocalObjectStore::new(&objects_dir)),
    );
    let server = TestServer::new(app).expect("Failed to start test server");

    TestApp {
        server,
        pool,
        config,
        objects_dir,
        _db_dir: db_dir,
        _objects: objects,
    }
}

pub fn token_for(config: &Config, user_id: &str) -> String {
    create_access_token(user_id, None, chrono::Duration::hours(1), config)
        .expect("Failed to mint test token")
}

pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("Bearer {}", token)).expect("Invalid header value");
    (AUTHORIZATION, value)
}

/// A small gradient PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });

    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("Failed to encode test PNG");
    out
}

/// Test fixture: catalogue photos for one day without writing object files
pub fn insert_test_entry(pool: &DbPool, user_id: &str, date: &str, front: bool, back: bool) {
    let conn = pool.get().expect("Failed to get connection");
    let uploaded_at = format!("{}T08:00:00Z", date);

    for (kind, wanted) in [(PhotoKind::Front, front), (PhotoKind::Back, back)] {
        if !wanted {
            continue;
        }
        let key = kind.object_key(user_id, date);
        record_object(&conn, &key, "image/jpeg", key.as_bytes()).expect("Failed to record object");

        let upsert = match kind {
            PhotoKind::Front => queries::entries::UPSERT_FRONT,
            PhotoKind::Back => queries::entries::UPSERT_BACK,
        };
        execute_query(&conn, upsert, &[&user_id, &date, &key, &uploaded_at])
            .expect("Failed to insert test entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::table_exists;

    #[test]
    fn test_create_test_db() {
        let (pool, _dir) = create_test_db();
        let conn = pool.get().expect("Failed to get connection");

        assert!(table_exists(&conn, "photo_entries").unwrap());
    }

    #[tokio::test]
    async fn test_create_test_app() {
        let app = create_test_app();
        assert!(app.objects_dir.exists());
    }

    #[test]
    fn test_insert_test_entry() {
        let (pool, _dir) = create_test_db();
        insert_test_entry(&pool, "user-1", "2024-01-15", true, false);

        let conn = pool.get().expect("Failed to get connection");
        let (front, back): (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT front_key, back_key FROM photo_entries WHERE user_id = ? AND date = ?",
                ["user-1", "2024-01-15"],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert_eq!(front.as_deref(), Some("photos/user-1/2024-01-15/front.jpg"));
        assert!(back.is_none());
    }

    #[test]
    fn test_png_bytes_decode() {
        let img = image::load_from_memory(&png_bytes(12, 8)).unwrap();
        assert_eq!((img.width(), img.height()), (12, 8));
    }
}
