use crate::constants::{API_PREFIX, DOWNLOAD_TOKEN_LENGTH};
use crate::database::{execute_query, fetch_one, queries, DbConn};
use crate::error::AppResult;
use crate::utils::hash::sha256_hex;
use crate::utils::tokens::random_token;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub download_token: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub checksum: String,
}

fn map_object_row(row: &rusqlite::Row) -> rusqlite::Result<StoredObject> {
    Ok(StoredObject {
        key: row.get(0)?,
        download_token: row.get(1)?,
        content_type: row.get(2)?,
        size_bytes: row.get(3)?,
        checksum: row.get(4)?,
    })
}

/// Upsert the catalog row for `key`. Always issues a fresh download token.
pub fn record_object(
    conn: &DbConn,
    key: &str,
    content_type: &str,
    bytes: &[u8],
) -> AppResult<StoredObject> {
    let object = StoredObject {
        key: key.to_string(),
        download_token: random_token(DOWNLOAD_TOKEN_LENGTH),
        content_type: content_type.to_string(),
        size_bytes: bytes.len() as i64,
        checksum: sha256_hex(bytes),
    };

    execute_query(
        conn,
        queries::objects::UPSERT,
        &[
            &object.key,
            &object.download_token,
            &object.content_type,
            &object.size_bytes,
            &object.checksum,
        ],
    )?;

    Ok(object)
}

pub fn find_object(conn: &DbConn, key: &str) -> AppResult<Option<StoredObject>> {
    fetch_one(conn, queries::objects::SELECT_BY_KEY, &[&key], map_object_row)
}

/// Returns whether a row was removed.
pub fn forget_object(conn: &DbConn, key: &str) -> AppResult<bool> {
    Ok(execute_query(conn, queries::objects::DELETE, &[&key])? > 0)
}

pub fn download_url(public_url: &str, key: &str, download_token: &str) -> String {
    format!(
        "{}{}/files/{}?token={}",
        public_url.trim_end_matches('/'),
        API_PREFIX,
        key,
        download_token
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_db;

    #[test]
    fn test_download_url_shapes() {
        assert_eq!(
            download_url("", "photos/u/2024-01-01/front.jpg", "abc"),
            "/api/v1/files/photos/u/2024-01-01/front.jpg?token=abc"
        );
        assert_eq!(
            download_url("https://diary.example.com/", "k", "t"),
            "https://diary.example.com/api/v1/files/k?token=t"
        );
    }

    #[test]
    fn test_record_object_rotates_token_on_rewrite() {
        let (pool, _dir) = create_test_db();
        let conn = pool.get().unwrap();

        let first = record_object(&conn, "photos/u/d/front.jpg", "image/jpeg", b"one").unwrap();
        let second = record_object(&conn, "photos/u/d/front.jpg", "image/jpeg", b"three").unwrap();

        assert_ne!(first.download_token, second.download_token);
        let stored = find_object(&conn, "photos/u/d/front.jpg").unwrap().unwrap();
        assert_eq!(stored.download_token, second.download_token);
        assert_eq!(stored.size_bytes, 5);
        assert_eq!(stored.checksum, sha256_hex(b"three"));
    }

    #[test]
    fn test_forget_object() {
        let (pool, _dir) = create_test_db();
        let conn = pool.get().unwrap();

        record_object(&conn, "k", "image/jpeg", b"x").unwrap();

        assert!(forget_object(&conn, "k").unwrap());
        assert!(!forget_object(&conn, "k").unwrap());
        assert!(find_object(&conn, "k").unwrap().is_none());
    }
}
