//! Object storage seam. Photo payloads live behind [`ObjectStore`]; their
//! catalog rows (download tokens, checksums) live in SQLite, see [`catalog`].

pub mod catalog;
mod local;

use async_trait::async_trait;
use std::io;
use thiserror::Error;
use tokio::io::AsyncRead;

pub use local::LocalObjectStore;

const MAX_OBJECT_KEY_LEN: usize = 1024;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key `{0}`")]
    InvalidKey(String),
    #[error("object `{0}` not found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub type ObjectReader = Box<dyn AsyncRead + Send + Unpin>;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any previous object.
    async fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()>;

    async fn open(&self, key: &str) -> StorageResult<ObjectReader>;

    /// Remove the object. Removing a missing key is `NotFound`.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

/// Keys are relative `/`-separated paths with no empty, `.` or `..` segments.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = || StorageError::InvalidKey(key.to_string());

    if key.is_empty() || key.len() > MAX_OBJECT_KEY_LEN {
        return Err(invalid());
    }

    if key
        .bytes()
        .any(|b| b.is_ascii_control() || b == b'\\' || b == b'\0')
    {
        return Err(invalid());
    }

    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid());
    }

    Ok(())
}
