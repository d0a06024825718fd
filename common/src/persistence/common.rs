use bytes::Bytes;

use crate::error::StorageError;

#[async_trait::async_trait]
pub trait IObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;
    async fn put_object(&self, bucket: &str, key: &str, content_type: &str, source: Vec<u8>) -> Result<(), StorageError>;
}
