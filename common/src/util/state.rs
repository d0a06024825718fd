use std::sync::Arc;

use crate::{error::StorageError, persistence::{IObjectStore, s3::S3ObjectStore}};

pub struct S3BaseSettings {
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub path_style: bool,
}

pub struct StorageBaseServiceCollection {
    pub object_store: Arc<dyn IObjectStore>,
}

impl StorageBaseServiceCollection {
    pub fn build(s3_settings: S3BaseSettings) -> Result<Arc<Self>, StorageError> {
        Ok(Arc::new(StorageBaseServiceCollection {
            object_store: Arc::new(S3ObjectStore::build(s3_settings)?),
        }))
    }
}
