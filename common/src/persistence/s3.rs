use std::str::FromStr;

use bytes::Bytes;
use s3::{creds::Credentials, region::Region, Bucket};
use tracing::info;

use crate::{error::StorageError, util::state::S3BaseSettings};

use super::IObjectStore;

/// Builds a bucket handle per call, since the bucket comes from the event.
pub struct S3ObjectStore {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3ObjectStore {
    pub fn build(settings: S3BaseSettings) -> Result<Self, StorageError> {
        let credentials = Credentials::new(settings.access_key_id.as_deref(), settings.secret_access_key.as_deref(), None, None, None);
        let credentials = credentials.map_err(|err| StorageError::Config(format!("error with credentials: {}", err)))?;
        let region = match settings.endpoint {
            Some(endpoint) => Region::Custom {
                region: settings.region,
                endpoint,
            },
            // Unrecognised names parse as `Region::Custom`, which needs an endpoint.
            None => match Region::from_str(&settings.region) {
                Ok(Region::Custom { .. }) | Err(_) => return Err(StorageError::Config(format!("unknown region {} and no endpoint", &settings.region))),
                Ok(region) => region,
            },
        };
        Ok(S3ObjectStore {
            region,
            credentials,
            path_style: settings.path_style,
        })
    }

    fn bucket(&self, name: &str) -> Result<Bucket, StorageError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone()).map_err(|err| StorageError::Config(format!("error with bucket {}: {}", name, err)))?;
        if self.path_style {
            Ok(bucket.with_path_style())
        } else {
            Ok(bucket)
        }
    }
}

#[async_trait::async_trait]
impl IObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        info!("Fetching {}/{}", bucket, key);
        let response = self.bucket(bucket)?.get_object(key).await.map_err(|err| StorageError::Read {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: err.to_string(),
        })?;
        match response.status_code() {
            200 => Ok(Bytes::copy_from_slice(response.bytes())),
            404 => Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            status => Err(StorageError::Read {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: format!("status {}", status),
            }),
        }
    }

    async fn put_object(&self, bucket: &str, key: &str, content_type: &str, source: Vec<u8>) -> Result<(), StorageError> {
        info!("Storing {}/{} ({} bytes)", bucket, key, source.len());
        let response = self.bucket(bucket)?.put_object_with_content_type(key, &source, content_type).await.map_err(|err| StorageError::Write {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: err.to_string(),
        })?;
        match response.status_code() {
            200..=299 => Ok(()),
            status => Err(StorageError::Write {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: format!("status {}", status),
            }),
        }
    }
}
