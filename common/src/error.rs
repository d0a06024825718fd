use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("could not read {bucket}/{key}: {reason}")]
    Read { bucket: String, key: String, reason: String },

    #[error("could not write {bucket}/{key}: {reason}")]
    Write { bucket: String, key: String, reason: String },

    #[error("invalid storage configuration: {0}")]
    Config(String),
}
