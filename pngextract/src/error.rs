use std::error::Error as _;

use common::error::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("could not read source document")]
    SourceRead(#[source] StorageError),

    #[error("could not parse document: {0}")]
    DocumentParse(String),

    #[error("could not rasterize page {page_index}: {reason}")]
    Rasterization { page_index: u16, reason: String },

    #[error("could not write page {page_index}")]
    SinkWrite {
        page_index: u16,
        #[source]
        source: StorageError,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// How an orchestrator should treat a failed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    NoRetry,
    Retry,
}

impl ExtractError {
    pub fn disposition(&self) -> Disposition {
        match self {
            ExtractError::SourceRead(StorageError::NotFound { .. }) => Disposition::NoRetry,
            ExtractError::SourceRead(_) | ExtractError::SinkWrite { .. } => Disposition::Retry,
            ExtractError::DocumentParse(_) | ExtractError::Rasterization { .. } | ExtractError::InvalidRequest(_) => Disposition::NoRetry,
        }
    }

    /// The error and its sources joined, for a single log line.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}
