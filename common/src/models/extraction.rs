use serde::{Deserialize, Serialize};

pub const WIP_PREFIX: &str = "wip";

/// Identifies one conversion job. Built from the inbound event and consumed once.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub job_id: String,
    pub source_bucket: String,
    pub source_key: String,
}

/// Which pages of the source document a run renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    All,
    Single(u16),
}

/// One rendered page written to the store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageArtifact {
    pub page_index: u16,
    pub object_key: String,
    pub content_type: String,
}

/// Page indices as decimal strings, ascending.
pub type ConversionResult = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub page_count: u16,
    pub artifacts: Vec<PageArtifact>,
}

impl Extraction {
    pub fn page_indices(&self) -> ConversionResult {
        self.artifacts.iter().map(|artifact| artifact.page_index.to_string()).collect()
    }
}

pub fn page_object_key(job_id: &str, page_index: u16) -> String {
    format!("{}/{}/{}.png", WIP_PREFIX, job_id, page_index)
}

/// Every key a document with `page_count` pages will be written to.
pub fn page_object_keys(job_id: &str, page_count: u16) -> Vec<String> {
    (0..page_count).map(|page_index| page_object_key(job_id, page_index)).collect()
}
