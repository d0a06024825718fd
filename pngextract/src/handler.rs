use common::models::{ConversionRequest, ConversionResult, PageSelection};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ExtractError, extract::ExtractService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Every page; responds with the page indices.
    Pages,
    /// One page; responds with the document's page count.
    Page,
}

impl Handler {
    pub fn from_name(name: &str) -> Option<Handler> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pages" => Some(Handler::Pages),
            "page" => Some(Handler::Page),
            _ => None,
        }
    }

    /// What a failed run responds with. The page handler keeps answering with a
    /// page count, so callers reading it see zero pages.
    pub fn failure_response(&self) -> Value {
        match self {
            Handler::Pages => Value::Null,
            Handler::Page => Value::from("0"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractEvent {
    pub id: String,
    pub bucket: String,
    #[serde(alias = "original_upload_pdf")]
    pub key: String,
    #[serde(default)]
    pub cur_page_number: Option<String>,
}

impl ExtractEvent {
    pub fn from_json(slice: &[u8]) -> Result<Self, ExtractError> {
        serde_json::from_slice(slice).map_err(|err| ExtractError::InvalidRequest(format!("event is not valid: {}", err)))
    }

    pub fn to_request(&self) -> ConversionRequest {
        ConversionRequest {
            job_id: self.id.clone(),
            source_bucket: self.bucket.clone(),
            source_key: self.key.clone(),
        }
    }

    pub fn page_number(&self) -> Result<u16, ExtractError> {
        let page_number = self.cur_page_number.as_deref().ok_or_else(|| ExtractError::InvalidRequest("cur_page_number is missing".to_string()))?;
        page_number.trim().parse().map_err(|_| ExtractError::InvalidRequest(format!("cur_page_number '{}' is not a page index", page_number)))
    }
}

pub async fn handle_pages(service: &ExtractService, event: &ExtractEvent) -> Result<ConversionResult, ExtractError> {
    let extraction = service.extract(&event.to_request(), PageSelection::All).await?;
    Ok(extraction.page_indices())
}

pub async fn handle_page(service: &ExtractService, event: &ExtractEvent) -> Result<String, ExtractError> {
    let page_number = event.page_number()?;
    let extraction = service.extract(&event.to_request(), PageSelection::Single(page_number)).await?;
    Ok(extraction.page_count.to_string())
}

/// Parses one raw event and runs it through `handler`, producing the JSON response.
pub async fn handle(service: &ExtractService, handler: Handler, raw_event: &[u8]) -> Result<Value, ExtractError> {
    let event = ExtractEvent::from_json(raw_event)?;
    match handler {
        Handler::Pages => Ok(Value::from(handle_pages(service, &event).await?)),
        Handler::Page => Ok(Value::from(handle_page(service, &event).await?)),
    }
}
