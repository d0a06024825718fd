use std::sync::Arc;

use common::{error::StorageError, util::state::{S3BaseSettings, StorageBaseServiceCollection}};
use mime::Mime;
use pdfium_render::prelude::Pdfium;

use crate::{extract::ExtractService, render::PdfiumRenderer};

pub struct ServiceCollection {
    pub extract_service: Arc<ExtractService>,
}

impl ServiceCollection {
    pub fn build(s3_settings: S3BaseSettings, pdfium: Pdfium, content_type: Mime) -> Result<Self, StorageError> {
        let base = StorageBaseServiceCollection::build(s3_settings)?;
        let renderer = Arc::new(PdfiumRenderer { pdfium });
        Ok(ServiceCollection {
            extract_service: Arc::new(ExtractService {
                storage: base.object_store.clone(),
                renderer,
                content_type,
            }),
        })
    }
}
