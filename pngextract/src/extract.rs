use std::sync::Arc;

use common::{
    models::{page_object_key, page_object_keys, ConversionRequest, Extraction, PageArtifact, PageSelection},
    persistence::IObjectStore,
};
use mime::Mime;
use tracing::info;

use crate::{
    error::ExtractError,
    render::{encode_png, IPageRenderer, RENDER_DPI},
};

pub struct ExtractService {
    pub storage: Arc<dyn IObjectStore>,
    pub renderer: Arc<dyn IPageRenderer>,
    pub content_type: Mime,
}

impl ExtractService {
    /// Renders the selected pages of the source PDF and stores each as
    /// `wip/{job_id}/{page_index}.png` in the source bucket.
    ///
    /// Pages are processed in ascending order. The first failure aborts the
    /// run; pages stored before it are left in place.
    #[tracing::instrument(skip(self, request), fields(job_id = %request.job_id, bucket = %request.source_bucket, key = %request.source_key))]
    pub async fn extract(&self, request: &ConversionRequest, selection: PageSelection) -> Result<Extraction, ExtractError> {
        if request.job_id.is_empty() {
            return Err(ExtractError::InvalidRequest("job id is empty".to_string()));
        }

        let source = self.storage.get_object(&request.source_bucket, &request.source_key).await.map_err(ExtractError::SourceRead)?;
        info!("Downloaded {} bytes", source.len());
        if source.is_empty() {
            return Err(ExtractError::DocumentParse("document is empty".to_string()));
        }

        let document = self.renderer.open(source.to_vec())?;
        let page_count = document.page_count();
        info!("Document has {} pages", page_count);

        let planned: Vec<(u16, String)> = match selection {
            PageSelection::All => (0..page_count).zip(page_object_keys(&request.job_id, page_count)).collect(),
            PageSelection::Single(page_index) if page_index < page_count => vec![(page_index, page_object_key(&request.job_id, page_index))],
            PageSelection::Single(page_index) => {
                return Err(ExtractError::InvalidRequest(format!("page {} out of range, document has {} pages", page_index, page_count)));
            }
        };

        let mut artifacts = Vec::with_capacity(planned.len());
        for (page_index, object_key) in planned {
            let bytes = {
                let image = document.render_page(page_index, RENDER_DPI)?;
                encode_png(&image).map_err(|err| ExtractError::Rasterization {
                    page_index,
                    reason: err.to_string(),
                })?
            };
            self.storage
                .put_object(&request.source_bucket, &object_key, self.content_type.as_ref(), bytes)
                .await
                .map_err(|source| ExtractError::SinkWrite { page_index, source })?;
            info!("Stored page {} as {}", page_index, &object_key);
            artifacts.push(PageArtifact {
                page_index,
                object_key,
                content_type: self.content_type.to_string(),
            });
        }

        Ok(Extraction { page_count, artifacts })
    }
}
