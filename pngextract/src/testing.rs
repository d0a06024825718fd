use std::{collections::HashMap, sync::Mutex};

use bytes::Bytes;
use common::{error::StorageError, persistence::IObjectStore};
use image::{DynamicImage, Rgb, RgbImage};

use crate::{
    error::ExtractError,
    render::{IPageRenderer, IRenderedDocument},
};

/// In-memory store that records every write and can fail on one key.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), (String, Vec<u8>)>>,
    written: Mutex<Vec<String>>,
    fail_on: Mutex<Option<String>>,
}

impl MemoryObjectStore {
    pub fn with_document(bucket: &str, key: &str, page_count: u16) -> Self {
        let store = MemoryObjectStore::default();
        store.insert(bucket, key, FakeRenderer::document(page_count));
        store
    }

    pub fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects.lock().unwrap().insert((bucket.to_string(), key.to_string()), ("application/pdf".to_string(), bytes));
    }

    pub fn fail_on(&self, key: &str) {
        *self.fail_on.lock().unwrap() = Some(key.to_string());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<(String, Vec<u8>)> {
        self.objects.lock().unwrap().get(&(bucket.to_string(), key.to_string())).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Keys of successful writes, in write order.
    pub fn written_keys(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        self.object(bucket, key).map(|(_, bytes)| Bytes::from(bytes)).ok_or_else(|| StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    async fn put_object(&self, bucket: &str, key: &str, content_type: &str, source: Vec<u8>) -> Result<(), StorageError> {
        if self.fail_on.lock().unwrap().as_deref() == Some(key) {
            return Err(StorageError::Write {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: "status 503".to_string(),
            });
        }
        self.objects.lock().unwrap().insert((bucket.to_string(), key.to_string()), (content_type.to_string(), source));
        self.written.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

/// Renders documents of the form `%PDF-fake pages=N [fail=K]` without pdfium.
pub struct FakeRenderer;

impl FakeRenderer {
    pub fn document(page_count: u16) -> Vec<u8> {
        format!("%PDF-fake pages={}", page_count).into_bytes()
    }

    pub fn document_failing_at(page_count: u16, failing_page: u16) -> Vec<u8> {
        format!("%PDF-fake pages={} fail={}", page_count, failing_page).into_bytes()
    }

    /// Pages are half an inch wide and a quarter inch tall.
    pub fn width_at(dpi: u16) -> u32 {
        dpi as u32 / 2
    }

    fn field(header: &str, name: &str) -> Option<u16> {
        header.split_whitespace().find_map(|field| field.strip_prefix(name)?.strip_prefix('=')?.parse().ok())
    }
}

impl IPageRenderer for FakeRenderer {
    fn open<'a>(&'a self, source: Vec<u8>) -> Result<Box<dyn IRenderedDocument + 'a>, ExtractError> {
        let header = String::from_utf8(source).map_err(|_| ExtractError::DocumentParse("not utf-8".to_string()))?;
        if !header.starts_with("%PDF-") {
            return Err(ExtractError::DocumentParse("missing %PDF header".to_string()));
        }
        let page_count = FakeRenderer::field(&header, "pages").ok_or_else(|| ExtractError::DocumentParse("missing page count".to_string()))?;
        Ok(Box::new(FakeDocument {
            page_count,
            failing_page: FakeRenderer::field(&header, "fail"),
        }))
    }
}

struct FakeDocument {
    page_count: u16,
    failing_page: Option<u16>,
}

impl IRenderedDocument for FakeDocument {
    fn page_count(&self) -> u16 {
        self.page_count
    }

    fn render_page(&self, page_index: u16, dpi: u16) -> Result<DynamicImage, ExtractError> {
        if self.failing_page == Some(page_index) {
            return Err(ExtractError::Rasterization {
                page_index,
                reason: "broken content stream".to_string(),
            });
        }
        let width = FakeRenderer::width_at(dpi);
        let shade = (page_index % 256) as u8;
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(width, width / 2, Rgb([255, shade, shade]))))
    }
}
