use std::io::Cursor;

use image::{DynamicImage, ImageError, ImageFormat};
use pdfium_render::prelude::*;

use crate::error::ExtractError;

/// Resolution every page is rasterized at.
pub const RENDER_DPI: u16 = 300;

/// PDF user space is 72 points per inch.
const POINTS_PER_INCH: f32 = 72.0;

#[cfg(feature = "static")]
pub fn init_pdfium() -> Result<Pdfium, PdfiumError> {
    Ok(Pdfium::new(Pdfium::bind_to_statically_linked_library()?))
}

#[cfg(not(feature = "static"))]
pub fn init_pdfium() -> Result<Pdfium, PdfiumError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./")).or_else(|_| Pdfium::bind_to_system_library())?;
    Ok(Pdfium::new(bindings))
}

pub trait IPageRenderer: Send + Sync {
    fn open<'a>(&'a self, source: Vec<u8>) -> Result<Box<dyn IRenderedDocument + 'a>, ExtractError>;
}

pub trait IRenderedDocument {
    fn page_count(&self) -> u16;
    /// Renders one zero-based page as an RGB raster.
    fn render_page(&self, page_index: u16, dpi: u16) -> Result<DynamicImage, ExtractError>;
}

pub struct PdfiumRenderer {
    pub pdfium: Pdfium,
}

impl IPageRenderer for PdfiumRenderer {
    fn open<'a>(&'a self, source: Vec<u8>) -> Result<Box<dyn IRenderedDocument + 'a>, ExtractError> {
        let document = self.pdfium.load_pdf_from_byte_vec(source, None).map_err(|err| ExtractError::DocumentParse(err.to_string()))?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> IRenderedDocument for PdfiumDocument<'a> {
    fn page_count(&self) -> u16 {
        self.document.pages().len()
    }

    fn render_page(&self, page_index: u16, dpi: u16) -> Result<DynamicImage, ExtractError> {
        let rasterization_error = |err: PdfiumError| ExtractError::Rasterization {
            page_index,
            reason: err.to_string(),
        };
        let page = self.document.pages().get(page_index).map_err(rasterization_error)?;
        let image = page.render_with_config(&render_config(dpi)).map_err(rasterization_error)?.as_image();
        Ok(DynamicImage::ImageRgb8(image.into_rgb8()))
    }
}

/// Pixels per PDF point at `dpi`.
pub fn scale_for(dpi: u16) -> f32 {
    dpi as f32 / POINTS_PER_INCH
}

fn render_config(dpi: u16) -> PdfRenderConfig {
    PdfRenderConfig::new().scale_page_by_factor(scale_for(dpi))
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut bytes: Vec<u8> = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
