//! PDF text and page-image extraction using lopdf and pdf-extract.

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// Embedded-text threshold below which a PDF counts as scanned.
const MIN_TEXT_CHARS: usize = 50;

/// PDF extractor backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create an empty extractor; call [`PdfProcessor::load`] next.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: MIN_TEXT_CHARS,
        }
    }

    /// Minimum embedded text (in chars) for [`PdfProcessor::analyze`] to report text.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }

    /// Whether any page references an image XObject. Nothing is decoded.
    fn has_images(&self) -> bool {
        self.document.as_ref().is_some_and(|doc| {
            doc.get_pages()
                .values()
                .any(|&page_id| !image_xobject_ids(doc, page_id).is_empty())
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Bank statements are often "encrypted" with an empty user password.
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|_| PdfError::Encrypted)?;
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text_len = self
            .extract_text()
            .map(|t| t.trim().chars().count())
            .unwrap_or(0);
        let has_text = text_len > 0 && text_len >= self.min_text_length;
        let has_images = self.has_images();

        let pdf_type = match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!("PDF analysis: {} text chars, images={} -> {:?}", text_len, has_images, pdf_type);
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        // pdf-extract panics on some malformed inputs (e.g. a page without a MediaBox).
        let data = self.raw_data.as_slice();
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data))
            .map_err(|_| PdfError::TextExtraction("text extraction aborted".to_string()))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_images(&self, page: u32) -> Result<Vec<DynamicImage>> {
        let doc = self.document()?;
        let page_id = *doc.get_pages().get(&page).ok_or(PdfError::InvalidPage(page))?;

        let images: Vec<DynamicImage> = image_xobject_ids(doc, page_id)
            .into_iter()
            .filter_map(|id| doc.get_object(id).ok())
            .filter_map(|object| decode_image_xobject(doc, object))
            .collect();

        trace!("Page {}: {} images", page, images.len());
        Ok(images)
    }
}

/// Resources dictionary for a page, following `/Parent` inheritance.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(node)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = node.get(b"Resources") {
        if let Ok((_, Object::Dictionary(dict))) = doc.dereference(resources) {
            return Some(dict.clone());
        }
    }

    match node.get(b"Parent") {
        Ok(Object::Reference(parent)) => page_resources(doc, *parent),
        _ => None,
    }
}

/// Object ids of the image XObjects a page's resources reference.
fn image_xobject_ids(doc: &Document, page_id: ObjectId) -> Vec<ObjectId> {
    let Some(resources) = page_resources(doc, page_id) else {
        return Vec::new();
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return Vec::new();
    };
    let Ok((_, Object::Dictionary(xobjects))) = doc.dereference(xobjects) else {
        return Vec::new();
    };

    xobjects
        .iter()
        .filter_map(|(_, reference)| reference.as_reference().ok())
        .filter(|&id| match doc.get_object(id) {
            Ok(Object::Stream(stream)) => stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .is_ok_and(|subtype| subtype == b"Image"),
            _ => false,
        })
        .collect()
}

/// Decode an image XObject. JPEG streams and raw 8-bit RGB/gray are supported.
fn decode_image_xobject(doc: &Document, object: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;

    let filter = dict.get(b"Filter").ok().and_then(|f| match f {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                .ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Skipping unsupported image filter {:?}", filter.map(String::from_utf8_lossy));
            return None;
        }
        _ => {}
    }

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        trace!("Skipping {}-bit image", bits);
        return None;
    }

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.clone()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()).map(<[u8]>::to_vec),
            Object::Reference(r) => doc
                .get_object(*r)
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(<[u8]>::to_vec),
            _ => None,
        })
        .unwrap_or_else(|| b"DeviceRGB".to_vec());

    let data = if filter.is_some() {
        stream.decompressed_content().ok()?
    } else {
        stream.content.clone()
    };

    let pixels = (width as usize).checked_mul(height as usize)?;
    let rgb = match color_space.as_slice() {
        b"DeviceRGB" | b"RGB" => true,
        b"DeviceGray" | b"G" => false,
        other => {
            trace!("Skipping image in color space {}", String::from_utf8_lossy(other));
            return None;
        }
    };
    let needed = if rgb { pixels.checked_mul(3)? } else { pixels };
    if data.len() < needed {
        trace!("Could not decode {}x{} image ({} bytes)", width, height, data.len());
        return None;
    }

    let data = data[..needed].to_vec();
    if rgb {
        RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
    } else {
        GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
    }
}
