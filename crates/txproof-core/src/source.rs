//! Turning an uploaded file into text for the verification core.
//!
//! Images go through OCR. PDFs use their embedded text when there is enough
//! of it, otherwise their page images are OCR'd. Plain text files are read
//! as-is. Anything else is rejected before the core runs.

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{OcrError, PreprocessingError, Result};
use crate::models::config::TxProofConfig;
use crate::ocr::OcrBackend;
use crate::pdf::{PdfExtractor, PdfProcessor, PdfType};

/// Accepted input kinds, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Image,
    Pdf,
    PlainText,
}

impl SourceKind {
    /// Map a file extension (case-insensitive) to a source kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" => Some(SourceKind::Image),
            "pdf" => Some(SourceKind::Pdf),
            "txt" => Some(SourceKind::PlainText),
            _ => None,
        }
    }

    /// Classify a path, rejecting unsupported extensions.
    pub fn from_path(path: &Path) -> std::result::Result<Self, PreprocessingError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Self::from_extension(ext).ok_or_else(|| {
            PreprocessingError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{}", ext)
            })
        })
    }
}

/// Reads documents into raw text.
pub struct TextSource<'a> {
    config: &'a TxProofConfig,
    ocr: Option<&'a dyn OcrBackend>,
}

impl<'a> TextSource<'a> {
    /// Text source without OCR. Images and scanned PDFs will fail.
    pub fn new(config: &'a TxProofConfig) -> Self {
        Self { config, ocr: None }
    }

    /// Attach an OCR backend.
    pub fn with_ocr(mut self, ocr: &'a dyn OcrBackend) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Read a file into text.
    ///
    /// Fails with [`PreprocessingError::EmptyText`] when nothing but
    /// whitespace comes out.
    pub fn read_text(&self, path: &Path) -> Result<String> {
        let kind = SourceKind::from_path(path)?;
        debug!("Reading {} as {:?}", path.display(), kind);

        let text = match kind {
            SourceKind::PlainText => std::fs::read_to_string(path)?,
            SourceKind::Image => {
                let img = image::open(path)?;
                self.recognize(&img)?
            }
            SourceKind::Pdf => {
                let data = std::fs::read(path)?;
                self.read_pdf(&data)?
            }
        };

        if text.trim().is_empty() {
            return Err(PreprocessingError::EmptyText.into());
        }

        info!("Extracted {} characters from {}", text.chars().count(), path.display());
        Ok(text)
    }

    /// Text of a PDF held in memory.
    pub fn read_pdf(&self, data: &[u8]) -> Result<String> {
        let mut pdf = PdfExtractor::new().with_min_text_length(self.config.pdf.min_text_length);
        pdf.load(data)?;

        let pdf_type = pdf.analyze();
        let has_text = matches!(pdf_type, PdfType::Text | PdfType::Hybrid);

        if self.config.pdf.prefer_embedded_text && has_text {
            debug!("Using embedded text of {:?} PDF", pdf_type);
            return Ok(pdf.extract_text()?);
        }

        let text = self.ocr_pages(&pdf)?;
        if text.trim().is_empty() && has_text {
            warn!("OCR found no text, falling back to embedded PDF text");
            return Ok(pdf.extract_text()?);
        }
        Ok(text)
    }

    /// OCR the embedded images of each page, up to the configured page limit.
    fn ocr_pages(&self, pdf: &PdfExtractor) -> Result<String> {
        let max_pages = match self.config.pdf.max_pages {
            0 => pdf.page_count(),
            n => pdf.page_count().min(n as u32),
        };

        let mut pages = Vec::new();
        for page in 1..=max_pages {
            let mut page_text = Vec::new();
            for img in pdf.extract_images(page)? {
                let text = self.recognize(&img)?;
                if !text.trim().is_empty() {
                    page_text.push(text);
                }
            }
            debug!("Page {}: {} images with text", page, page_text.len());
            pages.push(page_text.join("\n"));
        }

        Ok(pages.join("\n"))
    }

    fn recognize(&self, img: &DynamicImage) -> std::result::Result<String, PreprocessingError> {
        let ocr = self
            .ocr
            .ok_or_else(|| PreprocessingError::from(OcrError::Unavailable))?;
        let result = ocr.recognize(img)?;
        debug!(
            "OCR produced {} boxes in {}ms",
            result.boxes.len(),
            result.processing_time_ms
        );
        Ok(result.text)
    }
}
