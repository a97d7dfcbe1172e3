//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{OcrConfig, TxProofConfig};

use super::{OcrBackend, OcrResult, TextBox};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Load detection/recognition models and dictionary named in the config.
    pub fn from_config(config: &TxProofConfig) -> Result<Self, OcrError> {
        let det_path = config.model_path(&config.models.detection_model);
        let rec_path = config.model_path(&config.models.recognition_model);
        let dict_path = config.model_path(&config.models.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded OCR engine from {}", config.models.model_dir.display());

        Ok(Self {
            engine,
            config: config.ocr.clone(),
        })
    }

    fn to_text_box(&self, text: &str, confidence: f32, polygon: &pure_onnx_ocr::Polygon<f64>) -> TextBox {
        let text = if self.config.keep_unk {
            text.to_string()
        } else {
            text.replace("[UNK]", " ")
        };

        TextBox {
            bbox: polygon_to_bbox(polygon),
            text,
            confidence,
        }
    }
}

impl OcrBackend for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        debug!("Running OCR on {}x{} image", width, height);

        let regions = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let total = regions.len();
        let boxes: Vec<TextBox> = regions
            .iter()
            .filter(|r| r.confidence >= self.config.detection_threshold)
            .map(|r| self.to_text_box(&r.text, r.confidence, &r.bounding_box))
            .collect();

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "OCR complete: kept {} of {} text regions in {}ms",
            boxes.len(),
            total,
            processing_time_ms
        );

        Ok(OcrResult::from_boxes(boxes, processing_time_ms))
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format (first 4 exterior points).
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
