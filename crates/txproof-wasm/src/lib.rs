//! WASM bindings for transaction-proof verification.
//!
//! Text extraction (OCR, PDF) happens on the JavaScript side; these bindings
//! take the resulting text or text boxes and run the verifier on them.

use std::str::FromStr;

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use txproof_core::verification::{classify_document as classify, normalize};
use txproof_core::{DocumentVerifier, OcrResult, TextBox, TransactionVerifier};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Verify document text with the default subsidy cap.
///
/// Returns the full verification report as a plain object.
#[wasm_bindgen]
pub fn verify_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&DocumentVerifier::new().verify(text))
}

/// Classify document text, returning a tag such as `UPI_RECEIPT`.
#[wasm_bindgen]
pub fn classify_document(text: &str) -> String {
    classify(&normalize(text)).as_str().to_string()
}

/// Normalize OCR text the way the verifier sees it.
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    normalize(text)
}

/// Verifier with a configurable subsidy cap.
#[wasm_bindgen]
pub struct DocumentVerifierJs {
    verifier: DocumentVerifier,
}

#[wasm_bindgen]
impl DocumentVerifierJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            verifier: DocumentVerifier::new(),
        }
    }

    /// Set the largest qualifying statement row amount, e.g. `"12000"`.
    #[wasm_bindgen]
    pub fn set_subsidy_max_amount(&mut self, amount: &str) -> Result<(), JsValue> {
        let cap = Decimal::from_str(amount.trim())
            .map_err(|e| JsValue::from_str(&format!("invalid amount '{}': {}", amount, e)))?;
        self.verifier = self.verifier.clone().with_subsidy_max_amount(cap);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn subsidy_max_amount(&self) -> String {
        self.verifier.subsidy_max_amount().to_string()
    }

    /// Verify text, returning the report.
    #[wasm_bindgen]
    pub fn verify(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.verifier.verify(text))
    }

    /// Verify text, returning only the final status.
    #[wasm_bindgen]
    pub fn status(&self, text: &str) -> String {
        self.verifier
            .verify(text)
            .final_decision
            .final_status
            .as_str()
            .to_string()
    }

    /// Verify the text boxes of a browser-side OCR pass.
    #[wasm_bindgen]
    pub fn verify_ocr(&self, ocr: &OcrResultJs) -> Result<JsValue, JsValue> {
        to_js(&self.verifier.verify(&ocr.get_text()))
    }
}

impl Default for DocumentVerifierJs {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR result from browser-side processing.
#[wasm_bindgen]
pub struct OcrResultJs {
    boxes: Vec<TextBox>,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Add a recognized text box (four corner points, clockwise).
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_box(
        &mut self,
        text: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        self.boxes.push(TextBox {
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            text: text.to_string(),
            confidence,
        });
    }

    /// Text of all boxes in reading order.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        OcrResult::from_boxes(self.boxes.clone(), 0).text
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_classify_document() {
        assert_eq!(classify_document("Paid via Google Pay"), "UPI_RECEIPT");
        assert_eq!(classify_document("Opening Balance  Closing Balance"), "BANK_STATEMENT");
        assert_eq!(classify_document(""), "UNKNOWN");
    }

    #[wasm_bindgen_test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Paid\n Rs.५००  "), "paid rs.500");
    }

    #[wasm_bindgen_test]
    fn test_verifier_cap() {
        let mut verifier = DocumentVerifierJs::new();
        assert_eq!(verifier.subsidy_max_amount(), "12000");
        verifier.set_subsidy_max_amount("5000").unwrap();
        assert_eq!(verifier.subsidy_max_amount(), "5000");
    }

    #[wasm_bindgen_test]
    fn test_status() {
        let verifier = DocumentVerifierJs::new();
        assert_eq!(
            verifier.status("upi reference utr no 123456789 paid rs.500 on 12/01/2024"),
            "Valid"
        );
        assert_eq!(verifier.status(""), "Invalid");
    }

    #[wasm_bindgen_test]
    fn test_ocr_boxes_in_reading_order() {
        let mut ocr = OcrResultJs::new();
        ocr.add_box("rs.500", 10.0, 40.0, 60.0, 40.0, 60.0, 55.0, 10.0, 55.0, 0.9);
        ocr.add_box("upi receipt", 10.0, 5.0, 90.0, 5.0, 90.0, 20.0, 10.0, 20.0, 0.9);
        assert_eq!(ocr.get_text(), "upi receipt\nrs.500");
    }
}
