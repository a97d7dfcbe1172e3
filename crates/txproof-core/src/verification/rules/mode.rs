//! Payment mode detection.

use super::patterns::MODE_RULES;
use crate::models::document::PaymentMode;

/// Detect the payment mode by substring presence.
///
/// Priority is UPI > IMPS > NEFT regardless of where each appears.
pub fn detect_mode(text: &str) -> Option<PaymentMode> {
    MODE_RULES
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, mode)| *mode)
}
