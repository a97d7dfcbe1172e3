//! Issuer / payment-app detection.

use super::patterns::KNOWN_BANKS;

/// First entry of [`KNOWN_BANKS`] present in the text, in list order.
pub fn detect_bank(text: &str) -> Option<&'static str> {
    KNOWN_BANKS.iter().copied().find(|bank| text.contains(bank))
}
