//! Rule tables for transaction evidence extraction.
//!
//! Every table is ordered: the first entry that matches wins. Patterns expect
//! lower-cased text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::document::PaymentMode;

lazy_static! {
    /// Amount rules in priority order: currency marker, Indian comma grouping, keyword.
    pub static ref AMOUNT_RULES: Vec<(&'static str, Regex)> = vec![
        ("currency_marker", Regex::new(r"(₹|rs\.?|र)\s*\d+[,.]?\d*").unwrap()),
        ("grouped_digits", Regex::new(r"\b\d{1,3}(,\d{3})+\b").unwrap()),
        ("amount_keyword", Regex::new(r"(amount|paid|completed)\D{0,15}\d+").unwrap()),
    ];

    // UTR / RRN / transaction id, group 2 is the digit run
    pub static ref TXN_ID_PATTERN: Regex = Regex::new(
        r"(?i)(utr/rrn|utr|rrn|txn\s*id|transaction\s*id)\s*(?:no\.?)?\s*[:\-]?\s*(\d{6,})"
    ).unwrap();

    // D/M/YYYY or "5 jan 2024", whichever comes first
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"(\d{1,2}[/\-]\d{1,2}[/\-]\d{4})|(\d{1,2}\s*(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s*\d{4})"
    ).unwrap();

    // Statement ledger row: date, bounded lazy gap, amount
    pub static ref STATEMENT_ROW_PATTERN: Regex = Regex::new(
        r"(\d{1,2}[/\-]\d{1,2}[/\-]\d{4}).{0,200}?(\d{3,}(?:,\d{3})*(?:\.\d{2})?)"
    ).unwrap();
}

/// Payment mode needles in priority order.
pub const MODE_RULES: [(&str, PaymentMode); 3] = [
    ("upi", PaymentMode::Upi),
    ("imps", PaymentMode::Imps),
    ("neft", PaymentMode::Neft),
];

/// Known issuers and payment apps, in lookup order.
pub const KNOWN_BANKS: [&str; 8] = [
    "state bank of india",
    "bank of baroda",
    "hdfc",
    "icici",
    "axis",
    "google pay",
    "phonepe",
    "paytm",
];

/// Phrases typical of bank statements. Presence is counted, not frequency.
pub const STATEMENT_KEYWORDS: [&str; 6] = [
    "opening balance",
    "closing balance",
    "transaction details",
    "dr",
    "cr",
    "statement between",
];

/// Number of distinct statement keywords needed to call a document a statement.
pub const STATEMENT_KEYWORD_THRESHOLD: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rule_order() {
        let names: Vec<&str> = AMOUNT_RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["currency_marker", "grouped_digits", "amount_keyword"]);
    }

    #[test]
    fn test_currency_marker_rule() {
        let (_, re) = &AMOUNT_RULES[0];
        // at most one separator is consumed
        assert_eq!(re.find("paid ₹ 1,500.00 to").unwrap().as_str(), "₹ 1,500");
        assert_eq!(re.find("amt rs.250 only").unwrap().as_str(), "rs.250");
        assert_eq!(re.find("र 99").unwrap().as_str(), "र 99");
        assert!(re.find("no money here").is_none());
    }

    #[test]
    fn test_grouped_digits_rule() {
        let (_, re) = &AMOUNT_RULES[1];
        assert_eq!(re.find("credited 12,500 today").unwrap().as_str(), "12,500");
        // lakh grouping only yields the trailing thousands group
        assert_eq!(re.find("credited 1,25,000 today").unwrap().as_str(), "25,000");
        assert!(re.find("credited 125000 today").is_none());
    }

    #[test]
    fn test_keyword_rule_window() {
        let (_, re) = &AMOUNT_RULES[2];
        assert_eq!(re.find("amount : 450").unwrap().as_str(), "amount : 450");
        // more than 15 non-digits between keyword and number
        assert!(re.find("paid abcdefghijklmnop7").is_none());
    }

    #[test]
    fn test_txn_id_pattern() {
        let caps = TXN_ID_PATTERN.captures("utr no. : 402211334455").unwrap();
        assert_eq!(&caps[2], "402211334455");

        let caps = TXN_ID_PATTERN.captures("transaction   id-987654").unwrap();
        assert_eq!(&caps[2], "987654");

        // too short
        assert!(TXN_ID_PATTERN.captures("rrn 12345").is_none());
    }

    #[test]
    fn test_date_pattern() {
        assert_eq!(DATE_PATTERN.find("on 5-3-2024").unwrap().as_str(), "5-3-2024");
        assert_eq!(DATE_PATTERN.find("on 05 mar 2024").unwrap().as_str(), "05 mar 2024");
        assert_eq!(DATE_PATTERN.find("on 05mar2024").unwrap().as_str(), "05mar2024");
    }

    #[test]
    fn test_keyword_tables() {
        assert_eq!(MODE_RULES[0].1, PaymentMode::Upi);
        assert_eq!(KNOWN_BANKS.len(), 8);
        assert_eq!(STATEMENT_KEYWORDS.len(), 6);
    }
}
