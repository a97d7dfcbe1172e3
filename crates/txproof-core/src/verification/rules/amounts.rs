//! Amount extraction.
//!
//! Amounts are reported as the matched text, e.g. `rs.500`, not as a number.

use super::patterns::AMOUNT_RULES;
use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    /// First match of the highest-priority rule that matches anywhere.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        AMOUNT_RULES.iter().find_map(|(name, re)| {
            re.find(text).map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), *name, m.as_str())
                    .with_position(m.start(), m.end())
            })
        })
    }

    /// All matches, grouped by rule priority.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (name, re) in AMOUNT_RULES.iter() {
            for m in re.find_iter(text) {
                results.push(
                    ExtractionMatch::new(m.as_str().to_string(), *name, m.as_str())
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

/// Extract the raw amount text from lower-cased text.
pub fn extract_amount(text: &str) -> Option<String> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_marker_wins_over_grouping() {
        let text = "balance 1,00,000 paid rs 500";
        let m = AmountExtractor::new().extract(text).unwrap();
        assert_eq!(m.value, "rs 500");
        assert_eq!(m.rule, "currency_marker");
    }

    #[test]
    fn test_grouping_fallback() {
        let m = AmountExtractor::new().extract("credited 12,000 to a/c").unwrap();
        assert_eq!(m.value, "12,000");
        assert_eq!(m.rule, "grouped_digits");
        assert_eq!(m.position, Some((9, 15)));
    }

    #[test]
    fn test_keyword_fallback() {
        assert_eq!(
            extract_amount("payment completed successfully 750"),
            Some("completed successfully 750".to_string())
        );
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(extract_amount("hello world"), None);
        assert_eq!(extract_amount(""), None);
    }

    #[test]
    fn test_extract_all_orders_by_rule() {
        let results = AmountExtractor::new().extract_all("₹100 and 2,000 and paid 3");
        let rules: Vec<&str> = results.iter().map(|m| m.rule).collect();
        assert_eq!(rules, ["currency_marker", "grouped_digits", "amount_keyword"]);
    }
}
