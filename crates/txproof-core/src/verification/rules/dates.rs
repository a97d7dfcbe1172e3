//! Date extraction.

use super::patterns::DATE_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
///
/// Numeric `D/M/YYYY` and `D mon YYYY` forms are tried together, so the
/// earliest date in the text wins regardless of its form.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_PATTERN
            .captures_iter(text)
            .filter_map(|caps| {
                let rule = if caps.get(1).is_some() { "numeric" } else { "month_name" };
                caps.get(0).map(|m| {
                    ExtractionMatch::new(m.as_str().to_string(), rule, m.as_str())
                        .with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Extract the first raw date text from lower-cased text.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}
