//! Interactive search over the current records.
//!
//! Filtering never touches the store: every call evaluates the keyword
//! against the records it is handed and returns matches in their original
//! order, each tagged with its position in the full listing.
//!
//! The keyword is treated as a case-insensitive regular expression. Text that
//! does not compile as one (`"("`, `"50%+"`) is matched literally instead, so
//! typing ordinary text never produces an error.

use crate::index::{index_records, DisplayRecord};
use crate::model::InventoryRecord;
use regex::{Regex, RegexBuilder};
use tracing::debug;

pub const DEFAULT_PLACEHOLDER: &str = "Search...";

enum Matcher {
    Pattern(Regex),
    Literal(String),
}

impl Matcher {
    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(text),
            Matcher::Literal(needle) => text.to_lowercase().contains(needle),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchIndex {
    placeholder: String,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}

impl SearchIndex {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// True for keywords that mean "show everything".
    pub fn is_blank(&self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        keyword.is_empty() || keyword == self.placeholder
    }

    fn matcher(keyword: &str) -> Matcher {
        match RegexBuilder::new(keyword).case_insensitive(true).build() {
            Ok(re) => Matcher::Pattern(re),
            Err(e) => {
                debug!(keyword, error = %e, "keyword is not a valid pattern, matching literally");
                Matcher::Literal(keyword.to_lowercase())
            }
        }
    }

    pub fn filter(&self, records: &[InventoryRecord], keyword: &str) -> Vec<DisplayRecord> {
        let indexed = index_records(records);
        if self.is_blank(keyword) {
            return indexed;
        }

        let matcher = Self::matcher(keyword.trim());
        indexed
            .into_iter()
            .filter(|dr| dr.record.fields().iter().any(|f| matcher.is_match(f)))
            .collect()
    }
}
