//! Highlight word matching.
//!
//! Words from the config are escaped and joined into one case-insensitive
//! pattern that only matches whole words. A word starts after a space or
//! tab and may be followed by a space, a tab or trailing punctuation.

use regex::{Regex, RegexBuilder};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct HighlightMatcher {
    regex: Regex,
}

impl HighlightMatcher {
    /// Returns `None` when there is nothing to match or the pattern cannot
    /// be built, which disables custom highlights.
    pub fn from_words(words: &[String]) -> Option<Self> {
        let alternatives: Vec<String> = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return None;
        }

        let pattern = format!(
            r"(?:^|[ \t])(?:{})(?:[ \t,.!?:;]|$)",
            alternatives.join("|")
        );
        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => Some(Self { regex }),
            Err(e) => {
                warn!(error = %e, "highlight words disabled");
                None
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
