pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod finder;
pub mod project;

pub use checker::SpellChecker;
pub use config::Config;
pub use error::{BimTextError, Result};
pub use finder::highlight::build_highlight;
pub use finder::matcher::{locate_match, replace_all};

use serde::{Deserialize, Serialize};

/// Five-way split of a string around a match, widened to the enclosing word.
///
/// Concatenating the fields in order always yields the full string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSegments {
    pub pre_text: String,
    pub word_left: String,
    pub word_mid: String,
    pub word_right: String,
    pub post_text: String,
}

impl HighlightSegments {
    /// Segments with the whole string in `pre_text` and nothing highlighted.
    pub fn unmatched(text: &str) -> Self {
        Self {
            pre_text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(
            self.pre_text.len()
                + self.word_left.len()
                + self.word_mid.len()
                + self.word_right.len()
                + self.post_text.len(),
        );
        out.push_str(&self.pre_text);
        out.push_str(&self.word_left);
        out.push_str(&self.word_mid);
        out.push_str(&self.word_right);
        out.push_str(&self.post_text);
        out
    }

    pub fn has_match(&self) -> bool {
        !self.word_mid.is_empty() || !self.word_left.is_empty() || !self.word_right.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingIssue {
    pub word: String,
    /// Byte offset of the word in the checked text
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    pub suggestions: Vec<String>,
}

impl SpellingIssue {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Splice `replacement` over this issue's span.
    ///
    /// Offsets are only valid for the text the issue was found in.
    pub fn apply_to(&self, text: &str, replacement: &str) -> Option<String> {
        let head = text.get(..self.start)?;
        let tail = text.get(self.end()..)?;
        Some(format!("{}{}{}", head, replacement, tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_concatenates_in_order() {
        let segments = HighlightSegments {
            pre_text: "NEW ".to_string(),
            word_left: "".to_string(),
            word_mid: "DRAIN".to_string(),
            word_right: "S".to_string(),
            post_text: " HERE".to_string(),
        };
        assert_eq!(segments.full_text(), "NEW DRAINS HERE");
        assert!(segments.has_match());
        assert!(!HighlightSegments::unmatched("abc").has_match());
    }

    #[test]
    fn test_issue_splice() {
        let issue = SpellingIssue {
            word: "teh".to_string(),
            start: 4,
            len: 3,
            suggestions: vec!["the".to_string()],
        };
        assert_eq!(
            issue.apply_to("See teh plan", "the").as_deref(),
            Some("See the plan")
        );
        assert_eq!(issue.apply_to("See", "the"), None);
    }
}
