use crate::finder::matcher::{locate_span, replace_all};
use crate::HighlightSegments;

/// Word characters extend a highlight past the matched span.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offsets of a match widened to the surrounding word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordContext {
    pub word_start: usize,
    pub match_start: usize,
    pub match_end: usize,
    pub word_end: usize,
}

impl WordContext {
    /// Walk outward from `[match_start, match_end)` over word characters.
    pub fn around(text: &str, match_start: usize, match_end: usize) -> Option<Self> {
        let head = text.get(..match_start)?;
        let tail = text.get(match_end..)?;

        let word_start = head
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_word_char(c))
            .last()
            .map_or(match_start, |(idx, _)| idx);

        let word_end = tail
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map_or(text.len(), |(idx, _)| match_end + idx);

        let ctx = Self {
            word_start,
            match_start,
            match_end,
            word_end,
        };
        ctx.is_ordered().then_some(ctx)
    }

    fn is_ordered(&self) -> bool {
        self.word_start <= self.match_start
            && self.match_start <= self.match_end
            && self.match_end <= self.word_end
    }

    fn split(&self, text: &str) -> HighlightSegments {
        HighlightSegments {
            pre_text: text[..self.word_start].to_string(),
            word_left: text[self.word_start..self.match_start].to_string(),
            word_mid: text[self.match_start..self.match_end].to_string(),
            word_right: text[self.match_end..self.word_end].to_string(),
            post_text: text[self.word_end..].to_string(),
        }
    }

    /// Offsets in the string produced by substituting `replacement` for the
    /// matched span.
    fn shifted(&self, replacement: &str) -> Self {
        let replaced_end = self.match_start + replacement.len();
        Self {
            word_start: self.word_start,
            match_start: self.match_start,
            match_end: replaced_end,
            word_end: replaced_end + (self.word_end - self.match_end),
        }
    }
}

/// Found and replaced highlight segments for the first match of `term`.
///
/// Only the first occurrence is substituted on the replaced side, even though
/// applying the change replaces every occurrence. Without a match the whole
/// source sits in `pre_text` on both sides.
pub fn build_highlight(
    text: &str,
    term: &str,
    replacement: &str,
    case_sensitive: bool,
) -> (HighlightSegments, HighlightSegments) {
    let fallback = || {
        (
            HighlightSegments::unmatched(text),
            HighlightSegments::unmatched(&replace_all(text, term, replacement, case_sensitive)),
        )
    };

    let Some((match_start, match_end)) = locate_span(text, term, case_sensitive) else {
        return fallback();
    };
    let Some(ctx) = WordContext::around(text, match_start, match_end) else {
        return fallback();
    };

    let mut replaced = String::with_capacity(text.len() + replacement.len());
    replaced.push_str(&text[..match_start]);
    replaced.push_str(replacement);
    replaced.push_str(&text[match_end..]);

    (ctx.split(text), ctx.shifted(replacement).split(&replaced))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(s: &HighlightSegments) -> (&str, &str, &str, &str, &str) {
        (
            &s.pre_text,
            &s.word_left,
            &s.word_mid,
            &s.word_right,
            &s.post_text,
        )
    }

    #[test]
    fn test_sub_token_highlight() {
        let (found, replaced) = build_highlight("DRAINS ARE CLOGGED", "DRAIN", "PIPE", true);
        assert_eq!(parts(&found), ("", "", "DRAIN", "S", " ARE CLOGGED"));
        assert_eq!(parts(&replaced), ("", "", "PIPE", "S", " ARE CLOGGED"));
    }

    #[test]
    fn test_match_inside_word_both_sides() {
        let (found, replaced) = build_highlight("SEE SUBDRAINAGE PLAN", "drain", "pipe", false);
        assert_eq!(parts(&found), ("SEE ", "SUB", "DRAIN", "AGE", " PLAN"));
        assert_eq!(parts(&replaced), ("SEE ", "SUB", "pipe", "AGE", " PLAN"));
    }

    #[test]
    fn test_no_match_fallback() {
        let (found, replaced) = build_highlight("hello world", "xyz", "abc", false);
        assert_eq!(parts(&found), ("hello world", "", "", "", ""));
        assert_eq!(parts(&replaced), ("hello world", "", "", "", ""));
    }

    #[test]
    fn test_empty_term_falls_back() {
        let (found, replaced) = build_highlight("wall", "", "x", true);
        assert_eq!(found, HighlightSegments::unmatched("wall"));
        assert_eq!(replaced, HighlightSegments::unmatched("wall"));
    }

    #[test]
    fn test_only_first_occurrence_previewed() {
        let (_, replaced) = build_highlight("TYP. TYP.", "TYP", "TYPICAL", true);
        assert_eq!(replaced.full_text(), "TYPICAL. TYP.");
    }

    #[test]
    fn test_underscore_and_digits_are_word_chars() {
        let (found, _) = build_highlight("see A_101b detail", "101", "102", true);
        assert_eq!(parts(&found), ("see ", "A_", "101", "b", " detail"));
    }

    #[test]
    fn test_deletion_preview() {
        let (found, replaced) = build_highlight("PTD GWB", "PTD ", "", true);
        assert_eq!(parts(&found), ("", "", "PTD ", "GWB", ""));
        assert_eq!(parts(&replaced), ("", "", "", "GWB", ""));
    }

    #[test]
    fn test_reconstruction_over_many_inputs() {
        let texts = [
            "DRAINS ARE CLOGGED",
            "Floor drain, typ.",
            "conc. slab-on-grade",
            "Ünïcödé wörds hère",
            "x",
        ];
        let terms = ["drain", "A", "o", "ö", "x", "slab-on"];
        for text in texts {
            for term in terms {
                for case_sensitive in [true, false] {
                    let (found, replaced) = build_highlight(text, term, "NEW", case_sensitive);
                    assert_eq!(found.full_text(), text);
                    if found.has_match() {
                        let start = found.pre_text.len() + found.word_left.len();
                        let end = start + found.word_mid.len();
                        let expected = format!("{}NEW{}", &text[..start], &text[end..]);
                        assert_eq!(replaced.full_text(), expected);
                    } else {
                        assert_eq!(replaced.full_text(), text);
                    }
                }
            }
        }
    }

    #[test]
    fn test_word_context_rejects_bad_offsets() {
        assert!(WordContext::around("abc", 2, 1).is_none());
        assert!(WordContext::around("abc", 0, 9).is_none());
    }
}
