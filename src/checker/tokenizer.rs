use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ALPHA_RUN: Regex = Regex::new(r"[A-Za-z]+").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset into the tokenized text
    pub start: usize,
}

/// Every maximal run of ASCII letters.
///
/// Anything else separates tokens, so "A101" yields "A" and "don't" yields
/// "don" and "t".
pub fn alphabetic_tokens(text: &str) -> Vec<Token<'_>> {
    ALPHA_RUN
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        alphabetic_tokens(text).iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_splits_on_punctuation_and_space() {
        assert_eq!(
            words("GYP. BD. on slab-on-grade"),
            vec!["GYP", "BD", "on", "slab", "on", "grade"]
        );
    }

    #[test]
    fn test_digits_and_apostrophes_separate_runs() {
        assert_eq!(
            words("See A101 for 2x4 studs"),
            vec!["See", "A", "for", "x", "studs"]
        );
        assert_eq!(words("don't"), vec!["don", "t"]);
        assert_eq!(words("A101drian wall_drian"), vec!["A", "drian", "wall", "drian"]);
    }

    #[test]
    fn test_non_ascii_letters_separate_runs() {
        assert_eq!(words("Straße"), vec!["Stra", "e"]);
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "Prvide  blocking, drian2";
        let tokens = alphabetic_tokens(text);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[1].start, 8);
        assert_eq!(tokens[2].start, 18);
        for token in tokens {
            assert_eq!(&text[token.start..token.start + token.text.len()], token.text);
        }
    }
}
