pub mod dictionary;
pub mod suggestions;
pub mod terms;
pub mod tokenizer;

use crate::{Config, Result, SpellingIssue};
use dictionary::{CustomWords, Dictionary, DictionarySource};
use log::debug;
use suggestions::Suggestion;
use terms::TechnicalTerms;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Whether `word` passes the acceptance rules.
///
/// Every rule only ever accepts, so the order only matters for speed: the
/// custom words go first so user additions short-circuit the rest.
pub fn classify_word(
    word: &str,
    base: &Dictionary,
    custom: &CustomWords,
    technical: &TechnicalTerms,
) -> bool {
    if custom.contains(word) || base.contains(word) {
        return true;
    }

    let len = word.chars().count();
    if len <= 2 {
        return true;
    }
    // Acronyms
    if word.chars().all(char::is_uppercase) {
        return true;
    }
    if word.chars().all(char::is_numeric) {
        return true;
    }

    technical.contains(word)
}

/// Flagged words in `text`, in order of appearance.
pub fn find_spelling_issues(
    text: &str,
    base: &Dictionary,
    custom: &CustomWords,
    technical: &TechnicalTerms,
) -> Vec<SpellingIssue> {
    issues_with_limit(text, base, custom, technical, DEFAULT_MAX_SUGGESTIONS)
}

fn issues_with_limit(
    text: &str,
    base: &Dictionary,
    custom: &CustomWords,
    technical: &TechnicalTerms,
    max_suggestions: usize,
) -> Vec<SpellingIssue> {
    tokenizer::alphabetic_tokens(text)
        .into_iter()
        .filter(|token| !classify_word(token.text, base, custom, technical))
        .map(|token| SpellingIssue {
            word: token.text.to_string(),
            start: token.start,
            len: token.text.len(),
            suggestions: suggestions::generate(token.text, base, max_suggestions)
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
        .collect()
}

/// Dictionary state for one session: base wordlist, the project's custom
/// words and the technical allowlist.
pub struct SpellChecker {
    dictionary: Dictionary,
    source: DictionarySource,
    custom: CustomWords,
    technical: TechnicalTerms,
    max_suggestions: usize,
}

impl SpellChecker {
    pub fn new(config: &Config, custom: CustomWords) -> Result<Self> {
        let (dictionary, source) = Dictionary::load(&config.wordlist_path())?;
        debug!("{}", source.status_message());

        Ok(Self {
            dictionary,
            source,
            custom,
            technical: TechnicalTerms::with_extra(&config.extra_terms),
            max_suggestions: config.max_suggestions,
        })
    }

    pub fn from_parts(dictionary: Dictionary, custom: CustomWords, technical: TechnicalTerms) -> Self {
        Self {
            dictionary,
            source: DictionarySource::BuiltIn,
            custom,
            technical,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    pub fn is_accepted(&self, word: &str) -> bool {
        classify_word(word, &self.dictionary, &self.custom, &self.technical)
    }

    pub fn find_issues(&self, text: &str) -> Vec<SpellingIssue> {
        issues_with_limit(
            text,
            &self.dictionary,
            &self.custom,
            &self.technical,
            self.max_suggestions,
        )
    }

    pub fn suggest(&self, word: &str) -> Vec<Suggestion> {
        suggestions::generate(word, &self.dictionary, self.max_suggestions)
    }

    /// Accept `word` from now on. Returns false if it was already a custom word.
    pub fn add_word(&mut self, word: &str) -> bool {
        let added = self.custom.add(word);
        if added {
            debug!("Added '{}' to custom dictionary", word.trim());
        }
        added
    }

    pub fn custom_words(&self) -> &CustomWords {
        &self.custom
    }

    pub fn source(&self) -> &DictionarySource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(custom: &str) -> SpellChecker {
        let dictionary = Dictionary::from_words(["floor", "drain", "see", "plan", "the"]).unwrap();
        SpellChecker::from_parts(dictionary, CustomWords::parse(custom), TechnicalTerms::default())
    }

    #[test]
    fn test_acronym_heuristic() {
        let checker = checker("");
        assert!(checker.is_accepted("HVAC"));
        assert!(checker.is_accepted("QXZ"));
        assert!(!checker.is_accepted("Qxz"));
    }

    #[test]
    fn test_short_word_heuristic() {
        let empty = SpellChecker::from_parts(
            Dictionary::from_words(Vec::<String>::new()).unwrap(),
            CustomWords::default(),
            TechnicalTerms::empty(),
        );
        assert!(empty.is_accepted("to"));
        assert!(empty.is_accepted("x"));
        assert!(!empty.is_accepted("tox"));
    }

    #[test]
    fn test_numeric_and_technical() {
        let checker = checker("");
        assert!(checker.is_accepted("12345"));
        assert!(checker.is_accepted("galv"));
        assert!(checker.is_accepted("Floor"));
    }

    #[test]
    fn test_add_word_is_monotonic() {
        let mut checker = checker("");
        let before: Vec<bool> = ["floor", "HVAC", "to", "kalwall"]
            .iter()
            .map(|w| checker.is_accepted(w))
            .collect();
        assert!(!checker.is_accepted("kalwall"));

        assert!(checker.add_word("Kalwall"));
        assert!(!checker.add_word("kalwall"));
        assert!(checker.is_accepted("kalwall"));
        assert!(checker.is_accepted("KALWALL"));

        for (word, was) in ["floor", "HVAC", "to", "kalwall"].iter().zip(before) {
            if was {
                assert!(checker.is_accepted(word));
            }
        }
        assert_eq!(checker.custom_words().to_joined(), "kalwall");
    }

    #[test]
    fn test_find_issues_offsets() {
        let checker = checker("");
        let text = "See teh FLOOR drian, typ.";
        let issues = checker.find_issues(text);
        let words: Vec<&str> = issues.iter().map(|i| i.word.as_str()).collect();
        assert_eq!(words, vec!["teh", "drian"]);
        for issue in &issues {
            assert_eq!(&text[issue.start..issue.end()], issue.word);
        }
        assert_eq!(issues[0].suggestions[0], "the");
        assert_eq!(
            issues[0].suggestions.last().map(String::as_str),
            Some("Add \"teh\" to dictionary")
        );
    }

    #[test]
    fn test_misspellings_inside_mixed_tokens_are_flagged() {
        let checker = checker("");
        for text in ["Drian's plan", "drian2 plan", "A101drian", "plan_drian"] {
            let issues = checker.find_issues(text);
            let words: Vec<&str> = issues.iter().map(|i| i.word.as_str()).collect();
            assert_eq!(words.len(), 1, "{}", text);
            assert!(words[0].eq_ignore_ascii_case("drian"), "{}", text);
            assert_eq!(&text[issues[0].start..issues[0].end()], issues[0].word);
        }
    }

    #[test]
    fn test_free_functions_match_checker() {
        let dictionary = Dictionary::from_words(["wall"]).unwrap();
        let custom = CustomWords::parse("parapet");
        let technical = TechnicalTerms::default();
        assert!(classify_word("Parapet", &dictionary, &custom, &technical));
        assert!(!classify_word("coping", &dictionary, &custom, &technical));
        let issues = find_spelling_issues("wall coping parapet", &dictionary, &custom, &technical);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].start, 5);
        assert_eq!(issues[0].len, 6);
    }

    #[test]
    fn test_custom_word_fixes_issue() {
        let mut checker = checker("");
        assert_eq!(checker.find_issues("kalwall panels").len(), 2);
        checker.add_word("kalwall");
        let issues = checker.find_issues("kalwall panels");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].word, "panels");
    }
}
