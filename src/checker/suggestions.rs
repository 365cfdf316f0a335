use crate::checker::dictionary::Dictionary;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

lazy_static! {
    static ref COMMON_MISSPELLINGS: HashMap<&'static str, &'static str> = [
        ("teh", "the"),
        ("adn", "and"),
        ("recieve", "receive"),
        ("seperate", "separate"),
        ("occured", "occurred"),
        ("accomodate", "accommodate"),
        ("untill", "until"),
        ("wich", "which"),
        ("existng", "existing"),
        ("typcial", "typical"),
        ("provde", "provide"),
        ("concreate", "concrete"),
        ("guage", "gauge"),
        ("celing", "ceiling"),
        ("flashng", "flashing"),
        ("elevaton", "elevation"),
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Replace(String),
    /// Accept the flagged word by adding it to the custom dictionary
    AddToDictionary(String),
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Replace(word) => write!(f, "{}", word),
            Suggestion::AddToDictionary(word) => write!(f, "Add \"{}\" to dictionary", word),
        }
    }
}

/// Suggestions for a flagged word. The last entry is always
/// [`Suggestion::AddToDictionary`].
pub fn generate(word: &str, dictionary: &Dictionary, max_suggestions: usize) -> Vec<Suggestion> {
    let lower = word.to_lowercase();
    let mut candidates: Vec<String> = Vec::new();

    if let Some(fixed) = COMMON_MISSPELLINGS.get(lower.as_str()) {
        candidates.push(fixed.to_string());
    }

    for candidate in dictionary_candidates(&lower, dictionary, max_suggestions) {
        if candidates.len() >= max_suggestions {
            break;
        }
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates.truncate(max_suggestions);

    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .map(|c| Suggestion::Replace(match_case(word, &c)))
        .collect();
    suggestions.push(Suggestion::AddToDictionary(word.to_string()));
    suggestions
}

fn dictionary_candidates(word: &str, dictionary: &Dictionary, max_suggestions: usize) -> Vec<String> {
    let mut suggestions = Vec::new();

    // 1. Shared three-letter prefix, close in edit distance
    if let Some(prefix) = char_prefix(word, 3) {
        let mut prefix_matches = dictionary.words_with_prefix(prefix);
        prefix_matches.sort_by_key(|w| edit_distance(word, w));

        for candidate in prefix_matches {
            if edit_distance(word, &candidate) > 2 || suggestions.len() >= max_suggestions {
                break;
            }
            suggestions.push(candidate);
        }
    }

    if suggestions.len() >= max_suggestions {
        return suggestions;
    }

    // 2. Single deletions, swaps and common letter confusions
    for transform in generate_transformations(word) {
        if dictionary.contains(&transform) && !suggestions.contains(&transform) {
            suggestions.push(transform);
            if suggestions.len() >= max_suggestions {
                return suggestions;
            }
        }
    }

    // 3. Looser match on a two-letter prefix
    if let Some(prefix) = char_prefix(word, 2) {
        let mut prefix_matches = dictionary.words_with_prefix(prefix);
        prefix_matches.sort_by_key(|w| edit_distance(word, w));

        for candidate in prefix_matches {
            if edit_distance(word, &candidate) > 3 || suggestions.len() >= max_suggestions {
                break;
            }
            if !suggestions.contains(&candidate) {
                suggestions.push(candidate);
            }
        }
    }

    suggestions
}

fn char_prefix(word: &str, chars: usize) -> Option<&str> {
    match word.char_indices().nth(chars) {
        Some((idx, _)) => Some(&word[..idx]),
        None if word.chars().count() == chars => Some(word),
        None => None,
    }
}

/// Follow the flagged word's capitalisation: "Teh" -> "The".
fn match_case(original: &str, suggestion: &str) -> String {
    let mut chars = original.chars();
    let starts_upper = chars.next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return suggestion.to_string();
    }
    if original.chars().all(char::is_uppercase) {
        return suggestion.to_uppercase();
    }
    let mut out = String::with_capacity(suggestion.len());
    let mut rest = suggestion.chars();
    if let Some(first) = rest.next() {
        out.extend(first.to_uppercase());
    }
    out.extend(rest);
    out
}

/// Calculate Levenshtein distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

fn generate_transformations(word: &str) -> Vec<String> {
    let mut transformations = Vec::new();
    let chars: Vec<char> = word.chars().collect();

    // Deletions
    for i in 0..chars.len() {
        let mut new_word = chars.clone();
        new_word.remove(i);
        transformations.push(new_word.iter().collect());
    }

    // Transpositions (swap adjacent)
    for i in 0..chars.len().saturating_sub(1) {
        let mut new_word = chars.clone();
        new_word.swap(i, i + 1);
        transformations.push(new_word.iter().collect());
    }

    let common_replacements = [
        ('a', 'e'),
        ('e', 'a'),
        ('e', 'i'),
        ('i', 'o'),
        ('o', 'u'),
        ('c', 'k'),
        ('m', 'n'),
        ('n', 'm'),
        ('s', 'z'),
        ('t', 'd'),
    ];

    for (i, &ch) in chars.iter().enumerate() {
        for &(from, to) in &common_replacements {
            if ch == from {
                let mut new_word = chars.clone();
                new_word[i] = to;
                transformations.push(new_word.iter().collect());
            }
        }
    }

    transformations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_words(["the", "drain", "drains", "pipe", "ceiling", "provide"]).unwrap()
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("hello", "hello"), 0);
        assert_eq!(edit_distance("hello", "hallo"), 1);
        assert_eq!(edit_distance("hello", "world"), 4);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_common_misspelling_first() {
        let suggestions = generate("teh", &dict(), 5);
        assert_eq!(suggestions[0], Suggestion::Replace("the".to_string()));
        assert_eq!(
            suggestions.last(),
            Some(&Suggestion::AddToDictionary("teh".to_string()))
        );
    }

    #[test]
    fn test_dictionary_candidates() {
        let suggestions = generate("drian", &dict(), 5);
        assert!(suggestions.contains(&Suggestion::Replace("drain".to_string())));
    }

    #[test]
    fn test_add_to_dictionary_always_present() {
        let suggestions = generate("zzzqqq", &dict(), 5);
        assert_eq!(
            suggestions,
            vec![Suggestion::AddToDictionary("zzzqqq".to_string())]
        );
        assert_eq!(
            suggestions[0].to_string(),
            "Add \"zzzqqq\" to dictionary"
        );
    }

    #[test]
    fn test_capitalisation_follows_word() {
        assert_eq!(match_case("Teh", "the"), "The");
        assert_eq!(match_case("celing", "ceiling"), "ceiling");
        let suggestions = generate("Celing", &dict(), 2);
        assert_eq!(suggestions[0], Suggestion::Replace("Ceiling".to_string()));
    }

    #[test]
    fn test_max_suggestions_respected() {
        let suggestions = generate("drainz", &dict(), 1);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("drain", 3), Some("dra"));
        assert_eq!(char_prefix("dra", 3), Some("dra"));
        assert_eq!(char_prefix("dr", 3), None);
    }
}
