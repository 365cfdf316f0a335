//! Literal substring matching and replace-all.
//!
//! All positions are byte offsets into the source text and always fall on
//! char boundaries. Case-insensitive comparison folds each char through
//! `char::to_lowercase`, so no locale is involved.

/// Byte range of the first occurrence of `term` in `text` at or after `from`.
pub fn find_from(text: &str, term: &str, from: usize, case_sensitive: bool) -> Option<(usize, usize)> {
    if term.is_empty() {
        return None;
    }
    let rest = text.get(from..)?;

    if case_sensitive {
        return rest
            .find(term)
            .map(|offset| (from + offset, from + offset + term.len()));
    }

    let needle: Vec<char> = term.chars().collect();
    rest.char_indices().find_map(|(offset, _)| {
        match_folded(&rest[offset..], &needle).map(|len| (from + offset, from + offset + len))
    })
}

/// Byte range of the first match, or `None` for empty input or no match.
pub fn locate_span(text: &str, term: &str, case_sensitive: bool) -> Option<(usize, usize)> {
    if text.is_empty() {
        return None;
    }
    find_from(text, term, 0, case_sensitive)
}

/// Start offset of the first occurrence of `term` in `text`.
pub fn locate_match(text: &str, term: &str, case_sensitive: bool) -> Option<usize> {
    locate_span(text, term, case_sensitive).map(|(start, _)| start)
}

/// Replace every non-overlapping occurrence of `term`, scanning left to right.
///
/// An empty `term` leaves the text untouched. An empty `replacement` deletes.
pub fn replace_all(text: &str, term: &str, replacement: &str, case_sensitive: bool) -> String {
    if term.is_empty() || text.is_empty() {
        return text.to_string();
    }
    if case_sensitive {
        return text.replace(term, replacement);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some((start, end)) = find_from(text, term, cursor, false) {
        out.push_str(&text[cursor..start]);
        out.push_str(replacement);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Whether `replaced` differs from `original` under the active comparison.
///
/// Without case sensitivity a result that only differs in case is not a
/// change.
pub fn is_effective_change(original: &str, replaced: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        return original != replaced;
    }
    original.chars().count() != replaced.chars().count()
        || !original
            .chars()
            .zip(replaced.chars())
            .all(|(a, b)| chars_eq_ignore_case(a, b))
}

fn match_folded(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for &expected in needle {
        let (_, actual) = chars.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(idx, _)| idx))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(&b);
    }
    a.to_lowercase().eq(b.to_lowercase())
}
