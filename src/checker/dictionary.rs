use crate::error::{BimTextError, Result};
use fst::{Automaton, IntoStreamer, Set, Streamer};
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the base dictionary came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    File(PathBuf),
    /// The wordlist file was missing; the built-in list is in use.
    BuiltIn,
}

impl DictionarySource {
    pub fn status_message(&self) -> String {
        match self {
            DictionarySource::File(path) => format!("Dictionary loaded from {}", path.display()),
            DictionarySource::BuiltIn => {
                "Dictionary file not found; using the built-in word list".to_string()
            }
        }
    }
}

/// The large, read-only base wordlist.
pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Load a newline-delimited wordlist, falling back to the built-in list
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<(Self, DictionarySource)> {
        if !path.exists() {
            info!(
                "Wordlist {} not found, falling back to built-in words",
                path.display()
            );
            return Ok((Self::builtin()?, DictionarySource::BuiltIn));
        }

        let dictionary = Self::load_from_path(path)?;
        debug!("Loaded {} words from {}", dictionary.len(), path.display());
        Ok((dictionary, DictionarySource::File(path.to_path_buf())))
    }

    /// Load a wordlist file that must exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| BimTextError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_wordlist(&content)
    }

    /// Parse UTF-8 text with one word per line. Blank lines are ignored.
    pub fn from_wordlist(content: &str) -> Result<Self> {
        Self::from_words(content.lines())
    }

    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let set = Set::from_iter(sorted)?;
        Ok(Self { set })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_words(builtin_wordlist())
    }

    /// Case-insensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.to_lowercase().as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// All words with a given prefix
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }
}

fn builtin_wordlist() -> BTreeSet<String> {
    [
        // Common English
        "the", "be", "to", "of", "and", "a", "in", "that", "have", "it", "for", "not", "on",
        "with", "as", "at", "this", "by", "from", "or", "an", "all", "there", "which", "if",
        "up", "out", "about", "when", "make", "can", "no", "into", "some", "other", "than",
        "then", "only", "over", "also", "after", "use", "two", "how", "new", "any", "these",
        "most", "see", "where", "each", "both", "under", "above", "below", "between", "per",
        "provide", "install", "verify", "match", "existing", "typical", "similar", "refer",
        "level", "plan", "plans", "section", "sections", "elevation", "elevations", "detail",
        "details", "schedule", "schedules", "sheet", "sheets", "view", "views", "title", "notes",
        "note", "general", "floor", "roof", "ceiling", "wall", "walls", "door", "doors",
        "window", "windows", "stair", "stairs", "drain", "drains", "pipe", "pipes", "slab",
        "grade", "concrete", "steel", "wood", "stud", "studs", "blocking", "gypsum", "board",
        "finish", "finishes", "paint", "painted", "insulation", "membrane", "flashing", "sealant",
        "joint", "joints", "beam", "beams", "column", "columns", "footing", "foundation",
        "framing", "metal", "deck", "railing", "guard", "handrail", "ramp", "base", "cabinet",
        "counter", "tile", "carpet", "vinyl", "acoustic", "panel", "panels", "frame", "glass",
        "glazing", "hardware", "fixture", "fixtures", "equipment", "mechanical", "electrical",
        "plumbing", "structural", "architectural", "site", "interior", "exterior", "north",
        "south", "east", "west", "ground", "first", "second", "third", "upper", "lower", "main",
        "enlarged", "reflected", "demolition", "clogged", "are", "is", "were", "was", "shall",
        "must", "be", "top", "bottom", "face", "edge", "line", "center", "typ", "room", "rooms",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Per-project words accepted in addition to the base dictionary.
///
/// Persisted as a single `|`-joined string in project metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomWords {
    words: BTreeSet<String>,
}

impl CustomWords {
    pub const SEPARATOR: char = '|';

    pub fn parse(joined: &str) -> Self {
        let mut custom = Self::default();
        for word in joined.split(Self::SEPARATOR) {
            custom.add(word);
        }
        custom
    }

    /// Sorted, lower-cased, `|`-joined form for persistence.
    pub fn to_joined(&self) -> String {
        self.words
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Returns true when the word was not already present.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() || word.contains(Self::SEPARATOR) {
            return false;
        }
        self.words.insert(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_wordlist_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "Hello\n\n  world \ntest\nhello\n").unwrap();

        let (dict, source) = Dictionary::load(&path).unwrap();
        assert_eq!(source, DictionarySource::File(path.clone()));
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("HELLO"));
        assert!(dict.contains("world"));
        assert!(!dict.contains("notfound"));
    }

    #[test]
    fn test_missing_wordlist_falls_back() {
        let dir = tempdir().unwrap();
        let (dict, source) = Dictionary::load(&dir.path().join("missing.txt")).unwrap();
        assert_eq!(source, DictionarySource::BuiltIn);
        assert!(dict.contains("drain"));
        assert!(source.status_message().contains("built-in"));
    }

    #[test]
    fn test_words_with_prefix() {
        let dict = Dictionary::from_words(["drain", "drains", "drawing", "pipe"]).unwrap();
        assert_eq!(dict.words_with_prefix("drai"), vec!["drain", "drains"]);
    }

    #[test]
    fn test_custom_words_round_trip() {
        let custom = CustomWords::parse("Kalwall| epdm ||kalwall");
        assert_eq!(custom.len(), 2);
        assert!(custom.contains("KALWALL"));
        assert_eq!(custom.to_joined(), "epdm|kalwall");
        assert_eq!(CustomWords::parse(&custom.to_joined()), custom);
        assert!(CustomWords::parse("").is_empty());
    }

    #[test]
    fn test_custom_add_is_monotonic() {
        let mut custom = CustomWords::parse("alpha");
        assert!(custom.add("Beta"));
        assert!(!custom.add("beta"));
        assert!(!custom.add("a|b"));
        assert!(custom.contains("alpha"));
        assert!(custom.contains("beta"));
    }
}
