use crate::checker::DEFAULT_MAX_SUGGESTIONS;
use crate::finder::ScopeKind;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".bimtext.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub case_sensitive: bool,
    pub scopes: Vec<ScopeKind>,
    /// Newline-delimited base wordlist
    pub wordlist: Option<PathBuf>,
    /// Added to the built-in technical abbreviations
    pub extra_terms: Vec<String>,
    pub max_suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            scopes: vec![ScopeKind::Keynotes],
            wordlist: None,
            extra_terms: Vec::new(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Values given on the command line; `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub case_sensitive: Option<bool>,
    pub scopes: Vec<ScopeKind>,
    pub wordlist: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new(LOCAL_CONFIG_FILE),
            overrides,
        )
    }

    pub fn load_from(global: Option<&Path>, local: &Path, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                config = config.merge(Self::from_file(global_path)?);
            }
        }

        if local.exists() {
            config = config.merge(Self::from_file(local)?);
        }

        if let Some(case_sensitive) = overrides.case_sensitive {
            config.case_sensitive = case_sensitive;
        }
        if !overrides.scopes.is_empty() {
            config.scopes = overrides.scopes;
        }
        if overrides.wordlist.is_some() {
            config.wordlist = overrides.wordlist;
        }

        // Always keep at least one scope
        if config.scopes.is_empty() {
            config.scopes = vec![ScopeKind::Keynotes];
        }
        let mut seen = HashSet::new();
        config.scopes.retain(|scope| seen.insert(*scope));

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        if other.case_sensitive {
            self.case_sensitive = true;
        }
        if !other.scopes.is_empty() && other.scopes != Self::default().scopes {
            self.scopes = other.scopes;
        }
        if other.wordlist.is_some() {
            self.wordlist = other.wordlist;
        }
        if !other.extra_terms.is_empty() {
            self.extra_terms.extend(other.extra_terms);
        }
        if other.max_suggestions != DEFAULT_MAX_SUGGESTIONS {
            self.max_suggestions = other.max_suggestions;
        }
        self
    }

    /// Configured wordlist, or `words.txt` in the data directory.
    pub fn wordlist_path(&self) -> PathBuf {
        self.wordlist
            .clone()
            .or_else(|| Self::data_dir().map(|dir| dir.join("words.txt")))
            .unwrap_or_else(|| PathBuf::from("words.txt"))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "bimtext").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "bimtext").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.case_sensitive);
        assert_eq!(config.scopes, vec![ScopeKind::Keynotes]);
        assert_eq!(config.max_suggestions, 5);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            scopes: vec![ScopeKind::SheetNames, ScopeKind::ViewTitles],
            max_suggestions: 3,
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.scopes, vec![ScopeKind::SheetNames, ScopeKind::ViewTitles]);
        assert_eq!(merged.max_suggestions, 3);
        assert!(!merged.case_sensitive);
    }

    #[test]
    fn test_load_precedence() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(
            &global,
            "case_sensitive = true\nextra_terms = [\"epdm\"]\nmax_suggestions = 8\n",
        )
        .unwrap();
        fs::write(&local, "scopes = [\"sheet-names\"]\nextra_terms = [\"tpo\"]\n").unwrap();

        let config = Config::load_from(Some(&global), &local, Overrides::default()).unwrap();
        assert!(config.case_sensitive);
        assert_eq!(config.scopes, vec![ScopeKind::SheetNames]);
        assert_eq!(config.extra_terms, vec!["epdm", "tpo"]);
        assert_eq!(config.max_suggestions, 8);

        let overridden = Config::load_from(
            Some(&global),
            &local,
            Overrides {
                case_sensitive: Some(false),
                scopes: vec![ScopeKind::ViewTitles],
                wordlist: Some(PathBuf::from("custom.txt")),
            },
        )
        .unwrap();
        assert!(!overridden.case_sensitive);
        assert_eq!(overridden.scopes, vec![ScopeKind::ViewTitles]);
        assert_eq!(overridden.wordlist_path(), PathBuf::from("custom.txt"));

        let repeated = Config::load_from(
            Some(&global),
            &local,
            Overrides {
                scopes: vec![
                    ScopeKind::Keynotes,
                    ScopeKind::SheetNames,
                    ScopeKind::Keynotes,
                    ScopeKind::SheetNames,
                ],
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(repeated.scopes, vec![ScopeKind::Keynotes, ScopeKind::SheetNames]);
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(
            Some(&dir.path().join("nope.toml")),
            &dir.path().join("nope-local.toml"),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("bad.toml");
        fs::write(&local, "scopes = [\"rooms\"]").unwrap();
        assert!(Config::load_from(None, &local, Overrides::default()).is_err());
    }
}
