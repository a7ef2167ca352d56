//! Path selection - decides which path entries are retained.
//!
//! Selectors are either literal path strings or regular expressions.
//! Each selector records how many paths it matched so callers can
//! report selectors that matched nothing.

use std::path::Path;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::FilterError;
use crate::types::MatchMode;

#[derive(Debug, Clone)]
struct Entry {
    raw: String,
    regex: Option<Regex>,
}

impl Entry {
    fn matches(&self, path: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(path),
            None => self.raw == path,
        }
    }
}

/// A list of path selectors and the way they are matched.
#[derive(Debug, Clone)]
pub struct Selector {
    mode: MatchMode,
    entries: Vec<Entry>,
}

/// How many paths one selector matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorMatch {
    pub selector: String,
    pub matched: usize,
}

/// Result of applying a [`Selector`] to a document's paths.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Retained path entries, in document order.
    pub retained: Map<String, Value>,
    /// One record per selector, in selector order.
    pub matches: Vec<SelectorMatch>,
}

impl Selection {
    /// Selectors that matched no path.
    pub fn unmatched(&self) -> Vec<&str> {
        self.matches
            .iter()
            .filter(|m| m.matched == 0)
            .map(|m| m.selector.as_str())
            .collect()
    }
}

impl Selector {
    /// Build a selector in the given mode.
    ///
    /// Duplicate selectors are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidPattern` if `mode` is `Pattern` and a
    /// selector is not a valid regular expression.
    pub fn new<I, S>(selectors: I, mode: MatchMode) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<Entry> = Vec::new();
        for raw in selectors.into_iter().map(Into::into) {
            if entries.iter().any(|e| e.raw == raw) {
                continue;
            }
            let regex = match mode {
                MatchMode::Exact => None,
                MatchMode::Pattern => {
                    Some(Regex::new(&raw).map_err(|source| FilterError::InvalidPattern {
                        pattern: raw.clone(),
                        source,
                    })?)
                }
            };
            entries.push(Entry { raw, regex });
        }
        Ok(Self { mode, entries })
    }

    /// Literal selectors: a path is retained if it equals one of them.
    pub fn exact<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<Entry> = Vec::new();
        for raw in paths.into_iter().map(Into::into) {
            if !entries.iter().any(|e| e.raw == raw) {
                entries.push(Entry { raw, regex: None });
            }
        }
        Self {
            mode: MatchMode::Exact,
            entries,
        }
    }

    /// Regex selectors: a path is retained if any pattern matches within it.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidPattern` for the first pattern that
    /// fails to compile.
    pub fn pattern<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(patterns, MatchMode::Pattern)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any selector matches `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.matches(path))
    }

    /// Split `paths` into retained entries and per-selector match counts.
    pub fn select(&self, paths: &Map<String, Value>) -> Selection {
        let mut counts = vec![0usize; self.entries.len()];
        let mut retained = Map::new();

        for (path, item) in paths {
            let mut hit = false;
            for (entry, count) in self.entries.iter().zip(counts.iter_mut()) {
                if entry.matches(path) {
                    *count += 1;
                    hit = true;
                }
            }
            if hit {
                retained.insert(path.clone(), item.clone());
            }
        }

        let matches: Vec<SelectorMatch> = self
            .entries
            .iter()
            .zip(counts)
            .map(|(entry, matched)| SelectorMatch {
                selector: entry.raw.clone(),
                matched,
            })
            .collect();

        for m in matches.iter().filter(|m| m.matched == 0) {
            warn!(selector = %m.selector, "selector matched no path");
        }
        debug!(
            retained = retained.len(),
            total = paths.len(),
            "selected paths"
        );

        Selection { retained, matches }
    }
}

/// Parse selectors from text, one per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting
/// with `#` are skipped.
pub fn parse_selectors(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read selectors from a file, one per line.
///
/// # Errors
///
/// Returns `FilterError::FileNotFound` or `FilterError::ReadError`.
pub fn load_selectors(path: &Path) -> Result<Vec<String>, FilterError> {
    if !path.exists() {
        return Err(FilterError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| FilterError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_selectors(&content))
}
