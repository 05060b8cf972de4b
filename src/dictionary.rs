//! Word → IPA pronunciation dictionary.
//!
//! The dictionary is plain text, one entry per line, fields separated by
//! whitespace:
//!
//! ```text
//! hello      həˈloʊ
//! hello(1)   hɛˈloʊ
//! ```
//!
//! A `word(n)` key (n = 1..3) is the n-th alternate pronunciation of `word`;
//! variant numbering is contiguous and probing stops at the first gap.
//!
//! Loading is lazy and happens at most once per [`IpaDictionary`]: the first
//! lookup runs the fetch inside [`OnceCell::get_or_init`], which blocks any
//! concurrent first-access callers on that single in-flight load. A fetch or
//! read failure is logged and swallowed — the dictionary then behaves as
//! loaded-but-empty so the animation pipeline keeps running, and the failure
//! stays retrievable through [`IpaDictionary::load_error`].

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use once_cell::sync::OnceCell;
use thiserror::Error;

/// Failure while retrieving or reading the dictionary resource.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch dictionary from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read dictionary response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where the dictionary text comes from.
#[derive(Debug, Clone)]
pub enum DictionarySource {
    /// Local file, read with `std::fs`.
    Path(PathBuf),
    /// HTTP(S) URL, fetched with `ureq`.
    Url(String),
}

impl DictionarySource {
    fn fetch(&self) -> Result<String, DictionaryError> {
        match self {
            DictionarySource::Path(path) => {
                fs::read_to_string(path).map_err(|source| DictionaryError::Read {
                    path: path.clone(),
                    source,
                })
            }
            DictionarySource::Url(url) => {
                let response = ureq::get(url).call().map_err(|e| DictionaryError::Fetch {
                    url: url.clone(),
                    source: Box::new(e),
                })?;
                response.into_string().map_err(|source| DictionaryError::Body {
                    url: url.clone(),
                    source,
                })
            }
        }
    }
}

/// Outcome of a single word lookup.
///
/// On a hit `error` is `None` and `text` holds the primary transcription with
/// up to three alternates appended using the literal `" OR "` separator. On a
/// miss `error` is set and `text` echoes the queried word unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub error: Option<String>,
    pub text: String,
}

impl LookupResult {
    /// `true` when the word was present in the dictionary.
    pub fn is_found(&self) -> bool {
        self.error.is_none()
    }
}

/// Loaded dictionary contents plus the load outcome.
#[derive(Debug, Default)]
struct DictState {
    entries: HashMap<String, String>,
    load_error: Option<DictionaryError>,
}

/// Lazily loaded, immutable-after-load IPA pronunciation dictionary.
#[derive(Debug)]
pub struct IpaDictionary {
    source: Option<DictionarySource>,
    state: OnceCell<DictState>,
}

impl IpaDictionary {
    /// Dictionary backed by a local file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(DictionarySource::Path(path.into()))
    }

    /// Dictionary backed by an HTTP(S) URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(DictionarySource::Url(url.into()))
    }

    /// Dictionary backed by a resource string: `http://` / `https://`
    /// prefixes select a URL fetch, anything else is a file path.
    pub fn from_resource(resource: &str) -> Self {
        if resource.starts_with("http://") || resource.starts_with("https://") {
            Self::from_url(resource)
        } else {
            Self::from_path(Path::new(resource))
        }
    }

    /// Dictionary with preloaded entries and no backing resource.
    /// Intended for tests and embedded word lists.
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self {
            source: None,
            state: OnceCell::with_value(DictState {
                entries,
                load_error: None,
            }),
        }
    }

    fn new(source: DictionarySource) -> Self {
        Self {
            source: Some(source),
            state: OnceCell::new(),
        }
    }

    /// Run (or await) the one-time load and return the resulting state.
    fn state(&self) -> &DictState {
        self.state.get_or_init(|| match &self.source {
            None => DictState::default(),
            Some(source) => match source.fetch() {
                Ok(text) => {
                    let entries = parse_dictionary(&text);
                    log::debug!("ipa dictionary loaded: {} entries", entries.len());
                    DictState {
                        entries,
                        load_error: None,
                    }
                }
                Err(err) => {
                    // Fail open: keep animating with an empty dictionary.
                    log::error!("ipa dictionary load failed: {err}");
                    DictState {
                        entries: HashMap::new(),
                        load_error: Some(err),
                    }
                }
            },
        })
    }

    /// Trigger the load now (idempotent) and report whether it succeeded.
    ///
    /// Lookups never surface a load failure themselves; callers who need
    /// failure visibility check here.
    pub fn ensure_loaded(&self) -> Result<(), &DictionaryError> {
        match &self.state().load_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// The load failure, if the one-time load has run and failed.
    pub fn load_error(&self) -> Option<&DictionaryError> {
        self.state.get().and_then(|s| s.load_error.as_ref())
    }

    /// Number of entries (variant keys included). Triggers the load.
    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered pronunciation variants for a word: the base entry followed by
    /// `word(1)`, `word(2)`, `word(3)` while contiguously present. Empty when
    /// the word is unknown. Case-insensitive.
    pub fn variants(&self, word: &str) -> Vec<&str> {
        let entries = &self.state().entries;
        let key = word.to_lowercase();
        let mut out = Vec::new();
        if let Some(base) = entries.get(&key) {
            out.push(base.as_str());
            for n in 1..4 {
                match entries.get(&format!("{key}({n})")) {
                    Some(variant) => out.push(variant.as_str()),
                    None => break,
                }
            }
        }
        out
    }

    /// Case-insensitive lookup, rendering all variants into one string.
    pub fn lookup(&self, word: &str) -> LookupResult {
        let variants = self.variants(word);
        if variants.is_empty() {
            LookupResult {
                error: Some("Word not found".to_string()),
                text: word.to_string(),
            }
        } else {
            LookupResult {
                error: None,
                text: variants.join(" OR "),
            }
        }
    }
}

/// Parse newline-delimited `word <ws> ipa` records. Later duplicates win.
/// Lines with fewer than two fields carry no transcription and are skipped.
fn parse_dictionary(text: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(word), Some(ipa)) => {
                entries.insert(word.to_string(), ipa.to_string());
            }
            (Some(word), None) => {
                log::warn!("skipping dictionary line without transcription: {word}");
            }
            _ => {} // blank line
        }
    }
    entries
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
