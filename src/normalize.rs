//! Text normalisation — raw words in, lookup-ready tokens out.
//!
//! Turns whitespace-split input words into a clean token sequence for the
//! dictionary: a few special characters become words or punctuation,
//! punctuation is isolated into standalone pause markers (`"."`), everything
//! else non-alphanumeric is discarded, and runs of consecutive pause markers
//! collapse to one.
//!
//! The special-character substitutions are first-occurrence-only, not
//! global. A second `,` or `.` inside one word is stripped rather than
//! converted; token counts (and therefore durations) downstream depend on
//! this, so it must not be "fixed" to a global replace.

use once_cell::sync::Lazy;
use regex::Regex;

/// Everything outside this set is stripped after substitution.
static RE_DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.!?;:]").unwrap());

/// Punctuation that gets a space inserted before its first occurrence.
static RE_SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.!?;:]").unwrap());

static RE_WORD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w").unwrap());
static RE_NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// First-occurrence-only substitutions: `&`→`and`, `=`→`equals`, and the
/// first `,` / `.` each become a space-prefixed pause marker.
fn substitute_specials(word: &str) -> String {
    word.replacen('&', "and", 1)
        .replacen('=', "equals", 1)
        .replacen(',', " .", 1)
        .replacen('.', " .", 1)
}

/// Insert a space before the first special punctuation character. A string
/// left without any word character collapses to the pause marker; a string
/// without punctuation passes through unchanged.
fn space_before_first_special(input: &str) -> String {
    match RE_SPECIAL.find(input) {
        Some(m) => {
            let spaced = format!("{} {}", &input[..m.start()], &input[m.start()..]);
            if RE_WORD_CHAR.is_match(&spaced) {
                spaced
            } else {
                ".".to_string()
            }
        }
        None => input.to_string(),
    }
}

/// Drop every empty token that directly follows another empty token (a
/// leading empty token is dropped too), then turn the surviving empties into
/// pause markers.
fn collapse_empty_runs(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .enumerate()
        .filter(|(i, token)| !token.is_empty() || (*i > 0 && !tokens[i - 1].is_empty()))
        .map(|(_, token)| {
            if token.is_empty() {
                ".".to_string()
            } else {
                token.clone()
            }
        })
        .collect()
}

/// Normalise whitespace-split input words into dictionary-ready tokens.
///
/// Punctuation becomes isolated `"."` pause tokens, consecutive punctuation
/// collapses to a single pause, and non-alphanumeric noise is discarded.
/// A word that is pure punctuation noise may normalise to nothing at all.
pub fn normalize_words(words: &[&str]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for word in words {
        let substituted = substitute_specials(word);
        let stripped = RE_DISALLOWED.replace_all(&substituted, "");
        let spaced = space_before_first_special(&stripped);
        for sub in spaced.split(' ') {
            // De-duplicate empties at ingestion time.
            if sub.is_empty() && matches!(tokens.last(), Some(prev) if prev.is_empty()) {
                continue;
            }
            tokens.push(sub.to_string());
        }
    }

    let reduced: Vec<String> = tokens
        .iter()
        .map(|token| {
            if RE_WORD_CHAR.is_match(token) {
                // First run of non-word characters only.
                RE_NON_WORD_RUN.replace(token, "").into_owned()
            } else {
                String::new()
            }
        })
        .collect();

    collapse_empty_runs(&reduced)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
        normalize_words(&words)
    }

    #[test]
    fn test_plain_words_pass_through() {
        assert_eq!(normalize("how are you"), vec!["how", "are", "you"]);
    }

    #[test]
    fn test_comma_becomes_pause() {
        assert_eq!(normalize("Hi, how are you"), vec!["Hi", ".", "how", "are", "you"]);
    }

    #[test]
    fn test_punctuation_run_collapses() {
        assert_eq!(normalize("hi,,"), vec!["hi", "."]);
        assert_eq!(normalize("hi... there"), vec!["hi", ".", "there"]);
    }

    #[test]
    fn test_pure_punctuation_words() {
        // A lone punctuation word becomes a pause after a word...
        assert_eq!(normalize("hi !!!"), vec!["hi", "."]);
        // ...but leading punctuation with nothing before it vanishes.
        assert_eq!(normalize("!!!"), Vec::<String>::new());
    }

    #[test]
    fn test_ampersand_and_equals_substitution() {
        assert_eq!(normalize("you & me"), vec!["you", "and", "me"]);
        assert_eq!(normalize("a=b"), vec!["aequalsb"]);
    }

    #[test]
    fn test_substitutions_are_first_occurrence_only() {
        // The second & is stripped, not expanded.
        assert_eq!(normalize("a&b&c"), vec!["aandbc"]);
    }

    #[test]
    fn test_noise_characters_are_stripped() {
        assert_eq!(normalize("he*llo wo#rld"), vec!["hello", "world"]);
        assert_eq!(normalize("ca™t"), vec!["cat"]);
    }

    #[test]
    fn test_leading_punctuation_is_dropped_from_word() {
        assert_eq!(normalize(",hi"), vec!["hi"]);
    }

    #[test]
    fn test_no_adjacent_pause_markers() {
        for input in ["a,, b", ", . !", "x . . y", "a,.;b"] {
            let tokens = normalize(input);
            for pair in tokens.windows(2) {
                assert!(
                    !(pair[0] == "." && pair[1] == "."),
                    "adjacent pauses in {:?} from {:?}",
                    tokens,
                    input
                );
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), Vec::<String>::new());
    }
}
