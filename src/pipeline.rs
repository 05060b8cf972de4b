//! Pipeline orchestrator — text in, timed mouth poses out.
//!
//! Composes the normaliser, dictionary and viseme mapper per selected
//! language. `"ipa"` input bypasses normalisation and lookup entirely; `"en"`
//! input is normalised, looked up word by word, and assembled into one
//! space-delimited IPA string with `.` tokens marking pauses.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    dictionary::IpaDictionary,
    normalize::normalize_words,
    viseme::{ipa2mouth, MouthPose, CHARACTER_DURATION, PAUSE_DURATION, WORD_BREAK_DURATION},
};

/// The literal token separating phrases in an assembled IPA string.
pub const PAUSE_TOKEN: &str = ".";

/// Safety slack applied on top of the closed-form runtime estimate.
const ESTIMATE_SLACK: f64 = 1.1;

/// Input languages the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// English text, converted through the pronunciation dictionary.
    #[serde(rename = "en")]
    English,
    /// Raw IPA passthrough (the default).
    #[default]
    #[serde(rename = "ipa")]
    Ipa,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Ipa => "ipa",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "ipa" => Ok(Language::Ipa),
            other => Err(ConvertError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Configuration failures surfaced to the caller before the pipeline runs.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(
        "a dictionary resource is required for language '{language}'; \
         only raw \"ipa\" input works without one"
    )]
    MissingDictionary { language: Language },

    #[error("unsupported language '{0}' (expected \"en\" or \"ipa\")")]
    UnsupportedLanguage(String),
}

/// Final pipeline output: the IPA string actually animated, its estimated
/// playback time in milliseconds, and one pose per character of the string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpaTextExpressions {
    pub text: String,
    pub duration: f64,
    pub all: Vec<MouthPose>,
}

/// Convert text in `language` into a timed mouth-pose sequence.
///
/// `dictionary` is mandatory for every language except [`Language::Ipa`];
/// passing `None` for English fails synchronously, before any fetch.
///
/// # Example
///
/// ```
/// use text2expression::{text2expression, Language};
///
/// let out = text2expression("həloʊ wɝld", Language::Ipa, None).unwrap();
/// assert_eq!(out.all.len(), out.text.chars().count());
/// ```
pub fn text2expression(
    text: &str,
    language: Language,
    dictionary: Option<&IpaDictionary>,
) -> Result<IpaTextExpressions, ConvertError> {
    match language {
        Language::Ipa => Ok(expressions_from_ipa(text.to_string())),
        Language::English => {
            let dict = dictionary.ok_or(ConvertError::MissingDictionary { language })?;
            Ok(expressions_from_ipa(en2ipa(text, dict)))
        }
    }
}

fn expressions_from_ipa(ipa: String) -> IpaTextExpressions {
    IpaTextExpressions {
        duration: estimate_runtime(&ipa),
        all: ipa2mouth(&ipa),
        text: ipa,
    }
}

/// Assemble English text into a space-delimited IPA string.
///
/// Each normalised token is looked up and only the primary pronunciation is
/// kept (`" OR "` alternates discarded). Pause tokens pass through without a
/// dictionary query, and unknown words flow through literally — the viseme
/// mapper renders their unmapped letters as neutral poses.
pub fn en2ipa(text: &str, dictionary: &IpaDictionary) -> String {
    let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
    let tokens = normalize_words(&words);

    let mut ipas: Vec<String> = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if token == PAUSE_TOKEN {
            ipas.push(PAUSE_TOKEN.to_string());
            continue;
        }
        let result = dictionary.lookup(token);
        let primary = result
            .text
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string();
        ipas.push(primary);
    }
    ipas.join(" ")
}

/// Estimate the playback time of a space-delimited IPA string, in
/// milliseconds.
///
/// Every space-separated segment counts as a word; segments equal to `.`
/// count as pauses, any other segment contributes its character count. The
/// closed form is `words·12 + chars·40.05 + pauses·270`, times a fixed 1.1
/// slack factor.
pub fn estimate_runtime(ipa: &str) -> f64 {
    let mut word_count = 0usize;
    let mut character_count = 0usize;
    let mut pause_count = 0usize;

    for segment in ipa.split(' ') {
        word_count += 1;
        if segment == PAUSE_TOKEN {
            pause_count += 1;
        } else {
            character_count += segment.chars().count();
        }
    }

    let estimate = word_count as f64 * WORD_BREAK_DURATION
        + character_count as f64 * CHARACTER_DURATION
        + pause_count as f64 * PAUSE_DURATION;
    estimate * ESTIMATE_SLACK
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn greeting_dict() -> IpaDictionary {
        let entries: HashMap<String, String> = [
            ("hi", "haj"),
            ("how", "haw"),
            ("are", "ɑɹ"),
            ("you", "ju"),
            ("today", "tʌdej"),
        ]
        .into_iter()
        .map(|(w, ipa)| (w.to_string(), ipa.to_string()))
        .collect();
        IpaDictionary::from_entries(entries)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_language_codes_round_trip() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("ipa".parse::<Language>().unwrap(), Language::Ipa);
        assert_eq!(Language::English.to_string(), "en");
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(ConvertError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_missing_dictionary_is_synchronous_config_error() {
        let err = text2expression("hello", Language::English, None).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingDictionary {
                language: Language::English
            }
        ));
        assert!(err.to_string().contains("'en'"));
    }

    #[test]
    fn test_ipa_passthrough() {
        let out = text2expression("haj . haw", Language::Ipa, None).unwrap();
        assert_eq!(out.text, "haj . haw");
        assert_eq!(out.all.len(), out.text.chars().count());
    }

    #[test]
    fn test_english_greeting_end_to_end() {
        let dict = greeting_dict();
        let out = text2expression("Hi, how are you today", Language::English, Some(&dict)).unwrap();
        assert_eq!(out.text, "haj . haw ɑɹ ju tʌdej");
        assert_eq!(out.all.len(), out.text.chars().count());
        assert_close(out.duration, estimate_runtime("haj . haw ɑɹ ju tʌdej"));
    }

    #[test]
    fn test_single_pause_end_to_end() {
        let out = text2expression(".", Language::Ipa, None).unwrap();
        assert_eq!(out.text, ".");
        assert_eq!(out.all, vec![MouthPose::neutral(PAUSE_DURATION)]);
        assert_close(out.duration, (WORD_BREAK_DURATION + PAUSE_DURATION) * 1.1);
    }

    #[test]
    fn test_unknown_word_passes_through_literally() {
        let dict = greeting_dict();
        assert_eq!(en2ipa("hi stranger", &dict), "haj stranger");
    }

    #[test]
    fn test_assembler_keeps_primary_pronunciation_only() {
        let entries: HashMap<String, String> = [("read", "ɹid"), ("read(1)", "ɹɛd")]
            .into_iter()
            .map(|(w, ipa)| (w.to_string(), ipa.to_string()))
            .collect();
        let dict = IpaDictionary::from_entries(entries);
        assert_eq!(en2ipa("read", &dict), "ɹid");
    }

    #[test]
    fn test_pause_tokens_skip_the_dictionary() {
        // A dictionary that (perversely) defines "." must not affect pauses.
        let entries: HashMap<String, String> =
            [(".".to_string(), "XXX".to_string())].into_iter().collect();
        let dict = IpaDictionary::from_entries(entries);
        assert_eq!(en2ipa("a , b", &dict), "a . b");
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let s = "haj . haw ɑɹ ju tʌdej";
        assert_eq!(estimate_runtime(s), estimate_runtime(s));
    }

    #[test]
    fn test_estimate_known_value() {
        // 1 word that is a pause: (1*12 + 0*40.05 + 1*270) * 1.1
        assert_close(estimate_runtime("."), 310.2);
    }

    #[test]
    fn test_estimate_scales_with_trailing_pause() {
        let base = "haj haw";
        let with_pause = "haj haw .";
        let delta = estimate_runtime(with_pause) - estimate_runtime(base);
        assert_close(delta, (WORD_BREAK_DURATION + PAUSE_DURATION) * 1.1);
    }

    #[test]
    fn test_output_serializes_to_json() {
        let out = text2expression("a", Language::Ipa, None).unwrap();
        let json = serde_json::to_string(&out).unwrap();
        let back: IpaTextExpressions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
    }
}
