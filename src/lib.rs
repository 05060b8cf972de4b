//! # text2expression
//!
//! Converts written text into a timed sequence of mouth-shape (viseme) poses
//! for driving a 3D avatar's lip animation. Input is either raw IPA or
//! English text; output is the IPA string actually used, one timed
//! [`MouthPose`] per character, and a total duration estimate.
//!
//! ## Quick start
//!
//! ```
//! use text2expression::{text2expression, Language};
//!
//! // Raw IPA needs no dictionary — spaces are word breaks, "." is a pause.
//! let out = text2expression("haj . haw", Language::Ipa, None).unwrap();
//! assert_eq!(out.all.len(), out.text.chars().count());
//! ```
//!
//! English text goes through a pronunciation dictionary first:
//!
//! ```no_run
//! use text2expression::{text2expression, IpaDictionary, Language};
//!
//! let dict = IpaDictionary::from_resource("assets/en_ipa.txt");
//! let out = text2expression("Hi, how are you today", Language::English, Some(&dict)).unwrap();
//! println!("{} ({} ms)", out.text, out.duration);
//! ```
//!
//! ## Pipeline
//! 1. **Normalisation** — punctuation is isolated into `.` pause tokens,
//!    noise characters are stripped ([`normalize`]).
//! 2. **Lookup** — each token resolves to its primary IPA pronunciation;
//!    unknown words pass through literally ([`dictionary`]).
//! 3. **Mapping** — every character of the assembled IPA string becomes one
//!    timed blend-shape pose ([`viseme`]).
//! 4. **Estimation** — a closed-form duration estimate from word, character
//!    and pause counts ([`pipeline::estimate_runtime`]).
//!
//! The dictionary loads lazily, at most once, and fails open: a fetch error
//! is logged and the pipeline keeps running with every word unknown. Install
//! any [`log`]-compatible logger to see load failures.

pub mod dictionary;
pub mod normalize;
pub mod pipeline;
pub mod viseme;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use dictionary::{DictionaryError, DictionarySource, IpaDictionary, LookupResult};
pub use pipeline::{
    en2ipa, estimate_runtime, text2expression, ConvertError, IpaTextExpressions, Language,
};
pub use viseme::{
    ipa2mouth, MouthPose, CHARACTER_DURATION, PAUSE_DURATION, WORD_BREAK_DURATION,
};
