//! IPA symbol → mouth-pose mapping.
//!
//! Walks an IPA string one character at a time and emits one timed
//! [`MouthPose`] per character. The symbol table covers the full IPA
//! consonant and vowel charts; space and `.` carry their own durations
//! (word break and pause), every other symbol gets the standard
//! per-character duration. Unknown characters produce a neutral pose, so
//! the mapping is total over any input string.
//!
//! Blend-weight references:
//!   VRM model viewer: <https://vrm-viewer-48655.web.app/>
//!   IPA charts:       <https://www.seeingspeech.ac.uk/ipa-charts/>

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Playback time of one pause marker (`.`), in milliseconds.
pub const PAUSE_DURATION: f64 = 270.0;

/// Playback time of one word break (space), in milliseconds.
pub const WORD_BREAK_DURATION: f64 = 12.0;

/// Playback time of one ordinary IPA symbol, in milliseconds.
pub const CHARACTER_DURATION: f64 = 40.05;

/// One animation frame: five mouth blend-shape targets plus how long the
/// renderer should hold them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouthPose {
    /// Hold time in milliseconds.
    pub duration: f64,
    pub aa: f64,
    pub ee: f64,
    pub ih: f64,
    pub oh: f64,
    pub ou: f64,
}

impl MouthPose {
    /// Neutral (silent) pose: all five blend weights at zero.
    pub fn neutral(duration: f64) -> Self {
        Self {
            duration,
            aa: 0.0,
            ee: 0.0,
            ih: 0.0,
            oh: 0.0,
            ou: 0.0,
        }
    }

    fn from_weights(duration: f64, [aa, ee, ih, oh, ou]: [f64; 5]) -> Self {
        Self {
            duration,
            aa,
            ee,
            ih,
            oh,
            ou,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Symbol table — data only, weights as [aa, ee, ih, oh, ou]
// ─────────────────────────────────────────────────────────────────────────────

/// Blend weights per IPA symbol. Space and `.` are handled separately since
/// they carry their own durations.
const MOUTH_WEIGHTS: &[(char, [f64; 5])] = &[
    // Vowels
    ('i', [0.22, 0.0, 1.0, 0.0, 0.0]),
    ('y', [0.0, 0.0, 0.0, 0.25, 1.0]),
    ('ɨ', [0.0, 0.41, 1.0, 0.0, 0.0]),
    ('ʉ', [0.0, 0.0, 0.0, 0.16, 1.0]),
    ('ɯ', [0.0, 0.09, 0.0, 0.07, 0.03]),
    ('u', [0.0, 0.0, 0.0, 0.27, 1.0]),
    ('ɪ', [0.0, 1.0, 0.0, 0.0, 0.0]),
    ('ʊ', [0.28, 0.0, 0.0, 0.0, 0.44]),
    ('e', [0.0, 1.0, 0.57, 0.0, 0.0]),
    ('ø', [0.0, 1.0, 0.0, 0.15, 0.21]),
    ('ɤ', [0.0, 0.5, 0.0, 0.0, 0.0]),
    ('o', [0.0, 0.0, 0.0, 1.0, 0.0]),
    ('ə', [0.51, 0.23, 0.34, 0.0, 0.11]),
    ('ɛ', [0.65, 0.24, 0.82, 0.0, 0.0]),
    ('œ', [0.43, 0.22, 0.0, 0.53, 0.0]),
    ('ʌ', [0.79, 0.0, 0.0, 0.27, 0.0]),
    ('ɔ', [0.0, 0.0, 0.41, 1.0, 0.0]),
    ('æ', [0.57, 0.45, 0.31, 0.0, 0.0]),
    ('a', [1.0, 0.0, 0.0, 0.26, 0.0]),
    ('ɶ', [0.5, 0.0, 0.0, 0.0, 0.18]),
    ('ɑ', [0.0, 0.63, 0.0, 0.0, 0.0]),
    ('ɒ', [0.38, 0.0, 0.0, 0.56, 0.27]),
    // Plosives
    ('p', [0.0, 0.0, 0.0, 0.0, 0.0]),
    ('b', [0.0, 0.0, 0.0, 0.0, 0.0]),
    ('t', [0.0, 0.0, 0.0, 0.0, 0.33]),
    ('d', [0.0, 0.0, 0.0, 0.0, 0.33]),
    ('ʈ', [0.28, 0.0, 0.0, 0.24, 0.27]),
    ('ɖ', [0.28, 0.0, 0.0, 0.24, 0.27]),
    ('c', [0.28, 0.0, 0.23, 0.13, 0.18]),
    ('ɟ', [0.13, 0.0, 0.15, 0.07, 0.12]),
    ('k', [0.37, 0.0, 0.0, 0.0, 0.29]),
    ('ɡ', [0.08, 0.0, 0.0, 0.19, 0.0]),
    ('q', [0.08, 0.0, 0.0, 0.19, 0.0]),
    ('ɢ', [0.08, 0.0, 0.0, 0.19, 0.0]),
    ('ʔ', [0.15, 0.0, 0.0, 0.15, 0.0]),
    // Nasals
    ('m', [0.0, 0.0, 0.0, 0.0, 0.0]),
    ('ɱ', [0.0, 0.0, 0.0, 0.03, 0.08]),
    ('n', [0.0, 0.0, 0.0, 0.03, 0.41]),
    ('ɳ', [0.0, 0.0, 0.0, 0.03, 0.88]),
    ('ɲ', [0.0, 0.0, 0.0, 0.02, 0.74]),
    ('ŋ', [0.0, 0.0, 0.0, 0.0, 0.53]),
    ('ɴ', [0.0, 0.0, 0.0, 0.0, 0.38]),
    // Trills, taps, flaps
    ('ʙ', [0.0, 0.0, 0.0, 0.15, 0.52]),
    ('r', [0.0, 0.0, 0.0, 0.0, 0.38]),
    ('ʀ', [0.16, 0.0, 0.0, 0.06, 0.71]),
    ('ⱱ', [0.16, 0.05, 0.06, 0.0, 0.0]),
    ('ɾ', [0.05, 0.0, 0.14, 0.11, 0.14]),
    ('ɽ', [0.09, 0.0, 0.0, 0.09, 0.44]),
    // Fricatives
    ('ɸ', [0.0, 0.0, 0.0, 0.0, 0.45]),
    ('β', [0.0, 0.0, 0.0, 0.0, 0.34]),
    ('f', [0.0, 0.0, 0.0, 0.05, 0.35]),
    ('v', [0.0, 0.0, 0.0, 0.0, 0.31]),
    ('θ', [0.0, 0.07, 0.27, 0.0, 0.47]),
    ('ð', [0.03, 0.0, 0.19, 0.0, 0.3]),
    ('s', [0.0, 0.0, 0.85, 0.0, 0.12]),
    ('z', [0.0, 0.0, 0.46, 0.0, 0.3]),
    ('ʃ', [0.0, 0.16, 0.4, 0.0, 0.51]),
    ('ʒ', [0.05, 0.08, 0.39, 0.0, 0.42]),
    ('ʂ', [0.0, 0.0, 0.49, 0.1, 0.05]),
    ('ʐ', [0.0, 0.0, 1.0, 0.05, 0.17]),
    ('ç', [0.0, 0.16, 1.0, 0.0, 0.18]),
    ('ʝ', [0.0, 0.17, 1.0, 0.0, 0.28]),
    ('x', [0.23, 0.0, 0.21, 0.0, 0.0]),
    ('ɣ', [0.11, 0.0, 0.2, 0.0, 0.15]),
    ('χ', [0.0, 0.2, 0.0, 0.18, 0.46]),
    ('ʁ', [0.0, 0.0, 0.55, 0.0, 0.4]),
    ('ħ', [0.07, 0.0, 0.0, 0.16, 0.32]),
    ('ʕ', [0.0, 0.0, 0.16, 0.0, 0.44]),
    ('h', [0.26, 0.0, 0.0, 0.17, 0.0]),
    ('ɦ', [0.0, 0.0, 0.0, 0.28, 0.0]),
    ('ɬ', [0.0, 0.19, 0.42, 0.0, 0.3]),
    ('ɮ', [0.0, 0.19, 0.3, 0.0, 0.26]),
    // Approximants
    ('ʋ', [0.0, 0.0, 0.0, 0.0, 0.14]),
    ('ɹ', [0.0, 0.08, 0.0, 0.1, 0.09]),
    ('ɻ', [0.0, 0.0, 0.0, 0.22, 0.22]),
    ('j', [0.11, 0.0, 0.94, 0.0, 0.0]),
    ('ɰ', [0.0, 0.15, 0.21, 0.0, 0.0]),
    ('l', [0.01, 0.22, 0.08, 0.0, 0.0]),
    ('ɭ', [0.1, 0.34, 0.24, 0.0, 0.0]),
    ('ʎ', [0.02, 0.24, 0.22, 0.0, 0.0]),
    ('ʟ', [0.0, 0.25, 0.0, 0.0, 0.0]),
    // Clicks and implosives
    ('ʘ', [0.0, 0.0, 0.0, 0.0, 0.14]),
    ('ɓ', [0.0, 0.0, 0.0, 0.0, 0.0]),
    ('ǀ', [0.0, 0.0, 0.0, 0.0, 0.27]),
    ('ɗ', [0.0, 0.09, 0.1, 0.0, 0.28]),
    ('ǃ', [0.0, 0.0, 0.04, 0.09, 0.06]),
    ('ʄ', [0.0, 0.0, 0.42, 0.0, 0.35]),
    ('ǂ', [0.0, 0.0, 0.57, 0.15, 0.07]),
    ('ɠ', [0.09, 0.0, 0.0, 0.11, 0.0]),
    ('ǁ', [0.0, 0.0, 0.0, 0.15, 0.19]),
    ('ʛ', [0.0, 0.13, 0.0, 0.15, 0.03]),
    // Co-articulated and other symbols
    ('ʍ', [0.0, 0.0, 0.0, 0.25, 0.34]),
    ('ʑ', [0.0, 0.3, 0.22, 0.0, 0.0]),
    ('ɕ', [0.0, 0.31, 0.34, 0.0, 0.0]),
    ('w', [0.0, 0.0, 0.0, 0.0, 1.0]),
    ('ɺ', [0.0, 0.08, 0.18, 0.0, 0.19]),
    ('ɥ', [0.0, 0.0, 0.0, 0.22, 0.86]),
    ('ɧ', [0.0, 0.0, 0.0, 0.22, 0.27]),
    ('ʜ', [0.0, 0.0, 0.0, 0.16, 0.23]),
    ('ʢ', [0.0, 0.0, 0.0, 0.16, 0.17]),
    ('ʡ', [0.0, 0.0, 0.0, 0.13, 0.16]),
];

/// Character → finished pose, built at first use. Space and `.` already
/// carry their word-break / pause durations; everything else is merged with
/// [`CHARACTER_DURATION`] here so lookups return complete frames.
static MOUTH_MAP: Lazy<HashMap<char, MouthPose>> = Lazy::new(|| {
    let mut map: HashMap<char, MouthPose> = MOUTH_WEIGHTS
        .iter()
        .map(|&(symbol, weights)| (symbol, MouthPose::from_weights(CHARACTER_DURATION, weights)))
        .collect();
    map.insert(' ', MouthPose::neutral(WORD_BREAK_DURATION));
    map.insert('.', MouthPose::neutral(PAUSE_DURATION));
    map
});

/// Pose for a single IPA symbol. Unknown symbols map to a neutral pose at
/// the standard character duration, so this never fails.
pub fn symbol_pose(symbol: char) -> MouthPose {
    MOUTH_MAP
        .get(&symbol)
        .copied()
        .unwrap_or_else(|| MouthPose::neutral(CHARACTER_DURATION))
}

/// Convert an IPA string into one timed pose per character.
///
/// The output length always equals the number of characters in the input,
/// spaces and pause markers included.
pub fn ipa2mouth(ipa: &str) -> Vec<MouthPose> {
    ipa.chars().map(symbol_pose).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_in_range() {
        for &(symbol, weights) in MOUTH_WEIGHTS {
            for w in weights {
                assert!(
                    (0.0..=1.0).contains(&w),
                    "weight {} out of range for symbol {}",
                    w,
                    symbol
                );
            }
        }
    }

    #[test]
    fn test_table_symbols_unique() {
        let mut seen = std::collections::HashSet::new();
        for &(symbol, _) in MOUTH_WEIGHTS {
            assert!(seen.insert(symbol), "duplicate table entry for {}", symbol);
        }
    }

    #[test]
    fn test_table_durations() {
        for &(symbol, _) in MOUTH_WEIGHTS {
            assert_eq!(symbol_pose(symbol).duration, CHARACTER_DURATION);
        }
        assert_eq!(symbol_pose(' ').duration, WORD_BREAK_DURATION);
        assert_eq!(symbol_pose('.').duration, PAUSE_DURATION);
    }

    #[test]
    fn test_space_and_pause_are_neutral() {
        assert_eq!(symbol_pose(' '), MouthPose::neutral(WORD_BREAK_DURATION));
        assert_eq!(symbol_pose('.'), MouthPose::neutral(PAUSE_DURATION));
    }

    #[test]
    fn test_unknown_symbol_is_neutral() {
        for unknown in ['#', '中', 'ˈ', 'Z'] {
            assert_eq!(
                symbol_pose(unknown),
                MouthPose::neutral(CHARACTER_DURATION),
                "symbol {} should be unmapped",
                unknown
            );
        }
    }

    #[test]
    fn test_one_pose_per_character() {
        for ipa in ["", ".", "haj . haw ɑɹ ju tʌdej", "x#y z"] {
            assert_eq!(ipa2mouth(ipa).len(), ipa.chars().count(), "input: {:?}", ipa);
        }
    }

    #[test]
    fn test_known_vowel_weights() {
        let pose = symbol_pose('a');
        assert_eq!(pose.aa, 1.0);
        assert_eq!(pose.oh, 0.26);
        assert_eq!(pose.duration, CHARACTER_DURATION);
    }

    #[test]
    fn test_pose_serializes_to_json() {
        let json = serde_json::to_value(MouthPose::neutral(12.0)).unwrap();
        assert_eq!(json["duration"], 12.0);
        assert_eq!(json["aa"], 0.0);
        assert_eq!(json["ou"], 0.0);
    }
}
