// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key signatures and diatonic scales.
//!
//! Keys are named by their tonic, with case encoding the mode: "Eb" is
//! E-flat major, "c#" is C-sharp minor. Only the fifteen keys of the circle
//! of fifths (seven flats through seven sharps) are recognized.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::notes::{self, AccidentalStyle, FIFTHS, NATURAL_LETTERS};
use crate::error::{Result, TheoryError};

/// Circle of fifths, seven flats to seven sharps, as (major, relative minor)
pub const KEYS: [(&str, &str); 15] = [
    ("Cb", "ab"), // 7 b
    ("Gb", "eb"), // 6 b
    ("Db", "bb"), // 5 b
    ("Ab", "f"),  // 4 b
    ("Eb", "c"),  // 3 b
    ("Bb", "g"),  // 2 b
    ("F", "d"),   // 1 b
    ("C", "a"),   // nothing
    ("G", "e"),   // 1 #
    ("D", "b"),   // 2 #
    ("A", "f#"),  // 3 #
    ("E", "c#"),  // 4 #
    ("B", "g#"),  // 5 #
    ("F#", "d#"), // 6 #
    ("C#", "a#"), // 7 #
];

/// Key mode, encoded in key names by the case of the tonic letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Mode implied by the case of a key name's first character
    pub fn of(key: &str) -> Option<Mode> {
        let first = key.chars().next()?;
        if first.is_ascii_uppercase() {
            Some(Mode::Major)
        } else if first.is_ascii_lowercase() {
            Some(Mode::Minor)
        } else {
            None
        }
    }

    /// Get a human-readable name for this mode
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Check whether a key appears in the circle-of-fifths table
pub fn is_valid_key(key: &str) -> bool {
    KEYS.iter().any(|&(major, minor)| key == major || key == minor)
}

/// Fail with `InvalidKey` unless the key is recognized
pub fn validate_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(TheoryError::InvalidKey(key.to_string()))
    }
}

/// Major key and relative minor for a signed accidental count
pub fn get_key(accidentals: i32) -> Result<(&'static str, &'static str)> {
    if !(-7..=7).contains(&accidentals) {
        return Err(TheoryError::SignatureOutOfRange(accidentals));
    }
    Ok(KEYS[(accidentals + 7) as usize])
}

/// Signed accidental count of a key: negative for flats, positive for sharps
pub fn get_key_signature(key: &str) -> Result<i8> {
    validate_key(key)?;
    let row = match Mode::of(key) {
        Some(Mode::Major) => KEYS.iter().position(|&(major, _)| major == key),
        _ => KEYS.iter().position(|&(_, minor)| minor == key),
    };
    row.map(|row| row as i8 - 7)
        .ok_or_else(|| TheoryError::InvalidKey(key.to_string()))
}

/// The accidentals written in a key's signature, in signature order
///
/// Sharps follow F C G D A E B; flats follow the same order backwards.
pub fn get_key_signature_accidentals(key: &str) -> Result<Vec<String>> {
    let signature = get_key_signature(key)?;
    let count = signature.unsigned_abs() as usize;
    let accidentals = if signature < 0 {
        FIFTHS
            .iter()
            .rev()
            .take(count)
            .map(|letter| format!("{letter}{}", AccidentalStyle::Flat.symbol()))
            .collect()
    } else {
        FIFTHS
            .iter()
            .take(count)
            .map(|letter| format!("{letter}{}", AccidentalStyle::Sharp.symbol()))
            .collect()
    };
    Ok(accidentals)
}

/// Relative major of a minor key ("a" -> "C")
pub fn relative_major(key: &str) -> Result<&'static str> {
    KEYS.iter()
        .find(|&&(_, minor)| minor == key)
        .map(|&(major, _)| major)
        .ok_or_else(|| TheoryError::WrongMode {
            key: key.to_string(),
            expected: Mode::Minor,
        })
}

/// Relative minor of a major key ("C" -> "a")
pub fn relative_minor(key: &str) -> Result<&'static str> {
    KEYS.iter()
        .find(|&&(major, _)| major == key)
        .map(|&(_, minor)| minor)
        .ok_or_else(|| TheoryError::WrongMode {
            key: key.to_string(),
            expected: Mode::Major,
        })
}

/// Diatonic scale of a key using the process-wide cache
pub fn get_notes(key: &str) -> Result<Arc<DiatonicScale>> {
    KeyCache::shared().get_notes(key)
}

/// The seven notes of a natural major or minor key, starting at the tonic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiatonicScale {
    notes: [String; 7],
}

impl DiatonicScale {
    /// Build the scale for a key by rotating the natural letters to the
    /// tonic and applying the key signature
    fn build(key: &str) -> Result<Self> {
        let altered: HashMap<char, String> = get_key_signature_accidentals(key)?
            .into_iter()
            .map(|accidental| (notes::split(&accidental).0, accidental))
            .collect();

        let tonic = key.chars().next().map(|c| c.to_ascii_uppercase());
        let tonic_index = tonic
            .and_then(notes::letter_index)
            .ok_or_else(|| TheoryError::InvalidKey(key.to_string()))?;

        let notes = std::array::from_fn(|i| {
            let letter = NATURAL_LETTERS[(tonic_index + i) % 7];
            altered
                .get(&letter)
                .cloned()
                .unwrap_or_else(|| letter.to_string())
        });

        Ok(Self { notes })
    }

    /// Get the notes in scale order
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Get the tonic
    pub fn tonic(&self) -> &str {
        &self.notes[0]
    }

    /// Iterate over the notes in scale order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.notes.iter().map(String::as_str)
    }

    /// Number of notes (always seven)
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Scale position (0-based) of the note with the given letter
    pub fn position_of_letter(&self, letter: char) -> Option<usize> {
        self.notes.iter().position(|n| n.starts_with(letter))
    }
}

impl Index<usize> for DiatonicScale {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.notes[index]
    }
}

impl fmt::Display for DiatonicScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notes.join(" "))
    }
}

/// Memoized key -> diatonic scale lookups
///
/// Scales are pure functions of the key, so entries never go stale. The
/// cache can be shared between threads; two threads missing on the same key
/// at once both compute it and one result wins.
#[derive(Debug, Default)]
pub struct KeyCache {
    scales: RwLock<HashMap<String, Arc<DiatonicScale>>>,
}

impl KeyCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by the free functions
    pub fn shared() -> &'static KeyCache {
        static SHARED: OnceLock<KeyCache> = OnceLock::new();
        SHARED.get_or_init(KeyCache::new)
    }

    /// Diatonic scale of a key, computed on first request
    pub fn get_notes(&self, key: &str) -> Result<Arc<DiatonicScale>> {
        if let Some(scale) = self
            .scales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Ok(Arc::clone(scale));
        }

        validate_key(key)?;
        let scale = Arc::new(DiatonicScale::build(key)?);
        debug!(key, scale = %scale, "cached diatonic scale");

        let mut scales = self.scales.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(scales.entry(key.to_string()).or_insert(scale)))
    }

    /// Number of cached keys
    pub fn len(&self) -> usize {
        self.scales.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached scale
    pub fn clear(&self) {
        self.scales
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// A validated key with its mode and signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    key: String,
    mode: Mode,
    signature: i8,
    name: String,
}

impl Key {
    /// Create a key from its name ("C", "Eb", "f#")
    pub fn new(key: &str) -> Result<Self> {
        let signature = get_key_signature(key)?;
        let mode = Mode::of(key).ok_or_else(|| TheoryError::InvalidKey(key.to_string()))?;

        let (tonic, accidental) = key.split_at(1);
        let accidental = match accidental {
            "b" => " flat",
            "#" => " sharp",
            _ => "",
        };
        let name = format!("{}{} {}", tonic.to_ascii_uppercase(), accidental, mode);

        Ok(Self {
            key: key.to_string(),
            mode,
            signature,
            name,
        })
    }

    /// The key identifier as given
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Signed accidental count
    pub fn signature(&self) -> i8 {
        self.signature
    }

    /// Long name, e.g. "E flat major"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key's diatonic scale
    pub fn notes(&self) -> Result<Arc<DiatonicScale>> {
        get_notes(&self.key)
    }

    /// The relative key of the other mode
    pub fn relative(&self) -> Result<Key> {
        match self.mode {
            Mode::Major => Key::new(relative_minor(&self.key)?),
            Mode::Minor => Key::new(relative_major(&self.key)?),
        }
    }
}

impl FromStr for Key {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Key::new(s.trim())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("C"));
        assert!(is_valid_key("a"));
        assert!(is_valid_key("Cb"));
        assert!(is_valid_key("a#"));
        assert!(!is_valid_key("D#"));
        assert!(!is_valid_key("Fb"));
        assert!(!is_valid_key("c##"));
        assert!(!is_valid_key(""));
    }

    #[test]
    fn test_get_key() {
        assert_eq!(get_key(0).unwrap(), ("C", "a"));
        assert_eq!(get_key(-3).unwrap(), ("Eb", "c"));
        assert_eq!(get_key(7).unwrap(), ("C#", "a#"));
        assert_eq!(get_key(8), Err(TheoryError::SignatureOutOfRange(8)));
        assert_eq!(get_key(-8), Err(TheoryError::SignatureOutOfRange(-8)));
    }

    #[test]
    fn test_get_key_signature() {
        assert_eq!(get_key_signature("C").unwrap(), 0);
        assert_eq!(get_key_signature("F").unwrap(), -1);
        assert_eq!(get_key_signature("G").unwrap(), 1);
        assert_eq!(get_key_signature("c").unwrap(), -3);
        assert_eq!(get_key_signature("a").unwrap(), 0);
        assert_eq!(get_key_signature("Cb").unwrap(), -7);
        assert_eq!(get_key_signature("a#").unwrap(), 7);
        assert_eq!(
            get_key_signature("H"),
            Err(TheoryError::InvalidKey("H".to_string()))
        );
    }

    #[test]
    fn test_minor_signature_matches_relative_major() {
        for &(major, minor) in KEYS.iter() {
            assert_eq!(
                get_key_signature(major).unwrap(),
                get_key_signature(minor).unwrap()
            );
        }
    }

    #[test]
    fn test_get_key_signature_accidentals() {
        assert!(get_key_signature_accidentals("C").unwrap().is_empty());
        assert_eq!(get_key_signature_accidentals("Eb").unwrap(), vec!["Bb", "Eb", "Ab"]);
        assert_eq!(get_key_signature_accidentals("A").unwrap(), vec!["F#", "C#", "G#"]);
        assert_eq!(get_key_signature_accidentals("d").unwrap(), vec!["Bb"]);
        assert_eq!(get_key_signature_accidentals("C#").unwrap().len(), 7);
    }

    #[test]
    fn test_get_notes() {
        let cache = KeyCache::new();
        assert_eq!(
            cache.get_notes("F").unwrap().notes(),
            &["F", "G", "A", "Bb", "C", "D", "E"]
        );
        assert_eq!(
            cache.get_notes("c").unwrap().notes(),
            &["C", "D", "Eb", "F", "G", "Ab", "Bb"]
        );
        assert_eq!(
            cache.get_notes("E").unwrap().notes(),
            &["E", "F#", "G#", "A", "B", "C#", "D#"]
        );
        assert_eq!(
            cache.get_notes("ab").unwrap().notes(),
            &["Ab", "Bb", "Cb", "Db", "Eb", "Fb", "Gb"]
        );
    }

    #[test]
    fn test_get_notes_invalid_key() {
        let cache = KeyCache::new();
        assert_eq!(
            cache.get_notes("D#").unwrap_err(),
            TheoryError::InvalidKey("D#".to_string())
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_every_scale_cycles_letters() {
        let cache = KeyCache::new();
        for &(major, minor) in KEYS.iter() {
            for key in [major, minor] {
                let scale = cache.get_notes(key).unwrap();
                assert_eq!(scale.len(), 7);
                let start = notes::letter_index(scale.tonic().chars().next().unwrap()).unwrap();
                for (i, note) in scale.iter().enumerate() {
                    assert!(note.len() <= 2, "{key}: {note}");
                    assert!(note.starts_with(NATURAL_LETTERS[(start + i) % 7]));
                }
            }
        }
    }

    #[test]
    fn test_cache_returns_same_scale() {
        let cache = KeyCache::new();
        let first = cache.get_notes("Bb").unwrap();
        let second = cache.get_notes("Bb").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        let third = cache.get_notes("Bb").unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_relative_keys() {
        assert_eq!(relative_major("a").unwrap(), "C");
        assert_eq!(relative_major("f#").unwrap(), "A");
        assert_eq!(relative_minor("C").unwrap(), "a");
        assert_eq!(relative_minor("Eb").unwrap(), "c");
        assert_eq!(
            relative_major("C"),
            Err(TheoryError::WrongMode {
                key: "C".to_string(),
                expected: Mode::Minor
            })
        );
        assert!(relative_minor("a").is_err());
    }

    #[test]
    fn test_key_value() {
        let key = Key::new("Eb").unwrap();
        assert_eq!(key.mode(), Mode::Major);
        assert_eq!(key.signature(), -3);
        assert_eq!(key.name(), "E flat major");
        assert_eq!(key.to_string(), "E flat major");

        let key: Key = "c#".parse().unwrap();
        assert_eq!(key.mode(), Mode::Minor);
        assert_eq!(key.name(), "C sharp minor");
        assert_eq!(key.relative().unwrap().key(), "E");

        assert_eq!(Key::new("g").unwrap().name(), "G minor");
        assert!(Key::new("D#").is_err());
    }

    #[test]
    fn test_mode_of() {
        assert_eq!(Mode::of("C"), Some(Mode::Major));
        assert_eq!(Mode::of("c"), Some(Mode::Minor));
        assert_eq!(Mode::of("#"), None);
        assert_eq!(Mode::of(""), None);
    }
}
