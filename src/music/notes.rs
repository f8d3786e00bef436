// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch-class arithmetic on spelled note names.
//!
//! A spelled note is a natural letter followed by any number of `#` and `b`
//! symbols ("C", "F#", "Ebb", "C##b"). This module converts spellings to
//! pitch classes (0-11) and back, and adds or removes accidentals while
//! keeping the letter.

use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};

/// Pitch class type (0-11, C = 0)
pub type PitchClass = u8;

/// The natural letters in scale order
pub const NATURAL_LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Order of sharps in a key signature; flats use it backwards
pub const FIFTHS: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Which accidental to use when spelling a pitch class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentalStyle {
    #[default]
    Sharp,
    Flat,
}

impl AccidentalStyle {
    /// The accidental symbol
    pub fn symbol(self) -> char {
        match self {
            AccidentalStyle::Sharp => '#',
            AccidentalStyle::Flat => 'b',
        }
    }

    /// The opposite style
    pub fn opposite(self) -> Self {
        match self {
            AccidentalStyle::Sharp => AccidentalStyle::Flat,
            AccidentalStyle::Flat => AccidentalStyle::Sharp,
        }
    }
}

impl TryFrom<char> for AccidentalStyle {
    type Error = TheoryError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '#' => Ok(AccidentalStyle::Sharp),
            'b' => Ok(AccidentalStyle::Flat),
            other => Err(TheoryError::InvalidAccidental(other)),
        }
    }
}

impl fmt::Display for AccidentalStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Chromatic value of a natural letter
pub fn letter_value(letter: char) -> Option<PitchClass> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Position of a natural letter in C D E F G A B
pub fn letter_index(letter: char) -> Option<usize> {
    NATURAL_LETTERS.iter().position(|&l| l == letter)
}

/// Check that a note name is a natural letter followed only by `#`/`b`
pub fn is_valid_note(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(letter) if letter_value(letter).is_some() => chars.all(|c| c == '#' || c == 'b'),
        _ => false,
    }
}

/// Fail with `InvalidNote` unless the name is well formed
pub fn validate_note(name: &str) -> Result<()> {
    if is_valid_note(name) {
        Ok(())
    } else {
        Err(TheoryError::InvalidNote(name.to_string()))
    }
}

/// Split a validated name into its letter and accidental suffix
pub(crate) fn split(name: &str) -> (char, &str) {
    // Validated names start with an ASCII letter
    let letter = name.as_bytes()[0] as char;
    (letter, &name[1..])
}

/// Net accidental count of a suffix (+1 per `#`, -1 per `b`)
pub(crate) fn accidental_offset(accidentals: &str) -> i32 {
    accidentals
        .chars()
        .map(|c| match c {
            '#' => 1,
            'b' => -1,
            _ => 0,
        })
        .sum()
}

/// Convert a spelled note to its pitch class
pub fn note_to_int(name: &str) -> Result<PitchClass> {
    validate_note(name)?;
    let (letter, accidentals) = split(name);
    let base = letter_value(letter).unwrap_or(0) as i32;
    Ok((base + accidental_offset(accidentals)).rem_euclid(12) as PitchClass)
}

/// Canonical spelling of a pitch class using sharps or flats
pub fn int_to_note(pitch_class: PitchClass, style: AccidentalStyle) -> Result<&'static str> {
    if pitch_class > 11 {
        return Err(TheoryError::PitchClassOutOfRange(pitch_class as i32));
    }
    Ok(spell(pitch_class as i32, style))
}

/// Canonical spelling of any integer, taken mod 12
pub fn spell(value: i32, style: AccidentalStyle) -> &'static str {
    let table = match style {
        AccidentalStyle::Sharp => &SHARP_NAMES,
        AccidentalStyle::Flat => &FLAT_NAMES,
    };
    table[value.rem_euclid(12) as usize]
}

/// Test whether two notes sound the same
pub fn is_enharmonic(a: &str, b: &str) -> Result<bool> {
    Ok(note_to_int(a)? == note_to_int(b)?)
}

/// Raise a note by a semitone, cancelling a trailing flat if present
///
/// ```
/// use tonal::music::notes::augment;
/// assert_eq!(augment("C").unwrap(), "C#");
/// assert_eq!(augment("Cb").unwrap(), "C");
/// ```
pub fn augment(name: &str) -> Result<String> {
    validate_note(name)?;
    Ok(match name.strip_suffix('b') {
        Some(rest) => rest.to_string(),
        None => format!("{name}#"),
    })
}

/// Lower a note by a semitone, cancelling a trailing sharp if present
pub fn diminish(name: &str) -> Result<String> {
    validate_note(name)?;
    Ok(match name.strip_suffix('#') {
        Some(rest) => rest.to_string(),
        None => format!("{name}b"),
    })
}

/// Respell a note with at most one accidental
///
/// Sharps are used when the accidentals raise the letter, flats when they
/// lower it: "C####" becomes "E", "Cbb" becomes "Bb".
pub fn reduce_accidentals(name: &str) -> Result<&'static str> {
    validate_note(name)?;
    let (letter, accidentals) = split(name);
    let base = letter_value(letter).unwrap_or(0) as i32;
    let value = base + accidental_offset(accidentals);
    let style = if value >= base {
        AccidentalStyle::Sharp
    } else {
        AccidentalStyle::Flat
    };
    Ok(spell(value, style))
}

/// Cancel opposing accidentals while keeping the letter
///
/// "C##b" becomes "C#", "Eb##b" becomes "E".
pub fn remove_redundant_accidentals(name: &str) -> Result<String> {
    validate_note(name)?;
    let (letter, accidentals) = split(name);
    let net = accidental_offset(accidentals);
    let mut result = letter.to_string();
    for _ in 0..net.abs() {
        result = if net > 0 {
            augment(&result)?
        } else {
            diminish(&result)?
        };
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_note() {
        assert!(is_valid_note("C"));
        assert!(is_valid_note("F#"));
        assert!(is_valid_note("Ebb"));
        assert!(is_valid_note("C##b"));
        assert!(!is_valid_note(""));
        assert!(!is_valid_note("H"));
        assert!(!is_valid_note("c"));
        assert!(!is_valid_note("C-4"));
        assert!(!is_valid_note("C x"));
    }

    #[test]
    fn test_note_to_int() {
        assert_eq!(note_to_int("C").unwrap(), 0);
        assert_eq!(note_to_int("C#").unwrap(), 1);
        assert_eq!(note_to_int("Cb").unwrap(), 11);
        assert_eq!(note_to_int("B#").unwrap(), 0);
        assert_eq!(note_to_int("A").unwrap(), 9);
        assert_eq!(note_to_int("Ebb").unwrap(), 2);
        assert_eq!(note_to_int("C####").unwrap(), 4);
        assert_eq!(
            note_to_int("X"),
            Err(TheoryError::InvalidNote("X".to_string()))
        );
    }

    #[test]
    fn test_int_to_note() {
        assert_eq!(int_to_note(0, AccidentalStyle::Sharp).unwrap(), "C");
        assert_eq!(int_to_note(3, AccidentalStyle::Sharp).unwrap(), "D#");
        assert_eq!(int_to_note(3, AccidentalStyle::Flat).unwrap(), "Eb");
        assert_eq!(int_to_note(11, AccidentalStyle::Flat).unwrap(), "B");
        assert_eq!(
            int_to_note(12, AccidentalStyle::Sharp),
            Err(TheoryError::PitchClassOutOfRange(12))
        );
    }

    #[test]
    fn test_spell_wraps() {
        assert_eq!(spell(-1, AccidentalStyle::Flat), "B");
        assert_eq!(spell(13, AccidentalStyle::Sharp), "C#");
        assert_eq!(spell(22, AccidentalStyle::Flat), "Bb");
    }

    #[test]
    fn test_accidental_style_from_char() {
        assert_eq!(AccidentalStyle::try_from('#').unwrap(), AccidentalStyle::Sharp);
        assert_eq!(AccidentalStyle::try_from('b').unwrap(), AccidentalStyle::Flat);
        assert_eq!(
            AccidentalStyle::try_from('x'),
            Err(TheoryError::InvalidAccidental('x'))
        );
        assert_eq!(AccidentalStyle::Sharp.opposite(), AccidentalStyle::Flat);
    }

    #[test]
    fn test_augment_and_diminish() {
        assert_eq!(augment("C").unwrap(), "C#");
        assert_eq!(augment("C#").unwrap(), "C##");
        assert_eq!(augment("Cb").unwrap(), "C");
        assert_eq!(diminish("C").unwrap(), "Cb");
        assert_eq!(diminish("C#").unwrap(), "C");
        assert_eq!(diminish("Cbb").unwrap(), "Cbbb");
        assert!(augment("Q").is_err());
        assert!(diminish("").is_err());
    }

    #[test]
    fn test_augment_does_not_strip_letter_b() {
        // 'B' is a letter, not a flat
        assert_eq!(augment("B").unwrap(), "B#");
        assert_eq!(augment("Bb").unwrap(), "B");
    }

    #[test]
    fn test_alternating_calls_do_not_grow() {
        let mut note = "E".to_string();
        for _ in 0..10 {
            note = diminish(&augment(&note).unwrap()).unwrap();
        }
        assert_eq!(note, "E");
    }

    #[test]
    fn test_reduce_accidentals() {
        assert_eq!(reduce_accidentals("C####").unwrap(), "E");
        assert_eq!(reduce_accidentals("Cbb").unwrap(), "Bb");
        assert_eq!(reduce_accidentals("E#").unwrap(), "F");
        assert_eq!(reduce_accidentals("Fb").unwrap(), "E");
        assert_eq!(reduce_accidentals("G").unwrap(), "G");
    }

    #[test]
    fn test_remove_redundant_accidentals() {
        assert_eq!(remove_redundant_accidentals("C##b").unwrap(), "C#");
        assert_eq!(remove_redundant_accidentals("Eb##b").unwrap(), "E");
        assert_eq!(remove_redundant_accidentals("Gbb#").unwrap(), "Gb");
        assert_eq!(remove_redundant_accidentals("A").unwrap(), "A");
    }

    #[test]
    fn test_is_enharmonic() {
        assert!(is_enharmonic("C#", "Db").unwrap());
        assert!(is_enharmonic("B#", "C").unwrap());
        assert!(!is_enharmonic("C", "D").unwrap());
        assert!(is_enharmonic("C", "H").is_err());
    }
}
