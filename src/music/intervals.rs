// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Intervals between spelled notes.
//!
//! Within a key, `second` through `seventh` return the diatonic note the
//! given number of scale steps above a start note: in F, the fourth of F is
//! Bb. The absolute builders (`minor_third`, `perfect_fifth`, ...) ignore
//! keys and spell the exact interval: `minor_third("F")` is Ab while
//! `major_third("F")` is A.
//!
//! `determine` names the interval between two notes and `from_shorthand`
//! goes the other way, from a shorthand like "b3" to a note.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::keys::{self, KeyCache};
use super::notes::{self, AccidentalStyle, PitchClass};
use crate::error::{Result, TheoryError};

/// Interval size by diatonic distance, unison through seventh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntervalSize {
    Unison,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
}

impl IntervalSize {
    /// All sizes in ascending order
    pub const ALL: [IntervalSize; 7] = [
        IntervalSize::Unison,
        IntervalSize::Second,
        IntervalSize::Third,
        IntervalSize::Fourth,
        IntervalSize::Fifth,
        IntervalSize::Sixth,
        IntervalSize::Seventh,
    ];

    /// Size for a 1-based degree (1 = unison, 7 = seventh)
    pub fn from_degree(degree: u8) -> Option<Self> {
        match degree {
            1..=7 => Some(Self::ALL[degree as usize - 1]),
            _ => None,
        }
    }

    /// 1-based degree
    pub fn degree(self) -> u8 {
        self as u8 + 1
    }

    /// Semitones spanned by the unaltered (major or perfect) interval
    pub fn semitones(self) -> u8 {
        match self {
            IntervalSize::Unison => 0,
            IntervalSize::Second => 2,
            IntervalSize::Third => 4,
            IntervalSize::Fourth => 5,
            IntervalSize::Fifth => 7,
            IntervalSize::Sixth => 9,
            IntervalSize::Seventh => 11,
        }
    }

    /// Unisons, fourths and fifths are perfect; the rest are major/minor
    pub fn is_perfect(self) -> bool {
        matches!(
            self,
            IntervalSize::Unison | IntervalSize::Fourth | IntervalSize::Fifth
        )
    }

    /// Get a human-readable name for this size
    pub fn name(self) -> &'static str {
        match self {
            IntervalSize::Unison => "unison",
            IntervalSize::Second => "second",
            IntervalSize::Third => "third",
            IntervalSize::Fourth => "fourth",
            IntervalSize::Fifth => "fifth",
            IntervalSize::Sixth => "sixth",
            IntervalSize::Seventh => "seventh",
        }
    }
}

impl fmt::Display for IntervalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Interval quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    DoublyDiminished,
    Diminished,
    Minor,
    Perfect,
    Major,
    Augmented,
    DoublyAugmented,
}

impl Quality {
    /// Quality of an interval whose span differs from the unaltered size by
    /// `offset` semitones, if that alteration has a name
    pub fn from_offset(size: IntervalSize, offset: i32) -> Option<Self> {
        if size.is_perfect() {
            match offset {
                -2 => Some(Quality::DoublyDiminished),
                -1 => Some(Quality::Diminished),
                0 => Some(Quality::Perfect),
                1 => Some(Quality::Augmented),
                2 => Some(Quality::DoublyAugmented),
                _ => None,
            }
        } else {
            match offset {
                -2 => Some(Quality::Diminished),
                -1 => Some(Quality::Minor),
                0 => Some(Quality::Major),
                1 => Some(Quality::Augmented),
                _ => None,
            }
        }
    }

    /// Get a human-readable name for this quality
    pub fn name(self) -> &'static str {
        match self {
            Quality::DoublyDiminished => "doubly diminished",
            Quality::Diminished => "diminished",
            Quality::Minor => "minor",
            Quality::Perfect => "perfect",
            Quality::Major => "major",
            Quality::Augmented => "augmented",
            Quality::DoublyAugmented => "doubly augmented",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named interval, e.g. minor third
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalName {
    pub quality: Quality,
    pub size: IntervalSize,
    offset: i8,
}

impl IntervalName {
    /// Long form, e.g. "minor third"
    pub fn long_name(&self) -> String {
        format!("{} {}", self.quality, self.size)
    }

    /// Shorthand form, e.g. "b3", "#4", "5"
    pub fn shorthand(&self) -> String {
        let symbol = if self.offset < 0 { "b" } else { "#" };
        format!(
            "{}{}",
            symbol.repeat(self.offset.unsigned_abs() as usize),
            self.size.degree()
        )
    }

    /// Semitones from the unaltered size (-2..=2)
    pub fn offset(&self) -> i8 {
        self.offset
    }
}

impl fmt::Display for IntervalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quality, self.size)
    }
}

/// The note `degree_offset` scale steps above `start` in `key`
///
/// The start note is matched to the scale by letter only, so an altered
/// note lands on its natural scale position: in C, both "E" and "Eb" are
/// the third degree. Negative offsets step down.
pub fn interval(key: &str, start: &str, degree_offset: i32) -> Result<String> {
    interval_in(KeyCache::shared(), key, start, degree_offset)
}

/// `interval` using an explicit key cache
pub fn interval_in(
    cache: &KeyCache,
    key: &str,
    start: &str,
    degree_offset: i32,
) -> Result<String> {
    notes::validate_note(start)?;
    let scale = cache.get_notes(key)?;
    let (letter, _) = notes::split(start);
    let index = scale
        .position_of_letter(letter)
        .ok_or_else(|| TheoryError::NotInKey {
            note: start.to_string(),
            key: key.to_string(),
        })?;
    let target = (index + degree_offset.rem_euclid(7) as usize) % 7;
    Ok(scale[target].to_string())
}

/// The note itself, in `key` or in its own key when none is given
pub fn unison(note: &str, key: Option<&str>) -> Result<String> {
    interval(key.unwrap_or(note), note, 0)
}

/// Diatonic second of `note` in `key`
pub fn second(note: &str, key: &str) -> Result<String> {
    interval(key, note, 1)
}

/// Diatonic third of `note` in `key`
pub fn third(note: &str, key: &str) -> Result<String> {
    interval(key, note, 2)
}

/// Diatonic fourth of `note` in `key`
pub fn fourth(note: &str, key: &str) -> Result<String> {
    interval(key, note, 3)
}

/// Diatonic fifth of `note` in `key`
pub fn fifth(note: &str, key: &str) -> Result<String> {
    interval(key, note, 4)
}

/// Diatonic sixth of `note` in `key`
pub fn sixth(note: &str, key: &str) -> Result<String> {
    interval(key, note, 5)
}

/// Diatonic seventh of `note` in `key`
pub fn seventh(note: &str, key: &str) -> Result<String> {
    interval(key, note, 6)
}

/// Take the diatonic interval from `note`'s letter in C, then respell it
/// until it spans exactly `semitones`
fn spell_from_c(note: &str, degree_offset: i32, semitones: u8) -> Result<String> {
    notes::validate_note(note)?;
    let (letter, _) = notes::split(note);
    let guess = interval("C", &letter.to_string(), degree_offset)?;
    augment_or_diminish_until_the_interval_is_right(note, &guess, semitones)
}

/// Same as `diminished_unison`
pub fn minor_unison(note: &str) -> Result<String> {
    diminished_unison(note)
}

/// Same as `perfect_unison`
pub fn major_unison(note: &str) -> Result<String> {
    perfect_unison(note)
}

/// The note lowered a semitone
pub fn diminished_unison(note: &str) -> Result<String> {
    notes::diminish(note)
}

/// The note itself
pub fn perfect_unison(note: &str) -> Result<String> {
    notes::validate_note(note)?;
    Ok(note.to_string())
}

/// The note raised a semitone
pub fn augmented_unison(note: &str) -> Result<String> {
    notes::augment(note)
}

/// One semitone up, next letter
pub fn minor_second(note: &str) -> Result<String> {
    notes::diminish(&major_second(note)?)
}

/// Two semitones up, next letter
pub fn major_second(note: &str) -> Result<String> {
    spell_from_c(note, 1, 2)
}

/// Three semitones up, two letters on
pub fn minor_third(note: &str) -> Result<String> {
    notes::diminish(&major_third(note)?)
}

/// Four semitones up, two letters on
pub fn major_third(note: &str) -> Result<String> {
    spell_from_c(note, 2, 4)
}

/// Same as `diminished_fourth`
pub fn minor_fourth(note: &str) -> Result<String> {
    diminished_fourth(note)
}

/// Same as `perfect_fourth`
pub fn major_fourth(note: &str) -> Result<String> {
    perfect_fourth(note)
}

/// Five semitones up, three letters on
pub fn perfect_fourth(note: &str) -> Result<String> {
    spell_from_c(note, 3, 5)
}

/// Four semitones up, three letters on
pub fn diminished_fourth(note: &str) -> Result<String> {
    notes::diminish(&perfect_fourth(note)?)
}

/// Six semitones up, three letters on
pub fn augmented_fourth(note: &str) -> Result<String> {
    notes::augment(&perfect_fourth(note)?)
}

/// Same as `diminished_fifth`
pub fn minor_fifth(note: &str) -> Result<String> {
    diminished_fifth(note)
}

/// Same as `perfect_fifth`
pub fn major_fifth(note: &str) -> Result<String> {
    perfect_fifth(note)
}

/// Seven semitones up, four letters on
pub fn perfect_fifth(note: &str) -> Result<String> {
    spell_from_c(note, 4, 7)
}

/// Six semitones up, four letters on
pub fn diminished_fifth(note: &str) -> Result<String> {
    notes::diminish(&perfect_fifth(note)?)
}

/// Eight semitones up, four letters on
pub fn augmented_fifth(note: &str) -> Result<String> {
    notes::augment(&perfect_fifth(note)?)
}

/// Eight semitones up, five letters on
pub fn minor_sixth(note: &str) -> Result<String> {
    notes::diminish(&major_sixth(note)?)
}

/// Nine semitones up, five letters on
pub fn major_sixth(note: &str) -> Result<String> {
    spell_from_c(note, 5, 9)
}

/// Ten semitones up, six letters on
pub fn minor_seventh(note: &str) -> Result<String> {
    notes::diminish(&major_seventh(note)?)
}

/// Eleven semitones up, six letters on
pub fn major_seventh(note: &str) -> Result<String> {
    spell_from_c(note, 6, 11)
}

/// Nine semitones up, six letters on
pub fn diminished_seventh(note: &str) -> Result<String> {
    notes::diminish(&minor_seventh(note)?)
}

/// Add sharps or flats to `note2` until it lies `half_steps` above `note1`
///
/// Each step moves the measured distance one semitone toward the target
/// without wrapping, so this takes at most eleven steps. Spellings with more
/// than six net accidentals are flipped to the other direction, so the minor
/// seventh of Cb comes out as Bbb rather than B followed by ten sharps.
pub fn augment_or_diminish_until_the_interval_is_right(
    note1: &str,
    note2: &str,
    half_steps: u8,
) -> Result<String> {
    if half_steps > 11 {
        return Err(TheoryError::PitchClassOutOfRange(half_steps as i32));
    }

    let mut result = note2.to_string();
    let mut current = measure(note1, &result)?;
    while current != half_steps {
        result = if current > half_steps {
            notes::diminish(&result)?
        } else {
            notes::augment(&result)?
        };
        current = measure(note1, &result)?;
    }

    let (letter, accidentals) = notes::split(&result);
    let net = notes::accidental_offset(accidentals);
    if net.abs() > 6 {
        let flipped = ((12 - net.abs() % 12) % 12) as usize;
        let style = if net > 0 {
            AccidentalStyle::Sharp
        } else {
            AccidentalStyle::Flat
        };
        let symbol = style.opposite().symbol().to_string();
        let respelled = format!("{letter}{}", symbol.repeat(flipped));
        debug!(from = %result, to = %respelled, "flipped impractical spelling");
        result = respelled;
    }
    Ok(result)
}

/// The note `half_steps` away from `note`, spelled from `key`
///
/// Diatonic targets come straight from the key's scale. Chromatic targets
/// are spelled by flattening the scale note a semitone above them.
pub fn get_interval(note: &str, half_steps: i32, key: &str, up: bool) -> Result<String> {
    notes::validate_note(note)?;
    let half_steps = half_steps.rem_euclid(12);
    let half_steps = if up { half_steps } else { (12 - half_steps) % 12 };

    let scale = keys::get_notes(key)?;
    let lookup = scale
        .iter()
        .map(|n| Ok((notes::note_to_int(n)?, n)))
        .collect::<Result<Vec<(PitchClass, &str)>>>()?;
    let find = |pc: i32| {
        let pc = pc.rem_euclid(12) as PitchClass;
        lookup.iter().find(|(p, _)| *p == pc).map(|(_, n)| *n)
    };

    let target = notes::note_to_int(note)? as i32 + half_steps;
    if let Some(found) = find(target) {
        return Ok(found.to_string());
    }
    match find(target + 1) {
        Some(above) => notes::diminish(above),
        None => Err(TheoryError::NotInKey {
            note: note.to_string(),
            key: key.to_string(),
        }),
    }
}

/// Semitones from `note1` up to `note2`, in 0-11
///
/// ```
/// use tonal::music::intervals::measure;
/// assert_eq!(measure("C", "D").unwrap(), 2);
/// assert_eq!(measure("D", "C").unwrap(), 10);
/// ```
pub fn measure(note1: &str, note2: &str) -> Result<u8> {
    let a = notes::note_to_int(note1)? as i32;
    let b = notes::note_to_int(note2)? as i32;
    Ok((b - a).rem_euclid(12) as u8)
}

/// Reverse a sequence of notes: ["C", "E"] becomes ["E", "C"]
pub fn invert<T: Clone>(notes: &[T]) -> Vec<T> {
    notes.iter().rev().cloned().collect()
}

/// Name the interval from `note1` to `note2`, upward or downward
pub fn name_interval(note1: &str, note2: &str, up: bool) -> Result<IntervalName> {
    notes::validate_note(note1)?;
    notes::validate_note(note2)?;

    let (letter1, _) = notes::split(note1);
    let (letter2, _) = notes::split(note2);
    let index1 = notes::letter_index(letter1).unwrap_or(0) as i32;
    let index2 = notes::letter_index(letter2).unwrap_or(0) as i32;
    let letters = if up { index2 - index1 } else { index1 - index2 };
    let size = IntervalSize::ALL[letters.rem_euclid(7) as usize];

    let half_steps = if up {
        measure(note1, note2)?
    } else {
        measure(note2, note1)?
    };

    let mut offset = half_steps as i32 - size.semitones() as i32;
    if offset < -6 {
        offset += 12;
    } else if offset > 6 {
        offset -= 12;
    }

    let quality =
        Quality::from_offset(size, offset).ok_or_else(|| TheoryError::ImpracticalInterval {
            from: note1.to_string(),
            to: note2.to_string(),
        })?;

    Ok(IntervalName {
        quality,
        size,
        offset: offset as i8,
    })
}

/// Name the interval between two notes
///
/// ```
/// use tonal::music::intervals::determine;
/// assert_eq!(determine("C", "E", false, true).unwrap(), "major third");
/// assert_eq!(determine("C", "Eb", true, true).unwrap(), "b3");
/// ```
pub fn determine(note1: &str, note2: &str, shorthand: bool, up: bool) -> Result<String> {
    let name = name_interval(note1, note2, up)?;
    Ok(if shorthand {
        name.shorthand()
    } else {
        name.long_name()
    })
}

/// A parsed interval shorthand such as "b3" or "#11"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shorthand {
    /// Accidental symbols in the order written
    pub accidentals: String,
    /// Degree reduced to unison..seventh
    pub size: IntervalSize,
    /// Whole octaves above the reduced degree
    pub octaves: u8,
}

fn shorthand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([b#]*)([1-9]|1[0-5])$").expect("shorthand pattern is a valid regex")
    })
}

/// Parse `[accidentals]<degree>` with degree 1-15
pub fn parse_shorthand(text: &str) -> Result<Shorthand> {
    let invalid = || TheoryError::InvalidShorthand(text.to_string());
    let captures = shorthand_pattern().captures(text).ok_or_else(invalid)?;
    let degree: u8 = captures[2].parse().map_err(|_| invalid())?;
    let size = IntervalSize::from_degree((degree - 1) % 7 + 1).ok_or_else(invalid)?;

    Ok(Shorthand {
        accidentals: captures[1].to_string(),
        size,
        octaves: (degree - 1) / 7,
    })
}

impl FromStr for Shorthand {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        parse_shorthand(s)
    }
}

/// The note a shorthand interval above (or below) `note`
///
/// ```
/// use tonal::music::intervals::from_shorthand;
/// assert_eq!(from_shorthand("A", "b3", true).unwrap(), "C");
/// assert_eq!(from_shorthand("E", "2", false).unwrap(), "D");
/// ```
pub fn from_shorthand(note: &str, shorthand: &str, up: bool) -> Result<String> {
    notes::validate_note(note)?;
    let parsed = parse_shorthand(shorthand)?;

    // Going down by an interval is going up by its complement
    let mut result = match (parsed.size, up) {
        (IntervalSize::Unison, _) => major_unison(note)?,
        (IntervalSize::Second, true) => major_second(note)?,
        (IntervalSize::Second, false) => minor_seventh(note)?,
        (IntervalSize::Third, true) => major_third(note)?,
        (IntervalSize::Third, false) => minor_sixth(note)?,
        (IntervalSize::Fourth, true) => perfect_fourth(note)?,
        (IntervalSize::Fourth, false) => perfect_fifth(note)?,
        (IntervalSize::Fifth, true) => perfect_fifth(note)?,
        (IntervalSize::Fifth, false) => perfect_fourth(note)?,
        (IntervalSize::Sixth, true) => major_sixth(note)?,
        (IntervalSize::Sixth, false) => minor_third(note)?,
        (IntervalSize::Seventh, true) => major_seventh(note)?,
        (IntervalSize::Seventh, false) => minor_second(note)?,
    };

    for accidental in parsed.accidentals.chars() {
        result = match (accidental, up) {
            ('#', true) | ('b', false) => notes::augment(&result)?,
            _ => notes::diminish(&result)?,
        };
    }
    Ok(result)
}

/// Unison, third, sixth, perfect fifth, or (optionally) perfect fourth
pub fn is_consonant(note1: &str, note2: &str, include_fourths: bool) -> Result<bool> {
    Ok(is_perfect_consonant(note1, note2, include_fourths)?
        || is_imperfect_consonant(note1, note2)?)
}

/// Unisons, octaves and perfect fifths; perfect fourths when requested
///
/// Fourths are dissonant in contrapuntal writing, which is why they can be
/// left out.
pub fn is_perfect_consonant(note1: &str, note2: &str, include_fourths: bool) -> Result<bool> {
    let distance = measure(note1, note2)?;
    Ok(matches!(distance, 0 | 7) || (include_fourths && distance == 5))
}

/// Minor and major thirds and sixths
pub fn is_imperfect_consonant(note1: &str, note2: &str) -> Result<bool> {
    Ok(matches!(measure(note1, note2)?, 3 | 4 | 8 | 9))
}

/// Not consonant; perfect fourths count as dissonant only when
/// `include_fourths` is set
pub fn is_dissonant(note1: &str, note2: &str, include_fourths: bool) -> Result<bool> {
    Ok(!is_consonant(note1, note2, !include_fourths)?)
}
