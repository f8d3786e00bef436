// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Octave-aware notes.
//!
//! The theory core works on bare spellings ("C#"). A `Note` adds an octave
//! and playback attributes, and orders notes by pitch: C-4 is 48, A-4 is 57.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{Result, TheoryError};
use crate::music::intervals;
use crate::music::notes::{self, AccidentalStyle};

/// Octave used when none is given
pub const DEFAULT_OCTAVE: i32 = 4;

/// Integer value of A-4
const A4: i64 = 57;

/// Concert pitch of A-4 in Hz
pub const STANDARD_PITCH: f64 = 440.0;

/// A spelled note in a specific octave
#[derive(Debug, Clone)]
pub struct Note {
    name: String,
    octave: i32,
    /// MIDI channel (1-16)
    pub channel: u8,
    /// Velocity (0-127)
    pub velocity: u8,
}

impl Note {
    /// Create a note from a spelling and octave
    pub fn new(name: &str, octave: i32) -> Result<Self> {
        notes::validate_note(name)?;
        Ok(Self {
            name: name.to_string(),
            octave,
            channel: 1,
            velocity: 64,
        })
    }

    /// Note for an integer value: 0 is C-0, 12 is C-1
    pub fn from_int(value: i32) -> Self {
        Self::from_int_with(value, AccidentalStyle::Sharp)
    }

    /// `from_int`, spelling black keys with sharps or flats
    pub fn from_int_with(value: i32, style: AccidentalStyle) -> Self {
        Self {
            name: notes::spell(value, style).to_string(),
            octave: value.div_euclid(12),
            channel: 1,
            velocity: 64,
        }
    }

    /// Nearest note to a frequency, relative to `standard_pitch` for A-4
    pub fn from_hertz(hertz: f64, standard_pitch: f64) -> Result<Self> {
        Self::from_hertz_with(hertz, standard_pitch, AccidentalStyle::Sharp)
    }

    /// `from_hertz`, spelling black keys with sharps or flats
    pub fn from_hertz_with(
        hertz: f64,
        standard_pitch: f64,
        style: AccidentalStyle,
    ) -> Result<Self> {
        if !(hertz.is_finite() && hertz > 0.0) {
            return Err(TheoryError::InvalidFrequency(hertz));
        }
        if !(standard_pitch.is_finite() && standard_pitch > 0.0) {
            return Err(TheoryError::InvalidFrequency(standard_pitch));
        }
        let value = ((hertz / standard_pitch).log2() * 12.0 + A4 as f64).round();
        if value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(TheoryError::InvalidFrequency(hertz));
        }
        Ok(Self::from_int_with(value as i32, style))
    }

    /// Parse Helmholtz notation: "C,," is C-0, "C" is C-2, "c" is C-3,
    /// "c'" is C-4
    pub fn from_shorthand(shorthand: &str) -> Result<Self> {
        let invalid = || TheoryError::InvalidNote(shorthand.to_string());
        let mut chars = shorthand.chars();
        let first = chars.next().ok_or_else(invalid)?;
        let mut octave = if first.is_ascii_lowercase() { 3 } else { 2 };
        let mut name = first.to_ascii_uppercase().to_string();
        if notes::letter_value(first.to_ascii_uppercase()).is_none() {
            return Err(invalid());
        }

        let mut marks = false;
        for c in chars {
            match c {
                '#' | 'b' if !marks => name.push(c),
                ',' => {
                    marks = true;
                    octave -= 1;
                }
                '\'' => {
                    marks = true;
                    octave += 1;
                }
                _ => return Err(invalid()),
            }
        }
        Note::new(&name, octave)
    }

    /// Set the note from "C#" (keeping `octave`) or "C#-5"
    pub fn set_note(&mut self, text: &str, octave: i32) -> Result<&mut Self> {
        let invalid = || TheoryError::InvalidNote(text.to_string());
        let (name, octave) = match text.split_once('-') {
            None => (text, octave),
            Some((name, octave)) => (name, octave.parse().map_err(|_| invalid())?),
        };
        if !notes::is_valid_note(name) {
            return Err(invalid());
        }
        self.name = name.to_string();
        self.octave = octave;
        Ok(self)
    }

    /// Set the channel
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Set the velocity
    pub fn with_velocity(mut self, velocity: u8) -> Self {
        self.velocity = velocity;
        self
    }

    /// Get the spelling
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the octave
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Raise by a semitone, keeping the letter
    pub fn augment(&mut self) -> Result<()> {
        self.name = notes::augment(&self.name)?;
        Ok(())
    }

    /// Lower by a semitone, keeping the letter
    pub fn diminish(&mut self) -> Result<()> {
        self.name = notes::diminish(&self.name)?;
        Ok(())
    }

    /// Cancel opposing accidentals in the spelling
    pub fn remove_redundant_accidentals(&mut self) -> Result<()> {
        self.name = notes::remove_redundant_accidentals(&self.name)?;
        Ok(())
    }

    /// Move by `diff` octaves
    pub fn change_octave(&mut self, diff: i32) -> Result<()> {
        self.octave = self
            .octave
            .checked_add(diff)
            .ok_or(TheoryError::OctaveOutOfRange(self.octave as i64 + diff as i64))?;
        if self.octave < -1 {
            warn!(note = %self, "octave less than -1");
        }
        Ok(())
    }

    /// Move up one octave
    pub fn octave_up(&mut self) -> Result<()> {
        self.change_octave(1)
    }

    /// Move down one octave
    pub fn octave_down(&mut self) -> Result<()> {
        self.change_octave(-1)
    }

    /// Transpose by an interval shorthand ("3", "b7", "#11"), up or down
    pub fn transpose(&mut self, shorthand: &str, up: bool) -> Result<()> {
        let parsed = intervals::parse_shorthand(shorthand)?;
        let name = intervals::from_shorthand(&self.name, shorthand, up)?;

        let old = letter_value(&self.name);
        let new = letter_value(&name);
        let octaves = parsed.octaves as i32;
        let diff = if up {
            octaves + i32::from(new < old)
        } else {
            -octaves - i32::from(new > old)
        };
        self.change_octave(diff)?;

        self.name = name;
        Ok(())
    }

    /// Integer value: octave * 12 plus the spelled offset from C
    ///
    /// Accidentals are not reduced, so Cb-4 is 47 and B#-3 is 48.
    pub fn to_int(&self) -> i64 {
        let (letter, accidentals) = notes::split(&self.name);
        self.octave as i64 * 12
            + notes::letter_value(letter).unwrap_or(0) as i64
            + notes::accidental_offset(accidentals) as i64
    }

    /// Signed semitones from this note to `other`
    pub fn measure(&self, other: &Note) -> i64 {
        other.to_int() - self.to_int()
    }

    /// Frequency in Hz, relative to `standard_pitch` for A-4
    pub fn to_hertz(&self, standard_pitch: f64) -> f64 {
        let diff = (self.to_int() - A4) as f64;
        2f64.powf(diff / 12.0) * standard_pitch
    }

    /// Helmholtz notation: C-4 is "c'", C-2 is "C", C-1 is "C,"
    pub fn to_shorthand(&self) -> String {
        let mut result = if self.octave >= 3 {
            self.name.to_lowercase()
        } else {
            self.name.clone()
        };
        let marks = self.octave - 3;
        if marks < -1 {
            result.push_str(&",".repeat((-1 - marks) as usize));
        } else if marks > 0 {
            result.push_str(&"'".repeat(marks as usize));
        }
        result
    }
}

/// Chromatic value of a validated name's letter
fn letter_value(name: &str) -> u8 {
    notes::letter_value(notes::split(name).0).unwrap_or(0)
}

impl Default for Note {
    fn default() -> Self {
        Self {
            name: "C".to_string(),
            octave: DEFAULT_OCTAVE,
            channel: 1,
            velocity: 64,
        }
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    /// Parse "C#" (octave 4) or "C#-5"
    fn from_str(s: &str) -> Result<Self> {
        let mut note = Note::default();
        note.set_note(s.trim(), DEFAULT_OCTAVE)?;
        Ok(note)
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.to_int() == other.to_int()
    }
}

impl Eq for Note {}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_int().cmp(&other.to_int())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.octave)
    }
}
