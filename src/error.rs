// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.

use thiserror::Error;

use crate::music::keys::Mode;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, TheoryError>;

/// Errors raised by note, key, interval and meter operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TheoryError {
    /// Note name does not start with a natural letter or has a bad accidental
    #[error("Unknown note format '{0}'")]
    InvalidNote(String),

    /// Key is not in the circle-of-fifths table
    #[error("Unrecognized format for key '{0}'")]
    InvalidKey(String),

    /// Accidental style other than '#' or 'b'
    #[error("'{0}' not valid as accidental")]
    InvalidAccidental(char),

    /// Pitch class integer outside 0-11
    #[error("int out of bounds (0-11): {0}")]
    PitchClassOutOfRange(i32),

    /// Key signature accidental count outside -7..=7
    #[error("integer not in range (-7)-(+7): {0}")]
    SignatureOutOfRange(i32),

    /// Start note has no matching letter in the key's scale
    #[error("The start note '{note}' is not in the key {key}")]
    NotInKey { note: String, key: String },

    /// Relative key lookup on a key of the other mode
    #[error("'{key}' is not a {expected} key")]
    WrongMode { key: String, expected: Mode },

    /// Interval quality more than doubly altered
    #[error("Impractical number of sharps and flats between '{from}' and '{to}'")]
    ImpracticalInterval { from: String, to: String },

    /// Interval shorthand does not match `[b#]*` followed by 1-15
    #[error("Interval shorthand is not valid: '{0}'")]
    InvalidShorthand(String),

    /// Octave arithmetic past the range of `i32`
    #[error("Octave out of range: {0}")]
    OctaveOutOfRange(i64),

    /// Frequency that is not a positive finite number
    #[error("Not a valid frequency: {0} Hz")]
    InvalidFrequency(f64),

    /// Meter with zero beats or a beat value that is not a power of two
    #[error("Not a valid meter: {beats}/{beat_value}")]
    InvalidMeter { beats: u32, beat_value: u32 },
}
