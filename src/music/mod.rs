// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! Three layers, each using only the ones before it: pitch-class arithmetic
//! on spelled notes (`notes`), key signatures and diatonic scales (`keys`),
//! and interval spelling and naming (`intervals`). `meter` is independent.

pub mod intervals;
pub mod keys;
pub mod meter;
pub mod notes;

pub use intervals::{
    determine, from_shorthand, measure, parse_shorthand, IntervalName, IntervalSize, Quality,
    Shorthand,
};
pub use keys::{get_key_signature, get_notes, DiatonicScale, Key, KeyCache, Mode};
pub use meter::Meter;
pub use notes::{int_to_note, note_to_int, AccidentalStyle, PitchClass};
