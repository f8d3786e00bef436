// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tonal - interval and key-signature engine.
//!
//! Spells notes, keys and intervals in standard Western notation: pitch
//! classes from note names, diatonic scales for the fifteen major and
//! fifteen minor keys, and interval construction and naming that keeps the
//! letter distance correct ("Fb" above "C" is a diminished fourth, not a
//! major third).

pub mod config;
pub mod containers;
pub mod error;
pub mod music;

pub use error::{Result, TheoryError};
