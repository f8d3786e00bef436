// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Time signatures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};

/// A time signature such as 3/4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meter {
    /// Beats per bar (numerator)
    pub beats: u32,
    /// Note value of one beat (denominator)
    pub beat_value: u32,
}

/// 4/4
pub const COMMON_TIME: Meter = Meter::new(4, 4);

/// 2/2
pub const CUT_TIME: Meter = Meter::new(2, 2);

/// Check that a beat value is a power of two (1, 2, 4, 8, ...)
pub fn valid_beat_duration(duration: u32) -> bool {
    duration.is_power_of_two()
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let n = n as u64;
    (3u64..).step_by(2).take_while(|i| i * i <= n).all(|i| n % i != 0)
}

impl Meter {
    /// Create a new meter
    pub const fn new(beats: u32, beat_value: u32) -> Self {
        Self { beats, beat_value }
    }

    /// At least one beat, and a beat value that is a power of two
    pub fn is_valid(&self) -> bool {
        self.beats > 0 && valid_beat_duration(self.beat_value)
    }

    fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(TheoryError::InvalidMeter {
                beats: self.beats,
                beat_value: self.beat_value,
            })
        }
    }

    /// Compound meters have a beat count that is neither prime nor 4
    ///
    /// 6/8, 9/8 and 12/8 are compound; 2/4, 3/4, 4/4 and 5/4 are simple.
    pub fn is_compound(&self) -> Result<bool> {
        self.validate()?;
        Ok(!(is_prime(self.beats) || self.beats == 4))
    }

    /// Not compound
    pub fn is_simple(&self) -> Result<bool> {
        Ok(!self.is_compound()?)
    }

    /// Odd number of beats per bar
    pub fn is_asymmetrical(&self) -> Result<bool> {
        self.validate()?;
        Ok(self.beats % 2 == 1)
    }
}

impl Default for Meter {
    fn default() -> Self {
        COMMON_TIME
    }
}

impl FromStr for Meter {
    type Err = TheoryError;

    /// Parse "3/4"-style text
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TheoryError::InvalidMeter {
            beats: 0,
            beat_value: 0,
        };
        let (beats, beat_value) = s.trim().split_once('/').ok_or_else(invalid)?;
        let meter = Meter::new(
            beats.trim().parse().map_err(|_| invalid())?,
            beat_value.trim().parse().map_err(|_| invalid())?,
        );
        meter.validate()?;
        Ok(meter)
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.beat_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_beat_duration() {
        assert!(valid_beat_duration(1));
        assert!(valid_beat_duration(2));
        assert!(valid_beat_duration(4));
        assert!(valid_beat_duration(16));
        assert!(!valid_beat_duration(0));
        assert!(!valid_beat_duration(3));
        assert!(!valid_beat_duration(12));
    }

    #[test]
    fn test_is_valid() {
        assert!(COMMON_TIME.is_valid());
        assert!(CUT_TIME.is_valid());
        assert!(Meter::new(7, 8).is_valid());
        assert!(!Meter::new(0, 4).is_valid());
        assert!(!Meter::new(3, 5).is_valid());
    }

    #[test]
    fn test_compound_and_simple() {
        assert!(!Meter::new(4, 4).is_compound().unwrap());
        assert!(!Meter::new(3, 4).is_compound().unwrap());
        assert!(!Meter::new(2, 2).is_compound().unwrap());
        assert!(Meter::new(6, 8).is_compound().unwrap());
        assert!(Meter::new(9, 8).is_compound().unwrap());
        assert!(Meter::new(12, 8).is_compound().unwrap());
        assert!(Meter::new(4, 4).is_simple().unwrap());
        assert_eq!(
            Meter::new(3, 5).is_compound(),
            Err(TheoryError::InvalidMeter {
                beats: 3,
                beat_value: 5
            })
        );
    }

    #[test]
    fn test_asymmetrical() {
        assert!(Meter::new(3, 4).is_asymmetrical().unwrap());
        assert!(Meter::new(7, 8).is_asymmetrical().unwrap());
        assert!(!Meter::new(4, 4).is_asymmetrical().unwrap());
        assert!(Meter::new(0, 4).is_asymmetrical().is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let meter: Meter = "6/8".parse().unwrap();
        assert_eq!(meter, Meter::new(6, 8));
        assert_eq!(meter.to_string(), "6/8");
        assert_eq!(" 3 / 4 ".parse::<Meter>().unwrap(), Meter::new(3, 4));
        assert!("3/5".parse::<Meter>().is_err());
        assert!("waltz".parse::<Meter>().is_err());
        assert_eq!(Meter::default(), COMMON_TIME);
    }
}
