// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Directed intervals with optional quality/number spelling.
//!
//! An interval is a signed step count. A spelling (quality plus generic
//! number, e.g. "minor third") is carried alongside when known and is checked
//! against the step count at construction. Equality, hashing and ordering use
//! the step count only, so an augmented fourth equals a diminished fifth;
//! [`Interval::is_identical_to`] compares spellings as well.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::error::{HarmonyError, Result};
use crate::music::tuning::{CENTS_PER_SEMITONE, SEMITONES_IN_OCTAVE};

/// Interval quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quality {
    Diminished,
    Minor,
    Perfect,
    Major,
    Augmented,
}

impl Quality {
    /// Short symbol (d, m, P, M, A)
    pub fn symbol(self) -> char {
        match self {
            Quality::Diminished => 'd',
            Quality::Minor => 'm',
            Quality::Perfect => 'P',
            Quality::Major => 'M',
            Quality::Augmented => 'A',
        }
    }

    /// Parse a quality symbol (case sensitive: `m` is minor, `M` is major)
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'd' => Some(Quality::Diminished),
            'm' => Some(Quality::Minor),
            'P' => Some(Quality::Perfect),
            'M' => Some(Quality::Major),
            'A' => Some(Quality::Augmented),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Diminished => "diminished",
            Quality::Minor => "minor",
            Quality::Perfect => "perfect",
            Quality::Major => "major",
            Quality::Augmented => "augmented",
        }
    }

    /// Quality of the inverted interval
    pub fn inverse(self) -> Self {
        match self {
            Quality::Diminished => Quality::Augmented,
            Quality::Minor => Quality::Major,
            Quality::Perfect => Quality::Perfect,
            Quality::Major => Quality::Minor,
            Quality::Augmented => Quality::Diminished,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Quality and generic number of a simple interval (number 1..=8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spelling {
    pub quality: Quality,
    pub number: u8,
}

/// Whether a generic number takes perfect/augmented/diminished qualities
pub fn is_perfect_number(number: u8) -> bool {
    matches!(number, 1 | 4 | 5 | 8)
}

/// Semitones of the major or perfect interval of a generic number
fn base_semitones(number: u8) -> Option<i32> {
    match number {
        1 => Some(0),
        2 => Some(2),
        3 => Some(4),
        4 => Some(5),
        5 => Some(7),
        6 => Some(9),
        7 => Some(11),
        8 => Some(12),
        _ => None,
    }
}

/// Size in semitones of a spelled simple interval
pub fn semitones_for(quality: Quality, number: u8) -> Result<i32> {
    let invalid = || HarmonyError::InvalidIntervalSpec {
        semitones: None,
        quality: quality.symbol(),
        number,
    };
    let base = base_semitones(number).ok_or_else(invalid)?;
    let semitones = if is_perfect_number(number) {
        match quality {
            Quality::Perfect => base,
            Quality::Augmented => base + 1,
            Quality::Diminished if number != 1 => base - 1,
            _ => return Err(invalid()),
        }
    } else {
        match quality {
            Quality::Major => base,
            Quality::Minor => base - 1,
            Quality::Augmented => base + 1,
            Quality::Diminished => base - 2,
            Quality::Perfect => return Err(invalid()),
        }
    };
    Ok(semitones)
}

/// Default spelling for 0..=12 semitones: major, minor or perfect where
/// possible, the tritone as an augmented fourth.
fn default_spelling(semitones: u32) -> Option<Spelling> {
    let (quality, number) = match semitones {
        0 => (Quality::Perfect, 1),
        1 => (Quality::Minor, 2),
        2 => (Quality::Major, 2),
        3 => (Quality::Minor, 3),
        4 => (Quality::Major, 3),
        5 => (Quality::Perfect, 4),
        6 => (Quality::Augmented, 4),
        7 => (Quality::Perfect, 5),
        8 => (Quality::Minor, 6),
        9 => (Quality::Major, 6),
        10 => (Quality::Minor, 7),
        11 => (Quality::Major, 7),
        12 => (Quality::Perfect, 8),
        _ => return None,
    };
    Some(Spelling { quality, number })
}

/// English name of a simple generic number
pub(crate) fn ordinal_name(number: u8) -> &'static str {
    match number {
        1 => "unison",
        2 => "second",
        3 => "third",
        4 => "fourth",
        5 => "fifth",
        6 => "sixth",
        7 => "seventh",
        8 => "octave",
        _ => "interval",
    }
}

/// A directed distance in steps, optionally spelled
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    semitones: i32,
    spelling: Option<Spelling>,
}

macro_rules! spelled {
    ($semitones:expr, $quality:ident, $number:expr) => {
        Interval {
            semitones: $semitones,
            spelling: Some(Spelling {
                quality: Quality::$quality,
                number: $number,
            }),
        }
    };
}

impl Interval {
    pub const UNISON: Interval = spelled!(0, Perfect, 1);
    pub const MINOR_SECOND: Interval = spelled!(1, Minor, 2);
    pub const MAJOR_SECOND: Interval = spelled!(2, Major, 2);
    pub const MINOR_THIRD: Interval = spelled!(3, Minor, 3);
    pub const MAJOR_THIRD: Interval = spelled!(4, Major, 3);
    pub const PERFECT_FOURTH: Interval = spelled!(5, Perfect, 4);
    pub const AUGMENTED_FOURTH: Interval = spelled!(6, Augmented, 4);
    pub const DIMINISHED_FIFTH: Interval = spelled!(6, Diminished, 5);
    pub const PERFECT_FIFTH: Interval = spelled!(7, Perfect, 5);
    pub const AUGMENTED_FIFTH: Interval = spelled!(8, Augmented, 5);
    pub const MINOR_SIXTH: Interval = spelled!(8, Minor, 6);
    pub const MAJOR_SIXTH: Interval = spelled!(9, Major, 6);
    pub const DIMINISHED_SEVENTH: Interval = spelled!(9, Diminished, 7);
    pub const MINOR_SEVENTH: Interval = spelled!(10, Minor, 7);
    pub const MAJOR_SEVENTH: Interval = spelled!(11, Major, 7);
    pub const OCTAVE: Interval = spelled!(12, Perfect, 8);

    /// Interval of `semitones` twelve-tone steps with the default spelling
    /// when the magnitude is at most an octave.
    pub fn from_semitones(semitones: i32) -> Self {
        Self {
            semitones,
            spelling: default_spelling(semitones.unsigned_abs()),
        }
    }

    /// Interval of `steps` with no spelling (non-twelve-step octaves)
    pub fn unspelled(steps: i32) -> Self {
        Self {
            semitones: steps,
            spelling: None,
        }
    }

    /// Ascending interval from quality and generic number
    pub fn new(quality: Quality, number: u8) -> Result<Self> {
        let semitones = semitones_for(quality, number)?;
        Ok(Self {
            semitones,
            spelling: Some(Spelling { quality, number }),
        })
    }

    /// Interval from a full (semitones, quality, number) triple.
    ///
    /// A negative semitone count gives the descending interval. The triple
    /// must be consistent; nothing is normalized.
    pub fn with_spelling(semitones: i32, quality: Quality, number: u8) -> Result<Self> {
        let expected = semitones_for(quality, number).map_err(|_| {
            HarmonyError::InvalidIntervalSpec {
                semitones: Some(semitones),
                quality: quality.symbol(),
                number,
            }
        })?;
        if semitones.unsigned_abs() != expected.unsigned_abs() {
            return Err(HarmonyError::InvalidIntervalSpec {
                semitones: Some(semitones),
                quality: quality.symbol(),
                number,
            });
        }
        Ok(Self {
            semitones,
            spelling: Some(Spelling { quality, number }),
        })
    }

    /// Signed step count
    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    pub fn spelling(&self) -> Option<Spelling> {
        self.spelling
    }

    pub fn quality(&self) -> Option<Quality> {
        self.spelling.map(|s| s.quality)
    }

    pub fn number(&self) -> Option<u8> {
        self.spelling.map(|s| s.number)
    }

    /// Equal-tempered size in cents
    pub fn cents(&self) -> i64 {
        self.semitones as i64 * CENTS_PER_SEMITONE
    }

    pub fn is_unison(&self) -> bool {
        self.semitones == 0
    }

    pub fn is_ascending(&self) -> bool {
        self.semitones > 0
    }

    pub fn is_descending(&self) -> bool {
        self.semitones < 0
    }

    /// Same magnitude, ascending
    pub fn abs(&self) -> Self {
        Self {
            semitones: self.semitones.abs(),
            spelling: self.spelling,
        }
    }

    /// Spelling-sensitive comparison: same size and same spelling
    pub fn is_identical_to(&self, other: &Interval) -> bool {
        self.semitones == other.semitones && self.spelling == other.spelling
    }

    /// Octave complement in twelve-tone steps (M3 -> m6, A4 -> d5).
    ///
    /// Intervals larger than an octave are reduced first. Direction is kept.
    pub fn inverse(&self) -> Self {
        let octave = SEMITONES_IN_OCTAVE as i32;
        let magnitude = self.semitones.abs();
        let reduced = if magnitude > octave {
            magnitude % octave
        } else {
            magnitude
        };
        let inverted = octave - reduced;
        let signed = if self.semitones < 0 { -inverted } else { inverted };
        let respelled = self.spelling.and_then(|s| {
            Interval::with_spelling(signed, s.quality.inverse(), 9 - s.number).ok()
        });
        respelled.unwrap_or_else(|| Interval::from_semitones(signed))
    }

    /// Reduce into `[0, octave_size)`, the ascending pitch-class distance
    pub fn normalized(&self, octave_size: u32) -> Self {
        let size = octave_size.max(1) as i32;
        let reduced = self.semitones.rem_euclid(size);
        if reduced == self.semitones {
            *self
        } else if octave_size == SEMITONES_IN_OCTAVE {
            Interval::from_semitones(reduced)
        } else {
            Interval::unspelled(reduced)
        }
    }

    /// Human readable name, e.g. "M3" or "major third"
    pub fn description(&self, short: bool) -> String {
        let direction = if self.semitones < 0 { "descending " } else { "" };
        match self.spelling {
            Some(s) if short => format!(
                "{}{}{}",
                if self.semitones < 0 { "-" } else { "" },
                s.quality.symbol(),
                s.number
            ),
            Some(s) => format!("{}{} {}", direction, s.quality.name(), ordinal_name(s.number)),
            None if short => format!("{}st", self.semitones),
            None => format!("{} steps", self.semitones),
        }
    }

    /// Combine two sizes; the spelling is only re-derived when both sides
    /// are spelled twelve-tone intervals.
    fn combine(self, other: Interval, semitones: i32) -> Interval {
        if self.spelling.is_some() && other.spelling.is_some() {
            Interval::from_semitones(semitones)
        } else {
            Interval::unspelled(semitones)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::UNISON
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.semitones == other.semitones
    }
}

impl Eq for Interval {}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semitones.hash(state);
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitones.cmp(&other.semitones)
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        self.combine(rhs, self.semitones + rhs.semitones)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        self.combine(rhs, self.semitones - rhs.semitones)
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval {
            semitones: -self.semitones,
            spelling: self.spelling,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description(true))
    }
}

impl FromStr for Interval {
    type Err = HarmonyError;

    /// Parse short names such as "M3", "P5", "-m3" or "A4"
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (descending, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let mut chars = body.chars();
        let invalid = || HarmonyError::InvalidIntervalSpec {
            semitones: None,
            quality: body.chars().next().unwrap_or('?'),
            number: 0,
        };
        let quality = chars
            .next()
            .and_then(Quality::from_symbol)
            .ok_or_else(invalid)?;
        let number: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        let interval = Interval::new(quality, number)?;
        Ok(if descending { -interval } else { interval })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_semitones_for_qualities() {
        assert_eq!(semitones_for(Quality::Perfect, 1).unwrap(), 0);
        assert_eq!(semitones_for(Quality::Augmented, 1).unwrap(), 1);
        assert_eq!(semitones_for(Quality::Diminished, 3).unwrap(), 2);
        assert_eq!(semitones_for(Quality::Minor, 3).unwrap(), 3);
        assert_eq!(semitones_for(Quality::Major, 3).unwrap(), 4);
        assert_eq!(semitones_for(Quality::Augmented, 3).unwrap(), 5);
        assert_eq!(semitones_for(Quality::Diminished, 5).unwrap(), 6);
        assert_eq!(semitones_for(Quality::Diminished, 8).unwrap(), 11);
        assert_eq!(semitones_for(Quality::Augmented, 8).unwrap(), 13);
    }

    #[test]
    fn test_invalid_quality_number_pairs() {
        assert!(semitones_for(Quality::Major, 5).is_err());
        assert!(semitones_for(Quality::Perfect, 3).is_err());
        assert!(semitones_for(Quality::Diminished, 1).is_err());
        assert!(semitones_for(Quality::Major, 9).is_err());
        assert!(semitones_for(Quality::Perfect, 0).is_err());
    }

    #[test]
    fn test_with_spelling_rejects_inconsistent_triple() {
        assert!(Interval::with_spelling(7, Quality::Perfect, 5).is_ok());
        assert!(Interval::with_spelling(-7, Quality::Perfect, 5).is_ok());
        let err = Interval::with_spelling(6, Quality::Perfect, 5).unwrap_err();
        assert_eq!(
            err,
            HarmonyError::InvalidIntervalSpec {
                semitones: Some(6),
                quality: 'P',
                number: 5
            }
        );
        assert!(Interval::with_spelling(4, Quality::Minor, 3).is_err());
    }

    #[test]
    fn test_default_spelling() {
        assert!(Interval::from_semitones(4).is_identical_to(&Interval::MAJOR_THIRD));
        assert!(Interval::from_semitones(6).is_identical_to(&Interval::AUGMENTED_FOURTH));
        assert!(Interval::from_semitones(12).is_identical_to(&Interval::OCTAVE));
        assert_eq!(Interval::from_semitones(-3).number(), Some(3));
        assert_eq!(Interval::from_semitones(14).spelling(), None);
    }

    #[test]
    fn test_enharmonic_equality_and_identity() {
        let a4 = Interval::AUGMENTED_FOURTH;
        let d5 = Interval::DIMINISHED_FIFTH;
        assert_eq!(a4, d5);
        assert!(!a4.is_identical_to(&d5));

        let mut set = HashSet::new();
        set.insert(a4);
        assert!(set.contains(&d5));
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let sum = Interval::MAJOR_THIRD + Interval::MINOR_THIRD;
        assert_eq!(sum, Interval::PERFECT_FIFTH);
        assert_eq!(sum.quality(), Some(Quality::Perfect));

        let diff = Interval::MAJOR_THIRD - Interval::PERFECT_FIFTH;
        assert_eq!(diff.semitones(), -3);

        let big = Interval::OCTAVE + Interval::PERFECT_FIFTH;
        assert_eq!(big.semitones(), 19);
        assert_eq!(big.spelling(), None);

        assert_eq!((-Interval::MAJOR_SIXTH).semitones(), -9);
    }

    #[test]
    fn test_unspelled_arithmetic_stays_unspelled() {
        let sum = Interval::unspelled(3) + Interval::MAJOR_SECOND;
        assert_eq!(sum.semitones(), 5);
        assert_eq!(sum.spelling(), None);
    }

    #[test]
    fn test_inverse() {
        assert!(Interval::MAJOR_THIRD.inverse().is_identical_to(&Interval::MINOR_SIXTH));
        assert!(Interval::AUGMENTED_FOURTH.inverse().is_identical_to(&Interval::DIMINISHED_FIFTH));
        assert!(Interval::PERFECT_FIFTH.inverse().is_identical_to(&Interval::PERFECT_FOURTH));
        assert!(Interval::UNISON.inverse().is_identical_to(&Interval::OCTAVE));
        assert!(Interval::OCTAVE.inverse().is_identical_to(&Interval::UNISON));
        assert_eq!((-Interval::MINOR_SECOND).inverse().semitones(), -11);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Interval::from_semitones(-5).normalized(12).semitones(), 7);
        assert_eq!(Interval::unspelled(19).normalized(12).semitones(), 7);
        assert_eq!(
            Interval::unspelled(19).normalized(12).quality(),
            Some(Quality::Perfect)
        );
        assert_eq!(Interval::unspelled(30).normalized(24).spelling(), None);
        assert!(Interval::DIMINISHED_FIFTH
            .normalized(12)
            .is_identical_to(&Interval::DIMINISHED_FIFTH));
    }

    #[test]
    fn test_ordering() {
        let mut intervals = vec![
            Interval::PERFECT_FIFTH,
            Interval::MINOR_SECOND,
            -Interval::MAJOR_THIRD,
        ];
        intervals.sort();
        assert_eq!(
            intervals.iter().map(|i| i.semitones()).collect::<Vec<_>>(),
            vec![-4, 1, 7]
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(Interval::MAJOR_THIRD.description(true), "M3");
        assert_eq!(Interval::MAJOR_THIRD.description(false), "major third");
        assert_eq!((-Interval::MINOR_THIRD).description(true), "-m3");
        assert_eq!(
            (-Interval::MINOR_THIRD).description(false),
            "descending minor third"
        );
        assert_eq!(Interval::unspelled(5).to_string(), "5st");
        assert_eq!(Interval::OCTAVE.to_string(), "P8");
    }

    #[test]
    fn test_parse() {
        let fifth: Interval = "P5".parse().unwrap();
        assert!(fifth.is_identical_to(&Interval::PERFECT_FIFTH));
        let down: Interval = "-m3".parse().unwrap();
        assert_eq!(down.semitones(), -3);
        assert!("X3".parse::<Interval>().is_err());
        assert!("P3".parse::<Interval>().is_err());
        assert!("M".parse::<Interval>().is_err());
    }

    #[test]
    fn test_cents() {
        assert_eq!(Interval::PERFECT_FIFTH.cents(), 700);
        assert_eq!((-Interval::OCTAVE).cents(), -1200);
    }
}
