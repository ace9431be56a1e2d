// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes: residues of pitch modulo one octave.
//!
//! A pitch class stores its step index together with the octave size it was
//! built for. Spelling is never stored, so C# and Db are the same value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};
use crate::music::interval::Interval;
use crate::music::tuning::SEMITONES_IN_OCTAVE;

/// Preferred accidental when naming black keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    #[default]
    Sharp,
    Flat,
}

impl Accidental {
    pub fn symbol(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
        }
    }
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Step index of each natural letter
fn letter_index(letter: char) -> Option<i64> {
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

/// A residue class of pitch modulo one octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass {
    index: u32,
    octave_size: u32,
}

impl PitchClass {
    /// Twelve-tone pitch class, normalized into 0..12
    pub fn new(value: i64) -> Self {
        Self {
            index: value.rem_euclid(SEMITONES_IN_OCTAVE as i64) as u32,
            octave_size: SEMITONES_IN_OCTAVE,
        }
    }

    /// Pitch class in an octave of `octave_size` equal steps
    pub fn with_octave_size(value: i64, octave_size: u32) -> Result<Self> {
        if octave_size == 0 {
            return Err(HarmonyError::InvalidOctaveSize(octave_size));
        }
        Ok(Self {
            index: value.rem_euclid(octave_size as i64) as u32,
            octave_size,
        })
    }

    /// Every pitch class of the twelve-tone octave, ascending from C
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..SEMITONES_IN_OCTAVE as i64).map(PitchClass::new)
    }

    /// Every pitch class of this class's octave size, ascending from 0
    pub fn all_in_octave(&self) -> impl Iterator<Item = PitchClass> {
        let size = self.octave_size;
        (0..size).map(move |index| PitchClass {
            index,
            octave_size: size,
        })
    }

    /// Step index in `[0, octave_size)`
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn octave_size(&self) -> u32 {
        self.octave_size
    }

    /// Move by a signed number of steps
    pub fn add_steps(&self, steps: i64) -> Self {
        let size = self.octave_size as i64;
        Self {
            index: (self.index as i64 + steps).rem_euclid(size) as u32,
            octave_size: self.octave_size,
        }
    }

    /// Steps of this class's octave covered by `interval`.
    ///
    /// Unspelled intervals count raw steps. Spelled intervals are twelve-tone
    /// sizes and scale by `octave_size / 12`, so a perfect fifth is 14 steps of
    /// a 24-step octave. Octave sizes that are not a multiple of 12 have no
    /// exact image of a spelled interval and fail with `UnsupportedOctaveSize`.
    pub fn steps_of(&self, interval: Interval) -> Result<i64> {
        let semitones = interval.semitones() as i64;
        if interval.spelling().is_none() || self.octave_size == SEMITONES_IN_OCTAVE {
            return Ok(semitones);
        }
        if self.octave_size % SEMITONES_IN_OCTAVE != 0 {
            return Err(HarmonyError::UnsupportedOctaveSize {
                required: "a multiple of 12 for spelled intervals".to_string(),
                found: self.octave_size,
            });
        }
        Ok(semitones * (self.octave_size / SEMITONES_IN_OCTAVE) as i64)
    }

    /// Move by an interval, wrapping at the octave
    pub fn add(self, interval: Interval) -> Result<Self> {
        Ok(self.add_steps(self.steps_of(interval)?))
    }

    /// Move by an interval already expressed in this class's own steps
    pub(crate) fn shifted_by(self, interval: Interval) -> Self {
        self.add_steps(interval.semitones() as i64)
    }

    /// Ascending distance from `other` up to `self`, in `[0, octave_size)`
    pub fn subtract(&self, other: PitchClass) -> Result<Interval> {
        self.check_octave_size(&other)?;
        let size = self.octave_size as i64;
        let steps = (self.index as i64 - other.index as i64).rem_euclid(size) as i32;
        Ok(self.interval_of(steps))
    }

    /// Fail unless both classes divide the octave the same way
    pub fn check_octave_size(&self, other: &PitchClass) -> Result<()> {
        if self.octave_size != other.octave_size {
            return Err(HarmonyError::OctaveSizeMismatch {
                expected: self.octave_size,
                found: other.octave_size,
            });
        }
        Ok(())
    }

    /// Interval of `steps` in this class's octave, spelled only for twelve steps
    pub(crate) fn interval_of(&self, steps: i32) -> Interval {
        if self.octave_size == SEMITONES_IN_OCTAVE {
            Interval::from_semitones(steps)
        } else {
            Interval::unspelled(steps)
        }
    }

    fn require_twelve(&self) -> Result<()> {
        if self.octave_size != SEMITONES_IN_OCTAVE {
            return Err(HarmonyError::UnsupportedOctaveSize {
                required: SEMITONES_IN_OCTAVE.to_string(),
                found: self.octave_size,
            });
        }
        Ok(())
    }

    pub fn is_black_key(&self) -> bool {
        self.octave_size == SEMITONES_IN_OCTAVE && matches!(self.index, 1 | 3 | 6 | 8 | 10)
    }

    pub fn is_white_key(&self) -> bool {
        self.octave_size == SEMITONES_IN_OCTAVE && !self.is_black_key()
    }

    /// Unique letter name of a natural.
    ///
    /// Black keys have two equally valid spellings and return
    /// `AmbiguousEnharmonicSpelling`.
    pub fn letter_name(&self) -> Result<char> {
        self.require_twelve()?;
        if self.is_black_key() {
            return Err(HarmonyError::AmbiguousEnharmonicSpelling(*self));
        }
        SHARP_NAMES[self.index as usize]
            .chars()
            .next()
            .ok_or(HarmonyError::AmbiguousEnharmonicSpelling(*self))
    }

    /// Name using the given accidental for black keys
    pub fn name_with(&self, accidental: Accidental) -> Result<&'static str> {
        self.require_twelve()?;
        let table = match accidental {
            Accidental::Sharp => &SHARP_NAMES,
            Accidental::Flat => &FLAT_NAMES,
        };
        Ok(table[self.index as usize])
    }
}

impl Default for PitchClass {
    fn default() -> Self {
        PitchClass::new(0)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl FromStr for PitchClass {
    type Err = HarmonyError;

    /// Parse a note name such as "C", "F#", "Db", "Bbb" or "E#"
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .and_then(letter_index)
            .ok_or_else(|| HarmonyError::InvalidNoteName(s.to_string()))?;
        let mut offset = 0i64;
        for c in chars {
            match c {
                '#' | 's' | 'S' => offset += 1,
                'b' | 'B' => offset -= 1,
                _ => return Err(HarmonyError::InvalidNoteName(s.to_string())),
            }
        }
        Ok(PitchClass::new(letter + offset))
    }
}
