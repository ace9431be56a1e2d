// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Intervals spanning more than one octave.
//!
//! A compound interval is an octave span plus a simple interval smaller than
//! one octave. Direction is a flag on the whole interval; the span is never
//! negative.
//!
//! Comparing a compound interval with a plain [`Interval`] through `==` is a
//! pitch-class level comparison: a major ninth equals a major second. Use
//! [`CompoundInterval::matches_exactly`] when the span must match too.
//! Comparing two compound intervals with `==` is always exact.

use std::fmt;

use crate::error::{HarmonyError, Result};
use crate::music::interval::{ordinal_name, Interval, Quality};
use crate::music::tuning::SEMITONES_IN_OCTAVE;

/// Generic numbers per octave (an octave spans seven letter steps)
const NUMBERS_PER_OCTAVE: u8 = 7;

/// An octave span plus a simple interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompoundInterval {
    octaves: u32,
    simple: Interval,
    descending: bool,
    octave_size: u32,
}

impl CompoundInterval {
    /// Decompose a twelve-tone semitone count into span and simple interval
    pub fn from_semitones(semitones: i32) -> Self {
        Self::split(semitones, SEMITONES_IN_OCTAVE)
    }

    /// Decompose a step count in an octave of `octave_size` steps
    pub fn from_semitones_in(steps: i32, octave_size: u32) -> Result<Self> {
        if octave_size == 0 {
            return Err(HarmonyError::InvalidOctaveSize(octave_size));
        }
        Ok(Self::split(steps, octave_size))
    }

    fn split(steps: i32, octave_size: u32) -> Self {
        let magnitude = steps.unsigned_abs();
        let remainder = (magnitude % octave_size) as i32;
        let simple = if octave_size == SEMITONES_IN_OCTAVE {
            Interval::from_semitones(remainder)
        } else {
            Interval::unspelled(remainder)
        };
        Self {
            octaves: magnitude / octave_size,
            simple,
            descending: steps < 0,
            octave_size,
        }
    }

    /// Span of `octaves` plus `simple`, folding whole octaves of the simple
    /// interval into the span (P8 becomes one octave plus P1, A8 one octave
    /// plus A1; d8 stays simple).
    pub fn new(octaves: u32, simple: Interval) -> Self {
        let size = SEMITONES_IN_OCTAVE as i32;
        let descending = simple.is_descending();
        let magnitude = simple.abs();
        if magnitude.semitones() < size {
            return Self {
                octaves,
                simple: magnitude,
                descending,
                octave_size: SEMITONES_IN_OCTAVE,
            };
        }
        let extra = (magnitude.semitones() / size) as u32;
        let remainder = magnitude.semitones() % size;
        let folded = match magnitude.spelling() {
            Some(spelling) if spelling.number == 8 => {
                Interval::with_spelling(remainder, spelling.quality, 1)
                    .unwrap_or_else(|_| Interval::from_semitones(remainder))
            }
            _ => Interval::from_semitones(remainder),
        };
        Self {
            octaves: octaves.saturating_add(extra),
            simple: folded,
            descending,
            octave_size: SEMITONES_IN_OCTAVE,
        }
    }

    /// Ascending compound interval from a quality and compound number
    /// (9 = ninth, 12 = twelfth, 15 = double octave)
    pub fn from_quality(quality: Quality, number: u8) -> Result<Self> {
        if number == 0 {
            return Err(HarmonyError::InvalidIntervalSpec {
                semitones: None,
                quality: quality.symbol(),
                number,
            });
        }
        let mut octaves = (number - 1) / NUMBERS_PER_OCTAVE;
        let mut simple_number = number - NUMBERS_PER_OCTAVE * octaves;
        // d1 does not exist; a diminished compound octave keeps a d8 on top
        if simple_number == 1 && quality == Quality::Diminished && octaves > 0 {
            octaves -= 1;
            simple_number = 8;
        }
        let simple = Interval::new(quality, simple_number).map_err(|_| {
            HarmonyError::InvalidIntervalSpec {
                semitones: None,
                quality: quality.symbol(),
                number,
            }
        })?;
        Ok(Self {
            octaves: octaves as u32,
            simple,
            descending: false,
            octave_size: SEMITONES_IN_OCTAVE,
        })
    }

    /// Number of whole octaves spanned
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn octave_size(&self) -> u32 {
        self.octave_size
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// The interval with the octave span projected away, direction kept
    pub fn simple_interval(&self) -> Interval {
        if self.descending {
            -self.simple
        } else {
            self.simple
        }
    }

    /// Signed total size in steps
    pub fn semitones(&self) -> i32 {
        let magnitude = self.octaves as i32 * self.octave_size as i32 + self.simple.semitones();
        if self.descending {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Compound generic number (a major ninth is 9); `None` when unspelled
    /// or too wide to count
    pub fn number(&self) -> Option<u32> {
        let simple = self.simple.number()? as u32;
        self.octaves
            .checked_mul(NUMBERS_PER_OCTAVE as u32)?
            .checked_add(simple)
    }

    pub fn quality(&self) -> Option<Quality> {
        self.simple.quality()
    }

    /// Whether both reduce to the same simple interval
    pub fn has_same_simple_interval(&self, other: &CompoundInterval) -> bool {
        self.simple_interval() == other.simple_interval()
    }

    /// Span-sensitive comparison with a plain interval
    pub fn matches_exactly(&self, interval: &Interval) -> bool {
        self.semitones() == interval.semitones()
    }

    /// Lossless conversion to a plain interval of the full size
    pub fn to_interval(&self) -> Interval {
        if self.octaves == 0 {
            self.simple_interval()
        } else if self.octave_size == SEMITONES_IN_OCTAVE {
            Interval::from_semitones(self.semitones())
        } else {
            Interval::unspelled(self.semitones())
        }
    }

    /// Sum of two compound intervals of the same octave size
    pub fn checked_add(&self, other: &CompoundInterval) -> Result<Self> {
        if self.octave_size != other.octave_size {
            return Err(HarmonyError::OctaveSizeMismatch {
                expected: self.octave_size,
                found: other.octave_size,
            });
        }
        Ok(Self::split(self.semitones() + other.semitones(), self.octave_size))
    }

    fn reduced_steps(&self) -> i32 {
        self.semitones().rem_euclid(self.octave_size as i32)
    }
}

impl From<Interval> for CompoundInterval {
    fn from(interval: Interval) -> Self {
        CompoundInterval::new(0, interval)
    }
}

impl PartialEq<Interval> for CompoundInterval {
    fn eq(&self, other: &Interval) -> bool {
        self.reduced_steps() == other.semitones().rem_euclid(self.octave_size as i32)
    }
}

impl PartialEq<CompoundInterval> for Interval {
    fn eq(&self, other: &CompoundInterval) -> bool {
        other == self
    }
}

fn compound_ordinal(number: u32) -> String {
    match number {
        1..=8 => ordinal_name(number as u8).to_string(),
        9 => "ninth".to_string(),
        10 => "tenth".to_string(),
        11 => "eleventh".to_string(),
        12 => "twelfth".to_string(),
        13 => "thirteenth".to_string(),
        14 => "fourteenth".to_string(),
        15 => "double octave".to_string(),
        n => format!("{}th", n),
    }
}

impl fmt::Display for CompoundInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "descending ")?;
        }
        match (self.quality(), self.number()) {
            (Some(quality), Some(number)) => {
                write!(f, "{} {}", quality.name(), compound_ordinal(number))
            }
            _ => {
                let steps = self.simple.semitones();
                write!(
                    f,
                    "{} {} + {} {}",
                    self.octaves,
                    if self.octaves == 1 { "octave" } else { "octaves" },
                    steps,
                    if steps == 1 { "step" } else { "steps" }
                )
            }
        }
    }
}
