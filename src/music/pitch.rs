// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Absolute, octave-qualified pitches.
//!
//! Octaves follow the MIDI convention (C4 is MIDI note 60). Pitches order by
//! octave first and then by pitch class, which matches frequency order.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::{HarmonyError, Result};
use crate::music::compound::CompoundInterval;
use crate::music::interval::Interval;
use crate::music::microtonal::MicrotonalInterval;
use crate::music::pitch_class::{Accidental, PitchClass};
use crate::music::tuning::{
    lowest_note_of_midi_octave, octave_number_of_midi_note, Tuning, CENTS_PER_SEMITONE,
    MAX_MIDI_NOTE, SEMITONES_IN_OCTAVE,
};

/// A pitch class placed in a specific octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pitch {
    octave: i32,
    pitch_class: PitchClass,
}

/// Result of mapping a frequency onto the nearest pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPitch {
    /// Closest pitch of the tuning
    pub pitch: Pitch,
    /// Signed distance from that pitch to the frequency, in cents
    pub cents_deviation: f64,
}

impl Pitch {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            octave,
            pitch_class,
        }
    }

    /// Pitch of a MIDI note number
    pub fn from_midi(note: u8) -> Self {
        let note = note as i32;
        Self {
            octave: octave_number_of_midi_note(note),
            pitch_class: PitchClass::new(note as i64),
        }
    }

    /// Pitch at an absolute step number in an octave of `octave_size` steps
    pub fn from_steps(absolute_steps: i64, octave_size: u32) -> Result<Self> {
        let pitch_class = PitchClass::with_octave_size(absolute_steps, octave_size)?;
        let octave = absolute_steps.div_euclid(octave_size as i64) - 1;
        Ok(Self {
            octave: octave as i32,
            pitch_class,
        })
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn octave_size(&self) -> u32 {
        self.pitch_class.octave_size()
    }

    /// Step number counted from the start of octave -1
    pub fn absolute_steps(&self) -> i64 {
        (self.octave as i64 + 1) * self.octave_size() as i64 + self.pitch_class.index() as i64
    }

    /// Same pitch class in another octave
    pub fn in_octave(&self, octave: i32) -> Self {
        Self {
            octave,
            pitch_class: self.pitch_class,
        }
    }

    /// Equal-tempered frequency with A4 = 440 Hz
    pub fn frequency(&self) -> f64 {
        Tuning::default_for(self.octave_size()).frequency_of(self.absolute_steps())
    }

    /// Frequency under a specific tuning of the same octave size
    pub fn frequency_in(&self, tuning: &Tuning) -> Result<f64> {
        if tuning.steps_per_octave() != self.octave_size() {
            return Err(HarmonyError::OctaveSizeMismatch {
                expected: self.octave_size(),
                found: tuning.steps_per_octave(),
            });
        }
        Ok(tuning.frequency_of(self.absolute_steps()))
    }

    /// MIDI note number, defined for twelve-step pitches in 0..=127
    pub fn midi_note(&self) -> Result<u8> {
        if self.octave_size() != SEMITONES_IN_OCTAVE {
            return Err(HarmonyError::UnsupportedOctaveSize {
                required: SEMITONES_IN_OCTAVE.to_string(),
                found: self.octave_size(),
            });
        }
        let note = self.absolute_steps();
        if note < lowest_note_of_midi_octave(-1) as i64 || note > MAX_MIDI_NOTE as i64 {
            return Err(HarmonyError::OutOfMidiRange(note));
        }
        Ok(note as u8)
    }

    /// Move by an interval, carrying into the octave.
    ///
    /// Spelled intervals are twelve-tone sizes (see [`PitchClass::steps_of`]).
    pub fn transposed_by(&self, interval: Interval) -> Result<Self> {
        Ok(self.shifted(self.pitch_class.steps_of(interval)?))
    }

    /// Move by an interval already expressed in this pitch's own steps
    pub(crate) fn shifted_by(&self, interval: Interval) -> Self {
        self.shifted(interval.semitones() as i64)
    }

    /// Exact frequency `interval` away from this pitch
    pub fn frequency_with_offset(&self, interval: &MicrotonalInterval) -> f64 {
        self.frequency() * interval.frequency_ratio()
    }

    /// Lossy: the pitch of this octave size nearest to `interval` away.
    ///
    /// Steps are rounded to the nearest (ties away from zero) and the exact
    /// remainder is reported as `cents_deviation`, so A4 raised 130 cents is
    /// A#4 plus 30 cents.
    pub fn transposed_by_microtonal(&self, interval: &MicrotonalInterval) -> NearestPitch {
        let size = self.octave_size() as i64;
        let cents_per_octave = CENTS_PER_SEMITONE * SEMITONES_IN_OCTAVE as i64;
        let steps = interval.total_cents() * size / cents_per_octave;
        let nearest = steps.round();
        let residual = (steps - nearest) * cents_per_octave / size;
        let pitch = self.shifted(nearest.to_integer());
        let cents_deviation = *residual.numer() as f64 / *residual.denom() as f64;
        trace!(
            from = %self,
            interval = %interval,
            pitch = %pitch,
            cents_deviation,
            "rounded microtonal transposition"
        );
        NearestPitch {
            pitch,
            cents_deviation,
        }
    }

    /// Move by a compound interval of the same octave size
    pub fn transposed_by_compound(&self, interval: &CompoundInterval) -> Result<Self> {
        if interval.octave_size() != self.octave_size() {
            return Err(HarmonyError::OctaveSizeMismatch {
                expected: self.octave_size(),
                found: interval.octave_size(),
            });
        }
        Ok(self.shifted(interval.semitones() as i64))
    }

    pub(crate) fn shifted(&self, steps: i64) -> Self {
        let size = self.octave_size() as i64;
        let target = self.absolute_steps() + steps;
        Self {
            octave: (target.div_euclid(size) - 1) as i32,
            pitch_class: self.pitch_class.add_steps(steps),
        }
    }

    /// Directed distance to another pitch (negative when `other` is lower)
    pub fn interval_to(&self, other: &Pitch) -> Result<Interval> {
        self.pitch_class.check_octave_size(&other.pitch_class)?;
        let steps = other.absolute_steps() - self.absolute_steps();
        Ok(self.pitch_class.interval_of(steps as i32))
    }

    /// Directed distance split into octave span and simple interval
    pub fn compound_interval_to(&self, other: &Pitch) -> Result<CompoundInterval> {
        self.pitch_class.check_octave_size(&other.pitch_class)?;
        let steps = other.absolute_steps() - self.absolute_steps();
        CompoundInterval::from_semitones_in(steps as i32, self.octave_size())
    }

    /// Lossy: the pitch of `tuning` closest to `freq`.
    ///
    /// Fractional steps are rounded to the nearest step (ties away from zero);
    /// the discarded remainder is reported as `cents_deviation`.
    pub fn nearest_to_frequency(freq: f64, tuning: &Tuning) -> Result<NearestPitch> {
        let steps = tuning.steps_of(freq)?;
        let nearest = steps.round();
        let cents_deviation = (steps - nearest) * tuning.cents_per_step();
        let pitch = Pitch::from_steps(nearest as i64, tuning.steps_per_octave())?;
        trace!(
            freq,
            pitch = %pitch,
            cents_deviation,
            "mapped frequency to nearest pitch"
        );
        Ok(NearestPitch {
            pitch,
            cents_deviation,
        })
    }

    pub fn is_black_key(&self) -> bool {
        self.pitch_class.is_black_key()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pitch_class.name_with(Accidental::Sharp) {
            Ok(name) => write!(f, "{}{}", name, self.octave),
            Err(_) => write!(
                f,
                "[{}/{}]{}",
                self.pitch_class.index(),
                self.octave_size(),
                self.octave
            ),
        }
    }
}

impl FromStr for Pitch {
    type Err = HarmonyError;

    /// Parse scientific pitch notation such as "A4", "C#5" or "Bb-1"
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| HarmonyError::InvalidNoteName(s.to_string()))?;
        let (name, octave) = trimmed.split_at(split);
        let pitch_class: PitchClass = name.parse()?;
        let octave: i32 = octave
            .parse()
            .map_err(|_| HarmonyError::InvalidNoteName(s.to_string()))?;
        Ok(Pitch::new(pitch_class, octave))
    }
}
