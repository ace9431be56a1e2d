// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic series above a fundamental pitch.

use crate::error::{HarmonyError, Result};
use crate::music::compound::CompoundInterval;
use crate::music::pitch::{NearestPitch, Pitch};
use crate::music::tuning::Tuning;

/// One partial of a harmonic series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// 1 for the fundamental
    pub number: u32,
    pub frequency: f64,
}

/// A partial together with its closest tempered pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximatePartial {
    pub partial: Partial,
    pub pitch: Pitch,
    /// Signed distance from `pitch` to the partial, in cents
    pub cents_deviation: f64,
}

/// The first `partials` harmonics of a fundamental
#[derive(Debug, Clone, PartialEq)]
pub struct OvertoneSeries {
    fundamental: Pitch,
    tuning: Tuning,
    partials: u32,
}

impl OvertoneSeries {
    /// Series over the default tuning for the fundamental's octave size
    pub fn new(fundamental: Pitch, partials: u32) -> Self {
        Self {
            fundamental,
            tuning: Tuning::default_for(fundamental.octave_size()),
            partials,
        }
    }

    /// Series whose fundamental frequency and nearest pitches use `tuning`
    pub fn with_tuning(fundamental: Pitch, partials: u32, tuning: Tuning) -> Result<Self> {
        fundamental.frequency_in(&tuning)?;
        Ok(Self {
            fundamental,
            tuning,
            partials,
        })
    }

    pub fn fundamental(&self) -> Pitch {
        self.fundamental
    }

    pub fn len(&self) -> usize {
        self.partials as usize
    }

    pub fn is_empty(&self) -> bool {
        self.partials == 0
    }

    pub fn fundamental_frequency(&self) -> f64 {
        self.tuning.frequency_of(self.fundamental.absolute_steps())
    }

    /// Partial `number` (1-indexed); not limited to the series length
    pub fn partial(&self, number: u32) -> Result<Partial> {
        if number == 0 {
            return Err(HarmonyError::InvalidPartial(number));
        }
        Ok(Partial {
            number,
            frequency: self.fundamental_frequency() * number as f64,
        })
    }

    /// Lazy iterator over the partials; each call starts again at 1
    pub fn iter(&self) -> Partials {
        Partials {
            fundamental_frequency: self.fundamental_frequency(),
            next: 1,
            end: self.partials as u64,
        }
    }

    /// Lossy: nearest tempered pitch of `partial`, with deviation
    pub fn nearest_pitch(&self, partial: Partial) -> Result<ApproximatePartial> {
        let NearestPitch {
            pitch,
            cents_deviation,
        } = Pitch::nearest_to_frequency(partial.frequency, &self.tuning)?;
        Ok(ApproximatePartial {
            partial,
            pitch,
            cents_deviation,
        })
    }

    /// Lossy: every partial mapped onto its nearest tempered pitch
    pub fn nearest_pitches(&self) -> impl Iterator<Item = Result<ApproximatePartial>> + '_ {
        self.iter().map(move |partial| self.nearest_pitch(partial))
    }

    /// Tempered interval from the fundamental to the pitch nearest partial
    /// `number` (2 is an octave, 3 a twelfth, 5 a major seventeenth)
    pub fn interval_of_partial(&self, number: u32) -> Result<CompoundInterval> {
        let approximate = self.nearest_pitch(self.partial(number)?)?;
        self.fundamental.compound_interval_to(&approximate.pitch)
    }
}

impl<'a> IntoIterator for &'a OvertoneSeries {
    type Item = Partial;
    type IntoIter = Partials;

    fn into_iter(self) -> Partials {
        self.iter()
    }
}

/// Iterator over the partials of an [`OvertoneSeries`]
#[derive(Debug, Clone)]
pub struct Partials {
    fundamental_frequency: f64,
    // One past `u32::MAX` must be representable
    next: u64,
    end: u64,
}

impl Iterator for Partials {
    type Item = Partial;

    fn next(&mut self) -> Option<Partial> {
        if self.next > self.end {
            return None;
        }
        let number = self.next as u32;
        self.next += 1;
        Some(Partial {
            number,
            frequency: self.fundamental_frequency * number as f64,
        })
    }

    fn nth(&mut self, n: usize) -> Option<Partial> {
        self.next = self.next.saturating_add(n as u64).min(self.end + 1);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Partials {}
