// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Twelve-tone rows and their classical transformations.

use std::collections::HashSet;
use std::fmt;

use crate::error::{HarmonyError, Result};
use crate::music::interval::Interval;
use crate::music::pitch_class::PitchClass;

/// An ordering of every pitch class of an octave, each used once
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToneRow {
    pitch_classes: Vec<PitchClass>,
}

impl ToneRow {
    pub fn new(pitch_classes: Vec<PitchClass>) -> Result<Self> {
        let first = pitch_classes
            .first()
            .ok_or_else(|| HarmonyError::InvalidToneRow("row is empty".to_string()))?;
        let size = first.octave_size();
        if pitch_classes.len() != size as usize {
            return Err(HarmonyError::InvalidToneRow(format!(
                "expected {} pitch classes, found {}",
                size,
                pitch_classes.len()
            )));
        }
        let mut seen = HashSet::new();
        for pc in &pitch_classes {
            first.check_octave_size(pc)?;
            if !seen.insert(*pc) {
                return Err(HarmonyError::InvalidToneRow(format!(
                    "pitch class {} appears twice",
                    pc
                )));
            }
        }
        Ok(Self { pitch_classes })
    }

    /// Row from twelve-tone indices
    pub fn from_indices(indices: &[i64]) -> Result<Self> {
        Self::new(indices.iter().map(|&i| PitchClass::new(i)).collect())
    }

    pub fn pitch_classes(&self) -> &[PitchClass] {
        &self.pitch_classes
    }

    pub fn len(&self) -> usize {
        self.pitch_classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitch_classes.is_empty()
    }

    /// Pitch class at a 0-indexed position
    pub fn get(&self, position: usize) -> Option<PitchClass> {
        self.pitch_classes.get(position).copied()
    }

    /// 0-indexed position of a pitch class
    pub fn index_of(&self, pitch_class: PitchClass) -> Option<usize> {
        self.pitch_classes.iter().position(|&pc| pc == pitch_class)
    }

    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.pitch_classes.iter().copied()
    }

    /// Ascending intervals between successive members
    pub fn intervals(&self) -> Vec<Interval> {
        self.pitch_classes
            .windows(2)
            .filter_map(|pair| pair[1].subtract(pair[0]).ok())
            .collect()
    }

    /// Every interval mirrored around the first pitch class
    pub fn inversion(&self) -> Self {
        let first = self.pitch_classes[0];
        let pitch_classes = self
            .pitch_classes
            .iter()
            .map(|&pc| first.add_steps(first.index() as i64 - pc.index() as i64))
            .collect();
        Self { pitch_classes }
    }

    /// The row played backwards
    pub fn retrograde(&self) -> Self {
        let mut pitch_classes = self.pitch_classes.clone();
        pitch_classes.reverse();
        Self { pitch_classes }
    }

    pub fn retrograde_inversion(&self) -> Self {
        self.inversion().retrograde()
    }

    /// Every member moved by `interval`; spelled intervals need an octave
    /// size that is a multiple of twelve
    pub fn transposed_by(&self, interval: Interval) -> Result<Self> {
        let steps = match self.pitch_classes.first() {
            Some(first) => first.steps_of(interval)?,
            None => 0,
        };
        Ok(Self {
            pitch_classes: self.pitch_classes.iter().map(|pc| pc.add_steps(steps)).collect(),
        })
    }
}

impl fmt::Display for ToneRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.pitch_classes.iter().map(|pc| pc.to_string()).collect();
        write!(f, "{}", members.join(" "))
    }
}
