// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the harmony algebra.
//!
//! Every failure is local to the construction or query that raised it.

use thiserror::Error;

use crate::music::pitch_class::PitchClass;

/// Harmony error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarmonyError {
    /// Semitone count, quality and number do not describe the same interval
    #[error("Invalid interval spec: {semitones:?} semitones, quality {quality}, number {number}")]
    InvalidIntervalSpec {
        semitones: Option<i32>,
        quality: char,
        number: u8,
    },

    /// Scale degrees are 1-indexed
    #[error("Invalid scale degree: {0}")]
    InvalidScaleDegree(i32),

    /// Pitch has no MIDI note number
    #[error("MIDI note out of range: {0}")]
    OutOfMidiRange(i64),

    /// No unique letter name exists for a bare residue
    #[error("Ambiguous enharmonic spelling for pitch class {0}")]
    AmbiguousEnharmonicSpelling(PitchClass),

    /// Values built on different octave sizes were combined
    #[error("Octave size mismatch: expected {expected}, found {found}")]
    OctaveSizeMismatch { expected: u32, found: u32 },

    /// Operation only defined for a particular octave size
    #[error("Unsupported octave size: requires {required}, found {found}")]
    UnsupportedOctaveSize { required: String, found: u32 },

    /// Octave must contain at least one step
    #[error("Invalid octave size: {0}")]
    InvalidOctaveSize(u32),

    /// Scale degree list is malformed
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    /// Chord root is not one of its constituents
    #[error("Chord root {0} is not among the chord's pitch classes")]
    RootNotInChord(PitchClass),

    /// Tone row is not a permutation of the octave
    #[error("Invalid tone row: {0}")]
    InvalidToneRow(String),

    /// Partials are numbered from 1
    #[error("Invalid partial number: {0}")]
    InvalidPartial(u32),

    /// Frequency must be positive and finite
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(f64),

    /// Cent value is not finite
    #[error("Invalid cents: {0}")]
    InvalidCents(f64),

    /// Tuning parameters are unusable
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// Note name could not be parsed
    #[error("Invalid note name: {0}")]
    InvalidNoteName(String),

    /// Key would need more than seven accidentals
    #[error("Theoretical key: {0} accidentals")]
    TheoreticalKey(u32),
}

/// Result alias for harmony operations
pub type Result<T> = std::result::Result<T, HarmonyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HarmonyError::InvalidScaleDegree(0);
        assert_eq!(err.to_string(), "Invalid scale degree: 0");

        let err = HarmonyError::OctaveSizeMismatch {
            expected: 12,
            found: 24,
        };
        assert_eq!(err.to_string(), "Octave size mismatch: expected 12, found 24");
    }

    #[test]
    fn test_error_displays_pitch_class() {
        let err = HarmonyError::AmbiguousEnharmonicSpelling(PitchClass::new(1));
        assert_eq!(
            err.to_string(),
            "Ambiguous enharmonic spelling for pitch class 1"
        );
    }
}
