// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Octave size, reference pitch and MIDI/frequency conversions.
//!
//! Absolute step numbers follow the MIDI octave convention: octave -1 starts
//! at step 0, so middle C (C4) is step 60 in a twelve step octave.

use crate::error::{HarmonyError, Result};

/// Default number of equal steps per octave
pub const SEMITONES_IN_OCTAVE: u32 = 12;

/// Frequency of the reference pitch (A4)
pub const REFERENCE_FREQUENCY: f64 = 440.0;

/// MIDI note number of the reference pitch (A4)
pub const REFERENCE_MIDI_NOTE: i32 = 69;

/// Cents in one equal-tempered semitone
pub const CENTS_PER_SEMITONE: i64 = 100;

/// Highest valid MIDI note number
pub const MAX_MIDI_NOTE: i32 = 127;

/// Equal-tempered frequency of a MIDI note
pub fn midi_to_freq(midi_note: i32) -> f64 {
    REFERENCE_FREQUENCY * 2f64.powf((midi_note - REFERENCE_MIDI_NOTE) as f64 / 12.0)
}

/// Fractional MIDI note number of a frequency (not rounded)
pub fn freq_to_midi(freq: f64) -> f64 {
    REFERENCE_MIDI_NOTE as f64 + 12.0 * (freq / REFERENCE_FREQUENCY).log2()
}

/// First MIDI note of an octave (C)
pub fn lowest_note_of_midi_octave(octave: i32) -> i32 {
    (octave + 1) * 12
}

/// Last MIDI note of an octave (B)
pub fn highest_note_of_midi_octave(octave: i32) -> i32 {
    lowest_note_of_midi_octave(octave) + 11
}

/// Octave containing a MIDI note
pub fn octave_number_of_midi_note(midi_note: i32) -> i32 {
    midi_note.div_euclid(12) - 1
}

/// An equal division of the 2:1 octave anchored at a reference pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    steps_per_octave: u32,
    reference_frequency: f64,
    reference_step: u32,
    reference_octave: i32,
}

impl Tuning {
    /// Create a tuning, validating every parameter
    pub fn new(
        steps_per_octave: u32,
        reference_frequency: f64,
        reference_step: u32,
        reference_octave: i32,
    ) -> Result<Self> {
        if steps_per_octave == 0 {
            return Err(HarmonyError::InvalidOctaveSize(steps_per_octave));
        }
        if !reference_frequency.is_finite() || reference_frequency <= 0.0 {
            return Err(HarmonyError::InvalidFrequency(reference_frequency));
        }
        if reference_step >= steps_per_octave {
            return Err(HarmonyError::InvalidTuning(format!(
                "reference step {} outside octave of {} steps",
                reference_step, steps_per_octave
            )));
        }
        Ok(Self {
            steps_per_octave,
            reference_frequency,
            reference_step,
            reference_octave,
        })
    }

    /// Equal division of the octave into `steps` parts with A4 = 440 Hz.
    ///
    /// The reference step is the step nearest to the twelve-tone A.
    pub fn edo(steps: u32) -> Result<Self> {
        if steps == 0 {
            return Err(HarmonyError::InvalidOctaveSize(steps));
        }
        Ok(Self::default_for(steps))
    }

    /// A440 equal division for an octave size already known to be non-zero
    pub(crate) fn default_for(steps: u32) -> Self {
        let steps = steps.max(1);
        Self {
            steps_per_octave: steps,
            reference_frequency: REFERENCE_FREQUENCY,
            reference_step: ((9 * steps + 6) / 12).min(steps - 1),
            reference_octave: 4,
        }
    }

    pub fn steps_per_octave(&self) -> u32 {
        self.steps_per_octave
    }

    pub fn reference_frequency(&self) -> f64 {
        self.reference_frequency
    }

    pub fn reference_step(&self) -> u32 {
        self.reference_step
    }

    pub fn reference_octave(&self) -> i32 {
        self.reference_octave
    }

    /// Absolute step number of the reference pitch
    pub fn reference_absolute_step(&self) -> i64 {
        (self.reference_octave as i64 + 1) * self.steps_per_octave as i64
            + self.reference_step as i64
    }

    /// Frequency of an absolute step number
    pub fn frequency_of(&self, absolute_step: i64) -> f64 {
        let offset = (absolute_step - self.reference_absolute_step()) as f64;
        self.reference_frequency * 2f64.powf(offset / self.steps_per_octave as f64)
    }

    /// Fractional absolute step number of a frequency
    pub fn steps_of(&self, freq: f64) -> Result<f64> {
        if !freq.is_finite() || freq <= 0.0 {
            return Err(HarmonyError::InvalidFrequency(freq));
        }
        Ok(self.reference_absolute_step() as f64
            + self.steps_per_octave as f64 * (freq / self.reference_frequency).log2())
    }

    /// Width of one step in cents
    pub fn cents_per_step(&self) -> f64 {
        1200.0 / self.steps_per_octave as f64
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            steps_per_octave: SEMITONES_IN_OCTAVE,
            reference_frequency: REFERENCE_FREQUENCY,
            reference_step: 9,
            reference_octave: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midi_to_freq() {
        assert_relative_eq!(midi_to_freq(69), 440.0);
        assert_relative_eq!(midi_to_freq(81), 880.0);
        assert_relative_eq!(midi_to_freq(60), 261.625_565_3, epsilon = 1e-6);
    }

    #[test]
    fn test_freq_to_midi_is_fractional() {
        assert_relative_eq!(freq_to_midi(440.0), 69.0);
        assert_relative_eq!(freq_to_midi(220.0), 57.0);
        let quarter_sharp = freq_to_midi(440.0 * 2f64.powf(0.5 / 12.0));
        assert_relative_eq!(quarter_sharp, 69.5, epsilon = 1e-9);
    }

    #[test]
    fn test_octave_boundaries() {
        assert_eq!(lowest_note_of_midi_octave(-1), 0);
        assert_eq!(lowest_note_of_midi_octave(4), 60);
        assert_eq!(highest_note_of_midi_octave(4), 71);
        assert_eq!(highest_note_of_midi_octave(9), 131);
        assert_eq!(octave_number_of_midi_note(0), -1);
        assert_eq!(octave_number_of_midi_note(60), 4);
        assert_eq!(octave_number_of_midi_note(71), 4);
        assert_eq!(octave_number_of_midi_note(72), 5);
    }

    #[test]
    fn test_default_tuning() {
        let tuning = Tuning::default();
        assert_eq!(tuning.steps_per_octave(), 12);
        assert_eq!(tuning.reference_absolute_step(), 69);
        assert_relative_eq!(tuning.frequency_of(69), 440.0);
        assert_relative_eq!(tuning.frequency_of(57), 220.0);
        assert_relative_eq!(tuning.cents_per_step(), 100.0);
    }

    #[test]
    fn test_edo_reference_step() {
        let quarter_tone = Tuning::edo(24).unwrap();
        assert_eq!(quarter_tone.reference_step(), 18);
        assert_relative_eq!(quarter_tone.frequency_of(quarter_tone.reference_absolute_step()), 440.0);
        assert_relative_eq!(quarter_tone.cents_per_step(), 50.0);

        assert_eq!(Tuning::edo(12).unwrap(), Tuning::default());
        assert!(Tuning::edo(0).is_err());
    }

    #[test]
    fn test_invalid_tuning() {
        assert!(matches!(
            Tuning::new(12, -1.0, 9, 4),
            Err(HarmonyError::InvalidFrequency(_))
        ));
        assert!(matches!(
            Tuning::new(12, 440.0, 12, 4),
            Err(HarmonyError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_steps_of_frequency() {
        let tuning = Tuning::default();
        assert_relative_eq!(tuning.steps_of(440.0).unwrap(), 69.0);
        assert!(tuning.steps_of(0.0).is_err());
        assert!(tuning.steps_of(f64::NAN).is_err());
    }
}
