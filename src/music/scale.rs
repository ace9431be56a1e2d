// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale and mode system.
//!
//! A scale is a root pitch class plus an ascending list of degree intervals
//! within one octave, the first of which is always the unison. The
//! [`ScaleKind`] records how the degrees were generated; every query works
//! on the degree list alone.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use tracing::trace;

use crate::error::{HarmonyError, Result};
use crate::music::chord::Chord;
use crate::music::interval::Interval;
use crate::music::key::{KeySignature, KeyType};
use crate::music::pitch::Pitch;
use crate::music::pitch_class::{Accidental, PitchClass};
use crate::music::tuning::SEMITONES_IN_OCTAVE;

/// Step pattern of the major scale
const IONIAN_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Diatonic modes, in order of their starting degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeType {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl ModeType {
    /// All modes in rotation order
    pub const ALL: [ModeType; 7] = [
        ModeType::Ionian,
        ModeType::Dorian,
        ModeType::Phrygian,
        ModeType::Lydian,
        ModeType::Mixolydian,
        ModeType::Aeolian,
        ModeType::Locrian,
    ];

    /// Degree of the major scale the mode starts on, counted from 0
    pub fn rotation(self) -> usize {
        match self {
            ModeType::Ionian => 0,
            ModeType::Dorian => 1,
            ModeType::Phrygian => 2,
            ModeType::Lydian => 3,
            ModeType::Mixolydian => 4,
            ModeType::Aeolian => 5,
            ModeType::Locrian => 6,
        }
    }

    /// Whole/half step pattern (Dorian is 2122212)
    pub fn steps(self) -> [i32; 7] {
        let mut steps = IONIAN_STEPS;
        steps.rotate_left(self.rotation());
        steps
    }

    /// Flats added to the parallel major's signature (negative adds sharps)
    pub fn added_flats(self) -> i32 {
        match self {
            ModeType::Ionian => 0,
            ModeType::Dorian => 2,
            ModeType::Phrygian => 4,
            ModeType::Lydian => -1,
            ModeType::Mixolydian => 1,
            ModeType::Aeolian => 3,
            ModeType::Locrian => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModeType::Ionian => "Ionian",
            ModeType::Dorian => "Dorian",
            ModeType::Phrygian => "Phrygian",
            ModeType::Lydian => "Lydian",
            ModeType::Mixolydian => "Mixolydian",
            ModeType::Aeolian => "Aeolian",
            ModeType::Locrian => "Locrian",
        }
    }

    /// Key signature of this mode on `root`.
    ///
    /// Aeolian gives the natural minor key on `root`; every other mode gives
    /// the major key whose signature it shares (D Dorian gives C major).
    pub fn key_signature(self, root: PitchClass) -> Result<KeySignature> {
        let parallel = KeySignature::new(root, KeyType::Major)?;
        let signed = parallel.num_sharps() as i32 - parallel.num_flats() as i32;
        let mut adjusted = signed - self.added_flats();
        let octave = SEMITONES_IN_OCTAVE as i32;
        if adjusted > 7 {
            adjusted -= octave;
        } else if adjusted < -7 {
            adjusted += octave;
        }
        let accidental = if adjusted < 0 {
            Accidental::Flat
        } else {
            Accidental::Sharp
        };
        let parent = KeySignature::from_accidentals(adjusted.unsigned_abs(), accidental, KeyType::Major)?;
        Ok(match self {
            ModeType::Aeolian => parent.relative_key(),
            _ => parent,
        })
    }
}

impl FromStr for ModeType {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "major" | "ionian" => Ok(ModeType::Ionian),
            "dorian" => Ok(ModeType::Dorian),
            "phrygian" => Ok(ModeType::Phrygian),
            "lydian" => Ok(ModeType::Lydian),
            "mixolydian" => Ok(ModeType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" => Ok(ModeType::Aeolian),
            "locrian" => Ok(ModeType::Locrian),
            _ => Err(HarmonyError::InvalidScale(s.to_string())),
        }
    }
}

impl fmt::Display for ModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a scale's degrees were generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    Mode(ModeType),
    Chromatic,
    WholeTone,
    Octatonic { starts_with_half_step: bool },
    Key(KeySignature),
    Custom,
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleKind::Mode(mode) => write!(f, "{}", mode),
            ScaleKind::Chromatic => write!(f, "Chromatic"),
            ScaleKind::WholeTone => write!(f, "Whole Tone"),
            ScaleKind::Octatonic {
                starts_with_half_step: true,
            } => write!(f, "Octatonic (H-W)"),
            ScaleKind::Octatonic {
                starts_with_half_step: false,
            } => write!(f, "Octatonic (W-H)"),
            ScaleKind::Key(key) => write!(f, "{}", key.key_type()),
            ScaleKind::Custom => write!(f, "Custom"),
        }
    }
}

/// A root pitch class with ascending degree intervals
#[derive(Debug, Clone)]
pub struct Scale {
    root: PitchClass,
    kind: ScaleKind,
    degrees: Vec<Interval>,
}

impl Scale {
    /// Diatonic mode on `root` (twelve-step octaves only)
    pub fn mode(root: PitchClass, mode: ModeType) -> Result<Self> {
        if root.octave_size() != SEMITONES_IN_OCTAVE {
            return Err(HarmonyError::UnsupportedOctaveSize {
                required: SEMITONES_IN_OCTAVE.to_string(),
                found: root.octave_size(),
            });
        }
        let mut degrees = Vec::with_capacity(7);
        let mut position = 0;
        for step in mode.steps() {
            degrees.push(Interval::from_semitones(position));
            position += step;
        }
        trace!(root = %root, mode = %mode, "built mode");
        Ok(Self {
            root,
            kind: ScaleKind::Mode(mode),
            degrees,
        })
    }

    /// Every step of the octave; degree `i` lies `i - 1` steps above the root
    pub fn chromatic(root: PitchClass) -> Self {
        let degrees = (0..root.octave_size() as i32)
            .map(|steps| root.interval_of(steps))
            .collect();
        Self {
            root,
            kind: ScaleKind::Chromatic,
            degrees,
        }
    }

    /// Six whole tones; the octave must divide into six equal parts
    pub fn whole_tone(root: PitchClass) -> Result<Self> {
        require_divisible(root, 6, "a multiple of 6")?;
        let whole = root.octave_size() as i32 / 6;
        let degrees = (0..6).map(|i| root.interval_of(i * whole)).collect();
        Ok(Self {
            root,
            kind: ScaleKind::WholeTone,
            degrees,
        })
    }

    /// Eight degrees alternating half and whole steps
    pub fn octatonic(root: PitchClass, starts_with_half_step: bool) -> Result<Self> {
        require_divisible(root, 12, "a multiple of 12")?;
        let half = root.octave_size() as i32 / 12;
        let (first, second) = if starts_with_half_step {
            (half, 2 * half)
        } else {
            (2 * half, half)
        };
        let mut degrees = Vec::with_capacity(8);
        let mut position = 0;
        for i in 0..8 {
            degrees.push(root.interval_of(position));
            position += if i % 2 == 0 { first } else { second };
        }
        Ok(Self {
            root,
            kind: ScaleKind::Octatonic {
                starts_with_half_step,
            },
            degrees,
        })
    }

    /// Seven-degree scale of a key signature
    pub fn from_key(key: &KeySignature) -> Self {
        Self {
            root: key.tonic(),
            kind: ScaleKind::Key(*key),
            degrees: key.intervals(),
        }
    }

    /// Scale from explicit degrees: unison first, strictly ascending,
    /// all within one octave
    pub fn custom(root: PitchClass, degrees: Vec<Interval>) -> Result<Self> {
        // Degrees are stored in the root's own steps
        let degrees = if root.octave_size() == SEMITONES_IN_OCTAVE {
            degrees
        } else {
            degrees
                .into_iter()
                .map(|d| Ok(Interval::unspelled(root.steps_of(d)? as i32)))
                .collect::<Result<Vec<_>>>()?
        };
        match degrees.first() {
            None => return Err(HarmonyError::InvalidScale("no degrees".to_string())),
            Some(first) if !first.is_unison() => {
                return Err(HarmonyError::InvalidScale(
                    "first degree must be the unison".to_string(),
                ))
            }
            _ => {}
        }
        if degrees.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(HarmonyError::InvalidScale(
                "degrees must be strictly ascending".to_string(),
            ));
        }
        if degrees
            .iter()
            .any(|d| d.semitones() >= root.octave_size() as i32)
        {
            return Err(HarmonyError::InvalidScale(
                "degrees must lie within one octave".to_string(),
            ));
        }
        Ok(Self {
            root,
            kind: ScaleKind::Custom,
            degrees,
        })
    }

    /// Parse a scale from strings (e.g., "C", "major")
    pub fn parse(root_str: &str, scale_str: &str) -> Result<Self> {
        let root: PitchClass = root_str.parse()?;
        if let Ok(mode) = scale_str.parse::<ModeType>() {
            return Scale::mode(root, mode);
        }
        let normalized = scale_str.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "harmonicminor" => Ok(KeySignature::new(root, KeyType::HarmonicMinor)?.scale()),
            "chromatic" => Ok(Scale::chromatic(root)),
            "wholetone" => Scale::whole_tone(root),
            "octatonic" | "diminished" | "halfwhole" => Scale::octatonic(root, true),
            "wholehalf" | "diminishedwh" => Scale::octatonic(root, false),
            _ => Err(HarmonyError::InvalidScale(scale_str.to_string())),
        }
    }

    /// Root pitch class (degree 1)
    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Degree intervals above the root, unison first
    pub fn intervals(&self) -> &[Interval] {
        &self.degrees
    }

    /// Number of degrees before the pattern repeats
    pub fn notes_per_octave(&self) -> usize {
        self.degrees.len()
    }

    pub fn octave_size(&self) -> u32 {
        self.root.octave_size()
    }

    /// Steps between consecutive degrees, including the step back to the octave
    pub fn steps(&self) -> Vec<Interval> {
        let octave = self.octave_size() as i32;
        self.degrees
            .iter()
            .enumerate()
            .map(|(i, degree)| {
                let next = self
                    .degrees
                    .get(i + 1)
                    .map_or(octave, |d| d.semitones());
                self.root.interval_of(next - degree.semitones())
            })
            .collect()
    }

    /// Pitch classes of the degrees, in degree order
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.degrees.iter().map(|&d| self.root.shifted_by(d)).collect()
    }

    /// Whether a pitch class is one of the degrees
    pub fn contains_pitch_class(&self, pitch_class: PitchClass) -> bool {
        match pitch_class.subtract(self.root) {
            Ok(distance) => self.degrees.contains(&distance),
            Err(_) => false,
        }
    }

    /// Octave-invariant membership ("is this note in the key")
    pub fn contains_pitch(&self, pitch: &Pitch) -> bool {
        self.contains_pitch_class(pitch.pitch_class())
    }

    /// Octave-invariant membership of a MIDI note number
    pub fn contains_midi_note(&self, note: u8) -> bool {
        self.contains_pitch(&Pitch::from_midi(note))
    }

    /// Whether `pitch` is sounded by this scale rooted in one of `octaves`
    /// ("is this exact note present")
    pub fn contains_pitch_within(&self, pitch: &Pitch, octaves: RangeInclusive<i32>) -> bool {
        if !self.contains_pitch(pitch) {
            return false;
        }
        let size = self.octave_size() as i64;
        let above_root = pitch.absolute_steps() - self.root.index() as i64;
        let root_octave = (above_root.div_euclid(size) - 1) as i32;
        octaves.contains(&root_octave)
    }

    /// The root placed in `octave`
    pub fn root_pitch(&self, octave: i32) -> Pitch {
        Pitch::new(self.root, octave)
    }

    /// One octave of the scale starting from the root in `octave`
    pub fn pitches(&self, octave: i32) -> Vec<Pitch> {
        let root = self.root_pitch(octave);
        self.degrees.iter().map(|&d| root.shifted_by(d)).collect()
    }

    /// Every scale pitch between `low` and `high`, inclusive
    pub fn pitches_between(&self, low: &Pitch, high: &Pitch) -> Vec<Pitch> {
        if low.octave_size() != self.octave_size() || high.octave_size() != self.octave_size() {
            return Vec::new();
        }
        (low.absolute_steps()..=high.absolute_steps())
            .filter_map(|steps| Pitch::from_steps(steps, self.octave_size()).ok())
            .filter(|p| self.contains_pitch(p))
            .collect()
    }

    /// Pitch class of a 1-indexed degree; degrees past the last wrap around
    pub fn pitch_class_of_degree(&self, degree: i32) -> Result<PitchClass> {
        let index = self.degree_index(degree)?;
        Ok(self.root.shifted_by(self.degrees[index % self.degrees.len()]))
    }

    /// Pitch of a 1-indexed degree above the root in `octave`, carrying
    /// wrapped degrees into higher octaves
    pub fn pitch_of_degree(&self, degree: i32, octave: i32) -> Result<Pitch> {
        let index = self.degree_index(degree)?;
        let len = self.degrees.len();
        let carry = (index / len) as i32;
        Ok(self
            .root_pitch(octave + carry)
            .shifted_by(self.degrees[index % len]))
    }

    fn degree_index(&self, degree: i32) -> Result<usize> {
        if degree <= 0 {
            return Err(HarmonyError::InvalidScaleDegree(degree));
        }
        Ok((degree - 1) as usize)
    }

    /// The 1-indexed degree of a pitch class, if it is in the scale
    pub fn degree_of(&self, pitch_class: PitchClass) -> Option<usize> {
        let distance = pitch_class.subtract(self.root).ok()?;
        self.degrees.iter().position(|&d| d == distance).map(|i| i + 1)
    }

    /// Key signature of a mode or key scale
    pub fn key_signature(&self) -> Option<KeySignature> {
        match self.kind {
            ScaleKind::Key(key) => Some(key),
            ScaleKind::Mode(mode) => mode.key_signature(self.root).ok(),
            _ => None,
        }
    }

    /// Triad stacked in thirds on a degree (degrees n, n+2, n+4)
    pub fn triad_on_degree(&self, degree: i32, octave: i32) -> Result<Chord> {
        let root = self.pitch_of_degree(degree, octave)?;
        let pitches = [degree, degree + 2, degree + 4]
            .iter()
            .map(|&d| self.pitch_of_degree(d, octave))
            .collect::<Result<Vec<_>>>()?;
        Chord::from_pitches(root.pitch_class(), pitches)
    }

    /// Nearest scale pitch to `pitch`; ties resolve downward
    pub fn quantize(&self, pitch: &Pitch) -> Pitch {
        if self.contains_pitch(pitch) {
            return *pitch;
        }
        let size = self.octave_size() as i64;
        (1..=size / 2)
            .flat_map(|distance| [-distance, distance])
            .filter_map(|offset| Pitch::from_steps(pitch.absolute_steps() + offset, self.octave_size()).ok())
            .find(|candidate| self.contains_pitch(candidate))
            .unwrap_or(*pitch)
    }

    /// Move a pitch by scale degrees (positive = up, negative = down).
    ///
    /// Pitches outside the scale are quantized first.
    pub fn transpose_in_scale(&self, pitch: &Pitch, degrees: i32) -> Pitch {
        let start = self.quantize(pitch);
        let len = self.degrees.len() as i32;
        let current = match self.degree_of(start.pitch_class()) {
            Some(degree) => degree as i32 - 1,
            None => return start,
        };
        let root_octave = if start.pitch_class().index() >= self.root.index() {
            start.octave()
        } else {
            start.octave() - 1
        };
        let position = current + degrees;
        let index = position.rem_euclid(len) as usize;
        let octave = root_octave + position.div_euclid(len);
        self.root_pitch(octave).shifted_by(self.degrees[index])
    }
}

fn require_divisible(root: PitchClass, divisor: u32, required: &str) -> Result<()> {
    if root.octave_size() % divisor != 0 {
        return Err(HarmonyError::UnsupportedOctaveSize {
            required: required.to_string(),
            found: root.octave_size(),
        });
    }
    Ok(())
}

impl PartialEq for Scale {
    /// Same root and same ordered degrees; how they were generated is ignored
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.degrees == other.degrees
    }
}

impl Eq for Scale {}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = match (self.kind, self.key_signature()) {
            (ScaleKind::Key(key), _) => key.tonic_name().to_string(),
            (_, key) => {
                let accidental = key.and_then(|k| k.accidental()).unwrap_or_default();
                self.root
                    .name_with(accidental)
                    .map(str::to_string)
                    .unwrap_or_else(|_| self.root.to_string())
            }
        };
        write!(f, "{} {}", root, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(value: i64) -> PitchClass {
        PitchClass::new(value)
    }

    fn pitch(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    fn semitones(intervals: &[Interval]) -> Vec<i32> {
        intervals.iter().map(|i| i.semitones()).collect()
    }

    #[test]
    fn test_scale_contains() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        assert_eq!(semitones(c_major.intervals()), vec![0, 2, 4, 5, 7, 9, 11]);
        assert!(c_major.contains_pitch_class(pc(4)));
        assert!(!c_major.contains_pitch_class(pc(6)));
        assert_eq!(c_major.pitch_class_of_degree(5).unwrap(), pc(7));
        assert_eq!(c_major.degree_of(pc(4)), Some(3));
    }

    #[test]
    fn test_mode_patterns() {
        let patterns: Vec<Vec<i32>> = ModeType::ALL
            .iter()
            .map(|m| m.steps().to_vec())
            .collect();
        assert_eq!(patterns[1], vec![2, 1, 2, 2, 2, 1, 2]);
        assert_eq!(patterns[2], vec![1, 2, 2, 2, 1, 2, 2]);
        assert_eq!(patterns[3], vec![2, 2, 2, 1, 2, 2, 1]);
        assert_eq!(patterns[6], vec![1, 2, 2, 1, 2, 2, 2]);

        let d_dorian = Scale::mode(pc(2), ModeType::Dorian).unwrap();
        assert_eq!(semitones(&d_dorian.steps()), vec![2, 1, 2, 2, 2, 1, 2]);
    }

    #[test]
    fn test_degree_wraps() {
        let scale = Scale::mode(pc(9), ModeType::Aeolian).unwrap();
        assert_eq!(
            scale.pitch_class_of_degree(8).unwrap(),
            scale.pitch_class_of_degree(1).unwrap()
        );
        assert_eq!(
            scale.pitch_class_of_degree(10).unwrap(),
            scale.pitch_class_of_degree(3).unwrap()
        );
        assert_eq!(
            scale.pitch_class_of_degree(0),
            Err(HarmonyError::InvalidScaleDegree(0))
        );
        assert_eq!(
            scale.pitch_class_of_degree(-2),
            Err(HarmonyError::InvalidScaleDegree(-2))
        );
    }

    #[test]
    fn test_pitch_of_degree_carries_octave() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        assert_eq!(c_major.pitch_of_degree(1, 4).unwrap(), pitch("C4"));
        assert_eq!(c_major.pitch_of_degree(8, 4).unwrap(), pitch("C5"));
        assert_eq!(c_major.pitch_of_degree(16, 4).unwrap(), pitch("D6"));

        let a_minor = Scale::mode(pc(9), ModeType::Aeolian).unwrap();
        assert_eq!(a_minor.pitch_of_degree(3, 4).unwrap(), pitch("C5"));
    }

    #[test]
    fn test_containment_matches_degrees() {
        for mode in ModeType::ALL {
            for root in PitchClass::all() {
                let scale = Scale::mode(root, mode).unwrap();
                for &degree in scale.intervals() {
                    assert!(scale.contains_pitch_class(root.add(degree).unwrap()));
                }
                assert_eq!(
                    PitchClass::all()
                        .filter(|&p| scale.contains_pitch_class(p))
                        .count(),
                    7
                );
            }
        }
    }

    #[test]
    fn test_chromatic() {
        let scale = Scale::chromatic(pc(3));
        assert_eq!(scale.notes_per_octave(), 12);
        assert_eq!(scale.pitch_class_of_degree(4).unwrap(), pc(6));
        assert!(PitchClass::all().all(|p| scale.contains_pitch_class(p)));

        let quarter = Scale::chromatic(PitchClass::with_octave_size(0, 24).unwrap());
        assert_eq!(quarter.notes_per_octave(), 24);
    }

    #[test]
    fn test_whole_tone() {
        let scale = Scale::whole_tone(pc(0)).unwrap();
        assert_eq!(semitones(scale.intervals()), vec![0, 2, 4, 6, 8, 10]);
        assert!(!scale.contains_pitch_class(pc(1)));

        let quarter = Scale::whole_tone(PitchClass::with_octave_size(0, 24).unwrap()).unwrap();
        assert_eq!(semitones(quarter.intervals()), vec![0, 4, 8, 12, 16, 20]);

        let odd = PitchClass::with_octave_size(0, 19).unwrap();
        assert!(matches!(
            Scale::whole_tone(odd),
            Err(HarmonyError::UnsupportedOctaveSize { .. })
        ));
    }

    #[test]
    fn test_octatonic() {
        let half_whole = Scale::octatonic(pc(0), true).unwrap();
        assert_eq!(
            semitones(half_whole.intervals()),
            vec![0, 1, 3, 4, 6, 7, 9, 10]
        );
        let whole_half = Scale::octatonic(pc(0), false).unwrap();
        assert_eq!(
            semitones(whole_half.intervals()),
            vec![0, 2, 3, 5, 6, 8, 9, 11]
        );
        assert_eq!(whole_half.notes_per_octave(), 8);
        assert_eq!(semitones(&whole_half.steps()), vec![2, 1, 2, 1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_custom_validation() {
        assert!(Scale::custom(pc(0), vec![]).is_err());
        assert!(Scale::custom(pc(0), vec![Interval::MAJOR_SECOND]).is_err());
        assert!(Scale::custom(
            pc(0),
            vec![Interval::UNISON, Interval::MAJOR_THIRD, Interval::MINOR_THIRD]
        )
        .is_err());
        assert!(Scale::custom(pc(0), vec![Interval::UNISON, Interval::OCTAVE]).is_err());

        let pentatonic = Scale::custom(
            pc(0),
            [0, 2, 4, 7, 9].iter().map(|&s| Interval::from_semitones(s)).collect(),
        )
        .unwrap();
        assert_eq!(pentatonic.notes_per_octave(), 5);
        assert_eq!(pentatonic.kind(), ScaleKind::Custom);

        let quarter_root = PitchClass::with_octave_size(0, 24).unwrap();
        let quarter_major = Scale::custom(
            quarter_root,
            vec![Interval::UNISON, Interval::MAJOR_THIRD, Interval::PERFECT_FIFTH],
        )
        .unwrap();
        let indices: Vec<u32> = quarter_major.pitch_classes().iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 8, 14]);
        assert!(!quarter_major.contains_pitch_class(PitchClass::with_octave_size(7, 24).unwrap()));
        assert!(matches!(
            Scale::custom(
                PitchClass::with_octave_size(0, 19).unwrap(),
                vec![Interval::UNISON, Interval::MAJOR_THIRD]
            ),
            Err(HarmonyError::UnsupportedOctaveSize { found: 19, .. })
        ));
    }

    #[test]
    fn test_contains_midi_note() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        assert!(c_major.contains_midi_note(60));
        assert!(c_major.contains_midi_note(127));
        assert!(!c_major.contains_midi_note(61));
        assert!(!c_major.contains_midi_note(1));
        assert_eq!((0..=127u8).filter(|&n| c_major.contains_midi_note(n)).count(), 75);

        let quarter = Scale::chromatic(PitchClass::with_octave_size(0, 24).unwrap());
        assert!(!quarter.contains_midi_note(60));
    }

    #[test]
    fn test_equality_requires_same_root() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        let a_minor = Scale::mode(pc(9), ModeType::Aeolian).unwrap();
        let mut c_classes = c_major.pitch_classes();
        let mut a_classes = a_minor.pitch_classes();
        c_classes.sort();
        a_classes.sort();
        assert_eq!(c_classes, a_classes);
        assert_ne!(c_major, a_minor);

        let key_scale = KeySignature::new(pc(0), KeyType::Major).unwrap().scale();
        assert_eq!(c_major, key_scale);
    }

    #[test]
    fn test_contains_pitch_overloads() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        assert!(c_major.contains_pitch(&pitch("E7")));
        assert!(!c_major.contains_pitch(&pitch("F#4")));
        assert!(c_major.contains_pitch_within(&pitch("E4"), 4..=4));
        assert!(!c_major.contains_pitch_within(&pitch("E6"), 4..=5));
        assert!(!c_major.contains_pitch_within(&pitch("F#4"), 4..=4));

        let a_minor = Scale::mode(pc(9), ModeType::Aeolian).unwrap();
        assert!(a_minor.contains_pitch_within(&pitch("G5"), 4..=4));
        assert!(!a_minor.contains_pitch_within(&pitch("G4"), 4..=4));
    }

    #[test]
    fn test_pitches() {
        let g_major = Scale::mode(pc(7), ModeType::Ionian).unwrap();
        let names: Vec<String> = g_major.pitches(3).iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["G3", "A3", "B3", "C4", "D4", "E4", "F#4"]);

        let between = g_major.pitches_between(&pitch("E4"), &pitch("A4"));
        let names: Vec<String> = between.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["E4", "F#4", "G4", "A4"]);
    }

    #[test]
    fn test_mode_key_signatures() {
        let d_dorian = Scale::mode(pc(2), ModeType::Dorian).unwrap();
        assert_eq!(
            d_dorian.key_signature(),
            KeySignature::new(pc(0), KeyType::Major).ok()
        );

        let e_flat_dorian = ModeType::Dorian.key_signature(pc(3)).unwrap();
        assert_eq!(e_flat_dorian.num_flats(), 5);
        assert_eq!(e_flat_dorian.tonic(), pc(1));

        let c_sharp_phrygian = ModeType::Phrygian.key_signature(pc(1)).unwrap();
        assert_eq!(c_sharp_phrygian.num_sharps(), 3);
        assert_eq!(c_sharp_phrygian.tonic(), pc(9));

        let e_aeolian = ModeType::Aeolian.key_signature(pc(4)).unwrap();
        assert_eq!(e_aeolian.key_type(), KeyType::NaturalMinor);
        assert_eq!(e_aeolian.tonic(), pc(4));
        assert_eq!(e_aeolian.num_sharps(), 1);

        for mode in ModeType::ALL {
            for root in PitchClass::all() {
                let key = mode.key_signature(root).unwrap();
                let scale = Scale::mode(root, mode).unwrap();
                let key_scale = key.scale();
                assert!(scale
                    .pitch_classes()
                    .iter()
                    .all(|&p| key_scale.contains_pitch_class(p)));
            }
        }

        assert_eq!(Scale::chromatic(pc(0)).key_signature(), None);
    }

    #[test]
    fn test_triad_on_degree() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        let ii = c_major.triad_on_degree(2, 4).unwrap();
        assert_eq!(ii.root(), pc(2));
        let names: Vec<String> = ii.pitches().iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["D4", "F4", "A4"]);

        let vii = c_major.triad_on_degree(7, 4).unwrap();
        let names: Vec<String> = vii.pitches().iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["B4", "D5", "F5"]);
        assert!(c_major.triad_on_degree(0, 4).is_err());
    }

    #[test]
    fn test_quantize() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        assert_eq!(c_major.quantize(&pitch("C#4")), pitch("C4"));
        assert_eq!(c_major.quantize(&pitch("E4")), pitch("E4"));
        assert_eq!(c_major.quantize(&pitch("F#4")), pitch("F4"));
    }

    #[test]
    fn test_transpose_in_scale() {
        let c_major = Scale::mode(pc(0), ModeType::Ionian).unwrap();
        assert_eq!(c_major.transpose_in_scale(&pitch("C4"), 2), pitch("E4"));
        assert_eq!(c_major.transpose_in_scale(&pitch("B4"), 1), pitch("C5"));
        assert_eq!(c_major.transpose_in_scale(&pitch("C4"), -1), pitch("B3"));
        assert_eq!(c_major.transpose_in_scale(&pitch("G4"), 7), pitch("G5"));

        let a_minor = Scale::mode(pc(9), ModeType::Aeolian).unwrap();
        assert_eq!(a_minor.transpose_in_scale(&pitch("C5"), 1), pitch("D5"));
        assert_eq!(a_minor.transpose_in_scale(&pitch("G5"), 1), pitch("A5"));
    }

    #[test]
    fn test_parse() {
        let scale = Scale::parse("D", "dorian").unwrap();
        assert_eq!(scale.kind(), ScaleKind::Mode(ModeType::Dorian));
        let scale = Scale::parse("A", "harmonic_minor").unwrap();
        assert_eq!(semitones(scale.intervals()), vec![0, 2, 3, 5, 7, 8, 11]);
        assert_eq!(Scale::parse("C", "Whole Tone").unwrap().notes_per_octave(), 6);
        assert_eq!(
            Scale::parse("C", "whole-half").unwrap().kind(),
            ScaleKind::Octatonic {
                starts_with_half_step: false
            }
        );
        assert!(Scale::parse("C", "bebop").is_err());
        assert!(Scale::parse("H", "major").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Scale::parse("C", "major").unwrap().to_string(), "C Ionian");
        assert_eq!(Scale::parse("Eb", "dorian").unwrap().to_string(), "Eb Dorian");
        assert_eq!(
            KeySignature::new(pc(6), KeyType::Major).unwrap().scale().to_string(),
            "Gb major"
        );
        assert_eq!(Scale::chromatic(pc(1)).to_string(), "C# Chromatic");
    }

    #[test]
    fn test_mode_requires_twelve_steps() {
        let quarter = PitchClass::with_octave_size(0, 24).unwrap();
        assert!(matches!(
            Scale::mode(quarter, ModeType::Ionian),
            Err(HarmonyError::UnsupportedOctaveSize { .. })
        ));
    }
}
