// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords as unordered pitch-class sets with a root.
//!
//! A chord may also carry a voicing (concrete pitches). Membership and
//! equality look at the root and pitch-class content only; the voicing is
//! consulted by [`Chord::contains_exact_pitch`], [`Chord::intervals`] and the
//! lowest/highest queries. Inversions are not normalized.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{HarmonyError, Result};
use crate::music::interval::Interval;
use crate::music::pitch::Pitch;
use crate::music::pitch_class::{Accidental, PitchClass};
use crate::music::scale::Scale;
use crate::music::tuning::SEMITONES_IN_OCTAVE;

/// Common chord formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Dominant7,
    Major7,
    Minor7,
    HalfDiminished7,
    Diminished7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 11] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::HalfDiminished7,
        ChordQuality::Diminished7,
    ];

    /// Intervals above the root, root excluded
    pub fn intervals(self) -> Vec<Interval> {
        match self {
            ChordQuality::Major => vec![Interval::MAJOR_THIRD, Interval::PERFECT_FIFTH],
            ChordQuality::Minor => vec![Interval::MINOR_THIRD, Interval::PERFECT_FIFTH],
            ChordQuality::Diminished => vec![Interval::MINOR_THIRD, Interval::DIMINISHED_FIFTH],
            ChordQuality::Augmented => vec![Interval::MAJOR_THIRD, Interval::AUGMENTED_FIFTH],
            ChordQuality::Sus2 => vec![Interval::MAJOR_SECOND, Interval::PERFECT_FIFTH],
            ChordQuality::Sus4 => vec![Interval::PERFECT_FOURTH, Interval::PERFECT_FIFTH],
            ChordQuality::Dominant7 => vec![
                Interval::MAJOR_THIRD,
                Interval::PERFECT_FIFTH,
                Interval::MINOR_SEVENTH,
            ],
            ChordQuality::Major7 => vec![
                Interval::MAJOR_THIRD,
                Interval::PERFECT_FIFTH,
                Interval::MAJOR_SEVENTH,
            ],
            ChordQuality::Minor7 => vec![
                Interval::MINOR_THIRD,
                Interval::PERFECT_FIFTH,
                Interval::MINOR_SEVENTH,
            ],
            ChordQuality::HalfDiminished7 => vec![
                Interval::MINOR_THIRD,
                Interval::DIMINISHED_FIFTH,
                Interval::MINOR_SEVENTH,
            ],
            ChordQuality::Diminished7 => vec![
                Interval::MINOR_THIRD,
                Interval::DIMINISHED_FIFTH,
                Interval::DIMINISHED_SEVENTH,
            ],
        }
    }

    /// Lead-sheet suffix ("m7", "dim", ...)
    pub fn symbol(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Diminished7 => "dim7",
        }
    }
}

impl FromStr for ChordQuality {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "" | "maj" | "major" => Ok(ChordQuality::Major),
            "m" | "min" | "minor" => Ok(ChordQuality::Minor),
            "dim" | "diminished" => Ok(ChordQuality::Diminished),
            "aug" | "augmented" | "+" => Ok(ChordQuality::Augmented),
            "sus2" => Ok(ChordQuality::Sus2),
            "sus4" | "sus" => Ok(ChordQuality::Sus4),
            "7" | "dom7" | "dominant7" => Ok(ChordQuality::Dominant7),
            "maj7" | "major7" => Ok(ChordQuality::Major7),
            "m7" | "min7" | "minor7" => Ok(ChordQuality::Minor7),
            "m7b5" | "halfdim7" | "halfdiminished7" => Ok(ChordQuality::HalfDiminished7),
            "dim7" | "diminished7" => Ok(ChordQuality::Diminished7),
            _ => Err(HarmonyError::InvalidScale(format!("unknown chord quality: {}", s))),
        }
    }
}

/// A root plus a set of pitch classes, optionally voiced
#[derive(Debug, Clone)]
pub struct Chord {
    root: PitchClass,
    pitch_classes: BTreeSet<PitchClass>,
    pitches: Vec<Pitch>,
}

impl Chord {
    /// Unvoiced chord from a root and its pitch classes (order is ignored)
    pub fn new<I>(root: PitchClass, pitch_classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = PitchClass>,
    {
        let pitch_classes: BTreeSet<PitchClass> = pitch_classes.into_iter().collect();
        Self::validated(root, pitch_classes, Vec::new())
    }

    /// Voiced chord from literal pitches with an externally chosen root.
    ///
    /// Duplicate pitches collapse; the voicing is kept in ascending order.
    pub fn from_pitches<I>(root: PitchClass, pitches: I) -> Result<Self>
    where
        I: IntoIterator<Item = Pitch>,
    {
        let mut pitches: Vec<Pitch> = pitches.into_iter().collect();
        pitches.sort();
        pitches.dedup();
        let pitch_classes = pitches.iter().map(|p| p.pitch_class()).collect();
        Self::validated(root, pitch_classes, pitches)
    }

    /// Voiced chord stacking `intervals` above a root pitch
    pub fn from_formula(root: Pitch, intervals: &[Interval]) -> Result<Self> {
        let mut pitches = vec![root];
        for &interval in intervals {
            pitches.push(root.transposed_by(interval)?);
        }
        pitches.sort();
        pitches.dedup();
        Ok(Self {
            root: root.pitch_class(),
            pitch_classes: pitches.iter().map(|p| p.pitch_class()).collect(),
            pitches,
        })
    }

    /// Unvoiced chord from a root pitch class and a formula
    pub fn from_class_formula(root: PitchClass, intervals: &[Interval]) -> Result<Self> {
        let mut pitch_classes = BTreeSet::from([root]);
        for &interval in intervals {
            pitch_classes.insert(root.add(interval)?);
        }
        Ok(Self {
            root,
            pitch_classes,
            pitches: Vec::new(),
        })
    }

    /// Voiced chord of a named quality in root position.
    ///
    /// Formulas are twelve-tone intervals, so the root's octave size must be a
    /// multiple of 12.
    pub fn with_quality(root: Pitch, quality: ChordQuality) -> Result<Self> {
        Self::from_formula(root, &quality.intervals())
    }

    fn validated(
        root: PitchClass,
        pitch_classes: BTreeSet<PitchClass>,
        pitches: Vec<Pitch>,
    ) -> Result<Self> {
        for pc in &pitch_classes {
            root.check_octave_size(pc)?;
        }
        if !pitch_classes.contains(&root) {
            return Err(HarmonyError::RootNotInChord(root));
        }
        Ok(Self {
            root,
            pitch_classes,
            pitches,
        })
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Pitch classes in ascending index order
    pub fn pitch_classes(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.pitch_classes.iter().copied()
    }

    /// Voiced pitches, lowest first (empty when unvoiced)
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn is_voiced(&self) -> bool {
        !self.pitches.is_empty()
    }

    pub fn num_pitch_classes(&self) -> usize {
        self.pitch_classes.len()
    }

    pub fn contains_pitch_class(&self, pitch_class: PitchClass) -> bool {
        self.pitch_classes.contains(&pitch_class)
    }

    /// Octave-invariant membership
    pub fn contains_pitch(&self, pitch: &Pitch) -> bool {
        self.contains_pitch_class(pitch.pitch_class())
    }

    /// Whether this exact pitch is part of the voicing
    pub fn contains_exact_pitch(&self, pitch: &Pitch) -> bool {
        self.pitches.binary_search(pitch).is_ok()
    }

    /// Whether a MIDI note's pitch class belongs to the chord
    pub fn contains_midi_note(&self, note: u8) -> bool {
        self.contains_pitch(&Pitch::from_midi(note))
    }

    /// Ascending distances of every pitch class from the root
    pub fn intervals_from_root(&self) -> Vec<Interval> {
        let mut intervals: Vec<Interval> = self
            .pitch_classes
            .iter()
            .filter_map(|pc| pc.subtract(self.root).ok())
            .collect();
        intervals.sort();
        intervals
    }

    /// Distances between consecutive voiced pitches
    pub fn intervals(&self) -> Vec<Interval> {
        self.pitches
            .windows(2)
            .filter_map(|pair| pair[0].interval_to(&pair[1]).ok())
            .collect()
    }

    /// Count of each interval class (1 up to half an octave) between all
    /// pairs of pitch classes
    pub fn interval_class_vector(&self) -> Vec<u32> {
        let size = self.root.octave_size();
        let mut vector = vec![0; (size / 2) as usize];
        let classes: Vec<PitchClass> = self.pitch_classes().collect();
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                let distance = (b.index() as i64 - a.index() as i64).rem_euclid(size as i64) as u32;
                let class = distance.min(size - distance);
                if class > 0 {
                    vector[(class - 1) as usize] += 1;
                }
            }
        }
        vector
    }

    pub fn lowest_pitch(&self) -> Option<Pitch> {
        self.pitches.first().copied()
    }

    pub fn highest_pitch(&self) -> Option<Pitch> {
        self.pitches.last().copied()
    }

    /// Whether every pitch class of the chord is in `scale`
    pub fn fits_in_scale(&self, scale: &Scale) -> bool {
        self.pitch_classes
            .iter()
            .all(|&pc| scale.contains_pitch_class(pc))
    }

    /// Chord moved by an interval, voicing included
    pub fn transposed_by(&self, interval: Interval) -> Result<Self> {
        let steps = self.root.steps_of(interval)?;
        Ok(Self {
            root: self.root.add_steps(steps),
            pitch_classes: self.pitch_classes.iter().map(|pc| pc.add_steps(steps)).collect(),
            pitches: self
                .pitches
                .iter()
                .map(|p| p.shifted(steps))
                .collect(),
        })
    }

    /// Named quality whose formula matches the pitch-class content
    pub fn quality(&self) -> Option<ChordQuality> {
        if self.root.octave_size() != SEMITONES_IN_OCTAVE {
            return None;
        }
        let intervals = self.intervals_from_root();
        ChordQuality::ALL.into_iter().find(|quality| {
            let mut formula = quality.intervals();
            formula.insert(0, Interval::UNISON);
            formula == intervals
        })
    }
}

impl PartialEq for Chord {
    /// Same root and same pitch-class set; voicing is ignored
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.pitch_classes == other.pitch_classes
    }
}

impl Eq for Chord {}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(quality), Ok(root)) = (self.quality(), self.root.name_with(Accidental::Sharp)) {
            return write!(f, "{}{}", root, quality.symbol());
        }
        let members: Vec<String> = self.pitch_classes.iter().map(|pc| pc.to_string()).collect();
        write!(f, "{}[{}]", self.root, members.join(" "))
    }
}
