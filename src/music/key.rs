// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key signatures and the relationships between keys.
//!
//! The accidental count of a key is derived from its tonic and type when the
//! key is built and cannot be set independently. Counts follow the circle of
//! fifths: a major key on step `t` has `7t mod 12` sharps or `5t mod 12` flats,
//! and a minor key uses its relative major.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::{HarmonyError, Result};
use crate::music::interval::Interval;
use crate::music::pitch_class::{Accidental, PitchClass};
use crate::music::scale::Scale;
use crate::music::tuning::SEMITONES_IN_OCTAVE;

/// Most accidentals a written key signature can carry
pub const MAX_ACCIDENTALS: u32 = 7;

/// Tonality of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Major,
    NaturalMinor,
    HarmonicMinor,
}

impl KeyType {
    /// Semitones of each degree above the tonic
    pub fn semitones(self) -> [i32; 7] {
        match self {
            KeyType::Major => [0, 2, 4, 5, 7, 9, 11],
            KeyType::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
            KeyType::HarmonicMinor => [0, 2, 3, 5, 7, 8, 11],
        }
    }

    pub fn is_minor(self) -> bool {
        !matches!(self, KeyType::Major)
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyType::Major => "major",
            KeyType::NaturalMinor => "minor",
            KeyType::HarmonicMinor => "harmonic minor",
        }
    }
}

impl FromStr for KeyType {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "major" | "ionian" | "maj" => Ok(KeyType::Major),
            "minor" | "naturalminor" | "aeolian" | "min" => Ok(KeyType::NaturalMinor),
            "harmonicminor" => Ok(KeyType::HarmonicMinor),
            _ => Err(HarmonyError::InvalidScale(s.to_string())),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A tonic and tonality with its derived accidentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySignature {
    tonic: PitchClass,
    key_type: KeyType,
    accidental: Option<Accidental>,
    count: u32,
}

/// Step index of the major key sharing a signature with `tonic`/`key_type`
fn relative_major_index(tonic: PitchClass, key_type: KeyType) -> i64 {
    let offset = if key_type.is_minor() { 3 } else { 0 };
    (tonic.index() as i64 + offset).rem_euclid(SEMITONES_IN_OCTAVE as i64)
}

fn sharps_for(tonic: PitchClass, key_type: KeyType) -> u32 {
    (7 * relative_major_index(tonic, key_type)).rem_euclid(12) as u32
}

fn flats_for(tonic: PitchClass, key_type: KeyType) -> u32 {
    (5 * relative_major_index(tonic, key_type)).rem_euclid(12) as u32
}

fn require_twelve(tonic: PitchClass) -> Result<()> {
    if tonic.octave_size() != SEMITONES_IN_OCTAVE {
        return Err(HarmonyError::UnsupportedOctaveSize {
            required: SEMITONES_IN_OCTAVE.to_string(),
            found: tonic.octave_size(),
        });
    }
    Ok(())
}

impl KeySignature {
    /// Key with the spelling that needs fewer accidentals; ties go to flats
    /// (F# major is written as Gb major).
    pub fn new(tonic: PitchClass, key_type: KeyType) -> Result<Self> {
        require_twelve(tonic)?;
        let sharps = sharps_for(tonic, key_type);
        let flats = flats_for(tonic, key_type);
        let (accidental, count) = if sharps == 0 {
            (None, 0)
        } else if sharps < flats {
            (Some(Accidental::Sharp), sharps)
        } else {
            (Some(Accidental::Flat), flats)
        };
        Ok(Self {
            tonic,
            key_type,
            accidental,
            count,
        })
    }

    /// Key spelled with a particular accidental (C# major rather than Db).
    ///
    /// Fails with `TheoreticalKey` when that spelling needs more than seven.
    pub fn with_accidental(
        tonic: PitchClass,
        key_type: KeyType,
        accidental: Accidental,
    ) -> Result<Self> {
        require_twelve(tonic)?;
        let count = match accidental {
            Accidental::Sharp => sharps_for(tonic, key_type),
            Accidental::Flat => flats_for(tonic, key_type),
        };
        if count > MAX_ACCIDENTALS {
            return Err(HarmonyError::TheoreticalKey(count));
        }
        Ok(Self {
            tonic,
            key_type,
            accidental: (count > 0).then_some(accidental),
            count,
        })
    }

    /// Key with `count` sharps or flats
    pub fn from_accidentals(count: u32, accidental: Accidental, key_type: KeyType) -> Result<Self> {
        if count > MAX_ACCIDENTALS {
            return Err(HarmonyError::TheoreticalKey(count));
        }
        let fifths = match accidental {
            Accidental::Sharp => 7 * count as i64,
            Accidental::Flat => 5 * count as i64,
        };
        let offset = if key_type.is_minor() { -3 } else { 0 };
        let tonic = PitchClass::new(fifths + offset);
        Ok(Self {
            tonic,
            key_type,
            accidental: (count > 0).then_some(accidental),
            count,
        })
    }

    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Sharp or flat, `None` for C major and A minor
    pub fn accidental(&self) -> Option<Accidental> {
        self.accidental
    }

    pub fn accidental_count(&self) -> u32 {
        self.count
    }

    pub fn num_sharps(&self) -> u32 {
        if self.is_sharp_key() {
            self.count
        } else {
            0
        }
    }

    pub fn num_flats(&self) -> u32 {
        if self.is_flat_key() {
            self.count
        } else {
            0
        }
    }

    pub fn is_sharp_key(&self) -> bool {
        self.accidental == Some(Accidental::Sharp)
    }

    pub fn is_flat_key(&self) -> bool {
        self.accidental == Some(Accidental::Flat)
    }

    pub fn is_major(&self) -> bool {
        self.key_type == KeyType::Major
    }

    pub fn is_minor(&self) -> bool {
        self.key_type.is_minor()
    }

    /// Tonic name in the key's own spelling ("F#", "Gb", "Cb")
    pub fn tonic_name(&self) -> &'static str {
        match (self.tonic.index(), self.accidental) {
            (11, Some(Accidental::Flat)) => "Cb",
            (_, accidental) => self
                .tonic
                .name_with(accidental.unwrap_or_default())
                .unwrap_or("?"),
        }
    }

    /// Degrees of the key's scale above the tonic
    pub fn intervals(&self) -> Vec<Interval> {
        self.key_type
            .semitones()
            .iter()
            .map(|&s| Interval::from_semitones(s))
            .collect()
    }

    /// The diatonic scale of this key
    pub fn scale(&self) -> Scale {
        Scale::from_key(self)
    }

    /// Same tonic and tonality, preferring this key's accidental direction
    fn respelled(&self, tonic: PitchClass, key_type: KeyType) -> Self {
        let preferred = self
            .accidental
            .and_then(|accidental| Self::with_accidental(tonic, key_type, accidental).ok());
        match preferred {
            Some(key) => key,
            None => {
                trace!(tonic = %tonic, "falling back to default key spelling");
                Self::new(tonic, key_type).unwrap_or(*self)
            }
        }
    }

    /// Key with the same signature and opposite tonality (C major <-> A minor)
    pub fn relative_key(&self) -> Self {
        let (tonic, key_type) = if self.is_minor() {
            (self.tonic.shifted_by(Interval::MINOR_THIRD), KeyType::Major)
        } else {
            (self.tonic.shifted_by(-Interval::MINOR_THIRD), KeyType::NaturalMinor)
        };
        Self {
            tonic,
            key_type,
            accidental: self.accidental,
            count: self.count,
        }
    }

    pub fn is_relative_key_of(&self, other: &KeySignature) -> bool {
        self.is_minor() != other.is_minor()
            && relative_major_index(self.tonic, self.key_type)
                == relative_major_index(other.tonic, other.key_type)
    }

    /// Key on the same tonic with opposite tonality (C major <-> C minor)
    pub fn parallel_key(&self) -> Self {
        let key_type = if self.is_minor() {
            KeyType::Major
        } else {
            KeyType::NaturalMinor
        };
        self.respelled(self.tonic, key_type)
    }

    pub fn is_parallel_key_of(&self, other: &KeySignature) -> bool {
        self.tonic == other.tonic && self.is_minor() != other.is_minor()
    }

    /// Whether the same key can also be written with the other accidental
    /// in at most seven accidentals (B major / Cb major)
    pub fn has_enharmonic_key(&self) -> bool {
        self.count > 0 && SEMITONES_IN_OCTAVE - self.count <= MAX_ACCIDENTALS
    }

    /// The same key spelled with the other accidental
    pub fn enharmonic_key(&self) -> Option<Self> {
        if !self.has_enharmonic_key() {
            return None;
        }
        let accidental = match self.accidental? {
            Accidental::Sharp => Accidental::Flat,
            Accidental::Flat => Accidental::Sharp,
        };
        Some(Self {
            tonic: self.tonic,
            key_type: self.key_type,
            accidental: Some(accidental),
            count: SEMITONES_IN_OCTAVE - self.count,
        })
    }

    pub fn is_enharmonic_key_of(&self, other: &KeySignature) -> bool {
        self.tonic == other.tonic
            && self.key_type == other.key_type
            && self.accidental.is_some()
            && other.accidental.is_some()
            && self.accidental != other.accidental
    }

    /// Major key a perfect fifth above the tonic
    pub fn dominant_key(&self) -> Self {
        self.respelled(self.tonic.shifted_by(Interval::PERFECT_FIFTH), KeyType::Major)
    }

    pub fn is_dominant_key_of(&self, other: &KeySignature) -> bool {
        self.is_major() && self.tonic == other.tonic.shifted_by(Interval::PERFECT_FIFTH)
    }

    /// Same tonic, different tonality
    pub fn with_type(&self, key_type: KeyType) -> Self {
        self.respelled(self.tonic, key_type)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic_name(), self.key_type)
    }
}
