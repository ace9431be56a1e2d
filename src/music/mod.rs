// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core for harmony.
//!
//! This module provides the pitch/interval algebra (pitch classes, spelled,
//! microtonal and compound intervals, pitches) and the scale, key and chord
//! abstractions built on it.

pub mod chord;
pub mod compound;
pub mod interval;
pub mod key;
pub mod microtonal;
pub mod overtone;
pub mod pitch;
pub mod pitch_class;
pub mod scale;
pub mod tone_row;
pub mod tuning;

pub use chord::{Chord, ChordQuality};
pub use compound::CompoundInterval;
pub use interval::{Interval, Quality, Spelling};
pub use key::{KeySignature, KeyType};
pub use microtonal::MicrotonalInterval;
pub use overtone::{ApproximatePartial, OvertoneSeries, Partial, Partials};
pub use pitch::{NearestPitch, Pitch};
pub use pitch_class::{Accidental, PitchClass};
pub use scale::{ModeType, Scale, ScaleKind};
pub use tone_row::ToneRow;
pub use tuning::{Tuning, SEMITONES_IN_OCTAVE};
