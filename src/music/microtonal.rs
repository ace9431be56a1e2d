// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Intervals with sub-semitone resolution.
//!
//! The total size is kept as an exact rational number of cents, so sums of
//! thirds of a cent or other repeating fractions never drift. The split into
//! whole semitones plus residual cents is derived on demand.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_rational::Ratio;
use num_traits::{ToPrimitive, Zero};
use tracing::trace;

use crate::error::{HarmonyError, Result};
use crate::music::interval::Interval;
use crate::music::tuning::CENTS_PER_SEMITONE;

/// Resolution of cents parsed from floating point (thousandths of a cent)
const FLOAT_CENT_DENOMINATOR: i64 = 1000;

/// An interval measured in exact rational cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MicrotonalInterval {
    cents: Ratio<i64>,
}

impl MicrotonalInterval {
    /// `semitones` whole semitones plus a signed cent offset
    pub fn new(semitones: i32, cents: Ratio<i64>) -> Self {
        Self {
            cents: Ratio::from_integer(semitones as i64 * CENTS_PER_SEMITONE) + cents,
        }
    }

    /// Interval of a total number of cents
    pub fn from_cents(cents: Ratio<i64>) -> Self {
        Self { cents }
    }

    /// Interval from floating-point cents, kept to a thousandth of a cent
    pub fn from_cents_f64(cents: f64) -> Result<Self> {
        if !cents.is_finite() {
            return Err(HarmonyError::InvalidCents(cents));
        }
        let scaled = (cents * FLOAT_CENT_DENOMINATOR as f64).round();
        let numerator = scaled.to_i64().ok_or(HarmonyError::InvalidCents(cents))?;
        Ok(Self {
            cents: Ratio::new(numerator, FLOAT_CENT_DENOMINATOR),
        })
    }

    /// Total size in cents
    pub fn total_cents(&self) -> Ratio<i64> {
        self.cents
    }

    /// Nearest whole semitone, ties rounded away from zero
    pub fn semitones(&self) -> i32 {
        let semis = self.cents / CENTS_PER_SEMITONE;
        semis.round().to_integer() as i32
    }

    /// Cents left over after taking [`semitones`](Self::semitones)
    pub fn residual_cents(&self) -> Ratio<i64> {
        self.cents - Ratio::from_integer(self.semitones() as i64 * CENTS_PER_SEMITONE)
    }

    /// Whether the interval is a whole number of semitones
    pub fn is_whole_semitones(&self) -> bool {
        self.residual_cents().is_zero()
    }

    pub fn cents_f64(&self) -> f64 {
        ratio_to_f64(self.cents)
    }

    pub fn as_semitones_f64(&self) -> f64 {
        self.cents_f64() / CENTS_PER_SEMITONE as f64
    }

    /// Equal-tempered frequency ratio, 2^(cents/1200)
    pub fn frequency_ratio(&self) -> f64 {
        2f64.powf(self.cents_f64() / 1200.0)
    }

    /// Lossy: nearest whole-semitone interval (ties away from zero).
    ///
    /// The residual cents are discarded.
    pub fn round_to_interval(&self) -> Interval {
        let semitones = self.semitones();
        trace!(
            cents = %self.cents,
            semitones,
            "rounding microtonal interval to nearest semitone"
        );
        Interval::from_semitones(semitones)
    }

    /// Lossy: whole semitones toward zero, discarding the fraction
    pub fn truncate_to_interval(&self) -> Interval {
        let semitones = (self.cents / CENTS_PER_SEMITONE).trunc().to_integer() as i32;
        trace!(
            cents = %self.cents,
            semitones,
            "truncating microtonal interval toward zero"
        );
        Interval::from_semitones(semitones)
    }
}

fn ratio_to_f64(ratio: Ratio<i64>) -> f64 {
    *ratio.numer() as f64 / *ratio.denom() as f64
}

impl From<Interval> for MicrotonalInterval {
    fn from(interval: Interval) -> Self {
        Self {
            cents: Ratio::from_integer(interval.cents()),
        }
    }
}

impl Add for MicrotonalInterval {
    type Output = MicrotonalInterval;

    fn add(self, rhs: MicrotonalInterval) -> MicrotonalInterval {
        MicrotonalInterval {
            cents: self.cents + rhs.cents,
        }
    }
}

impl Sub for MicrotonalInterval {
    type Output = MicrotonalInterval;

    fn sub(self, rhs: MicrotonalInterval) -> MicrotonalInterval {
        MicrotonalInterval {
            cents: self.cents - rhs.cents,
        }
    }
}

impl Neg for MicrotonalInterval {
    type Output = MicrotonalInterval;

    fn neg(self) -> MicrotonalInterval {
        MicrotonalInterval { cents: -self.cents }
    }
}

impl Add<Interval> for MicrotonalInterval {
    type Output = MicrotonalInterval;

    fn add(self, rhs: Interval) -> MicrotonalInterval {
        self + MicrotonalInterval::from(rhs)
    }
}

impl fmt::Display for MicrotonalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let residual = self.residual_cents();
        let sign = if residual < Ratio::zero() { '-' } else { '+' };
        let magnitude = if residual < Ratio::zero() { -residual } else { residual };
        write!(f, "{}st {}{}c", self.semitones(), sign, magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cents(n: i64) -> Ratio<i64> {
        Ratio::from_integer(n)
    }

    #[test]
    fn test_sum_of_cents_rederives_semitones() {
        let a = MicrotonalInterval::new(0, cents(50));
        let b = MicrotonalInterval::new(0, cents(60));
        let sum = a + b;
        assert_eq!(sum.total_cents(), cents(110));
        assert_eq!(sum.semitones(), 1);
        assert_eq!(sum.residual_cents(), cents(10));
    }

    #[test]
    fn test_repeating_fractions_are_exact() {
        let third = MicrotonalInterval::from_cents(Ratio::new(100, 3));
        let whole = third + third + third;
        assert_eq!(whole.total_cents(), cents(100));
        assert!(whole.is_whole_semitones());
        assert_eq!(whole.round_to_interval(), Interval::MINOR_SECOND);
    }

    #[test]
    fn test_rounding_rule() {
        assert_eq!(MicrotonalInterval::from_cents(cents(149)).semitones(), 1);
        assert_eq!(MicrotonalInterval::from_cents(cents(150)).semitones(), 2);
        assert_eq!(MicrotonalInterval::from_cents(cents(-150)).semitones(), -2);
        assert_eq!(
            MicrotonalInterval::from_cents(cents(150)).residual_cents(),
            cents(-50)
        );
    }

    #[test]
    fn test_truncate_vs_round() {
        let interval = MicrotonalInterval::new(3, cents(70));
        assert_eq!(interval.round_to_interval().semitones(), 4);
        assert_eq!(interval.truncate_to_interval().semitones(), 3);

        let down = -interval;
        assert_eq!(down.round_to_interval().semitones(), -4);
        assert_eq!(down.truncate_to_interval().semitones(), -3);
    }

    #[test]
    fn test_from_interval_is_lossless() {
        let fifth = MicrotonalInterval::from(Interval::PERFECT_FIFTH);
        assert_eq!(fifth.total_cents(), cents(700));
        assert_eq!(fifth.round_to_interval(), Interval::PERFECT_FIFTH);

        let nudged = fifth + MicrotonalInterval::from_cents(cents(-2));
        assert_eq!(nudged.semitones(), 7);
        assert_eq!(nudged.residual_cents(), cents(-2));
        assert_eq!((nudged + Interval::MAJOR_SECOND).total_cents(), cents(898));
    }

    #[test]
    fn test_from_cents_f64() {
        let interval = MicrotonalInterval::from_cents_f64(33.25).unwrap();
        assert_eq!(interval.total_cents(), Ratio::new(133, 4));
        assert!(MicrotonalInterval::from_cents_f64(f64::INFINITY).is_err());
        assert!(MicrotonalInterval::from_cents_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_frequency_ratio() {
        assert_relative_eq!(
            MicrotonalInterval::from_cents(cents(1200)).frequency_ratio(),
            2.0
        );
        assert_relative_eq!(
            MicrotonalInterval::new(0, cents(50)).as_semitones_f64(),
            0.5
        );
    }

    #[test]
    fn test_subtraction() {
        let a = MicrotonalInterval::new(2, cents(25));
        let b = MicrotonalInterval::new(1, cents(50));
        assert_eq!((a - b).total_cents(), cents(75));
        assert_eq!((a - b).semitones(), 1);
    }

    #[test]
    fn test_display() {
        let sum = MicrotonalInterval::new(0, cents(110));
        assert_eq!(sum.to_string(), "1st +10c");
        let flat = MicrotonalInterval::new(4, cents(-14));
        assert_eq!(flat.to_string(), "4st -14c");
    }
}
