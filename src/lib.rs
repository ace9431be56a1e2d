// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmony: pitch/interval algebra with scale and chord containment.
//!
//! All music types are immutable values and are safe to share across threads.

pub mod config;
pub mod error;
pub mod music;

pub use error::{HarmonyError, Result};
