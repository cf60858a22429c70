// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rotation angle tag attached to every saved frame.
//!
//! The angle is only a label: it starts at 0 and advances by a fixed step
//! after each save, wrapping at a full turn.

use crate::error::SnipError;
use std::fmt;

/// Degrees added after each save.
pub const ANGLE_STEP: u32 = 45;

/// One full turn.
const FULL_TURN: i64 = 360;

/// An angle in degrees, always in `0..360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Angle(u32);

impl Angle {
    /// Create an angle, wrapping into `0..360`.
    pub fn new(degrees: i64) -> Self {
        Self(degrees.rem_euclid(FULL_TURN) as u32)
    }

    pub fn degrees(self) -> u32 {
        self.0
    }

    /// The angle used for the next save.
    pub fn next(self) -> Self {
        Self::new(self.0 as i64 + ANGLE_STEP as i64)
    }

    /// Parse the text of the angle field.
    ///
    /// Any whole number is accepted and wrapped; anything else is rejected so
    /// the caller can keep the previous angle.
    pub fn parse(text: &str) -> Result<Self, SnipError> {
        text.trim()
            .parse::<i64>()
            .map(Self::new)
            .map_err(|_| SnipError::InvalidAngle(text.to_string()))
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
