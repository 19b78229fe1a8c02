// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness types.
//!
//! The bridge reports brightness on the raw device scale (0-255). Events
//! report it on a 0-100 display scale. Change detection always compares raw
//! values; only reported values are converted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw brightness as reported by the bridge (0-255).
///
/// # Examples
///
/// ```
/// use light_monitor::types::Brightness;
///
/// let full = Brightness::new(255);
/// assert_eq!(full.display().value(), 100);
///
/// let half = Brightness::new(128);
/// assert_eq!(half.display().value(), 50);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    /// Lowest raw brightness.
    pub const MIN: Self = Self(0);

    /// Highest raw brightness.
    pub const MAX: Self = Self(u8::MAX);

    /// Creates a raw brightness value.
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw device value.
    #[must_use]
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Converts to the 0-100 display scale.
    ///
    /// The result is `floor(raw / 2.55)`, evaluated exactly in integer
    /// arithmetic so that no raw value lands one step low due to rounding.
    #[must_use]
    pub const fn display(&self) -> DisplayBrightness {
        // raw * 100 / 255 <= 100, fits in u8
        #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
        let percent = (self.0 as u16 * 100 / 255) as u8;
        DisplayBrightness(percent)
    }
}

impl From<u8> for Brightness {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Brightness on the 0-100 reporting scale.
///
/// Only produced by [`Brightness::display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayBrightness(u8);

impl DisplayBrightness {
    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DisplayBrightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
