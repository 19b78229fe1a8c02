// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light attributes.
//!
//! # Types
//!
//! - [`LightId`] - Bridge-assigned light identifier
//! - [`Brightness`] - Raw device brightness (0-255)
//! - [`DisplayBrightness`] - Reported brightness (0-100)

mod brightness;
mod light_id;

pub use brightness::{Brightness, DisplayBrightness};
pub use light_id::LightId;
