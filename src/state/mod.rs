// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state and change detection.
//!
//! A [`Snapshot`] holds every [`Light`] known at one point in time.
//! [`diff()`] compares two snapshots and produces an ordered list of
//! [`LightChange`] events. [`SnapshotStore`] owns the current snapshot and
//! replaces it after each successful poll.
//!
//! # Examples
//!
//! ```
//! use light_monitor::state::{Light, LightChange, Snapshot, SnapshotStore};
//!
//! let mut store = SnapshotStore::new();
//!
//! let lights: Snapshot = [Light::new("1", "Light1", "kitchen", 255, true)]
//!     .into_iter()
//!     .collect();
//!
//! for change in store.apply(lights) {
//!     assert!(matches!(change, LightChange::Added(_)));
//! }
//! ```

mod diff;
mod light;
mod light_change;
mod snapshot;

pub use diff::diff;
pub use light::{Light, LightSummary};
pub use light_change::{AddedLight, FieldChange, LightChange, LightField};
pub use snapshot::{Snapshot, SnapshotStore};
