// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change events.
//!
//! A [`LightChange`] describes one semantically distinct difference between
//! two snapshots. Events are produced by [`diff()`](super::diff()) and handed to
//! an output sink; they are never stored.
//!
//! # Change Types
//!
//! - [`LightChange::Added`] - A light appeared; carries the full record
//! - [`LightChange::Removed`] - A light disappeared; carries its last name
//! - [`LightChange::FieldChanged`] - One attribute of a known light changed
//!
//! Reported brightness is always on the 0-100 display scale.
//!
//! # Serialization
//!
//! Events serialize to the objects a machine consumer expects:
//!
//! ```
//! use light_monitor::state::{FieldChange, LightChange};
//!
//! let change = LightChange::field_changed("1", FieldChange::On(false));
//! assert_eq!(
//!     serde_json::to_value(&change).unwrap(),
//!     serde_json::json!({ "id": "1", "on": false })
//! );
//! ```

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Light;
use crate::types::{DisplayBrightness, LightId};

/// A change detected between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightChange {
    /// A light is present that was not known before.
    Added(AddedLight),

    /// A previously known light is gone.
    Removed {
        /// Identifier of the removed light.
        id: LightId,
        /// Last known name of the removed light.
        name: String,
    },

    /// An attribute of a known light changed.
    FieldChanged {
        /// Identifier of the changed light.
        id: LightId,
        /// The attribute and its new value.
        change: FieldChange,
    },
}

impl LightChange {
    /// Creates an added event from a raw light record.
    #[must_use]
    pub fn added(light: &Light) -> Self {
        Self::Added(AddedLight::from(light))
    }

    /// Creates a removed event.
    #[must_use]
    pub fn removed(id: impl Into<LightId>, name: impl Into<String>) -> Self {
        Self::Removed {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Creates a field change event.
    #[must_use]
    pub fn field_changed(id: impl Into<LightId>, change: FieldChange) -> Self {
        Self::FieldChanged {
            id: id.into(),
            change,
        }
    }

    /// Returns the id of the light this event is about.
    #[must_use]
    pub fn id(&self) -> &LightId {
        match self {
            Self::Added(light) => &light.id,
            Self::Removed { id, .. } | Self::FieldChanged { id, .. } => id,
        }
    }

    /// Returns `true` if this is an added event.
    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }

    /// Returns `true` if this is a removed event.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }

    /// Returns `true` if this is a field change event.
    #[must_use]
    pub fn is_field_change(&self) -> bool {
        matches!(self, Self::FieldChanged { .. })
    }
}

impl fmt::Display for LightChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(light) => write!(f, "{} ({}) has been added", light.name, light.id),
            Self::Removed { id, name } => write!(f, "{name} ({id}) has been removed"),
            Self::FieldChanged { id, change } => {
                write!(f, "{id}: {} changed to {change}", change.field())
            }
        }
    }
}

impl Serialize for LightChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Added(light) => light.serialize(serializer),
            Self::Removed { id, name } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("id", id)?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("removed", &true)?;
                map.end()
            }
            Self::FieldChanged { id, change } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("id", id)?;
                let key = change.field().as_str();
                match change {
                    FieldChange::Name(value) | FieldChange::Room(value) => {
                        map.serialize_entry(key, value)?;
                    }
                    FieldChange::Brightness(value) => map.serialize_entry(key, value)?,
                    FieldChange::On(value) => map.serialize_entry(key, value)?,
                }
                map.end()
            }
        }
    }
}

/// A newly observed light, with brightness on the display scale.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AddedLight {
    /// Bridge-assigned identifier.
    pub id: LightId,
    /// Human label.
    pub name: String,
    /// Grouping label.
    pub room: String,
    /// Brightness (0-100).
    pub brightness: DisplayBrightness,
    /// Power state.
    pub on: bool,
}

impl From<&Light> for AddedLight {
    fn from(light: &Light) -> Self {
        Self {
            id: light.id.clone(),
            name: light.name.clone(),
            room: light.room.clone(),
            brightness: light.brightness.display(),
            on: light.on,
        }
    }
}

/// The new value of a changed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// New name.
    Name(String),
    /// New brightness (0-100).
    Brightness(DisplayBrightness),
    /// New power state.
    On(bool),
    /// New room.
    Room(String),
}

impl FieldChange {
    /// Returns which attribute changed.
    #[must_use]
    pub fn field(&self) -> LightField {
        match self {
            Self::Name(_) => LightField::Name,
            Self::Brightness(_) => LightField::Brightness,
            Self::On(_) => LightField::On,
            Self::Room(_) => LightField::Room,
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(value) | Self::Room(value) => f.write_str(value),
            Self::Brightness(value) => write!(f, "{value}"),
            Self::On(value) => write!(f, "{value}"),
        }
    }
}

/// Mutable light attributes, in comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LightField {
    /// The `name` attribute.
    Name,
    /// The `brightness` attribute.
    Brightness,
    /// The `on` attribute.
    On,
    /// The `room` attribute.
    Room,
}

impl LightField {
    /// Returns the wire name of the attribute.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Brightness => "brightness",
            Self::On => "on",
            Self::Room => "room",
        }
    }
}

impl fmt::Display for LightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
