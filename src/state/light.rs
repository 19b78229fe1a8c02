// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light records as served by the bridge.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, LightId};

/// Observable attributes of one light.
///
/// Matches the body of `GET /lights/{id}`:
///
/// ```json
/// { "name": "Light1", "id": "1", "room": "kitchen", "brightness": 255, "on": true }
/// ```
///
/// # Examples
///
/// ```
/// use light_monitor::state::Light;
///
/// let light = Light::new("1", "Light1", "kitchen", 255, true);
/// assert_eq!(light.brightness.display().value(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    /// Bridge-assigned identifier.
    pub id: LightId,
    /// Human label.
    pub name: String,
    /// Grouping label.
    pub room: String,
    /// Raw brightness (0-255).
    pub brightness: Brightness,
    /// Power state.
    pub on: bool,
}

impl Light {
    /// Creates a light record.
    #[must_use]
    pub fn new(
        id: impl Into<LightId>,
        name: impl Into<String>,
        room: impl Into<String>,
        brightness: u8,
        on: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            room: room.into(),
            brightness: Brightness::new(brightness),
            on,
        }
    }
}

/// Entry of the `GET /lights` index.
///
/// Only the identifier is used; any other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSummary {
    /// Identifier to fetch details for.
    pub id: LightId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_detail_body() {
        let light: Light = serde_json::from_value(serde_json::json!({
            "name": "Desk",
            "id": "42",
            "room": "office",
            "brightness": 128,
            "on": false
        }))
        .unwrap();

        assert_eq!(light, Light::new("42", "Desk", "office", 128, false));
    }

    #[test]
    fn deserialize_rejects_missing_field() {
        let result = serde_json::from_value::<Light>(serde_json::json!({
            "name": "Desk",
            "id": "42",
            "brightness": 128,
            "on": false
        }));
        assert!(result.is_err());
    }

    #[test]
    fn summary_ignores_extra_fields() {
        let index: Vec<LightSummary> = serde_json::from_value(serde_json::json!([
            { "id": "1", "name": "Light1", "room": "kitchen" },
            { "id": "2" }
        ]))
        .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index[0].id, LightId::new("1"));
        assert_eq!(index[1].id, LightId::new("2"));
    }
}
