// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light identifier type.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a light by the bridge.
///
/// Identifiers are opaque strings, stable for the lifetime of a light.
/// Ordering is lexicographic and is what snapshots iterate by.
///
/// # Examples
///
/// ```
/// use light_monitor::types::LightId;
///
/// let id = LightId::new("1");
/// assert_eq!(id.as_str(), "1");
/// assert_eq!(id.to_string(), "1");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(String);

impl LightId {
    /// Creates an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LightId({:?})", self.0)
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LightId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LightId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for LightId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic() {
        let mut ids = vec![LightId::new("b"), LightId::new("10"), LightId::new("2")];
        ids.sort();
        assert_eq!(ids, vec![LightId::new("10"), LightId::new("2"), LightId::new("b")]);
    }

    #[test]
    fn serde_transparent() {
        let id: LightId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, LightId::from("abc"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", LightId::new("7")), "LightId(\"7\")");
    }
}
