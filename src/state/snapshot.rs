// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshots of the known light set.

use std::collections::BTreeMap;
use std::collections::btree_map;

use super::diff::diff;
use super::{Light, LightChange};
use crate::types::LightId;

/// The complete light set known at one point in time, keyed by id.
///
/// Iteration is in ascending id order.
///
/// # Examples
///
/// ```
/// use light_monitor::state::{Light, Snapshot};
///
/// let snapshot: Snapshot = [
///     Light::new("2", "Hall", "hall", 10, false),
///     Light::new("1", "Lamp", "den", 200, true),
/// ]
/// .into_iter()
/// .collect();
///
/// let ids: Vec<_> = snapshot.ids().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["1", "2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    lights: BTreeMap<LightId, Light>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a light, replacing any record with the same id.
    ///
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, light: Light) -> Option<Light> {
        self.lights.insert(light.id.clone(), light)
    }

    /// Returns the light with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Light> {
        self.lights.get(id)
    }

    /// Returns `true` if a light with the given id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.lights.contains_key(id)
    }

    /// Returns the number of lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if no lights are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Iterates over lights in id order.
    pub fn iter(&self) -> btree_map::Values<'_, LightId, Light> {
        self.lights.values()
    }

    /// Iterates over ids in order.
    pub fn ids(&self) -> btree_map::Keys<'_, LightId, Light> {
        self.lights.keys()
    }
}

impl FromIterator<Light> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Light>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for light in iter {
            snapshot.insert(light);
        }
        snapshot
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Light;
    type IntoIter = btree_map::Values<'a, LightId, Light>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owner of the current snapshot.
///
/// The only way to change the stored snapshot is [`apply`](Self::apply),
/// which replaces it wholesale and returns what changed.
///
/// # Examples
///
/// ```
/// use light_monitor::state::{Light, Snapshot, SnapshotStore};
///
/// let mut store = SnapshotStore::new();
///
/// let first: Snapshot = [Light::new("1", "Light1", "kitchen", 255, true)]
///     .into_iter()
///     .collect();
/// let changes = store.apply(first);
/// assert_eq!(changes.len(), 1);
/// assert!(changes[0].is_added());
///
/// let changes = store.apply(Snapshot::new());
/// assert_eq!(changes[0].to_string(), "Light1 (1) has been removed");
/// assert!(store.current().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    current: Snapshot,
}

impl SnapshotStore {
    /// Creates a store holding an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Diffs `updated` against the current snapshot, then makes it current.
    pub fn apply(&mut self, updated: Snapshot) -> Vec<LightChange> {
        let changes = diff(&updated, &self.current);
        self.current = updated;
        changes
    }
}
