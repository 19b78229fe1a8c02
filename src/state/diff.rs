// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot comparison.

use super::{FieldChange, Light, LightChange, Snapshot};

/// Computes the changes that turn `current` into `updated`.
///
/// Lights in `updated` are visited in id order. A light unknown to `current`
/// yields one [`LightChange::Added`]; a known light yields one
/// [`LightChange::FieldChanged`] per differing attribute, in the order
/// name, brightness, on, room. Lights missing from `updated` yield
/// [`LightChange::Removed`] events after everything else, also in id order.
///
/// Brightness is compared on the raw scale and reported on the display scale.
///
/// # Examples
///
/// ```
/// use light_monitor::state::{diff, Light, Snapshot};
///
/// let before: Snapshot = [Light::new("1", "Light1", "kitchen", 255, true)]
///     .into_iter()
///     .collect();
/// let after: Snapshot = [Light::new("1", "Light1", "kitchen", 255, false)]
///     .into_iter()
///     .collect();
///
/// let changes = diff(&after, &before);
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].to_string(), "1: on changed to false");
/// ```
#[must_use]
pub fn diff(updated: &Snapshot, current: &Snapshot) -> Vec<LightChange> {
    let mut changes = Vec::new();

    for light in updated {
        match current.get(light.id.as_str()) {
            Some(known) => compare_light(light, known, &mut changes),
            None => changes.push(LightChange::added(light)),
        }
    }

    changes.extend(
        current
            .iter()
            .filter(|known| !updated.contains(known.id.as_str()))
            .map(|known| LightChange::removed(known.id.clone(), known.name.clone())),
    );

    changes
}

fn compare_light(updated: &Light, current: &Light, changes: &mut Vec<LightChange>) {
    let mut push = |change| changes.push(LightChange::field_changed(updated.id.clone(), change));

    if updated.name != current.name {
        push(FieldChange::Name(updated.name.clone()));
    }
    if updated.brightness != current.brightness {
        push(FieldChange::Brightness(updated.brightness.display()));
    }
    if updated.on != current.on {
        push(FieldChange::On(updated.on));
    }
    if updated.room != current.room {
        push(FieldChange::Room(updated.room.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LightField;
    use crate::types::Brightness;

    fn light1() -> Light {
        Light::new("1", "Light1", "kitchen", 255, true)
    }

    fn snapshot(lights: impl IntoIterator<Item = Light>) -> Snapshot {
        lights.into_iter().collect()
    }

    fn fields(changes: &[LightChange]) -> Vec<LightField> {
        changes
            .iter()
            .filter_map(|change| match change {
                LightChange::FieldChanged { change, .. } => Some(change.field()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_lights() {
        assert!(diff(&Snapshot::new(), &Snapshot::new()).is_empty());
    }

    #[test]
    fn identical_snapshots_yield_nothing() {
        let lights = snapshot([
            light1(),
            Light::new("2", "Light2", "hall", 0, false),
            Light::new("3", "Light3", "den", 17, true),
        ]);
        assert!(diff(&lights, &lights).is_empty());
    }

    #[test]
    fn add_a_light() {
        let changes = diff(&snapshot([light1()]), &Snapshot::new());

        assert_eq!(changes, vec![LightChange::added(&light1())]);
        let LightChange::Added(added) = &changes[0] else {
            panic!("Expected Added event");
        };
        assert_eq!(added.brightness.value(), 100);
        assert_eq!(added.name, "Light1");
        assert_eq!(added.room, "kitchen");
        assert!(added.on);
    }

    #[test]
    fn add_to_existing_set() {
        let base = [
            Light::new("a", "A", "r", 10, true),
            Light::new("c", "C", "r", 30, false),
        ];
        let new = Light::new("b", "B", "r", 200, true);
        let current = snapshot(base.clone());
        let updated = snapshot(base.into_iter().chain([new.clone()]));

        let changes = diff(&updated, &current);

        assert_eq!(changes, vec![LightChange::added(&new)]);
        let LightChange::Added(added) = &changes[0] else {
            panic!("Expected Added event");
        };
        assert_eq!(added.brightness.value(), 78);
    }

    #[test]
    fn delete_a_light() {
        let changes = diff(&Snapshot::new(), &snapshot([light1()]));

        assert_eq!(changes, vec![LightChange::removed("1", "Light1")]);
        assert_eq!(changes[0].to_string(), "Light1 (1) has been removed");
    }

    #[test]
    fn removal_reports_last_known_name() {
        let current = snapshot([
            Light::new("1", "Keep", "r", 1, true),
            Light::new("2", "Gone", "r", 1, true),
        ]);
        let updated = snapshot([Light::new("1", "Keep", "r", 1, true)]);

        assert_eq!(diff(&updated, &current), vec![LightChange::removed("2", "Gone")]);
    }

    #[test]
    fn change_a_light_on_off() {
        let mut off = light1();
        off.on = false;

        let changes = diff(&snapshot([off]), &snapshot([light1()]));

        assert_eq!(
            changes,
            vec![LightChange::field_changed("1", FieldChange::On(false))]
        );
    }

    #[test]
    fn brightness_change_reports_display_value() {
        let mut dimmed = light1();
        dimmed.brightness = Brightness::new(64);

        let changes = diff(&snapshot([dimmed]), &snapshot([light1()]));

        assert_eq!(
            changes,
            vec![LightChange::field_changed(
                "1",
                FieldChange::Brightness(Brightness::new(64).display())
            )]
        );
        assert_eq!(changes[0].to_string(), "1: brightness changed to 25%");
    }

    #[test]
    fn raw_difference_detected_even_if_display_equal() {
        // raw 1 and 2 both display as 0
        let mut a = light1();
        a.brightness = Brightness::new(1);
        let mut b = light1();
        b.brightness = Brightness::new(2);

        let changes = diff(&snapshot([b]), &snapshot([a]));

        assert_eq!(
            changes,
            vec![LightChange::field_changed(
                "1",
                FieldChange::Brightness(Brightness::new(2).display())
            )]
        );
    }

    #[test]
    fn multiple_fields_in_fixed_order() {
        let updated = Light::new("1", "Renamed", "pantry", 0, false);

        let changes = diff(&snapshot([updated]), &snapshot([light1()]));

        assert_eq!(
            fields(&changes),
            vec![
                LightField::Name,
                LightField::Brightness,
                LightField::On,
                LightField::Room
            ]
        );
        assert_eq!(
            changes,
            vec![
                LightChange::field_changed("1", FieldChange::Name("Renamed".to_string())),
                LightChange::field_changed(
                    "1",
                    FieldChange::Brightness(Brightness::new(0).display())
                ),
                LightChange::field_changed("1", FieldChange::On(false)),
                LightChange::field_changed("1", FieldChange::Room("pantry".to_string())),
            ]
        );
    }

    #[test]
    fn name_and_room_only() {
        let updated = Light::new("1", "Lamp", "den", 255, true);

        let changes = diff(&snapshot([updated]), &snapshot([light1()]));

        assert_eq!(fields(&changes), vec![LightField::Name, LightField::Room]);
    }

    #[test]
    fn removals_come_last_in_id_order() {
        let current = snapshot([
            Light::new("3", "Three", "r", 1, true),
            Light::new("1", "One", "r", 1, true),
            Light::new("2", "Two", "r", 1, true),
            Light::new("5", "Five", "r", 1, true),
        ]);
        let updated = snapshot([
            Light::new("2", "Two", "r", 1, false),
            Light::new("4", "Four", "r", 1, true),
        ]);

        let changes = diff(&updated, &current);

        assert_eq!(
            changes,
            vec![
                LightChange::field_changed("2", FieldChange::On(false)),
                LightChange::added(&Light::new("4", "Four", "r", 1, true)),
                LightChange::removed("1", "One"),
                LightChange::removed("3", "Three"),
                LightChange::removed("5", "Five"),
            ]
        );
    }

    #[test]
    fn full_replacement() {
        let current = snapshot([light1()]);
        let replacement = Light::new("2", "Light2", "garage", 0, false);

        let changes = diff(&snapshot([replacement.clone()]), &current);

        assert_eq!(
            changes,
            vec![
                LightChange::added(&replacement),
                LightChange::removed("1", "Light1"),
            ]
        );
    }
}
