//! Named actions polled against device state

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::events::{DeviceCode, DeviceKind};
use super::state::DeviceState;

/// Device codes that satisfy an action, at most one per device kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<DeviceCode>,
    #[serde(default, alias = "mouse", skip_serializing_if = "Option::is_none")]
    pub pointer: Option<DeviceCode>,
}

impl ActionMapping {
    /// Mapping with a single device entry
    pub fn single(kind: DeviceKind, code: DeviceCode) -> Self {
        let mut mapping = Self::default();
        mapping.set(kind, Some(code));
        mapping
    }

    pub fn key(code: DeviceCode) -> Self {
        Self::single(DeviceKind::Key, code)
    }

    pub fn pointer(code: DeviceCode) -> Self {
        Self::single(DeviceKind::Pointer, code)
    }

    /// Adds or replaces the entry for one device kind
    pub fn with(mut self, kind: DeviceKind, code: DeviceCode) -> Self {
        self.set(kind, Some(code));
        self
    }

    pub fn get(&self, kind: DeviceKind) -> Option<DeviceCode> {
        match kind {
            DeviceKind::Key => self.key,
            DeviceKind::Pointer => self.pointer,
        }
    }

    pub fn set(&mut self, kind: DeviceKind, code: Option<DeviceCode>) {
        match kind {
            DeviceKind::Key => self.key = code,
            DeviceKind::Pointer => self.pointer = code,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.pointer.is_none()
    }

    pub fn entries(&self) -> impl Iterator<Item = (DeviceKind, DeviceCode)> {
        [
            self.key.map(|code| (DeviceKind::Key, code)),
            self.pointer.map(|code| (DeviceKind::Pointer, code)),
        ]
        .into_iter()
        .flatten()
    }

    /// True if any mapped device currently reads pressed
    pub fn is_active(&self, state: &DeviceState) -> bool {
        self.entries().any(|(kind, code)| state.is_pressed(kind, code))
    }
}

/// Action name → mapping, in first-mapped order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMap {
    actions: IndexMap<String, ActionMapping>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole mapping of an action
    pub fn insert(&mut self, action: impl Into<String>, mapping: ActionMapping) -> Option<ActionMapping> {
        self.actions.insert(action.into(), mapping)
    }

    pub fn remove(&mut self, action: &str) -> Option<ActionMapping> {
        self.actions.shift_remove(action)
    }

    pub fn get(&self, action: &str) -> Option<&ActionMapping> {
        self.actions.get(action)
    }

    /// Unmapped actions are simply inactive
    pub fn is_active(&self, action: &str, state: &DeviceState) -> bool {
        self.get(action).is_some_and(|mapping| mapping.is_active(state))
    }

    pub fn is_just_pressed(&self, action: &str, state: &DeviceState) -> bool {
        self.get(action).is_some_and(|mapping| {
            mapping
                .entries()
                .any(|(kind, code)| state.is_just_pressed(kind, code))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionMapping)> {
        self.actions.iter().map(|(name, mapping)| (name.as_str(), mapping))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::events::Transition;

    #[test]
    fn test_any_device_satisfies_action() {
        let mut map = ActionMap::new();
        map.insert(
            "fire",
            ActionMapping::key(DeviceCode(32)).with(DeviceKind::Pointer, DeviceCode(1)),
        );
        let mut state = DeviceState::new();

        assert!(!map.is_active("fire", &state));
        state.apply(DeviceKind::Pointer, DeviceCode(1), Transition::Pressed);
        assert!(map.is_active("fire", &state));
    }

    #[test]
    fn test_insert_replaces_whole_mapping() {
        let mut map = ActionMap::new();
        map.insert(
            "fire",
            ActionMapping::key(DeviceCode(32)).with(DeviceKind::Pointer, DeviceCode(1)),
        );
        map.insert("fire", ActionMapping::key(DeviceCode(70)));

        assert_eq!(map.get("fire"), Some(&ActionMapping::key(DeviceCode(70))));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_unknown_action_is_inactive() {
        let map = ActionMap::new();
        assert!(!map.is_active("undefined_action", &DeviceState::new()));
        assert!(!map.is_just_pressed("undefined_action", &DeviceState::new()));
    }
}
