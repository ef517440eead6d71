//! Device state store

use std::collections::BTreeMap;

use enum_map::EnumMap;

use super::events::{DeviceCode, DeviceKind, Transition};

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }
}

/// Last-known state of every device code seen so far, per device kind
///
/// Written only by dispatch; everything else reads.
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    buttons: EnumMap<DeviceKind, BTreeMap<DeviceCode, ButtonState>>,
}

impl DeviceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a transition for a device code
    pub fn apply(&mut self, kind: DeviceKind, code: DeviceCode, transition: Transition) {
        let state = match transition {
            Transition::Pressed => ButtonState::JustPressed,
            Transition::Released => ButtonState::JustReleased,
        };
        self.buttons[kind].insert(code, state);
    }

    pub fn get(&self, kind: DeviceKind, code: DeviceCode) -> ButtonState {
        self.buttons[kind].get(&code).copied().unwrap_or_default()
    }

    pub fn is_pressed(&self, kind: DeviceKind, code: DeviceCode) -> bool {
        self.get(kind, code).is_down()
    }

    pub fn is_just_pressed(&self, kind: DeviceKind, code: DeviceCode) -> bool {
        self.get(kind, code).is_just_pressed()
    }

    /// Codes of `kind` currently held, in ascending order
    pub fn held(&self, kind: DeviceKind) -> impl Iterator<Item = DeviceCode> + '_ {
        self.buttons[kind]
            .iter()
            .filter(|(_, state)| state.is_down())
            .map(|(code, _)| *code)
    }

    /// Advance all button states for next frame
    pub fn advance_frame(&mut self) {
        for (_, codes) in self.buttons.iter_mut() {
            codes.retain(|_, state| {
                *state = state.advance();
                *state != ButtonState::Released
            });
        }
    }

    pub fn clear(&mut self) {
        for (_, codes) in self.buttons.iter_mut() {
            codes.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut state = DeviceState::new();
        let code = DeviceCode(65);

        assert!(!state.is_pressed(DeviceKind::Key, code));
        state.apply(DeviceKind::Key, code, Transition::Pressed);
        assert!(state.is_pressed(DeviceKind::Key, code));
        assert!(state.is_just_pressed(DeviceKind::Key, code));

        state.apply(DeviceKind::Key, code, Transition::Released);
        assert!(!state.is_pressed(DeviceKind::Key, code));
        assert!(state.get(DeviceKind::Key, code).is_just_released());
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut state = DeviceState::new();
        state.apply(DeviceKind::Pointer, DeviceCode(1), Transition::Pressed);

        assert!(state.is_pressed(DeviceKind::Pointer, DeviceCode(1)));
        assert!(!state.is_pressed(DeviceKind::Key, DeviceCode(1)));
    }

    #[test]
    fn test_advance_frame_settles_edges() {
        let mut state = DeviceState::new();
        state.apply(DeviceKind::Key, DeviceCode(32), Transition::Pressed);
        state.apply(DeviceKind::Key, DeviceCode(33), Transition::Pressed);
        state.apply(DeviceKind::Key, DeviceCode(33), Transition::Released);

        state.advance_frame();

        assert_eq!(state.get(DeviceKind::Key, DeviceCode(32)), ButtonState::Pressed);
        assert_eq!(state.get(DeviceKind::Key, DeviceCode(33)), ButtonState::Released);
        assert_eq!(state.held(DeviceKind::Key).collect::<Vec<_>>(), vec![DeviceCode(32)]);
    }
}
