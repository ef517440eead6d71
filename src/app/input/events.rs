//! Raw device events and the vocabulary used to bind them

use std::fmt;
use std::str::FromStr;

use enum_map::Enum;
use serde::{Deserialize, Serialize};

use super::error::InputError;
use crate::app::geometry::Point;

/// Kind of physical device a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum DeviceKind {
    Key,
    Pointer,
}

/// Opaque identifier of a physical key or pointer button
///
/// Codes are only meaningful together with a [`DeviceKind`]: key 1 and
/// pointer button 1 are unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceCode(pub u32);

/// Press or release edge of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Pressed,
    Released,
}

/// Event channel: a device kind crossed with a transition
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Enum, Serialize, Deserialize,
)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum Channel {
    #[default]
    KeyPressed,
    KeyReleased,
    PointerPressed,
    PointerReleased,
}

/// Visibility of a binding
///
/// Local bindings live as long as the active scene, global bindings as long
/// as the process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Enum, Serialize, Deserialize,
)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Local,
    Global,
}

/// One discrete event from the host's per-frame event feed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// Key or pointer button transition
    Button {
        kind: DeviceKind,
        code: DeviceCode,
        transition: Transition,
    },
    /// Pointer moved to an absolute position in logical pixels
    PointerMoved { position: Point },
}

impl RawEvent {
    pub fn key_pressed(code: DeviceCode) -> Self {
        Self::Button {
            kind: DeviceKind::Key,
            code,
            transition: Transition::Pressed,
        }
    }

    pub fn key_released(code: DeviceCode) -> Self {
        Self::Button {
            kind: DeviceKind::Key,
            code,
            transition: Transition::Released,
        }
    }

    pub fn pointer_pressed(code: DeviceCode) -> Self {
        Self::Button {
            kind: DeviceKind::Pointer,
            code,
            transition: Transition::Pressed,
        }
    }

    pub fn pointer_released(code: DeviceCode) -> Self {
        Self::Button {
            kind: DeviceKind::Pointer,
            code,
            transition: Transition::Released,
        }
    }

    pub fn pointer_moved(x: f32, y: f32) -> Self {
        Self::PointerMoved {
            position: Point::new(x, y),
        }
    }
}

impl Transition {
    /// Builds a transition from a pressed flag
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Self::Pressed
        } else {
            Self::Released
        }
    }

    pub fn is_press(self) -> bool {
        matches!(self, Self::Pressed)
    }
}

impl Channel {
    /// All channels, in table order
    pub const ALL: [Channel; 4] = [
        Self::KeyPressed,
        Self::KeyReleased,
        Self::PointerPressed,
        Self::PointerReleased,
    ];

    /// Combines a device kind and a transition into a channel
    pub fn new(kind: DeviceKind, transition: Transition) -> Self {
        match (kind, transition) {
            (DeviceKind::Key, Transition::Pressed) => Self::KeyPressed,
            (DeviceKind::Key, Transition::Released) => Self::KeyReleased,
            (DeviceKind::Pointer, Transition::Pressed) => Self::PointerPressed,
            (DeviceKind::Pointer, Transition::Released) => Self::PointerReleased,
        }
    }

    pub fn kind(self) -> DeviceKind {
        match self {
            Self::KeyPressed | Self::KeyReleased => DeviceKind::Key,
            Self::PointerPressed | Self::PointerReleased => DeviceKind::Pointer,
        }
    }

    pub fn transition(self) -> Transition {
        match self {
            Self::KeyPressed | Self::PointerPressed => Transition::Pressed,
            Self::KeyReleased | Self::PointerReleased => Transition::Released,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeyPressed => "key_pressed",
            Self::KeyReleased => "key_released",
            Self::PointerPressed => "pointer_pressed",
            Self::PointerReleased => "pointer_released",
        }
    }
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Pointer => "pointer",
        }
    }
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Global => "global",
        }
    }
}

impl FromStr for DeviceKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key" | "keyboard" => Ok(Self::Key),
            "pointer" | "mouse" => Ok(Self::Pointer),
            _ => Err(InputError::InvalidDevice(s.to_string())),
        }
    }
}

impl FromStr for Channel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key_pressed" | "key_down" | "key" => Ok(Self::KeyPressed),
            "key_released" | "key_up" => Ok(Self::KeyReleased),
            "pointer_pressed" | "mouse_down" | "button" => Ok(Self::PointerPressed),
            "pointer_released" | "mouse_up" => Ok(Self::PointerReleased),
            _ => Err(InputError::InvalidChannel(s.to_string())),
        }
    }
}

impl FromStr for Scope {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "global" => Ok(Self::Global),
            _ => Err(InputError::InvalidScope(s.to_string())),
        }
    }
}

impl TryFrom<String> for DeviceKind {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Channel {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Scope {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeviceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key codes
///
/// Printable keys use their ASCII value (letters upper case), so configs can
/// say `code = 87` for W. Non-printable keys live above 255.
pub mod keys {
    use super::DeviceCode;

    pub const BACKSPACE: DeviceCode = DeviceCode(8);
    pub const TAB: DeviceCode = DeviceCode(9);
    pub const ENTER: DeviceCode = DeviceCode(13);
    pub const ESCAPE: DeviceCode = DeviceCode(27);
    pub const SPACE: DeviceCode = DeviceCode(32);

    pub const NUM0: DeviceCode = DeviceCode(48);
    pub const NUM1: DeviceCode = DeviceCode(49);
    pub const NUM2: DeviceCode = DeviceCode(50);
    pub const NUM3: DeviceCode = DeviceCode(51);
    pub const NUM4: DeviceCode = DeviceCode(52);
    pub const NUM5: DeviceCode = DeviceCode(53);
    pub const NUM6: DeviceCode = DeviceCode(54);
    pub const NUM7: DeviceCode = DeviceCode(55);
    pub const NUM8: DeviceCode = DeviceCode(56);
    pub const NUM9: DeviceCode = DeviceCode(57);

    pub const A: DeviceCode = DeviceCode(65);
    pub const B: DeviceCode = DeviceCode(66);
    pub const C: DeviceCode = DeviceCode(67);
    pub const D: DeviceCode = DeviceCode(68);
    pub const E: DeviceCode = DeviceCode(69);
    pub const F: DeviceCode = DeviceCode(70);
    pub const G: DeviceCode = DeviceCode(71);
    pub const H: DeviceCode = DeviceCode(72);
    pub const I: DeviceCode = DeviceCode(73);
    pub const J: DeviceCode = DeviceCode(74);
    pub const K: DeviceCode = DeviceCode(75);
    pub const L: DeviceCode = DeviceCode(76);
    pub const M: DeviceCode = DeviceCode(77);
    pub const N: DeviceCode = DeviceCode(78);
    pub const O: DeviceCode = DeviceCode(79);
    pub const P: DeviceCode = DeviceCode(80);
    pub const Q: DeviceCode = DeviceCode(81);
    pub const R: DeviceCode = DeviceCode(82);
    pub const S: DeviceCode = DeviceCode(83);
    pub const T: DeviceCode = DeviceCode(84);
    pub const U: DeviceCode = DeviceCode(85);
    pub const V: DeviceCode = DeviceCode(86);
    pub const W: DeviceCode = DeviceCode(87);
    pub const X: DeviceCode = DeviceCode(88);
    pub const Y: DeviceCode = DeviceCode(89);
    pub const Z: DeviceCode = DeviceCode(90);

    pub const BACKQUOTE: DeviceCode = DeviceCode(96);
    pub const DELETE: DeviceCode = DeviceCode(127);

    pub const UP: DeviceCode = DeviceCode(273);
    pub const DOWN: DeviceCode = DeviceCode(274);
    pub const RIGHT: DeviceCode = DeviceCode(275);
    pub const LEFT: DeviceCode = DeviceCode(276);

    pub const F1: DeviceCode = DeviceCode(282);
    pub const F2: DeviceCode = DeviceCode(283);
    pub const F3: DeviceCode = DeviceCode(284);
    pub const F4: DeviceCode = DeviceCode(285);
    pub const F5: DeviceCode = DeviceCode(286);
    pub const F6: DeviceCode = DeviceCode(287);
    pub const F7: DeviceCode = DeviceCode(288);
    pub const F8: DeviceCode = DeviceCode(289);
    pub const F9: DeviceCode = DeviceCode(290);
    pub const F10: DeviceCode = DeviceCode(291);
    pub const F11: DeviceCode = DeviceCode(292);
    pub const F12: DeviceCode = DeviceCode(293);

    pub const RIGHT_SHIFT: DeviceCode = DeviceCode(303);
    pub const LEFT_SHIFT: DeviceCode = DeviceCode(304);
    pub const RIGHT_CTRL: DeviceCode = DeviceCode(305);
    pub const LEFT_CTRL: DeviceCode = DeviceCode(306);
    pub const RIGHT_ALT: DeviceCode = DeviceCode(307);
    pub const LEFT_ALT: DeviceCode = DeviceCode(308);
}

/// Pointer button codes
pub mod buttons {
    use super::DeviceCode;

    /// Primary button; presses on it are routed to the pointer router as clicks
    pub const LEFT: DeviceCode = DeviceCode(1);
    pub const MIDDLE: DeviceCode = DeviceCode(2);
    pub const RIGHT: DeviceCode = DeviceCode(3);
    pub const BACK: DeviceCode = DeviceCode(4);
    pub const FORWARD: DeviceCode = DeviceCode(5);
    /// First code used for unnamed extra buttons
    pub const EXTRA_BASE: u32 = 6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_round_trips_kind_and_transition() {
        for channel in Channel::ALL {
            assert_eq!(Channel::new(channel.kind(), channel.transition()), channel);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("key_down".parse::<Channel>().unwrap(), Channel::KeyPressed);
        assert_eq!("mouse_up".parse::<Channel>().unwrap(), Channel::PointerReleased);
        assert_eq!("Mouse".parse::<DeviceKind>().unwrap(), DeviceKind::Pointer);
        assert_eq!(" global ".parse::<Scope>().unwrap(), Scope::Global);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!(
            "everywhere".parse::<Scope>(),
            Err(InputError::InvalidScope("everywhere".into()))
        );
        assert_eq!(
            "key_held".parse::<Channel>(),
            Err(InputError::InvalidChannel("key_held".into()))
        );
        assert_eq!(
            "joystick".parse::<DeviceKind>(),
            Err(InputError::InvalidDevice("joystick".into()))
        );
    }

    #[test]
    fn test_key_codes_are_ascii_for_printables() {
        assert_eq!(keys::SPACE, DeviceCode(b' ' as u32));
        assert_eq!(keys::W, DeviceCode(b'W' as u32));
        assert_eq!(keys::NUM7, DeviceCode(b'7' as u32));
    }
}
