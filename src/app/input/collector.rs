//! Raw input collection from winit events

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::events::{DeviceCode, DeviceKind, RawEvent, Transition, buttons, keys};
use crate::app::geometry::Point;

/// Translates winit window events into [`RawEvent`]s
///
/// Tracks the last pointer position so the host can sample it, and the
/// DPI scale factor used to convert physical to logical pixels.
pub struct InputCollector {
    pointer: Option<Point>,
    scale_factor: f32,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            pointer: None,
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Last pointer position in logical pixels
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Handle a winit window event
    ///
    /// Returns `None` for events the core doesn't consume (resize, close,
    /// key repeats, unidentified keys and so on).
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<RawEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position = Point::new(
                    position.x as f32 / self.scale_factor,
                    position.y as f32 / self.scale_factor,
                );
                self.pointer = Some(position);
                Some(RawEvent::PointerMoved { position })
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
                None
            }

            WindowEvent::MouseInput { state, button, .. } => Some(RawEvent::Button {
                kind: DeviceKind::Pointer,
                code: pointer_code(*button),
                transition: transition(*state),
            }),

            WindowEvent::KeyboardInput { event, .. } if !event.repeat => {
                let code = key_code(event.physical_key)?;
                Some(RawEvent::Button {
                    kind: DeviceKind::Key,
                    code,
                    transition: transition(event.state),
                })
            }

            _ => None,
        }
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn transition(state: ElementState) -> Transition {
    Transition::from_pressed(state.is_pressed())
}

/// Pointer button code for a winit mouse button
pub fn pointer_code(button: MouseButton) -> DeviceCode {
    match button {
        MouseButton::Left => buttons::LEFT,
        MouseButton::Middle => buttons::MIDDLE,
        MouseButton::Right => buttons::RIGHT,
        MouseButton::Back => buttons::BACK,
        MouseButton::Forward => buttons::FORWARD,
        MouseButton::Other(n) => DeviceCode(buttons::EXTRA_BASE + u32::from(n)),
    }
}

/// Key code for a winit physical key, if it has one
pub fn key_code(key: PhysicalKey) -> Option<DeviceCode> {
    let PhysicalKey::Code(key) = key else {
        return None;
    };

    let code = match key {
        KeyCode::Backspace => keys::BACKSPACE,
        KeyCode::Tab => keys::TAB,
        KeyCode::Enter | KeyCode::NumpadEnter => keys::ENTER,
        KeyCode::Escape => keys::ESCAPE,
        KeyCode::Space => keys::SPACE,
        KeyCode::Backquote => keys::BACKQUOTE,
        KeyCode::Delete => keys::DELETE,

        KeyCode::KeyA => keys::A,
        KeyCode::KeyB => keys::B,
        KeyCode::KeyC => keys::C,
        KeyCode::KeyD => keys::D,
        KeyCode::KeyE => keys::E,
        KeyCode::KeyF => keys::F,
        KeyCode::KeyG => keys::G,
        KeyCode::KeyH => keys::H,
        KeyCode::KeyI => keys::I,
        KeyCode::KeyJ => keys::J,
        KeyCode::KeyK => keys::K,
        KeyCode::KeyL => keys::L,
        KeyCode::KeyM => keys::M,
        KeyCode::KeyN => keys::N,
        KeyCode::KeyO => keys::O,
        KeyCode::KeyP => keys::P,
        KeyCode::KeyQ => keys::Q,
        KeyCode::KeyR => keys::R,
        KeyCode::KeyS => keys::S,
        KeyCode::KeyT => keys::T,
        KeyCode::KeyU => keys::U,
        KeyCode::KeyV => keys::V,
        KeyCode::KeyW => keys::W,
        KeyCode::KeyX => keys::X,
        KeyCode::KeyY => keys::Y,
        KeyCode::KeyZ => keys::Z,

        KeyCode::Digit0 => keys::NUM0,
        KeyCode::Digit1 => keys::NUM1,
        KeyCode::Digit2 => keys::NUM2,
        KeyCode::Digit3 => keys::NUM3,
        KeyCode::Digit4 => keys::NUM4,
        KeyCode::Digit5 => keys::NUM5,
        KeyCode::Digit6 => keys::NUM6,
        KeyCode::Digit7 => keys::NUM7,
        KeyCode::Digit8 => keys::NUM8,
        KeyCode::Digit9 => keys::NUM9,

        KeyCode::ArrowUp => keys::UP,
        KeyCode::ArrowDown => keys::DOWN,
        KeyCode::ArrowRight => keys::RIGHT,
        KeyCode::ArrowLeft => keys::LEFT,

        KeyCode::F1 => keys::F1,
        KeyCode::F2 => keys::F2,
        KeyCode::F3 => keys::F3,
        KeyCode::F4 => keys::F4,
        KeyCode::F5 => keys::F5,
        KeyCode::F6 => keys::F6,
        KeyCode::F7 => keys::F7,
        KeyCode::F8 => keys::F8,
        KeyCode::F9 => keys::F9,
        KeyCode::F10 => keys::F10,
        KeyCode::F11 => keys::F11,
        KeyCode::F12 => keys::F12,

        KeyCode::ShiftRight => keys::RIGHT_SHIFT,
        KeyCode::ShiftLeft => keys::LEFT_SHIFT,
        KeyCode::ControlRight => keys::RIGHT_CTRL,
        KeyCode::ControlLeft => keys::LEFT_CTRL,
        KeyCode::AltRight => keys::RIGHT_ALT,
        KeyCode::AltLeft => keys::LEFT_ALT,

        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use winit::keyboard::NativeKeyCode;

    use super::*;

    #[test]
    fn test_key_code_translation() {
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::KeyW)), Some(keys::W));
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::Space)), Some(keys::SPACE));
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::NumpadEnter)), Some(keys::ENTER));
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::MediaPlayPause)), None);
        assert_eq!(
            key_code(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            None
        );
    }

    #[test]
    fn test_pointer_code_translation() {
        assert_eq!(pointer_code(MouseButton::Left), buttons::LEFT);
        assert_eq!(pointer_code(MouseButton::Right), buttons::RIGHT);
        assert_eq!(pointer_code(MouseButton::Other(2)), DeviceCode(8));
    }

    #[test]
    fn test_scale_factor_ignores_non_positive() {
        let mut collector = InputCollector::new();
        collector.set_scale_factor(0.0);
        collector.set_scale_factor(2.0);
        assert_eq!(collector.scale_factor, 2.0);
        assert!(collector.pointer().is_none());
    }
}
