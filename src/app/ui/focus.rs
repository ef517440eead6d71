//! Focus controller
//!
//! Exactly one element holds focus at a time, whether it got there by
//! keyboard traversal or by a pointer click.

use tracing::{debug, warn};

use super::element::Element;
use super::registry::UiRegistry;

impl UiRegistry {
    /// Focus-eligible element names in traversal order
    pub fn focusable_order(&self) -> &[String] {
        self.focus_order.get_or_init(|| {
            self.layers
                .values()
                .flatten()
                .filter(|name| self.elements.get(*name).is_some_and(Element::is_focus_eligible))
                .cloned()
                .collect()
        })
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Moves focus, or clears it with `None`
    ///
    /// The previous element's `on_blur` runs before the new element's
    /// `on_focus`. Targets that are missing or not eligible leave focus
    /// untouched. Returns whether focus now rests on the request.
    pub fn focus(&mut self, name: Option<&str>) -> bool {
        if let Some(target) = name {
            if self.focused.as_deref() == Some(target) {
                return true;
            }
            let eligible = self.elements.get(target).is_some_and(Element::is_focus_eligible);
            if !eligible {
                warn!(element = %target, "Cannot focus element");
                return false;
            }
        }

        if let Some(previous) = self.focused.take() {
            if let Some(element) = self.elements.get_mut(&previous) {
                element.set_focused(false);
            }
            if let Some(on_blur) = self.hook(&previous, |e| e.hooks().on_blur.as_ref()) {
                on_blur.invoke();
            }
        }

        let Some(target) = name else {
            debug!("Focus cleared");
            return true;
        };

        if let Some(element) = self.elements.get_mut(target) {
            element.set_focused(true);
        }
        self.focused = Some(target.to_string());
        debug!(element = %target, "Focus moved");

        if let Some(on_focus) = self.hook(target, |e| e.hooks().on_focus.as_ref()) {
            on_focus.invoke();
        }
        true
    }

    /// Focuses the next eligible element, wrapping around
    ///
    /// Starts at the first one when nothing is focused.
    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    /// Focuses the previous eligible element, wrapping around
    ///
    /// Starts at the last one when nothing is focused.
    pub fn focus_prev(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        self.validate_focus();

        let order = self.focusable_order();
        if order.is_empty() {
            return;
        }

        let len = order.len();
        let current = self
            .focused
            .as_ref()
            .and_then(|name| order.iter().position(|n| n == name));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };

        let target = order[index].clone();
        self.focus(Some(&target));
    }

    /// Runs the focused element's activation: its button callback, then `on_activate`
    ///
    /// No-op when nothing is focused. Returns whether anything ran.
    pub fn activate_focused(&mut self) -> bool {
        self.validate_focus();

        let Some(name) = self.focused.clone() else {
            return false;
        };
        self.activate(&name)
    }

    pub(super) fn activate(&self, name: &str) -> bool {
        let callbacks = self
            .elements
            .get(name)
            .map(Element::activation)
            .unwrap_or_default();
        if callbacks.is_empty() {
            return false;
        }

        debug!(element = %name, "Activating");
        for callback in &callbacks {
            callback.invoke();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::app::input::Callback;
    use crate::app::ui::element::{Button, ElementKind, ElementProps, Hooks};
    use crate::app::ui::registry::UiRegistry;

    type Log = Rc<RefCell<Vec<String>>>;

    fn logging(id: &str, log: &Log) -> Callback {
        let log = log.clone();
        let entry = id.to_string();
        Callback::new(id, move || {
            log.borrow_mut().push(entry.clone());
            Ok(())
        })
    }

    fn add_button(ui: &mut UiRegistry, name: &str, layer: &str) {
        ui.create_element(
            name,
            ElementKind::Button(Button::new(name)),
            layer,
            ElementProps::builder().focusable(true).build(),
        )
        .unwrap();
    }

    fn abc() -> UiRegistry {
        let mut ui = UiRegistry::new();
        for name in ["a", "b", "c"] {
            add_button(&mut ui, name, "ui");
        }
        ui.focus(None);
        ui
    }

    #[test]
    fn test_focus_next_cycles_and_wraps() {
        let mut ui = abc();

        let mut seen = Vec::new();
        for _ in 0..4 {
            ui.focus_next();
            seen.push(ui.focused().unwrap().to_string());
        }

        assert_eq!(seen, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn test_focus_prev_wraps_backwards() {
        let mut ui = abc();

        ui.focus_prev();
        assert_eq!(ui.focused(), Some("c"));

        ui.focus(Some("a"));
        ui.focus_prev();
        assert_eq!(ui.focused(), Some("c"));
    }

    #[test]
    fn test_traversal_crosses_layers_in_order() {
        let mut ui = UiRegistry::new();
        add_button(&mut ui, "dialog_ok", "dialog");
        add_button(&mut ui, "menu_play", "menu");
        add_button(&mut ui, "dialog_cancel", "dialog");

        assert_eq!(ui.focusable_order(), ["dialog_ok", "dialog_cancel", "menu_play"]);
    }

    #[test]
    fn test_traversal_skips_ineligible() {
        let mut ui = abc();
        ui.set_disabled("b", true).unwrap();

        ui.focus(Some("a"));
        ui.focus_next();
        assert_eq!(ui.focused(), Some("c"));
        assert!(!ui.focus(Some("b")));
        assert_eq!(ui.focused(), Some("c"));
    }

    #[test]
    fn test_empty_order_is_noop() {
        let mut ui = UiRegistry::new();
        ui.focus_next();
        ui.focus_prev();
        assert_eq!(ui.focused(), None);
        assert!(!ui.activate_focused());
    }

    #[test]
    fn test_focus_hooks_blur_then_focus() {
        let log: Log = Rc::default();
        let mut ui = UiRegistry::new();
        for name in ["a", "b"] {
            let hooks = Hooks {
                on_focus: Some(logging(&format!("focus_{name}"), &log)),
                on_blur: Some(logging(&format!("blur_{name}"), &log)),
                ..Hooks::default()
            };
            ui.create_element(
                name,
                ElementKind::Button(Button::new(name)),
                "ui",
                ElementProps::builder().focusable(true).hooks(hooks).build(),
            )
            .unwrap();
        }

        ui.focus(Some("b"));
        ui.focus(None);

        assert_eq!(*log.borrow(), vec!["focus_a", "blur_a", "focus_b", "blur_b"]);
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn test_activate_focused_runs_button_then_hook() {
        let log: Log = Rc::default();
        let mut ui = UiRegistry::new();
        ui.create_element(
            "play",
            ElementKind::Button(Button::new("Play").with_callback(logging("start", &log))),
            "ui",
            ElementProps::builder()
                .focusable(true)
                .hooks(Hooks {
                    on_activate: Some(logging("activated", &log)),
                    ..Hooks::default()
                })
                .build(),
        )
        .unwrap();

        assert!(ui.activate_focused());
        assert_eq!(*log.borrow(), vec!["start", "activated"]);
    }

    #[test]
    fn test_failing_activation_is_contained() {
        let mut ui = UiRegistry::new();
        ui.create_element(
            "broken",
            ElementKind::Button(
                Button::new("Broken").with_callback(Callback::new("broken", || anyhow::bail!("no"))),
            ),
            "ui",
            ElementProps::builder().focusable(true).build(),
        )
        .unwrap();

        assert!(ui.activate_focused());
        assert_eq!(ui.focused(), Some("broken"));
    }
}
