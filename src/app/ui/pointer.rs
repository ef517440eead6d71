//! Pointer router: topmost hit-testing, hover and click

use tracing::{debug, trace};

use super::element::Element;
use super::registry::UiRegistry;
use crate::app::geometry::Point;

impl UiRegistry {
    /// Topmost visible element under `position`
    ///
    /// Later layers occlude earlier ones and later elements occlude earlier
    /// ones in the same layer, so both levels are scanned in reverse.
    /// Disabled elements still occlude.
    pub fn topmost_element_at(&self, position: Point) -> Option<&str> {
        self.layers
            .values()
            .rev()
            .flat_map(|names| names.iter().rev())
            .find(|name| {
                self.elements
                    .get(*name)
                    .is_some_and(|e| e.is_visible() && e.rect().contains(position))
            })
            .map(String::as_str)
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Tracks the element under the pointer
    ///
    /// `on_hover` fires once when the pointer enters an enabled element.
    /// Returns the element now under the pointer.
    pub fn handle_hover(&mut self, position: Point) -> Option<String> {
        let target = self.topmost_element_at(position).map(str::to_string);
        if target == self.hovered {
            return target;
        }

        if let Some(previous) = self.hovered.take() {
            if let Some(element) = self.elements.get_mut(&previous) {
                element.set_hovered(false);
            }
        }
        self.hovered = target.clone();

        let Some(name) = target.as_deref() else {
            return None;
        };
        if !self.is_enabled(name) {
            return target;
        }

        trace!(element = %name, "Hover entered");
        if let Some(element) = self.elements.get_mut(name) {
            element.set_hovered(true);
        }
        if let Some(on_hover) = self.hook(name, |e| e.hooks().on_hover.as_ref()) {
            on_hover.invoke();
        }
        target
    }

    /// Forgets the hovered element, e.g. when the pointer leaves the window
    pub fn clear_hover(&mut self) {
        if let Some(previous) = self.hovered.take() {
            if let Some(element) = self.elements.get_mut(&previous) {
                element.set_hovered(false);
            }
        }
    }

    /// Clicks the topmost element under `position`
    ///
    /// Fires `on_click`, then moves focus there if the element is eligible,
    /// then runs its activation. Returns the element that was hit, even when
    /// it is disabled and nothing fired.
    pub fn handle_click(&mut self, position: Point) -> Option<String> {
        let name = self.topmost_element_at(position)?.to_string();
        if !self.is_enabled(&name) {
            trace!(element = %name, "Click on disabled element");
            return Some(name);
        }

        debug!(element = %name, x = position.x, y = position.y, "Click");
        if let Some(on_click) = self.hook(&name, |e| e.hooks().on_click.as_ref()) {
            on_click.invoke();
        }

        let eligible = self.elements.get(&name).is_some_and(Element::is_focus_eligible);
        if eligible {
            self.focus(Some(&name));
        }

        self.activate(&name);
        Some(name)
    }

    fn is_enabled(&self, name: &str) -> bool {
        self.elements.get(name).is_some_and(|e| !e.is_disabled())
    }
}
