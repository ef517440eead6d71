//! Element registry and layer stack

use std::cell::OnceCell;
use std::collections::HashMap;

use indexmap::IndexMap;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, trace, warn};

use super::config::UiConfig;
use super::element::{Element, ElementKind, ElementProps};
use super::error::UiError;
use super::render::Canvas;
use crate::app::input::{Callback, CallbackRegistry};

/// Name-keyed element store organized into ordered layers
///
/// Layers are kept in first-use order; within a layer, elements are kept in
/// creation order. That order drives update, render and focus traversal.
/// Pointer hit-testing walks it backwards.
#[derive(Debug, Default)]
pub struct UiRegistry {
    pub(super) elements: HashMap<String, Element>,
    pub(super) layers: IndexMap<String, Vec<String>>,
    pub(super) focused: Option<String>,
    pub(super) hovered: Option<String>,
    /// Focus-eligible names in traversal order, rebuilt on demand
    pub(super) focus_order: OnceCell<Vec<String>>,
}

impl UiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new element on top of `layer`
    ///
    /// An eligible element takes focus when nothing else holds it.
    pub fn create_element(
        &mut self,
        name: impl Into<String>,
        kind: ElementKind,
        layer: impl Into<String>,
        props: ElementProps,
    ) -> Result<(), UiError> {
        let name = name.into();
        if self.elements.contains_key(&name) {
            return Err(UiError::DuplicateName(name));
        }

        let layer = layer.into();
        let element = Element::new(name.clone(), layer.clone(), kind, props);
        let eligible = element.is_focus_eligible();
        debug!(element = %name, layer = %layer, kind = element.kind().type_name(), "Element created");

        self.layers.entry(layer).or_default().push(name.clone());
        self.elements.insert(name.clone(), element);
        self.invalidate_focus_order();

        if eligible && self.focused.is_none() {
            self.focus(Some(&name));
        }
        Ok(())
    }

    /// Removes an element from the registry and its layer
    pub fn remove_element(&mut self, name: &str) -> Result<Element, UiError> {
        let element = self
            .elements
            .remove(name)
            .ok_or_else(|| UiError::NotFound(name.to_string()))?;

        if let Some(names) = self.layers.get_mut(element.layer()) {
            names.retain(|n| n != name);
        }
        if self.focused.as_deref() == Some(name) {
            self.focused = None;
        }
        if self.hovered.as_deref() == Some(name) {
            self.hovered = None;
        }
        self.invalidate_focus_order();
        debug!(element = %name, "Element removed");
        Ok(element)
    }

    /// Removes a layer and every element on it, returning the removed names
    pub fn remove_layer(&mut self, layer: &str) -> Vec<String> {
        let Some(names) = self.layers.shift_remove(layer) else {
            return Vec::new();
        };

        for name in &names {
            self.elements.remove(name);
        }
        if self.focused.as_ref().is_some_and(|f| names.contains(f)) {
            self.focused = None;
        }
        if self.hovered.as_ref().is_some_and(|h| names.contains(h)) {
            self.hovered = None;
        }
        self.invalidate_focus_order();
        debug!(layer = %layer, removed = names.len(), "Layer removed");
        names
    }

    /// Drops every element, layer, focus and hover
    pub fn clear(&mut self) {
        self.elements.clear();
        self.layers.clear();
        self.focused = None;
        self.hovered = None;
        self.invalidate_focus_order();
    }

    /// Strict lookup
    pub fn element(&self, name: &str) -> Result<&Element, UiError> {
        self.elements
            .get(name)
            .ok_or_else(|| UiError::NotFound(name.to_string()))
    }

    /// Strict mutable lookup
    ///
    /// Flags that affect focus eligibility are not reachable from here; use
    /// [`set_visible`](Self::set_visible) and friends for those.
    pub fn element_mut(&mut self, name: &str) -> Result<&mut Element, UiError> {
        self.elements
            .get_mut(name)
            .ok_or_else(|| UiError::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) -> Result<(), UiError> {
        self.element_mut(name)?.set_visible(visible);
        self.eligibility_changed();
        Ok(())
    }

    pub fn set_disabled(&mut self, name: &str, disabled: bool) -> Result<(), UiError> {
        self.element_mut(name)?.set_disabled(disabled);
        self.eligibility_changed();
        Ok(())
    }

    pub fn set_focusable(&mut self, name: &str, focusable: bool) -> Result<(), UiError> {
        self.element_mut(name)?.set_focusable(focusable);
        self.eligibility_changed();
        Ok(())
    }

    /// Layer names in draw order, bottom first
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Element names of one layer, bottom first
    pub fn layer_elements(&self, layer: &str) -> &[String] {
        self.layers.get(layer).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every element name in update/render order
    pub fn traversal(&self) -> impl Iterator<Item = &str> {
        self.layers.values().flatten().map(String::as_str)
    }

    /// Advances per-element timers, in traversal order
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() {
            warn!(dt, "Non-finite frame time, update skipped");
            return;
        }
        for names in self.layers.values() {
            for name in names {
                if let Some(element) = self.elements.get_mut(name) {
                    element.update(dt);
                }
            }
        }
    }

    /// Draws every visible element, later layers over earlier ones
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for name in self.traversal() {
            if let Some(element) = self.elements.get(name) {
                element.render(canvas);
            }
        }
    }

    /// Creates every element of a declarative description
    ///
    /// Names and callbacks are all checked first; on error nothing is created.
    pub fn load_config(&mut self, config: &UiConfig, callbacks: &CallbackRegistry) -> Result<(), UiError> {
        let mut pending = Vec::with_capacity(config.elements.len());
        for (name, spec) in &config.elements {
            if self.elements.contains_key(name) {
                return Err(UiError::DuplicateName(name.clone()));
            }
            let callback = match &spec.callback {
                Some(id) => Some(callbacks.get(id).cloned().ok_or_else(|| UiError::UnknownCallback {
                    element: name.clone(),
                    callback: id.to_string(),
                })?),
                None => None,
            };
            pending.push((name, spec, callback));
        }

        for (name, spec, callback) in pending {
            let (kind, props) = spec.to_element(callback);
            self.create_element(name.clone(), kind, spec.layer.clone(), props)?;
        }
        debug!(elements = config.elements.len(), "UI config loaded");
        Ok(())
    }

    /// Human-readable dump of layers, elements, focus and hover
    pub fn debug_dump(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Layer", "Element", "Type", "Rect", "Flags"]);
        for (layer, names) in &self.layers {
            for name in names {
                let Some(element) = self.elements.get(name) else {
                    continue;
                };
                let rect = element.rect();
                builder.push_record([
                    layer.clone(),
                    name.clone(),
                    element.kind().type_name().to_string(),
                    format!("{},{} {}x{}", rect.x, rect.y, rect.width, rect.height),
                    flags(element),
                ]);
            }
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        format!(
            "Elements:\n{table}\nFocused: {}\nHovered: {}\n",
            self.focused.as_deref().unwrap_or("-"),
            self.hovered.as_deref().unwrap_or("-"),
        )
    }

    pub(super) fn invalidate_focus_order(&mut self) {
        self.focus_order.take();
    }

    fn eligibility_changed(&mut self) {
        self.invalidate_focus_order();
        self.validate_focus();
    }

    /// Clears focus if it no longer points at an eligible element
    pub(super) fn validate_focus(&mut self) {
        let Some(name) = self.focused.as_deref() else {
            return;
        };
        let eligible = self.elements.get(name).is_some_and(Element::is_focus_eligible);
        if !eligible {
            trace!(element = %name, "Dropping stale focus");
            if let Some(element) = self.elements.get_mut(name) {
                element.set_focused(false);
            }
            self.focused = None;
        }
    }

    /// Clones a hook out of an element so it can run without a borrow
    pub(super) fn hook(&self, name: &str, pick: impl Fn(&Element) -> Option<&Callback>) -> Option<Callback> {
        self.elements.get(name).and_then(|e| pick(e).cloned())
    }
}

fn flags(element: &Element) -> String {
    let mut flags = Vec::new();
    if !element.is_visible() {
        flags.push("hidden");
    }
    if element.is_focusable() {
        flags.push("focusable");
    }
    if element.is_disabled() {
        flags.push("disabled");
    }
    flags.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::geometry::Rect;
    use crate::app::ui::element::{Button, Label};
    use crate::app::ui::render::DrawList;

    fn button() -> ElementKind {
        ElementKind::Button(Button::new("ok"))
    }

    fn focusable() -> ElementProps {
        ElementProps::builder().focusable(true).build()
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut ui = UiRegistry::new();
        ui.create_element("a", button(), "ui", ElementProps::default()).unwrap();

        let result = ui.create_element("a", ElementKind::Container, "overlay", ElementProps::default());

        assert_eq!(result, Err(UiError::DuplicateName("a".to_string())));
        assert_eq!(ui.len(), 1);
        assert_eq!(ui.layers().collect::<Vec<_>>(), vec!["ui"]);
    }

    #[test]
    fn test_layer_order_is_first_use() {
        let mut ui = UiRegistry::new();
        ui.create_element("bg", ElementKind::Container, "background", ElementProps::default()).unwrap();
        ui.create_element("hud", ElementKind::Container, "overlay", ElementProps::default()).unwrap();
        ui.create_element("tree", ElementKind::Container, "background", ElementProps::default()).unwrap();

        assert_eq!(ui.layers().collect::<Vec<_>>(), vec!["background", "overlay"]);
        assert_eq!(ui.traversal().collect::<Vec<_>>(), vec!["bg", "tree", "hud"]);
    }

    #[test]
    fn test_first_focusable_takes_focus() {
        let mut ui = UiRegistry::new();
        ui.create_element("title", ElementKind::Label(Label::new("Hi")), "ui", ElementProps::default()).unwrap();
        assert_eq!(ui.focused(), None);

        ui.create_element("play", button(), "ui", focusable()).unwrap();
        ui.create_element("quit", button(), "ui", focusable()).unwrap();
        assert_eq!(ui.focused(), Some("play"));
    }

    #[test]
    fn test_remove_element_clears_focus() {
        let mut ui = UiRegistry::new();
        ui.create_element("play", button(), "ui", focusable()).unwrap();

        ui.remove_element("play").unwrap();

        assert_eq!(ui.focused(), None);
        assert!(ui.layer_elements("ui").is_empty());
        assert_eq!(ui.remove_element("play").unwrap_err(), UiError::NotFound("play".to_string()));
    }

    #[test]
    fn test_remove_layer_drops_its_elements() {
        let mut ui = UiRegistry::new();
        ui.create_element("bg", ElementKind::Container, "background", ElementProps::default()).unwrap();
        ui.create_element("play", button(), "menu", focusable()).unwrap();

        let removed = ui.remove_layer("menu");

        assert_eq!(removed, vec!["play".to_string()]);
        assert!(!ui.contains("play"));
        assert_eq!(ui.focused(), None);
        assert_eq!(ui.layers().collect::<Vec<_>>(), vec!["background"]);
    }

    #[test]
    fn test_hiding_focused_element_drops_focus() {
        let mut ui = UiRegistry::new();
        ui.create_element("play", button(), "ui", focusable()).unwrap();

        ui.set_visible("play", false).unwrap();

        assert_eq!(ui.focused(), None);
        assert!(ui.focusable_order().is_empty());
    }

    #[test]
    fn test_render_follows_layers_then_insertion() {
        let mut ui = UiRegistry::new();
        ui.create_element("hud", ElementKind::Container, "overlay", ElementProps::default()).unwrap();
        ui.create_element("bg", ElementKind::Container, "background", ElementProps::default()).unwrap();
        ui.create_element(
            "hidden",
            ElementKind::Container,
            "overlay",
            ElementProps::builder().visible(false).build(),
        )
        .unwrap();

        let mut canvas = DrawList::new();
        ui.render(&mut canvas);

        assert_eq!(canvas.element_order(), vec!["hud", "bg"]);
    }

    #[test]
    fn test_element_mut_moves_rect() {
        let mut ui = UiRegistry::new();
        ui.create_element("bg", ElementKind::Container, "background", ElementProps::default()).unwrap();

        ui.element_mut("bg").unwrap().set_rect(Rect::new(5.0, 5.0, 10.0, 10.0));

        assert_eq!(ui.element("bg").unwrap().rect(), Rect::new(5.0, 5.0, 10.0, 10.0));
        assert!(matches!(ui.element("nope"), Err(UiError::NotFound(_))));
    }

    #[test]
    fn test_update_survives_degenerate_timing() {
        let shown = |ui: &UiRegistry, name: &str| match ui.get(name).map(Element::kind) {
            Some(ElementKind::Label(label)) => label.is_shown(),
            _ => false,
        };
        let mut ui = UiRegistry::new();
        let fast = ElementKind::Label(Label::new("fast").blinking(1e-8));
        ui.create_element("fast", fast, "ui", ElementProps::default()).unwrap();
        let slow = ElementKind::Label(Label::new("slow").blinking(0.5));
        ui.create_element("slow", slow, "ui", ElementProps::default()).unwrap();

        ui.update(1.0);
        ui.update(f32::NAN);
        ui.update(f32::INFINITY);

        assert!(shown(&ui, "slow"));
        ui.update(0.6);
        assert!(!shown(&ui, "slow"));
    }

    #[test]
    fn test_debug_dump_lists_elements() {
        let mut ui = UiRegistry::new();
        ui.create_element("play", button(), "menu", focusable()).unwrap();

        let dump = ui.debug_dump();

        assert!(dump.contains("menu"));
        assert!(dump.contains("button"));
        assert!(dump.contains("Focused: play"));
        assert!(dump.contains("Hovered: -"));
    }
}
