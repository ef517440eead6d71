//! Interface elements

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::render::Canvas;
use crate::app::geometry::Rect;
use crate::app::input::Callback;

/// Horizontal text alignment inside an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Static text, optionally blinking
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub align: Align,
    blink: Option<Blink>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Blink {
    interval: f32,
    elapsed: f32,
    shown: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
            blink: None,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Makes the label blink, toggling every `interval` seconds
    pub fn blinking(mut self, interval: f32) -> Self {
        self.start_blinking(interval);
        self
    }

    /// Ignored unless `interval` is finite and positive
    pub fn start_blinking(&mut self, interval: f32) {
        if interval.is_finite() && interval > 0.0 {
            self.blink = Some(Blink {
                interval,
                elapsed: 0.0,
                shown: true,
            });
        }
    }

    pub fn stop_blinking(&mut self) {
        self.blink = None;
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    /// False during the hidden phase of a blink
    pub fn is_shown(&self) -> bool {
        self.blink.is_none_or(|blink| blink.shown)
    }

    fn tick(&mut self, dt: f32) {
        let Some(blink) = &mut self.blink else {
            return;
        };
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        blink.elapsed += dt;
        let toggles = (blink.elapsed / blink.interval).floor();
        if toggles >= 1.0 {
            if toggles % 2.0 == 1.0 {
                blink.shown = !blink.shown;
            }
            blink.elapsed %= blink.interval;
        }
    }
}

/// Clickable, focusable text button
#[derive(Debug, Clone)]
pub struct Button {
    pub text: String,
    /// Activation callback, run on click and on keyboard activation
    pub callback: Option<Callback>,
    highlighted: bool,
    focused: bool,
    hovered: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback: None,
            highlighted: false,
            focused: false,
            hovered: false,
        }
    }

    pub fn with_callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Highlighted while focused or hovered
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn refresh_highlight(&mut self) {
        self.highlighted = self.focused || self.hovered;
    }
}

/// Closed set of element kinds, each with its own payload
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Bare container, drawn as a debug outline
    Container,
    Label(Label),
    Button(Button),
}

impl ElementKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Label(_) => "label",
            Self::Button(_) => "button",
        }
    }

    /// Size used when no rect is given
    pub fn default_size(&self) -> (f32, f32) {
        match self {
            Self::Container | Self::Label(_) => (100.0, 30.0),
            Self::Button(_) => (120.0, 40.0),
        }
    }
}

/// Optional per-element hooks
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    pub on_focus: Option<Callback>,
    pub on_blur: Option<Callback>,
    pub on_hover: Option<Callback>,
    pub on_click: Option<Callback>,
    pub on_activate: Option<Callback>,
}

/// Creation-time properties shared by every element kind
#[derive(Debug, Clone, TypedBuilder)]
pub struct ElementProps {
    /// Placement; defaults to the kind's default size at the origin
    #[builder(default, setter(strip_option))]
    pub rect: Option<Rect>,
    #[builder(default = true)]
    pub visible: bool,
    #[builder(default)]
    pub focusable: bool,
    #[builder(default)]
    pub disabled: bool,
    #[builder(default)]
    pub hooks: Hooks,
}

impl Default for ElementProps {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Registered interface element
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    layer: String,
    rect: Rect,
    visible: bool,
    focusable: bool,
    disabled: bool,
    kind: ElementKind,
    hooks: Hooks,
}

impl Element {
    pub(super) fn new(name: String, layer: String, kind: ElementKind, props: ElementProps) -> Self {
        let rect = props.rect.unwrap_or_else(|| {
            let (width, height) = kind.default_size();
            Rect::new(0.0, 0.0, width, height)
        });
        Self {
            name,
            layer,
            rect,
            visible: props.visible,
            focusable: props.focusable,
            disabled: props.disabled,
            kind,
            hooks: props.hooks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// Visible, focusable and enabled
    pub fn is_focus_eligible(&self) -> bool {
        self.visible && self.focusable && !self.disabled
    }

    pub(super) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(super) fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    pub(super) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub(super) fn set_focused(&mut self, focused: bool) {
        if let ElementKind::Button(button) = &mut self.kind {
            button.focused = focused;
            button.refresh_highlight();
        }
    }

    pub(super) fn set_hovered(&mut self, hovered: bool) {
        if let ElementKind::Button(button) = &mut self.kind {
            button.hovered = hovered;
            button.refresh_highlight();
        }
    }

    /// Callbacks that make up activation, in firing order
    pub(super) fn activation(&self) -> Vec<Callback> {
        let button = match &self.kind {
            ElementKind::Button(button) => button.callback.clone(),
            _ => None,
        };
        button.into_iter().chain(self.hooks.on_activate.clone()).collect()
    }

    pub(super) fn update(&mut self, dt: f32) {
        if let ElementKind::Label(label) = &mut self.kind {
            label.tick(dt);
        }
    }

    pub(super) fn render(&self, canvas: &mut dyn Canvas) {
        if !self.visible {
            return;
        }

        match &self.kind {
            ElementKind::Container => canvas.outline(&self.name, self.rect),
            ElementKind::Label(label) => {
                if label.is_shown() {
                    canvas.text(&self.name, self.rect, &label.text, label.align);
                }
            }
            ElementKind::Button(button) => {
                canvas.fill(&self.name, self.rect, button.highlighted);
                canvas.text(&self.name, self.rect, &button.text, Align::Center);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ui::render::{DrawCommand, DrawList};

    #[test]
    fn test_default_rect_depends_on_kind() {
        let label = Element::new("l".into(), "ui".into(), ElementKind::Label(Label::new("hi")), ElementProps::default());
        let button = Element::new("b".into(), "ui".into(), ElementKind::Button(Button::new("ok")), ElementProps::default());

        assert_eq!(label.rect(), Rect::new(0.0, 0.0, 100.0, 30.0));
        assert_eq!(button.rect(), Rect::new(0.0, 0.0, 120.0, 40.0));
        assert!(label.is_visible());
        assert!(!label.is_focusable());
    }

    #[test]
    fn test_label_blink_toggles_with_time() {
        let mut label = Label::new("Press a key").blinking(0.5);
        assert!(label.is_shown());

        label.tick(0.3);
        assert!(label.is_shown());
        label.tick(0.3);
        assert!(!label.is_shown());
        label.tick(0.5);
        assert!(label.is_shown());

        label.stop_blinking();
        assert!(label.is_shown());
    }

    #[test]
    fn test_blink_catches_up_in_one_step() {
        let mut label = Label::new("Press a key").blinking(0.5);

        label.tick(1.6);
        assert!(!label.is_shown());

        label.tick(0.45);
        assert!(label.is_shown());
    }

    #[test]
    fn test_tiny_blink_interval_terminates() {
        let mut label = Label::new("x").blinking(1e-8);
        assert!(label.is_blinking());

        label.tick(1.0);
        label.tick(1.0);
        assert!(label.is_blinking());
    }

    #[test]
    fn test_non_finite_blink_input_is_ignored() {
        let mut label = Label::new("x").blinking(0.5);
        label.tick(f32::NAN);
        label.tick(f32::INFINITY);
        assert!(label.is_shown());

        label.tick(0.6);
        assert!(!label.is_shown());

        assert!(!Label::new("x").blinking(f32::INFINITY).is_blinking());
        assert!(!Label::new("x").blinking(0.0).is_blinking());
    }

    #[test]
    fn test_button_highlight_tracks_focus_and_hover() {
        let mut element = Element::new(
            "b".into(),
            "ui".into(),
            ElementKind::Button(Button::new("ok")),
            ElementProps::default(),
        );
        let highlighted = |e: &Element| match e.kind() {
            ElementKind::Button(b) => b.is_highlighted(),
            _ => false,
        };

        element.set_hovered(true);
        assert!(highlighted(&element));
        element.set_focused(true);
        element.set_hovered(false);
        assert!(highlighted(&element));
        element.set_focused(false);
        assert!(!highlighted(&element));
    }

    #[test]
    fn test_hidden_blink_phase_skips_text() {
        let mut element = Element::new(
            "prompt".into(),
            "ui".into(),
            ElementKind::Label(Label::new("Press a key").blinking(0.5)),
            ElementProps::default(),
        );
        element.update(0.6);

        let mut canvas = DrawList::new();
        element.render(&mut canvas);
        assert!(canvas.is_empty());

        element.update(0.5);
        element.render(&mut canvas);
        assert!(matches!(&canvas.commands()[0], DrawCommand::Text { text, .. } if text == "Press a key"));
    }

    #[test]
    fn test_activation_order() {
        let props = ElementProps::builder()
            .hooks(Hooks {
                on_activate: Some(Callback::new("hook", || Ok(()))),
                ..Hooks::default()
            })
            .build();
        let element = Element::new(
            "b".into(),
            "ui".into(),
            ElementKind::Button(Button::new("ok").with_callback(Callback::new("press", || Ok(())))),
            props,
        );

        let ids: Vec<_> = element.activation().iter().map(|cb| cb.id().to_string()).collect();
        assert_eq!(ids, vec!["press", "hook"]);
    }
}
