//! Declarative UI description
//!
//! ```toml
//! [ui.elements.title]
//! type = "label"
//! text = "Hearth"
//! x = 40
//! y = 16
//! w = 300
//! align = "center"
//!
//! [ui.elements.play_btn]
//! type = "button"
//! text = "Play"
//! layer = "menu"
//! x = 40
//! y = 60
//! focusable = true
//! callback = "start"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::element::{Align, Button, ElementKind, ElementProps, Label};
use crate::app::geometry::Rect;
use crate::app::input::{Callback, CallbackId};

/// Element kinds a description can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    #[default]
    #[serde(alias = "element")]
    Container,
    Label,
    Button,
}

/// One element entry, keyed by name in [`UiConfig::elements`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    #[serde(rename = "type", default)]
    pub kind: ElementType,

    #[serde(default = "default_layer")]
    pub layer: String,

    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Width; the kind's default when absent
    #[serde(default)]
    pub w: Option<f32>,
    /// Height; the kind's default when absent
    #[serde(default)]
    pub h: Option<f32>,

    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub focusable: bool,
    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub align: Align,

    /// Button activation callback
    #[serde(default)]
    pub callback: Option<CallbackId>,

    /// Label blink interval in seconds
    #[serde(default)]
    pub blink: Option<f32>,
}

fn default_layer() -> String {
    "default".to_string()
}

fn default_visible() -> bool {
    true
}

impl ElementSpec {
    pub fn new(kind: ElementType) -> Self {
        Self {
            kind,
            layer: default_layer(),
            x: 0.0,
            y: 0.0,
            w: None,
            h: None,
            visible: true,
            focusable: false,
            disabled: false,
            text: String::new(),
            align: Align::default(),
            callback: None,
            blink: None,
        }
    }

    /// Builds the element payload and props, with `callback` already resolved
    pub(super) fn to_element(&self, callback: Option<Callback>) -> (ElementKind, ElementProps) {
        let kind = match self.kind {
            ElementType::Container => ElementKind::Container,
            ElementType::Label => {
                let mut label = Label::new(self.text.clone()).aligned(self.align);
                if let Some(interval) = self.blink {
                    label.start_blinking(interval);
                }
                ElementKind::Label(label)
            }
            ElementType::Button => {
                let mut button = Button::new(self.text.clone());
                button.callback = callback;
                ElementKind::Button(button)
            }
        };

        let (default_w, default_h) = kind.default_size();
        let rect = Rect::new(
            self.x,
            self.y,
            self.w.unwrap_or(default_w),
            self.h.unwrap_or(default_h),
        );
        let props = ElementProps::builder()
            .rect(rect)
            .visible(self.visible)
            .focusable(self.focusable)
            .disabled(self.disabled)
            .build();
        (kind, props)
    }
}

/// Elements to create when a screen loads, in declaration order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub elements: IndexMap<String, ElementSpec>,
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(mut self, name: impl Into<String>, spec: ElementSpec) -> Self {
        self.elements.insert(name.into(), spec);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::CallbackRegistry;
    use crate::app::ui::error::UiError;
    use crate::app::ui::registry::UiRegistry;

    fn parse(toml: &str) -> UiConfig {
        ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_parse_keeps_declaration_order() {
        let ui = parse(
            r#"
            [elements.zeta]
            type = "label"
            text = "Z"

            [elements.alpha]
            type = "button"
            text = "A"
            callback = "start"
            focusable = true
            "#,
        );

        let names: Vec<_> = ui.elements.keys().cloned().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(ui.elements["alpha"].kind, ElementType::Button);
        assert_eq!(ui.elements["alpha"].callback, Some(CallbackId::from("start")));
        assert_eq!(ui.elements["zeta"].layer, "default");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = ::config::Config::builder()
            .add_source(::config::File::from_str(
                "[elements.x]\ntype = \"slider\"",
                ::config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<UiConfig>();

        assert!(result.is_err());
    }

    #[test]
    fn test_default_sizes_follow_kind() {
        let (_, label) = ElementSpec::new(ElementType::Label).to_element(None);
        let (_, button) = ElementSpec::new(ElementType::Button).to_element(None);

        assert_eq!(label.rect, Some(Rect::new(0.0, 0.0, 100.0, 30.0)));
        assert_eq!(button.rect, Some(Rect::new(0.0, 0.0, 120.0, 40.0)));
    }

    #[test]
    fn test_load_config_rejects_unknown_callback() {
        let config = UiConfig::new()
            .element("title", ElementSpec::new(ElementType::Label))
            .element(
                "play",
                ElementSpec {
                    callback: Some("start".into()),
                    ..ElementSpec::new(ElementType::Button)
                },
            );

        let mut ui = UiRegistry::new();
        let result = ui.load_config(&config, &CallbackRegistry::new());

        assert!(matches!(result, Err(UiError::UnknownCallback { .. })));
        assert!(ui.is_empty());
    }

    #[test]
    fn test_load_config_creates_in_order() {
        let mut callbacks = CallbackRegistry::new();
        callbacks.register(Callback::new("start", || Ok(())));
        let config = UiConfig::new()
            .element("title", ElementSpec::new(ElementType::Label))
            .element(
                "play",
                ElementSpec {
                    callback: Some("start".into()),
                    focusable: true,
                    ..ElementSpec::new(ElementType::Button)
                },
            );

        let mut ui = UiRegistry::new();
        ui.load_config(&config, &callbacks).unwrap();

        assert_eq!(ui.traversal().collect::<Vec<_>>(), vec!["title", "play"]);
        assert_eq!(ui.focused(), Some("play"));
        assert!(ui.activate_focused());
    }
}
