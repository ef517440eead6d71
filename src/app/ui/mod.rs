//! Retained-mode interface elements
//!
//! [`UiRegistry`] owns every element, grouped into layers. The same order
//! serves three purposes:
//! - update and render walk layers in first-use order, elements in
//!   creation order
//! - keyboard focus traversal walks it forwards, skipping ineligible elements
//! - pointer hit-testing walks it backwards, so the topmost element wins
//!
//! # Usage
//!
//! ```
//! use hearth::app::geometry::{Point, Rect};
//! use hearth::app::input::Callback;
//! use hearth::app::ui::{Button, ElementKind, ElementProps, UiRegistry};
//!
//! let mut ui = UiRegistry::new();
//! ui.create_element(
//!     "play",
//!     ElementKind::Button(Button::new("Play").with_callback(Callback::new("start", || Ok(())))),
//!     "menu",
//!     ElementProps::builder().rect(Rect::new(40.0, 60.0, 120.0, 40.0)).focusable(true).build(),
//! )
//! .unwrap();
//!
//! assert_eq!(ui.focused(), Some("play"));
//! assert_eq!(ui.topmost_element_at(Point::new(50.0, 70.0)), Some("play"));
//! ```

mod config;
mod element;
mod error;
mod focus;
mod pointer;
mod registry;
mod render;

pub use config::{ElementSpec, ElementType, UiConfig};
pub use element::{Align, Button, Element, ElementKind, ElementProps, Hooks, Label};
pub use error::UiError;
pub use registry::UiRegistry;
pub use render::{Canvas, DrawCommand, DrawList};
