//! Interaction core and its host glue
//!
//! - [`input`]: device state, scoped callback bindings and polled actions
//! - [`ui`]: layered elements with focus traversal and pointer hit-testing
//! - [`context`]: the dispatch entry point tying both together
//! - [`config`]: profile loading; `window` maps it onto winit attributes

pub mod config;
pub mod context;
pub mod geometry;
pub mod input;
pub mod ui;
mod window;

pub use config::{AppConfig, DebugConfig, WindowConfig};
pub use context::{InteractionContext, SceneConfig, SceneError, UiHandle, nav};
pub use window::window_attributes_from_config;
