//! Input handling system
//!
//! Turns raw device events into:
//! - Callbacks bound per scope (local to a scene, or global) and channel
//!   (key/pointer × pressed/released). Local bindings shadow global ones.
//! - Named actions that are polled each frame instead of triggering callbacks.
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → RawEvent
//!                                         ↓
//!                                   InputRouter::dispatch
//!                                   (DeviceState write, then
//!                                    local → global binding lookup)
//!                                         ↓
//!                       Callback       is_action_active (polled)
//! ```
//!
//! # Usage
//!
//! ```
//! use hearth::app::input::{Callback, Channel, DeviceKind, InputRouter, Scope, Transition, keys};
//!
//! let mut router = InputRouter::new();
//! router
//!     .bind_callback(Scope::Global, Channel::KeyPressed, keys::ESCAPE, Callback::new("quit", || Ok(())))
//!     .unwrap();
//! router.map_action("jump", DeviceKind::Key, keys::SPACE);
//!
//! router.dispatch(DeviceKind::Key, keys::SPACE, Transition::Pressed);
//! assert!(router.is_action_active("jump"));
//! ```

mod actions;
mod bindings;
mod callback;
mod collector;
mod config;
mod error;
mod events;
mod router;
mod snapshot;
mod state;

// Re-export public API
pub use actions::{ActionMap, ActionMapping};
pub use bindings::{BindingEntry, BindingTable};
pub use callback::{Callback, CallbackId, CallbackRegistry};
pub use collector::{InputCollector, key_code, pointer_code};
pub use config::{BindSpec, InputConfig};
pub use error::InputError;
pub use events::{Channel, DeviceCode, DeviceKind, RawEvent, Scope, Transition, buttons, keys};
pub use router::InputRouter;
pub use snapshot::{BindRecord, PersistedSnapshot};
pub use state::{ButtonState, DeviceState};
