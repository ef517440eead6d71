//! Declarative input description
//!
//! ```toml
//! [[input.bind]]
//! channel = "key_pressed"
//! code = 274
//! callback = "focus_next"
//! scope = "global"
//!
//! [input.map.jump]
//! key = 32
//! pointer = 1
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::actions::ActionMapping;
use super::callback::CallbackId;
use super::events::{Channel, DeviceCode, DeviceKind, Scope};

/// Callback binding request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindSpec {
    #[serde(default)]
    pub channel: Channel,
    pub code: DeviceCode,
    pub callback: CallbackId,
    #[serde(default)]
    pub scope: Scope,
}

impl BindSpec {
    /// Local binding on the given channel
    pub fn new(channel: Channel, code: DeviceCode, callback: impl Into<CallbackId>) -> Self {
        Self {
            channel,
            code,
            callback: callback.into(),
            scope: Scope::Local,
        }
    }

    /// Local binding on key press
    pub fn key(code: DeviceCode, callback: impl Into<CallbackId>) -> Self {
        Self::new(Channel::KeyPressed, code, callback)
    }

    /// Local binding on pointer button press
    pub fn pointer(code: DeviceCode, callback: impl Into<CallbackId>) -> Self {
        Self::new(Channel::PointerPressed, code, callback)
    }

    pub fn global(mut self) -> Self {
        self.scope = Scope::Global;
        self
    }
}

/// Bindings and action mappings applied together by `InputRouter::load_config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub bind: Vec<BindSpec>,
    pub map: IndexMap<String, ActionMapping>,
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, spec: BindSpec) -> Self {
        self.bind.push(spec);
        self
    }

    /// Adds one device entry to an action, merging with earlier entries
    pub fn map(mut self, action: impl Into<String>, kind: DeviceKind, code: DeviceCode) -> Self {
        self.map.entry(action.into()).or_default().set(kind, Some(code));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bind.is_empty() && self.map.is_empty()
    }
}
