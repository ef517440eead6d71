//! Callbacks with stable identity
//!
//! Closures cannot be compared, so every callback carries a [`CallbackId`]
//! token chosen by the caller. The token is what bindings, persisted
//! rebinds and declarative configs refer to.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::error::InputError;

/// Stable identity token of a callback
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(String);

impl CallbackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for CallbackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CallbackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type CallbackFn = dyn Fn() -> anyhow::Result<()>;

/// Zero-argument side-effecting action, shared between tables
#[derive(Clone)]
pub struct Callback {
    id: CallbackId,
    func: Rc<CallbackFn>,
}

impl Callback {
    /// Wraps a closure under the given identity
    pub fn new<F>(id: impl Into<CallbackId>, func: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        Self {
            id: id.into(),
            func: Rc::new(func),
        }
    }

    pub fn id(&self) -> &CallbackId {
        &self.id
    }

    /// Runs the callback, containing any failure
    ///
    /// Errors and panics are logged and reported as `false`; they never reach
    /// the caller. A failing callback must not stall the rest of the frame.
    pub fn invoke(&self) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.func)())) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                error!(callback = %self.id, error = %e, "Callback failed");
                false
            }
            Err(payload) => {
                error!(
                    callback = %self.id,
                    panic = panic_message(payload.as_ref()),
                    "Callback panicked"
                );
                false
            }
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.id.0).finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

/// Named callbacks that declarative configs can refer to by id
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: IndexMap<CallbackId, Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback, replacing any previous one with the same id
    pub fn register(&mut self, callback: Callback) -> Option<Callback> {
        self.callbacks.insert(callback.id.clone(), callback)
    }

    pub fn get(&self, id: &CallbackId) -> Option<&Callback> {
        self.callbacks.get(id)
    }

    /// Strict lookup used when applying configs
    pub fn resolve(&self, id: &CallbackId) -> Result<Callback, InputError> {
        self.callbacks
            .get(id)
            .cloned()
            .ok_or_else(|| InputError::InvalidCallback(format!("no callback registered as '{id}'")))
    }

    pub fn remove(&mut self, id: &CallbackId) -> Option<Callback> {
        self.callbacks.shift_remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &CallbackId> {
        self.callbacks.keys()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
