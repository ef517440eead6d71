//! Input router health check

use std::cell::Cell;
use std::rc::Rc;

use crate::app::input::{
    Callback, CallbackRegistry, Channel, DeviceKind, InputConfig, InputRouter, Scope, Transition, keys,
};
use crate::health::check::{CheckResult, SystemCheck};

/// Exercises binding precedence, action polling and reload persistence
pub struct InputRouterCheck;

impl InputRouterCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InputRouterCheck {
    fn default() -> Self {
        Self::new()
    }
}

fn counting(id: &str) -> (Callback, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    let callback = Callback::new(id, move || {
        inner.set(inner.get() + 1);
        Ok(())
    });
    (callback, count)
}

impl SystemCheck for InputRouterCheck {
    fn name(&self) -> &'static str {
        "Input Router"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates callback precedence, action polling and rebinding across reloads")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut router = InputRouter::new();

        // Local shadows global
        let (global, global_hits) = counting("health_global");
        let (local, local_hits) = counting("health_local");
        let bound = router
            .bind_callback(Scope::Global, Channel::KeyPressed, keys::ENTER, global)
            .and_then(|_| router.bind_callback(Scope::Local, Channel::KeyPressed, keys::ENTER, local));
        if let Err(e) = bound {
            return CheckResult::fail(format!("Binding failed: {e}"));
        }
        router.dispatch(DeviceKind::Key, keys::ENTER, Transition::Pressed);
        if local_hits.get() != 1 || global_hits.get() != 0 {
            details.push("  ✗ Local binding did not shadow global".to_string());
            return CheckResult::fail("Binding precedence broken").with_details(details.join("\n"));
        }
        details.push("  ✓ Local bindings shadow global".to_string());

        // Action polling
        router.map_action("health_left", DeviceKind::Key, keys::LEFT);
        router.dispatch(DeviceKind::Key, keys::LEFT, Transition::Pressed);
        let held = router.is_action_active("health_left");
        router.dispatch(DeviceKind::Key, keys::LEFT, Transition::Released);
        if !held || router.is_action_active("health_left") || router.is_action_active("health_missing") {
            details.push("  ✗ Action polling mismatch".to_string());
            return CheckResult::fail("Action polling broken").with_details(details.join("\n"));
        }
        details.push("  ✓ Action polling follows press/release".to_string());

        // Rebinding survives reload
        let config = InputConfig::new().map("health_jump", DeviceKind::Key, keys::SPACE);
        let callbacks = CallbackRegistry::new();
        let reloaded = router
            .load_config(&config, &callbacks)
            .map(|_| router.map_action("health_jump", DeviceKind::Key, keys::W))
            .and_then(|_| router.load_config(&config, &callbacks));
        if let Err(e) = reloaded {
            return CheckResult::fail(format!("Config load failed: {e}"));
        }
        let code = router
            .actions()
            .get("health_jump")
            .and_then(|m| m.get(DeviceKind::Key));
        if code != Some(keys::W) {
            details.push(format!("  ✗ Rebinding lost on reload (got {code:?})"));
            return CheckResult::warn("Rebinding did not survive reload").with_details(details.join("\n"));
        }
        details.push("  ✓ Rebinding survives reload".to_string());

        CheckResult::pass("Input routing operational").with_details(details.join("\n"))
    }
}
