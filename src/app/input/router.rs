//! Input router: device state, callback bindings and action polling

use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, trace};

use super::actions::{ActionMap, ActionMapping};
use super::bindings::{BindingEntry, BindingTable};
use super::callback::{Callback, CallbackRegistry};
use super::config::InputConfig;
use super::error::InputError;
use super::events::{Channel, DeviceCode, DeviceKind, Scope, Transition};
use super::snapshot::{BindRecord, PersistedSnapshot};
use super::state::DeviceState;

/// Turns raw device transitions into callbacks and answers action queries
///
/// Owns the device state store, the binding table, the action map and the
/// persisted snapshot. None of them can be mutated from outside except
/// through the methods below.
#[derive(Debug, Default)]
pub struct InputRouter {
    state: DeviceState,
    bindings: BindingTable,
    actions: ActionMap,
    snapshot: PersistedSnapshot,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the callback for (scope, channel, code)
    ///
    /// Every successful bind is recorded in the persisted snapshot.
    pub fn bind_callback(
        &mut self,
        scope: Scope,
        channel: Channel,
        code: DeviceCode,
        callback: Callback,
    ) -> Result<(), InputError> {
        if callback.id().is_empty() {
            return Err(InputError::InvalidCallback(
                "callback identity must not be empty".to_string(),
            ));
        }

        let id = callback.id().clone();
        if let Some(old) = self.bindings.insert(scope, channel, code, callback) {
            trace!(%scope, %channel, %code, replaced = %old.id(), "Binding replaced");
        }
        debug!(%scope, %channel, %code, callback = %id, "Callback bound");

        self.snapshot.record_bind(BindRecord {
            callback: id,
            scope,
            channel,
            code,
        });
        Ok(())
    }

    pub fn unbind(&mut self, scope: Scope, channel: Channel, code: DeviceCode) -> Option<Callback> {
        self.bindings.remove(scope, channel, code)
    }

    /// Replaces the entire mapping of `action` with a single device entry
    pub fn map_action(&mut self, action: impl Into<String>, kind: DeviceKind, code: DeviceCode) {
        self.map_action_all(action, ActionMapping::single(kind, code));
    }

    /// Replaces the entire mapping of `action`
    pub fn map_action_all(&mut self, action: impl Into<String>, mapping: ActionMapping) {
        let action = action.into();
        debug!(action = %action, ?mapping, "Action mapped");
        self.snapshot.record_mapping(action.clone(), mapping);
        self.actions.insert(action, mapping);
    }

    pub fn unmap_action(&mut self, action: &str) -> Option<ActionMapping> {
        self.actions.remove(action)
    }

    /// Processes one device transition
    ///
    /// The state store is written first, unconditionally. Then at most one
    /// callback runs: the local binding if there is one, otherwise the
    /// global one. Callback failures are logged and swallowed. Returns the
    /// scope of the binding that ran.
    pub fn dispatch(
        &mut self,
        kind: DeviceKind,
        code: DeviceCode,
        transition: Transition,
    ) -> Option<Scope> {
        self.state.apply(kind, code, transition);

        let channel = Channel::new(kind, transition);
        let (scope, callback) = self
            .bindings
            .resolve(channel, code)
            .map(|(scope, cb)| (scope, cb.clone()))?;

        trace!(%channel, %code, %scope, callback = %callback.id(), "Dispatching");
        callback.invoke();
        Some(scope)
    }

    /// True iff any device mapped to `action` is held; false for unmapped actions
    pub fn is_action_active(&self, action: &str) -> bool {
        self.actions.is_active(action, &self.state)
    }

    /// True iff a device mapped to `action` went down since the last frame advance
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.actions.is_just_pressed(action, &self.state)
    }

    pub fn is_pressed(&self, kind: DeviceKind, code: DeviceCode) -> bool {
        self.state.is_pressed(kind, code)
    }

    /// Settles press/release edges; call once per frame after polling
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Applies a declarative description
    ///
    /// Codes the user rebound since an earlier load win over the declared
    /// defaults: per callback and channel for bindings, and as a whole
    /// mapping for actions. Every callback is resolved before anything is
    /// applied, so a config naming an unknown callback changes nothing.
    pub fn load_config(
        &mut self,
        config: &InputConfig,
        callbacks: &CallbackRegistry,
    ) -> Result<(), InputError> {
        let resolved = config
            .bind
            .iter()
            .map(|spec| callbacks.resolve(&spec.callback).map(|cb| (spec, cb)))
            .collect::<Result<Vec<_>, _>>()?;

        for (spec, callback) in resolved {
            let code = self
                .snapshot
                .bound_code(&spec.callback, spec.channel)
                .unwrap_or(spec.code);
            if code != spec.code {
                debug!(callback = %spec.callback, declared = %spec.code, %code, "Keeping rebound code");
            }
            self.bind_callback(spec.scope, spec.channel, code, callback)?;
        }

        for (action, declared) in &config.map {
            let mapping = match self.snapshot.mapping(action) {
                Some(persisted) => {
                    if persisted != declared {
                        debug!(action = %action, ?persisted, "Keeping rebound mapping");
                    }
                    *persisted
                }
                None => *declared,
            };
            self.map_action_all(action.clone(), mapping);
        }

        Ok(())
    }

    /// Drops every scene-scoped binding
    pub fn clear_local_bindings(&mut self) {
        self.bindings.clear_scope(Scope::Local);
        debug!("Local bindings cleared");
    }

    pub fn clear_all_bindings(&mut self) {
        self.bindings.clear();
        debug!("All bindings cleared");
    }

    /// Full reset: bindings, actions, device state and the persisted snapshot
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.actions.clear();
        self.state.clear();
        self.snapshot.clear();
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn binding_entries(&self) -> Vec<BindingEntry> {
        self.bindings.entries()
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    pub fn snapshot(&self) -> &PersistedSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Human-readable dump of bindings, mappings and held devices
    pub fn debug_dump(&self) -> String {
        let mut bindings = Builder::default();
        bindings.push_record(["Scope", "Channel", "Code", "Callback"]);
        for entry in self.bindings.entries() {
            bindings.push_record([
                entry.scope.to_string(),
                entry.channel.to_string(),
                entry.code.to_string(),
                entry.callback.to_string(),
            ]);
        }

        let mut actions = Builder::default();
        actions.push_record(["Action", "Key", "Pointer", "Active"]);
        for (name, mapping) in self.actions.iter() {
            actions.push_record([
                name.to_string(),
                format_code(mapping.key),
                format_code(mapping.pointer),
                self.is_action_active(name).to_string(),
            ]);
        }

        let mut bindings = bindings.build();
        bindings.with(Style::rounded());
        let mut actions = actions.build();
        actions.with(Style::rounded());

        format!(
            "Bindings:\n{bindings}\nActions:\n{actions}\nHeld keys: [{}]\nHeld pointer buttons: [{}]\n",
            join_codes(self.state.held(DeviceKind::Key)),
            join_codes(self.state.held(DeviceKind::Pointer)),
        )
    }
}

fn format_code(code: Option<DeviceCode>) -> String {
    code.map_or_else(|| "-".to_string(), |c| c.to_string())
}

fn join_codes(codes: impl Iterator<Item = DeviceCode>) -> String {
    codes.map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::app::input::config::BindSpec;
    use crate::app::input::events::keys;

    fn recorder(id: &str, log: &Rc<RefCell<Vec<String>>>) -> Callback {
        let log = log.clone();
        let name = id.to_string();
        Callback::new(id, move || {
            log.borrow_mut().push(name.clone());
            Ok(())
        })
    }

    #[test]
    fn test_dispatch_runs_only_local_when_shadowed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = InputRouter::new();
        router
            .bind_callback(Scope::Global, Channel::KeyPressed, keys::ENTER, recorder("global", &log))
            .unwrap();
        router
            .bind_callback(Scope::Local, Channel::KeyPressed, keys::ENTER, recorder("local", &log))
            .unwrap();

        let scope = router.dispatch(DeviceKind::Key, keys::ENTER, Transition::Pressed);

        assert_eq!(scope, Some(Scope::Local));
        assert_eq!(*log.borrow(), vec!["local".to_string()]);
    }

    #[test]
    fn test_dispatch_respects_channel() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = InputRouter::new();
        router
            .bind_callback(Scope::Local, Channel::KeyReleased, keys::A, recorder("up", &log))
            .unwrap();

        assert_eq!(router.dispatch(DeviceKind::Key, keys::A, Transition::Pressed), None);
        assert_eq!(
            router.dispatch(DeviceKind::Key, keys::A, Transition::Released),
            Some(Scope::Local)
        );
        assert_eq!(
            router.dispatch(DeviceKind::Pointer, keys::A, Transition::Released),
            None
        );
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_failing_callback_still_updates_state() {
        let mut router = InputRouter::new();
        router
            .bind_callback(
                Scope::Local,
                Channel::KeyPressed,
                keys::SPACE,
                Callback::new("explodes", || panic!("callback bug")),
            )
            .unwrap();
        router.map_action("jump", DeviceKind::Key, keys::SPACE);

        router.dispatch(DeviceKind::Key, keys::SPACE, Transition::Pressed);

        assert!(router.is_pressed(DeviceKind::Key, keys::SPACE));
        assert!(router.is_action_active("jump"));
    }

    #[test]
    fn test_empty_callback_id_rejected() {
        let mut router = InputRouter::new();
        let result = router.bind_callback(
            Scope::Local,
            Channel::KeyPressed,
            keys::A,
            Callback::new("  ", || Ok(())),
        );

        assert!(matches!(result, Err(InputError::InvalidCallback(_))));
        assert!(router.bindings().is_empty());
        assert!(router.snapshot().bind_log().is_empty());
    }

    #[test]
    fn test_action_polling_follows_press_and_release() {
        let mut router = InputRouter::new();
        router.map_action("left", DeviceKind::Key, keys::LEFT);

        router.dispatch(DeviceKind::Key, keys::LEFT, Transition::Pressed);
        assert!(router.is_action_active("left"));
        assert!(router.is_action_just_pressed("left"));

        router.advance_frame();
        assert!(router.is_action_active("left"));
        assert!(!router.is_action_just_pressed("left"));

        router.dispatch(DeviceKind::Key, keys::LEFT, Transition::Released);
        assert!(!router.is_action_active("left"));
        assert!(!router.is_action_active("undefined_action"));
    }

    #[test]
    fn test_load_config_keeps_rebound_callback_code() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = CallbackRegistry::new();
        callbacks.register(recorder("pause", &log));
        let config = InputConfig::new().bind(BindSpec::key(keys::P, "pause"));

        let mut router = InputRouter::new();
        router.load_config(&config, &callbacks).unwrap();
        router.clear_local_bindings();
        router
            .bind_callback(Scope::Local, Channel::KeyPressed, keys::ESCAPE, recorder("pause", &log))
            .unwrap();
        router.clear_local_bindings();

        router.load_config(&config, &callbacks).unwrap();

        assert!(router.bindings().get(Scope::Local, Channel::KeyPressed, keys::P).is_none());
        assert!(
            router
                .bindings()
                .get(Scope::Local, Channel::KeyPressed, keys::ESCAPE)
                .is_some()
        );
    }

    #[test]
    fn test_load_config_unknown_callback_applies_nothing() {
        let callbacks = CallbackRegistry::new();
        let config = InputConfig::new()
            .map("jump", DeviceKind::Key, keys::SPACE)
            .bind(BindSpec::key(keys::Q, "quit"));

        let mut router = InputRouter::new();
        let result = router.load_config(&config, &callbacks);

        assert!(matches!(result, Err(InputError::InvalidCallback(_))));
        assert!(router.actions().is_empty());
        assert!(router.bindings().is_empty());
    }

    #[test]
    fn test_clear_all_and_reset() {
        let mut router = InputRouter::new();
        router
            .bind_callback(Scope::Global, Channel::KeyPressed, keys::Q, Callback::new("q", || Ok(())))
            .unwrap();
        router.map_action("jump", DeviceKind::Key, keys::SPACE);
        router.dispatch(DeviceKind::Key, keys::SPACE, Transition::Pressed);

        router.clear_local_bindings();
        assert_eq!(router.bindings().len(Scope::Global), 1);

        router.clear_all_bindings();
        assert!(router.bindings().is_empty());
        assert!(router.is_action_active("jump"));

        router.reset();
        assert!(!router.is_action_active("jump"));
        assert!(router.snapshot().bind_log().is_empty());
    }

    #[test]
    fn test_debug_dump_lists_everything() {
        let mut router = InputRouter::new();
        router
            .bind_callback(Scope::Global, Channel::KeyPressed, keys::UP, Callback::new("focus_prev", || Ok(())))
            .unwrap();
        router.map_action("jump", DeviceKind::Key, keys::SPACE);
        router.dispatch(DeviceKind::Key, keys::SPACE, Transition::Pressed);

        let dump = router.debug_dump();
        assert!(dump.contains("focus_prev"));
        assert!(dump.contains("jump"));
        assert!(dump.contains("Held keys: [32]"));
    }
}
