//! Binding table: scope × channel × code → callback

use std::collections::BTreeMap;

use enum_map::EnumMap;

use super::callback::{Callback, CallbackId};
use super::events::{Channel, DeviceCode, Scope};

/// Flattened view of one binding, used for comparisons and dumps
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BindingEntry {
    pub scope: Scope,
    pub channel: Channel,
    pub code: DeviceCode,
    pub callback: CallbackId,
}

/// At most one callback per (scope, channel, code)
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    tables: EnumMap<Scope, EnumMap<Channel, BTreeMap<DeviceCode, Callback>>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a binding, returning the callback it replaced
    pub fn insert(
        &mut self,
        scope: Scope,
        channel: Channel,
        code: DeviceCode,
        callback: Callback,
    ) -> Option<Callback> {
        self.tables[scope][channel].insert(code, callback)
    }

    pub fn remove(&mut self, scope: Scope, channel: Channel, code: DeviceCode) -> Option<Callback> {
        self.tables[scope][channel].remove(&code)
    }

    pub fn get(&self, scope: Scope, channel: Channel, code: DeviceCode) -> Option<&Callback> {
        self.tables[scope][channel].get(&code)
    }

    /// Finds the callback an event should run
    ///
    /// Local bindings shadow global ones.
    pub fn resolve(&self, channel: Channel, code: DeviceCode) -> Option<(Scope, &Callback)> {
        [Scope::Local, Scope::Global]
            .into_iter()
            .find_map(|scope| self.get(scope, channel, code).map(|cb| (scope, cb)))
    }

    pub fn clear_scope(&mut self, scope: Scope) {
        for (_, codes) in self.tables[scope].iter_mut() {
            codes.clear();
        }
    }

    pub fn clear(&mut self) {
        self.clear_scope(Scope::Local);
        self.clear_scope(Scope::Global);
    }

    pub fn len(&self, scope: Scope) -> usize {
        self.tables[scope].values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len(Scope::Local) == 0 && self.len(Scope::Global) == 0
    }

    /// All bindings ordered by scope, channel, then code
    pub fn entries(&self) -> Vec<BindingEntry> {
        let mut entries = Vec::new();
        for (scope, channels) in &self.tables {
            for (channel, codes) in channels {
                for (code, callback) in codes {
                    entries.push(BindingEntry {
                        scope,
                        channel,
                        code: *code,
                        callback: callback.id().clone(),
                    });
                }
            }
        }
        entries
    }
}
