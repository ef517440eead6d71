//! Record of the most recent real bindings, consulted on reload

use indexmap::IndexMap;

use super::actions::ActionMapping;
use super::callback::CallbackId;
use super::events::{Channel, DeviceCode, DeviceKind, Scope};

/// One successful bind request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRecord {
    pub callback: CallbackId,
    pub scope: Scope,
    pub channel: Channel,
    pub code: DeviceCode,
}

/// In-memory memory of rebinds that survives `load_config`
///
/// Bind requests form an append-only log; action mappings keep only the
/// latest mapping per name.
#[derive(Debug, Clone, Default)]
pub struct PersistedSnapshot {
    binds: Vec<BindRecord>,
    actions: IndexMap<String, ActionMapping>,
}

impl PersistedSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bind record
    ///
    /// A record identical to the latest one for the same callback and
    /// channel is not appended again, so repeated reloads don't grow the log.
    pub fn record_bind(&mut self, record: BindRecord) {
        let latest = self
            .binds
            .iter()
            .rev()
            .find(|r| r.callback == record.callback && r.channel == record.channel);
        if latest != Some(&record) {
            self.binds.push(record);
        }
    }

    pub fn record_mapping(&mut self, action: impl Into<String>, mapping: ActionMapping) {
        self.actions.insert(action.into(), mapping);
    }

    /// Code this callback was most recently bound to on this channel
    pub fn bound_code(&self, callback: &CallbackId, channel: Channel) -> Option<DeviceCode> {
        self.binds
            .iter()
            .rev()
            .find(|r| &r.callback == callback && r.channel == channel)
            .map(|r| r.code)
    }

    pub fn mapping(&self, action: &str) -> Option<&ActionMapping> {
        self.actions.get(action)
    }

    /// Code an action was most recently mapped to for one device kind
    pub fn mapped_code(&self, action: &str, kind: DeviceKind) -> Option<DeviceCode> {
        self.mapping(action).and_then(|mapping| mapping.get(kind))
    }

    pub fn bind_log(&self) -> &[BindRecord] {
        &self.binds
    }

    pub fn clear(&mut self) {
        self.binds.clear();
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(callback: &str, channel: Channel, code: u32) -> BindRecord {
        BindRecord {
            callback: callback.into(),
            scope: Scope::Local,
            channel,
            code: DeviceCode(code),
        }
    }

    #[test]
    fn test_latest_bind_wins() {
        let mut snapshot = PersistedSnapshot::new();
        snapshot.record_bind(record("jump", Channel::KeyPressed, 32));
        snapshot.record_bind(record("jump", Channel::KeyPressed, 87));

        assert_eq!(
            snapshot.bound_code(&"jump".into(), Channel::KeyPressed),
            Some(DeviceCode(87))
        );
        assert_eq!(snapshot.bound_code(&"jump".into(), Channel::PointerPressed), None);
    }

    #[test]
    fn test_repeated_record_not_appended() {
        let mut snapshot = PersistedSnapshot::new();
        snapshot.record_bind(record("jump", Channel::KeyPressed, 32));
        snapshot.record_bind(record("jump", Channel::KeyPressed, 32));
        assert_eq!(snapshot.bind_log().len(), 1);

        snapshot.record_bind(record("jump", Channel::KeyPressed, 87));
        snapshot.record_bind(record("jump", Channel::KeyPressed, 32));
        assert_eq!(snapshot.bind_log().len(), 3);
    }

    #[test]
    fn test_mapped_code_per_kind() {
        let mut snapshot = PersistedSnapshot::new();
        snapshot.record_mapping("jump", ActionMapping::key(DeviceCode(87)));

        assert_eq!(snapshot.mapped_code("jump", DeviceKind::Key), Some(DeviceCode(87)));
        assert_eq!(snapshot.mapped_code("jump", DeviceKind::Pointer), None);
        assert_eq!(snapshot.mapped_code("left", DeviceKind::Key), None);
    }
}
