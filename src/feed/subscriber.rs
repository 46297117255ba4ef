//! Explicit channel subscription handles.
//!
//! Each monitored channel gets one subscription when the dashboard mounts
//! and exactly one release when it unmounts. The handles live in a map so
//! teardown is deterministic: after `unsubscribe_all()` no delivered event
//! may reach a buffer, even if the transport still has events in flight.

use std::collections::HashMap;

use tracing::debug;

use super::Channel;

/// Identifier for one channel subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of active channel subscriptions.
///
/// The set decides whether a delivered event is still wanted; dispatch
/// consults [`SubscriptionSet::is_active`] before touching any state.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    handles: HashMap<Channel, SubscriptionId>,
    next_id: u64,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription for `channel`, returning its handle.
    ///
    /// Subscribing an already-subscribed channel replaces the old handle,
    /// so a remount can never leak a registration.
    pub fn subscribe(&mut self, channel: Channel) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handles.insert(channel, id);
        debug!("Subscribed to '{}' ({:?})", channel.path(), id);
        id
    }

    /// Subscribe to every monitored channel.
    pub fn subscribe_all(&mut self) {
        for channel in Channel::ALL {
            self.subscribe(channel);
        }
    }

    /// Release the subscription for `channel`, if any.
    pub fn unsubscribe(&mut self, channel: Channel) {
        if let Some(id) = self.handles.remove(&channel) {
            debug!("Unsubscribed from '{}' ({:?})", channel.path(), id);
        }
    }

    /// Release every subscription. Idempotent.
    pub fn unsubscribe_all(&mut self) {
        for channel in Channel::ALL {
            self.unsubscribe(channel);
        }
    }

    /// True if `channel` currently has an active subscription.
    pub fn is_active(&self, channel: Channel) -> bool {
        self.handles.contains_key(&channel)
    }

    /// Number of active subscriptions.
    pub fn active_count(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_all_covers_every_channel() {
        let mut subs = SubscriptionSet::new();
        subs.subscribe_all();

        assert_eq!(subs.active_count(), Channel::ALL.len());
        for channel in Channel::ALL {
            assert!(subs.is_active(channel));
        }
    }

    #[test]
    fn test_unsubscribe_all_releases_everything() {
        let mut subs = SubscriptionSet::new();
        subs.subscribe_all();
        subs.unsubscribe_all();

        assert_eq!(subs.active_count(), 0);
        for channel in Channel::ALL {
            assert!(!subs.is_active(channel));
        }

        // Idempotent.
        subs.unsubscribe_all();
        assert_eq!(subs.active_count(), 0);
    }

    #[test]
    fn test_resubscribe_replaces_handle() {
        let mut subs = SubscriptionSet::new();
        let first = subs.subscribe(Channel::Humidity);
        let second = subs.subscribe(Channel::Humidity);

        assert_ne!(first, second);
        assert_eq!(subs.active_count(), 1);
    }

    #[test]
    fn test_single_unsubscribe_leaves_others_active() {
        let mut subs = SubscriptionSet::new();
        subs.subscribe_all();
        subs.unsubscribe(Channel::GasWarning);

        assert!(!subs.is_active(Channel::GasWarning));
        assert!(subs.is_active(Channel::Humidity));
        assert_eq!(subs.active_count(), 3);
    }
}
