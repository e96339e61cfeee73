//! Ordered queue of active banners for one channel.

use crate::types::{Banner, InstanceId, Message};

/// Outcome of feeding one bus message into the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    /// A banner was appended under this id.
    Queued(InstanceId),
    /// A clear-signal removed these banners.
    Swept { removed: Vec<InstanceId> },
}

/// Banners in display order.
///
/// Ids come from a counter owned by the queue and are never reused, even
/// across [`NotificationQueue::reset`].
#[derive(Debug, Default)]
pub struct NotificationQueue {
    banners: Vec<Banner>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a bus message: clear-signals sweep, everything else is appended.
    pub fn apply(&mut self, message: Message) -> QueueEvent {
        let id = InstanceId(self.next_id + 1);
        match Banner::from_message(id, message) {
            Some(banner) => {
                self.next_id = id.0;
                self.banners.push(banner);
                QueueEvent::Queued(id)
            }
            None => QueueEvent::Swept {
                removed: self.sweep(),
            },
        }
    }

    /// Drop every banner not flagged to survive a route change, and clear
    /// the flag on the survivors so the next sweep removes them.
    pub fn sweep(&mut self) -> Vec<InstanceId> {
        let mut removed = Vec::new();
        self.banners.retain_mut(|banner| {
            if banner.keep_after_route_change {
                banner.keep_after_route_change = false;
                true
            } else {
                removed.push(banner.instance_id);
                false
            }
        });
        removed
    }

    /// Remove the banner with this id. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: InstanceId) -> Option<Banner> {
        let position = self.banners.iter().position(|b| b.instance_id == id)?;
        Some(self.banners.remove(position))
    }

    /// Remove all banners; the id counter keeps going.
    pub fn reset(&mut self) {
        self.banners.clear();
    }

    pub fn get(&self, id: InstanceId) -> Option<&Banner> {
        self.banners.iter().find(|b| b.instance_id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn msg(text: &str) -> Message {
        Message::new("test", Severity::Info, "Lead", text)
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut queue = NotificationQueue::new();
        let a = queue.apply(msg("a"));
        let b = queue.apply(msg("b"));
        assert_eq!(a, QueueEvent::Queued(InstanceId(1)));
        assert_eq!(b, QueueEvent::Queued(InstanceId(2)));
    }

    #[test]
    fn test_reset_keeps_counter() {
        let mut queue = NotificationQueue::new();
        queue.apply(msg("a"));
        queue.reset();
        assert!(queue.is_empty());
        assert_eq!(queue.apply(msg("b")), QueueEvent::Queued(InstanceId(2)));
    }

    #[test]
    fn test_clear_signal_is_not_stored() {
        let mut queue = NotificationQueue::new();
        let event = queue.apply(Message::clear_signal("test"));
        assert_eq!(event, QueueEvent::Swept { removed: vec![] });
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_unknown_is_noop() {
        let mut queue = NotificationQueue::new();
        queue.apply(msg("a"));
        assert!(queue.dismiss(InstanceId(42)).is_none());
        assert_eq!(queue.len(), 1);
    }
}
