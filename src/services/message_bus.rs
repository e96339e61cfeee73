//! Channel-partitioned publish/subscribe bus for notification messages.

use dashmap::DashMap;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::config::BusConfig;
use crate::types::{Message, Severity};

/// Delivery flags for the publishing helpers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub auto_close: bool,
    pub keep_after_route_change: bool,
}

/// What happened to a published message.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PublishReport {
    /// Live subscribers that received it.
    pub delivered: usize,
    /// Held for the next subscriber because nobody was listening.
    pub buffered: bool,
}

/// A live subscription to one channel.
///
/// Dropping it stops delivery as well; the bus prunes the dead sender on the
/// next publish.
pub struct Subscription {
    id: Uuid,
    channel: String,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Wait for the next message. Returns `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Message> {
        self.rx.try_recv().ok()
    }
}

#[derive(Default)]
struct ChannelState {
    subscribers: HashMap<Uuid, mpsc::UnboundedSender<Message>>,
    pending: VecDeque<Message>,
}

impl ChannelState {
    fn is_idle(&self) -> bool {
        self.subscribers.is_empty() && self.pending.is_empty()
    }
}

/// Publish/subscribe bus partitioned by channel.
pub struct MessageBus {
    channels: DashMap<String, ChannelState>,
    buffer_limit: usize,
}

impl MessageBus {
    /// Create a new bus.
    pub fn new(config: &BusConfig) -> Arc<Self> {
        Arc::new(Self {
            channels: DashMap::new(),
            buffer_limit: config.buffer_limit,
        })
    }

    /// Subscribe to a channel. Messages buffered while the channel had no
    /// listener are replayed first, in publish order.
    pub fn subscribe(&self, channel: &str) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        let mut state = self.channels.entry(channel.to_string()).or_default();
        let replayed = state.pending.len();
        for message in state.pending.drain(..) {
            let _ = tx.send(message);
        }
        state.subscribers.insert(id, tx);
        drop(state);

        debug!(
            "Subscription {} opened on '{}' ({} replayed)",
            id, channel, replayed
        );

        Subscription {
            id,
            channel: channel.to_string(),
            rx,
        }
    }

    /// Stop delivery to a subscription.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        self.unsubscribe_id(&subscription.channel, subscription.id)
    }

    /// Stop delivery to the subscription with this id.
    pub fn unsubscribe_id(&self, channel: &str, id: Uuid) -> bool {
        let removed = self
            .channels
            .get_mut(channel)
            .map(|mut state| state.subscribers.remove(&id).is_some())
            .unwrap_or(false);

        self.channels.remove_if(channel, |_, state| state.is_idle());

        if removed {
            debug!("Subscription {} closed on '{}'", id, channel);
        }
        removed
    }

    /// Drop anything the bus holds for a channel.
    pub fn clear(&self, channel: &str) {
        if let Some(mut state) = self.channels.get_mut(channel) {
            let dropped = state.pending.len();
            state.pending.clear();
            if dropped > 0 {
                debug!("Cleared {} pending messages on '{}'", dropped, channel);
            }
        }
        self.channels.remove_if(channel, |_, state| state.is_idle());
    }

    /// Publish a message on its channel.
    pub fn publish(&self, message: Message) -> PublishReport {
        let channel = message.channel_id.clone();
        let mut state = self.channels.entry(channel.clone()).or_default();

        state
            .subscribers
            .retain(|_, tx| tx.send(message.clone()).is_ok());
        let delivered = state.subscribers.len();

        // A clear-signal only concerns current listeners.
        let buffered = delivered == 0 && !message.is_clear_signal() && self.buffer_limit > 0;
        if buffered {
            state.pending.push_back(message);
            while state.pending.len() > self.buffer_limit {
                state.pending.pop_front();
            }
        }
        let idle = state.is_idle();
        drop(state);

        if idle {
            self.channels.remove_if(&channel, |_, state| state.is_idle());
        }

        debug!(
            "Published on '{}': delivered={}, buffered={}",
            channel, delivered, buffered
        );

        PublishReport {
            delivered,
            buffered,
        }
    }

    pub fn success(&self, channel: &str, lead: &str, text: &str, options: Options) -> PublishReport {
        self.publish_with(channel, Severity::Success, lead, text, options)
    }

    pub fn error(&self, channel: &str, lead: &str, text: &str, options: Options) -> PublishReport {
        self.publish_with(channel, Severity::Danger, lead, text, options)
    }

    pub fn info(&self, channel: &str, lead: &str, text: &str, options: Options) -> PublishReport {
        self.publish_with(channel, Severity::Info, lead, text, options)
    }

    /// Ask the channel's subscribers to sweep their non-persistent banners.
    pub fn clear_signal(&self, channel: &str) -> PublishReport {
        self.publish(Message::clear_signal(channel))
    }

    fn publish_with(
        &self,
        channel: &str,
        severity: Severity,
        lead: &str,
        text: &str,
        options: Options,
    ) -> PublishReport {
        self.publish(
            Message::new(channel, severity, lead, text)
                .with_auto_close(options.auto_close)
                .with_keep_after_route_change(options.keep_after_route_change),
        )
    }

    /// Number of live subscriptions on a channel.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .get(channel)
            .map(|state| state.subscribers.len())
            .unwrap_or(0)
    }

    /// Number of messages waiting for a subscriber on a channel.
    pub fn pending_count(&self, channel: &str) -> usize {
        self.channels
            .get(channel)
            .map(|state| state.pending.len())
            .unwrap_or(0)
    }

    /// Channels that currently hold subscribers or pending messages.
    pub fn channels(&self) -> Vec<String> {
        let mut channels: Vec<String> = self.channels.iter().map(|c| c.key().clone()).collect();
        channels.sort();
        channels
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self {
            channels: DashMap::new(),
            buffer_limit: BusConfig::default().buffer_limit,
        }
    }
}
