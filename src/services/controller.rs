//! Banner controller: keeps the active banners of one channel in sync with
//! the message bus, navigation, dismissals and auto-close timers.
//!
//! A controller is inert until [`BannerController::mount`]. Each mount opens a
//! new bus subscription and starts a new *session*; everything scheduled by a
//! session (delivery pump, auto-close timers) is tagged with its generation
//! and becomes a no-op once that session ends, in addition to being aborted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};
use uuid::Uuid;

use super::location::LocationProvider;
use super::message_bus::MessageBus;
use super::queue::{NotificationQueue, QueueEvent};
use crate::types::{Banner, BannerView, InstanceId, Message, DEFAULT_CHANNEL};

/// Dwell interval used when none is configured.
pub const DEFAULT_DWELL: Duration = Duration::from_millis(7000);

struct Session {
    generation: u64,
    subscription_id: Uuid,
    pump: AbortHandle,
}

#[derive(Default)]
struct State {
    queue: NotificationQueue,
    timers: HashMap<InstanceId, AbortHandle>,
    session: Option<Session>,
    generation: u64,
    location: Option<String>,
}

impl State {
    fn is_live(&self, generation: u64) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| session.generation == generation)
    }

    fn cancel_timer(&mut self, id: InstanceId) {
        if let Some(timer) = self.timers.remove(&id) {
            timer.abort();
        }
    }
}

struct Inner {
    bus: Arc<MessageBus>,
    channel: String,
    dwell: Duration,
    state: Mutex<State>,
    snapshot: watch::Sender<Vec<Banner>>,
}

/// Displays the live banners of one bus channel.
pub struct BannerController {
    inner: Arc<Inner>,
}

impl BannerController {
    /// Create an unmounted controller for `channel`.
    pub fn new(bus: Arc<MessageBus>, channel: impl Into<String>, dwell: Duration) -> Self {
        let (snapshot, _rx) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                bus,
                channel: channel.into(),
                dwell,
                state: Mutex::new(State::default()),
                snapshot,
            }),
        }
    }

    /// Controller on the default channel with the default dwell interval.
    pub fn with_defaults(bus: Arc<MessageBus>) -> Self {
        Self::new(bus, DEFAULT_CHANNEL, DEFAULT_DWELL)
    }

    pub fn channel(&self) -> &str {
        &self.inner.channel
    }

    pub fn dwell(&self) -> Duration {
        self.inner.dwell
    }

    /// Subscribe to the bus and start from an empty queue.
    ///
    /// Must be called from within a tokio runtime. Returns `false` if the
    /// controller was already mounted.
    pub fn mount(&self) -> bool {
        self.inner.mount()
    }

    /// Stop reacting to timers, release the subscription and clear the
    /// channel's upstream state on the bus.
    pub fn unmount(&self) -> bool {
        self.inner.unmount()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lock().session.is_some()
    }

    /// Remove the banner with this id, cancelling its auto-close timer.
    pub fn dismiss(&self, id: InstanceId) -> bool {
        self.inner.dismiss(id)
    }

    /// Current banners in display order.
    pub fn banners(&self) -> Vec<Banner> {
        self.inner.lock().queue.banners().to_vec()
    }

    pub fn views(&self) -> Vec<BannerView> {
        self.inner
            .lock()
            .queue
            .banners()
            .iter()
            .map(BannerView::from)
            .collect()
    }

    /// Receiver updated after every change of the banner list.
    pub fn watch(&self) -> watch::Receiver<Vec<Banner>> {
        self.inner.snapshot.subscribe()
    }

    /// Number of auto-close timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.inner.lock().timers.len()
    }

    pub fn location(&self) -> Option<String> {
        self.inner.lock().location.clone()
    }

    /// Record a new location. A change while mounted tears the subscription
    /// down and re-establishes it. Returns whether that happened.
    pub fn relocate(&self, location: &str) -> bool {
        self.inner.relocate(location)
    }

    /// Track a location provider: its current value is taken as the starting
    /// location and every later change triggers [`BannerController::relocate`].
    pub fn follow(&self, provider: &LocationProvider) -> JoinHandle<()> {
        let mut rx = provider.subscribe();
        let initial = rx.borrow_and_update().clone();
        self.inner.relocate(&initial);

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let location = rx.borrow_and_update().clone();
                let Some(inner) = weak.upgrade() else { break };
                inner.relocate(&location);
            }
        })
    }
}

impl Drop for BannerController {
    fn drop(&mut self) {
        self.inner.unmount();
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_snapshot(&self, state: &State) {
        self.snapshot.send_replace(state.queue.banners().to_vec());
    }

    fn mount(self: &Arc<Self>) -> bool {
        let mut state = self.lock();
        self.mount_locked(&mut state)
    }

    fn mount_locked(self: &Arc<Self>, state: &mut State) -> bool {
        if state.session.is_some() {
            return false;
        }

        state.generation += 1;
        let generation = state.generation;
        state.queue.reset();

        let mut subscription = self.bus.subscribe(&self.channel);
        let subscription_id = subscription.id();
        let weak = Arc::downgrade(self);
        let pump = tokio::spawn(async move {
            while let Some(message) = subscription.recv().await {
                let Some(inner) = weak.upgrade() else { return };
                inner.receive(message, generation);
            }
            if let Some(inner) = weak.upgrade() {
                if inner.lock().is_live(generation) {
                    warn!(
                        "Subscription on '{}' closed while still mounted",
                        inner.channel
                    );
                }
            }
        });

        state.session = Some(Session {
            generation,
            subscription_id,
            pump: pump.abort_handle(),
        });
        self.publish_snapshot(state);

        debug!(
            "Mounted banners on '{}' (session {})",
            self.channel, generation
        );
        true
    }

    fn unmount(&self) -> bool {
        let mut state = self.lock();
        self.unmount_locked(&mut state)
    }

    fn unmount_locked(&self, state: &mut State) -> bool {
        let Some(session) = state.session.take() else {
            return false;
        };

        for (_, timer) in state.timers.drain() {
            timer.abort();
        }

        session.pump.abort();
        self.bus.unsubscribe_id(&self.channel, session.subscription_id);
        self.bus.clear(&self.channel);

        state.queue.reset();
        self.publish_snapshot(state);

        debug!(
            "Unmounted banners on '{}' (session {})",
            self.channel, session.generation
        );
        true
    }

    fn relocate(self: &Arc<Self>, location: &str) -> bool {
        let mut state = self.lock();
        if state.location.as_deref() == Some(location) {
            return false;
        }
        let previous = state.location.replace(location.to_string());
        if previous.is_none() || state.session.is_none() {
            return false;
        }

        debug!("Location changed to '{}', re-subscribing '{}'", location, self.channel);
        self.unmount_locked(&mut state);
        self.mount_locked(&mut state)
    }

    fn receive(self: &Arc<Self>, message: Message, generation: u64) {
        let mut state = self.lock();
        if !state.is_live(generation) {
            debug!("Dropping message for ended session {} on '{}'", generation, self.channel);
            return;
        }

        match state.queue.apply(message) {
            QueueEvent::Queued(id) => {
                let auto_close = state.queue.get(id).map_or(false, |b| b.auto_close);
                if auto_close {
                    let timer = self.schedule_close(id, generation);
                    state.timers.insert(id, timer);
                }
            }
            QueueEvent::Swept { removed } => {
                for id in removed {
                    state.cancel_timer(id);
                }
            }
        }

        self.publish_snapshot(&state);
    }

    fn schedule_close(self: &Arc<Self>, id: InstanceId, generation: u64) -> AbortHandle {
        let weak = Arc::downgrade(self);
        let dwell = self.dwell;
        tokio::spawn(async move {
            tokio::time::sleep(dwell).await;
            if let Some(inner) = weak.upgrade() {
                inner.expire(id, generation);
            }
        })
        .abort_handle()
    }

    fn expire(&self, id: InstanceId, generation: u64) {
        let mut state = self.lock();
        if !state.is_live(generation) {
            return;
        }
        state.timers.remove(&id);
        if state.queue.dismiss(id).is_some() {
            debug!("Auto-closed banner {} on '{}'", id, self.channel);
            self.publish_snapshot(&state);
        }
    }

    fn dismiss(&self, id: InstanceId) -> bool {
        let mut state = self.lock();
        state.cancel_timer(id);
        let removed = state.queue.dismiss(id).is_some();
        if removed {
            self.publish_snapshot(&state);
        }
        removed
    }
}
