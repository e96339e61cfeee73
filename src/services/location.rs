use tokio::sync::watch;

/// Observable current navigation location.
pub struct LocationProvider {
    tx: watch::Sender<String>,
}

impl LocationProvider {
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(initial.into());
        Self { tx }
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Move to `location`. Observers are only notified on an actual change.
    pub fn navigate(&self, location: &str) -> bool {
        self.tx.send_if_modified(|current| {
            if current == location {
                false
            } else {
                *current = location.to_string();
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for LocationProvider {
    fn default() -> Self {
        Self::new("/")
    }
}
