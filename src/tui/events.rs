//! Event handling for the TUI.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal event (keyboard input).
    Key(KeyEvent),
    /// Tick event for periodic updates.
    Tick,
    /// Resize event.
    Resize(u16, u16),
}

/// Reads terminal events, returning `None` when nothing arrived within the
/// timeout.
pub type EventSource = Box<dyn FnMut(Duration) -> io::Result<Option<CrosstermEvent>> + Send>;

/// Event handler that sends events over a channel.
///
/// The channel closes once the source fails, so [`EventHandler::next`]
/// returns `None` after the terminal goes away.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create an event handler reading the terminal.
    pub fn new(tick_rate: Duration) -> Self {
        Self::with_source(tick_rate, Box::new(terminal_source))
    }

    /// Create an event handler over any event source.
    pub fn with_source(tick_rate: Duration, mut source: EventSource) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // Polling blocks, so it gets its own thread
        tokio::task::spawn_blocking(move || loop {
            let event = match source(tick_rate) {
                Ok(Some(raw)) => match translate(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Ok(None) => Event::Tick,
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

fn terminal_source(timeout: Duration) -> io::Result<Option<CrosstermEvent>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Keep key presses and resizes; mouse, focus and paste events are dropped.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Check if a key event matches a specific key code.
pub fn is_key(event: &KeyEvent, code: KeyCode) -> bool {
    event.code == code && event.modifiers == KeyModifiers::NONE
}

/// Check if a key event is Ctrl+C or `q`.
pub fn is_quit(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers == KeyModifiers::CONTROL
        || is_key(event, KeyCode::Char('q'))
}

/// Zero-based tab index for the keys `1`..`9`.
pub fn tab_index(event: &KeyEvent) -> Option<usize> {
    match event.code {
        KeyCode::Char(c @ '1'..='9') if event.modifiers == KeyModifiers::NONE => {
            c.to_digit(10).map(|d| d as usize - 1)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(tab_index(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(tab_index(&key(KeyCode::Char('9'))), Some(8));
        assert_eq!(tab_index(&key(KeyCode::Char('0'))), None);
        assert_eq!(tab_index(&key(KeyCode::Char('s'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Char('q'))));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'))));
    }

    #[tokio::test]
    async fn test_next_yields_source_events_then_closes() {
        let mut script = vec![
            Ok(Some(CrosstermEvent::Key(key(KeyCode::Char('s'))))),
            Ok(Some(CrosstermEvent::FocusGained)),
            Ok(Some(CrosstermEvent::Resize(120, 40))),
            Ok(None),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed")),
        ]
        .into_iter();
        let source: EventSource = Box::new(move |_| {
            script
                .next()
                .unwrap_or_else(|| Err(io::Error::from(io::ErrorKind::UnexpectedEof)))
        });
        let mut handler = EventHandler::with_source(Duration::from_millis(10), source);

        match handler.next().await {
            Some(Event::Key(k)) => assert_eq!(k.code, KeyCode::Char('s')),
            other => panic!("Expected key event, got {:?}", other),
        }
        assert!(matches!(handler.next().await, Some(Event::Resize(120, 40))));
        assert!(matches!(handler.next().await, Some(Event::Tick)));
        assert!(handler.next().await.is_none());
    }

    #[test]
    fn test_translate_drops_key_releases() {
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert!(translate(CrosstermEvent::Key(release)).is_none());
        assert!(translate(CrosstermEvent::Key(key(KeyCode::Char('q')))).is_some());
    }
}
