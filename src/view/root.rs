//! The application root — the single place rendered output lives.

use std::sync::Arc;

use tokio::sync::watch;

use super::ViewState;

/// Snapshot of the application root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    /// Token of the most recent navigation. Starts at 0 and only grows.
    pub navigation: u64,
    /// Page title set by the most recent navigation.
    pub title: String,
    pub state: ViewState,
}

/// Shared handle to the application root.
///
/// The root is a watch channel: front ends [`subscribe`](Self::subscribe) and
/// redraw on every change. The navigation token lives inside the watched
/// value, so starting a navigation and applying a result are each atomic with
/// respect to the token check.
#[derive(Debug, Clone)]
pub struct Root {
    tx: Arc<watch::Sender<Screen>>,
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}

impl Root {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Screen::default());
        Self { tx: Arc::new(tx) }
    }

    /// Receive a notification each time the screen changes.
    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.tx.subscribe()
    }

    /// Clone of the current screen.
    pub fn screen(&self) -> Screen {
        self.tx.borrow().clone()
    }

    /// Clone of the current view state.
    pub fn state(&self) -> ViewState {
        self.tx.borrow().state.clone()
    }

    /// Token of the most recent navigation.
    pub fn navigation(&self) -> u64 {
        self.tx.borrow().navigation
    }

    /// Start a navigation: bump the token, set the title and placeholder.
    ///
    /// Returns the new token.
    pub(crate) fn begin(&self, title: String, placeholder: ViewState) -> u64 {
        let mut token = 0;
        self.tx.send_modify(|screen| {
            screen.navigation += 1;
            token = screen.navigation;
            screen.title = title;
            screen.state = placeholder;
        });
        token
    }

    /// Replace the state if `token` is still the current navigation.
    ///
    /// On a stale token nothing changes and the current token is returned.
    pub(crate) fn apply(&self, token: u64, state: ViewState) -> Result<(), u64> {
        let mut current = 0;
        let applied = self.tx.send_if_modified(|screen| {
            current = screen.navigation;
            if screen.navigation == token {
                screen.state = state;
                true
            } else {
                false
            }
        });
        if applied { Ok(()) } else { Err(current) }
    }
}
