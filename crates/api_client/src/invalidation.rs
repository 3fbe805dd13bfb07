//! Session invalidation
//!
//! When the backend rejects the credential the persisted session is cleared
//! and a [`SessionEvent::Invalidated`] is broadcast. The transport layer does
//! not navigate anywhere itself; a single top-level subscriber decides how to
//! send the user back to the login surface.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::session::SessionStore;

const EVENT_CAPACITY: usize = 16;

/// Session lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The credential was rejected and the session cleared
    Invalidated {
        /// Where the user should be sent to authenticate again
        login_url: String,
    },
}

/// Clears the session and announces the invalidation
#[derive(Debug, Clone)]
pub struct SessionInvalidator {
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<SessionEvent>,
    login_url: String,
}

impl SessionInvalidator {
    /// Create an invalidator over `store` announcing `login_url`
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, login_url: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            events,
            login_url: login_url.into(),
        }
    }

    /// Subscribe to session events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Login surface announced with every invalidation
    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// The store this invalidator clears
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Clear token and privilege flag, then broadcast the invalidation
    ///
    /// Safe to call repeatedly; with no session present only the broadcast
    /// happens. A store that cannot be cleared is logged and the event is
    /// still sent so the user is routed to login either way.
    pub async fn invalidate(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persisted session");
        }

        info!(login_url = %self.login_url, "Session invalidated");

        // No subscribers is fine: nobody owns navigation in this process
        let _ = self.events.send(SessionEvent::Invalidated {
            login_url: self.login_url.clone(),
        });
    }
}
