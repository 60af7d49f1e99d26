//! Shared application state.

use std::sync::{Arc, Mutex, MutexGuard};

use durations_core::clock::Clock;
use durations_core::error::DomainError;
use durations_core::event::{Notification, NotificationKind, TurnOrderChanged};
use durations_store::announcement_feed::AnnouncementFeed;
use durations_store::memory_turn_order::MemoryTurnOrder;
use durations_tracker::application::effects::Disposition;
use durations_tracker::application::tracker::Tracker;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The tracker. Locked only around synchronous dispatch, never across an
    /// await point, so notifications are handled one at a time.
    pub tracker: Arc<Mutex<Tracker>>,
    /// The shared turn order the tracker reads and writes.
    pub turn_order: Arc<MemoryTurnOrder>,
    /// Announcements for clients to poll.
    pub feed: Arc<AnnouncementFeed>,
    /// Clock used to stamp notifications.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        tracker: Tracker,
        turn_order: Arc<MemoryTurnOrder>,
        feed: Arc<AnnouncementFeed>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            turn_order,
            feed,
            clock,
        }
    }

    /// Wraps `kind` in a fresh notification and hands it to the tracker.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a previous dispatch panicked
    /// while holding the tracker.
    pub fn dispatch(&self, kind: NotificationKind) -> Result<Disposition, DomainError> {
        let notification = Notification::new(kind, self.clock.as_ref());
        let mut tracker = self.lock_tracker()?;
        Ok(tracker.handle(&notification))
    }

    /// Mirrors the platform's new turn order into the store, then reports the
    /// change to the tracker. Both happen under the tracker lock so no other
    /// notification sees the store in between.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a lock is poisoned.
    pub fn dispatch_turn_order_change(
        &self,
        change: TurnOrderChanged,
    ) -> Result<Disposition, DomainError> {
        let mut tracker = self.lock_tracker()?;
        self.turn_order.replace(change.current.clone())?;
        let notification = Notification::new(
            NotificationKind::TurnOrderChanged(change),
            self.clock.as_ref(),
        );
        Ok(tracker.handle(&notification))
    }

    fn lock_tracker(&self) -> Result<MutexGuard<'_, Tracker>, DomainError> {
        self.tracker
            .lock()
            .map_err(|_| DomainError::Infrastructure("tracker lock poisoned".to_owned()))
    }
}
