//! Test announcer that captures announcements instead of delivering them.

use std::sync::Mutex;

use durations_core::announce::{Announcement, Announcer, Audience};

/// An announcer that records every announcement it receives.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    announcements: Mutex<Vec<Announcement>>,
}

impl RecordingAnnouncer {
    /// Create an empty recording announcer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded announcements.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn announcements(&self) -> Vec<Announcement> {
        self.announcements.lock().unwrap().clone()
    }

    /// Returns the messages whispered to the game master, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn game_master_messages(&self) -> Vec<String> {
        self.announcements
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.audience == Audience::GameMaster)
            .map(|a| a.message.clone())
            .collect()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, announcement: Announcement) {
        self.announcements.lock().unwrap().push(announcement);
    }
}
