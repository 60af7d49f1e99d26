//! Announcement feed.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use durations_core::announce::{Announcement, Announcer, Audience};

/// Number of announcements kept when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 100;

/// Keeps the most recent announcements for clients to poll, and logs each
/// one as it arrives. The oldest announcement is dropped once the feed is
/// full.
#[derive(Debug)]
pub struct AnnouncementFeed {
    capacity: usize,
    entries: Mutex<VecDeque<Announcement>>,
}

impl Default for AnnouncementFeed {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl AnnouncementFeed {
    /// Creates a feed holding at most `capacity` announcements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Announcements currently held, oldest first.
    #[must_use]
    pub fn recent(&self) -> Vec<Announcement> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl Announcer for AnnouncementFeed {
    fn announce(&self, announcement: Announcement) {
        match announcement.audience {
            Audience::Everyone => tracing::info!(message = %announcement.message, "announcement"),
            Audience::GameMaster => {
                tracing::info!(message = %announcement.message, "announcement to game master");
            }
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(announcement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_announcements_in_order() {
        let feed = AnnouncementFeed::default();

        feed.announce(Announcement::to_everyone("first"));
        feed.announce(Announcement::to_game_master("second"));

        assert_eq!(
            feed.recent(),
            vec![
                Announcement::to_everyone("first"),
                Announcement::to_game_master("second"),
            ]
        );
    }

    #[test]
    fn test_drops_oldest_when_full() {
        let feed = AnnouncementFeed::with_capacity(2);

        for message in ["one", "two", "three"] {
            feed.announce(Announcement::to_game_master(message));
        }

        let messages: Vec<String> = feed.recent().into_iter().map(|a| a.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_zero_capacity_still_keeps_latest() {
        let feed = AnnouncementFeed::with_capacity(0);

        feed.announce(Announcement::to_everyone("one"));
        feed.announce(Announcement::to_everyone("two"));

        assert_eq!(feed.recent(), vec![Announcement::to_everyone("two")]);
    }
}
