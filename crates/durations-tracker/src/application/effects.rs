//! What handling a notification produces.

use std::fmt;

use durations_core::announce::Announcement;
use durations_core::error::DomainError;

use crate::domain::entry::TurnEntry;

/// Writes and announcements produced by one handler run. Nothing here has
/// happened yet: the tracker commits it only if the handler succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Replacement turn order, written at most once.
    pub turn_order: Option<Vec<TurnEntry>>,
    /// Announcements, sent after the writes.
    pub announcements: Vec<Announcement>,
}

impl Effects {
    /// Effects that only announce.
    #[must_use]
    pub fn announce(announcement: Announcement) -> Self {
        Self {
            turn_order: None,
            announcements: vec![announcement],
        }
    }

    /// Effects that replace the turn order.
    #[must_use]
    pub fn write(turn_order: Vec<TurnEntry>) -> Self {
        Self {
            turn_order: Some(turn_order),
            announcements: Vec::new(),
        }
    }

    /// Adds an announcement.
    #[must_use]
    pub fn and_announce(mut self, announcement: Announcement) -> Self {
        self.announcements.push(announcement);
        self
    }
}

/// Why a notification was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The chat message was not addressed to the tracker.
    NotACommand,
    /// The turn order change was the tracker's own write.
    Echo,
    /// The turn order changed, but not by a single advance.
    NotAnAdvance,
    /// The tracker page toggle did not call for a clear.
    NoAutoClear,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotACommand => "not_a_command",
            Self::Echo => "echo",
            Self::NotAnAdvance => "not_an_advance",
            Self::NoAutoClear => "no_auto_clear",
        })
    }
}

/// Outcome of handling one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The effects were committed.
    Applied,
    /// Nothing was done.
    Ignored {
        /// Why.
        reason: IgnoreReason,
    },
    /// The notification failed; nothing was written and the GM was told.
    Rejected {
        /// What went wrong.
        error: DomainError,
    },
}
