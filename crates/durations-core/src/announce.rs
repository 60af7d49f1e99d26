//! Announcement sink.

use serde::{Deserialize, Serialize};

/// Who sees an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Every participant.
    Everyone,
    /// Only the game master.
    GameMaster,
}

/// A message pushed to participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Who sees the message.
    pub audience: Audience,
    /// Message markup.
    pub message: String,
}

impl Announcement {
    /// An announcement whispered to the game master.
    #[must_use]
    pub fn to_game_master(message: impl Into<String>) -> Self {
        Self {
            audience: Audience::GameMaster,
            message: message.into(),
        }
    }

    /// An announcement for every participant.
    #[must_use]
    pub fn to_everyone(message: impl Into<String>) -> Self {
        Self {
            audience: Audience::Everyone,
            message: message.into(),
        }
    }
}

/// One-way push of announcements. Fire-and-forget: delivery failures are the
/// sink's concern.
pub trait Announcer: Send + Sync {
    /// Delivers an announcement.
    fn announce(&self, announcement: Announcement);
}
