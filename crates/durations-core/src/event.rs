//! Notification abstractions.
//!
//! The hosting platform delivers three kinds of notifications. Each is
//! wrapped in an envelope carrying the metadata used to trace it through
//! logs and announcements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::record::TurnRecord;

/// Metadata attached to every notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMetadata {
    /// Unique notification identifier.
    pub notification_id: Uuid,
    /// Correlation ID for tracing a notification through its effects.
    pub correlation_id: Uuid,
    /// Timestamp of receipt.
    pub received_at: DateTime<Utc>,
}

/// A chat message that may carry a tracker command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Raw message text, e.g. `!durations add-duration|Burning|3|5`.
    pub content: String,
    /// Platform identity of the sender.
    pub player_id: String,
    /// Display name of the sender.
    pub who: String,
    /// Whether the sender is a game master.
    pub is_game_master: bool,
}

/// The turn tracker page was toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToggled {
    /// Whether the tracker was open before the change.
    pub before: bool,
    /// Whether the tracker is open after the change.
    pub after: bool,
}

/// The shared turn order changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOrderChanged {
    /// Snapshot before the change.
    pub previous: Vec<TurnRecord>,
    /// Snapshot after the change.
    pub current: Vec<TurnRecord>,
}

/// Notification type identifier for [`ChatMessage`].
pub const COMMAND_ISSUED_NOTIFICATION_TYPE: &str = "platform.command_issued";

/// Notification type identifier for [`PageToggled`].
pub const PAGE_TOGGLED_NOTIFICATION_TYPE: &str = "platform.page_toggled";

/// Notification type identifier for [`TurnOrderChanged`].
pub const TURN_ORDER_CHANGED_NOTIFICATION_TYPE: &str = "platform.turn_order_changed";

/// Notification payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// A chat message was sent.
    CommandIssued(ChatMessage),
    /// The tracker page was opened or closed.
    PageToggled(PageToggled),
    /// The turn order changed.
    TurnOrderChanged(TurnOrderChanged),
}

/// Notification envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Notification metadata.
    pub metadata: NotificationMetadata,
    /// Notification-specific payload.
    pub kind: NotificationKind,
}

impl Notification {
    /// Wraps a payload in a fresh envelope stamped by `clock`.
    #[must_use]
    pub fn new(kind: NotificationKind, clock: &dyn Clock) -> Self {
        Self::correlated(kind, Uuid::new_v4(), clock)
    }

    /// Wraps a payload in an envelope that continues an existing correlation.
    #[must_use]
    pub fn correlated(kind: NotificationKind, correlation_id: Uuid, clock: &dyn Clock) -> Self {
        Self {
            metadata: NotificationMetadata {
                notification_id: Uuid::new_v4(),
                correlation_id,
                received_at: clock.now(),
            },
            kind,
        }
    }

    /// Returns the notification type name.
    #[must_use]
    pub fn notification_type(&self) -> &'static str {
        match &self.kind {
            NotificationKind::CommandIssued(_) => COMMAND_ISSUED_NOTIFICATION_TYPE,
            NotificationKind::PageToggled(_) => PAGE_TOGGLED_NOTIFICATION_TYPE,
            NotificationKind::TurnOrderChanged(_) => TURN_ORDER_CHANGED_NOTIFICATION_TYPE,
        }
    }

    /// Returns the correlation ID.
    #[must_use]
    pub fn correlation_id(&self) -> Uuid {
        self.metadata.correlation_id
    }
}
