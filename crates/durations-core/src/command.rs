//! Chat commands understood by the tracker.

use uuid::Uuid;

/// A parsed `!durations` chat command.
///
/// Commands carry the correlation id of the chat notification they were
/// parsed from, so log lines from parsing, handling and committing line up.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted type name such as `durations.add_duration`, used in logs.
    fn command_type(&self) -> &'static str;

    /// Id of the notification this command came from.
    fn correlation_id(&self) -> Uuid;
}
