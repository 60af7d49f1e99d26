//! Commands for the Durations context.

use durations_core::command::Command;
use uuid::Uuid;

use super::reconcile::RoundParams;
use super::settings::Setting;
use super::tally::Tally;

/// Command to add a public duration to the turn order.
#[derive(Debug, Clone)]
pub struct AddDuration {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Name shown in the turn order.
    pub name: String,
    /// Rounds the duration lasts.
    pub length: i64,
    /// Initiative the duration is inserted at.
    pub initiative: Tally,
}

impl Command for AddDuration {
    fn command_type(&self) -> &'static str {
        "durations.add_duration"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a private GM duration.
#[derive(Debug, Clone)]
pub struct AddGmDuration {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What the duration tracks.
    pub description: String,
    /// Rounds the duration lasts.
    pub length: i64,
}

impl Command for AddGmDuration {
    fn command_type(&self) -> &'static str {
        "durations.add_gm_duration"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to show the GM durations to the GM.
#[derive(Debug, Clone)]
pub struct ShowGmDurations {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ShowGmDurations {
    fn command_type(&self) -> &'static str {
        "durations.show_gm_durations"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a GM duration.
#[derive(Debug, Clone)]
pub struct DeleteGmDuration {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Id of the duration to delete.
    pub id: i64,
}

impl Command for DeleteGmDuration {
    fn command_type(&self) -> &'static str {
        "durations.delete_gm_duration"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to empty the turn order and forget every GM duration.
#[derive(Debug, Clone)]
pub struct ClearTurnOrder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ClearTurnOrder {
    fn command_type(&self) -> &'static str {
        "durations.clear_turn_order"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to sort the turn order, keeping the current turn.
#[derive(Debug, Clone)]
pub struct SortTurnOrder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Round marker defaults and sort direction.
    pub params: RoundParams,
}

impl Command for SortTurnOrder {
    fn command_type(&self) -> &'static str {
        "durations.sort_turn_order"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to change a configuration setting.
#[derive(Debug, Clone)]
pub struct UpdateSetting {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The new setting value.
    pub setting: Setting,
}

impl Command for UpdateSetting {
    fn command_type(&self) -> &'static str {
        "durations.update_setting"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to show the current settings and the command summary.
#[derive(Debug, Clone)]
pub struct ShowSettings {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ShowSettings {
    fn command_type(&self) -> &'static str {
        "durations.show_settings"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Any command the tracker accepts.
#[derive(Debug, Clone)]
pub enum TrackerCommand {
    /// See [`AddDuration`].
    AddDuration(AddDuration),
    /// See [`AddGmDuration`].
    AddGmDuration(AddGmDuration),
    /// See [`ShowGmDurations`].
    ShowGmDurations(ShowGmDurations),
    /// See [`DeleteGmDuration`].
    DeleteGmDuration(DeleteGmDuration),
    /// See [`ClearTurnOrder`].
    ClearTurnOrder(ClearTurnOrder),
    /// See [`SortTurnOrder`].
    SortTurnOrder(SortTurnOrder),
    /// See [`UpdateSetting`].
    UpdateSetting(UpdateSetting),
    /// See [`ShowSettings`].
    ShowSettings(ShowSettings),
}

impl TrackerCommand {
    /// The wrapped command.
    #[must_use]
    pub fn as_command(&self) -> &dyn Command {
        match self {
            Self::AddDuration(c) => c,
            Self::AddGmDuration(c) => c,
            Self::ShowGmDurations(c) => c,
            Self::DeleteGmDuration(c) => c,
            Self::ClearTurnOrder(c) => c,
            Self::SortTurnOrder(c) => c,
            Self::UpdateSetting(c) => c,
            Self::ShowSettings(c) => c,
        }
    }
}
