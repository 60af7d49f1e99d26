//! Command handlers for the Durations context.
//!
//! Each handler works on a copy of the configuration and the current turn
//! order and returns the effects to commit. Handlers never write: if one
//! fails, the copy is dropped and nothing changes.

use durations_core::announce::Announcement;
use durations_core::clock::Clock;
use durations_core::error::DomainError;

use super::effects::Effects;
use crate::domain::commands::{
    AddDuration, AddGmDuration, DeleteGmDuration, SortTurnOrder, TrackerCommand, UpdateSetting,
};
use crate::domain::entry::{TurnEntry, TurnSlot};
use crate::domain::reconcile::{RoundParams, reconcile};
use crate::domain::report;
use crate::domain::settings::{ConfigurationState, Setting};

/// Dispatches a parsed command to its handler.
///
/// # Errors
///
/// Returns whatever error the handler returns.
pub fn handle_command(
    command: &TrackerCommand,
    state: &mut ConfigurationState,
    current: &[TurnEntry],
    clock: &dyn Clock,
) -> Result<Effects, DomainError> {
    match command {
        TrackerCommand::AddDuration(c) => handle_add_duration(c, state, current),
        TrackerCommand::AddGmDuration(c) => Ok(handle_add_gm_duration(c, state, clock)),
        TrackerCommand::ShowGmDurations(_) => Ok(handle_show_gm_durations(state)),
        TrackerCommand::DeleteGmDuration(c) => handle_delete_gm_duration(c, state),
        TrackerCommand::ClearTurnOrder(_) => Ok(clear_tracking(state)),
        TrackerCommand::SortTurnOrder(c) => handle_sort_turn_order(c, state, current),
        TrackerCommand::UpdateSetting(c) => Ok(handle_update_setting(c, state, current)),
        TrackerCommand::ShowSettings(_) => Ok(Effects::announce(Announcement::to_everyone(
            report::settings_summary(state),
        ))),
    }
}

/// Handles `AddDuration`: merges the new duration into the turn order in the
/// remembered sort direction.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the length is out of range, or
/// `DomainError::Consistency` if the current turn cannot be kept.
pub fn handle_add_duration(
    command: &AddDuration,
    state: &mut ConfigurationState,
    current: &[TurnEntry],
) -> Result<Effects, DomainError> {
    let slot = TurnSlot::duration(&command.name, command.length, command.initiative)?;
    let params = RoundParams::with_order(state.sort_order);
    let turn_order = reconcile(current, Some(slot), &params, &mut state.sorted_once)?;
    Ok(Effects::write(turn_order))
}

/// Handles `AddGmDuration`: stores the duration under the clock's current
/// Unix milliseconds.
pub fn handle_add_gm_duration(
    command: &AddGmDuration,
    state: &mut ConfigurationState,
    clock: &dyn Clock,
) -> Effects {
    let duration = state.add_gm_duration(
        &command.description,
        command.length,
        clock.now_millis(),
    );
    Effects::announce(Announcement::to_game_master(report::gm_duration_added(
        &duration,
    )))
}

/// Handles `ShowGmDurations`.
#[must_use]
pub fn handle_show_gm_durations(state: &ConfigurationState) -> Effects {
    Effects::announce(Announcement::to_game_master(report::gm_duration_report(
        &state.gm_durations,
    )))
}

/// Handles `DeleteGmDuration`: removes the duration and shows the ones that
/// remain.
///
/// # Errors
///
/// Returns `DomainError::DurationNotFound` if no duration has the id.
pub fn handle_delete_gm_duration(
    command: &DeleteGmDuration,
    state: &mut ConfigurationState,
) -> Result<Effects, DomainError> {
    let deleted = state.remove_gm_duration(command.id)?;
    let mut effects = Effects::default();
    if !state.gm_durations.is_empty() {
        effects = effects.and_announce(Announcement::to_game_master(
            report::gm_duration_report(&state.gm_durations),
        ));
    }
    Ok(effects.and_announce(Announcement::to_game_master(
        report::gm_duration_deleted(&deleted),
    )))
}

/// Empties the turn order and forgets the current turn and every GM
/// duration. Settings are kept.
pub fn clear_tracking(state: &mut ConfigurationState) -> Effects {
    state.reset_tracking();
    Effects::write(Vec::new()).and_announce(Announcement::to_game_master(
        report::TURN_ORDER_CLEARED,
    ))
}

/// Handles `SortTurnOrder`: remembers the direction and rebuilds the turn
/// order.
///
/// # Errors
///
/// Returns `DomainError::Consistency` if the current turn cannot be kept.
pub fn handle_sort_turn_order(
    command: &SortTurnOrder,
    state: &mut ConfigurationState,
    current: &[TurnEntry],
) -> Result<Effects, DomainError> {
    state.sort_order = command.params.order;
    let turn_order = reconcile(current, None, &command.params, &mut state.sorted_once)?;
    Ok(Effects::write(turn_order))
}

/// Handles `UpdateSetting`. Renaming the round marker rewrites the turn order
/// so the marker already on it carries the new name.
pub fn handle_update_setting(
    command: &UpdateSetting,
    state: &mut ConfigurationState,
    current: &[TurnEntry],
) -> Effects {
    let renamed = matches!(
        &command.setting,
        Setting::RoundDisplayName(label) if *label != state.round_label
    );
    let relabel = renamed && current.iter().any(TurnEntry::is_marker);
    state.apply(&command.setting);

    let confirmation =
        Announcement::to_game_master(report::setting_updated(&command.setting));
    if relabel {
        Effects::write(current.to_vec()).and_announce(confirmation)
    } else {
        Effects::announce(confirmation)
    }
}
