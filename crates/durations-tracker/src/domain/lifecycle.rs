//! Duration lifecycle on a confirmed turn advance.

use durations_core::error::DomainError;

use super::entry::{TurnEntry, TurnSlot};
use super::reconcile::{RoundParams, reconcile};
use super::settings::{ConfigurationState, GmDuration};

/// What a confirmed advance changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Replacement turn order, when an expired duration was removed.
    pub turn_order: Option<Vec<TurnEntry>>,
    /// The public duration that expired.
    pub expired: Option<TurnSlot>,
    /// Every GM duration after ticking, expired ones included, when a new
    /// round started.
    pub gm_report: Option<Vec<GmDuration>>,
}

/// Reacts to a confirmed advance that produced `current`.
///
/// With auto-delete on, the last entry is removed when it is a countdown
/// that has run out, and the rest is reconciled. When the round marker
/// holds the current turn, every GM duration ticks; with auto-delete on,
/// the ones that ran out are dropped.
///
/// # Errors
///
/// Returns `DomainError::Consistency` if the turn order cannot be rebuilt.
pub fn on_advance(
    current: &[TurnEntry],
    state: &mut ConfigurationState,
) -> Result<AdvanceOutcome, DomainError> {
    let mut outcome = AdvanceOutcome::default();

    if state.auto_delete_durations
        && let Some((TurnEntry::Slot(last), rest)) = current.split_last()
        && last.has_expired()
    {
        let params = RoundParams::with_order(state.sort_order);
        outcome.turn_order = Some(reconcile(rest, None, &params, &mut state.sorted_once)?);
        outcome.expired = Some(last.clone());
    }

    let new_round = current.first().is_some_and(TurnEntry::is_marker);
    if new_round && !state.gm_durations.is_empty() {
        let ticked: Vec<GmDuration> = state.gm_durations.iter().map(GmDuration::ticked).collect();
        state.gm_durations = if state.auto_delete_durations {
            ticked.iter().filter(|d| !d.has_expired()).cloned().collect()
        } else {
            ticked.clone()
        };
        outcome.gm_report = Some(ticked);
    }

    Ok(outcome)
}
