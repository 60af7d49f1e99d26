//! Notification handlers for the Durations context.
//!
//! The platform reports every turn order change, including manual edits and
//! the tracker's own writes. Only a change that is exactly one advance drives
//! the duration lifecycle.

use durations_core::announce::Announcement;
use durations_core::error::DomainError;
use durations_core::event::PageToggled;
use tracing::info;

use super::command_handlers::clear_tracking;
use super::effects::Effects;
use crate::domain::advance::is_single_advance;
use crate::domain::entry::TurnEntry;
use crate::domain::lifecycle::on_advance;
use crate::domain::report;
use crate::domain::settings::ConfigurationState;

/// Handles a turn order change. Returns `None` when the change is not a
/// single advance.
///
/// # Errors
///
/// Returns `DomainError::Consistency` if the turn order cannot be rebuilt
/// after an expired duration is removed.
pub fn handle_turn_order_changed(
    previous: &[TurnEntry],
    current: &[TurnEntry],
    state: &mut ConfigurationState,
) -> Result<Option<Effects>, DomainError> {
    if !is_single_advance(previous, current, state.sorted_once) {
        return Ok(None);
    }

    let outcome = on_advance(current, state)?;
    if let Some(expired) = &outcome.expired {
        info!(duration = %expired.describe(), "removed expired duration");
    }

    let mut effects = Effects {
        turn_order: outcome.turn_order,
        announcements: Vec::new(),
    };
    if let Some(ticked) = outcome.gm_report {
        effects = effects.and_announce(Announcement::to_game_master(
            report::gm_duration_report(&ticked),
        ));
    }
    Ok(Some(effects))
}

/// Handles the tracker page being opened or closed. Opening it clears a
/// non-empty turn order when auto-clear is on; the old contents are logged
/// first so they can be recovered by hand. Returns `None` otherwise.
pub fn handle_page_toggled(
    toggle: PageToggled,
    current: &[TurnEntry],
    state: &mut ConfigurationState,
) -> Option<Effects> {
    if !toggle.after || !state.auto_clear_turnorder || current.is_empty() {
        return None;
    }

    info!(
        turn_order = ?current,
        gm_durations = ?state.gm_durations,
        "clearing turn order on open"
    );
    Some(clear_tracking(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{RoundMarker, TurnSlot};
    use crate::domain::tally::{Step, Tally};

    fn tally(text: &str) -> Tally {
        text.parse().unwrap()
    }

    fn marker(round: &str) -> TurnEntry {
        TurnEntry::Marker(RoundMarker::new(tally(round), Step::NEXT_ROUND))
    }

    fn duration(name: &str, remaining: i64, initiative: &str) -> TurnEntry {
        TurnEntry::Slot(TurnSlot::duration(name, remaining, tally(initiative)).unwrap())
    }

    fn token(id: &str, roll: &str) -> TurnEntry {
        TurnEntry::Slot(TurnSlot {
            identity: id.to_owned(),
            label: None,
            remaining: tally(roll),
            sort_key: Some(tally(roll)),
            step: None,
            page_id: None,
        })
    }

    fn sorted_state() -> ConfigurationState {
        ConfigurationState {
            sorted_once: true,
            ..ConfigurationState::default()
        }
    }

    #[test]
    fn test_advance_expires_trailing_duration() {
        let mut state = sorted_state();
        let previous = vec![duration("Burning", 1, "12"), marker("2"), token("a", "18")];
        let current = vec![marker("2"), token("a", "18"), duration("Burning", 0, "12")];

        let effects = handle_turn_order_changed(&previous, &current, &mut state)
            .unwrap()
            .unwrap();

        assert_eq!(
            effects.turn_order,
            Some(vec![marker("2"), token("a", "18")])
        );
    }

    #[test]
    fn test_manual_edit_is_not_an_advance() {
        let mut state = sorted_state();
        let previous = vec![marker("2"), token("a", "18")];
        let current = vec![token("a", "18"), marker("2")];

        let effects = handle_turn_order_changed(&previous, &current, &mut state).unwrap();

        assert!(effects.is_none());
    }

    #[test]
    fn test_new_round_reports_gm_durations() {
        let mut state = sorted_state();
        state.add_gm_duration("Poison", 2, 1);
        let previous = vec![token("a", "18"), marker("1")];
        let current = vec![marker("1"), token("a", "18")];

        let effects = handle_turn_order_changed(&previous, &current, &mut state)
            .unwrap()
            .unwrap();

        assert!(effects.turn_order.is_none());
        assert_eq!(effects.announcements.len(), 1);
        assert!(effects.announcements[0].message.contains("In 1 round"));
        assert_eq!(state.gm_durations[0].remaining, 1);
    }

    #[test]
    fn test_opening_page_clears_turn_order() {
        let mut state = sorted_state();
        state.add_gm_duration("Poison", 2, 1);
        let toggle = PageToggled {
            before: false,
            after: true,
        };

        let effects = handle_page_toggled(toggle, &[marker("2")], &mut state).unwrap();

        assert_eq!(effects.turn_order, Some(Vec::new()));
        assert!(state.gm_durations.is_empty());
        assert!(!state.sorted_once);
    }

    #[test]
    fn test_page_toggle_without_clear() {
        let closing = PageToggled {
            before: true,
            after: false,
        };
        let opening = PageToggled {
            before: false,
            after: true,
        };

        let mut state = sorted_state();
        assert!(handle_page_toggled(closing, &[marker("2")], &mut state).is_none());
        assert!(handle_page_toggled(opening, &[], &mut state).is_none());

        let mut state = ConfigurationState {
            auto_clear_turnorder: false,
            ..sorted_state()
        };
        assert!(handle_page_toggled(opening, &[marker("2")], &mut state).is_none());
        assert!(state.sorted_once);
    }
}
