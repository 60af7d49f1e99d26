//! Turn order reconciliation.
//!
//! Rebuilds the turn order after an insertion, removal or sort: the round
//! marker goes back in front of the sorted slots, and the list is then
//! rotated so whoever had the current turn still has it.

use durations_core::error::DomainError;

use super::entry::{RoundMarker, TurnEntry, TurnSlot};
use super::settings::SortOrder;
use super::tally::{Step, Tally};

/// How a fresh round marker is created and which way slots are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundParams {
    /// Round number for a newly created marker.
    pub start: Tally,
    /// Round step for a newly created marker.
    pub step: Step,
    /// Sort direction.
    pub order: SortOrder,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            start: Tally::ONE,
            step: Step::NEXT_ROUND,
            order: SortOrder::Descending,
        }
    }
}

impl RoundParams {
    /// Default round parameters sorted in `order`.
    #[must_use]
    pub fn with_order(order: SortOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }
}

/// Rebuilds `current` with `new_entry` merged in.
///
/// The first rebuild after a clear, and any rebuild while the round marker
/// holds the current turn, returns the marker-first list and marks the
/// tracker as sorted. Otherwise the result is rotated so the entry that was
/// first in `current` is first again.
///
/// # Errors
///
/// Returns `DomainError::Consistency` if the current turn cannot be found in
/// the rebuilt list.
pub fn reconcile(
    current: &[TurnEntry],
    new_entry: Option<TurnSlot>,
    params: &RoundParams,
    sorted_once: &mut bool,
) -> Result<Vec<TurnEntry>, DomainError> {
    let marker = current
        .iter()
        .find_map(|entry| match entry {
            TurnEntry::Marker(marker) => Some(*marker),
            TurnEntry::Slot(_) => None,
        })
        .unwrap_or_else(|| RoundMarker::new(params.start, params.step));

    let mut slots: Vec<TurnSlot> = current
        .iter()
        .filter_map(|entry| match entry {
            TurnEntry::Slot(slot) => Some(slot.clone().with_derived_sort_key()),
            TurnEntry::Marker(_) => None,
        })
        .chain(new_entry.map(TurnSlot::with_derived_sort_key))
        .collect();

    // `sort_by` is stable: equal keys keep their relative order.
    slots.sort_by(|a, b| {
        let (a, b) = (a.effective_sort_key(), b.effective_sort_key());
        match params.order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        }
    });

    let mut rebuilt = Vec::with_capacity(slots.len() + 1);
    rebuilt.push(TurnEntry::Marker(marker));
    rebuilt.extend(slots.into_iter().map(TurnEntry::Slot));

    let current_turn = match current.first() {
        Some(TurnEntry::Slot(slot)) if *sorted_once => slot,
        _ => {
            *sorted_once = true;
            return Ok(rebuilt);
        }
    };

    rotate_to_current_turn(&mut rebuilt, current_turn)?;
    Ok(rebuilt)
}

/// Rotates `rebuilt` so the entry structurally equal to `current_turn` is
/// first.
fn rotate_to_current_turn(
    rebuilt: &mut [TurnEntry],
    current_turn: &TurnSlot,
) -> Result<(), DomainError> {
    let needle = TurnEntry::Slot(current_turn.clone().with_derived_sort_key());
    let index = rebuilt
        .iter()
        .position(|entry| *entry == needle)
        .ok_or_else(|| {
            DomainError::Consistency(format!(
                "the current turn {} is missing from the rebuilt turn order",
                current_turn.describe()
            ))
        })?;
    rebuilt.rotate_left(index);
    Ok(())
}
