//! Recognising a normal turn advance.
//!
//! Advancing the platform's tracker moves the first entry to the back and
//! applies its step. Any other difference between two snapshots (a manual
//! reorder, insertion, deletion or edit) is not an advance and must not
//! expire anything.

use durations_core::error::DomainError;

use super::entry::TurnEntry;

/// What `previous` looks like after exactly one advance.
///
/// # Errors
///
/// Returns `DomainError::Validation` if applying the step overflows.
pub fn advanced_once(previous: &[TurnEntry]) -> Result<Vec<TurnEntry>, DomainError> {
    let mut expected = previous.to_vec();
    if !expected.is_empty() {
        expected.rotate_left(1);
    }
    if let Some(moved) = expected.last_mut() {
        *moved = moved.advanced()?;
    }
    Ok(expected)
}

/// Whether `current` is `previous` advanced by exactly one turn.
///
/// Always false before the turn order has been sorted, since until then the
/// tracker has no notion of whose turn it is.
#[must_use]
pub fn is_single_advance(previous: &[TurnEntry], current: &[TurnEntry], sorted_once: bool) -> bool {
    if !sorted_once || previous.is_empty() {
        return false;
    }
    advanced_once(previous).is_ok_and(|expected| expected == current)
}
