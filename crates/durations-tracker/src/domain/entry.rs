//! Turn order entries.
//!
//! The platform stores the round marker as an ordinary record distinguished
//! only by its display text. Inside the tracker it is a separate variant, and
//! the display text is consulted only when converting to and from records.

use durations_core::error::DomainError;
use durations_core::record::{SYNTHETIC_ID, TurnRecord};

use super::tally::{Step, Tally};

/// The synthetic entry that marks the start of a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundMarker {
    /// Current round number.
    pub round: Tally,
    /// Change applied to `round` each time the marker takes its turn.
    pub step: Step,
}

impl RoundMarker {
    /// Creates a marker starting at `round`.
    #[must_use]
    pub fn new(round: Tally, step: Step) -> Self {
        Self { round, step }
    }
}

/// A token's turn or a timed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSlot {
    /// Token identity, or `"-1"` for custom entries.
    pub identity: String,
    /// Display text for custom entries.
    pub label: Option<String>,
    /// Displayed value: the roll for tokens, rounds left for durations.
    pub remaining: Tally,
    /// Ordering value. Derived from `remaining` when absent.
    pub sort_key: Option<Tally>,
    /// Change applied to `remaining` when the slot takes its turn.
    pub step: Option<Step>,
    /// Page the token lives on.
    pub page_id: Option<String>,
}

impl TurnSlot {
    /// A public duration named `name` lasting `length` rounds, placed at
    /// `initiative`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `length` is out of range.
    pub fn duration(name: &str, length: i64, initiative: Tally) -> Result<Self, DomainError> {
        let remaining = Tally::from_whole(length).ok_or_else(|| {
            DomainError::Validation(format!("`{length}` is not a valid duration length."))
        })?;
        Ok(Self {
            identity: SYNTHETIC_ID.to_owned(),
            label: Some(format!("{name} ({initiative})")),
            remaining,
            sort_key: Some(initiative),
            step: Some(Step::COUNTDOWN),
            page_id: None,
        })
    }

    /// The value the slot is ordered by.
    #[must_use]
    pub fn effective_sort_key(&self) -> Tally {
        self.sort_key.unwrap_or(self.remaining)
    }

    /// Fills in a missing sort key from `remaining`.
    #[must_use]
    pub fn with_derived_sort_key(mut self) -> Self {
        self.sort_key = Some(self.effective_sort_key());
        self
    }

    /// Whether the slot is a countdown that has run out.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.step.is_some_and(Step::counts_down) && self.remaining <= Tally::ZERO
    }

    /// A short description for logs and error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.label {
            Some(label) => format!("`{label}`"),
            None => format!("token `{}` ({})", self.identity, self.remaining),
        }
    }
}

/// One entry of the turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEntry {
    /// The round marker.
    Marker(RoundMarker),
    /// Anything else.
    Slot(TurnSlot),
}

impl TurnEntry {
    /// Whether this is the round marker.
    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }

    /// The entry as it looks after taking its turn.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the step overflows the value.
    pub fn advanced(&self) -> Result<Self, DomainError> {
        let overflow = || DomainError::Validation("turn value overflow".to_owned());
        match self {
            Self::Marker(marker) => Ok(Self::Marker(RoundMarker {
                round: marker
                    .round
                    .checked_add(marker.step.delta())
                    .ok_or_else(overflow)?,
                step: marker.step,
            })),
            Self::Slot(slot) => {
                let Some(step) = slot.step else {
                    return Ok(self.clone());
                };
                Ok(Self::Slot(TurnSlot {
                    remaining: slot
                        .remaining
                        .checked_add(step.delta())
                        .ok_or_else(overflow)?,
                    ..slot.clone()
                }))
            }
        }
    }

    /// Reads a platform record. A record whose display text equals
    /// `marker_label` is the round marker.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a numeric field is malformed.
    pub fn from_record(record: &TurnRecord, marker_label: &str) -> Result<Self, DomainError> {
        let malformed = |e: DomainError| {
            DomainError::Infrastructure(format!("malformed turn record `{}`: {e}", record.id))
        };
        let step = record
            .formula
            .as_deref()
            .filter(|formula| !formula.trim().is_empty())
            .map(str::parse::<Step>)
            .transpose()
            .map_err(malformed)?;
        let value = Tally::from_json(&record.pr).map_err(malformed)?;

        if record.custom.as_deref() == Some(marker_label) {
            return Ok(Self::Marker(RoundMarker {
                round: value,
                step: step.unwrap_or(Step::NEXT_ROUND),
            }));
        }

        let sort_key = record
            .initiative
            .as_ref()
            .map(Tally::from_json)
            .transpose()
            .map_err(malformed)?;

        Ok(Self::Slot(TurnSlot {
            identity: record.id.clone(),
            label: record.custom.clone(),
            remaining: value,
            sort_key,
            step,
            page_id: record.page_id.clone(),
        }))
    }

    /// Writes the entry as a platform record.
    #[must_use]
    pub fn to_record(&self, marker_label: &str) -> TurnRecord {
        match self {
            Self::Marker(marker) => TurnRecord {
                id: SYNTHETIC_ID.to_owned(),
                pr: serde_json::Value::String(marker.round.to_string()),
                custom: Some(marker_label.to_owned()),
                formula: Some(marker.step.to_string()),
                initiative: None,
                page_id: None,
            },
            Self::Slot(slot) => TurnRecord {
                id: slot.identity.clone(),
                pr: serde_json::Value::String(slot.remaining.to_string()),
                custom: slot.label.clone(),
                formula: slot.step.map(|step| step.to_string()),
                initiative: slot.sort_key.map(Tally::to_json),
                page_id: slot.page_id.clone(),
            },
        }
    }
}

/// Reads a whole platform turn order.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if any record is malformed.
pub fn entries_from_records(
    records: &[TurnRecord],
    marker_label: &str,
) -> Result<Vec<TurnEntry>, DomainError> {
    records
        .iter()
        .map(|record| TurnEntry::from_record(record, marker_label))
        .collect()
}

/// Writes a whole turn order as platform records.
#[must_use]
pub fn records_from_entries(entries: &[TurnEntry], marker_label: &str) -> Vec<TurnRecord> {
    entries
        .iter()
        .map(|entry| entry.to_record(marker_label))
        .collect()
}
