//! The notification dispatch boundary.
//!
//! `Tracker` is the single place where notifications turn into writes. Each
//! notification is handled to completion: load the configuration, run the
//! handler on a working copy, then commit the configuration, the turn order
//! and the announcements in that order. The turn order is only written once
//! the configuration is saved, and a failed write puts the saved
//! configuration back. A rejected notification leaves both stores as they
//! were and the game master is told why.

use std::sync::Arc;

use durations_core::announce::{Announcement, Announcer};
use durations_core::clock::Clock;
use durations_core::error::DomainError;
use durations_core::event::{Notification, NotificationKind};
use durations_core::repository::{StateRepository, TurnOrderStore};
use tracing::{debug, error, info, warn};

use super::command_handlers::handle_command;
use super::effects::{Disposition, Effects, IgnoreReason};
use super::notification_handlers::{handle_page_toggled, handle_turn_order_changed};
use crate::domain::entry::{TurnEntry, entries_from_records, records_from_entries};
use crate::domain::parser::parse_message;
use crate::domain::settings::ConfigurationState;

/// Handles platform notifications for one campaign.
pub struct Tracker {
    turn_order: Arc<dyn TurnOrderStore>,
    state_repository: Arc<dyn StateRepository>,
    announcer: Arc<dyn Announcer>,
    clock: Arc<dyn Clock>,
    last_write: Option<Vec<TurnEntry>>,
}

impl Tracker {
    /// Creates a tracker over the given collaborators.
    #[must_use]
    pub fn new(
        turn_order: Arc<dyn TurnOrderStore>,
        state_repository: Arc<dyn StateRepository>,
        announcer: Arc<dyn Announcer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            turn_order,
            state_repository,
            announcer,
            clock,
            last_write: None,
        }
    }

    /// Loads the configuration, installing the defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the state repository fails.
    pub fn install(&self) -> Result<ConfigurationState, DomainError> {
        ConfigurationState::load_or_install(self.state_repository.as_ref())
    }

    /// Handles one notification to completion.
    pub fn handle(&mut self, notification: &Notification) -> Disposition {
        let correlation_id = notification.correlation_id();
        let notification_type = notification.notification_type();
        let echo_candidate = self.last_write.take();

        match self.process(notification, echo_candidate) {
            Ok(None) => {
                debug!(%correlation_id, notification_type, "notification applied");
                Disposition::Applied
            }
            Ok(Some(reason)) => {
                debug!(%correlation_id, notification_type, %reason, "notification ignored");
                Disposition::Ignored { reason }
            }
            Err(error) => {
                warn!(%correlation_id, notification_type, %error, "notification rejected");
                self.announcer
                    .announce(Announcement::to_game_master(rejection_message(&error)));
                Disposition::Rejected { error }
            }
        }
    }

    fn process(
        &mut self,
        notification: &Notification,
        echo_candidate: Option<Vec<TurnEntry>>,
    ) -> Result<Option<IgnoreReason>, DomainError> {
        let state = self.install()?;
        let mut working = state.clone();

        let effects = match &notification.kind {
            NotificationKind::CommandIssued(message) => {
                let Some(command) = parse_message(message, notification.correlation_id())?
                else {
                    return Ok(Some(IgnoreReason::NotACommand));
                };
                info!(
                    correlation_id = %notification.correlation_id(),
                    command_type = command.as_command().command_type(),
                    who = %message.who,
                    "handling command"
                );
                let current = self.load_turn_order(&state)?;
                handle_command(&command, &mut working, &current, self.clock.as_ref())?
            }
            NotificationKind::PageToggled(toggle) => {
                let current = self.load_turn_order(&state)?;
                let Some(effects) = handle_page_toggled(*toggle, &current, &mut working) else {
                    return Ok(Some(IgnoreReason::NoAutoClear));
                };
                effects
            }
            NotificationKind::TurnOrderChanged(change) => {
                let current = entries_from_records(&change.current, &state.round_label)?;
                if echo_candidate.as_ref() == Some(&current) {
                    return Ok(Some(IgnoreReason::Echo));
                }
                let previous = entries_from_records(&change.previous, &state.round_label)?;
                let Some(effects) = handle_turn_order_changed(&previous, &current, &mut working)?
                else {
                    return Ok(Some(IgnoreReason::NotAnAdvance));
                };
                effects
            }
        };

        self.commit(effects, &state, &working)?;
        Ok(None)
    }

    fn load_turn_order(&self, state: &ConfigurationState) -> Result<Vec<TurnEntry>, DomainError> {
        entries_from_records(&self.turn_order.load()?, &state.round_label)
    }

    fn commit(
        &mut self,
        effects: Effects,
        before: &ConfigurationState,
        after: &ConfigurationState,
    ) -> Result<(), DomainError> {
        let state_changed = after != before;
        if state_changed {
            after.save(self.state_repository.as_ref())?;
        }
        if let Some(turn_order) = effects.turn_order {
            let records = records_from_entries(&turn_order, &after.round_label);
            if let Err(error) = self.turn_order.store(&records) {
                if state_changed {
                    self.restore(before);
                }
                return Err(error);
            }
            debug!(entries = records.len(), "turn order written");
            self.last_write = Some(turn_order);
        }
        for announcement in effects.announcements {
            self.announcer.announce(announcement);
        }
        Ok(())
    }

    /// Puts back the configuration a failed commit had already saved.
    fn restore(&self, before: &ConfigurationState) {
        if let Err(error) = before.save(self.state_repository.as_ref()) {
            error!(%error, "could not restore configuration after failed turn order write");
        }
    }
}

fn rejection_message(error: &DomainError) -> String {
    match error {
        DomainError::Validation(message) | DomainError::Forbidden(message) => message.clone(),
        DomainError::DurationNotFound(id) => {
            format!("Could not find a GM duration to delete with ID `{id}`.")
        }
        DomainError::Consistency(_) | DomainError::Infrastructure(_) => error.to_string(),
    }
}
