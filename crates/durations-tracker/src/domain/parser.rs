//! Chat command parser.
//!
//! Turns `!durations <command>|arg|arg...` messages into validated
//! [`TrackerCommand`]s. Permission checks happen here too, so a command that
//! reaches a handler is always allowed and well-formed.

use std::fmt;
use std::str::FromStr;

use durations_core::error::DomainError;
use durations_core::event::ChatMessage;
use uuid::Uuid;

use super::commands::{
    AddDuration, AddGmDuration, ClearTurnOrder, DeleteGmDuration, ShowGmDurations, ShowSettings,
    SortTurnOrder, TrackerCommand, UpdateSetting,
};
use super::reconcile::RoundParams;
use super::settings::{Setting, SortOrder};
use super::tally::{Step, Tally};

/// Marks a chat message as a tracker command.
pub const PREFIX: &str = "!durations";

/// Command names as typed in chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    AddDuration,
    AddGmDuration,
    ShowGmDuration,
    DeleteGmDuration,
    Clear,
    Sort,
    Config,
}

impl CommandName {
    /// Every command name, in help order.
    pub const ALL: [Self; 7] = [
        Self::AddDuration,
        Self::AddGmDuration,
        Self::ShowGmDuration,
        Self::DeleteGmDuration,
        Self::Clear,
        Self::Sort,
        Self::Config,
    ];

    /// The name typed in chat.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddDuration => "add-duration",
            Self::AddGmDuration => "add-gm-duration",
            Self::ShowGmDuration => "show-gm-duration",
            Self::DeleteGmDuration => "delete-gm-duration",
            Self::Clear => "clear",
            Self::Sort => "sort",
            Self::Config => "config",
        }
    }

    /// Whether only the game master may issue the command.
    #[must_use]
    pub fn requires_game_master(self) -> bool {
        !matches!(self, Self::AddDuration)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = DomainError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == name)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "`{name}` is not a valid command. Call the `{PREFIX}` command for a list of valid commands."
                ))
            })
    }
}

/// Whether `content` is addressed to the tracker.
#[must_use]
pub fn is_tracker_command(content: &str) -> bool {
    content
        .split('|')
        .next()
        .and_then(|head| head.split_whitespace().next())
        .is_some_and(|word| word.eq_ignore_ascii_case(PREFIX))
}

/// Parses and validates a chat message.
///
/// Returns `Ok(None)` when the message is not addressed to the tracker.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an unknown command or malformed
/// arguments, and `DomainError::Forbidden` when a player issues a command
/// reserved for the game master.
pub fn parse_message(
    message: &ChatMessage,
    correlation_id: Uuid,
) -> Result<Option<TrackerCommand>, DomainError> {
    if !is_tracker_command(&message.content) {
        return Ok(None);
    }

    let mut segments = message.content.split('|');
    let head = segments.next().unwrap_or_default();
    let args: Vec<Option<&str>> = segments
        .map(|arg| Some(arg.trim()).filter(|arg| !arg.is_empty()))
        .collect();

    let Some(name) = head.split_whitespace().nth(1) else {
        return Ok(Some(TrackerCommand::ShowSettings(ShowSettings {
            correlation_id,
        })));
    };
    let name: CommandName = name.to_lowercase().parse()?;

    if name.requires_game_master() && !message.is_game_master {
        return Err(DomainError::Forbidden(format!(
            "{} does not have permission to use the `{name}` command.",
            message.who
        )));
    }

    let arg = |index: usize| args.get(index).copied().flatten();

    let command = match name {
        CommandName::AddDuration => {
            let (Some(duration_name), Some(length)) = (arg(0), arg(1)) else {
                return Err(DomainError::Validation(
                    "When adding a duration, both a name and length must be included.".to_owned(),
                ));
            };
            let length = parse_integer(length, "duration length")?;
            let initiative = arg(2)
                .map(|text| {
                    text.parse::<Tally>().map_err(|_| {
                        DomainError::Validation(format!(
                            "`{text}` is not a valid duration initiative. You must enter a number when passing in a duration initiative."
                        ))
                    })
                })
                .transpose()?
                .unwrap_or(Tally::ZERO);
            TrackerCommand::AddDuration(AddDuration {
                correlation_id,
                name: duration_name.to_owned(),
                length,
                initiative,
            })
        }
        CommandName::AddGmDuration => {
            let (Some(description), Some(length)) = (arg(0), arg(1)) else {
                return Err(DomainError::Validation(
                    "When adding a GM duration, both a description and length must be included."
                        .to_owned(),
                ));
            };
            TrackerCommand::AddGmDuration(AddGmDuration {
                correlation_id,
                description: description.to_owned(),
                length: parse_integer(length, "GM duration length")?,
            })
        }
        CommandName::ShowGmDuration => {
            TrackerCommand::ShowGmDurations(ShowGmDurations { correlation_id })
        }
        CommandName::DeleteGmDuration => {
            let id = arg(0).ok_or_else(|| {
                DomainError::Validation(
                    "You must pass in the id of the GM duration to delete.".to_owned(),
                )
            })?;
            TrackerCommand::DeleteGmDuration(DeleteGmDuration {
                correlation_id,
                id: parse_integer(id, "GM duration id")?,
            })
        }
        CommandName::Clear => TrackerCommand::ClearTurnOrder(ClearTurnOrder { correlation_id }),
        CommandName::Sort => TrackerCommand::SortTurnOrder(SortTurnOrder {
            correlation_id,
            params: parse_round_params(arg(0), arg(1), arg(2))?,
        }),
        CommandName::Config => TrackerCommand::UpdateSetting(UpdateSetting {
            correlation_id,
            setting: parse_setting(&args)?,
        }),
    };

    Ok(Some(command))
}

fn parse_integer(text: &str, what: &str) -> Result<i64, DomainError> {
    text.parse().map_err(|_| {
        DomainError::Validation(format!(
            "`{text}` is not a valid {what}. You must enter a whole number."
        ))
    })
}

fn parse_round_params(
    start: Option<&str>,
    formula: Option<&str>,
    order: Option<&str>,
) -> Result<RoundParams, DomainError> {
    let defaults = RoundParams::default();
    let start = match start {
        Some(text) => parse_integer(text, "round number")
            .ok()
            .and_then(Tally::from_whole)
            .ok_or_else(|| {
                DomainError::Validation(format!("`{text}` is not a valid round number."))
            })?,
        None => defaults.start,
    };
    let step = formula
        .map(Step::parse_formula)
        .transpose()?
        .unwrap_or(defaults.step);
    let order = order
        .map(str::parse::<SortOrder>)
        .transpose()?
        .unwrap_or(defaults.order);
    Ok(RoundParams { start, step, order })
}

fn parse_setting(args: &[Option<&str>]) -> Result<Setting, DomainError> {
    let config = CommandName::Config;
    if args.iter().all(Option::is_none) {
        return Err(DomainError::Validation(format!(
            "You must pass in a config setting to update when calling the `{config}` command."
        )));
    }
    match args {
        [Some(name), Some(value)] => Setting::parse(name, value),
        [Some(name), None] => Setting::parse(name, ""),
        _ => Err(DomainError::Validation(format!(
            "When calling the `{config}` command to update config settings, you must pass in the setting to update as the first option and the new setting as the second option."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str, is_game_master: bool) -> ChatMessage {
        ChatMessage {
            content: content.to_owned(),
            player_id: "player-1".to_owned(),
            who: "Avery".to_owned(),
            is_game_master,
        }
    }

    fn parse_gm(content: &str) -> Result<Option<TrackerCommand>, DomainError> {
        parse_message(&message(content, true), Uuid::new_v4())
    }

    fn validation_message(result: Result<Option<TrackerCommand>, DomainError>) -> String {
        match result {
            Err(DomainError::Validation(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_messages_without_prefix_are_not_commands() {
        assert!(parse_gm("hello there").unwrap().is_none());
        assert!(parse_gm("!durationsclear").unwrap().is_none());
        assert!(parse_gm("").unwrap().is_none());
    }

    #[test]
    fn test_bare_prefix_shows_settings_to_anyone() {
        let command = parse_message(&message("!Durations", false), Uuid::new_v4()).unwrap();
        assert!(matches!(command, Some(TrackerCommand::ShowSettings(_))));
    }

    #[test]
    fn test_add_duration_with_all_arguments() {
        let command = parse_message(
            &message("!durations add-duration|Burning|3|12.5", false),
            Uuid::new_v4(),
        )
        .unwrap();

        let Some(TrackerCommand::AddDuration(add)) = command else {
            panic!("expected add-duration, got {command:?}");
        };
        assert_eq!(add.name, "Burning");
        assert_eq!(add.length, 3);
        assert_eq!(add.initiative, "12.5".parse().unwrap());
    }

    #[test]
    fn test_add_duration_initiative_defaults_to_zero() {
        for content in [
            "!durations add-duration|Slowed|2",
            "!durations add-duration|Slowed|2|",
        ] {
            let Some(TrackerCommand::AddDuration(add)) = parse_gm(content).unwrap() else {
                panic!("expected add-duration for {content}");
            };
            assert_eq!(add.initiative, Tally::ZERO);
        }
    }

    #[test]
    fn test_command_name_is_case_insensitive() {
        let command = parse_gm("!DURATIONS Add-Duration|Burning|3").unwrap();
        assert!(matches!(command, Some(TrackerCommand::AddDuration(_))));
    }

    #[test]
    fn test_add_duration_requires_name_and_length() {
        let error = validation_message(parse_gm("!durations add-duration|Burning"));
        assert!(error.contains("both a name and length"));

        let error = validation_message(parse_gm("!durations add-duration||3"));
        assert!(error.contains("both a name and length"));
    }

    #[test]
    fn test_add_duration_rejects_malformed_numbers() {
        let error = validation_message(parse_gm("!durations add-duration|Burning|three"));
        assert!(error.contains("`three` is not a valid duration length"));

        let error = validation_message(parse_gm("!durations add-duration|Burning|3|soon"));
        assert!(error.contains("`soon` is not a valid duration initiative"));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let error = validation_message(parse_gm("!durations explode"));
        assert!(error.contains("`explode` is not a valid command"));
    }

    #[test]
    fn test_players_may_only_add_durations() {
        for content in [
            "!durations add-gm-duration|Poison|2",
            "!durations show-gm-duration",
            "!durations delete-gm-duration|1",
            "!durations clear",
            "!durations sort",
            "!durations config|autoClearTurnorder|false",
        ] {
            let result = parse_message(&message(content, false), Uuid::new_v4());
            assert!(
                matches!(result, Err(DomainError::Forbidden(_))),
                "{content} should be forbidden, got {result:?}"
            );
        }
    }

    #[test]
    fn test_permission_is_checked_before_arguments() {
        let result = parse_message(&message("!durations delete-gm-duration|abc", false), Uuid::new_v4());
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }

    #[test]
    fn test_add_gm_duration() {
        let Some(TrackerCommand::AddGmDuration(add)) =
            parse_gm("!durations add-gm-duration|Poison|2").unwrap()
        else {
            panic!("expected add-gm-duration");
        };
        assert_eq!(add.description, "Poison");
        assert_eq!(add.length, 2);

        let error = validation_message(parse_gm("!durations add-gm-duration|Poison"));
        assert!(error.contains("both a description and length"));

        let error = validation_message(parse_gm("!durations add-gm-duration|Poison|2.5"));
        assert!(error.contains("`2.5` is not a valid GM duration length"));
    }

    #[test]
    fn test_delete_gm_duration_requires_integer_id() {
        let Some(TrackerCommand::DeleteGmDuration(delete)) =
            parse_gm("!durations delete-gm-duration|1712267938054").unwrap()
        else {
            panic!("expected delete-gm-duration");
        };
        assert_eq!(delete.id, 1_712_267_938_054);

        validation_message(parse_gm("!durations delete-gm-duration|abc"));
        validation_message(parse_gm("!durations delete-gm-duration"));
    }

    #[test]
    fn test_sort_defaults() {
        let Some(TrackerCommand::SortTurnOrder(sort)) = parse_gm("!durations sort").unwrap() else {
            panic!("expected sort");
        };
        assert_eq!(sort.params, RoundParams::default());
    }

    #[test]
    fn test_sort_with_arguments() {
        let Some(TrackerCommand::SortTurnOrder(sort)) =
            parse_gm("!durations sort|3|-2|Ascending").unwrap()
        else {
            panic!("expected sort");
        };
        assert_eq!(sort.params.start, Tally::from_whole(3).unwrap());
        assert_eq!(sort.params.step, "-2".parse().unwrap());
        assert_eq!(sort.params.order, SortOrder::Ascending);
    }

    #[test]
    fn test_sort_skips_empty_arguments() {
        let Some(TrackerCommand::SortTurnOrder(sort)) =
            parse_gm("!durations sort|||ascending").unwrap()
        else {
            panic!("expected sort");
        };
        assert_eq!(sort.params, RoundParams::with_order(SortOrder::Ascending));
    }

    #[test]
    fn test_sort_rejects_malformed_arguments() {
        let error = validation_message(parse_gm("!durations sort|first"));
        assert!(error.contains("`first` is not a valid round number"));

        let error = validation_message(parse_gm("!durations sort|1|2"));
        assert!(error.contains("`2` is not a valid round formula"));

        validation_message(parse_gm("!durations sort|1|+1|sideways"));
    }

    #[test]
    fn test_config_updates_a_setting() {
        let Some(TrackerCommand::UpdateSetting(update)) =
            parse_gm("!durations config|autoDeleteDurations|FALSE").unwrap()
        else {
            panic!("expected config");
        };
        assert_eq!(update.setting, Setting::AutoDeleteDurations(false));
    }

    #[test]
    fn test_config_requires_exactly_two_arguments() {
        let error = validation_message(parse_gm("!durations config"));
        assert!(error.contains("You must pass in a config setting"));

        let error = validation_message(parse_gm("!durations config|roundDisplayName"));
        assert!(error.contains("as the first option"));

        let error = validation_message(parse_gm("!durations config|roundDisplayName|Round|extra"));
        assert!(error.contains("as the first option"));
    }

    #[test]
    fn test_config_with_blank_value_names_the_setting() {
        let error = validation_message(parse_gm("!durations config|roundDisplayName|"));
        assert_eq!(
            error,
            "The new value for the `roundDisplayName` setting cannot be blank."
        );

        let error = validation_message(parse_gm("!durations config|autoClearTurnorder|  "));
        assert!(error.contains("You must either pass in a new value of `true` or `false`"));
    }

    #[test]
    fn test_config_setting_names_are_case_sensitive() {
        let error = validation_message(parse_gm("!durations config|rounddisplayname|Round"));
        assert!(error.contains("must match exactly"));
    }

    #[test]
    fn test_correlation_id_is_carried() {
        let correlation_id = Uuid::new_v4();
        let command = parse_message(&message("!durations clear", true), correlation_id)
            .unwrap()
            .unwrap();
        assert_eq!(command.as_command().correlation_id(), correlation_id);
    }
}
