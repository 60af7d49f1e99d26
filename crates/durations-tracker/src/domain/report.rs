//! Announcement text.
//!
//! GM duration reports are grouped by rounds left, soonest first. Every item
//! carries its id so the GM can delete it.

use std::collections::BTreeMap;

use super::parser::{CommandName, PREFIX};
use super::settings::{ConfigurationState, GmDuration, Setting};

/// Announced when a report is requested and there is nothing to show.
pub const NO_GM_DURATIONS: &str = "There are currently no GM durations to show.";

/// Announced after the turn order is cleared.
pub const TURN_ORDER_CLEARED: &str =
    "The turn order has been cleared and all GM durations have been deleted.";

fn rounds(count: i64) -> &'static str {
    if count > 1 { "rounds" } else { "round" }
}

fn group_heading(remaining: i64) -> String {
    match remaining {
        r if r < 0 => "A previous round".to_owned(),
        0 => "This round".to_owned(),
        r => format!("In {r} {}", rounds(r)),
    }
}

/// Renders the GM duration report.
#[must_use]
pub fn gm_duration_report(durations: &[GmDuration]) -> String {
    if durations.is_empty() {
        return NO_GM_DURATIONS.to_owned();
    }

    let mut groups: BTreeMap<i64, Vec<&GmDuration>> = BTreeMap::new();
    for duration in durations {
        groups.entry(duration.remaining).or_default().push(duration);
    }

    let mut lines = vec!["Current GM Durations".to_owned()];
    for (remaining, group) in groups {
        lines.push(group_heading(remaining));
        lines.extend(group.into_iter().map(|duration| {
            format!(
                "  - {} [delete: `{PREFIX} {}|{}`]",
                duration.description,
                CommandName::DeleteGmDuration,
                duration.id
            )
        }));
    }
    lines.join("\n")
}

/// Confirms a new GM duration.
#[must_use]
pub fn gm_duration_added(duration: &GmDuration) -> String {
    format!(
        "The `{}` GM duration has been added with a length of `{}` {}.",
        duration.description,
        duration.remaining,
        rounds(duration.remaining)
    )
}

/// Confirms a deleted GM duration.
#[must_use]
pub fn gm_duration_deleted(duration: &GmDuration) -> String {
    format!("The `{}` GM duration has been deleted.", duration.description)
}

/// Confirms a configuration change.
#[must_use]
pub fn setting_updated(setting: &Setting) -> String {
    format!(
        "The `{}` setting has been set to `{}`.",
        setting.name(),
        setting_value(setting)
    )
}

fn setting_value(setting: &Setting) -> String {
    match setting {
        Setting::RoundDisplayName(label) => label.clone(),
        Setting::AutoClearTurnorder(flag) | Setting::AutoDeleteDurations(flag) => flag.to_string(),
    }
}

fn usage(command: CommandName) -> (&'static str, &'static str) {
    match command {
        CommandName::AddDuration => (
            "|<name>|<length>|<initiative>",
            "Adds a duration to the turn order. The initiative defaults to 0.",
        ),
        CommandName::AddGmDuration => (
            "|<description>|<length>",
            "Adds a private duration only the GM sees. It loses a round at the start of each round.",
        ),
        CommandName::ShowGmDuration => ("", "Shows every GM duration."),
        CommandName::DeleteGmDuration => ("|<id>", "Deletes the GM duration with the given id."),
        CommandName::Clear => ("", "Empties the turn order and deletes every GM duration."),
        CommandName::Sort => (
            "|<starting round>|<round formula>|<ascending or descending>",
            "Sorts the turn order, keeping the current turn. Defaults to round 1, a formula of +1 and descending order.",
        ),
        CommandName::Config => ("|<setting>|<value>", "Changes a setting listed below."),
    }
}

/// Renders the command summary and the current settings.
#[must_use]
pub fn settings_summary(state: &ConfigurationState) -> String {
    let mut lines = vec!["Durations commands".to_owned()];
    for command in CommandName::ALL {
        let (arguments, description) = usage(command);
        let gm_only = if command.requires_game_master() {
            " (GM only)"
        } else {
            ""
        };
        lines.push(format!(
            "  `{PREFIX} {command}{arguments}`{gm_only}: {description}"
        ));
    }

    lines.push("Settings".to_owned());
    let settings = [
        Setting::RoundDisplayName(state.round_label.clone()),
        Setting::AutoClearTurnorder(state.auto_clear_turnorder),
        Setting::AutoDeleteDurations(state.auto_delete_durations),
    ];
    lines.extend(
        settings
            .iter()
            .map(|setting| format!("  {}: {}", setting.name(), setting_value(setting))),
    );
    lines.join("\n")
}
