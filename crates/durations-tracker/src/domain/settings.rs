//! Tracker configuration and GM-only durations.

use std::fmt;
use std::str::FromStr;

use durations_core::error::DomainError;
use durations_core::repository::StateRepository;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Namespace the configuration is persisted under.
pub const STATE_NAMESPACE: &str = "Durations";

/// Display text of the round marker unless configured otherwise.
pub const DEFAULT_ROUND_LABEL: &str = "<= Round =>";

/// Direction the turn order is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Lowest value first.
    Ascending,
    /// Highest value first.
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.eq_ignore_ascii_case("ascending") {
            Ok(Self::Ascending)
        } else if text.eq_ignore_ascii_case("descending") {
            Ok(Self::Descending)
        } else {
            Err(DomainError::Validation(format!(
                "`{text}` is not a valid sorting order. The sorting order must either be `ascending` or `descending`."
            )))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// A private countdown only the game master sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmDuration {
    /// Creation time in Unix milliseconds; unique within the tracker.
    pub id: i64,
    /// What the duration tracks.
    pub description: String,
    /// Rounds left.
    pub remaining: i64,
    /// Change applied at the start of each round.
    pub step: i64,
}

impl GmDuration {
    /// The duration after one more round has started.
    #[must_use]
    pub fn ticked(&self) -> Self {
        Self {
            remaining: self.remaining.saturating_add(self.step),
            ..self.clone()
        }
    }

    /// Whether the duration has run out.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.remaining <= 0
    }
}

/// A single configuration change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// Display text of the round marker.
    RoundDisplayName(String),
    /// Clear the turn order whenever the tracker is opened.
    AutoClearTurnorder(bool),
    /// Delete durations that run out.
    AutoDeleteDurations(bool),
}

impl Setting {
    /// Setting names as typed in commands. Matched case-sensitively.
    pub const NAMES: [&'static str; 3] = [
        "roundDisplayName",
        "autoClearTurnorder",
        "autoDeleteDurations",
    ];

    /// Parses a setting name and its new value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an unknown name, a blank display
    /// name, or a flag that is not `true`/`false`.
    pub fn parse(name: &str, value: &str) -> Result<Self, DomainError> {
        match name {
            "roundDisplayName" => {
                if value.trim().is_empty() {
                    return Err(DomainError::Validation(format!(
                        "The new value for the `{name}` setting cannot be blank."
                    )));
                }
                Ok(Self::RoundDisplayName(value.to_owned()))
            }
            "autoClearTurnorder" => parse_flag(name, value).map(Self::AutoClearTurnorder),
            "autoDeleteDurations" => parse_flag(name, value).map(Self::AutoDeleteDurations),
            other => Err(DomainError::Validation(format!(
                "`{other}` is not a valid config setting. The setting must match exactly, including lettercase. The valid config settings are `{}`.",
                Self::NAMES.join("`, `")
            ))),
        }
    }

    /// The setting's command name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoundDisplayName(_) => Self::NAMES[0],
            Self::AutoClearTurnorder(_) => Self::NAMES[1],
            Self::AutoDeleteDurations(_) => Self::NAMES[2],
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, DomainError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(DomainError::Validation(format!(
            "`{value}` is not a valid setting value for the `{name}` setting. You must either pass in a new value of `true` or `false`."
        )))
    }
}

/// The tracker's persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationState {
    /// Display text of the round marker.
    #[serde(rename = "roundDisplayName")]
    pub round_label: String,
    /// Whether the turn order has been sorted since it was last cleared.
    #[serde(rename = "isInitiallySorted")]
    pub sorted_once: bool,
    /// Delete durations that run out.
    pub auto_delete_durations: bool,
    /// Clear the turn order whenever the tracker is opened.
    pub auto_clear_turnorder: bool,
    /// Order used by the most recent sort.
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Private durations, oldest first.
    #[serde(default)]
    pub gm_durations: Vec<GmDuration>,
}

impl Default for ConfigurationState {
    fn default() -> Self {
        Self {
            round_label: DEFAULT_ROUND_LABEL.to_owned(),
            sorted_once: false,
            auto_delete_durations: true,
            auto_clear_turnorder: true,
            sort_order: SortOrder::Descending,
            gm_durations: Vec::new(),
        }
    }
}

impl ConfigurationState {
    /// Loads the configuration, installing and saving the defaults the first
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the repository fails or the
    /// stored document cannot be read.
    pub fn load_or_install(repo: &dyn StateRepository) -> Result<Self, DomainError> {
        if let Some(document) = repo.load(STATE_NAMESPACE)? {
            return serde_json::from_value(document).map_err(|e| {
                DomainError::Infrastructure(format!("stored configuration is unreadable: {e}"))
            });
        }

        let state = Self::default();
        state.save(repo)?;
        info!(namespace = STATE_NAMESPACE, "installed default configuration");
        Ok(state)
    }

    /// Persists the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization or the
    /// repository fails.
    pub fn save(&self, repo: &dyn StateRepository) -> Result<(), DomainError> {
        let document = serde_json::to_value(self).map_err(|e| {
            DomainError::Infrastructure(format!("configuration serialization failed: {e}"))
        })?;
        repo.save(STATE_NAMESPACE, &document)
    }

    /// Forgets the current turn and every GM duration. Settings are kept.
    pub fn reset_tracking(&mut self) {
        self.gm_durations.clear();
        self.sorted_once = false;
    }

    /// Applies a configuration change.
    pub fn apply(&mut self, setting: &Setting) {
        match setting {
            Setting::RoundDisplayName(label) => self.round_label.clone_from(label),
            Setting::AutoClearTurnorder(flag) => self.auto_clear_turnorder = *flag,
            Setting::AutoDeleteDurations(flag) => self.auto_delete_durations = *flag,
        }
    }

    /// Adds a GM duration created at `now_millis`. The id is bumped past any
    /// existing id so ids stay unique.
    pub fn add_gm_duration(&mut self, description: &str, length: i64, now_millis: i64) -> GmDuration {
        let mut id = now_millis;
        while self.gm_durations.iter().any(|d| d.id == id) {
            id += 1;
        }
        let duration = GmDuration {
            id,
            description: description.to_owned(),
            remaining: length,
            step: -1,
        };
        self.gm_durations.push(duration.clone());
        duration
    }

    /// Removes the GM duration with `id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DurationNotFound` if no duration has that id.
    pub fn remove_gm_duration(&mut self, id: i64) -> Result<GmDuration, DomainError> {
        let index = self
            .gm_durations
            .iter()
            .position(|d| d.id == id)
            .ok_or(DomainError::DurationNotFound(id))?;
        Ok(self.gm_durations.remove(index))
    }
}
