//! The platform's turn record shape.
//!
//! The hosting platform stores its turn tracker as a JSON array of loosely
//! typed objects. Numbers arrive as JSON numbers or as strings, so `pr` and
//! `initiative` are kept as raw JSON values here and interpreted by the
//! tracker context.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identity of entries that do not reference a token on the board.
pub const SYNTHETIC_ID: &str = "-1";

fn synthetic_id() -> String {
    SYNTHETIC_ID.to_owned()
}

/// One slot of the platform's turn tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Token identity, or `"-1"` for custom entries.
    #[serde(default = "synthetic_id")]
    pub id: String,
    /// Displayed value: a roll for tokens, a countdown for durations.
    #[serde(default)]
    pub pr: serde_json::Value,
    /// Display text for custom entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    /// Adjustment applied to `pr` when the entry takes its turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Explicit ordering value written by the tracker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<serde_json::Value>,
    /// Page the token lives on.
    #[serde(rename = "_pageid", default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

/// Parses the platform's serialized turn order. An empty string is an empty
/// turn order.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the text is not a JSON array of
/// turn records.
pub fn parse_turn_order(raw: &str) -> Result<Vec<TurnRecord>, DomainError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Infrastructure(format!("malformed turn order: {e}")))
}
