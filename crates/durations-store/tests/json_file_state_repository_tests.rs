//! Integration tests for `JsonFileStateRepository`.

use durations_core::repository::StateRepository;
use durations_store::json_file_state_repository::JsonFileStateRepository;
use durations_tracker::domain::settings::{ConfigurationState, STATE_NAMESPACE, SortOrder};

// --- load_or_install ---

#[test]
fn test_install_writes_defaults_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("durations-state.json");
    let repo = JsonFileStateRepository::open(&path).unwrap();

    let state = ConfigurationState::load_or_install(&repo).unwrap();

    assert_eq!(state, ConfigurationState::default());
    let raw = std::fs::read_to_string(&path).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk["Durations"]["roundDisplayName"], "<= Round =>");
    assert_eq!(on_disk["Durations"]["isInitiallySorted"], false);
    assert_eq!(on_disk["Durations"]["autoClearTurnorder"], true);
    assert_eq!(on_disk["Durations"]["autoDeleteDurations"], true);
}

// --- save + reopen round-trip ---

#[test]
fn test_configuration_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("durations-state.json");

    {
        let repo = JsonFileStateRepository::open(&path).unwrap();
        let mut state = ConfigurationState::load_or_install(&repo).unwrap();
        state.sort_order = SortOrder::Ascending;
        state.add_gm_duration("Poison", 2, 1_712_267_938_054);
        state.save(&repo).unwrap();
    }

    let repo = JsonFileStateRepository::open(&path).unwrap();
    let state = ConfigurationState::load_or_install(&repo).unwrap();

    assert_eq!(state.sort_order, SortOrder::Ascending);
    assert_eq!(state.gm_durations.len(), 1);
    assert_eq!(state.gm_durations[0].id, 1_712_267_938_054);
}

#[test]
fn test_state_written_by_older_version_loads_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("durations-state.json");
    std::fs::write(
        &path,
        r#"{"Durations":{"roundDisplayName":"Round","isInitiallySorted":true,"autoDeleteDurations":false,"autoClearTurnorder":true}}"#,
    )
    .unwrap();

    let repo = JsonFileStateRepository::open(&path).unwrap();
    let state = ConfigurationState::load_or_install(&repo).unwrap();

    assert_eq!(state.round_label, "Round");
    assert!(state.sorted_once);
    assert!(!state.auto_delete_durations);
    assert_eq!(state.sort_order, SortOrder::Descending);
    assert!(state.gm_durations.is_empty());
    assert!(repo.load(STATE_NAMESPACE).unwrap().is_some());
}
