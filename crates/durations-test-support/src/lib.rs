//! Shared test mocks and utilities for the Durations turn-order tracker.

mod announcer;
mod clock;
mod repository;

pub use announcer::RecordingAnnouncer;
pub use clock::FixedClock;
pub use repository::{
    FailingStateRepository, FailingTurnOrderStore, InMemoryStateRepository,
    ReadOnlyStateRepository, ReadOnlyTurnOrderStore, RecordingTurnOrderStore,
};
