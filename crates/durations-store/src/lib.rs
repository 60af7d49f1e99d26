//! Durations storage adapters.
//!
//! Implementations of the core ports for a single-process host: a JSON file
//! holding the namespaced configuration, the shared turn order kept in
//! memory, and a bounded feed of announcements.

pub mod announcement_feed;
pub mod json_file_state_repository;
pub mod memory_turn_order;
