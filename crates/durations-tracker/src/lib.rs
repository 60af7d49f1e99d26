//! Durations: the turn-order tracker bounded context.
//!
//! Responsible for merging timed durations into the shared turn order,
//! keeping the round marker and the current turn in place, recognising a
//! normal turn advance, and expiring public and GM-only durations as the
//! rounds go by.

pub mod application;
pub mod domain;
