//! Durations HTTP host library.
//!
//! Exposes the route modules and shared state so integration tests can build
//! the same router the binary serves.

pub mod error;
pub mod routes;
pub mod state;
