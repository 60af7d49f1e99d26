//! Durations Core: shared abstractions.
//!
//! This crate defines the ports and types that the tracker context and its
//! hosts depend on: errors, time, notifications, the platform's turn record
//! shape, and the collaborator traits. It contains no infrastructure code.

pub mod announce;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod record;
pub mod repository;
