//! Application layer: handlers and the notification dispatch boundary.

pub mod command_handlers;
pub mod effects;
pub mod notification_handlers;
pub mod tracker;
