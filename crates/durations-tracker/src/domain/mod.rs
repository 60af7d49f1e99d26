//! Domain model and pure turn-order logic.

pub mod advance;
pub mod commands;
pub mod entry;
pub mod lifecycle;
pub mod parser;
pub mod reconcile;
pub mod report;
pub mod settings;
pub mod tally;
