//! Shared parsing and text utilities.

pub mod duration;
pub mod language;
