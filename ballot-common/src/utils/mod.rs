//! Common helpers shared across the ballot workspace.

pub mod time;
