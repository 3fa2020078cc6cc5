//! Plain game data consumed by the rules in [`crate::core`].

pub mod calendar;
pub mod condition;
pub mod player;
pub mod state;
pub mod task;
