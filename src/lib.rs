//! Progression Engine: the rules behind a narrative life-simulation game.
//!
//! Computes effective character attributes, evaluates gated-content
//! conditions, scales task difficulty over the in-game calendar and
//! schedules recurring content generators. Every rule is a pure function
//! over a snapshot of plain game data; the crate never renders anything
//! and never talks to storage on its own.

pub mod core;
pub mod schema;
