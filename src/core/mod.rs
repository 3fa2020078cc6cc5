//! Progression and unlock rules.

pub mod calendar;
pub mod campaign;
pub mod conditions;
pub mod difficulty;
pub mod economy;
pub mod generator;
pub mod pipeline;
pub mod scheduler;
pub mod stats;
pub mod validate;
