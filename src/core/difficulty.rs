//! Time-based task difficulty escalation.

use crate::schema::calendar::Day;
use crate::schema::task::Task;

/// Lowest difficulty on the nominal scale.
pub const MIN_DIFFICULTY: u32 = 1;

/// Highest difficulty on the nominal scale.
pub const MAX_DIFFICULTY: u32 = 10;

/// Difficulty of `task` on `current_day`.
///
/// Without a scaling rule, or before the rule's start day, this is the
/// base difficulty. Afterwards every full elapsed interval adds
/// `level_increase`, capped at `max_level`. The result never drops below
/// the base difficulty and never decreases as days pass.
pub fn current_difficulty(task: &Task, current_day: Day) -> f64 {
    let base = task.difficulty;
    let Some(scaling) = task.scaling else {
        return base;
    };
    if current_day < scaling.start_day {
        return base;
    }

    // A zero or negative interval would divide by zero; treat it as daily.
    let interval = u32::try_from(scaling.interval_days.max(1)).unwrap_or(1);
    let intervals_passed = (current_day - scaling.start_day) / interval;
    let increase = f64::from(intervals_passed) * scaling.level_increase.max(0.0);

    (base + increase).min(scaling.max_level.max(base))
}
