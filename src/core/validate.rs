//! Consistency checks over a loaded save.
//!
//! Dangling references are legal at run time (they resolve to "nothing"),
//! but they usually point at broken content, so they are reported here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::condition::{ConditionKind, LockCondition};
use crate::schema::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// A single validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "WARNING: {}", self.message),
            Severity::Error => write!(f, "ERROR: {}", self.message),
        }
    }
}

/// Check a save for dangling references and degenerate scheduling data.
pub fn validate(state: &GameState) -> Vec<Finding> {
    let mut findings = Vec::new();

    for pool in &state.task_pools {
        for id in &pool.tasks {
            if state.find_task(id).is_none() {
                findings.push(Finding::warning(format!(
                    "task pool '{}' references missing task '{}'",
                    pool.id, id
                )));
            }
        }
    }

    for pool in &state.event_pools {
        for id in &pool.events {
            if state.find_event(id).is_none() {
                findings.push(Finding::warning(format!(
                    "event pool '{}' references missing event '{}'",
                    pool.id, id
                )));
            }
        }
    }

    for (day, config) in &state.day_configs {
        if let Some(id) = &config.task_pool_id {
            if state.find_task_pool(id).is_none() {
                findings.push(Finding::error(format!(
                    "day {} uses missing task pool '{}'",
                    day, id
                )));
            }
        }
        if let Some(id) = &config.event_pool_id {
            if state.find_event_pool(id).is_none() {
                findings.push(Finding::error(format!(
                    "day {} uses missing event pool '{}'",
                    day, id
                )));
            }
        }
    }

    for automator in &state.automators {
        if automator.interval_days < 1 {
            findings.push(Finding::warning(format!(
                "automator '{}' has interval {}; it will run daily",
                automator.id, automator.interval_days
            )));
        }
        if let Some(id) = &automator.config.target_pool_id {
            let known = state.find_task_pool(id).is_some() || state.find_event_pool(id).is_some();
            if !known {
                findings.push(Finding::warning(format!(
                    "automator '{}' targets pool '{}' which does not exist yet",
                    automator.id, id
                )));
            }
        }
    }

    let mut themes: Vec<_> = state.week_themes.iter().collect();
    themes.sort_by_key(|theme| theme.start_day);
    for pair in themes.windows(2) {
        if pair[0].overlaps(pair[1]) {
            findings.push(Finding::error(format!(
                "week themes '{}' and '{}' overlap",
                pair[0].id, pair[1].id
            )));
        }
    }

    let tasks = state
        .tasks
        .iter()
        .map(|task| (format!("task '{}'", task.id), &task.lock_conditions));
    let activities = state
        .activities
        .iter()
        .map(|activity| (format!("activity '{}'", activity.id), &activity.lock_conditions));
    for (owner, conditions) in tasks.chain(activities) {
        if conditions.iter().any(is_unknown) {
            findings.push(Finding::warning(format!(
                "{} has a condition of unknown kind; it always passes",
                owner
            )));
        }
    }

    for finding in &findings {
        log::warn!("{}", finding.message);
    }
    findings
}

fn is_unknown(condition: &LockCondition) -> bool {
    condition.kind == ConditionKind::Unknown
}
