//! Gated-content condition evaluation.
//!
//! Evaluation never fails. Missing lookups resolve to defaults: unknown
//! attribute or resource keys read as 0, absent reputation as 0, unknown
//! upgrades as not owned, unknown tasks as never completed. Unknown
//! condition kinds are satisfied.

use crate::core::stats::effective_stats;
use crate::schema::condition::{ConditionKind, LockCondition, Operator};
use crate::schema::player::{Attribute, Player, ResourceKind};
use crate::schema::state::GameState;
use crate::schema::task::{DowntimeActivity, Task};

/// Evaluate a single condition against the player and game state.
pub fn evaluate(player: &Player, state: &GameState, condition: &LockCondition) -> bool {
    match condition.kind {
        ConditionKind::Stat => {
            let current = Attribute::from_key(&condition.key)
                .map_or(0, |attribute| effective_stats(player).get(attribute));
            compare(current as f64, condition)
        }
        ConditionKind::Resource => {
            let current = ResourceKind::from_key(&condition.key)
                .map_or(0.0, |kind| player.resources.get(kind));
            compare(current, condition)
        }
        ConditionKind::Item => presence(player.has_item(&condition.key), condition.operator),
        ConditionKind::Tag => presence(player.has_tag(&condition.key), condition.operator),
        ConditionKind::Day => compare(f64::from(state.day), condition),
        ConditionKind::Reputation => compare(player.reputation(&condition.key) as f64, condition),
        ConditionKind::Upgrade => {
            presence(player.owns_upgrade(&condition.key), condition.operator)
        }
        ConditionKind::Mask => compare(player.resources.mask, condition),
        ConditionKind::Task => {
            // Completion counts live on the global task list, not the
            // player's active tasks.
            let count = state
                .find_task(&condition.key)
                .map_or(0, |task| task.completion_count);
            match condition.operator {
                Operator::Has => count > 0,
                Operator::NotHas => count == 0,
                _ => compare(f64::from(count), condition),
            }
        }
        // Forward compatibility: content written for newer condition
        // kinds stays unlocked.
        ConditionKind::Unknown => true,
    }
}

/// True when every condition holds. Absent or empty lists are satisfied.
pub fn evaluate_all(
    player: &Player,
    state: &GameState,
    conditions: Option<&[LockCondition]>,
) -> bool {
    conditions.map_or(true, |conditions| {
        conditions
            .iter()
            .all(|condition| evaluate(player, state, condition))
    })
}

/// A task is available when the player presents the required identity
/// (if any) and all of its lock conditions hold.
pub fn is_task_available(player: &Player, state: &GameState, task: &Task) -> bool {
    let identity_ok = task
        .required_identity
        .map_or(true, |identity| identity == player.identity);
    identity_ok && evaluate_all(player, state, Some(task.lock_conditions.as_slice()))
}

pub fn is_activity_available(
    player: &Player,
    state: &GameState,
    activity: &DowntimeActivity,
) -> bool {
    evaluate_all(player, state, Some(activity.lock_conditions.as_slice()))
}

fn presence(present: bool, operator: Operator) -> bool {
    if operator == Operator::Has {
        present
    } else {
        !present
    }
}

fn compare(current: f64, condition: &LockCondition) -> bool {
    condition
        .value
        .as_number()
        .is_some_and(|target| condition.operator.compare(current, target))
}
