//! Per-day configuration, task pool resolution and random events.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::conditions::is_task_available;
use crate::schema::calendar::{Day, DayConfig};
use crate::schema::state::{EngineDefaults, GameState};
use crate::schema::task::{RandomEvent, Task};

/// Day configuration with engine defaults filled in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolvedDayConfig {
    pub task_pool_id: Option<String>,
    pub event_pool_id: Option<String>,
    pub random_event_chance: f64,
}

/// Resolve the configuration for `day`. Each field falls back to the
/// engine default independently.
pub fn resolve_day_config(
    day_configs: &BTreeMap<Day, DayConfig>,
    defaults: &EngineDefaults,
    day: Day,
) -> ResolvedDayConfig {
    let config = day_configs.get(&day);
    ResolvedDayConfig {
        task_pool_id: config
            .and_then(|c| c.task_pool_id.clone())
            .or_else(|| defaults.default_task_pool_id.clone()),
        event_pool_id: config
            .and_then(|c| c.event_pool_id.clone())
            .or_else(|| defaults.default_event_pool_id.clone()),
        random_event_chance: config
            .and_then(|c| c.random_event_chance)
            .unwrap_or(defaults.random_event_chance),
    }
}

/// Tasks in the day's pool, in pool order. Ids missing from the global
/// task list are skipped.
pub fn pool_tasks<'a>(state: &'a GameState, defaults: &EngineDefaults, day: Day) -> Vec<&'a Task> {
    let resolved = resolve_day_config(&state.day_configs, defaults, day);
    let Some(pool) = resolved
        .task_pool_id
        .as_deref()
        .and_then(|id| state.find_task_pool(id))
    else {
        return Vec::new();
    };

    pool.tasks
        .iter()
        .filter_map(|id| state.find_task(id))
        .collect()
}

/// Tasks in the day's pool that the player can currently take on.
pub fn available_tasks<'a>(
    state: &'a GameState,
    defaults: &EngineDefaults,
    day: Day,
) -> Vec<&'a Task> {
    pool_tasks(state, defaults, day)
        .into_iter()
        .filter(|task| is_task_available(&state.player, state, task))
        .collect()
}

/// Roll the day's random event.
///
/// The roll is seeded from `seed` and `day`, so replaying a save yields
/// the same events. Returns `None` when the roll misses or the resolved
/// event pool has no known events.
pub fn roll_random_event<'a>(
    state: &'a GameState,
    defaults: &EngineDefaults,
    day: Day,
    seed: u64,
) -> Option<&'a RandomEvent> {
    let resolved = resolve_day_config(&state.day_configs, defaults, day);
    if resolved.random_event_chance <= 0.0 {
        return None;
    }

    let pool = state.find_event_pool(resolved.event_pool_id.as_deref()?)?;
    let candidates: Vec<&RandomEvent> = pool
        .events
        .iter()
        .filter_map(|id| state.find_event(id))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(day).wrapping_mul(7919)));
    if rng.gen::<f64>() >= resolved.random_event_chance {
        return None;
    }
    candidates.choose(&mut rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::condition::{ConditionKind, LockCondition, Operator};
    use crate::schema::task::{EventPool, TaskPool};

    fn defaults() -> EngineDefaults {
        EngineDefaults {
            default_task_pool_id: Some("city".to_string()),
            default_event_pool_id: Some("street".to_string()),
            random_event_chance: 0.25,
        }
    }

    fn make_state() -> GameState {
        let mut state = GameState::default();
        state.tasks.push(Task::new("mugging", "Stop a Mugging", 2.0));
        state.tasks.push(Task::new("fire", "Burning Building", 4.0));
        let mut gated = Task::new("vault", "Crack the Vault", 8.0);
        gated.lock_conditions.push(LockCondition::new(
            ConditionKind::Tag,
            "safecracker",
            Operator::Has,
            true,
        ));
        state.tasks.push(gated);

        state.task_pools.push(TaskPool {
            id: "city".to_string(),
            name: "City".to_string(),
            tasks: vec!["mugging".to_string(), "deleted".to_string(), "fire".to_string()],
        });
        state.task_pools.push(TaskPool {
            id: "heist".to_string(),
            name: "Heist Week".to_string(),
            tasks: vec!["vault".to_string(), "fire".to_string()],
        });

        state.events.push(RandomEvent {
            id: "blackout".to_string(),
            title: "Blackout".to_string(),
            description: String::new(),
        });
        state.event_pools.push(EventPool {
            id: "street".to_string(),
            name: "Street".to_string(),
            events: vec!["blackout".to_string(), "missing".to_string()],
        });
        state
    }

    #[test]
    fn absent_day_uses_defaults() {
        let resolved = resolve_day_config(&BTreeMap::new(), &defaults(), 3);
        assert_eq!(resolved.task_pool_id.as_deref(), Some("city"));
        assert_eq!(resolved.event_pool_id.as_deref(), Some("street"));
        assert!((resolved.random_event_chance - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let mut configs = BTreeMap::new();
        configs.insert(
            4,
            DayConfig {
                task_pool_id: Some("heist".to_string()),
                ..DayConfig::default()
            },
        );
        let resolved = resolve_day_config(&configs, &defaults(), 4);
        assert_eq!(resolved.task_pool_id.as_deref(), Some("heist"));
        assert_eq!(resolved.event_pool_id.as_deref(), Some("street"));
        assert!((resolved.random_event_chance - 0.25).abs() < f64::EPSILON);

        configs.insert(
            5,
            DayConfig {
                random_event_chance: Some(0.0),
                ..DayConfig::default()
            },
        );
        let resolved = resolve_day_config(&configs, &defaults(), 5);
        assert_eq!(resolved.task_pool_id.as_deref(), Some("city"));
        assert!(resolved.random_event_chance.abs() < f64::EPSILON);
    }

    #[test]
    fn pool_join_skips_missing_tasks() {
        let state = make_state();
        let ids: Vec<&str> = pool_tasks(&state, &defaults(), 1)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["mugging", "fire"]);
    }

    #[test]
    fn unknown_pool_yields_no_tasks() {
        let mut state = make_state();
        state.day_configs.insert(
            2,
            DayConfig {
                task_pool_id: Some("nowhere".to_string()),
                ..DayConfig::default()
            },
        );
        assert!(pool_tasks(&state, &defaults(), 2).is_empty());
        assert!(pool_tasks(&state, &EngineDefaults::default(), 1).is_empty());
    }

    #[test]
    fn available_tasks_apply_gating() {
        let mut state = make_state();
        state.day_configs.insert(
            6,
            DayConfig {
                task_pool_id: Some("heist".to_string()),
                ..DayConfig::default()
            },
        );
        let ids: Vec<&str> = available_tasks(&state, &defaults(), 6)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["fire"]);

        state.player.tags.insert("safecracker".to_string());
        assert_eq!(available_tasks(&state, &defaults(), 6).len(), 2);
    }

    #[test]
    fn random_event_is_deterministic() {
        let state = make_state();
        let mut defaults = defaults();
        defaults.random_event_chance = 0.5;
        for day in 1..30 {
            let first = roll_random_event(&state, &defaults, day, 42).map(|e| e.id.clone());
            let second = roll_random_event(&state, &defaults, day, 42).map(|e| e.id.clone());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn certain_chance_always_picks_known_event() {
        let state = make_state();
        let mut defaults = defaults();
        defaults.random_event_chance = 1.0;
        for day in 1..20 {
            let event = roll_random_event(&state, &defaults, day, 7).unwrap();
            assert_eq!(event.id, "blackout");
        }
    }

    #[test]
    fn zero_chance_or_missing_pool_never_rolls() {
        let state = make_state();
        let mut defaults = defaults();
        defaults.random_event_chance = 0.0;
        assert!(roll_random_event(&state, &defaults, 1, 1).is_none());

        defaults.random_event_chance = 1.0;
        defaults.default_event_pool_id = Some("absent".to_string());
        assert!(roll_random_event(&state, &defaults, 1, 1).is_none());
    }
}
