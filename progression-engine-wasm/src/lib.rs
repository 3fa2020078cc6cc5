//! WASM bindings for progression-engine: the read side used by the web UI.
//!
//! The UI keeps the save as JSON and asks the engine what to show or
//! enable. Every method takes and returns JSON strings.

use wasm_bindgen::prelude::*;

use progression_engine::core::calendar::resolve_day_config;
use progression_engine::core::conditions::evaluate_all;
use progression_engine::core::difficulty::current_difficulty;
use progression_engine::core::economy::{training_xp, work_income, TrainingTarget};
use progression_engine::core::pipeline::ProgressionEngine;
use progression_engine::core::stats::effective_stats;
use progression_engine::schema::condition::LockCondition;
use progression_engine::schema::player::Attribute;
use progression_engine::schema::state::{EngineDefaults, GameState};
use progression_engine::schema::task::DowntimeActivity;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct TaskInfo {
    id: String,
    title: String,
    difficulty: f64,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn parse_target(s: &str) -> Option<TrainingTarget> {
    if s.eq_ignore_ascii_case("power") {
        return Some(TrainingTarget::Power);
    }
    Attribute::from_key(s).map(TrainingTarget::Attribute)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// A loaded save plus the engine configuration, held on the WASM side.
#[wasm_bindgen]
pub struct ProgressionSession {
    engine: ProgressionEngine,
    state: GameState,
}

#[wasm_bindgen]
impl ProgressionSession {
    /// Create a session from a JSON save and JSON engine defaults.
    /// An empty `defaults_json` uses built-in defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(state_json: &str, defaults_json: &str, seed: u64) -> Result<ProgressionSession, JsError> {
        let state: GameState = serde_json::from_str(state_json)
            .map_err(|e| JsError::new(&format!("Invalid save JSON: {e}")))?;
        let defaults: EngineDefaults = if defaults_json.trim().is_empty() {
            EngineDefaults::default()
        } else {
            serde_json::from_str(defaults_json)
                .map_err(|e| JsError::new(&format!("Invalid defaults JSON: {e}")))?
        };

        let engine = ProgressionEngine::builder()
            .seed(seed)
            .defaults(defaults)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;

        Ok(ProgressionSession { engine, state })
    }

    /// Replace the held save after the UI's reducer changed it.
    pub fn update_state(&mut self, state_json: &str) -> Result<(), JsError> {
        self.state = serde_json::from_str(state_json)
            .map_err(|e| JsError::new(&format!("Invalid save JSON: {e}")))?;
        Ok(())
    }

    /// Return the held save as JSON.
    pub fn state(&self) -> Result<String, JsError> {
        to_json(&self.state)
    }

    /// Effective, floored attributes of the player as a JSON object.
    pub fn effective_stats(&self) -> Result<String, JsError> {
        to_json(&effective_stats(&self.state.player))
    }

    /// Evaluate a JSON array of lock conditions. `null` or `[]` passes.
    pub fn evaluate_all(&self, conditions_json: &str) -> Result<bool, JsError> {
        let conditions: Option<Vec<LockCondition>> = serde_json::from_str(conditions_json)
            .map_err(|e| JsError::new(&format!("Invalid conditions JSON: {e}")))?;
        Ok(evaluate_all(
            &self.state.player,
            &self.state,
            conditions.as_deref(),
        ))
    }

    /// Current difficulty of a task in the global task list.
    pub fn current_difficulty(&self, task_id: &str) -> Result<f64, JsError> {
        let task = self
            .state
            .find_task(task_id)
            .ok_or_else(|| JsError::new(&format!("Unknown task: {task_id}")))?;
        Ok(current_difficulty(task, self.state.day))
    }

    /// Training XP as `{ total, breakdown }`. `target` is an attribute
    /// name or `"power"`.
    pub fn training_xp(&self, activity_id: &str, target: &str) -> Result<String, JsError> {
        let activity = self.activity(activity_id)?;
        let target = parse_target(target)
            .ok_or_else(|| JsError::new(&format!("Unknown training target: {target}")))?;
        to_json(&training_xp(&self.state.player, activity, target))
    }

    /// Work income as `{ total, breakdown }`.
    pub fn work_income(&self, activity_id: &str) -> Result<String, JsError> {
        let activity = self.activity(activity_id)?;
        to_json(&work_income(&self.state.player, activity))
    }

    /// Resolved day configuration for `day` as JSON.
    pub fn day_config(&self, day: u32) -> Result<String, JsError> {
        to_json(&resolve_day_config(
            &self.state.day_configs,
            self.engine.defaults(),
            day,
        ))
    }

    /// Tasks the player can take on today, with their current difficulty.
    pub fn available_tasks(&self) -> Result<String, JsError> {
        let tasks: Vec<TaskInfo> = self
            .engine
            .available_tasks(&self.state)
            .into_iter()
            .map(|task| TaskInfo {
                id: task.id.clone(),
                title: task.title.clone(),
                difficulty: current_difficulty(task, self.state.day),
            })
            .collect();
        to_json(&tasks)
    }

    /// Return JSON array of attribute keys.
    pub fn attributes() -> String {
        let keys: Vec<&str> = Attribute::ALL.iter().map(|a| a.key()).collect();
        serde_json::to_string(&keys).unwrap_or_else(|_| "[]".to_string())
    }
}

// Private helpers
impl ProgressionSession {
    fn activity(&self, activity_id: &str) -> Result<&DowntimeActivity, JsError> {
        self.state
            .activities
            .iter()
            .find(|activity| activity.id == activity_id)
            .ok_or_else(|| JsError::new(&format!("Unknown activity: {activity_id}")))
    }
}
