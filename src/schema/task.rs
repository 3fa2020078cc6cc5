use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::calendar::Day;
use super::condition::LockCondition;
use super::player::Identity;

/// Time-based escalation of a task's difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScaling {
    /// First day on which scaling applies.
    pub start_day: Day,
    /// Days per escalation step. Values below 1 are treated as 1.
    pub interval_days: i32,
    /// Difficulty added per elapsed interval.
    pub level_increase: f64,
    /// Ceiling on the scaled difficulty.
    pub max_level: f64,
}

/// Rewards granted when an activity or task resolves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rewards {
    #[serde(default)]
    pub money: Option<f64>,
    #[serde(default)]
    pub fame: Option<f64>,
    #[serde(default)]
    pub public_opinion: Option<f64>,
    #[serde(default)]
    pub mask: Option<f64>,
    #[serde(default)]
    pub reputation: FxHashMap<String, i64>,
    /// Item ids granted.
    #[serde(default)]
    pub items: Vec<String>,
}

/// A gated, difficulty-rated activity the player can attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Base difficulty, nominally 1–10.
    pub difficulty: f64,
    #[serde(default)]
    pub scaling: Option<DifficultyScaling>,
    /// Persona the player must present as, if any.
    #[serde(default)]
    pub required_identity: Option<Identity>,
    #[serde(default)]
    pub lock_conditions: Vec<LockCondition>,
    #[serde(default)]
    pub rewards: Rewards,
    /// Number of recorded completions; survives repeated runs.
    #[serde(default)]
    pub completion_count: u32,
    #[serde(default)]
    pub completed_day: Option<Day>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, difficulty: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            difficulty,
            scaling: None,
            required_identity: None,
            lock_conditions: Vec::new(),
            rewards: Rewards::default(),
            completion_count: 0,
            completed_day: None,
        }
    }
}

/// How a downtime activity is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionMode {
    #[default]
    Automated,
    Roleplay,
}

/// Base XP granted by a training activity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default)]
    pub attribute_xp: Option<f64>,
    #[serde(default)]
    pub power_xp: Option<f64>,
}

/// A repeatable non-task action (work, training, rest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeActivity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mode: ResolutionMode,
    #[serde(default)]
    pub training_config: Option<TrainingConfig>,
    #[serde(default)]
    pub auto_rewards: Option<Rewards>,
    #[serde(default)]
    pub lock_conditions: Vec<LockCondition>,
}

impl DowntimeActivity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            mode: ResolutionMode::Automated,
            training_config: None,
            auto_rewards: None,
            lock_conditions: Vec::new(),
        }
    }
}

/// A random event that may interrupt a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Named collection of task ids. Membership lives on the pool, not on
/// the task.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskPool {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Named collection of random event ids.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventPool {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub events: Vec<String>,
}
