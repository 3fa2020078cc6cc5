use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::calendar::{Automator, Day, DayConfig, WeekTheme};
use super::player::{Item, Player};
use super::task::{DowntimeActivity, EventPool, RandomEvent, Task, TaskPool};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Engine-wide fallbacks for days without an explicit [`DayConfig`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineDefaults {
    #[serde(default)]
    pub default_task_pool_id: Option<String>,
    #[serde(default)]
    pub default_event_pool_id: Option<String>,
    /// Probability (0.0–1.0) that a day rolls a random event.
    #[serde(default)]
    pub random_event_chance: f64,
}

impl EngineDefaults {
    /// Load defaults from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<EngineDefaults, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse defaults from a RON string.
    pub fn parse_ron(input: &str) -> Result<EngineDefaults, LoadError> {
        Ok(ron::from_str(input)?)
    }
}

/// A complete snapshot of one save: the player plus every entity the
/// calendar and the content generator have produced so far.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub day: Day,
    pub player: Player,
    /// Global task list. Pools reference tasks in here by id.
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub task_pools: Vec<TaskPool>,
    #[serde(default)]
    pub events: Vec<RandomEvent>,
    #[serde(default)]
    pub event_pools: Vec<EventPool>,
    #[serde(default)]
    pub activities: Vec<DowntimeActivity>,
    /// Items offered for purchase.
    #[serde(default)]
    pub shop_items: Vec<Item>,
    #[serde(default)]
    pub automators: Vec<Automator>,
    #[serde(default)]
    pub day_configs: BTreeMap<Day, DayConfig>,
    #[serde(default)]
    pub week_themes: Vec<WeekTheme>,
}

impl GameState {
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn find_task_pool(&self, id: &str) -> Option<&TaskPool> {
        self.task_pools.iter().find(|pool| pool.id == id)
    }

    pub fn find_event(&self, id: &str) -> Option<&RandomEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn find_event_pool(&self, id: &str) -> Option<&EventPool> {
        self.event_pools.iter().find(|pool| pool.id == id)
    }

    /// Return the task pool with `id`, creating an empty one if absent.
    pub fn task_pool_mut(&mut self, id: &str) -> &mut TaskPool {
        let index = match self.task_pools.iter().position(|pool| pool.id == id) {
            Some(index) => index,
            None => {
                self.task_pools.push(TaskPool {
                    id: id.to_string(),
                    name: id.to_string(),
                    tasks: Vec::new(),
                });
                self.task_pools.len() - 1
            }
        };
        &mut self.task_pools[index]
    }

    /// Return the event pool with `id`, creating an empty one if absent.
    pub fn event_pool_mut(&mut self, id: &str) -> &mut EventPool {
        let index = match self.event_pools.iter().position(|pool| pool.id == id) {
            Some(index) => index,
            None => {
                self.event_pools.push(EventPool {
                    id: id.to_string(),
                    name: id.to_string(),
                    events: Vec::new(),
                });
                self.event_pools.len() - 1
            }
        };
        &mut self.event_pools[index]
    }

    /// Load a save from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<GameState, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a save from a RON string.
    pub fn parse_ron(input: &str) -> Result<GameState, LoadError> {
        Ok(ron::from_str(input)?)
    }

    /// Serialize the save to pretty-printed RON.
    pub fn to_ron(&self) -> Result<String, LoadError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}
