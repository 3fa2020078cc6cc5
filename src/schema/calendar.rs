use serde::{Deserialize, Serialize};

/// In-game calendar day, starting at 1.
pub type Day = u32;

/// `end_day` value meaning "no end".
pub const UNBOUNDED: i64 = -1;

/// What a content generator produces when an automator fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutomatorType {
    Task,
    Event,
    Item,
    Upgrade,
}

/// Parameters handed to the content generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Pool that generated tasks or events should join.
    #[serde(default)]
    pub target_pool_id: Option<String>,
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default)]
    pub difficulty_min: Option<u32>,
    #[serde(default)]
    pub difficulty_max: Option<u32>,
    /// Free-text narrative context for the generator.
    #[serde(default)]
    pub context: String,
}

fn default_amount() -> u32 {
    1
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            target_pool_id: None,
            amount: default_amount(),
            difficulty_min: None,
            difficulty_max: None,
            context: String::new(),
        }
    }
}

/// A recurring, interval-driven content generator.
///
/// `active` and `next_run_day` are the only persisted scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automator {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub automator_type: AutomatorType,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Days between runs. Values below 1 are treated as 1.
    pub interval_days: i32,
    pub next_run_day: Day,
    #[serde(default)]
    pub start_day: Option<Day>,
    /// Last active day, inclusive. [`UNBOUNDED`] means no end.
    #[serde(default)]
    pub end_day: Option<i64>,
    #[serde(default)]
    pub config: GenerationConfig,
}

fn default_active() -> bool {
    true
}

impl Automator {
    pub fn new(
        id: impl Into<String>,
        automator_type: AutomatorType,
        interval_days: i32,
        next_run_day: Day,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            automator_type,
            active: true,
            interval_days,
            next_run_day,
            start_day: None,
            end_day: None,
            config: GenerationConfig::default(),
        }
    }

    /// Interval clamped to at least one day.
    pub fn effective_interval(&self) -> Day {
        Day::try_from(self.interval_days.max(1)).unwrap_or(1)
    }
}

/// Per-day override of the task pool and random-event settings. Each
/// field is independently optional; absent fields use engine defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayConfig {
    #[serde(default)]
    pub task_pool_id: Option<String>,
    #[serde(default)]
    pub event_pool_id: Option<String>,
    #[serde(default)]
    pub random_event_chance: Option<f64>,
}

/// A named narrative arc covering an inclusive day range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTheme {
    pub id: String,
    pub name: String,
    pub start_day: Day,
    pub end_day: Day,
    /// Narrative focus tag, e.g. `"gang_war"`.
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub description: String,
}

impl WeekTheme {
    pub fn contains(&self, day: Day) -> bool {
        (self.start_day..=self.end_day).contains(&day)
    }

    pub fn overlaps(&self, other: &WeekTheme) -> bool {
        self.start_day <= other.end_day && other.start_day <= self.end_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_interval_is_at_least_one() {
        let mut automator = Automator::new("a", AutomatorType::Task, 3, 1);
        assert_eq!(automator.effective_interval(), 3);
        automator.interval_days = 0;
        assert_eq!(automator.effective_interval(), 1);
        automator.interval_days = -4;
        assert_eq!(automator.effective_interval(), 1);
    }

    #[test]
    fn automator_type_field_is_named_type() {
        let automator: Automator = ron::from_str(
            r#"(id: "loot", type: ITEM, interval_days: 7, next_run_day: 3)"#,
        )
        .unwrap();
        assert_eq!(automator.automator_type, AutomatorType::Item);
        assert!(automator.active);
        assert_eq!(automator.config.amount, 1);
    }

    #[test]
    fn theme_overlap() {
        let first = WeekTheme {
            id: "w1".to_string(),
            name: "Arrival".to_string(),
            start_day: 1,
            end_day: 7,
            focus: "setup".to_string(),
            description: String::new(),
        };
        let mut second = first.clone();
        second.start_day = 8;
        second.end_day = 14;
        assert!(!first.overlaps(&second));
        second.start_day = 7;
        assert!(first.overlaps(&second));
        assert!(first.contains(7));
        assert!(!first.contains(8));
    }
}
