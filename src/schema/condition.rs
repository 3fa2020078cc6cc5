use serde::{Deserialize, Serialize};

/// What a lock condition inspects.
///
/// Kinds this build does not know deserialize as [`ConditionKind::Unknown`]
/// and evaluate as satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionKind {
    /// Effective (equipment-adjusted, floored) attribute.
    Stat,
    /// Named resource field.
    Resource,
    /// Item present in inventory or equipment.
    Item,
    /// Free-form player tag.
    Tag,
    /// Current calendar day.
    Day,
    /// Standing with a named subject.
    Reputation,
    /// Owned base upgrade.
    Upgrade,
    /// Mask integrity.
    Mask,
    /// Persisted completion count of a task in the global task list.
    Task,
    #[serde(other)]
    Unknown,
}

/// Comparison applied by a condition. Numeric kinds understand
/// `Gt`/`Lt`/`Eq`; presence kinds understand `Has`/`NotHas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Gt,
    Lt,
    Eq,
    Has,
    NotHas,
    Active,
}

impl Operator {
    /// Numeric comparison `current <op> target`. Non-numeric operators
    /// never hold.
    pub fn compare(&self, current: f64, target: f64) -> bool {
        match self {
            Self::Gt => current > target,
            Self::Lt => current < target,
            Self::Eq => current == target,
            Self::Has | Self::NotHas | Self::Active => false,
        }
    }
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl Default for ConditionValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl ConditionValue {
    /// Numeric view of the value: booleans read as 1/0 and text is parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for ConditionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ConditionValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for ConditionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single gating predicate over player and game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockCondition {
    pub kind: ConditionKind,
    /// Attribute, resource, item id, tag, reputation subject, upgrade id
    /// or task id, depending on `kind`. Unused by `Day` and `Mask`.
    #[serde(default)]
    pub key: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: ConditionValue,
}

impl LockCondition {
    pub fn new(
        kind: ConditionKind,
        key: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            operator,
            value: value.into(),
        }
    }
}
