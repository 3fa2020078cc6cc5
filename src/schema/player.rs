use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// The four trainable character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Attribute {
    Strength,
    Intelligence,
    Agility,
    Charisma,
}

impl Attribute {
    /// All attributes in display order.
    pub const ALL: [Attribute; 4] = [
        Attribute::Strength,
        Attribute::Intelligence,
        Attribute::Agility,
        Attribute::Charisma,
    ];

    /// Lowercase key used by conditions and content files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Intelligence => "intelligence",
            Self::Agility => "agility",
            Self::Charisma => "charisma",
        }
    }

    /// Parse an attribute key, ignoring case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "strength" => Some(Self::Strength),
            "intelligence" => Some(Self::Intelligence),
            "agility" => Some(Self::Agility),
            "charisma" => Some(Self::Charisma),
            _ => None,
        }
    }
}

/// Base attribute values. The fractional part of each value is training
/// progress toward the next whole level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: f64,
    pub intelligence: f64,
    pub agility: f64,
    pub charisma: f64,
}

impl Attributes {
    pub fn new(strength: f64, intelligence: f64, agility: f64, charisma: f64) -> Self {
        Self {
            strength,
            intelligence,
            agility,
            charisma,
        }
    }

    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Intelligence => self.intelligence,
            Attribute::Agility => self.agility,
            Attribute::Charisma => self.charisma,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut f64 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Agility => &mut self.agility,
            Attribute::Charisma => &mut self.charisma,
        }
    }
}

/// Named resource fields a condition can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Money,
    Mask,
    Fame,
    PublicOpinion,
}

impl ResourceKind {
    /// Parse a resource key. Accepts snake_case and camelCase spellings.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "money" => Some(Self::Money),
            "mask" => Some(Self::Mask),
            "fame" => Some(Self::Fame),
            "public_opinion" | "publicopinion" => Some(Self::PublicOpinion),
            _ => None,
        }
    }
}

/// The player's spendable and reputational resources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub money: f64,
    /// Secret-identity integrity, 0–100.
    pub mask: f64,
    pub fame: f64,
    /// Public opinion of the super persona, −100..100.
    pub public_opinion: f64,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            money: 0.0,
            mask: 100.0,
            fame: 0.0,
            public_opinion: 0.0,
        }
    }
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Money => self.money,
            ResourceKind::Mask => self.mask,
            ResourceKind::Fame => self.fame,
            ResourceKind::PublicOpinion => self.public_opinion,
        }
    }
}

/// Which persona the player currently presents as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Identity {
    #[default]
    Civilian,
    Super,
}

/// The fixed equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentSlot {
    Head,
    Body,
    Gadget,
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 4] = [
        EquipmentSlot::Head,
        EquipmentSlot::Body,
        EquipmentSlot::Gadget,
        EquipmentSlot::Accessory,
    ];
}

/// An ownable, possibly equippable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Slot the item occupies when equipped; `None` for consumables and
    /// plain inventory items.
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,
    /// Attribute deltas applied while the item is equipped.
    #[serde(default)]
    pub effects: FxHashMap<Attribute, f64>,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            slot: None,
            effects: FxHashMap::default(),
            cost: None,
        }
    }

    /// Builder-style helper to attach an attribute delta.
    pub fn with_effect(mut self, attribute: Attribute, delta: f64) -> Self {
        self.effects.insert(attribute, delta);
        self
    }

    pub fn in_slot(mut self, slot: EquipmentSlot) -> Self {
        self.slot = Some(slot);
        self
    }
}

/// One optional item per fixed slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub head: Option<Item>,
    #[serde(default)]
    pub body: Option<Item>,
    #[serde(default)]
    pub gadget: Option<Item>,
    #[serde(default)]
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Head => self.head.as_ref(),
            EquipmentSlot::Body => self.body.as_ref(),
            EquipmentSlot::Gadget => self.gadget.as_ref(),
            EquipmentSlot::Accessory => self.accessory.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::Gadget => &mut self.gadget,
            EquipmentSlot::Accessory => &mut self.accessory,
        }
    }

    /// Iterate over equipped items, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        EquipmentSlot::ALL.into_iter().filter_map(|slot| self.get(slot))
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.iter().any(|item| item.id == item_id)
    }
}

/// Key of a training modifier: one of the attributes, or `POWER` for
/// any trainable power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingKey {
    Strength,
    Intelligence,
    Agility,
    Charisma,
    Power,
}

impl From<Attribute> for TrainingKey {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Strength => Self::Strength,
            Attribute::Intelligence => Self::Intelligence,
            Attribute::Agility => Self::Agility,
            Attribute::Charisma => Self::Charisma,
        }
    }
}

/// A purchasable, owned-once base improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub owned: bool,
    /// Flat training XP bonuses keyed by attribute or `POWER`.
    #[serde(default)]
    pub training_modifiers: FxHashMap<TrainingKey, f64>,
    /// Flat money added to automated work income.
    #[serde(default)]
    pub work_money_bonus: Option<f64>,
}

impl Upgrade {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cost: 0.0,
            owned: false,
            training_modifiers: FxHashMap::default(),
            work_money_bonus: None,
        }
    }
}

/// A trainable super power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Power {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Accumulated training XP.
    #[serde(default)]
    pub xp: f64,
}

/// The player character. The engine reads this but never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub identity: Identity,
    pub attributes: Attributes,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipment: Equipment,
    /// Known upgrades, owned or not, in acquisition order.
    #[serde(default)]
    pub upgrades: Vec<Upgrade>,
    #[serde(default)]
    pub powers: Vec<Power>,
    #[serde(default)]
    pub tags: FxHashSet<String>,
    #[serde(default)]
    pub reputations: FxHashMap<String, i64>,
}

impl Player {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// True if the item is in the inventory or equipped in any slot.
    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|item| item.id == item_id) || self.equipment.contains(item_id)
    }

    /// True only if the upgrade is known and flagged as owned.
    pub fn owns_upgrade(&self, upgrade_id: &str) -> bool {
        self.upgrades
            .iter()
            .any(|upgrade| upgrade.id == upgrade_id && upgrade.owned)
    }

    /// Owned upgrades in acquisition order.
    pub fn owned_upgrades(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter().filter(|upgrade| upgrade.owned)
    }

    /// Standing with a faction or person; absent entries read as 0.
    pub fn reputation(&self, subject: &str) -> i64 {
        self.reputations.get(subject).copied().unwrap_or(0)
    }
}
