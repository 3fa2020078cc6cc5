//! Effective attribute resolution.
//!
//! Effective attributes are the base values plus every equipped item's
//! deltas, floored to whole levels. Fractional training progress never
//! counts toward a gate until it completes a level.

use serde::{Deserialize, Serialize};

use crate::schema::player::{Attribute, Player};

/// Whole-level attribute values after equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub strength: i64,
    pub intelligence: i64,
    pub agility: i64,
    pub charisma: i64,
}

impl EffectiveStats {
    pub fn get(&self, attribute: Attribute) -> i64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Intelligence => self.intelligence,
            Attribute::Agility => self.agility,
            Attribute::Charisma => self.charisma,
        }
    }
}

/// Compute a player's effective attributes.
pub fn effective_stats(player: &Player) -> EffectiveStats {
    let mut totals = player.attributes;
    for item in player.equipment.iter() {
        for (attribute, delta) in &item.effects {
            *totals.get_mut(*attribute) += delta;
        }
    }

    EffectiveStats {
        strength: whole_level(totals.strength),
        intelligence: whole_level(totals.intelligence),
        agility: whole_level(totals.agility),
        charisma: whole_level(totals.charisma),
    }
}

fn whole_level(value: f64) -> i64 {
    value.floor() as i64
}
