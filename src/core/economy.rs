//! Training experience and work income.
//!
//! Both calculators add flat bonuses from owned upgrades to a base value
//! and return the total together with a readable breakdown, e.g.
//! `"Base: 0.25 + Bonuses: Home Gym (+0.1)"`. Bonus entries follow the
//! player's upgrade order.

use serde::{Deserialize, Serialize};

use crate::schema::player::{Attribute, Player, TrainingKey};
use crate::schema::task::DowntimeActivity;

/// Base XP for an attribute training session when the activity does not
/// configure one.
pub const DEFAULT_ATTRIBUTE_XP: f64 = 0.25;

/// Base XP for a power training session when the activity does not
/// configure one.
pub const DEFAULT_POWER_XP: f64 = 20.0;

/// Base pay for automated work when the activity grants no money.
pub const DEFAULT_WORK_MONEY: f64 = 0.0;

/// What a training session is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingTarget {
    Attribute(Attribute),
    /// Any trainable power; power modifiers are not power-specific.
    Power,
}

/// A computed total with its additive breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub total: f64,
    pub breakdown: String,
}

/// Experience gained from one training session. The result is added to
/// the target's progress; it is not a multiplier.
pub fn training_xp(
    player: &Player,
    activity: &DowntimeActivity,
    target: TrainingTarget,
) -> Calculation {
    let config = activity.training_config.unwrap_or_default();
    let (base, key) = match target {
        TrainingTarget::Attribute(attribute) => (
            config.attribute_xp.unwrap_or(DEFAULT_ATTRIBUTE_XP),
            TrainingKey::from(attribute),
        ),
        TrainingTarget::Power => (config.power_xp.unwrap_or(DEFAULT_POWER_XP), TrainingKey::Power),
    };

    let bonuses = player.owned_upgrades().filter_map(|upgrade| {
        upgrade
            .training_modifiers
            .get(&key)
            .map(|value| (*value, format!("{} (+{})", upgrade.name, value)))
    });

    accumulate(base, format!("Base: {}", base), bonuses)
}

/// Money earned from one automated work session.
pub fn work_income(player: &Player, activity: &DowntimeActivity) -> Calculation {
    let base = activity
        .auto_rewards
        .as_ref()
        .and_then(|rewards| rewards.money)
        .unwrap_or(DEFAULT_WORK_MONEY);

    let bonuses = player.owned_upgrades().filter_map(|upgrade| {
        upgrade
            .work_money_bonus
            .map(|value| (value, format!("{} (+${})", upgrade.name, value)))
    });

    accumulate(base, format!("Base: ${}", base), bonuses)
}

fn accumulate(
    base: f64,
    base_label: String,
    bonuses: impl Iterator<Item = (f64, String)>,
) -> Calculation {
    let mut total = base;
    let mut entries = Vec::new();
    for (value, label) in bonuses {
        total += value;
        entries.push(label);
    }

    let breakdown = if entries.is_empty() {
        base_label
    } else {
        format!("{} + Bonuses: {}", base_label, entries.join(", "))
    };

    Calculation { total, breakdown }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::player::Upgrade;
    use crate::schema::task::{Rewards, TrainingConfig};

    fn owned(id: &str, name: &str) -> Upgrade {
        let mut upgrade = Upgrade::new(id, name);
        upgrade.owned = true;
        upgrade
    }

    fn training_activity() -> DowntimeActivity {
        DowntimeActivity::new("train", "Training")
    }

    #[test]
    fn attribute_xp_without_bonuses() {
        let player = Player::default();
        let result = training_xp(
            &player,
            &training_activity(),
            TrainingTarget::Attribute(Attribute::Strength),
        );
        assert!((result.total - 0.25).abs() < 1e-9);
        assert_eq!(result.breakdown, "Base: 0.25");
    }

    #[test]
    fn attribute_xp_with_matching_upgrade() {
        let mut player = Player::default();
        let mut gym = owned("gym", "Home Gym");
        gym.training_modifiers.insert(TrainingKey::Strength, 0.1);
        gym.training_modifiers.insert(TrainingKey::Power, 5.0);
        player.upgrades.push(gym);

        let result = training_xp(
            &player,
            &training_activity(),
            TrainingTarget::Attribute(Attribute::Strength),
        );
        assert!((result.total - 0.35).abs() < 1e-9);
        assert_eq!(result.breakdown, "Base: 0.25 + Bonuses: Home Gym (+0.1)");
    }

    #[test]
    fn unowned_and_unrelated_upgrades_are_ignored() {
        let mut player = Player::default();
        let mut library = Upgrade::new("library", "Library");
        library.training_modifiers.insert(TrainingKey::Intelligence, 0.5);
        player.upgrades.push(library);
        let mut dojo = owned("dojo", "Dojo");
        dojo.training_modifiers.insert(TrainingKey::Agility, 0.2);
        player.upgrades.push(dojo);

        let result = training_xp(
            &player,
            &training_activity(),
            TrainingTarget::Attribute(Attribute::Intelligence),
        );
        assert_eq!(result.breakdown, "Base: 0.25");
    }

    #[test]
    fn power_xp_uses_power_key_and_config() {
        let mut player = Player::default();
        let mut chamber = owned("chamber", "Containment Chamber");
        chamber.training_modifiers.insert(TrainingKey::Power, 10.0);
        player.upgrades.push(chamber);
        let mut reactor = owned("reactor", "Arc Reactor");
        reactor.training_modifiers.insert(TrainingKey::Power, 2.5);
        player.upgrades.push(reactor);

        let result = training_xp(&player, &training_activity(), TrainingTarget::Power);
        assert!((result.total - 32.5).abs() < 1e-9);
        assert_eq!(
            result.breakdown,
            "Base: 20 + Bonuses: Containment Chamber (+10), Arc Reactor (+2.5)"
        );

        let mut activity = training_activity();
        activity.training_config = Some(TrainingConfig {
            attribute_xp: Some(0.5),
            power_xp: Some(40.0),
        });
        let result = training_xp(&player, &activity, TrainingTarget::Power);
        assert!((result.total - 52.5).abs() < 1e-9);
        let result = training_xp(
            &Player::default(),
            &activity,
            TrainingTarget::Attribute(Attribute::Charisma),
        );
        assert_eq!(result.breakdown, "Base: 0.5");
    }

    #[test]
    fn work_income_adds_money_bonuses() {
        let mut player = Player::default();
        let mut office = owned("office", "Home Office");
        office.work_money_bonus = Some(10.0);
        player.upgrades.push(office);
        player.upgrades.push(owned("couch", "Couch"));

        let mut activity = DowntimeActivity::new("shift", "Work a Shift");
        activity.auto_rewards = Some(Rewards {
            money: Some(50.0),
            ..Rewards::default()
        });

        let result = work_income(&player, &activity);
        assert!((result.total - 60.0).abs() < 1e-9);
        assert_eq!(result.breakdown, "Base: $50 + Bonuses: Home Office (+$10)");
    }

    #[test]
    fn work_income_defaults_to_zero_base() {
        let player = Player::default();
        let result = work_income(&player, &DowntimeActivity::new("idle", "Idle"));
        assert!(result.total.abs() < 1e-9);
        assert_eq!(result.breakdown, "Base: $0");
    }
}
