/// Hero Week demo: a week of training across two campaign phases, and
/// the tasks that unlock along the way.
///
/// Run with: cargo run --example hero_week

use progression_engine::core::campaign::CampaignTemplate;
use progression_engine::core::conditions::is_task_available;
use progression_engine::core::difficulty::current_difficulty;
use progression_engine::core::economy::{training_xp, work_income, TrainingTarget};
use progression_engine::core::generator::PlaceholderGenerator;
use progression_engine::core::pipeline::ProgressionEngine;
use progression_engine::core::stats::effective_stats;
use progression_engine::schema::calendar::WeekTheme;
use progression_engine::schema::condition::{ConditionKind, LockCondition, Operator};
use progression_engine::schema::player::{Attribute, Attributes, EquipmentSlot, Item, Player, Upgrade};
use progression_engine::schema::state::{EngineDefaults, GameState};
use progression_engine::schema::task::{DifficultyScaling, DowntimeActivity, Rewards, Task, TrainingConfig};

fn main() {
    // --- The player ---
    let mut player = Player {
        name: "Nightjar".to_string(),
        attributes: Attributes::new(3.4, 5.0, 4.2, 2.8),
        ..Player::default()
    };
    player.equipment.body = Some(
        Item::new("kevlar", "Kevlar Vest")
            .in_slot(EquipmentSlot::Body)
            .with_effect(Attribute::Strength, 1.0),
    );
    let mut gym = Upgrade::new("home_gym", "Home Gym");
    gym.owned = true;
    gym.training_modifiers
        .insert(Attribute::Strength.into(), 0.1);
    player.upgrades.push(gym);

    let mut state = GameState {
        player,
        ..GameState::default()
    };

    // --- Hand-written content ---
    let mut boss = Task::new("warehouse", "Raid the Warehouse", 3.0);
    boss.scaling = Some(DifficultyScaling {
        start_day: 4,
        interval_days: 3,
        level_increase: 1.0,
        max_level: 6.0,
    });
    boss.lock_conditions
        .push(LockCondition::new(ConditionKind::Stat, "strength", Operator::Gt, 4.0));
    boss.lock_conditions
        .push(LockCondition::new(ConditionKind::Day, "", Operator::Gt, 3.0));
    state.tasks.push(boss);
    state.task_pool_mut("pool_docks").tasks.push("warehouse".to_string());

    let mut lifting = DowntimeActivity::new("lifting", "Heavy Lifting");
    lifting.training_config = Some(TrainingConfig {
        attribute_xp: Some(0.3),
        power_xp: None,
    });
    let mut shift = DowntimeActivity::new("diner", "Diner Shift");
    shift.auto_rewards = Some(Rewards {
        money: Some(45.0),
        ..Rewards::default()
    });
    state.activities.push(lifting);
    state.activities.push(shift);

    // --- Engine and campaign ---
    let engine = ProgressionEngine::builder()
        .seed(7)
        .defaults(EngineDefaults {
            default_task_pool_id: Some("pool_streets".to_string()),
            default_event_pool_id: None,
            random_event_chance: 0.0,
        })
        .build()
        .unwrap_or_else(|e| panic!("Failed to build engine: {e}"));

    let themes = vec![
        WeekTheme {
            id: "streets".to_string(),
            name: "Mean Streets".to_string(),
            start_day: 1,
            end_day: 3,
            focus: "street_crime".to_string(),
            description: "Muggings and petty theft".to_string(),
        },
        WeekTheme {
            id: "docks".to_string(),
            name: "The Docks".to_string(),
            start_day: 4,
            end_day: 7,
            focus: "smuggling".to_string(),
            description: String::new(),
        },
    ];
    let template = CampaignTemplate {
        interval_days: 2,
        amount: 1,
        ..CampaignTemplate::default()
    };
    engine
        .install_campaign(&mut state, &themes, &template)
        .unwrap_or_else(|e| panic!("Failed to install campaign: {e}"));

    // --- Play a week ---
    let mut generator = PlaceholderGenerator::new();
    println!("=== Hero Week ===\n");
    for _ in 0..7 {
        let report = engine.advance_day(&mut state, &mut generator);
        let stats = effective_stats(&state.player);
        println!(
            "Day {} | STR {} INT {} AGI {} CHA {} | fired: {:?}",
            report.day,
            stats.strength,
            stats.intelligence,
            stats.agility,
            stats.charisma,
            report.fired
        );

        let pool = engine.resolve_day_config(&state, state.day).task_pool_id;
        println!("  Pool: {}", pool.as_deref().unwrap_or("(none)"));
        for task in engine.available_tasks(&state) {
            println!(
                "  - {} [difficulty {}]",
                task.title,
                current_difficulty(task, state.day)
            );
        }

        // Train every day; the reducer would normally apply this.
        let xp = training_xp(
            &state.player,
            &state.activities[0],
            TrainingTarget::Attribute(Attribute::Strength),
        );
        state.player.attributes.strength += xp.total;
        println!("  Training: +{:.2} STR ({})", xp.total, xp.breakdown);

        let pay = work_income(&state.player, &state.activities[1]);
        state.player.resources.money += pay.total;
        println!("  Work: {}", pay.breakdown);
    }

    let warehouse = state.find_task("warehouse");
    let unlocked = warehouse.is_some_and(|task| is_task_available(&state.player, &state, task));
    println!(
        "\nWarehouse raid unlocked: {} | money: ${}",
        unlocked, state.player.resources.money
    );
}
