/// Engine integration tests: day advance, scheduling and campaigns end
/// to end.

use progression_engine::core::campaign::CampaignTemplate;
use progression_engine::core::generator::{
    ContentGenerator, GeneratedContent, GenerationError, PlaceholderGenerator,
};
use progression_engine::core::pipeline::ProgressionEngine;
use progression_engine::core::scheduler::GenerationRequest;
use progression_engine::schema::calendar::{Automator, AutomatorType, WeekTheme};
use progression_engine::schema::state::GameState;
use std::path::Path;

fn load_sample() -> GameState {
    GameState::load_from_ron(Path::new("tests/fixtures/sample_state.ron")).unwrap()
}

fn build_engine(seed: u64) -> ProgressionEngine {
    ProgressionEngine::builder()
        .seed(seed)
        .defaults_path("tests/fixtures/defaults.ron")
        .build()
        .unwrap()
}

/// Generator that is always down.
struct OfflineGenerator;

impl ContentGenerator for OfflineGenerator {
    fn generate(
        &mut self,
        _request: &GenerationRequest,
    ) -> Result<Vec<GeneratedContent>, GenerationError> {
        Err(GenerationError::Unavailable)
    }
}

#[test]
fn defaults_load_from_file() {
    let engine = build_engine(1);
    assert_eq!(engine.defaults().default_event_pool_id.as_deref(), Some("street"));
}

#[test]
fn advancing_sample_save_fires_due_automators() {
    let engine = build_engine(42);
    let mut state = load_sample();
    let mut generator = PlaceholderGenerator::new();

    let report = engine.advance_day(&mut state, &mut generator);
    assert_eq!(report.day, 7);
    assert_eq!(report.fired, vec!["street_crime".to_string(), "black_market".to_string()]);
    assert_eq!(report.tasks_added, 2);
    assert_eq!(report.items_added, 1);
    assert_eq!(state.tasks.len(), 7);
    assert_eq!(state.shop_items.len(), 2);
    assert_eq!(state.find_task_pool("city").unwrap().tasks.len(), 7);
    assert_eq!(state.automators[0].next_run_day, 9);
    assert_eq!(state.automators[1].next_run_day, 14);
    // Inactive automators never move.
    assert_eq!(state.automators[2].next_run_day, 1);

    // Day 8 switches to the docks pool and disables random events.
    let report = engine.advance_day(&mut state, &mut generator);
    assert!(report.fired.is_empty());
    assert!(report.random_event.is_none());
    let ids: Vec<&str> = engine
        .available_tasks(&state)
        .iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids, vec!["patrol"]);
}

#[test]
fn interval_and_range_are_respected() {
    let engine = build_engine(0);
    let mut state = GameState {
        day: 4,
        ..GameState::default()
    };
    state.automators.push(Automator::new("every_three", AutomatorType::Task, 3, 5));
    let mut bounded = Automator::new("bounded", AutomatorType::Task, 1, 13);
    bounded.end_day = Some(14);
    state.automators.push(bounded);

    let mut generator = PlaceholderGenerator::new();
    let mut fired_on = Vec::new();
    for _ in 0..12 {
        let report = engine.advance_day(&mut state, &mut generator);
        for id in report.fired {
            fired_on.push((report.day, id));
        }
    }

    let every_three: Vec<u32> = fired_on
        .iter()
        .filter(|(_, id)| id == "every_three")
        .map(|(day, _)| *day)
        .collect();
    assert_eq!(every_three, vec![5, 8, 11, 14]);

    let bounded: Vec<u32> = fired_on
        .iter()
        .filter(|(_, id)| id == "bounded")
        .map(|(day, _)| *day)
        .collect();
    assert_eq!(bounded, vec![13, 14]);
    assert_eq!(state.automators[1].next_run_day, 15);
}

#[test]
fn offline_generator_never_aborts_the_day() {
    let engine = build_engine(3);
    let mut state = load_sample();
    let report = engine.advance_day(&mut state, &mut OfflineGenerator);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.tasks_added, 0);
    assert_eq!(state.day, 7);
    assert_eq!(state.automators[0].next_run_day, 9);
}

#[test]
fn random_events_replay_with_the_same_seed() {
    let run = |seed: u64| {
        let engine = build_engine(seed);
        let mut state = load_sample();
        state.day_configs.clear();
        let mut generator = PlaceholderGenerator::new();
        (0..20)
            .map(|_| engine.advance_day(&mut state, &mut generator).random_event)
            .collect::<Vec<_>>()
    };

    let first = run(77);
    assert_eq!(first, run(77));
    assert!(first
        .iter()
        .flatten()
        .all(|id| id == "blackout" || id == "parade"));
}

#[test]
fn campaign_drives_pools_and_difficulty() {
    let engine = build_engine(5);
    let mut state = GameState::default();
    let themes = vec![
        WeekTheme {
            id: "arrival".to_string(),
            name: "Arrival".to_string(),
            start_day: 1,
            end_day: 7,
            focus: "street_crime".to_string(),
            description: String::new(),
        },
        WeekTheme {
            id: "syndicate".to_string(),
            name: "The Syndicate".to_string(),
            start_day: 8,
            end_day: 14,
            focus: "organized_crime".to_string(),
            description: "The families move in".to_string(),
        },
    ];
    let template = CampaignTemplate {
        interval_days: 7,
        amount: 2,
        ..CampaignTemplate::default()
    };
    engine.install_campaign(&mut state, &themes, &template).unwrap();

    let mut generator = PlaceholderGenerator::new();
    for _ in 0..14 {
        engine.advance_day(&mut state, &mut generator);
    }

    let arrival = state.find_task_pool("pool_arrival").unwrap();
    let syndicate = state.find_task_pool("pool_syndicate").unwrap();
    assert_eq!(arrival.tasks.len(), 2);
    assert_eq!(syndicate.tasks.len(), 2);

    let hardest_first = arrival
        .tasks
        .iter()
        .filter_map(|id| state.find_task(id))
        .map(|task| task.difficulty)
        .fold(0.0, f64::max);
    let easiest_second = syndicate
        .tasks
        .iter()
        .filter_map(|id| state.find_task(id))
        .map(|task| task.difficulty)
        .fold(f64::MAX, f64::min);
    assert_eq!(hardest_first, 2.0);
    assert_eq!(easiest_second, 2.0);

    // Day 14 belongs to the second phase.
    let ids: Vec<&str> = engine
        .available_tasks(&state)
        .iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| syndicate.tasks.iter().any(|t| t.as_str() == *id)));
}
