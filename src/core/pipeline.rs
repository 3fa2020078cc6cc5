/// The day-advance pipeline: scheduler → generator → state.
///
/// Wires together automator scheduling, the external content generator,
/// generated-content bookkeeping and the daily random-event roll.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::calendar::{available_tasks, resolve_day_config, roll_random_event, ResolvedDayConfig};
use crate::core::campaign::{build_campaign, CampaignError, CampaignTemplate};
use crate::core::generator::{ContentGenerator, GeneratedContent};
use crate::core::scheduler::{commit_runs, schedule_day, GenerationRequest};
use crate::schema::calendar::{Day, WeekTheme};
use crate::schema::state::{EngineDefaults, GameState, LoadError};
use crate::schema::task::Task;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("campaign error: {0}")]
    Campaign(#[from] CampaignError),
}

/// An automator whose generation batch was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRun {
    pub automator_id: String,
    pub error: String,
}

/// Everything that happened while processing one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayReport {
    pub day: Day,
    /// Automators that fired, in list order.
    pub fired: Vec<String>,
    pub failed: Vec<FailedRun>,
    pub tasks_added: usize,
    pub items_added: usize,
    pub upgrades_added: usize,
    pub events_added: usize,
    /// Generated entities dropped because their id was already taken.
    pub duplicates_skipped: usize,
    pub random_event: Option<String>,
}

/// The top-level engine. Built via `ProgressionEngine::builder()`.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    defaults: EngineDefaults,
    seed: u64,
}

/// Builder for constructing a `ProgressionEngine`.
#[derive(Debug, Clone, Default)]
pub struct ProgressionEngineBuilder {
    defaults: Option<EngineDefaults>,
    defaults_path: Option<String>,
    seed: u64,
}

impl ProgressionEngine {
    pub fn builder() -> ProgressionEngineBuilder {
        ProgressionEngineBuilder::default()
    }

    pub fn defaults(&self) -> &EngineDefaults {
        &self.defaults
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn resolve_day_config(&self, state: &GameState, day: Day) -> ResolvedDayConfig {
        resolve_day_config(&state.day_configs, &self.defaults, day)
    }

    /// Tasks the player can take on today.
    pub fn available_tasks<'a>(&self, state: &'a GameState) -> Vec<&'a Task> {
        available_tasks(state, &self.defaults, state.day)
    }

    /// Build a campaign from `themes` and merge it into the save. Day
    /// configs from the campaign replace existing ones for the same day.
    pub fn install_campaign(
        &self,
        state: &mut GameState,
        themes: &[WeekTheme],
        template: &CampaignTemplate,
    ) -> Result<usize, EngineError> {
        let campaign = build_campaign(themes, template)?;
        let added = campaign.automators.len();
        state.automators.extend(campaign.automators);
        state.day_configs.extend(campaign.day_configs);
        state.week_themes.extend(themes.iter().cloned());
        log::info!("Installed campaign with {} phases", added);
        Ok(added)
    }

    /// Move the save to the next day and process it.
    pub fn advance_day(
        &self,
        state: &mut GameState,
        generator: &mut dyn ContentGenerator,
    ) -> DayReport {
        state.day = state.day.saturating_add(1);
        self.process_day(state, generator)
    }

    /// Fire every due automator for `state.day`, apply the generated
    /// content, persist the advanced run days and roll the day's event.
    ///
    /// A generator failure skips that automator's batch only; the
    /// automator still advances to its next run.
    pub fn process_day(
        &self,
        state: &mut GameState,
        generator: &mut dyn ContentGenerator,
    ) -> DayReport {
        let day = state.day;
        let mut report = DayReport {
            day,
            ..DayReport::default()
        };

        let runs = schedule_day(&state.automators, day);
        for run in &runs {
            log::debug!(
                "Automator {} ({:?}) fired on day {}; next run day {}",
                run.request.automator_id,
                run.request.automator_type,
                day,
                run.next_run_day
            );
            report.fired.push(run.request.automator_id.clone());

            match generator.generate(&run.request) {
                Ok(batch) => {
                    for content in batch {
                        apply_content(state, &run.request, content, &mut report);
                    }
                }
                Err(e) => {
                    log::warn!(
                        "Automator {} generation failed on day {}: {}",
                        run.request.automator_id,
                        day,
                        e
                    );
                    report.failed.push(FailedRun {
                        automator_id: run.request.automator_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        commit_runs(&mut state.automators, &runs);

        report.random_event =
            roll_random_event(state, &self.defaults, day, self.seed).map(|event| event.id.clone());

        log::info!(
            "Day {}: {} automators fired, {} failed, {} tasks, {} items, {} upgrades, {} events added",
            day,
            report.fired.len(),
            report.failed.len(),
            report.tasks_added,
            report.items_added,
            report.upgrades_added,
            report.events_added
        );
        report
    }
}

fn apply_content(
    state: &mut GameState,
    request: &GenerationRequest,
    content: GeneratedContent,
    report: &mut DayReport,
) {
    let pool_id = request.config.target_pool_id.as_deref();
    match content {
        GeneratedContent::Task(task) => {
            if state.find_task(&task.id).is_some() {
                skip_duplicate(report, "task", &task.id);
                return;
            }
            if let Some(pool_id) = pool_id {
                state.task_pool_mut(pool_id).tasks.push(task.id.clone());
            }
            state.tasks.push(task);
            report.tasks_added += 1;
        }
        GeneratedContent::Event(event) => {
            if state.find_event(&event.id).is_some() {
                skip_duplicate(report, "event", &event.id);
                return;
            }
            if let Some(pool_id) = pool_id {
                state.event_pool_mut(pool_id).events.push(event.id.clone());
            }
            state.events.push(event);
            report.events_added += 1;
        }
        GeneratedContent::Item(item) => {
            if state.shop_items.iter().any(|existing| existing.id == item.id) {
                skip_duplicate(report, "item", &item.id);
                return;
            }
            state.shop_items.push(item);
            report.items_added += 1;
        }
        GeneratedContent::Upgrade(upgrade) => {
            if state.player.upgrades.iter().any(|existing| existing.id == upgrade.id) {
                skip_duplicate(report, "upgrade", &upgrade.id);
                return;
            }
            state.player.upgrades.push(upgrade);
            report.upgrades_added += 1;
        }
    }
}

fn skip_duplicate(report: &mut DayReport, kind: &str, id: &str) {
    log::warn!("Generated {} '{}' already exists; skipped", kind, id);
    report.duplicates_skipped += 1;
}

impl ProgressionEngineBuilder {
    /// Provide defaults directly (for testing without files).
    pub fn defaults(mut self, defaults: EngineDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Load defaults from a RON file at build time. Overrides inline
    /// defaults when the file exists.
    pub fn defaults_path(mut self, path: &str) -> Self {
        self.defaults_path = Some(path.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<ProgressionEngine, EngineError> {
        let mut defaults = self.defaults.unwrap_or_default();

        if let Some(ref path) = self.defaults_path {
            if Path::new(path).exists() {
                defaults = EngineDefaults::load_from_ron(Path::new(path))?;
            } else {
                log::warn!("Defaults file '{}' not found; using inline defaults", path);
            }
        }

        Ok(ProgressionEngine {
            defaults,
            seed: self.seed,
        })
    }
}
