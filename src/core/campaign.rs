//! Campaign builder: week themes in, automators and day configs out.
//!
//! Each theme is one narrative phase. Phase `i` (themes ordered by start
//! day) gets difficulty bounds raised by `i * difficulty_step`, one
//! automator active only inside the theme's days, and a day config for
//! every day of the theme pointing at the theme's task pool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::difficulty::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::schema::calendar::{Automator, AutomatorType, Day, DayConfig, GenerationConfig, WeekTheme};

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("week themes '{first}' and '{second}' overlap")]
    OverlappingThemes { first: String, second: String },
    #[error("week theme '{theme}' ends before it starts")]
    InvertedRange { theme: String },
    #[error("campaign interval must be at least one day")]
    ZeroInterval,
}

/// Shared parameters for every phase of a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignTemplate {
    pub automator_type: AutomatorType,
    pub interval_days: i32,
    pub amount: u32,
    pub base_difficulty_min: u32,
    pub base_difficulty_max: u32,
    /// Difficulty added per phase.
    #[serde(default = "default_step")]
    pub difficulty_step: u32,
    #[serde(default)]
    pub event_pool_id: Option<String>,
    #[serde(default)]
    pub random_event_chance: Option<f64>,
}

fn default_step() -> u32 {
    1
}

impl Default for CampaignTemplate {
    fn default() -> Self {
        Self {
            automator_type: AutomatorType::Task,
            interval_days: 1,
            amount: 1,
            base_difficulty_min: 1,
            base_difficulty_max: 3,
            difficulty_step: default_step(),
            event_pool_id: None,
            random_event_chance: None,
        }
    }
}

/// Output of [`build_campaign`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Campaign {
    pub automators: Vec<Automator>,
    pub day_configs: BTreeMap<Day, DayConfig>,
}

/// Task pool id assigned to a theme.
pub fn theme_pool_id(theme: &WeekTheme) -> String {
    format!("pool_{}", theme.id)
}

/// Generation context string for a theme.
pub fn theme_context(theme: &WeekTheme) -> String {
    let mut context = format!("{} (focus: {})", theme.name, theme.focus);
    if !theme.description.is_empty() {
        context.push_str(". ");
        context.push_str(&theme.description);
    }
    context
}

/// Build the automators and day configs for a sequence of week themes.
pub fn build_campaign(
    themes: &[WeekTheme],
    template: &CampaignTemplate,
) -> Result<Campaign, CampaignError> {
    if template.interval_days < 1 {
        return Err(CampaignError::ZeroInterval);
    }

    let mut ordered: Vec<&WeekTheme> = themes.iter().collect();
    ordered.sort_by_key(|theme| theme.start_day);

    for theme in &ordered {
        if theme.end_day < theme.start_day {
            return Err(CampaignError::InvertedRange {
                theme: theme.id.clone(),
            });
        }
    }
    for pair in ordered.windows(2) {
        if pair[0].overlaps(pair[1]) {
            return Err(CampaignError::OverlappingThemes {
                first: pair[0].id.clone(),
                second: pair[1].id.clone(),
            });
        }
    }

    let mut campaign = Campaign::default();
    for (phase, theme) in ordered.iter().enumerate() {
        let raise = template
            .difficulty_step
            .saturating_mul(u32::try_from(phase).unwrap_or(u32::MAX));
        let difficulty_min = clamp_difficulty(template.base_difficulty_min.saturating_add(raise));
        let difficulty_max = clamp_difficulty(template.base_difficulty_max.saturating_add(raise))
            .max(difficulty_min);
        let pool_id = theme_pool_id(theme);

        campaign.automators.push(Automator {
            id: format!("campaign_{}", theme.id),
            name: theme.name.clone(),
            automator_type: template.automator_type,
            active: true,
            interval_days: template.interval_days,
            next_run_day: theme.start_day,
            start_day: Some(theme.start_day),
            end_day: Some(i64::from(theme.end_day)),
            config: GenerationConfig {
                target_pool_id: Some(pool_id.clone()),
                amount: template.amount,
                difficulty_min: Some(difficulty_min),
                difficulty_max: Some(difficulty_max),
                context: theme_context(theme),
            },
        });

        for day in theme.start_day..=theme.end_day {
            campaign.day_configs.insert(
                day,
                DayConfig {
                    task_pool_id: Some(pool_id.clone()),
                    event_pool_id: template.event_pool_id.clone(),
                    random_event_chance: template.random_event_chance,
                },
            );
        }
    }

    Ok(campaign)
}

fn clamp_difficulty(value: u32) -> u32 {
    value.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}
