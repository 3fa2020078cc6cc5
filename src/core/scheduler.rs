//! Automator scheduling.
//!
//! An automator fires on day `D` when it is active, `D >= next_run_day`
//! and `D` lies inside its optional `[start_day, end_day]` range (an
//! `end_day` of -1 is unbounded). Each firing advances `next_run_day` by
//! exactly one interval. Runs missed while paused are not replayed; a
//! lagging automator fires once per processed day until it catches up.

use serde::{Deserialize, Serialize};

use crate::schema::calendar::{Automator, AutomatorType, Day, GenerationConfig, UNBOUNDED};

/// A request for the content generator emitted by a firing automator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub automator_id: String,
    pub automator_type: AutomatorType,
    pub day: Day,
    pub config: GenerationConfig,
}

/// A planned firing: the request to send and the automator's next run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledRun {
    /// Index of the automator in the list passed to [`schedule_day`].
    pub index: usize,
    pub request: GenerationRequest,
    pub next_run_day: Day,
}

/// True when `day` is inside the automator's active range.
pub fn in_active_range(automator: &Automator, day: Day) -> bool {
    if automator.start_day.is_some_and(|start| day < start) {
        return false;
    }
    match automator.end_day {
        Some(end) if end != UNBOUNDED => i64::from(day) <= end,
        _ => true,
    }
}

/// True when the automator should fire on `day`.
pub fn is_due(automator: &Automator, day: Day) -> bool {
    automator.active && day >= automator.next_run_day && in_active_range(automator, day)
}

/// The generation request an automator emits when it fires on `day`.
pub fn request_for(automator: &Automator, day: Day) -> GenerationRequest {
    GenerationRequest {
        automator_id: automator.id.clone(),
        automator_type: automator.automator_type,
        day,
        config: automator.config.clone(),
    }
}

/// `next_run_day` after one firing.
pub fn next_run_after_fire(automator: &Automator) -> Day {
    automator
        .next_run_day
        .saturating_add(automator.effective_interval())
}

/// Plan every firing for `day` without touching the automators.
pub fn schedule_day(automators: &[Automator], day: Day) -> Vec<ScheduledRun> {
    automators
        .iter()
        .enumerate()
        .filter(|(_, automator)| is_due(automator, day))
        .map(|(index, automator)| ScheduledRun {
            index,
            request: request_for(automator, day),
            next_run_day: next_run_after_fire(automator),
        })
        .collect()
}

/// Persist the advanced `next_run_day` of each planned run.
pub fn commit_runs(automators: &mut [Automator], runs: &[ScheduledRun]) {
    for run in runs {
        if let Some(automator) = automators.get_mut(run.index) {
            automator.next_run_day = run.next_run_day;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_three_days() -> Automator {
        Automator::new("street_crime", AutomatorType::Task, 3, 5)
    }

    #[test]
    fn fires_on_next_run_day_and_advances() {
        let mut automators = vec![every_three_days()];
        assert!(schedule_day(&automators, 4).is_empty());

        let runs = schedule_day(&automators, 5);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].next_run_day, 8);
        assert_eq!(runs[0].request.day, 5);
        assert_eq!(runs[0].request.automator_id, "street_crime");
        commit_runs(&mut automators, &runs);

        assert_eq!(automators[0].next_run_day, 8);
        assert!(schedule_day(&automators, 6).is_empty());
        assert!(schedule_day(&automators, 7).is_empty());
        assert_eq!(schedule_day(&automators, 8).len(), 1);
    }

    #[test]
    fn inactive_automators_never_fire() {
        let mut automator = every_three_days();
        automator.active = false;
        assert!(!is_due(&automator, 5));
        assert!(!is_due(&automator, 50));
    }

    #[test]
    fn respects_end_day() {
        let mut automator = every_three_days();
        automator.next_run_day = 10;
        automator.end_day = Some(14);
        assert!(is_due(&automator, 14));
        assert!(!is_due(&automator, 15));
    }

    #[test]
    fn unbounded_end_day() {
        let mut automator = every_three_days();
        automator.end_day = Some(UNBOUNDED);
        assert!(is_due(&automator, 10_000));
    }

    #[test]
    fn respects_start_day() {
        let mut automator = every_three_days();
        automator.next_run_day = 1;
        automator.start_day = Some(7);
        assert!(!is_due(&automator, 6));
        assert!(is_due(&automator, 7));
    }

    #[test]
    fn missed_runs_advance_one_interval_per_fire() {
        let mut automators = vec![every_three_days()];
        let runs = schedule_day(&automators, 20);
        commit_runs(&mut automators, &runs);
        assert_eq!(automators[0].next_run_day, 8);
        // Still behind, so it fires again on the next processed day.
        assert!(is_due(&automators[0], 21));
    }

    #[test]
    fn zero_interval_advances_by_one() {
        let mut automator = every_three_days();
        automator.interval_days = 0;
        assert_eq!(next_run_after_fire(&automator), 6);
    }

    #[test]
    fn schedule_is_in_list_order() {
        let mut item_drop = Automator::new("loot", AutomatorType::Item, 1, 1);
        item_drop.config.amount = 2;
        let automators = vec![
            every_three_days(),
            item_drop,
            Automator::new("shop", AutomatorType::Upgrade, 7, 5),
        ];
        let runs = schedule_day(&automators, 5);
        let ids: Vec<&str> = runs
            .iter()
            .map(|run| run.request.automator_id.as_str())
            .collect();
        assert_eq!(ids, vec!["street_crime", "loot", "shop"]);
        assert_eq!(runs[1].index, 1);
        assert_eq!(runs[1].request.config.amount, 2);
    }
}
