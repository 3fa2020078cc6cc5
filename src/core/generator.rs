//! The seam to the external content generator.

use thiserror::Error;

use crate::core::scheduler::GenerationRequest;
use crate::schema::calendar::AutomatorType;
use crate::schema::player::{Item, Upgrade};
use crate::schema::task::{RandomEvent, Task};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generator rejected request: {0}")]
    Rejected(String),
    #[error("generator returned malformed content: {0}")]
    Malformed(String),
    #[error("generator unavailable")]
    Unavailable,
}

/// A freshly generated entity with a caller-assigned unique id.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    Task(Task),
    Item(Item),
    Upgrade(Upgrade),
    Event(RandomEvent),
}

/// Produces new content for a firing automator.
///
/// Implementations may fail; the day-advance skips the failed batch and
/// carries on with the remaining automators.
pub trait ContentGenerator {
    fn generate(
        &mut self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedContent>, GenerationError>;
}

/// Offline generator producing numbered placeholder content. Difficulty
/// of generated tasks cycles through the requested bounds.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderGenerator {
    next_id: u64,
}

impl PlaceholderGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id(&mut self, prefix: &str, request: &GenerationRequest) -> String {
        self.next_id += 1;
        format!("{}_{}_d{}_{}", prefix, request.automator_id, request.day, self.next_id)
    }
}

impl ContentGenerator for PlaceholderGenerator {
    fn generate(
        &mut self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedContent>, GenerationError> {
        let config = &request.config;
        let low = config.difficulty_min.unwrap_or(1);
        let high = config.difficulty_max.unwrap_or(low).max(low);

        let mut batch = Vec::with_capacity(config.amount as usize);
        for n in 0..config.amount {
            let content = match request.automator_type {
                AutomatorType::Task => {
                    let id = self.mint_id("task", request);
                    let difficulty = low + n % (high - low + 1);
                    let mut task = Task::new(id, format!("Generated task {}", n + 1), f64::from(difficulty));
                    task.description = config.context.clone();
                    GeneratedContent::Task(task)
                }
                AutomatorType::Event => GeneratedContent::Event(RandomEvent {
                    id: self.mint_id("event", request),
                    title: format!("Generated event {}", n + 1),
                    description: config.context.clone(),
                }),
                AutomatorType::Item => {
                    let mut item = Item::new(self.mint_id("item", request), format!("Generated item {}", n + 1));
                    item.description = config.context.clone();
                    GeneratedContent::Item(item)
                }
                AutomatorType::Upgrade => {
                    let mut upgrade =
                        Upgrade::new(self.mint_id("upgrade", request), format!("Generated upgrade {}", n + 1));
                    upgrade.description = config.context.clone();
                    GeneratedContent::Upgrade(upgrade)
                }
            };
            batch.push(content);
        }
        Ok(batch)
    }
}
