use tracing::info;

use crate::config::{CycleMode, GameConfig};
use crate::entities::BackgroundCycle;

impl BackgroundCycle {
    pub fn new(backgrounds: Vec<String>) -> Self {
        Self {
            backgrounds,
            index: 0,
            last_checked: 0,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.backgrounds.get(self.index).map(String::as_str)
    }

    /// Check the score and advance the background if it qualifies.
    /// Returns the new index when it changed.  An empty list never cycles.
    pub fn update(&mut self, score: u32, config: &GameConfig) -> Option<usize> {
        if self.backgrounds.is_empty() {
            return None;
        }
        let step = config.background_score_step.max(1);

        let advance = match config.cycle_mode {
            CycleMode::ExactMultiple => {
                if score != self.last_checked && score % step == 0 && score != 0 {
                    self.last_checked = score;
                    1
                } else {
                    0
                }
            }
            CycleMode::EveryCrossing => {
                let crossed = (score / step).saturating_sub(self.last_checked / step);
                self.last_checked = score;
                crossed as usize
            }
        };

        if advance == 0 {
            return None;
        }
        self.index = (self.index + advance) % self.backgrounds.len();
        info!(index = self.index, name = ?self.current(), score, "background changed");
        Some(self.index)
    }
}
