//! Session score and persisted high score.
//!
//! One `ScoreBoard` is built per session and lent to whoever needs it; only
//! `add_score` changes it.

use tracing::{info, warn};

use crate::prefs::{PrefStore, Prefs};

/// Result of one `add_score` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreChange {
    pub score: u32,
    pub high_score: u32,
    /// The call raised the high score.
    pub new_high: bool,
}

pub struct ScoreBoard {
    current: u32,
    high_score: u32,
    store: Option<Box<dyn PrefStore>>,
    persist_failures: u32,
}

impl ScoreBoard {
    /// Board with no backing store; the high score lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            current: 0,
            high_score: 0,
            store: None,
            persist_failures: 0,
        }
    }

    /// Read the saved high score from `store` and keep it for later writes.
    /// An unreadable store starts the session at zero with a warning.
    pub fn load(store: Box<dyn PrefStore>) -> Self {
        let high_score = match store.load() {
            Ok(prefs) => prefs.high_score,
            Err(e) => {
                warn!("could not load high score, starting from 0: {e}");
                0
            }
        };
        info!(high_score, "score board ready");
        Self {
            current: 0,
            high_score,
            store: Some(store),
            persist_failures: 0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// How many high-score writes have failed this session.
    pub fn persist_failures(&self) -> u32 {
        self.persist_failures
    }

    pub fn add_score(&mut self, points: u32) -> ScoreChange {
        self.current = self.current.saturating_add(points);

        let new_high = self.current > self.high_score;
        if new_high {
            self.high_score = self.current;
            self.persist_high_score();
        }

        ScoreChange {
            score: self.current,
            high_score: self.high_score,
            new_high,
        }
    }

    /// Start a new round.  The high score carries over.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    fn persist_high_score(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        let high_score = self.high_score;
        if let Err(e) = store.update(&mut |prefs: &mut Prefs| prefs.high_score = high_score) {
            self.persist_failures += 1;
            warn!(high_score, "could not save high score: {e}");
        }
    }
}
