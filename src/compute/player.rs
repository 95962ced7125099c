//! Player health and the punch window.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Facing, Hurtbox, Player, Punch};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HurtOutcome {
    /// Already at zero; nothing happened.
    Ignored,
    Hurt { health: u32 },
    /// This hit took the last point of health.
    Died,
}

impl Hurtbox {
    pub fn new(health: u32) -> Self {
        Self {
            health,
            max_health: health,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Lose one point of health.  Never goes below zero.
    pub fn take_damage(&mut self) -> HurtOutcome {
        if self.health == 0 {
            return HurtOutcome::Ignored;
        }
        self.health -= 1;
        if self.health == 0 {
            info!("player died");
            HurtOutcome::Died
        } else {
            debug!(health = self.health, "player hurt");
            HurtOutcome::Hurt {
                health: self.health,
            }
        }
    }
}

impl Punch {
    pub fn new() -> Self {
        Self {
            facing: Facing::Right,
            remaining: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// Turn toward `facing` and open a punch window of `duration` seconds.
    /// Pressing during an active punch restarts the same window.
    pub fn press(&mut self, facing: Facing, duration: f32) {
        self.facing = facing;
        self.remaining = Some(duration);
    }

    /// Count the window down; closes it once it runs out.
    pub fn tick(&mut self, dt: f32) {
        if let Some(left) = self.remaining {
            let left = left - dt;
            self.remaining = (left > 0.0).then_some(left);
        }
    }

    /// Horizontal span covered by the fist while punching.
    pub fn hitbox(&self, reach: f32) -> Option<(f32, f32)> {
        if !self.is_active() {
            return None;
        }
        Some(match self.facing {
            Facing::Right => (0.0, reach),
            Facing::Left => (-reach, 0.0),
        })
    }
}

impl Default for Punch {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            hurtbox: Hurtbox::new(config.starting_health),
            punch: Punch::new(),
        }
    }
}
