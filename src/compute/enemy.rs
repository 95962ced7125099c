//! Per-enemy behavior: walk, leave the screen, speed up with the score, and
//! hurt the player on contact.

use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{DestroyReason, Enemy, EnemyFate, Hurtbox};

use super::player::HurtOutcome;

impl Enemy {
    /// Advance one tick.  Returns the new speed if the score pushed it up.
    ///
    /// With no score source the enemy keeps its spawn speed.
    pub fn update(&mut self, dt: f32, config: &GameConfig, score: Option<u32>) -> Option<f32> {
        if !self.is_alive() {
            return None;
        }

        self.x += self.velocity * dt;

        if self.x < config.dead_zone_left || self.x > config.dead_zone_right {
            self.fate = EnemyFate::Destroyed(DestroyReason::OffScreen);
            return None;
        }

        self.apply_speed_curve(score?, config)
    }

    /// Raise the speed once per `speed_score_step` points reached since the
    /// last boost.  Direction is preserved.
    pub fn apply_speed_curve(&mut self, score: u32, config: &GameConfig) -> Option<f32> {
        let step = config.speed_score_step.max(1);
        let threshold = (score / step) * step;
        if threshold == 0 || threshold <= self.speed_tracker {
            return None;
        }

        let steps = (threshold - self.speed_tracker) / step;
        self.velocity += self.heading() * config.speed_increment * steps as f32;
        self.speed_tracker = threshold;

        debug!(speed = self.speed(), score, "enemy sped up");
        Some(self.speed())
    }

    /// Contact with the player.  Damage is dealt when the player has a
    /// hurtbox; the enemy is destroyed either way.
    pub fn strike_player(&mut self, hurtbox: Option<&mut Hurtbox>) -> Option<HurtOutcome> {
        let outcome = hurtbox.map(|h| h.take_damage());
        self.fate = EnemyFate::Destroyed(DestroyReason::HitPlayer);
        outcome
    }

    /// `-1.0` when walking left, `1.0` when walking right.
    fn heading(&self) -> f32 {
        if self.velocity != 0.0 {
            self.velocity.signum()
        } else {
            -self.scale_x
        }
    }
}
