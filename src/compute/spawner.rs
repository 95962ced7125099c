//! Timed enemy spawning at the two screen edges.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::config::{GameConfig, TimerMode};
use crate::entities::{Enemy, EnemyFate, Side, SpawnTimer};

#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpawner {
    pub timer: SpawnTimer,
    pub mode: TimerMode,
    warned_empty: bool,
}

impl EnemySpawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            timer: SpawnTimer {
                interval: config.spawn_interval,
                elapsed: 0.0,
            },
            mode: config.timer_mode,
            warned_empty: false,
        }
    }

    /// Accumulate `dt` and spawn at most one enemy when the interval is due.
    pub fn update(
        &mut self,
        dt: f32,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Option<(Side, Enemy)> {
        self.timer.elapsed += dt;
        if self.timer.elapsed < self.timer.interval {
            return None;
        }

        self.timer.elapsed = match self.mode {
            TimerMode::DropExcess => 0.0,
            TimerMode::CarryExcess => self.timer.elapsed - self.timer.interval,
        };

        let side = pick_side(rng);
        match spawn_enemy(config, side, rng) {
            Some(enemy) => {
                debug!(?side, variant = enemy.variant, x = enemy.x, "enemy spawned");
                Some((side, enemy))
            }
            None => {
                if !self.warned_empty {
                    warn!("enemy catalog is empty, spawner is idle");
                    self.warned_empty = true;
                }
                None
            }
        }
    }
}

/// Fair coin flip between the two edges.
pub fn pick_side(rng: &mut impl Rng) -> Side {
    if rng.gen_bool(0.5) {
        Side::Right
    } else {
        Side::Left
    }
}

/// Build an enemy of a random catalog variant at the given edge.
///
/// Right-edge enemies keep the default orientation and walk left; left-edge
/// enemies are mirrored and walk right.  `None` when the catalog is empty.
pub fn spawn_enemy(config: &GameConfig, side: Side, rng: &mut impl Rng) -> Option<Enemy> {
    if config.enemies.is_empty() {
        return None;
    }
    let variant = rng.gen_range(0..config.enemies.len());
    let template = &config.enemies[variant];
    let glyph = template
        .glyphs
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| template.name.clone());

    let mut enemy = Enemy {
        x: config.spawn_offset,
        y: config.spawn_height,
        velocity: -template.base_speed,
        scale_x: 1.0,
        variant,
        glyph,
        speed_tracker: 0,
        fate: EnemyFate::Alive,
    };

    if side == Side::Left {
        enemy.x = -config.spawn_offset;
        enemy.scale_x = -enemy.scale_x;
        enemy.velocity = -enemy.velocity;
    }
    Some(enemy)
}
