//! Tunable game parameters, loadable from a RON file.
//!
//! Every field has a default that reproduces the stock game, so a config file
//! only needs to list what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What the spawn timer does with time accumulated past the interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    /// Reset to zero; the overshoot is lost and the interval drifts.
    DropExcess,
    /// Subtract the interval; the overshoot counts toward the next spawn.
    CarryExcess,
}

/// When the background advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleMode {
    /// Only when the score lands exactly on a new multiple of the step.
    ExactMultiple,
    /// Once for every multiple of the step the score passes.
    EveryCrossing,
}

/// One enemy variant in the spawn catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    /// Speed magnitude at spawn, in world units per second.
    pub base_speed: f32,
    /// Sprite variants; one is picked at random per enemy.
    pub glyphs: Vec<String>,
}

impl EnemyTemplate {
    pub fn new(name: &str, base_speed: f32, glyphs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            base_speed,
            glyphs: glyphs.iter().map(|g| g.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub spawn_interval: f32,
    pub timer_mode: TimerMode,
    /// Distance from the centre at which enemies appear.
    pub spawn_offset: f32,
    pub spawn_height: f32,
    pub dead_zone_left: f32,
    pub dead_zone_right: f32,
    pub enemies: Vec<EnemyTemplate>,

    /// Speed gained per `speed_score_step` points.
    pub speed_increment: f32,
    pub speed_score_step: u32,

    pub backgrounds: Vec<String>,
    pub background_score_step: u32,
    pub cycle_mode: CycleMode,

    pub starting_health: u32,
    pub punch_duration: f32,
    pub punch_reach: f32,
    pub player_half_width: f32,
    pub enemy_half_width: f32,
    pub points_per_enemy: u32,

    pub pulse_speed: f32,
    pub pulse_amount: f32,
    pub tilt_speed: f32,
    pub tilt_amount: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 2.0,
            timer_mode: TimerMode::DropExcess,
            spawn_offset: 15.0,
            spawn_height: -2.0,
            dead_zone_left: -45.0,
            dead_zone_right: 45.0,
            enemies: vec![
                EnemyTemplate::new("thug", 5.0, &["ò_ó", "ô_ô"]),
                EnemyTemplate::new("brute", 5.0, &["Ò▄Ó", "ÒwÓ"]),
                EnemyTemplate::new("goon", 5.0, &[">_<", "x_x", "°o°"]),
            ],
            speed_increment: 2.5,
            speed_score_step: 5,
            backgrounds: vec![
                "Downtown".to_string(),
                "Docks".to_string(),
                "Subway".to_string(),
                "Rooftops".to_string(),
            ],
            background_score_step: 6,
            cycle_mode: CycleMode::ExactMultiple,
            starting_health: 3,
            punch_duration: 0.2,
            punch_reach: 3.0,
            player_half_width: 1.0,
            enemy_half_width: 0.75,
            points_per_enemy: 1,
            pulse_speed: 1.0,
            pulse_amount: 0.1,
            tilt_speed: 3.0,
            tilt_amount: 5.0,
        }
    }
}

impl GameConfig {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Reject values that would stall or break the loop.  Empty enemy or
    /// background lists are allowed; those behaviors go inert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("spawn_interval", self.spawn_interval)?;
        positive("punch_duration", self.punch_duration)?;
        positive("punch_reach", self.punch_reach)?;
        positive("player_half_width", self.player_half_width)?;
        positive("enemy_half_width", self.enemy_half_width)?;

        if self.dead_zone_left >= self.dead_zone_right {
            return Err(ConfigError::Invalid {
                field: "dead_zone_left",
                reason: format!(
                    "must be below dead_zone_right ({} >= {})",
                    self.dead_zone_left, self.dead_zone_right
                ),
            });
        }
        let inside = |x: f32| x > self.dead_zone_left && x < self.dead_zone_right;
        if !inside(self.spawn_offset) || !inside(-self.spawn_offset) {
            return Err(ConfigError::Invalid {
                field: "spawn_offset",
                reason: "enemies would spawn inside a dead zone".to_string(),
            });
        }
        if self.speed_score_step == 0 {
            return Err(ConfigError::Invalid {
                field: "speed_score_step",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.background_score_step == 0 {
            return Err(ConfigError::Invalid {
                field: "background_score_step",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.starting_health == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_health",
                reason: "must be at least 1".to_string(),
            });
        }
        for template in &self.enemies {
            if !(template.base_speed >= 0.0 && template.base_speed.is_finite()) {
                return Err(ConfigError::Invalid {
                    field: "enemies",
                    reason: format!("variant `{}` has a bad base_speed", template.name),
                });
            }
        }
        Ok(())
    }
}
