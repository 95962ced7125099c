//! Game logic and the per-tick update.
//!
//! `World::tick` is the only entry point the host loop needs: it applies the
//! player's commands, updates every behavior in list order, resolves contacts
//! and reports what happened as `GameEvent`s.  All randomness comes through
//! the injected RNG so a seeded RNG gives a reproducible run.

pub mod background;
pub mod enemy;
pub mod player;
pub mod pulse;
pub mod spawner;

use rand::Rng;
use tracing::info;

use crate::config::GameConfig;
use crate::entities::{
    BackgroundCycle, Command, DestroyReason, Enemy, EnemyFate, Facing, GameEvent, GameStatus,
    Player,
};
use crate::score::ScoreBoard;

use player::HurtOutcome;
use spawner::EnemySpawner;

/// Everything that gets a per-tick update.
#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    Spawner(EnemySpawner),
    Enemy(Enemy),
    Background(BackgroundCycle),
}

pub struct World {
    pub config: GameConfig,
    pub score: ScoreBoard,
    pub player: Player,
    /// Updated front to back each tick.  Enemies spawned during a tick are
    /// appended and first move on the following tick.
    pub behaviors: Vec<Behavior>,
    pub status: GameStatus,
    pub frame: u64,
    /// Seconds of play so far.
    pub elapsed: f32,
}

/// Closed intervals `a` and `b` share at least one point.
fn overlaps(a: (f32, f32), b: (f32, f32)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

fn initial_behaviors(config: &GameConfig) -> Vec<Behavior> {
    vec![
        Behavior::Spawner(EnemySpawner::new(config)),
        Behavior::Background(BackgroundCycle::new(config.backgrounds.clone())),
    ]
}

impl World {
    pub fn new(config: GameConfig, score: ScoreBoard) -> Self {
        info!(
            high_score = score.high_score(),
            spawn_interval = config.spawn_interval,
            "new round"
        );
        Self {
            player: Player::new(&config),
            behaviors: initial_behaviors(&config),
            status: GameStatus::Playing,
            frame: 0,
            elapsed: 0.0,
            score,
            config,
        }
    }

    /// Start over with a fresh player, spawner and background.  The high
    /// score is kept.
    pub fn restart(&mut self) {
        self.score.reset();
        self.player = Player::new(&self.config);
        self.behaviors = initial_behaviors(&self.config);
        self.status = GameStatus::Playing;
        self.frame = 0;
        self.elapsed = 0.0;
        info!(high_score = self.score.high_score(), "round restarted");
    }

    /// Hand the score board back, e.g. when returning to the menu.
    pub fn into_score_board(self) -> ScoreBoard {
        self.score
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.behaviors.iter().filter_map(|b| match b {
            Behavior::Enemy(e) => Some(e),
            _ => None,
        })
    }

    pub fn background(&self) -> Option<&BackgroundCycle> {
        self.behaviors.iter().find_map(|b| match b {
            Behavior::Background(bg) => Some(bg),
            _ => None,
        })
    }

    pub fn spawner(&self) -> Option<&EnemySpawner> {
        self.behaviors.iter().find_map(|b| match b {
            Behavior::Spawner(s) => Some(s),
            _ => None,
        })
    }

    /// Put an enemy into play directly, bypassing the spawner.
    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.behaviors.push(Behavior::Enemy(enemy));
    }

    /// Advance the simulation by `dt` seconds.  A finished game stays frozen.
    pub fn tick(&mut self, dt: f32, commands: &[Command], rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status == GameStatus::GameOver {
            return events;
        }
        self.frame += 1;
        self.elapsed += dt;

        // ── 1. Punch window & input ───────────────────────────────────────────
        self.player.punch.tick(dt);
        for command in commands {
            let facing = match command {
                Command::PunchLeft => Facing::Left,
                Command::PunchRight => Facing::Right,
            };
            self.player.punch.press(facing, self.config.punch_duration);
            events.push(GameEvent::PunchThrown { facing });
        }

        // ── 2. Behaviors, in list order ───────────────────────────────────────
        let score = self.score.current();
        let starts: Vec<Option<f32>> = self
            .behaviors
            .iter()
            .map(|b| match b {
                Behavior::Enemy(e) => Some(e.x),
                _ => None,
            })
            .collect();
        let mut spawned = Vec::new();
        for behavior in &mut self.behaviors {
            match behavior {
                Behavior::Spawner(spawner) => {
                    if let Some((side, enemy)) = spawner.update(dt, &self.config, rng) {
                        events.push(GameEvent::EnemySpawned {
                            side,
                            variant: enemy.variant,
                        });
                        spawned.push(Behavior::Enemy(enemy));
                    }
                }
                Behavior::Enemy(enemy) => {
                    if let Some(speed) = enemy.update(dt, &self.config, Some(score)) {
                        events.push(GameEvent::EnemySpedUp { speed });
                    }
                }
                Behavior::Background(background) => {
                    if let Some(index) = background.update(score, &self.config) {
                        events.push(GameEvent::BackgroundChanged { index });
                    }
                }
            }
        }
        self.behaviors.extend(spawned);

        // ── 3. Contacts ───────────────────────────────────────────────────────
        self.resolve_contacts(&starts, &mut events);

        self.behaviors
            .retain(|b| !matches!(b, Behavior::Enemy(e) if !e.is_alive()));

        events
    }

    /// Punch hitbox first, then the player's body.  Each enemy is resolved at
    /// most once since contact always destroys it.
    ///
    /// An enemy is tested over the whole stretch it walked this tick, so a
    /// fast one cannot step over the player between two frames.  `starts`
    /// holds each behavior's position before it moved.
    fn resolve_contacts(&mut self, starts: &[Option<f32>], events: &mut Vec<GameEvent>) {
        let fist = self.player.punch.hitbox(self.config.punch_reach);
        let body = (-self.config.player_half_width, self.config.player_half_width);
        let half = self.config.enemy_half_width;

        for (i, behavior) in self.behaviors.iter_mut().enumerate() {
            let Behavior::Enemy(enemy) = behavior else {
                continue;
            };
            if !enemy.is_alive() {
                continue;
            }
            let from = starts.get(i).copied().flatten().unwrap_or(enemy.x);
            let span = (from.min(enemy.x) - half, from.max(enemy.x) + half);

            if fist.is_some_and(|f| overlaps(f, span)) {
                enemy.fate = EnemyFate::Destroyed(DestroyReason::Punched);
                let change = self.score.add_score(self.config.points_per_enemy);
                events.push(GameEvent::EnemyPunched {
                    score: change.score,
                    new_high: change.new_high,
                });
            } else if overlaps(body, span) {
                match enemy.strike_player(Some(&mut self.player.hurtbox)) {
                    Some(HurtOutcome::Hurt { health }) => {
                        events.push(GameEvent::PlayerHurt { health });
                    }
                    Some(HurtOutcome::Died) => {
                        events.push(GameEvent::PlayerHurt { health: 0 });
                        self.status = GameStatus::GameOver;
                        info!(
                            score = self.score.current(),
                            high_score = self.score.high_score(),
                            frame = self.frame,
                            "game over"
                        );
                        events.push(GameEvent::GameOver {
                            score: self.score.current(),
                            high_score: self.score.high_score(),
                        });
                    }
                    Some(HurtOutcome::Ignored) | None => {}
                }
            }
        }
    }
}
