//! Game entity types: pure data, no logic.
//!
//! World coordinates are continuous: the player stands at `x = 0`, enemies
//! enter at `±spawn_offset` and are removed past the dead zones.

// ── Directions ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// +1 when facing right, -1 when facing left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyReason {
    /// Walked past a dead zone.
    OffScreen,
    /// Ran into the player.
    HitPlayer,
    /// Caught by a punch.
    Punched,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyFate {
    Alive,
    Destroyed(DestroyReason),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Signed speed in world units per second; negative moves left.
    pub velocity: f32,
    /// Horizontal sprite orientation, `1.0` or `-1.0`.
    pub scale_x: f32,
    /// Index of the variant in the config's enemy catalog.
    pub variant: usize,
    pub glyph: String,
    /// Floor-to-step score at which the last speed boost was applied.
    pub speed_tracker: u32,
    pub fate: EnemyFate,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.fate == EnemyFate::Alive
    }

    pub fn speed(&self) -> f32 {
        self.velocity.abs()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Hurtbox {
    pub health: u32,
    pub max_health: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Punch {
    pub facing: Facing,
    /// Seconds left in the active punch window, `None` when idle.
    pub remaining: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub hurtbox: Hurtbox,
    pub punch: Punch,
}

// ── Background ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundCycle {
    pub backgrounds: Vec<String>,
    pub index: usize,
    pub last_checked: u32,
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnTimer {
    pub interval: f32,
    pub elapsed: f32,
}

// ── Loop plumbing ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Player input for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PunchLeft,
    PunchRight,
}

/// Things that happened during a tick, for the renderer and the log.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PunchThrown { facing: Facing },
    EnemySpawned { side: Side, variant: usize },
    EnemyPunched { score: u32, new_high: bool },
    PlayerHurt { health: u32 },
    EnemySpedUp { speed: f32 },
    BackgroundChanged { index: usize },
    GameOver { score: u32, high_score: u32 },
}
