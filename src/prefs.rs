//! Persisted player preferences: the high score and the master volume.
//!
//! Stored as a small RON file in the platform data directory.  There is no
//! schema versioning: missing fields fall back to their defaults.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreError;

const APP_DIR: &str = "street_puncher";
const PREFS_FILE: &str = "prefs.ron";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(rename = "HighScore", default)]
    pub high_score: u32,
    #[serde(rename = "MasterVolume", default = "default_volume")]
    pub master_volume: f32,
}

fn default_volume() -> f32 {
    1.0
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            high_score: 0,
            master_volume: default_volume(),
        }
    }
}

/// Key-value backend for `Prefs`.
///
/// Writers go through `update` so that saving one key never clobbers another.
pub trait PrefStore {
    fn load(&self) -> Result<Prefs, StoreError>;
    fn save(&self, prefs: &Prefs) -> Result<(), StoreError>;

    /// Load, apply, save.  A malformed file is replaced rather than left to
    /// block every later write.
    fn update(&self, apply: &mut dyn FnMut(&mut Prefs)) -> Result<(), StoreError> {
        let mut prefs = match self.load() {
            Ok(prefs) => prefs,
            Err(StoreError::Parse(e)) => {
                warn!("preferences are malformed, overwriting with defaults: {e}");
                Prefs::default()
            }
            Err(e) => return Err(e),
        };
        apply(&mut prefs);
        self.save(&prefs)
    }
}

// ── File backend ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `prefs.ron` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFS_FILE))
    }

    /// `<data dir>/street_puncher/prefs.ron`.
    pub fn default_location() -> Result<Self, StoreError> {
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::in_dir(&base.join(APP_DIR)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PrefStore for FileStore {
    fn load(&self) -> Result<Prefs, StoreError> {
        if !self.path.exists() {
            debug!(path = ?self.path, "no preferences file, using defaults");
            return Ok(Prefs::default());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        Ok(ron::from_str(&contents)?)
    }

    fn save(&self, prefs: &Prefs) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let serialized = ron::ser::to_string_pretty(prefs, ron::ser::PrettyConfig::default())?;
        std::fs::write(&self.path, serialized).map_err(|e| self.io_err(e))?;
        info!(path = ?self.path, ?prefs, "preferences saved");
        Ok(())
    }
}

// ── In-memory backend ─────────────────────────────────────────────────────────

/// Shared in-memory store.  Clones see the same data, which lets a test keep
/// a handle while the score board owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    prefs: Rc<RefCell<Prefs>>,
    failing: Rc<Cell<bool>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefs(prefs: Prefs) -> Self {
        let store = Self::default();
        *store.prefs.borrow_mut() = prefs;
        store
    }

    /// Make every subsequent load/save fail with `StoreError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn snapshot(&self) -> Prefs {
        self.prefs.borrow().clone()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl PrefStore for MemoryStore {
    fn load(&self) -> Result<Prefs, StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable);
        }
        Ok(self.prefs.borrow().clone())
    }

    fn save(&self, prefs: &Prefs) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable);
        }
        *self.prefs.borrow_mut() = prefs.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
