//! Start menu: main screen, settings screen and the persisted master volume.

use tracing::{info, warn};

use crate::prefs::{PrefStore, Prefs};

/// Volume change per key press on the settings screen.
pub const VOLUME_STEP: f32 = 0.1;

/// Below this the host treats audio as muted.
const MUTE_BELOW: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuInput {
    Start,
    OpenSettings,
    Back,
    Quit,
    VolumeUp,
    VolumeDown,
}

/// What the host should do after a menu input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Quit,
}

/// Mixer gain in decibels for a linear slider value.
pub fn volume_to_db(volume: f32) -> f32 {
    volume.clamp(0.0001, 1.0).log10() * 20.0
}

pub struct StartMenu {
    screen: MenuScreen,
    volume: f32,
    store: Option<Box<dyn PrefStore>>,
}

impl StartMenu {
    pub fn in_memory() -> Self {
        Self {
            screen: MenuScreen::Main,
            volume: 1.0,
            store: None,
        }
    }

    /// Restore the saved volume from `store`; defaults to full volume.
    pub fn load(store: Box<dyn PrefStore>) -> Self {
        let volume = match store.load() {
            Ok(prefs) if prefs.master_volume.is_finite() => prefs.master_volume.clamp(0.0, 1.0),
            Ok(prefs) => {
                warn!(volume = prefs.master_volume, "saved volume is not a number, using 1.0");
                1.0
            }
            Err(e) => {
                warn!("could not load volume setting: {e}");
                1.0
            }
        };
        info!(volume, db = volume_to_db(volume), "volume restored");
        Self {
            screen: MenuScreen::Main,
            volume,
            store: Some(store),
        }
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn decibels(&self) -> f32 {
        volume_to_db(self.volume)
    }

    pub fn is_muted(&self) -> bool {
        self.volume < MUTE_BELOW
    }

    pub fn show_main_menu(&mut self) {
        self.screen = MenuScreen::Main;
    }

    pub fn open_settings(&mut self) {
        self.screen = MenuScreen::Settings;
    }

    /// Store the new volume and return the resulting gain in dB.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let db = volume_to_db(self.volume);

        if let Some(store) = &self.store {
            let volume = self.volume;
            if let Err(e) = store.update(&mut |prefs: &mut Prefs| prefs.master_volume = volume) {
                warn!(volume, "could not save volume setting: {e}");
            }
        }
        info!(volume = self.volume, db, "volume set");
        db
    }

    /// Nudge the volume by `steps` increments of `VOLUME_STEP`.
    pub fn adjust_volume(&mut self, steps: i32) -> f32 {
        let target = ((self.volume / VOLUME_STEP).round() + steps as f32) * VOLUME_STEP;
        self.set_volume(target)
    }

    pub fn handle(&mut self, input: MenuInput) -> Option<MenuAction> {
        match (self.screen, input) {
            (MenuScreen::Main, MenuInput::Start) => Some(MenuAction::StartGame),
            (MenuScreen::Main, MenuInput::OpenSettings) => {
                self.open_settings();
                None
            }
            (MenuScreen::Main, MenuInput::Quit) => {
                info!("quit from menu");
                Some(MenuAction::Quit)
            }
            (MenuScreen::Settings, MenuInput::Back | MenuInput::Quit) => {
                self.show_main_menu();
                None
            }
            (MenuScreen::Settings, MenuInput::VolumeUp) => {
                self.adjust_volume(1);
                None
            }
            (MenuScreen::Settings, MenuInput::VolumeDown) => {
                self.adjust_volume(-1);
                None
            }
            _ => None,
        }
    }
}
