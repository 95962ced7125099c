pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod menu;
pub mod prefs;
pub mod score;
