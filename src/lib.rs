// CustomCars - car preference resolution and model catalog handling
//
// This is the library crate containing the engine-independent core of the mod.
// The binary crate (main.rs) provides a command-line entry point over it.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{AvailableSet, CarConfig, CatalogEntry, ParticipantSlot, PreferenceList, Resolution};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
