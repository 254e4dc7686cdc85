//! Data models for the CustomCars core.
//!
//! - [`CarConfig`]: Per-player car choices, update checker and model browser settings loaded from `CustomCars.yaml`
//! - [`PreferenceList`], [`AvailableSet`], [`ParticipantSlot`], [`Resolution`]: Inputs and output of preference resolution
//! - [`CatalogEntry`], [`ReleaseInfo`], [`UpdateNotice`]: Records decoded from the remote catalog and release feeds
//!
//! Config structs derive `Serialize`/`Deserialize` for YAML persistence. Catalog
//! records are decoded once and never mutated afterwards.

pub mod catalog;
pub mod config;
pub mod preferences;

pub use catalog::{CatalogEntry, ReleaseInfo, UpdateNotice};
pub use config::{CarConfig, ChoiceArity, PlayerChoices};
pub use preferences::{
    AvailableSet, ParticipantSlot, PreferenceError, PreferenceList, Resolution, SENTINEL,
};
