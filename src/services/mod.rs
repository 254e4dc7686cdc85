//! Services module - engine-independent logic of the CustomCars mod.
//!
//! The host game owns rendering, scene objects and networking. Everything here
//! takes its inputs as explicit values and hands back plain results, so the
//! services can be exercised without the game running.
//!
//! # Components
//!
//! - [`preference`]: Resolves each player's ranked car choices against the installed cars
//! - [`scanner`]: Substring-based field and record extraction for loosely formed JSON
//! - [`catalog`]: Model catalog and release-info decoding, version comparison, update check
//! - [`inventory`]: Derives the installed car set from the asset bundle directory and installs downloaded bundles
//! - [`readiness`]: Two-phase retry loop for objects that appear after a scene loads
//!
//! # Usage Example
//!
//! ```ignore
//! use customcars::services::{parse_catalog, resolve, scan_asset_bundles};
//!
//! let available = scan_asset_bundles(manager.asset_bundle_dir())?;
//! for (slot, resolution) in car_config.resolve_all(&available) {
//!     println!("{slot}: {resolution:?}");
//! }
//!
//! let models = parse_catalog(&catalog_body);
//! ```

pub mod catalog;
pub mod inventory;
pub mod preference;
pub mod readiness;
pub mod scanner;

pub use catalog::{
    CatalogError, check_for_update, is_newer_version, parse_catalog, parse_catalog_entry,
    parse_release_info,
};
pub use inventory::{
    InstalledModel, InventoryError, install_model, is_model_installed, scan_asset_bundles,
    validate_model_name,
};
pub use preference::resolve;
pub use readiness::{RetryPolicy, poll_until, wait_until_ready};
pub use scanner::{extract_field, extract_number, extract_records};
