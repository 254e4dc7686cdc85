//! CustomCars - command-line entry point.
//!
//! Runs the host-independent part of a mod launch against a data directory:
//!
//! 1. Initialize logging → logs/customcars.<date>
//! 2. Load `CustomCars.yaml` (defaults when missing)
//! 3. Scan `AssetBundles/` once for installed cars
//! 4. Rewrite the informational car list and save the config
//! 5. Resolve each player's car and log the outcome
//! 6. If `catalog.json` / `release.json` were dropped next to the config, decode
//!    them and report the catalog and update status
//!
//! # Usage
//!
//! ```text
//! customcars [DATA_DIR]
//! customcars [DATA_DIR] --install MODEL BUNDLE_FILE
//! ```
//!
//! `DATA_DIR` defaults to `CustomCars Data`. With `--install`, the bundle file
//! is copied into `AssetBundles/` under the catalog name of `MODEL` before the
//! scan runs.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use customcars::logging::{LogOptions, setup_logging};
use customcars::models::Resolution;
use customcars::services::{
    check_for_update, install_model, is_model_installed, parse_catalog, scan_asset_bundles,
};
use customcars::{APP_NAME, ConfigManager, VERSION};
use std::fs;

const DEFAULT_DATA_DIR: &str = "CustomCars Data";
const CATALOG_FILE: &str = "catalog.json";
const RELEASE_FILE: &str = "release.json";

fn main() -> Result<()> {
    let _guard = setup_logging(&LogOptions::default())?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let install = take_install_request(&mut args)?;
    let data_dir = args
        .first()
        .map(Utf8PathBuf::from)
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));

    let config_manager = ConfigManager::new(&data_dir)?;
    let mut car_config = config_manager.load_car_config()?;

    let bundle_dir = config_manager.asset_bundle_dir().to_path_buf();
    if let Some((model_name, bundle_file)) = install {
        install_from_file(config_manager.config_dir(), &bundle_dir, &model_name, &bundle_file)?;
    }

    let available = scan_asset_bundles(&bundle_dir)?;
    if available.is_empty() {
        tracing::warn!("No car prefabs loaded from asset bundles");
    }

    car_config.update_available_cars_list(available.iter());
    config_manager.save_car_config(&car_config)?;
    tracing::info!("Available cars: {}", car_config.available_cars.car_list);

    for (slot, resolution) in car_config.resolve_all(&available) {
        match resolution {
            Resolution::Car(car) => tracing::info!("{}: using custom car '{}'", slot, car),
            Resolution::NoOverride => tracing::info!("{}: using default car", slot),
        }
    }

    report_catalog(config_manager.config_dir(), &bundle_dir)?;

    if car_config.should_check_for_updates() {
        report_update(config_manager.config_dir())?;
    }

    tracing::info!("Done");
    Ok(())
}

/// Removes `--install MODEL FILE` from `args`, if present.
fn take_install_request(args: &mut Vec<String>) -> Result<Option<(String, Utf8PathBuf)>> {
    let Some(pos) = args.iter().position(|a| a == "--install") else {
        return Ok(None);
    };
    if args.len() < pos + 3 {
        anyhow::bail!("Usage: customcars [DATA_DIR] --install MODEL BUNDLE_FILE");
    }
    let taken: Vec<String> = args.drain(pos..pos + 3).collect();
    Ok(Some((taken[1].clone(), Utf8PathBuf::from(&taken[2]))))
}

fn install_from_file(
    data_dir: &Utf8Path,
    bundle_dir: &Utf8Path,
    model_name: &str,
    bundle_file: &Utf8Path,
) -> Result<()> {
    let body = read_optional(&data_dir.join(CATALOG_FILE))?
        .with_context(|| format!("{} is required to install a model", CATALOG_FILE))?;

    let model = parse_catalog(&body)
        .into_iter()
        .find(|m| m.name.eq_ignore_ascii_case(model_name))
        .with_context(|| format!("Model '{}' not found in catalog", model_name))?;

    let data = fs::read(bundle_file)
        .with_context(|| format!("Failed to read bundle file: {}", bundle_file))?;

    let installed = install_model(bundle_dir, &model, &data)?;
    tracing::info!("Installed {} to {}", model.name, installed.path);
    Ok(())
}

fn read_optional(path: &Utf8Path) -> Result<Option<String>> {
    if !path.exists() {
        tracing::debug!("{} not present, skipping", path);
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read {}", path))
}

fn report_catalog(data_dir: &Utf8Path, bundle_dir: &Utf8Path) -> Result<()> {
    let Some(body) = read_optional(&data_dir.join(CATALOG_FILE))? else {
        return Ok(());
    };

    let models = parse_catalog(&body);
    if models.is_empty() {
        tracing::warn!("Catalog is empty or failed to parse");
        return Ok(());
    }

    tracing::info!("Successfully loaded {} models from catalog", models.len());
    for model in &models {
        let status = if is_model_installed(bundle_dir, &model.name) {
            "installed"
        } else {
            "available"
        };
        tracing::info!(
            "  {} ({}) v{} by {} - {:.1} MB [{}]",
            model.display_name,
            model.name,
            model.version,
            model.author,
            model.file_size,
            status
        );
    }
    Ok(())
}

fn report_update(data_dir: &Utf8Path) -> Result<()> {
    let Some(body) = read_optional(&data_dir.join(RELEASE_FILE))? else {
        return Ok(());
    };

    match check_for_update(VERSION, &body) {
        Ok(Some(notice)) => tracing::info!(
            "Update available: {} ({})",
            notice.latest_version,
            notice.release_url
        ),
        Ok(None) => {}
        Err(e) => tracing::warn!("Update check failed: {}", e),
    }
    Ok(())
}
