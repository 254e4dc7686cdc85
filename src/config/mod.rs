use crate::models::CarConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the car configuration inside the data directory
pub const CAR_CONFIG_FILE: &str = "CustomCars.yaml";

/// Directory holding downloaded asset bundles, relative to the data directory
pub const ASSET_BUNDLE_DIR: &str = "AssetBundles";

/// Configuration manager for loading and saving the car configuration.
///
/// Owns the data directory layout:
/// - `CustomCars.yaml`: player choices and settings
/// - `AssetBundles/`: one file per installed car model
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    car_config_path: Utf8PathBuf,
    asset_bundle_dir: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified data directory.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Arguments
    /// * `config_dir` - Data directory holding `CustomCars.yaml` and `AssetBundles/`
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            car_config_path: config_dir.join(CAR_CONFIG_FILE),
            asset_bundle_dir: config_dir.join(ASSET_BUNDLE_DIR),
            config_dir,
        })
    }

    /// Load the car configuration file.
    ///
    /// # Returns
    /// The loaded CarConfig, or default if file doesn't exist
    pub fn load_car_config(&self) -> Result<CarConfig> {
        if !self.car_config_path.exists() {
            tracing::warn!(
                "Car config file not found at {}, using defaults",
                self.car_config_path
            );
            return Ok(CarConfig::default());
        }

        let file_contents = fs::read_to_string(&self.car_config_path)
            .with_context(|| format!("Failed to read car config: {}", self.car_config_path))?;

        let config: CarConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse car config: {}", self.car_config_path))?;

        tracing::info!("Loaded car config from {}", self.car_config_path);
        Ok(config)
    }

    /// Save the car configuration file.
    ///
    /// # Arguments
    /// * `config` - The configuration to write, replacing the file on disk
    pub fn save_car_config(&self, config: &CarConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize car config to YAML")?;

        fs::write(&self.car_config_path, yaml_string)
            .with_context(|| format!("Failed to write car config: {}", self.car_config_path))?;

        tracing::info!("Saved car config to {}", self.car_config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn car_config_path(&self) -> &Utf8Path {
        &self.car_config_path
    }

    /// Directory scanned for installed car models
    pub fn asset_bundle_dir(&self) -> &Utf8Path {
        &self.asset_bundle_dir
    }
}
