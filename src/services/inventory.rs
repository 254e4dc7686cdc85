//! Installed car inventory, derived from the asset bundle directory.
//!
//! Each car model is stored as one bundle file named after the model. Unity
//! build side files (`.manifest`, `.meta`) sit next to the bundles and are
//! ignored.

use crate::models::{AvailableSet, CatalogEntry};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

const IGNORED_EXTENSIONS: [&str; 2] = ["manifest", "meta"];

/// Errors from mapping a catalog model onto the bundle directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Model name '{0}' is not a plain file name")]
    InvalidModelName(String),
}

/// A bundle written by [`install_model`]
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledModel {
    pub path: Utf8PathBuf,
    pub size_mb: f32,
    /// An earlier copy of the bundle was overwritten
    pub replaced: bool,
}

/// Check that a catalog model name is usable as a bare file name.
///
/// Names come from the remote catalog, so anything that could leave the
/// bundle directory is rejected.
pub fn validate_model_name(name: &str) -> Result<&str, InventoryError> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\', ':', '\0'])
        || name.contains("..")
        || name == ".";

    if invalid {
        return Err(InventoryError::InvalidModelName(name.to_string()));
    }
    Ok(name)
}

/// Build the available car set from the bundle files in `bundle_dir`.
///
/// # Arguments
/// * `bundle_dir` - Directory holding one bundle file per car model
///
/// # Returns
/// The lowercase file names of all top-level bundles. A missing directory is
/// created and yields an empty set.
pub fn scan_asset_bundles(bundle_dir: &Utf8Path) -> Result<AvailableSet> {
    if !bundle_dir.exists() {
        tracing::warn!("AssetBundle directory not found: {}", bundle_dir);
        fs::create_dir_all(bundle_dir)
            .with_context(|| format!("Failed to create asset bundle directory: {}", bundle_dir))?;
        return Ok(AvailableSet::new());
    }

    let mut bundles = bundle_files(bundle_dir)?;
    bundles.sort();

    let cars: AvailableSet = bundles.iter().filter_map(|p| p.file_name()).collect();

    tracing::info!(
        "Found {} car bundle(s) in {}: {}",
        cars.len(),
        bundle_dir,
        cars.sorted().join(", ")
    );
    Ok(cars)
}

fn bundle_files(bundle_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut bundles = Vec::new();
    for entry in bundle_dir
        .read_dir_utf8()
        .with_context(|| format!("Failed to read asset bundle directory: {}", bundle_dir))?
    {
        let entry = entry.context("Failed to read asset bundle directory entry")?;
        let path = entry.path();

        if !path.is_file() || is_side_file(path) {
            continue;
        }
        bundles.push(path.to_path_buf());
    }
    Ok(bundles)
}

/// Whether a catalog model has already been downloaded.
///
/// # Arguments
/// * `bundle_dir` - Directory holding the bundle files
/// * `model_name` - Catalog `name` of the model
///
/// # Returns
/// True when a bundle with that name exists, compared case-insensitively the
/// same way [`scan_asset_bundles`] names cars. Names that are not plain file
/// names are never installed.
pub fn is_model_installed(bundle_dir: &Utf8Path, model_name: &str) -> bool {
    if validate_model_name(model_name).is_err() {
        tracing::warn!("Ignoring invalid model name '{}'", model_name);
        return false;
    }

    let wanted = model_name.to_lowercase();
    match bundle_files(bundle_dir) {
        Ok(bundles) => bundles
            .iter()
            .filter_map(|p| p.file_name())
            .any(|name| name.to_lowercase() == wanted),
        Err(e) => {
            tracing::debug!("Could not list bundles: {:#}", e);
            false
        }
    }
}

/// Write a downloaded bundle into the bundle directory.
///
/// # Arguments
/// * `bundle_dir` - Directory holding the bundle files (created if missing)
/// * `model` - Catalog entry; its `name` becomes the file name
/// * `data` - Raw bundle bytes
///
/// # Returns
/// Where the bundle was written, its size in MB, and whether it replaced an
/// existing file
pub fn install_model(
    bundle_dir: &Utf8Path,
    model: &CatalogEntry,
    data: &[u8],
) -> Result<InstalledModel> {
    let name = validate_model_name(&model.name)?;

    if !bundle_dir.exists() {
        fs::create_dir_all(bundle_dir)
            .with_context(|| format!("Failed to create asset bundle directory: {}", bundle_dir))?;
    }

    let path = bundle_dir.join(name);
    let replaced = path.exists();
    if replaced {
        tracing::warn!("Model '{}' already exists. Overwriting...", name);
    }

    fs::write(&path, data).with_context(|| format!("Failed to save model {}", name))?;

    let size_mb = data.len() as f32 / 1024.0 / 1024.0;
    tracing::info!(
        "Successfully downloaded {} ({:.2} MB)",
        model.display_name,
        size_mb
    );

    Ok(InstalledModel {
        path,
        size_mb,
        replaced,
    })
}

fn is_side_file(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| IGNORED_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bundle_dir() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, path)
    }

    fn model(name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            display_name: name.to_uppercase(),
            ..CatalogEntry::default()
        }
    }

    #[test]
    fn test_scan_skips_side_files() {
        let (_temp_dir, dir) = bundle_dir();
        fs::write(dir.join("Cybertruck"), b"bundle").unwrap();
        fs::write(dir.join("Cybertruck.manifest"), b"manifest").unwrap();
        fs::write(dir.join("redcar"), b"bundle").unwrap();
        fs::write(dir.join("redcar.meta"), b"meta").unwrap();
        fs::create_dir(dir.join("nested")).unwrap();

        let cars = scan_asset_bundles(&dir).unwrap();
        assert_eq!(cars.sorted(), vec!["cybertruck", "redcar"]);
    }

    #[test]
    fn test_scan_creates_missing_directory() {
        let (_temp_dir, dir) = bundle_dir();
        let missing = dir.join("AssetBundles");

        let cars = scan_asset_bundles(&missing).unwrap();
        assert!(cars.is_empty());
        assert!(missing.exists());
    }

    #[test]
    fn test_is_model_installed() {
        let (_temp_dir, dir) = bundle_dir();
        fs::write(dir.join("van"), b"bundle").unwrap();

        assert!(is_model_installed(&dir, "van"));
        assert!(!is_model_installed(&dir, "truck"));
    }

    #[test]
    fn test_is_model_installed_ignores_case() {
        let (_temp_dir, dir) = bundle_dir();
        fs::write(dir.join("Cybertruck"), b"bundle").unwrap();

        assert!(is_model_installed(&dir, "cybertruck"));
        assert!(is_model_installed(&dir, "CYBERTRUCK"));
    }

    #[test]
    fn test_is_model_installed_rejects_paths() {
        let (_temp_dir, root) = bundle_dir();
        let dir = root.join("AssetBundles");
        fs::create_dir(&dir).unwrap();
        fs::write(root.join("CustomCars.yaml"), b"config").unwrap();

        assert!(!is_model_installed(&dir, "../CustomCars.yaml"));
        assert!(!is_model_installed(&dir, ""));
        assert!(!is_model_installed(&dir, "missing-dir-is-fine"));
    }

    #[test]
    fn test_is_model_installed_skips_side_files() {
        let (_temp_dir, dir) = bundle_dir();
        fs::write(dir.join("van.manifest"), b"manifest").unwrap();
        assert!(!is_model_installed(&dir, "van.manifest"));
    }

    #[test]
    fn test_validate_model_name() {
        assert!(validate_model_name("cybertruck").is_ok());
        assert!(validate_model_name("car_v2.bundle").is_ok());
        for bad in ["", "  ", ".", "..", "../x", "a/b", r"a\b", "C:car", "x..y"] {
            assert_eq!(
                validate_model_name(bad),
                Err(InventoryError::InvalidModelName(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_install_model_creates_directory() {
        let (_temp_dir, root) = bundle_dir();
        let dir = root.join("AssetBundles");
        let data = vec![0u8; 1024 * 1024];

        let installed = install_model(&dir, &model("cybertruck"), &data).unwrap();

        assert_eq!(installed.path, dir.join("cybertruck"));
        assert_eq!(installed.size_mb, 1.0);
        assert!(!installed.replaced);
        assert_eq!(fs::read(&installed.path).unwrap().len(), data.len());
        assert!(is_model_installed(&dir, "cybertruck"));
    }

    #[test]
    fn test_install_model_overwrites() {
        let (_temp_dir, dir) = bundle_dir();
        fs::write(dir.join("van"), b"old").unwrap();

        let installed = install_model(&dir, &model("van"), b"new bundle").unwrap();

        assert!(installed.replaced);
        assert_eq!(fs::read(dir.join("van")).unwrap(), b"new bundle");
    }

    #[test]
    fn test_install_model_rejects_escaping_name() {
        let (_temp_dir, root) = bundle_dir();
        let dir = root.join("AssetBundles");

        let result = install_model(&dir, &model("../CustomCars.yaml"), b"evil");

        assert!(result.is_err());
        assert!(!root.join("CustomCars.yaml").exists());
    }
}
