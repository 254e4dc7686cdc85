//! Model catalog and release-info decoding, plus the update check.
//!
//! Both documents come from remote, hand-edited sources. Decoding never halts
//! the caller: a document that is valid JSON is decoded with typed serde
//! structs whose fields all tolerate absence and wrong types. Only text that
//! is not valid JSON at all falls back to the lenient scanner in
//! [`crate::services::scanner`].

use crate::models::catalog::parse_size;
use crate::models::{CatalogEntry, ReleaseInfo, UpdateNotice};
use crate::services::scanner::{extract_field, extract_number, extract_records};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::LazyLock;
use thiserror::Error;

/// Key of the array holding model records in the catalog document
pub const MODELS_KEY: &str = "models";

/// Errors from decoding a single record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Record is not a JSON object: {0}")]
    NotAnObject(String),

    #[error("Required field '{0}' is missing")]
    MissingField(&'static str),
}

/// Dotted numeric version with two to four components
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+){1,3}$").expect("Invalid version regex"));

/// Decode every model in a catalog document.
///
/// # Arguments
/// * `json` - Raw catalog body, expected as `{"models":[...]}`
///
/// # Returns
/// The decoded models in document order. Elements that are not objects are
/// logged and skipped; a document without a `models` array yields an empty list.
pub fn parse_catalog(json: &str) -> Vec<CatalogEntry> {
    let document = match serde_json::from_str::<Value>(json) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Catalog is not valid JSON ({}), scanning leniently", e);
            return extract_records(json, MODELS_KEY)
                .into_iter()
                .filter_map(|record| match parse_catalog_entry(record) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::warn!("Skipping catalog record: {}", e);
                        None
                    }
                })
                .collect();
        }
    };

    let Some(models) = document.get(MODELS_KEY).and_then(Value::as_array) else {
        tracing::warn!("Catalog has no '{}' array", MODELS_KEY);
        return Vec::new();
    };

    let entries: Vec<CatalogEntry> = models
        .iter()
        .filter_map(|model| match entry_from_value(model) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping catalog record: {}", e);
                None
            }
        })
        .collect();

    tracing::debug!("Decoded catalog with {} model(s)", entries.len());
    entries
}

fn entry_from_value(value: &Value) -> Result<CatalogEntry, CatalogError> {
    if !value.is_object() {
        return Err(CatalogError::NotAnObject(preview(&value.to_string())));
    }
    // Every field is lenient, so an object always decodes
    CatalogEntry::deserialize(value).map_err(|e| CatalogError::NotAnObject(e.to_string()))
}

/// Decode one catalog record.
///
/// # Arguments
/// * `record` - Text of a single `{ ... }` record
///
/// # Returns
/// The entry, with missing or mistyped keys as empty strings, `None` for the
/// preview URL and `0.0` for the size. Text that is not an object is rejected.
pub fn parse_catalog_entry(record: &str) -> Result<CatalogEntry, CatalogError> {
    let trimmed = record.trim();
    if !trimmed.starts_with('{') {
        return Err(CatalogError::NotAnObject(preview(trimmed)));
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return entry_from_value(&value);
    }

    let field = |key: &str| extract_field(trimmed, key).unwrap_or_default().to_string();

    Ok(CatalogEntry {
        name: field("name"),
        display_name: field("displayName"),
        description: field("description"),
        author: field("author"),
        version: field("version"),
        download_url: field("downloadUrl"),
        preview_url: extract_field(trimmed, "previewUrl").map(str::to_string),
        file_size: extract_number(trimmed, "fileSize")
            .map(parse_size)
            .unwrap_or(0.0),
    })
}

/// Decode the latest-release document.
///
/// # Arguments
/// * `json` - Raw body of the latest-release response
///
/// # Returns
/// The release, or [`CatalogError::MissingField`] when no `tag_name` is
/// present, since there is nothing to compare.
pub fn parse_release_info(json: &str) -> Result<ReleaseInfo, CatalogError> {
    let release = match serde_json::from_str::<Value>(json) {
        Ok(value) => ReleaseInfo::deserialize(&value).unwrap_or_default(),
        Err(_) => ReleaseInfo {
            tag_name: extract_field(json, "tag_name").unwrap_or_default().to_string(),
            html_url: extract_field(json, "html_url").unwrap_or_default().to_string(),
        },
    };

    if release.tag_name.trim().is_empty() {
        return Err(CatalogError::MissingField("tag_name"));
    }
    Ok(release)
}

/// Components are bounded like the game runtime's version type (at most `i32::MAX`).
fn parse_version(raw: &str) -> Option<Vec<i32>> {
    let trimmed = raw.trim().trim_start_matches(['v', 'V']);
    if !VERSION_PATTERN.is_match(trimmed) {
        return None;
    }
    trimmed.split('.').map(|part| part.parse().ok()).collect()
}

/// True only when `latest` is a strictly newer dotted version than `current`.
///
/// A leading `v`/`V` is ignored. If either side is not a dotted numeric
/// version the answer is `false`. Components compare numerically; when one
/// version has more components and the shared ones are equal, the longer one
/// is newer (`1.0.1` > `1.0`).
pub fn is_newer_version(latest: &str, current: &str) -> bool {
    let (Some(latest_parts), Some(current_parts)) = (parse_version(latest), parse_version(current))
    else {
        tracing::warn!(
            "Failed to compare versions '{}' and '{}'",
            latest,
            current
        );
        return false;
    };

    latest_parts.cmp(&current_parts) == Ordering::Greater
}

/// Compare a release document against the running version.
///
/// # Arguments
/// * `current_version` - Version of the installed mod (e.g. "1.0.0")
/// * `release_json` - Raw body of the latest-release response
///
/// # Returns
/// The notice to show when the release is newer, `None` otherwise
///
/// # Errors
/// [`CatalogError::MissingField`] when the release carries no `tag_name`
pub fn check_for_update(
    current_version: &str,
    release_json: &str,
) -> Result<Option<UpdateNotice>, CatalogError> {
    let release = parse_release_info(release_json)?;

    tracing::info!("Latest version on GitHub: {}", release.tag_name);
    tracing::info!("Current version: {}", current_version);

    if is_newer_version(&release.tag_name, current_version) {
        tracing::info!("New update available!");
        Ok(Some(UpdateNotice {
            latest_version: release.tag_name,
            release_url: release.html_url,
        }))
    } else {
        tracing::info!("You are running the latest version");
        Ok(None)
    }
}

fn preview(text: &str) -> String {
    text.chars().take(32).collect()
}
