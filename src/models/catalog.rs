use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One downloadable car model from the remote catalog.
///
/// Every field is optional in the source document and tolerant of the wrong
/// JSON type: strings keep their value, numbers and booleans keep their text,
/// and `null`, objects or arrays decode as empty. An absent or unreadable size
/// decodes as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    /// Internal name, also the asset bundle file name (e.g. "cybertruck")
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub display_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(deserialize_with = "lenient_text")]
    pub version: String,
    #[serde(deserialize_with = "lenient_text")]
    pub download_url: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_text"
    )]
    pub preview_url: Option<String>,
    /// Size in megabytes
    #[serde(deserialize_with = "lenient_size")]
    pub file_size: f32,
}

/// Latest published release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseInfo {
    #[serde(deserialize_with = "lenient_text")]
    pub tag_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub html_url: String,
}

/// Everything needed to tell the player a newer release exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    pub latest_version: String,
    pub release_url: String,
}

/// Text form of a scalar JSON value; `None` for null, objects and arrays.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Accepts `12.5`, `"12.5"`, `null` or garbage; anything unreadable becomes 0.
fn lenient_size<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32).unwrap_or(0.0),
        Value::String(s) => parse_size(&s),
        _ => 0.0,
    })
}

/// Parses a size string, defaulting to 0 on failure.
pub fn parse_size(raw: &str) -> f32 {
    raw.trim().parse::<f32>().unwrap_or(0.0)
}
