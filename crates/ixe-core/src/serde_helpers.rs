//! Shared serde helper functions used by the configuration types.

use serde::{Deserialize, Deserializer};

/// Accepts either a YAML string or a YAML integer and yields its text.
///
/// Ports are commonly written as `9088` or `"9088"`; both mean the same thing.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => Ok(s),
        Raw::Int(n) => Ok(n.to_string()),
    }
}
