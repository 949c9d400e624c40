//! Lenient decoding of optional text fields.
//!
//! The backend encodes `transcript` and `summary` as nullable SQL strings,
//! which reach the wire either as `{"String": "...", "Valid": true}`, as a
//! plain string, or not at all. All shapes decode to `Option<String>`, with
//! invalid or empty values mapped to `None`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum WireText {
    Plain(String),
    Nullable {
        #[serde(rename = "String", default)]
        string: String,
        #[serde(rename = "Valid", default)]
        valid: bool,
    },
}

/// Deserialize an optional text field from any of the backend's encodings.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Option::<WireText>::deserialize(deserializer)?;
    let text = match wire {
        Some(WireText::Plain(s)) => Some(s),
        Some(WireText::Nullable { string, valid: true }) => Some(string),
        Some(WireText::Nullable { valid: false, .. }) | None => None,
    };
    Ok(text.filter(|s| !s.is_empty()))
}
