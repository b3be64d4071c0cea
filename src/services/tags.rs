//! Resource tag decoding
//!
//! Cost records carry a JSON tag blob ({"bu":..,"app":..,"env":..}).
//! Decoding is best-effort: a malformed payload yields all-empty fields and
//! the record is classified as untagged downstream, never an error.

use serde::Deserialize;

/// Borrowed view of the raw tag payload (zero-copy with borrowed strings)
#[derive(Deserialize, Default)]
struct RawTags<'a> {
    #[serde(borrow, default)]
    bu: Option<&'a str>,
    #[serde(borrow, default)]
    app: Option<&'a str>,
    #[serde(borrow, default)]
    env: Option<&'a str>,
}

/// Decoded tag dimensions. An empty field means the tag was absent or the
/// payload was malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTags {
    pub business_unit: String,
    pub application: String,
    pub environment: String,
}

impl DecodedTags {
    /// True when any of the three tag dimensions is absent.
    pub fn missing_any(&self) -> bool {
        self.business_unit.is_empty() || self.application.is_empty() || self.environment.is_empty()
    }
}

/// Decode a raw tag blob. Never fails.
pub fn decode_tags(raw: &str) -> DecodedTags {
    if raw.is_empty() {
        return DecodedTags::default();
    }

    let mut buf = raw.as_bytes().to_vec();
    match simd_json::from_slice::<RawTags>(&mut buf) {
        Ok(tags) => DecodedTags {
            business_unit: tags.bu.unwrap_or("").to_string(),
            application: tags.app.unwrap_or("").to_string(),
            environment: tags.env.unwrap_or("").to_string(),
        },
        Err(_) => DecodedTags::default(),
    }
}
