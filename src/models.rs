//! Data model for the shared-album listing.
//!
//! The webstream endpoint is loosely typed: numeric fields arrive sometimes
//! as numbers and sometimes as strings, and most metadata is optional. The
//! serde helpers here accept both numeric encodings and fall back to `None`
//! (with a warning) rather than failing the whole listing over one field.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

/// Accepts a u64 encoded as either a JSON number or a numeric string.
mod string_or_number {
    use log::warn;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumberVisitor;

        impl Visitor<'_> for StringOrNumberVisitor {
            type Value = Option<u64>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Some(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(u64::try_from(value).ok())
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                match value.parse::<u64>() {
                    Ok(n) => Ok(Some(n)),
                    Err(e) => {
                        warn!("failed to parse {:?} as u64: {}", value, e);
                        Ok(None)
                    }
                }
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }
        }

        deserializer.deserialize_any(StringOrNumberVisitor)
    }

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_u64(*v),
            None => serializer.serialize_none(),
        }
    }
}

/// Same as [`string_or_number`] but for u32 dimension fields.
mod string_or_u32 {
    use log::warn;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumberVisitor;

        impl Visitor<'_> for StringOrNumberVisitor {
            type Value = Option<u32>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(u32::try_from(value).ok())
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(u32::try_from(value).ok())
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                match value.parse::<u32>() {
                    Ok(n) => Ok(Some(n)),
                    Err(e) => {
                        warn!("failed to parse {:?} as u32: {}", value, e);
                        Ok(None)
                    }
                }
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }
        }

        deserializer.deserialize_any(StringOrNumberVisitor)
    }

    pub fn serialize<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_u32(*v),
            None => serializer.serialize_none(),
        }
    }
}

/// One size/quality variant of a photo.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Derivative {
    /// Content checksum, also the key the asset-URL endpoint answers with.
    pub checksum: String,
    #[serde(rename = "fileSize")]
    #[serde(default)]
    #[serde(with = "string_or_number")]
    pub file_size: Option<u64>,
    #[serde(default)]
    #[serde(with = "string_or_u32")]
    pub width: Option<u32>,
    #[serde(default)]
    #[serde(with = "string_or_u32")]
    pub height: Option<u32>,
    /// Download URL, populated by enrichment after the asset-URL call.
    pub url: Option<String>,
}

/// One photo in the shared album.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Photo {
    /// Stable unique identifier; also the basis of derived filenames.
    #[serde(rename = "photoGuid")]
    pub photo_guid: String,
    /// Variants keyed by derivative name ("1", "2", "original", ...).
    pub derivatives: HashMap<String, Derivative>,
    pub caption: Option<String>,
    #[serde(rename = "dateCreated")]
    pub date_created: Option<String>,
    #[serde(default)]
    #[serde(with = "string_or_u32")]
    pub width: Option<u32>,
    #[serde(default)]
    #[serde(with = "string_or_u32")]
    pub height: Option<u32>,
}

/// Album-level metadata from the webstream response.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Metadata {
    #[serde(rename = "streamName")]
    pub stream_name: String,
    #[serde(rename = "userFirstName")]
    pub user_first_name: String,
    #[serde(rename = "userLastName")]
    pub user_last_name: String,
    /// Change tag; a different value means the album contents changed.
    #[serde(rename = "streamCtag")]
    pub stream_ctag: String,
    #[serde(rename = "itemsReturned")]
    pub items_returned: u32,
}

/// A fully fetched listing: metadata plus photos with URLs populated,
/// in the order the endpoint returned them.
#[derive(Debug, Clone)]
pub struct Album {
    pub metadata: Metadata,
    pub photos: Vec<Photo>,
}

impl Photo {
    /// Parses a single photo out of a listing entry, warning and returning
    /// `None` on a malformed entry so one bad photo cannot sink the listing.
    pub fn from_value(value: &serde_json::Value, index: usize) -> Option<Photo> {
        match serde_json::from_value::<Photo>(value.clone()) {
            Ok(photo) => Some(photo),
            Err(e) => {
                warn!("skipping unparseable photo at index {}: {}", index, e);
                None
            }
        }
    }
}
