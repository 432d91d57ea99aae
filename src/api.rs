//! Calls against the two sharedstreams endpoints.
//!
//! `webstream` returns the album metadata and photo records, `webasseturls`
//! maps derivative checksums to downloadable URLs. Both are single POST
//! requests; a failure is surfaced to the caller, never retried.

use std::collections::HashMap;

use log::{debug, warn};
use reqwest::Client;
use serde_json::json;

use crate::error::RemoteError;
use crate::models::{Metadata, Photo};

/// Fetches metadata and photo records from the webstream endpoint.
///
/// The `photos` array is required; a response without it is a
/// [`RemoteError::MissingField`]. Individual photos that fail to parse are
/// logged and skipped. Metadata fields are all optional in practice and
/// default to empty values with a warning.
pub async fn get_webstream(
    client: &Client,
    base_url: &str,
) -> Result<(Vec<Photo>, Metadata), RemoteError> {
    let url = format!("{}webstream", base_url);
    let payload = json!({ "streamCtag": null });

    debug!("requesting webstream from {}", url);
    let resp = client.post(&url).json(&payload).send().await?;

    if !resp.status().is_success() {
        return Err(RemoteError::Status {
            endpoint: "webstream",
            status: resp.status(),
        });
    }

    let data: serde_json::Value = resp.json().await?;

    let photos_raw = data
        .get("photos")
        .ok_or(RemoteError::MissingField("photos"))?
        .as_array()
        .ok_or_else(|| RemoteError::Malformed {
            endpoint: "webstream",
            reason: "'photos' is not an array".to_string(),
        })?;

    let photos: Vec<Photo> = photos_raw
        .iter()
        .enumerate()
        .filter_map(|(i, value)| Photo::from_value(value, i))
        .collect();

    let metadata = Metadata {
        stream_name: string_field(&data, "streamName"),
        user_first_name: string_field(&data, "userFirstName"),
        user_last_name: string_field(&data, "userLastName"),
        stream_ctag: string_field(&data, "streamCtag"),
        items_returned: u32_field(&data, "itemsReturned"),
    };

    Ok((photos, metadata))
}

/// Fetches download URLs for the given photo GUIDs from the webasseturls
/// endpoint, returning a map from derivative checksum to full URL.
///
/// Entries missing `url_location` or `url_path` are skipped with a warning;
/// a response without the `items` map is a [`RemoteError::MissingField`].
pub async fn get_asset_urls(
    client: &Client,
    base_url: &str,
    photo_guids: &[String],
) -> Result<HashMap<String, String>, RemoteError> {
    if photo_guids.is_empty() {
        return Ok(HashMap::new());
    }

    let url = format!("{}webasseturls", base_url);
    let payload = json!({ "photoGuids": photo_guids });

    debug!(
        "requesting asset urls for {} photos from {}",
        photo_guids.len(),
        url
    );
    let resp = client.post(&url).json(&payload).send().await?;

    if !resp.status().is_success() {
        return Err(RemoteError::Status {
            endpoint: "webasseturls",
            status: resp.status(),
        });
    }

    let data: serde_json::Value = resp.json().await?;

    let items = data
        .get("items")
        .ok_or(RemoteError::MissingField("items"))?
        .as_object()
        .ok_or_else(|| RemoteError::Malformed {
            endpoint: "webasseturls",
            reason: "'items' is not an object".to_string(),
        })?;

    let mut urls = HashMap::new();
    for (checksum, item) in items {
        let location = match item.get("url_location").and_then(|v| v.as_str()) {
            Some(s) if !s.is_empty() => s,
            _ => {
                warn!("missing url_location for checksum {}", checksum);
                continue;
            }
        };
        let path = match item.get("url_path").and_then(|v| v.as_str()) {
            Some(s) if !s.is_empty() => s,
            _ => {
                warn!("missing url_path for checksum {}", checksum);
                continue;
            }
        };
        urls.insert(checksum.clone(), format!("https://{}{}", location, path));
    }

    Ok(urls)
}

fn string_field(data: &serde_json::Value, name: &str) -> String {
    match data.get(name).and_then(|v| v.as_str()) {
        Some(s) => s.to_string(),
        None => {
            warn!("missing or non-string '{}' field", name);
            String::new()
        }
    }
}

fn u32_field(data: &serde_json::Value, name: &str) -> u32 {
    // itemsReturned shows up as both a number and a numeric string
    let value = match data.get(name) {
        Some(v) => v,
        None => {
            warn!("missing '{}' field", name);
            return 0;
        }
    };
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(0);
    }
    if let Some(s) = value.as_str() {
        if let Ok(n) = s.parse::<u32>() {
            return n;
        }
    }
    warn!("could not interpret '{}' field as u32", name);
    0
}
