//! Handling of Apple's 330 host redirect.
//!
//! The sharedstreams service sometimes answers a webstream request with a
//! non-standard 330 status whose body names the host that actually serves
//! the album. The follow-up requests must then go to that host.

use log::debug;
use reqwest::Client;
use serde_json::json;

use crate::error::RemoteError;

/// Probes the webstream endpoint and returns the base URL follow-up requests
/// should use: either the original one, or one rebuilt around the host named
/// in a 330 redirect body.
pub async fn redirected_base_url(
    client: &Client,
    base_url: &str,
    token: &str,
) -> Result<String, RemoteError> {
    let url = format!("{}webstream", base_url);
    let payload = json!({ "streamCtag": null });

    let resp = client.post(&url).json(&payload).send().await?;

    if resp.status().as_u16() == 330 {
        let body: serde_json::Value = resp.json().await?;
        if let Some(host) = body["X-Apple-MMe-Host"].as_str() {
            debug!("redirected to host {}", host);
            return Ok(format!("https://{}/{}/sharedstreams/", host, token));
        }
    }

    Ok(base_url.to_string())
}
