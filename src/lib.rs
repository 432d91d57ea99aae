//! Batch downloader for public iCloud shared albums.
//!
//! Given a shared-album token this crate fetches the album listing, plans
//! which photos still need downloading (deduplicating against files already
//! in the destination directory), and writes image files atomically. The
//! planning logic lives in [`plan`]; [`fetch_album`] wraps the two
//! sharedstreams calls and the URL enrichment into one listing fetch.
//!
//! # Logging
//!
//! All diagnostics go through the [`log`] crate; the bundled binary wires it
//! to `env_logger`. Library users bring their own logger.

pub mod api;
pub mod base_url;
pub mod download;
pub mod enrich;
pub mod error;
pub mod models;
pub mod plan;
pub mod redirect;
pub mod utils;

pub use download::FilenamePolicy;
pub use error::{ConfigError, DestinationError, Error, RemoteError};
pub use models::{Album, Derivative, Metadata, Photo};

use reqwest::Client;

/// Fetches the complete listing of a shared album.
///
/// Resolves the partitioned base URL from the token, follows an optional 330
/// host redirect, fetches metadata and photo records, then fetches and joins
/// the per-derivative download URLs. Fails fast on the first remote error;
/// without a listing no plan can be computed.
pub async fn fetch_album(client: &Client, token: &str) -> Result<Album, Error> {
    let base = base_url::base_url(token)?;
    fetch_album_at(client, &base, token).await
}

/// Same as [`fetch_album`] but starting from an explicit base URL.
pub async fn fetch_album_at(client: &Client, base_url: &str, token: &str) -> Result<Album, Error> {
    let base = redirect::redirected_base_url(client, base_url, token).await?;

    let (mut photos, metadata) = api::get_webstream(client, &base).await?;

    let guids: Vec<String> = photos.iter().map(|p| p.photo_guid.clone()).collect();
    let urls = api::get_asset_urls(client, &base, &guids).await?;
    enrich::enrich_photos_with_urls(&mut photos, &urls);

    Ok(Album { metadata, photos })
}
