//! Atomic download of a single photo.

use std::path::{Path, PathBuf};

use log::debug;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::error::{DestinationError, Error, RemoteError};
use crate::models::Photo;
use crate::utils;

/// How the output file is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenamePolicy {
    /// `<photoGuid><ext>` — never collides with another photo, and an
    /// existing file marks the photo as already downloaded.
    Derived,
    /// A caller-supplied name, used verbatim and always overwritten.
    Fixed(String),
}

/// Fetches the best derivative of `photo` and writes it into `dest`.
///
/// The bytes go to a `.part` file first and are renamed into place, so a
/// crash mid-download never leaves a half-written file under the final name.
/// The destination directory is created if missing. Returns the path of the
/// written file.
pub async fn download_photo(
    client: &Client,
    photo: &Photo,
    dest: &Path,
    policy: &FilenamePolicy,
) -> Result<PathBuf, Error> {
    let (key, url) = utils::select_best_derivative(&photo.derivatives)
        .ok_or_else(|| RemoteError::NoDerivative(photo.photo_guid.clone()))?;
    debug!("downloading {} (derivative {})", photo.photo_guid, key);

    let resp = client.get(&url).send().await.map_err(RemoteError::from)?;
    if !resp.status().is_success() {
        return Err(RemoteError::Status {
            endpoint: "asset download",
            status: resp.status(),
        }
        .into());
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = resp.bytes().await.map_err(RemoteError::from)?;

    let filename = match policy {
        FilenamePolicy::Fixed(name) => name.clone(),
        FilenamePolicy::Derived => {
            let ext = utils::infer_extension(content_type.as_deref(), &url);
            format!("{}{}", photo.photo_guid, ext)
        }
    };

    tokio::fs::create_dir_all(dest)
        .await
        .map_err(|e| DestinationError::new(dest, e))?;

    let final_path = dest.join(&filename);
    let part_path = dest.join(format!("{}.part", filename));

    write_atomically(&part_path, &final_path, &bytes).await?;
    Ok(final_path)
}

async fn write_atomically(
    part_path: &Path,
    final_path: &Path,
    bytes: &[u8],
) -> Result<(), DestinationError> {
    let mut file = tokio::fs::File::create(part_path)
        .await
        .map_err(|e| DestinationError::new(part_path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| DestinationError::new(part_path, e))?;
    file.flush()
        .await
        .map_err(|e| DestinationError::new(part_path, e))?;
    drop(file);

    tokio::fs::rename(part_path, final_path)
        .await
        .map_err(|e| DestinationError::new(final_path, e))
}
