//! Download planning: deduplication and photo selection.
//!
//! Deduplication is filename-derived: a derived download is saved as
//! `<photoGuid><ext>`, so the GUIDs already present in the destination
//! directory can be recovered from file stems without a manifest. Deleting a
//! file from the directory therefore makes its photo eligible again.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::DestinationError;
use crate::models::Photo;

/// Builds the set of photo GUIDs already downloaded into `dir`.
///
/// Enumerates regular files non-recursively and takes each file stem. A
/// missing directory is an empty set; any other I/O failure is a
/// [`DestinationError`].
pub fn downloaded_set(dir: &Path) -> Result<HashSet<String>, DestinationError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => return Err(DestinationError::new(dir, e)),
    };

    let mut set = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| DestinationError::new(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            set.insert(stem.to_string());
        }
    }

    debug!("found {} previously downloaded files", set.len());
    Ok(set)
}

/// Every photo of `listing` not yet in `downloaded`, in listing order.
///
/// Running the plan and feeding the resulting GUIDs back into `downloaded`
/// yields an empty plan, so repeated runs against an unchanged album are
/// no-ops.
pub fn plan_all<'a>(listing: &'a [Photo], downloaded: &HashSet<String>) -> Vec<&'a Photo> {
    listing
        .iter()
        .filter(|photo| !downloaded.contains(&photo.photo_guid))
        .collect()
}

/// One photo chosen uniformly at random from `listing` after skipping the
/// first `ignore` entries and anything already in `downloaded`.
///
/// `None` means nothing new to fetch, which is a legitimate terminal state
/// rather than an error. The ignore window applies before deduplication so a
/// caller can exclude a known prefix of the album without a ledger.
pub fn plan_single_random<'a, R: Rng + ?Sized>(
    listing: &'a [Photo],
    downloaded: &HashSet<String>,
    ignore: usize,
    rng: &mut R,
) -> Option<&'a Photo> {
    let start = ignore.min(listing.len());
    let candidates: Vec<&Photo> = listing[start..]
        .iter()
        .filter(|photo| !downloaded.contains(&photo.photo_guid))
        .collect();

    debug!(
        "single-random selection from {} candidates (ignored first {})",
        candidates.len(),
        start
    );
    candidates.choose(rng).copied()
}
