//! Joining asset URLs onto photo derivatives.
//!
//! The webstream and webasseturls responses arrive separately; the URL map is
//! keyed by derivative checksum, so each derivative whose checksum appears in
//! the map gets its URL filled in here.

use std::collections::HashMap;

use crate::models::Photo;

/// Populates the `url` field of every derivative whose checksum has an entry
/// in `urls`. Derivatives without a match are left URL-less and are skipped
/// at download time.
pub fn enrich_photos_with_urls(photos: &mut [Photo], urls: &HashMap<String, String>) {
    for photo in photos.iter_mut() {
        for derivative in photo.derivatives.values_mut() {
            if let Some(url) = urls.get(&derivative.checksum) {
                derivative.url = Some(url.clone());
            }
        }
    }
}
