//! Derivative selection and filename-extension inference.

use crate::models::Derivative;
use log::warn;
use std::collections::HashMap;

/// Maps a MIME type to a filename extension (with leading dot).
///
/// The common photo/video types get fixed mappings; anything else falls back
/// to mime_guess's extension table, and finally to `.jpg`.
pub fn extension_from_mime_type(mime_type: &str) -> String {
    match mime_type {
        "image/jpeg" => ".jpg".to_string(),
        "image/png" => ".png".to_string(),
        "image/heic" => ".heic".to_string(),
        "image/heif" => ".heif".to_string(),
        "image/gif" => ".gif".to_string(),
        "video/mp4" => ".mp4".to_string(),
        "video/quicktime" => ".mov".to_string(),
        _ => match mime_guess::get_mime_extensions_str(mime_type).and_then(|exts| exts.first()) {
            Some(ext) => format!(".{}", ext),
            None => {
                warn!("unknown MIME type {}, defaulting to .jpg", mime_type);
                ".jpg".to_string()
            }
        },
    }
}

/// Infers the extension for a downloaded asset from the response content
/// type when present, otherwise from the URL's path suffix.
pub fn infer_extension(content_type: Option<&str>, url: &str) -> String {
    if let Some(mime) = content_type {
        // strip any "; charset=..." parameter
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        if !essence.is_empty() && essence != "application/octet-stream" {
            return extension_from_mime_type(essence);
        }
    }

    let path = url.split('?').next().unwrap_or(url);
    if let Some(dot) = path.rfind('.') {
        let suffix = &path[dot + 1..];
        if !suffix.is_empty() && suffix.len() <= 5 && !suffix.contains('/') {
            return format!(".{}", suffix.to_ascii_lowercase());
        }
    }

    ".jpg".to_string()
}

/// Selects the derivative to download for a photo.
///
/// Originals (key containing "original"/"full", or the "3"/"4" keys Apple
/// uses for full quality) win; otherwise the highest resolution among
/// derivatives with known dimensions; otherwise any derivative with a URL.
/// Returns the derivative key and its URL, or `None` if nothing has a URL.
pub fn select_best_derivative(
    derivatives: &HashMap<String, Derivative>,
) -> Option<(String, String)> {
    let mut best: Option<(String, String)> = None;
    let mut max_resolution: u64 = 0;
    let mut has_original = false;

    for (key, derivative) in derivatives {
        let url = match &derivative.url {
            Some(url) => url,
            None => continue,
        };

        let lower = key.to_lowercase();
        let is_original =
            lower.contains("original") || lower.contains("full") || key == "3" || key == "4";

        if is_original {
            has_original = true;
            if let (Some(w), Some(h)) = (derivative.width, derivative.height) {
                let resolution = w as u64 * h as u64;
                if resolution > max_resolution {
                    max_resolution = resolution;
                    best = Some((key.clone(), url.clone()));
                }
            } else if best.is_none() {
                best = Some((key.clone(), url.clone()));
            }
        } else if let (Some(w), Some(h)) = (derivative.width, derivative.height) {
            let resolution = w as u64 * h as u64;
            if resolution > max_resolution && !has_original {
                max_resolution = resolution;
                best = Some((key.clone(), url.clone()));
            }
        }
    }

    if best.is_none() {
        for (key, derivative) in derivatives {
            if let Some(url) = &derivative.url {
                return Some((key.clone(), url.clone()));
            }
        }
    }

    best
}
