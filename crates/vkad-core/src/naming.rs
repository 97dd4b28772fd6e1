//! Folder and file names derived from album titles and photo ids.

use crate::album_ref::AlbumReference;

/// Keeps alphanumerics, space, `_` and `-`; drops everything else, then trims.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Title used when album metadata cannot be fetched.
pub fn fallback_title(album: &AlbumReference) -> String {
    format!("album_{}", album)
}

/// `<sanitized title> (<owner>_<album>)`.
pub fn album_folder_name(title: &str, album: &AlbumReference) -> String {
    format!("{} ({})", sanitize_title(title), album)
}

pub fn photo_file_name(photo_id: i64) -> String {
    format!("{}.jpg", photo_id)
}
