//! Offset pagination over an album's photo list.

use crate::album_ref::AlbumReference;
use crate::api::AlbumApi;
use crate::config::MAX_PAGE_SIZE;
use crate::model::PhotoRecord;

use super::events::EventSink;

/// Requests pages at increasing offsets until a page comes back empty. A
/// failed request ends pagination; photos collected so far are kept.
///
/// `page_size` is clamped to 1..=MAX_PAGE_SIZE, and the offset advances by the
/// number of items actually received so a server-side cap never skips photos.
pub fn collect_photos<A: AlbumApi + ?Sized>(
    api: &A,
    album: &AlbumReference,
    page_size: u32,
    events: &EventSink,
) -> Vec<PhotoRecord> {
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let mut photos = Vec::new();
    let mut offset = 0u32;
    loop {
        match api.photos_page(album, offset, page_size) {
            Ok(items) if items.is_empty() => break,
            Ok(items) => {
                let received = u32::try_from(items.len()).unwrap_or(u32::MAX);
                photos.extend(items);
                offset = offset.saturating_add(received);
            }
            Err(e) => {
                events.error(format!("failed to fetch photos at offset {}: {}", offset, e));
                break;
            }
        }
    }
    photos
}
