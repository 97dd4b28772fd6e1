//! VK API access: the operations the download worker needs, behind a trait.
//!
//! The worker only depends on [`AlbumApi`]; [`VkClient`] is the libcurl-backed
//! implementation used in production.

mod client;
mod types;

pub use client::VkClient;

use crate::album_ref::AlbumReference;
use crate::model::PhotoRecord;
use thiserror::Error;

/// API error code for "User authorization failed" (invalid or expired token).
pub const AUTH_FAILED_CODE: i64 = 5;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("access token is empty")]
    EmptyToken,
    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("invalid API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("API response has neither a result nor an error")]
    MissingResponse,
    #[error("album {0} not found")]
    AlbumNotFound(AlbumReference),
}

impl ApiError {
    /// True when the token itself was rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::EmptyToken)
            || matches!(self, ApiError::Api { code, .. } if *code == AUTH_FAILED_CODE)
    }
}

/// Read operations against the photo API.
pub trait AlbumApi {
    /// Checks that the token is usable. Returns the account's display name when known.
    fn authenticate(&self) -> Result<Option<String>, ApiError>;

    /// Title of the album.
    fn album_title(&self, album: &AlbumReference) -> Result<String, ApiError>;

    /// Up to `count` photos starting at `offset`, in album order.
    fn photos_page(
        &self,
        album: &AlbumReference,
        offset: u32,
        count: u32,
    ) -> Result<Vec<PhotoRecord>, ApiError>;
}

impl<T: AlbumApi + ?Sized> AlbumApi for Box<T> {
    fn authenticate(&self) -> Result<Option<String>, ApiError> {
        (**self).authenticate()
    }

    fn album_title(&self, album: &AlbumReference) -> Result<String, ApiError> {
        (**self).album_title(album)
    }

    fn photos_page(
        &self,
        album: &AlbumReference,
        offset: u32,
        count: u32,
    ) -> Result<Vec<PhotoRecord>, ApiError> {
        (**self).photos_page(album, offset, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_classification() {
        assert!(ApiError::EmptyToken.is_auth_failure());
        assert!(ApiError::Api {
            code: 5,
            message: "User authorization failed".into()
        }
        .is_auth_failure());
        assert!(!ApiError::Api {
            code: 15,
            message: "Access denied".into()
        }
        .is_auth_failure());
        assert!(!ApiError::Http(500).is_auth_failure());
    }
}
